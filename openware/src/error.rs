// SPDX-FileCopyrightText: 2026 Contributors to the OpenWare project.
// SPDX-License-Identifier: Apache-2.0

//! Error types for bridged native calls.
//!
//! Every failure of a bridged call is one of three kinds. None of them is
//! retried internally: a missing file or a missing export cannot appear
//! without an external change, so the caller decides what happens next.

use std::path::PathBuf;

use crate::config::{LIBRARY_STEM, OVERRIDE_ENV_VAR};

/// Convenience result type using [`Error`] as the error variant.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur while locating, loading or binding the native library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No override was set and none of the candidate paths exists.
    #[error(
        "native library `{}` was not found ({probed} locations probed). \
         Build the project first or set {}.",
        LIBRARY_STEM,
        OVERRIDE_ENV_VAR
    )]
    LibraryNotFound {
        /// Number of candidate paths that were checked.
        probed: usize,
    },

    /// A path was found or overridden but the platform loader rejected it
    /// (missing file, wrong format, architecture or dependency mismatch).
    #[error("failed to load native library \"{}\": {source}", path.display())]
    LibraryLoad {
        /// The path handed to the loader.
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },

    /// The library is loaded but the requested export could not be bound.
    #[error("failed to bind symbol `{symbol}`: {source}")]
    SymbolBind {
        /// Name of the requested export.
        symbol: String,
        #[source]
        source: libloading::Error,
    },
}
