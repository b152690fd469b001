// SPDX-FileCopyrightText: 2026 Contributors to the OpenWare project.
// SPDX-License-Identifier: Apache-2.0

//! # OpenWare - native API bridge
//!
//! Locates the separately built `openware_api` shared library at runtime,
//! binds its C exports with explicit signatures and exposes them as typed
//! Rust calls.
//!
//! ## Overview
//!
//! - **Resolution** ([`LibraryResolver`]): an override path from
//!   `OPENWARE_API_LIB`, or an ordered list of candidate files below the
//!   project's build directories, named for the target platform.
//! - **Loading** ([`LoadedModule`]): the first existing candidate (or the
//!   override) is mapped into the process.
//! - **Binding** ([`BoundSymbol`]): exports are bound lazily as concrete
//!   `unsafe extern "C" fn` types, described at runtime by [`Signature`].
//! - **Bridging** ([`Bridge`]): [`CallBridge`] performs the whole sequence on
//!   every call; [`RetainedBridge`] keeps the library loaded for the process
//!   lifetime.
//!
//! ## Architecture
//!
//! ```text
//! bridged_sum(a, b)
//!        │
//!        ▼
//! CallBridge ──► LibraryResolver ──► LoadTarget::Override(path)
//!        │                      └──► LoadTarget::Search([candidates])
//!        ▼
//! LoadedModule ──► BoundSymbol<OwApiSumFn> ──► ow_api_sum(a, b)
//! ```
//!
//! ## Examples
//!
//! ```no_run
//! use openware::{Bridge, CallBridge};
//!
//! # fn main() -> Result<(), openware::Error> {
//! let bridge = CallBridge::default();
//! assert_eq!(bridge.sum(2, 3)?, 5);
//! # Ok(())
//! # }
//! ```
//!
//! ## Errors
//!
//! Every failure is one of [`Error::LibraryNotFound`], [`Error::LibraryLoad`]
//! or [`Error::SymbolBind`]. Nothing is retried.
//!
//! ## Thread Safety
//!
//! [`CallBridge`] holds no mutable state and can be used from any number of
//! threads. [`RetainedBridge`] guards its first load so that only one module
//! is ever retained.
//!
//! ## Feature Flags
//!
//! - `openware-not-built`: do not compile the bundled C API; supply the
//!   library yourself.

mod bridge;
mod error;
mod module;
mod resolver;
mod signature;

pub mod config;

pub use bridge::{
    Bridge, CallBridge, RetainedBridge, bridged_is_ready, bridged_sum, bridged_version,
};
pub use error::{Error, Result};
pub use module::{BoundSymbol, LoadedModule, call};
pub use resolver::{Environment, LibraryResolver, LoadTarget, OsFamily, ProcessEnv};
pub use signature::{NativeFn, NativeScalar, ScalarKind, Signature};
