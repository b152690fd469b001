// SPDX-FileCopyrightText: 2026 Contributors to the OpenWare project.
// SPDX-License-Identifier: Apache-2.0

//! # openware-sys: Raw C-ABI declarations for the OpenWare C API
//!
//! This crate describes the entry points exported by the `openware_api`
//! shared library (see `api/c/api.h`) as function-pointer types, together
//! with their export names.
//!
//! ## Usage
//!
//! **Most users should NOT use this crate directly.** The [`openware`] crate
//! locates the library, binds these symbols lazily with an explicit signature
//! and wraps every failure in a classified error.
//!
//! Nothing here is linked at build time. The library is opened at runtime,
//! so a missing library is a recoverable error rather than a link failure.
//!
//! ## Build Process
//!
//! By default the build script compiles `api/c/api.c` into a shared library
//! inside `OUT_DIR` and exposes its path as [`BUILT_LIBRARY_PATH`]. Enable the
//! `openware-not-built` feature to skip this and supply a library yourself.
//!
//! [`openware`]: ../openware/index.html

use std::ffi::{c_char, c_int};

/// `const char* ow_api_version(void)`
pub type OwApiVersionFn = unsafe extern "C" fn() -> *const c_char;

/// `int ow_api_sum(int a, int b)`
pub type OwApiSumFn = unsafe extern "C" fn(c_int, c_int) -> c_int;

/// `int ow_api_is_ready(void)`
pub type OwApiIsReadyFn = unsafe extern "C" fn() -> c_int;

/// Export name of [`OwApiVersionFn`].
pub const OW_API_VERSION: &str = "ow_api_version";

/// Export name of [`OwApiSumFn`].
pub const OW_API_SUM: &str = "ow_api_sum";

/// Export name of [`OwApiIsReadyFn`].
pub const OW_API_IS_READY: &str = "ow_api_is_ready";

// Build script generates constants.rs with BUILT_LIBRARY_PATH
#[cfg(not(feature = "openware-not-built"))]
include!(concat!(env!("OUT_DIR"), "/constants.rs"));
