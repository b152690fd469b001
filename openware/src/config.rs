// SPDX-FileCopyrightText: 2026 Contributors to the OpenWare project.
// SPDX-License-Identifier: Apache-2.0

//! Naming conventions and build-time paths used to locate the native library.

use std::str::FromStr;

// Build script generates constants.rs with OPENWARE_PROJECT_ROOT
include!(concat!(env!("OUT_DIR"), "/constants.rs"));

/// Environment variable holding an explicit library path.
///
/// When it is set to a non-empty value, discovery is skipped entirely and the
/// value is handed to the loader as is.
pub const OVERRIDE_ENV_VAR: &str = "OPENWARE_API_LIB";

/// Base name of the native library, without platform prefix or suffix.
pub const LIBRARY_STEM: &str = "openware_api";

/// Build output directories below the project root, in probing order.
pub const BUILD_DIRS: [&str; 4] = [
    "build",
    "build_ninja",
    "cmake-build-debug",
    "cmake-build-release",
];

/// Nested output directory of the C API target inside a build directory.
pub const API_OUTPUT_SUBDIR: [&str; 2] = ["api", "c"];

/// Returns the root directory of the project.
///
/// The resolver probes the directories listed in [`BUILD_DIRS`] below this
/// root. It is recorded at compile time.
///
/// # Panics
///
/// Panics if `OPENWARE_PROJECT_ROOT` was set to an invalid path at build time.
pub fn get_project_root() -> std::path::PathBuf {
    std::path::PathBuf::from_str(OPENWARE_PROJECT_ROOT)
        .expect("build error: 'OPENWARE_PROJECT_ROOT' is invalid")
}

/// Returns the path of the native library compiled by `openware-sys`.
///
/// This is used by tests to place a real library inside synthetic project
/// trees, and as a convenient override value.
///
/// # Examples
///
/// ```no_run
/// use openware::config::get_built_library_path;
/// use openware::LoadedModule;
///
/// # fn main() -> Result<(), openware::Error> {
/// let module = LoadedModule::open(get_built_library_path())?;
/// # Ok(())
/// # }
/// ```
#[cfg(not(feature = "openware-not-built"))]
pub fn get_built_library_path() -> std::path::PathBuf {
    openware_sys::BUILT_LIBRARY_PATH.into()
}
