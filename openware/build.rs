// SPDX-FileCopyrightText: 2026 Contributors to the OpenWare project.
// SPDX-License-Identifier: Apache-2.0

//! Build script for the `openware` crate.
//!
//! This script generates `constants.rs` containing the compile-time path of
//! the project root. The resolver probes build output directories below it
//! when no override is configured.

use std::env;
use std::path::PathBuf;

fn main() {
    // Determine the project root (one level up from this crate)
    let manifest_dir =
        PathBuf::from(env::var("CARGO_MANIFEST_DIR").expect("failed to get current directory"));
    let project_root = manifest_dir.parent().unwrap();

    let out_path = PathBuf::from(env::var("OUT_DIR").expect("failed to get output directory"))
        .join("constants.rs");

    let data = format!(
        "pub const OPENWARE_PROJECT_ROOT: &str = {:?};\n",
        project_root.to_string_lossy()
    );
    std::fs::write(out_path, data).expect("Unable to write file");
}
