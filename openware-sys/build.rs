// SPDX-FileCopyrightText: 2026 Contributors to the OpenWare project.
// SPDX-License-Identifier: Apache-2.0

//! Build script for the `openware-sys` crate.
//!
//! This script:
//! 1. Optionally compiles the C API sources under `api/c/` into a shared library
//! 2. Writes `constants.rs` with the absolute path of the produced library
//!
//! The library is never linked into Rust artifacts. It is opened at runtime by
//! the `openware` crate, so it is built as a standalone shared object with the
//! platform file naming the resolver expects.

use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Base name of the native library, without prefix or suffix.
const LIBRARY_STEM: &str = "openware_api";

/// Platform file name for the produced library, keyed on the target OS.
fn library_file_name(target_os: &str) -> String {
    match target_os {
        "windows" => format!("{LIBRARY_STEM}.dll"),
        "macos" | "ios" => format!("lib{LIBRARY_STEM}.dylib"),
        _ => format!("lib{LIBRARY_STEM}.so"),
    }
}

/// Compiles `api.c` into a shared library at `output`.
fn build_shared_library(api_dir: &Path, out_dir: &Path, output: &Path) {
    let compiler = cc::Build::new()
        .cargo_metadata(false)
        .include(api_dir)
        .get_compiler();
    let source = api_dir.join("api.c");

    let mut cmd: Command = compiler.to_command();
    if compiler.is_like_msvc() {
        cmd.arg("/nologo")
            .arg("/LD")
            .arg("/DOW_API_EXPORTS")
            .arg(format!("/I{}", api_dir.display()))
            .arg(format!("/Fo{}\\", out_dir.display()))
            .arg(&source)
            .arg(format!("/Fe{}", output.display()));
    } else {
        cmd.arg("-shared")
            .arg("-fPIC")
            .arg("-fvisibility=hidden")
            .arg("-DOW_API_EXPORTS")
            .arg("-I")
            .arg(api_dir)
            .arg(&source)
            .arg("-o")
            .arg(output);
    }

    let status = cmd
        .status()
        .unwrap_or_else(|error| panic!("failed to run C compiler {cmd:?}: {error}"));
    assert!(status.success(), "C compiler failed: {cmd:?}");
}

fn main() {
    let manifest_dir =
        PathBuf::from(env::var("CARGO_MANIFEST_DIR").expect("failed to get current directory"));
    let repo_root = manifest_dir.parent().unwrap();
    let api_dir = repo_root.join("api").join("c");
    println!("cargo:rerun-if-changed={}", api_dir.display());

    if cfg!(feature = "openware-not-built") {
        return;
    }

    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("failed to get output directory"));
    let target_os = env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
    let library_path = out_dir.join(library_file_name(&target_os));

    build_shared_library(&api_dir, &out_dir, &library_path);

    let data = format!(
        "pub const BUILT_LIBRARY_PATH: &str = {:?};\n",
        library_path.to_string_lossy()
    );
    std::fs::write(out_dir.join("constants.rs"), data).expect("Unable to write file");
}
