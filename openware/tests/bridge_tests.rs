// SPDX-FileCopyrightText: 2026 Contributors to the OpenWare project.
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for library resolution, loading and bridged calls.
//!
//! Each test uses a fresh temporary directory as the project root and places
//! files at candidate locations to build a synthetic build tree.
//!
//! # Requirements
//!
//! Tests that call into native code need the C API compiled by `openware-sys`
//! (the default). They are skipped with the `openware-not-built` feature.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use openware::{
    CallBridge, Error, LibraryResolver, LoadTarget, OsFamily, config::OVERRIDE_ENV_VAR,
};
use tempfile::TempDir;
use tracing_test::traced_test;

/// Environment with only the given variables set.
fn env_with(pairs: &[(&str, &Path)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string_lossy().into_owned()))
        .collect()
}

/// Resolver below `root` for the platform the tests run on.
fn resolver(root: &Path) -> LibraryResolver {
    LibraryResolver::new(root).with_os_family(OsFamily::current())
}

fn candidates(root: &Path) -> Vec<PathBuf> {
    match resolver(root).resolve(&env_with(&[])) {
        LoadTarget::Search(candidates) => candidates,
        LoadTarget::Override(path) => panic!("unexpected override {}", path.display()),
    }
}

/// Writes a file that no loader accepts as a library.
fn place_garbage(path: &Path) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, b"not a shared library").unwrap();
}

#[test]
#[traced_test]
fn missing_library_is_not_found() {
    let root = TempDir::new().unwrap();
    let bridge = CallBridge::new(resolver(root.path()), env_with(&[]));

    let error = bridge.load_module().unwrap_err();

    match &error {
        Error::LibraryNotFound { probed } => {
            assert_eq!(*probed, candidates(root.path()).len())
        }
        other => panic!("expected LibraryNotFound, got {other:?}"),
    }
    assert!(error.to_string().contains(OVERRIDE_ENV_VAR));
    assert!(logs_contain("No native library found"));
}

#[test]
fn override_skips_the_candidate_search() {
    let root = TempDir::new().unwrap();
    // A candidate search would pick this up and fail with its path instead.
    place_garbage(&candidates(root.path())[0]);
    let missing = root.path().join("elsewhere").join("libmissing.so");
    let bridge = CallBridge::new(
        resolver(root.path()),
        env_with(&[(OVERRIDE_ENV_VAR, missing.as_path())]),
    );

    match bridge.load_module() {
        Err(Error::LibraryLoad { path, .. }) => assert_eq!(path, missing),
        other => panic!("expected LibraryLoad, got {other:?}"),
    }
}

#[test]
fn rejected_candidate_is_a_load_error() {
    let root = TempDir::new().unwrap();
    let first = candidates(root.path())[0].clone();
    place_garbage(&first);
    let bridge = CallBridge::new(resolver(root.path()), env_with(&[]));

    match bridge.load_module() {
        Err(Error::LibraryLoad { path, .. }) => assert_eq!(path, first),
        other => panic!("expected LibraryLoad, got {other:?}"),
    }
}

#[cfg(not(feature = "openware-not-built"))]
mod native {
    use openware::{
        Bridge, RetainedBridge, ScalarKind, call, config::get_built_library_path,
    };
    use openware_sys::{OW_API_SUM, OwApiSumFn};
    use tracing::info;

    use super::*;

    /// Copies the compiled C API to `path`.
    fn place_library(path: &Path) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::copy(get_built_library_path(), path).unwrap();
    }

    /// Project root with the library at candidate position `index`.
    fn root_with_library_at(index: usize) -> (TempDir, PathBuf) {
        let root = TempDir::new().unwrap();
        let path = candidates(root.path())[index].clone();
        place_library(&path);
        (root, path)
    }

    #[test]
    #[traced_test]
    fn sum_through_first_candidate() {
        let (root, _) = root_with_library_at(0);
        let bridge = CallBridge::new(resolver(root.path()), env_with(&[]));

        assert_eq!(bridge.sum(2, 3).unwrap(), 5);
        assert_eq!(bridge.sum(-7, 4).unwrap(), -3);
        assert!(logs_contain("Loaded native library"));
        assert!(logs_contain("Bound `ow_api_sum` (i32, i32) -> i32"));
    }

    #[test]
    fn first_existing_candidate_wins() {
        let (root, expected) = root_with_library_at(3);
        // A later candidate must never be preferred over an earlier one.
        place_library(candidates(root.path()).last().unwrap());
        let bridge = CallBridge::new(resolver(root.path()), env_with(&[]));

        let module = bridge.load_module().unwrap();
        info!("Loaded module: {:?}", module);
        assert_eq!(module.path(), expected);
    }

    #[test]
    #[traced_test]
    fn override_path_is_used() {
        let root = TempDir::new().unwrap();
        let library = get_built_library_path();
        let bridge = CallBridge::new(
            resolver(root.path()),
            env_with(&[(OVERRIDE_ENV_VAR, library.as_path())]),
        );

        assert_eq!(bridge.load_module().unwrap().path(), library);
        assert_eq!(bridge.sum(20, 22).unwrap(), 42);
        assert!(logs_contain("Using OPENWARE_API_LIB override"));
    }

    #[test]
    fn absent_symbol_is_a_bind_error() {
        let module = openware::LoadedModule::open(get_built_library_path()).unwrap();

        let result = unsafe { call::<OwApiSumFn>(&module, "ow_api_does_not_exist", (1, 2)) };

        match result {
            Err(Error::SymbolBind { symbol, .. }) => assert_eq!(symbol, "ow_api_does_not_exist"),
            other => panic!("expected SymbolBind, got {other:?}"),
        }
    }

    #[test]
    fn bound_symbol_carries_its_signature() {
        let module = openware::LoadedModule::open(get_built_library_path()).unwrap();
        let sum = module.bind::<OwApiSumFn>(OW_API_SUM).unwrap();

        assert_eq!(sum.name(), OW_API_SUM);
        assert_eq!(sum.signature().params(), [ScalarKind::I32, ScalarKind::I32]);
        assert_eq!(sum.signature().ret(), ScalarKind::I32);
        assert_eq!(unsafe { sum.call((40, 2)) }, 42);
    }

    #[test]
    fn version_and_readiness() {
        let (root, _) = root_with_library_at(0);
        let bridge = CallBridge::new(resolver(root.path()), env_with(&[]));

        assert_eq!(bridge.version().unwrap(), "0.1.0");
        assert!(bridge.is_ready().unwrap());
    }

    #[test]
    fn retained_bridge_loads_once() {
        let root = TempDir::new().unwrap();
        let bridge = RetainedBridge::new(CallBridge::new(resolver(root.path()), env_with(&[])));

        // Failures are not cached.
        assert!(matches!(
            bridge.sum(1, 1),
            Err(Error::LibraryNotFound { .. })
        ));
        assert!(!bridge.is_loaded());

        let path = candidates(root.path())[0].clone();
        place_library(&path);
        assert_eq!(bridge.sum(1, 1).unwrap(), 2);
        assert!(bridge.is_loaded());
        assert_eq!(bridge.module().unwrap().path(), path);

        // The mapped library outlives its file.
        #[cfg(unix)]
        {
            std::fs::remove_file(&path).unwrap();
            assert_eq!(bridge.sum(3, 4).unwrap(), 7);
        }
    }

    #[test]
    fn retained_module_outlives_the_bridge() {
        let (root, path) = root_with_library_at(0);

        let module = {
            let bridge =
                RetainedBridge::new(CallBridge::new(resolver(root.path()), env_with(&[])));
            assert_eq!(bridge.sum(1, 2).unwrap(), 3);
            bridge.module().unwrap()
        };

        assert_eq!(module.path(), path);
        assert_eq!(unsafe { call::<OwApiSumFn>(module, OW_API_SUM, (5, 6)) }.unwrap(), 11);

        #[cfg(target_os = "linux")]
        {
            let path = path.canonicalize().unwrap();
            let maps = std::fs::read_to_string("/proc/self/maps").unwrap();
            assert!(
                maps.contains(path.to_str().unwrap()),
                "{} is no longer mapped",
                path.display()
            );
        }
    }

    #[test]
    fn sum_wraps_on_overflow() {
        let module = openware::LoadedModule::open(get_built_library_path()).unwrap();
        let sum = module.bind::<OwApiSumFn>(OW_API_SUM).unwrap();

        assert_eq!(unsafe { sum.call((i32::MAX, 1)) }, i32::MIN);
        assert_eq!(unsafe { sum.call((i32::MIN, -1)) }, i32::MAX);
    }

    #[test]
    fn concurrent_calls() {
        let (root, first) = root_with_library_at(0);
        let stateless = CallBridge::new(resolver(root.path()), env_with(&[]));
        let retained = RetainedBridge::new(stateless.clone());

        std::thread::scope(|scope| {
            for n in 0..8 {
                let stateless = &stateless;
                let retained = &retained;
                scope.spawn(move || {
                    assert_eq!(stateless.sum(n, n).unwrap(), 2 * n);
                    assert_eq!(retained.sum(n, 1).unwrap(), n + 1);
                });
            }
        });

        assert_eq!(retained.module().unwrap().path(), first);
    }
}
