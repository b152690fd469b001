// SPDX-FileCopyrightText: 2026 Contributors to the OpenWare project.
// SPDX-License-Identifier: Apache-2.0

//! Call bridge: resolves, loads and invokes native exports.
//!
//! Two flavors share the bridged operations through the [`Bridge`] trait:
//!
//! - [`CallBridge`] is stateless. Every operation resolves the library,
//!   loads it, binds the export and calls it. Concurrent calls share nothing
//!   but the platform loader's own cache.
//! - [`RetainedBridge`] loads the library once and keeps it mapped for the
//!   rest of the process. It never notices an override or file change; build
//!   a new one to re-resolve.

use std::ffi::CStr;

use once_cell::sync::OnceCell;
use openware_sys::{
    OW_API_IS_READY, OW_API_SUM, OW_API_VERSION, OwApiIsReadyFn, OwApiSumFn, OwApiVersionFn,
};
use tracing::{trace, warn};

use crate::{
    Error, LibraryResolver, LoadTarget, LoadedModule, Result,
    module::call,
    resolver::{Environment, ProcessEnv},
};

/// Operations backed by the native library.
///
/// Implementors only decide where the [`LoadedModule`] comes from. New
/// exports are added here without touching the resolver.
pub trait Bridge {
    /// Runs `f` against a loaded module.
    fn with_module<T>(&self, f: impl FnOnce(&LoadedModule) -> Result<T>) -> Result<T>;

    /// Adds two integers with `ow_api_sum`.
    fn sum(&self, a: i32, b: i32) -> Result<i32> {
        self.with_module(|module| {
            // Safety: `int ow_api_sum(int, int)` per api.h, no preconditions.
            unsafe { call::<OwApiSumFn>(module, OW_API_SUM, (a, b)) }
        })
    }

    /// Returns the version string reported by `ow_api_version`.
    ///
    /// A null return is reported as an empty string.
    fn version(&self) -> Result<String> {
        self.with_module(|module| {
            // Safety: `const char* ow_api_version(void)` per api.h.
            let version = unsafe { call::<OwApiVersionFn>(module, OW_API_VERSION, ())? };
            if version.is_null() {
                return Ok(String::new());
            }
            // Safety: the pointer refers to a static NUL-terminated string owned
            // by the library, which stays mapped for the whole closure.
            let version = unsafe { CStr::from_ptr(version) };
            Ok(version.to_string_lossy().into_owned())
        })
    }

    /// Returns whether `ow_api_is_ready` reports a usable API.
    fn is_ready(&self) -> Result<bool> {
        self.with_module(|module| {
            // Safety: `int ow_api_is_ready(void)` per api.h.
            let ready = unsafe { call::<OwApiIsReadyFn>(module, OW_API_IS_READY, ())? };
            Ok(ready != 0)
        })
    }
}

/// Stateless bridge that loads the library on every call.
#[derive(Debug, Clone)]
pub struct CallBridge<E = ProcessEnv> {
    resolver: LibraryResolver,
    env: E,
}

impl Default for CallBridge<ProcessEnv> {
    /// Bridge for the compile-time project root and the process environment.
    fn default() -> Self {
        Self::new(LibraryResolver::default(), ProcessEnv)
    }
}

impl<E: Environment> CallBridge<E> {
    /// Creates a bridge resolving with `resolver` against `env`.
    pub fn new(resolver: LibraryResolver, env: E) -> Self {
        Self { resolver, env }
    }

    /// Resolver used for every load.
    pub fn resolver(&self) -> &LibraryResolver {
        &self.resolver
    }

    /// Resolves and loads the native library.
    ///
    /// An override is loaded as is. Otherwise the first existing candidate is
    /// loaded; a file that vanishes between the check and the load is reported
    /// as [`Error::LibraryLoad`].
    ///
    /// # Errors
    ///
    /// - [`Error::LibraryNotFound`] if no override is set and no candidate
    ///   exists. No load is attempted in that case.
    /// - [`Error::LibraryLoad`] if the loader rejects the chosen path.
    pub fn load_module(&self) -> Result<LoadedModule> {
        match self.resolver.resolve(&self.env) {
            LoadTarget::Override(path) => LoadedModule::open(path),
            LoadTarget::Search(candidates) => {
                let found = candidates.iter().find(|path| {
                    let exists = path.exists();
                    trace!("Probing \"{}\": exists={}", path.display(), exists);
                    exists
                });
                match found {
                    Some(path) => LoadedModule::open(path),
                    None => {
                        warn!(
                            "No native library found below \"{}\"",
                            self.resolver.root().display()
                        );
                        Err(Error::LibraryNotFound {
                            probed: candidates.len(),
                        })
                    }
                }
            }
        }
    }
}

impl<E: Environment> Bridge for CallBridge<E> {
    fn with_module<T>(&self, f: impl FnOnce(&LoadedModule) -> Result<T>) -> Result<T> {
        let module = self.load_module()?;
        f(&module)
    }
}

/// Bridge that keeps the first successfully loaded library mapped for the
/// rest of the process.
///
/// The retained module is leaked: dropping the bridge does not unload it.
/// Concurrent first calls are serialized so that exactly one module is ever
/// stored. A failed load is not remembered; the next call tries again.
#[derive(Debug)]
pub struct RetainedBridge<E = ProcessEnv> {
    bridge: CallBridge<E>,
    module: OnceCell<&'static LoadedModule>,
}

impl<E: Environment> RetainedBridge<E> {
    /// Wraps `bridge`; nothing is loaded until the first call.
    pub fn new(bridge: CallBridge<E>) -> Self {
        Self {
            bridge,
            module: OnceCell::new(),
        }
    }

    /// Returns the retained module, loading it on first use.
    ///
    /// The module is never unloaded, so the reference outlives the bridge.
    pub fn module(&self) -> Result<&'static LoadedModule> {
        self.module
            .get_or_try_init(|| {
                let module = Box::new(self.bridge.load_module()?);
                Ok::<_, Error>(&*Box::leak(module))
            })
            .copied()
    }

    /// Whether a module has been loaded and retained.
    pub fn is_loaded(&self) -> bool {
        self.module.get().is_some()
    }
}

impl<E: Environment> Bridge for RetainedBridge<E> {
    fn with_module<T>(&self, f: impl FnOnce(&LoadedModule) -> Result<T>) -> Result<T> {
        f(self.module()?)
    }
}

/// Adds `a` and `b` in the native library, loading it for this call only.
///
/// Uses the process environment and the compile-time project root.
pub fn bridged_sum(a: i32, b: i32) -> Result<i32> {
    CallBridge::default().sum(a, b)
}

/// Returns the native library's version string.
pub fn bridged_version() -> Result<String> {
    CallBridge::default().version()
}

/// Returns whether the native library reports itself ready.
pub fn bridged_is_ready() -> Result<bool> {
    CallBridge::default().is_ready()
}
