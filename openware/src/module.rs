// SPDX-FileCopyrightText: 2026 Contributors to the OpenWare project.
// SPDX-License-Identifier: Apache-2.0

//! Loaded native modules and lazily bound symbols.
//!
//! Provides [`LoadedModule`], an owned handle to a shared library mapped into
//! the process, and [`BoundSymbol`], a typed view of one of its exports.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::{Error, NativeFn, Result, Signature};

/// A native library mapped into the process.
///
/// Symbols are bound on demand with [`LoadedModule::bind`]; nothing is
/// resolved when the module is opened. The library is unmapped when the
/// module is dropped, so bound symbols borrow the module.
pub struct LoadedModule {
    library: libloading::Library,
    path: PathBuf,
}

impl std::fmt::Debug for LoadedModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedModule")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl LoadedModule {
    /// Maps the library at `path` into the process.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LibraryLoad`] carrying `path` if the platform loader
    /// rejects it, including when the file does not exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        // Safety: running the library's initializers is inherent to loading it.
        // The library is a trusted build product or an explicit override.
        let library =
            unsafe { libloading::Library::new(&path) }.map_err(|source| Error::LibraryLoad {
                path: path.clone(),
                source,
            })?;
        info!("Loaded native library \"{}\"", path.display());
        Ok(Self { library, path })
    }

    /// Path the module was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Binds the export `symbol` with the function type `F`.
    ///
    /// The loader only checks that the export exists. It cannot verify that
    /// the export really has the signature described by `F`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SymbolBind`] naming `symbol` if it is not exported.
    pub fn bind<F: NativeFn>(&self, symbol: &str) -> Result<BoundSymbol<'_, F>> {
        let signature = F::signature();
        // Safety: `F` is a C function pointer type. Whether it matches the
        // export is the caller's contract.
        let inner = unsafe { self.library.get::<F>(symbol.as_bytes()) }.map_err(|source| {
            Error::SymbolBind {
                symbol: symbol.to_string(),
                source,
            }
        })?;
        debug!(
            "Bound `{}` {} from \"{}\"",
            symbol,
            signature,
            self.path.display()
        );
        Ok(BoundSymbol {
            name: symbol.to_string(),
            signature,
            inner,
        })
    }
}

/// A native export bound with a concrete function type.
pub struct BoundSymbol<'lib, F> {
    name: String,
    signature: Signature,
    inner: libloading::Symbol<'lib, F>,
}

impl<F: NativeFn> BoundSymbol<'_, F> {
    /// Export name the symbol was bound from.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Signature derived from `F`.
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Invokes the export.
    ///
    /// # Safety
    ///
    /// The export must have the signature described by `F`, and `args` must
    /// satisfy the native function's own preconditions. A fault inside the
    /// native code cannot be recovered from.
    pub unsafe fn call(&self, args: F::Args) -> F::Output {
        unsafe { (*self.inner).invoke(args) }
    }
}

/// Binds `symbol` as `F` and invokes it with `args`.
///
/// # Safety
///
/// Same contract as [`BoundSymbol::call`].
///
/// # Errors
///
/// Returns [`Error::SymbolBind`] if the export is absent. No value is
/// returned in that case.
pub unsafe fn call<F: NativeFn>(
    module: &LoadedModule,
    symbol: &str,
    args: F::Args,
) -> Result<F::Output> {
    let bound = module.bind::<F>(symbol)?;
    Ok(unsafe { bound.call(args) })
}
