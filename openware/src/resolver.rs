// SPDX-FileCopyrightText: 2026 Contributors to the OpenWare project.
// SPDX-License-Identifier: Apache-2.0

//! Library resolution.
//!
//! This module decides which file the bridge should hand to the platform
//! loader. Resolution never fails and never touches the filesystem: it either
//! returns the override path verbatim, or the ordered list of candidate paths
//! that the bridge probes for existence.
//!
//! Candidates are the cross product of the known build directories, the two
//! sub-locations inside each of them (the nested API output directory first,
//! then the build directory itself) and the platform name variants. The build
//! directory order is the primary key and the name variant order the secondary
//! one, so typical build locations are probed before generic ones.

use std::{
    collections::HashMap,
    ffi::OsString,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::config::{API_OUTPUT_SUBDIR, BUILD_DIRS, LIBRARY_STEM, OVERRIDE_ENV_VAR, get_project_root};

/// Read access to environment variables.
///
/// Resolution takes the environment as an explicit input so tests can run
/// against a fixed map instead of mutating the process environment.
pub trait Environment {
    /// Returns the value of `key`, if set.
    fn var_os(&self, key: &str) -> Option<OsString>;
}

/// The real process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn var_os(&self, key: &str) -> Option<OsString> {
        std::env::var_os(key)
    }
}

impl Environment for HashMap<String, String> {
    fn var_os(&self, key: &str) -> Option<OsString> {
        self.get(key).map(OsString::from)
    }
}

impl<E: Environment + ?Sized> Environment for &E {
    fn var_os(&self, key: &str) -> Option<OsString> {
        (**self).var_os(key)
    }
}

/// Operating system families with distinct shared library naming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OsFamily {
    /// `name.dll`
    Windows,
    /// `libname.dylib`, `name.dylib`
    Apple,
    /// `libname.so`, `name.so`. Also used for unrecognized systems.
    Unix,
}

impl OsFamily {
    /// Family of the operating system this binary was compiled for.
    pub fn current() -> Self {
        Self::from_os_name(std::env::consts::OS)
    }

    /// Maps an OS identifier (as in [`std::env::consts::OS`]) to its family.
    pub fn from_os_name(os: &str) -> Self {
        match os {
            "windows" => OsFamily::Windows,
            "macos" | "ios" => OsFamily::Apple,
            _ => OsFamily::Unix,
        }
    }

    /// Platform file name variants for a library, in probing order.
    pub fn library_names(self, stem: &str) -> Vec<String> {
        match self {
            OsFamily::Windows => vec![format!("{stem}.dll")],
            OsFamily::Apple => vec![format!("lib{stem}.dylib"), format!("{stem}.dylib")],
            OsFamily::Unix => vec![format!("lib{stem}.so"), format!("{stem}.so")],
        }
    }
}

/// What the bridge should load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadTarget {
    /// Path taken from the override variable. Loaded as is, without probing.
    Override(PathBuf),
    /// Ordered candidate paths. The first one that exists wins.
    Search(Vec<PathBuf>),
}

/// Computes load targets for the native library below a project root.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use openware::{LibraryResolver, LoadTarget, OsFamily};
///
/// let resolver = LibraryResolver::new("/opt/openware").with_os_family(OsFamily::Unix);
/// let env: HashMap<String, String> = HashMap::new();
///
/// match resolver.resolve(&env) {
///     LoadTarget::Search(candidates) => {
///         assert!(candidates[0].ends_with("build/api/c/libopenware_api.so"));
///     }
///     LoadTarget::Override(_) => unreachable!(),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryResolver {
    root: PathBuf,
    os_family: OsFamily,
}

impl Default for LibraryResolver {
    /// Resolver for the compile-time project root and the current OS.
    fn default() -> Self {
        Self::new(get_project_root())
    }
}

impl LibraryResolver {
    /// Creates a resolver probing below `root`, using the current OS family.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            os_family: OsFamily::current(),
        }
    }

    /// Replaces the OS family used for file naming.
    pub fn with_os_family(mut self, os_family: OsFamily) -> Self {
        self.os_family = os_family;
        self
    }

    /// Project root the candidates are computed below.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// OS family used for file naming.
    pub fn os_family(&self) -> OsFamily {
        self.os_family
    }

    /// Returns the ordered candidate paths.
    ///
    /// The list depends only on the root and the OS family, so repeated calls
    /// yield the same order.
    pub fn candidates(&self) -> Vec<PathBuf> {
        let names = self.os_family.library_names(LIBRARY_STEM);
        let mut paths = Vec::with_capacity(BUILD_DIRS.len() * names.len() * 2);

        for build_dir in BUILD_DIRS {
            let build_path = self.root.join(build_dir);
            let api_path = API_OUTPUT_SUBDIR
                .iter()
                .fold(build_path.clone(), |path, part| path.join(part));
            for name in &names {
                paths.push(api_path.join(name));
                paths.push(build_path.join(name));
            }
        }

        paths
    }

    /// Decides what to load.
    ///
    /// A non-empty [`OVERRIDE_ENV_VAR`] is returned immediately without any
    /// existence check. A missing override file surfaces later as a load
    /// error. Otherwise the full candidate list is returned.
    pub fn resolve(&self, env: &impl Environment) -> LoadTarget {
        if let Some(value) = env.var_os(OVERRIDE_ENV_VAR).filter(|value| !value.is_empty()) {
            let path = PathBuf::from(value);
            debug!(
                "Using {} override \"{}\"",
                OVERRIDE_ENV_VAR,
                path.display()
            );
            return LoadTarget::Override(path);
        }

        let candidates = self.candidates();
        debug!(
            "Searching {} candidates below \"{}\" ({:?})",
            candidates.len(),
            self.root.display(),
            self.os_family
        );
        LoadTarget::Search(candidates)
    }
}
