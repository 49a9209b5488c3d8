//! Library backends for the facerec engine
//!
//! Two ways of obtaining the engine's function table are supported:
//!
//! - **Dynamic**: open the shared library at runtime with `libloading` and
//!   resolve every export by name
//! - **Static**: bind the same exports at link time (`static-link` feature)
//!
//! Both produce the same resolved function table, so every wrapper behaves
//! identically regardless of how the engine was found.

use crate::error::Result;
use crate::ffi::FacerecApi;
use std::path::{Path, PathBuf};
use std::sync::Arc;

mod symbols;

#[cfg(feature = "dynamic")]
mod dynamic;

#[cfg(feature = "static-link")]
mod static_link;

/// Environment variable overriding the default library path.
pub const LIBRARY_PATH_ENV: &str = "FACEREC_LIBRARY";

/// Platform file name of the engine library.
#[cfg(target_os = "windows")]
pub const DEFAULT_LIBRARY_NAME: &str = "facerec.dll";
#[cfg(target_os = "macos")]
pub const DEFAULT_LIBRARY_NAME: &str = "libfacerec.dylib";
#[cfg(not(any(target_os = "windows", target_os = "macos")))]
pub const DEFAULT_LIBRARY_NAME: &str = "libfacerec.so";

/// How the engine library is located
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LibraryConfig {
    /// Open a shared library at runtime
    Dynamic {
        /// Library file; `None` uses `FACEREC_LIBRARY` or the platform default
        path: Option<PathBuf>,
    },
    /// Use the exports linked into the binary
    Static,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        LibraryConfig::Dynamic { path: None }
    }
}

impl LibraryConfig {
    /// Path handed to the engine so it can locate its own modules.
    ///
    /// Empty for statically linked builds.
    pub fn library_path(&self) -> PathBuf {
        match self {
            LibraryConfig::Dynamic { path: Some(path) } => path.clone(),
            LibraryConfig::Dynamic { path: None } => default_library_path(),
            LibraryConfig::Static => PathBuf::new(),
        }
    }
}

/// `FACEREC_LIBRARY` when set, otherwise the platform file name.
pub fn default_library_path() -> PathBuf {
    match std::env::var_os(LIBRARY_PATH_ENV) {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => PathBuf::from(DEFAULT_LIBRARY_NAME),
    }
}

/// Factory function returning the function table for a configuration
pub fn load_library(config: &LibraryConfig) -> Result<Arc<dyn FacerecApi>> {
    match config {
        #[cfg(feature = "dynamic")]
        LibraryConfig::Dynamic { .. } => {
            let path = config.library_path();
            Ok(Arc::new(dynamic::open(&path)?))
        }
        #[cfg(feature = "static-link")]
        LibraryConfig::Static => Ok(Arc::new(static_link::link())),
        #[cfg(not(feature = "dynamic"))]
        LibraryConfig::Dynamic { .. } => Err(crate::error::FacerecError::InvalidOperation(
            "Dynamic loading not enabled. Enable the 'dynamic' feature.".to_string(),
        )),
        #[cfg(not(feature = "static-link"))]
        LibraryConfig::Static => Err(crate::error::FacerecError::InvalidOperation(
            "Static linking not enabled. Enable the 'static-link' feature.".to_string(),
        )),
    }
}

/// Loads the library at `path` directly.
pub fn load_library_from(path: impl AsRef<Path>) -> Result<Arc<dyn FacerecApi>> {
    load_library(&LibraryConfig::Dynamic {
        path: Some(path.as_ref().to_path_buf()),
    })
}
