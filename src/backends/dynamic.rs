use super::symbols::Symbols;
use crate::error::{FacerecError, Result};
use libloading::Library;
use std::path::Path;
use tracing::{debug, info};

/// Opens the engine library at `path` and resolves its whole function table.
///
/// Loading is all-or-nothing: if any export is missing the library is closed
/// again before the error is returned.
pub(crate) fn open(path: &Path) -> Result<Symbols> {
    debug!("Opening facerec library at {}", path.display());
    let library = unsafe { Library::new(path) }.map_err(|e| FacerecError::LibraryLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let symbols = Symbols::resolve(library, path)?;
    info!("Loaded facerec library from {}", path.display());
    Ok(symbols)
}

/// Looks up one export and copies out its function pointer.
pub(crate) unsafe fn lookup<T: Copy>(library: &Library, path: &Path, name: &str) -> Result<T> {
    match library.get::<T>(name.as_bytes()) {
        Ok(symbol) => Ok(*symbol),
        Err(e) => {
            debug!("Symbol lookup for {} failed: {}", name, e);
            Err(FacerecError::MissingSymbol {
                symbol: name.to_string(),
                path: path.to_path_buf(),
            })
        }
    }
}
