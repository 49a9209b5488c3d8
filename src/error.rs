//! Error types for the facerec bindings.
//!
//! Every fallible operation in this crate returns [`FacerecError`]. Errors
//! raised by the native engine keep the engine's numeric code and message;
//! errors detected by the bindings themselves carry fixed codes of their own
//! so callers can match on [`FacerecError::code`] regardless of origin.

use std::path::PathBuf;
use thiserror::Error;

/// Library file could not be opened.
pub const LIBRARY_LOAD_ERROR_CODE: u32 = 0xbd2483c0;
/// A required symbol is missing from the library.
pub const MISSING_SYMBOL_ERROR_CODE: u32 = 0x5146c155;
/// A wrapper was about to be built around a null native pointer.
pub const NULL_OBJECT_ERROR_CODE: u32 = 0x7b3a6e10;
/// `active_liveness_checks_order` contains the same check twice.
pub const DUPLICATE_LIVENESS_CHECK_ERROR_CODE: u32 = 0x3302330e;
/// Both `recognizer_ini_file` and `recognizer_config` were set.
pub const RECOGNIZER_CONFIG_CONFLICT_ERROR_CODE: u32 = 0xb3fe4d07;
/// Image passed with null or empty data.
pub const NULL_IMAGE_DATA_ERROR_CODE: u32 = 0x02a169c4;
/// Image buffer size does not match width, height and format.
pub const IMAGE_SIZE_MISMATCH_ERROR_CODE: u32 = 0x951aadf1;
/// Callback data handed over by the engine could not be decoded.
pub const MALFORMED_CALLBACK_DATA_ERROR_CODE: u32 = 0x5a1d4c2e;
/// A video worker callback failed where no engine error stream was available.
pub const CALLBACK_FAILED_ERROR_CODE: u32 = 0x9e3c51b7;

/// Represents all possible errors that can occur in the facerec bindings.
#[derive(Error, Debug)]
pub enum FacerecError {
    /// The engine shared library could not be opened.
    ///
    /// This error occurs when:
    /// - The file does not exist at the given path
    /// - The file is not a loadable shared object for this platform
    /// - One of the library's own dependencies cannot be resolved
    #[error("can't open dll file '{}', error code: 0xbd2483c0: {reason}", path.display())]
    LibraryLoad { path: PathBuf, reason: String },

    /// The library was opened but does not export a required symbol.
    ///
    /// This usually means the library version does not match these bindings.
    #[error("can't find symbol '{symbol}' in dll '{}', error code: 0x5146c155", path.display())]
    MissingSymbol { symbol: String, path: PathBuf },

    /// An exception raised inside the native engine.
    #[error("{message} (code 0x{code:08x})")]
    Native { code: u32, message: String },

    /// A local invariant checked by the bindings before calling the engine.
    ///
    /// This error occurs when:
    /// - An image is passed without data or with a mismatching buffer size
    /// - Video worker parameters are contradictory
    /// - Callback data from the engine is missing a required field
    #[error("{message} (code 0x{code:08x})")]
    Assertion { code: u32, message: String },

    /// A native factory returned a null object.
    #[error("null {0} object used (code 0x7b3a6e10)")]
    NullObject(&'static str),

    /// A binary stream adapter failed to read or write.
    #[error("stream error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration file or context could not be converted from or to JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An operation that is not available in this build or with these arguments.
    ///
    /// This error occurs when:
    /// - A backend is requested whose cargo feature is disabled
    /// - A string argument contains an interior NUL byte
    /// - A value has the wrong shape for the requested conversion
    #[error("invalid operation: {0}")]
    InvalidOperation(String),
}

impl FacerecError {
    /// Numeric error code, if the error has one.
    ///
    /// Native and assertion errors report their own code; loader errors use
    /// the fixed codes above. I/O, JSON and invalid-operation errors have none.
    pub fn code(&self) -> Option<u32> {
        match self {
            FacerecError::LibraryLoad { .. } => Some(LIBRARY_LOAD_ERROR_CODE),
            FacerecError::MissingSymbol { .. } => Some(MISSING_SYMBOL_ERROR_CODE),
            FacerecError::Native { code, .. } | FacerecError::Assertion { code, .. } => Some(*code),
            FacerecError::NullObject(_) => Some(NULL_OBJECT_ERROR_CODE),
            FacerecError::Io(_) | FacerecError::Json(_) | FacerecError::InvalidOperation(_) => None,
        }
    }

    pub(crate) fn assertion(code: u32, message: impl Into<String>) -> Self {
        FacerecError::Assertion {
            code,
            message: message.into(),
        }
    }
}

impl From<std::ffi::NulError> for FacerecError {
    fn from(err: std::ffi::NulError) -> Self {
        FacerecError::InvalidOperation(format!("string contains a NUL byte: {err}"))
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, FacerecError>;
