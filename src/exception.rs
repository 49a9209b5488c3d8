//! Native exception marshalling.
//!
//! Every fallible engine call takes a `void** out_exception`. After the call
//! a null pointer means success; anything else is an engine-owned exception
//! object that must be read and then freed exactly once. Two protocols exist:
//! the classic one (`apiException_*` + `apiObject_destructor`) and the TDV one
//! used by contexts and processing blocks.

use crate::error::{FacerecError, Result};
use crate::ffi::{ExceptionOut, FacerecApi, RawHandle};
use std::ffi::{c_char, CStr};
use std::ptr;
use tracing::error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Protocol {
    Api,
    Tdv,
}

/// Owns a non-null exception handle and frees it on drop.
struct ExceptionGuard<'a> {
    api: &'a dyn FacerecApi,
    raw: RawHandle,
    protocol: Protocol,
}

impl ExceptionGuard<'_> {
    fn into_error(self) -> FacerecError {
        let (code, what) = unsafe {
            match self.protocol {
                Protocol::Api => (
                    self.api.api_exception_code(self.raw),
                    self.api.api_exception_what(self.raw),
                ),
                Protocol::Tdv => (
                    self.api.tdv_exception_get_error_code(self.raw),
                    self.api.tdv_exception_get_message(self.raw),
                ),
            }
        };
        let message = unsafe { message_from_ptr(what) };
        FacerecError::Native { code, message }
    }
}

impl Drop for ExceptionGuard<'_> {
    fn drop(&mut self) {
        unsafe {
            match self.protocol {
                Protocol::Api => self.api.api_object_destructor(self.raw),
                Protocol::Tdv => self.api.tdv_exception_delete_exception(self.raw),
            }
        }
    }
}

unsafe fn message_from_ptr(what: *const c_char) -> String {
    if what.is_null() {
        return String::new();
    }
    CStr::from_ptr(what).to_string_lossy().into_owned()
}

/// Converts the exception slot left by a native call into a `Result`.
pub(crate) fn check(api: &dyn FacerecApi, exception: RawHandle, protocol: Protocol) -> Result<()> {
    if exception.is_null() {
        return Ok(());
    }
    let guard = ExceptionGuard {
        api,
        raw: exception,
        protocol,
    };
    Err(guard.into_error())
}

/// Runs one fallible engine call and marshals its exception.
///
/// ```ignore
/// let id = call(api, |exception| unsafe { api.raw_sample_get_id(raw, exception) })?;
/// ```
pub(crate) fn call<T>(api: &dyn FacerecApi, f: impl FnOnce(ExceptionOut) -> T) -> Result<T> {
    call_with(api, Protocol::Api, f)
}

/// Same as [`call`] for `TDVContext_*` and `TDVProcessingBlock_*` functions.
pub(crate) fn call_tdv<T>(api: &dyn FacerecApi, f: impl FnOnce(ExceptionOut) -> T) -> Result<T> {
    call_with(api, Protocol::Tdv, f)
}

fn call_with<T>(
    api: &dyn FacerecApi,
    protocol: Protocol,
    f: impl FnOnce(ExceptionOut) -> T,
) -> Result<T> {
    let mut exception: RawHandle = ptr::null_mut();
    let value = f(&mut exception);
    check(api, exception, protocol)?;
    Ok(value)
}

/// Logs a failure from a `Drop` path, where it cannot be returned.
pub(crate) fn log_release_failure(what: &str, result: Result<()>) {
    if let Err(e) = result {
        error!("Failed to release {}: {}", what, e);
    }
}
