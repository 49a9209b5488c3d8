//! Adapters the engine calls back into while an API call is running.
//!
//! The engine never sees Rust types: it receives an opaque `stream` pointer
//! plus one of the `extern "C"` functions below and calls them to move bytes,
//! floats or object pointers across the boundary. Any failure inside an
//! adapter is stored on the adapter and surfaced once the engine call
//! returns.

use crate::error::{FacerecError, Result};
use crate::ffi::types::{BinaryStreamReadFunc, BinaryStreamWriteFunc};
use std::ffi::c_void;
use std::io::{self, Read, Write};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::slice;

/// Exposes a [`Write`] as an engine output stream.
pub(crate) struct WriteAdapter<'a> {
    writer: &'a mut dyn Write,
    error: Option<io::Error>,
}

impl<'a> WriteAdapter<'a> {
    pub(crate) fn new(writer: &'a mut dyn Write) -> Self {
        Self {
            writer,
            error: None,
        }
    }

    /// Pointer handed to the engine together with [`WriteAdapter::WRITE_FUNC`].
    pub(crate) fn as_stream(&mut self) -> *mut c_void {
        self as *mut Self as *mut c_void
    }

    pub(crate) const WRITE_FUNC: BinaryStreamWriteFunc = write_func;

    /// Returns the first I/O error seen while the engine was writing.
    pub(crate) fn finish(self) -> Result<()> {
        match self.error {
            Some(err) => Err(FacerecError::Io(err)),
            None => Ok(()),
        }
    }
}

unsafe extern "C" fn write_func(stream: *mut c_void, data: *const c_void, bytes_count: u64) {
    if stream.is_null() {
        return;
    }
    let adapter = &mut *(stream as *mut WriteAdapter<'_>);
    if adapter.error.is_some() || bytes_count == 0 {
        return;
    }
    if data.is_null() {
        adapter.error = Some(io::Error::new(
            io::ErrorKind::InvalidInput,
            "engine wrote from a null buffer",
        ));
        return;
    }
    let bytes = slice::from_raw_parts(data as *const u8, bytes_count as usize);
    let outcome = catch_unwind(AssertUnwindSafe(|| adapter.writer.write_all(bytes)));
    match outcome {
        Ok(Ok(())) => {}
        Ok(Err(err)) => adapter.error = Some(err),
        Err(_) => adapter.error = Some(io::Error::new(io::ErrorKind::Other, "writer panicked")),
    }
}

/// Exposes a [`Read`] as an engine input stream.
pub(crate) struct ReadAdapter<'a> {
    reader: &'a mut dyn Read,
    error: Option<io::Error>,
}

impl<'a> ReadAdapter<'a> {
    pub(crate) fn new(reader: &'a mut dyn Read) -> Self {
        Self {
            reader,
            error: None,
        }
    }

    pub(crate) fn as_stream(&mut self) -> *mut c_void {
        self as *mut Self as *mut c_void
    }

    pub(crate) const READ_FUNC: BinaryStreamReadFunc = read_func;

    pub(crate) fn finish(self) -> Result<()> {
        match self.error {
            Some(err) => Err(FacerecError::Io(err)),
            None => Ok(()),
        }
    }
}

unsafe extern "C" fn read_func(stream: *mut c_void, data: *mut c_void, bytes_count: u64) {
    if stream.is_null() || data.is_null() || bytes_count == 0 {
        return;
    }
    let adapter = &mut *(stream as *mut ReadAdapter<'_>);
    let buffer = slice::from_raw_parts_mut(data as *mut u8, bytes_count as usize);
    if adapter.error.is_some() {
        buffer.fill(0);
        return;
    }
    let outcome = catch_unwind(AssertUnwindSafe(|| adapter.reader.read_exact(buffer)));
    let err = match outcome {
        Ok(Ok(())) => return,
        Ok(Err(err)) => err,
        Err(_) => io::Error::new(io::ErrorKind::Other, "reader panicked"),
    };
    // The engine keeps parsing whatever is in the buffer; hand it zeros.
    buffer.fill(0);
    adapter.error = Some(err);
}

/// Runs an engine call that reports a string through a write stream.
pub(crate) fn collect_string(
    call: impl FnOnce(*mut c_void, BinaryStreamWriteFunc) -> Result<()>,
) -> Result<String> {
    let mut bytes = Vec::new();
    let mut adapter = WriteAdapter::new(&mut bytes);
    let result = call(adapter.as_stream(), WriteAdapter::WRITE_FUNC);
    adapter.finish()?;
    result?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// `assign_floats_vector_func` target; `vector` points at a `Vec<f32>`.
pub(crate) unsafe extern "C" fn assign_floats_vector(
    vector: *mut c_void,
    elements: *const f32,
    elements_count: i32,
) {
    if vector.is_null() {
        return;
    }
    let target = &mut *(vector as *mut Vec<f32>);
    target.clear();
    if !elements.is_null() && elements_count > 0 {
        target.extend_from_slice(slice::from_raw_parts(elements, elements_count as usize));
    }
}

/// `assign_pointers_vector_func` target; `vector` points at a `Vec<*mut c_void>`.
pub(crate) unsafe extern "C" fn assign_pointers_vector(
    vector: *mut c_void,
    elements: *const *mut c_void,
    elements_count: i32,
) {
    if vector.is_null() {
        return;
    }
    let target = &mut *(vector as *mut Vec<*mut c_void>);
    target.clear();
    if !elements.is_null() && elements_count > 0 {
        target.extend_from_slice(slice::from_raw_parts(elements, elements_count as usize));
    }
}
