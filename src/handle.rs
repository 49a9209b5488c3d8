//! Shared ownership of native engine objects.
//!
//! Every wrapper holds an `Arc<NativeObject>`. Cloning a wrapper clones the
//! `Arc`; the native destructor for the object's kind runs once, when the
//! last clone is dropped.

use crate::error::{FacerecError, Result};
use crate::exception::{self, log_release_failure};
use crate::ffi::{ExceptionOut, FacerecApi, RawHandle};
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// Which native destructor releases an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ObjectKind {
    /// Released with `apiObject_destructor`.
    Api(&'static str),
    DynamicTemplateIndex,
    ContextTemplate,
    /// Released with `TDVContext_destroy`.
    Context,
    /// Released with `TDVProcessingBlock_destroyBlock`.
    ProcessingBlock,
}

impl ObjectKind {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            ObjectKind::Api(name) => name,
            ObjectKind::DynamicTemplateIndex => "DynamicTemplateIndex",
            ObjectKind::ContextTemplate => "ContextTemplate",
            ObjectKind::Context => "Context",
            ObjectKind::ProcessingBlock => "ProcessingBlock",
        }
    }
}

/// One native object together with the library that created it.
pub(crate) struct NativeObject {
    api: Arc<dyn FacerecApi>,
    raw: RawHandle,
    kind: ObjectKind,
}

// The engine's objects are internally synchronized; the bindings only pass
// the pointer back into the library.
unsafe impl Send for NativeObject {}
unsafe impl Sync for NativeObject {}

impl NativeObject {
    /// Takes ownership of `raw`. A null pointer is rejected without calling
    /// any destructor.
    pub(crate) fn wrap(api: Arc<dyn FacerecApi>, raw: RawHandle, kind: ObjectKind) -> Result<Arc<Self>> {
        if raw.is_null() {
            return Err(FacerecError::NullObject(kind.name()));
        }
        trace!("Wrapping native {} at {:p}", kind.name(), raw);
        Ok(Arc::new(Self { api, raw, kind }))
    }

    pub(crate) fn api(&self) -> &dyn FacerecApi {
        self.api.as_ref()
    }

    pub(crate) fn api_arc(&self) -> &Arc<dyn FacerecApi> {
        &self.api
    }

    pub(crate) fn raw(&self) -> RawHandle {
        self.raw
    }
}

/// Runs a native factory call and takes ownership of what it returns.
pub(crate) fn create_object(
    api: &Arc<dyn FacerecApi>,
    kind: ObjectKind,
    factory: impl FnOnce(ExceptionOut) -> RawHandle,
) -> Result<Arc<NativeObject>> {
    let raw = exception::call(api.as_ref(), factory)?;
    NativeObject::wrap(api.clone(), raw, kind)
}

impl Drop for NativeObject {
    fn drop(&mut self) {
        trace!("Destroying native {} at {:p}", self.kind.name(), self.raw);
        let api = self.api.as_ref();
        unsafe {
            match self.kind {
                ObjectKind::Api(_) => api.api_object_destructor(self.raw),
                ObjectKind::DynamicTemplateIndex => api.dynamic_template_index_destructor(self.raw),
                ObjectKind::ContextTemplate => api.context_template_destructor(self.raw),
                ObjectKind::Context => log_release_failure(
                    "Context",
                    exception::call_tdv(api, |e| api.tdv_context_destroy(self.raw, e)),
                ),
                ObjectKind::ProcessingBlock => log_release_failure(
                    "ProcessingBlock",
                    exception::call_tdv(api, |e| api.tdv_processing_block_destroy_block(self.raw, e)),
                ),
            }
        }
    }
}

impl fmt::Debug for NativeObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeObject")
            .field("kind", &self.kind)
            .field("raw", &self.raw)
            .finish()
    }
}
