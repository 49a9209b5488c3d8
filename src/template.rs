//! Face templates and the static search index built from them.

use crate::error::Result;
use crate::exception::call;
use crate::ffi::adapters::{collect_string, WriteAdapter};
use crate::ffi::{FacerecApi, RawHandle};
use crate::handle::{create_object, NativeObject, ObjectKind};
use std::io::Write;
use std::sync::Arc;

/// Biometric template produced by [`crate::Recognizer::processing`].
///
/// Templates are only comparable with templates of the same method.
#[derive(Debug, Clone)]
pub struct Template {
    object: Arc<NativeObject>,
}

impl Template {
    pub(crate) fn new(object: Arc<NativeObject>) -> Self {
        Self { object }
    }

    pub(crate) fn from_raw(api: &Arc<dyn FacerecApi>, raw: RawHandle) -> Result<Self> {
        NativeObject::wrap(api.clone(), raw, ObjectKind::Api("Template")).map(Self::new)
    }

    pub(crate) fn raw(&self) -> RawHandle {
        self.object.raw()
    }

    /// Name of the recognition method that created this template.
    pub fn method_name(&self) -> Result<String> {
        let api = self.object.api();
        collect_string(|stream, write| {
            call(api, |e| unsafe {
                api.template_get_method_name(self.raw(), stream, write, e)
            })
        })
    }

    /// Serializes the template; read it back with [`crate::Recognizer::load_template`].
    pub fn save(&self, writer: &mut impl Write) -> Result<()> {
        let api = self.object.api();
        let mut adapter = WriteAdapter::new(writer);
        let stream = adapter.as_stream();
        let result = call(api, |e| unsafe {
            api.template_save(self.raw(), stream, WriteAdapter::WRITE_FUNC, e)
        });
        adapter.finish()?;
        result
    }
}

/// Immutable set of templates prepared for [`crate::Recognizer::search`].
#[derive(Debug, Clone)]
pub struct TemplatesIndex {
    object: Arc<NativeObject>,
}

impl TemplatesIndex {
    pub(crate) fn new(object: Arc<NativeObject>) -> Self {
        Self { object }
    }

    pub(crate) fn raw(&self) -> RawHandle {
        self.object.raw()
    }

    pub fn method_name(&self) -> Result<String> {
        let api = self.object.api();
        collect_string(|stream, write| {
            call(api, |e| unsafe {
                api.templates_index_get_method_name(self.raw(), stream, write, e)
            })
        })
    }

    pub fn size(&self) -> Result<usize> {
        let api = self.object.api();
        call(api, |e| unsafe { api.templates_index_size(self.raw(), e) }).map(|n| n as usize)
    }

    /// Template at position `index`, sharing the index's copy.
    pub fn at(&self, index: usize) -> Result<Template> {
        let api = self.object.api();
        let object = create_object(self.object.api_arc(), ObjectKind::Api("Template"), |e| unsafe {
            api.templates_index_at(self.raw(), index as i64, e)
        })?;
        Ok(Template::new(object))
    }

    /// Preallocates search memory for up to `queries_count` parallel queries.
    pub fn reserve_search_memory(&self, queries_count: usize) -> Result<()> {
        let api = self.object.api();
        call(api, |e| unsafe {
            api.templates_index_reserve_search_memory(self.raw(), queries_count as i64, e)
        })
    }
}
