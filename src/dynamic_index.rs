//! Incrementally updated template index keyed by UUID.

use crate::error::{FacerecError, Result};
use crate::exception::call;
use crate::ffi::adapters::{collect_string, WriteAdapter};
use crate::ffi::{ExceptionOut, FacerecApi, RawHandle};
use crate::handle::{create_object, NativeObject, ObjectKind};
use crate::template::Template;
use std::ffi::{c_char, c_void, CString};
use std::io::Write;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// A template stored inside a [`DynamicTemplateIndex`].
#[derive(Debug, Clone)]
pub struct ContextTemplate {
    object: Arc<NativeObject>,
}

impl ContextTemplate {
    fn raw(&self) -> RawHandle {
        self.object.raw()
    }

    pub fn method_name(&self) -> Result<String> {
        let api = self.object.api();
        collect_string(|stream, write| {
            call(api, |e| unsafe {
                api.context_template_get_method_name(self.raw(), stream, write, e)
            })
        })
    }

    pub fn save(&self, writer: &mut impl Write) -> Result<()> {
        let api = self.object.api();
        let mut adapter = WriteAdapter::new(writer);
        let stream = adapter.as_stream();
        let result = call(api, |e| unsafe {
            api.context_template_save(self.raw(), stream, WriteAdapter::WRITE_FUNC, e)
        });
        adapter.finish()?;
        result
    }

    /// Size of the serialized template in bytes.
    pub fn size(&self) -> Result<usize> {
        let api = self.object.api();
        call(api, |e| unsafe { api.context_template_size(self.raw(), e) }).map(|n| n as usize)
    }
}

/// Template index that supports adding and removing entries after creation.
///
/// Created with [`crate::FacerecService::create_dynamic_template_index`].
#[derive(Debug, Clone)]
pub struct DynamicTemplateIndex {
    object: Arc<NativeObject>,
}

impl DynamicTemplateIndex {
    pub(crate) fn new(object: Arc<NativeObject>) -> Self {
        Self { object }
    }

    fn api(&self) -> &dyn FacerecApi {
        self.object.api()
    }

    fn raw(&self) -> RawHandle {
        self.object.raw()
    }

    pub fn method_name(&self) -> Result<String> {
        let api = self.api();
        collect_string(|stream, write| {
            call(api, |e| unsafe {
                api.dynamic_template_index_get_method_name(self.raw(), stream, write, e)
            })
        })
    }

    pub fn size(&self) -> Result<usize> {
        let api = self.api();
        call(api, |e| unsafe { api.dynamic_template_index_size(self.raw(), e) }).map(|n| n as usize)
    }

    /// Number of templates the license allows.
    pub fn capacity(&self) -> Result<usize> {
        let api = self.api();
        call(api, |e| unsafe { api.dynamic_template_index_capacity(self.raw(), e) })
            .map(|n| n as usize)
    }

    /// Adds a template under `uuid`.
    pub fn add(&self, templ: &Template, uuid: &str) -> Result<()> {
        let uuid = CString::new(uuid)?;
        let api = self.api();
        call(api, |e| unsafe {
            api.dynamic_template_index_add_1(
                self.raw(),
                templ.raw() as *const c_void,
                uuid.as_ptr(),
                e,
            )
        })
    }

    /// Adds a template under a freshly generated UUID and returns it.
    pub fn add_with_new_uuid(&self, templ: &Template) -> Result<String> {
        let uuid = Uuid::new_v4().to_string();
        self.add(templ, &uuid)?;
        debug!("Added template {}", uuid);
        Ok(uuid)
    }

    /// Adds templates pairwise with `uuids`; stops at the first failure.
    pub fn add_many(&self, templates: &[Template], uuids: &[String]) -> Result<()> {
        if templates.len() != uuids.len() {
            return Err(FacerecError::InvalidOperation(format!(
                "{} templates but {} uuids",
                templates.len(),
                uuids.len()
            )));
        }
        for (templ, uuid) in templates.iter().zip(uuids) {
            self.add(templ, uuid)?;
        }
        Ok(())
    }

    /// Adds a template taken from another dynamic index.
    pub fn add_context_template(&self, templ: &ContextTemplate, uuid: &str) -> Result<()> {
        let uuid = CString::new(uuid)?;
        let api = self.api();
        call(api, |e| unsafe {
            api.dynamic_template_index_add_3(
                self.raw(),
                templ.raw() as *const c_void,
                uuid.as_ptr(),
                e,
            )
        })
    }

    pub fn remove(&self, uuid: &str) -> Result<()> {
        let uuid = CString::new(uuid)?;
        let api = self.api();
        call(api, |e| unsafe { api.dynamic_template_index_remove_1(self.raw(), uuid.as_ptr(), e) })
    }

    pub fn remove_many<S: AsRef<str>>(&self, uuids: &[S]) -> Result<()> {
        let owned = uuids
            .iter()
            .map(|u| CString::new(u.as_ref()))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let pointers: Vec<*const c_char> = owned.iter().map(|u| u.as_ptr()).collect();
        let api = self.api();
        call(api, |e| unsafe {
            api.dynamic_template_index_remove_2(
                self.raw(),
                pointers.as_ptr(),
                pointers.len() as u64,
                e,
            )
        })
    }

    /// Moves every template of `other` into this index.
    pub fn concat(&self, other: &DynamicTemplateIndex) -> Result<()> {
        let api = self.api();
        call(api, |e| unsafe {
            api.dynamic_template_index_concatenate(self.raw(), other.raw(), e)
        })
    }

    pub fn clear(&self) -> Result<()> {
        let api = self.api();
        call(api, |e| unsafe { api.dynamic_template_index_clear(self.raw(), e) })
    }

    /// UUID of the template at `index`.
    pub fn uuid_at(&self, index: usize) -> Result<String> {
        let api = self.api();
        collect_string(|stream, write| {
            call(api, |e| unsafe {
                api.dynamic_template_index_at_by_index(self.raw(), index as i64, stream, write, e)
            })
        })
    }

    /// Template stored under `uuid`.
    pub fn at(&self, uuid: &str) -> Result<ContextTemplate> {
        let uuid = CString::new(uuid)?;
        let api = self.api();
        self.context_template(|e| unsafe {
            api.dynamic_template_index_at_by_uuid(self.raw(), uuid.as_ptr(), e)
        })
    }

    /// Template at position `index`.
    pub fn get(&self, index: usize) -> Result<ContextTemplate> {
        let api = self.api();
        self.context_template(|e| unsafe {
            api.dynamic_template_index_get(self.raw(), index as i64, e)
        })
    }

    fn context_template(&self, lookup: impl FnOnce(ExceptionOut) -> RawHandle) -> Result<ContextTemplate> {
        let object = create_object(self.object.api_arc(), ObjectKind::ContextTemplate, lookup)?;
        Ok(ContextTemplate { object })
    }
}
