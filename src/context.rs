//! Processing-block contexts.
//!
//! A [`Context`] is a JSON-like tree stored inside the engine. Processing
//! blocks read their configuration from one and write their results back
//! into another. Only the root is owned; children are reached through
//! [`ContextRef`] (read only) and [`ContextMut`] (read/write) views that
//! borrow their parent and never free native memory.
//!
//! ```no_run
//! use facerec::{Context, FacerecService, ServiceConfig};
//! use serde_json::json;
//!
//! let service = FacerecService::create_service(ServiceConfig::from_env())?;
//! let config = Context::from_json(&service, &json!({
//!     "unit_type": "FACE_DETECTOR",
//!     "modification": "ssyv",
//! }))?;
//! let detector = service.create_processing_block(&config)?;
//! # Ok::<(), facerec::FacerecError>(())
//! ```

use crate::error::{FacerecError, Result};
use crate::exception::call_tdv;
use crate::ffi::{FacerecApi, RawHandle};
use crate::handle::{NativeObject, ObjectKind};
use crate::service::FacerecService;
use serde_json::{Map, Number, Value};
use std::ffi::{c_char, c_void, CStr, CString};
use std::fmt;
use std::sync::Arc;

/// One node of a native context tree.
#[derive(Clone, Copy)]
struct Node<'a> {
    api: &'a Arc<dyn FacerecApi>,
    raw: RawHandle,
}

impl<'a> Node<'a> {
    fn child(self, raw: RawHandle) -> Result<Node<'a>> {
        if raw.is_null() {
            return Err(FacerecError::NullObject("Context"));
        }
        Ok(Node { api: self.api, raw })
    }

    fn get(self, key: &str) -> Result<Node<'a>> {
        let key = CString::new(key)?;
        let api = self.api.as_ref();
        let raw = call_tdv(api, |e| unsafe { api.tdv_context_get_by_key(self.raw, key.as_ptr(), e) })?;
        self.child(raw)
    }

    fn get_or_insert(self, key: &str) -> Result<Node<'a>> {
        let key = CString::new(key)?;
        let api = self.api.as_ref();
        let raw = call_tdv(api, |e| unsafe {
            api.tdv_context_get_or_insert_by_key(self.raw, key.as_ptr(), e)
        })?;
        self.child(raw)
    }

    fn index(self, index: usize) -> Result<Node<'a>> {
        let index = i32::try_from(index)
            .map_err(|_| FacerecError::InvalidOperation(format!("context index {index} out of range")))?;
        let api = self.api.as_ref();
        let raw = call_tdv(api, |e| unsafe { api.tdv_context_get_by_index(self.raw, index, e) })?;
        self.child(raw)
    }

    fn contains(self, key: &str) -> Result<bool> {
        if !self.is_object()? {
            return Ok(false);
        }
        // A missing key is reported by the engine as an exception.
        Ok(self.get(key).is_ok())
    }

    fn len(self) -> Result<usize> {
        let api = self.api.as_ref();
        call_tdv(api, |e| unsafe { api.tdv_context_get_length(self.raw, e) }).map(|n| n as usize)
    }

    fn keys(self) -> Result<Vec<String>> {
        let length = self.len()?;
        if length == 0 || !self.is_object()? {
            return Ok(Vec::new());
        }
        let api = self.api.as_ref();
        let array = call_tdv(api, |e| unsafe { api.tdv_context_get_keys(self.raw, length as u64, e) })?;
        if array.is_null() {
            return Err(FacerecError::NullObject("Context keys"));
        }
        let mut keys = Vec::with_capacity(length);
        unsafe {
            for i in 0..length {
                let key = *array.add(i);
                if !key.is_null() {
                    keys.push(CStr::from_ptr(key).to_string_lossy().into_owned());
                    api.tdv_context_free_ptr(key as *mut c_void);
                }
            }
            api.tdv_context_free_ptr(array as *mut c_void);
        }
        Ok(keys)
    }

    fn is_none(self) -> Result<bool> {
        let api = self.api.as_ref();
        call_tdv(api, |e| unsafe { api.tdv_context_is_none(self.raw, e) })
    }

    fn is_array(self) -> Result<bool> {
        let api = self.api.as_ref();
        call_tdv(api, |e| unsafe { api.tdv_context_is_array(self.raw, e) })
    }

    fn is_object(self) -> Result<bool> {
        let api = self.api.as_ref();
        call_tdv(api, |e| unsafe { api.tdv_context_is_object(self.raw, e) })
    }

    fn is_bool(self) -> Result<bool> {
        let api = self.api.as_ref();
        call_tdv(api, |e| unsafe { api.tdv_context_is_bool(self.raw, e) })
    }

    fn is_long(self) -> Result<bool> {
        let api = self.api.as_ref();
        call_tdv(api, |e| unsafe { api.tdv_context_is_long(self.raw, e) })
    }

    fn is_double(self) -> Result<bool> {
        let api = self.api.as_ref();
        call_tdv(api, |e| unsafe { api.tdv_context_is_double(self.raw, e) })
    }

    fn is_string(self) -> Result<bool> {
        let api = self.api.as_ref();
        call_tdv(api, |e| unsafe { api.tdv_context_is_string(self.raw, e) })
    }

    fn as_str(self) -> Result<String> {
        let api = self.api.as_ref();
        let size = call_tdv(api, |e| unsafe { api.tdv_context_get_str_size(self.raw, e) })? as usize;
        // The engine writes the terminating NUL as well.
        let mut buffer = vec![0u8; size + 1];
        call_tdv(api, |e| unsafe {
            api.tdv_context_get_str(self.raw, buffer.as_mut_ptr() as *mut c_char, e)
        })?;
        buffer.truncate(size);
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    fn as_long(self) -> Result<i64> {
        let api = self.api.as_ref();
        call_tdv(api, |e| unsafe { api.tdv_context_get_long(self.raw, e) })
    }

    fn as_double(self) -> Result<f64> {
        let api = self.api.as_ref();
        call_tdv(api, |e| unsafe { api.tdv_context_get_double(self.raw, e) })
    }

    fn as_bool(self) -> Result<bool> {
        let api = self.api.as_ref();
        call_tdv(api, |e| unsafe { api.tdv_context_get_bool(self.raw, e) })
    }

    fn to_json(self) -> Result<Value> {
        if self.is_none()? {
            return Ok(Value::Null);
        }
        if self.is_bool()? {
            return self.as_bool().map(Value::Bool);
        }
        if self.is_long()? {
            return self.as_long().map(|v| Value::Number(v.into()));
        }
        if self.is_double()? {
            let value = self.as_double()?;
            return Ok(Number::from_f64(value).map_or(Value::Null, Value::Number));
        }
        if self.is_string()? {
            return self.as_str().map(Value::String);
        }
        if self.is_array()? {
            let items = (0..self.len()?)
                .map(|i| self.index(i)?.to_json())
                .collect::<Result<Vec<_>>>()?;
            return Ok(Value::Array(items));
        }
        if self.is_object()? {
            let mut map = Map::new();
            for key in self.keys()? {
                let value = self.get(&key)?.to_json()?;
                map.insert(key, value);
            }
            return Ok(Value::Object(map));
        }
        Err(FacerecError::InvalidOperation(
            "context holds a value with no JSON representation".to_string(),
        ))
    }

    fn set_str(self, value: &str) -> Result<()> {
        let value = CString::new(value)?;
        let api = self.api.as_ref();
        call_tdv(api, |e| unsafe { api.tdv_context_put_str(self.raw, value.as_ptr(), e) })
    }

    fn set_long(self, value: i64) -> Result<()> {
        let api = self.api.as_ref();
        call_tdv(api, |e| unsafe { api.tdv_context_put_long(self.raw, value, e) })
    }

    fn set_double(self, value: f64) -> Result<()> {
        let api = self.api.as_ref();
        call_tdv(api, |e| unsafe { api.tdv_context_put_double(self.raw, value, e) })
    }

    fn set_bool(self, value: bool) -> Result<()> {
        let api = self.api.as_ref();
        call_tdv(api, |e| unsafe { api.tdv_context_put_bool(self.raw, value, e) })
    }

    fn push_copy(self, item: RawHandle) -> Result<()> {
        let api = self.api.as_ref();
        call_tdv(api, |e| unsafe { api.tdv_context_push_back(self.raw, item, true, e) })
    }

    fn clear(self) -> Result<()> {
        let api = self.api.as_ref();
        call_tdv(api, |e| unsafe { api.tdv_context_clear(self.raw, e) })
    }

    fn set_json(self, value: &Value) -> Result<()> {
        match value {
            Value::Null => self.clear(),
            Value::Bool(b) => self.set_bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(v) => self.set_long(v),
                None => self.set_double(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => self.set_str(s),
            Value::Array(items) => {
                self.clear()?;
                for item in items {
                    let element = OwnedNode::create(self.api)?;
                    let result = element.node().set_json(item).and_then(|_| self.push_copy(element.raw));
                    element.release()?;
                    result?;
                }
                Ok(())
            }
            Value::Object(map) => {
                for (key, item) in map {
                    self.get_or_insert(key)?.set_json(item)?;
                }
                Ok(())
            }
        }
    }
}

/// Temporary root used while building array elements.
struct OwnedNode<'a> {
    api: &'a Arc<dyn FacerecApi>,
    raw: RawHandle,
}

impl<'a> OwnedNode<'a> {
    fn create(api: &'a Arc<dyn FacerecApi>) -> Result<Self> {
        let raw = call_tdv(api.as_ref(), |e| unsafe { api.tdv_context_create(e) })?;
        if raw.is_null() {
            return Err(FacerecError::NullObject("Context"));
        }
        Ok(Self { api, raw })
    }

    fn node(&self) -> Node<'a> {
        Node {
            api: self.api,
            raw: self.raw,
        }
    }

    fn release(self) -> Result<()> {
        let api = self.api.as_ref();
        call_tdv(api, |e| unsafe { api.tdv_context_destroy(self.raw, e) })
    }
}

macro_rules! context_read_methods {
    () => {
        /// Child under `key`; fails when the key is absent.
        pub fn get(&self, key: &str) -> Result<ContextRef<'_>> {
            self.node().get(key).map(ContextRef::from_node)
        }

        /// Array element at `index`.
        pub fn index(&self, index: usize) -> Result<ContextRef<'_>> {
            self.node().index(index).map(ContextRef::from_node)
        }

        pub fn contains(&self, key: &str) -> Result<bool> {
            self.node().contains(key)
        }

        /// Number of array elements or object keys.
        pub fn len(&self) -> Result<usize> {
            self.node().len()
        }

        pub fn is_empty(&self) -> Result<bool> {
            self.len().map(|n| n == 0)
        }

        /// Object keys in engine order; empty for non-objects.
        pub fn keys(&self) -> Result<Vec<String>> {
            self.node().keys()
        }

        pub fn is_none(&self) -> Result<bool> {
            self.node().is_none()
        }

        pub fn is_array(&self) -> Result<bool> {
            self.node().is_array()
        }

        pub fn is_object(&self) -> Result<bool> {
            self.node().is_object()
        }

        pub fn is_bool(&self) -> Result<bool> {
            self.node().is_bool()
        }

        pub fn is_long(&self) -> Result<bool> {
            self.node().is_long()
        }

        pub fn is_double(&self) -> Result<bool> {
            self.node().is_double()
        }

        pub fn is_string(&self) -> Result<bool> {
            self.node().is_string()
        }

        pub fn as_str(&self) -> Result<String> {
            self.node().as_str()
        }

        pub fn as_long(&self) -> Result<i64> {
            self.node().as_long()
        }

        pub fn as_double(&self) -> Result<f64> {
            self.node().as_double()
        }

        pub fn as_bool(&self) -> Result<bool> {
            self.node().as_bool()
        }

        /// Converts the subtree to JSON.
        pub fn to_json(&self) -> Result<Value> {
            self.node().to_json()
        }
    };
}

macro_rules! context_write_methods {
    () => {
        /// Child under `key`, inserting an empty one if absent.
        pub fn get_mut_or_insert(&mut self, key: &str) -> Result<ContextMut<'_>> {
            self.node().get_or_insert(key).map(ContextMut::from_node)
        }

        pub fn index_mut(&mut self, index: usize) -> Result<ContextMut<'_>> {
            self.node().index(index).map(ContextMut::from_node)
        }

        /// Appends a copy of `item` to this array.
        pub fn push(&mut self, item: &Context) -> Result<()> {
            self.node().push_copy(item.raw())
        }

        /// Appends a JSON value to this array.
        pub fn push_json(&mut self, item: &Value) -> Result<()> {
            let element = OwnedNode::create(self.node().api)?;
            let result = element
                .node()
                .set_json(item)
                .and_then(|_| self.node().push_copy(element.raw));
            element.release()?;
            result
        }

        pub fn set_str(&mut self, value: &str) -> Result<()> {
            self.node().set_str(value)
        }

        pub fn set_long(&mut self, value: i64) -> Result<()> {
            self.node().set_long(value)
        }

        pub fn set_double(&mut self, value: f64) -> Result<()> {
            self.node().set_double(value)
        }

        pub fn set_bool(&mut self, value: bool) -> Result<()> {
            self.node().set_bool(value)
        }

        /// Replaces or merges this node with `value`. Objects merge key by
        /// key, arrays replace the previous content.
        pub fn set_json(&mut self, value: &Value) -> Result<()> {
            self.node().set_json(value)
        }

        /// Removes every child and value.
        pub fn clear(&mut self) -> Result<()> {
            self.node().clear()
        }
    };
}

/// An owned context tree.
pub struct Context {
    object: Arc<NativeObject>,
}

impl Context {
    /// Creates an empty context.
    pub fn new(service: &FacerecService) -> Result<Self> {
        Self::create(service.api_arc())
    }

    pub(crate) fn create(api: &Arc<dyn FacerecApi>) -> Result<Self> {
        let raw = call_tdv(api.as_ref(), |e| unsafe { api.tdv_context_create(e) })?;
        Self::from_owned(api, raw)
    }

    fn from_owned(api: &Arc<dyn FacerecApi>, raw: RawHandle) -> Result<Self> {
        let object = NativeObject::wrap(api.clone(), raw, ObjectKind::Context)?;
        Ok(Self { object })
    }

    /// Builds a context from a JSON value.
    pub fn from_json(service: &FacerecService, value: &Value) -> Result<Self> {
        let mut context = Self::new(service)?;
        context.set_json(value)?;
        Ok(context)
    }

    /// Deep copy into a new owned context.
    pub fn try_clone(&self) -> Result<Self> {
        let api = self.object.api();
        let raw = call_tdv(api, |e| unsafe { api.tdv_context_clone(self.raw(), e) })?;
        Self::from_owned(self.object.api_arc(), raw)
    }

    /// Replaces this tree with a copy of `other`.
    pub fn copy_from(&mut self, other: &Context) -> Result<()> {
        let api = self.object.api();
        call_tdv(api, |e| unsafe { api.tdv_context_copy(other.raw(), self.raw(), e) })
    }

    /// Read-only view of the root.
    pub fn view(&self) -> ContextRef<'_> {
        ContextRef::from_node(self.node())
    }

    /// Mutable view of the root.
    pub fn view_mut(&mut self) -> ContextMut<'_> {
        ContextMut::from_node(self.node())
    }

    pub(crate) fn raw(&self) -> RawHandle {
        self.object.raw()
    }

    fn node(&self) -> Node<'_> {
        Node {
            api: self.object.api_arc(),
            raw: self.object.raw(),
        }
    }

    context_read_methods!();
    context_write_methods!();
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context").field("raw", &self.raw()).finish()
    }
}

/// Read-only view of a node inside a [`Context`].
#[derive(Clone, Copy)]
pub struct ContextRef<'a> {
    node: Node<'a>,
}

impl<'a> ContextRef<'a> {
    fn from_node(node: Node<'a>) -> Self {
        Self { node }
    }

    fn node(&self) -> Node<'a> {
        self.node
    }

    /// Deep copy of this subtree into a new owned context.
    pub fn to_owned_context(&self) -> Result<Context> {
        let api = self.node.api.as_ref();
        let raw = call_tdv(api, |e| unsafe { api.tdv_context_clone(self.node.raw, e) })?;
        let object = NativeObject::wrap(self.node.api.clone(), raw, ObjectKind::Context)?;
        Ok(Context { object })
    }

    context_read_methods!();
}

/// Mutable view of a node inside a [`Context`].
pub struct ContextMut<'a> {
    node: Node<'a>,
}

impl<'a> ContextMut<'a> {
    fn from_node(node: Node<'a>) -> Self {
        Self { node }
    }

    fn node(&self) -> Node<'a> {
        self.node
    }

    pub fn view(&self) -> ContextRef<'_> {
        ContextRef::from_node(self.node)
    }

    context_read_methods!();
    context_write_methods!();
}

impl fmt::Debug for ContextRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextRef").field("raw", &self.node.raw).finish()
    }
}

impl fmt::Debug for ContextMut<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextMut").field("raw", &self.node.raw).finish()
    }
}
