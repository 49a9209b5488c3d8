//! JSON-like node store behind the fake `TDVContext_*` functions.

use super::{c_string, fail, Failure, FakeEngine};
use crate::ffi::{ContextApi, ExceptionOut, RawHandle};
use std::collections::{HashMap, HashSet};
use std::ffi::{c_char, c_void, CString};
use std::ptr;

#[derive(Debug, Clone)]
enum Value {
    None,
    Bool(bool),
    Long(i64),
    Double(f64),
    Str(String),
    Array(Vec<usize>),
    Object(Vec<(String, usize)>),
}

#[derive(Default)]
pub(super) struct Tree {
    next: usize,
    nodes: HashMap<usize, Value>,
    key_arrays: HashMap<usize, usize>,
    key_strings: HashSet<usize>,
}

impl Tree {
    fn insert(&mut self, value: Value) -> usize {
        // Kept apart from the engine's object handles.
        self.next += 16;
        let handle = 0x4000_0000 + self.next;
        self.nodes.insert(handle, value);
        handle
    }

    fn value(&self, node: usize) -> Result<&Value, Failure> {
        self.nodes
            .get(&node)
            .ok_or_else(|| fail(format!("unknown context {node:#x}")))
    }

    fn value_mut(&mut self, node: usize) -> Result<&mut Value, Failure> {
        self.nodes
            .get_mut(&node)
            .ok_or_else(|| fail(format!("unknown context {node:#x}")))
    }

    fn children(value: &Value) -> Vec<usize> {
        match value {
            Value::Array(items) => items.clone(),
            Value::Object(entries) => entries.iter().map(|(_, h)| *h).collect(),
            _ => Vec::new(),
        }
    }

    fn remove(&mut self, node: usize) {
        if let Some(value) = self.nodes.remove(&node) {
            for child in Self::children(&value) {
                self.remove(child);
            }
        }
    }

    fn deep_copy(&mut self, node: usize) -> Result<usize, Failure> {
        let value = match self.value(node)?.clone() {
            Value::Array(items) => Value::Array(
                items
                    .into_iter()
                    .map(|h| self.deep_copy(h))
                    .collect::<Result<_, _>>()?,
            ),
            Value::Object(entries) => Value::Object(
                entries
                    .into_iter()
                    .map(|(k, h)| Ok((k, self.deep_copy(h)?)))
                    .collect::<Result<_, Failure>>()?,
            ),
            scalar => scalar,
        };
        Ok(self.insert(value))
    }

    fn replace(&mut self, node: usize, value: Value) -> Result<(), Failure> {
        let old = std::mem::replace(self.value_mut(node)?, value);
        for child in Self::children(&old) {
            self.remove(child);
        }
        Ok(())
    }

    /// Child of an object node, if present.
    pub(super) fn child(&self, node: usize, key: &str) -> Option<usize> {
        match self.nodes.get(&node)? {
            Value::Object(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, h)| *h),
            _ => None,
        }
    }

    pub(super) fn long(&self, node: usize) -> Option<i64> {
        match self.nodes.get(&node)? {
            Value::Long(v) => Some(*v),
            _ => None,
        }
    }

    pub(super) fn string(&self, node: usize) -> Option<String> {
        match self.nodes.get(&node)? {
            Value::Str(s) => Some(s.clone()),
            _ => None,
        }
    }

    fn get_or_insert(&mut self, node: usize, key: &str) -> Result<usize, Failure> {
        if matches!(self.value(node)?, Value::None) {
            self.replace(node, Value::Object(Vec::new()))?;
        }
        if let Some(existing) = self.child(node, key) {
            return Ok(existing);
        }
        let created = self.insert(Value::None);
        match self.value_mut(node)? {
            Value::Object(entries) => {
                entries.push((key.to_string(), created));
                Ok(created)
            }
            _ => {
                self.remove(created);
                Err(fail(format!("cannot insert '{key}' into a non-object")))
            }
        }
    }

    fn push_back(&mut self, node: usize, data: usize) -> Result<(), Failure> {
        if matches!(self.value(node)?, Value::None) {
            self.replace(node, Value::Array(Vec::new()))?;
        }
        if !matches!(self.value(node)?, Value::Array(_)) {
            return Err(fail("push_back on a non-array"));
        }
        let copy = self.deep_copy(data)?;
        if let Value::Array(items) = self.value_mut(node)? {
            items.push(copy);
        }
        Ok(())
    }

    fn length(&self, node: usize) -> Result<u64, Failure> {
        Ok(match self.value(node)? {
            Value::Array(items) => items.len() as u64,
            Value::Object(entries) => entries.len() as u64,
            _ => 0,
        })
    }

    /// Appends a detection the way a face detector block reports it.
    fn add_detection(&mut self, node: usize) -> Result<(), Failure> {
        let objects = self.get_or_insert(node, "objects")?;
        let id = self.length(objects)? as i64;
        let class = self.insert(Value::Str("face".to_string()));
        let confidence = self.insert(Value::Double(0.87));
        let id = self.insert(Value::Long(id));
        let detection = self.insert(Value::Object(vec![
            ("id".to_string(), id),
            ("class".to_string(), class),
            ("confidence".to_string(), confidence),
        ]));
        let result = self.push_back(objects, detection);
        self.remove(detection);
        result
    }
}

impl FakeEngine {
    unsafe fn context_is(
        &self,
        context: RawHandle,
        exception: ExceptionOut,
        check: fn(&Value) -> bool,
    ) -> bool {
        self.tdv_call(exception, |s| s.contexts.value(context as usize).map(check))
    }
}

impl ContextApi for FakeEngine {
    unsafe fn tdv_context_create(&self, exception: ExceptionOut) -> RawHandle {
        self.tdv_call(exception, |s| Ok(s.contexts.insert(Value::None))) as RawHandle
    }

    unsafe fn tdv_context_destroy(&self, context: RawHandle, exception: ExceptionOut) {
        self.tdv_call(exception, |s| {
            s.contexts.value(context as usize)?;
            s.contexts.remove(context as usize);
            s.stats.contexts_destroyed += 1;
            Ok(())
        })
    }

    unsafe fn tdv_context_clone(&self, context: RawHandle, exception: ExceptionOut) -> RawHandle {
        self.tdv_call(exception, |s| s.contexts.deep_copy(context as usize)) as RawHandle
    }

    unsafe fn tdv_context_copy(
        &self,
        source: RawHandle,
        destination: RawHandle,
        exception: ExceptionOut,
    ) {
        self.tdv_call(exception, |s| {
            let copy = s.contexts.deep_copy(source as usize)?;
            let value = s.contexts.nodes.remove(&copy).unwrap_or(Value::None);
            s.contexts.replace(destination as usize, value)
        })
    }

    unsafe fn tdv_context_get_by_key(
        &self,
        context: RawHandle,
        key: *const c_char,
        exception: ExceptionOut,
    ) -> RawHandle {
        let key = c_string(key);
        self.tdv_call(exception, |s| {
            s.contexts.value(context as usize)?;
            s.contexts
                .child(context as usize, &key)
                .ok_or_else(|| fail(format!("key '{key}' not found")))
        }) as RawHandle
    }

    unsafe fn tdv_context_get_or_insert_by_key(
        &self,
        context: RawHandle,
        key: *const c_char,
        exception: ExceptionOut,
    ) -> RawHandle {
        let key = c_string(key);
        self.tdv_call(exception, |s| s.contexts.get_or_insert(context as usize, &key)) as RawHandle
    }

    unsafe fn tdv_context_get_by_index(
        &self,
        context: RawHandle,
        index: i32,
        exception: ExceptionOut,
    ) -> RawHandle {
        self.tdv_call(exception, |s| match s.contexts.value(context as usize)? {
            Value::Array(items) => usize::try_from(index)
                .ok()
                .and_then(|i| items.get(i).copied())
                .ok_or_else(|| fail(format!("index {index} out of range"))),
            _ => Err(fail("index access on a non-array")),
        }) as RawHandle
    }

    unsafe fn tdv_context_push_back(
        &self,
        context: RawHandle,
        data: RawHandle,
        _copy: bool,
        exception: ExceptionOut,
    ) {
        self.tdv_call(exception, |s| s.contexts.push_back(context as usize, data as usize))
    }

    unsafe fn tdv_context_put_str(
        &self,
        context: RawHandle,
        value: *const c_char,
        exception: ExceptionOut,
    ) {
        let value = c_string(value);
        self.tdv_call(exception, |s| s.contexts.replace(context as usize, Value::Str(value)))
    }

    unsafe fn tdv_context_put_long(&self, context: RawHandle, value: i64, exception: ExceptionOut) {
        self.tdv_call(exception, |s| s.contexts.replace(context as usize, Value::Long(value)))
    }

    unsafe fn tdv_context_put_double(
        &self,
        context: RawHandle,
        value: f64,
        exception: ExceptionOut,
    ) {
        self.tdv_call(exception, |s| s.contexts.replace(context as usize, Value::Double(value)))
    }

    unsafe fn tdv_context_put_bool(&self, context: RawHandle, value: bool, exception: ExceptionOut) {
        self.tdv_call(exception, |s| s.contexts.replace(context as usize, Value::Bool(value)))
    }

    unsafe fn tdv_context_get_str_size(&self, context: RawHandle, exception: ExceptionOut) -> u64 {
        self.tdv_call(exception, |s| match s.contexts.value(context as usize)? {
            Value::Str(text) => Ok(text.len() as u64),
            _ => Err(fail("not a string")),
        })
    }

    unsafe fn tdv_context_get_str(
        &self,
        context: RawHandle,
        buffer: *mut c_char,
        exception: ExceptionOut,
    ) {
        self.tdv_call(exception, |s| match s.contexts.value(context as usize)? {
            Value::Str(text) => {
                ptr::copy_nonoverlapping(text.as_ptr(), buffer as *mut u8, text.len());
                *buffer.add(text.len()) = 0;
                Ok(())
            }
            _ => Err(fail("not a string")),
        })
    }

    unsafe fn tdv_context_get_long(&self, context: RawHandle, exception: ExceptionOut) -> i64 {
        self.tdv_call(exception, |s| match s.contexts.value(context as usize)? {
            Value::Long(v) => Ok(*v),
            _ => Err(fail("not a long")),
        })
    }

    unsafe fn tdv_context_get_double(&self, context: RawHandle, exception: ExceptionOut) -> f64 {
        self.tdv_call(exception, |s| match s.contexts.value(context as usize)? {
            Value::Double(v) => Ok(*v),
            _ => Err(fail("not a double")),
        })
    }

    unsafe fn tdv_context_get_bool(&self, context: RawHandle, exception: ExceptionOut) -> bool {
        self.tdv_call(exception, |s| match s.contexts.value(context as usize)? {
            Value::Bool(v) => Ok(*v),
            _ => Err(fail("not a bool")),
        })
    }

    unsafe fn tdv_context_get_length(&self, context: RawHandle, exception: ExceptionOut) -> u64 {
        self.tdv_call(exception, |s| s.contexts.length(context as usize))
    }

    unsafe fn tdv_context_get_keys(
        &self,
        context: RawHandle,
        length: u64,
        exception: ExceptionOut,
    ) -> *mut *mut c_char {
        self.tdv_call(exception, |s| {
            let keys: Vec<String> = match s.contexts.value(context as usize)? {
                Value::Object(entries) => entries.iter().map(|(k, _)| k.clone()).collect(),
                _ => return Err(fail("keys of a non-object")),
            };
            if keys.len() as u64 != length {
                return Err(fail(format!("expected {length} keys, have {}", keys.len())));
            }
            let pointers: Vec<*mut c_char> = keys
                .into_iter()
                .map(|k| CString::new(k).unwrap_or_default().into_raw())
                .collect();
            let tree = &mut s.contexts;
            tree.key_strings.extend(pointers.iter().map(|&p| p as usize));
            let count = pointers.len();
            let array = Box::into_raw(pointers.into_boxed_slice()) as *mut *mut c_char;
            tree.key_arrays.insert(array as usize, count);
            Ok(array as usize)
        }) as *mut *mut c_char
    }

    unsafe fn tdv_context_free_ptr(&self, ptr: *mut c_void) {
        let mut state = self.state.lock();
        let tree = &mut state.contexts;
        let address = ptr as usize;
        if tree.key_strings.remove(&address) {
            drop(CString::from_raw(ptr as *mut c_char));
        } else if let Some(count) = tree.key_arrays.remove(&address) {
            let slice = ptr::slice_from_raw_parts_mut(ptr as *mut *mut c_char, count);
            drop(Box::from_raw(slice));
        }
    }

    unsafe fn tdv_context_is_none(&self, context: RawHandle, exception: ExceptionOut) -> bool {
        self.context_is(context, exception, |v| matches!(v, Value::None))
    }

    unsafe fn tdv_context_is_array(&self, context: RawHandle, exception: ExceptionOut) -> bool {
        self.context_is(context, exception, |v| matches!(v, Value::Array(_)))
    }

    unsafe fn tdv_context_is_object(&self, context: RawHandle, exception: ExceptionOut) -> bool {
        self.context_is(context, exception, |v| matches!(v, Value::Object(_)))
    }

    unsafe fn tdv_context_is_bool(&self, context: RawHandle, exception: ExceptionOut) -> bool {
        self.context_is(context, exception, |v| matches!(v, Value::Bool(_)))
    }

    unsafe fn tdv_context_is_long(&self, context: RawHandle, exception: ExceptionOut) -> bool {
        self.context_is(context, exception, |v| matches!(v, Value::Long(_)))
    }

    unsafe fn tdv_context_is_double(&self, context: RawHandle, exception: ExceptionOut) -> bool {
        self.context_is(context, exception, |v| matches!(v, Value::Double(_)))
    }

    unsafe fn tdv_context_is_string(&self, context: RawHandle, exception: ExceptionOut) -> bool {
        self.context_is(context, exception, |v| matches!(v, Value::Str(_)))
    }

    unsafe fn tdv_context_clear(&self, context: RawHandle, exception: ExceptionOut) {
        self.tdv_call(exception, |s| s.contexts.replace(context as usize, Value::None))
    }

    unsafe fn tdv_exception_get_error_code(&self, exception: RawHandle) -> u32 {
        let state = self.state.lock();
        state
            .tdv_exceptions
            .get(&(exception as usize))
            .map_or(0, |e| e.code)
    }

    unsafe fn tdv_exception_get_message(&self, exception: RawHandle) -> *const c_char {
        let state = self.state.lock();
        state
            .tdv_exceptions
            .get(&(exception as usize))
            .map_or(ptr::null(), |e| e.message.as_ptr())
    }

    unsafe fn tdv_exception_delete_exception(&self, exception: RawHandle) {
        let mut state = self.state.lock();
        if state.tdv_exceptions.remove(&(exception as usize)).is_some() {
            state.stats.tdv_exceptions_freed += 1;
        }
    }

    unsafe fn tdv_processing_block_process_context(
        &self,
        block: RawHandle,
        context: RawHandle,
        exception: ExceptionOut,
    ) {
        self.tdv_call(exception, |s| {
            let unit_type = s
                .blocks
                .get(&(block as usize))
                .cloned()
                .ok_or_else(|| fail("unknown processing block"))?;
            if unit_type != "FACE_DETECTOR" {
                return Err(fail(format!("unit_type '{unit_type}' is not available")));
            }
            s.contexts.add_detection(context as usize)
        })
    }

    unsafe fn tdv_processing_block_destroy_block(&self, block: RawHandle, exception: ExceptionOut) {
        self.tdv_call(exception, |s| {
            s.blocks
                .remove(&(block as usize))
                .ok_or_else(|| fail("unknown processing block"))?;
            s.stats.blocks_destroyed += 1;
            Ok(())
        })
    }
}
