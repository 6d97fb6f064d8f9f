// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Wire value types.

use crate::types::{DeclaredType, PrimitiveKind, TypeKey};
use std::collections::BTreeMap;

/// Three-component single-precision vector.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// One level of a multi-dimensional array.
///
/// Nested arrays may be ragged or absent; leaves may be absent when the
/// element strategy supports it.
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayNode {
    /// Inner dimension: sub-arrays, `None` for an absent nested array.
    Branch(Vec<Option<ArrayNode>>),
    /// Innermost dimension: leaf elements.
    Leaf(Vec<Option<Value>>),
}

impl ArrayNode {
    pub fn len(&self) -> usize {
        match self {
            Self::Branch(children) => children.len(),
            Self::Leaf(elems) => elems.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A multi-dimensional array value with its declared element strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayValue {
    pub elem: DeclaredType,
    pub dims: u8,
    pub root: ArrayNode,
}

impl ArrayValue {
    pub fn new(elem: DeclaredType, dims: u8, root: ArrayNode) -> Self {
        Self { elem, dims, root }
    }

    /// The empty array of the given shape (wire form: zero top-level extent).
    pub fn empty(elem: DeclaredType, dims: u8) -> Self {
        let root = if dims <= 1 {
            ArrayNode::Leaf(Vec::new())
        } else {
            ArrayNode::Branch(Vec::new())
        };
        Self { elem, dims, root }
    }

    /// One-dimensional array over statically-typed elements.
    pub fn of(elem: TypeKey, values: Vec<Option<Value>>) -> Self {
        Self {
            elem: DeclaredType::of(elem),
            dims: 1,
            root: ArrayNode::Leaf(values),
        }
    }
}

/// A record instance: concrete type name plus named field values.
///
/// A field with no entry is absent; whether that is encodable depends on the
/// field's declared type (see the record codec).
#[derive(Debug, Clone, PartialEq)]
pub struct RecordValue {
    pub type_name: String,
    pub fields: BTreeMap<String, Value>,
}

impl RecordValue {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

/// A value that can travel over the wire.
///
/// This is the closed union the codec family dispatches over; polymorphic
/// positions (collection elements, map entries, dynamic record fields) hold
/// `Option<Value>` and resolve their concrete codec through the registry.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    // Primitives
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    Str(String),
    Vec3(Vec3),

    // Composites
    Enum { name: String, ordinal: i32 },
    Array(ArrayValue),
    List(Vec<Option<Value>>),
    Map(Vec<(Option<Value>, Option<Value>)>),
    Record(RecordValue),

    // Envelopes
    Compressed(Box<Value>),
    External { format: String, inner: Box<Value> },
}

impl Value {
    /// Registry key of this value's concrete type.
    pub fn type_key(&self) -> TypeKey {
        match self {
            Self::Bool(_) => TypeKey::Primitive(PrimitiveKind::Bool),
            Self::I8(_) => TypeKey::Primitive(PrimitiveKind::I8),
            Self::I16(_) => TypeKey::Primitive(PrimitiveKind::I16),
            Self::I32(_) => TypeKey::Primitive(PrimitiveKind::I32),
            Self::I64(_) => TypeKey::Primitive(PrimitiveKind::I64),
            Self::F32(_) => TypeKey::Primitive(PrimitiveKind::F32),
            Self::F64(_) => TypeKey::Primitive(PrimitiveKind::F64),
            Self::Str(_) => TypeKey::Str,
            Self::Vec3(_) => TypeKey::Vec3,
            Self::Enum { name, .. } => TypeKey::Enum(name.clone()),
            Self::Array(array) => TypeKey::Array {
                elem: array.elem.clone(),
                dims: array.dims,
            },
            Self::List(_) => TypeKey::List,
            Self::Map(_) => TypeKey::Map,
            Self::Record(record) => TypeKey::Record(record.type_name.clone()),
            Self::Compressed(_) => TypeKey::Compressed,
            Self::External { format, .. } => TypeKey::External(format.clone()),
        }
    }

    /// Enumeration value.
    pub fn enumeration(name: impl Into<String>, ordinal: i32) -> Self {
        Self::Enum {
            name: name.into(),
            ordinal,
        }
    }

    /// Collection of present elements.
    pub fn list(items: Vec<Value>) -> Self {
        Self::List(items.into_iter().map(Some).collect())
    }

    /// Map of present keys and values.
    pub fn map(entries: Vec<(Value, Value)>) -> Self {
        Self::Map(
            entries
                .into_iter()
                .map(|(k, v)| (Some(k), Some(v)))
                .collect(),
        )
    }

    /// Try to get as bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as i32.
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Self::I32(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as i64.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::I64(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as f32.
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Self::F32(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as f64.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::F64(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(v) => Some(v),
            _ => None,
        }
    }

    /// Try to get as list elements.
    pub fn as_list(&self) -> Option<&[Option<Value>]> {
        match self {
            Self::List(v) => Some(v),
            _ => None,
        }
    }

    /// Try to get as record.
    pub fn as_record(&self) -> Option<&RecordValue> {
        match self {
            Self::Record(v) => Some(v),
            _ => None,
        }
    }
}

// Conversion traits
impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i8> for Value {
    fn from(v: i8) -> Self {
        Self::I8(v)
    }
}

impl From<i16> for Value {
    fn from(v: i16) -> Self {
        Self::I16(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::I32(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::I64(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::F32(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::F64(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<Vec3> for Value {
    fn from(v: Vec3) -> Self {
        Self::Vec3(v)
    }
}

impl From<RecordValue> for Value {
    fn from(v: RecordValue) -> Self {
        Self::Record(v)
    }
}

impl From<ArrayValue> for Value {
    fn from(v: ArrayValue) -> Self {
        Self::Array(v)
    }
}
