// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type keys and registration-time type specifications.

use crate::value::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Primitive type kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Bool,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
}

impl PrimitiveKind {
    /// Encoded size in bytes.
    pub fn size(&self) -> usize {
        match self {
            Self::Bool | Self::I8 => 1,
            Self::I16 => 2,
            Self::I32 | Self::F32 => 4,
            Self::I64 | Self::F64 => 8,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::F32 => "f32",
            Self::F64 => "f64",
        }
    }
}

/// Declared type of a record field or array element.
///
/// `Static` pins a single concrete wire type at registration time, so the
/// value is written with that type's codec directly and carries no tag.
/// `Dynamic` defers to the tagged-value protocol: each value is prefixed
/// with its registry id (or the null sentinel) on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DeclaredType {
    Static(Box<TypeKey>),
    Dynamic,
}

impl DeclaredType {
    pub fn of(key: TypeKey) -> Self {
        Self::Static(Box::new(key))
    }
}

/// Key identifying a registered wire type.
///
/// Structured keys (`Enum`, `Record`, `External`, `Array`) let several types
/// of the same shape register independently; the array key also carries the
/// static element strategy so the decoder can recover the shared-vs-tagged
/// leaf handling without consulting wire data.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeKey {
    Primitive(PrimitiveKind),
    Str,
    Vec3,
    List,
    Map,
    Compressed,
    Enum(String),
    Record(String),
    External(String),
    Array { elem: DeclaredType, dims: u8 },
}

impl TypeKey {
    pub fn primitive(kind: PrimitiveKind) -> Self {
        Self::Primitive(kind)
    }

    pub fn enumeration(name: impl Into<String>) -> Self {
        Self::Enum(name.into())
    }

    pub fn record(name: impl Into<String>) -> Self {
        Self::Record(name.into())
    }

    pub fn external(name: impl Into<String>) -> Self {
        Self::External(name.into())
    }

    /// Array with a statically-typed element.
    pub fn array(elem: TypeKey, dims: u8) -> Self {
        Self::Array {
            elem: DeclaredType::of(elem),
            dims,
        }
    }

    /// Array whose elements go through the tagged-value protocol.
    pub fn tagged_array(dims: u8) -> Self {
        Self::Array {
            elem: DeclaredType::Dynamic,
            dims,
        }
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(kind) => f.write_str(kind.name()),
            Self::Str => f.write_str("string"),
            Self::Vec3 => f.write_str("vec3"),
            Self::List => f.write_str("list"),
            Self::Map => f.write_str("map"),
            Self::Compressed => f.write_str("compressed"),
            Self::Enum(name) => write!(f, "enum:{}", name),
            Self::Record(name) => write!(f, "record:{}", name),
            Self::External(name) => write!(f, "external:{}", name),
            Self::Array { elem, dims } => match elem {
                DeclaredType::Static(key) => write!(f, "array[{}]:{}", dims, key),
                DeclaredType::Dynamic => write!(f, "array[{}]:tagged", dims),
            },
        }
    }
}

/// Enumeration type specification: the ordered variant list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumSpec {
    pub name: String,
    pub variants: Vec<String>,
}

impl EnumSpec {
    pub fn new(name: impl Into<String>, variants: Vec<String>) -> Self {
        Self {
            name: name.into(),
            variants,
        }
    }

    /// Ordinal of a variant by name.
    pub fn ordinal(&self, variant: &str) -> Option<i32> {
        self.variants.iter().position(|v| v == variant).map(|i| i as i32)
    }

    /// Variant name by ordinal.
    pub fn variant(&self, ordinal: i32) -> Option<&str> {
        usize::try_from(ordinal)
            .ok()
            .and_then(|i| self.variants.get(i))
            .map(String::as_str)
    }
}

/// Multi-dimensional array type specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArraySpec {
    /// Leaf element strategy, fixed at registration.
    pub elem: DeclaredType,
    /// Dimension count (1..=255).
    pub dims: u8,
}

impl ArraySpec {
    pub fn new(elem: DeclaredType, dims: u8) -> Self {
        Self { elem, dims }
    }

    pub fn key(&self) -> TypeKey {
        TypeKey::Array {
            elem: self.elem.clone(),
            dims: self.dims,
        }
    }
}

/// One serializable field of a record type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub declared: DeclaredType,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, declared: DeclaredType) -> Self {
        Self {
            name: name.into(),
            declared,
        }
    }
}

/// Record type specification: the registration-time field cache.
///
/// Fields are kept sorted lexicographically by name so the wire bytes are a
/// function of field values alone, never of declaration order. The default
/// instance is built once when the record is registered and reused by every
/// decode thereafter.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSpec {
    pub name: String,
    pub fields: Vec<FieldSpec>,
    pub(crate) defaults: BTreeMap<String, Value>,
}

impl RecordSpec {
    pub fn new(name: impl Into<String>, mut fields: Vec<FieldSpec>) -> Self {
        fields.sort_by(|a, b| a.name.cmp(&b.name));
        Self {
            name: name.into(),
            fields,
            defaults: BTreeMap::new(),
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Default values of the record's fields, as built at registration.
    /// Fields whose wire form has an absence channel have no entry.
    pub fn defaults(&self) -> &BTreeMap<String, Value> {
        &self.defaults
    }
}

/// Builder for [`RecordSpec`].
#[derive(Debug)]
pub struct RecordSpecBuilder {
    name: String,
    fields: Vec<FieldSpec>,
}

impl RecordSpecBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Add a field with a sealed (non-polymorphic) declared type.
    pub fn field(mut self, name: impl Into<String>, key: TypeKey) -> Self {
        self.fields.push(FieldSpec::new(name, DeclaredType::of(key)));
        self
    }

    /// Add a polymorphic field, written via the tagged-value protocol.
    pub fn dynamic_field(mut self, name: impl Into<String>) -> Self {
        self.fields.push(FieldSpec::new(name, DeclaredType::Dynamic));
        self
    }

    pub fn build(self) -> RecordSpec {
        RecordSpec::new(self.name, self.fields)
    }
}
