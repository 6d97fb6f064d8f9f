// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type registry: stable integer identifiers for registered wire types.
//!
//! Identifiers are assigned in registration order, so every peer must
//! register the same types in the same order (agreed out-of-band); the
//! registry is never negotiated on the wire. All registration happens in a
//! single-threaded startup phase, after which the registry is frozen and
//! safe for unsynchronized concurrent reads.

use crate::codec::Codec;
use crate::ser::{WireError, WireResult};
use crate::types::{DeclaredType, PrimitiveKind, TypeKey};
use crate::value::{ArrayValue, Value, Vec3};
use std::collections::HashMap;

/// A registered wire type: identifier, key, and codec.
#[derive(Debug, Clone)]
pub struct Descriptor {
    pub id: u16,
    pub key: TypeKey,
    pub codec: Codec,
}

/// Ordered collection of type descriptors, queryable by key and by id.
#[derive(Debug, Default)]
pub struct Registry {
    entries: Vec<Descriptor>,
    by_key: HashMap<TypeKey, usize>,
    by_id: HashMap<u16, usize>,
    next_id: u16,
    frozen: bool,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in shapes pre-registered in a fixed
    /// order: bool, i8, i16, i32, i64, f32, f64, string, vec3, list, map,
    /// compressed envelope (ids 0..=11). Peers calling this on both sides
    /// start from identical id assignments.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for kind in [
            PrimitiveKind::Bool,
            PrimitiveKind::I8,
            PrimitiveKind::I16,
            PrimitiveKind::I32,
            PrimitiveKind::I64,
            PrimitiveKind::F32,
            PrimitiveKind::F64,
        ] {
            registry
                .register(TypeKey::Primitive(kind), Codec::Primitive(kind))
                .expect("fresh registry accepts built-in primitives");
        }
        registry
            .register(TypeKey::Str, Codec::Str)
            .expect("fresh registry accepts built-in string");
        registry
            .register(TypeKey::Vec3, Codec::Vec3)
            .expect("fresh registry accepts built-in vec3");
        registry
            .register(TypeKey::List, Codec::List)
            .expect("fresh registry accepts built-in list");
        registry
            .register(TypeKey::Map, Codec::Map)
            .expect("fresh registry accepts built-in map");
        registry
            .register(TypeKey::Compressed, Codec::Compressed)
            .expect("fresh registry accepts built-in envelope");
        registry
    }

    /// Register a type under the next free sequential id.
    pub fn register(&mut self, key: TypeKey, codec: Codec) -> WireResult<u16> {
        let id = self.next_free_id();
        self.insert(id, key, codec)?;
        self.next_id = id + 1;
        Ok(id)
    }

    /// Register a type under a caller-chosen id.
    ///
    /// Intended for framework code maintaining specific id maps across
    /// peers; sequential assignment skips ids claimed this way.
    pub fn register_with_id(&mut self, id: u16, key: TypeKey, codec: Codec) -> WireResult<u16> {
        self.insert(id, key, codec)?;
        Ok(id)
    }

    fn next_free_id(&self) -> u16 {
        let mut id = self.next_id;
        while self.by_id.contains_key(&id) {
            id += 1;
        }
        id
    }

    fn insert(&mut self, id: u16, key: TypeKey, codec: Codec) -> WireResult<()> {
        if self.frozen {
            return Err(WireError::RegistryFrozen);
        }
        if self.by_key.contains_key(&key) || self.by_id.contains_key(&id) {
            return Err(WireError::DuplicateType { key });
        }

        let codec = self.finalize(&key, codec)?;

        log::debug!("registered type {} with id {}", key, id);

        let index = self.entries.len();
        self.by_key.insert(key.clone(), index);
        self.by_id.insert(id, index);
        self.entries.push(Descriptor { id, key, codec });
        Ok(())
    }

    /// Registration-time validation and caching.
    ///
    /// Records pre-resolve every sealed field type and build their default
    /// instance here; arrays validate their shape and element type. Both
    /// require referenced types to be registered first, so registration
    /// order follows dependency order.
    fn finalize(&self, key: &TypeKey, codec: Codec) -> WireResult<Codec> {
        match codec {
            Codec::Record(mut spec) => {
                for field in &spec.fields {
                    if let DeclaredType::Static(field_key) = &field.declared {
                        if self.resolve_by_key(field_key).is_err() {
                            return Err(WireError::NotConstructible {
                                name: spec.name.clone(),
                                reason: format!(
                                    "field `{}` type {} is not registered",
                                    field.name, field_key
                                ),
                            });
                        }
                        if let Some(default) = default_value(field_key) {
                            spec.defaults.insert(field.name.clone(), default);
                        }
                    }
                }
                Ok(Codec::Record(spec))
            }
            Codec::Array(spec) => {
                if spec.dims == 0 {
                    return Err(WireError::InvalidData {
                        reason: format!("array type {} must have at least one dimension", key),
                    });
                }
                if let DeclaredType::Static(elem_key) = &spec.elem {
                    self.resolve_by_key(elem_key)?;
                }
                Ok(Codec::Array(spec))
            }
            other => Ok(other),
        }
    }

    /// Look up a descriptor by type key (the encode path).
    pub fn resolve_by_key(&self, key: &TypeKey) -> WireResult<&Descriptor> {
        self.by_key
            .get(key)
            .map(|&index| &self.entries[index])
            .ok_or_else(|| WireError::UnregisteredType { key: key.clone() })
    }

    /// Look up a descriptor by wire id (the decode path).
    ///
    /// Failure signals either registry-order mismatch between peers or wire
    /// corruption.
    pub fn resolve_by_id(&self, id: u16) -> WireResult<&Descriptor> {
        self.by_id
            .get(&id)
            .map(|&index| &self.entries[index])
            .ok_or(WireError::UnknownTypeId { id })
    }

    /// Forbid further registration. Irreversible.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Descriptors in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Descriptor> {
        self.entries.iter()
    }
}

/// Default value for a sealed field type, used when building a record's
/// default instance. `None` means the type's wire form has its own absence
/// channel (string, enum, nested record) and the field defaults to absent.
fn default_value(key: &TypeKey) -> Option<Value> {
    match key {
        TypeKey::Primitive(kind) => Some(match kind {
            PrimitiveKind::Bool => Value::Bool(false),
            PrimitiveKind::I8 => Value::I8(0),
            PrimitiveKind::I16 => Value::I16(0),
            PrimitiveKind::I32 => Value::I32(0),
            PrimitiveKind::I64 => Value::I64(0),
            PrimitiveKind::F32 => Value::F32(0.0),
            PrimitiveKind::F64 => Value::F64(0.0),
        }),
        TypeKey::Vec3 => Some(Value::Vec3(Vec3::default())),
        TypeKey::List => Some(Value::List(Vec::new())),
        TypeKey::Map => Some(Value::Map(Vec::new())),
        TypeKey::Array { elem, dims } => {
            Some(Value::Array(ArrayValue::empty(elem.clone(), *dims)))
        }
        TypeKey::Str
        | TypeKey::Enum(_)
        | TypeKey::Record(_)
        | TypeKey::Compressed
        | TypeKey::External(_) => None,
    }
}
