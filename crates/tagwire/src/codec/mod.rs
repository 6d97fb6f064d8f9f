// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Value codecs: one encoder/decoder per type shape.
//!
//! A codec writes the payload of a value only; any tag that identifies the
//! value's type on the wire is supplied by the caller through the
//! tagged-value protocol in [`tagged`]. Codecs are stateless apart from the
//! registration-time caches carried by the enum and record variants.

pub mod array;
pub mod collection;
pub mod envelope;
pub mod enums;
pub mod external;
pub mod map;
pub mod primitive;
pub mod record;
pub mod string;
pub mod tagged;

pub use external::{ExternalFormat, ExternalSpec};
pub use tagged::{read_tagged, write_tagged};

use crate::registry::Registry;
use crate::ser::{Cursor, CursorMut, WireError, WireResult};
use crate::types::{ArraySpec, EnumSpec, PrimitiveKind, RecordSpec};
use crate::value::Value;

/// Codec for one registered type.
///
/// `encode` takes an `Option` because some shapes own an absence channel on
/// the wire (string discriminator 0, enum ordinal -1, record presence byte,
/// array zero extent); shapes without one reject `None` with `InvalidData`.
/// `decode` mirrors: it may yield `None` through the same channels.
#[derive(Debug, Clone)]
pub enum Codec {
    Primitive(PrimitiveKind),
    Str,
    Vec3,
    Enum(EnumSpec),
    Array(ArraySpec),
    List,
    Map,
    Record(RecordSpec),
    Compressed,
    External(ExternalSpec),
}

impl Codec {
    pub fn encode(
        &self,
        value: Option<&Value>,
        registry: &Registry,
        out: &mut CursorMut<'_>,
    ) -> WireResult<()> {
        match self {
            Codec::Primitive(kind) => primitive::encode(*kind, value, out),
            Codec::Str => string::encode(value, out),
            Codec::Vec3 => primitive::encode_vec3(value, out),
            Codec::Enum(spec) => enums::encode(spec, value, out),
            Codec::Array(spec) => array::encode(spec, value, registry, out),
            Codec::List => collection::encode(value, registry, out),
            Codec::Map => map::encode(value, registry, out),
            Codec::Record(spec) => record::encode(spec, value, registry, out),
            Codec::Compressed => envelope::encode(value, registry, out),
            Codec::External(spec) => external::encode(spec, value, out),
        }
    }

    pub fn decode(
        &self,
        registry: &Registry,
        cursor: &mut Cursor<'_>,
    ) -> WireResult<Option<Value>> {
        match self {
            Codec::Primitive(kind) => primitive::decode(*kind, cursor),
            Codec::Str => string::decode(cursor),
            Codec::Vec3 => primitive::decode_vec3(cursor),
            Codec::Enum(spec) => enums::decode(spec, cursor),
            Codec::Array(spec) => array::decode(spec, registry, cursor),
            Codec::List => collection::decode(registry, cursor),
            Codec::Map => map::decode(registry, cursor),
            Codec::Record(spec) => record::decode(spec, registry, cursor),
            Codec::Compressed => envelope::decode(registry, cursor),
            Codec::External(spec) => external::decode(spec, cursor),
        }
    }
}

/// Unwrap a value for a shape with no wire-level absence channel.
fn require_present<'v>(value: Option<&'v Value>, shape: &str) -> WireResult<&'v Value> {
    value.ok_or_else(|| WireError::InvalidData {
        reason: format!("{} cannot represent an absent value", shape),
    })
}

/// Encode-time mismatch between a codec and the value handed to it.
fn mismatch(expected: &str, found: &Value) -> WireError {
    WireError::TypeMismatch {
        expected: expected.to_string(),
        found: found.type_key().to_string(),
    }
}

/// Wire lengths and counts are 32-bit signed.
fn length_i32(len: usize) -> WireResult<i32> {
    i32::try_from(len).map_err(|_| WireError::InvalidData {
        reason: format!("length {} exceeds the 32-bit wire limit", len),
    })
}
