// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Tagged-value protocol: type-id prefix for polymorphically-typed values.
//!
//! Every point where the concrete type of a value is not pinned statically
//! (collection elements, map entries, dynamic record fields, the message
//! root) goes through this pair. The wire form is one marker byte (0 =
//! absent, 1 = present) followed, when present, by the value's registry id
//! as a fixed 2-byte little-endian integer and then the value's payload.
//! The id width is a build-wide constant, never value-dependent.

use crate::registry::Registry;
use crate::ser::{Cursor, CursorMut, WireError, WireResult};
use crate::value::Value;

/// Marker byte for an absent value (the null sentinel).
pub const MARKER_ABSENT: u8 = 0;
/// Marker byte for a present, tagged value.
pub const MARKER_PRESENT: u8 = 1;

/// Write a value prefixed with its registry id, or the null sentinel.
pub fn write_tagged(
    registry: &Registry,
    value: Option<&Value>,
    out: &mut CursorMut<'_>,
) -> WireResult<()> {
    let Some(value) = value else {
        return out.write_u8(MARKER_ABSENT);
    };

    let descriptor = registry.resolve_by_key(&value.type_key())?;
    log::trace!("writing type {} with id {}", descriptor.key, descriptor.id);

    out.write_u8(MARKER_PRESENT)?;
    out.write_u16_le(descriptor.id)?;
    descriptor.codec.encode(Some(value), registry, out)
}

/// Read a tagged value, resolving its codec through the registry.
pub fn read_tagged(registry: &Registry, cursor: &mut Cursor<'_>) -> WireResult<Option<Value>> {
    match cursor.read_u8()? {
        MARKER_ABSENT => Ok(None),
        MARKER_PRESENT => {
            let id = cursor.read_u16_le()?;
            let descriptor = registry.resolve_by_id(id)?;
            descriptor.codec.decode(registry, cursor)
        }
        other => Err(WireError::InvalidData {
            reason: format!("invalid tagged-value marker {}", other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TypeKey;

    #[test]
    fn test_absent_value_is_one_sentinel_byte() {
        let registry = Registry::with_defaults();
        let mut buffer = [0xFFu8; 4];
        let mut out = CursorMut::new(&mut buffer);
        write_tagged(&registry, None, &mut out).expect("write absent");
        assert_eq!(out.offset(), 1);
        assert_eq!(buffer[0], MARKER_ABSENT);
    }

    #[test]
    fn test_tagged_roundtrip_carries_concrete_type() {
        let registry = Registry::with_defaults();
        let mut buffer = [0u8; 16];
        let mut out = CursorMut::new(&mut buffer);
        write_tagged(&registry, Some(&Value::I32(-5)), &mut out).expect("write");
        let written = out.offset();

        let mut cursor = Cursor::new(&buffer[..written]);
        let value = read_tagged(&registry, &mut cursor).expect("read");
        assert_eq!(value, Some(Value::I32(-5)));
        assert!(cursor.is_eof());
    }

    #[test]
    fn test_unregistered_type_fails_encode() {
        let registry = Registry::new();
        let mut buffer = [0u8; 16];
        let mut out = CursorMut::new(&mut buffer);
        let err = write_tagged(&registry, Some(&Value::Bool(true)), &mut out).unwrap_err();
        assert!(matches!(err, WireError::UnregisteredType { .. }));
    }

    #[test]
    fn test_unknown_id_fails_decode() {
        let registry = Registry::with_defaults();
        let mut buffer = [0u8; 4];
        {
            let mut out = CursorMut::new(&mut buffer);
            out.write_u8(MARKER_PRESENT).expect("marker");
            out.write_u16_le(999).expect("id");
        }
        let mut cursor = Cursor::new(&buffer);
        let err = read_tagged(&registry, &mut cursor).unwrap_err();
        assert_eq!(err, WireError::UnknownTypeId { id: 999 });
    }

    #[test]
    fn test_truncated_tag_fails_with_unexpected_end() {
        let registry = Registry::with_defaults();
        let buffer = [MARKER_PRESENT];
        let mut cursor = Cursor::new(&buffer);
        let err = read_tagged(&registry, &mut cursor).unwrap_err();
        assert!(matches!(err, WireError::UnexpectedEnd { .. }));
    }

    #[test]
    fn test_registered_key_resolves_both_ways() {
        let registry = Registry::with_defaults();
        let by_key = registry.resolve_by_key(&TypeKey::Str).expect("by key");
        let by_id = registry.resolve_by_id(by_key.id).expect("by id");
        assert_eq!(by_id.key, TypeKey::Str);
    }
}
