// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Map codec: the collection homogeneity optimization applied independently
//! to the key side and the value side.
//!
//! One flag byte carries both decisions (bit 0 = keys homogeneous, bit 1 =
//! values homogeneous); a homogeneous side writes its type id once, right
//! after the flag byte, keys before values. Entry order has no semantic
//! meaning beyond "decode n entries, insert each".

use super::collection::shared_key;
use super::tagged::{read_tagged, write_tagged};
use super::{length_i32, mismatch, require_present};
use crate::registry::Registry;
use crate::ser::{Cursor, CursorMut, WireError, WireResult};
use crate::value::Value;

const FLAG_KEYS_HOMOGENEOUS: u8 = 0b01;
const FLAG_VALUES_HOMOGENEOUS: u8 = 0b10;

pub fn encode(
    value: Option<&Value>,
    registry: &Registry,
    out: &mut CursorMut<'_>,
) -> WireResult<()> {
    let value = require_present(value, "a map")?;
    let Value::Map(entries) = value else {
        return Err(mismatch("map", value));
    };

    out.write_i32_le(length_i32(entries.len())?)?;
    if entries.is_empty() {
        return Ok(());
    }

    let key_type = shared_key(entries.iter().map(|(k, _)| k.as_ref()));
    let value_type = shared_key(entries.iter().map(|(_, v)| v.as_ref()));

    let key_descriptor = match &key_type {
        Some(key) => Some(registry.resolve_by_key(key)?),
        None => None,
    };
    let value_descriptor = match &value_type {
        Some(key) => Some(registry.resolve_by_key(key)?),
        None => None,
    };

    let mut flags = 0u8;
    if key_descriptor.is_some() {
        flags |= FLAG_KEYS_HOMOGENEOUS;
    }
    if value_descriptor.is_some() {
        flags |= FLAG_VALUES_HOMOGENEOUS;
    }
    out.write_u8(flags)?;
    if let Some(descriptor) = key_descriptor {
        out.write_u16_le(descriptor.id)?;
    }
    if let Some(descriptor) = value_descriptor {
        out.write_u16_le(descriptor.id)?;
    }

    for (k, v) in entries {
        match key_descriptor {
            Some(descriptor) => descriptor.codec.encode(k.as_ref(), registry, out)?,
            None => write_tagged(registry, k.as_ref(), out)?,
        }
        match value_descriptor {
            Some(descriptor) => descriptor.codec.encode(v.as_ref(), registry, out)?,
            None => write_tagged(registry, v.as_ref(), out)?,
        }
    }
    Ok(())
}

pub fn decode(registry: &Registry, cursor: &mut Cursor<'_>) -> WireResult<Option<Value>> {
    let count = cursor.read_i32_le()?;
    if count < 0 {
        return Err(WireError::InvalidData {
            reason: format!("negative map entry count {}", count),
        });
    }
    if count == 0 {
        return Ok(Some(Value::Map(Vec::new())));
    }

    let flags = cursor.read_u8()?;
    if flags & !(FLAG_KEYS_HOMOGENEOUS | FLAG_VALUES_HOMOGENEOUS) != 0 {
        return Err(WireError::InvalidData {
            reason: format!("invalid map homogeneity flags {:#04x}", flags),
        });
    }

    let key_descriptor = if flags & FLAG_KEYS_HOMOGENEOUS != 0 {
        let id = cursor.read_u16_le()?;
        Some(registry.resolve_by_id(id)?)
    } else {
        None
    };
    let value_descriptor = if flags & FLAG_VALUES_HOMOGENEOUS != 0 {
        let id = cursor.read_u16_le()?;
        Some(registry.resolve_by_id(id)?)
    } else {
        None
    };

    let count = count as usize;
    let mut entries = Vec::with_capacity(count);
    for _ in 0..count {
        let k = match key_descriptor {
            Some(descriptor) => descriptor.codec.decode(registry, cursor)?,
            None => read_tagged(registry, cursor)?,
        };
        let v = match value_descriptor {
            Some(descriptor) => descriptor.codec.decode(registry, cursor)?,
            None => read_tagged(registry, cursor)?,
        };
        entries.push((k, v));
    }
    Ok(Some(Value::Map(entries)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(registry: &Registry, value: &Value) -> (Vec<u8>, Value) {
        let mut buffer = vec![0u8; 512];
        let mut out = CursorMut::new(&mut buffer);
        encode(Some(value), registry, &mut out).expect("encode");
        let written = out.offset();
        buffer.truncate(written);

        let mut cursor = Cursor::new(&buffer);
        let decoded = decode(registry, &mut cursor).expect("decode").expect("present");
        assert!(cursor.is_eof());
        (buffer, decoded)
    }

    #[test]
    fn test_empty_map_is_exactly_four_zero_bytes() {
        let registry = Registry::with_defaults();
        let (bytes, decoded) = roundtrip(&registry, &Value::Map(Vec::new()));
        assert_eq!(bytes, vec![0, 0, 0, 0]);
        assert_eq!(decoded, Value::Map(Vec::new()));
    }

    #[test]
    fn test_fully_homogeneous_map_writes_both_ids_once() {
        let registry = Registry::with_defaults();
        let map = Value::map(vec![
            (Value::Str("a".to_string()), Value::I32(1)),
            (Value::Str("b".to_string()), Value::I32(2)),
        ]);
        let (bytes, decoded) = roundtrip(&registry, &map);
        assert_eq!(bytes[4], FLAG_KEYS_HOMOGENEOUS | FLAG_VALUES_HOMOGENEOUS);
        assert_eq!(decoded, map);
    }

    #[test]
    fn test_homogeneous_keys_heterogeneous_values() {
        let registry = Registry::with_defaults();
        let map = Value::map(vec![
            (Value::Str("a".to_string()), Value::I32(1)),
            (Value::Str("b".to_string()), Value::Str("two".to_string())),
        ]);
        let (bytes, decoded) = roundtrip(&registry, &map);
        assert_eq!(bytes[4], FLAG_KEYS_HOMOGENEOUS);
        assert_eq!(decoded, map);
    }

    #[test]
    fn test_absent_value_forces_heterogeneous_values() {
        let registry = Registry::with_defaults();
        let map = Value::Map(vec![
            (Some(Value::I32(1)), Some(Value::Bool(true))),
            (Some(Value::I32(2)), None),
        ]);
        let (bytes, decoded) = roundtrip(&registry, &map);
        assert_eq!(bytes[4], FLAG_KEYS_HOMOGENEOUS);
        assert_eq!(decoded, map);
    }

    #[test]
    fn test_invalid_flag_bits_rejected() {
        let registry = Registry::with_defaults();
        let mut buffer = Vec::new();
        buffer.extend_from_slice(&1i32.to_le_bytes());
        buffer.push(0b100);
        let mut cursor = Cursor::new(&buffer);
        let err = decode(&registry, &mut cursor).unwrap_err();
        assert!(matches!(err, WireError::InvalidData { .. }));
    }
}
