// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fixed-size value codecs: primitives and the 3-component vector.
//!
//! No length prefix, no tag, no absence channel: exactly the type's natural
//! width on the wire. The vector is the template for any further fixed-width
//! value type.

use super::{mismatch, require_present};
use crate::ser::{Cursor, CursorMut, WireResult};
use crate::types::PrimitiveKind;
use crate::value::{Value, Vec3};

pub fn encode(kind: PrimitiveKind, value: Option<&Value>, out: &mut CursorMut<'_>) -> WireResult<()> {
    let value = require_present(value, "a primitive")?;
    match (kind, value) {
        (PrimitiveKind::Bool, Value::Bool(v)) => out.write_u8(u8::from(*v)),
        (PrimitiveKind::I8, Value::I8(v)) => out.write_i8(*v),
        (PrimitiveKind::I16, Value::I16(v)) => out.write_i16_le(*v),
        (PrimitiveKind::I32, Value::I32(v)) => out.write_i32_le(*v),
        (PrimitiveKind::I64, Value::I64(v)) => out.write_i64_le(*v),
        (PrimitiveKind::F32, Value::F32(v)) => out.write_f32_le(*v),
        (PrimitiveKind::F64, Value::F64(v)) => out.write_f64_le(*v),
        (kind, other) => Err(mismatch(&format!("{:?}", kind), other)),
    }
}

pub fn decode(kind: PrimitiveKind, cursor: &mut Cursor<'_>) -> WireResult<Option<Value>> {
    let value = match kind {
        PrimitiveKind::Bool => Value::Bool(cursor.read_u8()? != 0),
        PrimitiveKind::I8 => Value::I8(cursor.read_i8()?),
        PrimitiveKind::I16 => Value::I16(cursor.read_i16_le()?),
        PrimitiveKind::I32 => Value::I32(cursor.read_i32_le()?),
        PrimitiveKind::I64 => Value::I64(cursor.read_i64_le()?),
        PrimitiveKind::F32 => Value::F32(cursor.read_f32_le()?),
        PrimitiveKind::F64 => Value::F64(cursor.read_f64_le()?),
    };
    Ok(Some(value))
}

/// Three 32-bit floats in x, y, z order; exactly 12 bytes.
pub fn encode_vec3(value: Option<&Value>, out: &mut CursorMut<'_>) -> WireResult<()> {
    let value = require_present(value, "a vec3")?;
    let Value::Vec3(v) = value else {
        return Err(mismatch("vec3", value));
    };
    out.write_f32_le(v.x)?;
    out.write_f32_le(v.y)?;
    out.write_f32_le(v.z)
}

pub fn decode_vec3(cursor: &mut Cursor<'_>) -> WireResult<Option<Value>> {
    let x = cursor.read_f32_le()?;
    let y = cursor.read_f32_le()?;
    let z = cursor.read_f32_le()?;
    Ok(Some(Value::Vec3(Vec3::new(x, y, z))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ser::WireError;

    fn roundtrip(kind: PrimitiveKind, value: Value) -> Value {
        let mut buffer = [0u8; 16];
        let mut out = CursorMut::new(&mut buffer);
        encode(kind, Some(&value), &mut out).expect("encode");
        let written = out.offset();
        assert_eq!(written, kind.size());

        let mut cursor = Cursor::new(&buffer[..written]);
        decode(kind, &mut cursor).expect("decode").expect("present")
    }

    #[test]
    fn test_primitive_roundtrips() {
        assert_eq!(roundtrip(PrimitiveKind::Bool, Value::Bool(true)), Value::Bool(true));
        assert_eq!(roundtrip(PrimitiveKind::I8, Value::I8(-3)), Value::I8(-3));
        assert_eq!(roundtrip(PrimitiveKind::I16, Value::I16(-300)), Value::I16(-300));
        assert_eq!(roundtrip(PrimitiveKind::I32, Value::I32(70_000)), Value::I32(70_000));
        assert_eq!(roundtrip(PrimitiveKind::I64, Value::I64(-1 << 40)), Value::I64(-1 << 40));
        assert_eq!(roundtrip(PrimitiveKind::F32, Value::F32(1.5)), Value::F32(1.5));
        assert_eq!(roundtrip(PrimitiveKind::F64, Value::F64(-6.25)), Value::F64(-6.25));
    }

    #[test]
    fn test_vec3_is_twelve_bytes() {
        let mut buffer = [0u8; 16];
        let mut out = CursorMut::new(&mut buffer);
        let v = Value::Vec3(Vec3::new(1.0, -2.0, 3.5));
        encode_vec3(Some(&v), &mut out).expect("encode");
        assert_eq!(out.offset(), 12);

        let mut cursor = Cursor::new(&buffer[..12]);
        assert_eq!(decode_vec3(&mut cursor).expect("decode"), Some(v));
    }

    #[test]
    fn test_wrong_value_kind_is_mismatch() {
        let mut buffer = [0u8; 16];
        let mut out = CursorMut::new(&mut buffer);
        let err = encode(PrimitiveKind::I32, Some(&Value::Bool(true)), &mut out).unwrap_err();
        assert!(matches!(err, WireError::TypeMismatch { .. }));
    }

    #[test]
    fn test_absent_primitive_rejected() {
        let mut buffer = [0u8; 16];
        let mut out = CursorMut::new(&mut buffer);
        let err = encode(PrimitiveKind::I32, None, &mut out).unwrap_err();
        assert!(matches!(err, WireError::InvalidData { .. }));
    }
}
