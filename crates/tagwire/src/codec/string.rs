// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! String codec with variable-width length prefix.
//!
//! A leading discriminator byte records the chosen width: 0 = absent string
//! (no length, no payload), 1/2/3 = 1-byte/2-byte/4-byte length. Encoding
//! always picks the narrowest width that fits the UTF-8 byte length.

use super::mismatch;
use crate::ser::{Cursor, CursorMut, WireError, WireResult};
use crate::value::Value;

const DISC_ABSENT: u8 = 0;
const DISC_LEN1: u8 = 1;
const DISC_LEN2: u8 = 2;
const DISC_LEN4: u8 = 3;

const MAX_LEN1: usize = 127;
const MAX_LEN2: usize = 32_767;

pub fn encode(value: Option<&Value>, out: &mut CursorMut<'_>) -> WireResult<()> {
    let Some(value) = value else {
        return out.write_u8(DISC_ABSENT);
    };
    let Value::Str(s) = value else {
        return Err(mismatch("string", value));
    };

    let bytes = s.as_bytes();
    if bytes.len() <= MAX_LEN1 {
        out.write_u8(DISC_LEN1)?;
        out.write_u8(bytes.len() as u8)?;
    } else if bytes.len() <= MAX_LEN2 {
        out.write_u8(DISC_LEN2)?;
        out.write_u16_le(bytes.len() as u16)?;
    } else {
        out.write_u8(DISC_LEN4)?;
        out.write_u32_le(u32::try_from(bytes.len()).map_err(|_| WireError::InvalidData {
            reason: format!("string length {} exceeds the 32-bit wire limit", bytes.len()),
        })?)?;
    }
    out.write_bytes(bytes)
}

pub fn decode(cursor: &mut Cursor<'_>) -> WireResult<Option<Value>> {
    let discriminator = cursor.read_u8()?;
    let len = match discriminator {
        DISC_ABSENT => return Ok(None),
        DISC_LEN1 => cursor.read_u8()? as usize,
        DISC_LEN2 => cursor.read_u16_le()? as usize,
        DISC_LEN4 => cursor.read_u32_le()? as usize,
        other => {
            return Err(WireError::MalformedLength {
                discriminator: other,
            })
        }
    };

    let bytes = cursor.read_bytes(len)?;
    let s = std::str::from_utf8(bytes).map_err(|e| WireError::InvalidData {
        reason: format!("string payload is not valid UTF-8: {}", e),
    })?;
    Ok(Some(Value::Str(s.to_string())))
}
