// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Enumeration codec: zero-based ordinal as a 32-bit integer.
//!
//! Ordinal -1 is the absence sentinel. An out-of-range ordinal on decode is
//! mapped to absent rather than surfaced as corruption; the condition is
//! logged so a registry mismatch between peers does not go fully silent.

use super::mismatch;
use crate::ser::{Cursor, CursorMut, WireError, WireResult};
use crate::types::EnumSpec;
use crate::value::Value;

const ORDINAL_ABSENT: i32 = -1;

pub fn encode(spec: &EnumSpec, value: Option<&Value>, out: &mut CursorMut<'_>) -> WireResult<()> {
    let Some(value) = value else {
        return out.write_i32_le(ORDINAL_ABSENT);
    };
    let Value::Enum { name, ordinal } = value else {
        return Err(mismatch(&format!("enum:{}", spec.name), value));
    };
    if name != &spec.name {
        return Err(mismatch(&format!("enum:{}", spec.name), value));
    }
    if *ordinal < 0 || *ordinal as usize >= spec.variants.len() {
        return Err(WireError::InvalidData {
            reason: format!(
                "ordinal {} out of range for enum {} with {} variants",
                ordinal,
                spec.name,
                spec.variants.len()
            ),
        });
    }
    out.write_i32_le(*ordinal)
}

pub fn decode(spec: &EnumSpec, cursor: &mut Cursor<'_>) -> WireResult<Option<Value>> {
    let ordinal = cursor.read_i32_le()?;
    if ordinal == ORDINAL_ABSENT {
        return Ok(None);
    }
    if ordinal < 0 || ordinal as usize >= spec.variants.len() {
        log::warn!(
            "enum {} ordinal {} out of range ({} variants), treating as absent",
            spec.name,
            ordinal,
            spec.variants.len()
        );
        return Ok(None);
    }
    Ok(Some(Value::Enum {
        name: spec.name.clone(),
        ordinal,
    }))
}
