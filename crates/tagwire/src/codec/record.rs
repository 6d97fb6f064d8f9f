// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Record codec driven by the registration-time field cache.
//!
//! Fields travel in the cache's name-sorted order, so the wire bytes depend
//! on field values alone. A presence byte precedes the fields: 0 encodes an
//! absent instance, 1 a present one. Sealed fields use their pre-resolved
//! codec; a missing sealed field encodes through the codec's absence channel
//! when it has one and as the field's default value otherwise. Dynamic
//! fields always go through the tagged-value protocol.

use super::tagged::{read_tagged, write_tagged};
use super::mismatch;
use crate::registry::Registry;
use crate::ser::{Cursor, CursorMut, WireError, WireResult};
use crate::types::{DeclaredType, RecordSpec};
use crate::value::{RecordValue, Value};

const PRESENCE_ABSENT: u8 = 0;
const PRESENCE_PRESENT: u8 = 1;

pub fn encode(
    spec: &RecordSpec,
    value: Option<&Value>,
    registry: &Registry,
    out: &mut CursorMut<'_>,
) -> WireResult<()> {
    let Some(value) = value else {
        return out.write_u8(PRESENCE_ABSENT);
    };
    let Value::Record(record) = value else {
        return Err(mismatch(&format!("record:{}", spec.name), value));
    };
    if record.type_name != spec.name {
        return Err(mismatch(&format!("record:{}", spec.name), value));
    }

    out.write_u8(PRESENCE_PRESENT)?;
    for field in &spec.fields {
        let field_value = record
            .fields
            .get(&field.name)
            .or_else(|| spec.defaults.get(&field.name));
        match &field.declared {
            DeclaredType::Static(key) => {
                let descriptor = registry.resolve_by_key(key)?;
                descriptor.codec.encode(field_value, registry, out)?;
            }
            DeclaredType::Dynamic => write_tagged(registry, field_value, out)?,
        }
    }
    Ok(())
}

pub fn decode(
    spec: &RecordSpec,
    registry: &Registry,
    cursor: &mut Cursor<'_>,
) -> WireResult<Option<Value>> {
    match cursor.read_u8()? {
        PRESENCE_ABSENT => Ok(None),
        PRESENCE_PRESENT => {
            // Start from the default instance, then assign each cached field.
            let mut record = RecordValue {
                type_name: spec.name.clone(),
                fields: spec.defaults.clone(),
            };
            for field in &spec.fields {
                let field_value = match &field.declared {
                    DeclaredType::Static(key) => {
                        let descriptor = registry.resolve_by_key(key)?;
                        descriptor.codec.decode(registry, cursor)?
                    }
                    DeclaredType::Dynamic => read_tagged(registry, cursor)?,
                };
                match field_value {
                    Some(v) => {
                        record.fields.insert(field.name.clone(), v);
                    }
                    None => {
                        record.fields.remove(&field.name);
                    }
                }
            }
            Ok(Some(Value::Record(record)))
        }
        other => Err(WireError::InvalidData {
            reason: format!("invalid record presence byte {}", other),
        }),
    }
}
