// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Collection codec with homogeneous-type elision.
//!
//! When every element is present and shares one concrete type, the type id
//! is written once and the per-element tags are dropped; otherwise every
//! element goes through the tagged-value protocol. An absent element forces
//! the heterogeneous path, since the shared-codec path has no per-element
//! absence channel of its own.

use super::tagged::{read_tagged, write_tagged};
use super::{length_i32, mismatch, require_present};
use crate::registry::Registry;
use crate::ser::{Cursor, CursorMut, WireError, WireResult};
use crate::types::TypeKey;
use crate::value::Value;

pub(super) const FLAG_HETEROGENEOUS: u8 = 0;
pub(super) const FLAG_HOMOGENEOUS: u8 = 1;

/// The single concrete type shared by all items, if any.
///
/// `None` when any item is absent or two items disagree on their type.
pub(super) fn shared_key<'v>(
    items: impl Iterator<Item = Option<&'v Value>>,
) -> Option<TypeKey> {
    let mut shared: Option<TypeKey> = None;
    for item in items {
        let key = item?.type_key();
        match &shared {
            None => shared = Some(key),
            Some(existing) if *existing == key => {}
            _ => return None,
        }
    }
    shared
}

pub fn encode(
    value: Option<&Value>,
    registry: &Registry,
    out: &mut CursorMut<'_>,
) -> WireResult<()> {
    let value = require_present(value, "a collection")?;
    let Value::List(elems) = value else {
        return Err(mismatch("list", value));
    };

    out.write_i32_le(length_i32(elems.len())?)?;
    if elems.is_empty() {
        return Ok(());
    }

    match shared_key(elems.iter().map(Option::as_ref)) {
        Some(key) => {
            let descriptor = registry.resolve_by_key(&key)?;
            out.write_u8(FLAG_HOMOGENEOUS)?;
            out.write_u16_le(descriptor.id)?;
            for elem in elems {
                descriptor.codec.encode(elem.as_ref(), registry, out)?;
            }
        }
        None => {
            out.write_u8(FLAG_HETEROGENEOUS)?;
            for elem in elems {
                write_tagged(registry, elem.as_ref(), out)?;
            }
        }
    }
    Ok(())
}

pub fn decode(registry: &Registry, cursor: &mut Cursor<'_>) -> WireResult<Option<Value>> {
    let count = cursor.read_i32_le()?;
    if count < 0 {
        return Err(WireError::InvalidData {
            reason: format!("negative collection count {}", count),
        });
    }
    if count == 0 {
        return Ok(Some(Value::List(Vec::new())));
    }

    let count = count as usize;
    let mut elems = Vec::with_capacity(count);
    match cursor.read_u8()? {
        FLAG_HOMOGENEOUS => {
            let id = cursor.read_u16_le()?;
            let descriptor = registry.resolve_by_id(id)?;
            for _ in 0..count {
                elems.push(descriptor.codec.decode(registry, cursor)?);
            }
        }
        FLAG_HETEROGENEOUS => {
            for _ in 0..count {
                elems.push(read_tagged(registry, cursor)?);
            }
        }
        other => {
            return Err(WireError::InvalidData {
                reason: format!("invalid collection homogeneity flag {}", other),
            })
        }
    }
    Ok(Some(Value::List(elems)))
}
