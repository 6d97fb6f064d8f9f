// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Message boundary consumed by the transport layer.
//!
//! A message root is any registered value; it travels as one tagged value,
//! so the receiving peer can resolve the concrete codec from the leading
//! type id alone.

use crate::codec::{read_tagged, write_tagged};
use crate::registry::Registry;
use crate::ser::{Cursor, CursorMut, WireError, WireResult};
use crate::value::Value;

/// Encode one message root into the cursor.
pub fn encode_message(
    registry: &Registry,
    root: &Value,
    out: &mut CursorMut<'_>,
) -> WireResult<()> {
    write_tagged(registry, Some(root), out)
}

/// Decode one message root from the cursor.
pub fn decode_message(registry: &Registry, cursor: &mut Cursor<'_>) -> WireResult<Value> {
    read_tagged(registry, cursor)?.ok_or(WireError::InvalidData {
        reason: "absent message root".to_string(),
    })
}
