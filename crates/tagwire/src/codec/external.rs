// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Delegated codec for externally-formatted payloads.
//!
//! Some types have a canonical binary form owned by an unrelated
//! export/import subsystem. This codec adapts the cursor for that subsystem
//! and contributes no framing of its own: the handler gets a byte-sink view
//! over the remaining-write region on encode and a byte-source view over
//! the remaining-read region on decode, and is responsible for its own
//! framing within them.

use super::mismatch;
use crate::ser::{Cursor, CursorMut, WireResult};
use crate::value::Value;
use std::fmt;
use std::io::{Read, Write};
use std::sync::Arc;

/// The two calls an external export/import subsystem must offer.
pub trait ExternalFormat: Send + Sync {
    /// Write the value's canonical form into the sink.
    fn write(&self, value: &Value, sink: &mut dyn Write) -> WireResult<()>;

    /// Read one value's canonical form from the source.
    fn read(&self, source: &mut dyn Read) -> WireResult<Value>;
}

/// Registered adapter: external type name plus its format handler.
#[derive(Clone)]
pub struct ExternalSpec {
    pub name: String,
    handler: Arc<dyn ExternalFormat>,
}

impl ExternalSpec {
    pub fn new(name: impl Into<String>, handler: Arc<dyn ExternalFormat>) -> Self {
        Self {
            name: name.into(),
            handler,
        }
    }
}

impl fmt::Debug for ExternalSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExternalSpec")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

pub fn encode(spec: &ExternalSpec, value: Option<&Value>, out: &mut CursorMut<'_>) -> WireResult<()> {
    let value = super::require_present(value, "an external payload")?;
    let Value::External { format, inner } = value else {
        return Err(mismatch(&format!("external:{}", spec.name), value));
    };
    if format != &spec.name {
        return Err(mismatch(&format!("external:{}", spec.name), value));
    }
    spec.handler.write(inner, out)
}

pub fn decode(spec: &ExternalSpec, cursor: &mut Cursor<'_>) -> WireResult<Option<Value>> {
    let inner = spec.handler.read(cursor)?;
    Ok(Some(Value::External {
        format: spec.name.clone(),
        inner: Box::new(inner),
    }))
}
