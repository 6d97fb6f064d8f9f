// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Compressing envelope codec.
//!
//! The inner message is written through the tagged-value protocol into a
//! scratch buffer, then DEFLATE-compressed into the remaining-write region
//! of the outer cursor. The scheme is fixed; there is no algorithm
//! negotiation. Because the compressed stream runs to the end of the frame,
//! an envelope must be the last (root) value of its cursor.

use super::tagged::{read_tagged, write_tagged};
use super::{mismatch, require_present};
use crate::registry::Registry;
use crate::ser::{Cursor, CursorMut, WireError, WireResult};
use crate::value::Value;
use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use flate2::Compression;
use std::io::{Read, Write};

const SCRATCH_INITIAL: usize = 8 * 1024;
const SCRATCH_MAX: usize = 16 * 1024 * 1024;

pub fn encode(
    value: Option<&Value>,
    registry: &Registry,
    out: &mut CursorMut<'_>,
) -> WireResult<()> {
    let value = require_present(value, "a compressed envelope")?;
    let Value::Compressed(inner) = value else {
        return Err(mismatch("compressed", value));
    };

    // Encode the inner message into scratch, growing until it fits.
    let mut scratch = vec![0u8; SCRATCH_INITIAL];
    let inner_len = loop {
        let capacity = scratch.len();
        let mut inner_out = CursorMut::new(&mut scratch);
        match write_tagged(registry, Some(&**inner), &mut inner_out) {
            Ok(()) => break inner_out.offset(),
            Err(WireError::BufferOverflow { .. }) if capacity < SCRATCH_MAX => {
                scratch = vec![0u8; capacity * 2];
            }
            Err(e) => return Err(e),
        }
    };

    let mut encoder = DeflateEncoder::new(&mut *out, Compression::default());
    let written = encoder.write_all(&scratch[..inner_len]);
    let finished = written.and_then(|()| encoder.finish().map(|_| ()));
    if finished.is_err() {
        return Err(WireError::BufferOverflow {
            offset: out.offset(),
        });
    }
    Ok(())
}

pub fn decode(registry: &Registry, cursor: &mut Cursor<'_>) -> WireResult<Option<Value>> {
    let mut scratch = Vec::new();
    {
        let mut decoder = DeflateDecoder::new(&mut *cursor);
        decoder
            .read_to_end(&mut scratch)
            .map_err(|e| WireError::DecompressionError {
                reason: e.to_string(),
            })?;
    }

    let mut inner_cursor = Cursor::new(&scratch);
    let inner = read_tagged(registry, &mut inner_cursor)?.ok_or(WireError::InvalidData {
        reason: "compressed envelope holds no message".to_string(),
    })?;
    Ok(Some(Value::Compressed(Box::new(inner))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_roundtrip() {
        let registry = Registry::with_defaults();
        let inner = Value::list(vec![
            Value::Str("compressible compressible compressible".to_string()),
            Value::Str("compressible compressible compressible".to_string()),
        ]);
        let envelope = Value::Compressed(Box::new(inner));

        let mut buffer = vec![0u8; 1024];
        let mut out = CursorMut::new(&mut buffer);
        encode(Some(&envelope), &registry, &mut out).expect("encode");
        let written = out.offset();

        let mut cursor = Cursor::new(&buffer[..written]);
        let decoded = decode(&registry, &mut cursor).expect("decode");
        assert_eq!(decoded, Some(envelope));
    }

    #[test]
    fn test_corrupt_stream_is_decompression_error() {
        let registry = Registry::with_defaults();
        let garbage = [0xFFu8; 16];
        let mut cursor = Cursor::new(&garbage);
        let err = decode(&registry, &mut cursor).unwrap_err();
        assert!(matches!(err, WireError::DecompressionError { .. }));
    }

    #[test]
    fn test_envelope_rejects_non_envelope_value() {
        let registry = Registry::with_defaults();
        let mut buffer = [0u8; 64];
        let mut out = CursorMut::new(&mut buffer);
        let err = encode(Some(&Value::I32(1)), &registry, &mut out).unwrap_err();
        assert!(matches!(err, WireError::TypeMismatch { .. }));
    }

    #[test]
    fn test_undersized_outer_cursor_is_buffer_overflow() {
        let registry = Registry::with_defaults();
        let inner = Value::Str("x".repeat(4096));
        let envelope = Value::Compressed(Box::new(inner));
        let mut buffer = [0u8; 8];
        let mut out = CursorMut::new(&mut buffer);
        let err = encode(Some(&envelope), &registry, &mut out).unwrap_err();
        assert!(matches!(err, WireError::BufferOverflow { .. }));
    }
}
