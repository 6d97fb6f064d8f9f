// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Read/write cursors for wire buffer manipulation.
//!

use super::{WireError, WireResult};

/// Generate write methods for primitive types (eliminates code duplication)
///
/// Each generated method:
/// 1. Checks buffer bounds (returns `WireError::BufferOverflow` if exceeded)
/// 2. Converts value to little-endian bytes via `to_le_bytes()`
/// 3. Copies bytes to buffer
/// 4. Advances offset
macro_rules! impl_write_le {
    ($name:ident, $type:ty, $size:expr) => {
        pub fn $name(&mut self, value: $type) -> WireResult<()> {
            if self.offset + $size > self.buffer.len() {
                return Err(WireError::BufferOverflow {
                    offset: self.offset,
                });
            }
            let bytes = value.to_le_bytes();
            self.buffer[self.offset..self.offset + $size].copy_from_slice(&bytes);
            self.offset += $size;
            Ok(())
        }
    };
}

/// Generate read methods for primitive types (eliminates code duplication)
///
/// Each generated method:
/// 1. Checks buffer bounds (returns `WireError::UnexpectedEnd` if exceeded)
/// 2. Reads N bytes from buffer
/// 3. Converts bytes to value via `from_le_bytes()`
/// 4. Advances offset
macro_rules! impl_read_le {
    ($name:ident, $type:ty, $size:expr) => {
        pub fn $name(&mut self) -> WireResult<$type> {
            if self.offset + $size > self.buffer.len() {
                return Err(WireError::UnexpectedEnd {
                    offset: self.offset,
                });
            }
            let mut bytes = [0u8; $size];
            bytes.copy_from_slice(&self.buffer[self.offset..self.offset + $size]);
            self.offset += $size;
            Ok(<$type>::from_le_bytes(bytes))
        }
    };
}

/// Generate common cursor methods (offset, remaining, seek)
///
/// Eliminates duplication between CursorMut and Cursor by generating identical
/// methods with cursor-specific error variants.
macro_rules! impl_cursor_common {
    ($error_variant:ident) => {
        pub fn offset(&self) -> usize {
            self.offset
        }

        pub fn remaining(&self) -> usize {
            self.buffer.len().saturating_sub(self.offset)
        }

        /// Reposition the cursor. The position must stay within the buffer.
        pub fn seek(&mut self, offset: usize) -> WireResult<()> {
            if offset > self.buffer.len() {
                return Err(WireError::$error_variant { offset });
            }
            self.offset = offset;
            Ok(())
        }
    };
}

/// Mutable cursor for writing (bounds-checked, zero-copy)
pub struct CursorMut<'a> {
    buffer: &'a mut [u8],
    offset: usize,
}

impl<'a> CursorMut<'a> {
    pub fn new(buffer: &'a mut [u8]) -> Self {
        Self { buffer, offset: 0 }
    }

    // Generate write methods via macro (DRY principle)
    impl_write_le!(write_u8, u8, 1);
    impl_write_le!(write_u16_le, u16, 2);
    impl_write_le!(write_u32_le, u32, 4);
    impl_write_le!(write_u64_le, u64, 8);
    impl_write_le!(write_i8, i8, 1);
    impl_write_le!(write_i16_le, i16, 2);
    impl_write_le!(write_i32_le, i32, 4);
    impl_write_le!(write_i64_le, i64, 8);

    pub fn write_f32_le(&mut self, value: f32) -> WireResult<()> {
        self.write_u32_le(value.to_bits())
    }

    pub fn write_f64_le(&mut self, value: f64) -> WireResult<()> {
        self.write_u64_le(value.to_bits())
    }

    pub fn write_bytes(&mut self, data: &[u8]) -> WireResult<()> {
        if self.offset + data.len() > self.buffer.len() {
            return Err(WireError::BufferOverflow {
                offset: self.offset,
            });
        }
        self.buffer[self.offset..self.offset + data.len()].copy_from_slice(data);
        self.offset += data.len();
        Ok(())
    }

    // Generate common cursor methods (offset, remaining, seek) via macro
    impl_cursor_common!(BufferOverflow);

    /// The bytes written so far.
    pub fn written(&self) -> &[u8] {
        &self.buffer[..self.offset]
    }
}

/// Byte-sink view over the remaining-write region.
///
/// Partial writes stop at the end of the buffer; `write_all` on a full cursor
/// surfaces as `WriteZero`.
impl std::io::Write for CursorMut<'_> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let n = buf.len().min(self.remaining());
        self.buffer[self.offset..self.offset + n].copy_from_slice(&buf[..n]);
        self.offset += n;
        Ok(n)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Immutable cursor for reading (bounds-checked, zero-copy)
pub struct Cursor<'a> {
    buffer: &'a [u8],
    offset: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self { buffer, offset: 0 }
    }

    // Generate read methods via macro (DRY principle)
    impl_read_le!(read_u8, u8, 1);
    impl_read_le!(read_u16_le, u16, 2);
    impl_read_le!(read_u32_le, u32, 4);
    impl_read_le!(read_u64_le, u64, 8);
    impl_read_le!(read_i8, i8, 1);
    impl_read_le!(read_i16_le, i16, 2);
    impl_read_le!(read_i32_le, i32, 4);
    impl_read_le!(read_i64_le, i64, 8);

    pub fn read_f32_le(&mut self) -> WireResult<f32> {
        Ok(f32::from_bits(self.read_u32_le()?))
    }

    pub fn read_f64_le(&mut self) -> WireResult<f64> {
        Ok(f64::from_bits(self.read_u64_le()?))
    }

    pub fn read_bytes(&mut self, len: usize) -> WireResult<&'a [u8]> {
        if self.offset + len > self.buffer.len() {
            return Err(WireError::UnexpectedEnd {
                offset: self.offset,
            });
        }
        let slice = &self.buffer[self.offset..self.offset + len];
        self.offset += len;
        Ok(slice)
    }

    // Generate common cursor methods (offset, remaining, seek) via macro
    impl_cursor_common!(UnexpectedEnd);

    pub fn is_eof(&self) -> bool {
        self.offset >= self.buffer.len()
    }
}

/// Byte-source view over the remaining-read region.
impl std::io::Read for Cursor<'_> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = buf.len().min(self.remaining());
        buf[..n].copy_from_slice(&self.buffer[self.offset..self.offset + n]);
        self.offset += n;
        Ok(n)
    }
}
