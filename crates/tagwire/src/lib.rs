// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # tagwire - self-describing binary object-graph codec
//!
//! A type registry plus a family of type-specific encoders/decoders that
//! together let arbitrary, possibly heterogeneous and nested data be written
//! to and read from a flat byte cursor, for use under a networking message
//! layer. Transport (sockets, sessions, channels) and message dispatch live
//! elsewhere; this crate only consumes a caller-owned byte cursor and
//! produces/consumes message root values.
//!
//! ## Quick Start
//!
//! ```rust
//! use tagwire::{
//!     decode_message, encode_message, Codec, Cursor, CursorMut, PrimitiveKind, Registry,
//!     RecordSpecBuilder, RecordValue, TypeKey, Value,
//! };
//!
//! fn main() -> tagwire::WireResult<()> {
//!     // Registration order is the wire contract: every peer runs the same
//!     // sequence before any traffic flows.
//!     let mut registry = Registry::with_defaults();
//!     registry.register(
//!         TypeKey::record("Ping"),
//!         Codec::Record(
//!             RecordSpecBuilder::new("Ping")
//!                 .field("seq", TypeKey::Primitive(PrimitiveKind::I32))
//!                 .build(),
//!         ),
//!     )?;
//!     registry.freeze();
//!
//!     let ping = Value::Record(RecordValue::new("Ping").with("seq", 42i32));
//!     let mut buffer = [0u8; 64];
//!     let mut out = CursorMut::new(&mut buffer);
//!     encode_message(&registry, &ping, &mut out)?;
//!     let written = out.offset();
//!
//!     let mut cursor = Cursor::new(&buffer[..written]);
//!     assert_eq!(decode_message(&registry, &mut cursor)?, ping);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +--------------------------------------------------------------+
//! |                      Message boundary                        |
//! |            encode_message  /  decode_message                 |
//! +--------------------------------------------------------------+
//! |                  Tagged-value protocol                       |
//! |   null sentinel | 2-byte type id | payload  (write/read)     |
//! +--------------------------------------------------------------+
//! |                       Codec family                           |
//! |  primitive vec3 string enum array list map record envelope   |
//! |  external                                                    |
//! +--------------------------------------------------------------+
//! |            Type registry          |        Cursors           |
//! |  key <-> id <-> codec, freeze()   |  bounds-checked LE I/O   |
//! +--------------------------------------------------------------+
//! ```
//!
//! ## Concurrency
//!
//! The codec performs no I/O and no blocking. Register every type in a
//! single-threaded startup phase, call [`Registry::freeze`], then encode
//! and decode concurrently from as many threads as needed, one cursor per
//! operation.

pub mod codec;
pub mod message;
pub mod registry;
pub mod ser;
pub mod types;
pub mod value;

pub use codec::{read_tagged, write_tagged, Codec, ExternalFormat, ExternalSpec};
pub use message::{decode_message, encode_message};
pub use registry::{Descriptor, Registry};
pub use ser::{Cursor, CursorMut, WireError, WireResult};
pub use types::{
    ArraySpec, DeclaredType, EnumSpec, FieldSpec, PrimitiveKind, RecordSpec, RecordSpecBuilder,
    TypeKey,
};
pub use value::{ArrayNode, ArrayValue, RecordValue, Value, Vec3};
