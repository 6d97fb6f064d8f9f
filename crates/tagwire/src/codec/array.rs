// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Multi-dimensional array codec.
//!
//! Frame: dimension count (u8), then one 32-bit maximum extent per
//! dimension. A zero top-level extent is the null-array sentinel and
//! short-circuits the rest of the frame. The outermost dimension's length is
//! the top-level extent and is not re-written; every deeper sub-array writes
//! its own 32-bit length immediately before its elements, with -1 marking an
//! absent nested array. Arrays may be ragged: deeper extents record the
//! maximum observed, actual lengths are written per sub-array.
//!
//! Leaf elements are written with the single shared codec resolved from the
//! static element type, or per element through the tagged-value protocol
//! when the element type is dynamic. The strategy comes from the registered
//! [`ArraySpec`], never from wire data, so both peers must agree on it
//! through registration order alone.

use super::tagged::{read_tagged, write_tagged};
use super::{length_i32, mismatch};
use crate::registry::{Descriptor, Registry};
use crate::ser::{Cursor, CursorMut, WireError, WireResult};
use crate::types::{ArraySpec, DeclaredType};
use crate::value::{ArrayNode, ArrayValue, Value};

const LEN_ABSENT: i32 = -1;

fn shared_descriptor<'r>(
    spec: &ArraySpec,
    registry: &'r Registry,
) -> WireResult<Option<&'r Descriptor>> {
    match &spec.elem {
        DeclaredType::Static(key) => registry.resolve_by_key(key).map(Some),
        DeclaredType::Dynamic => Ok(None),
    }
}

pub fn encode(
    spec: &ArraySpec,
    value: Option<&Value>,
    registry: &Registry,
    out: &mut CursorMut<'_>,
) -> WireResult<()> {
    let shared = shared_descriptor(spec, registry)?;

    let Some(value) = value else {
        // Absent array: dimension count plus the zero-extent sentinel.
        out.write_u8(spec.dims)?;
        return out.write_i32_le(0);
    };
    let Value::Array(array) = value else {
        return Err(mismatch(&spec.key().to_string(), value));
    };
    if array.dims != spec.dims || array.elem != spec.elem {
        return Err(mismatch(&spec.key().to_string(), value));
    }

    let dims = spec.dims as usize;
    let mut extents = vec![0i32; dims];
    measure(&array.root, 0, dims, &mut extents)?;

    out.write_u8(spec.dims)?;
    out.write_i32_le(extents[0])?;
    if extents[0] == 0 {
        return Ok(());
    }
    for extent in &extents[1..] {
        out.write_i32_le(*extent)?;
    }
    write_node(&array.root, 0, dims, shared, registry, out)
}

/// Record the maximum extent observed at each depth, validating that the
/// nesting depth matches the declared dimension count.
fn measure(node: &ArrayNode, depth: usize, dims: usize, extents: &mut [i32]) -> WireResult<()> {
    let leaf_depth = dims - 1;
    match node {
        ArrayNode::Branch(children) => {
            if depth >= leaf_depth {
                return Err(WireError::InvalidData {
                    reason: format!(
                        "array nesting deeper than its {} declared dimensions",
                        dims
                    ),
                });
            }
            extents[depth] = extents[depth].max(length_i32(children.len())?);
            for child in children.iter().flatten() {
                measure(child, depth + 1, dims, extents)?;
            }
        }
        ArrayNode::Leaf(elems) => {
            if depth != leaf_depth {
                return Err(WireError::InvalidData {
                    reason: format!(
                        "array leaves at depth {} of {} declared dimensions",
                        depth + 1,
                        dims
                    ),
                });
            }
            extents[depth] = extents[depth].max(length_i32(elems.len())?);
        }
    }
    Ok(())
}

fn write_node(
    node: &ArrayNode,
    depth: usize,
    dims: usize,
    shared: Option<&Descriptor>,
    registry: &Registry,
    out: &mut CursorMut<'_>,
) -> WireResult<()> {
    match node {
        ArrayNode::Branch(children) => {
            for child in children {
                match child {
                    None => out.write_i32_le(LEN_ABSENT)?,
                    Some(sub) => {
                        out.write_i32_le(length_i32(sub.len())?)?;
                        write_node(sub, depth + 1, dims, shared, registry, out)?;
                    }
                }
            }
        }
        ArrayNode::Leaf(elems) => {
            for elem in elems {
                match shared {
                    Some(descriptor) => descriptor.codec.encode(elem.as_ref(), registry, out)?,
                    None => write_tagged(registry, elem.as_ref(), out)?,
                }
            }
        }
    }
    Ok(())
}

pub fn decode(
    spec: &ArraySpec,
    registry: &Registry,
    cursor: &mut Cursor<'_>,
) -> WireResult<Option<Value>> {
    let shared = shared_descriptor(spec, registry)?;

    let dims = cursor.read_u8()?;
    if dims != spec.dims {
        return Err(WireError::InvalidData {
            reason: format!(
                "array dimension count {} does not match registered {}",
                dims, spec.dims
            ),
        });
    }

    let top_extent = cursor.read_i32_le()?;
    if top_extent < 0 {
        return Err(WireError::InvalidData {
            reason: format!("negative array extent {}", top_extent),
        });
    }
    if top_extent == 0 {
        return Ok(Some(Value::Array(ArrayValue::empty(
            spec.elem.clone(),
            spec.dims,
        ))));
    }
    for _ in 1..dims {
        let extent = cursor.read_i32_le()?;
        if extent < 0 {
            return Err(WireError::InvalidData {
                reason: format!("negative array extent {}", extent),
            });
        }
    }

    let root = read_node(
        top_extent as usize,
        0,
        spec.dims as usize,
        shared,
        registry,
        cursor,
    )?;
    Ok(Some(Value::Array(ArrayValue::new(
        spec.elem.clone(),
        spec.dims,
        root,
    ))))
}

fn read_node(
    len: usize,
    depth: usize,
    dims: usize,
    shared: Option<&Descriptor>,
    registry: &Registry,
    cursor: &mut Cursor<'_>,
) -> WireResult<ArrayNode> {
    if depth == dims - 1 {
        let mut elems = Vec::with_capacity(len);
        for _ in 0..len {
            let elem = match shared {
                Some(descriptor) => descriptor.codec.decode(registry, cursor)?,
                None => read_tagged(registry, cursor)?,
            };
            elems.push(elem);
        }
        Ok(ArrayNode::Leaf(elems))
    } else {
        let mut children = Vec::with_capacity(len);
        for _ in 0..len {
            let sub_len = cursor.read_i32_le()?;
            if sub_len == LEN_ABSENT {
                children.push(None);
            } else if sub_len < 0 {
                return Err(WireError::InvalidData {
                    reason: format!("negative nested array length {}", sub_len),
                });
            } else {
                children.push(Some(read_node(
                    sub_len as usize,
                    depth + 1,
                    dims,
                    shared,
                    registry,
                    cursor,
                )?));
            }
        }
        Ok(ArrayNode::Branch(children))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PrimitiveKind, TypeKey};

    fn i32_spec(dims: u8) -> ArraySpec {
        ArraySpec::new(
            DeclaredType::of(TypeKey::Primitive(PrimitiveKind::I32)),
            dims,
        )
    }

    fn roundtrip(spec: &ArraySpec, registry: &Registry, value: Option<&Value>) -> (Vec<u8>, Option<Value>) {
        let mut buffer = vec![0u8; 512];
        let mut out = CursorMut::new(&mut buffer);
        encode(spec, value, registry, &mut out).expect("encode");
        let written = out.offset();
        buffer.truncate(written);

        let mut cursor = Cursor::new(&buffer);
        let decoded = decode(spec, registry, &mut cursor).expect("decode");
        assert!(cursor.is_eof());
        (buffer, decoded)
    }

    fn leaf(values: &[i32]) -> ArrayNode {
        ArrayNode::Leaf(values.iter().map(|v| Some(Value::I32(*v))).collect())
    }

    #[test]
    fn test_two_by_three_matrix_roundtrip() {
        let registry = Registry::with_defaults();
        let spec = i32_spec(2);
        let matrix = Value::Array(ArrayValue::new(
            spec.elem.clone(),
            2,
            ArrayNode::Branch(vec![Some(leaf(&[1, 2, 3])), Some(leaf(&[4, 5, 6]))]),
        ));
        let (bytes, decoded) = roundtrip(&spec, &registry, Some(&matrix));

        // dims, extents 2 and 3, then two sub-arrays each with own length.
        assert_eq!(bytes[0], 2);
        assert_eq!(&bytes[1..5], &2i32.to_le_bytes());
        assert_eq!(&bytes[5..9], &3i32.to_le_bytes());
        assert_eq!(decoded, Some(matrix));
    }

    #[test]
    fn test_ragged_rows_keep_actual_lengths() {
        let registry = Registry::with_defaults();
        let spec = i32_spec(2);
        let ragged = Value::Array(ArrayValue::new(
            spec.elem.clone(),
            2,
            ArrayNode::Branch(vec![Some(leaf(&[1])), Some(leaf(&[2, 3, 4]))]),
        ));
        let (bytes, decoded) = roundtrip(&spec, &registry, Some(&ragged));
        // Max extent of the second dimension is 3 even though row 0 holds 1.
        assert_eq!(&bytes[5..9], &3i32.to_le_bytes());
        assert_eq!(decoded, Some(ragged));
    }

    #[test]
    fn test_absent_nested_array_roundtrip() {
        let registry = Registry::with_defaults();
        let spec = i32_spec(2);
        let holes = Value::Array(ArrayValue::new(
            spec.elem.clone(),
            2,
            ArrayNode::Branch(vec![Some(leaf(&[9])), None]),
        ));
        let (_, decoded) = roundtrip(&spec, &registry, Some(&holes));
        assert_eq!(decoded, Some(holes));
    }

    #[test]
    fn test_zero_extent_is_null_sentinel() {
        let registry = Registry::with_defaults();
        let spec = i32_spec(2);
        let (bytes, decoded) = roundtrip(&spec, &registry, None);
        assert_eq!(bytes, vec![2, 0, 0, 0, 0]);
        // The sentinel and the empty array share one wire form; decode
        // yields the empty array.
        assert_eq!(
            decoded,
            Some(Value::Array(ArrayValue::empty(spec.elem.clone(), 2)))
        );
    }

    #[test]
    fn test_empty_array_matches_sentinel_bytes() {
        let registry = Registry::with_defaults();
        let spec = i32_spec(2);
        let empty = Value::Array(ArrayValue::empty(spec.elem.clone(), 2));
        let (bytes, decoded) = roundtrip(&spec, &registry, Some(&empty));
        assert_eq!(bytes, vec![2, 0, 0, 0, 0]);
        assert_eq!(decoded, Some(empty));
    }

    #[test]
    fn test_tagged_elements_allow_absent_and_mixed_leaves() {
        let registry = Registry::with_defaults();
        let spec = ArraySpec::new(DeclaredType::Dynamic, 1);
        let mixed = Value::Array(ArrayValue::new(
            DeclaredType::Dynamic,
            1,
            ArrayNode::Leaf(vec![
                Some(Value::I32(5)),
                None,
                Some(Value::Str("tail".to_string())),
            ]),
        ));
        let (_, decoded) = roundtrip(&spec, &registry, Some(&mixed));
        assert_eq!(decoded, Some(mixed));
    }

    #[test]
    fn test_dimension_mismatch_rejected_on_decode() {
        let registry = Registry::with_defaults();
        let spec = i32_spec(2);
        let buffer = [3u8, 0, 0, 0, 0];
        let mut cursor = Cursor::new(&buffer);
        let err = decode(&spec, &registry, &mut cursor).unwrap_err();
        assert!(matches!(err, WireError::InvalidData { .. }));
    }

    #[test]
    fn test_wrong_nesting_depth_rejected_on_encode() {
        let registry = Registry::with_defaults();
        let spec = i32_spec(2);
        let flat = Value::Array(ArrayValue::new(spec.elem.clone(), 2, leaf(&[1])));
        let mut buffer = [0u8; 64];
        let mut out = CursorMut::new(&mut buffer);
        let err = encode(&spec, Some(&flat), &registry, &mut out).unwrap_err();
        assert!(matches!(err, WireError::InvalidData { .. }));
    }
}
