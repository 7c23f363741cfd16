//! The attributed-tree codec.
//!
//! Every value becomes exactly one named element. Names are supplied by the
//! caller for top-level or keyed fields and generated as `<shape>_<index>`
//! for positional members (`seq_0`, `map_2`, `view_1`, ...).
//!
//! - scalars are leaf elements carrying their text in a `val` attribute
//! - variable-length containers carry a `size` attribute equal to their
//!   element count, recorded before children are appended so decode can
//!   pre-allocate
//! - pairs hold exactly two children named `first` and `second`
//! - mapping entries are child nodes each holding `first`/`second` children
//!   in ascending key order
//! - owning single references are transparent: the pointee is encoded
//!   directly as the named node, with no wrapper and no null tag
//!
//! Decode walks children in document order and validates the recorded
//! structure as it goes; any disagreement between `size`, the actual child
//! list, or the expected child names is an explicit decode error.
//!
//! ## Examples
//!
//! ```rust
//! use biform::{tree, Shape, ScalarKind, Value};
//!
//! let value = Value::seq(vec![Value::from(1), Value::from(2)]);
//! let node = tree::encode_element("numbers", &value).unwrap();
//! assert_eq!(node.attribute("size"), Some("2"));
//!
//! let shape = Shape::seq(Shape::scalar(ScalarKind::Int));
//! assert_eq!(tree::decode_element(&node, &shape).unwrap(), value);
//! ```

use crate::doc::Element;
use crate::error::{Error, Result};
use crate::options::DEFAULT_MAX_DEPTH;
use crate::shape::{ScalarKind, Shape, ShapeKind};
use crate::value::{Scalar, Value};
use std::collections::{BTreeMap, BTreeSet};

/// Conventional tag name for the document root holding encoded values.
pub const ROOT_ELEMENT: &str = "serialization";

/// Encodes a value as one named element.
///
/// # Errors
///
/// [`Error::Precondition`] for an absent owning reference or a view whose
/// declared length disagrees with its data; [`Error::DepthLimit`] past the
/// nesting budget.
pub fn encode_element(name: &str, value: &Value) -> Result<Element> {
    encode_at(name, value, 0)
}

/// Encodes a value and appends it to `parent` as one named child.
pub fn encode_into(parent: &mut Element, name: &str, value: &Value) -> Result<()> {
    let node = encode_element(name, value)?;
    parent.append_child(node);
    Ok(())
}

/// Decodes a value of the declared shape from one element.
///
/// # Errors
///
/// [`Error::StructureMismatch`] when the element's attributes or children
/// disagree with the declaration; [`Error::MalformedToken`] when an
/// attribute's text fails to parse; [`Error::Precondition`] when a view's
/// declared length disagrees with the recorded one.
pub fn decode_element(node: &Element, shape: &Shape) -> Result<Value> {
    decode_at(node, shape, 0)
}

fn encode_at(name: &str, value: &Value, depth: usize) -> Result<Element> {
    if depth > DEFAULT_MAX_DEPTH {
        return Err(Error::DepthLimit(DEFAULT_MAX_DEPTH));
    }
    let mut node = Element::new(name);
    match value {
        Value::Scalar(scalar) => {
            node.set_attribute("val", scalar.to_string());
        }
        Value::Pair(first, second) => {
            node.append_child(encode_at("first", first, depth + 1)?);
            node.append_child(encode_at("second", second, depth + 1)?);
        }
        Value::Seq(elems) => {
            encode_positional(&mut node, ShapeKind::Seq, elems.iter(), elems.len(), depth)?;
        }
        Value::Set(elems) => {
            encode_positional(&mut node, ShapeKind::Set, elems.iter(), elems.len(), depth)?;
        }
        Value::Map(entries) => {
            node.set_attribute("size", entries.len().to_string());
            for (index, (key, val)) in entries.iter().enumerate() {
                let mut entry = Element::new(format!("map_{}", index));
                entry.append_child(encode_at("first", key, depth + 2)?);
                entry.append_child(encode_at("second", val, depth + 2)?);
                node.append_child(entry);
            }
        }
        Value::Boxed(Some(inner)) => {
            // Transparent one-level unwrap: the pointee *is* the named node.
            return encode_at(name, inner, depth + 1);
        }
        Value::Boxed(None) => {
            return Err(Error::precondition(
                "cannot encode an absent owning reference",
            ));
        }
        Value::BoxedSlice(elems) => {
            encode_positional(
                &mut node,
                ShapeKind::BoxedSlice,
                elems.iter(),
                elems.len(),
                depth,
            )?;
        }
        Value::RawSlice { elems, len } => {
            if elems.len() != *len {
                return Err(Error::precondition(format!(
                    "declared view length {} does not match {} available elements",
                    len,
                    elems.len()
                )));
            }
            encode_positional(&mut node, ShapeKind::RawSlice, elems.iter(), *len, depth)?;
        }
    }
    Ok(node)
}

fn encode_positional<'a>(
    node: &mut Element,
    kind: ShapeKind,
    elems: impl Iterator<Item = &'a Value>,
    count: usize,
    depth: usize,
) -> Result<()> {
    // The size attribute lands before any child is appended, mirroring the
    // count-before-bodies rule of the flat stream.
    node.set_attribute("size", count.to_string());
    for (index, elem) in elems.enumerate() {
        let child = encode_at(&format!("{}_{}", kind.label(), index), elem, depth + 1)?;
        node.append_child(child);
    }
    Ok(())
}

fn decode_at(node: &Element, shape: &Shape, depth: usize) -> Result<Value> {
    if depth > DEFAULT_MAX_DEPTH {
        return Err(Error::DepthLimit(DEFAULT_MAX_DEPTH));
    }
    match shape {
        Shape::Scalar(kind) => Ok(Value::Scalar(read_scalar(node, *kind)?)),
        Shape::Pair(first, second) => {
            let (a, b) = decode_pair_children(node, first, second, depth)?;
            Ok(Value::pair(a, b))
        }
        Shape::Seq(elem) => {
            let children = sized_children(node)?;
            let mut elems = Vec::with_capacity(children.len());
            for child in children {
                elems.push(decode_at(child, elem, depth + 1)?);
            }
            Ok(Value::Seq(elems))
        }
        Shape::Set(elem) => {
            let children = sized_children(node)?;
            let mut elems = BTreeSet::new();
            for child in children {
                elems.insert(decode_at(child, elem, depth + 1)?);
            }
            Ok(Value::Set(elems))
        }
        Shape::Map(key, value) => {
            let children = sized_children(node)?;
            let mut entries = BTreeMap::new();
            for entry in children {
                let (k, v) = decode_pair_children(entry, key, value, depth + 1)?;
                entries.insert(k, v);
            }
            Ok(Value::Map(entries))
        }
        Shape::Boxed(pointee) => {
            // Always allocates exactly one fresh instance.
            let inner = decode_at(node, pointee, depth + 1)?;
            Ok(Value::boxed(inner))
        }
        Shape::BoxedSlice(elem) => {
            let children = sized_children(node)?;
            let mut elems = Vec::with_capacity(children.len());
            for child in children {
                elems.push(decode_at(child, elem, depth + 1)?);
            }
            Ok(Value::BoxedSlice(elems))
        }
        Shape::RawSlice { elem, len } => {
            let children = sized_children(node)?;
            if children.len() != *len {
                return Err(Error::precondition(format!(
                    "declared view length {} does not match recorded length {}",
                    len,
                    children.len()
                )));
            }
            let mut elems = Vec::with_capacity(*len);
            for child in children {
                elems.push(decode_at(child, elem, depth + 1)?);
            }
            Ok(Value::RawSlice { elems, len: *len })
        }
    }
}

fn read_scalar(node: &Element, kind: ScalarKind) -> Result<Scalar> {
    let text = node.attribute("val").ok_or_else(|| {
        Error::structure_mismatch(
            "a leaf element with a val attribute",
            format!("<{}> without one", node.name()),
        )
    })?;
    kind.parse(text)
        .ok_or_else(|| Error::malformed_token(kind.name(), text, 0))
}

/// Reads the recorded `size` attribute and checks it against the actual
/// child list before handing the children back for decoding.
fn sized_children(node: &Element) -> Result<&[Element]> {
    let text = node.attribute("size").ok_or_else(|| {
        Error::structure_mismatch(
            "a container element with a size attribute",
            format!("<{}> without one", node.name()),
        )
    })?;
    let size: usize = text
        .parse()
        .map_err(|_| Error::malformed_token("count", text, 0))?;
    let children = node.children();
    if children.len() != size {
        return Err(Error::structure_mismatch(
            format!("{} children per the recorded size", size),
            format!("{} children under <{}>", children.len(), node.name()),
        ));
    }
    Ok(children)
}

fn decode_pair_children(
    node: &Element,
    first: &Shape,
    second: &Shape,
    depth: usize,
) -> Result<(Value, Value)> {
    let children = node.children();
    if children.len() != 2 {
        return Err(Error::structure_mismatch(
            "exactly two children (first, second)",
            format!("{} children under <{}>", children.len(), node.name()),
        ));
    }
    for (child, expected) in children.iter().zip(["first", "second"]) {
        if child.name() != expected {
            return Err(Error::structure_mismatch(
                format!("a child named {:?}", expected),
                format!("<{}>", child.name()),
            ));
        }
    }
    let a = decode_at(&children[0], first, depth + 1)?;
    let b = decode_at(&children[1], second, depth + 1)?;
    Ok((a, b))
}
