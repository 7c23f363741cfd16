//! Shape classification and declared-type descriptors.
//!
//! Every [`Value`] belongs to exactly one structural category, determined by
//! a total pattern match over the closed enum. There is no runtime type
//! probing, and no ambiguity: text is a scalar, never a sequence of
//! characters.
//!
//! Decoding is type-directed. Neither wire form tags values with their
//! shape, so the caller declares the expected structure as a [`Shape`], a
//! recursive descriptor mirroring `Value` variant-for-variant. Containers
//! are homogeneous (one element shape describes every element), matching
//! the generic-container model the formats were built around.
//!
//! Descriptors nest to arbitrary depth; the codecs bound recursion with an
//! explicit depth budget rather than riding the host call stack (see
//! [`FlatOptions::max_depth`](crate::FlatOptions)).
//!
//! ## Examples
//!
//! ```rust
//! use biform::{Shape, ScalarKind, ShapeKind, Value};
//!
//! // A sequence of (int, text) pairs.
//! let shape = Shape::seq(Shape::pair(
//!     Shape::scalar(ScalarKind::Int),
//!     Shape::scalar(ScalarKind::Text),
//! ));
//! assert_eq!(shape.kind(), ShapeKind::Seq);
//!
//! // Classification of a concrete value.
//! let v = Value::from("hello");
//! assert_eq!(v.shape(), ShapeKind::Scalar);
//! ```

use crate::value::{Scalar, Value};

/// The concrete type of a scalar leaf, used to parse tokens and attributes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScalarKind {
    Int,
    Float,
    Bool,
    Text,
}

impl ScalarKind {
    /// Human-readable name, used in error messages.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            ScalarKind::Int => "integer",
            ScalarKind::Float => "float",
            ScalarKind::Bool => "boolean",
            ScalarKind::Text => "text",
        }
    }

    /// Parses token text into a scalar of this kind. Returns `None` when the
    /// text does not form a valid value of the kind; the caller turns that
    /// into a malformed-token error carrying its own position context.
    #[must_use]
    pub fn parse(&self, text: &str) -> Option<Scalar> {
        match self {
            ScalarKind::Int => text.parse::<i64>().ok().map(Scalar::Int),
            ScalarKind::Float => text.parse::<f64>().ok().map(Scalar::Float),
            ScalarKind::Bool => text.parse::<bool>().ok().map(Scalar::Bool),
            ScalarKind::Text => Some(Scalar::Text(text.to_string())),
        }
    }

    /// The kind a concrete scalar belongs to.
    #[must_use]
    pub const fn of(scalar: &Scalar) -> ScalarKind {
        match scalar {
            Scalar::Int(_) => ScalarKind::Int,
            Scalar::Float(_) => ScalarKind::Float,
            Scalar::Bool(_) => ScalarKind::Bool,
            Scalar::Text(_) => ScalarKind::Text,
        }
    }
}

/// The structural category of a value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeKind {
    Scalar,
    Pair,
    Seq,
    Set,
    Map,
    Boxed,
    BoxedSlice,
    RawSlice,
}

impl ShapeKind {
    /// Short label used for generated positional element names in the tree
    /// form (`seq_0`, `map_3`, ...).
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            ShapeKind::Scalar => "scalar",
            ShapeKind::Pair => "pair",
            ShapeKind::Seq => "seq",
            ShapeKind::Set => "set",
            ShapeKind::Map => "map",
            ShapeKind::Boxed => "boxed",
            ShapeKind::BoxedSlice => "slice",
            ShapeKind::RawSlice => "view",
        }
    }
}

/// A declared type directing decode.
///
/// `RawSlice` is the one place a length lives in the descriptor instead of
/// on the wire alone: the caller must supply the same `len` on encode and
/// decode, and the codecs verify it against the data rather than inferring
/// it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Shape {
    Scalar(ScalarKind),
    Pair(Box<Shape>, Box<Shape>),
    Seq(Box<Shape>),
    Set(Box<Shape>),
    Map(Box<Shape>, Box<Shape>),
    Boxed(Box<Shape>),
    BoxedSlice(Box<Shape>),
    RawSlice { elem: Box<Shape>, len: usize },
}

impl Shape {
    /// A scalar of the given kind.
    #[must_use]
    pub const fn scalar(kind: ScalarKind) -> Self {
        Shape::Scalar(kind)
    }

    /// A pair of two shapes.
    #[must_use]
    pub fn pair(first: Shape, second: Shape) -> Self {
        Shape::Pair(Box::new(first), Box::new(second))
    }

    /// A sequence of one element shape.
    #[must_use]
    pub fn seq(elem: Shape) -> Self {
        Shape::Seq(Box::new(elem))
    }

    /// A set of one element shape.
    #[must_use]
    pub fn set(elem: Shape) -> Self {
        Shape::Set(Box::new(elem))
    }

    /// A mapping from a key shape to a value shape.
    #[must_use]
    pub fn map(key: Shape, value: Shape) -> Self {
        Shape::Map(Box::new(key), Box::new(value))
    }

    /// An owning single reference to the pointee shape.
    #[must_use]
    pub fn boxed(pointee: Shape) -> Self {
        Shape::Boxed(Box::new(pointee))
    }

    /// An owning array of the element shape.
    #[must_use]
    pub fn boxed_slice(elem: Shape) -> Self {
        Shape::BoxedSlice(Box::new(elem))
    }

    /// An array view of the element shape with a caller-declared length.
    #[must_use]
    pub fn raw_slice(elem: Shape, len: usize) -> Self {
        Shape::RawSlice {
            elem: Box::new(elem),
            len,
        }
    }

    /// The top-level category of this descriptor.
    #[must_use]
    pub const fn kind(&self) -> ShapeKind {
        match self {
            Shape::Scalar(_) => ShapeKind::Scalar,
            Shape::Pair(_, _) => ShapeKind::Pair,
            Shape::Seq(_) => ShapeKind::Seq,
            Shape::Set(_) => ShapeKind::Set,
            Shape::Map(_, _) => ShapeKind::Map,
            Shape::Boxed(_) => ShapeKind::Boxed,
            Shape::BoxedSlice(_) => ShapeKind::BoxedSlice,
            Shape::RawSlice { .. } => ShapeKind::RawSlice,
        }
    }

    /// Derives the descriptor a value would decode under.
    ///
    /// Containers take their element shape from their first element, so an
    /// empty container (and an absent owning reference) yields `None`: the
    /// element type is not recoverable from the value alone and must be
    /// declared by the caller.
    #[must_use]
    pub fn of(value: &Value) -> Option<Shape> {
        match value {
            Value::Scalar(s) => Some(Shape::Scalar(ScalarKind::of(s))),
            Value::Pair(first, second) => {
                Some(Shape::pair(Shape::of(first)?, Shape::of(second)?))
            }
            Value::Seq(elems) => elems.first().and_then(Shape::of).map(Shape::seq),
            Value::Set(elems) => elems.iter().next().and_then(Shape::of).map(Shape::set),
            Value::Map(entries) => {
                let (k, v) = entries.iter().next()?;
                Some(Shape::map(Shape::of(k)?, Shape::of(v)?))
            }
            Value::Boxed(inner) => inner.as_deref().and_then(Shape::of).map(Shape::boxed),
            Value::BoxedSlice(elems) => {
                elems.first().and_then(Shape::of).map(Shape::boxed_slice)
            }
            Value::RawSlice { elems, len } => {
                let elem = elems.first().and_then(Shape::of)?;
                Some(Shape::raw_slice(elem, *len))
            }
        }
    }
}

impl Value {
    /// Classifies this value into its structural category.
    ///
    /// Dispatch is a single pattern match over the closed enum; in
    /// particular a text scalar classifies as [`ShapeKind::Scalar`], never
    /// as a sequence.
    #[must_use]
    pub const fn shape(&self) -> ShapeKind {
        match self {
            Value::Scalar(_) => ShapeKind::Scalar,
            Value::Pair(_, _) => ShapeKind::Pair,
            Value::Seq(_) => ShapeKind::Seq,
            Value::Set(_) => ShapeKind::Set,
            Value::Map(_) => ShapeKind::Map,
            Value::Boxed(_) => ShapeKind::Boxed,
            Value::BoxedSlice(_) => ShapeKind::BoxedSlice,
            Value::RawSlice { .. } => ShapeKind::RawSlice,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_classifies_as_scalar() {
        let v = Value::from("hello");
        assert_eq!(v.shape(), ShapeKind::Scalar);
        assert_eq!(Shape::of(&v), Some(Shape::scalar(ScalarKind::Text)));
    }

    #[test]
    fn derived_shape_matches_nested_value() {
        let v = Value::seq(vec![Value::pair(Value::from(1), Value::from("a"))]);
        let shape = Shape::of(&v).unwrap();
        assert_eq!(
            shape,
            Shape::seq(Shape::pair(
                Shape::scalar(ScalarKind::Int),
                Shape::scalar(ScalarKind::Text),
            ))
        );
    }

    #[test]
    fn empty_container_shape_is_ambiguous() {
        assert_eq!(Shape::of(&Value::seq(vec![])), None);
        assert_eq!(Shape::of(&Value::absent()), None);
    }

    #[test]
    fn scalar_kind_parsing() {
        assert_eq!(ScalarKind::Int.parse("42"), Some(Scalar::Int(42)));
        assert_eq!(ScalarKind::Int.parse("4.2"), None);
        assert_eq!(ScalarKind::Float.parse("4.2"), Some(Scalar::Float(4.2)));
        assert_eq!(ScalarKind::Bool.parse("true"), Some(Scalar::Bool(true)));
        assert_eq!(ScalarKind::Bool.parse("1"), None);
        assert_eq!(
            ScalarKind::Text.parse("anything"),
            Some(Scalar::Text("anything".into()))
        );
    }
}
