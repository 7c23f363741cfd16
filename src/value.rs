//! The closed value model shared by both codecs.
//!
//! This module provides [`Value`], a tagged union over the fixed set of
//! structural shapes the engine understands, and [`Scalar`], its leaf type.
//! A `Value` is built by the caller before encoding, or built by a codec
//! during decoding and handed back; the codecs never keep one alive past the
//! call that produced it.
//!
//! ## Core Types
//!
//! - [`Value`]: scalar, pair, sequence, set, mapping, owning single
//!   reference, owning array, or externally-lengthed array view
//! - [`Scalar`]: a numeric, boolean, or text leaf
//!
//! ## Ordering
//!
//! `Value` and `Scalar` carry a *total* ordering (floats compare via
//! [`f64::total_cmp`]), which is what lets values key a `BTreeMap` and live
//! in a `BTreeSet`; the ascending iteration those containers provide is
//! exactly the deterministic element order both codecs rely on.
//!
//! ## Examples
//!
//! ```rust
//! use biform::Value;
//!
//! let seq = Value::seq(vec![Value::from(1), Value::from(2), Value::from(3)]);
//! assert!(seq.is_seq());
//! assert_eq!(seq.as_seq().map(|s| s.len()), Some(3));
//!
//! let pair = Value::pair(Value::from(5), Value::from("hi"));
//! assert!(pair.is_pair());
//! ```

use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// A leaf value: integer, float, boolean, or text.
///
/// Text is always a single scalar token, never a sequence of characters.
///
/// # Examples
///
/// ```rust
/// use biform::Scalar;
///
/// let n = Scalar::Int(42);
/// assert!(n.is_int());
/// assert_eq!(n.to_string(), "42");
/// ```
#[derive(Clone, Debug)]
pub enum Scalar {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl Scalar {
    /// Returns `true` if this is an integer.
    #[inline]
    #[must_use]
    pub const fn is_int(&self) -> bool {
        matches!(self, Scalar::Int(_))
    }

    /// Returns `true` if this is a float.
    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Scalar::Float(_))
    }

    /// Returns `true` if this is a boolean.
    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Scalar::Bool(_))
    }

    /// Returns `true` if this is text.
    #[inline]
    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Scalar::Text(_))
    }

    /// Returns the integer if this is `Int`, otherwise `None`.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Scalar::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the value as `f64` if numeric, otherwise `None`.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Int(i) => Some(*i as f64),
            Scalar::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the boolean if this is `Bool`, otherwise `None`.
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Scalar::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the text if this is `Text`, otherwise `None`.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::Text(s) => Some(s),
            _ => None,
        }
    }

    const fn rank(&self) -> u8 {
        match self {
            Scalar::Int(_) => 0,
            Scalar::Float(_) => 1,
            Scalar::Bool(_) => 2,
            Scalar::Text(_) => 3,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Int(i) => write!(f, "{}", i),
            Scalar::Float(fl) => write!(f, "{}", fl),
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Text(s) => write!(f, "{}", s),
        }
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Scalar {}

impl Ord for Scalar {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Scalar::Int(a), Scalar::Int(b)) => a.cmp(b),
            (Scalar::Float(a), Scalar::Float(b)) => a.total_cmp(b),
            (Scalar::Bool(a), Scalar::Bool(b)) => a.cmp(b),
            (Scalar::Text(a), Scalar::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for Scalar {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A value built from the closed set of structural shapes.
///
/// Containers are ordinary std collections; the two ownership wrappers
/// mirror `Box<T>` and `Box<[T]>`, and [`Value::RawSlice`] models a
/// contiguous run whose length is declared by the caller rather than
/// inferred from the data.
///
/// # Examples
///
/// ```rust
/// use biform::Value;
///
/// let m = Value::map(vec![
///     (Value::from("a"), Value::from(1)),
///     (Value::from("b"), Value::from(2)),
/// ]);
/// assert!(m.is_map());
/// ```
#[derive(Clone, Debug)]
pub enum Value {
    /// A numeric, boolean, or text leaf.
    Scalar(Scalar),
    /// Exactly two sub-values in (first, second) order.
    Pair(Box<Value>, Box<Value>),
    /// An ordered list.
    Seq(Vec<Value>),
    /// A unique collection iterated in ascending order.
    Set(BTreeSet<Value>),
    /// A unique-key collection iterated in ascending key order.
    Map(BTreeMap<Value, Value>),
    /// An owning single reference. `None` marks an absent reference, which
    /// has no encoded representation; attempting to encode it is a
    /// precondition violation.
    Boxed(Option<Box<Value>>),
    /// An owning contiguous array whose length self-describes on the wire.
    BoxedSlice(Vec<Value>),
    /// A contiguous run of values whose length is declared by the caller.
    /// The codecs use `len`, never `elems.len()` alone; disagreement between
    /// the two is a precondition violation.
    RawSlice { elems: Vec<Value>, len: usize },
}

impl Value {
    /// Builds a pair from two values.
    #[must_use]
    pub fn pair(first: Value, second: Value) -> Self {
        Value::Pair(Box::new(first), Box::new(second))
    }

    /// Builds a sequence.
    #[must_use]
    pub fn seq(elems: Vec<Value>) -> Self {
        Value::Seq(elems)
    }

    /// Builds a set; duplicates collapse per set semantics.
    #[must_use]
    pub fn set(elems: impl IntoIterator<Item = Value>) -> Self {
        Value::Set(elems.into_iter().collect())
    }

    /// Builds a mapping; later duplicate keys replace earlier ones.
    #[must_use]
    pub fn map(entries: impl IntoIterator<Item = (Value, Value)>) -> Self {
        Value::Map(entries.into_iter().collect())
    }

    /// Builds a present owning single reference.
    #[must_use]
    pub fn boxed(value: Value) -> Self {
        Value::Boxed(Some(Box::new(value)))
    }

    /// Builds an absent owning single reference. Encoding it fails with a
    /// precondition violation; the state exists so the violation is
    /// expressible, not so it can travel.
    #[must_use]
    pub const fn absent() -> Self {
        Value::Boxed(None)
    }

    /// Builds an owning array.
    #[must_use]
    pub fn boxed_slice(elems: Vec<Value>) -> Self {
        Value::BoxedSlice(elems)
    }

    /// Builds an array view with a caller-declared length.
    #[must_use]
    pub fn raw_slice(elems: Vec<Value>, len: usize) -> Self {
        Value::RawSlice { elems, len }
    }

    /// Returns `true` if the value is a scalar.
    #[inline]
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        matches!(self, Value::Scalar(_))
    }

    /// Returns `true` if the value is a pair.
    #[inline]
    #[must_use]
    pub const fn is_pair(&self) -> bool {
        matches!(self, Value::Pair(_, _))
    }

    /// Returns `true` if the value is a sequence.
    #[inline]
    #[must_use]
    pub const fn is_seq(&self) -> bool {
        matches!(self, Value::Seq(_))
    }

    /// Returns `true` if the value is a set.
    #[inline]
    #[must_use]
    pub const fn is_set(&self) -> bool {
        matches!(self, Value::Set(_))
    }

    /// Returns `true` if the value is a mapping.
    #[inline]
    #[must_use]
    pub const fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    /// Returns `true` if the value is an owning single reference
    /// (present or absent).
    #[inline]
    #[must_use]
    pub const fn is_boxed(&self) -> bool {
        matches!(self, Value::Boxed(_))
    }

    /// Returns the scalar if this is one, otherwise `None`.
    #[inline]
    #[must_use]
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Value::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// Shorthand for `as_scalar().and_then(Scalar::as_i64)`.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        self.as_scalar().and_then(Scalar::as_i64)
    }

    /// Shorthand for `as_scalar().and_then(Scalar::as_str)`.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        self.as_scalar().and_then(Scalar::as_str)
    }

    /// Returns the elements if this is a sequence, otherwise `None`.
    #[inline]
    #[must_use]
    pub fn as_seq(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Seq(elems) => Some(elems),
            _ => None,
        }
    }

    /// Returns the elements if this is a set, otherwise `None`.
    #[inline]
    #[must_use]
    pub fn as_set(&self) -> Option<&BTreeSet<Value>> {
        match self {
            Value::Set(elems) => Some(elems),
            _ => None,
        }
    }

    /// Returns the entries if this is a mapping, otherwise `None`.
    #[inline]
    #[must_use]
    pub fn as_map(&self) -> Option<&BTreeMap<Value, Value>> {
        match self {
            Value::Map(entries) => Some(entries),
            _ => None,
        }
    }

    const fn rank(&self) -> u8 {
        match self {
            Value::Scalar(_) => 0,
            Value::Pair(_, _) => 1,
            Value::Seq(_) => 2,
            Value::Set(_) => 3,
            Value::Map(_) => 4,
            Value::Boxed(_) => 5,
            Value::BoxedSlice(_) => 6,
            Value::RawSlice { .. } => 7,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Scalar(a), Value::Scalar(b)) => a.cmp(b),
            (Value::Pair(a1, b1), Value::Pair(a2, b2)) => {
                a1.cmp(a2).then_with(|| b1.cmp(b2))
            }
            (Value::Seq(a), Value::Seq(b)) => a.cmp(b),
            (Value::Set(a), Value::Set(b)) => a.cmp(b),
            (Value::Map(a), Value::Map(b)) => a.cmp(b),
            (Value::Boxed(a), Value::Boxed(b)) => a.cmp(b),
            (Value::BoxedSlice(a), Value::BoxedSlice(b)) => a.cmp(b),
            (
                Value::RawSlice { elems: a, len: la },
                Value::RawSlice { elems: b, len: lb },
            ) => a.cmp(b).then_with(|| la.cmp(lb)),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

macro_rules! from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Scalar {
                fn from(value: $t) -> Self {
                    Scalar::Int(value as i64)
                }
            }

            impl From<$t> for Value {
                fn from(value: $t) -> Self {
                    Value::Scalar(Scalar::Int(value as i64))
                }
            }
        )*
    };
}

macro_rules! from_float {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Scalar {
                fn from(value: $t) -> Self {
                    Scalar::Float(value as f64)
                }
            }

            impl From<$t> for Value {
                fn from(value: $t) -> Self {
                    Value::Scalar(Scalar::Float(value as f64))
                }
            }
        )*
    };
}

from_int!(i8, i16, i32, i64, u8, u16, u32);
from_float!(f32, f64);

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Scalar(Scalar::Bool(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Scalar(Scalar::Text(value.to_string()))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Scalar(Scalar::Text(value))
    }
}

impl From<Scalar> for Value {
    fn from(value: Scalar) -> Self {
        Value::Scalar(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(elems: Vec<Value>) -> Self {
        Value::Seq(elems)
    }
}

impl From<BTreeSet<Value>> for Value {
    fn from(elems: BTreeSet<Value>) -> Self {
        Value::Set(elems)
    }
}

impl From<BTreeMap<Value, Value>> for Value {
    fn from(entries: BTreeMap<Value, Value>) -> Self {
        Value::Map(entries)
    }
}

impl Serialize for Scalar {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Scalar::Int(i) => serializer.serialize_i64(*i),
            Scalar::Float(f) => serializer.serialize_f64(*f),
            Scalar::Bool(b) => serializer.serialize_bool(*b),
            Scalar::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ScalarVisitor;

        impl<'de> Visitor<'de> for ScalarVisitor {
            type Value = Scalar;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an integer, float, boolean, or string")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Scalar, E> {
                Ok(Scalar::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Scalar, E> {
                Ok(Scalar::Int(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Scalar, E> {
                if value <= i64::MAX as u64 {
                    Ok(Scalar::Int(value as i64))
                } else {
                    Ok(Scalar::Float(value as f64))
                }
            }

            fn visit_f64<E>(self, value: f64) -> Result<Scalar, E> {
                Ok(Scalar::Float(value))
            }

            fn visit_str<E>(self, value: &str) -> Result<Scalar, E> {
                Ok(Scalar::Text(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Scalar, E> {
                Ok(Scalar::Text(value))
            }
        }

        deserializer.deserialize_any(ScalarVisitor)
    }
}

// The bridge mirrors the codecs' semantics: owning references are
// transparent, pairs and both array forms become sequences, mappings become
// maps. An absent reference has no representation here either.
impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::Error as _;
        match self {
            Value::Scalar(s) => s.serialize(serializer),
            Value::Pair(first, second) => {
                let mut seq = serializer.serialize_seq(Some(2))?;
                seq.serialize_element(first)?;
                seq.serialize_element(second)?;
                seq.end()
            }
            Value::Seq(elems) | Value::BoxedSlice(elems) => {
                let mut seq = serializer.serialize_seq(Some(elems.len()))?;
                for elem in elems {
                    seq.serialize_element(elem)?;
                }
                seq.end()
            }
            Value::Set(elems) => {
                let mut seq = serializer.serialize_seq(Some(elems.len()))?;
                for elem in elems {
                    seq.serialize_element(elem)?;
                }
                seq.end()
            }
            Value::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (k, v) in entries {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
            Value::Boxed(Some(inner)) => inner.serialize(serializer),
            Value::Boxed(None) => Err(S::Error::custom(
                "cannot serialize an absent owning reference",
            )),
            Value::RawSlice { elems, len } => {
                if elems.len() != *len {
                    return Err(S::Error::custom(format!(
                        "declared view length {} does not match {} available elements",
                        len,
                        elems.len()
                    )));
                }
                let mut seq = serializer.serialize_seq(Some(elems.len()))?;
                for elem in elems {
                    seq.serialize_element(elem)?;
                }
                seq.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a scalar, sequence, or map")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Value, E> {
                Ok(Value::Scalar(Scalar::Bool(value)))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Value, E> {
                Ok(Value::Scalar(Scalar::Int(value)))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Value, E> {
                if value <= i64::MAX as u64 {
                    Ok(Value::Scalar(Scalar::Int(value as i64)))
                } else {
                    Ok(Value::Scalar(Scalar::Float(value as f64)))
                }
            }

            fn visit_f64<E>(self, value: f64) -> Result<Value, E> {
                Ok(Value::Scalar(Scalar::Float(value)))
            }

            fn visit_str<E>(self, value: &str) -> Result<Value, E> {
                Ok(Value::Scalar(Scalar::Text(value.to_string())))
            }

            fn visit_string<E>(self, value: String) -> Result<Value, E> {
                Ok(Value::Scalar(Scalar::Text(value)))
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut elems = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(elem) = seq.next_element()? {
                    elems.push(elem);
                }
                Ok(Value::Seq(elems))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = BTreeMap::new();
                while let Some((key, value)) = map.next_entry::<Value, Value>()? {
                    entries.insert(key, value);
                }
                Ok(Value::Map(entries))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_ordering_is_total() {
        assert!(Scalar::Int(1) < Scalar::Int(2));
        assert!(Scalar::Float(1.5) < Scalar::Float(2.5));
        assert!(Scalar::Text("a".into()) < Scalar::Text("b".into()));
        // Cross-variant comparisons fall back to a fixed rank.
        assert!(Scalar::Int(i64::MAX) < Scalar::Float(f64::MIN));
        // NaN participates in the total order instead of poisoning it.
        assert_eq!(Scalar::Float(f64::NAN), Scalar::Float(f64::NAN));
    }

    #[test]
    fn set_collapses_duplicates() {
        let set = Value::set(vec![Value::from(1), Value::from(2), Value::from(1)]);
        assert_eq!(set.as_set().map(|s| s.len()), Some(2));
    }

    #[test]
    fn map_iterates_key_ascending() {
        let map = Value::map(vec![
            (Value::from("b"), Value::from(2)),
            (Value::from("a"), Value::from(1)),
        ]);
        let keys: Vec<_> = map
            .as_map()
            .unwrap()
            .keys()
            .map(|k| k.as_str().unwrap().to_string())
            .collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn from_primitives() {
        assert_eq!(Value::from(42i32), Value::Scalar(Scalar::Int(42)));
        assert_eq!(Value::from(2.5f64), Value::Scalar(Scalar::Float(2.5)));
        assert_eq!(Value::from(true), Value::Scalar(Scalar::Bool(true)));
        assert_eq!(Value::from("hi"), Value::Scalar(Scalar::Text("hi".into())));
    }

    #[test]
    fn accessors() {
        let pair = Value::pair(Value::from(1), Value::from("x"));
        assert!(pair.is_pair());
        assert!(!pair.is_seq());

        let v = Value::from(7);
        assert_eq!(v.as_i64(), Some(7));
        assert_eq!(v.as_str(), None);
    }

    #[test]
    fn serde_bridge_to_json() {
        let value = Value::map(vec![
            (Value::from("nums"), Value::seq(vec![Value::from(1), Value::from(2)])),
            (Value::from("name"), Value::from("alice")),
        ]);
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#"{"name":"alice","nums":[1,2]}"#);

        let back: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(back.as_map().unwrap().len(), 2);
    }

    #[test]
    fn serde_bridge_unwraps_boxed() {
        let boxed = Value::boxed(Value::from(9));
        assert_eq!(serde_json::to_string(&boxed).unwrap(), "9");

        assert!(serde_json::to_string(&Value::absent()).is_err());
    }
}
