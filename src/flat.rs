//! The flat token-stream codec.
//!
//! Values encode into a single line of ASCII tokens, each followed by one
//! delimiter character (a space by default):
//!
//! - scalars are one token of `Display` text
//! - pairs are the first encoding followed by the second, with no marker
//! - every variable-length container writes its element count before any
//!   element bodies, which is what lets decode pre-size the target
//! - owning single references descend into the pointee with no tag; there
//!   is no representation for an absent reference
//!
//! Decode mirrors encode token-for-token and is directed by a declared
//! [`Shape`]; the stream itself carries no type information.
//!
//! ## Examples
//!
//! ```rust
//! use biform::{Encoder, Decoder, FlatOptions, Shape, ScalarKind, Value};
//!
//! let value = Value::seq(vec![Value::from(1), Value::from(2), Value::from(3)]);
//!
//! let mut encoder = Encoder::new(FlatOptions::default());
//! encoder.encode(&value).unwrap();
//! assert_eq!(encoder.into_inner(), "3 1 2 3 ");
//!
//! let shape = Shape::seq(Shape::scalar(ScalarKind::Int));
//! let mut decoder = Decoder::from_str("3 1 2 3 ");
//! assert_eq!(decoder.decode(&shape).unwrap(), value);
//! ```

use crate::error::{Error, Result};
use crate::options::FlatOptions;
use crate::shape::{ScalarKind, Shape};
use crate::value::{Scalar, Value};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;

/// Cap on speculative pre-allocation from decoded counts, so a corrupt
/// count token cannot demand the address space up front.
const PREALLOC_CAP: usize = 4096;

/// Encodes values onto an owned output string.
pub struct Encoder {
    output: String,
    options: FlatOptions,
}

impl Encoder {
    pub fn new(options: FlatOptions) -> Self {
        Encoder {
            output: String::with_capacity(256),
            options,
        }
    }

    /// Consumes the encoder and returns the token stream built so far.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.output
    }

    /// Appends the encoding of `value` to the stream.
    ///
    /// # Errors
    ///
    /// [`Error::Precondition`] for an absent owning reference, a view whose
    /// declared length disagrees with its data, or a text scalar that has no
    /// token representation under the active delimiter;
    /// [`Error::DepthLimit`] when nesting exceeds the configured budget.
    pub fn encode(&mut self, value: &Value) -> Result<()> {
        self.encode_at(value, 0)
    }

    fn encode_at(&mut self, value: &Value, depth: usize) -> Result<()> {
        if depth > self.options.max_depth {
            return Err(Error::DepthLimit(self.options.max_depth));
        }
        match value {
            Value::Scalar(scalar) => self.push_scalar(scalar),
            Value::Pair(first, second) => {
                self.encode_at(first, depth + 1)?;
                self.encode_at(second, depth + 1)
            }
            Value::Seq(elems) => {
                self.push_count(elems.len());
                for elem in elems {
                    self.encode_at(elem, depth + 1)?;
                }
                Ok(())
            }
            Value::Set(elems) => {
                self.push_count(elems.len());
                for elem in elems {
                    self.encode_at(elem, depth + 1)?;
                }
                Ok(())
            }
            Value::Map(entries) => {
                self.push_count(entries.len());
                for (key, val) in entries {
                    self.encode_at(key, depth + 1)?;
                    self.encode_at(val, depth + 1)?;
                }
                Ok(())
            }
            Value::Boxed(Some(inner)) => self.encode_at(inner, depth + 1),
            Value::Boxed(None) => Err(Error::precondition(
                "cannot encode an absent owning reference",
            )),
            Value::BoxedSlice(elems) => {
                self.push_count(elems.len());
                for elem in elems {
                    self.encode_at(elem, depth + 1)?;
                }
                Ok(())
            }
            Value::RawSlice { elems, len } => {
                if elems.len() != *len {
                    return Err(Error::precondition(format!(
                        "declared view length {} does not match {} available elements",
                        len,
                        elems.len()
                    )));
                }
                self.push_count(*len);
                for elem in elems {
                    self.encode_at(elem, depth + 1)?;
                }
                Ok(())
            }
        }
    }

    fn push_scalar(&mut self, scalar: &Scalar) -> Result<()> {
        if let Scalar::Text(text) = scalar {
            if text.is_empty() {
                return Err(Error::precondition(
                    "empty text has no token representation in the flat stream",
                ));
            }
            if text.contains(self.options.delimiter.as_char()) {
                return Err(Error::precondition(format!(
                    "text {:?} contains the active delimiter and cannot be tokenized",
                    text
                )));
            }
        }
        // Display for f64 prints the shortest representation that parses
        // back to the same bits, so scalar tokens round-trip exactly.
        let _ = write!(self.output, "{}", scalar);
        self.output.push(self.options.delimiter.as_char());
        Ok(())
    }

    fn push_count(&mut self, count: usize) {
        let _ = write!(self.output, "{}", count);
        self.output.push(self.options.delimiter.as_char());
    }
}

/// Decodes values from a borrowed token stream, directed by a [`Shape`].
pub struct Decoder<'de> {
    input: &'de str,
    position: usize,
    options: FlatOptions,
}

impl<'de> Decoder<'de> {
    /// Creates a decoder with default options.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(input: &'de str) -> Self {
        Self::with_options(input, FlatOptions::default())
    }

    /// Creates a decoder with explicit options. The delimiter must match the
    /// one the stream was encoded with.
    pub fn with_options(input: &'de str, options: FlatOptions) -> Self {
        Decoder {
            input,
            position: 0,
            options,
        }
    }

    /// Decodes one value of the declared shape from the current position.
    ///
    /// # Errors
    ///
    /// [`Error::MalformedToken`] when a token fails to parse as the expected
    /// scalar or count; [`Error::UnexpectedEnd`] on a truncated stream;
    /// [`Error::Precondition`] when a view's declared length disagrees with
    /// the recorded one; [`Error::DepthLimit`] past the nesting budget.
    pub fn decode(&mut self, shape: &Shape) -> Result<Value> {
        self.decode_at(shape, 0)
    }

    /// Verifies that nothing but delimiters remains in the input.
    pub fn finish(&mut self) -> Result<()> {
        self.skip_delimiters();
        if self.position < self.input.len() {
            return Err(Error::structure_mismatch(
                "end of input",
                format!("trailing input at offset {}", self.position),
            ));
        }
        Ok(())
    }

    fn decode_at(&mut self, shape: &Shape, depth: usize) -> Result<Value> {
        if depth > self.options.max_depth {
            return Err(Error::DepthLimit(self.options.max_depth));
        }
        match shape {
            Shape::Scalar(kind) => Ok(Value::Scalar(self.read_scalar(*kind)?)),
            Shape::Pair(first, second) => {
                let a = self.decode_at(first, depth + 1)?;
                let b = self.decode_at(second, depth + 1)?;
                Ok(Value::pair(a, b))
            }
            Shape::Seq(elem) => {
                let count = self.read_count()?;
                let mut elems = Vec::with_capacity(count.min(PREALLOC_CAP));
                for _ in 0..count {
                    elems.push(self.decode_at(elem, depth + 1)?);
                }
                Ok(Value::Seq(elems))
            }
            Shape::Set(elem) => {
                let count = self.read_count()?;
                let mut elems = BTreeSet::new();
                // Duplicate encodings collapse here by the container's own
                // semantics, not by codec special-casing.
                for _ in 0..count {
                    elems.insert(self.decode_at(elem, depth + 1)?);
                }
                Ok(Value::Set(elems))
            }
            Shape::Map(key, value) => {
                let count = self.read_count()?;
                let mut entries = BTreeMap::new();
                for _ in 0..count {
                    let k = self.decode_at(key, depth + 1)?;
                    let v = self.decode_at(value, depth + 1)?;
                    entries.insert(k, v);
                }
                Ok(Value::Map(entries))
            }
            Shape::Boxed(pointee) => {
                // Always allocates exactly one fresh instance.
                let inner = self.decode_at(pointee, depth + 1)?;
                Ok(Value::boxed(inner))
            }
            Shape::BoxedSlice(elem) => {
                let count = self.read_count()?;
                let mut elems = Vec::with_capacity(count.min(PREALLOC_CAP));
                for _ in 0..count {
                    elems.push(self.decode_at(elem, depth + 1)?);
                }
                Ok(Value::BoxedSlice(elems))
            }
            Shape::RawSlice { elem, len } => {
                let recorded = self.read_count()?;
                if recorded != *len {
                    return Err(Error::precondition(format!(
                        "declared view length {} does not match recorded length {}",
                        len, recorded
                    )));
                }
                let mut elems = Vec::with_capacity((*len).min(PREALLOC_CAP));
                for _ in 0..*len {
                    elems.push(self.decode_at(elem, depth + 1)?);
                }
                Ok(Value::RawSlice { elems, len: *len })
            }
        }
    }

    fn skip_delimiters(&mut self) {
        let delim = self.options.delimiter.as_char();
        while self.input[self.position..].starts_with(delim) {
            self.position += delim.len_utf8();
        }
    }

    fn read_token(&mut self) -> Result<&'de str> {
        self.skip_delimiters();
        if self.position >= self.input.len() {
            return Err(Error::unexpected_end("another token"));
        }
        let delim = self.options.delimiter.as_char();
        let rest = &self.input[self.position..];
        let end = rest.find(delim).unwrap_or(rest.len());
        let token = &rest[..end];
        self.position += end;
        Ok(token)
    }

    fn read_scalar(&mut self, kind: ScalarKind) -> Result<Scalar> {
        let offset = self.position;
        let token = self.read_token()?;
        kind.parse(token)
            .ok_or_else(|| Error::malformed_token(kind.name(), token, offset))
    }

    fn read_count(&mut self) -> Result<usize> {
        let offset = self.position;
        let token = self.read_token()?;
        token
            .parse::<usize>()
            .map_err(|_| Error::malformed_token("count", token, offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(value: &Value) -> String {
        let mut encoder = Encoder::new(FlatOptions::default());
        encoder.encode(value).unwrap();
        encoder.into_inner()
    }

    #[test]
    fn seq_layout() {
        let value = Value::seq(vec![Value::from(1), Value::from(2), Value::from(3)]);
        assert_eq!(encode(&value), "3 1 2 3 ");
    }

    #[test]
    fn pair_layout() {
        let value = Value::pair(Value::from(5), Value::from("hi"));
        assert_eq!(encode(&value), "5 hi ");
    }

    #[test]
    fn boxed_is_transparent() {
        let value = Value::boxed(Value::from(7));
        assert_eq!(encode(&value), "7 ");
    }

    #[test]
    fn absent_reference_is_rejected() {
        let mut encoder = Encoder::new(FlatOptions::default());
        let err = encoder.encode(&Value::absent()).unwrap_err();
        assert!(matches!(err, Error::Precondition(_)));
        assert!(encoder.into_inner().is_empty());
    }

    #[test]
    fn text_containing_delimiter_is_rejected() {
        let mut encoder = Encoder::new(FlatOptions::default());
        let err = encoder.encode(&Value::from("two words")).unwrap_err();
        assert!(matches!(err, Error::Precondition(_)));
    }

    #[test]
    fn truncated_stream_errors() {
        let shape = Shape::seq(Shape::scalar(ScalarKind::Int));
        let mut decoder = Decoder::from_str("3 1 2 ");
        let err = decoder.decode(&shape).unwrap_err();
        assert!(matches!(err, Error::UnexpectedEnd { .. }));
    }

    #[test]
    fn malformed_count_errors() {
        let shape = Shape::seq(Shape::scalar(ScalarKind::Int));
        let mut decoder = Decoder::from_str("many 1 2 ");
        let err = decoder.decode(&shape).unwrap_err();
        assert!(matches!(err, Error::MalformedToken { expected: "count", .. }));
    }

    #[test]
    fn depth_budget_is_enforced() {
        let mut value = Value::from(1);
        for _ in 0..4 {
            value = Value::seq(vec![value]);
        }
        let options = FlatOptions::new().with_max_depth(2);
        let mut encoder = Encoder::new(options);
        let err = encoder.encode(&value).unwrap_err();
        assert!(matches!(err, Error::DepthLimit(2)));
    }
}
