//! Configuration for the flat token-stream codec.
//!
//! The delimiter and recursion budget are explicit per-call values passed
//! into each encode/decode, never process-wide state:
//!
//! - [`FlatOptions`]: main configuration struct
//! - [`Delimiter`]: choice of token separator (space, tab, or comma)
//!
//! ## Examples
//!
//! ```rust
//! use biform::{to_flat_string_with_options, Delimiter, FlatOptions, Value};
//!
//! let value = Value::seq(vec![Value::from(1), Value::from(2)]);
//!
//! let options = FlatOptions::new().with_delimiter(Delimiter::Comma);
//! let flat = to_flat_string_with_options(&value, &options).unwrap();
//! assert_eq!(flat, "2,1,2,");
//! ```

/// Token separator for the flat stream.
///
/// The grammar writes one delimiter after every token; a text scalar must
/// not itself contain the active delimiter (there is no escaping).
///
/// # Examples
///
/// ```rust
/// use biform::Delimiter;
///
/// assert_eq!(Delimiter::Space.as_char(), ' ');
/// assert_eq!(Delimiter::Tab.as_char(), '\t');
/// assert_eq!(Delimiter::Comma.as_char(), ',');
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Delimiter {
    #[default]
    Space,
    Tab,
    Comma,
}

impl Delimiter {
    /// Returns the delimiter character.
    #[must_use]
    pub const fn as_char(&self) -> char {
        match self {
            Delimiter::Space => ' ',
            Delimiter::Tab => '\t',
            Delimiter::Comma => ',',
        }
    }

    /// Returns the string representation of this delimiter.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Delimiter::Space => " ",
            Delimiter::Tab => "\t",
            Delimiter::Comma => ",",
        }
    }
}

/// Configuration for flat encoding and decoding.
///
/// # Examples
///
/// ```rust
/// use biform::{Delimiter, FlatOptions};
///
/// let options = FlatOptions::new()
///     .with_delimiter(Delimiter::Tab)
///     .with_max_depth(32);
/// assert_eq!(options.delimiter, Delimiter::Tab);
/// ```
#[derive(Clone, Debug)]
pub struct FlatOptions {
    pub delimiter: Delimiter,
    /// Upper bound on value nesting accepted by encode and decode.
    pub max_depth: usize,
}

impl Default for FlatOptions {
    fn default() -> Self {
        FlatOptions {
            delimiter: Delimiter::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Default recursion budget shared by both codecs.
pub(crate) const DEFAULT_MAX_DEPTH: usize = 128;

impl FlatOptions {
    /// Creates default options (single-space delimiter, depth budget 128).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the token delimiter.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets the recursion budget. Nesting beyond this depth is rejected
    /// with [`Error::DepthLimit`](crate::Error::DepthLimit) instead of
    /// exhausting the host stack.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
