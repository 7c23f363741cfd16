//! Wire Format Reference
//!
//! This module documents the two encoded representations produced by this
//! library. It contains no code; it exists so the formats are specified in
//! one place, next to the implementation.
//!
//! # Overview
//!
//! Both representations carry the same information and obey the same two
//! rules:
//!
//! 1. Every variable-length container records its element count *before*
//!    any element bodies, so decoding can pre-allocate.
//! 2. Owning single references are transparent: the pointee is encoded in
//!    place, with no tag and no representation for absence.
//!
//! Neither representation is self-describing about shapes; decoding is
//! directed by a declared [`Shape`](crate::Shape).
//!
//! # Flat Token Stream
//!
//! ASCII text; every token is followed by exactly one delimiter character
//! (a single space unless configured otherwise). There is no escaping, so a
//! text scalar must not contain the active delimiter.
//!
//! | Shape | Tokens |
//! |-------|--------|
//! | Scalar | one token of `Display` text |
//! | Pair | `first` `second` |
//! | Sequence / Set | `count`, then `count` elements in iteration order |
//! | Mapping | `count`, then `count` key/value token runs, key-ascending |
//! | Owning single | the pointee's tokens, nothing else |
//! | Owning array | `count`, then `count` elements |
//! | Array view | declared `len`, then `len` elements |
//!
//! ## Examples
//!
//! A sequence of three integers:
//!
//! ```text
//! 3 1 2 3
//! ```
//!
//! A mapping `{"a": 1, "b": 2}` (keys sort ascending):
//!
//! ```text
//! 2 a 1 b 2
//! ```
//!
//! A pair of an integer and text:
//!
//! ```text
//! 5 hi
//! ```
//!
//! # Attributed Tree
//!
//! An XML document with a single root element, conventionally named
//! `serialization`. Every value is one element:
//!
//! - leaf elements hold their scalar text in a `val` attribute
//! - container elements carry a `size` attribute equal to the element
//!   count
//! - pair elements hold exactly two children named `first` and `second`
//! - positional children are named `<shape>_<index>`: `seq_0`, `set_1`,
//!   `map_2`, `slice_0`, `view_3`
//! - mapping entries are `map_<i>` children, each holding `first` and
//!   `second` children, in ascending key order
//!
//! ## Example
//!
//! The mapping `{"a": 1, "b": 2}` written under the name `table`:
//!
//! ```text
//! <serialization>
//!   <table size="2">
//!     <map_0>
//!       <first val="a"/>
//!       <second val="1"/>
//!     </map_0>
//!     <map_1>
//!       <first val="b"/>
//!       <second val="2"/>
//!     </map_1>
//!   </table>
//! </serialization>
//! ```
//!
//! # Determinism
//!
//! Encoding the same value twice produces byte-identical output in both
//! representations: sets and mappings iterate in their containers'
//! ascending order, attribute order is insertion order, and scalar text
//! comes from `Display` (which, for floats, prints the shortest string
//! that parses back to the same bits).
//!
//! # Error Conditions
//!
//! | Condition | Error |
//! |-----------|-------|
//! | token/attribute fails to parse as the expected scalar | `MalformedToken` |
//! | `size` disagrees with actual children, wrong pair child names | `StructureMismatch` |
//! | stream or child list exhausted mid-decode | `UnexpectedEnd` |
//! | backing XML cannot be parsed | `BackingFile` |
//! | absent owning reference, view length disagreement, delimiter inside text | `Precondition` |
//! | nesting beyond the configured budget | `DepthLimit` |
