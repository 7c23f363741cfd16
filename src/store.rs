//! Scoped persistence for encoded documents.
//!
//! An [`Archive`] owns one backing XML file for the duration of a scope:
//! opening loads the existing document (or starts a fresh one when the file
//! does not exist yet), values are written and read by name against the
//! document root, and saving is an explicit operation: [`Archive::save`],
//! [`Archive::close`], or the [`with_archive`] combinator, which guarantees
//! a save attempt on every exit path including when the closure errors.
//!
//! An existing file that fails to parse is a propagated
//! [`Error::BackingFile`](crate::Error::BackingFile), never a process abort.
//!
//! Concurrent access to the same backing file is the caller's
//! responsibility; an archive assumes exclusive access for its lifetime.
//!
//! ## Examples
//!
//! ```rust,no_run
//! use biform::{with_archive, Shape, ScalarKind, Value};
//!
//! let shape = Shape::seq(Shape::scalar(ScalarKind::Int));
//! with_archive("state.xml", |archive| {
//!     archive.write("numbers", &Value::seq(vec![Value::from(1), Value::from(2)]))?;
//!     let back = archive.read("numbers", &shape)?;
//!     assert!(back.is_seq());
//!     Ok(())
//! }).unwrap();
//! ```

use crate::doc::Element;
use crate::error::{Error, Result};
use crate::shape::Shape;
use crate::tree::{self, ROOT_ELEMENT};
use crate::value::Value;
use std::path::{Path, PathBuf};

/// One backing document, open for reading and writing named values.
#[derive(Debug)]
pub struct Archive {
    path: PathBuf,
    root: Element,
}

impl Archive {
    /// Opens the document at `path`, loading it when the file exists and
    /// starting a fresh root otherwise.
    ///
    /// # Errors
    ///
    /// [`Error::BackingFile`] when an existing file cannot be parsed,
    /// [`Error::Io`] when it cannot be read.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let root = if path.exists() {
            Element::load(&path)?
        } else {
            Element::new(ROOT_ELEMENT)
        };
        Ok(Archive { path, root })
    }

    /// Opens `path` with a fresh root, discarding any existing content on
    /// the next save.
    pub fn create(path: impl AsRef<Path>) -> Self {
        Archive {
            path: path.as_ref().to_path_buf(),
            root: Element::new(ROOT_ELEMENT),
        }
    }

    /// The backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The document root.
    #[must_use]
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Encodes a value under the root as one element named `name`.
    pub fn write(&mut self, name: &str, value: &Value) -> Result<()> {
        tree::encode_into(&mut self.root, name, value)
    }

    /// Decodes the first element named `name` under the root.
    ///
    /// # Errors
    ///
    /// [`Error::StructureMismatch`] when no such element exists, plus any
    /// tree-decode error.
    pub fn read(&self, name: &str, shape: &Shape) -> Result<Value> {
        let node = self.root.child(name).ok_or_else(|| {
            Error::structure_mismatch(
                format!("an element named {:?} under the document root", name),
                format!("<{}> with no such child", self.root.name()),
            )
        })?;
        tree::decode_element(node, shape)
    }

    /// Persists the document to the backing file.
    pub fn save(&self) -> Result<()> {
        self.root.save(&self.path)
    }

    /// Saves and consumes the archive.
    pub fn close(self) -> Result<()> {
        self.save()
    }
}

/// Runs `f` against an archive opened at `path`, saving on every exit path.
///
/// The save happens whether or not the closure succeeds; a closure error
/// takes precedence over a save error when both occur.
pub fn with_archive<T>(
    path: impl AsRef<Path>,
    f: impl FnOnce(&mut Archive) -> Result<T>,
) -> Result<T> {
    let mut archive = Archive::open(path)?;
    let outcome = f(&mut archive);
    let saved = archive.save();
    let value = outcome?;
    saved?;
    Ok(value)
}
