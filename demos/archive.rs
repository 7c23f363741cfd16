//! Writing and reading a persisted document with scoped save semantics.
//!
//! Run with: cargo run --example archive

use biform::{with_archive, Shape, ScalarKind, Value};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let path = std::env::temp_dir().join("biform-demo.xml");
    let shape = Shape::seq(Shape::scalar(ScalarKind::Int));

    // First scope: write and save (the save happens on scope exit even if
    // the closure had failed).
    with_archive(&path, |archive| {
        archive.write("readings", &Value::seq(vec![
            Value::from(17),
            Value::from(21),
            Value::from(19),
        ]))
    })?;

    // Second scope: reopen the saved file and read the value back.
    let readings = with_archive(&path, |archive| archive.read("readings", &shape))?;
    println!("restored: {:?}", readings);

    std::fs::remove_file(&path)?;
    Ok(())
}
