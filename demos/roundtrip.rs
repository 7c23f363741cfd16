//! Basic encode/decode in both representations.
//!
//! Run with: cargo run --example roundtrip

use biform::{from_flat_str, from_xml_str, to_flat_string, to_xml_string};
use biform::{Shape, ScalarKind, Value};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let inventory = Value::map(vec![
        (Value::from("widgets"), Value::from(12)),
        (Value::from("gadgets"), Value::from(3)),
    ]);
    let shape = Shape::map(
        Shape::scalar(ScalarKind::Text),
        Shape::scalar(ScalarKind::Int),
    );

    // Flat token stream
    let flat = to_flat_string(&inventory)?;
    println!("flat stream: {:?}", flat);
    let back = from_flat_str(&flat, &shape)?;
    assert_eq!(back, inventory);

    // Attributed tree
    let xml = to_xml_string("inventory", &inventory)?;
    println!("tree form:\n{}", xml);
    let back = from_xml_str(&xml, "inventory", &shape)?;
    assert_eq!(back, inventory);

    println!("round trips agree");
    Ok(())
}
