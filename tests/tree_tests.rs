//! Layout and malformed-input checks for the attributed-tree form.

use biform::{tree, Element, Error, Shape, ScalarKind, Value};

fn int() -> Shape {
    Shape::scalar(ScalarKind::Int)
}

fn text() -> Shape {
    Shape::scalar(ScalarKind::Text)
}

#[test]
fn test_map_node_layout() {
    // {"a": 1, "b": 2} becomes a size="2" container of entry nodes, each
    // holding first/second children, in ascending key order.
    let value = Value::map(vec![
        (Value::from("b"), Value::from(2)),
        (Value::from("a"), Value::from(1)),
    ]);
    let node = tree::encode_element("table", &value).unwrap();

    assert_eq!(node.attribute("size"), Some("2"));
    assert_eq!(node.children().len(), 2);

    let entry_names: Vec<_> = node.children().iter().map(Element::name).collect();
    assert_eq!(entry_names, vec!["map_0", "map_1"]);

    let first_entry = &node.children()[0];
    assert_eq!(first_entry.child("first").and_then(|c| c.attribute("val")), Some("a"));
    assert_eq!(first_entry.child("second").and_then(|c| c.attribute("val")), Some("1"));

    let second_entry = &node.children()[1];
    assert_eq!(second_entry.child("first").and_then(|c| c.attribute("val")), Some("b"));
    assert_eq!(second_entry.child("second").and_then(|c| c.attribute("val")), Some("2"));

    let back = tree::decode_element(&node, &Shape::map(text(), int())).unwrap();
    assert_eq!(back, value);
}

#[test]
fn test_pair_children_are_named_first_and_second() {
    let value = Value::pair(Value::from(5), Value::from("hi"));
    let node = tree::encode_element("p", &value).unwrap();

    let names: Vec<_> = node.children().iter().map(Element::name).collect();
    assert_eq!(names, vec!["first", "second"]);

    // Wrong child names are a structure mismatch on decode.
    let mut forged = Element::new("p");
    let mut a = Element::new("left");
    a.set_attribute("val", "5");
    let mut b = Element::new("second");
    b.set_attribute("val", "hi");
    forged.append_child(a);
    forged.append_child(b);

    let err = tree::decode_element(&forged, &Shape::pair(int(), text())).unwrap_err();
    assert!(matches!(err, Error::StructureMismatch { .. }));
}

#[test]
fn test_size_attribute_precedes_preallocation() {
    let value = Value::seq((0..5).map(Value::from).collect());
    let node = tree::encode_element("xs", &value).unwrap();
    assert_eq!(node.attribute("size"), Some("5"));

    // Tampering with the recorded size must be detected.
    let mut tampered = node.clone();
    tampered.set_attribute("size", "4");
    let err = tree::decode_element(&tampered, &Shape::seq(int())).unwrap_err();
    assert!(matches!(err, Error::StructureMismatch { .. }));
}

#[test]
fn test_missing_val_attribute_is_a_structure_mismatch() {
    let node = Element::new("leaf");
    let err = tree::decode_element(&node, &int()).unwrap_err();
    assert!(matches!(err, Error::StructureMismatch { .. }));
}

#[test]
fn test_unparseable_val_attribute_is_a_malformed_token() {
    let mut node = Element::new("leaf");
    node.set_attribute("val", "not-a-number");
    let err = tree::decode_element(&node, &int()).unwrap_err();
    assert!(matches!(err, Error::MalformedToken { .. }));
}

#[test]
fn test_unparseable_size_attribute_is_a_malformed_token() {
    let mut node = Element::new("xs");
    node.set_attribute("size", "several");
    let err = tree::decode_element(&node, &Shape::seq(int())).unwrap_err();
    assert!(matches!(err, Error::MalformedToken { .. }));
}

#[test]
fn test_boxed_pointee_is_the_named_node() {
    let xml = biform::to_xml_string("answer", &Value::boxed(Value::from(42))).unwrap();
    assert!(xml.contains(r#"<answer val="42"/>"#), "document was: {}", xml);
}

#[test]
fn test_raw_slice_size_records_declared_length() {
    let value = Value::raw_slice(vec![Value::from(1), Value::from(2), Value::from(3)], 3);
    let node = tree::encode_element("window", &value).unwrap();
    assert_eq!(node.attribute("size"), Some("3"));

    let names: Vec<_> = node.children().iter().map(Element::name).collect();
    assert_eq!(names, vec!["view_0", "view_1", "view_2"]);

    // A different declared length on decode is a precondition violation.
    let err = tree::decode_element(&node, &Shape::raw_slice(int(), 2)).unwrap_err();
    assert!(matches!(err, Error::Precondition(_)));
}

#[test]
fn test_text_with_spaces_survives_the_tree_form() {
    // The flat stream cannot carry delimiter characters, but attributes can.
    let value = Value::from("several words, even & punctuation");
    let xml = biform::to_xml_string("note", &value).unwrap();
    let back = biform::from_xml_str(&xml, "note", &text()).unwrap();
    assert_eq!(back, value);
}

#[test]
fn test_empty_containers_in_the_tree_form() {
    let value = Value::seq(vec![]);
    let node = tree::encode_element("xs", &value).unwrap();
    assert_eq!(node.attribute("size"), Some("0"));
    assert!(node.children().is_empty());
    assert_eq!(tree::decode_element(&node, &Shape::seq(int())).unwrap(), value);
}

#[test]
fn test_document_root_holds_named_values() {
    let xml = biform::to_xml_string("numbers", &Value::seq(vec![Value::from(1)])).unwrap();
    let root = Element::parse(&xml).unwrap();
    assert_eq!(root.name(), "serialization");
    assert!(root.child("numbers").is_some());
}

#[test]
fn test_unparseable_document_is_a_backing_file_error() {
    let err = biform::from_xml_str("<serialization><oops", "oops", &int()).unwrap_err();
    assert!(matches!(err, Error::BackingFile(_)));
}
