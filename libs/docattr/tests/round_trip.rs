use docattr::{AttributeValue, List, Map, Scan, Set, Value, decode, wire};
use pretty_assertions::assert_eq;
use rstest::rstest;

/// Encode, push through the JSON wire form, decode and scan back.
fn list_round_trip(list: &List) -> List {
    let text = wire::to_json_string(&list.value().unwrap()).unwrap();
    let raw = decode::from_attribute_value(wire::from_json_str(&text).unwrap()).unwrap();
    let mut back = List::new();
    back.scan(raw).unwrap();
    back
}

fn map_round_trip(map: &Map) -> Map {
    let text = wire::to_json_string(&map.value().unwrap()).unwrap();
    let raw = decode::from_attribute_value(wire::from_json_str(&text).unwrap()).unwrap();
    let mut back = Map::new();
    back.scan(raw).unwrap();
    back
}

#[rstest]
#[case::scalars(
    List::from(vec![Value::from("a"), Value::Float(2.5), Value::Bool(true), Value::Null]),
    List::from(vec![Value::from("a"), Value::Float(2.5), Value::Bool(true), Value::Null]),
)]
#[case::integers_come_back_as_floats(
    List::from(vec![Value::from(1), Value::from(-7)]),
    List::from(vec![Value::Float(1.0), Value::Float(-7.0)]),
)]
#[case::typed_sets(
    List::from(vec![
        Value::from(Set::<String>::from(vec!["x".to_string(), "y".to_string()])),
        Value::from(Set::<i64>::from(vec![1, 2])),
        Value::from(Set::<f64>::from(vec![0.5])),
        Value::from(Set::<Vec<u8>>::from(vec![vec![0, 255]])),
    ]),
    List::from(vec![
        Value::from(Set::<String>::from(vec!["x".to_string(), "y".to_string()])),
        Value::from(Set::<i64>::from(vec![1, 2])),
        Value::from(Set::<f64>::from(vec![0.5])),
        Value::from(Set::<Vec<u8>>::from(vec![vec![0, 255]])),
    ]),
)]
#[case::whole_float_set_reads_back_as_int_set(
    List::from(vec![Value::from(Set::<f64>::from(vec![2.0, 3.0]))]),
    List::from(vec![Value::from(Set::<i64>::from(vec![2, 3]))]),
)]
#[case::binary_scalar(
    List::from(vec![Value::from(b"raw".to_vec())]),
    List::from(vec![Value::from(b"raw".to_vec())]),
)]
fn list_keeps_order_and_shape(#[case] list: List, #[case] expected: List) {
    assert_eq!(list_round_trip(&list), expected);
}

#[test]
fn nested_containers_round_trip() {
    let mut inner = Map::new();
    inner.insert("k", "v");
    inner.insert("ids", Set::<i64>::from(vec![4, 5]));

    let mut map = Map::new();
    map.insert("inner", inner.clone());
    map.insert(
        "items",
        List::from(vec![Value::from("first"), Value::from(inner.clone())]),
    );
    map.insert("flag", false);

    let back = map_round_trip(&map);
    assert_eq!(
        back.keys().collect::<Vec<_>>(),
        vec!["flag", "inner", "items"]
    );
    assert_eq!(back, map);
}

#[test]
fn empty_containers_round_trip() {
    assert_eq!(list_round_trip(&List::new()), List::new());
    assert_eq!(map_round_trip(&Map::new()), Map::new());
}

#[test]
fn wire_form_is_stable() {
    let mut map = Map::new();
    map.insert("a", 1);
    map.insert("b", Set::<String>::from(vec!["s".to_string()]));
    assert_eq!(
        wire::to_json_string(&map.value().unwrap()).unwrap(),
        r#"{"M":{"a":{"N":"1"},"b":{"SS":["s"]}}}"#
    );

    let decoded = wire::from_json_str(r#"{"M":{"a":{"N":"1"},"b":{"SS":["s"]}}}"#).unwrap();
    assert_eq!(decoded, map.value().unwrap());
    assert!(matches!(decoded, AttributeValue::M(_)));
}

#[test]
fn json_documents_scan_as_maps() {
    let raw = Value::from(serde_json::json!({
        "name": "widget",
        "dims": [1, 2.5],
        "meta": {"x": null}
    }));
    let mut map = Map::new();
    map.scan(raw).unwrap();

    assert_eq!(map["name"], Value::from("widget"));
    assert_eq!(
        map["dims"],
        Value::List(List::from(vec![Value::Float(1.0), Value::Float(2.5)]))
    );
    let meta: Map = [("x", Value::Null)].into_iter().collect();
    assert_eq!(map["meta"], Value::Map(meta));
}
