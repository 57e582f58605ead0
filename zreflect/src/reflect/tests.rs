//! Unit tests for the built-in `Reflect` implementations.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use indexmap::IndexMap;
use serde_json::json;

use crate::{Kind, Reflect, Typed, Value};

#[test]
fn primitive_kinds() {
    assert_eq!(().kind(), Kind::Unit);
    assert_eq!(true.kind(), Kind::Bool);
    assert_eq!((-1i8).kind(), Kind::Int);
    assert_eq!(7usize.kind(), Kind::Uint);
    assert_eq!(1.5f32.kind(), Kind::Float);
    assert_eq!('z'.kind(), Kind::Char);
    assert_eq!("text".kind(), Kind::String);
    assert_eq!(<String as Typed>::KIND, Kind::String);
    assert_eq!(<u128 as Typed>::KIND, Kind::Uint);
}

#[test]
fn assignment_requires_exact_type() {
    let mut count = 1u32;
    count.assign(Value::new(5u32)).unwrap();
    assert_eq!(count, 5);

    // No numeric conversion.
    let rejected = count.assign(Value::new(6u64)).unwrap_err();
    assert_eq!(rejected.downcast_ref::<u64>(), Some(&6));
    assert_eq!(count, 5);

    // `&'static str` and `String` are distinct types of the same kind.
    let mut name = String::from("a");
    assert!(name.assign(Value::new("b")).is_err());
    name.assign(Value::new(String::from("b"))).unwrap();
    assert_eq!(name, "b");
}

#[test]
fn sequences() {
    let list = vec![String::from("a"), String::from("b")];
    assert_eq!(list.kind(), Kind::Sequence);
    assert_eq!(<Vec<u8> as Typed>::KIND, Kind::Sequence);
    assert_eq!(list.to_json(), json!(["a", "b"]));

    let snapshot = list.clone_value();
    assert_eq!(snapshot.downcast_ref::<Vec<String>>(), Some(&list));
    assert_eq!(format!("{snapshot:?}"), r#"["a", "b"]"#);

    let tags: BTreeSet<_> = ["b", "a", "b"].into_iter().collect();
    assert_eq!(tags.kind(), Kind::Sequence);
    assert_eq!(tags.to_json(), json!(["a", "b"]));
    assert_eq!(<HashSet<u8> as Typed>::KIND, Kind::Sequence);
    let mut ids = HashSet::from([1u8]);
    ids.assign(Value::new(HashSet::from([2u8, 3]))).unwrap();
    assert_eq!(ids, HashSet::from([2, 3]));
}

#[test]
fn maps() {
    let mut ports = BTreeMap::new();
    ports.insert(String::from("http"), 80u16);
    ports.insert(String::from("https"), 443u16);
    assert_eq!(ports.kind(), Kind::Map);
    assert_eq!(ports.to_json(), json!({ "http": 80, "https": 443 }));
    assert_eq!(format!("{:?}", ports.clone_value()), r#"{"http": 80, "https": 443}"#);

    let mut ordered = IndexMap::new();
    ordered.insert(String::from("z"), true);
    ordered.insert(String::from("a"), false);
    assert_eq!(format!("{:?}", Value::new(ordered)), r#"{"z": true, "a": false}"#);

    let mut map: HashMap<String, Vec<i32>> = HashMap::new();
    assert!(map.assign(Value::new(BTreeMap::<String, Vec<i32>>::new())).is_err());
}

#[derive(Clone, Debug)]
struct Unrenderable;

impl serde::Serialize for Unrenderable {
    fn serialize<S>(&self, _serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        Err(serde::ser::Error::custom("no JSON form"))
    }
}

impl_reflect!(Unrenderable => Kind::Opaque);

#[test_log::test]
fn failed_rendering_is_null() {
    assert_eq!(Unrenderable.kind(), Kind::Opaque);
    assert_eq!(Unrenderable.to_json(), json!(null));
    assert_eq!(Value::new(Unrenderable).to_json(), json!(null));
}

#[test]
fn wrappers() {
    let some = Some(4i16);
    assert_eq!(some.kind(), Kind::Option);
    assert_eq!(some.to_json(), json!(4));
    assert_eq!(None::<i16>.to_json(), json!(null));
    assert!(some.pointee().is_none());

    let mut boxed = Box::new(2.5f64);
    assert_eq!(boxed.kind(), Kind::Pointer);
    assert_eq!(boxed.pointee().map(Reflect::kind), Some(Kind::Float));
    boxed
        .pointee_mut()
        .unwrap()
        .assign(Value::new(3.5f64))
        .unwrap();
    assert_eq!(*boxed, 3.5);
}

#[test]
fn dynamic_values() {
    assert_eq!(<Value as Typed>::KIND, Kind::Dynamic);
    let mut any = Value::new(1u8);
    any.assign(Value::new(vec![true])).unwrap();
    assert_eq!(any.kind(), Kind::Sequence);
    assert_eq!(any.to_json(), json!([true]));
}
