#![allow(unused)]

use std::collections::HashMap;

use zreflect::{Kind, Record, Reflect, Reflection, Typed, Value};

#[derive(Clone, Reflect)]
struct Address {
    pub city: String,
}

#[derive(Clone, Reflect)]
#[zreflect(rename = "Customer", module = "crm::accounts::customers")]
struct CustomerRecord {
    /// The display name.
    /// Shown in listings.
    #[zreflect(rename = "displayName", tag(json = "name", json = "ignored"))]
    pub name: String,
    #[zreflect(embed)]
    pub address: Address,
    pub nickname: Option<String>,
    pub labels: HashMap<String, String>,
    pub extra: Value,
    pub parent: Option<Box<Address>>,
    pub(crate) score: u8,
    #[zreflect(skip)]
    pub cache: Vec<u8>,
    r#type: char,
}

#[derive(Clone, Reflect)]
struct Marker;

fn customer() -> CustomerRecord {
    CustomerRecord {
        name: String::from("Ana"),
        address: Address {
            city: String::from("Lisbon"),
        },
        nickname: None,
        labels: HashMap::new(),
        extra: Value::new(1u8),
        parent: None,
        score: 9,
        cache: Vec::new(),
        r#type: 'b',
    }
}

#[test]
fn record_info() {
    let customer = customer();
    let info = customer.record_info();
    assert_eq!(info.name(), "Customer");
    assert_eq!(info.module_path(), "crm::accounts::customers");
    assert_eq!(info.namespace(), "accounts.customers");
    assert_eq!(info.qualified_name(), "accounts.customers.Customer");

    let names: Vec<_> = info.fields().iter().map(|field| field.name()).collect();
    assert_eq!(
        names,
        [
            "displayName",
            "address",
            "nickname",
            "labels",
            "extra",
            "parent",
            "score",
            "type"
        ]
    );
    assert_eq!(<CustomerRecord as Typed>::KIND, Kind::Record);
    assert_eq!(customer.kind(), Kind::Record);
}

#[test]
fn field_metadata() {
    let customer = customer();
    let reflection = Reflection::new(&customer).unwrap();

    let name = reflection.field("displayName").unwrap();
    assert_eq!(name.docs(), [" The display name.", " Shown in listings."]);
    // The first of repeated keys wins.
    assert_eq!(name.tag("json"), "name");
    assert_eq!(name.tags().len(), 2);

    let address = reflection.field("address").unwrap();
    assert!(address.is_embedded());
    assert_eq!(address.kind(), Kind::Record);

    let kinds: Vec<_> = reflection.fields().map(|field| field.kind()).collect();
    assert_eq!(
        kinds,
        [
            Kind::String,
            Kind::Record,
            Kind::Option,
            Kind::Map,
            Kind::Dynamic,
            Kind::Option,
            Kind::Uint,
            Kind::Char
        ]
    );
    assert_eq!(
        reflection.field("labels").unwrap().type_name(),
        "HashMap<String, String>"
    );
    assert_eq!(
        reflection.field("parent").unwrap().type_name(),
        "Option<Box<Address>>"
    );

    // Only `pub` fields are exported.
    assert!(!reflection.field("score").unwrap().is_exported());
    assert!(!reflection.field("type").unwrap().is_exported());
    assert!(!reflection.has_field("cache"));
}

#[test]
fn dynamic_fields() {
    let mut customer = customer();
    let mut reflection = Reflection::new(&mut customer).unwrap();
    assert_eq!(
        reflection.get("extra").unwrap().unwrap().kind(),
        Kind::Uint
    );

    // A `Value` field takes any type, other fields only their own.
    reflection.set("extra", vec![1.5f64]).unwrap();
    reflection
        .set("nickname", Some(String::from("Nana")))
        .unwrap();
    assert!(reflection.set("nickname", String::from("Nana")).is_err());
    let address = Address {
        city: String::from("Porto"),
    };
    reflection.set("address", address).unwrap();
    drop(reflection);

    assert_eq!(customer.extra.downcast_ref::<Vec<f64>>(), Some(&vec![1.5]));
    assert_eq!(customer.nickname.as_deref(), Some("Nana"));
    assert_eq!(customer.address.city, "Porto");
}

#[test]
fn field_storage() {
    let mut customer = customer();
    assert_eq!(customer.field(0).unwrap().type_name(), "alloc::string::String");
    assert!(customer.field(8).is_none());

    customer
        .field_mut(6)
        .unwrap()
        .assign(Value::new(10u8))
        .unwrap();
    assert_eq!(customer.score, 10);
}

#[test]
fn json_and_debug() {
    let customer = customer();
    let json = customer.to_json();
    assert_eq!(json["displayName"], "Ana");
    assert_eq!(json["address"]["city"], "Lisbon");
    assert_eq!(json["extra"], 1);
    assert!(json.get("score").is_none());

    let address = Address {
        city: String::from("Faro"),
    };
    assert_eq!(
        format!("{:?}", address.clone_value()),
        r#"Address { city: "Faro" }"#
    );
}

#[test]
fn unit_struct() {
    let reflection = Reflection::new(&Marker).unwrap();
    assert_eq!(reflection.fields().count(), 0);
    assert_eq!(reflection.methods().count(), 0);
    assert_eq!(reflection.name(), "Marker");
    assert_eq!(reflection.namespace(), "");
}

mod renamed_crate {
    use zreflect as zr;

    #[derive(Clone, zr::Reflect)]
    #[zreflect(crate = "zr")]
    pub struct Settings {
        pub verbose: bool,
    }

    #[test]
    fn crate_path() {
        let settings = Settings { verbose: true };
        let reflection = zr::Reflection::new(&settings).unwrap();
        assert_eq!(reflection.namespace(), "renamed_crate");
        assert_eq!(
            reflection.get("verbose").unwrap().unwrap().downcast_ref(),
            Some(&true)
        );
    }
}
