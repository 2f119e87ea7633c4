// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![allow(clippy::uninlined_format_args)] // Test/bench code readability over pedantic
#![allow(clippy::missing_panics_doc)] // Tests/examples panic on failure
#![allow(dead_code)] // Fixture fields only read through descriptors

//! Integration tests for `#[derive(Introspect)]` and `#[accessors]`.

use tuplebind::{
    accessors, AccessSource, BindConfig, GetterConvention, Introspect, MemberCache, Resolver,
    Schema, TuplePacker, TypeDescriptor, Value,
};

#[derive(Introspect)]
#[introspect(name = "Person")]
struct PersonRecord {
    id: i32,
    #[introspect(rename = "name")]
    display_name: String,
    #[introspect(skip)]
    cache: Vec<u8>,
    nickname: Option<String>,
}

#[derive(Introspect)]
#[introspect(accessors)]
struct Account {
    owner: String,
    balance: i64,
    r#type: u8,
}

#[accessors]
impl Account {
    #[accessor(name = "getBalance")]
    fn balance_in_cents(&self) -> i64 {
        self.balance * 100
    }

    fn owner(&self) -> &str {
        "masked"
    }

    fn interest(&self, rate: f64, years: u32) -> f64 {
        self.balance as f64 * rate * f64::from(years)
    }

    #[accessor(skip)]
    #[allow(non_snake_case)]
    fn getOwner(&self) -> String {
        self.owner.to_uppercase()
    }

    fn touch(&self) {}

    #[allow(clippy::needless_arbitrary_self_type)]
    fn currency(self: &Self) -> &'static str {
        "EUR"
    }

    fn open(owner: &str) -> Self {
        Self {
            owner: owner.into(),
            balance: 0,
            r#type: 0,
        }
    }
}

#[derive(Introspect)]
struct Wrapper<T: tuplebind::ToValue> {
    inner: T,
}

#[derive(Introspect)]
struct Marker;

fn names<T>(desc: &TypeDescriptor<T>) -> (Vec<String>, Vec<String>) {
    (
        desc.accessors().iter().map(|a| a.name().to_string()).collect(),
        desc.fields().iter().map(|f| f.name().to_string()).collect(),
    )
}

#[test]
fn test_field_attributes() {
    let desc = PersonRecord::type_descriptor();
    assert_eq!(desc.name(), "Person");
    assert_eq!(desc.qualified_name(), "Person");
    let (accessors, fields) = names(&desc);
    assert!(accessors.is_empty());
    assert_eq!(fields, vec!["id", "name", "nickname"]);

    let record = PersonRecord {
        id: 1,
        display_name: "Ada".into(),
        cache: vec![1, 2],
        nickname: None,
    };
    let read = |name: &str| {
        let field = desc.field(name).expect("declared");
        let packer = TuplePacker::<PersonRecord>::with_resolver(
            Schema::from([name]),
            &Resolver::new(&MemberCache::new(), BindConfig::default()),
        )
        .expect("resolves");
        assert_eq!(field.name(), name);
        packer.pack(&record)[0].clone()
    };
    assert_eq!(read("name"), Value::String("Ada".into()));
    assert_eq!(read("nickname"), Value::Null);
    assert!(desc.field("cache").is_none());
    assert!(desc.field("display_name").is_none());
}

#[test]
fn test_accessor_declarations() {
    let desc = Account::type_descriptor();
    let (accessors, fields) = names(&desc);
    assert_eq!(accessors, vec!["getBalance", "owner", "interest", "currency"]);
    assert_eq!(fields, vec!["owner", "balance", "type"]);

    let interest = &desc.accessors()[2];
    assert_eq!(interest.param_count(), 2);
    assert!(!interest.is_nullary());
    assert!(desc.accessor("interest").is_none());
}

#[test]
fn test_resolution_through_generated_members() {
    let cache = MemberCache::new();
    let resolver = Resolver::new(&cache, BindConfig::default());
    let schema = Schema::from(["balance", "owner", "type"]);
    let packer =
        TuplePacker::<Account>::with_resolver(schema, &resolver).expect("all fields resolve");

    let sources: Vec<_> = packer.bindings().iter().map(|b| b.source()).collect();
    assert_eq!(
        sources,
        vec![AccessSource::Getter, AccessSource::Accessor, AccessSource::Field]
    );

    let account = Account::open("bob");
    let tuple = packer.pack(&Account {
        balance: 3,
        ..account
    });
    assert_eq!(tuple.to_string(), "(300, \"masked\", 0)");
}

#[test]
fn test_interest_not_bound() {
    let cache = MemberCache::new();
    let resolver = Resolver::new(&cache, BindConfig::default());
    let err = TuplePacker::<Account>::with_resolver(Schema::from(["interest"]), &resolver)
        .expect_err("parameterized accessor is never a candidate");
    assert_eq!(err, tuplebind::Error::unresolved("interest", "Account"));
}

#[test]
fn test_generic_and_unit_structs() {
    let desc = Wrapper::<u16>::type_descriptor();
    assert_eq!(desc.name(), "Wrapper");
    assert_eq!(
        desc.qualified_name(),
        std::any::type_name::<Wrapper<u16>>()
    );
    let cache = MemberCache::new();
    let snake = BindConfig::default().with_getter_convention(GetterConvention::SnakeCase);
    let packer = TuplePacker::<Wrapper<u16>>::with_resolver(
        Schema::from(["inner"]),
        &Resolver::new(&cache, snake),
    )
    .expect("field");
    assert_eq!(packer.pack(&Wrapper { inner: 9 })[0], Value::U16(9));

    let marker = Marker::type_descriptor();
    assert!(marker.fields().is_empty());
    assert!(marker.accessors().is_empty());
}
