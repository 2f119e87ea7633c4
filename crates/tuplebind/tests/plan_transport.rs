// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![cfg(feature = "serde")]
#![allow(clippy::uninlined_format_args)] // Test/bench code readability over pedantic
#![allow(clippy::missing_panics_doc)] // Tests/examples panic on failure

//! Packers cross process boundaries as plans and are re-bound on arrival.

use tuplebind::{
    BindConfig, Error, GetterConvention, Introspect, MemberCache, PackStrategy, PackerFactory,
    PackerPlan, Schema, TuplePacker, TypeRegistry, Value,
};

// Explicit names keep the wire identity independent of the module path.
#[derive(Introspect)]
#[introspect(name = "Order")]
struct Order {
    order_id: u64,
    sku: String,
    quantity: u16,
}

#[derive(Introspect)]
#[introspect(name = "Refund")]
struct Refund {
    order_id: u64,
}

fn order() -> Order {
    Order {
        order_id: 11,
        sku: "A-1".into(),
        quantity: 3,
    }
}

#[test]
fn test_plan_wire_shape() {
    let snake = BindConfig::default().with_getter_convention(GetterConvention::SnakeCase);
    let plan = PackerPlan::new("Order", Schema::from(["sku", "quantity"]), snake);

    let json = serde_json::to_value(&plan).expect("serialize");
    assert_eq!(
        json,
        serde_json::json!({
            "type_name": "Order",
            "schema": ["sku", "quantity"],
            "config": { "getter_convention": "snake_case" }
        })
    );

    let back: PackerPlan = serde_json::from_value(json).expect("deserialize");
    assert_eq!(back, plan);
}

#[test]
fn test_missing_config_defaults() {
    let plan: PackerPlan =
        serde_json::from_str(r#"{"type_name":"Order","schema":["order_id"]}"#).expect("plan");
    assert_eq!(plan.config(), BindConfig::default());
}

#[test]
fn test_packer_rebinds_on_deserialize() {
    let packer = TuplePacker::<Order>::new(Schema::from(["order_id", "sku", "quantity"]))
        .expect("order schema");
    let wire = serde_json::to_string(&packer).expect("serialize");

    // The receiving side only ever sees the plan.
    let rebuilt: TuplePacker<Order> = serde_json::from_str(&wire).expect("rebind");
    assert_eq!(rebuilt.arity(), 3);
    assert_eq!(rebuilt.pack(&order()), packer.pack(&order()));
    assert_eq!(rebuilt.pack(&order())[1], Value::String("A-1".into()));
}

#[test]
fn test_rebind_rejects_stale_schema() {
    let json = r#"{"type_name":"Order","schema":["order_id","discount"]}"#;
    let err = serde_json::from_str::<TuplePacker<Order>>(json).expect_err("discount is gone");
    assert!(err.to_string().contains("discount"), "{}", err);
}

#[test]
fn test_rebind_rejects_other_type() {
    let cache = MemberCache::new();
    let factory = PackerFactory::with_cache(&cache, BindConfig::default());
    let plan = factory.plan::<Refund>(Schema::from(["order_id"]));

    let err = plan.bind::<Order>(&cache).expect_err("plan targets Refund");
    assert_eq!(
        err,
        Error::TypeMismatch {
            expected: "Refund".into(),
            found: "Order".into(),
        }
    );
}

#[test]
fn test_registry_checks_received_plans() {
    let cache = MemberCache::new();
    let registry = TypeRegistry::new();
    registry.register::<Order>(&cache).expect("order");
    registry.register::<Refund>(&cache).expect("refund");
    assert_eq!(registry.type_names(), vec!["Order", "Refund"]);

    let received: Vec<PackerPlan> = serde_json::from_str(
        r#"[
            {"type_name":"Order","schema":["sku"]},
            {"type_name":"Refund","schema":["order_id"]}
        ]"#,
    )
    .expect("plans");
    registry.check_all(&received, &cache).expect("all plans valid");

    let factory = PackerFactory::with_cache(&cache, BindConfig::default());
    for plan in &received {
        if plan.type_name() == "Order" {
            let packer = factory
                .build::<Order>(plan.schema().clone(), PackStrategy::Reflect)
                .expect("order");
            assert_eq!(packer.pack(&order()).to_string(), "(\"A-1\")");
        }
    }
}
