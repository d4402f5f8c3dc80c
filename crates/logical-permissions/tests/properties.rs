//! Property tests over generated, well-formed permission specifications.

mod common;

use common::{registry, user_with_roles};
use logical_permissions::{
    EvaluationContext, PermissionTreeDeserializer, PermissionTreeSerializer,
};
use proptest::prelude::*;
use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

const ROLES: [&str; 3] = ["a", "b", "c"];

fn entry(key: &str, value: Value) -> Value {
    let mut map = Map::new();
    map.insert(key.to_string(), value);
    Value::Object(map)
}

/// Gate names in mixed case; `NOT` is generated separately.
fn arb_gate_name() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("AND"),
        Just("or"),
        Just("Nand"),
        Just("NOR"),
        Just("xor"),
        Just("XNOR"),
    ]
}

fn arb_gate(inner: BoxedStrategy<Value>) -> BoxedStrategy<Value> {
    prop_oneof![
        (arb_gate_name(), prop::collection::vec(inner.clone(), 1..4))
            .prop_map(|(gate, inputs)| entry(gate, Value::Array(inputs))),
        // Wrapped so a list input still counts as one (implicit OR) input.
        inner.prop_map(|input| entry("NOT", Value::Array(vec![input]))),
    ]
    .boxed()
}

/// Specification valid below the `role` type.
fn arb_typed() -> BoxedStrategy<Value> {
    let leaf = prop::sample::select(ROLES.to_vec()).prop_map(|role| Value::String(role.into()));
    leaf.prop_recursive(3, 16, 3, |inner| {
        let inner = inner.boxed();
        prop_oneof![
            arb_gate(inner.clone()),
            prop::collection::vec(inner, 2..4).prop_map(Value::Array),
        ]
    })
    .boxed()
}

/// Specification valid at the top level.
fn arb_untyped() -> BoxedStrategy<Value> {
    let leaf = prop_oneof![
        any::<bool>().prop_map(Value::Bool),
        Just(Value::String("TRUE".into())),
        Just(Value::String("false".into())),
        arb_typed().prop_map(|typed| entry("role", typed)),
    ];
    leaf.prop_recursive(3, 16, 3, |inner| {
        let inner = inner.boxed();
        prop_oneof![
            arb_gate(inner.clone()),
            prop::collection::vec(inner, 2..4).prop_map(Value::Array),
        ]
    })
    .boxed()
}

/// Every combination of the three roles.
fn all_contexts() -> Vec<EvaluationContext> {
    (0..8u8)
        .map(|mask| {
            let roles: Vec<&str> = ROLES
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, role)| *role)
                .collect();
            user_with_roles(&roles)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Property Tests
// ---------------------------------------------------------------------------

proptest! {
    /// Well-formed specifications always compile.
    #[test]
    fn generated_specs_compile(spec in arb_untyped()) {
        let registry = registry();
        prop_assert!(PermissionTreeDeserializer::new(&registry).deserialize(&spec).is_ok());
    }

    /// Evaluating the same tree twice gives the same answer.
    #[test]
    fn evaluation_is_idempotent(spec in arb_untyped()) {
        let registry = registry();
        let tree = PermissionTreeDeserializer::new(&registry).deserialize(&spec).unwrap();
        for ctx in all_contexts() {
            let first = tree.evaluate(&registry, &ctx).unwrap();
            let second = tree.evaluate(&registry, &ctx).unwrap();
            prop_assert_eq!(first, second);
        }
    }

    /// Serializing returns the source and recompiles to an equal tree.
    #[test]
    fn serialize_round_trip_is_exact(spec in arb_untyped()) {
        let registry = registry();
        let deserializer = PermissionTreeDeserializer::new(&registry);
        let tree = deserializer.deserialize(&spec).unwrap();
        let serialized = PermissionTreeSerializer::new().serialize(&tree);

        prop_assert_eq!(&serialized, &spec);
        prop_assert_eq!(deserializer.deserialize(&serialized).unwrap(), tree);
    }

    /// The canonical form rebuilt from nodes evaluates like the original.
    #[test]
    fn canonical_round_trip_is_semantic(spec in arb_untyped()) {
        let registry = registry();
        let deserializer = PermissionTreeDeserializer::new(&registry);
        let tree = deserializer.deserialize(&spec).unwrap();
        let canonical = PermissionTreeSerializer::new().serialize_node(tree.root());
        let rebuilt = deserializer.deserialize(&canonical).unwrap();

        for ctx in all_contexts() {
            prop_assert_eq!(
                tree.evaluate(&registry, &ctx).unwrap(),
                rebuilt.evaluate(&registry, &ctx).unwrap()
            );
        }
    }

    /// The trace covers every node and starts with the root's value.
    #[test]
    fn debug_trace_covers_tree(spec in arb_untyped()) {
        let registry = registry();
        let tree = PermissionTreeDeserializer::new(&registry).deserialize(&spec).unwrap();
        for ctx in all_contexts() {
            let entries = tree.debug_values(&registry, &ctx).unwrap();
            prop_assert_eq!(entries.len(), tree.root().node_count());
            prop_assert_eq!(entries[0].value, tree.evaluate(&registry, &ctx).unwrap());
            prop_assert_eq!(&entries[0].spec, tree.root().original_spec());
        }
    }
}
