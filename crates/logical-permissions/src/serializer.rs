//! Permission tree serialization
//!
//! [`PermissionTreeSerializer::serialize`] returns the specification a tree
//! was compiled from. [`PermissionTreeSerializer::serialize_node`] instead
//! rebuilds a canonical specification from the compiled nodes, so the
//! implicit `OR` and single-input collapsing done by the deserializer show
//! up in its output.

use crate::node::PermissionTreeNode;
use crate::spec::{self, PermissionSpec, SpecKey, NO_BYPASS};
use crate::tree::{FullPermissionTree, PermissionTree};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, Default)]
pub struct PermissionTreeSerializer;

impl PermissionTreeSerializer {
    pub fn new() -> Self {
        Self
    }

    /// Specification the tree was compiled from
    pub fn serialize(&self, tree: &PermissionTree) -> PermissionSpec {
        tree.original_spec().clone()
    }

    /// Canonical specification rebuilt from the compiled nodes
    ///
    /// String leaves are emitted as `{type: value}` and gates as
    /// `{GATE: [inputs]}`. Deserializing the result yields a tree that
    /// evaluates identically.
    pub fn serialize_node(&self, node: &PermissionTreeNode) -> PermissionSpec {
        match node {
            PermissionTreeNode::Boolean { value, .. } => Value::Bool(*value),
            PermissionTreeNode::String {
                permission_type,
                permission_value,
                ..
            } => spec::single_entry(
                &SpecKey::Name(permission_type.clone()),
                Value::String(permission_value.clone()),
            ),
            PermissionTreeNode::Gate { gate, inputs, .. } => spec::single_entry(
                &SpecKey::Name(gate.name().to_string()),
                Value::Array(inputs.iter().map(|input| self.serialize_node(input)).collect()),
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FullPermissionTreeSerializer {
    tree_serializer: PermissionTreeSerializer,
}

impl FullPermissionTreeSerializer {
    pub fn new(tree_serializer: PermissionTreeSerializer) -> Self {
        Self { tree_serializer }
    }

    /// Main specification with the veto tree under a top-level `NO_BYPASS`
    pub fn serialize(&self, tree: &FullPermissionTree) -> PermissionSpec {
        let main = self.tree_serializer.serialize(tree.main_tree());
        let Some(no_bypass_tree) = tree.no_bypass_tree() else {
            return main;
        };

        let mut map = into_object(main);
        map.insert(
            NO_BYPASS.to_string(),
            self.tree_serializer.serialize(no_bypass_tree),
        );
        Value::Object(map)
    }
}

// Lists become index-keyed objects; a scalar sits under positional key "0".
fn into_object(spec: PermissionSpec) -> Map<String, Value> {
    match spec {
        Value::Object(map) => map,
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, value)| (index.to_string(), value))
            .collect(),
        scalar => {
            let mut map = Map::new();
            map.insert("0".to_string(), scalar);
            map
        }
    }
}
