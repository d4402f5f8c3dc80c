//! # Logical Permissions
//!
//! Declarative access control with permission trees.
//!
//! ## Overview
//!
//! A permission specification is a nested JSON value made of booleans,
//! strings checked by named permission types, and logic gates. It is
//! compiled into a tree once and can then be evaluated against any number of
//! contexts:
//!
//! ```json
//! {
//!     "role": {"OR": ["editor", "admin"]},
//!     "flag": "is_author",
//!     "NO_BYPASS": {"flag": "never_bypass"}
//! }
//! ```
//!
//! Sibling entries are combined with `OR`. Gates (`AND`, `OR`, `NOT`, `NAND`,
//! `NOR`, `XOR`, `XNOR`) and the literals `TRUE`/`FALSE` are matched without
//! regard to case. A subject granted bypass access is let through unless the
//! top-level `NO_BYPASS` tree evaluates to true.
//!
//! ## Key Components
//!
//! - [`PermissionChecker`]: capability answering one permission type
//! - [`PermissionCheckerRegistry`]: named checkers, passed explicitly
//! - [`PermissionTreeDeserializer`] / [`FullPermissionTreeDeserializer`]:
//!   validate and compile specifications
//! - [`PermissionTreeNode`]: compiled boolean, string and gate nodes
//! - [`check_access`]: bypass-aware decision for a compiled tree
//! - [`PermissionTreeSerializer`] / [`FullPermissionTreeSerializer`]:
//!   turn trees back into specifications
//! - [`debug_values`]: pre-order evaluation trace
//! - [`LogicalPermissions`]: facade tying all of the above together
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use logical_permissions::{
//!     CheckerError, EvaluationContext, FnChecker, LogicalPermissions,
//! };
//! use serde_json::json;
//!
//! let mut lp = LogicalPermissions::new();
//! lp.add_type(Arc::new(FnChecker::new(
//!     "role",
//!     |role: &str, ctx: &EvaluationContext| -> Result<bool, CheckerError> {
//!         Ok(ctx
//!             .get("roles")
//!             .and_then(|roles| roles.as_array())
//!             .map(|roles| roles.iter().any(|r| r == role))
//!             .unwrap_or(false))
//!     },
//! )))
//! .unwrap();
//!
//! let ctx = EvaluationContext::empty().with("roles", json!(["editor"]));
//! let spec = json!({"role": {"OR": ["editor", "admin"]}});
//! assert!(lp.check_access(&spec, &ctx, true).unwrap());
//! ```

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod access;
pub mod checker;
pub mod config;
pub mod context;
pub mod debug;
pub mod deserializer;
pub mod error;
pub mod facade;
pub mod node;
pub mod registry;
pub mod serializer;
pub mod spec;
pub mod tree;

// Re-exports
pub use access::check_access;
pub use checker::{BypassAccessChecker, FnChecker, PermissionChecker};
pub use config::LogicalPermissionsConfig;
pub use context::EvaluationContext;
pub use debug::{debug_values, DebugEntry};
pub use deserializer::{FullPermissionTreeDeserializer, PermissionTreeDeserializer};
pub use error::{
    CheckerError, ConfigError, Error, EvaluationError, PermissionTreeError, RegistryError, Result,
};
pub use facade::LogicalPermissions;
pub use logic_gates::{LogicGate, LogicGateError};
pub use node::PermissionTreeNode;
pub use registry::{is_reserved_key, reserved_keys, PermissionCheckerRegistry};
pub use serializer::{FullPermissionTreeSerializer, PermissionTreeSerializer};
pub use spec::{PermissionSpec, SpecKey, NO_BYPASS};
pub use tree::{FullPermissionTree, PermissionTree};
