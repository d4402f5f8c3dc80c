//! Shared fixtures: `role` and `flag` checkers reading a `user` from the context.

#![allow(dead_code)]

use logical_permissions::{
    CheckerError, EvaluationContext, FnChecker, LogicalPermissions, PermissionChecker,
    PermissionCheckerRegistry,
};
use serde_json::{json, Value};
use std::sync::Arc;

/// Install a test subscriber once; respects `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Grants when the user's `roles` list contains the role.
pub fn role_checker() -> Arc<dyn PermissionChecker> {
    Arc::new(FnChecker::new(
        "role",
        |role: &str, ctx: &EvaluationContext| -> Result<bool, CheckerError> {
            Ok(ctx
                .get("user")
                .and_then(|user| user.get("roles"))
                .and_then(Value::as_array)
                .map(|roles| roles.iter().any(|r| r == role))
                .unwrap_or(false))
        },
    ))
}

/// Supports `has_account` and `never_bypass`.
pub fn flag_checker() -> Arc<dyn PermissionChecker> {
    Arc::new(FnChecker::new(
        "flag",
        |flag: &str, ctx: &EvaluationContext| -> Result<bool, CheckerError> {
            let user = ctx.get("user");
            match flag {
                "has_account" => Ok(user.and_then(|u| u.get("id")).is_some()),
                "never_bypass" => Ok(user
                    .and_then(|u| u.get("never_bypass"))
                    .and_then(Value::as_bool)
                    .unwrap_or(false)),
                other => Err(format!("unknown flag \"{}\"", other).into()),
            }
        },
    ))
}

pub fn registry() -> PermissionCheckerRegistry {
    PermissionCheckerRegistry::from_checkers(vec![role_checker(), flag_checker()])
        .expect("fixture checkers register")
}

pub fn permissions() -> LogicalPermissions {
    init_tracing();
    LogicalPermissions::new().with_registry(registry())
}

/// Context holding a user with the given roles.
pub fn user_with_roles(roles: &[&str]) -> EvaluationContext {
    EvaluationContext::empty().with("user", json!({"id": 1, "roles": roles}))
}

/// Bypass checker reading `user.bypass_access`.
pub fn bypass_from_user(ctx: &EvaluationContext) -> Result<bool, CheckerError> {
    Ok(ctx
        .get("user")
        .and_then(|u| u.get("bypass_access"))
        .and_then(Value::as_bool)
        .unwrap_or(false))
}
