//! Permission and bypass checker capabilities
//!
//! A permission checker answers one question: does the context satisfy
//! `value` for this permission type? A `role` checker, for example, receives
//! `"admin"` and looks the role up on the user held by the context.

use crate::context::EvaluationContext;
use crate::error::CheckerError;
use std::fmt;

/// Named checker for one permission type
pub trait PermissionChecker: Send + Sync {
    /// Permission type name used as a mapping key (e.g. `role`)
    fn name(&self) -> &str;

    /// Check `value` against the context
    fn check_permission(
        &self,
        value: &str,
        context: &EvaluationContext,
    ) -> Result<bool, CheckerError>;
}

/// Decides whether the subject in the context may bypass permission trees
pub trait BypassAccessChecker: Send + Sync {
    fn check_bypass_access(&self, context: &EvaluationContext) -> Result<bool, CheckerError>;
}

impl<F> BypassAccessChecker for F
where
    F: Fn(&EvaluationContext) -> Result<bool, CheckerError> + Send + Sync,
{
    fn check_bypass_access(&self, context: &EvaluationContext) -> Result<bool, CheckerError> {
        self(context)
    }
}

/// Permission checker backed by a closure
pub struct FnChecker<F> {
    name: String,
    check: F,
}

impl<F> FnChecker<F>
where
    F: Fn(&str, &EvaluationContext) -> Result<bool, CheckerError> + Send + Sync,
{
    /// Create a checker named `name`
    pub fn new(name: impl Into<String>, check: F) -> Self {
        Self {
            name: name.into(),
            check,
        }
    }
}

impl<F> PermissionChecker for FnChecker<F>
where
    F: Fn(&str, &EvaluationContext) -> Result<bool, CheckerError> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn check_permission(
        &self,
        value: &str,
        context: &EvaluationContext,
    ) -> Result<bool, CheckerError> {
        (self.check)(value, context)
    }
}

impl<F> fmt::Debug for FnChecker<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnChecker").field("name", &self.name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fn_checker() {
        let checker = FnChecker::new("flag", |flag: &str, ctx: &EvaluationContext| -> Result<bool, CheckerError> {
            Ok(ctx.get(flag).and_then(|v| v.as_bool()).unwrap_or(false))
        });
        let ctx = EvaluationContext::empty().with("has_account", true);

        assert_eq!(checker.name(), "flag");
        assert!(checker.check_permission("has_account", &ctx).unwrap());
        assert!(!checker.check_permission("is_author", &ctx).unwrap());
    }

    #[test]
    fn test_closure_bypass_checker() {
        let bypass = |ctx: &EvaluationContext| -> Result<bool, CheckerError> {
            Ok(ctx.get("bypass_access") == Some(&json!(true)))
        };
        let allowed = EvaluationContext::empty().with("bypass_access", true);

        assert!(bypass.check_bypass_access(&allowed).unwrap());
        assert!(!bypass.check_bypass_access(&EvaluationContext::empty()).unwrap());
    }
}
