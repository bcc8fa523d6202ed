//! Actor - the authenticated caller's identity and tenant scope

use crate::core::ServerState;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use shared::error::{AppError, ErrorCode};

/// Caller identity as resolved by the upstream gateway
#[derive(Debug, Clone)]
pub struct Actor {
    pub id: String,
    pub company_id: String,
    /// Stores this actor may touch; empty = every store of the company
    pub accessible_store_ids: Vec<String>,
    pub permissions: Vec<String>,
}

impl Actor {
    /// Check a permission key, honoring `all` and `domain:*` wildcards
    pub fn has_permission(&self, required: &str) -> bool {
        self.permissions.iter().any(|granted| {
            if granted == "all" || granted == required {
                return true;
            }
            if let Some(domain) = granted.strip_suffix(":*")
                && let Some((req_domain, _)) = required.split_once(':')
            {
                return domain == req_domain;
            }
            false
        })
    }

    /// Verify a permission key, erroring like the route-level middleware
    pub fn ensure_permission(&self, required: &str) -> Result<(), AppError> {
        if self.has_permission(required) {
            Ok(())
        } else {
            Err(AppError::permission_denied(format!(
                "missing permission: {required}"
            )))
        }
    }

    /// Verify the actor may touch a store
    pub fn ensure_store_access(&self, store_id: &str) -> Result<(), AppError> {
        if self.accessible_store_ids.is_empty()
            || self.accessible_store_ids.iter().any(|id| id == store_id)
        {
            Ok(())
        } else {
            Err(AppError::with_message(
                ErrorCode::StoreAccessDenied,
                format!("store {} is outside your scope", store_id),
            ))
        }
    }

    /// Verify the actor belongs to a company (tenant boundary)
    pub fn ensure_company(&self, company_id: &str) -> Result<(), AppError> {
        if self.company_id == company_id {
            Ok(())
        } else {
            Err(AppError::permission_denied("resource belongs to another company"))
        }
    }
}

impl FromRequestParts<ServerState> for Actor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Actor>()
            .cloned()
            .ok_or_else(AppError::not_authenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor(permissions: &[&str], stores: &[&str]) -> Actor {
        Actor {
            id: "emp-1".into(),
            company_id: "c1".into(),
            accessible_store_ids: stores.iter().map(|s| s.to_string()).collect(),
            permissions: permissions.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_exact_and_wildcard_permissions() {
        let a = actor(&["payments:confirm"], &[]);
        assert!(a.has_permission("payments:confirm"));
        assert!(!a.has_permission("payments:record"));

        let a = actor(&["payments:*"], &[]);
        assert!(a.has_permission("payments:confirm"));
        assert!(a.has_permission("payments:record"));
        assert!(!a.has_permission("orders:manage"));

        let a = actor(&["all"], &[]);
        assert!(a.has_permission("orders:delete"));
    }

    #[test]
    fn test_store_scope() {
        let unrestricted = actor(&[], &[]);
        assert!(unrestricted.ensure_store_access("s9").is_ok());

        let scoped = actor(&[], &["s1", "s2"]);
        assert!(scoped.ensure_store_access("s1").is_ok());
        assert!(scoped.ensure_store_access("s3").is_err());
    }

    #[test]
    fn test_company_boundary() {
        let a = actor(&[], &[]);
        assert!(a.ensure_company("c1").is_ok());
        assert!(a.ensure_company("c2").is_err());
    }
}
