//! 认证授权模块
//!
//! Authentication itself is an upstream concern: the gateway in front of
//! this service validates the session and forwards a trusted identity via
//! `x-actor-*` headers. This module turns those headers into an [`Actor`],
//! gates mutating routes on permission keys, and scopes catalog reads to
//! the caller's company/stores.
//!
//! - [`Actor`] - caller identity + tenant scope + granted permissions
//! - [`require_identity`] - middleware resolving the actor from headers
//! - [`require_permission`] - permission check middleware
//! - [`permissions`] - the permission key table

pub mod actor;
pub mod middleware;
pub mod permissions;

pub use actor::Actor;
pub use middleware::{require_identity, require_permission};
