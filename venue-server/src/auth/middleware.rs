//! 授权中间件
//!
//! The upstream gateway authenticates the session and forwards identity via
//! headers; [`require_identity`] turns them into an [`Actor`] on the request
//! extensions, and [`require_permission`] gates a route subtree on one
//! permission key.

use axum::{
    extract::Request,
    middleware::Next,
    response::Response,
};
use std::future::Future;
use std::pin::Pin;

use super::actor::Actor;
use shared::error::AppError;

const HEADER_ACTOR_ID: &str = "x-actor-id";
const HEADER_COMPANY_ID: &str = "x-company-id";
const HEADER_STORE_IDS: &str = "x-store-ids";
const HEADER_PERMISSIONS: &str = "x-permissions";

fn header_str<'a>(req: &'a Request, name: &str) -> Option<&'a str> {
    req.headers().get(name).and_then(|v| v.to_str().ok())
}

fn split_csv(value: Option<&str>) -> Vec<String> {
    value
        .map(|v| {
            v.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// 身份中间件 - 从网关转发的头部解析 Actor
///
/// # 跳过的路径
///
/// - `OPTIONS *` (CORS 预检)
/// - 非 `/api/` 路径 (如 `/health`)
///
/// # 错误处理
///
/// 缺少 `x-actor-id` / `x-company-id` 返回 401
pub async fn require_identity(mut req: Request, next: Next) -> Result<Response, AppError> {
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }
    if !req.uri().path().starts_with("/api/") {
        return Ok(next.run(req).await);
    }

    let actor_id = header_str(&req, HEADER_ACTOR_ID);
    let company_id = header_str(&req, HEADER_COMPANY_ID);

    let (Some(actor_id), Some(company_id)) = (actor_id, company_id) else {
        tracing::warn!(target: "auth", uri = %req.uri(), "missing identity headers");
        return Err(AppError::not_authenticated());
    };

    let actor = Actor {
        id: actor_id.to_string(),
        company_id: company_id.to_string(),
        accessible_store_ids: split_csv(header_str(&req, HEADER_STORE_IDS)),
        permissions: split_csv(header_str(&req, HEADER_PERMISSIONS)),
    };

    req.extensions_mut().insert(actor);
    Ok(next.run(req).await)
}

/// 权限检查中间件 - 要求特定权限
///
/// # 支持的通配符
///
/// - `"payments:*"` 匹配所有 payments 相关操作
/// - `"all"` 匹配所有权限
///
/// # 用法
///
/// ```ignore
/// use axum::middleware;
/// Router::new()
///     .route("/api/orders", post(handler::create))
///     .layer(middleware::from_fn(require_permission("orders:manage")));
/// ```
///
/// # 错误
///
/// 无权限返回 403 Forbidden
pub fn require_permission(
    permission: &'static str,
) -> impl Fn(Request, Next) -> Pin<Box<dyn Future<Output = Result<Response, AppError>> + Send>> + Clone
{
    move |req: Request, next: Next| {
        Box::pin(async move {
            let actor = req
                .extensions()
                .get::<Actor>()
                .ok_or_else(AppError::not_authenticated)?;

            if !actor.has_permission(permission) {
                tracing::warn!(
                    target: "auth",
                    actor = %actor.id,
                    permission = %permission,
                    "permission denied"
                );
                return Err(AppError::permission_denied(format!(
                    "missing permission: {permission}"
                )));
            }

            Ok(next.run(req).await)
        })
    }
}
