//! Permission Definitions
//!
//! ## 设计原则
//! - 读取本公司目录和订单无需单独权限，登录即可
//! - 模块化权限：按功能模块授权
//! - 敏感操作（确认收款、合并拆分、删除订单）单独控制

/// 可配置权限列表
pub const ALL_PERMISSIONS: &[&str] = &[
    // === 模块化权限 ===
    "pricing_templates:manage", // 角色定价模板管理
    "pricing_calendar:manage",  // 日历折扣管理
    "orders:manage",            // 订单创建/编辑

    // === 敏感操作 ===
    "orders:delete",            // 删除订单（级联删除玩家与支付）
    "payments:record",          // 录入支付
    "payments:confirm",         // 确认收款
    "payments:adjust",          // 合并/拆分/删除支付
];

/// Admin 专属权限（不在可配置列表中）
pub const ADMIN_ONLY_PERMISSIONS: &[&str] = &["all"];

/// 店长默认权限（全部可配置权限）
pub const DEFAULT_MANAGER_PERMISSIONS: &[&str] = &[
    "pricing_templates:manage",
    "pricing_calendar:manage",
    "orders:manage",
    "orders:delete",
    "payments:record",
    "payments:confirm",
    "payments:adjust",
];

/// 普通员工默认权限（订单与支付录入）
pub const DEFAULT_STAFF_PERMISSIONS: &[&str] = &["orders:manage", "payments:record"];

/// Get permissions for a role name
pub fn get_default_permissions(role_name: &str) -> Vec<String> {
    match role_name {
        "admin" => ADMIN_ONLY_PERMISSIONS.iter().map(|s| s.to_string()).collect(),
        "manager" => DEFAULT_MANAGER_PERMISSIONS.iter().map(|s| s.to_string()).collect(),
        "staff" => DEFAULT_STAFF_PERMISSIONS.iter().map(|s| s.to_string()).collect(),
        _ => vec![],
    }
}

/// Validate if a permission string is valid
pub fn is_valid_permission(permission: &str) -> bool {
    ALL_PERMISSIONS.contains(&permission)
        || ADMIN_ONLY_PERMISSIONS.contains(&permission)
        || permission.ends_with(":*")
}
