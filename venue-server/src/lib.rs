//! Venue Booking Server - 体验场馆预订与多人收款后端
//!
//! # 架构概述
//!
//! 本服务是剧本杀/密室逃脱场馆的预订后端，核心是多人订单的
//! 价格分解与收款对账引擎：
//!
//! - **折扣目录** (`db`): 角色定价模板与日历折扣，嵌入式 SurrealDB 存储
//! - **定价引擎** (`pricing`): 折扣解析、价格分解（一座一单）
//! - **支付台账** (`ledger`): 玩家/支付记录与对账聚合，redb 事务存储
//! - **HTTP API** (`api`): RESTful 接口
//! - **授权** (`auth`): 网关身份 + 权限门
//!
//! # 模块结构
//!
//! ```text
//! venue-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # 身份、权限
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 目录数据库层 (SurrealDB)
//! ├── pricing/       # 折扣解析与价格分解
//! ├── ledger/        # 支付台账与对账 (redb)
//! └── utils/         # 工具函数
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod ledger;
pub mod pricing;
pub mod utils;

// Re-export 公共类型
pub use auth::Actor;
pub use core::{Config, Server, ServerState};
pub use ledger::{LedgerManager, LedgerStorage};
pub use pricing::{DiscountResolver, PriceDecomposer};
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

/// 设置运行环境：加载 .env 并初始化日志
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();
    let log_dir = std::env::var("LOG_DIR").ok();
    utils::logger::init_logger_with_file(None, log_dir.as_deref());
    Ok(())
}

/// 打印启动横幅
pub fn print_banner() {
    println!(
        r#"
  ┌─────────────────────────────────────┐
  │   Venue Booking Server  v{}      │
  │   pricing · ledger · reconciliation │
  └─────────────────────────────────────┘
"#,
        env!("CARGO_PKG_VERSION")
    );
}
