//! 工具模块 - 通用工具函数和类型
//!
//! # 内容
//!
//! - [`AppError`] / [`AppResult`] - 应用错误类型 (from shared::error)
//! - [`ApiResponse`] - API 响应结构 (from shared::response)
//! - 日志初始化

pub mod logger;

// Re-export error types from shared
pub use shared::error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use shared::response::ApiResponse;
