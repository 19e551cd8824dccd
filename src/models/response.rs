//! 通用 API 响应模型
//!
//! 错误响应与健康检查响应

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// 错误响应体
///
/// 所有失败路径统一返回 `{"error": "..."}`
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}

/// 健康检查响应
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthStatus {
    /// 固定为 "ok"
    pub status: String,
    /// 响应时间戳（RFC 3339，UTC）
    pub timestamp: String,
}

impl HealthStatus {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}
