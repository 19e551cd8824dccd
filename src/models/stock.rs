//! 股票数据模型
//!
//! 定义分析请求、行情记录和分析结果

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::AnalysisError;

/// 股票分析请求体
///
/// `{"symbol": "AAPL"}`
#[derive(Debug, Deserialize)]
pub struct StockQuery {
    /// 股票代码
    #[serde(default)]
    pub symbol: Option<String>,
}

impl StockQuery {
    /// 返回有效的股票代码
    ///
    /// 缺失、空串或全空白视为未提供；`.` 和 `..` 会被当作 URL 路径段处理，直接拒绝
    pub fn symbol(&self) -> Result<&str, AnalysisError> {
        let symbol = self
            .symbol
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(AnalysisError::missing_symbol)?;

        if is_dot_segment(symbol) {
            return Err(AnalysisError::invalid_symbol(symbol));
        }
        Ok(symbol)
    }
}

/// `.` 或 `..`，拼进 URL 时会被规范化掉
pub fn is_dot_segment(segment: &str) -> bool {
    matches!(segment, "." | "..")
}

/// 单日行情记录
///
/// Tiingo 返回的原始对象，字段不做校验，原样回传给客户端。
/// 常见字段：date, close, high, low, open, volume, adjClose ...
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceRecord(Map<String, Value>);

impl PriceRecord {
    /// 取字段值，null 视为缺失
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.0.get(name).filter(|v| !v.is_null())
    }

    /// 日期部分（去掉 `T` 之后的时间）
    pub fn date(&self) -> Option<String> {
        self.field("date").map(|v| match v {
            Value::String(s) => s.split('T').next().unwrap_or_default().to_string(),
            other => other.to_string(),
        })
    }
}

/// 分析结果
///
/// 成功时的响应体，`analysis_text` 序列化为 `gemini_analysis`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// 股票代码（与请求一致）
    pub symbol: String,
    /// 最新行情记录
    pub stock_data: PriceRecord,
    /// 生成的分析文本
    #[serde(rename = "gemini_analysis")]
    pub analysis_text: String,
}
