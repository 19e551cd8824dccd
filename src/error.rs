//! 错误类型
//!
//! 所有失败路径最终都转换为 `{"error": "..."}` JSON 响应

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::models::ErrorBody;
use crate::services::generative::GenerationError;
use crate::services::market_data::MarketDataError;

/// 行情接口拒绝请求的类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamFailure {
    /// 401，API Key 无效
    AuthFailure,
    /// 其他非成功状态
    Generic,
}

impl UpstreamFailure {
    pub fn from_status(status: u16) -> Self {
        if status == 401 {
            Self::AuthFailure
        } else {
            Self::Generic
        }
    }

    fn detail(&self) -> &'static str {
        match self {
            Self::AuthFailure => "Authentication failed. Your Tiingo API key is invalid.",
            Self::Generic => "Failed to fetch stock data. Check the symbol or your API key.",
        }
    }
}

/// 股票分析请求的错误
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// 客户端输入无效，400
    #[error("{0}")]
    InvalidInput(String),

    /// 行情接口返回非成功状态，状态码原样透传
    #[error("{}", .kind.detail())]
    Upstream { status: u16, kind: UpstreamFailure },

    /// 行情接口返回空列表，404
    #[error("No data found for symbol '{0}'. Please check the symbol (e.g., 'AAPL' or 'TCS.NS').")]
    NotFound(String),

    /// 其余所有异常，500
    #[error("An unexpected error occurred: {0}")]
    Internal(String),
}

impl AnalysisError {
    pub fn missing_symbol() -> Self {
        Self::InvalidInput("Stock symbol was not provided.".to_string())
    }

    pub fn invalid_symbol(symbol: &str) -> Self {
        Self::InvalidInput(format!("Invalid stock symbol '{}'.", symbol))
    }
}

impl From<MarketDataError> for AnalysisError {
    fn from(err: MarketDataError) -> Self {
        match err {
            MarketDataError::Status(status) => Self::Upstream {
                status,
                kind: UpstreamFailure::from_status(status),
            },
            MarketDataError::InvalidSymbol(symbol) => Self::invalid_symbol(&symbol),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<GenerationError> for AnalysisError {
    fn from(err: GenerationError) -> Self {
        Self::Internal(err.to_string())
    }
}

impl ResponseError for AnalysisError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody::new(self.to_string()))
    }
}
