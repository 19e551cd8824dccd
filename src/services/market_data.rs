//! Tiingo 行情接口实现
//!
//! 对接 https://api.tiingo.com/tiingo/daily/<symbol>/prices
//! Tiingo 只接受 URL 参数 `token` 作为认证方式，不能放在 Authorization 头里

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use url::Url;

use crate::models::{is_dot_segment, PriceRecord};

/// 行情接口错误
#[derive(Debug, Error)]
pub enum MarketDataError {
    /// 接口返回非成功状态
    #[error("market data provider returned status {0}")]
    Status(u16),

    /// 网络错误（已去掉带 token 的 URL）
    #[error("{0}")]
    Transport(reqwest::Error),

    /// 响应格式错误
    #[error("malformed market data response: {0}")]
    Decode(String),

    /// 股票代码无法作为单个路径段
    #[error("invalid symbol '{0}'")]
    InvalidSymbol(String),

    /// 接口地址配置错误
    #[error("invalid market data url: {0}")]
    Url(#[from] url::ParseError),
}

impl From<reqwest::Error> for MarketDataError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.without_url())
    }
}

/// 行情数据网关
#[async_trait]
pub trait MarketDataGateway: Send + Sync {
    /// 获取股票日线数据，最新一条在前；未知代码返回空列表
    async fn daily_prices(&self, symbol: &str) -> Result<Vec<PriceRecord>, MarketDataError>;
}

/// Tiingo 客户端
pub struct TiingoClient {
    client: Client,
    base_url: String,
    token: String,
}

impl TiingoClient {
    pub fn new(client: Client, base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            token: token.into(),
        }
    }

    /// 构造日线接口地址: {base}/daily/{symbol}/prices?token={token}
    ///
    /// 股票代码作为单个路径段编码
    pub fn prices_url(&self, symbol: &str) -> Result<Url, MarketDataError> {
        if is_dot_segment(symbol) {
            return Err(MarketDataError::InvalidSymbol(symbol.to_string()));
        }

        let mut url = Url::parse(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithoutBase)?
            .pop_if_empty()
            .extend(["daily", symbol, "prices"]);
        url.query_pairs_mut().append_pair("token", &self.token);
        Ok(url)
    }
}

#[async_trait]
impl MarketDataGateway for TiingoClient {
    async fn daily_prices(&self, symbol: &str) -> Result<Vec<PriceRecord>, MarketDataError> {
        let url = self.prices_url(symbol)?;

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(MarketDataError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        parse_daily_prices(&body)
    }
}

/// 解析日线接口响应，必须是对象数组
fn parse_daily_prices(body: &[u8]) -> Result<Vec<PriceRecord>, MarketDataError> {
    serde_json::from_slice(body).map_err(|e| MarketDataError::Decode(e.to_string()))
}
