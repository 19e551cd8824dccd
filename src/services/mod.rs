//! 业务逻辑服务模块
//!
//! 封装外部接口调用和分析流程

pub mod generative;     // Gemini 文本生成
pub mod market_data;    // Tiingo 行情
pub mod prompt;         // 提示词构造
pub mod stock_service;  // 股票分析流程

pub use stock_service::StockAnalyzer;

/// 测试用的网关替身，记录每次调用
#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use actix_web::{dev::ServerHandle, web, App, HttpServer};
    use async_trait::async_trait;
    use serde_json::json;

    use crate::models::PriceRecord;
    use crate::services::generative::{GenerationError, TextGenerator};
    use crate::services::market_data::{MarketDataError, MarketDataGateway};

    pub fn sample_record() -> PriceRecord {
        serde_json::from_value(json!({
            "date": "2024-05-01T00:00:00Z",
            "close": 189.5,
            "high": 191.0,
            "low": 188.0,
            "volume": 50000000
        }))
        .unwrap()
    }

    type MarketOutcome = Box<dyn Fn() -> Result<Vec<PriceRecord>, MarketDataError> + Send + Sync>;
    type GeneratorOutcome = Box<dyn Fn() -> Result<String, GenerationError> + Send + Sync>;

    pub struct FakeMarketData {
        outcome: MarketOutcome,
        calls: Mutex<Vec<String>>,
    }

    impl FakeMarketData {
        pub fn records(records: Vec<PriceRecord>) -> Self {
            Self {
                outcome: Box::new(move || Ok(records.clone())),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn failing<F>(err: F) -> Self
        where
            F: Fn() -> MarketDataError + Send + Sync + 'static,
        {
            Self {
                outcome: Box::new(move || Err(err())),
                calls: Mutex::new(Vec::new()),
            }
        }

        /// 收到的股票代码
        pub fn symbols(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl MarketDataGateway for FakeMarketData {
        async fn daily_prices(&self, symbol: &str) -> Result<Vec<PriceRecord>, MarketDataError> {
            self.calls.lock().unwrap().push(symbol.to_string());
            (self.outcome)()
        }
    }

    pub struct FakeGenerator {
        outcome: GeneratorOutcome,
        calls: Mutex<Vec<String>>,
    }

    impl FakeGenerator {
        pub fn text(text: &str) -> Self {
            let text = text.to_string();
            Self {
                outcome: Box::new(move || Ok(text.clone())),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn failing<F>(err: F) -> Self
        where
            F: Fn() -> GenerationError + Send + Sync + 'static,
        {
            Self {
                outcome: Box::new(move || Err(err())),
                calls: Mutex::new(Vec::new()),
            }
        }

        /// 收到的提示词
        pub fn prompts(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TextGenerator for FakeGenerator {
        async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
            self.calls.lock().unwrap().push(prompt.to_string());
            (self.outcome)()
        }
    }

    /// 在本地随机端口启动模拟上游服务，返回根地址和停止句柄
    ///
    /// 需要在 `#[actix_web::test]` 中调用
    pub fn serve(configure: fn(&mut web::ServiceConfig)) -> (String, ServerHandle) {
        let server = HttpServer::new(move || App::new().configure(configure))
            .workers(1)
            .disable_signals()
            .bind(("127.0.0.1", 0))
            .unwrap();
        let addr = server.addrs()[0];
        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);
        (format!("http://{}", addr), handle)
    }
}
