//! 股票分析服务
//!
//! 依次调用行情接口和文本生成接口，两步都成功才返回结果

use std::sync::Arc;

use crate::error::AnalysisError;
use crate::models::AnalysisResult;
use crate::services::generative::TextGenerator;
use crate::services::market_data::MarketDataGateway;
use crate::services::prompt::build_analysis_prompt;

/// 股票分析器
///
/// 启动时构造一次，请求之间不共享可变状态
#[derive(Clone)]
pub struct StockAnalyzer {
    market_data: Arc<dyn MarketDataGateway>,
    generator: Arc<dyn TextGenerator>,
}

impl StockAnalyzer {
    pub fn new(market_data: Arc<dyn MarketDataGateway>, generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            market_data,
            generator,
        }
    }

    /// 分析单只股票
    ///
    /// 取最新一条日线，构造提示词后请求生成分析文本。
    /// 不做缓存，每次调用都会访问两个外部接口。
    pub async fn analyze(&self, symbol: &str) -> Result<AnalysisResult, AnalysisError> {
        let records = self.market_data.daily_prices(symbol).await.map_err(|e| {
            log::warn!("获取 {} 行情失败: {}", symbol, e);
            AnalysisError::from(e)
        })?;

        let stock_data = records
            .into_iter()
            .next()
            .ok_or_else(|| AnalysisError::NotFound(symbol.to_string()))?;

        let prompt = build_analysis_prompt(symbol, &stock_data);

        let analysis_text = self.generator.generate(&prompt).await.map_err(|e| {
            log::error!("生成 {} 分析失败: {}", symbol, e);
            AnalysisError::from(e)
        })?;

        Ok(AnalysisResult {
            symbol: symbol.to_string(),
            stock_data,
            analysis_text,
        })
    }
}
