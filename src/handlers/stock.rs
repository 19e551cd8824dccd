//! 股票分析接口
//!
//! POST /api/stock  {"symbol": "AAPL"}

use actix_web::{web, HttpResponse};

use crate::error::AnalysisError;
use crate::models::StockQuery;
use crate::services::StockAnalyzer;

/// 获取最新行情并生成分析
///
/// 成功返回 `{"symbol", "stock_data", "gemini_analysis"}`，失败返回 `{"error"}`
pub async fn analyze_stock(
    analyzer: web::Data<StockAnalyzer>,
    query: web::Json<StockQuery>,
) -> Result<HttpResponse, AnalysisError> {
    let symbol = query.symbol()?;

    log::info!("分析股票 {}", symbol);
    let result = analyzer.analyze(symbol).await?;

    Ok(HttpResponse::Ok().json(result))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/stock", web::post().to(analyze_stock));
}
