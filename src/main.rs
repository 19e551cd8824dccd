//! 股票分析后端服务
//!
//! 根据股票代码获取 Tiingo 最新日线行情，交给 Gemini 生成投资分析

mod config;     // 配置
mod error;      // 错误类型
mod handlers;   // HTTP 请求处理器
mod middleware; // 中间件
mod models;     // 数据模型定义
mod services;   // 业务逻辑服务

use std::sync::Arc;
use std::time::Duration;

use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use env_logger::Env;

use crate::config::{ApiKeys, AppConfig};
use crate::middleware::cors;
use crate::services::generative::GeminiClient;
use crate::services::market_data::TiingoClient;
use crate::services::StockAnalyzer;

/// 构造分析器，两个网关共用一个 HTTP 客户端
fn build_analyzer(config: &AppConfig, keys: &ApiKeys) -> anyhow::Result<StockAnalyzer> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.api.timeout_secs))
        .connect_timeout(Duration::from_secs(config.api.connect_timeout_secs))
        .build()
        .context("创建 HTTP 客户端失败")?;

    let market_data = TiingoClient::new(
        client.clone(),
        config.market_data.base_url.clone(),
        keys.tiingo.clone(),
    );
    let generator = GeminiClient::new(
        client,
        config.generative.base_url.clone(),
        config.generative.model.clone(),
        keys.gemini.clone(),
    );

    Ok(StockAnalyzer::new(Arc::new(market_data), Arc::new(generator)))
}

/// 应用程序入口
#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // .env 文件可选
    dotenvy::dotenv().ok();

    let (config, report) = AppConfig::load();

    // 初始化日志系统，RUST_LOG 优先于配置文件
    env_logger::init_from_env(Env::default().default_filter_or(config.log.level.as_str()));
    report.log();

    // 缺少任一 API Key 直接退出
    let keys = ApiKeys::from_env()?;
    let analyzer = web::Data::new(build_analyzer(&config, &keys)?);

    let bind_addr = config.bind_addr();
    log::info!(
        "启动股票分析服务，监听 {}，模型 {}",
        bind_addr,
        config.generative.model
    );

    HttpServer::new(move || {
        App::new()
            .wrap(cors())  // 允许跨域
            .wrap(Logger::default())  // 添加请求日志中间件
            .app_data(analyzer.clone())
            .configure(handlers::config)  // 配置路由
    })
    .bind(&bind_addr)
    .with_context(|| format!("绑定地址 {} 失败", bind_addr))?
    .run()
    .await?;

    Ok(())
}
