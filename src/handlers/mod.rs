pub mod stock;
pub mod health;
pub mod index;

use actix_web::web;

use crate::error::AnalysisError;

pub fn config(cfg: &mut web::ServiceConfig) {
    // 请求体解析失败统一返回 400 + {"error": ...}
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AnalysisError::InvalidInput(format!("Invalid request body: {}", err)).into()
    }))
    .configure(index::config)
    .service(
        web::scope("/api")
            .configure(health::config)
            .configure(stock::config)
    );
}
