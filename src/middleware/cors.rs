//! CORS 中间件
//!
//! 允许任意来源以 GET/POST 访问，预检请求由 actix-cors 直接应答

use actix_cors::Cors;

/// 预检结果缓存时间（秒）
const PREFLIGHT_MAX_AGE: usize = 3600;

/// 构造跨域策略
///
/// 任意来源、任意请求头，响应头返回 `*`
pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .send_wildcard()
        .allowed_methods(["GET", "POST"])
        .allow_any_header()
        .max_age(PREFLIGHT_MAX_AGE)
}
