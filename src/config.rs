//! 配置模块
//!
//! 支持从 JSON 文件加载系统配置，API Key 仅从环境变量读取

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Tiingo API Key 环境变量名
pub const TIINGO_KEY_VAR: &str = "TIINGO_API_KEY";
/// Gemini API Key 环境变量名
pub const GEMINI_KEY_VAR: &str = "GEMINI_API_KEY";

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,
    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
}

/// 外部请求配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// 请求超时时间（秒）
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// 连接超时时间（秒）
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// 日志级别: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// 行情数据源配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketDataConfig {
    /// Tiingo 接口根地址
    #[serde(default = "default_market_data_url")]
    pub base_url: String,
}

/// 文本生成服务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerativeConfig {
    /// Gemini 接口根地址
    #[serde(default = "default_generative_url")]
    pub base_url: String,
    /// 模型名称
    #[serde(default = "default_model")]
    pub model: String,
}

/// 应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub market_data: MarketDataConfig,
    #[serde(default)]
    pub generative: GenerativeConfig,
}

// 默认值函数
fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }
fn default_timeout() -> u64 { 30 }
fn default_connect_timeout() -> u64 { 10 }
fn default_log_level() -> String { "info".to_string() }
fn default_market_data_url() -> String { "https://api.tiingo.com/tiingo/".to_string() }
fn default_generative_url() -> String { "https://generativelanguage.googleapis.com/v1beta/".to_string() }
fn default_model() -> String { "gemini-1.5-flash".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for MarketDataConfig {
    fn default() -> Self {
        Self {
            base_url: default_market_data_url(),
        }
    }
}

impl Default for GenerativeConfig {
    fn default() -> Self {
        Self {
            base_url: default_generative_url(),
            model: default_model(),
        }
    }
}

impl AppConfig {
    /// 从 JSON 文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// 从 JSON 字符串解析配置
    pub fn from_json(content: &str) -> Result<Self> {
        let config: AppConfig = serde_json::from_str(content)?;
        Ok(config)
    }

    /// 加载配置，优先从文件，失败则使用默认值
    ///
    /// 加载时日志系统尚未初始化，加载过程记录在 [`ConfigReport`] 中
    pub fn load() -> (Self, ConfigReport) {
        let config_paths = ["config.json", "config/config.json"];
        let mut report = ConfigReport::default();

        for path in config_paths {
            if Path::new(path).exists() {
                match Self::from_file(path) {
                    Ok(config) => {
                        report.source = Some(path);
                        return (config, report);
                    }
                    Err(e) => report.failures.push((path, e.to_string())),
                }
            }
        }

        (Self::default(), report)
    }

    /// 获取服务器绑定地址
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// 配置加载过程
#[derive(Debug, Default)]
pub struct ConfigReport {
    /// 成功加载的文件，None 表示使用默认配置
    pub source: Option<&'static str>,
    /// 解析失败的文件及原因
    pub failures: Vec<(&'static str, String)>,
}

impl ConfigReport {
    pub fn log(&self) {
        for (path, e) in &self.failures {
            log::warn!("加载配置文件 {} 失败: {}", path, e);
        }
        match self.source {
            Some(path) => log::info!("从 {} 加载配置成功", path),
            None => log::info!("使用默认配置"),
        }
    }
}

/// 外部服务密钥
///
/// 启动时读取一次，之后只读
#[derive(Clone)]
pub struct ApiKeys {
    pub tiingo: String,
    pub gemini: String,
}

impl std::fmt::Debug for ApiKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeys")
            .field("tiingo", &"***")
            .field("gemini", &"***")
            .finish()
    }
}

impl ApiKeys {
    /// 从进程环境变量读取
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 通过任意查找函数读取，任一密钥缺失或为空即失败
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        match (read(TIINGO_KEY_VAR), read(GEMINI_KEY_VAR)) {
            (Some(tiingo), Some(gemini)) => Ok(Self { tiingo, gemini }),
            (tiingo, gemini) => {
                let missing: Vec<&str> = [
                    (tiingo.is_none(), TIINGO_KEY_VAR),
                    (gemini.is_none(), GEMINI_KEY_VAR),
                ]
                .into_iter()
                .filter_map(|(absent, name)| absent.then_some(name))
                .collect();
                bail!(
                    "API keys for Tiingo or Gemini not found (missing: {}). Please check your .env file.",
                    missing.join(", ")
                )
            }
        }
    }
}
