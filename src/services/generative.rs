//! Gemini 文本生成接口实现
//!
//! 对接 POST {base}/models/{model}:generateContent?key=<key>

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// 文本生成错误
#[derive(Debug, Error)]
pub enum GenerationError {
    /// 接口返回非成功状态
    #[error("generative provider returned status {status}: {message}")]
    Status { status: u16, message: String },

    /// 网络错误（已去掉带 key 的 URL）
    #[error("{0}")]
    Transport(reqwest::Error),

    /// 响应格式错误
    #[error("malformed generative response: {0}")]
    Decode(String),

    /// 没有返回任何候选文本（通常是被安全策略拦截）
    #[error("generative provider returned no text")]
    EmptyCompletion,

    /// 接口地址配置错误
    #[error("invalid generative url: {0}")]
    Url(#[from] url::ParseError),
}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.without_url())
    }
}

/// 文本生成网关
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// 根据提示词生成一段文本
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

// ==================== 请求/响应结构 ====================

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Gemini 客户端
pub struct GeminiClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(
        client: Client,
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            model: model.into(),
            api_key: api_key.into(),
        }
    }

    /// 构造生成接口地址
    pub fn generate_url(&self) -> Result<Url, GenerationError> {
        let mut url = Url::parse(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithoutBase)?
            .pop_if_empty()
            .push("models")
            .push(&format!("{}:generateContent", self.model));
        url.query_pairs_mut().append_pair("key", &self.api_key);
        Ok(url)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let url = self.generate_url()?;
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        log::debug!("调用 Gemini 模型 {}，提示词 {} 字节", self.model, prompt.len());

        let response = self.client.post(url).json(&request).send().await?;

        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| String::from_utf8_lossy(&body).into_owned());
            return Err(GenerationError::Status {
                status: status.as_u16(),
                message,
            });
        }

        extract_text(&body)
    }
}

/// 拼接第一个候选结果的全部文本片段
fn extract_text(body: &[u8]) -> Result<String, GenerationError> {
    let response: GenerateResponse =
        serde_json::from_slice(body).map_err(|e| GenerationError::Decode(e.to_string()))?;

    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.is_empty() {
        return Err(GenerationError::EmptyCompletion);
    }
    Ok(text)
}
