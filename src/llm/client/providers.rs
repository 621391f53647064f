//! 模型服务的传输层

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::debug;

use crate::config::LLMConfig;
use crate::llm::client::error::TransportError;
use crate::llm::client::types::{ModelRequest, ModelResponse};

/// 一次请求、一次响应的模型调用，具体厂商实现对调用方不可见
#[async_trait]
pub trait ModelTransport: Send + Sync {
    async fn send(&self, request: &ModelRequest) -> Result<ModelResponse, TransportError>;
}

/// Anthropic Messages API 客户端
pub struct AnthropicTransport {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    anthropic_version: String,
    model: String,
}

impl AnthropicTransport {
    pub fn new(config: &LLMConfig) -> Result<Self, TransportError> {
        if config.api_key.trim().is_empty() {
            return Err(TransportError::MissingApiKey);
        }
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            http,
            endpoint: format!("{}/v1/messages", config.api_base_url.trim_end_matches('/')),
            api_key: config.api_key.clone(),
            anthropic_version: config.anthropic_version.clone(),
            model: config.model.clone(),
        })
    }

    /// 构建请求体
    fn request_body(&self, request: &ModelRequest) -> Value {
        let mut body = json!({
            "model": self.model,
            "max_tokens": request.max_tokens,
            "messages": [{"role": "user", "content": request.prompt}],
        });
        if let Some(web_search) = request.web_search {
            body["tools"] = json!([{
                "type": "web_search_20250305",
                "name": "web_search",
                "max_uses": web_search.max_uses,
            }]);
        }
        body
    }
}

#[async_trait]
impl ModelTransport for AnthropicTransport {
    async fn send(&self, request: &ModelRequest) -> Result<ModelResponse, TransportError> {
        let response = self
            .http
            .post(&self.endpoint)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", &self.anthropic_version)
            .json(&self.request_body(request))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!(status = status.as_u16(), bytes = body.len(), "model response received");

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(TransportError::RateLimited(body));
        }
        if !status.is_success() {
            return Err(TransportError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let value: Value = serde_json::from_str(&body)?;
        Ok(ModelResponse::from_value(&value))
    }
}
