//! LLM客户端 - 提供带web检索的调研调用与纯文本合成调用

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::LLMConfig;

pub mod error;
pub mod providers;
#[cfg(test)]
pub mod scripted;
pub mod types;
pub mod utils;

pub use error::{ResearchError, TransportError};
pub use providers::{AnthropicTransport, ModelTransport};
pub use types::{ModelRequest, ModelResponse, WebSearch};
pub use utils::{SearchOutcome, extract_text_and_sources};

/// LLM客户端
#[derive(Clone)]
pub struct LLMClient {
    config: LLMConfig,
    transport: Arc<dyn ModelTransport>,
}

impl LLMClient {
    /// 使用Anthropic传输层创建客户端
    pub fn new(config: LLMConfig) -> Result<Self, TransportError> {
        let transport = AnthropicTransport::new(&config)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// 使用指定的传输层创建客户端
    pub fn with_transport(config: LLMConfig, transport: Arc<dyn ModelTransport>) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &LLMConfig {
        &self.config
    }

    /// 限流重试：只有限流错误会重试，总尝试次数为 retry_attempts + 1
    async fn retry_on_rate_limit<T, F, Fut>(&self, operation: F) -> Result<T, ResearchError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, TransportError>>,
    {
        let max_attempts = self.config.retry_attempts + 1;
        let mut attempt = 0;

        loop {
            attempt += 1;
            match operation().await {
                Ok(result) => return Ok(result),
                Err(TransportError::RateLimited(body)) => {
                    if attempt >= max_attempts {
                        warn!(attempts = attempt, "rate limit retries exhausted");
                        return Err(ResearchError::RateLimitExhausted { attempts: attempt });
                    }
                    warn!(
                        attempt,
                        max_attempts,
                        delay_ms = self.config.retry_delay_ms,
                        "rate limited, retrying: {}",
                        body
                    );
                    tokio::time::sleep(Duration::from_millis(self.config.retry_delay_ms)).await;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// 启用web检索的调研调用，返回文本与来源
    pub async fn search_and_analyze(&self, prompt: &str) -> Result<SearchOutcome, ResearchError> {
        let request = ModelRequest {
            prompt: prompt.to_string(),
            max_tokens: self.config.max_tokens,
            web_search: Some(WebSearch {
                max_uses: self.config.web_search_max_uses,
            }),
        };

        let response = self
            .retry_on_rate_limit(|| self.transport.send(&request))
            .await?;
        let outcome = extract_text_and_sources(&response);
        debug!(
            chars = outcome.text.chars().count(),
            sources = outcome.sources.len(),
            "search call finished"
        );
        Ok(outcome)
    }

    /// 不带检索的短文本合成调用
    pub async fn complete(&self, prompt: &str) -> Result<String, ResearchError> {
        let request = ModelRequest {
            prompt: prompt.to_string(),
            max_tokens: self.config.synthesis_max_tokens,
            web_search: None,
        };

        let response = self
            .retry_on_rate_limit(|| self.transport.send(&request))
            .await?;
        Ok(extract_text_and_sources(&response).text)
    }
}
