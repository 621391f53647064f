use thiserror::Error;

/// 模型服务调用层面的错误
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("API key is not configured (set ANTHROPIC_API_KEY or [llm].api_key)")]
    MissingApiKey,

    /// 限流，唯一会被重试的错误类型
    #[error("rate limited by model service: {0}")]
    RateLimited(String),

    #[error("model service returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("failed to decode model response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// 调研流程的终止性错误
#[derive(Debug, Error)]
pub enum ResearchError {
    /// 限流重试次数耗尽，面向用户的提示
    #[error("レートリミットに達しました。1〜2分待ってから再実行してください。")]
    RateLimitExhausted { attempts: u32 },

    #[error(transparent)]
    Transport(#[from] TransportError),
}
