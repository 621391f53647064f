use std::sync::Arc;

use anyhow::Result;

use crate::config::Config;
use crate::llm::client::{LLMClient, ModelTransport};

#[derive(Clone)]
pub struct GeneratorContext {
    /// LLM调用器，用于与AI通信。
    pub llm_client: LLMClient,
    /// 配置
    pub config: Config,
}

impl GeneratorContext {
    /// 创建新的生成器上下文
    pub fn new(config: Config) -> Result<Self> {
        let llm_client = LLMClient::new(config.llm.clone())?;
        Ok(Self { llm_client, config })
    }

    /// 使用指定的模型传输层创建上下文
    pub fn with_transport(config: Config, transport: Arc<dyn ModelTransport>) -> Self {
        let llm_client = LLMClient::with_transport(config.llm.clone(), transport);
        Self { llm_client, config }
    }
}
