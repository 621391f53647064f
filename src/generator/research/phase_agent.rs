use async_trait::async_trait;

use crate::generator::context::GeneratorContext;
use crate::generator::research::normalizer::{JsonObject, parse_json_from_text};
use crate::generator::research::types::{Phase, ResearchRequest};
use crate::llm::client::ResearchError;
use crate::types::SourceInfo;

/// 单个分析阶段的产出
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseOutput<T> {
    pub info: T,
    pub sources: Vec<SourceInfo>,
}

/// 带web检索的分析阶段：构造提示词、调用模型、归一化回答
#[async_trait]
pub trait PhaseAgent: Send + Sync {
    type Output: Send;

    fn phase(&self) -> Phase;

    /// 进度通知中显示的说明
    fn detail(&self) -> &'static str;

    fn build_prompt(&self, request: &ResearchRequest) -> String;

    fn normalize(&self, data: &JsonObject, request: &ResearchRequest) -> Self::Output;

    async fn execute(
        &self,
        context: &GeneratorContext,
        request: &ResearchRequest,
    ) -> Result<PhaseOutput<Self::Output>, ResearchError> {
        let prompt = self.build_prompt(request);
        let outcome = context.llm_client.search_and_analyze(&prompt).await?;
        let data = parse_json_from_text(&outcome.text);

        Ok(PhaseOutput {
            info: self.normalize(&data, request),
            sources: outcome.sources,
        })
    }
}
