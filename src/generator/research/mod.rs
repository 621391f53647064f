// 3C调研流程
// Company：企业概况、沿革、新闻、IR、SNS舆情（web检索）
// Competitor：直接/间接竞争、行业定位、定位图坐标（web检索）
// Customer：市场规模与趋势、目标客群、跨行业案例（web检索）
// Summary：基于前三者摘要生成关键发现（不检索）

use crate::generator::context::GeneratorContext;
use crate::generator::research::orchestrator::ResearchOrchestrator;
use crate::llm::client::ResearchError;
use crate::types::ResearchResult;

pub mod agents;
pub mod normalizer;
pub mod orchestrator;
pub mod phase_agent;
pub mod progress;
pub mod types;

pub use progress::{ProgressReporter, SilentProgress};
pub use types::{Phase, ResearchRequest};

/// 执行调研阶段
pub async fn execute(
    context: &GeneratorContext,
    request: &ResearchRequest,
    progress: &dyn ProgressReporter,
) -> Result<ResearchResult, ResearchError> {
    let orchestrator = ResearchOrchestrator::new(context, progress);
    orchestrator.execute_research_pipeline(request).await
}
