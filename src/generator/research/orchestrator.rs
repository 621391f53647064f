use std::time::Duration;

use tracing::{debug, info};

use crate::generator::context::GeneratorContext;
use crate::generator::research::agents::company_researcher::CompanyResearcher;
use crate::generator::research::agents::competitor_researcher::CompetitorResearcher;
use crate::generator::research::agents::customer_researcher::CustomerResearcher;
use crate::generator::research::agents::key_findings_synthesizer::KeyFindingsSynthesizer;
use crate::generator::research::phase_agent::{PhaseAgent, PhaseOutput};
use crate::generator::research::progress::ProgressReporter;
use crate::generator::research::types::{Phase, ResearchRequest};
use crate::llm::client::ResearchError;
use crate::types::{ResearchResult, SourceInfo, dedup_sources};

/// 3C调研编排器：Company → Competitor → Customer → 要点总结，严格串行
pub struct ResearchOrchestrator<'a> {
    context: &'a GeneratorContext,
    progress: &'a dyn ProgressReporter,
}

impl<'a> ResearchOrchestrator<'a> {
    pub fn new(context: &'a GeneratorContext, progress: &'a dyn ProgressReporter) -> Self {
        Self { context, progress }
    }

    /// 执行完整的调研流程
    pub async fn execute_research_pipeline(
        &self,
        request: &ResearchRequest,
    ) -> Result<ResearchResult, ResearchError> {
        info!(client = %request.client_name, industry = %request.industry, "research started");

        let company = self.execute_agent(&CompanyResearcher, request).await?;
        self.phase_delay().await;

        let competitor = self.execute_agent(&CompetitorResearcher, request).await?;
        self.phase_delay().await;

        let customer = self.execute_agent(&CustomerResearcher, request).await?;

        let mut result = ResearchResult::new(&request.client_name, &request.industry);
        result.orientation_info = request.orientation.clone();
        result.sources = stamp_sources(
            company
                .sources
                .into_iter()
                .chain(competitor.sources)
                .chain(customer.sources),
            &result.created_at,
        );
        result.company = company.info;
        result.competitor = competitor.info;
        result.customer = customer.info;

        let synthesizer = KeyFindingsSynthesizer;
        self.progress.report(synthesizer.phase(), synthesizer.detail());
        result.key_findings = synthesizer.execute(self.context, &result).await?;

        self.progress.report(Phase::Done, "分析完了");
        info!(
            sources = result.sources.len(),
            findings = result.key_findings.len(),
            "research finished"
        );
        Ok(result)
    }

    /// 执行单个分析阶段
    async fn execute_agent<T>(
        &self,
        agent: &T,
        request: &ResearchRequest,
    ) -> Result<PhaseOutput<T::Output>, ResearchError>
    where
        T: PhaseAgent,
    {
        self.progress.report(agent.phase(), agent.detail());
        let output = agent.execute(self.context, request).await?;
        debug!(phase = %agent.phase(), sources = output.sources.len(), "phase finished");
        Ok(output)
    }

    /// 阶段之间的固定等待
    async fn phase_delay(&self) {
        let delay_ms = self.context.config.research.phase_delay_ms;
        if delay_ms > 0 {
            debug!(delay_ms, "waiting before next phase");
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        }
    }
}

/// 全流程按URL去重，并写入访问时间
fn stamp_sources<I>(sources: I, accessed_at: &str) -> Vec<SourceInfo>
where
    I: IntoIterator<Item = SourceInfo>,
{
    dedup_sources(sources)
        .into_iter()
        .map(|source| SourceInfo {
            accessed_at: accessed_at.to_string(),
            ..source
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::generator::research::progress::SilentProgress;
    use crate::llm::client::scripted::ScriptedTransport;
    use crate::llm::client::types::{
        ContentBlock, ModelResponse, SearchItem, SearchResultContent, SourceRef,
    };
    use crate::llm::client::TransportError;
    use std::sync::{Arc, Mutex};

    fn fast_config() -> Config {
        let mut config = Config::default();
        config.llm.api_key = "test".to_string();
        config.llm.retry_delay_ms = 0;
        config.research.phase_delay_ms = 0;
        config
    }

    fn with_hits(text: &str, urls: &[&str]) -> ModelResponse {
        ModelResponse {
            content: vec![
                ContentBlock::WebSearchResult(SearchResultContent::Results(
                    urls.iter()
                        .map(|url| {
                            SearchItem::Hit(SourceRef {
                                url: url.to_string(),
                                title: format!("title of {}", url),
                            })
                        })
                        .collect(),
                )),
                ContentBlock::Text {
                    text: text.to_string(),
                    citations: vec![],
                },
            ],
        }
    }

    #[tokio::test]
    async fn test_pipeline_order_progress_and_sources() {
        let transport = Arc::new(ScriptedTransport::new(vec![
            Ok(with_hits(
                r#"```json
{"name": "Acme Corp", "business_overview": "総合小売"}
```"#,
                &["https://a.example", "https://b.example"],
            )),
            Ok(with_hits(
                r#"{"direct_competitors": [{"name": "Beta"}], "target_company_position_x": 8}"#,
                &["https://b.example", "https://c.example"],
            )),
            Ok(with_hits("市場データなし", &[])),
            Ok(ModelResponse::from_text(r#"{"key_findings": ["A", "B", "C"]}"#)),
        ]));
        let context = GeneratorContext::with_transport(fast_config(), transport.clone());
        let events = Mutex::new(Vec::new());
        let progress = |phase: Phase, _detail: &str| events.lock().unwrap().push(phase);

        let request = ResearchRequest::new("Acme", "小売").with_orientation("若年層");
        let result = ResearchOrchestrator::new(&context, &progress)
            .execute_research_pipeline(&request)
            .await
            .unwrap();

        assert_eq!(
            *events.lock().unwrap(),
            vec![
                Phase::Company,
                Phase::Competitor,
                Phase::Customer,
                Phase::Summary,
                Phase::Done
            ]
        );
        assert_eq!(result.company.name, "Acme Corp");
        assert_eq!(result.orientation_info, "若年層");
        assert_eq!(result.competitor.analyzed_company_position.x, 8.0);
        assert_eq!(result.competitor.analyzed_company_position.y, 5.0);
        assert_eq!(result.customer, crate::types::CustomerInfo::default());
        assert_eq!(result.key_findings, vec!["A", "B", "C"]);

        let urls: Vec<_> = result.sources.iter().map(|s| s.url.as_str()).collect();
        assert_eq!(
            urls,
            vec!["https://a.example", "https://b.example", "https://c.example"]
        );
        assert!(result.sources.iter().all(|s| s.accessed_at == result.created_at));

        let requests = transport.requests();
        assert_eq!(requests.len(), 4);
        assert!(requests[0].prompt.contains("オリエン情報: 若年層"));
        assert!(requests[0].web_search.is_some());
        assert!(requests[3].web_search.is_none());
    }

    #[tokio::test]
    async fn test_pipeline_survives_unparsable_answers() {
        let transport = Arc::new(ScriptedTransport::from_texts(&[
            "すみません、見つかりませんでした。",
            "```json\n{unclosed",
            "",
            "no findings",
        ]));
        let context = GeneratorContext::with_transport(fast_config(), transport);

        let result = ResearchOrchestrator::new(&context, &SilentProgress)
            .execute_research_pipeline(&ResearchRequest::new("Acme", "小売"))
            .await
            .unwrap();

        assert_eq!(result.company.name, "Acme");
        assert!(result.competitor.direct_competitors.is_empty());
        assert_eq!(
            result.key_findings,
            vec![crate::generator::research::normalizer::DEFAULT_KEY_FINDING]
        );
        assert!(result.sources.is_empty());
    }

    #[tokio::test]
    async fn test_pipeline_aborts_on_transport_error() {
        let transport = Arc::new(ScriptedTransport::new(vec![
            Ok(ModelResponse::from_text("{}")),
            Err(TransportError::Http {
                status: 401,
                body: "unauthorized".to_string(),
            }),
        ]));
        let context = GeneratorContext::with_transport(fast_config(), transport.clone());

        let err = ResearchOrchestrator::new(&context, &SilentProgress)
            .execute_research_pipeline(&ResearchRequest::new("Acme", "小売"))
            .await
            .unwrap_err();

        assert!(matches!(err, ResearchError::Transport(_)));
        assert_eq!(transport.request_count(), 2);
    }
}
