use crate::generator::context::GeneratorContext;
use crate::generator::research::normalizer::{normalize_key_findings, parse_json_from_text};
use crate::generator::research::types::Phase;
use crate::llm::client::ResearchError;
use crate::types::ResearchResult;

/// 要点总结 - 基于三个分析阶段的摘要生成3〜5条关键发现（不使用web检索）
#[derive(Default)]
pub struct KeyFindingsSynthesizer;

impl KeyFindingsSynthesizer {
    pub fn phase(&self) -> Phase {
        Phase::Summary
    }

    pub fn detail(&self) -> &'static str {
        "エグゼクティブサマリーを生成中..."
    }

    /// 只使用各阶段结果中的概要字段
    pub fn build_prompt(&self, result: &ResearchResult) -> String {
        let competitors = result
            .competitor
            .direct_competitors
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            r#"以下の3C分析結果から、キーファインディングを3〜5つJSON形式で出力してください。

企業: {client}（{industry}）
事業: {business}
勢い: {momentum}
業界位置: {position}
競合: {competitors}
市場: {market_size}
トレンド: {market_trend}

```json
{{"key_findings": ["ファインディング1", "ファインディング2", "ファインディング3"]}}
```"#,
            client = result.client_name,
            industry = result.industry,
            business = result.company.business_overview,
            momentum = result.company.brand_momentum,
            position = result.competitor.industry_position,
            market_size = result.customer.market_size,
            market_trend = result.customer.market_trend,
        )
    }

    pub async fn execute(
        &self,
        context: &GeneratorContext,
        result: &ResearchResult,
    ) -> Result<Vec<String>, ResearchError> {
        let text = context
            .llm_client
            .complete(&self.build_prompt(result))
            .await?;
        Ok(normalize_key_findings(&parse_json_from_text(&text)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Competitor;

    #[test]
    fn test_prompt_condenses_result() {
        let mut result = ResearchResult::new("Acme", "小売");
        result.company.business_overview = "総合小売".to_string();
        result.company.mission_vision = "含めない".to_string();
        result.competitor.direct_competitors = vec![
            Competitor {
                name: "Beta".to_string(),
                ..Default::default()
            },
            Competitor {
                name: "Gamma".to_string(),
                ..Default::default()
            },
        ];
        result.customer.market_size = "1兆円".to_string();

        let prompt = KeyFindingsSynthesizer.build_prompt(&result);
        assert!(prompt.contains("企業: Acme（小売）"));
        assert!(prompt.contains("事業: 総合小売"));
        assert!(prompt.contains("競合: Beta, Gamma"));
        assert!(prompt.contains("市場: 1兆円"));
        assert!(!prompt.contains("含めない"));
    }
}
