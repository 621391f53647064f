use crate::generator::research::normalizer::{JsonObject, normalize_company};
use crate::generator::research::phase_agent::PhaseAgent;
use crate::generator::research::types::{Phase, ResearchRequest};
use crate::types::CompanyInfo;

/// 企业调研员 - 负责企业概况、沿革、新闻、IR与SNS舆情
#[derive(Default)]
pub struct CompanyResearcher;

impl PhaseAgent for CompanyResearcher {
    type Output = CompanyInfo;

    fn phase(&self) -> Phase {
        Phase::Company
    }

    fn detail(&self) -> &'static str {
        "企業・ブランド情報を収集中..."
    }

    fn build_prompt(&self, request: &ResearchRequest) -> String {
        let name = &request.client_name;
        let orientation = if request.orientation.trim().is_empty() {
            String::new()
        } else {
            format!("\nオリエン情報: {}", request.orientation)
        };

        format!(
            r#"企業リサーチの専門家として、以下の企業をWeb検索で分析し、JSON形式で出力してください。

企業名: {name}　業界: {industry}{orientation}

```json
{{
  "name": "企業名", "official_url": "公式HP URL",
  "mission_vision": "理念・ビジョン",
  "business_overview": "事業概要（200字）",
  "products_services": "主要商品・サービス（200字）",
  "timeline": [{{"year": "年", "description": "出来事"}}],
  "recent_news": [{{"title": "タイトル", "date": "YYYY-MM", "summary": "概要", "url": "URL"}}],
  "ir_summary": "IR・業績要約（200字）",
  "sns_analysis": [{{"platform": "X", "summary": "傾向", "tone": "ポジティブ/ネガティブ/ニュートラル", "key_topics": ["話題"]}}],
  "brand_momentum": "ブランドの勢い評価（100字）"
}}
```
沿革は創業〜現在の主要節目、ニュースは直近1年分、SNSは「{name} 評判」で検索してください。"#,
            industry = request.industry,
        )
    }

    fn normalize(&self, data: &JsonObject, request: &ResearchRequest) -> CompanyInfo {
        normalize_company(data, &request.client_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_includes_orientation_only_when_given() {
        let agent = CompanyResearcher;
        let request = ResearchRequest::new("Acme", "小売");
        let prompt = agent.build_prompt(&request);
        assert!(prompt.contains("企業名: Acme　業界: 小売\n"));
        assert!(!prompt.contains("オリエン情報"));
        assert!(prompt.contains("「Acme 評判」"));

        let prompt = agent.build_prompt(&request.with_orientation("若年層向け施策"));
        assert!(prompt.contains("オリエン情報: 若年層向け施策"));
    }
}
