use crate::generator::research::normalizer::{JsonObject, normalize_customer};
use crate::generator::research::phase_agent::PhaseAgent;
use crate::generator::research::types::{Phase, ResearchRequest};
use crate::types::CustomerInfo;

/// 市场调研员 - 市场规模、趋势、目标客群与跨行业案例
#[derive(Default)]
pub struct CustomerResearcher;

impl PhaseAgent for CustomerResearcher {
    type Output = CustomerInfo;

    fn phase(&self) -> Phase {
        Phase::Customer
    }

    fn detail(&self) -> &'static str {
        "市場・顧客情報を分析中..."
    }

    fn build_prompt(&self, request: &ResearchRequest) -> String {
        format!(
            r#"市場分析の専門家として、以下の企業が属する市場をWeb検索で分析し、JSON形式で出力してください。

企業名: {name}　業界: {industry}

```json
{{
  "market_size": "市場規模（金額・成長率）",
  "market_trend": "市場トレンド（200字）",
  "target_segments": ["セグメント1", "セグメント2"],
  "target_description": "ターゲット顧客層の説明（200字）",
  "similar_cases": [
    {{"company": "企業名", "industry": "業種", "description": "事例説明",
      "relevance": "{name}への参考ポイント"}}
  ]
}}
```
最新の市場データを検索し、類似事例は他業種から2〜3件含めてください。"#,
            name = request.client_name,
            industry = request.industry,
        )
    }

    fn normalize(&self, data: &JsonObject, _request: &ResearchRequest) -> CustomerInfo {
        normalize_customer(data)
    }
}
