use crate::generator::research::normalizer::{JsonObject, normalize_competitor};
use crate::generator::research::phase_agent::PhaseAgent;
use crate::generator::research::types::{Phase, ResearchRequest};
use crate::types::CompetitorInfo;

/// 竞争调研员 - 直接/间接竞争、行业定位与定位图坐标
#[derive(Default)]
pub struct CompetitorResearcher;

impl PhaseAgent for CompetitorResearcher {
    type Output = CompetitorInfo;

    fn phase(&self) -> Phase {
        Phase::Competitor
    }

    fn detail(&self) -> &'static str {
        "競合情報を分析中..."
    }

    fn build_prompt(&self, request: &ResearchRequest) -> String {
        format!(
            r#"競合分析の専門家として、以下の企業の競合をWeb検索で分析し、JSON形式で出力してください。

企業名: {name}　業界: {industry}

```json
{{
  "direct_competitors": [
    {{"name": "競合名", "description": "概要", "strengths": "強み", "weaknesses": "弱み",
      "differentiation": "{name}との違い", "position_x": 7.0, "position_y": 8.0}}
  ],
  "indirect_competitors": [
    {{"name": "間接競合名", "description": "説明", "strengths": "強み",
      "differentiation": "{name}との違い", "position_x": 3.0, "position_y": 5.0}}
  ],
  "industry_position": "{name}の業界ポジション（100字）",
  "positioning_axis_x": "X軸ラベル（例: 価格帯 低←→高）",
  "positioning_axis_y": "Y軸ラベル（例: 品質 低←→高）",
  "target_company_position_x": 6.0,
  "target_company_position_y": 7.0
}}
```
直接競合3〜5社、間接競合1〜3社。座標は0〜10の範囲で設定してください。"#,
            name = request.client_name,
            industry = request.industry,
        )
    }

    fn normalize(&self, data: &JsonObject, _request: &ResearchRequest) -> CompetitorInfo {
        normalize_competitor(data)
    }
}
