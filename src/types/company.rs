use serde::{Deserialize, Serialize};

/// 沿革中的一个节点
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct TimelineEvent {
    /// 年份文本，不保证是数字（例如 "1990年代"）
    pub year: String,
    pub description: String,
}

/// 新闻或新闻稿
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct NewsItem {
    pub title: String,
    pub date: String,
    pub summary: String,
    /// 为空表示没有链接
    pub url: String,
}

/// 单个社交平台的舆情概要
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct SnsInfo {
    /// "X"、"Instagram" 等
    pub platform: String,
    pub summary: String,
    /// 自由文本，常见值为 ポジティブ/ネガティブ/ニュートラル
    pub tone: String,
    pub key_topics: Vec<String>,
}

/// 舆情基调分类，用于渲染时选择颜色
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Positive,
    Negative,
    Neutral,
    Unknown,
}

impl SnsInfo {
    /// 将自由文本的tone归入已知分类，未知值归为Unknown
    pub fn tone_kind(&self) -> Tone {
        let tone = self.tone.trim().to_lowercase();
        match tone.as_str() {
            "ポジティブ" | "positive" => Tone::Positive,
            "ネガティブ" | "negative" => Tone::Negative,
            "ニュートラル" | "neutral" => Tone::Neutral,
            _ => Tone::Unknown,
        }
    }
}

/// Company（企业・品牌）分析
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct CompanyInfo {
    pub name: String,
    pub official_url: String,
    pub mission_vision: String,
    pub business_overview: String,
    pub products_services: String,
    pub timeline: Vec<TimelineEvent>,
    pub recent_news: Vec<NewsItem>,
    pub ir_summary: String,
    pub sns_analysis: Vec<SnsInfo>,
    /// 品牌势头・热度的综合评价
    pub brand_momentum: String,
}

impl CompanyInfo {
    /// 只有名称的空分析结果
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_kind_known_labels() {
        let mut sns = SnsInfo {
            tone: "ポジティブ".to_string(),
            ..Default::default()
        };
        assert_eq!(sns.tone_kind(), Tone::Positive);

        sns.tone = " Negative ".to_string();
        assert_eq!(sns.tone_kind(), Tone::Negative);

        sns.tone = "ニュートラル".to_string();
        assert_eq!(sns.tone_kind(), Tone::Neutral);
    }

    #[test]
    fn test_tone_kind_unknown_label() {
        let sns = SnsInfo {
            tone: "やや好意的".to_string(),
            ..Default::default()
        };
        assert_eq!(sns.tone_kind(), Tone::Unknown);
    }

    #[test]
    fn test_company_deserialize_partial_archive() {
        let json = r#"{"name": "Acme", "timeline": [{"year": "2001"}]}"#;
        let company: CompanyInfo = serde_json::from_str(json).unwrap();

        assert_eq!(company.name, "Acme");
        assert_eq!(company.timeline.len(), 1);
        assert_eq!(company.timeline[0].description, "");
        assert!(company.recent_news.is_empty());
    }
}
