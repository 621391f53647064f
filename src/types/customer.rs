use serde::{Deserialize, Serialize};

/// 跨行业的参考案例
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct SimilarCase {
    pub company: String,
    pub industry: String,
    pub description: String,
    /// 可借鉴之处
    pub relevance: String,
}

/// Customer（顾客・市场）分析
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct CustomerInfo {
    pub market_size: String,
    pub market_trend: String,
    pub target_segments: Vec<String>,
    pub target_description: String,
    pub similar_cases: Vec<SimilarCase>,
}

impl CustomerInfo {
    pub fn has_target(&self) -> bool {
        !self.target_segments.is_empty() || !self.target_description.is_empty()
    }
}
