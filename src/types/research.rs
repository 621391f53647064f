use std::collections::HashSet;

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::types::{company::CompanyInfo, competitor::CompetitorInfo, customer::CustomerInfo};

/// created_at / accessed_at 使用的时间格式
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// 当前本地时间，格式化为 TIMESTAMP_FORMAT
pub fn now_timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// 信息来源
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct SourceInfo {
    pub url: String,
    pub title: String,
    pub accessed_at: String,
}

impl SourceInfo {
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            accessed_at: String::new(),
        }
    }
}

/// 按URL去重，保留首次出现的条目及其顺序
pub fn dedup_sources<I>(sources: I) -> Vec<SourceInfo>
where
    I: IntoIterator<Item = SourceInfo>,
{
    let mut seen = HashSet::new();
    sources
        .into_iter()
        .filter(|source| seen.insert(source.url.clone()))
        .collect()
}

/// 单一立场的分析
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct PerspectiveView {
    pub needs: String,
    pub concerns: String,
    /// 顾客视角下表示"理想体验"
    pub opportunities: String,
}

/// 按立场的需求分析（经营者/现场/顾客）
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct PerspectiveAnalysis {
    pub executive: PerspectiveView,
    pub frontline: PerspectiveView,
    pub customer: PerspectiveView,
}

impl PerspectiveAnalysis {
    /// 三个立场都没有needs时视为空
    pub fn is_empty(&self) -> bool {
        self.executive.needs.is_empty()
            && self.frontline.needs.is_empty()
            && self.customer.needs.is_empty()
    }
}

pub const DEFAULT_QUESTION_ROLE: &str = "総合的なマーケティング担当者";

/// 自动生成的讨论问题
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct QuestionsAnalysis {
    pub role: String,
    pub questions: Vec<String>,
}

impl Default for QuestionsAnalysis {
    fn default() -> Self {
        Self {
            role: DEFAULT_QUESTION_ROLE.to_string(),
            questions: Vec::new(),
        }
    }
}

/// 3C分析的完整结果
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ResearchResult {
    pub client_name: String,
    pub industry: String,
    pub orientation_info: String,
    pub company: CompanyInfo,
    pub competitor: CompetitorInfo,
    pub customer: CustomerInfo,
    pub perspective: PerspectiveAnalysis,
    pub questions: QuestionsAnalysis,
    pub key_findings: Vec<String>,
    pub sources: Vec<SourceInfo>,
    pub created_at: String,
}

impl ResearchResult {
    /// 以当前时间创建空结果
    pub fn new(client_name: &str, industry: &str) -> Self {
        Self {
            client_name: client_name.to_string(),
            industry: industry.to_string(),
            created_at: now_timestamp(),
            ..Default::default()
        }
    }
}
