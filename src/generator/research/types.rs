use std::fmt::Display;

/// 调研流程的阶段，作为进度通知的标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Company,
    Competitor,
    Customer,
    Summary,
    Done,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Company => "company",
            Phase::Competitor => "competitor",
            Phase::Customer => "customer",
            Phase::Summary => "summary",
            Phase::Done => "done",
        }
    }
}

impl Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 一次调研的输入
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResearchRequest {
    /// 客户名/品牌名
    pub client_name: String,
    pub industry: String,
    /// 可选的说明会（オリエン）信息，为空表示未提供
    pub orientation: String,
}

impl ResearchRequest {
    pub fn new(client_name: &str, industry: &str) -> Self {
        Self {
            client_name: client_name.to_string(),
            industry: industry.to_string(),
            orientation: String::new(),
        }
    }

    pub fn with_orientation(mut self, orientation: &str) -> Self {
        self.orientation = orientation.to_string();
        self
    }
}
