use serde::{Deserialize, Serialize};

/// 定位图上的坐标（0〜10）
pub const DEFAULT_COORDINATE: f64 = 5.0;

/// 定位图坐标
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Default for Position {
    fn default() -> Self {
        Self {
            x: DEFAULT_COORDINATE,
            y: DEFAULT_COORDINATE,
        }
    }
}

/// 单个竞争对手
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Competitor {
    pub name: String,
    pub description: String,
    pub strengths: String,
    pub weaknesses: String,
    /// 与分析对象的差异点
    pub differentiation: String,
    pub position_x: f64,
    pub position_y: f64,
}

impl Default for Competitor {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            strengths: String::new(),
            weaknesses: String::new(),
            differentiation: String::new(),
            position_x: DEFAULT_COORDINATE,
            position_y: DEFAULT_COORDINATE,
        }
    }
}

impl Competitor {
    pub fn position(&self) -> Position {
        Position {
            x: self.position_x,
            y: self.position_y,
        }
    }
}

/// Competitor（竞争）分析
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct CompetitorInfo {
    pub direct_competitors: Vec<Competitor>,
    pub indirect_competitors: Vec<Competitor>,
    /// 分析对象在行业内的位置
    pub industry_position: String,
    /// 定位图X轴标签
    pub positioning_axis_x: String,
    /// 定位图Y轴标签
    pub positioning_axis_y: String,
    /// 分析对象自身在定位图上的坐标
    pub analyzed_company_position: Position,
}

impl CompetitorInfo {
    /// 直接竞争在前、间接竞争在后
    pub fn all_competitors(&self) -> impl Iterator<Item = &Competitor> {
        self.direct_competitors
            .iter()
            .chain(self.indirect_competitors.iter())
    }
}
