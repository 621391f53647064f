use serde::{Deserialize, Serialize};

/// 图表渲染配置
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct ChartStyle {
    /// 像素与pt换算用的分辨率
    pub dpi: f64,

    pub map_width_px: u32,
    pub map_height_px: u32,
    pub timeline_width_px: u32,
    pub timeline_height_px: u32,

    /// 标记的直径（pt）
    pub target_marker_pt: f64,
    pub direct_marker_pt: f64,
    pub indirect_marker_pt: f64,
    pub timeline_marker_pt: f64,

    /// 标签碰撞判定的矩形容差（数据坐标单位）
    pub label_tolerance_x: f64,
    pub label_tolerance_y: f64,

    /// 定位图上企业名的最大字符数
    pub name_budget: usize,
    /// 沿革图上说明文字的最大字符数
    pub timeline_label_budget: usize,
    pub max_timeline_events: usize,

    pub default_axis_x: String,
    pub default_axis_y: String,

    pub target_color: String,
    pub direct_color: String,
    pub indirect_color: String,
    pub grid_color: String,
    pub guide_color: String,
    pub axis_color: String,
    pub label_color: String,
    pub muted_label_color: String,
    pub timeline_color: String,
}

impl ChartStyle {
    /// pt 换算为像素
    pub fn pt_to_px(&self, pt: f64) -> f64 {
        pt * self.dpi / 72.0
    }
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            dpi: 150.0,
            map_width_px: 1125,
            map_height_px: 750,
            timeline_width_px: 1560,
            timeline_height_px: 375,
            target_marker_pt: 14.0,
            direct_marker_pt: 9.0,
            indirect_marker_pt: 7.0,
            timeline_marker_pt: 8.0,
            label_tolerance_x: 0.8,
            label_tolerance_y: 0.6,
            name_budget: 10,
            timeline_label_budget: 15,
            max_timeline_events: 8,
            default_axis_x: String::from("軸1"),
            default_axis_y: String::from("軸2"),
            target_color: String::from("E94560"),
            direct_color: String::from("0F3460"),
            indirect_color: String::from("999999"),
            grid_color: String::from("E6E6E6"),
            guide_color: String::from("CCCCCC"),
            axis_color: String::from("333333"),
            label_color: String::from("333333"),
            muted_label_color: String::from("666666"),
            timeline_color: String::from("0F3460"),
        }
    }
}
