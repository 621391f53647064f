use serde::{Deserialize, Serialize};

/// 幻灯片的样式与版面配置
///
/// 颜色均为不带 `#` 的6位十六进制RGB；坐标与长度单位为英寸，字号单位为pt。
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct DeckStyle {
    /// 深海军蓝（标题）
    pub primary: String,
    /// 海军蓝（小标题）
    pub secondary: String,
    /// 蓝（强调线、标签）
    pub accent: String,
    /// 红（高亮）
    pub highlight: String,
    /// 绿（正面舆情、Customer章节强调色）
    pub positive: String,
    /// 红（负面舆情）
    pub negative: String,
    /// 浅灰背景（表格斑马纹）
    pub bg_light: String,
    pub text_dark: String,
    pub text_light: String,
    pub text_muted: String,
    /// 讨论问题页的角色行
    pub role_color: String,

    /// 正文与标题字体（拉丁文与东亚文字共用）
    pub font: String,

    pub size_title: f64,
    pub size_heading: f64,
    pub size_body: f64,
    pub size_small: f64,
    pub size_caption: f64,

    /// 16:9 画布
    pub slide_width_emu: i64,
    pub slide_height_emu: i64,

    /// 内容区起点（标题与分隔线之下）
    pub content_top: f64,
    /// 内容区底线，超过即换页
    pub content_bottom: f64,

    pub max_key_findings: usize,
    pub max_news: usize,
    pub max_segments: usize,
    pub max_similar_cases: usize,
    pub max_questions: usize,
    pub questions_per_slide: usize,
    pub max_sources: usize,
}

impl Default for DeckStyle {
    fn default() -> Self {
        Self {
            primary: String::from("1A1A2E"),
            secondary: String::from("16213E"),
            accent: String::from("0F3460"),
            highlight: String::from("E94560"),
            positive: String::from("27AE60"),
            negative: String::from("E74C3C"),
            bg_light: String::from("F5F5F5"),
            text_dark: String::from("333333"),
            text_light: String::from("FFFFFF"),
            text_muted: String::from("666666"),
            role_color: String::from("2980B9"),
            font: String::from("Noto Sans JP"),
            size_title: 28.0,
            size_heading: 20.0,
            size_body: 12.0,
            size_small: 10.0,
            size_caption: 8.0,
            slide_width_emu: 12_192_000,
            slide_height_emu: 6_858_000,
            content_top: 1.2,
            content_bottom: 6.8,
            max_key_findings: 5,
            max_news: 4,
            max_segments: 5,
            max_similar_cases: 3,
            max_questions: 30,
            questions_per_slide: 12,
            max_sources: 20,
        }
    }
}
