//! 图表渲染：定位图与沿革图。
//!
//! PNG 中只包含图形（网格、轴线、标记、引线），文字标签作为 [`ChartScene`]
//! 的一部分输出，由幻灯片以可编辑文本框的形式叠加在图片上。

pub mod canvas;
pub mod positioning_map;
pub mod style;
pub mod timeline;

pub use positioning_map::{LABEL_OFFSETS, LabelPlacer, render_positioning_map};
pub use style::ChartStyle;
pub use timeline::render_timeline;

/// 渲染完成的图表
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedChart {
    pub png: Vec<u8>,
    pub scene: ChartScene,
    pub width_px: u32,
    pub height_px: u32,
}

/// 图表上的标记与文字，坐标为相对图片左上角的比例（0〜1）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartScene {
    pub markers: Vec<Marker>,
    pub labels: Vec<ChartLabel>,
}

impl ChartScene {
    pub fn count_markers(&self, shape: MarkerShape) -> usize {
        self.markers.iter().filter(|m| m.shape == shape).count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerShape {
    /// 分析对象
    Star,
    /// 直接竞争
    Square,
    /// 间接竞争
    Diamond,
    /// 沿革节点
    Dot,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub shape: MarkerShape,
    pub color: String,
    /// 数据坐标
    pub x: f64,
    pub y: f64,
    pub fx: f64,
    pub fy: f64,
}

/// 标签相对锚点的水平对齐
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelAlign {
    Left,
    Center,
    Right,
}

/// 标签相对锚点的垂直位置：Bottom 表示文字位于锚点之上
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelAnchor {
    Top,
    Middle,
    Bottom,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartLabel {
    pub text: String,
    /// 锚点（比例坐标）
    pub fx: f64,
    pub fy: f64,
    /// 相对锚点的偏移（pt，y 向上为正）
    pub offset_x_pt: f64,
    pub offset_y_pt: f64,
    pub color: String,
    pub size_pt: f64,
    pub bold: bool,
    pub align: LabelAlign,
    pub anchor: LabelAnchor,
    /// 竖排（纵轴标签）
    pub vertical: bool,
}

impl ChartLabel {
    pub fn new(text: impl Into<String>, fx: f64, fy: f64, color: &str, size_pt: f64) -> Self {
        Self {
            text: text.into(),
            fx,
            fy,
            offset_x_pt: 0.0,
            offset_y_pt: 0.0,
            color: color.to_string(),
            size_pt,
            bold: false,
            align: LabelAlign::Left,
            anchor: LabelAnchor::Bottom,
            vertical: false,
        }
    }

    pub fn offset(mut self, x_pt: f64, y_pt: f64) -> Self {
        self.offset_x_pt = x_pt;
        self.offset_y_pt = y_pt;
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn aligned(mut self, align: LabelAlign, anchor: LabelAnchor) -> Self {
        self.align = align;
        self.anchor = anchor;
        self
    }

    pub fn vertical(mut self) -> Self {
        self.vertical = true;
        self
    }
}

/// 图表内的绘图区，像素坐标
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
}

impl PlotArea {
    pub fn to_px(&self, x: f64, y: f64) -> (f64, f64) {
        let (x_min, x_max) = self.x_range;
        let (y_min, y_max) = self.y_range;
        let px = self.left + (x - x_min) / (x_max - x_min) * (self.right - self.left);
        let py = self.bottom - (y - y_min) / (y_max - y_min) * (self.bottom - self.top);
        (px, py)
    }
}
