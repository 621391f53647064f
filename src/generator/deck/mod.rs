//! 幻灯片版面引擎：将 [`ResearchResult`](crate::types::ResearchResult) 排版为与文件格式无关的 [`Deck`]。
//!
//! 所有坐标与尺寸的单位为英寸，字号为pt。

pub mod builder;
pub mod cursor;
pub mod sections;
pub mod style;

pub use builder::DeckBuilder;
pub use cursor::SectionCursor;
pub use style::DeckStyle;

use crate::generator::chart::{ChartLabel, ChartScene, LabelAlign, LabelAnchor};

pub const EMU_PER_INCH: f64 = 914_400.0;
pub const POINTS_PER_INCH: f64 = 72.0;

/// 矩形区域（英寸）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Frame {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn at_y(mut self, top: f64) -> Self {
        self.top = top;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlideKind {
    Cover,
    ExecutiveSummary,
    CompanyOverview,
    CompanyHistory,
    CompanyBrand,
    CompetitorMap,
    CompetitorTable,
    Customer,
    Perspective,
    Questions,
    Appendix,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// 文本框中的垂直对齐
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Top,
    Middle,
    Bottom,
}

/// 单一样式的段落，文本中的 `\n` 在输出时成为换行
#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    pub text: String,
    pub size_pt: f64,
    pub bold: bool,
    pub color: String,
    pub align: Align,
}

impl Paragraph {
    pub fn new(text: impl Into<String>, size_pt: f64, color: &str) -> Self {
        Self {
            text: text.into(),
            size_pt,
            bold: false,
            color: color.to_string(),
            align: Align::Left,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextBox {
    pub frame: Frame,
    pub paragraphs: Vec<Paragraph>,
    /// 自动换行
    pub wrap: bool,
    /// 去掉内边距（图表标签）
    pub tight: bool,
    /// 竖排
    pub vertical: bool,
    pub anchor: TextAnchor,
}

impl TextBox {
    pub fn new(frame: Frame, paragraph: Paragraph) -> Self {
        Self {
            frame,
            paragraphs: vec![paragraph],
            wrap: false,
            tight: false,
            vertical: false,
            anchor: TextAnchor::Top,
        }
    }

    pub fn wrapped(mut self) -> Self {
        self.wrap = true;
        self
    }

    pub fn push(mut self, paragraph: Paragraph) -> Self {
        self.paragraphs.push(paragraph);
        self
    }

    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Geometry {
    Rect,
    Ellipse,
}

/// 无边框的纯色图形
#[derive(Debug, Clone, PartialEq)]
pub struct FilledShape {
    pub frame: Frame,
    pub geometry: Geometry,
    pub fill: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Picture {
    pub frame: Frame,
    pub png: Vec<u8>,
    /// 图表的标记与标签（标签另以文本框叠加）
    pub scene: Option<ChartScene>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableCell {
    pub text: String,
    pub size_pt: f64,
    pub bold: bool,
    pub color: String,
    pub fill: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub height: f64,
    pub cells: Vec<TableCell>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub frame: Frame,
    pub column_widths: Vec<f64>,
    pub rows: Vec<TableRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Text(TextBox),
    Filled(FilledShape),
    Picture(Picture),
    Table(Table),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Slide {
    pub kind: SlideKind,
    pub title: String,
    /// 背景色，None 为白色
    pub background: Option<String>,
    pub shapes: Vec<Shape>,
}

impl Slide {
    pub fn new(kind: SlideKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            background: None,
            shapes: Vec::new(),
        }
    }

    /// 幻灯片上所有文本框与表格中的文字
    pub fn texts(&self) -> Vec<String> {
        self.shapes
            .iter()
            .flat_map(|shape| match shape {
                Shape::Text(text_box) => vec![text_box.text()],
                Shape::Table(table) => table
                    .rows
                    .iter()
                    .flat_map(|row| row.cells.iter().map(|cell| cell.text.clone()))
                    .collect(),
                Shape::Filled(_) | Shape::Picture(_) => Vec::new(),
            })
            .collect()
    }

    pub fn pictures(&self) -> impl Iterator<Item = &Picture> {
        self.shapes.iter().filter_map(|shape| match shape {
            Shape::Picture(picture) => Some(picture),
            _ => None,
        })
    }
}

/// 排版完成的演示文稿
#[derive(Debug, Clone, PartialEq)]
pub struct Deck {
    pub slides: Vec<Slide>,
    pub width_emu: i64,
    pub height_emu: i64,
}

impl Deck {
    pub fn slides_of(&self, kind: SlideKind) -> impl Iterator<Item = &Slide> {
        self.slides.iter().filter(move |slide| slide.kind == kind)
    }

    pub fn has(&self, kind: SlideKind) -> bool {
        self.slides_of(kind).next().is_some()
    }
}

/// 估算标签文本的尺寸（英寸），全角字符按1em、半角按0.55em
fn estimate_text_size(text: &str, size_pt: f64) -> (f64, f64) {
    let em = size_pt / POINTS_PER_INCH;
    let lines: Vec<&str> = text.split('\n').collect();
    let widest = lines
        .iter()
        .map(|line| {
            line.chars()
                .map(|c| if c.is_ascii() { 0.55 } else { 1.0 })
                .sum::<f64>()
        })
        .fold(0.0, f64::max);
    (widest * em + 0.08, lines.len() as f64 * em * 1.25 + 0.04)
}

/// 将图表标签转换为叠加在图片上的文本框
pub fn overlay_labels(picture: Frame, scene: &ChartScene) -> Vec<Shape> {
    scene
        .labels
        .iter()
        .map(|label| Shape::Text(overlay_label(picture, label)))
        .collect()
}

fn overlay_label(picture: Frame, label: &ChartLabel) -> TextBox {
    let size_pt = label.size_pt;
    let anchor_x = picture.left + label.fx * picture.width + label.offset_x_pt / POINTS_PER_INCH;
    let anchor_y = picture.top + label.fy * picture.height - label.offset_y_pt / POINTS_PER_INCH;

    let (mut width, mut height) = estimate_text_size(&label.text, size_pt);
    if label.vertical {
        std::mem::swap(&mut width, &mut height);
    }

    let left = match label.align {
        LabelAlign::Left => anchor_x,
        LabelAlign::Center => anchor_x - width / 2.0,
        LabelAlign::Right => anchor_x - width,
    };
    let top = match label.anchor {
        LabelAnchor::Top => anchor_y,
        LabelAnchor::Middle => anchor_y - height / 2.0,
        LabelAnchor::Bottom => anchor_y - height,
    };
    let align = match label.align {
        LabelAlign::Left => Align::Left,
        LabelAlign::Center => Align::Center,
        LabelAlign::Right => Align::Right,
    };

    let mut paragraph = Paragraph::new(&label.text, size_pt, &label.color).align(align);
    paragraph.bold = label.bold;

    TextBox {
        frame: Frame::new(left, top, width, height),
        paragraphs: vec![paragraph],
        wrap: false,
        tight: true,
        vertical: label.vertical,
        anchor: match label.anchor {
            LabelAnchor::Top => TextAnchor::Top,
            LabelAnchor::Middle => TextAnchor::Middle,
            LabelAnchor::Bottom => TextAnchor::Bottom,
        },
    }
}
