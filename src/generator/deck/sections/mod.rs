//! 各章节的版面。每个章节从 [`ResearchResult`] 读取数据，通过 [`SectionCursor`] 排版，
//! 返回零到多张幻灯片。
//!
//! [`SectionCursor`]: crate::generator::deck::SectionCursor

use anyhow::Result;

use crate::generator::chart::ChartStyle;
use crate::generator::deck::{DeckStyle, Frame, Paragraph, Shape, Slide, TextBox};
use crate::types::ResearchResult;

pub mod appendix;
pub mod company;
pub mod competitor;
pub mod cover;
pub mod customer;
pub mod perspective;
pub mod questions;
pub mod summary;

pub use appendix::AppendixSection;
pub use company::CompanySection;
pub use competitor::CompetitorSection;
pub use cover::CoverSection;
pub use customer::CustomerSection;
pub use perspective::PerspectiveSection;
pub use questions::QuestionsSection;
pub use summary::SummarySection;

/// 章节排版时可用的输入
pub struct SectionContext<'a> {
    pub result: &'a ResearchResult,
    pub style: &'a DeckStyle,
    pub chart: &'a ChartStyle,
}

/// 演示文稿中的一个章节
pub trait DeckSection: Send + Sync {
    fn name(&self) -> &'static str;

    /// 没有内容的可选章节返回空列表
    fn build(&self, context: &SectionContext<'_>) -> Result<Vec<Slide>>;
}

/// 固定的章节顺序
pub fn default_sections() -> Vec<Box<dyn DeckSection>> {
    vec![
        Box::new(CoverSection),
        Box::new(SummarySection),
        Box::new(CompanySection),
        Box::new(CompetitorSection),
        Box::new(CustomerSection),
        Box::new(PerspectiveSection),
        Box::new(QuestionsSection),
        Box::new(AppendixSection),
    ]
}

/// 自动换行的文本框
pub(crate) fn wrapped(frame: Frame, paragraph: Paragraph) -> Shape {
    Shape::Text(TextBox::new(frame, paragraph).wrapped())
}

/// 单行文本框
pub(crate) fn line(frame: Frame, paragraph: Paragraph) -> Shape {
    Shape::Text(TextBox::new(frame, paragraph))
}

/// 小标题
pub(crate) fn heading(frame: Frame, text: &str, style: &DeckStyle) -> Shape {
    line(
        frame,
        Paragraph::new(text, style.size_heading, &style.secondary).bold(),
    )
}

pub(crate) fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}
