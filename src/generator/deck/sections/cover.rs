use anyhow::Result;

use crate::generator::deck::sections::{DeckSection, SectionContext, line};
use crate::generator::deck::{Frame, Paragraph, Slide, SlideKind};

const SUBTITLE: &str = "3C分析レポート";
const SUBTITLE_COLOR: &str = "CCCCCC";
const META_COLOR: &str = "999999";

/// 封面：深色背景、客户名、报告名、分析日期与行业
pub struct CoverSection;

impl DeckSection for CoverSection {
    fn name(&self) -> &'static str {
        "cover"
    }

    fn build(&self, context: &SectionContext<'_>) -> Result<Vec<Slide>> {
        let style = context.style;
        let result = context.result;

        let mut slide = Slide::new(SlideKind::Cover, result.client_name.clone());
        slide.background = Some(style.primary.clone());
        slide.shapes = vec![
            line(
                Frame::new(1.0, 2.0, 10.0, 1.5),
                Paragraph::new(&result.client_name, 36.0, &style.text_light).bold(),
            ),
            line(
                Frame::new(1.0, 3.5, 10.0, 1.0),
                Paragraph::new(SUBTITLE, 20.0, SUBTITLE_COLOR),
            ),
            line(
                Frame::new(1.0, 4.5, 10.0, 0.5),
                Paragraph::new(format!("分析実施日: {}", result.created_at), 12.0, META_COLOR),
            ),
            line(
                Frame::new(1.0, 5.0, 10.0, 0.5),
                Paragraph::new(format!("業界: {}", result.industry), 12.0, META_COLOR),
            ),
        ];

        Ok(vec![slide])
    }
}
