use anyhow::Result;

use crate::generator::deck::sections::{DeckSection, SectionContext, is_blank};
use crate::generator::deck::{Frame, Paragraph, SectionCursor, Slide, SlideKind, TextBox};
use crate::utils::text::truncate;

pub const APPENDIX_TITLE: &str = "付録 - 情報ソース一覧";

const TITLE_BUDGET: usize = 80;
const URL_BUDGET: usize = 100;
const SOURCES_TOP: f64 = 1.3;
const SOURCE_BLOCK: f64 = 0.4;
const URL_COLOR: &str = "888888";

/// 附录：信息来源一览，即使没有来源也输出一页
pub struct AppendixSection;

impl DeckSection for AppendixSection {
    fn name(&self) -> &'static str {
        "appendix"
    }

    fn build(&self, context: &SectionContext<'_>) -> Result<Vec<Slide>> {
        let style = context.style;
        let result = context.result;

        let note = format!(
            "分析実施日: {}　|　情報ソース数: {}件",
            result.created_at,
            result.sources.len()
        );
        let mut cursor = SectionCursor::new(SlideKind::Appendix, APPENDIX_TITLE, style)
            .with_top(SOURCES_TOP)
            .with_subtitle(Paragraph::new(note, style.size_small, &style.text_muted));

        for (index, source) in result.sources.iter().take(style.max_sources).enumerate() {
            let y = cursor.place(SOURCE_BLOCK);
            let title = if is_blank(&source.title) {
                &source.url
            } else {
                &source.title
            };
            cursor.push_text(
                TextBox::new(
                    Frame::new(0.5, y, 11.0, 0.3),
                    Paragraph::new(
                        format!("{}. {}", index + 1, truncate(title, TITLE_BUDGET)),
                        style.size_small,
                        &style.text_dark,
                    ),
                )
                .push(Paragraph::new(
                    format!("   {}", truncate(&source.url, URL_BUDGET)),
                    style.size_caption,
                    URL_COLOR,
                )),
            );
        }

        Ok(cursor.finish())
    }
}
