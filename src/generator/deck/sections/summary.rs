use anyhow::Result;

use crate::generator::deck::sections::{DeckSection, SectionContext, heading, is_blank, wrapped};
use crate::generator::deck::{Frame, Paragraph, SectionCursor, Slide, SlideKind};
use crate::utils::text::truncate;

pub const SUMMARY_TITLE: &str = "Executive Summary";

const OVERVIEW_BLOCK: f64 = 1.0;
const HEADING_BLOCK: f64 = 0.6;
const FINDING_BLOCK: f64 = 0.55;

const OVERVIEW_BUDGET: usize = 200;
const FINDING_BUDGET: usize = 120;

/// 执行摘要：事业概要与Key Findings（最多 max_key_findings 条）
pub struct SummarySection;

impl DeckSection for SummarySection {
    fn name(&self) -> &'static str {
        "executive_summary"
    }

    fn build(&self, context: &SectionContext<'_>) -> Result<Vec<Slide>> {
        let style = context.style;
        let result = context.result;
        let mut cursor = SectionCursor::new(SlideKind::ExecutiveSummary, SUMMARY_TITLE, style)
            .with_bar(&style.highlight);

        let overview = if is_blank(&result.company.business_overview) {
            format!("{}は{}業界の企業です。", result.client_name, result.industry)
        } else {
            truncate(&result.company.business_overview, OVERVIEW_BUDGET)
        };
        let y = cursor.place(OVERVIEW_BLOCK);
        cursor.push(wrapped(
            Frame::new(0.5, y, 11.0, 0.8),
            Paragraph::new(overview, style.size_body, &style.text_dark),
        ));

        let y = cursor.place(HEADING_BLOCK);
        cursor.push(heading(Frame::new(0.5, y, 11.0, 0.5), "Key Findings", style));

        for (index, finding) in result
            .key_findings
            .iter()
            .take(style.max_key_findings)
            .enumerate()
        {
            let y = cursor.place(FINDING_BLOCK);
            cursor.push(wrapped(
                Frame::new(0.7, y, 10.5, 0.4),
                Paragraph::new(
                    format!("{}. {}", index + 1, truncate(finding, FINDING_BUDGET)),
                    style.size_body,
                    &style.text_dark,
                )
                .bold(),
            ));
        }

        Ok(cursor.finish())
    }
}
