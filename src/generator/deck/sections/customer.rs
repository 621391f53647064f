use anyhow::Result;

use crate::generator::deck::sections::{
    DeckSection, SectionContext, heading, is_blank, line, wrapped,
};
use crate::generator::deck::{Frame, Paragraph, SectionCursor, Slide, SlideKind, TextBox};
use crate::types::CustomerInfo;
use crate::utils::text::truncate;

pub const CUSTOMER_TITLE: &str = "Customer - 市場・顧客分析";

const MARKET_BUDGET: usize = 200;
const SEGMENT_BUDGET: usize = 40;
const CASE_BUDGET: usize = 100;
const RELEVANCE_BUDGET: usize = 80;

const MARKET_SIZE_BLOCK: f64 = 1.1;
const MARKET_TREND_BLOCK: f64 = 1.3;
const TARGET_BLOCK: f64 = 1.3;
const CASES_HEADING_BLOCK: f64 = 0.4;
const CASE_BLOCK: f64 = 1.2;

/// Customer章节：市场规模、趋势、目标客群与类似案例
pub struct CustomerSection;

impl DeckSection for CustomerSection {
    fn name(&self) -> &'static str {
        "customer"
    }

    fn build(&self, context: &SectionContext<'_>) -> Result<Vec<Slide>> {
        let style = context.style;
        let customer: &CustomerInfo = &context.result.customer;
        let mut cursor = SectionCursor::new(SlideKind::Customer, CUSTOMER_TITLE, style)
            .with_bar(&style.positive);

        let market = [
            ("市場規模", &customer.market_size, MARKET_SIZE_BLOCK, 0.5),
            ("市場トレンド", &customer.market_trend, MARKET_TREND_BLOCK, 0.7),
        ];
        for (title, value, block, value_height) in market {
            if is_blank(value) {
                continue;
            }
            let y = cursor.place(block);
            cursor.push(heading(Frame::new(0.5, y, 11.0, 0.3), title, style));
            cursor.push(wrapped(
                Frame::new(0.7, y + 0.35, 10.5, value_height),
                Paragraph::new(truncate(value, MARKET_BUDGET), style.size_body, &style.text_dark),
            ));
        }

        if customer.has_target() {
            let y = cursor.place(TARGET_BLOCK);
            cursor.push(heading(Frame::new(0.5, y, 11.0, 0.3), "ターゲット顧客層", style));

            let mut paragraphs = Vec::new();
            if !customer.target_segments.is_empty() {
                let segments = customer
                    .target_segments
                    .iter()
                    .take(style.max_segments)
                    .map(|segment| format!("・{}", truncate(segment, SEGMENT_BUDGET)))
                    .collect::<Vec<_>>()
                    .join("\n");
                paragraphs.push(Paragraph::new(segments, style.size_body, &style.text_dark));
            }
            if !is_blank(&customer.target_description) {
                paragraphs.push(Paragraph::new(
                    truncate(&customer.target_description, MARKET_BUDGET),
                    style.size_small,
                    &style.text_dark,
                ));
            }
            let frame = Frame::new(0.7, y + 0.35, 10.5, 0.7);
            let mut paragraphs = paragraphs.into_iter();
            if let Some(first) = paragraphs.next() {
                let text_box = paragraphs.fold(TextBox::new(frame, first).wrapped(), TextBox::push);
                cursor.push_text(text_box);
            }
        }

        if !customer.similar_cases.is_empty() {
            // 小标题与第一个案例保持在同一页
            cursor.ensure(CASES_HEADING_BLOCK + CASE_BLOCK);
            let y = cursor.place(CASES_HEADING_BLOCK);
            cursor.push(heading(Frame::new(0.5, y, 11.0, 0.3), "類似事例・参考企業", style));

            for case in customer.similar_cases.iter().take(style.max_similar_cases) {
                let y = cursor.place(CASE_BLOCK);
                cursor.push(line(
                    Frame::new(0.7, y, 10.5, 0.3),
                    Paragraph::new(
                        format!("{}（{}）", case.company, case.industry),
                        style.size_body,
                        &style.accent,
                    )
                    .bold(),
                ));

                let mut detail = TextBox::new(
                    Frame::new(0.9, y + 0.3, 10.3, 0.7),
                    Paragraph::new(truncate(&case.description, CASE_BUDGET), 9.0, &style.text_dark),
                )
                .wrapped();
                if !is_blank(&case.relevance) {
                    detail = detail.push(Paragraph::new(
                        format!("→ {}", truncate(&case.relevance, RELEVANCE_BUDGET)),
                        8.0,
                        &style.text_muted,
                    ));
                }
                cursor.push_text(detail);
            }
        }

        Ok(cursor.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::chart::ChartStyle;
    use crate::generator::deck::DeckStyle;
    use crate::types::{ResearchResult, SimilarCase};

    fn build(result: &ResearchResult) -> Vec<Slide> {
        let style = DeckStyle::default();
        let chart = ChartStyle::default();
        CustomerSection
            .build(&SectionContext {
                result,
                style: &style,
                chart: &chart,
            })
            .unwrap()
    }

    fn case(company: &str) -> SimilarCase {
        SimilarCase {
            company: company.to_string(),
            industry: "小売".to_string(),
            description: "成功事例".to_string(),
            relevance: "参考になる".to_string(),
        }
    }

    #[test]
    fn test_empty_customer_still_has_slide() {
        let result = ResearchResult::new("Acme", "小売");
        let slides = build(&result);
        assert_eq!(slides.len(), 1);
        assert_eq!(slides[0].title, CUSTOMER_TITLE);
    }

    #[test]
    fn test_segments_capped_and_truncated() {
        let mut result = ResearchResult::new("Acme", "小売");
        result.customer.target_segments = (0..7).map(|i| format!("層{}", i)).collect();
        result.customer.target_segments[0] = "あ".repeat(50);
        result.customer.target_description = "説明".to_string();

        let texts = build(&result)[0].texts();
        let expected = format!("・{}…\n・層1\n・層2\n・層3\n・層4\n説明", "あ".repeat(40));
        assert!(texts.contains(&expected));
    }

    #[test]
    fn test_full_customer_overflows_to_continuation() {
        let mut result = ResearchResult::new("Acme", "小売");
        result.customer.market_size = "1兆円".to_string();
        result.customer.market_trend = "拡大".to_string();
        result.customer.target_segments = vec!["20代".to_string()];
        result.customer.similar_cases = vec![case("A社"), case("B社"), case("C社"), case("D社")];

        let slides = build(&result);
        // 1.2 + 1.1 + 1.3 + 1.3 = 4.9，4.9 + 0.4 + 1.2 = 6.5，第二个案例换页
        assert_eq!(slides.len(), 2);
        assert_eq!(slides[1].title, "Customer - 市場・顧客分析（続き）");
        let all: Vec<String> = slides.iter().flat_map(|s| s.texts()).collect();
        assert!(all.contains(&"C社（小売）".to_string()));
        assert!(!all.contains(&"D社（小売）".to_string()));
        assert!(all.contains(&"成功事例\n→ 参考になる".to_string()));
    }
}
