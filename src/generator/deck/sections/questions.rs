use anyhow::Result;

use crate::generator::deck::sections::{DeckSection, SectionContext, is_blank, wrapped};
use crate::generator::deck::{Frame, Paragraph, SectionCursor, Slide, SlideKind};
use crate::types::research::DEFAULT_QUESTION_ROLE;
use crate::utils::text::truncate;

pub const QUESTIONS_TITLE: &str = "考えるべき問い";

const QUESTION_BUDGET: usize = 120;
const QUESTIONS_TOP: f64 = 1.3;
const QUESTION_STEP: f64 = 0.42;

/// 讨论问题：每页最多 questions_per_slide 个，编号跨页连续
pub struct QuestionsSection;

impl DeckSection for QuestionsSection {
    fn name(&self) -> &'static str {
        "questions"
    }

    fn build(&self, context: &SectionContext<'_>) -> Result<Vec<Slide>> {
        let questions = &context.result.questions;
        if questions.questions.is_empty() {
            return Ok(Vec::new());
        }
        let style = context.style;

        let role = if is_blank(&questions.role) {
            DEFAULT_QUESTION_ROLE
        } else {
            questions.role.as_str()
        };
        let mut cursor = SectionCursor::new(SlideKind::Questions, QUESTIONS_TITLE, style)
            .numbered()
            .with_top(QUESTIONS_TOP)
            .with_item_cap(style.questions_per_slide)
            .with_subtitle(
                Paragraph::new(format!("🎭 {} の視点から", role), style.size_small, &style.role_color)
                    .bold(),
            );

        for (index, question) in questions
            .questions
            .iter()
            .take(style.max_questions)
            .enumerate()
        {
            let y = cursor.place_item(QUESTION_STEP);
            cursor.push(wrapped(
                Frame::new(0.6, y, 10.8, 0.35),
                Paragraph::new(
                    format!("{}. {}", index + 1, truncate(question, QUESTION_BUDGET)),
                    9.0,
                    &style.text_dark,
                ),
            ));
        }

        Ok(cursor.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::chart::ChartStyle;
    use crate::generator::deck::DeckStyle;
    use crate::types::ResearchResult;

    fn build(result: &ResearchResult) -> Vec<Slide> {
        let style = DeckStyle::default();
        let chart = ChartStyle::default();
        QuestionsSection
            .build(&SectionContext {
                result,
                style: &style,
                chart: &chart,
            })
            .unwrap()
    }

    fn count_questions(slide: &Slide) -> usize {
        slide
            .texts()
            .iter()
            .filter(|t| t.chars().next().is_some_and(|c| c.is_ascii_digit()))
            .count()
    }

    #[test]
    fn test_twenty_five_questions_paginate_12_12_1() {
        let mut result = ResearchResult::new("Acme", "小売");
        result.questions.questions = (1..=25).map(|i| format!("問い{}", i)).collect();

        let slides = build(&result);
        let counts: Vec<_> = slides.iter().map(count_questions).collect();
        assert_eq!(counts, vec![12, 12, 1]);
        assert_eq!(slides[0].title, "考えるべき問い（1）");
        assert_eq!(slides[2].title, "考えるべき問い（3）");
        assert!(slides[2].texts().contains(&"25. 問い25".to_string()));
        assert!(
            slides[1]
                .texts()
                .contains(&"🎭 総合的なマーケティング担当者 の視点から".to_string())
        );
    }

    #[test]
    fn test_questions_capped_at_thirty() {
        let mut result = ResearchResult::new("Acme", "小売");
        result.questions.role = "店長".to_string();
        result.questions.questions = (1..=40).map(|i| format!("問い{}", i)).collect();

        let slides = build(&result);
        let total: usize = slides.iter().map(count_questions).sum();
        assert_eq!(total, 30);
        assert!(slides[0].texts().contains(&"🎭 店長 の視点から".to_string()));
    }

    #[test]
    fn test_no_questions_no_slide() {
        let result = ResearchResult::new("Acme", "小売");
        assert!(build(&result).is_empty());
    }

    #[test]
    fn test_single_page_has_plain_title() {
        let mut result = ResearchResult::new("Acme", "小売");
        result.questions.questions = vec!["問い".to_string()];
        assert_eq!(build(&result)[0].title, QUESTIONS_TITLE);
    }
}
