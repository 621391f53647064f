use anyhow::{Context, Result};
use tracing::debug;

use crate::generator::chart::ChartStyle;
use crate::generator::deck::sections::{DeckSection, SectionContext, default_sections};
use crate::generator::deck::{Deck, DeckStyle};
use crate::types::ResearchResult;

/// 按固定章节顺序将研究结果排版为 [`Deck`]
pub struct DeckBuilder {
    style: DeckStyle,
    chart: ChartStyle,
    sections: Vec<Box<dyn DeckSection>>,
}

impl DeckBuilder {
    pub fn new(style: DeckStyle, chart: ChartStyle) -> Self {
        Self {
            style,
            chart,
            sections: default_sections(),
        }
    }

    pub fn style(&self) -> &DeckStyle {
        &self.style
    }

    pub fn build(&self, result: &ResearchResult) -> Result<Deck> {
        let context = SectionContext {
            result,
            style: &self.style,
            chart: &self.chart,
        };

        let mut slides = Vec::new();
        for section in &self.sections {
            let built = section
                .build(&context)
                .with_context(|| format!("Failed to lay out section: {}", section.name()))?;
            debug!(section = section.name(), slides = built.len(), "section laid out");
            slides.extend(built);
        }

        Ok(Deck {
            slides,
            width_emu: self.style.slide_width_emu,
            height_emu: self.style.slide_height_emu,
        })
    }
}

impl Default for DeckBuilder {
    fn default() -> Self {
        Self::new(DeckStyle::default(), ChartStyle::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::deck::SlideKind;
    use crate::types::Competitor;

    #[test]
    fn test_section_order() {
        let mut result = ResearchResult::new("Acme", "小売");
        result.competitor.direct_competitors = vec![Competitor {
            name: "Beta".to_string(),
            ..Default::default()
        }];
        result.perspective.executive.needs = "成長".to_string();
        result.questions.questions = vec!["問い".to_string()];

        let deck = DeckBuilder::default().build(&result).unwrap();
        let kinds: Vec<_> = deck.slides.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SlideKind::Cover,
                SlideKind::ExecutiveSummary,
                SlideKind::CompanyOverview,
                SlideKind::CompanyHistory,
                SlideKind::CompetitorMap,
                SlideKind::CompetitorTable,
                SlideKind::Customer,
                SlideKind::Perspective,
                SlideKind::Questions,
                SlideKind::Appendix,
            ]
        );
        assert_eq!(deck.width_emu, 12_192_000);
        assert_eq!(deck.height_emu, 6_858_000);
    }

    #[test]
    fn test_minimal_result_omits_optional_sections() {
        let result = ResearchResult::new("Acme", "小売");
        let deck = DeckBuilder::default().build(&result).unwrap();

        assert!(!deck.has(SlideKind::CompanyBrand));
        assert!(!deck.has(SlideKind::CompetitorTable));
        assert!(!deck.has(SlideKind::Perspective));
        assert!(!deck.has(SlideKind::Questions));
        assert_eq!(deck.slides_of(SlideKind::Appendix).count(), 1);
    }
}
