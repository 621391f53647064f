use anyhow::Result;

use crate::generator::chart::render_timeline;
use crate::generator::deck::sections::{
    DeckSection, SectionContext, heading, is_blank, line, wrapped,
};
use crate::generator::deck::{
    DeckStyle, Frame, Paragraph, Picture, SectionCursor, Shape, Slide, SlideKind, TextBox,
    overlay_labels,
};
use crate::types::{CompanyInfo, SnsInfo, Tone};
use crate::utils::text::truncate;

pub const OVERVIEW_TITLE: &str = "Company - 企業概要";
pub const HISTORY_TITLE: &str = "Company - 沿革・最新動向";
pub const BRAND_TITLE: &str = "Company - ブランド評価・SNS分析";

const FIELD_BUDGET: usize = 200;
const NEWS_TITLE_BUDGET: usize = 60;
const NEWS_SUMMARY_BUDGET: usize = 80;
/// 短于此字符数的字段使用较矮的行
const SHORT_FIELD_CHARS: usize = 80;

const SHORT_FIELD_BLOCK: f64 = 0.7;
const LONG_FIELD_BLOCK: f64 = 1.0;
const TIMELINE_BLOCK: f64 = 2.5;
const NEWS_HEADING_BLOCK: f64 = 0.5;
const NEWS_BLOCK: f64 = 0.85;
const MOMENTUM_BLOCK: f64 = 1.6;
const SNS_BLOCK: f64 = 1.0;

/// Company章节：企业概要、沿革与新闻、品牌与SNS（有数据时）
pub struct CompanySection;

impl DeckSection for CompanySection {
    fn name(&self) -> &'static str {
        "company"
    }

    fn build(&self, context: &SectionContext<'_>) -> Result<Vec<Slide>> {
        let mut slides = overview_slides(&context.result.company, context.style);
        slides.extend(history_slides(context)?);
        slides.extend(brand_slides(&context.result.company, context.style));
        Ok(slides)
    }
}

fn overview_slides(company: &CompanyInfo, style: &DeckStyle) -> Vec<Slide> {
    let mut cursor = SectionCursor::new(SlideKind::CompanyOverview, OVERVIEW_TITLE, style)
        .with_bar(&style.accent);

    let fields = [
        ("企業名", &company.name),
        ("公式HP", &company.official_url),
        ("理念・ビジョン", &company.mission_vision),
        ("事業概要", &company.business_overview),
        ("主要商品・サービス", &company.products_services),
    ];
    for (label, value) in fields {
        if is_blank(value) {
            continue;
        }
        let block = if value.chars().count() <= SHORT_FIELD_CHARS {
            SHORT_FIELD_BLOCK
        } else {
            LONG_FIELD_BLOCK
        };
        let y = cursor.place(block);
        cursor.push(line(
            Frame::new(0.5, y, 2.5, 0.3),
            Paragraph::new(label, style.size_body, &style.accent).bold(),
        ));
        cursor.push(wrapped(
            Frame::new(3.2, y, 8.5, 0.5),
            Paragraph::new(truncate(value, FIELD_BUDGET), style.size_body, &style.text_dark),
        ));
    }

    cursor.finish()
}

fn history_slides(context: &SectionContext<'_>) -> Result<Vec<Slide>> {
    let style = context.style;
    let company = &context.result.company;
    let mut cursor =
        SectionCursor::new(SlideKind::CompanyHistory, HISTORY_TITLE, style).with_bar(&style.accent);

    if let Some(chart) = render_timeline(&company.timeline, context.chart)? {
        let y = cursor.place(TIMELINE_BLOCK);
        let frame = Frame::new(0.8, y, 10.4, 2.5);
        let labels = overlay_labels(frame, &chart.scene);
        cursor.push(Shape::Picture(Picture {
            frame,
            png: chart.png,
            scene: Some(chart.scene),
        }));
        for label in labels {
            cursor.push(label);
        }
    }

    let y = cursor.place(NEWS_HEADING_BLOCK);
    cursor.push(heading(Frame::new(0.5, y, 11.0, 0.4), "最新ニュース", style));

    for news in company.recent_news.iter().take(style.max_news) {
        let y = cursor.place(NEWS_BLOCK);
        let date = if is_blank(&news.date) {
            String::new()
        } else {
            format!("[{}] ", news.date)
        };
        let mut text_box = TextBox::new(
            Frame::new(0.7, y, 10.5, 0.7),
            Paragraph::new(
                format!("{}{}", date, truncate(&news.title, NEWS_TITLE_BUDGET)),
                style.size_body,
                &style.text_dark,
            ),
        )
        .wrapped();
        if !is_blank(&news.summary) {
            text_box = text_box.push(Paragraph::new(
                format!("  {}", truncate(&news.summary, NEWS_SUMMARY_BUDGET)),
                style.size_small,
                &style.text_muted,
            ));
        }
        cursor.push_text(text_box);
    }

    Ok(cursor.finish())
}

fn brand_slides(company: &CompanyInfo, style: &DeckStyle) -> Vec<Slide> {
    if company.sns_analysis.is_empty() && is_blank(&company.brand_momentum) {
        return Vec::new();
    }
    let mut cursor =
        SectionCursor::new(SlideKind::CompanyBrand, BRAND_TITLE, style).with_bar(&style.accent);

    if !is_blank(&company.brand_momentum) {
        let y = cursor.place(MOMENTUM_BLOCK);
        cursor.push(heading(Frame::new(0.5, y, 11.0, 0.4), "ブランドの勢い・熱量", style));
        cursor.push(wrapped(
            Frame::new(0.7, y + 0.5, 10.5, 0.8),
            Paragraph::new(
                truncate(&company.brand_momentum, FIELD_BUDGET),
                style.size_body,
                &style.text_dark,
            ),
        ));
    }

    for sns in &company.sns_analysis {
        let y = cursor.place(SNS_BLOCK);
        cursor.push(line(
            Frame::new(0.5, y, 11.0, 0.35),
            Paragraph::new(
                format!("{}  [トーン: {}]", sns.platform, sns.tone),
                style.size_body,
                tone_color(sns, style),
            )
            .bold(),
        ));

        let mut detail = TextBox::new(
            Frame::new(0.7, y + 0.35, 10.5, 0.6),
            Paragraph::new(
                truncate(&sns.summary, FIELD_BUDGET),
                style.size_body,
                &style.text_dark,
            ),
        )
        .wrapped();
        if !sns.key_topics.is_empty() {
            detail = detail.push(Paragraph::new(
                format!("主な話題: {}", sns.key_topics.join(", ")),
                style.size_small,
                &style.text_muted,
            ));
        }
        cursor.push_text(detail);
    }

    cursor.finish()
}

/// 正面为绿、负面为红，其余使用正文颜色
pub fn tone_color<'s>(sns: &SnsInfo, style: &'s DeckStyle) -> &'s str {
    match sns.tone_kind() {
        Tone::Positive => &style.positive,
        Tone::Negative => &style.negative,
        Tone::Neutral | Tone::Unknown => &style.text_dark,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::chart::ChartStyle;
    use crate::types::{NewsItem, ResearchResult, TimelineEvent};

    fn build(result: &ResearchResult) -> Vec<Slide> {
        let style = DeckStyle::default();
        let chart = ChartStyle::default();
        CompanySection
            .build(&SectionContext {
                result,
                style: &style,
                chart: &chart,
            })
            .unwrap()
    }

    fn news(title: &str) -> NewsItem {
        NewsItem {
            title: title.to_string(),
            date: "2025-01".to_string(),
            summary: "概要".to_string(),
            url: String::new(),
        }
    }

    #[test]
    fn test_minimal_company_has_overview_and_history_only() {
        let result = ResearchResult::new("Acme", "小売");
        let slides = build(&result);
        let kinds: Vec<_> = slides.iter().map(|s| s.kind).collect();
        assert_eq!(kinds, vec![SlideKind::CompanyOverview, SlideKind::CompanyHistory]);
        // 新闻标题始终显示
        assert!(slides[1].texts().contains(&"最新ニュース".to_string()));
    }

    #[test]
    fn test_overview_skips_empty_fields_and_truncates() {
        let mut result = ResearchResult::new("Acme", "小売");
        result.company.name = "Acme".to_string();
        result.company.business_overview = "あ".repeat(250);

        let slides = build(&result);
        let texts = slides[0].texts();
        assert!(texts.contains(&"企業名".to_string()));
        assert!(!texts.contains(&"公式HP".to_string()));
        let overview = texts
            .iter()
            .find(|t| t.starts_with('あ'))
            .unwrap();
        assert_eq!(overview.chars().count(), 201);
    }

    #[test]
    fn test_timeline_picture_and_news_cap() {
        let mut result = ResearchResult::new("Acme", "小売");
        result.company.timeline = vec![
            TimelineEvent {
                year: "1990".to_string(),
                description: "創業".to_string(),
            },
            TimelineEvent {
                year: "2005".to_string(),
                description: "上場".to_string(),
            },
        ];
        result.company.recent_news = (0..6).map(|i| news(&format!("ニュース{}", i))).collect();

        let slides = build(&result);
        let history: Vec<_> = slides
            .iter()
            .filter(|s| s.kind == SlideKind::CompanyHistory)
            .collect();
        assert_eq!(history[0].pictures().count(), 1);
        assert!(history[0].texts().contains(&"1990\n創業".to_string()));

        let news_count: usize = history
            .iter()
            .map(|s| {
                s.texts()
                    .iter()
                    .filter(|t| t.starts_with("[2025-01] "))
                    .count()
            })
            .sum();
        assert_eq!(news_count, 4);
        assert_eq!(history[1].title, "Company - 沿革・最新動向（続き）");
    }

    #[test]
    fn test_brand_slide_tone_colors() {
        let mut result = ResearchResult::new("Acme", "小売");
        result.company.sns_analysis = vec![SnsInfo {
            platform: "X".to_string(),
            summary: "好評".to_string(),
            tone: "ポジティブ".to_string(),
            key_topics: vec!["新商品".to_string(), "価格".to_string()],
        }];

        let slides = build(&result);
        let brand = slides
            .iter()
            .find(|s| s.kind == SlideKind::CompanyBrand)
            .unwrap();
        let platform_line = brand
            .shapes
            .iter()
            .find_map(|shape| match shape {
                Shape::Text(t) if t.text().starts_with("X  ") => Some(t.paragraphs[0].clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(platform_line.color, "27AE60");
        assert!(brand.texts().contains(&"好評\n主な話題: 新商品, 価格".to_string()));
    }

    #[test]
    fn test_brand_texts_are_truncated() {
        let mut result = ResearchResult::new("Acme", "小売");
        result.company.brand_momentum = "勢".repeat(600);
        result.company.sns_analysis = vec![SnsInfo {
            platform: "Instagram".to_string(),
            summary: "話".repeat(700),
            tone: "中立".to_string(),
            key_topics: Vec::new(),
        }];

        let slides = build(&result);
        let brand = slides
            .iter()
            .find(|s| s.kind == SlideKind::CompanyBrand)
            .unwrap();
        let texts = brand.texts();
        let momentum = texts.iter().find(|t| t.starts_with('勢')).unwrap();
        assert_eq!(momentum.chars().count(), 201);
        let summary = texts.iter().find(|t| t.starts_with('話')).unwrap();
        assert_eq!(summary.chars().count(), 201);
        assert!(summary.ends_with('…'));
    }

    #[test]
    fn test_unknown_tone_uses_body_color() {
        let style = DeckStyle::default();
        let sns = SnsInfo {
            tone: "ややポジティブ".to_string(),
            ..Default::default()
        };
        assert_eq!(tone_color(&sns, &style), style.text_dark);
    }
}
