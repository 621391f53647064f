use anyhow::Result;

use crate::generator::deck::sections::{DeckSection, SectionContext, is_blank, line, wrapped};
use crate::generator::deck::{Align, Frame, Paragraph, SectionCursor, Slide, SlideKind};
use crate::types::PerspectiveView;
use crate::utils::text::truncate;

pub const PERSPECTIVE_TITLE: &str = "立場別ニーズ分析";
pub const NO_INFORMATION: &str = "（情報なし）";

const VALUE_BUDGET: usize = 200;
const COLUMN_LEFT: f64 = 0.4;
const COLUMN_WIDTH: f64 = 3.5;
const COLUMN_GAP: f64 = 0.25;
const HEADER_TOP: f64 = 1.0;
const ITEM_TOP: f64 = 1.5;
const ITEM_STEP: f64 = 1.8;

struct Column<'a> {
    title: &'static str,
    color: &'a str,
    view: &'a PerspectiveView,
    labels: [&'static str; 3],
}

/// 按立场的需求分析：经营者、现场、顾客三栏；三个立场都没有needs时省略
pub struct PerspectiveSection;

impl DeckSection for PerspectiveSection {
    fn name(&self) -> &'static str {
        "perspective"
    }

    fn build(&self, context: &SectionContext<'_>) -> Result<Vec<Slide>> {
        let perspective = &context.result.perspective;
        if perspective.is_empty() {
            return Ok(Vec::new());
        }
        let style = context.style;

        let columns = [
            Column {
                title: "👔 経営者視点",
                color: &style.accent,
                view: &perspective.executive,
                labels: ["必要なこと", "懸念事項", "成長機会"],
            },
            Column {
                title: "🔧 現場視点",
                color: &style.positive,
                view: &perspective.frontline,
                labels: ["必要なこと", "懸念事項", "改善機会"],
            },
            Column {
                title: "👤 顧客視点",
                color: &style.highlight,
                view: &perspective.customer,
                labels: ["求めていること", "不安・懸念", "理想の体験"],
            },
        ];

        // 固定三栏，内容区高度不变
        let mut cursor = SectionCursor::new(SlideKind::Perspective, PERSPECTIVE_TITLE, style);
        for (index, column) in columns.iter().enumerate() {
            let x = COLUMN_LEFT + index as f64 * (COLUMN_WIDTH + COLUMN_GAP);
            cursor.push(line(
                Frame::new(x, HEADER_TOP, COLUMN_WIDTH, 0.4),
                Paragraph::new(column.title, 12.0, column.color)
                    .bold()
                    .align(Align::Center),
            ));

            let values = [
                &column.view.needs,
                &column.view.concerns,
                &column.view.opportunities,
            ];
            for (row, (label, value)) in column.labels.iter().zip(values).enumerate() {
                let y = ITEM_TOP + row as f64 * ITEM_STEP;
                cursor.push(line(
                    Frame::new(x + 0.1, y, COLUMN_WIDTH - 0.2, 0.25),
                    Paragraph::new(format!("■ {}", label), 8.0, column.color).bold(),
                ));

                let text = if is_blank(value) {
                    NO_INFORMATION.to_string()
                } else {
                    truncate(value, VALUE_BUDGET)
                };
                cursor.push(wrapped(
                    Frame::new(x + 0.1, y + 0.25, COLUMN_WIDTH - 0.2, 1.45),
                    Paragraph::new(text, 8.0, &style.text_dark),
                ));
            }
        }

        Ok(cursor.finish())
    }
}
