use anyhow::Result;

use crate::generator::chart::render_positioning_map;
use crate::generator::deck::sections::{DeckSection, SectionContext, is_blank, line, wrapped};
use crate::generator::deck::{
    DeckStyle, Frame, Paragraph, Picture, SectionCursor, Shape, Slide, SlideKind, Table,
    TableCell, TableRow, overlay_labels,
};
use crate::types::{Competitor, ResearchResult};
use crate::utils::text::truncate;

pub const MAP_SLIDE_TITLE: &str = "Competitor - ポジショニングマップ";
pub const TABLE_SLIDE_TITLE: &str = "Competitor - 競合比較表";

const TABLE_HEADERS: [&str; 4] = ["企業名", "概要", "強み", "差別化ポイント"];
const TABLE_COLUMNS: [f64; 4] = [2.0, 3.4, 3.0, 3.0];
const TABLE_LEFT: f64 = 0.3;
const TABLE_TOP: f64 = 1.2;
const HEADER_ROW: f64 = 0.4;
const DATA_ROW: f64 = 0.55;
const CELL_BUDGET: usize = 80;

const LEGEND_LEFT: f64 = 8.8;
const LEGEND_TOP: f64 = 1.3;
const LEGEND_STEP: f64 = 0.3;
/// 图例中客户名的字符数
const LEGEND_NAME_CHARS: usize = 12;
const POSITION_BUDGET: usize = 120;

/// Competitor章节：定位图与图例，有竞争对手时附比较表
pub struct CompetitorSection;

impl DeckSection for CompetitorSection {
    fn name(&self) -> &'static str {
        "competitor"
    }

    fn build(&self, context: &SectionContext<'_>) -> Result<Vec<Slide>> {
        let mut slides = map_slides(context)?;
        slides.extend(table_slides(context.result, context.style));
        Ok(slides)
    }
}

fn map_slides(context: &SectionContext<'_>) -> Result<Vec<Slide>> {
    let style = context.style;
    let result = context.result;
    let mut cursor = SectionCursor::new(SlideKind::CompetitorMap, MAP_SLIDE_TITLE, style)
        .with_bar(&style.highlight);

    let chart = render_positioning_map(result, context.chart)?;
    let frame = Frame::new(0.8, 1.2, 7.5, 5.0);
    let labels = overlay_labels(frame, &chart.scene);
    cursor.push(Shape::Picture(Picture {
        frame,
        png: chart.png,
        scene: Some(chart.scene),
    }));
    for label in labels {
        cursor.push(label);
    }

    cursor.push(line(
        Frame::new(LEGEND_LEFT, LEGEND_TOP, 3.0, 0.3),
        Paragraph::new("凡例", 9.0, &style.secondary).bold(),
    ));
    let client: String = result.client_name.chars().take(LEGEND_NAME_CHARS).collect();
    let legend = [
        ("★", client.as_str(), &context.chart.target_color),
        ("■", "直接競合", &context.chart.direct_color),
        ("◆", "間接競合", &context.chart.indirect_color),
    ];
    for (index, (marker, label, color)) in legend.iter().enumerate() {
        let y = LEGEND_TOP + 0.35 + index as f64 * LEGEND_STEP;
        cursor.push(line(
            Frame::new(LEGEND_LEFT, y, 3.0, 0.25),
            Paragraph::new(format!("{} {}", marker, label), 8.0, color),
        ));
    }

    let position = &result.competitor.industry_position;
    if !is_blank(position) {
        let y = LEGEND_TOP + 0.35 + legend.len() as f64 * LEGEND_STEP + 0.3;
        cursor.push(line(
            Frame::new(LEGEND_LEFT, y, 3.0, 0.25),
            Paragraph::new("業界ポジション", 9.0, &style.secondary).bold(),
        ));
        cursor.push(wrapped(
            Frame::new(LEGEND_LEFT, y + 0.3, 3.0, 2.5),
            Paragraph::new(truncate(position, POSITION_BUDGET), 8.0, &style.text_dark),
        ));
    }

    Ok(cursor.finish())
}

/// 比较表：表头在每页重复，行高固定，溢出时在续页开启新表
fn table_slides(result: &ResearchResult, style: &DeckStyle) -> Vec<Slide> {
    let competitors: Vec<&Competitor> = result.competitor.all_competitors().collect();
    if competitors.is_empty() {
        return Vec::new();
    }

    let mut cursor = SectionCursor::new(SlideKind::CompetitorTable, TABLE_SLIDE_TITLE, style)
        .with_bar(&style.highlight)
        .with_top(TABLE_TOP + HEADER_ROW);

    let mut pages: Vec<Vec<TableRow>> = Vec::new();
    for (index, competitor) in competitors.iter().enumerate() {
        cursor.place(DATA_ROW);
        let page = cursor.page_index();
        if pages.len() <= page {
            pages.resize_with(page + 1, Vec::new);
        }
        pages[page].push(data_row(competitor, index + 1, style));
    }

    for (page, rows) in pages.into_iter().enumerate() {
        let mut table_rows = vec![header_row(style)];
        table_rows.extend(rows);
        let height = table_rows.iter().map(|row| row.height).sum();
        cursor.push_on(
            page,
            Shape::Table(Table {
                frame: Frame::new(TABLE_LEFT, TABLE_TOP, TABLE_COLUMNS.iter().sum(), height),
                column_widths: TABLE_COLUMNS.to_vec(),
                rows: table_rows,
            }),
        );
    }

    cursor.finish()
}

fn header_row(style: &DeckStyle) -> TableRow {
    TableRow {
        height: HEADER_ROW,
        cells: TABLE_HEADERS
            .iter()
            .map(|header| TableCell {
                text: header.to_string(),
                size_pt: 10.0,
                bold: true,
                color: style.text_light.clone(),
                fill: Some(style.primary.clone()),
            })
            .collect(),
    }
}

/// row_number 从1开始，偶数行使用浅灰底色
fn data_row(competitor: &Competitor, row_number: usize, style: &DeckStyle) -> TableRow {
    let fill = (row_number % 2 == 0).then(|| style.bg_light.clone());
    let values = [
        truncate(&competitor.name, CELL_BUDGET),
        truncate(&competitor.description, CELL_BUDGET),
        truncate(&competitor.strengths, CELL_BUDGET),
        truncate(&competitor.differentiation, CELL_BUDGET),
    ];

    TableRow {
        height: DATA_ROW,
        cells: values
            .into_iter()
            .map(|text| TableCell {
                text,
                size_pt: 9.0,
                bold: false,
                color: style.text_dark.clone(),
                fill: fill.clone(),
            })
            .collect(),
    }
}
