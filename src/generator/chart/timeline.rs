use anyhow::Result;

use crate::generator::chart::canvas::{Canvas, blend_with_white, parse_hex_color};
use crate::generator::chart::{
    ChartLabel, ChartScene, ChartStyle, LabelAlign, LabelAnchor, Marker, MarkerShape, PlotArea,
    RenderedChart,
};
use crate::types::TimelineEvent;
use crate::utils::text::truncate;

pub const TIMELINE_TITLE: &str = "企業沿革";

/// 标签与轴线的距离（pt）
const LABEL_DISTANCE_PT: f64 = 30.0;

/// 年份取前4个字符（去除首尾空白后）解析为整数
pub fn parse_year(year: &str) -> Option<i32> {
    let head: String = year.chars().take(4).collect();
    head.trim().parse().ok()
}

/// 渲染沿革图；没有可解析年份的事件时返回 None
pub fn render_timeline(
    events: &[TimelineEvent],
    style: &ChartStyle,
) -> Result<Option<RenderedChart>> {
    let plotted: Vec<(i32, &TimelineEvent)> = events
        .iter()
        .filter_map(|event| parse_year(&event.year).map(|year| (year, event)))
        .take(style.max_timeline_events)
        .collect();

    let (Some(min_year), Some(max_year)) = (
        plotted.iter().map(|(year, _)| *year).min(),
        plotted.iter().map(|(year, _)| *year).max(),
    ) else {
        return Ok(None);
    };

    let width = style.timeline_width_px;
    let height = style.timeline_height_px;
    let (w, h) = (width as f64, height as f64);

    let span = (max_year - min_year).max(1) as f64;
    let padding = span * 0.05;
    let x_range = if min_year == max_year {
        (min_year as f64 - 1.0, max_year as f64 + 1.0)
    } else {
        (min_year as f64 - padding, max_year as f64 + padding)
    };
    let area = PlotArea {
        left: w * 0.04,
        top: h * 0.16,
        right: w * 0.96,
        bottom: h * 0.92,
        x_range,
        y_range: (-1.5, 1.5),
    };

    let mut canvas = Canvas::new(width, height);
    let mut scene = ChartScene::default();
    let line_color = parse_hex_color(&style.timeline_color);
    let guide = parse_hex_color(&style.guide_color);
    let axis = parse_hex_color(&style.axis_color);

    let (_, zero_y) = area.to_px(0.0, 0.0);
    canvas.line(
        (area.left, zero_y),
        (area.right, zero_y),
        blend_with_white(line_color, 0.5),
        style.pt_to_px(2.0).round() as u32,
    );
    canvas.line((area.left, area.bottom), (area.right, area.bottom), axis, 1);

    scene.labels.push(
        ChartLabel::new(TIMELINE_TITLE, 0.5, area.top / h, &style.axis_color, 12.0)
            .offset(0.0, 4.0)
            .bold()
            .aligned(LabelAlign::Center, LabelAnchor::Bottom),
    );

    let leader_px = style.pt_to_px(LABEL_DISTANCE_PT);
    let dot_radius = style.pt_to_px(style.timeline_marker_pt) / 2.0;
    for (index, (year, event)) in plotted.iter().enumerate() {
        let (px, py) = area.to_px(*year as f64, 0.0);
        let above = index % 2 == 0;

        let leader_end = if above { py - leader_px } else { py + leader_px };
        canvas.line((px, py), (px, leader_end), guide, 1);
        canvas.dot((px, py), dot_radius, line_color);

        scene.markers.push(Marker {
            shape: MarkerShape::Dot,
            color: style.timeline_color.clone(),
            x: *year as f64,
            y: 0.0,
            fx: px / w,
            fy: py / h,
        });

        let text = format!(
            "{}\n{}",
            event.year,
            truncate(&event.description, style.timeline_label_budget)
        );
        let (offset_y, anchor) = if above {
            (LABEL_DISTANCE_PT, LabelAnchor::Bottom)
        } else {
            (-LABEL_DISTANCE_PT, LabelAnchor::Top)
        };
        scene.labels.push(
            ChartLabel::new(text, px / w, py / h, &style.label_color, 6.0)
                .offset(0.0, offset_y)
                .aligned(LabelAlign::Center, anchor),
        );
    }

    Ok(Some(RenderedChart {
        png: canvas.encode_png()?,
        scene,
        width_px: width,
        height_px: height,
    }))
}
