use anyhow::Result;

use crate::generator::chart::canvas::{Canvas, parse_hex_color};
use crate::generator::chart::{
    ChartLabel, ChartScene, ChartStyle, LabelAlign, LabelAnchor, Marker, MarkerShape, PlotArea,
    RenderedChart,
};
use crate::types::{Competitor, Position, ResearchResult};
use crate::utils::text::truncate;

/// 标签候选偏移（pt，y 向上为正），按顺序尝试
pub const LABEL_OFFSETS: [(f64, f64); 6] = [
    (8.0, 8.0),
    (-8.0, 8.0),
    (8.0, -12.0),
    (-8.0, -12.0),
    (12.0, 0.0),
    (-12.0, 0.0),
];

/// 偏移量换算为数据坐标时的除数
const OFFSET_TO_DATA: f64 = 10.0;

pub const MAP_TITLE: &str = "ポジショニングマップ";

/// 标签防重叠：记录已放置标签的位置，为新标签选择第一个不冲突的偏移
#[derive(Debug, Clone)]
pub struct LabelPlacer {
    tolerance_x: f64,
    tolerance_y: f64,
    placed: Vec<(f64, f64)>,
}

impl LabelPlacer {
    pub fn new(tolerance_x: f64, tolerance_y: f64) -> Self {
        Self {
            tolerance_x,
            tolerance_y,
            placed: Vec::new(),
        }
    }

    /// 返回 (x, y) 处标签使用的偏移；全部冲突时强制使用第一个候选
    pub fn place(&mut self, x: f64, y: f64) -> (f64, f64) {
        let candidate_at =
            |(ox, oy): (f64, f64)| (x + ox / OFFSET_TO_DATA, y + oy / OFFSET_TO_DATA);

        let chosen = LABEL_OFFSETS
            .iter()
            .copied()
            .find(|&offset| !self.conflicts(candidate_at(offset)))
            .unwrap_or(LABEL_OFFSETS[0]);

        self.placed.push(candidate_at(chosen));
        chosen
    }

    fn conflicts(&self, (cx, cy): (f64, f64)) -> bool {
        self.placed.iter().any(|&(lx, ly)| {
            (cx - lx).abs() < self.tolerance_x && (cy - ly).abs() < self.tolerance_y
        })
    }
}

/// 定位图中的一个点
struct PlotPoint<'a> {
    name: &'a str,
    position: Position,
    shape: MarkerShape,
    marker_color: &'a str,
    label_color: &'a str,
    marker_pt: f64,
    label_size: f64,
    bold: bool,
}

/// 渲染定位图：分析对象（★）最先放置，其后是直接竞争（■）与间接竞争（◆）
pub fn render_positioning_map(
    result: &ResearchResult,
    style: &ChartStyle,
) -> Result<RenderedChart> {
    let competitor = &result.competitor;
    let width = style.map_width_px;
    let height = style.map_height_px;
    let (w, h) = (width as f64, height as f64);

    let area = PlotArea {
        left: w * 0.11,
        top: h * 0.1,
        right: w * 0.96,
        bottom: h * 0.86,
        x_range: (0.0, 10.0),
        y_range: (0.0, 10.0),
    };

    let mut canvas = Canvas::new(width, height);
    let mut scene = ChartScene::default();
    draw_frame(&mut canvas, &mut scene, &area, style);

    let axis_x = non_empty_or(&competitor.positioning_axis_x, &style.default_axis_x);
    let axis_y = non_empty_or(&competitor.positioning_axis_y, &style.default_axis_y);
    scene.labels.push(
        ChartLabel::new(MAP_TITLE, 0.5, area.top / h, &style.axis_color, 12.0)
            .offset(0.0, 6.0)
            .bold()
            .aligned(LabelAlign::Center, LabelAnchor::Bottom),
    );
    scene.labels.push(
        ChartLabel::new(
            axis_x,
            (area.left + area.right) / 2.0 / w,
            area.bottom / h,
            &style.axis_color,
            10.0,
        )
        .offset(0.0, -16.0)
        .aligned(LabelAlign::Center, LabelAnchor::Top),
    );
    scene.labels.push(
        ChartLabel::new(
            axis_y,
            area.left / w,
            (area.top + area.bottom) / 2.0 / h,
            &style.axis_color,
            10.0,
        )
        .offset(-22.0, 0.0)
        .aligned(LabelAlign::Right, LabelAnchor::Middle)
        .vertical(),
    );

    let target = PlotPoint {
        name: &result.client_name,
        position: competitor.analyzed_company_position,
        shape: MarkerShape::Star,
        marker_color: &style.target_color,
        label_color: &style.target_color,
        marker_pt: style.target_marker_pt,
        label_size: 8.0,
        bold: true,
    };
    let points = std::iter::once(target)
        .chain(
            competitor
                .direct_competitors
                .iter()
                .map(|c| competitor_point(c, true, style)),
        )
        .chain(
            competitor
                .indirect_competitors
                .iter()
                .map(|c| competitor_point(c, false, style)),
        );

    let mut placer = LabelPlacer::new(style.label_tolerance_x, style.label_tolerance_y);
    for point in points {
        let Position { x, y } = point.position;
        let (px, py) = area.to_px(x, y);
        let color = parse_hex_color(point.marker_color);
        let size_px = style.pt_to_px(point.marker_pt);
        match point.shape {
            MarkerShape::Star => canvas.star((px, py), size_px / 2.0 * 1.2, color),
            MarkerShape::Square => canvas.square((px, py), size_px / 2.0, color),
            MarkerShape::Diamond => canvas.diamond((px, py), size_px / 2.0 * 1.2, color),
            MarkerShape::Dot => canvas.dot((px, py), size_px / 2.0, color),
        }
        scene.markers.push(Marker {
            shape: point.shape,
            color: point.marker_color.to_string(),
            x,
            y,
            fx: px / w,
            fy: py / h,
        });

        let (ox, oy) = placer.place(x, y);
        let mut label = ChartLabel::new(
            truncate(point.name, style.name_budget),
            px / w,
            py / h,
            point.label_color,
            point.label_size,
        )
        .offset(ox, oy);
        if point.bold {
            label = label.bold();
        }
        scene.labels.push(label);
    }

    Ok(RenderedChart {
        png: canvas.encode_png()?,
        scene,
        width_px: width,
        height_px: height,
    })
}

fn competitor_point<'a>(c: &'a Competitor, direct: bool, style: &'a ChartStyle) -> PlotPoint<'a> {
    let (shape, marker_color, label_color, marker_pt) = if direct {
        (
            MarkerShape::Square,
            &style.direct_color,
            &style.label_color,
            style.direct_marker_pt,
        )
    } else {
        (
            MarkerShape::Diamond,
            &style.indirect_color,
            &style.muted_label_color,
            style.indirect_marker_pt,
        )
    };

    PlotPoint {
        name: &c.name,
        position: c.position(),
        shape,
        marker_color,
        label_color,
        marker_pt,
        label_size: 7.0,
        bold: false,
    }
}

/// 网格、边框、中心虚线与刻度
fn draw_frame(canvas: &mut Canvas, scene: &mut ChartScene, area: &PlotArea, style: &ChartStyle) {
    let (w, h) = (canvas.width() as f64, canvas.height() as f64);
    let grid = parse_hex_color(&style.grid_color);
    let guide = parse_hex_color(&style.guide_color);
    let axis = parse_hex_color(&style.axis_color);

    for step in 0..=10 {
        let value = step as f64;
        let (gx, _) = area.to_px(value, 0.0);
        let (_, gy) = area.to_px(0.0, value);
        canvas.line((gx, area.top), (gx, area.bottom), grid, 1);
        canvas.line((area.left, gy), (area.right, gy), grid, 1);

        if step % 2 == 0 {
            let tick = step.to_string();
            scene.labels.push(
                ChartLabel::new(
                    tick.clone(),
                    gx / w,
                    area.bottom / h,
                    &style.muted_label_color,
                    7.0,
                )
                .offset(0.0, -3.0)
                .aligned(LabelAlign::Center, LabelAnchor::Top),
            );
            scene.labels.push(
                ChartLabel::new(tick, area.left / w, gy / h, &style.muted_label_color, 7.0)
                    .offset(-3.0, 0.0)
                    .aligned(LabelAlign::Right, LabelAnchor::Middle),
            );
        }
    }

    let (cx, cy) = area.to_px(5.0, 5.0);
    let dash = style.pt_to_px(3.0);
    canvas.dashed_line((cx, area.top), (cx, area.bottom), guide, 2, dash, dash);
    canvas.dashed_line((area.left, cy), (area.right, cy), guide, 2, dash, dash);

    let corners = [
        (area.left, area.top),
        (area.right, area.top),
        (area.right, area.bottom),
        (area.left, area.bottom),
    ];
    for (i, &from) in corners.iter().enumerate() {
        canvas.line(from, corners[(i + 1) % corners.len()], axis, 2);
    }
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}
