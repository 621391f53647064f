use std::io::Cursor;

use anyhow::{Context, Result};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use imageproc::drawing::{
    draw_filled_circle_mut, draw_filled_rect_mut, draw_line_segment_mut, draw_polygon_mut,
};
use imageproc::point::Point;
use imageproc::rect::Rect;
use tracing::debug;

/// 解析不带 `#` 的6位十六进制颜色，无效值按黑色处理
pub fn parse_hex_color(hex: &str) -> Rgb<u8> {
    let hex = hex.trim().trim_start_matches('#');
    let channel = |range: std::ops::Range<usize>| {
        hex.get(range)
            .and_then(|part| u8::from_str_radix(part, 16).ok())
    };

    match (hex.len(), channel(0..2), channel(2..4), channel(4..6)) {
        (6, Some(r), Some(g), Some(b)) => Rgb([r, g, b]),
        _ => {
            debug!(color = hex, "invalid hex color");
            Rgb([0, 0, 0])
        }
    }
}

/// 与白色混合，alpha 为原色所占比例
pub fn blend_with_white(color: Rgb<u8>, alpha: f64) -> Rgb<u8> {
    let mix = |c: u8| (c as f64 * alpha + 255.0 * (1.0 - alpha)).round() as u8;
    Rgb([mix(color[0]), mix(color[1]), mix(color[2])])
}

/// 光栅画布
pub struct Canvas {
    image: RgbImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbImage::from_pixel(width, height, Rgb([255, 255, 255])),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgb<u8>) {
        let width = width.round().max(1.0) as u32;
        let height = height.round().max(1.0) as u32;
        let rect = Rect::at(x.round() as i32, y.round() as i32).of_size(width, height);
        draw_filled_rect_mut(&mut self.image, rect, color);
    }

    /// 指定粗细（像素）的线段；水平/垂直线以外按法线方向平移叠加
    pub fn line(&mut self, from: (f64, f64), to: (f64, f64), color: Rgb<u8>, thickness: u32) {
        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        let length = (dx * dx + dy * dy).sqrt();
        if length == 0.0 {
            return;
        }
        let (nx, ny) = (-dy / length, dx / length);
        let thickness = thickness.max(1);
        let shift = (thickness as f64 - 1.0) / 2.0;

        for step in 0..thickness {
            let offset = step as f64 - shift;
            draw_line_segment_mut(
                &mut self.image,
                ((from.0 + nx * offset) as f32, (from.1 + ny * offset) as f32),
                ((to.0 + nx * offset) as f32, (to.1 + ny * offset) as f32),
                color,
            );
        }
    }

    pub fn dashed_line(
        &mut self,
        from: (f64, f64),
        to: (f64, f64),
        color: Rgb<u8>,
        thickness: u32,
        dash: f64,
        gap: f64,
    ) {
        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        let length = (dx * dx + dy * dy).sqrt();
        if length == 0.0 || dash <= 0.0 {
            return;
        }
        let (ux, uy) = (dx / length, dy / length);

        let mut start = 0.0;
        while start < length {
            let end = (start + dash).min(length);
            self.line(
                (from.0 + ux * start, from.1 + uy * start),
                (from.0 + ux * end, from.1 + uy * end),
                color,
                thickness,
            );
            start = end + gap;
        }
    }

    pub fn dot(&mut self, center: (f64, f64), radius: f64, color: Rgb<u8>) {
        draw_filled_circle_mut(
            &mut self.image,
            (center.0.round() as i32, center.1.round() as i32),
            radius.round().max(1.0) as i32,
            color,
        );
    }

    pub fn square(&mut self, center: (f64, f64), half: f64, color: Rgb<u8>) {
        self.fill_rect(
            center.0 - half,
            center.1 - half,
            half * 2.0,
            half * 2.0,
            color,
        );
    }

    pub fn diamond(&mut self, center: (f64, f64), half: f64, color: Rgb<u8>) {
        let (cx, cy) = center;
        self.polygon(
            &[
                (cx, cy - half),
                (cx + half, cy),
                (cx, cy + half),
                (cx - half, cy),
            ],
            color,
        );
    }

    /// 五角星，outer 为外接圆半径
    pub fn star(&mut self, center: (f64, f64), outer: f64, color: Rgb<u8>) {
        let inner = outer * 0.4;
        let points: Vec<(f64, f64)> = (0..10)
            .map(|i| {
                let radius = if i % 2 == 0 { outer } else { inner };
                let angle = -std::f64::consts::FRAC_PI_2 + i as f64 * std::f64::consts::PI / 5.0;
                (center.0 + radius * angle.cos(), center.1 + radius * angle.sin())
            })
            .collect();
        self.polygon(&points, color);
    }

    fn polygon(&mut self, points: &[(f64, f64)], color: Rgb<u8>) {
        let mut vertices: Vec<Point<i32>> = points
            .iter()
            .map(|(x, y)| Point::new(x.round() as i32, y.round() as i32))
            .collect();
        vertices.dedup();
        // 首尾相同的多边形会被拒绝
        while vertices.len() > 1 && vertices.first() == vertices.last() {
            vertices.pop();
        }
        if vertices.len() < 3 {
            return;
        }
        draw_polygon_mut(&mut self.image, &vertices, color);
    }

    pub fn encode_png(self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(self.image)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .context("Failed to encode chart as PNG")?;
        Ok(bytes)
    }

    #[cfg(test)]
    pub fn pixel(&self, x: u32, y: u32) -> Rgb<u8> {
        *self.image.get_pixel(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("E94560"), Rgb([0xE9, 0x45, 0x60]));
        assert_eq!(parse_hex_color("#0F3460"), Rgb([0x0F, 0x34, 0x60]));
        assert_eq!(parse_hex_color("nope"), Rgb([0, 0, 0]));
        assert_eq!(parse_hex_color("ZZZZZZ"), Rgb([0, 0, 0]));
    }

    #[test]
    fn test_shapes_paint_their_center() {
        let red = Rgb([255, 0, 0]);
        let mut canvas = Canvas::new(100, 100);
        canvas.star((20.0, 20.0), 10.0, red);
        canvas.square((50.0, 50.0), 5.0, red);
        canvas.diamond((80.0, 80.0), 6.0, red);

        assert_eq!(canvas.pixel(20, 20), red);
        assert_eq!(canvas.pixel(50, 50), red);
        assert_eq!(canvas.pixel(80, 80), red);
        assert_eq!(canvas.pixel(5, 95), Rgb([255, 255, 255]));
    }

    #[test]
    fn test_encode_png_signature() {
        let png = Canvas::new(10, 10).encode_png().unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }
}
