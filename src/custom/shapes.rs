use std::f64::consts::PI;

use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut, draw_polygon_mut};
use imageproc::point::Point;
use imageproc::rect::Rect;

use crate::common::error::{QRError, QRResult};

// Shape
//------------------------------------------------------------------------------

/// Programmatic finder-eye decorations, drawn instead of a bundled cursor bitmap.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Shape {
    Square,
    Circle,
    Star,
    Diamond,
}

impl Shape {
    pub fn from_identifier(id: &str) -> QRResult<Self> {
        match id {
            "draw_square" => Ok(Self::Square),
            "draw_circle" => Ok(Self::Circle),
            "draw_star" => Ok(Self::Star),
            "draw_diamond" => Ok(Self::Diamond),
            _ => Err(QRError::Image(format!("Unknown shape routine \"{id}\""))),
        }
    }

    pub fn identifier(&self) -> &'static str {
        match self {
            Self::Square => "draw_square",
            Self::Circle => "draw_circle",
            Self::Star => "draw_star",
            Self::Diamond => "draw_diamond",
        }
    }

    pub fn draw(&self, canvas: &mut RgbaImage, cx: i32, cy: i32, size: u32, color: Rgba<u8>) {
        match self {
            Self::Square => draw_square(canvas, cx, cy, size, color),
            Self::Circle => draw_circle(canvas, cx, cy, size, color),
            Self::Star => draw_star(canvas, cx, cy, size, color),
            Self::Diamond => draw_diamond(canvas, cx, cy, size, color),
        }
    }
}

// Drawers
//------------------------------------------------------------------------------
// Each routine paints a shape whose bounding box is `size` pixels wide, centred at
// (cx, cy). Parts falling outside the canvas are clipped.

pub fn draw_square(canvas: &mut RgbaImage, cx: i32, cy: i32, size: u32, color: Rgba<u8>) {
    if size == 0 {
        return;
    }
    let half = (size / 2) as i32;
    draw_filled_rect_mut(canvas, Rect::at(cx - half, cy - half).of_size(size, size), color);
}

pub fn draw_circle(canvas: &mut RgbaImage, cx: i32, cy: i32, size: u32, color: Rgba<u8>) {
    if size == 0 {
        return;
    }
    draw_filled_circle_mut(canvas, (cx, cy), (size / 2) as i32, color);
}

pub fn draw_star(canvas: &mut RgbaImage, cx: i32, cy: i32, size: u32, color: Rgba<u8>) {
    let outer = size as f64 / 2.0;
    // Inner radius of a regular pentagram
    let inner = outer * 0.382;

    let mut points: Vec<Point<i32>> = (0..10)
        .map(|i| {
            let r = if i % 2 == 0 { outer } else { inner };
            let theta = -PI / 2.0 + i as f64 * PI / 5.0;
            Point::new(cx + (r * theta.cos()).round() as i32, cy + (r * theta.sin()).round() as i32)
        })
        .collect();
    fill_polygon(canvas, &mut points, color);
}

pub fn draw_diamond(canvas: &mut RgbaImage, cx: i32, cy: i32, size: u32, color: Rgba<u8>) {
    let h = (size / 2) as i32;
    let mut points =
        vec![Point::new(cx, cy - h), Point::new(cx + h, cy), Point::new(cx, cy + h), Point::new(cx - h, cy)];
    fill_polygon(canvas, &mut points, color);
}

/// Fills a closed polygon, skipping outlines that collapse below three distinct vertices.
fn fill_polygon(canvas: &mut RgbaImage, points: &mut Vec<Point<i32>>, color: Rgba<u8>) {
    points.dedup();
    while points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    if points.len() < 3 {
        return;
    }
    draw_polygon_mut(canvas, points, color);
}
