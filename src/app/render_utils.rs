use std::f32::consts::TAU;

use eframe::egui::{Color32, Painter, Pos2, Rect, Shape, Stroke, Vec2};
use knowledge_map::knowledge::{ArticleSource, Dimensions, MAX_LAYERS};

const GUIDE_COLOR: Color32 = Color32::from_rgb(30, 41, 59);
const RADIAL_GUIDES: usize = 8;
const RADIAL_GUIDE_REACH: f32 = 0.75;
const RING_SEGMENTS: usize = 96;

pub(super) fn blend_color(base: Color32, overlay: Color32, amount: f32) -> Color32 {
    let amount = amount.clamp(0.0, 1.0);
    let inverse = 1.0 - amount;

    Color32::from_rgba_unmultiplied(
        ((base.r() as f32 * inverse) + (overlay.r() as f32 * amount)) as u8,
        ((base.g() as f32 * inverse) + (overlay.g() as f32 * amount)) as u8,
        ((base.b() as f32 * inverse) + (overlay.b() as f32 * amount)) as u8,
        ((base.a() as f32 * inverse) + (overlay.a() as f32 * amount)) as u8,
    )
}

pub(super) fn with_alpha(color: Color32, alpha: f32) -> Color32 {
    Color32::from_rgba_unmultiplied(
        color.r(),
        color.g(),
        color.b(),
        (alpha.clamp(0.0, 1.0) * 255.0) as u8,
    )
}

pub(super) fn source_fill(source: ArticleSource) -> Color32 {
    match source {
        ArticleSource::Qiita => Color32::from_rgb(16, 185, 129),
        ArticleSource::Dev => Color32::from_rgb(168, 85, 247),
        ArticleSource::Database => Color32::from_rgb(59, 130, 246),
    }
}

pub(super) fn source_stroke(source: ArticleSource) -> Color32 {
    match source {
        ArticleSource::Qiita => Color32::from_rgb(5, 150, 105),
        ArticleSource::Dev => Color32::from_rgb(124, 58, 237),
        ArticleSource::Database => Color32::from_rgb(37, 99, 235),
    }
}

/// Layout coordinates are relative to the canvas' top-left corner.
pub(super) fn layout_to_screen(rect: Rect, pan: Vec2, x: f64, y: f64) -> Pos2 {
    rect.min + pan + Vec2::new(x as f32, y as f32)
}

pub(super) fn distance_to_segment(point: Pos2, start: Pos2, end: Pos2) -> f32 {
    let segment = end - start;
    let length_sq = segment.length_sq();
    if length_sq <= f32::EPSILON {
        return point.distance(start);
    }

    let t = ((point - start).dot(segment) / length_sq).clamp(0.0, 1.0);
    point.distance(start + segment * t)
}

/// Background plus the spider-web guides: dashed rings at every layer
/// radius (the outermost solid) and evenly spaced radial spokes.
pub(super) fn draw_background(painter: &Painter, rect: Rect, pan: Vec2, dimensions: Dimensions) {
    painter.rect_filled(rect, 0.0, Color32::from_rgb(11, 17, 32));

    let (cx, cy) = dimensions.center();
    let center = layout_to_screen(rect, pan, cx, cy);
    let ring_stroke = Stroke::new(1.0, with_alpha(GUIDE_COLOR, 0.55));

    for layer in 1..=MAX_LAYERS {
        let radius = dimensions.layer_radius(layer) as f32;
        let points = (0..=RING_SEGMENTS)
            .map(|step| {
                let angle = step as f32 / RING_SEGMENTS as f32 * TAU;
                center + Vec2::angled(angle) * radius
            })
            .collect::<Vec<_>>();

        if layer == MAX_LAYERS {
            painter.add(Shape::line(points, ring_stroke));
        } else {
            painter.extend(Shape::dashed_line(&points, ring_stroke, 4.0, 4.0));
        }
    }

    let reach = dimensions.base_size() as f32 * RADIAL_GUIDE_REACH;
    let spoke_stroke = Stroke::new(1.0, with_alpha(GUIDE_COLOR, 0.4));
    for spoke in 0..RADIAL_GUIDES {
        let angle = spoke as f32 / RADIAL_GUIDES as f32 * TAU;
        painter.line_segment([center, center + Vec2::angled(angle) * reach], spoke_stroke);
    }
}
