// painter.rs - Draws the grid through an egui painter

use egui::{Color32, Painter, Pos2, Rect, Stroke, Vec2};
use life_core::{Canvas, CellRect, Rgba};

const BORDER_WIDTH: f32 = 1.0;

/// Canvas over an egui painter, with cell rectangles offset by `origin`.
pub struct PainterCanvas<'a> {
    painter: &'a Painter,
    origin: Pos2,
    color: Color32,
}

impl<'a> PainterCanvas<'a> {
    pub fn new(painter: &'a Painter, origin: Pos2) -> Self {
        Self { painter, origin, color: Color32::WHITE }
    }

    fn to_rect(&self, rect: CellRect) -> Rect {
        Rect::from_min_size(
            self.origin + Vec2::new(rect.x as f32, rect.y as f32),
            Vec2::new(rect.w as f32, rect.h as f32),
        )
    }
}

impl Canvas for PainterCanvas<'_> {
    fn set_draw_color(&mut self, color: Rgba) {
        self.color = Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a);
    }

    fn fill_rect(&mut self, rect: CellRect) {
        self.painter.rect_filled(self.to_rect(rect), 0.0, self.color);
    }

    fn draw_rect(&mut self, rect: CellRect) {
        self.painter.rect_stroke(self.to_rect(rect), 0.0, Stroke::new(BORDER_WIDTH, self.color));
    }
}
