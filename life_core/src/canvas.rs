// canvas.rs - The drawing surface the automaton renders itself onto

/// An 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const ALIVE:  Rgba = Rgba::new(0, 255, 0, 255);
    pub const DEAD:   Rgba = Rgba::new(0, 0, 0, 255);
    pub const BORDER: Rgba = Rgba::new(51, 51, 51, 255);
}

/// Screen rectangle in pixels, relative to the grid's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl CellRect {
    pub fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x && px < self.x + self.w && py >= self.y && py < self.y + self.h
    }
}

/// A stateful 2-D canvas: the current draw color is set first, then used by
/// the fill and outline primitives.
pub trait Canvas {
    fn set_draw_color(&mut self, color: Rgba);
    fn fill_rect(&mut self, rect: CellRect);
    fn draw_rect(&mut self, rect: CellRect);
}
