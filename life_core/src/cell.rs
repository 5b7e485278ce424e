// cell.rs - A single automaton unit and the Life transition rule

use crate::canvas::{Canvas, CellRect, Rgba};
use crate::CELL_DIMENSION;

/// Position of a cell inside the grid's arena.
pub type CellIndex = usize;

/// The eight neighbour slots, in the order
/// up-left, up, up-right, left, right, down-left, down, down-right.
/// `None` marks a slot that falls off the grid.
pub type Neighbours = [Option<CellIndex>; 8];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    x: usize,
    y: usize,
    alive: bool,
    living_neighbours: u8,  // Only meaningful between count_neighbours() and update()
    neighbours: Neighbours,
}

impl Cell {
    pub fn new(x: usize, y: usize) -> Self {
        Self {
            x,
            y,
            alive: false,
            living_neighbours: 0,
            neighbours: [None; 8],
        }
    }

    pub fn x(&self) -> usize { self.x }
    pub fn y(&self) -> usize { self.y }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn kill(&mut self) {
        self.alive = false;
    }

    pub fn live(&mut self) {
        self.alive = true;
    }

    /// Replaces the whole neighbour set.
    pub fn set_neighbours(&mut self, neighbours: Neighbours) {
        self.neighbours = neighbours;
    }

    pub fn neighbours(&self) -> &Neighbours {
        &self.neighbours
    }

    /// Number of neighbour slots that point at a cell.
    pub fn neighbour_count(&self) -> usize {
        self.neighbours.iter().flatten().count()
    }

    pub fn living_neighbours(&self) -> u8 {
        self.living_neighbours
    }

    /// Adds the live neighbours to this cell's counter. `alive` is the
    /// grid's alive flags as they stood before any cell of this generation
    /// was updated, indexed like the arena.
    pub fn count_neighbours(&mut self, alive: &[bool]) {
        for &index in self.neighbours.iter().flatten() {
            if matches!(alive.get(index), Some(true)) {
                self.living_neighbours += 1;
            }
        }
    }

    /// Applies the rule to the counted neighbours, then zeroes the counter.
    pub fn update(&mut self) {
        self.alive = match (self.alive, self.living_neighbours) {
            (true, 2) | (true, 3) => true,   // Survival
            (false, 3)            => true,   // Birth
            _                     => false,  // Under/overpopulation, or stays dead
        };
        self.living_neighbours = 0;
    }

    pub fn rect(&self) -> CellRect {
        CellRect {
            x: self.x as i32 * CELL_DIMENSION,
            y: self.y as i32 * CELL_DIMENSION,
            w: CELL_DIMENSION,
            h: CELL_DIMENSION,
        }
    }

    pub fn render<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        let rect = self.rect();
        canvas.set_draw_color(if self.alive { Rgba::ALIVE } else { Rgba::DEAD });
        canvas.fill_rect(rect);

        canvas.set_draw_color(Rgba::BORDER);
        canvas.draw_rect(rect);
    }
}
