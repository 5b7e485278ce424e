// lib.rs - Cell automaton core for Conway's Game of Life
//
// Cells live in a flat arena owned by the Grid and refer to their
// neighbours by index. Nothing in here knows about windows or events;
// drawing goes through the `Canvas` trait.

pub mod canvas;
pub mod cell;
pub mod error;
pub mod grid;
pub mod history;
pub mod patterns;

pub use canvas::{Canvas, CellRect, Rgba};
pub use cell::{Cell, CellIndex, Neighbours};
pub use error::GridError;
pub use grid::{GameState, Grid, Step};
pub use history::CycleDetector;
pub use patterns::{Pattern, PATTERNS};

// Compile-time grid size configuration
pub const GRID_WIDTH: usize = 32;        // Columns in the playing area
pub const GRID_HEIGHT: usize = 24;       // Rows in the playing area
pub const CELL_DIMENSION: i32 = 32;      // Side of one cell on screen, in pixels
