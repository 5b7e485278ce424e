// grid.rs - The cell arena, its state machine and the generation step

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::future::Future;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use tracing::{debug, info};

use crate::canvas::Canvas;
use crate::cell::{Cell, CellIndex, Neighbours};
use crate::error::GridError;
use crate::history::CycleDetector;
use crate::{CELL_DIMENSION, GRID_HEIGHT, GRID_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameState {
    #[default]
    Setup,
    Running,
    Paused,
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GameState::Setup   => "setup",
            GameState::Running => "running",
            GameState::Paused  => "paused",
        })
    }
}

/// Outcome of one call to [`Grid::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The grid is not running; no cell was touched.
    Idle,
    Advanced,
    /// Advanced into a generation already seen in the recent history.
    Cycled,
}

/// A fixed-size arena of cells, stored row-major.
#[derive(Debug, Clone)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    state: GameState,
    generation: u32,
    history: CycleDetector,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    pub fn new() -> Self {
        Self::with_size(GRID_WIDTH, GRID_HEIGHT)
    }

    pub fn with_size(width: usize, height: usize) -> Self {
        let mut cells = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                cells.push(Cell::new(x, y));
            }
        }

        Self {
            width,
            height,
            cells,
            state: GameState::Setup,
            generation: 0,
            history: CycleDetector::default(),
        }
    }

    pub fn width(&self) -> usize { self.width }
    pub fn height(&self) -> usize { self.height }

    pub fn pixel_width(&self) -> i32 { self.width as i32 * CELL_DIMENSION }
    pub fn pixel_height(&self) -> i32 { self.height as i32 * CELL_DIMENSION }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Wires every cell to its neighbours and starts stepping.
    pub fn start(&mut self) {
        let (width, height) = (self.width, self.height);
        for cell in &mut self.cells {
            cell.set_neighbours(neighbourhood(width, height, cell.x() as i32, cell.y() as i32));
        }
        self.history.clear();
        self.state = GameState::Running;
        info!(population = self.population(), "simulation started");
    }

    /// Kills every cell and goes back to editing.
    pub fn reset(&mut self) {
        for cell in &mut self.cells {
            cell.kill();
        }
        self.state = GameState::Setup;
        self.generation = 0;
        self.history.clear();
        info!("grid reset");
    }

    pub fn pause(&mut self) {
        if self.state == GameState::Running {
            self.state = GameState::Paused;
            info!(generation = self.generation, "simulation paused");
        }
    }

    /// Advances one generation if running. Every cell counts its
    /// neighbours before any cell changes state.
    pub fn update(&mut self) -> Step {
        if self.state != GameState::Running {
            return Step::Idle;
        }

        let alive = self.alive_flags();
        for cell in &mut self.cells {
            cell.count_neighbours(&alive);
        }
        for cell in &mut self.cells {
            cell.update();
        }

        self.finish_generation()
    }

    /// Same step as [`Grid::update`], with each phase split into one tokio
    /// task per row. All rows finish counting before any row is updated.
    /// On failure the grid is left exactly as it was before the call.
    pub fn update_concurrent(&mut self, runtime: &Runtime) -> Result<Step, GridError> {
        self.step_with(|cells, width| runtime.block_on(step_rows(cells, width)))
    }

    /// [`Grid::update_concurrent`] through a handle. Only a current-thread
    /// runtime's own `block_on` drives its tasks, so such handles are refused.
    pub fn update_on(&mut self, handle: &Handle) -> Result<Step, GridError> {
        if handle.runtime_flavor() == RuntimeFlavor::CurrentThread {
            return Err(GridError::CurrentThread);
        }
        self.step_with(|cells, width| handle.block_on(step_rows(cells, width)))
    }

    fn step_with<F>(&mut self, run: F) -> Result<Step, GridError>
    where
        F: FnOnce(Vec<Cell>, usize) -> Result<Vec<Cell>, GridError>,
    {
        if self.state != GameState::Running {
            return Ok(Step::Idle);
        }

        self.cells = run(self.cells.clone(), self.width)?;
        Ok(self.finish_generation())
    }

    fn finish_generation(&mut self) -> Step {
        self.generation += 1;
        debug!(generation = self.generation, population = self.population(), "generation advanced");

        if self.history.observe(self.fingerprint()) {
            info!(generation = self.generation, "grid returned to a recent generation");
            Step::Cycled
        } else {
            Step::Advanced
        }
    }

    fn alive_flags(&self) -> Vec<bool> {
        self.cells.iter().map(Cell::is_alive).collect()
    }

    /// Hash of every cell's alive flag.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        for cell in &self.cells {
            cell.is_alive().hash(&mut hasher);
        }
        hasher.finish()
    }

    fn index_of(&self, x: i32, y: i32) -> Option<CellIndex> {
        index_of(self.width, self.height, x, y)
    }

    /// Returns `None` outside `[0, width) x [0, height)`.
    pub fn tile_at(&self, x: i32, y: i32) -> Option<&Cell> {
        self.index_of(x, y).map(|index| &self.cells[index])
    }

    pub fn tile_at_mut(&mut self, x: i32, y: i32) -> Option<&mut Cell> {
        self.index_of(x, y).map(move |index| &mut self.cells[index])
    }

    /// Maps a pixel position, relative to the grid's top-left corner, to
    /// the coordinates of the cell under it.
    pub fn pixel_to_tile(&self, px: i32, py: i32) -> Option<(i32, i32)> {
        // Division truncates toward zero, so negatives must be rejected first.
        if px < 0 || py < 0 {
            return None;
        }
        let (x, y) = (px / CELL_DIMENSION, py / CELL_DIMENSION);
        self.index_of(x, y).map(|_| (x, y))
    }

    pub fn tile_at_pixel(&self, px: i32, py: i32) -> Option<&Cell> {
        let (x, y) = self.pixel_to_tile(px, py)?;
        self.tile_at(x, y)
    }

    pub fn tile_at_pixel_mut(&mut self, px: i32, py: i32) -> Option<&mut Cell> {
        let (x, y) = self.pixel_to_tile(px, py)?;
        self.tile_at_mut(x, y)
    }

    /// Brings the cell at (x, y) alive. Returns false when out of bounds.
    pub fn live_at(&mut self, x: i32, y: i32) -> bool {
        self.tile_at_mut(x, y).map(Cell::live).is_some()
    }

    /// Kills the cell at (x, y). Returns false when out of bounds.
    pub fn kill_at(&mut self, x: i32, y: i32) -> bool {
        self.tile_at_mut(x, y).map(Cell::kill).is_some()
    }

    pub fn render<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        for cell in &self.cells {
            cell.render(canvas);
        }
    }

    /// Kills every cell, rewinds to setup and runs `seed` over the cells.
    /// Refused while running.
    pub(crate) fn reseed<F>(&mut self, seed: F) -> Result<(), GridError>
    where
        F: FnOnce(&mut Self),
    {
        if self.state == GameState::Running {
            return Err(GridError::Locked(self.state));
        }
        self.reset();
        seed(self);
        Ok(())
    }
}

fn index_of(width: usize, height: usize, x: i32, y: i32) -> Option<CellIndex> {
    if x < 0 || y < 0 {
        return None;
    }
    let (x, y) = (x as usize, y as usize);
    if x < width && y < height { Some(y * width + x) } else { None }
}

/// The eight neighbour slots of (x, y), `None` where they leave the grid.
fn neighbourhood(width: usize, height: usize, x: i32, y: i32) -> Neighbours {
    let at = |x, y| index_of(width, height, x, y);
    [
        at(x - 1, y - 1), at(x, y - 1), at(x + 1, y - 1),
        at(x - 1, y),                   at(x + 1, y),
        at(x - 1, y + 1), at(x, y + 1), at(x + 1, y + 1),
    ]
}

/// Row coroutine for the counting phase
async fn count_row(row_index: usize, mut row: Vec<Cell>, alive: Arc<[bool]>) -> (usize, Vec<Cell>) {
    for cell in &mut row {
        cell.count_neighbours(&alive);
        tokio::task::yield_now().await;
    }
    (row_index, row)
}

/// Row coroutine for the update phase
async fn update_row(row_index: usize, mut row: Vec<Cell>) -> (usize, Vec<Cell>) {
    for cell in &mut row {
        cell.update();
        tokio::task::yield_now().await;
    }
    (row_index, row)
}

/// Both phases over owned rows. The counting phase is joined in full
/// before the update phase is spawned.
async fn step_rows(cells: Vec<Cell>, width: usize) -> Result<Vec<Cell>, GridError> {
    let alive: Arc<[bool]> = cells.iter().map(Cell::is_alive).collect();
    let counted = join_rows(&cells, width, move |row_index, row| {
        count_row(row_index, row, Arc::clone(&alive))
    })
    .await?;
    join_rows(&counted, width, update_row).await
}

/// Spawns `task` once per row of `cells` and waits for all of them. Nothing
/// is returned unless every row came back.
async fn join_rows<F, Fut>(cells: &[Cell], width: usize, task: F) -> Result<Vec<Cell>, GridError>
where
    F: Fn(usize, Vec<Cell>) -> Fut,
    Fut: Future<Output = (usize, Vec<Cell>)> + Send + 'static,
{
    if cells.is_empty() {
        return Ok(Vec::new());
    }

    let handles: Vec<_> = cells
        .chunks(width)
        .enumerate()
        .map(|(row_index, row)| tokio::spawn(task(row_index, row.to_vec())))
        .collect();

    let mut next = cells.to_vec();
    for join in handles {
        let (row_index, row) = join.await?;
        let start = row_index * width;
        next[start..start + width].copy_from_slice(&row);
    }
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::recording::{DrawOp, RecordingCanvas};

    fn grid_with(width: usize, height: usize, live: &[(i32, i32)]) -> Grid {
        let mut grid = Grid::with_size(width, height);
        for &(x, y) in live {
            assert!(grid.live_at(x, y));
        }
        grid
    }

    #[test]
    fn new_grid_is_dead_and_in_setup() {
        let grid = Grid::new();
        assert_eq!(grid.width(), GRID_WIDTH);
        assert_eq!(grid.height(), GRID_HEIGHT);
        assert_eq!(grid.cells().len(), GRID_WIDTH * GRID_HEIGHT);
        assert_eq!(grid.state(), GameState::Setup);
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn tile_at_rejects_out_of_bounds() {
        let grid = Grid::with_size(4, 3);
        for (x, y) in [(-1, 0), (0, -1), (4, 0), (0, 3), (-5, -5), (i32::MAX, 0), (4, 3)] {
            assert!(grid.tile_at(x, y).is_none(), "({x}, {y}) should be absent");
        }
        for y in 0..3 {
            for x in 0..4 {
                let cell = grid.tile_at(x, y).unwrap();
                assert_eq!((cell.x(), cell.y()), (x as usize, y as usize));
            }
        }
    }

    #[test]
    fn start_wires_edges_corners_and_interior() {
        let mut grid = Grid::with_size(5, 4);
        grid.start();

        for cell in grid.cells() {
            let on_x_edge = cell.x() == 0 || cell.x() == 4;
            let on_y_edge = cell.y() == 0 || cell.y() == 3;
            let expected = match (on_x_edge, on_y_edge) {
                (true, true)                => 3,
                (true, false) | (false, true) => 5,
                (false, false)              => 8,
            };
            assert_eq!(cell.neighbour_count(), expected, "cell ({}, {})", cell.x(), cell.y());
        }
    }

    #[test]
    fn start_wires_neighbours_in_reading_order() {
        let mut grid = Grid::with_size(3, 3);
        grid.start();

        let centre = grid.tile_at(1, 1).unwrap();
        assert_eq!(centre.neighbours(), &[Some(0), Some(1), Some(2), Some(3), Some(5), Some(6), Some(7), Some(8)]);

        let corner = grid.tile_at(0, 0).unwrap();
        assert_eq!(corner.neighbours(), &[None, None, None, None, Some(1), None, Some(3), Some(4)]);
    }

    #[test]
    fn start_is_idempotent() {
        let mut grid = Grid::with_size(6, 6);
        grid.start();
        let first = grid.clone();
        grid.start();
        assert_eq!(first.cells(), grid.cells());
        assert_eq!(grid.state(), GameState::Running);
    }

    #[test]
    fn update_is_idle_outside_running() {
        let mut grid = grid_with(5, 5, &[(2, 1), (2, 2), (2, 3)]);
        let before = grid.fingerprint();
        assert_eq!(grid.update(), Step::Idle);
        assert_eq!(grid.fingerprint(), before);
        assert_eq!(grid.generation(), 0);
    }

    #[test]
    fn pause_only_leaves_running() {
        let mut grid = Grid::with_size(3, 3);
        grid.pause();
        assert_eq!(grid.state(), GameState::Setup);

        grid.start();
        grid.pause();
        assert_eq!(grid.state(), GameState::Paused);

        grid.start();
        assert_eq!(grid.state(), GameState::Running);
    }

    #[test]
    fn reset_kills_everything_from_any_state() {
        for run in [false, true] {
            let mut grid = grid_with(5, 5, &[(0, 0), (1, 1), (4, 4)]);
            if run {
                grid.start();
                grid.update();
            }
            grid.reset();
            assert_eq!(grid.population(), 0);
            assert_eq!(grid.state(), GameState::Setup);
            assert_eq!(grid.generation(), 0);
        }
    }

    #[test]
    fn still_life_is_reported_as_a_cycle() {
        // Block: unchanged from one generation to the next.
        let mut grid = grid_with(4, 4, &[(1, 1), (2, 1), (1, 2), (2, 2)]);
        grid.start();
        assert_eq!(grid.update(), Step::Advanced);
        assert_eq!(grid.update(), Step::Cycled);
        assert_eq!(grid.population(), 4);
        // Detection only reports; stopping is up to the caller.
        assert_eq!(grid.state(), GameState::Running);
    }

    #[test]
    fn pixel_mapping_uses_cell_dimension() {
        let grid = Grid::with_size(4, 3);
        assert_eq!(grid.pixel_to_tile(0, 0), Some((0, 0)));
        assert_eq!(grid.pixel_to_tile(31, 31), Some((0, 0)));
        assert_eq!(grid.pixel_to_tile(32, 95), Some((1, 2)));
        assert_eq!(grid.pixel_to_tile(127, 0), Some((3, 0)));
        assert_eq!(grid.pixel_to_tile(128, 0), None);
        assert_eq!(grid.pixel_to_tile(0, 96), None);
        assert_eq!(grid.pixel_to_tile(-1, 0), None);
        assert_eq!(grid.pixel_to_tile(5, -20), None);

        let (x, y) = grid.pixel_to_tile(70, 40).unwrap();
        assert!(grid.tile_at(x, y).unwrap().rect().contains(70, 40));
    }

    #[test]
    fn pointer_actions_bounds_check() {
        let mut grid = Grid::with_size(3, 3);
        assert!(grid.live_at(1, 1));
        assert!(grid.tile_at(1, 1).unwrap().is_alive());
        assert!(!grid.live_at(3, 1));
        assert!(grid.kill_at(1, 1));
        assert!(!grid.tile_at(1, 1).unwrap().is_alive());
        assert!(!grid.kill_at(-1, 1));

        grid.tile_at_pixel_mut(40, 70).unwrap().live();
        assert!(grid.tile_at(1, 2).unwrap().is_alive());
        assert!(grid.tile_at_pixel_mut(96, 0).is_none());
    }

    #[test]
    fn tile_at_pixel_resolves_the_cell_under_the_pointer() {
        let grid = grid_with(3, 3, &[(1, 2)]);
        let cell = grid.tile_at_pixel(40, 70).unwrap();
        assert_eq!((cell.x(), cell.y()), (1, 2));
        assert!(cell.is_alive());

        assert_eq!(grid.tile_at_pixel(95, 95).map(|cell| (cell.x(), cell.y())), Some((2, 2)));
        for (px, py) in [(96, 0), (0, 96), (-1, 0), (0, -31)] {
            assert!(grid.tile_at_pixel(px, py).is_none(), "({px}, {py}) should be absent");
        }
    }

    #[test]
    fn render_draws_every_cell_once() {
        let grid = grid_with(3, 2, &[(1, 0)]);
        let mut canvas = RecordingCanvas::default();
        grid.render(&mut canvas);

        let fills = canvas.ops.iter().filter(|op| matches!(op, DrawOp::Fill(_))).count();
        let outlines = canvas.ops.iter().filter(|op| matches!(op, DrawOp::Outline(_))).count();
        assert_eq!((fills, outlines), (6, 6));
    }

    #[test]
    fn reseed_is_refused_while_running() {
        let mut grid = grid_with(3, 3, &[(1, 1)]);
        grid.start();
        let result = grid.reseed(|grid| { grid.live_at(0, 0); });
        assert!(matches!(result, Err(GridError::Locked(GameState::Running))));
        assert!(grid.tile_at(1, 1).unwrap().is_alive());
    }
}
