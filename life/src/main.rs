// main.rs - Conway's Game of Life in a window
//
// S starts, P pauses, R resets, Esc quits. Left click brings a cell alive,
// right click kills it. 1-6 load a pattern and N a random fill while the
// simulation is stopped.

use eframe::egui;
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use life_core::{Grid, CELL_DIMENSION, GRID_HEIGHT, GRID_WIDTH};

mod config;
mod error;
mod painter;
mod ui;

use config::Config;
use error::AppError;

const TITLE: &str = "Life";
const STATUS_HEIGHT: f32 = 28.0;

fn main() -> Result<(), AppError> {
    let config = Config::from_env();
    init_tracing(&config);

    info!(
        version     = env!("CARGO_PKG_VERSION"),
        width       = GRID_WIDTH,
        height      = GRID_HEIGHT,
        concurrent  = config.concurrent,
        "life starting"
    );

    run(config).inspect_err(|err| error!(%err, "life could not start"))?;
    info!("life finished");
    Ok(())
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_new(&config.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .compact()
        .init();
}

fn run(config: Config) -> Result<(), AppError> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(TITLE)
            .with_inner_size([
                (GRID_WIDTH as i32 * CELL_DIMENSION) as f32,
                (GRID_HEIGHT as i32 * CELL_DIMENSION) as f32 + STATUS_HEIGHT,
            ])
            .with_resizable(false)
            .with_fullscreen(config.fullscreen),
        ..Default::default()
    };

    let app = LifeApp::new(config)?;
    eframe::run_native(TITLE, options, Box::new(move |_cc| Box::new(app)))?;
    Ok(())
}

/// The controller: owns the grid and paces the simulation.
pub struct LifeApp {
    pub grid: Grid,
    pub config: Config,
    pub last_tick: Instant,
    pub random_seed: u64,

    // Only built when rows are stepped as tasks.
    runtime: Option<tokio::runtime::Runtime>,
}

impl LifeApp {
    pub fn new(config: Config) -> Result<Self, AppError> {
        let runtime = if config.concurrent {
            Some(tokio::runtime::Runtime::new()?)
        } else {
            None
        };

        let random_seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos() as u64)
            .unwrap_or_default();

        Ok(Self {
            grid: Grid::new(),
            config,
            last_tick: Instant::now(),
            random_seed,
            runtime,
        })
    }
}
