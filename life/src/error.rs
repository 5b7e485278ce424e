// error.rs - Startup failures of the windowed application

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("could not build the tokio runtime: {0}")]
    Runtime(#[from] std::io::Error),

    #[error("graphics initialisation failed: {0}")]
    Graphics(#[from] eframe::Error),
}
