// error.rs - Failures of the optional grid operations
//
// The automaton itself is total; these only come from the concurrent step
// and from pattern loading.

use thiserror::Error;
use tokio::task::JoinError;

use crate::grid::GameState;

#[derive(Debug, Error)]
pub enum GridError {
    #[error("row task failed: {0}")]
    RowTask(#[from] JoinError),

    #[error("a current-thread runtime can only be driven through the runtime itself")]
    CurrentThread,

    #[error("patterns cannot be loaded while the grid is {0}")]
    Locked(GameState),
}
