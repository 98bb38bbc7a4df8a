use thiserror::Error;

use crate::{CellCount, Coord, Coord2, GameConfig, SessionState};

/// Which bound a rejected [`GameConfig`](crate::GameConfig) violated.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigIssue {
    #[error("board dimension {0} is outside 2..=5")]
    Dimension(Coord),
    #[error("need at least one mine")]
    NoMines,
    #[error("{mines} mines do not fit on {cells} cells")]
    TooManyMines { mines: CellCount, cells: CellCount },
    #[error("mine at {0:?} is outside the board")]
    MineOutOfBounds(Coord2),
    #[error("mine at {0:?} listed twice")]
    DuplicateMine(Coord2),
    #[error("board has {rows} rows but {cols} columns")]
    NotSquare { rows: usize, cols: usize },
    #[error("layout declares {declared} mines but holds {actual}")]
    MineCountMismatch { declared: CellCount, actual: CellCount },
    #[error("generated layout {actual:?} does not match requested {requested:?}")]
    LayoutMismatch {
        requested: GameConfig,
        actual: GameConfig,
    },
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid game configuration: {0}")]
    InvalidConfig(#[from] ConfigIssue),
    #[error("Coordinates {coords:?} are outside a {dim}x{dim} board")]
    OutOfBounds { coords: Coord2, dim: Coord },
    #[error("Game already ended ({0:?}), no new moves are accepted")]
    InvalidState(SessionState),
    #[error("Only the player who started the game may dig")]
    NotPlayer,
    #[error("A game is already running under this key")]
    SessionExists,
    #[error("No game is running under this key")]
    UnknownSession,
}

pub type Result<T> = core::result::Result<T, GameError>;
