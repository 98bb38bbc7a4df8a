use serde::{Deserialize, Serialize};

/// True content of a board cell, fixed when the mines are laid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Mine,
    /// Number of mines among the (up to) eight neighbours.
    Count(u8),
}

impl Cell {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::Count(0)
    }
}

/// What a snapshot shows for one cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Revealed(u8),
    Mine,
}

impl CellView {
    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden)
    }

    /// Revealed cell without neighbouring mines, drawn without a number.
    pub const fn is_blank(self) -> bool {
        matches!(self, Self::Revealed(0))
    }
}

impl Default for CellView {
    fn default() -> Self {
        Self::Hidden
    }
}

impl From<Cell> for CellView {
    fn from(cell: Cell) -> Self {
        match cell {
            Cell::Mine => Self::Mine,
            Cell::Count(n) => Self::Revealed(n),
        }
    }
}
