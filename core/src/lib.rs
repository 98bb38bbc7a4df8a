#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use generator::*;
pub use registry::*;
pub use reputation::{ReputationNotice, ReputationStore};
pub use session::*;
pub use snapshot::*;
pub use types::*;

mod board;
mod cell;
mod error;
mod generator;
mod registry;
pub mod reputation;
mod session;
mod snapshot;
mod types;

/// Board side and mine count for one game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub dim: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub(crate) const fn new_unchecked(dim: Coord, mines: CellCount) -> Self {
        Self { dim, mines }
    }

    pub fn new(dim: Coord, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(dim, mines);
        config.validate()?;
        Ok(config)
    }

    /// Checks the bounds again, for values that came in through serde.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_DIM..=MAX_DIM).contains(&self.dim) {
            return Err(ConfigIssue::Dimension(self.dim).into());
        }
        if self.mines == 0 {
            return Err(ConfigIssue::NoMines.into());
        }
        if self.mines > self.total_cells() {
            return Err(ConfigIssue::TooManyMines {
                mines: self.mines,
                cells: self.total_cells(),
            }
            .into());
        }
        Ok(())
    }

    pub const fn total_cells(&self) -> CellCount {
        square(self.dim)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }

    /// Reputation awarded for clearing this board, see [`reputation::win_value`].
    pub fn win_value(&self) -> i64 {
        reputation::win_value(*self)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(4, 3)
    }
}

/// Where the mines are. Immutable once built.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMineLayout")]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

/// Wire form of [`MineLayout`], checked before it becomes one.
#[derive(Deserialize)]
struct RawMineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl TryFrom<RawMineLayout> for MineLayout {
    type Error = GameError;

    fn try_from(raw: RawMineLayout) -> Result<Self> {
        let (rows, cols) = raw.mine_mask.dim();
        if rows != cols {
            return Err(ConfigIssue::NotSquare { rows, cols }.into());
        }
        let dim = Coord::try_from(rows).unwrap_or(Coord::MAX);
        let actual = raw.mine_mask.iter().filter(|&&is_mine| is_mine).count();
        GameConfig::new(dim, CellCount::try_from(actual).unwrap_or(CellCount::MAX))?;

        let layout = Self::from_mine_mask(raw.mine_mask);
        if layout.mine_count != raw.mine_count {
            return Err(ConfigIssue::MineCountMismatch {
                declared: raw.mine_count,
                actual: layout.mine_count,
            }
            .into());
        }
        Ok(layout)
    }
}

impl MineLayout {
    /// Callers guarantee the mask is square and holds a valid mine count.
    pub(crate) fn from_mine_mask(mine_mask: Array2<bool>) -> Self {
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;
        Self {
            mine_mask,
            mine_count,
        }
    }

    /// Fixed layout, used for replays and tests.
    pub fn from_mine_coords(dim: Coord, mine_coords: &[Coord2]) -> Result<Self> {
        let mines = CellCount::try_from(mine_coords.len()).unwrap_or(CellCount::MAX);
        GameConfig::new(dim, mines)?;

        let mut mine_mask: Array2<bool> = Array2::default((dim, dim).to_nd_index());
        for &coords in mine_coords {
            if coords.0 >= dim || coords.1 >= dim {
                return Err(ConfigIssue::MineOutOfBounds(coords).into());
            }
            let slot = &mut mine_mask[coords.to_nd_index()];
            if *slot {
                return Err(ConfigIssue::DuplicateMine(coords).into());
            }
            *slot = true;
        }

        Ok(Self::from_mine_mask(mine_mask))
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.dim(), self.mine_count)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let dim = self.dim();
        if coords.0 < dim && coords.1 < dim {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds { coords, dim })
        }
    }

    pub fn dim(&self) -> Coord {
        self.mine_mask.nrows() as Coord
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        square(self.dim())
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    pub fn mine_coords(&self) -> Vec<Coord2> {
        let dim = self.dim();
        self.mine_mask
            .iter()
            .enumerate()
            .filter(|&(_, &is_mine)| is_mine)
            .map(|(index, _)| from_flat_index(index, dim))
            .collect()
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.iter_neighbors(coords).filter(|&pos| self[pos]).count() as u8
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.mine_mask.iter_neighbors(coords)
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}
