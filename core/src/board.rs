use alloc::collections::VecDeque;
use ndarray::Array2;
use serde::Serialize;
use smallvec::SmallVec;

use crate::*;

/// Coordinates dug by a single reveal, in the order they were opened.
pub type DugCells = SmallVec<[Coord2; 8]>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RevealResult {
    /// The cell holds a mine. Nothing was dug.
    HitMine,
    /// The cell is safe. `newly_dug` is empty when it had been dug before.
    Safe { value: u8, newly_dug: DugCells },
}

/// One game's grid: the mine layout, every cell's value and the dug set.
///
/// Serialize only: a board is never restored, only built from a checked layout.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Board {
    mine_layout: MineLayout,
    cells: Array2<Cell>,
    dug: Array2<bool>,
    dug_count: CellCount,
}

impl Board {
    pub fn new(config: GameConfig, generator: impl MineGenerator) -> Result<Self> {
        config.validate()?;
        let mine_layout = generator.generate(config);
        if mine_layout.game_config() != config {
            return Err(ConfigIssue::LayoutMismatch {
                requested: config,
                actual: mine_layout.game_config(),
            }
            .into());
        }
        Ok(Self::from_layout(mine_layout))
    }

    pub fn random(config: GameConfig, seed: u64) -> Result<Self> {
        Self::new(config, RandomMineGenerator::new(seed))
    }

    pub fn from_layout(mine_layout: MineLayout) -> Self {
        let dim = mine_layout.dim();
        let shape = (dim, dim).to_nd_index();
        let mut cells: Array2<Cell> = Array2::default(shape);
        for row in 0..dim {
            for col in 0..dim {
                let coords = (row, col);
                cells[coords.to_nd_index()] = if mine_layout.contains_mine(coords) {
                    Cell::Mine
                } else {
                    Cell::Count(mine_layout.adjacent_mine_count(coords))
                };
            }
        }

        log::debug!(
            "New {}x{} board with {} mines",
            dim,
            dim,
            mine_layout.mine_count()
        );

        Self {
            mine_layout,
            cells,
            dug: Array2::default(shape),
            dug_count: 0,
        }
    }

    pub fn dim(&self) -> Coord {
        self.mine_layout.dim()
    }

    pub fn config(&self) -> GameConfig {
        self.mine_layout.game_config()
    }

    pub fn mine_layout(&self) -> &MineLayout {
        &self.mine_layout
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.cells[coords.to_nd_index()]
    }

    pub fn is_dug(&self, coords: Coord2) -> bool {
        self.dug[coords.to_nd_index()]
    }

    pub fn dug_count(&self) -> CellCount {
        self.dug_count
    }

    pub fn safe_cells_left(&self) -> CellCount {
        self.mine_layout.safe_cell_count() - self.dug_count
    }

    /// Every safe cell has been dug.
    pub fn is_cleared(&self) -> bool {
        self.dug_count >= self.mine_layout.safe_cell_count()
    }

    pub fn full_snapshot(&self) -> Snapshot {
        Snapshot::full(self)
    }

    pub fn visible_snapshot(&self) -> Snapshot {
        Snapshot::visible(self)
    }

    /// Digs `coords`, flooding outwards from zero cells.
    ///
    /// A mine is reported but never added to the dug set. Re-revealing a dug cell
    /// returns its value and changes nothing.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealResult> {
        let coords = self.mine_layout.validate_coords(coords)?;

        let value = match self.cell_at(coords) {
            Cell::Mine => return Ok(RevealResult::HitMine),
            Cell::Count(value) => value,
        };

        let mut newly_dug = DugCells::new();
        if self.is_dug(coords) {
            return Ok(RevealResult::Safe { value, newly_dug });
        }

        self.mark_dug(coords, &mut newly_dug);

        if value == 0 {
            // the dug mask doubles as the visited set
            let mut to_visit: VecDeque<Coord2> = self.undug_neighbors(coords).collect();

            while let Some(visit_coords) = to_visit.pop_front() {
                if self.is_dug(visit_coords) {
                    continue;
                }

                // zero cells never border a mine, so this only skips on bad input
                let Cell::Count(visit_value) = self.cell_at(visit_coords) else {
                    continue;
                };

                self.mark_dug(visit_coords, &mut newly_dug);

                if visit_value == 0 {
                    to_visit.extend(self.undug_neighbors(visit_coords));
                }
            }
        }

        log::debug!(
            "Dug {:?} ({}), opened {} cells, {} safe cells left",
            coords,
            value,
            newly_dug.len(),
            self.safe_cells_left()
        );

        Ok(RevealResult::Safe { value, newly_dug })
    }

    fn mark_dug(&mut self, coords: Coord2, newly_dug: &mut DugCells) {
        self.dug[coords.to_nd_index()] = true;
        self.dug_count += 1;
        newly_dug.push(coords);
    }

    fn undug_neighbors(&self, coords: Coord2) -> impl Iterator<Item = Coord2> + use<'_> {
        self.mine_layout
            .iter_neighbors(coords)
            .filter(|&pos| !self.is_dug(pos))
    }
}
