use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnapshotKind {
    /// Only dug cells are shown.
    Visible,
    /// Every mine and count is shown, used once a game is over.
    Full,
}

/// Render-ready view of a board, derived on demand from the grid and dug set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub kind: SnapshotKind,
    pub cells: Array2<CellView>,
}

impl Snapshot {
    pub fn visible(board: &Board) -> Self {
        Self::build(board, SnapshotKind::Visible, |coords| {
            if board.is_dug(coords) {
                board.cell_at(coords).into()
            } else {
                CellView::Hidden
            }
        })
    }

    pub fn full(board: &Board) -> Self {
        Self::build(board, SnapshotKind::Full, |coords| board.cell_at(coords).into())
    }

    fn build(board: &Board, kind: SnapshotKind, view: impl Fn(Coord2) -> CellView) -> Self {
        let dim = board.dim();
        let mut cells = Array2::from_elem((dim, dim).to_nd_index(), CellView::Hidden);
        for row in 0..dim {
            for col in 0..dim {
                cells[(row, col).to_nd_index()] = view((row, col));
            }
        }
        Self { kind, cells }
    }

    pub fn dim(&self) -> Coord {
        self.cells.nrows() as Coord
    }

    pub fn cell_at(&self, coords: Coord2) -> CellView {
        self.cells[coords.to_nd_index()]
    }

    /// Row-major cells with their coordinates, one button per item.
    pub fn iter(&self) -> impl Iterator<Item = (Coord2, CellView)> + '_ {
        let dim = self.dim();
        self.cells
            .iter()
            .enumerate()
            .map(move |(index, &cell)| (from_flat_index(index, dim), cell))
    }

    pub fn hidden_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_hidden()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> Board {
        Board::from_layout(MineLayout::from_mine_coords(3, &[(0, 0)]).unwrap())
    }

    #[test]
    fn visible_hides_undug_cells() {
        let mut board = board();
        board.reveal((1, 1)).unwrap();

        let snapshot = board.visible_snapshot();

        assert_eq!(snapshot.kind, SnapshotKind::Visible);
        assert_eq!(snapshot.dim(), 3);
        assert_eq!(snapshot.cell_at((1, 1)), CellView::Revealed(1));
        assert_eq!(snapshot.cell_at((0, 0)), CellView::Hidden);
        assert_eq!(snapshot.hidden_count(), 8);
    }

    #[test]
    fn visible_distinguishes_blank_cells() {
        let mut board = board();
        board.reveal((2, 2)).unwrap();

        let snapshot = board.visible_snapshot();

        assert!(snapshot.cell_at((2, 2)).is_blank());
        assert!(!snapshot.cell_at((1, 1)).is_blank());
        assert_eq!(snapshot.cell_at((1, 1)), CellView::Revealed(1));
        assert_eq!(snapshot.hidden_count(), 1);
    }

    #[test]
    fn full_shows_everything_without_digging() {
        let board = board();
        let snapshot = board.full_snapshot();

        assert_eq!(snapshot.kind, SnapshotKind::Full);
        assert_eq!(snapshot.cell_at((0, 0)), CellView::Mine);
        assert_eq!(snapshot.cell_at((2, 2)), CellView::Revealed(0));
        assert_eq!(snapshot.hidden_count(), 0);
        assert_eq!(board.dug_count(), 0);
    }

    #[test]
    fn iter_is_row_major() {
        let snapshot = board().full_snapshot();
        let mut cells = snapshot.iter();

        assert_eq!(cells.next(), Some(((0, 0), CellView::Mine)));
        assert_eq!(cells.next(), Some(((0, 1), CellView::Revealed(1))));
        assert_eq!(cells.last(), Some(((2, 2), CellView::Revealed(0))));
    }
}
