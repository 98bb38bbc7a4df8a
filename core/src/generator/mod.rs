use crate::*;
pub use random::*;

mod random;

/// Strategy for laying the mines of a new board.
///
/// Implementations may assume `config` has already been validated.
pub trait MineGenerator {
    fn generate(self, config: GameConfig) -> MineLayout;
}

/// A fixed layout lays itself, for replays and scripted games.
///
/// [`Board::new`] rejects it when it does not match the requested config.
impl MineGenerator for MineLayout {
    fn generate(self, _config: GameConfig) -> MineLayout {
        self
    }
}
