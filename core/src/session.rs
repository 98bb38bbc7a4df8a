use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl SessionState {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Everything the presentation layer needs after one click.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigOutcome {
    /// Visible board while in progress, full board once the game is over.
    pub snapshot: Snapshot,
    pub moves: u32,
    pub state: SessionState,
    /// Only set on a terminal outcome.
    pub reputation_delta: Option<i64>,
    /// The mine that went off, on a loss.
    pub exploded: Option<Coord2>,
    pub newly_dug: DugCells,
}

impl DigOutcome {
    pub const fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }
}

/// One player's game, driven by sequential [`Session::dig`] calls.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Session<P> {
    board: Board,
    player: P,
    moves: u32,
    state: SessionState,
    win_value: i64,
}

impl<P: fmt::Debug> Session<P> {
    pub fn start(config: GameConfig, player: P, generator: impl MineGenerator) -> Result<Self> {
        Ok(Self::with_board(Board::new(config, generator)?, player))
    }

    pub fn start_seeded(config: GameConfig, player: P, seed: u64) -> Result<Self> {
        Self::start(config, player, RandomMineGenerator::new(seed))
    }

    pub fn from_layout(mine_layout: MineLayout, player: P) -> Self {
        Self::with_board(Board::from_layout(mine_layout), player)
    }

    fn with_board(board: Board, player: P) -> Self {
        let config = board.config();
        let win_value = config.win_value();
        log::info!(
            "{:?} started minesweeper (board: {}, mines: {}, win value: {})",
            player,
            config.dim,
            config.mines,
            win_value
        );
        Self {
            board,
            player,
            moves: 0,
            state: SessionState::InProgress,
            win_value,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> GameConfig {
        self.board.config()
    }

    pub fn player(&self) -> &P {
        &self.player
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn win_value(&self) -> i64 {
        self.win_value
    }

    /// Current view for re-rendering without a move.
    pub fn snapshot(&self) -> Snapshot {
        if self.state.is_terminal() {
            self.board.full_snapshot()
        } else {
            self.board.visible_snapshot()
        }
    }

    /// Like [`Session::dig`], but only for the player who started the game.
    pub fn dig_as(&mut self, player: &P, coords: Coord2) -> Result<DigOutcome>
    where
        P: PartialEq,
    {
        if *player != self.player {
            log::debug!("{:?} tried to dig in a game of {:?}", player, self.player);
            return Err(GameError::NotPlayer);
        }
        self.dig(coords)
    }

    /// Plays one click. Rejected calls leave the session untouched.
    pub fn dig(&mut self, coords: Coord2) -> Result<DigOutcome> {
        if self.state.is_terminal() {
            return Err(GameError::InvalidState(self.state));
        }
        let coords = self.board.mine_layout().validate_coords(coords)?;

        self.moves = self.moves.saturating_add(1);

        let (state, reputation_delta, exploded, newly_dug) = match self.board.reveal(coords)? {
            RevealResult::HitMine => {
                let delta = reputation::loss_penalty(self.win_value);
                log::info!("{:?} blew up at {:?}", self.player, coords);
                (SessionState::Lost, Some(delta), Some(coords), DugCells::new())
            }
            RevealResult::Safe { newly_dug, .. } if self.board.is_cleared() => {
                log::info!("{:?} found all the mines", self.player);
                (SessionState::Won, Some(self.win_value), None, newly_dug)
            }
            RevealResult::Safe { newly_dug, .. } => {
                log::debug!("{:?} selected {:?}", self.player, coords);
                (SessionState::InProgress, None, None, newly_dug)
            }
        };
        self.state = state;

        Ok(DigOutcome {
            snapshot: self.snapshot(),
            moves: self.moves,
            state,
            reputation_delta,
            exploded,
            newly_dug,
        })
    }
}
