//! Reputation awarded or fined at the end of a game.
//!
//! Both amounts round half to even, computed on exact integer ratios so no
//! float ever decides a tie.

use core::fmt;

use crate::{DigOutcome, GameConfig};

/// Reputation for clearing a board: `round(0.5 * (mines² / dim² + mines))`.
pub fn win_value(config: GameConfig) -> i64 {
    let mines = i64::from(config.mines);
    let cells = i64::from(config.total_cells());
    if cells == 0 {
        return 0;
    }
    round_half_even(mines * mines + mines * cells, 2 * cells)
}

/// Signed change applied on defeat: `-round(win_value / 3)`.
pub fn loss_penalty(win_value: i64) -> i64 {
    -round_half_even(win_value, 3)
}

/// `num / den` rounded to the nearest integer, ties to even. Needs `num >= 0, den > 0`.
fn round_half_even(num: i64, den: i64) -> i64 {
    let quotient = num / den;
    let twice_remainder = 2 * (num % den);
    if twice_remainder > den || (twice_remainder == den && quotient % 2 == 1) {
        quotient + 1
    } else {
        quotient
    }
}

/// Durable per-player reputation, owned by whoever hosts the games.
pub trait ReputationStore<P: ?Sized> {
    type Error: fmt::Debug;

    /// Adds `delta` to the player's reputation and returns the new total.
    fn apply(&mut self, player: &P, delta: i64) -> Result<i64, Self::Error>;
}

/// Message shown to the player once their reputation has been updated.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ReputationNotice {
    Awarded(i64),
    Fined(i64),
}

impl ReputationNotice {
    pub fn from_delta(delta: i64) -> Self {
        if delta > 0 {
            Self::Awarded(delta)
        } else {
            Self::Fined(-delta)
        }
    }
}

impl fmt::Display for ReputationNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (amount, verb, end) = match *self {
            Self::Awarded(amount) => (amount, "awarded", '!'),
            Self::Fined(amount) => (amount, "fined", '.'),
        };
        let plural = if amount > 1 { "s" } else { "" };
        write!(f, "You have been {verb} {amount} reputation point{plural}{end}")
    }
}

/// Applies the reputation change of a finished game.
///
/// A store failure is logged and yields `None`; the game result stands either way.
pub fn settle<P, S>(outcome: &DigOutcome, player: &P, store: &mut S) -> Option<ReputationNotice>
where
    P: fmt::Debug + ?Sized,
    S: ReputationStore<P> + ?Sized,
{
    let delta = outcome.reputation_delta?;
    match store.apply(player, delta) {
        Ok(total) => {
            log::info!(
                "Reputation of {:?} changed by {} to {}",
                player,
                delta,
                total
            );
            Some(ReputationNotice::from_delta(delta))
        }
        Err(err) => {
            log::error!(
                "Failed to apply reputation change {} for {:?}: {:?}",
                delta,
                player,
                err
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::*;
    use alloc::string::ToString;
    use alloc::vec::Vec;

    fn config(dim: Coord, mines: CellCount) -> GameConfig {
        GameConfig::new(dim, mines).unwrap()
    }

    #[test]
    fn win_values() {
        assert_eq!(win_value(config(2, 1)), 1);
        assert_eq!(win_value(config(4, 3)), 2);
        assert_eq!(win_value(config(5, 1)), 1);
        assert_eq!(win_value(config(5, 25)), 25);
        assert_eq!(win_value(config(5, 5)), 3);
    }

    #[test]
    fn win_value_ties_round_to_even() {
        // 0.5 * (4/4 + 2) = 1.5
        assert_eq!(win_value(config(2, 2)), 2);
        // 0.5 * (16/16 + 4) = 2.5
        assert_eq!(win_value(config(4, 4)), 2);
        // 0.5 * (36/16 + 6) = 4.125
        assert_eq!(win_value(config(4, 6)), 4);
    }

    #[test]
    fn loss_penalties() {
        assert_eq!(loss_penalty(1), 0);
        assert_eq!(loss_penalty(2), -1);
        assert_eq!(loss_penalty(4), -1);
        assert_eq!(loss_penalty(5), -2);
        assert_eq!(loss_penalty(25), -8);
    }

    #[test]
    fn notice_text() {
        assert_eq!(
            ReputationNotice::Awarded(1).to_string(),
            "You have been awarded 1 reputation point!"
        );
        assert_eq!(
            ReputationNotice::Fined(3).to_string(),
            "You have been fined 3 reputation points."
        );
        assert_eq!(ReputationNotice::from_delta(-2), ReputationNotice::Fined(2));
    }

    #[derive(Default)]
    struct Ledger {
        total: i64,
        applied: Vec<i64>,
        offline: bool,
    }

    impl ReputationStore<str> for Ledger {
        type Error = &'static str;

        fn apply(&mut self, _player: &str, delta: i64) -> core::result::Result<i64, Self::Error> {
            if self.offline {
                return Err("store offline");
            }
            self.total += delta;
            self.applied.push(delta);
            Ok(self.total)
        }
    }

    fn lost_outcome() -> DigOutcome {
        let layout = MineLayout::from_mine_coords(4, &[(0, 0), (1, 1), (2, 2)]).unwrap();
        let mut session = Session::from_layout(layout, "ada");
        session.dig((1, 1)).unwrap()
    }

    #[test]
    fn settle_applies_terminal_delta() {
        let mut ledger = Ledger::default();
        let notice = settle(&lost_outcome(), "ada", &mut ledger);

        assert_eq!(notice, Some(ReputationNotice::Fined(1)));
        assert_eq!(ledger.applied, [-1]);
    }

    #[test]
    fn settle_tolerates_store_failure() {
        let mut ledger = Ledger {
            offline: true,
            ..Default::default()
        };
        let outcome = lost_outcome();

        assert_eq!(settle(&outcome, "ada", &mut ledger), None);
        assert_eq!(outcome.state, SessionState::Lost);
        assert!(ledger.applied.is_empty());
    }

    #[test]
    fn settle_skips_games_in_progress() {
        let layout = MineLayout::from_mine_coords(4, &[(0, 0), (1, 1), (2, 2)]).unwrap();
        let mut session = Session::from_layout(layout, "ada");
        let outcome = session.dig((3, 0)).unwrap();
        let mut ledger = Ledger::default();

        assert_eq!(settle(&outcome, "ada", &mut ledger), None);
        assert!(ledger.applied.is_empty());
    }
}
