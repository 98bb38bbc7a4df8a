use core::fmt;
use core::hash::Hash;
use hashbrown::HashMap;
use hashbrown::hash_map::Entry;

use crate::*;

/// Active games keyed by whatever identifies a game message.
///
/// Finished games are dropped as soon as their terminal outcome is returned.
#[derive(Debug)]
pub struct GameRegistry<K, P> {
    sessions: HashMap<K, Session<P>>,
}

impl<K, P> Default for GameRegistry<K, P> {
    fn default() -> Self {
        Self {
            sessions: HashMap::new(),
        }
    }
}

impl<K, P> GameRegistry<K, P>
where
    K: Hash + Eq + fmt::Debug,
    P: PartialEq + fmt::Debug,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(
        &mut self,
        key: K,
        config: GameConfig,
        player: P,
        generator: impl MineGenerator,
    ) -> Result<&Session<P>> {
        match self.sessions.entry(key) {
            Entry::Occupied(entry) => {
                log::warn!("Game {:?} is already running", entry.key());
                Err(GameError::SessionExists)
            }
            Entry::Vacant(entry) => {
                let session = Session::start(config, player, generator)?;
                Ok(entry.insert(session))
            }
        }
    }

    /// Forwards a click to the game under `key`.
    pub fn dig(&mut self, key: &K, player: &P, coords: Coord2) -> Result<DigOutcome> {
        let session = self
            .sessions
            .get_mut(key)
            .ok_or(GameError::UnknownSession)?;
        let outcome = session.dig_as(player, coords)?;
        if outcome.is_terminal() {
            self.sessions.remove(key);
            log::debug!("Game {:?} finished, {} still running", key, self.len());
        }
        Ok(outcome)
    }

    pub fn get(&self, key: &K) -> Option<&Session<P>> {
        self.sessions.get(key)
    }

    /// Drops a game that will not receive further clicks, e.g. after an idle timeout.
    pub fn abandon(&mut self, key: &K) -> Option<Session<P>> {
        self.sessions.remove(key)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> MineLayout {
        MineLayout::from_mine_coords(2, &[(0, 0)]).unwrap()
    }

    fn registry() -> GameRegistry<u64, &'static str> {
        let mut registry = GameRegistry::new();
        registry
            .start(1, GameConfig::new(2, 1).unwrap(), "ada", layout())
            .unwrap();
        registry
    }

    #[test]
    fn start_rejects_duplicate_key() {
        let mut registry = registry();

        let err = registry
            .start(1, GameConfig::new(2, 1).unwrap(), "bob", layout())
            .unwrap_err();

        assert_eq!(err, GameError::SessionExists);
        assert_eq!(registry.get(&1).unwrap().player(), &"ada");
    }

    #[test]
    fn start_propagates_invalid_config() {
        let mut registry = registry();

        let err = registry
            .start(2, GameConfig::new_unchecked(6, 1), "bob", RandomMineGenerator::new(0))
            .unwrap_err();

        assert!(matches!(err, GameError::InvalidConfig(_)));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn start_rejects_layout_for_other_config() {
        let mut registry = registry();

        let err = registry
            .start(2, GameConfig::new(4, 3).unwrap(), "bob", layout())
            .unwrap_err();

        assert!(matches!(
            err,
            GameError::InvalidConfig(ConfigIssue::LayoutMismatch { .. })
        ));
        assert!(registry.get(&2).is_none());
    }

    #[test]
    fn finished_games_are_removed() {
        let mut registry = registry();

        let outcome = registry.dig(&1, &"ada", (1, 1)).unwrap();
        assert!(!outcome.is_terminal());
        assert_eq!(registry.len(), 1);

        let outcome = registry.dig(&1, &"ada", (0, 0)).unwrap();
        assert_eq!(outcome.state, SessionState::Lost);
        assert!(registry.is_empty());
        assert_eq!(
            registry.dig(&1, &"ada", (0, 1)),
            Err(GameError::UnknownSession)
        );
    }

    #[test]
    fn other_players_cannot_dig() {
        let mut registry = registry();

        assert_eq!(registry.dig(&1, &"bob", (1, 1)), Err(GameError::NotPlayer));
        assert_eq!(registry.get(&1).unwrap().moves(), 0);
    }

    #[test]
    fn games_are_independent() {
        let mut registry = registry();
        registry
            .start(2, GameConfig::new(2, 1).unwrap(), "bob", layout())
            .unwrap();

        registry.dig(&2, &"bob", (0, 0)).unwrap();

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(&1).unwrap().state(), SessionState::InProgress);
        assert!(registry.abandon(&1).is_some());
        assert!(registry.is_empty());
    }
}
