//! Pinned coins, capped at [`MAX_SELECTED`]
//!
//! The set is ordered by insertion and unique by coin id. It is persisted as
//! a JSON array of coin records under the client's selection key
//! ([`SELECTION_KEY`] plus the client id).

use serde::Serialize;

use crate::catalog::Coin;
use crate::error::{ReplacementError, Result};
use crate::storage::{self, KeyValueStore};

/// Maximum number of pinned coins
pub const MAX_SELECTED: usize = 5;

/// Result of a toggle request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToggleOutcome {
    /// Coin appended to the set
    Added,
    /// Coin removed from the set
    Removed,
    /// Enable requested for a coin that is already pinned
    AlreadySelected,
    /// Disable requested for a coin that is not pinned
    NotSelected,
    /// Set is full; the add was refused
    Full,
}

impl ToggleOutcome {
    /// Whether the set changed and must be persisted
    pub fn is_mutation(self) -> bool {
        matches!(self, ToggleOutcome::Added | ToggleOutcome::Removed)
    }
}

/// Ordered, bounded set of pinned coins
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SelectionSet {
    coins: Vec<Coin>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from arbitrary records, dropping duplicates and anything
    /// past the cap
    pub fn from_coins(coins: impl IntoIterator<Item = Coin>) -> Self {
        let mut set = Self::new();
        for coin in coins {
            if set.len() == MAX_SELECTED {
                break;
            }
            if !set.contains(&coin.id) {
                set.coins.push(coin);
            }
        }
        set
    }

    pub fn coins(&self) -> &[Coin] {
        &self.coins
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.coins.iter().map(|c| c.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.coins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coins.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.coins.len() >= MAX_SELECTED
    }

    pub fn contains(&self, coin_id: &str) -> bool {
        self.coins.iter().any(|c| c.id == coin_id)
    }

    /// Enable or disable a coin
    pub fn toggle(&mut self, coin: &Coin, enable: bool) -> ToggleOutcome {
        if enable {
            if self.contains(&coin.id) {
                ToggleOutcome::AlreadySelected
            } else if self.is_full() {
                ToggleOutcome::Full
            } else {
                self.coins.push(coin.clone());
                ToggleOutcome::Added
            }
        } else if self.remove(&coin.id).is_some() {
            ToggleOutcome::Removed
        } else {
            ToggleOutcome::NotSelected
        }
    }

    /// Remove a coin by id
    pub fn remove(&mut self, coin_id: &str) -> Option<Coin> {
        let idx = self.coins.iter().position(|c| c.id == coin_id)?;
        Some(self.coins.remove(idx))
    }

    /// Swap `evicted` out for `candidate`, appending the candidate at the end.
    ///
    /// Fails, leaving the set untouched, if `evicted` is not pinned or the
    /// candidate already is.
    pub fn replace(
        &mut self,
        evicted: &str,
        candidate: Coin,
    ) -> std::result::Result<Coin, ReplacementError> {
        if self.contains(&candidate.id) {
            return Err(ReplacementError::AlreadySelected(candidate.id));
        }
        let removed = self
            .remove(evicted)
            .ok_or_else(|| ReplacementError::NotSelected(evicted.to_string()))?;
        self.coins.push(candidate);
        Ok(removed)
    }

    /// Load the persisted set.
    ///
    /// Missing or malformed data yields an empty set; it is logged, never
    /// surfaced to the user.
    pub async fn load<S: KeyValueStore>(store: &S, key: &str) -> Self {
        match storage::get_json::<_, Vec<Coin>>(store, key).await {
            Ok(Some(coins)) => {
                let stored = coins.len();
                let set = Self::from_coins(coins);
                if set.len() != stored {
                    log::warn!("Repaired persisted selection: {stored} records, kept {}", set.len());
                }
                set
            }
            Ok(None) => Self::new(),
            Err(e) => {
                log::warn!("Discarding unreadable persisted selection: {e}");
                Self::new()
            }
        }
    }

    /// Persist the whole set
    pub async fn save<S: KeyValueStore>(&self, store: &S, key: &str) -> Result<()> {
        storage::put_json(store, key, &self.coins).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SELECTION_KEY;
    use crate::testing::{MemoryStore, coin, six_coins};

    fn full_set() -> SelectionSet {
        let mut set = SelectionSet::new();
        for c in six_coins().iter().take(MAX_SELECTED) {
            assert_eq!(set.toggle(c, true), ToggleOutcome::Added);
        }
        set
    }

    #[test]
    fn test_add_and_remove() {
        let btc = coin("bitcoin", "btc", "Bitcoin");
        let mut set = SelectionSet::new();

        assert_eq!(set.toggle(&btc, true), ToggleOutcome::Added);
        assert!(set.contains("bitcoin"));

        assert_eq!(set.toggle(&btc, false), ToggleOutcome::Removed);
        assert!(set.is_empty());
    }

    #[test]
    fn test_toggle_on_twice_is_idempotent() {
        let btc = coin("bitcoin", "btc", "Bitcoin");
        let mut set = SelectionSet::new();

        set.toggle(&btc, true);
        assert_eq!(set.toggle(&btc, true), ToggleOutcome::AlreadySelected);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_toggle_off_absent_is_noop() {
        let mut set = full_set();
        let before = set.clone();
        let ltc = coin("litecoin", "ltc", "Litecoin");

        assert_eq!(set.toggle(&ltc, false), ToggleOutcome::NotSelected);
        assert_eq!(set, before);
    }

    #[test]
    fn test_sixth_add_refused() {
        let mut set = full_set();
        let sixth = &six_coins()[5];

        assert_eq!(set.toggle(sixth, true), ToggleOutcome::Full);
        assert_eq!(set.len(), MAX_SELECTED);
        assert!(!set.contains(&sixth.id));

        // An already pinned coin is still idempotent when full
        let first = &six_coins()[0];
        assert_eq!(set.toggle(first, true), ToggleOutcome::AlreadySelected);
    }

    #[test]
    fn test_cap_holds_for_any_sequence() {
        let coins = six_coins();
        let mut set = SelectionSet::new();

        // Deterministic pseudo-random walk over (coin, enable) pairs
        let mut seed: u32 = 0x2545_f491;
        for _ in 0..500 {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            let coin = &coins[(seed as usize) % coins.len()];
            let enable = seed & 0x100 != 0;

            set.toggle(coin, enable);

            assert!(set.len() <= MAX_SELECTED);
            let mut ids: Vec<_> = set.ids().collect();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), set.len(), "ids stay unique");
        }
    }

    #[test]
    fn test_replace_keeps_others_in_order() {
        let mut set = full_set();
        let sixth = six_coins()[5].clone();

        let evicted = set.replace("solana", sixth).expect("solana is pinned");
        assert_eq!(evicted.id, "solana");
        assert_eq!(
            set.ids().collect::<Vec<_>>(),
            vec!["bitcoin", "ethereum", "cardano", "dogecoin", "litecoin"]
        );
    }

    #[test]
    fn test_replace_unknown_is_noop() {
        let mut set = full_set();
        let before = set.clone();
        assert_eq!(
            set.replace("ripple", six_coins()[5].clone()),
            Err(ReplacementError::NotSelected("ripple".to_string()))
        );
        assert_eq!(set, before);
    }

    #[test]
    fn test_replace_with_pinned_candidate_is_rejected() {
        let mut set = full_set();
        let before = set.clone();

        // Candidate pinned in the meantime; evicting would shrink the set
        let err = set.replace("solana", six_coins()[0].clone()).unwrap_err();
        assert_eq!(err, ReplacementError::AlreadySelected("bitcoin".to_string()));
        assert_eq!(set, before);
        assert_eq!(set.len(), MAX_SELECTED);
    }

    #[test]
    fn test_from_coins_repairs() {
        let mut coins = six_coins();
        coins.insert(1, coins[0].clone());
        let set = SelectionSet::from_coins(coins);

        assert_eq!(
            set.ids().collect::<Vec<_>>(),
            vec!["bitcoin", "ethereum", "solana", "cardano", "dogecoin"]
        );
    }

    #[tokio::test]
    async fn test_persisted_round_trip() {
        let store = MemoryStore::default();
        let mut set = SelectionSet::new();
        for c in six_coins().iter().rev().take(3) {
            set.toggle(c, true);
        }
        set.save(&store, SELECTION_KEY).await.unwrap();

        let loaded = SelectionSet::load(&store, SELECTION_KEY).await;
        assert_eq!(loaded.ids().collect::<Vec<_>>(), vec!["litecoin", "dogecoin", "cardano"]);
        assert_eq!(loaded, set);
    }

    #[tokio::test]
    async fn test_load_tolerates_bad_data() {
        let store = MemoryStore::default();
        assert!(SelectionSet::load(&store, SELECTION_KEY).await.is_empty());

        store.insert_raw(SELECTION_KEY, "null");
        assert!(SelectionSet::load(&store, SELECTION_KEY).await.is_empty());

        store.insert_raw(SELECTION_KEY, r#"{"id":"bitcoin"}"#);
        assert!(SelectionSet::load(&store, SELECTION_KEY).await.is_empty());

        store.insert_raw(SELECTION_KEY, "[{");
        assert!(SelectionSet::load(&store, SELECTION_KEY).await.is_empty());
    }
}
