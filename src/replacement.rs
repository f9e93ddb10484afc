//! Replacement dialog for a full selection
//!
//! Opened when a sixth coin is requested. The user marks exactly one of the
//! pinned coins for eviction; confirming swaps it for the pending candidate.
//! The open dialog is persisted under the client's replacement key between
//! requests.

use serde::{Deserialize, Serialize};

use crate::catalog::Coin;
use crate::error::{DashboardError, ReplacementError, Result};
use crate::selection::SelectionSet;
use crate::storage::{self, KeyValueStore};

/// What happens to a pinned coin on confirm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mark {
    #[default]
    Keep,
    Evict,
}

/// One row of the dialog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub coin: Coin,
    pub mark: Mark,
}

/// State of an open dialog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingReplacement {
    /// Coin the user tried to add
    pub candidate: Coin,
    /// Pinned coins at the time the dialog opened
    pub choices: Vec<Choice>,
}

impl PendingReplacement {
    /// Ids currently marked for eviction
    pub fn evicted(&self) -> Vec<&str> {
        self.choices
            .iter()
            .filter(|c| c.mark == Mark::Evict)
            .map(|c| c.coin.id.as_str())
            .collect()
    }
}

/// Result of an open request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    Opened,
    /// A dialog was already open; the new request was ignored
    AlreadyOpen,
}

/// Closed/open dialog state machine
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplacementWorkflow {
    pending: Option<PendingReplacement>,
}

impl ReplacementWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<&PendingReplacement> {
        self.pending.as_ref()
    }

    /// Open the dialog for `candidate`, listing every pinned coin as `Keep`.
    ///
    /// Re-opening while open keeps the in-progress dialog.
    pub fn open(&mut self, candidate: &Coin, selection: &SelectionSet) -> OpenOutcome {
        if let Some(pending) = &self.pending {
            log::info!(
                "Replacement for {} already pending, ignoring request for {}",
                pending.candidate.id,
                candidate.id
            );
            return OpenOutcome::AlreadyOpen;
        }

        self.pending = Some(PendingReplacement {
            candidate: candidate.clone(),
            choices: selection
                .coins()
                .iter()
                .map(|coin| Choice {
                    coin: coin.clone(),
                    mark: Mark::Keep,
                })
                .collect(),
        });
        OpenOutcome::Opened
    }

    /// Set the mark of one listed coin
    pub fn mark(&mut self, coin_id: &str, mark: Mark) -> Result<()> {
        let pending = self
            .pending
            .as_mut()
            .ok_or(DashboardError::NoPendingReplacement)?;

        let choice = pending
            .choices
            .iter_mut()
            .find(|c| c.coin.id == coin_id)
            .ok_or_else(|| ReplacementError::NotSelected(coin_id.to_string()))?;
        choice.mark = mark;
        Ok(())
    }

    /// Mark exactly the given ids for eviction and everything else to keep
    pub fn set_evicted(&mut self, evicted: &[String]) -> Result<()> {
        let pending = self
            .pending
            .as_ref()
            .ok_or(DashboardError::NoPendingReplacement)?;

        if let Some(unknown) = evicted
            .iter()
            .find(|id| !pending.choices.iter().any(|c| &c.coin.id == *id))
        {
            return Err(ReplacementError::NotSelected(unknown.clone()).into());
        }

        let listed: Vec<String> = pending.choices.iter().map(|c| c.coin.id.clone()).collect();
        for id in listed {
            let mark = if evicted.contains(&id) { Mark::Evict } else { Mark::Keep };
            self.mark(&id, mark)?;
        }
        Ok(())
    }

    /// Apply the dialog to `selection`.
    ///
    /// Requires exactly one evicted coin. On any validation error nothing
    /// changes and the dialog stays open. On success the dialog closes and the
    /// evicted coin is returned.
    pub fn confirm(&mut self, selection: &mut SelectionSet) -> Result<Coin> {
        let pending = self
            .pending
            .as_ref()
            .ok_or(DashboardError::NoPendingReplacement)?;

        let evicted = match pending.evicted().as_slice() {
            [] => return Err(ReplacementError::NothingEvicted.into()),
            [only] => (*only).to_string(),
            many => return Err(ReplacementError::TooManyEvicted(many.len()).into()),
        };

        let removed = selection.replace(&evicted, pending.candidate.clone())?;

        self.pending = None;
        Ok(removed)
    }

    /// Close without changes, returning the discarded candidate
    pub fn cancel(&mut self) -> Option<Coin> {
        self.pending.take().map(|p| p.candidate)
    }

    /// Restore an open dialog from storage; unreadable data means closed
    pub async fn load<S: KeyValueStore>(store: &S, key: &str) -> Self {
        match storage::get_json::<_, PendingReplacement>(store, key).await {
            Ok(pending) => Self { pending },
            Err(e) => {
                log::warn!("Discarding unreadable replacement state: {e}");
                Self::new()
            }
        }
    }

    /// Persist the dialog, deleting the key when closed
    pub async fn save<S: KeyValueStore>(&self, store: &S, key: &str) -> Result<()> {
        match &self.pending {
            Some(pending) => storage::put_json(store, key, pending).await,
            None => store.delete(key).await,
        }
    }
}
