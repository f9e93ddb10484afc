//! Dashboard controller - one method per UI command
//!
//! Owns the catalog, the selection, the replacement dialog and access to the
//! detail cache. A controller is built per request from the KV namespace for
//! one client; every mutating command persists before it returns.

use crate::cache::{CacheLayer, Clock};
use crate::catalog::{Catalog, CatalogSource, SearchResult};
use crate::client::{CoinPrices, JsonFetcher};
use crate::config::Config;
use crate::error::{DashboardError, Result};
use crate::notify::Notification;
use crate::render;
use crate::replacement::{OpenOutcome, ReplacementWorkflow};
use crate::selection::{MAX_SELECTED, SelectionSet, ToggleOutcome};
use crate::session::ClientId;
use crate::storage::KeyValueStore;
use crate::types::{
    ConfirmResponse, DetailResponse, GridResponse, SelectionResponse, ToggleResponse, ViewResponse,
};
use crate::views::ViewPanel;

/// Application state and command handlers
pub struct Dashboard<S, F, C> {
    config: Config,
    client: ClientId,
    store: S,
    fetcher: F,
    clock: C,
    catalog: Catalog,
    selection: SelectionSet,
    workflow: ReplacementWorkflow,
    /// Set when the catalog failed to load; shown with the next grid
    load_notice: Option<Notification>,
}

impl<S, F, C> Dashboard<S, F, C>
where
    S: KeyValueStore,
    F: JsonFetcher,
    C: Clock,
{
    /// Load catalog, selection and any open dialog.
    ///
    /// A catalog failure leaves the catalog empty and queues a notification;
    /// unreadable persisted state starts empty.
    pub async fn open(config: Config, client: ClientId, store: S, fetcher: F, clock: C) -> Self {
        let source = CatalogSource::from_url(config.catalog_url.as_deref());
        let (selection_key, replacement_key) = (client.selection_key(), client.replacement_key());

        let (catalog, selection, workflow) = futures::join!(
            Catalog::load(&source, &fetcher),
            SelectionSet::load(&store, &selection_key),
            ReplacementWorkflow::load(&store, &replacement_key),
        );

        let (catalog, load_notice) = match catalog {
            Ok(catalog) => (catalog, None),
            Err(e) => (Catalog::default(), Some(Notification::catalog_unavailable(&e))),
        };

        Self {
            config,
            client,
            store,
            fetcher,
            clock,
            catalog,
            selection,
            workflow,
            load_notice,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn workflow(&self) -> &ReplacementWorkflow {
        &self.workflow
    }

    async fn save_selection(&self) -> Result<()> {
        self.selection.save(&self.store, &self.client.selection_key()).await
    }

    async fn save_workflow(&self) -> Result<()> {
        self.workflow.save(&self.store, &self.client.replacement_key()).await
    }

    fn selected_ids(&self) -> Vec<String> {
        self.selection.ids().map(String::from).collect()
    }

    fn cache(&self) -> CacheLayer<&S, &F, &C> {
        CacheLayer::new(&self.store, &self.fetcher, &self.clock)
    }

    /// Grid for a search query; never touches the selection
    pub fn search(&self, query: &str) -> GridResponse {
        let result = self.catalog.search(query);
        let count = match &result {
            SearchResult::Matches(coins) => coins.len(),
            SearchResult::NoMatches => 0,
        };

        GridResponse {
            html: render::render_search(&result, &self.selection),
            count,
            no_matches: result == SearchResult::NoMatches,
            notification: self.load_notice.clone(),
        }
    }

    /// Switch panels; only the currencies panel renders the grid
    pub fn view(&self, panel: ViewPanel, query: &str) -> ViewResponse {
        ViewResponse {
            panel: panel.to_string(),
            title: panel.title().to_string(),
            header_html: panel.header_html().to_string(),
            grid: (panel == ViewPanel::Currencies).then(|| self.search(query)),
        }
    }

    /// Current selection and dialog state
    pub fn selection_state(&self) -> SelectionResponse {
        SelectionResponse {
            coins: self.selection.coins().to_vec(),
            max: MAX_SELECTED,
            pending_replacement: self.workflow.pending().map(|p| p.candidate.id.clone()),
        }
    }

    /// Handle a selection switch.
    ///
    /// When the set is full the add is refused, the switch is reported as
    /// unchecked and the replacement dialog opens for the requested coin.
    pub async fn toggle(&mut self, coin_id: &str, enabled: bool) -> Result<ToggleResponse> {
        let coin = self
            .catalog
            .find(coin_id)
            .cloned()
            .ok_or_else(|| DashboardError::UnknownCoin(coin_id.to_string()))?;

        let outcome = self.selection.toggle(&coin, enabled);
        let mut replacement_html = None;

        if outcome.is_mutation() {
            self.save_selection().await?;
            log::info!(
                "Client {}: selection {outcome:?} {coin_id} ({}/{MAX_SELECTED})",
                self.client,
                self.selection.len()
            );
        } else if outcome == ToggleOutcome::Full {
            if self.workflow.open(&coin, &self.selection) == OpenOutcome::Opened {
                self.save_workflow().await?;
                log::info!("Selection full, replacement opened for {coin_id}");
            }
            replacement_html = self.workflow.pending().map(render::render_replacement);
        }

        Ok(ToggleResponse {
            coin_id: coin.id,
            outcome,
            checked: self.selection.contains(coin_id),
            selection: self.selected_ids(),
            replacement_html,
        })
    }

    /// Confirm the replacement dialog with the ids switched off in it.
    ///
    /// Validation failures keep the dialog open and come back as a
    /// notification; the selection is untouched.
    pub async fn confirm_replacement(&mut self, evict: &[String], query: &str) -> Result<ConfirmResponse> {
        let attempt = self
            .workflow
            .set_evicted(evict)
            .and_then(|()| self.workflow.confirm(&mut self.selection));

        match attempt {
            Ok(evicted) => {
                self.save_selection().await?;
                self.save_workflow().await?;
                log::info!("Replaced {} in selection", evicted.id);

                Ok(ConfirmResponse {
                    confirmed: true,
                    selection: self.selected_ids(),
                    evicted: Some(evicted.id),
                    grid: Some(self.search(query)),
                    notification: None,
                })
            }
            Err(DashboardError::Validation(reason)) => {
                log::debug!("Replacement rejected: {reason}");
                Ok(ConfirmResponse {
                    confirmed: false,
                    selection: self.selected_ids(),
                    evicted: None,
                    grid: None,
                    notification: Some(Notification::warning(reason.to_string())),
                })
            }
            Err(e) => Err(e),
        }
    }

    /// Close the dialog without changes
    pub async fn cancel_replacement(&mut self) -> Result<()> {
        if let Some(candidate) = self.workflow.cancel() {
            self.save_workflow().await?;
            log::info!("Replacement for {} cancelled", candidate.id);
        }
        Ok(())
    }

    /// Prices for a coin's detail panel, through the two-minute cache.
    ///
    /// A failed fetch is reported as a notification with no prices, so the
    /// panel stays collapsed.
    pub async fn coin_detail(&self, coin_id: &str) -> Result<DetailResponse> {
        let coin = self
            .catalog
            .find(coin_id)
            .ok_or_else(|| DashboardError::UnknownCoin(coin_id.to_string()))?;
        let url = self.config.detail_url(&coin.id);

        let fetched = self
            .cache()
            .fetch_with_status(&url)
            .await
            .and_then(|(payload, status)| Ok((CoinPrices::from_detail(&payload)?, status)));

        Ok(match fetched {
            Ok((prices, status)) => DetailResponse {
                coin_id: coin.id.clone(),
                prices: Some(prices),
                cache: Some(status),
                notification: None,
            },
            Err(e) => DetailResponse {
                coin_id: coin.id.clone(),
                prices: None,
                cache: None,
                notification: Some(Notification::detail_unavailable(coin_id, &e)),
            },
        })
    }

    /// Re-persist the selection (session-end safety net)
    pub async fn flush(&self) -> Result<()> {
        self.save_selection().await
    }
}
