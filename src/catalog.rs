//! Coin catalog and search filter
//!
//! The catalog is a JSON array of coin records, loaded once per controller
//! and never mutated afterwards. By default it is the bundled
//! `assets/markets.json`; `CATALOG_URL` points it at a remote document.

use serde::{Deserialize, Serialize};

use crate::client::JsonFetcher;
use crate::error::Result;

/// Catalog shipped with the worker
const BUNDLED_CATALOG: &str = include_str!("../assets/markets.json");

/// A catalog entry for one cryptocurrency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub image: String,
}

/// Where the catalog document comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    Bundled,
    Remote(String),
}

impl CatalogSource {
    pub fn from_url(url: Option<&str>) -> Self {
        url.map_or(CatalogSource::Bundled, |u| CatalogSource::Remote(u.to_string()))
    }
}

/// Immutable list of coins for a session
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    coins: Vec<Coin>,
}

/// Outcome of running the search filter
#[derive(Debug, PartialEq, Eq)]
pub enum SearchResult<'a> {
    /// At least one coin matched, in catalog order
    Matches(Vec<&'a Coin>),
    /// Nothing matched; displayed as its own state, not as an empty grid
    NoMatches,
}

impl Catalog {
    pub fn new(coins: Vec<Coin>) -> Self {
        Self { coins }
    }

    /// Parse a catalog document (a JSON array of coin records)
    pub fn from_json(document: &str) -> Result<Self> {
        let coins: Vec<Coin> = serde_json::from_str(document)?;
        Ok(Self::new(coins))
    }

    /// Load the catalog from its source
    pub async fn load<F: JsonFetcher>(source: &CatalogSource, fetcher: &F) -> Result<Self> {
        match source {
            CatalogSource::Bundled => Self::from_json(BUNDLED_CATALOG),
            CatalogSource::Remote(url) => {
                let value = fetcher.fetch_json(url).await?;
                let coins: Vec<Coin> = serde_json::from_value(value)?;
                log::debug!("Loaded {} coins from {url}", coins.len());
                Ok(Self::new(coins))
            }
        }
    }

    pub fn coins(&self) -> &[Coin] {
        &self.coins
    }

    pub fn len(&self) -> usize {
        self.coins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coins.is_empty()
    }

    /// Find a coin by id
    pub fn find(&self, coin_id: &str) -> Option<&Coin> {
        self.coins.iter().find(|c| c.id == coin_id)
    }

    /// Run the search filter over this catalog
    pub fn search(&self, query: &str) -> SearchResult<'_> {
        let matches = filter_coins(&self.coins, query);
        if matches.is_empty() {
            SearchResult::NoMatches
        } else {
            SearchResult::Matches(matches)
        }
    }
}

/// Coins whose name or symbol contains `query`, case-insensitively.
///
/// Catalog order is preserved. A blank query matches everything.
pub fn filter_coins<'a>(coins: &'a [Coin], query: &str) -> Vec<&'a Coin> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return coins.iter().collect();
    }

    coins
        .iter()
        .filter(|coin| {
            coin.name.to_lowercase().contains(&needle)
                || coin.symbol.to_lowercase().contains(&needle)
        })
        .collect()
}
