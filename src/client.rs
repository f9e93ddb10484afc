//! HTTP client for the catalog document and the coin detail API
//!
//! The detail API is CoinGecko's `/coins/{id}` (public, no auth). Only the
//! three current prices shown on a card are extracted from its response:
//! `market_data.current_price.{usd,eur,ils}`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DashboardError, Result};

/// Source of JSON documents, keyed by URL
#[allow(async_fn_in_trait)] // Single-threaded worker runtime, futures need not be Send
pub trait JsonFetcher {
    /// GET `url` and parse the body as JSON.
    ///
    /// Transport failures map to `Http`, non-success statuses to
    /// `HttpStatus`, unparseable bodies to `Json`.
    async fn fetch_json(&self, url: &str) -> Result<Value>;
}

impl<T: JsonFetcher> JsonFetcher for &T {
    async fn fetch_json(&self, url: &str) -> Result<Value> {
        (**self).fetch_json(url).await
    }
}

/// reqwest-backed fetcher
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Turn a response into JSON, checking the status first
    async fn handle_response(url: &str, response: reqwest::Response) -> Result<Value> {
        let status = response.status();

        if !status.is_success() {
            return Err(DashboardError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(DashboardError::from)
    }
}

impl JsonFetcher for HttpFetcher {
    async fn fetch_json(&self, url: &str) -> Result<Value> {
        log::debug!("GET {url}");

        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await?;

        Self::handle_response(url, response).await
    }
}

/// Prices displayed in a card's detail panel
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CoinPrices {
    pub usd: Option<f64>,
    pub eur: Option<f64>,
    pub ils: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct CoinDetailResponse {
    #[serde(default)]
    market_data: Option<MarketData>,
}

#[derive(Debug, Default, Deserialize)]
struct MarketData {
    #[serde(default)]
    current_price: CoinPrices,
}

impl CoinPrices {
    /// Extract prices from a coin detail payload.
    ///
    /// Missing `market_data` or missing currencies are left as `None` rather
    /// than failing the whole panel.
    pub fn from_detail(payload: &Value) -> Result<Self> {
        let detail = CoinDetailResponse::deserialize(payload)?;
        Ok(detail
            .market_data
            .map(|m| m.current_price)
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_prices_from_detail() {
        let payload = json!({
            "id": "bitcoin",
            "market_data": {
                "current_price": { "usd": 67000.5, "eur": 61000.0, "ils": 250000, "gbp": 52000.0 }
            }
        });

        let prices = CoinPrices::from_detail(&payload).expect("valid detail payload");
        assert_eq!(prices.usd, Some(67000.5));
        assert_eq!(prices.eur, Some(61000.0));
        assert_eq!(prices.ils, Some(250_000.0));
    }

    #[test]
    fn test_missing_market_data_is_empty() {
        let prices = CoinPrices::from_detail(&json!({ "id": "bitcoin" })).unwrap();
        assert_eq!(prices, CoinPrices::default());

        let prices =
            CoinPrices::from_detail(&json!({ "market_data": { "current_price": { "usd": 1.0 } } }))
                .unwrap();
        assert_eq!(prices.usd, Some(1.0));
        assert!(prices.ils.is_none());
    }

    #[test]
    fn test_non_numeric_price_is_error() {
        let payload = json!({ "market_data": { "current_price": { "usd": "a lot" } } });
        assert!(matches!(
            CoinPrices::from_detail(&payload),
            Err(DashboardError::Json(_))
        ));
    }
}
