//! Request and response bodies of the dashboard API
//!
//! All shared data structures exchanged with the dashboard script.

use serde::{Deserialize, Serialize};

use crate::cache::CacheStatus;
use crate::catalog::Coin;
use crate::client::CoinPrices;
use crate::notify::Notification;
use crate::selection::ToggleOutcome;

/// Body of `POST /api/selection/toggle`
#[derive(Debug, Clone, Deserialize)]
pub struct ToggleRequest {
    pub coin_id: String,
    pub enabled: bool,
}

/// Body of `POST /api/replacement/confirm`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfirmRequest {
    /// Ids switched off in the dialog
    #[serde(default)]
    pub evict: Vec<String>,
    /// Current search query, so the re-rendered grid matches the page
    #[serde(default)]
    pub q: String,
}

/// Rendered catalog grid
#[derive(Debug, Clone, Serialize)]
pub struct GridResponse {
    pub html: String,
    /// Number of coins rendered
    pub count: usize,
    pub no_matches: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<Notification>,
}

/// Rendered panel
#[derive(Debug, Clone, Serialize)]
pub struct ViewResponse {
    pub panel: String,
    /// Display name, used for the page title
    pub title: String,
    pub header_html: String,
    /// Only the currencies panel has a grid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<GridResponse>,
}

/// Result of a selection toggle
#[derive(Debug, Clone, Serialize)]
pub struct ToggleResponse {
    pub coin_id: String,
    pub outcome: ToggleOutcome,
    /// State the switch must show after the request
    pub checked: bool,
    /// Pinned ids, in order
    pub selection: Vec<String>,
    /// Dialog body when the replacement dialog is (or stays) open
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replacement_html: Option<String>,
}

/// Result of a replacement confirmation
#[derive(Debug, Clone, Serialize)]
pub struct ConfirmResponse {
    pub confirmed: bool,
    pub selection: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evicted: Option<String>,
    /// Re-rendered grid after a successful swap
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<GridResponse>,
    /// Validation message when the dialog stays open
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<Notification>,
}

/// Prices for one coin's detail panel
#[derive(Debug, Clone, Serialize)]
pub struct DetailResponse {
    pub coin_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prices: Option<CoinPrices>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache: Option<CacheStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<Notification>,
}

/// Current selection and dialog state
#[derive(Debug, Clone, Serialize)]
pub struct SelectionResponse {
    pub coins: Vec<Coin>,
    pub max: usize,
    /// Candidate of an open replacement dialog
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending_replacement: Option<String>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub environment: String,
    pub timestamp: String,
    pub catalog: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirm_request_defaults() {
        let req: ConfirmRequest = serde_json::from_str("{}").unwrap();
        assert!(req.evict.is_empty());
        assert!(req.q.is_empty());
    }

    #[test]
    fn test_toggle_response_serialization() {
        let resp = ToggleResponse {
            coin_id: "litecoin".to_string(),
            outcome: ToggleOutcome::Full,
            checked: false,
            selection: vec!["bitcoin".to_string()],
            replacement_html: None,
        };

        let json = serde_json::to_value(&resp).expect("serializes");
        assert_eq!(json["outcome"], "full");
        assert_eq!(json["checked"], false);
        assert!(json.get("replacement_html").is_none());
    }
}
