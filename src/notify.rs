//! User notifications
//!
//! Every load, fetch and validation error ends up as one of these. The
//! browser shows it as a toast and hides it after `dismiss_after_ms`.

use serde::Serialize;
use uuid::Uuid;

use crate::error::DashboardError;

/// Auto-dismiss delay for every notification
pub const DISMISS_AFTER_MS: u64 = 5_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Error,
    Warning,
    Info,
}

/// A dismissible message for the user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub id: Uuid,
    pub level: Level,
    pub message: String,
    pub dismiss_after_ms: u64,
}

impl Notification {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            level,
            message: message.into(),
            dismiss_after_ms: DISMISS_AFTER_MS,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Level::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Level::Warning, message)
    }

    /// Catalog could not be loaded; the dashboard continues with no coins
    pub fn catalog_unavailable(err: &DashboardError) -> Self {
        log::error!("Catalog load failed: {err}");
        Self::error("Could not load the coin list. Please reload the page.")
    }

    /// Coin detail could not be fetched; the panel stays collapsed
    pub fn detail_unavailable(coin_id: &str, err: &DashboardError) -> Self {
        log::warn!("Detail fetch for {coin_id} failed: {err}");
        match err {
            DashboardError::HttpStatus { status: 429, .. } => {
                Self::error("Price service is busy. Try again in a minute.")
            }
            _ => Self::error("Unable to fetch price data."),
        }
    }

    /// Map any controller error to a notification
    pub fn from_error(err: &DashboardError) -> Self {
        if err.is_user_error() {
            Self::warning(err.to_string())
        } else {
            log::error!("{err}");
            Self::error("Something went wrong. Please try again.")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReplacementError;

    #[test]
    fn test_dismiss_delay() {
        let n = Notification::error("boom");
        assert_eq!(n.dismiss_after_ms, 5_000);
        assert_eq!(n.level, Level::Error);
    }

    #[test]
    fn test_validation_message_is_shown_verbatim() {
        let err = DashboardError::from(ReplacementError::NothingEvicted);
        let n = Notification::from_error(&err);
        assert_eq!(n.level, Level::Warning);
        assert_eq!(n.message, "Please select at least one coin to replace.");
    }

    #[test]
    fn test_internal_errors_are_generic() {
        let n = Notification::from_error(&DashboardError::Storage("kv down".into()));
        assert_eq!(n.level, Level::Error);
        assert!(!n.message.contains("kv down"));
    }

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(Notification::error("a").id, Notification::error("a").id);
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(Notification::warning("careful")).unwrap();
        assert_eq!(json["level"], "warning");
        assert_eq!(json["dismiss_after_ms"], 5000);
        assert!(json["id"].is_string());
    }
}
