//! Per-browser client identity
//!
//! Each browser gets a random id in a cookie on its first page load. The
//! selection and the open replacement dialog are stored under keys scoped to
//! that id, so visitors never see each other's state.

use std::fmt;

use uuid::Uuid;

use crate::error::{DashboardError, Result};
use crate::storage::{REPLACEMENT_KEY, SELECTION_KEY};

/// Cookie carrying the client id
pub const CLIENT_COOKIE: &str = "coin_client";

/// One year; the selection outlives browser sessions
const COOKIE_MAX_AGE_SECS: u64 = 365 * 24 * 60 * 60;

/// Identity of one browser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClientId(Uuid);

impl ClientId {
    /// Fresh random id for a new browser
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Find the client id in a `Cookie` request header.
    ///
    /// Values that are not a uuid are ignored, so a tampered cookie is
    /// treated like a missing one.
    pub fn from_cookie_header(header: &str) -> Option<Self> {
        header
            .split(';')
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == CLIENT_COOKIE)
            .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
            .map(Self)
    }

    /// Like [`from_cookie_header`](Self::from_cookie_header), but a missing
    /// header or cookie is an error
    pub fn require(header: Option<&str>) -> Result<Self> {
        header
            .and_then(Self::from_cookie_header)
            .ok_or(DashboardError::MissingClient)
    }

    /// `Set-Cookie` value issuing this id
    pub fn set_cookie_header(&self) -> String {
        format!(
            "{CLIENT_COOKIE}={}; Path=/; Max-Age={COOKIE_MAX_AGE_SECS}; HttpOnly; SameSite=Lax",
            self.0
        )
    }

    /// KV key of this client's selection
    pub fn selection_key(&self) -> String {
        format!("{SELECTION_KEY}:{}", self.0)
    }

    /// KV key of this client's replacement dialog
    pub fn replacement_key(&self) -> String {
        format!("{REPLACEMENT_KEY}:{}", self.0)
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
