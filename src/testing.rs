//! Test doubles shared by the unit tests

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use serde_json::Value;

use crate::cache::Clock;
use crate::catalog::Coin;
use crate::client::JsonFetcher;
use crate::error::{DashboardError, Result};
use crate::storage::KeyValueStore;

pub fn coin(id: &str, symbol: &str, name: &str) -> Coin {
    Coin {
        id: id.to_string(),
        symbol: symbol.to_string(),
        name: name.to_string(),
        image: format!("https://img.example/{id}.png"),
    }
}

/// Six distinct coins, enough to overflow a full selection
pub fn six_coins() -> Vec<Coin> {
    vec![
        coin("bitcoin", "btc", "Bitcoin"),
        coin("ethereum", "eth", "Ethereum"),
        coin("solana", "sol", "Solana"),
        coin("cardano", "ada", "Cardano"),
        coin("dogecoin", "doge", "Dogecoin"),
        coin("litecoin", "ltc", "Litecoin"),
    ]
}

/// In-memory store; clones share the same map.
///
/// Expiring puts never expire here, the requested TTL is only recorded.
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
    ttls: Rc<RefCell<HashMap<String, u64>>>,
}

impl MemoryStore {
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    pub fn insert_raw(&self, key: &str, value: &str) {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// TTL requested by the last write to `key`, if it was an expiring put
    pub fn ttl_of(&self, key: &str) -> Option<u64> {
        self.ttls.borrow().get(key).copied()
    }
}

impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.raw(key))
    }

    async fn put(&self, key: &str, value: String) -> Result<()> {
        self.ttls.borrow_mut().remove(key);
        self.entries.borrow_mut().insert(key.to_string(), value);
        Ok(())
    }

    async fn put_expiring(&self, key: &str, value: String, ttl_secs: u64) -> Result<()> {
        self.ttls.borrow_mut().insert(key.to_string(), ttl_secs);
        self.entries.borrow_mut().insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.ttls.borrow_mut().remove(key);
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Scripted fetcher that counts calls per URL
#[derive(Clone, Default)]
pub struct FakeFetcher {
    responses: Rc<RefCell<HashMap<String, std::result::Result<Value, u16>>>>,
    calls: Rc<RefCell<Vec<String>>>,
}

impl FakeFetcher {
    /// Answer `url` with `body`
    pub fn respond(&self, url: &str, body: Value) {
        self.responses.borrow_mut().insert(url.to_string(), Ok(body));
    }

    /// Answer `url` with an HTTP error status
    pub fn fail(&self, url: &str, status: u16) {
        self.responses.borrow_mut().insert(url.to_string(), Err(status));
    }

    pub fn calls_to(&self, url: &str) -> usize {
        self.calls.borrow().iter().filter(|u| *u == url).count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl JsonFetcher for FakeFetcher {
    async fn fetch_json(&self, url: &str) -> Result<Value> {
        self.calls.borrow_mut().push(url.to_string());
        match self.responses.borrow().get(url) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(status)) => Err(DashboardError::HttpStatus {
                status: *status,
                url: url.to_string(),
            }),
            None => Err(DashboardError::Http(format!("connection refused: {url}"))),
        }
    }
}

/// Clock advanced by hand
#[derive(Clone)]
pub struct ManualClock {
    now: Rc<Cell<i64>>,
}

impl ManualClock {
    pub fn at(millis: i64) -> Self {
        Self { now: Rc::new(Cell::new(millis)) }
    }

    pub fn advance(&self, millis: i64) {
        self.now.set(self.now.get() + millis);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.now.get()
    }
}
