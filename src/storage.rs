//! Key-value storage seam
//!
//! Selections, the pending replacement and cached detail responses all live
//! in one Workers KV namespace, under distinct keys. Values are JSON text.
//! Selection and replacement keys are suffixed with the client id (see
//! `session::ClientId`); cache keys are shared by all clients.

use serde::Serialize;
use serde::de::DeserializeOwned;
use worker::kv::KvStore;

use crate::error::Result;

/// KV binding name in wrangler.toml
pub const KV_BINDING: &str = "STATE";

/// Key prefix for a client's selected coins
pub const SELECTION_KEY: &str = "selectedCoins";

/// Key prefix for a client's open replacement dialog, if any
pub const REPLACEMENT_KEY: &str = "replacement";

/// Prefix for cached detail responses
pub const CACHE_PREFIX: &str = "cache:";

/// Minimal string key-value store
#[allow(async_fn_in_trait)] // Single-threaded worker runtime, futures need not be Send
pub trait KeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn put(&self, key: &str, value: String) -> Result<()>;
    /// Write a value the store drops after `ttl_secs`
    async fn put_expiring(&self, key: &str, value: String, ttl_secs: u64) -> Result<()>;
    async fn delete(&self, key: &str) -> Result<()>;
}

impl<T: KeyValueStore> KeyValueStore for &T {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key).await
    }

    async fn put(&self, key: &str, value: String) -> Result<()> {
        (**self).put(key, value).await
    }

    async fn put_expiring(&self, key: &str, value: String, ttl_secs: u64) -> Result<()> {
        (**self).put_expiring(key, value, ttl_secs).await
    }

    async fn delete(&self, key: &str) -> Result<()> {
        (**self).delete(key).await
    }
}

/// Read and deserialize a JSON value.
///
/// A missing key is `Ok(None)`; a present but undecodable value is an error
/// so callers can decide how lenient to be.
pub async fn get_json<S, T>(store: &S, key: &str) -> Result<Option<T>>
where
    S: KeyValueStore,
    T: DeserializeOwned,
{
    match store.get(key).await? {
        Some(text) => Ok(Some(serde_json::from_str(&text)?)),
        None => Ok(None),
    }
}

/// Serialize and write a JSON value
pub async fn put_json<S, T>(store: &S, key: &str, value: &T) -> Result<()>
where
    S: KeyValueStore,
    T: Serialize + ?Sized,
{
    store.put(key, serde_json::to_string(value)?).await
}

/// Serialize and write a JSON value that expires after `ttl_secs`
pub async fn put_json_expiring<S, T>(store: &S, key: &str, value: &T, ttl_secs: u64) -> Result<()>
where
    S: KeyValueStore,
    T: Serialize + ?Sized,
{
    store
        .put_expiring(key, serde_json::to_string(value)?, ttl_secs)
        .await
}

/// Workers KV namespace
pub struct WorkersKv {
    kv: KvStore,
}

impl WorkersKv {
    pub fn new(kv: KvStore) -> Self {
        Self { kv }
    }

    /// Open the dashboard namespace from the worker environment
    pub fn from_env(env: &worker::Env) -> Result<Self> {
        Ok(Self::new(env.kv(KV_BINDING)?))
    }
}

impl KeyValueStore for WorkersKv {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.kv.get(key).text().await?)
    }

    async fn put(&self, key: &str, value: String) -> Result<()> {
        self.kv.put(key, value)?.execute().await?;
        Ok(())
    }

    async fn put_expiring(&self, key: &str, value: String, ttl_secs: u64) -> Result<()> {
        self.kv
            .put(key, value)?
            .expiration_ttl(ttl_secs)
            .execute()
            .await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.kv.delete(key).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryStore;

    #[tokio::test]
    async fn test_json_helpers() {
        let store = MemoryStore::default();
        assert_eq!(get_json::<_, Vec<String>>(&store, "k").await.unwrap(), None);

        put_json(&store, "k", &vec!["a".to_string(), "b".to_string()]).await.unwrap();
        let value: Vec<String> = get_json(&store, "k").await.unwrap().unwrap();
        assert_eq!(value, vec!["a", "b"]);

        store.put("k", "{broken".to_string()).await.unwrap();
        assert!(get_json::<_, Vec<String>>(&store, "k").await.is_err());

        store.delete("k").await.unwrap();
        assert!(store.get("k").await.unwrap().is_none());

        put_json_expiring(&store, "short", &1, 60).await.unwrap();
        assert_eq!(store.raw("short").as_deref(), Some("1"));
        assert_eq!(store.ttl_of("short"), Some(60));
        assert_eq!(store.ttl_of("k"), None);
    }
}
