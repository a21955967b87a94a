//! `Dragonfly` (Redis-compatible) connection and typed primitives.
//!
//! [`DragonflyPool`] knows nothing about leagues. It stores JSON values and
//! JSON lists; [`crate::store`] maps the league onto them.

use fred::prelude::*;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::DbError;

/// Connection handle to a `Dragonfly` (Redis-compatible) instance.
#[derive(Clone)]
pub struct DragonflyPool {
    client: Client,
}

impl DragonflyPool {
    /// Connect to `Dragonfly` at the given URL.
    ///
    /// The URL follows the Redis URL scheme: `redis://host:port` or
    /// `redis://host:port/db`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Config`] if the URL cannot be parsed.
    /// Returns [`DbError::Dragonfly`] if the connection fails.
    pub async fn connect(url: &str) -> Result<Self, DbError> {
        let config = Config::from_url(url)
            .map_err(|e| DbError::Config(format!("Invalid Dragonfly URL: {e}")))?;

        let client = Builder::from_config(config).build()?;
        client.init().await?;

        tracing::info!("Connected to Dragonfly");
        Ok(Self { client })
    }

    /// Serialize `value` as JSON and store it at `key`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Serialization`] if serialization fails.
    /// Returns [`DbError::Dragonfly`] if the write fails.
    pub async fn set_json<T: Serialize + Sync>(&self, key: &str, value: &T) -> Result<(), DbError> {
        let json = serde_json::to_string(value)?;
        let _: () = self.client.set(key, json.as_str(), None, None, false).await?;
        Ok(())
    }

    /// Read the value at `key` and deserialize it from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::KeyNotFound`] if the key does not exist.
    /// Returns [`DbError::Decode`] if deserialization fails.
    /// Returns [`DbError::Dragonfly`] if the read fails.
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<T, DbError> {
        let value: Option<String> = self.client.get(key).await?;
        let raw = value.ok_or_else(|| DbError::KeyNotFound(key.to_owned()))?;
        decode(key, &raw)
    }

    /// Delete `key`. Deleting a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Dragonfly`] if the delete fails.
    pub async fn delete(&self, key: &str) -> Result<(), DbError> {
        let _: u32 = self.client.del(key).await?;
        Ok(())
    }

    /// Append a raw string to the list at `key`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Dragonfly`] if the write fails.
    pub async fn push_str(&self, key: &str, value: &str) -> Result<(), DbError> {
        let _: u64 = self.client.rpush(key, value).await?;
        Ok(())
    }

    /// Append a JSON value to the list at `key`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Serialization`] if serialization fails.
    /// Returns [`DbError::Dragonfly`] if the write fails.
    pub async fn push_json<T: Serialize + Sync>(&self, key: &str, value: &T) -> Result<(), DbError> {
        let json = serde_json::to_string(value)?;
        self.push_str(key, &json).await
    }

    /// Every raw string in the list at `key`, in list order.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Dragonfly`] if the read fails.
    pub async fn list_strs(&self, key: &str) -> Result<Vec<String>, DbError> {
        let values: Vec<String> = self.client.lrange(key, 0, -1).await?;
        Ok(values)
    }

    /// Every JSON value in the list at `key`, in list order.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Decode`] if an element cannot be decoded.
    /// Returns [`DbError::Dragonfly`] if the read fails.
    pub async fn list_json<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, DbError> {
        self.list_strs(key)
            .await?
            .iter()
            .map(|raw| decode(key, raw))
            .collect()
    }

    /// Replace the element at `index` of the list at `key` with a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Serialization`] if serialization fails.
    /// Returns [`DbError::Dragonfly`] if the index is out of range or the
    /// write fails.
    pub async fn set_list_json<T: Serialize + Sync>(
        &self,
        key: &str,
        index: i64,
        value: &T,
    ) -> Result<(), DbError> {
        let json = serde_json::to_string(value)?;
        let _: () = self.client.lset(key, index, json.as_str()).await?;
        Ok(())
    }
}

fn decode<T: DeserializeOwned>(key: &str, raw: &str) -> Result<T, DbError> {
    serde_json::from_str(raw).map_err(|source| DbError::Decode {
        key: key.to_owned(),
        source,
    })
}
