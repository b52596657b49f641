use anyhow::{Context, Result};
use async_trait::async_trait;
use mongodb::{Client, bson::Document};
use tokio::sync::OnceCell;
use tracing::debug;

use super::DocumentStore;

/// Database used when neither the caller nor the URI names one
pub const DEFAULT_DATABASE: &str = "test";

/// Seed list connection strings need DNS SRV/TXT lookups to build a client
const SRV_SCHEME: &str = "mongodb+srv://";

/// Document store backed by a `MongoDB` client
#[derive(Debug, Clone)]
pub struct MongoStore {
    uri: String,
    database: Option<String>,
    client: OnceCell<Client>,
}

impl MongoStore {
    /// Create a store from a connection string.
    ///
    /// The database is `database` when given, otherwise the default database
    /// of the URI, otherwise [`DEFAULT_DATABASE`]. The server is not contacted
    /// until a collection is accessed. `mongodb+srv://` strings are resolved
    /// on first access as well, so DNS trouble shows up as a failed check.
    ///
    /// # Errors
    ///
    /// Returns an error if a `mongodb://` connection string cannot be parsed
    pub async fn connect(uri: &str, database: Option<&str>) -> Result<Self> {
        let store = Self {
            uri: uri.to_string(),
            database: database.map(str::to_string),
            client: OnceCell::new(),
        };

        if !uri.starts_with(SRV_SCHEME) {
            store
                .client()
                .await
                .context("invalid MongoDB connection string")?;
        }

        Ok(store)
    }

    /// Database accessed by the store, `None` while a seed list is unresolved
    /// and no database was given explicitly
    #[must_use]
    pub fn database(&self) -> Option<String> {
        self.client
            .get()
            .map(|client| self.database_name(client))
            .or_else(|| self.database.clone())
    }

    async fn client(&self) -> mongodb::error::Result<&Client> {
        self.client
            .get_or_try_init(|| Client::with_uri_str(&self.uri))
            .await
    }

    fn database_name(&self, client: &Client) -> String {
        self.database
            .clone()
            .or_else(|| client.default_database().map(|db| db.name().to_string()))
            .unwrap_or_else(|| DEFAULT_DATABASE.to_string())
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn access_collection(&self, name: &str) -> Result<()> {
        let client = self
            .client()
            .await
            .context("could not resolve MongoDB connection string")?;
        let database = self.database_name(client);

        debug!(database = %database, collection = name, "accessing MongoDB collection");

        // handles are lazy, counting forces a round trip to the server
        client
            .database(&database)
            .collection::<Document>(name)
            .estimated_document_count(None)
            .await
            .with_context(|| format!("could not access collection {database}.{name}"))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;
    use std::time::Duration;
    use tokio::time::timeout;

    #[tokio::test]
    async fn test_connect_uses_uri_database() {
        let store = MongoStore::connect("mongodb://localhost:27017/recipes", None)
            .await
            .unwrap();
        assert_eq!(store.database().as_deref(), Some("recipes"));
    }

    #[tokio::test]
    async fn test_connect_explicit_database_wins() {
        let store = MongoStore::connect("mongodb://localhost:27017/recipes", Some("audit"))
            .await
            .unwrap();
        assert_eq!(store.database().as_deref(), Some("audit"));
    }

    #[tokio::test]
    async fn test_connect_falls_back_to_default_database() {
        let store = MongoStore::connect("mongodb://localhost:27017", None)
            .await
            .unwrap();
        assert_eq!(store.database().as_deref(), Some(DEFAULT_DATABASE));
    }

    #[tokio::test]
    async fn test_connect_invalid_uri() {
        let result = MongoStore::connect("not-a-mongodb-uri", None).await;
        let message = format!("{:#}", result.unwrap_err());
        assert!(message.starts_with("invalid MongoDB connection string"));
    }

    #[tokio::test]
    async fn test_connect_defers_seed_list_resolution() {
        let uri = "mongodb+srv://cluster0.recipes.invalid/recipes";
        let store = MongoStore::connect(uri, None).await.unwrap();
        assert_eq!(store.database(), None);

        let explicit = MongoStore::connect(uri, Some("audit")).await.unwrap();
        assert_eq!(explicit.database().as_deref(), Some("audit"));

        let err = timeout(Duration::from_secs(60), store.access_collection("test"))
            .await
            .unwrap()
            .unwrap_err();
        let message = format!("{err:#}");
        assert!(
            message.starts_with("could not resolve MongoDB connection string"),
            "{message}"
        );
    }
}
