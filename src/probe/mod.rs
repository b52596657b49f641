//! Database connectivity probe.
//!
//! Each backend is checked independently and its outcome is folded into a
//! [`ConnectivityReport`]. Errors never escape a check: they become a
//! `Connection failed: <cause>` string in the report.

pub mod mongo;
pub mod mysql;

use crate::metrics;
use anyhow::Result;
use async_trait::async_trait;
use futures::FutureExt;
use serde::{Serialize, Serializer};
use std::{any::Any, fmt, future::Future, panic::AssertUnwindSafe, time::Instant};
use tracing::{info, warn};

/// Collection accessed on the document store when none is configured
pub const DEFAULT_COLLECTION: &str = "test";

/// Outcome of a single backend check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendStatus {
    Successful,
    Failed(String),
}

impl BackendStatus {
    #[must_use]
    pub const fn is_successful(&self) -> bool {
        matches!(self, Self::Successful)
    }
}

impl fmt::Display for BackendStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Successful => f.write_str("Connection successful"),
            Self::Failed(cause) => write!(f, "Connection failed: {cause}"),
        }
    }
}

impl Serialize for BackendStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Per-backend connectivity outcome, serialized as `{"mysql": .., "mongodb": ..}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectivityReport {
    pub mysql: BackendStatus,
    pub mongodb: BackendStatus,
}

/// A source of relational connections
#[async_trait]
pub trait RelationalSource: Send + Sync {
    type Connection: Send;

    /// Open a connection
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established
    async fn acquire(&self) -> Result<Self::Connection>;

    /// Close a connection previously returned by [`RelationalSource::acquire`]
    ///
    /// # Errors
    ///
    /// Returns an error if the connection does not shut down cleanly
    async fn release(&self, conn: Self::Connection) -> Result<()>;
}

/// A document store client able to reach a named collection
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the collection cannot be reached
    async fn access_collection(&self, name: &str) -> Result<()>;
}

/// Anything that can produce a [`ConnectivityReport`] on demand
#[async_trait]
pub trait ConnectivityCheck: Send + Sync {
    async fn check(&self) -> ConnectivityReport;
}

/// Probe wiring one relational source and one document store together
pub struct DatabaseProbe<R, D> {
    relational: R,
    documents: D,
    collection: String,
}

impl<R, D> DatabaseProbe<R, D>
where
    R: RelationalSource,
    D: DocumentStore,
{
    #[must_use]
    pub fn new(relational: R, documents: D) -> Self {
        Self {
            relational,
            documents,
            collection: DEFAULT_COLLECTION.to_string(),
        }
    }

    #[must_use]
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    #[must_use]
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Check both backends and build the report
    pub async fn run(&self) -> ConnectivityReport {
        let (mysql, mongodb) = tokio::join!(
            observe("mysql", self.check_relational()),
            observe("mongodb", self.check_documents()),
        );

        ConnectivityReport { mysql, mongodb }
    }

    async fn check_relational(&self) -> Result<()> {
        let conn = self.relational.acquire().await?;
        self.relational.release(conn).await
    }

    async fn check_documents(&self) -> Result<()> {
        self.documents.access_collection(&self.collection).await
    }
}

#[async_trait]
impl<R, D> ConnectivityCheck for DatabaseProbe<R, D>
where
    R: RelationalSource,
    D: DocumentStore,
{
    async fn check(&self) -> ConnectivityReport {
        self.run().await
    }
}

/// Run one backend check, turning errors and panics into a [`BackendStatus`]
async fn observe<F>(backend: &str, check: F) -> BackendStatus
where
    F: Future<Output = Result<()>>,
{
    let start = Instant::now();

    let status = match AssertUnwindSafe(check).catch_unwind().await {
        Ok(Ok(())) => BackendStatus::Successful,
        Ok(Err(e)) => BackendStatus::Failed(format!("{e:#}")),
        Err(panic) => BackendStatus::Failed(format!("panic: {}", panic_message(&*panic))),
    };

    let elapsed = start.elapsed().as_secs_f64();
    metrics::record_check(backend, status.is_successful(), elapsed);

    match &status {
        BackendStatus::Successful => info!(backend, elapsed, "connectivity check succeeded"),
        BackendStatus::Failed(cause) => {
            warn!(backend, elapsed, cause = %cause, "connectivity check failed");
        }
    }

    status
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    panic
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| panic.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown")
}
