//! Endpoint selection.
//!
//! Reads the endpoint catalog and keeps the entries whose measured loss and
//! delay are within caller-supplied thresholds.

pub mod quality;

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;
use warpline_core::config::EndpointConfig;

pub use quality::QualityParseError;

use crate::error::ServiceError;
use crate::storage::{DatabaseError, EndpointRecord};

/// Read access to the endpoint catalog.
#[async_trait]
pub trait EndpointCatalog: Send + Sync {
    /// Every endpoint, in catalog order.
    async fn list_all(&self) -> Result<Vec<EndpointRecord>, DatabaseError>;
}

/// Inclusive upper bounds on endpoint quality metrics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualityThresholds {
    /// Percent.
    pub max_loss: f64,
    /// Milliseconds.
    pub max_delay: i64,
}

impl Default for QualityThresholds {
    fn default() -> Self {
        Self {
            max_loss: 10.0,
            max_delay: 500,
        }
    }
}

impl From<&EndpointConfig> for QualityThresholds {
    fn from(config: &EndpointConfig) -> Self {
        Self {
            max_loss: config.max_loss,
            max_delay: config.max_delay,
        }
    }
}

/// A parsed endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualifiedEndpoint {
    pub ip: String,
    pub port: u16,
    pub loss: f64,
    pub delay: i64,
    pub name: String,
    pub unique_name: String,
}

impl TryFrom<EndpointRecord> for QualifiedEndpoint {
    type Error = ServiceError;

    fn try_from(record: EndpointRecord) -> Result<Self, Self::Error> {
        let malformed = |reason| ServiceError::MalformedRecord {
            address: record.address.clone(),
            reason,
        };

        let (ip, port) = quality::parse_address(&record.address).map_err(malformed)?;
        let loss = quality::parse_loss(&record.loss).map_err(malformed)?;
        let delay = quality::parse_delay(&record.delay).map_err(malformed)?;

        Ok(Self {
            ip: ip.to_string(),
            port,
            loss,
            delay,
            name: record.name,
            unique_name: record.unique_name,
        })
    }
}

impl QualifiedEndpoint {
    pub fn meets(&self, thresholds: &QualityThresholds) -> bool {
        self.loss <= thresholds.max_loss && self.delay <= thresholds.max_delay
    }
}

/// Filters the catalog by quality thresholds.
pub struct EndpointSelector<C> {
    catalog: C,
}

impl<C: EndpointCatalog> EndpointSelector<C> {
    pub const fn new(catalog: C) -> Self {
        Self { catalog }
    }

    /// Endpoints within `thresholds`, in catalog order.
    ///
    /// Fails on the first row that cannot be parsed instead of skipping it.
    pub async fn list_qualifying_endpoints(
        &self,
        thresholds: QualityThresholds,
    ) -> Result<Vec<QualifiedEndpoint>, ServiceError> {
        let records = self.catalog.list_all().await?;
        let total = records.len();

        let mut qualifying = Vec::new();
        for record in records {
            let endpoint = QualifiedEndpoint::try_from(record)?;
            if endpoint.meets(&thresholds) {
                qualifying.push(endpoint);
            }
        }

        debug!(
            total,
            qualifying = qualifying.len(),
            max_loss = thresholds.max_loss,
            max_delay = thresholds.max_delay,
            "Filtered endpoint catalog"
        );
        Ok(qualifying)
    }
}
