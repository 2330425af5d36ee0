//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! Records themselves serialize straight from `store::Subscription`.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::store::Subscription;

/// Subscription list response
#[derive(Debug, Serialize)]
pub struct SubscriptionListResponse {
    /// Records in insertion order
    pub subscriptions: Vec<Subscription>,
    /// Number of records
    pub total: usize,
    /// Store revision the list was read at
    pub revision: u64,
}

/// Aggregate cost summary
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    /// Number of records
    pub count: usize,
    /// Records billed monthly
    pub monthly_count: usize,
    /// Records billed yearly
    pub yearly_count: usize,
    /// Sum of yearly costs
    #[serde(with = "rust_decimal::serde::float")]
    pub total_annual_cost: Decimal,
    /// Total with two decimals and currency symbol
    pub formatted_total: String,
    /// Store revision the summary was computed at
    pub revision: u64,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: healthy, degraded
    pub status: String,
    /// Store status
    pub store: String,
    /// Number of live records
    pub subscriptions: usize,
    /// Open WebSocket observers
    pub ws_connections: usize,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}
