//! # Subtrack
//!
//! Subscription Dashboard - track recurring subscriptions (name, amount,
//! billing frequency) and see what they cost per year.
//!
//! ## Features
//!
//! - **In-memory store**: ordered records with collision-free ids
//! - **Exact money**: `rust_decimal` amounts, two-decimal display
//! - **Dashboard**: server-rendered HTML page with add / delete forms
//! - **Real-time**: WebSocket snapshots after every change
//!
//! ## Modules
//!
//! - [`store`]: Subscription records and the yearly total
//! - [`api`]: HTTP server with Axum
//! - [`dashboard`]: HTML page rendering
//! - [`websocket`]: Live update hub
//! - [`config`]: TOML / environment configuration
//!
//! ## Quick Start
//!
//! ```rust
//! use subtrack::store::{Frequency, NewSubscription, SubscriptionStore};
//! use subtrack::store::format_currency;
//! use rust_decimal::Decimal;
//!
//! let mut store = SubscriptionStore::new();
//! store
//!     .add(NewSubscription::new("Netflix", Decimal::new(1599, 2), Frequency::Monthly))
//!     .unwrap();
//! store
//!     .add(NewSubscription::new("Amazon Prime", Decimal::from(119), Frequency::Yearly))
//!     .unwrap();
//!
//! assert_eq!(format_currency(store.total_annual_cost(), "$"), "$310.88");
//! ```

pub mod api;
pub mod config;
pub mod dashboard;
pub mod store;
pub mod websocket;

// Re-export top-level types for convenience
pub use store::{
    Frequency, NewSubscription, Snapshot, StoreError, StoreResult, Subscription, SubscriptionId,
    SubscriptionStore,
};

pub use api::{build_router, serve, ApiError, AppState};

pub use websocket::{ClientMessage, ConnectionHub, HubConfig, HubError, ServerMessage};

pub use config::{ApiConfig, Config, ConfigError, DashboardConfig, LoggingConfig, StoreConfig};
