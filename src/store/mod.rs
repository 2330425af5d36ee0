//! Subtrack Subscription Store
//!
//! This module holds the session's subscription records:
//!
//! - **types**: Core data structures (Subscription, NewSubscription, Frequency, Snapshot)
//! - **collection**: `SubscriptionStore` with add / remove / total
//! - **money**: Amount parsing and two-decimal currency formatting
//! - **error**: Error types
//!
//! # Example
//!
//! ```rust
//! use subtrack::store::{Frequency, NewSubscription, SubscriptionStore};
//! use rust_decimal::Decimal;
//!
//! let mut store = SubscriptionStore::new();
//!
//! let id = store
//!     .add(NewSubscription::new("Netflix", Decimal::new(1599, 2), Frequency::Monthly))
//!     .unwrap()
//!     .id;
//!
//! // Blank names are refused and leave the store untouched
//! assert!(store
//!     .add(NewSubscription::new("", Decimal::from(5), Frequency::Monthly))
//!     .is_err());
//!
//! assert_eq!(store.total_annual_cost(), Decimal::new(19188, 2));
//! store.remove(id);
//! assert!(store.is_empty());
//! ```

pub mod collection;
pub mod error;
pub mod money;
pub mod types;

pub use collection::{default_subscriptions, SubscriptionStore};
pub use error::{StoreError, StoreResult};
pub use money::{format_amount, format_currency, parse_amount, DEFAULT_CURRENCY_SYMBOL};
pub use types::{Frequency, NewSubscription, Snapshot, Subscription, SubscriptionId};
