//! API Routes
//!
//! Route handlers organized by functionality.

pub mod health;
pub mod subscriptions;
pub mod summary;
