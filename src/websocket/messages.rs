//! WebSocket Message Types
//!
//! Defines all message types for WebSocket communication between
//! dashboard clients and the Subtrack server.

use serde::{Deserialize, Serialize};

use crate::store::Snapshot;

/// Messages sent from client to server
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Ask for the current snapshot
    Refresh,
    /// Ping for keepalive
    Ping,
}

/// Messages sent from server to client
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Connection established
    Connected {
        /// Unique connection identifier
        connection_id: String,
    },
    /// The collection after a mutation (or on request)
    Snapshot {
        #[serde(flatten)]
        snapshot: Snapshot,
        /// Total with two decimals and currency symbol
        formatted_total: String,
    },
    /// Pong response to ping
    Pong,
    /// Error message
    Error {
        /// Error description
        message: String,
    },
}
