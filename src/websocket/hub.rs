//! WebSocket Connection Hub
//!
//! Tracks dashboard connections and fans store snapshots out to all of them.

use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

use super::messages::ServerMessage;

/// Unique identifier for a WebSocket connection
pub type ConnectionId = String;

/// Manages all WebSocket connections
pub struct ConnectionHub {
    /// Active connections: ConnectionId → sender
    connections: Arc<RwLock<HashMap<ConnectionId, mpsc::UnboundedSender<ServerMessage>>>>,
    config: HubConfig,
}

/// Configuration for the connection hub
#[derive(Debug, Clone)]
pub struct HubConfig {
    /// Maximum number of concurrent connections
    pub max_connections: usize,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            max_connections: 256,
        }
    }
}

impl ConnectionHub {
    /// Create a new connection hub
    pub fn new(config: HubConfig) -> Self {
        Self {
            connections: Arc::new(RwLock::new(HashMap::new())),
            config,
        }
    }

    /// Register a new WebSocket connection
    ///
    /// Returns the connection ID on success, or an error if the connection
    /// limit has been reached.
    pub async fn register(
        &self,
        sender: mpsc::UnboundedSender<ServerMessage>,
    ) -> Result<ConnectionId, HubError> {
        let mut connections = self.connections.write().await;
        if connections.len() >= self.config.max_connections {
            return Err(HubError::TooManyConnections);
        }

        let id = Uuid::new_v4().to_string();
        connections.insert(id.clone(), sender);

        tracing::info!(connection_id = %id, "WebSocket connected");
        Ok(id)
    }

    /// Unregister a connection
    pub async fn unregister(&self, id: &str) {
        if self.connections.write().await.remove(id).is_some() {
            tracing::info!(connection_id = %id, "WebSocket disconnected");
        }
    }

    /// Send a message to every connection
    ///
    /// Connections whose receiver has gone away are dropped.
    pub async fn broadcast(&self, message: ServerMessage) {
        let mut stale = Vec::new();
        {
            let connections = self.connections.read().await;
            for (id, sender) in connections.iter() {
                if sender.send(message.clone()).is_err() {
                    stale.push(id.clone());
                }
            }
        }

        if !stale.is_empty() {
            let mut connections = self.connections.write().await;
            for id in &stale {
                connections.remove(id);
            }
            tracing::debug!(removed = stale.len(), "Dropped stale WebSocket connections");
        }
    }

    /// Send a message to a specific connection
    pub async fn send_to(&self, id: &str, message: ServerMessage) -> Result<(), HubError> {
        let connections = self.connections.read().await;
        let sender = connections.get(id).ok_or(HubError::ConnectionNotFound)?;
        sender.send(message).map_err(|_| HubError::SendFailed)
    }

    /// Get the number of active connections
    pub async fn connection_count(&self) -> usize {
        self.connections.read().await.len()
    }
}

/// Errors that can occur in the connection hub
#[derive(Error, Debug, PartialEq, Eq)]
pub enum HubError {
    #[error("Too many connections")]
    TooManyConnections,

    #[error("Connection not found")]
    ConnectionNotFound,

    #[error("Failed to send message")]
    SendFailed,
}
