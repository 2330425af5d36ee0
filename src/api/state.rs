//! Application State
//!
//! Shared state accessible by all handlers.
//! The store sits behind one async RwLock so each mutation runs to
//! completion before the next request observes the collection.

use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;

use crate::config::DashboardConfig;
use crate::store::{
    format_currency, NewSubscription, Snapshot, StoreResult, Subscription, SubscriptionId,
    SubscriptionStore,
};
use crate::websocket::{ConnectionHub, HubConfig, ServerMessage};

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// The session's subscriptions
    pub store: Arc<RwLock<SubscriptionStore>>,
    /// Dashboard rendering settings
    pub dashboard: Arc<DashboardConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
    /// WebSocket connection hub for live updates
    pub ws_hub: Arc<ConnectionHub>,
}

impl AppState {
    pub fn new(store: SubscriptionStore, dashboard: DashboardConfig) -> Self {
        Self::with_ws_config(store, dashboard, HubConfig::default())
    }

    /// Create AppState with custom WebSocket hub configuration
    pub fn with_ws_config(
        store: SubscriptionStore,
        dashboard: DashboardConfig,
        hub_config: HubConfig,
    ) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            dashboard: Arc::new(dashboard),
            start_time: Instant::now(),
            ws_hub: Arc::new(ConnectionHub::new(hub_config)),
        }
    }

    /// Add a subscription and notify observers
    pub async fn add_subscription(&self, candidate: NewSubscription) -> StoreResult<Subscription> {
        let (subscription, snapshot) = {
            let mut store = self.store.write().await;
            let subscription = store.add(candidate)?.clone();
            (subscription, store.snapshot())
        };

        tracing::info!(
            subscription_id = subscription.id,
            name = %subscription.name,
            revision = snapshot.revision,
            "Subscription added"
        );

        self.publish(snapshot).await;
        Ok(subscription)
    }

    /// Remove a subscription; absent ids are a no-op and publish nothing
    pub async fn remove_subscription(&self, id: SubscriptionId) -> Option<Subscription> {
        let (removed, snapshot) = {
            let mut store = self.store.write().await;
            let removed = store.remove(id);
            (removed, store.snapshot())
        };

        match &removed {
            Some(subscription) => {
                tracing::info!(
                    subscription_id = id,
                    name = %subscription.name,
                    revision = snapshot.revision,
                    "Subscription removed"
                );
                self.publish(snapshot).await;
            }
            None => {
                tracing::debug!(subscription_id = id, "Remove of unknown subscription ignored");
            }
        }

        removed
    }

    /// Current records and total
    pub async fn snapshot(&self) -> Snapshot {
        self.store.read().await.snapshot()
    }

    /// Render an amount with the configured currency symbol
    pub fn format_money(&self, amount: Decimal) -> String {
        format_currency(amount, &self.dashboard.currency_symbol)
    }

    /// Snapshot message as pushed to WebSocket observers
    pub fn snapshot_message(&self, snapshot: Snapshot) -> ServerMessage {
        let formatted_total = self.format_money(snapshot.total_annual_cost);
        ServerMessage::Snapshot {
            snapshot,
            formatted_total,
        }
    }

    async fn publish(&self, snapshot: Snapshot) {
        let message = self.snapshot_message(snapshot);
        self.ws_hub.broadcast(message).await;
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Get WebSocket connection count
    pub async fn ws_connection_count(&self) -> usize {
        self.ws_hub.connection_count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Frequency;
    use rust_decimal_macros::dec;
    use tokio::sync::mpsc;

    fn test_state() -> AppState {
        AppState::new(SubscriptionStore::new(), DashboardConfig::default())
    }

    #[tokio::test]
    async fn test_add_publishes_snapshot() {
        let state = test_state();
        let (tx, mut rx) = mpsc::unbounded_channel();
        state.ws_hub.register(tx).await.unwrap();

        let sub = state
            .add_subscription(NewSubscription::new("Netflix", dec!(15.99), Frequency::Monthly))
            .await
            .unwrap();

        match rx.recv().await.unwrap() {
            ServerMessage::Snapshot {
                snapshot,
                formatted_total,
            } => {
                assert_eq!(snapshot.revision, 1);
                assert_eq!(snapshot.subscriptions[0].id, sub.id);
                assert_eq!(formatted_total, "$191.88");
            }
            other => panic!("Expected Snapshot, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_rejected_add_publishes_nothing() {
        let state = test_state();
        let (tx, mut rx) = mpsc::unbounded_channel();
        state.ws_hub.register(tx).await.unwrap();

        let result = state
            .add_subscription(NewSubscription::new("", dec!(5), Frequency::Monthly))
            .await;

        assert!(result.is_err());
        assert!(rx.try_recv().is_err());
        assert_eq!(state.snapshot().await.revision, 0);
    }

    #[tokio::test]
    async fn test_remove_unknown_publishes_nothing() {
        let state = test_state();
        let (tx, mut rx) = mpsc::unbounded_channel();
        state.ws_hub.register(tx).await.unwrap();

        assert!(state.remove_subscription(42).await.is_none());
        assert!(rx.try_recv().is_err());
    }
}
