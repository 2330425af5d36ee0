//! Subscription Store
//!
//! Ordered, in-memory collection of subscription records with
//! add / remove / aggregate operations. Mutations take `&mut self`;
//! hosts that share the store wrap it in a lock.

use rust_decimal::Decimal;

use super::error::{StoreError, StoreResult};
use super::types::{Frequency, NewSubscription, Snapshot, Subscription, SubscriptionId};

/// Holds the subscriptions of one session in insertion order
#[derive(Debug, Clone)]
pub struct SubscriptionStore {
    subscriptions: Vec<Subscription>,
    /// Next id to hand out; only ever increases
    next_id: SubscriptionId,
    /// Bumped on every successful mutation
    revision: u64,
}

impl Default for SubscriptionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SubscriptionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            subscriptions: Vec::new(),
            next_id: 1,
            revision: 0,
        }
    }

    /// Create a store seeded with the given records, at revision 0
    pub fn seeded(records: impl IntoIterator<Item = NewSubscription>) -> StoreResult<Self> {
        let mut store = Self::new();
        for record in records {
            store.add(record)?;
        }
        store.revision = 0;
        Ok(store)
    }

    /// Create a store seeded with the dashboard's default subscriptions
    pub fn with_defaults() -> Self {
        let mut store = Self::new();
        for record in default_subscriptions() {
            store.insert(record);
        }
        store
    }

    /// Add a subscription
    ///
    /// Returns the stored record with its freshly assigned id. A candidate
    /// with a blank name or a non-positive amount is rejected and the
    /// collection is left unchanged.
    pub fn add(&mut self, candidate: NewSubscription) -> StoreResult<&Subscription> {
        if let Err(e) = candidate.validate() {
            tracing::debug!(name = %candidate.name, amount = %candidate.amount, "Rejected subscription");
            return Err(e);
        }

        let fits = candidate
            .checked_annual_cost()
            .and_then(|cost| self.checked_total_annual_cost()?.checked_add(cost))
            .is_some();
        if !fits {
            tracing::debug!(name = %candidate.name, amount = %candidate.amount, "Rejected subscription");
            return Err(StoreError::rejected(format!(
                "yearly cost of {} is too large to total",
                candidate.amount
            )));
        }

        self.revision += 1;
        let revision = self.revision;
        let subscription = self.insert(candidate);

        tracing::debug!(
            subscription_id = subscription.id,
            revision,
            "Added subscription"
        );

        Ok(subscription)
    }

    /// Remove the record with this id
    ///
    /// Absent ids are a no-op and return `None`.
    pub fn remove(&mut self, id: SubscriptionId) -> Option<Subscription> {
        let position = self.subscriptions.iter().position(|s| s.id == id)?;
        let removed = self.subscriptions.remove(position);
        self.revision += 1;

        tracing::debug!(subscription_id = id, revision = self.revision, "Removed subscription");

        Some(removed)
    }

    /// Look up a record by id
    pub fn get(&self, id: SubscriptionId) -> StoreResult<&Subscription> {
        self.subscriptions
            .iter()
            .find(|s| s.id == id)
            .ok_or(StoreError::NotFound(id))
    }

    pub fn contains(&self, id: SubscriptionId) -> bool {
        self.subscriptions.iter().any(|s| s.id == id)
    }

    /// Sum of every record's yearly cost; `0` for an empty store
    pub fn total_annual_cost(&self) -> Decimal {
        self.checked_total_annual_cost().unwrap_or(Decimal::MAX)
    }

    /// Sum of every record's yearly cost, `None` if it does not fit a `Decimal`
    ///
    /// `add` refuses any record that would make this overflow, so for a
    /// store built through `add` it is always `Some`.
    pub fn checked_total_annual_cost(&self) -> Option<Decimal> {
        self.subscriptions.iter().try_fold(Decimal::ZERO, |total, sub| {
            sub.amount
                .checked_mul(sub.frequency.annualization_factor())
                .and_then(|cost| total.checked_add(cost))
        })
    }

    /// Number of records billed with the given frequency
    pub fn count_by_frequency(&self, frequency: Frequency) -> usize {
        self.subscriptions
            .iter()
            .filter(|s| s.frequency == frequency)
            .count()
    }

    /// All records in insertion order
    pub fn subscriptions(&self) -> &[Subscription] {
        &self.subscriptions
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Copy of the current records and total
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            revision: self.revision,
            subscriptions: self.subscriptions.clone(),
            total_annual_cost: self.total_annual_cost(),
        }
    }

    /// Append a validated candidate under the next id
    fn insert(&mut self, candidate: NewSubscription) -> &Subscription {
        let id = self.next_id;
        self.next_id += 1;

        self.subscriptions.push(Subscription {
            id,
            name: candidate.name,
            amount: candidate.amount,
            frequency: candidate.frequency,
        });

        &self.subscriptions[self.subscriptions.len() - 1]
    }
}

/// The dashboard's initial records: Netflix, Spotify and Amazon Prime
pub fn default_subscriptions() -> Vec<NewSubscription> {
    vec![
        NewSubscription::new("Netflix", Decimal::new(1599, 2), Frequency::Monthly),
        NewSubscription::new("Spotify", Decimal::new(999, 2), Frequency::Monthly),
        NewSubscription::new("Amazon Prime", Decimal::from(119), Frequency::Yearly),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;
    use rust_decimal_macros::dec;

    fn netflix() -> NewSubscription {
        NewSubscription::new("Netflix", dec!(15.99), Frequency::Monthly)
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = SubscriptionStore::new();
        assert!(store.is_empty());
        assert_eq!(store.total_annual_cost(), Decimal::ZERO);
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn test_add_assigns_id_and_appends() {
        let mut store = SubscriptionStore::new();
        let id = store.add(netflix()).unwrap().id;

        assert_eq!(store.len(), 1);
        let stored = store.get(id).unwrap();
        assert_eq!(stored.name, "Netflix");
        assert_eq!(stored.amount, dec!(15.99));
        assert_eq!(stored.frequency, Frequency::Monthly);
        assert_eq!(store.revision(), 1);
    }

    #[test]
    fn test_add_rapid_calls_yield_unique_ids() {
        let mut store = SubscriptionStore::new();
        let ids: Vec<SubscriptionId> = (0..1000)
            .map(|i| {
                store
                    .add(NewSubscription::new(format!("sub-{}", i), dec!(1), Frequency::Yearly))
                    .unwrap()
                    .id
            })
            .collect();

        let mut unique = ids.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn test_ids_not_reused_after_remove() {
        let mut store = SubscriptionStore::new();
        let first = store.add(netflix()).unwrap().id;
        store.remove(first);
        let second = store.add(netflix()).unwrap().id;
        assert_ne!(first, second);
    }

    #[test]
    fn test_add_rejects_empty_name() {
        let mut store = SubscriptionStore::with_defaults();
        let before = store.snapshot();

        let result = store.add(NewSubscription::new("", dec!(5), Frequency::Monthly));

        assert!(matches!(result, Err(StoreError::ValidationRejected { .. })));
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_add_rejects_non_positive_amount() {
        let mut store = SubscriptionStore::new();

        assert!(store
            .add(NewSubscription::new("Gym", dec!(0), Frequency::Monthly))
            .is_err());
        assert!(store
            .add(NewSubscription::new("Gym", dec!(-10), Frequency::Monthly))
            .is_err());
        assert!(store.is_empty());
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn test_add_keeps_name_as_given() {
        let mut store = SubscriptionStore::new();
        let sub = store
            .add(NewSubscription::new("  Disney+ ", dec!(7.99), Frequency::Monthly))
            .unwrap();
        assert_eq!(sub.name, "  Disney+ ");

        let blank = store
            .add(NewSubscription::new(" ", dec!(5), Frequency::Monthly))
            .unwrap();
        assert_eq!(blank.name, " ");
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_add_rejects_overflowing_yearly_cost() {
        let mut store = SubscriptionStore::with_defaults();
        let before = store.snapshot();

        let result = store.add(NewSubscription::new("Big", Decimal::MAX, Frequency::Monthly));

        assert!(matches!(result, Err(StoreError::ValidationRejected { .. })));
        assert_eq!(store.snapshot(), before);
        assert_eq!(store.total_annual_cost(), dec!(430.76));
    }

    #[test]
    fn test_add_rejects_overflowing_total() {
        let mut store = SubscriptionStore::new();
        store
            .add(NewSubscription::new("Big", Decimal::MAX, Frequency::Yearly))
            .unwrap();

        let result = store.add(NewSubscription::new("Bigger", Decimal::MAX, Frequency::Yearly));

        assert!(result.is_err());
        assert_eq!(store.len(), 1);
        assert_eq!(store.checked_total_annual_cost(), Some(Decimal::MAX));
    }

    #[test]
    fn test_remove_present_id() {
        let mut store = SubscriptionStore::with_defaults();
        let removed = store.remove(2).unwrap();

        assert_eq!(removed.name, "Spotify");
        assert_eq!(store.len(), 2);
        assert!(!store.contains(2));
        assert!(matches!(store.get(2), Err(StoreError::NotFound(2))));
    }

    #[test]
    fn test_remove_absent_id_is_noop() {
        let mut store = SubscriptionStore::with_defaults();
        let before = store.snapshot();

        assert!(store.remove(999).is_none());
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_remove_keeps_insertion_order() {
        let mut store = SubscriptionStore::with_defaults();
        store.remove(1);

        let names: Vec<&str> = store.subscriptions().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Spotify", "Amazon Prime"]);
    }

    #[test]
    fn test_total_annual_cost_mixed() {
        let store = SubscriptionStore::seeded(vec![
            NewSubscription::new("Netflix", dec!(15.99), Frequency::Monthly),
            NewSubscription::new("Amazon Prime", dec!(119), Frequency::Yearly),
        ])
        .unwrap();

        assert_eq!(store.total_annual_cost(), dec!(310.88));
    }

    #[test]
    fn test_total_annual_cost_is_idempotent() {
        let store = SubscriptionStore::with_defaults();
        let first = store.total_annual_cost();
        let second = store.total_annual_cost();

        assert_eq!(first, second);
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn test_defaults() {
        let store = SubscriptionStore::with_defaults();
        let ids: Vec<SubscriptionId> = store.subscriptions().iter().map(|s| s.id).collect();

        assert_eq!(ids, vec![1, 2, 3]);
        // 15.99 * 12 + 9.99 * 12 + 119
        assert_eq!(store.total_annual_cost(), dec!(430.76));
        assert_eq!(store.count_by_frequency(Frequency::Monthly), 2);
        assert_eq!(store.count_by_frequency(Frequency::Yearly), 1);
    }

    #[test]
    fn test_next_id_follows_defaults() {
        let mut store = SubscriptionStore::with_defaults();
        let id = store.add(netflix()).unwrap().id;
        assert_eq!(id, 4);
    }

    #[test]
    fn test_seeded_rejects_invalid_record() {
        let result = SubscriptionStore::seeded(vec![NewSubscription::new(
            "",
            dec!(1),
            Frequency::Monthly,
        )]);
        assert!(result.is_err());
    }

    #[test]
    fn test_scenario_valid_then_rejected_add() {
        let mut store = SubscriptionStore::new();
        store.add(netflix()).unwrap();
        let rejected = store.add(NewSubscription::new("", dec!(5), Frequency::Monthly));

        assert!(rejected.is_err());
        assert_eq!(store.len(), 1);
        assert_eq!(store.total_annual_cost(), dec!(191.88));
    }

    fn candidate(name: String, cents: i64, yearly: bool) -> NewSubscription {
        let frequency = if yearly {
            Frequency::Yearly
        } else {
            Frequency::Monthly
        };
        NewSubscription::new(name, Decimal::new(cents, 2), frequency)
    }

    #[quickcheck]
    fn prop_valid_add_grows_by_one(name: String, cents: i64, yearly: bool) -> bool {
        if name.is_empty() {
            return true;
        }
        let candidate = candidate(name, cents.saturating_abs().max(1), yearly);
        let mut store = SubscriptionStore::with_defaults();
        let before = store.len();

        let id = match store.add(candidate) {
            Ok(sub) => sub.id,
            Err(_) => return false,
        };

        store.len() == before + 1 && store.get(id).is_ok()
    }

    #[quickcheck]
    fn prop_non_positive_amount_is_rejected(name: String, cents: i64, yearly: bool) -> bool {
        let candidate = candidate(name, -cents.saturating_abs(), yearly);
        let mut store = SubscriptionStore::with_defaults();
        let before = store.snapshot();

        store.add(candidate).is_err() && store.snapshot() == before
    }

    #[quickcheck]
    fn prop_empty_name_is_rejected(cents: i64, yearly: bool) -> bool {
        let mut store = SubscriptionStore::with_defaults();
        let before = store.snapshot();

        store.add(candidate(String::new(), cents, yearly)).is_err() && store.snapshot() == before
    }

    #[quickcheck]
    fn prop_remove_absent_is_noop(id: u64) -> bool {
        let mut store = SubscriptionStore::with_defaults();
        if store.contains(id) {
            return true;
        }
        let before = store.snapshot();

        store.remove(id).is_none() && store.snapshot() == before
    }

    #[quickcheck]
    fn prop_remove_present_shrinks_by_one(pick: usize) -> bool {
        let mut store = SubscriptionStore::with_defaults();
        let id = store.subscriptions()[pick % store.len()].id;
        let before = store.len();

        store.remove(id).is_some() && store.len() == before - 1 && !store.contains(id)
    }
}
