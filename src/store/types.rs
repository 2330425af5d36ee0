//! Core data types for the subscription store
//!
//! - `Subscription`: one tracked recurring payment
//! - `NewSubscription`: a candidate record handed to `add`
//! - `Frequency`: billing cycle, drives annualization
//! - `Snapshot`: consistent view of the store after a mutation

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::error::{StoreError, StoreResult};

/// Identifier assigned by the store when a record is added
pub type SubscriptionId = u64;

/// Billing cycle of a subscription
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    /// Billed every month, annualized as `amount * 12`
    #[default]
    Monthly,
    /// Billed once a year, annualized as `amount`
    Yearly,
}

impl Frequency {
    /// Get all frequencies in display order
    pub fn all() -> &'static [Frequency] {
        &[Frequency::Monthly, Frequency::Yearly]
    }

    /// Multiplier that converts one billing-cycle amount into a yearly cost
    pub fn annualization_factor(&self) -> Decimal {
        match self {
            Frequency::Monthly => Decimal::from(12),
            Frequency::Yearly => Decimal::ONE,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Monthly => "monthly",
            Frequency::Yearly => "yearly",
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monthly" | "month" | "m" => Ok(Frequency::Monthly),
            "yearly" | "year" | "annual" | "y" => Ok(Frequency::Yearly),
            other => Err(StoreError::UnknownFrequency(other.to_string())),
        }
    }
}

/// A tracked recurring payment
///
/// Records are never mutated after `add` accepts them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Subscription {
    pub id: SubscriptionId,
    pub name: String,
    /// Cost of one billing cycle
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub frequency: Frequency,
}

impl Subscription {
    /// Yearly equivalent of this record's cost
    ///
    /// Saturates at `Decimal::MAX`; `add` never accepts a record whose
    /// yearly cost does not fit.
    pub fn annual_cost(&self) -> Decimal {
        self.amount.saturating_mul(self.frequency.annualization_factor())
    }
}

/// Candidate record for `SubscriptionStore::add`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewSubscription {
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(default)]
    pub frequency: Frequency,
}

impl NewSubscription {
    pub fn new(name: impl Into<String>, amount: Decimal, frequency: Frequency) -> Self {
        Self {
            name: name.into(),
            amount,
            frequency,
        }
    }

    /// Yearly equivalent of the candidate's cost, `None` on overflow
    pub fn checked_annual_cost(&self) -> Option<Decimal> {
        self.amount.checked_mul(self.frequency.annualization_factor())
    }

    /// Check the acceptance rules: non-empty name and `amount > 0`
    pub fn validate(&self) -> StoreResult<()> {
        if self.name.is_empty() {
            return Err(StoreError::rejected("name must not be empty"));
        }
        if self.amount <= Decimal::ZERO {
            return Err(StoreError::rejected(format!(
                "amount must be greater than zero (got {})",
                self.amount
            )));
        }
        Ok(())
    }
}

/// Consistent view of the store, taken after a mutation
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Snapshot {
    /// Mutation counter at the time of the snapshot
    pub revision: u64,
    pub subscriptions: Vec<Subscription>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_annual_cost: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_frequency_parse() {
        assert_eq!("monthly".parse::<Frequency>().unwrap(), Frequency::Monthly);
        assert_eq!(" Yearly ".parse::<Frequency>().unwrap(), Frequency::Yearly);
        assert!(matches!(
            "weekly".parse::<Frequency>(),
            Err(StoreError::UnknownFrequency(_))
        ));
    }

    #[test]
    fn test_frequency_serde_lowercase() {
        let json = serde_json::to_string(&Frequency::Yearly).unwrap();
        assert_eq!(json, "\"yearly\"");

        let freq: Frequency = serde_json::from_str("\"monthly\"").unwrap();
        assert_eq!(freq, Frequency::Monthly);
    }

    #[test]
    fn test_annual_cost() {
        let monthly = Subscription {
            id: 1,
            name: "Netflix".to_string(),
            amount: dec!(15.99),
            frequency: Frequency::Monthly,
        };
        assert_eq!(monthly.annual_cost(), dec!(191.88));

        let yearly = Subscription {
            id: 2,
            name: "Amazon Prime".to_string(),
            amount: dec!(119),
            frequency: Frequency::Yearly,
        };
        assert_eq!(yearly.annual_cost(), dec!(119));
    }

    #[test]
    fn test_validate() {
        assert!(NewSubscription::new("Spotify", dec!(9.99), Frequency::Monthly)
            .validate()
            .is_ok());
        assert!(NewSubscription::new("", dec!(5), Frequency::Monthly)
            .validate()
            .is_err());
        assert!(NewSubscription::new("   ", dec!(5), Frequency::Monthly)
            .validate()
            .is_ok());
        assert!(NewSubscription::new("Gym", dec!(0), Frequency::Monthly)
            .validate()
            .is_err());
        assert!(NewSubscription::new("Gym", dec!(-3.50), Frequency::Yearly)
            .validate()
            .is_err());
    }

    #[test]
    fn test_checked_annual_cost() {
        let monthly = NewSubscription::new("Netflix", dec!(15.99), Frequency::Monthly);
        assert_eq!(monthly.checked_annual_cost(), Some(dec!(191.88)));

        let huge = NewSubscription::new("Big", Decimal::MAX, Frequency::Monthly);
        assert_eq!(huge.checked_annual_cost(), None);

        let huge_yearly = NewSubscription::new("Big", Decimal::MAX, Frequency::Yearly);
        assert_eq!(huge_yearly.checked_annual_cost(), Some(Decimal::MAX));
    }

    #[test]
    fn test_new_subscription_deserialize() {
        let json = r#"{"name": "Netflix", "amount": 15.99}"#;
        let candidate: NewSubscription = serde_json::from_str(json).unwrap();
        assert_eq!(candidate.name, "Netflix");
        assert_eq!(candidate.amount, dec!(15.99));
        assert_eq!(candidate.frequency, Frequency::Monthly);
    }

    #[test]
    fn test_subscription_serialize() {
        let sub = Subscription {
            id: 7,
            name: "Spotify".to_string(),
            amount: dec!(9.99),
            frequency: Frequency::Monthly,
        };
        let json = serde_json::to_string(&sub).unwrap();
        assert!(json.contains("\"id\":7"));
        assert!(json.contains("\"amount\":9.99"));
        assert!(json.contains("\"frequency\":\"monthly\""));
    }
}
