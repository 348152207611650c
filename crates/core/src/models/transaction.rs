use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::storage::records::Entity;
use crate::storage::traits::Collection;

/// Direction of a fund transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Purchase of units
    Buy,
    /// Redemption of units
    Sell,
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Buy => write!(f, "Buy"),
            TransactionType::Sell => write!(f, "Sell"),
        }
    }
}

/// A single buy/sell of units in a fund. Immutable once recorded;
/// it can only be deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: Uuid,

    /// The fund this transaction belongs to
    pub fund_id: Uuid,

    /// Buy or Sell
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,

    /// Money moved (always positive)
    pub amount: f64,

    /// Units moved (always positive)
    pub units: f64,

    /// NAV at which the transaction was executed
    pub nav: f64,

    /// Trade date (no time component)
    pub date: NaiveDate,

    #[serde(default)]
    pub notes: Option<String>,
}

impl Transaction {
    pub fn new(
        fund_id: Uuid,
        transaction_type: TransactionType,
        amount: f64,
        units: f64,
        nav: f64,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            fund_id,
            transaction_type,
            amount,
            units,
            nav,
            date,
            notes: None,
        }
    }

    pub fn buy(fund_id: Uuid, amount: f64, units: f64, date: NaiveDate) -> Self {
        let nav = if units > 0.0 { amount / units } else { 0.0 };
        Self::new(fund_id, TransactionType::Buy, amount, units, nav, date)
    }

    pub fn sell(fund_id: Uuid, amount: f64, units: f64, date: NaiveDate) -> Self {
        let nav = if units > 0.0 { amount / units } else { 0.0 };
        Self::new(fund_id, TransactionType::Sell, amount, units, nav, date)
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

impl Entity for Transaction {
    const COLLECTION: Collection = Collection::Transactions;

    fn id(&self) -> Uuid {
        self.id
    }
}
