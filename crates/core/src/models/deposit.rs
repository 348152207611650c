use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::storage::records::Entity;
use crate::storage::traits::Collection;

/// Fixed deposit or recurring deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DepositKind {
    #[serde(rename = "FD")]
    Fixed,
    #[serde(rename = "RD")]
    Recurring,
}

impl std::fmt::Display for DepositKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DepositKind::Fixed => write!(f, "FD"),
            DepositKind::Recurring => write!(f, "RD"),
        }
    }
}

/// Deposit lifecycle. `Matured` and `PrematureClosure` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DepositStatus {
    Active,
    Matured,
    #[serde(rename = "Premature Closure")]
    PrematureClosure,
}

impl DepositStatus {
    /// Only an active deposit can mature or be closed early.
    pub fn can_transition_to(&self, next: DepositStatus) -> bool {
        *self == DepositStatus::Active && next != DepositStatus::Active
    }

    pub fn is_terminal(&self) -> bool {
        *self != DepositStatus::Active
    }
}

impl std::fmt::Display for DepositStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DepositStatus::Active => write!(f, "Active"),
            DepositStatus::Matured => write!(f, "Matured"),
            DepositStatus::PrematureClosure => write!(f, "Premature Closure"),
        }
    }
}

/// A bank deposit (FD or RD).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deposit {
    pub id: Uuid,

    /// Display name (e.g., "SBI FD 2024")
    pub name: String,

    #[serde(rename = "type")]
    pub kind: DepositKind,

    pub bank: String,

    /// Principal (FD) or monthly installment (RD)
    pub amount: f64,

    /// Annual interest rate in percent (7.0 = 7%)
    pub interest_rate: f64,

    pub start_date: NaiveDate,

    pub maturity_date: NaiveDate,

    pub status: DepositStatus,

    #[serde(default)]
    pub notes: Option<String>,
}

impl Deposit {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        kind: DepositKind,
        bank: impl Into<String>,
        amount: f64,
        interest_rate: f64,
        start_date: NaiveDate,
        maturity_date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind,
            bank: bank.into(),
            amount,
            interest_rate,
            start_date,
            maturity_date,
            status: DepositStatus::Active,
            notes: None,
        }
    }
}

impl Entity for Deposit {
    const COLLECTION: Collection = Collection::Deposits;

    fn id(&self) -> Uuid {
        self.id
    }
}
