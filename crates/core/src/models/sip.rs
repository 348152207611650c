use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::storage::records::Entity;
use crate::storage::traits::Collection;

/// How often a SIP installment is debited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SipFrequency {
    Monthly,
    Weekly,
    Quarterly,
}

impl SipFrequency {
    /// Number of installments per year.
    pub fn installments_per_year(&self) -> f64 {
        match self {
            SipFrequency::Monthly => 12.0,
            SipFrequency::Weekly => 52.0,
            SipFrequency::Quarterly => 4.0,
        }
    }
}

impl std::fmt::Display for SipFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SipFrequency::Monthly => write!(f, "Monthly"),
            SipFrequency::Weekly => write!(f, "Weekly"),
            SipFrequency::Quarterly => write!(f, "Quarterly"),
        }
    }
}

/// SIP lifecycle. `Active ↔ Paused`, `Active → Completed`; `Completed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SipStatus {
    Active,
    Paused,
    Completed,
}

impl SipStatus {
    /// Whether a SIP in this state may move to `next`.
    pub fn can_transition_to(&self, next: SipStatus) -> bool {
        matches!(
            (*self, next),
            (SipStatus::Active, SipStatus::Paused)
                | (SipStatus::Paused, SipStatus::Active)
                | (SipStatus::Active, SipStatus::Completed)
        )
    }

    pub fn is_terminal(&self) -> bool {
        *self == SipStatus::Completed
    }
}

impl std::fmt::Display for SipStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SipStatus::Active => write!(f, "Active"),
            SipStatus::Paused => write!(f, "Paused"),
            SipStatus::Completed => write!(f, "Completed"),
        }
    }
}

/// A systematic investment plan into a registered fund.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sip {
    pub id: Uuid,

    /// Display name (e.g., "HDFC Top 100 SIP")
    pub name: String,

    pub fund_id: Uuid,

    /// Amount per installment
    pub amount: f64,

    pub frequency: SipFrequency,

    pub start_date: NaiveDate,

    #[serde(default)]
    pub end_date: Option<NaiveDate>,

    pub status: SipStatus,

    #[serde(default)]
    pub auto_debit: bool,

    #[serde(default)]
    pub notes: Option<String>,
}

impl Sip {
    pub fn new(
        name: impl Into<String>,
        fund_id: Uuid,
        amount: f64,
        frequency: SipFrequency,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            fund_id,
            amount,
            frequency,
            start_date,
            end_date: None,
            status: SipStatus::Active,
            auto_debit: false,
            notes: None,
        }
    }

    /// Installment amount normalized to a monthly outflow.
    pub fn monthly_outflow(&self) -> f64 {
        self.amount * self.frequency.installments_per_year() / 12.0
    }
}

impl Entity for Sip {
    const COLLECTION: Collection = Collection::Sips;

    fn id(&self) -> Uuid {
        self.id
    }
}
