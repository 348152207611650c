use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::storage::records::Entity;
use crate::storage::traits::Collection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlanType {
    Retirement,
    Education,
    #[serde(rename = "House Purchase")]
    HousePurchase,
    #[serde(rename = "Emergency Fund")]
    EmergencyFund,
    Other,
}

impl std::fmt::Display for PlanType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlanType::Retirement => write!(f, "Retirement"),
            PlanType::Education => write!(f, "Education"),
            PlanType::HousePurchase => write!(f, "House Purchase"),
            PlanType::EmergencyFund => write!(f, "Emergency Fund"),
            PlanType::Other => write!(f, "Other"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// Plan lifecycle. `Completed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlanStatus {
    Active,
    Completed,
}

impl PlanStatus {
    pub fn can_transition_to(&self, next: PlanStatus) -> bool {
        *self == PlanStatus::Active && next == PlanStatus::Completed
    }

    pub fn is_terminal(&self) -> bool {
        *self == PlanStatus::Completed
    }
}

impl std::fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlanStatus::Active => write!(f, "Active"),
            PlanStatus::Completed => write!(f, "Completed"),
        }
    }
}

/// A savings goal with a target amount and date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialPlan {
    pub id: Uuid,

    /// Display name (e.g., "Retirement Plan 2030")
    pub name: String,

    #[serde(rename = "type")]
    pub plan_type: PlanType,

    pub target_amount: f64,

    pub target_date: NaiveDate,

    /// Amount accumulated so far
    pub current_amount: f64,

    /// Planned monthly contribution
    pub monthly_investment: f64,

    /// Expected annual return in percent
    pub expected_return: f64,

    pub priority: Priority,

    pub status: PlanStatus,

    #[serde(default)]
    pub description: Option<String>,
}

impl FinancialPlan {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        plan_type: PlanType,
        target_amount: f64,
        target_date: NaiveDate,
        current_amount: f64,
        monthly_investment: f64,
        expected_return: f64,
        priority: Priority,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            plan_type,
            target_amount,
            target_date,
            current_amount,
            monthly_investment,
            expected_return,
            priority,
            status: PlanStatus::Active,
            description: None,
        }
    }
}

impl Entity for FinancialPlan {
    const COLLECTION: Collection = Collection::FinancialPlans;

    fn id(&self) -> Uuid {
        self.id
    }
}
