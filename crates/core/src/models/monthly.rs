use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::storage::records::Entity;
use crate::storage::traits::Collection;

/// What kind of instrument an ad-hoc monthly investment went into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum InvestmentType {
    #[serde(rename = "Mutual Fund")]
    MutualFund,
    #[serde(rename = "SIP")]
    Sip,
    #[serde(rename = "FD")]
    Fd,
    #[serde(rename = "RD")]
    Rd,
    Stocks,
    Bonds,
    Gold,
    Other,
}

impl std::fmt::Display for InvestmentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvestmentType::MutualFund => write!(f, "Mutual Fund"),
            InvestmentType::Sip => write!(f, "SIP"),
            InvestmentType::Fd => write!(f, "FD"),
            InvestmentType::Rd => write!(f, "RD"),
            InvestmentType::Stocks => write!(f, "Stocks"),
            InvestmentType::Bonds => write!(f, "Bonds"),
            InvestmentType::Gold => write!(f, "Gold"),
            InvestmentType::Other => write!(f, "Other"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum InvestmentCategory {
    Equity,
    Debt,
    Hybrid,
    Commodity,
    Other,
}

/// An ad-hoc investment logged for monthly tracking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyInvestment {
    pub id: Uuid,

    #[serde(rename = "type")]
    pub investment_type: InvestmentType,

    pub amount: f64,

    pub date: NaiveDate,

    pub category: InvestmentCategory,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub notes: Option<String>,
}

impl MonthlyInvestment {
    pub fn new(
        investment_type: InvestmentType,
        amount: f64,
        date: NaiveDate,
        category: InvestmentCategory,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            investment_type,
            amount,
            date,
            category,
            description: None,
            notes: None,
        }
    }
}

impl Entity for MonthlyInvestment {
    const COLLECTION: Collection = Collection::MonthlyInvestments;

    fn id(&self) -> Uuid {
        self.id
    }
}
