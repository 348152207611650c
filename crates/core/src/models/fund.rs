use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::storage::records::Entity;
use crate::storage::traits::Collection;

/// Mutual fund category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FundCategory {
    #[serde(rename = "Large Cap")]
    LargeCap,
    #[serde(rename = "Mid Cap")]
    MidCap,
    #[serde(rename = "Small Cap")]
    SmallCap,
    #[serde(rename = "Multi Cap")]
    MultiCap,
    #[serde(rename = "ELSS")]
    Elss,
    Debt,
    Hybrid,
    Index,
    Other,
}

impl std::fmt::Display for FundCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FundCategory::LargeCap => write!(f, "Large Cap"),
            FundCategory::MidCap => write!(f, "Mid Cap"),
            FundCategory::SmallCap => write!(f, "Small Cap"),
            FundCategory::MultiCap => write!(f, "Multi Cap"),
            FundCategory::Elss => write!(f, "ELSS"),
            FundCategory::Debt => write!(f, "Debt"),
            FundCategory::Hybrid => write!(f, "Hybrid"),
            FundCategory::Index => write!(f, "Index"),
            FundCategory::Other => write!(f, "Other"),
        }
    }
}

/// Risk level as declared by the fund house.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Medium => write!(f, "Medium"),
            RiskLevel::High => write!(f, "High"),
        }
    }
}

/// A registered mutual fund and the units currently held in it.
///
/// `units` starts at whatever was held when the fund was registered and is
/// moved by every recorded buy or sell (never below zero). `current_nav` is
/// refreshed externally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fund {
    /// Unique identifier
    pub id: Uuid,

    /// Display name (e.g., "HDFC Top 100 Fund")
    pub name: String,

    pub category: FundCategory,

    /// Asset management company (e.g., "HDFC Mutual Fund")
    pub fund_house: String,

    /// Latest net asset value per unit (> 0)
    pub current_nav: f64,

    /// Units held (>= 0)
    pub units: f64,

    pub risk_level: RiskLevel,

    /// Optional scheme code (e.g., "HDFC100")
    #[serde(default)]
    pub fund_code: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// Date the fund was registered
    #[serde(default)]
    pub date_added: Option<NaiveDate>,
}

impl Fund {
    /// Register a new fund with zero units.
    pub fn new(
        name: impl Into<String>,
        category: FundCategory,
        fund_house: impl Into<String>,
        current_nav: f64,
        risk_level: RiskLevel,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            category,
            fund_house: fund_house.into(),
            current_nav,
            units: 0.0,
            risk_level,
            fund_code: None,
            description: None,
            date_added: Some(chrono::Utc::now().date_naive()),
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.fund_code = Some(code.into());
        self
    }
}

impl Entity for Fund {
    const COLLECTION: Collection = Collection::Funds;

    fn id(&self) -> Uuid {
        self.id
    }
}
