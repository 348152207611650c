use serde::{Deserialize, Serialize};

use super::transaction::TransactionType;

/// Calendar bucket used when grouping flows over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Granularity {
    /// "2024-01"
    Month,
    /// "2024-Q1"
    Quarter,
    /// "2024"
    Year,
}

/// How flows inside one period are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AggregationMode {
    /// One bucket per period: buys minus sells
    Net,
    /// One bucket per (period, direction) observed
    ByType,
}

/// A summed bucket of flows for a period.
///
/// The core generates these; the frontend only renders them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSum {
    /// Period label (e.g., "2024-01")
    pub period: String,

    /// `None` in net mode, the bucket's direction in by-type mode
    pub transaction_type: Option<TransactionType>,

    pub sum: f64,
}

/// Buy/sell/net totals of one month, for the activity chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyActivity {
    /// "YYYY-MM"
    pub period: String,

    pub buy: f64,

    pub sell: f64,

    /// buy − sell
    pub net: f64,
}
