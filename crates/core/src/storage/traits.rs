use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// A stored row: snake_case field name → value.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// The record collections the core reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Collection {
    Funds,
    Transactions,
    Sips,
    Deposits,
    FinancialPlans,
    MonthlyInvestments,
}

impl Collection {
    pub const ALL: [Collection; 6] = [
        Collection::Funds,
        Collection::Transactions,
        Collection::Sips,
        Collection::Deposits,
        Collection::FinancialPlans,
        Collection::MonthlyInvestments,
    ];

    /// Worksheet (tab) name used by spreadsheet-backed stores.
    pub fn worksheet(&self) -> &'static str {
        match self {
            Collection::Funds => "MutualFunds",
            Collection::Transactions => "Transactions",
            Collection::Sips => "SIPs",
            Collection::Deposits => "FD_RD",
            Collection::FinancialPlans => "FinancialPlans",
            Collection::MonthlyInvestments => "MonthlyInvestments",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.worksheet())
    }
}

/// Narrow read/write contract every storage backend implements.
///
/// Records are identified by their `id` field. Backends give no
/// cross-session consistency guarantees: the last write wins.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait RecordStore: Send + Sync {
    /// Human-readable name of this backend (for logs/errors).
    fn name(&self) -> &str;

    /// All records of a collection in stored order; empty when there are none.
    async fn read_all(&self, collection: Collection) -> Result<Vec<Record>, CoreError>;

    async fn append_record(&self, collection: Collection, record: Record) -> Result<(), CoreError>;

    /// Overwrite the given fields of the record whose `id` matches.
    async fn update_record(
        &self,
        collection: Collection,
        id: &str,
        fields: Record,
    ) -> Result<(), CoreError>;

    async fn delete_record(&self, collection: Collection, id: &str) -> Result<(), CoreError>;
}
