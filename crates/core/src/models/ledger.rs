use serde::{Deserialize, Serialize};

use super::deposit::Deposit;
use super::fund::Fund;
use super::monthly::MonthlyInvestment;
use super::plan::FinancialPlan;
use super::settings::Settings;
use super::sip::Sip;
use super::transaction::Transaction;

/// The local data container. Everything in here gets serialized,
/// encrypted, and saved to the portable .optv file.
///
/// One vector per record collection, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    pub funds: Vec<Fund>,

    pub transactions: Vec<Transaction>,

    pub sips: Vec<Sip>,

    pub deposits: Vec<Deposit>,

    pub plans: Vec<FinancialPlan>,

    pub monthly_investments: Vec<MonthlyInvestment>,

    /// User settings (currency symbol, ...)
    pub settings: Settings,
}

impl Ledger {
    /// Total number of records across all collections.
    pub fn record_count(&self) -> usize {
        self.funds.len()
            + self.transactions.len()
            + self.sips.len()
            + self.deposits.len()
            + self.plans.len()
            + self.monthly_investments.len()
    }
}
