use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::deposit::{DepositKind, DepositStatus};
use super::fund::FundCategory;

/// Gain over a cost basis, as an amount and a percentage of that basis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AbsoluteReturn {
    pub amount: f64,

    /// `amount / invested * 100`, or 0 when nothing was invested
    pub percent: f64,
}

/// Profit/loss of a fund against its net invested amount.
pub type ProfitLoss = AbsoluteReturn;

/// Whole-portfolio totals shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioTotals {
    /// Σ units × NAV over all funds
    pub total_value: f64,

    /// Σ buys − Σ sells over all transactions
    pub total_invested: f64,

    /// total_value − total_invested
    pub profit_loss: f64,

    /// profit_loss / total_invested × 100 (0 when total_invested <= 0)
    pub profit_loss_pct: f64,

    pub fund_count: usize,
}

/// One row of the holdings table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingSummary {
    pub fund_id: Uuid,

    pub fund_name: String,

    pub category: FundCategory,

    pub units: f64,

    pub current_nav: f64,

    /// units × current_nav
    pub current_value: f64,

    /// Buys minus sells for this fund
    pub net_invested: f64,

    /// net_invested / units
    pub average_cost: f64,

    pub profit_loss: f64,

    pub profit_loss_pct: f64,

    /// This fund's value / total holdings value × 100
    pub allocation_pct: f64,
}

/// Return of a single fund, for side-by-side comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundPerformance {
    pub fund_id: Uuid,

    pub fund_name: String,

    pub return_pct: f64,

    pub current_value: f64,
}

/// Result of the lump-sum returns calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnSummary {
    /// Initial plus additional investments
    pub total_invested: f64,

    pub current_value: f64,

    pub absolute_return: f64,

    pub absolute_return_pct: f64,

    /// Compound annual growth rate in percent
    pub cagr: f64,
}

/// Result of the SIP future-value calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SipProjection {
    pub total_invested: f64,

    pub future_value: f64,

    /// future_value − total_invested
    pub gain: f64,

    /// gain / total_invested × 100 (0 when nothing is invested)
    pub gain_pct: f64,
}

/// One year of a SIP projection schedule (cumulative figures).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SipYearPoint {
    /// 1-based year number
    pub year: u32,

    /// Monthly installment during this year (after step-up)
    pub monthly_installment: f64,

    pub cumulative_invested: f64,

    pub projected_value: f64,
}

/// Estimated maturity of a bank deposit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepositMaturity {
    pub deposit_id: Uuid,

    pub name: String,

    pub kind: DepositKind,

    pub status: DepositStatus,

    pub maturity_date: NaiveDate,

    /// Tenure in years (days / 365.25)
    pub tenure_years: f64,

    pub maturity_value: f64,
}

/// Progress of a financial plan towards its target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanProgress {
    pub plan_id: Uuid,

    pub name: String,

    /// current / target × 100 (0 when target <= 0)
    pub progress_pct: f64,

    /// Amount still needed (never negative)
    pub remaining: f64,

    /// Estimated date the target is reached, when it can be projected
    pub projected_completion: Option<NaiveDate>,
}

/// Everything the dashboard page needs in one call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub as_of_date: NaiveDate,

    pub totals: PortfolioTotals,

    /// Monthly outflow of all active SIPs
    pub active_sip_monthly: f64,

    /// Principal locked in active deposits
    pub active_deposit_principal: f64,

    pub active_plans: usize,

    /// Most recent transactions first, capped at `Settings::recent_transactions`
    pub recent_transactions: Vec<super::transaction::Transaction>,

    /// Fund value share for the allocation chart, largest first
    pub allocation: Vec<(String, f64)>,
}
