use std::collections::BTreeMap;
use uuid::Uuid;

use crate::models::analytics::{FundPerformance, HoldingSummary, PortfolioTotals, ProfitLoss};
use crate::models::fund::{Fund, FundCategory};
use crate::models::transaction::{Transaction, TransactionType};
use crate::services::aggregation_service::{AggregationService, Flow};

/// Values fund holdings against their transaction history: current value,
/// net invested, average cost, profit/loss and allocation.
///
/// Cost basis is net cash: buys minus sells. Sell proceeds reduce the amount
/// invested rather than being booked as realized gains.
pub struct ValuationService {
    aggregation_service: AggregationService,
}

impl ValuationService {
    pub fn new() -> Self {
        Self {
            aggregation_service: AggregationService::new(),
        }
    }

    /// `units × current_nav`.
    pub fn current_value(&self, fund: &Fund) -> f64 {
        fund.units * fund.current_nav
    }

    /// Buys minus sells over the transactions of one fund.
    pub fn net_invested(&self, fund_id: Uuid, transactions: &[Transaction]) -> f64 {
        transactions
            .iter()
            .filter(|t| t.fund_id == fund_id)
            .map(Flow::signed_amount)
            .sum()
    }

    /// Net invested per unit held, 0 when no units are held.
    pub fn average_cost(&self, fund_id: Uuid, transactions: &[Transaction], units_held: f64) -> f64 {
        if units_held > 0.0 {
            self.net_invested(fund_id, transactions) / units_held
        } else {
            0.0
        }
    }

    /// Current value minus net invested; the percentage is 0 when net invested <= 0.
    pub fn profit_loss(&self, fund: &Fund, transactions: &[Transaction]) -> ProfitLoss {
        let net_invested = self.net_invested(fund.id, transactions);
        let amount = self.current_value(fund) - net_invested;
        let percent = if net_invested > 0.0 {
            amount / net_invested * 100.0
        } else {
            0.0
        };
        ProfitLoss { amount, percent }
    }

    /// Totals over every fund and every transaction.
    pub fn portfolio_totals(&self, funds: &[Fund], transactions: &[Transaction]) -> PortfolioTotals {
        let total_value: f64 = funds.iter().map(|f| self.current_value(f)).sum();
        let total_invested = self.aggregation_service.net_amount(transactions);
        let profit_loss = total_value - total_invested;
        let profit_loss_pct = if total_invested > 0.0 {
            profit_loss / total_invested * 100.0
        } else {
            0.0
        };

        PortfolioTotals {
            total_value,
            total_invested,
            profit_loss,
            profit_loss_pct,
            fund_count: funds.len(),
        }
    }

    /// Units a fund should hold according to its transactions:
    /// `max(0, Σ buy.units − Σ sell.units)`.
    pub fn units_balance(&self, fund_id: Uuid, transactions: &[Transaction]) -> f64 {
        let net: f64 = transactions
            .iter()
            .filter(|t| t.fund_id == fund_id)
            .map(|t| match t.transaction_type {
                TransactionType::Buy => t.units,
                TransactionType::Sell => -t.units,
            })
            .sum();
        net.max(0.0)
    }

    /// Holdings table: one row per fund with units > 0, largest allocation first.
    pub fn holdings(&self, funds: &[Fund], transactions: &[Transaction]) -> Vec<HoldingSummary> {
        let held: Vec<&Fund> = funds.iter().filter(|f| f.units > 0.0).collect();
        let total_value: f64 = held.iter().map(|f| self.current_value(f)).sum();

        let mut rows: Vec<HoldingSummary> = held
            .into_iter()
            .map(|fund| {
                let current_value = self.current_value(fund);
                let net_invested = self.net_invested(fund.id, transactions);
                let pl = self.profit_loss(fund, transactions);
                HoldingSummary {
                    fund_id: fund.id,
                    fund_name: fund.name.clone(),
                    category: fund.category,
                    units: fund.units,
                    current_nav: fund.current_nav,
                    current_value,
                    net_invested,
                    average_cost: self.average_cost(fund.id, transactions, fund.units),
                    profit_loss: pl.amount,
                    profit_loss_pct: pl.percent,
                    allocation_pct: if total_value > 0.0 {
                        current_value / total_value * 100.0
                    } else {
                        0.0
                    },
                }
            })
            .collect();

        rows.sort_by(|a, b| {
            b.allocation_pct
                .partial_cmp(&a.allocation_pct)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        rows
    }

    /// Return percentage of every fund with units held and positive net
    /// investment, best performer first.
    pub fn fund_performance(&self, funds: &[Fund], transactions: &[Transaction]) -> Vec<FundPerformance> {
        let mut rows: Vec<FundPerformance> = funds
            .iter()
            .filter(|f| f.units > 0.0)
            .filter(|f| self.net_invested(f.id, transactions) > 0.0)
            .map(|fund| FundPerformance {
                fund_id: fund.id,
                fund_name: fund.name.clone(),
                return_pct: self.profit_loss(fund, transactions).percent,
                current_value: self.current_value(fund),
            })
            .collect();

        rows.sort_by(|a, b| {
            b.return_pct
                .partial_cmp(&a.return_pct)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        rows
    }

    /// Current value per fund category.
    pub fn allocation_by_category(&self, funds: &[Fund]) -> BTreeMap<FundCategory, f64> {
        let mut allocation = BTreeMap::new();
        for fund in funds {
            *allocation.entry(fund.category).or_insert(0.0) += self.current_value(fund);
        }
        allocation
    }
}

impl Default for ValuationService {
    fn default() -> Self {
        Self::new()
    }
}
