use crate::errors::CoreError;
use crate::models::deposit::{Deposit, DepositStatus};
use crate::models::fund::Fund;
use crate::models::monthly::MonthlyInvestment;
use crate::models::plan::{FinancialPlan, PlanStatus};
use crate::models::sip::{Sip, SipStatus};
use crate::models::transaction::{Transaction, TransactionType};

/// Validates records before they are written and enforces status
/// transitions and fund unit bookkeeping.
///
/// Pure business logic; the caller persists whatever this approves.
pub struct LifecycleService;

impl LifecycleService {
    pub fn new() -> Self {
        Self
    }

    pub fn validate_fund(&self, fund: &Fund) -> Result<(), CoreError> {
        require_text("Fund name", &fund.name)?;
        require_positive("Current NAV", fund.current_nav)?;
        if !fund.units.is_finite() || fund.units < 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Units held must not be negative, got {}",
                fund.units
            )));
        }
        Ok(())
    }

    /// Rules:
    /// - amount, units and NAV must be positive
    /// - the referenced fund must be registered
    pub fn validate_transaction(&self, transaction: &Transaction, funds: &[Fund]) -> Result<(), CoreError> {
        require_positive("Transaction amount", transaction.amount)?;
        require_positive("Transaction units", transaction.units)?;
        require_positive("NAV at transaction", transaction.nav)?;
        if !funds.iter().any(|f| f.id == transaction.fund_id) {
            return Err(CoreError::ValidationError(format!(
                "Transaction references unknown fund {}",
                transaction.fund_id
            )));
        }
        Ok(())
    }

    /// Move a transaction's units into or out of its fund. Selling more than
    /// is held empties the fund instead of going negative.
    pub fn apply_transaction(&self, fund: &mut Fund, transaction: &Transaction) -> Result<(), CoreError> {
        if fund.id != transaction.fund_id {
            return Err(CoreError::ValidationError(format!(
                "Transaction {} belongs to fund {}, not {}",
                transaction.id, transaction.fund_id, fund.id
            )));
        }
        require_positive("Transaction units", transaction.units)?;

        fund.units = match transaction.transaction_type {
            TransactionType::Buy => fund.units + transaction.units,
            TransactionType::Sell => (fund.units - transaction.units).max(0.0),
        };
        Ok(())
    }

    pub fn validate_sip(&self, sip: &Sip, funds: &[Fund]) -> Result<(), CoreError> {
        require_text("SIP name", &sip.name)?;
        require_positive("SIP amount", sip.amount)?;
        if let Some(end) = sip.end_date {
            if end < sip.start_date {
                return Err(CoreError::ValidationError(format!(
                    "SIP end date {end} is before start date {}",
                    sip.start_date
                )));
            }
        }
        if !funds.iter().any(|f| f.id == sip.fund_id) {
            return Err(CoreError::ValidationError(format!(
                "SIP references unknown fund {}",
                sip.fund_id
            )));
        }
        Ok(())
    }

    pub fn validate_deposit(&self, deposit: &Deposit) -> Result<(), CoreError> {
        require_text("Deposit name", &deposit.name)?;
        require_text("Bank", &deposit.bank)?;
        require_positive("Deposit amount", deposit.amount)?;
        require_positive("Interest rate", deposit.interest_rate)?;
        if deposit.maturity_date < deposit.start_date {
            return Err(CoreError::ValidationError(format!(
                "Maturity date {} is before start date {}",
                deposit.maturity_date, deposit.start_date
            )));
        }
        Ok(())
    }

    pub fn validate_plan(&self, plan: &FinancialPlan) -> Result<(), CoreError> {
        require_text("Plan name", &plan.name)?;
        require_positive("Target amount", plan.target_amount)?;
        require_non_negative("Current amount", plan.current_amount)?;
        require_non_negative("Monthly investment", plan.monthly_investment)?;
        require_non_negative("Expected return", plan.expected_return)?;
        Ok(())
    }

    pub fn validate_monthly_investment(&self, entry: &MonthlyInvestment) -> Result<(), CoreError> {
        require_positive("Investment amount", entry.amount)
    }

    pub fn check_sip_transition(&self, from: SipStatus, to: SipStatus) -> Result<(), CoreError> {
        if from.can_transition_to(to) {
            Ok(())
        } else {
            Err(CoreError::ValidationError(format!(
                "SIP cannot move from {from} to {to}"
            )))
        }
    }

    pub fn check_deposit_transition(&self, from: DepositStatus, to: DepositStatus) -> Result<(), CoreError> {
        if from.can_transition_to(to) {
            Ok(())
        } else {
            Err(CoreError::ValidationError(format!(
                "Deposit cannot move from {from} to {to}"
            )))
        }
    }

    pub fn check_plan_transition(&self, from: PlanStatus, to: PlanStatus) -> Result<(), CoreError> {
        if from.can_transition_to(to) {
            Ok(())
        } else {
            Err(CoreError::ValidationError(format!(
                "Plan cannot move from {from} to {to}"
            )))
        }
    }
}

impl Default for LifecycleService {
    fn default() -> Self {
        Self::new()
    }
}

fn require_text(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::ValidationError(format!("{field} is required")));
    }
    Ok(())
}

fn require_positive(field: &str, value: f64) -> Result<(), CoreError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CoreError::ValidationError(format!(
            "{field} must be positive, got {value}"
        )));
    }
    Ok(())
}

fn require_non_negative(field: &str, value: f64) -> Result<(), CoreError> {
    if !value.is_finite() || value < 0.0 {
        return Err(CoreError::ValidationError(format!(
            "{field} must not be negative, got {value}"
        )));
    }
    Ok(())
}
