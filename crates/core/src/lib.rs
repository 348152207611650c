pub mod errors;
pub mod models;
pub mod services;
pub mod storage;

use chrono::NaiveDate;
use models::{
    analytics::{
        DashboardSummary, DepositMaturity, FundPerformance, HoldingSummary, PlanProgress,
        ReturnSummary, SipProjection, SipYearPoint,
    },
    chart::{AggregationMode, Granularity, MonthlyActivity, PeriodSum},
    deposit::{Deposit, DepositKind, DepositStatus},
    fund::Fund,
    monthly::{InvestmentType, MonthlyInvestment},
    plan::{FinancialPlan, PlanStatus},
    settings::Settings,
    sip::{Sip, SipStatus},
    transaction::{Transaction, TransactionType},
};
use serde_json::{json, Value};
use services::{
    aggregation_service::AggregationService, lifecycle_service::LifecycleService,
    plan_service::PlanService, returns_service::ReturnsService,
    valuation_service::ValuationService,
};
use std::collections::BTreeMap;
use storage::{
    config::StoreConfig,
    records::{self, Entity},
    traits::RecordStore,
};
use uuid::Uuid;

use errors::CoreError;

/// Main entry point for the Optivest core library.
///
/// Every handler reads fresh records from the store, so several frontends
/// (or a hand-edited spreadsheet) can share one store. Nothing is cached.
#[must_use]
pub struct Optivest {
    store: Box<dyn RecordStore>,
    settings: Settings,
    returns_service: ReturnsService,
    aggregation_service: AggregationService,
    valuation_service: ValuationService,
    plan_service: PlanService,
    lifecycle_service: LifecycleService,
}

impl std::fmt::Debug for Optivest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Optivest")
            .field("store", &self.store.name())
            .field("settings", &self.settings)
            .finish()
    }
}

impl Optivest {
    pub fn new(store: Box<dyn RecordStore>) -> Self {
        log::debug!("Optivest using {} store", store.name());
        Self {
            store,
            settings: Settings::default(),
            returns_service: ReturnsService::new(),
            aggregation_service: AggregationService::new(),
            valuation_service: ValuationService::new(),
            plan_service: PlanService::new(),
            lifecycle_service: LifecycleService::new(),
        }
    }

    /// Build the store described by `config` and wrap it.
    pub fn from_config(config: &StoreConfig) -> Result<Self, CoreError> {
        Ok(Self::new(config.build()?))
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    #[must_use]
    pub fn store_name(&self) -> &str {
        self.store.name()
    }

    // ── Store helpers ───────────────────────────────────────────────

    async fn load<T: Entity>(&self) -> Result<Vec<T>, CoreError> {
        let rows = self.store.read_all(T::COLLECTION).await?;
        Ok(records::decode_all(rows))
    }

    async fn find<T: Entity>(&self, id: Uuid) -> Result<T, CoreError> {
        self.load::<T>()
            .await?
            .into_iter()
            .find(|item| item.id() == id)
            .ok_or_else(|| CoreError::not_found(T::COLLECTION, id))
    }

    async fn insert<T: Entity>(&self, entity: &T) -> Result<Uuid, CoreError> {
        let record = records::to_record(entity)?;
        self.store.append_record(T::COLLECTION, record).await?;
        log::info!("Added {} record {}", T::COLLECTION, entity.id());
        Ok(entity.id())
    }

    async fn patch<T: Entity>(&self, id: Uuid, field: &str, value: Value) -> Result<(), CoreError> {
        let fields = records::fields([(field, value)]);
        self.store
            .update_record(T::COLLECTION, &id.to_string(), fields)
            .await
    }

    async fn remove<T: Entity>(&self, id: Uuid) -> Result<(), CoreError> {
        self.store
            .delete_record(T::COLLECTION, &id.to_string())
            .await?;
        log::info!("Deleted {} record {id}", T::COLLECTION);
        Ok(())
    }

    // ── Funds ───────────────────────────────────────────────────────

    pub async fn register_fund(&self, fund: Fund) -> Result<Uuid, CoreError> {
        self.lifecycle_service.validate_fund(&fund)?;
        self.insert(&fund).await
    }

    pub async fn list_funds(&self) -> Result<Vec<Fund>, CoreError> {
        self.load().await
    }

    /// Set a fund's latest NAV.
    pub async fn update_nav(&self, fund_id: Uuid, nav: f64) -> Result<(), CoreError> {
        if !nav.is_finite() || nav <= 0.0 {
            return Err(CoreError::ValidationError(format!(
                "NAV must be positive, got {nav}"
            )));
        }
        self.patch::<Fund>(fund_id, "current_nav", json!(nav)).await
    }

    /// Delete a fund together with its transactions. Refused while a SIP
    /// still invests into it.
    pub async fn delete_fund(&self, fund_id: Uuid) -> Result<(), CoreError> {
        let sips: Vec<Sip> = self.load().await?;
        if let Some(sip) = sips
            .iter()
            .find(|s| s.fund_id == fund_id && !s.status.is_terminal())
        {
            return Err(CoreError::ValidationError(format!(
                "Fund is still used by SIP '{}'",
                sip.name
            )));
        }

        self.find::<Fund>(fund_id).await?;
        let transactions: Vec<Transaction> = self.load().await?;
        for txn in transactions.iter().filter(|t| t.fund_id == fund_id) {
            self.remove::<Transaction>(txn.id).await?;
        }
        self.remove::<Fund>(fund_id).await
    }

    // ── Transactions ────────────────────────────────────────────────

    /// Record a buy/sell and move its units into or out of the fund.
    pub async fn record_transaction(&self, transaction: Transaction) -> Result<Uuid, CoreError> {
        let funds: Vec<Fund> = self.load().await?;
        self.lifecycle_service
            .validate_transaction(&transaction, &funds)?;

        let mut fund = funds
            .into_iter()
            .find(|f| f.id == transaction.fund_id)
            .ok_or_else(|| CoreError::not_found(Fund::COLLECTION, transaction.fund_id))?;
        if transaction.transaction_type == TransactionType::Sell && transaction.units > fund.units {
            log::warn!(
                "Selling {} units of '{}' but only {} are held; units clamp at zero",
                transaction.units,
                fund.name,
                fund.units
            );
        }
        self.lifecycle_service
            .apply_transaction(&mut fund, &transaction)?;

        let id = self.insert(&transaction).await?;
        self.patch::<Fund>(fund.id, "units", json!(fund.units)).await?;
        Ok(id)
    }

    /// Delete a transaction and undo its effect on the fund's units.
    pub async fn delete_transaction(&self, transaction_id: Uuid) -> Result<(), CoreError> {
        let transaction: Transaction = self.find(transaction_id).await?;
        self.remove::<Transaction>(transaction_id).await?;

        match self.find::<Fund>(transaction.fund_id).await {
            Ok(fund) => {
                let units = match transaction.transaction_type {
                    TransactionType::Buy => (fund.units - transaction.units).max(0.0),
                    TransactionType::Sell => fund.units + transaction.units,
                };
                self.patch::<Fund>(fund.id, "units", json!(units)).await
            }
            Err(CoreError::RecordNotFound { .. }) => {
                log::warn!("Deleted transaction {transaction_id} of unknown fund {}", transaction.fund_id);
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Transactions newest-first, optionally only those of one fund.
    pub async fn list_transactions(&self, fund_id: Option<Uuid>) -> Result<Vec<Transaction>, CoreError> {
        let mut transactions: Vec<Transaction> = self.load().await?;
        if let Some(fund_id) = fund_id {
            transactions.retain(|t| t.fund_id == fund_id);
        }
        transactions.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(transactions)
    }

    // ── SIPs ────────────────────────────────────────────────────────

    pub async fn add_sip(&self, sip: Sip) -> Result<Uuid, CoreError> {
        let funds: Vec<Fund> = self.load().await?;
        self.lifecycle_service.validate_sip(&sip, &funds)?;
        self.insert(&sip).await
    }

    pub async fn list_sips(&self) -> Result<Vec<Sip>, CoreError> {
        self.load().await
    }

    /// Pause, resume or complete a SIP.
    pub async fn set_sip_status(&self, sip_id: Uuid, status: SipStatus) -> Result<(), CoreError> {
        let sip: Sip = self.find(sip_id).await?;
        self.lifecycle_service
            .check_sip_transition(sip.status, status)?;
        self.patch::<Sip>(sip_id, "status", serde_json::to_value(status)?)
            .await
    }

    // ── Fixed / recurring deposits ──────────────────────────────────

    pub async fn add_deposit(&self, deposit: Deposit) -> Result<Uuid, CoreError> {
        self.lifecycle_service.validate_deposit(&deposit)?;
        self.insert(&deposit).await
    }

    pub async fn list_deposits(&self) -> Result<Vec<Deposit>, CoreError> {
        self.load().await
    }

    /// Mark a deposit matured or prematurely closed.
    pub async fn set_deposit_status(&self, deposit_id: Uuid, status: DepositStatus) -> Result<(), CoreError> {
        let deposit: Deposit = self.find(deposit_id).await?;
        self.lifecycle_service
            .check_deposit_transition(deposit.status, status)?;
        self.patch::<Deposit>(deposit_id, "status", serde_json::to_value(status)?)
            .await
    }

    /// Maturity value of every deposit, soonest maturity first. Deposits with
    /// out-of-range dates or rates are left out.
    pub async fn deposit_maturities(&self) -> Result<Vec<DepositMaturity>, CoreError> {
        let deposits: Vec<Deposit> = self.load().await?;
        let mut rows: Vec<DepositMaturity> = deposits
            .iter()
            .filter_map(|deposit| match self.deposit_maturity(deposit) {
                Ok(row) => Some(row),
                Err(e) => {
                    log::warn!("Skipping deposit {} in maturity view: {e}", deposit.id);
                    None
                }
            })
            .collect();
        rows.sort_by_key(|row| row.maturity_date);
        Ok(rows)
    }

    fn deposit_maturity(&self, deposit: &Deposit) -> Result<DepositMaturity, CoreError> {
        let tenure_years = self
            .returns_service
            .tenure_years(deposit.start_date, deposit.maturity_date)?;
        let maturity_value = match deposit.kind {
            DepositKind::Fixed => self.returns_service.fd_maturity_value(
                deposit.amount,
                deposit.interest_rate,
                tenure_years,
            )?,
            DepositKind::Recurring => self.returns_service.rd_maturity_value(
                deposit.amount,
                deposit.interest_rate,
                tenure_years,
            )?,
        };

        Ok(DepositMaturity {
            deposit_id: deposit.id,
            name: deposit.name.clone(),
            kind: deposit.kind,
            status: deposit.status,
            maturity_date: deposit.maturity_date,
            tenure_years,
            maturity_value,
        })
    }

    // ── Financial plans ─────────────────────────────────────────────

    pub async fn add_plan(&self, plan: FinancialPlan) -> Result<Uuid, CoreError> {
        self.lifecycle_service.validate_plan(&plan)?;
        self.insert(&plan).await
    }

    pub async fn list_plans(&self) -> Result<Vec<FinancialPlan>, CoreError> {
        self.load().await
    }

    /// Progress of every active plan as of `today`. Plans whose stored values
    /// cannot be projected are left out.
    pub async fn plan_progress(&self, today: NaiveDate) -> Result<Vec<PlanProgress>, CoreError> {
        let plans: Vec<FinancialPlan> = self.load().await?;
        Ok(plans
            .iter()
            .filter(|p| p.status == PlanStatus::Active)
            .filter_map(|p| match self.plan_service.plan_progress(p, today) {
                Ok(progress) => Some(progress),
                Err(e) => {
                    log::warn!("Skipping plan {} in progress view: {e}", p.id);
                    None
                }
            })
            .collect())
    }

    /// Record how much has been saved towards a plan so far.
    pub async fn update_plan_amount(&self, plan_id: Uuid, current_amount: f64) -> Result<(), CoreError> {
        if !current_amount.is_finite() || current_amount < 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Current amount must not be negative, got {current_amount}"
            )));
        }
        self.find::<FinancialPlan>(plan_id).await?;
        self.patch::<FinancialPlan>(plan_id, "current_amount", json!(current_amount))
            .await
    }

    pub async fn complete_plan(&self, plan_id: Uuid) -> Result<(), CoreError> {
        let plan: FinancialPlan = self.find(plan_id).await?;
        self.lifecycle_service
            .check_plan_transition(plan.status, PlanStatus::Completed)?;
        self.patch::<FinancialPlan>(plan_id, "status", serde_json::to_value(PlanStatus::Completed)?)
            .await
    }

    // ── Monthly investments ─────────────────────────────────────────

    pub async fn add_monthly_investment(&self, entry: MonthlyInvestment) -> Result<Uuid, CoreError> {
        self.lifecycle_service.validate_monthly_investment(&entry)?;
        self.insert(&entry).await
    }

    /// Monthly investments newest-first.
    pub async fn list_monthly_investments(&self) -> Result<Vec<MonthlyInvestment>, CoreError> {
        let mut entries: Vec<MonthlyInvestment> = self.load().await?;
        entries.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(entries)
    }

    /// Total invested per investment type.
    pub async fn monthly_summary_by_type(&self) -> Result<BTreeMap<InvestmentType, f64>, CoreError> {
        let entries: Vec<MonthlyInvestment> = self.load().await?;
        Ok(self
            .aggregation_service
            .group_sum_by_key(&entries, |e| e.investment_type))
    }

    /// Monthly investments summed per period.
    pub async fn monthly_investment_trend(&self, granularity: Granularity) -> Result<Vec<PeriodSum>, CoreError> {
        let entries: Vec<MonthlyInvestment> = self.load().await?;
        let series = self
            .aggregation_service
            .group_sum_by_period(&entries, granularity, AggregationMode::Net);
        Ok(self.aggregation_service.fill_gaps(&series, granularity))
    }

    // ── Analytics ───────────────────────────────────────────────────

    /// Headline figures for the dashboard page.
    pub async fn dashboard(&self, today: NaiveDate) -> Result<DashboardSummary, CoreError> {
        let funds: Vec<Fund> = self.load().await?;
        let transactions = self.list_transactions(None).await?;
        let sips: Vec<Sip> = self.load().await?;
        let deposits: Vec<Deposit> = self.load().await?;
        let plans: Vec<FinancialPlan> = self.load().await?;

        let totals = self.valuation_service.portfolio_totals(&funds, &transactions);
        let active_sip_monthly: f64 = sips
            .iter()
            .filter(|s| s.status == SipStatus::Active)
            .map(Sip::monthly_outflow)
            .sum();
        let active_deposit_principal: f64 = deposits
            .iter()
            .filter(|d| d.status == DepositStatus::Active)
            .map(|d| d.amount)
            .sum();
        let active_plans = plans
            .iter()
            .filter(|p| p.status == PlanStatus::Active)
            .count();
        let allocation: Vec<(String, f64)> = self
            .valuation_service
            .allocation_by_category(&funds)
            .into_iter()
            .filter(|(_, value)| *value > 0.0)
            .map(|(category, value)| (category.to_string(), value))
            .collect();
        let recent_transactions: Vec<Transaction> = transactions
            .into_iter()
            .filter(|t| t.date <= today)
            .take(self.settings.recent_transactions)
            .collect();

        Ok(DashboardSummary {
            as_of_date: today,
            totals,
            active_sip_monthly,
            active_deposit_principal,
            active_plans,
            recent_transactions,
            allocation,
        })
    }

    pub async fn holdings(&self) -> Result<Vec<HoldingSummary>, CoreError> {
        let funds: Vec<Fund> = self.load().await?;
        let transactions: Vec<Transaction> = self.load().await?;
        Ok(self.valuation_service.holdings(&funds, &transactions))
    }

    pub async fn fund_performance(&self) -> Result<Vec<FundPerformance>, CoreError> {
        let funds: Vec<Fund> = self.load().await?;
        let transactions: Vec<Transaction> = self.load().await?;
        Ok(self.valuation_service.fund_performance(&funds, &transactions))
    }

    /// Buy/sell/net per month over all fund transactions.
    pub async fn monthly_activity(&self) -> Result<Vec<MonthlyActivity>, CoreError> {
        let transactions: Vec<Transaction> = self.load().await?;
        Ok(self.aggregation_service.monthly_activity(&transactions))
    }

    /// Fund transactions summed per period, for the investment trend chart.
    pub async fn transaction_trend(
        &self,
        granularity: Granularity,
        mode: AggregationMode,
    ) -> Result<Vec<PeriodSum>, CoreError> {
        let transactions: Vec<Transaction> = self.load().await?;
        let series = self
            .aggregation_service
            .group_sum_by_period(&transactions, granularity, mode);
        Ok(match mode {
            AggregationMode::Net => self.aggregation_service.fill_gaps(&series, granularity),
            AggregationMode::ByType => series,
        })
    }

    // ── Calculators ─────────────────────────────────────────────────

    /// SIP calculator: final projection plus the year-by-year schedule.
    pub fn sip_calculator(
        &self,
        monthly_amount: f64,
        annual_rate_pct: f64,
        duration_years: u32,
        annual_step_up_pct: f64,
    ) -> Result<(SipProjection, Vec<SipYearPoint>), CoreError> {
        let projection = self.returns_service.sip_future_value(
            monthly_amount,
            annual_rate_pct,
            duration_years,
            annual_step_up_pct,
        )?;
        let schedule = self.returns_service.sip_schedule(
            monthly_amount,
            annual_rate_pct,
            duration_years,
            annual_step_up_pct,
        )?;
        Ok((projection, schedule))
    }

    /// Lump-sum returns calculator.
    pub fn returns_calculator(
        &self,
        initial_investment: f64,
        additional_investment: f64,
        current_value: f64,
        years: f64,
    ) -> Result<ReturnSummary, CoreError> {
        self.returns_service.lump_sum_returns(
            initial_investment,
            additional_investment,
            current_value,
            years,
        )
    }
}
