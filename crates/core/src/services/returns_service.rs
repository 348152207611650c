use chrono::{Duration, NaiveDate};

use crate::errors::CoreError;
use crate::models::analytics::{AbsoluteReturn, ReturnSummary, SipProjection, SipYearPoint};

/// Days per year used to turn a deposit's tenure into years.
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Days counted per projected month when estimating a completion date.
pub const DAYS_PER_PROJECTED_MONTH: f64 = 30.0;

/// Longest SIP the calculator projects.
pub const MAX_SIP_YEARS: u32 = 100;

/// Closed-form return formulas: CAGR, absolute return, FD/RD maturity,
/// SIP future value with annual step-up, goal completion projection.
///
/// Pure business logic with no I/O and no state. Rates are annual percentages
/// (`12.0` means 12%).
pub struct ReturnsService;

impl ReturnsService {
    pub fn new() -> Self {
        Self
    }

    /// Compound annual growth rate, in percent.
    ///
    /// Fails with `DivisionByZero` when `years <= 0` or `initial_value <= 0`.
    pub fn cagr(&self, initial_value: f64, final_value: f64, years: f64) -> Result<f64, CoreError> {
        ensure_finite("initial value", initial_value)?;
        ensure_finite("final value", final_value)?;
        ensure_finite("years", years)?;
        if years <= 0.0 {
            return Err(CoreError::DivisionByZero(format!(
                "CAGR needs a positive period, got {years} years"
            )));
        }
        if initial_value <= 0.0 {
            return Err(CoreError::DivisionByZero(format!(
                "CAGR needs a positive initial value, got {initial_value}"
            )));
        }
        ensure_non_negative("final value", final_value)?;

        Ok(((final_value / initial_value).powf(1.0 / years) - 1.0) * 100.0)
    }

    /// Absolute gain and its percentage of the amount invested.
    ///
    /// Nothing invested means nothing was at risk: the percentage is 0, not an error.
    pub fn absolute_return(
        &self,
        total_invested: f64,
        current_value: f64,
    ) -> Result<AbsoluteReturn, CoreError> {
        ensure_non_negative("total invested", total_invested)?;
        ensure_non_negative("current value", current_value)?;

        let amount = current_value - total_invested;
        let percent = if total_invested > 0.0 {
            amount / total_invested * 100.0
        } else {
            0.0
        };
        Ok(AbsoluteReturn { amount, percent })
    }

    /// Fixed deposit maturity, compounded annually:
    /// `principal × (1 + rate/100)^years`.
    pub fn fd_maturity_value(
        &self,
        principal: f64,
        annual_rate_pct: f64,
        years: f64,
    ) -> Result<f64, CoreError> {
        ensure_non_negative("principal", principal)?;
        ensure_rate("annual rate", annual_rate_pct)?;
        ensure_non_negative("years", years)?;

        Ok(principal * (1.0 + annual_rate_pct / 100.0).powf(years))
    }

    /// Recurring deposit maturity, monthly-compounding approximation:
    /// `principal × months × (1 + rate/100/12)^months` with `months = years × 12`.
    ///
    /// This is not the annuity formula banks use for RDs; every installment is
    /// compounded over the full tenure. Kept as-is so figures match the values
    /// users already have on record. `sip_future_value` is the annuity form.
    pub fn rd_maturity_value(
        &self,
        principal: f64,
        annual_rate_pct: f64,
        years: f64,
    ) -> Result<f64, CoreError> {
        ensure_non_negative("principal", principal)?;
        ensure_rate("annual rate", annual_rate_pct)?;
        ensure_non_negative("years", years)?;

        let months = years * 12.0;
        Ok(principal * months * (1.0 + annual_rate_pct / 100.0 / 12.0).powf(months))
    }

    /// Tenure between two dates in years (`days / 365.25`).
    pub fn tenure_years(&self, start: NaiveDate, maturity: NaiveDate) -> Result<f64, CoreError> {
        let days = (maturity - start).num_days();
        if days < 0 {
            return Err(CoreError::invalid(format!(
                "maturity date {maturity} is before start date {start}"
            )));
        }
        Ok(days as f64 / DAYS_PER_YEAR)
    }

    /// Future value of a SIP whose installment steps up once a year.
    ///
    /// Year `y` (0-based) pays `monthly × (1 + step_up/100)^y` per month; its
    /// twelve installments are summed and grown over the remaining
    /// `(duration − y) × 12` months with the ordinary-annuity factor
    /// `((1 + r)^n − 1) / r`, `r = rate/100/12`. At `r == 0` the factor is `n`.
    pub fn sip_future_value(
        &self,
        monthly_amount: f64,
        annual_rate_pct: f64,
        duration_years: u32,
        annual_step_up_pct: f64,
    ) -> Result<SipProjection, CoreError> {
        let schedule = self.sip_schedule(
            monthly_amount,
            annual_rate_pct,
            duration_years,
            annual_step_up_pct,
        )?;

        let (total_invested, future_value) = schedule
            .last()
            .map(|p| (p.cumulative_invested, p.projected_value))
            .unwrap_or((0.0, 0.0));
        let gain = future_value - total_invested;
        let gain_pct = if total_invested > 0.0 {
            gain / total_invested * 100.0
        } else {
            0.0
        };

        Ok(SipProjection {
            total_invested,
            future_value,
            gain,
            gain_pct,
        })
    }

    /// Year-by-year cumulative view of `sip_future_value`, for the projection chart.
    pub fn sip_schedule(
        &self,
        monthly_amount: f64,
        annual_rate_pct: f64,
        duration_years: u32,
        annual_step_up_pct: f64,
    ) -> Result<Vec<SipYearPoint>, CoreError> {
        ensure_non_negative("monthly amount", monthly_amount)?;
        ensure_rate("annual rate", annual_rate_pct)?;
        ensure_rate("annual step-up", annual_step_up_pct)?;
        if duration_years == 0 || duration_years > MAX_SIP_YEARS {
            return Err(CoreError::invalid(format!(
                "SIP duration must be between 1 and {MAX_SIP_YEARS} years, got {duration_years}"
            )));
        }

        let monthly_rate = annual_rate_pct / 100.0 / 12.0;
        let step_up = 1.0 + annual_step_up_pct / 100.0;

        let mut schedule = Vec::with_capacity(duration_years as usize);
        let mut cumulative_invested = 0.0;
        let mut projected_value = 0.0;

        for year in 0..duration_years {
            let installment = monthly_amount * step_up.powi(year as i32);
            let year_investment = installment * 12.0;
            let remaining_months = (f64::from(duration_years) - f64::from(year)) * 12.0;

            let year_fv = if monthly_rate == 0.0 {
                year_investment * remaining_months
            } else {
                year_investment * ((1.0 + monthly_rate).powf(remaining_months) - 1.0) / monthly_rate
            };

            cumulative_invested += year_investment;
            projected_value += year_fv;
            schedule.push(SipYearPoint {
                year: year + 1,
                monthly_installment: installment,
                cumulative_invested,
                projected_value,
            });
        }

        Ok(schedule)
    }

    /// Lump-sum returns calculator: combines an initial and an additional
    /// investment and reports absolute return and CAGR against `current_value`.
    pub fn lump_sum_returns(
        &self,
        initial_investment: f64,
        additional_investment: f64,
        current_value: f64,
        years: f64,
    ) -> Result<ReturnSummary, CoreError> {
        ensure_non_negative("additional investment", additional_investment)?;
        let total_invested = initial_investment + additional_investment;
        let absolute = self.absolute_return(total_invested, current_value)?;
        let cagr = self.cagr(total_invested, current_value, years)?;

        Ok(ReturnSummary {
            total_invested,
            current_value,
            absolute_return: absolute.amount,
            absolute_return_pct: absolute.percent,
            cagr,
        })
    }

    /// Estimate when a goal is reached by compounding `current_amount` monthly:
    /// `months = ln(target/current) / ln(1 + rate/100/12)`, counted as 30-day
    /// months from `today`.
    ///
    /// The logarithm is undefined without a positive current amount and rate,
    /// so those inputs (and a non-positive contribution) are rejected with
    /// `InvalidProjection`. A target already reached projects to `today`.
    pub fn projected_completion_date(
        &self,
        target_amount: f64,
        current_amount: f64,
        monthly_contribution: f64,
        annual_rate_pct: f64,
        today: NaiveDate,
    ) -> Result<NaiveDate, CoreError> {
        ensure_finite("target amount", target_amount)?;
        if current_amount.is_nan() || current_amount <= 0.0 {
            return Err(CoreError::InvalidProjection(
                "current amount must be positive".into(),
            ));
        }
        if monthly_contribution.is_nan() || monthly_contribution <= 0.0 {
            return Err(CoreError::InvalidProjection(
                "monthly contribution must be positive".into(),
            ));
        }
        if annual_rate_pct.is_nan() || annual_rate_pct <= 0.0 {
            return Err(CoreError::InvalidProjection(
                "expected return must be positive".into(),
            ));
        }
        if target_amount <= 0.0 {
            return Err(CoreError::invalid("target amount must be positive"));
        }
        if target_amount <= current_amount {
            return Ok(today);
        }

        let monthly_rate = annual_rate_pct / 100.0 / 12.0;
        let months = (target_amount / current_amount).ln() / (1.0 + monthly_rate).ln();
        let days = (months * DAYS_PER_PROJECTED_MONTH).floor();
        if !days.is_finite() || days > i32::MAX as f64 {
            return Err(CoreError::InvalidProjection(format!(
                "projection of {months:.1} months is out of range"
            )));
        }

        today
            .checked_add_signed(Duration::days(days as i64))
            .ok_or_else(|| {
                CoreError::InvalidProjection(format!(
                    "projected date {days} days after {today} is out of range"
                ))
            })
    }
}

impl Default for ReturnsService {
    fn default() -> Self {
        Self::new()
    }
}

fn ensure_finite(name: &str, value: f64) -> Result<(), CoreError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(CoreError::invalid(format!("{name} must be a finite number, got {value}")))
    }
}

fn ensure_non_negative(name: &str, value: f64) -> Result<(), CoreError> {
    ensure_finite(name, value)?;
    if value < 0.0 {
        return Err(CoreError::invalid(format!("{name} must not be negative, got {value}")));
    }
    Ok(())
}

/// Rates below −100% would turn the growth factor negative.
fn ensure_rate(name: &str, pct: f64) -> Result<(), CoreError> {
    ensure_finite(name, pct)?;
    if pct < -100.0 {
        return Err(CoreError::invalid(format!("{name} must be at least -100%, got {pct}%")));
    }
    Ok(())
}
