use chrono::NaiveDate;

use crate::errors::CoreError;
use crate::models::analytics::PlanProgress;
use crate::models::plan::FinancialPlan;
use crate::services::returns_service::ReturnsService;

/// Tracks financial plans against their targets.
pub struct PlanService {
    returns_service: ReturnsService,
}

impl PlanService {
    pub fn new() -> Self {
        Self {
            returns_service: ReturnsService::new(),
        }
    }

    /// `current / target × 100`, 0 when the target is not positive.
    pub fn progress_pct(&self, plan: &FinancialPlan) -> f64 {
        if plan.target_amount > 0.0 {
            plan.current_amount / plan.target_amount * 100.0
        } else {
            0.0
        }
    }

    /// Progress plus projected completion. The projection is `None` when the
    /// plan's numbers cannot be projected (no savings yet, no contribution,
    /// no expected return).
    pub fn plan_progress(&self, plan: &FinancialPlan, today: NaiveDate) -> Result<PlanProgress, CoreError> {
        let projected_completion = match self.returns_service.projected_completion_date(
            plan.target_amount,
            plan.current_amount,
            plan.monthly_investment,
            plan.expected_return,
            today,
        ) {
            Ok(date) => Some(date),
            Err(CoreError::InvalidProjection(reason)) => {
                log::debug!("No completion projection for plan '{}': {reason}", plan.name);
                None
            }
            Err(e) => return Err(e),
        };

        Ok(PlanProgress {
            plan_id: plan.id,
            name: plan.name.clone(),
            progress_pct: self.progress_pct(plan),
            remaining: (plan.target_amount - plan.current_amount).max(0.0),
            projected_completion,
        })
    }
}

impl Default for PlanService {
    fn default() -> Self {
        Self::new()
    }
}
