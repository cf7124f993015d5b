use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;

use crate::database::models::{
    CategoryDays, EmploymentStatus, LeaveBalanceSnapshot, LeaveCategory, LeaveRequest,
};

/// Resolves the raw employment-status string for an employee identifier.
/// `Ok(None)` means no status was found, which is different from a status
/// that was found but is empty.
#[async_trait]
pub trait EmploymentStatusLookup: Send + Sync {
    async fn lookup_status(&self, employee_id: &str) -> Result<Option<String>>;
}

/// Source of approved leave rows for an employee identifier.
#[async_trait]
pub trait ApprovedLeaveSource: Send + Sync {
    async fn approved_leaves(&self, employee_id: &str) -> Result<Vec<LeaveRequest>>;
}

/// Two-step status lookup: the secondary source answers only when the
/// primary one has no status. Both are queried concurrently.
pub struct FallbackStatusLookup {
    primary: Arc<dyn EmploymentStatusLookup>,
    secondary: Arc<dyn EmploymentStatusLookup>,
}

impl FallbackStatusLookup {
    pub fn new(
        primary: Arc<dyn EmploymentStatusLookup>,
        secondary: Arc<dyn EmploymentStatusLookup>,
    ) -> Self {
        Self { primary, secondary }
    }
}

#[async_trait]
impl EmploymentStatusLookup for FallbackStatusLookup {
    async fn lookup_status(&self, employee_id: &str) -> Result<Option<String>> {
        let (primary, secondary) = tokio::try_join!(
            self.primary.lookup_status(employee_id),
            self.secondary.lookup_status(employee_id),
        )?;

        Ok(primary.or(secondary))
    }
}

#[derive(Error, Debug)]
pub enum LeaveBalanceError {
    #[error("Employee ID is required")]
    MissingEmployeeId,

    #[error("Failed to fetch leave balance: {0}")]
    LookupFailed(#[from] anyhow::Error),
}

/// Fixed allowance table, in days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeavePolicy {
    pub probation_annual: i64,
    pub permanent_annual: i64,
    pub casual: i64,
    pub sick: i64,
    pub bereavement: i64,
    pub other: i64,
}

impl Default for LeavePolicy {
    fn default() -> Self {
        Self {
            probation_annual: 3,
            permanent_annual: 20,
            casual: 10,
            sick: 15,
            bereavement: 3,
            other: 5,
        }
    }
}

impl LeavePolicy {
    pub fn allowances(&self, status: EmploymentStatus) -> CategoryDays {
        let annual = if status.is_probation() {
            self.probation_annual
        } else {
            self.permanent_annual
        };

        CategoryDays {
            annual,
            casual: self.casual,
            sick: self.sick,
            bereavement: self.bereavement,
            other: self.other,
        }
    }

    /// Reconcile approved usage against the allowances for `status`.
    ///
    /// The annual pool is depleted by every approved day except bereavement,
    /// so casual, sick, other and unrecognised categories all draw from it.
    /// Bereavement has its own pool. Rows that are not approved are dropped
    /// before anything is counted. Sums saturate and all balances are clamped
    /// at zero.
    pub fn reconcile(
        &self,
        employee_id: &str,
        status: EmploymentStatus,
        leaves: Vec<LeaveRequest>,
    ) -> LeaveBalanceSnapshot {
        let allowance = self.allowances(status);
        let leaves: Vec<LeaveRequest> = leaves.into_iter().filter(|l| l.is_approved()).collect();

        let mut used = CategoryDays::default();
        let mut total_used_days: i64 = 0;
        for leave in &leaves {
            let days = leave.days();
            if let Some(category) = leave.category() {
                used.add(category, days);
            }
            total_used_days = total_used_days.saturating_add(days);
        }

        let bereavement_used_days = used.get(LeaveCategory::Bereavement);
        let annual_pool_used = total_used_days.saturating_sub(bereavement_used_days);
        let category_balance =
            allowance.zip_with(&used, |allowed, taken| allowed.saturating_sub(taken).max(0));
        let annual_balance = allowance.annual.saturating_sub(annual_pool_used).max(0);
        let bereavement_balance = allowance
            .bereavement
            .saturating_sub(bereavement_used_days)
            .max(0);

        LeaveBalanceSnapshot {
            employee_id: employee_id.to_string(),
            employment_status: status,
            probation_end_date: None,
            leave_count: leaves.len(),
            leaves,
            used_leave: used,
            category_balance,
            category_allowance: allowance,
            total_used_days,
            bereavement_used_days,
            annual_balance,
            total_annual_allowance: allowance.annual,
            bereavement_balance,
        }
    }
}

/// Computes leave balances from injected read sources. Holds no state of its
/// own; every call reads the stores afresh.
#[derive(Clone)]
pub struct LeaveBalanceService {
    status_lookup: Arc<dyn EmploymentStatusLookup>,
    leave_source: Arc<dyn ApprovedLeaveSource>,
    policy: LeavePolicy,
}

impl LeaveBalanceService {
    pub fn new(
        status_lookup: Arc<dyn EmploymentStatusLookup>,
        leave_source: Arc<dyn ApprovedLeaveSource>,
    ) -> Self {
        Self {
            status_lookup,
            leave_source,
            policy: LeavePolicy::default(),
        }
    }

    pub async fn compute_balance(
        &self,
        employee_id: &str,
    ) -> Result<LeaveBalanceSnapshot, LeaveBalanceError> {
        if employee_id.trim().is_empty() {
            return Err(LeaveBalanceError::MissingEmployeeId);
        }

        let (raw_status, leaves) = tokio::try_join!(
            self.status_lookup.lookup_status(employee_id),
            self.leave_source.approved_leaves(employee_id),
        )?;

        let status = EmploymentStatus::from_raw(raw_status.as_deref());

        Ok(self.policy.reconcile(employee_id, status, leaves))
    }
}
