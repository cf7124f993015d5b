use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::employee::EmploymentStatus;
use super::macros::string_enum;

string_enum! {
    #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
    #[serde(rename_all = "snake_case")]
    pub enum LeaveCategory {
        Annual => "annual",
        Casual => "casual",
        Sick => "sick",
        Bereavement => "bereavement",
        Other => "other",
    }
}

/// Status value of a leave request that counts toward usage.
pub const APPROVED_STATUS: &str = "approved";

/// A leave request row as stored. Columns are read as text so that numeric
/// and string storage of ids and day counts are handled the same way.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequest {
    pub id: String,
    pub employee_id: String,
    pub leave_category: String,
    pub total_days: Option<String>,
    pub status: String,
}

impl LeaveRequest {
    /// Known category of this row. The label must match exactly, so
    /// `"Sick"` or `" annual"` are outside the fixed set and give `None`.
    pub fn category(&self) -> Option<LeaveCategory> {
        self.leave_category.parse().ok()
    }

    pub fn days(&self) -> i64 {
        parse_total_days(self.total_days.as_deref())
    }

    /// Status must match exactly; `"Approved"` does not count.
    pub fn is_approved(&self) -> bool {
        self.status == APPROVED_STATUS
    }
}

/// Parse a stored day count the lenient way: surrounding whitespace is
/// ignored, a leading integer is taken (`"3 days"` is 3, `"2.5"` is 2), and
/// anything without leading digits is 0.
pub fn parse_total_days(raw: Option<&str>) -> i64 {
    let Some(raw) = raw else {
        return 0;
    };

    let trimmed = raw.trim();
    let (sign, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    rest[..digits_len]
        .parse::<i64>()
        .map(|days| sign * days)
        .unwrap_or(0)
}

/// One number per leave category.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryDays {
    pub annual: i64,
    pub casual: i64,
    pub sick: i64,
    pub bereavement: i64,
    pub other: i64,
}

impl CategoryDays {
    pub fn get(&self, category: LeaveCategory) -> i64 {
        match category {
            LeaveCategory::Annual => self.annual,
            LeaveCategory::Casual => self.casual,
            LeaveCategory::Sick => self.sick,
            LeaveCategory::Bereavement => self.bereavement,
            LeaveCategory::Other => self.other,
        }
    }

    pub fn add(&mut self, category: LeaveCategory, days: i64) {
        let slot = match category {
            LeaveCategory::Annual => &mut self.annual,
            LeaveCategory::Casual => &mut self.casual,
            LeaveCategory::Sick => &mut self.sick,
            LeaveCategory::Bereavement => &mut self.bereavement,
            LeaveCategory::Other => &mut self.other,
        };
        *slot = slot.saturating_add(days);
    }

    pub fn total(&self) -> i64 {
        LeaveCategory::ALL
            .iter()
            .fold(0i64, |acc, c| acc.saturating_add(self.get(*c)))
    }

    /// Combine two tables category by category.
    pub fn zip_with(&self, other: &CategoryDays, f: impl Fn(i64, i64) -> i64) -> CategoryDays {
        CategoryDays {
            annual: f(self.annual, other.annual),
            casual: f(self.casual, other.casual),
            sick: f(self.sick, other.sick),
            bereavement: f(self.bereavement, other.bereavement),
            other: f(self.other, other.other),
        }
    }
}

/// Result of a leave-balance computation. Recomputed on every request.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LeaveBalanceSnapshot {
    pub employee_id: String,
    pub employment_status: EmploymentStatus,
    /// Not tracked; always `null` in responses.
    pub probation_end_date: Option<NaiveDate>,
    pub leave_count: usize,
    pub leaves: Vec<LeaveRequest>,
    pub used_leave: CategoryDays,
    pub category_balance: CategoryDays,
    pub category_allowance: CategoryDays,
    pub total_used_days: i64,
    pub bereavement_used_days: i64,
    pub annual_balance: i64,
    pub total_annual_allowance: i64,
    pub bereavement_balance: i64,
}
