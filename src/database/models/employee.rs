use serde::{Deserialize, Serialize};

/// Raw status string that marks an employee as being on probation.
pub const PROBATION_STATUS: &str = "Probation";

/// Binary classification used to pick the annual allowance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum EmploymentStatus {
    Probation,
    Permanent,
}

impl EmploymentStatus {
    /// Collapse a raw employment-status value into the effective status.
    ///
    /// Only the exact literal `"Probation"` maps to [`EmploymentStatus::Probation`].
    /// A missing status, an empty string and any other value (including
    /// `"probation"` in a different case) are treated as permanent.
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            Some(PROBATION_STATUS) => EmploymentStatus::Probation,
            _ => EmploymentStatus::Permanent,
        }
    }

    pub fn is_probation(&self) -> bool {
        matches!(self, EmploymentStatus::Probation)
    }
}

impl std::fmt::Display for EmploymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmploymentStatus::Probation => write!(f, "Probation"),
            EmploymentStatus::Permanent => write!(f, "Permanent"),
        }
    }
}
