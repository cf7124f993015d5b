pub mod leave_balance;

pub use leave_balance::{
    ApprovedLeaveSource, EmploymentStatusLookup, FallbackStatusLookup, LeaveBalanceError,
    LeaveBalanceService, LeavePolicy,
};
