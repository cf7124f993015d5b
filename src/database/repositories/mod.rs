pub mod employee;
pub mod leave_request;

// Re-export all repositories for easy importing
pub use employee::{EmployeeJobRepository, EmployeeRepository};
pub use leave_request::LeaveRequestRepository;
