pub mod employee;
pub mod leave;
pub mod macros;

// Re-export all models for easy importing
pub use employee::*;
pub use leave::*;
