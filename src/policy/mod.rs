pub mod matcher;
pub mod checker;

// Re-export main types
pub use matcher::{license_matches, Blacklist};
pub use checker::{Violation, ViolationSummary};
