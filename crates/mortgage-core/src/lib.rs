pub mod amortization;
pub mod error;
pub mod types;

#[cfg(feature = "table")]
pub mod table;

pub use amortization::{LoanParameters, LoanSummary, MortgageOutput, YearlyEntry};
pub use error::MortgageError;
pub use types::*;

/// Standard result type for all mortgage operations
pub type MortgageResult<T> = Result<T, MortgageError>;
