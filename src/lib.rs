pub mod calculator;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod payments;
pub mod reference;
pub mod request;
pub mod result;
pub mod server;
pub mod types;

// re-export key types
pub use calculator::FinancingCalculator;
pub use decimal::{Money, Rate};
pub use errors::{FieldViolation, FinancingError, Result};
pub use payments::{compute_lease_payment, compute_loan_payment, AmortizationSchedule};
pub use reference::ReferenceData;
pub use request::{FinancingRequest, ScheduleRequest};
pub use result::FinancingResult;
pub use types::{CalculationType, LeaseOption, LeaseQuote, LoanOption, LoanQuote};

// re-export external dependencies that users will need
pub use chrono;
pub use rust_decimal::Decimal;
