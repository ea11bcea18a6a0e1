pub mod amortization;
pub mod lease;

pub use amortization::{compute_loan_payment, AmortizationSchedule, ScheduledPayment};
pub use lease::compute_lease_payment;
