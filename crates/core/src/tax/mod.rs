//! Dutch tax helpers: VAT periods, tax parameters and reservation advice.

pub mod advisor;
pub mod period;
pub mod rules;

pub use advisor::{TaxAdvice, TaxAdvisor};
pub use period::VatPeriod;
pub use rules::TaxRules;
