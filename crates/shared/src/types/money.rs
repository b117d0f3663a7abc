//! Money helpers with currency precision.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! All amounts are `rust_decimal::Decimal`; the ledger currency is always EUR.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places stored for currency amounts (euro cents).
pub const CURRENCY_SCALE: u32 = 2;

/// Rounds an amount to currency precision using Banker's Rounding.
///
/// Used wherever an amount is derived rather than entered, such as
/// kilometers × rate or a percentage of a report total.
#[must_use]
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CURRENCY_SCALE, RoundingStrategy::MidpointNearestEven)
}
