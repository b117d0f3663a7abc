//! Core bookkeeping logic for Kasboek.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Persistence is reached through the store traits each module defines; the
//! db crate implements them against PostgreSQL.
//!
//! # Modules
//!
//! - `ledger` - Chart of accounts and the booking engine
//! - `mileage` - Mileage log and travel expense booking
//! - `recurring` - Recurring booking schedules and their processor
//! - `reports` - Profit and loss, balance sheet, cash flow and trends
//! - `tax` - VAT periods and tax reservation advice
//! - `policy` - Subscription policy
//! - `batch` - Sequential per-item processing with failure isolation

pub mod batch;
pub mod calendar;
pub mod ledger;
pub mod mileage;
pub mod policy;
pub mod recurring;
pub mod reports;
pub mod tax;

#[cfg(test)]
mod testing;
