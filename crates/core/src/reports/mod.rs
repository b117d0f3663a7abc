//! Financial report generation.
//!
//! This module aggregates the booking ledger into reports:
//! - Profit and loss
//! - Balance sheet
//! - Cash flow
//! - Monthly trends
//!
//! [`ReportService`] holds the pure generators; [`ReportingEngine`] loads a
//! company's ledger from the store and feeds them.

pub mod engine;
pub mod error;
pub mod service;
pub mod types;


pub use engine::ReportingEngine;
pub use error::ReportError;
pub use service::ReportService;
pub use types::*;
