//! `SeaORM` entity definitions.

pub mod bookings;
pub mod companies;
pub mod ledger_accounts;
pub mod mileage_entries;
pub mod recurring_booking_runs;
pub mod recurring_bookings;
pub mod sea_orm_active_enums;
