//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.
//! [`PgStore`] combines them behind the core store traits.

pub mod account;
pub mod booking;
pub mod company;
pub mod error;
pub mod mileage;
pub mod recurring;
pub mod store;

pub use account::AccountRepository;
pub use booking::BookingRepository;
pub use company::CompanyRepository;
pub use error::StoreError;
pub use mileage::MileageRepository;
pub use recurring::RecurringRepository;
pub use store::PgStore;
