//! Mileage log and the processor that books it as travel expenses.

pub mod service;
pub mod store;
pub mod types;

pub use service::MileageService;
pub use store::MileageStore;
pub use types::{
    mileage_total, BookedMileage, MileageBookingReport, MileageEntry, MileageItemError,
    NewMileageEntry, RecordMileageInput,
};
