//! Mileage log types.

use chrono::{DateTime, NaiveDate, Utc};
use kasboek_shared::types::{round_currency, BookingId, CompanyId, MileageEntryId};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A logged car trip that can be turned into a travel expense booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MileageEntry {
    /// Unique identifier.
    pub id: MileageEntryId,
    /// Owning company.
    pub company_id: CompanyId,
    /// Trip date.
    pub date: NaiveDate,
    /// Distance driven.
    pub kilometers: Decimal,
    /// Departure location.
    pub from_location: Option<String>,
    /// Destination.
    pub to_location: Option<String>,
    /// Business purpose of the trip.
    pub purpose: Option<String>,
    /// Reimbursement per kilometer.
    pub rate_per_km: Decimal,
    /// kilometers × rate_per_km, rounded to cents.
    pub total_amount: Decimal,
    /// Whether a booking has been created for this trip.
    pub is_booked: bool,
    /// The booking created for this trip, once booked.
    pub booking_id: Option<BookingId>,
    /// When the entry was recorded.
    pub created_at: DateTime<Utc>,
}

impl MileageEntry {
    /// Human-readable booking description.
    ///
    /// `Kilometerregistratie: 12.5 km (Utrecht → Amsterdam) - Klantbezoek`
    #[must_use]
    pub fn booking_description(&self) -> String {
        let kilometers = self
            .kilometers
            .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
        let mut description = format!("Kilometerregistratie: {kilometers:.1} km");

        if self.from_location.is_some() || self.to_location.is_some() {
            description.push_str(&format!(
                " ({} → {})",
                self.from_location.as_deref().unwrap_or_default(),
                self.to_location.as_deref().unwrap_or_default()
            ));
        }

        if let Some(purpose) = &self.purpose {
            description.push_str(&format!(" - {purpose}"));
        }

        description
    }
}

/// Computes the reimbursable amount for a trip.
#[must_use]
pub fn mileage_total(kilometers: Decimal, rate_per_km: Decimal) -> Decimal {
    round_currency(kilometers * rate_per_km)
}

/// Input for recording a trip.
#[derive(Debug, Clone)]
pub struct RecordMileageInput {
    /// Owning company.
    pub company_id: CompanyId,
    /// Trip date.
    pub date: NaiveDate,
    /// Distance driven (must not be negative).
    pub kilometers: Decimal,
    /// Departure location.
    pub from_location: Option<String>,
    /// Destination.
    pub to_location: Option<String>,
    /// Business purpose.
    pub purpose: Option<String>,
    /// Rate per kilometer; the configured default when absent.
    pub rate_per_km: Option<Decimal>,
}

/// A trip ready to be stored, with its total computed.
#[derive(Debug, Clone)]
pub struct NewMileageEntry {
    /// Owning company.
    pub company_id: CompanyId,
    /// Trip date.
    pub date: NaiveDate,
    /// Distance driven.
    pub kilometers: Decimal,
    /// Departure location.
    pub from_location: Option<String>,
    /// Destination.
    pub to_location: Option<String>,
    /// Business purpose.
    pub purpose: Option<String>,
    /// Rate per kilometer.
    pub rate_per_km: Decimal,
    /// Computed total.
    pub total_amount: Decimal,
}

/// A trip that was booked in this run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookedMileage {
    /// The mileage entry.
    pub entry_id: MileageEntryId,
    /// The booking created for it.
    pub booking_id: BookingId,
    /// Booking description.
    pub description: String,
    /// Booked amount.
    pub amount: Decimal,
}

/// A trip that could not be booked in this run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MileageItemError {
    /// The mileage entry.
    pub entry_id: MileageEntryId,
    /// Why it failed.
    pub error: String,
}

/// Result of a mileage booking run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MileageBookingReport {
    /// Trips booked, oldest first.
    pub booked: Vec<BookedMileage>,
    /// Trips that failed.
    pub errors: Vec<MileageItemError>,
    /// Number of trips booked.
    pub count: usize,
}
