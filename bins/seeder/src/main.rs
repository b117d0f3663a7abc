//! Database seeder for Kasboek development and testing.
//!
//! Seeds a test company with the standard chart of accounts, a quarter of
//! bookings, a few mileage trips and two recurring schedules.
//!
//! Usage: cargo run --bin seeder

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use kasboek_core::ledger::{
    AccountDirectory, BookingService, CreateBookingInput, DateRange, LedgerAccount, LedgerStore,
};
use kasboek_core::mileage::{MileageService, MileageStore, RecordMileageInput};
use kasboek_core::policy::StaticSubscriptionPolicy;
use kasboek_core::recurring::{CreateRecurringBookingInput, Frequency, RecurringService};
use kasboek_db::PgStore;
use kasboek_db::entities::companies;
use kasboek_shared::types::{CompanyId, LedgerAccountId, UserId};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

/// Test company ID (consistent for all seeds)
const TEST_COMPANY_ID: &str = "00000000-0000-0000-0000-000000000001";
/// Test owner ID (consistent for all seeds)
const TEST_OWNER_ID: &str = "00000000-0000-0000-0000-000000000002";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = kasboek_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding test company...");
    if !seed_test_company(&db).await {
        println!("Seeding complete!");
        return;
    }

    let store = Arc::new(PgStore::new(db));

    println!("Seeding chart of accounts...");
    let chart = AccountDirectory::new(Arc::clone(&store))
        .setup_standard_chart(test_company_id())
        .await
        .expect("Failed to seed chart of accounts");
    println!("  {} accounts", chart.len());

    println!("Seeding bookings...");
    seed_bookings(&store, &chart).await;

    println!("Seeding mileage entries...");
    seed_mileage(&store).await;

    println!("Seeding recurring bookings...");
    seed_recurring(&store, &chart).await;

    println!("Seeding complete!");
}

fn test_company_id() -> CompanyId {
    CompanyId::from_uuid(Uuid::parse_str(TEST_COMPANY_ID).unwrap())
}

fn test_owner_id() -> UserId {
    UserId::from_uuid(Uuid::parse_str(TEST_OWNER_ID).unwrap())
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn account(chart: &[LedgerAccount], code: &str) -> LedgerAccountId {
    chart
        .iter()
        .find(|a| a.code == code)
        .map(|a| a.id)
        .unwrap_or_else(|| panic!("account {code} missing from standard chart"))
}

/// Seeds the test company. Returns false when it already exists.
async fn seed_test_company(db: &DatabaseConnection) -> bool {
    let company_id = test_company_id().into_inner();
    if companies::Entity::find_by_id(company_id)
        .one(db)
        .await
        .ok()
        .flatten()
        .is_some()
    {
        println!("  Test company already exists, skipping...");
        return false;
    }

    let company = companies::ActiveModel {
        id: Set(company_id),
        name: Set("Test Eenmanszaak".to_string()),
        owner_id: Set(test_owner_id().into_inner()),
        created_at: Set(Utc::now().into()),
    };
    company.insert(db).await.expect("Failed to insert test company");
    println!("  Created test company: Test Eenmanszaak");
    true
}

/// Seeds invoices paid into the bank and a handful of costs.
async fn seed_bookings(store: &Arc<PgStore>, chart: &[LedgerAccount]) {
    let bank = account(chart, "1000");
    let equity = account(chart, "0500");
    let costs = account(chart, "4000");
    let revenue = account(chart, "8000");

    let bookings = [
        (date(2024, 1, 2), "Inbreng eigen vermogen", bank, equity, Decimal::new(5000, 0), None),
        (date(2024, 1, 31), "Factuur 2024-001", bank, revenue, Decimal::new(2400, 0), Some("21")),
        (date(2024, 2, 29), "Factuur 2024-002", bank, revenue, Decimal::new(1850, 0), Some("21")),
        (date(2024, 3, 28), "Factuur 2024-003", bank, revenue, Decimal::new(3100, 0), Some("21")),
        (date(2024, 2, 5), "Laptop", costs, bank, Decimal::new(129_900, 2), Some("21")),
        (date(2024, 3, 12), "Vakliteratuur", costs, bank, Decimal::new(8450, 2), Some("9")),
    ];

    let service = BookingService::new(Arc::clone(store));
    for (on, description, debit, credit, amount, vat_code) in bookings {
        service
            .create_booking(CreateBookingInput {
                company_id: test_company_id(),
                date: on,
                description: description.to_string(),
                debit_account_id: debit,
                credit_account_id: credit,
                amount,
                vat_code: vat_code.map(str::to_string),
                created_by: test_owner_id(),
            })
            .await
            .expect("Failed to insert booking");
    }

    let count = store
        .list_bookings(test_company_id(), DateRange::until(date(2024, 12, 31)))
        .await
        .map(|b| b.len())
        .unwrap_or_default();
    println!("  {count} bookings");
}

/// Seeds unbooked trips for the mileage job to pick up.
async fn seed_mileage(store: &Arc<PgStore>) {
    let service = MileageService::new(
        Arc::clone(store),
        Arc::new(StaticSubscriptionPolicy::allow_all()),
    );
    let trips = [
        (date(2024, 1, 15), Decimal::new(425, 1), "Utrecht", "Amsterdam", "Klantbezoek"),
        (date(2024, 2, 8), Decimal::new(1180, 1), "Utrecht", "Eindhoven", "Workshop"),
        (date(2024, 3, 21), Decimal::new(96, 1), "Utrecht", "Zeist", "Overleg"),
    ];

    for (on, kilometers, from, to, purpose) in trips {
        service
            .record_mileage_entry(RecordMileageInput {
                company_id: test_company_id(),
                date: on,
                kilometers,
                from_location: Some(from.to_string()),
                to_location: Some(to.to_string()),
                purpose: Some(purpose.to_string()),
                rate_per_km: None,
            })
            .await
            .expect("Failed to insert mileage entry");
    }

    let unbooked = store
        .unbooked_mileage_entries(test_company_id())
        .await
        .map(|e| e.len())
        .unwrap_or_default();
    println!("  {unbooked} unbooked trips");
}

/// Seeds a monthly rent and a quarterly insurance schedule.
async fn seed_recurring(store: &Arc<PgStore>, chart: &[LedgerAccount]) {
    let service = RecurringService::new(Arc::clone(store), chrono_tz::Europe::Amsterdam);
    let bank = account(chart, "1000");
    let costs = account(chart, "4000");

    let schedules = [
        ("Huur werkruimte", Decimal::new(450, 0), Frequency::Monthly, 1),
        ("Beroepsaansprakelijkheid", Decimal::new(18_750, 2), Frequency::Quarterly, 15),
    ];

    for (description, amount, frequency, day_of_month) in schedules {
        let created = service
            .create_recurring_booking(CreateRecurringBookingInput {
                company_id: test_company_id(),
                description: description.to_string(),
                debit_account_id: costs,
                credit_account_id: bank,
                amount,
                frequency,
                day_of_month,
                start_date: date(2024, 1, 1),
                end_date: None,
                vat_code: Some("21".to_string()),
                created_by: test_owner_id(),
            })
            .await
            .expect("Failed to insert recurring booking");
        println!(
            "  {} ({}, day {})",
            created.recurring.description, created.recurring.frequency, day_of_month
        );
    }
}
