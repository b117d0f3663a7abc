//! Initial bookkeeping schema.
//!
//! Creates companies, the chart of accounts, bookings, the mileage log and
//! recurring schedules with their run ledger.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(ENUMS_SQL).await?;
        db.execute_unprepared(LEDGER_SQL).await?;
        db.execute_unprepared(MILEAGE_SQL).await?;
        db.execute_unprepared(RECURRING_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_SQL).await?;
        Ok(())
    }
}

const ENUMS_SQL: &str = r"
CREATE TYPE ledger_account_type AS ENUM ('balance', 'result');
CREATE TYPE recurring_frequency AS ENUM ('monthly', 'quarterly', 'yearly');
";

const LEDGER_SQL: &str = r"
CREATE TABLE companies (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name VARCHAR(255) NOT NULL,
    owner_id UUID NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_companies_owner ON companies(owner_id);

CREATE TABLE ledger_accounts (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    company_id UUID NOT NULL REFERENCES companies(id) ON DELETE CASCADE,
    code VARCHAR(20) NOT NULL,
    name VARCHAR(255) NOT NULL,
    account_type ledger_account_type NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    -- Settles concurrent lazy creation of well-known accounts
    CONSTRAINT uq_ledger_accounts_company_code UNIQUE (company_id, code)
);

CREATE TABLE bookings (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    company_id UUID NOT NULL REFERENCES companies(id) ON DELETE CASCADE,
    date DATE NOT NULL,
    description TEXT NOT NULL,
    debit_account_id UUID NOT NULL REFERENCES ledger_accounts(id),
    credit_account_id UUID NOT NULL REFERENCES ledger_accounts(id),
    amount NUMERIC(15, 2) NOT NULL,
    vat_code VARCHAR(20),
    created_by UUID NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_bookings_amount_positive CHECK (amount > 0)
);

CREATE INDEX idx_bookings_company_date ON bookings(company_id, date, created_at);
CREATE INDEX idx_bookings_debit ON bookings(debit_account_id);
CREATE INDEX idx_bookings_credit ON bookings(credit_account_id);
";

const MILEAGE_SQL: &str = r"
CREATE TABLE mileage_entries (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    company_id UUID NOT NULL REFERENCES companies(id) ON DELETE CASCADE,
    date DATE NOT NULL,
    kilometers NUMERIC(10, 2) NOT NULL,
    from_location VARCHAR(255),
    to_location VARCHAR(255),
    purpose TEXT,
    rate_per_km NUMERIC(10, 4) NOT NULL DEFAULT 0.21,
    total_amount NUMERIC(15, 2) NOT NULL,
    is_booked BOOLEAN NOT NULL DEFAULT false,
    booking_id UUID REFERENCES bookings(id) ON DELETE SET NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_mileage_kilometers CHECK (kilometers >= 0),
    CONSTRAINT chk_mileage_rate CHECK (rate_per_km >= 0)
);

-- Unbooked trips are read oldest first by the mileage processor
CREATE INDEX idx_mileage_unbooked ON mileage_entries(company_id, date, created_at)
    WHERE is_booked = false;
CREATE INDEX idx_mileage_company_date ON mileage_entries(company_id, date DESC);
";

const RECURRING_SQL: &str = r"
CREATE TABLE recurring_bookings (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    company_id UUID NOT NULL REFERENCES companies(id) ON DELETE CASCADE,
    description TEXT NOT NULL,
    debit_account_id UUID NOT NULL REFERENCES ledger_accounts(id),
    credit_account_id UUID NOT NULL REFERENCES ledger_accounts(id),
    amount NUMERIC(15, 2) NOT NULL,
    frequency recurring_frequency NOT NULL,
    day_of_month SMALLINT NOT NULL,
    start_date DATE NOT NULL,
    end_date DATE,
    vat_code VARCHAR(20),
    created_by UUID NOT NULL,
    is_active BOOLEAN NOT NULL DEFAULT true,
    last_processed DATE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_recurring_amount_positive CHECK (amount > 0),
    CONSTRAINT chk_recurring_day CHECK (day_of_month BETWEEN 1 AND 31),
    CONSTRAINT chk_recurring_window CHECK (end_date IS NULL OR end_date >= start_date)
);

CREATE INDEX idx_recurring_company_active ON recurring_bookings(company_id, start_date)
    WHERE is_active = true;

CREATE TABLE recurring_booking_runs (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    company_id UUID NOT NULL REFERENCES companies(id) ON DELETE CASCADE,
    recurring_booking_id UUID NOT NULL REFERENCES recurring_bookings(id) ON DELETE CASCADE,
    period CHAR(7) NOT NULL,
    booking_id UUID NOT NULL REFERENCES bookings(id) ON DELETE CASCADE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    -- One booking per schedule per month, even with concurrent runs
    CONSTRAINT uq_recurring_runs_period UNIQUE (company_id, recurring_booking_id, period)
);
";

const DROP_SQL: &str = r"
DROP TABLE IF EXISTS recurring_booking_runs CASCADE;
DROP TABLE IF EXISTS recurring_bookings CASCADE;
DROP TABLE IF EXISTS mileage_entries CASCADE;
DROP TABLE IF EXISTS bookings CASCADE;
DROP TABLE IF EXISTS ledger_accounts CASCADE;
DROP TABLE IF EXISTS companies CASCADE;
DROP TYPE IF EXISTS recurring_frequency;
DROP TYPE IF EXISTS ledger_account_type;
";
