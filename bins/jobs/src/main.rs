//! Kasboek scheduled jobs.
//!
//! Entry point for an external scheduler (cron, systemd timers, k8s
//! CronJobs). Each run executes one job and prints its result as JSON.

mod args;

use std::sync::Arc;

use anyhow::Context;
use chrono::NaiveDate;
use clap::Parser;
use kasboek_core::ledger::AccountDirectory;
use kasboek_core::mileage::MileageService;
use kasboek_core::policy::StaticSubscriptionPolicy;
use kasboek_core::recurring::{RecurringRunReport, RecurringService};
use kasboek_core::reports::{
    BalanceSheetReport, CashFlowReport, ProfitAndLossReport, ReportingEngine, TrendReport,
};
use kasboek_core::tax::{TaxAdvice, TaxRules, VatPeriod};
use kasboek_db::{CompanyRepository, PgStore};
use kasboek_shared::AppConfig;
use kasboek_shared::types::CompanyId;
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::args::{Cli, Command};

/// Recurring run result for one company.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CompanyRun {
    company_id: CompanyId,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<RecurringRunReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Everything the `report` job prints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReportBundle {
    profit_and_loss: ProfitAndLossReport,
    balance_sheet: BalanceSheetReport,
    cash_flow: CashFlowReport,
    trends: TrendReport,
    tax_advice: TaxAdvice,
    vat_period: VatPeriod,
    vat_filing_deadline: NaiveDate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,sea_orm=warn,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let Cli { command } = Cli::parse();
    let config = AppConfig::load().context("Failed to load configuration")?;

    let db = kasboek_db::connect_with(&config.database).await?;
    info!("Connected to database");
    let store = Arc::new(PgStore::new(db.clone()));

    let output = match command {
        Command::Recurring { company, date } => {
            let service = RecurringService::new(Arc::clone(&store), config.bookkeeping.tz()?);
            let today = date.unwrap_or_else(|| service.today());
            let companies = match company {
                Some(company) => vec![company],
                None => CompanyRepository::new(db)
                    .list()
                    .await?
                    .into_iter()
                    .map(|c| CompanyId::from_uuid(c.id))
                    .collect(),
            };

            let mut runs = Vec::with_capacity(companies.len());
            for company_id in companies {
                let run = match service
                    .process_recurring_bookings_on(company_id, today)
                    .await
                {
                    Ok(report) => CompanyRun {
                        company_id,
                        report: Some(report),
                        error: None,
                    },
                    Err(e) => {
                        warn!(%company_id, error = %e, "Recurring run failed");
                        CompanyRun {
                            company_id,
                            report: None,
                            error: Some(e.to_string()),
                        }
                    }
                };
                runs.push(run);
            }
            serde_json::to_string_pretty(&runs)?
        }
        Command::Mileage { company, actor } => {
            let policy = Arc::new(StaticSubscriptionPolicy::from(&config.bookkeeping));
            let report = MileageService::new(Arc::clone(&store), policy)
                .with_default_rate(config.bookkeeping.default_mileage_rate)
                .book_mileage_entries(company, actor)
                .await?;
            serde_json::to_string_pretty(&report)?
        }
        Command::Report { company, from, to } => {
            let engine = ReportingEngine::new(Arc::clone(&store), TaxRules::from(&config.tax));
            let vat_period = VatPeriod::containing(to);
            let bundle = ReportBundle {
                profit_and_loss: engine.profit_and_loss(company, from, to).await?,
                balance_sheet: engine.balance_sheet(company, to).await?,
                cash_flow: engine.cash_flow(company, from, to).await?,
                trends: engine.trends(company, from, to).await?,
                tax_advice: engine.tax_advice(company, from, to).await?,
                vat_filing_deadline: vat_period.filing_deadline(),
                vat_period,
            };
            serde_json::to_string_pretty(&bundle)?
        }
        Command::SetupChart { company } => {
            let accounts = AccountDirectory::new(Arc::clone(&store))
                .setup_standard_chart(company)
                .await?;
            serde_json::to_string_pretty(&accounts)?
        }
    };

    println!("{output}");
    Ok(())
}
