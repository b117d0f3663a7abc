//! Application configuration management.

use std::collections::HashMap;

use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Bookkeeping behaviour.
    #[serde(default)]
    pub bookkeeping: BookkeepingConfig,
    /// Tax rules used by the reservation advisor.
    #[serde(default)]
    pub tax: TaxConfig,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Bookkeeping configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BookkeepingConfig {
    /// IANA timezone that decides what "today" is for recurring bookings.
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Rate per kilometer used when a mileage entry does not carry one.
    #[serde(default = "default_mileage_rate")]
    pub default_mileage_rate: Decimal,
    /// When false every user counts as subscribed.
    #[serde(default)]
    pub enforce_subscription: bool,
    /// Users with an active subscription (only read when enforcement is on).
    #[serde(default)]
    pub active_subscribers: Vec<Uuid>,
}

fn default_timezone() -> String {
    "Europe/Amsterdam".to_string()
}

fn default_mileage_rate() -> Decimal {
    Decimal::new(21, 2)
}

impl Default for BookkeepingConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            default_mileage_rate: default_mileage_rate(),
            enforce_subscription: false,
            active_subscribers: Vec::new(),
        }
    }
}

impl BookkeepingConfig {
    /// Parses the configured timezone.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is not a known IANA timezone.
    pub fn tz(&self) -> Result<Tz, config::ConfigError> {
        self.timezone.parse::<Tz>().map_err(|_| {
            config::ConfigError::Message(format!("unknown timezone '{}'", self.timezone))
        })
    }
}

/// Dutch tax parameters, expressed as fractions (0.21 = 21%).
#[derive(Debug, Clone, Deserialize)]
pub struct TaxConfig {
    /// VAT rate per VAT code as used on bookings.
    #[serde(default = "default_vat_rates")]
    pub vat_rates: HashMap<String, Decimal>,
    /// Income tax rate applied to taxable profit.
    #[serde(default = "default_income_tax_rate")]
    pub income_tax_rate: Decimal,
    /// Zelfstandigenaftrek: fixed deduction for self-employed users.
    #[serde(default = "default_self_employed_deduction")]
    pub self_employed_deduction: Decimal,
    /// MKB-winstvrijstelling: exempt share of profit after deductions.
    #[serde(default = "default_sme_profit_exemption")]
    pub sme_profit_exemption: Decimal,
}

fn default_vat_rates() -> HashMap<String, Decimal> {
    let high = Decimal::new(21, 2);
    let low = Decimal::new(9, 2);
    HashMap::from([
        ("21".to_string(), high),
        ("hoog".to_string(), high),
        ("9".to_string(), low),
        ("laag".to_string(), low),
        ("0".to_string(), Decimal::ZERO),
        ("vrij".to_string(), Decimal::ZERO),
        ("verlegd".to_string(), Decimal::ZERO),
    ])
}

fn default_income_tax_rate() -> Decimal {
    Decimal::new(3697, 4)
}

fn default_self_employed_deduction() -> Decimal {
    Decimal::new(3750, 0)
}

fn default_sme_profit_exemption() -> Decimal {
    Decimal::new(1331, 4)
}

impl Default for TaxConfig {
    fn default() -> Self {
        Self {
            vat_rates: default_vat_rates(),
            income_tax_rate: default_income_tax_rate(),
            self_employed_deduction: default_self_employed_deduction(),
            sme_profit_exemption: default_sme_profit_exemption(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("KASBOEK").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
