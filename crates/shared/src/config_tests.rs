use rust_decimal_macros::dec;

use crate::config::{AppConfig, BookkeepingConfig, TaxConfig};

#[test]
fn test_load_from_environment() {
    temp_env::with_vars(
        [
            ("KASBOEK__DATABASE__URL", Some("postgres://localhost/kasboek_test")),
            ("KASBOEK__BOOKKEEPING__TIMEZONE", Some("Europe/Brussels")),
            ("RUN_MODE", Some("test-without-files")),
        ],
        || {
            let config = AppConfig::load().unwrap();
            assert_eq!(config.database.url, "postgres://localhost/kasboek_test");
            assert_eq!(config.database.max_connections, 10);
            assert_eq!(config.bookkeeping.timezone, "Europe/Brussels");
            assert!(!config.bookkeeping.enforce_subscription);
            assert_eq!(config.tax.income_tax_rate, dec!(0.3697));
        },
    );
}

#[test]
fn test_missing_database_url_fails() {
    temp_env::with_vars(
        [
            ("KASBOEK__DATABASE__URL", None::<&str>),
            ("RUN_MODE", Some("test-without-files")),
        ],
        || {
            assert!(AppConfig::load().is_err());
        },
    );
}

#[test]
fn test_bookkeeping_defaults() {
    let config = BookkeepingConfig::default();
    assert_eq!(config.default_mileage_rate, dec!(0.21));
    assert_eq!(config.tz().unwrap(), chrono_tz::Europe::Amsterdam);
}

#[test]
fn test_unknown_timezone_is_rejected() {
    let config = BookkeepingConfig {
        timezone: "Mars/Olympus_Mons".to_string(),
        ..BookkeepingConfig::default()
    };
    assert!(config.tz().is_err());
}

#[test]
fn test_default_vat_rates() {
    let tax = TaxConfig::default();
    assert_eq!(tax.vat_rates["21"], dec!(0.21));
    assert_eq!(tax.vat_rates["laag"], dec!(0.09));
    assert_eq!(tax.vat_rates["verlegd"], dec!(0));
}
