//! Tax parameters used for reservation advice.

use std::collections::HashMap;

use kasboek_shared::config::TaxConfig;
use rust_decimal::Decimal;

/// Dutch tax parameters, as fractions (0.21 = 21%).
#[derive(Debug, Clone)]
pub struct TaxRules {
    vat_rates: HashMap<String, Decimal>,
    /// Income tax rate applied to taxable profit.
    pub income_tax_rate: Decimal,
    /// Zelfstandigenaftrek for a full year.
    pub self_employed_deduction: Decimal,
    /// MKB-winstvrijstelling.
    pub sme_profit_exemption: Decimal,
}

impl TaxRules {
    /// VAT rate for a booking's VAT code.
    ///
    /// Codes are matched case-insensitively. Bookings without a code, or with
    /// an unknown one, carry no VAT.
    #[must_use]
    pub fn vat_rate(&self, vat_code: Option<&str>) -> Decimal {
        vat_code
            .map(|code| code.trim().to_lowercase())
            .and_then(|code| self.vat_rates.get(&code).copied())
            .unwrap_or(Decimal::ZERO)
    }
}

impl From<&TaxConfig> for TaxRules {
    fn from(config: &TaxConfig) -> Self {
        Self {
            vat_rates: config
                .vat_rates
                .iter()
                .map(|(code, rate)| (code.trim().to_lowercase(), *rate))
                .collect(),
            income_tax_rate: config.income_tax_rate,
            self_employed_deduction: config.self_employed_deduction,
            sme_profit_exemption: config.sme_profit_exemption,
        }
    }
}

impl Default for TaxRules {
    fn default() -> Self {
        Self::from(&TaxConfig::default())
    }
}
