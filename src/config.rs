//! Configuration loading from TOML.
//!
//! Reads `config.toml` and deserializes into strongly-typed structs.
//! Every section carries serde defaults matching the shipped product
//! policy, so a partial (or empty) file is valid.

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use tracing::warn;

use crate::types::{CreditTier, PolicyError};

/// Top-level application configuration.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub policy: AffordabilityPolicy,
    pub filters: FilterDefaults,
}

// ---------------------------------------------------------------------------
// Affordability policy
// ---------------------------------------------------------------------------

/// Every threshold the affordability estimator uses.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct AffordabilityPolicy {
    /// Annual interest rate by credit tier key ("excellent", "good", ...).
    pub rates: HashMap<String, Decimal>,
    /// Rate used for any tier missing from `rates`.
    pub fallback_rate: Decimal,
    /// Share of disposable income for the conservative payment.
    pub conservative_share: Decimal,
    /// Share of disposable income for the aggressive payment.
    pub aggressive_share: Decimal,
    pub term_months: u32,
    /// Cash-only fallback band: `cash * low ..= cash * high`.
    pub cash_low_factor: Decimal,
    pub cash_high_factor: Decimal,
    /// Absolute lower bound of the price slider.
    pub price_floor: u32,
    /// Highest allowed `min_price`.
    pub min_price_ceiling: u32,
    /// Absolute upper bound of the price slider.
    pub price_ceiling: u32,
    /// Minimum width of any returned range.
    pub min_band: u32,
}

impl Default for AffordabilityPolicy {
    fn default() -> Self {
        let rates = HashMap::from([
            (CreditTier::Excellent.key().to_string(), dec!(0.04)),
            (CreditTier::Good.key().to_string(), dec!(0.05)),
            (CreditTier::Fair.key().to_string(), dec!(0.08)),
            (CreditTier::Poor.key().to_string(), dec!(0.12)),
        ]);
        Self {
            rates,
            fallback_rate: dec!(0.06),
            conservative_share: dec!(0.10),
            aggressive_share: dec!(0.20),
            term_months: 60,
            cash_low_factor: dec!(0.5),
            cash_high_factor: dec!(1.5),
            price_floor: 15_000,
            min_price_ceiling: 80_000,
            price_ceiling: 90_000,
            min_band: 5_000,
        }
    }
}

impl AffordabilityPolicy {
    /// Annual rate assumed for a credit tier.
    pub fn annual_rate(&self, tier: CreditTier) -> Decimal {
        self.rates
            .get(tier.key())
            .copied()
            .unwrap_or(self.fallback_rate)
    }

    /// Reject policies the estimator cannot honour its bounds with.
    pub fn validate(&self) -> Result<(), PolicyError> {
        for (tier, rate) in &self.rates {
            if *rate < Decimal::ZERO {
                return Err(PolicyError::NegativeRate { tier: tier.clone(), rate: *rate });
            }
        }
        if self.fallback_rate < Decimal::ZERO {
            return Err(PolicyError::NegativeRate {
                tier: "fallback".to_string(),
                rate: self.fallback_rate,
            });
        }
        for (name, value) in [
            ("conservative_share", self.conservative_share),
            ("aggressive_share", self.aggressive_share),
            ("cash_low_factor", self.cash_low_factor),
            ("cash_high_factor", self.cash_high_factor),
        ] {
            if value < Decimal::ZERO {
                return Err(PolicyError::NegativeShare { name, value });
            }
        }
        if self.term_months == 0 {
            return Err(PolicyError::ZeroTerm);
        }
        if self.cash_low_factor > self.cash_high_factor {
            return Err(PolicyError::InvertedCashBand {
                low: self.cash_low_factor,
                high: self.cash_high_factor,
            });
        }
        if self.price_floor > self.min_price_ceiling {
            return Err(PolicyError::FloorAboveMinCeiling {
                floor: self.price_floor,
                min_ceiling: self.min_price_ceiling,
            });
        }
        let fits = self
            .min_price_ceiling
            .checked_add(self.min_band)
            .is_some_and(|top| top <= self.price_ceiling);
        if !fits {
            return Err(PolicyError::BandExceedsCeiling {
                min_ceiling: self.min_price_ceiling,
                band: self.min_band,
                ceiling: self.price_ceiling,
            });
        }

        let ordered = CreditTier::ALL
            .windows(2)
            .all(|pair| self.annual_rate(pair[0]) <= self.annual_rate(pair[1]));
        if !ordered {
            warn!(
                excellent = %self.annual_rate(CreditTier::Excellent),
                good = %self.annual_rate(CreditTier::Good),
                fair = %self.annual_rate(CreditTier::Fair),
                poor = %self.annual_rate(CreditTier::Poor),
                "Credit tier rates are not ordered; better credit may yield a smaller range"
            );
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Filter defaults
// ---------------------------------------------------------------------------

/// Slider domain of the wizard's filter panel.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct FilterDefaults {
    pub price_range: [u32; 2],
    pub mpg_range: [u32; 2],
}

impl Default for FilterDefaults {
    fn default() -> Self {
        Self {
            price_range: [15_000, 90_000],
            mpg_range: [15, 60],
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        Self::parse(&contents)
            .with_context(|| format!("Failed to parse config file: {path}"))
    }

    /// Parse and validate configuration from TOML text.
    pub fn parse(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents).context("Invalid TOML")?;
        config.policy.validate().context("Invalid affordability policy")?;
        Ok(config)
    }
}
