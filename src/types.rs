//! Shared types for the budget step.
//!
//! These types form the data model used across all modules. The
//! estimator only ever sees `FinancialProfile`; raw dialog text is
//! normalized in `budget::form` before it gets here.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Credit tier
// ---------------------------------------------------------------------------

/// Coarse creditworthiness bucket, used only to pick an interest rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditTier {
    #[default]
    Excellent,
    Good,
    Fair,
    Poor,
}

impl CreditTier {
    pub const ALL: [CreditTier; 4] = [
        CreditTier::Excellent,
        CreditTier::Good,
        CreditTier::Fair,
        CreditTier::Poor,
    ];

    /// Parse a dialog option label such as `"Good (700-749)"`.
    ///
    /// Only the leading word matters. Anything unrecognized falls back to
    /// `Excellent`, the option the dialog starts on.
    pub fn from_label(label: &str) -> Self {
        let head = label
            .trim()
            .split(|c: char| c.is_whitespace() || c == '(')
            .next()
            .unwrap_or("")
            .to_lowercase();
        match head.as_str() {
            "good" => CreditTier::Good,
            "fair" => CreditTier::Fair,
            "poor" => CreditTier::Poor,
            _ => CreditTier::Excellent,
        }
    }

    /// Lowercase key used in the policy rate table.
    pub fn key(&self) -> &'static str {
        match self {
            CreditTier::Excellent => "excellent",
            CreditTier::Good => "good",
            CreditTier::Fair => "fair",
            CreditTier::Poor => "poor",
        }
    }

    /// The option label shown in the budget dialog.
    pub fn label(&self) -> &'static str {
        match self {
            CreditTier::Excellent => "Excellent (750+)",
            CreditTier::Good => "Good (700-749)",
            CreditTier::Fair => "Fair (650-699)",
            CreditTier::Poor => "Poor (<650)",
        }
    }
}

impl fmt::Display for CreditTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CreditTier::Excellent => write!(f, "Excellent"),
            CreditTier::Good => write!(f, "Good"),
            CreditTier::Fair => write!(f, "Fair"),
            CreditTier::Poor => write!(f, "Poor"),
        }
    }
}

// ---------------------------------------------------------------------------
// Financial profile
// ---------------------------------------------------------------------------

/// Normalized financial inputs for one estimate. All amounts are >= 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialProfile {
    pub monthly_income: Decimal,
    pub monthly_expenses: Decimal,
    pub cash_available: Decimal,
    pub credit_tier: CreditTier,
}

impl FinancialProfile {
    /// Build a profile, flooring any negative amount at zero.
    pub fn new(
        monthly_income: Decimal,
        monthly_expenses: Decimal,
        cash_available: Decimal,
        credit_tier: CreditTier,
    ) -> Self {
        Self {
            monthly_income: monthly_income.max(Decimal::ZERO),
            monthly_expenses: monthly_expenses.max(Decimal::ZERO),
            cash_available: cash_available.max(Decimal::ZERO),
            credit_tier,
        }
    }

    /// Income minus expenses. May be negative.
    pub fn disposable_income(&self) -> Decimal {
        self.monthly_income - self.monthly_expenses
    }
}

impl fmt::Display for FinancialProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "income ${}/mo | expenses ${}/mo | cash ${} | credit {}",
            self.monthly_income.round_dp(2),
            self.monthly_expenses.round_dp(2),
            self.cash_available.round_dp(2),
            self.credit_tier,
        )
    }
}

// ---------------------------------------------------------------------------
// Price range
// ---------------------------------------------------------------------------

/// Recommended vehicle price band in whole currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PriceRange {
    pub min_price: u32,
    pub max_price: u32,
}

impl PriceRange {
    /// `None` when `min_price > max_price`.
    pub fn new(min_price: u32, max_price: u32) -> Option<Self> {
        (min_price <= max_price).then_some(Self { min_price, max_price })
    }

    pub fn width(&self) -> u32 {
        self.max_price - self.min_price
    }

    pub fn contains(&self, price: u32) -> bool {
        (self.min_price..=self.max_price).contains(&price)
    }

    /// The `[min, max]` pair the recommendation service expects.
    pub fn as_pair(&self) -> [u32; 2] {
        [self.min_price, self.max_price]
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}–${}", self.min_price, self.max_price)
    }
}

// ---------------------------------------------------------------------------
// Policy errors
// ---------------------------------------------------------------------------

/// Reasons an `AffordabilityPolicy` is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    #[error("annual rate for {tier} must be non-negative, got {rate}")]
    NegativeRate { tier: String, rate: Decimal },

    #[error("payment share `{name}` must be non-negative, got {value}")]
    NegativeShare { name: &'static str, value: Decimal },

    #[error("loan term must be at least one month")]
    ZeroTerm,

    #[error("cash band is inverted: low factor {low} > high factor {high}")]
    InvertedCashBand { low: Decimal, high: Decimal },

    #[error("price floor {floor} is above the minimum-price ceiling {min_ceiling}")]
    FloorAboveMinCeiling { floor: u32, min_ceiling: u32 },

    #[error("minimum-price ceiling {min_ceiling} plus band {band} exceeds the price ceiling {ceiling}")]
    BandExceedsCeiling { min_ceiling: u32, band: u32, ceiling: u32 },
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
