//! Affordability estimator.
//!
//! Converts a `FinancialProfile` into a recommended vehicle price range
//! using a fixed-term loan model:
//!
//! ```text
//! disposable = income - expenses
//! payment    = disposable * share          (10% conservative, 20% aggressive)
//! loan       = payment * (1 - (1 + r)^-n) / r
//! price      = loan + cash
//! ```
//!
//! The result is clamped to the price slider domain. Profiles with no
//! income use a band around the available cash instead. Profiles with
//! neither income nor cash yield no estimate at all.

use rust_decimal::Decimal;
use tracing::debug;

use super::amortization::{loan_for_payment, saturating_add, saturating_mul, to_whole_units};
use crate::config::AffordabilityPolicy;
use crate::types::{FinancialProfile, PolicyError, PriceRange};

// ---------------------------------------------------------------------------
// Estimator
// ---------------------------------------------------------------------------

/// Stateless estimator over an immutable, validated policy.
#[derive(Debug, Clone, Default)]
pub struct AffordabilityEstimator {
    policy: AffordabilityPolicy,
}

impl AffordabilityEstimator {
    pub fn new(policy: AffordabilityPolicy) -> Result<Self, PolicyError> {
        policy.validate()?;
        Ok(Self { policy })
    }

    /// Access the policy this estimator was built with.
    pub fn policy(&self) -> &AffordabilityPolicy {
        &self.policy
    }

    /// Recommended price range for a profile, or `None` when there is not
    /// enough data (no income and no cash).
    pub fn estimate(&self, profile: &FinancialProfile) -> Option<PriceRange> {
        let income = profile.monthly_income.max(Decimal::ZERO);
        let expenses = profile.monthly_expenses.max(Decimal::ZERO);
        let cash = profile.cash_available.max(Decimal::ZERO);

        if income.is_zero() && cash.is_zero() {
            debug!("No income and no cash; leaving price filter unchanged");
            return None;
        }

        let (raw_min, raw_max) = if income.is_zero() {
            self.cash_only_band(cash)
        } else {
            self.amortized_band(income - expenses, cash, profile)
        };

        let range = self.clamp_to_domain(raw_min, raw_max);
        debug!(
            raw_min,
            raw_max,
            min_price = range.min_price,
            max_price = range.max_price,
            "Affordability range estimated"
        );
        Some(range)
    }

    /// `cash * low ..= cash * high`, ignoring expenses and credit.
    fn cash_only_band(&self, cash: Decimal) -> (u32, u32) {
        let low = to_whole_units(saturating_mul(cash, self.policy.cash_low_factor));
        let high = to_whole_units(saturating_mul(cash, self.policy.cash_high_factor));
        debug!(%cash, low, high, "No income; using cash-only band");
        (low, high)
    }

    /// Loan principal for the conservative and aggressive payments, plus cash.
    fn amortized_band(
        &self,
        disposable: Decimal,
        cash: Decimal,
        profile: &FinancialProfile,
    ) -> (u32, u32) {
        let annual_rate = self.policy.annual_rate(profile.credit_tier);
        let term = self.policy.term_months;

        // Shares are non-negative, so flooring first is the same as
        // flooring each payment.
        let spendable = disposable.max(Decimal::ZERO);
        let pay_min = saturating_mul(spendable, self.policy.conservative_share);
        let pay_max = saturating_mul(spendable, self.policy.aggressive_share);

        let loan_min = loan_for_payment(pay_min, annual_rate, term);
        let loan_max = loan_for_payment(pay_max, annual_rate, term);

        debug!(
            tier = %profile.credit_tier,
            %annual_rate,
            %disposable,
            pay_min = %pay_min.round_dp(2),
            pay_max = %pay_max.round_dp(2),
            loan_min = %loan_min.round_dp(2),
            loan_max = %loan_max.round_dp(2),
            "Amortized loan capacity"
        );

        (
            to_whole_units(saturating_add(loan_min, cash)),
            to_whole_units(saturating_add(loan_max, cash)),
        )
    }

    /// Clamp into `[price_floor, price_ceiling]` with at least `min_band` width.
    ///
    /// Sound only for a validated policy: `price_floor <= min_price_ceiling`
    /// and `min_price_ceiling + min_band <= price_ceiling`.
    fn clamp_to_domain(&self, raw_min: u32, raw_max: u32) -> PriceRange {
        let p = &self.policy;
        let min_price = raw_min.clamp(p.price_floor, p.min_price_ceiling);
        let lowest_max = min_price + p.min_band;
        let max_price = raw_max.max(lowest_max).clamp(lowest_max, p.price_ceiling);
        PriceRange { min_price, max_price }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
