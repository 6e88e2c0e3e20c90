//! Present value of a fixed-payment loan.
//!
//! All arithmetic is checked: inputs come from user text and a
//! configurable policy, so an overflow saturates instead of panicking.

use rust_decimal::prelude::*;

/// Months per year, for converting annual rates.
const MONTHS_PER_YEAR: u32 = 12;

/// Annuity factor `(1 - (1 + r)^-n) / r`, or `n` when `r == 0`.
///
/// If `(1 + r)^n` overflows, the discount term is indistinguishable from
/// zero and the factor converges to `1 / r`.
pub fn annuity_factor(monthly_rate: Decimal, term_months: u32) -> Decimal {
    if monthly_rate <= Decimal::ZERO {
        return Decimal::from(term_months);
    }

    match checked_pow(Decimal::ONE + monthly_rate, term_months) {
        Some(growth) => (Decimal::ONE - Decimal::ONE / growth) / monthly_rate,
        None => Decimal::ONE / monthly_rate,
    }
}

/// Largest principal a `payment` per month repays over `term_months`.
pub fn loan_for_payment(payment: Decimal, annual_rate: Decimal, term_months: u32) -> Decimal {
    let payment = payment.max(Decimal::ZERO);
    let monthly_rate = annual_rate / Decimal::from(MONTHS_PER_YEAR);
    saturating_mul(payment, annuity_factor(monthly_rate, term_months))
}

/// Multiply two non-negative amounts, saturating at `Decimal::MAX`.
pub(crate) fn saturating_mul(a: Decimal, b: Decimal) -> Decimal {
    a.checked_mul(b).unwrap_or(Decimal::MAX)
}

/// Add two non-negative amounts, saturating at `Decimal::MAX`.
pub(crate) fn saturating_add(a: Decimal, b: Decimal) -> Decimal {
    a.checked_add(b).unwrap_or(Decimal::MAX)
}

/// Round to whole currency units (half away from zero), saturating into `u32`.
pub(crate) fn to_whole_units(amount: Decimal) -> u32 {
    if amount <= Decimal::ZERO {
        return 0;
    }
    amount
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
        .unwrap_or(u32::MAX)
}

/// Exponentiation by squaring; `None` on overflow.
fn checked_pow(base: Decimal, mut exp: u32) -> Option<Decimal> {
    let mut result = Decimal::ONE;
    let mut square = base;
    while exp > 0 {
        if exp & 1 == 1 {
            result = result.checked_mul(square)?;
        }
        exp >>= 1;
        if exp > 0 {
            square = square.checked_mul(square)?;
        }
    }
    Some(result)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
