//! Property checks for the affordability estimator.
//!
//! Sweeps a deterministic grid of profiles instead of random inputs so
//! failures are reproducible by profile.

use rust_decimal::prelude::*;
use rust_decimal_macros::dec;

use dream_budget::budget::AffordabilityEstimator;
use dream_budget::config::AffordabilityPolicy;
use dream_budget::types::{CreditTier, FinancialProfile, PriceRange};

fn round_half_up(amount: Decimal) -> u32 {
    amount
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
        .unwrap()
}

const INCOMES: [u32; 7] = [0, 1, 1500, 3000, 5000, 12000, 60000];
const EXPENSES: [u32; 5] = [0, 800, 2000, 5000, 20000];
const CASH: [u32; 6] = [0, 1, 5000, 20000, 65000, 250000];

fn grid() -> impl Iterator<Item = FinancialProfile> {
    INCOMES.into_iter().flat_map(|income| {
        EXPENSES.into_iter().flat_map(move |expenses| {
            CASH.into_iter().flat_map(move |cash| {
                CreditTier::ALL.into_iter().map(move |tier| {
                    FinancialProfile::new(
                        Decimal::from(income),
                        Decimal::from(expenses),
                        Decimal::from(cash),
                        tier,
                    )
                })
            })
        })
    })
}

#[test]
fn test_no_signal_is_none() {
    let est = AffordabilityEstimator::default();
    for p in grid().filter(|p| p.monthly_income.is_zero() && p.cash_available.is_zero()) {
        assert!(est.estimate(&p).is_none(), "expected no estimate for {p}");
    }
}

#[test]
fn test_every_estimate_within_slider_domain() {
    let est = AffordabilityEstimator::default();
    for p in grid() {
        let Some(r) = est.estimate(&p) else {
            assert!(p.monthly_income.is_zero() && p.cash_available.is_zero());
            continue;
        };
        assert!(r.min_price >= 15_000, "{p} -> {r}");
        assert!(r.min_price <= r.max_price, "{p} -> {r}");
        assert!(r.max_price <= 90_000, "{p} -> {r}");
        assert!(r.width() >= 5_000, "{p} -> {r}");
    }
}

#[test]
fn test_cash_only_matches_naive_band_when_in_bounds() {
    let est = AffordabilityEstimator::default();
    for cash in [30_000u32, 35_555, 50_000, 59_999] {
        let p = FinancialProfile::new(dec!(0), dec!(0), Decimal::from(cash), CreditTier::Good);
        let r = est.estimate(&p).unwrap();
        assert_eq!(r.min_price, round_half_up(Decimal::from(cash) * dec!(0.5)), "cash {cash}");
        assert_eq!(r.max_price, round_half_up(Decimal::from(cash) * dec!(1.5)), "cash {cash}");
    }
}

#[test]
fn test_income_never_decreases_range() {
    let est = AffordabilityEstimator::default();
    for expenses in EXPENSES {
        for cash in CASH {
            for tier in CreditTier::ALL {
                let mut last: Option<PriceRange> = None;
                for income in (500..=30_000).step_by(250) {
                    let p = FinancialProfile::new(
                        Decimal::from(income),
                        Decimal::from(expenses),
                        Decimal::from(cash),
                        tier,
                    );
                    let r = est.estimate(&p).unwrap();
                    if let Some(prev) = last {
                        assert!(r.min_price >= prev.min_price, "{p}: {r} after {prev}");
                        assert!(r.max_price >= prev.max_price, "{p}: {r} after {prev}");
                    }
                    last = Some(r);
                }
            }
        }
    }
}

#[test]
fn test_better_credit_never_lowers_max_price() {
    let est = AffordabilityEstimator::default();
    for income in INCOMES.into_iter().filter(|i| *i > 0) {
        for expenses in EXPENSES {
            for cash in CASH {
                let maxes: Vec<u32> = CreditTier::ALL
                    .into_iter()
                    .map(|tier| {
                        let p = FinancialProfile::new(
                            Decimal::from(income),
                            Decimal::from(expenses),
                            Decimal::from(cash),
                            tier,
                        );
                        est.estimate(&p).unwrap().max_price
                    })
                    .collect();
                assert!(
                    maxes.windows(2).all(|w| w[0] >= w[1]),
                    "income {income} expenses {expenses} cash {cash}: {maxes:?}"
                );
            }
        }
    }
}

#[test]
fn test_repeated_calls_agree() {
    let est = AffordabilityEstimator::default();
    for p in grid() {
        assert_eq!(est.estimate(&p), est.estimate(&p));
    }
}

#[test]
fn test_concurrent_callers_agree() {
    let est = AffordabilityEstimator::default();
    let p = FinancialProfile::new(dec!(5000), dec!(2000), dec!(10000), CreditTier::Excellent);
    let expected = est.estimate(&p);

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..8).map(|_| s.spawn(|| est.estimate(&p))).collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), expected);
        }
    });
}

#[test]
fn test_documented_scenarios() {
    let est = AffordabilityEstimator::default();

    let r = est
        .estimate(&FinancialProfile::new(dec!(5000), dec!(2000), dec!(10000), CreditTier::Excellent))
        .unwrap();
    assert!(r.min_price >= 15_000 && r.max_price <= 90_000);
    assert!(r.max_price > r.min_price + 5_000);

    assert!(est
        .estimate(&FinancialProfile::new(dec!(0), dec!(0), dec!(0), CreditTier::Good))
        .is_none());

    let r = est
        .estimate(&FinancialProfile::new(dec!(0), dec!(0), dec!(20000), CreditTier::Fair))
        .unwrap();
    assert_eq!((r.min_price, r.max_price), (15_000, 30_000));

    let r = est
        .estimate(&FinancialProfile::new(dec!(3000), dec!(3000), dec!(0), CreditTier::Poor))
        .unwrap();
    assert_eq!((r.min_price, r.max_price), (15_000, 20_000));
}

#[test]
fn test_longer_term_policy_widens_range() {
    let base = AffordabilityEstimator::default();
    let long = AffordabilityEstimator::new(AffordabilityPolicy {
        term_months: 84,
        ..Default::default()
    })
    .unwrap();
    let p = FinancialProfile::new(dec!(4000), dec!(1000), dec!(0), CreditTier::Good);
    let a = base.estimate(&p).unwrap();
    let b = long.estimate(&p).unwrap();
    assert!(b.min_price > a.min_price);
    assert!(b.max_price > a.max_price);
}
