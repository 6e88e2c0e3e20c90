//! End-to-end: dialog text in, recommendation request out.

use dream_budget::budget::{AffordabilityEstimator, BudgetForm};
use dream_budget::config::AppConfig;
use dream_budget::filters::{BudgetSession, FilterState};

fn form(income: &str, expenses: &str, cash: &str, credit: &str) -> BudgetForm {
    BudgetForm {
        income: income.into(),
        expenses: expenses.into(),
        cash: cash.into(),
        credit_score: credit.into(),
    }
}

#[test]
fn test_dialog_to_request() {
    let cfg = AppConfig::parse("").unwrap();
    let estimator = AffordabilityEstimator::new(cfg.policy.clone()).unwrap();
    let mut session = BudgetSession::new(estimator);
    let mut filters = FilterState::new(&cfg.filters);
    filters.vehicle_types.insert("SUV".into());
    filters.seating.insert(7);

    session.save(form("$5,000", "2000", "10,000", "Excellent (750+)"), &mut filters);

    let json = serde_json::to_value(filters.to_request()).unwrap();
    assert_eq!(json["price_range"], serde_json::json!([26290, 42579]));
    assert_eq!(json["vehicle_types"], serde_json::json!(["SUV"]));
    assert_eq!(json["seating_options"], serde_json::json!([7]));
    assert_eq!(json["mpg_range"], serde_json::json!([15, 60]));
}

#[test]
fn test_unparsable_dialog_leaves_filter() {
    let cfg = AppConfig::default();
    let mut session = BudgetSession::new(AffordabilityEstimator::default());
    let mut filters = FilterState::new(&cfg.filters);

    let result = session.save(form("n/a", "", "-", "Poor (<650)"), &mut filters);
    assert!(result.is_none());
    assert!(!filters.has_any_change(&cfg.filters));
}

#[test]
fn test_config_policy_flows_into_session() {
    let cfg = AppConfig::parse(
        r#"
        [policy]
        price_floor = 20000
        min_band = 10000
        "#,
    )
    .unwrap();
    let mut session = BudgetSession::new(AffordabilityEstimator::new(cfg.policy).unwrap());
    let mut filters = FilterState::new(&cfg.filters);

    let range = session
        .save(form("3000", "3000", "", "Good (700-749)"), &mut filters)
        .unwrap();
    assert_eq!(range.as_pair(), [20_000, 30_000]);
}
