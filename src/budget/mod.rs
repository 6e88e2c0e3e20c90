//! Budget step of the wizard.
//!
//! Turns the budget dialog's raw text into a `FinancialProfile` and the
//! profile into a recommended price range:
//! - `form` — text parsing and normalization
//! - `amortization` — loan principal from a fixed monthly payment
//! - `estimator` — the affordability estimator itself

pub mod amortization;
pub mod estimator;
pub mod form;

pub use estimator::AffordabilityEstimator;
pub use form::BudgetForm;
