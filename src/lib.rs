//! DREAM BUDGET — affordability estimator for the vehicle-matching wizard.
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod config;
pub mod types;
pub mod budget;
pub mod filters;
