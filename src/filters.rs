//! Wizard filter state and its handoff to the recommendation service.
//!
//! The budget estimate is one component of `FilterState`, alongside
//! vehicle types, seating, mpg and free-text preferences. The whole
//! state is serialized as a `VehicleFilterRequest` when the user asks
//! for matches.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, info};

use crate::budget::{AffordabilityEstimator, BudgetForm};
use crate::config::FilterDefaults;
use crate::types::PriceRange;

// ---------------------------------------------------------------------------
// Filter state
// ---------------------------------------------------------------------------

/// Current selections of the filter panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub vehicle_types: BTreeSet<String>,
    pub price_range: PriceRange,
    pub mpg_range: (u32, u32),
    pub seating: BTreeSet<u8>,
    pub preferences_text: String,
}

impl FilterState {
    /// Fresh state with nothing selected and sliders at their extremes.
    pub fn new(defaults: &FilterDefaults) -> Self {
        let [min_price, max_price] = defaults.price_range;
        let [min_mpg, max_mpg] = defaults.mpg_range;
        Self {
            vehicle_types: BTreeSet::new(),
            price_range: PriceRange { min_price, max_price },
            mpg_range: (min_mpg, max_mpg),
            seating: BTreeSet::new(),
            preferences_text: String::new(),
        }
    }

    /// Merge a budget estimate into the price filter.
    ///
    /// `None` means "insufficient data" and leaves the current price range
    /// alone. Returns whether the price range changed.
    pub fn apply_budget(&mut self, estimate: Option<PriceRange>) -> bool {
        match estimate {
            Some(range) if range != self.price_range => {
                debug!(from = %self.price_range, to = %range, "Price filter updated from budget");
                self.price_range = range;
                true
            }
            Some(_) => false,
            None => {
                debug!(current = %self.price_range, "No budget estimate; price filter untouched");
                false
            }
        }
    }

    /// Whether anything differs from a fresh state, which is when the
    /// panel offers to show matches.
    pub fn has_any_change(&self, defaults: &FilterDefaults) -> bool {
        !self.vehicle_types.is_empty()
            || !self.seating.is_empty()
            || self.price_range.as_pair() != defaults.price_range
            || [self.mpg_range.0, self.mpg_range.1] != defaults.mpg_range
            || !self.preferences_text.is_empty()
    }

    /// Serialize-ready request for `/recommend_cars`.
    pub fn to_request(&self) -> VehicleFilterRequest {
        VehicleFilterRequest {
            vehicle_types: self.vehicle_types.iter().cloned().collect(),
            price_range: self.price_range.as_pair(),
            mpg_range: [self.mpg_range.0, self.mpg_range.1],
            seating_options: self.seating.iter().copied().collect(),
            preferences_text: self.preferences_text.clone(),
        }
    }

    /// Replace the state with filters suggested by the recommendation
    /// service. An inverted price pair from the service is ignored.
    pub fn apply_request(&mut self, request: &VehicleFilterRequest) {
        self.vehicle_types = request.vehicle_types.iter().cloned().collect();
        let [min_price, max_price] = request.price_range;
        if let Some(range) = PriceRange::new(min_price, max_price) {
            self.price_range = range;
        }
        self.mpg_range = (request.mpg_range[0], request.mpg_range[1]);
        self.seating = request.seating_options.iter().copied().collect();
        if !request.preferences_text.is_empty() {
            self.preferences_text = request.preferences_text.clone();
        }
    }
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new(&FilterDefaults::default())
    }
}

// ---------------------------------------------------------------------------
// Wire shape
// ---------------------------------------------------------------------------

/// Filter payload exchanged with the recommendation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleFilterRequest {
    #[serde(default)]
    pub vehicle_types: Vec<String>,
    /// `[min_price, max_price]`
    pub price_range: [u32; 2],
    /// `[min_mpg, max_mpg]`
    pub mpg_range: [u32; 2],
    #[serde(default)]
    pub seating_options: Vec<u8>,
    #[serde(default)]
    pub preferences_text: String,
}

// ---------------------------------------------------------------------------
// Budget session
// ---------------------------------------------------------------------------

/// The budget dialog's save action.
///
/// Keeps the last saved form so the dialog reopens pre-filled.
#[derive(Debug, Clone, Default)]
pub struct BudgetSession {
    estimator: AffordabilityEstimator,
    form: BudgetForm,
    has_budget: bool,
}

impl BudgetSession {
    pub fn new(estimator: AffordabilityEstimator) -> Self {
        Self {
            estimator,
            form: BudgetForm::default(),
            has_budget: false,
        }
    }

    /// The form as last saved.
    pub fn form(&self) -> &BudgetForm {
        &self.form
    }

    /// Whether any save has produced a price estimate.
    pub fn has_budget(&self) -> bool {
        self.has_budget
    }

    /// Store the form, estimate, and merge the result into `filters`.
    pub fn save(&mut self, form: BudgetForm, filters: &mut FilterState) -> Option<PriceRange> {
        let profile = form.to_profile();
        self.form = form;

        let estimate = self.estimator.estimate(&profile);
        match estimate {
            Some(range) => {
                info!(%profile, %range, "Budget saved");
                self.has_budget = true;
            }
            None => info!(%profile, "Budget saved without enough data to estimate"),
        }
        filters.apply_budget(estimate);
        estimate
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
