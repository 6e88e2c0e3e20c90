//! DREAM BUDGET — affordability estimator for the vehicle-matching wizard.
//!
//! Entry point. Loads configuration, initialises structured logging,
//! reads a budget dialog form as JSON (from a path or stdin), and prints
//! the resulting price filter and recommendation request as JSON.

use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Read;
use std::path::Path;
use tracing::info;

use dream_budget::budget::{AffordabilityEstimator, BudgetForm};
use dream_budget::config::AppConfig;
use dream_budget::filters::{BudgetSession, FilterState, VehicleFilterRequest};
use dream_budget::types::PriceRange;

const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Serialize)]
struct Output {
    has_budget: bool,
    price_range: Option<PriceRange>,
    request: VehicleFilterRequest,
}

fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    init_logging();

    let cfg = load_config()?;
    let estimator = AffordabilityEstimator::new(cfg.policy.clone())
        .context("Invalid affordability policy")?;

    let form = read_form(std::env::args().nth(1).as_deref())?;

    let mut filters = FilterState::new(&cfg.filters);
    let mut session = BudgetSession::new(estimator);
    let price_range = session.save(form, &mut filters);

    let output = Output {
        has_budget: session.has_budget(),
        price_range,
        request: filters.to_request(),
    };
    let json = serde_json::to_string_pretty(&output).context("Failed to serialise output")?;
    println!("{json}");
    Ok(())
}

/// Config from `DREAM_BUDGET_CONFIG` (or `config.toml`); defaults if absent.
fn load_config() -> Result<AppConfig> {
    let path = std::env::var("DREAM_BUDGET_CONFIG")
        .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

    if !Path::new(&path).exists() {
        info!(path = %path, "No config file found, using default policy");
        return Ok(AppConfig::default());
    }

    let cfg = AppConfig::load(&path)?;
    info!(
        path = %path,
        term_months = cfg.policy.term_months,
        price_floor = cfg.policy.price_floor,
        price_ceiling = cfg.policy.price_ceiling,
        "Configuration loaded"
    );
    Ok(cfg)
}

fn read_form(path: Option<&str>) -> Result<BudgetForm> {
    let json = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read budget form: {path}"))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read budget form from stdin")?;
            buf
        }
    };
    serde_json::from_str(&json).context("Failed to parse budget form JSON")
}

fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("dream_budget=info"));

    let json_logging = std::env::var("DREAM_BUDGET_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    }
}
