//! Simulator configuration loading and validation.
//!
//! `[simulator]` holds the run settings; `[stocks]` and `[crypto]` list the
//! tradable instruments as `SYMBOL = price[, display name]`.

use crate::domain::error::FincalcError;
use crate::domain::instrument::{AssetClass, Instrument};
use crate::domain::market::Market;
use crate::domain::order::{parse_orders, Order};
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDateTime;

pub const DEFAULT_TICKS: i64 = 20;
pub const DEFAULT_SEED: i64 = 42;
pub const MAX_TICKS: i64 = 100_000;
const START_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq)]
pub struct SimulatorConfig {
    pub starting_cash: f64,
    pub seed: u64,
    pub ticks: u32,
    /// Timestamp of tick 0; the caller picks one when absent.
    pub start: Option<NaiveDateTime>,
    pub orders: Vec<Order>,
    pub market: Market,
    /// Print the sampled equity curve after a run.
    pub show_equity_curve: bool,
}

pub fn validate_simulator_config(config: &dyn ConfigPort) -> Result<(), FincalcError> {
    load_simulator_config(config).map(|_| ())
}

pub fn load_simulator_config(config: &dyn ConfigPort) -> Result<SimulatorConfig, FincalcError> {
    let starting_cash = validate_starting_cash(config)?;
    let ticks = validate_ticks(config)?;
    let seed = validate_seed(config)?;
    let start = validate_start(config)?;
    let market = build_market(config)?;
    let orders = validate_orders(config, &market)?;
    let show_equity_curve = config.get_bool("simulator", "show_equity_curve", true);
    log::debug!(
        "simulator config: cash {:.2}, {} ticks, {} instruments, {} orders",
        starting_cash,
        ticks,
        market.instruments().len(),
        orders.len()
    );
    Ok(SimulatorConfig {
        starting_cash,
        seed,
        ticks,
        start,
        orders,
        market,
        show_equity_curve,
    })
}

fn invalid(section: &str, key: &str, reason: impl Into<String>) -> FincalcError {
    FincalcError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.into(),
    }
}

fn validate_starting_cash(config: &dyn ConfigPort) -> Result<f64, FincalcError> {
    if config.get_string("simulator", "starting_cash").is_none() {
        return Err(FincalcError::ConfigMissing {
            section: "simulator".to_string(),
            key: "starting_cash".to_string(),
        });
    }
    let value = config.get_double("simulator", "starting_cash", f64::NAN);
    if !value.is_finite() || value <= 0.0 {
        return Err(invalid(
            "simulator",
            "starting_cash",
            "starting_cash must be a positive number",
        ));
    }
    Ok(value)
}

fn validate_ticks(config: &dyn ConfigPort) -> Result<u32, FincalcError> {
    let value = config.get_int("simulator", "ticks", DEFAULT_TICKS);
    if !(0..=MAX_TICKS).contains(&value) {
        return Err(invalid(
            "simulator",
            "ticks",
            format!("ticks must be between 0 and {}", MAX_TICKS),
        ));
    }
    u32::try_from(value).map_err(|_| invalid("simulator", "ticks", "ticks out of range"))
}

fn validate_seed(config: &dyn ConfigPort) -> Result<u64, FincalcError> {
    let value = config.get_int("simulator", "seed", DEFAULT_SEED);
    u64::try_from(value).map_err(|_| invalid("simulator", "seed", "seed must be non-negative"))
}

fn validate_start(config: &dyn ConfigPort) -> Result<Option<NaiveDateTime>, FincalcError> {
    match config.get_string("simulator", "start") {
        Some(s) if !s.trim().is_empty() => NaiveDateTime::parse_from_str(s.trim(), START_FORMAT)
            .map(Some)
            .map_err(|_| {
                invalid(
                    "simulator",
                    "start",
                    "invalid start format, expected YYYY-MM-DD HH:MM:SS",
                )
            }),
        _ => Ok(None),
    }
}

/// Parse a `price[, name]` listing into an instrument.
fn parse_listing(
    section: &str,
    key: &str,
    value: &str,
    class: AssetClass,
) -> Result<Instrument, FincalcError> {
    let (price_str, name) = match value.split_once(',') {
        Some((price, name)) => (price.trim(), name.trim()),
        None => (value.trim(), ""),
    };
    let price: f64 = price_str
        .parse()
        .map_err(|_| invalid(section, key, format!("price '{}' is not a number", price_str)))?;
    if !price.is_finite() || price <= 0.0 {
        return Err(invalid(section, key, "price must be positive"));
    }
    let symbol = key.to_uppercase();
    let name = if name.is_empty() { symbol.as_str() } else { name };
    Ok(Instrument::new(&symbol, name, price, class))
}

pub fn build_market(config: &dyn ConfigPort) -> Result<Market, FincalcError> {
    let mut market = Market::new(Vec::new());
    for (section, class) in [("stocks", AssetClass::Stock), ("crypto", AssetClass::Crypto)] {
        for key in config.keys(section) {
            let value = config.get_string(section, &key).unwrap_or_default();
            market.list(parse_listing(section, &key, &value, class)?);
        }
    }
    if market.is_empty() {
        return Err(invalid(
            "stocks",
            "*",
            "at least one instrument must be listed under [stocks] or [crypto]",
        ));
    }
    Ok(market)
}

fn validate_orders(config: &dyn ConfigPort, market: &Market) -> Result<Vec<Order>, FincalcError> {
    let script = config.get_string("simulator", "orders").unwrap_or_default();
    let orders = parse_orders(&script)?;
    if let Some(order) = orders.iter().find(|o| market.get(&o.symbol).is_none()) {
        return Err(invalid(
            "simulator",
            "orders",
            format!("order '{}' references unknown symbol {}", order, order.symbol),
        ));
    }
    Ok(orders)
}
