//! Simulator portfolio state.
//!
//! A portfolio is a value: [`crate::domain::trade`] produces new portfolios
//! rather than mutating one in place.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::holding::{Holding, Transaction};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    pub cash: f64,
    pub holdings: Vec<Holding>,
    pub transactions: Vec<Transaction>,
    pub next_transaction_id: u64,
}

impl Portfolio {
    pub fn new(starting_cash: f64) -> Self {
        Portfolio {
            cash: if starting_cash.is_finite() { starting_cash.max(0.0) } else { 0.0 },
            holdings: Vec::new(),
            transactions: Vec::new(),
            next_transaction_id: 1,
        }
    }

    pub fn holding(&self, symbol: &str) -> Option<&Holding> {
        self.holdings.iter().find(|h| h.symbol == symbol)
    }

    pub fn has_holding(&self, symbol: &str) -> bool {
        self.holding(symbol).is_some()
    }

    pub fn holding_count(&self) -> usize {
        self.holdings.len()
    }

    /// Market value of all holdings priced from `price_map`. Holdings without a
    /// price are valued at cost.
    pub fn holdings_value(&self, price_map: &HashMap<String, f64>) -> f64 {
        self.holdings
            .iter()
            .map(|h| match price_map.get(&h.symbol) {
                Some(&price) => h.market_value(price),
                None => h.cost_basis(),
            })
            .sum()
    }

    pub fn total_equity(&self, price_map: &HashMap<String, f64>) -> f64 {
        self.cash + self.holdings_value(price_map)
    }

    pub fn unrealized_pnl(&self, price_map: &HashMap<String, f64>) -> f64 {
        self.holdings
            .iter()
            .filter_map(|h| price_map.get(&h.symbol).map(|&p| h.unrealized_pnl(p)))
            .sum()
    }
}
