//! Holdings and the trade ledger.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub symbol: String,
    pub quantity: f64,
    /// Quantity-weighted mean purchase price.
    pub average_price: f64,
}

impl Holding {
    pub fn cost_basis(&self) -> f64 {
        self.quantity * self.average_price
    }

    pub fn market_value(&self, price: f64) -> f64 {
        self.quantity * price
    }

    pub fn unrealized_pnl(&self, price: f64) -> f64 {
        self.quantity * (price - self.average_price)
    }

    pub fn unrealized_pnl_pct(&self, price: f64) -> f64 {
        if self.average_price > 0.0 {
            (price - self.average_price) / self.average_price * 100.0
        } else {
            0.0
        }
    }

    /// Fold another purchase into the holding.
    pub fn add(&mut self, quantity: f64, price: f64) {
        let total = self.quantity + quantity;
        self.average_price = (self.cost_basis() + quantity * price) / total;
        self.quantity = total;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeSide {
    Buy,
    Sell,
}

impl fmt::Display for TradeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeSide::Buy => write!(f, "BUY"),
            TradeSide::Sell => write!(f, "SELL"),
        }
    }
}

/// A ledger entry. Never modified after it is appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: u64,
    pub side: TradeSide,
    pub symbol: String,
    pub quantity: f64,
    pub price: f64,
    pub date: NaiveDateTime,
}

impl Transaction {
    pub fn value(&self) -> f64 {
        self.quantity * self.price
    }
}
