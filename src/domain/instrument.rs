//! Tradable instruments and their simulated price walk.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Price floor applied after every tick.
pub const MIN_PRICE: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetClass {
    Stock,
    Crypto,
}

impl AssetClass {
    /// Largest relative move per tick.
    pub fn volatility(self) -> f64 {
        match self {
            AssetClass::Stock => 0.01,
            AssetClass::Crypto => 0.02,
        }
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetClass::Stock => write!(f, "stock"),
            AssetClass::Crypto => write!(f, "crypto"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub class: AssetClass,
}

impl Instrument {
    pub fn new(symbol: &str, name: &str, price: f64, class: AssetClass) -> Self {
        Instrument {
            symbol: symbol.trim().to_uppercase(),
            name: name.to_string(),
            price,
            class,
        }
    }

    pub fn stock(symbol: &str, name: &str, price: f64) -> Self {
        Self::new(symbol, name, price, AssetClass::Stock)
    }

    pub fn crypto(symbol: &str, name: &str, price: f64) -> Self {
        Self::new(symbol, name, price, AssetClass::Crypto)
    }

    /// Multiply the price by `1 + U(-k, k)` and apply the floor.
    pub fn apply_tick<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let k = self.class.volatility();
        let change = rng.gen_range(-k..=k);
        self.price = (self.price * (1.0 + change)).max(MIN_PRICE);
    }
}
