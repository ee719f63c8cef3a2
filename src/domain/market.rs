//! The simulated market: a set of instruments and the periodic price tick.

use rand::Rng;
use std::collections::HashMap;
use std::time::Duration;

use super::error::TradeError;
use super::instrument::Instrument;

/// Wall-clock cadence for interactive front ends.
pub const TICK_INTERVAL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Market {
    instruments: Vec<Instrument>,
}

impl Market {
    pub fn new(instruments: Vec<Instrument>) -> Self {
        let mut market = Market::default();
        for instrument in instruments {
            market.list(instrument);
        }
        market
    }

    /// Add an instrument, replacing any existing one with the same symbol.
    pub fn list(&mut self, instrument: Instrument) {
        match self.instruments.iter_mut().find(|i| i.symbol == instrument.symbol) {
            Some(existing) => *existing = instrument,
            None => self.instruments.push(instrument),
        }
    }

    pub fn instruments(&self) -> &[Instrument] {
        &self.instruments
    }

    pub fn get(&self, symbol: &str) -> Option<&Instrument> {
        self.instruments.iter().find(|i| i.symbol == symbol)
    }

    pub fn lookup(&self, symbol: &str) -> Result<&Instrument, TradeError> {
        self.get(symbol).ok_or_else(|| TradeError::UnknownSymbol {
            symbol: symbol.to_string(),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }

    pub fn price_map(&self) -> HashMap<String, f64> {
        self.instruments
            .iter()
            .map(|i| (i.symbol.clone(), i.price))
            .collect()
    }

    /// Apply one random-walk step to every instrument.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for instrument in &mut self.instruments {
            instrument.apply_tick(rng);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::instrument::MIN_PRICE;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample_market() -> Market {
        Market::new(vec![
            Instrument::stock("AAPL", "Apple Inc.", 190.0),
            Instrument::crypto("BTC", "Bitcoin", 43_000.0),
        ])
    }

    #[test]
    fn lookup_by_symbol() {
        let market = sample_market();
        assert_eq!(market.get("BTC").unwrap().name, "Bitcoin");
        assert!(market.get("MSFT").is_none());
        assert_eq!(
            market.lookup("MSFT").unwrap_err(),
            TradeError::UnknownSymbol { symbol: "MSFT".into() }
        );
    }

    #[test]
    fn listing_same_symbol_replaces() {
        let mut market = sample_market();
        market.list(Instrument::stock("AAPL", "Apple", 200.0));
        assert_eq!(market.instruments().len(), 2);
        assert!((market.get("AAPL").unwrap().price - 200.0).abs() < f64::EPSILON);
    }

    #[test]
    fn tick_moves_every_price_and_keeps_symbols() {
        let mut market = sample_market();
        let before = market.price_map();
        let mut rng = StdRng::seed_from_u64(3);
        market.tick(&mut rng);
        let after = market.price_map();
        assert_eq!(before.len(), after.len());
        for (symbol, price) in &after {
            assert!(before.contains_key(symbol));
            assert!(*price >= MIN_PRICE);
        }
    }

    #[test]
    fn tick_interval_is_three_seconds() {
        assert_eq!(TICK_INTERVAL.as_secs(), 3);
    }
}
