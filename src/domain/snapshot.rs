//! Saving and restoring simulator state through a [`SnapshotPort`].

use std::collections::HashSet;

use crate::domain::error::FincalcError;
use crate::domain::portfolio::Portfolio;
use crate::ports::snapshot_port::SnapshotPort;

/// Fixed store key for the simulator portfolio.
pub const PORTFOLIO_KEY: &str = "fincalc.simulator.portfolio";

pub fn save_portfolio(store: &dyn SnapshotPort, portfolio: &Portfolio) -> Result<(), FincalcError> {
    let blob = serde_json::to_string(portfolio).map_err(|e| FincalcError::Snapshot {
        reason: format!("failed to encode portfolio: {e}"),
    })?;
    store.save(PORTFOLIO_KEY, &blob)
}

pub fn load_portfolio(store: &dyn SnapshotPort) -> Result<Option<Portfolio>, FincalcError> {
    let Some(blob) = store.load(PORTFOLIO_KEY)? else {
        return Ok(None);
    };
    let portfolio: Portfolio = serde_json::from_str(&blob).map_err(|e| FincalcError::Snapshot {
        reason: format!("stored portfolio is unreadable: {e}"),
    })?;
    check_portfolio(&portfolio).map_err(|reason| FincalcError::Snapshot {
        reason: format!("stored portfolio is invalid: {reason}"),
    })?;
    Ok(Some(portfolio))
}

/// Rejects state that `buy` and `sell` could never have produced.
fn check_portfolio(portfolio: &Portfolio) -> Result<(), String> {
    if !portfolio.cash.is_finite() || portfolio.cash < 0.0 {
        return Err(format!("cash {} is not a non-negative amount", portfolio.cash));
    }

    let mut seen = HashSet::new();
    for holding in &portfolio.holdings {
        if !seen.insert(holding.symbol.as_str()) {
            return Err(format!("symbol {} is held more than once", holding.symbol));
        }
        if !holding.quantity.is_finite() || holding.quantity <= 0.0 {
            return Err(format!("{} quantity {} must be positive", holding.symbol, holding.quantity));
        }
        if !holding.average_price.is_finite() || holding.average_price <= 0.0 {
            return Err(format!(
                "{} average price {} must be positive",
                holding.symbol, holding.average_price
            ));
        }
    }

    if let Some(max_id) = portfolio.transactions.iter().map(|t| t.id).max() {
        if portfolio.next_transaction_id <= max_id {
            return Err(format!(
                "next transaction id {} does not follow stored id {}",
                portfolio.next_transaction_id, max_id
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::holding::{Holding, TradeSide, Transaction};
    use chrono::NaiveDate;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MemoryStore {
        blobs: RefCell<HashMap<String, String>>,
    }

    impl SnapshotPort for MemoryStore {
        fn load(&self, key: &str) -> Result<Option<String>, FincalcError> {
            Ok(self.blobs.borrow().get(key).cloned())
        }

        fn save(&self, key: &str, blob: &str) -> Result<(), FincalcError> {
            self.blobs.borrow_mut().insert(key.to_string(), blob.to_string());
            Ok(())
        }
    }

    #[test]
    fn round_trip() {
        let store = MemoryStore::default();
        let mut portfolio = Portfolio::new(2_500.0);
        portfolio.holdings.push(Holding {
            symbol: "ETH".into(),
            quantity: 1.5,
            average_price: 2_000.0,
        });

        save_portfolio(&store, &portfolio).unwrap();
        assert!(store.blobs.borrow().contains_key(PORTFOLIO_KEY));
        assert_eq!(load_portfolio(&store).unwrap(), Some(portfolio));
    }

    #[test]
    fn empty_store() {
        let store = MemoryStore::default();
        assert_eq!(load_portfolio(&store).unwrap(), None);
    }

    #[test]
    fn corrupt_blob_is_an_error() {
        let store = MemoryStore::default();
        store.save(PORTFOLIO_KEY, "{not json").unwrap();
        assert!(matches!(
            load_portfolio(&store),
            Err(FincalcError::Snapshot { .. })
        ));
    }

    fn stored(portfolio: &Portfolio) -> Result<Option<Portfolio>, FincalcError> {
        let store = MemoryStore::default();
        let blob = serde_json::to_string(portfolio).unwrap();
        store.save(PORTFOLIO_KEY, &blob).unwrap();
        load_portfolio(&store)
    }

    fn holding(symbol: &str, quantity: f64, average_price: f64) -> Holding {
        Holding {
            symbol: symbol.into(),
            quantity,
            average_price,
        }
    }

    fn assert_invalid(result: Result<Option<Portfolio>, FincalcError>, needle: &str) {
        match result {
            Err(FincalcError::Snapshot { reason }) => {
                assert!(reason.contains(needle), "unexpected reason: {reason}")
            }
            other => panic!("expected snapshot error, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_symbols_are_rejected() {
        let mut portfolio = Portfolio::new(100.0);
        portfolio.holdings.push(holding("BTC", 1.0, 60_000.0));
        portfolio.holdings.push(holding("BTC", 2.0, 50_000.0));
        assert_invalid(stored(&portfolio), "more than once");
    }

    #[test]
    fn negative_cash_is_rejected() {
        let mut portfolio = Portfolio::new(0.0);
        portfolio.cash = -5.0;
        assert_invalid(stored(&portfolio), "cash");
    }

    #[test]
    fn non_positive_holding_figures_are_rejected() {
        let mut portfolio = Portfolio::new(100.0);
        portfolio.holdings.push(holding("ETH", 0.0, 2_000.0));
        assert_invalid(stored(&portfolio), "quantity");

        let mut portfolio = Portfolio::new(100.0);
        portfolio.holdings.push(holding("ETH", 1.0, -3.0));
        assert_invalid(stored(&portfolio), "average price");
    }

    #[test]
    fn stale_transaction_counter_is_rejected() {
        let mut portfolio = Portfolio::new(100.0);
        portfolio.transactions.push(Transaction {
            id: 4,
            side: TradeSide::Buy,
            symbol: "ETH".into(),
            quantity: 1.0,
            price: 2_000.0,
            date: NaiveDate::from_ymd_opt(2024, 5, 1)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
        });
        portfolio.next_transaction_id = 4;
        assert_invalid(stored(&portfolio), "next transaction id");

        portfolio.next_transaction_id = 5;
        assert_eq!(stored(&portfolio).unwrap(), Some(portfolio));
    }
}
