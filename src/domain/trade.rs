//! Buy and sell transitions for the simulator portfolio.
//!
//! Both operations validate first and return a new [`Portfolio`] on success.
//! On rejection the caller's portfolio is untouched and the [`TradeError`]
//! explains why.

use chrono::NaiveDateTime;

use super::error::TradeError;
use super::holding::{Holding, TradeSide, Transaction};
use super::instrument::Instrument;
use super::portfolio::Portfolio;

/// Remaining quantities at or below this are treated as a closed holding.
pub const QUANTITY_EPSILON: f64 = 1e-9;

fn validate(instrument: &Instrument, quantity: f64) -> Result<(), TradeError> {
    if !quantity.is_finite() || quantity <= 0.0 {
        return Err(TradeError::InvalidQuantity { quantity });
    }
    if !instrument.price.is_finite() || instrument.price <= 0.0 {
        return Err(TradeError::InvalidPrice {
            symbol: instrument.symbol.clone(),
        });
    }
    Ok(())
}

fn append_transaction(
    portfolio: &mut Portfolio,
    side: TradeSide,
    instrument: &Instrument,
    quantity: f64,
    date: NaiveDateTime,
) {
    portfolio.transactions.push(Transaction {
        id: portfolio.next_transaction_id,
        side,
        symbol: instrument.symbol.clone(),
        quantity,
        price: instrument.price,
        date,
    });
    portfolio.next_transaction_id += 1;
}

pub fn buy(
    portfolio: &Portfolio,
    instrument: &Instrument,
    quantity: f64,
    date: NaiveDateTime,
) -> Result<Portfolio, TradeError> {
    validate(instrument, quantity)?;

    let cost = quantity * instrument.price;
    if cost > portfolio.cash {
        log::debug!(
            "rejected buy of {} {}: cost {:.2} exceeds cash {:.2}",
            quantity,
            instrument.symbol,
            cost,
            portfolio.cash
        );
        return Err(TradeError::InsufficientCash {
            needed: cost,
            available: portfolio.cash,
        });
    }

    let mut next = portfolio.clone();
    next.cash = (next.cash - cost).max(0.0);

    match next.holdings.iter_mut().find(|h| h.symbol == instrument.symbol) {
        Some(holding) => holding.add(quantity, instrument.price),
        None => next.holdings.push(Holding {
            symbol: instrument.symbol.clone(),
            quantity,
            average_price: instrument.price,
        }),
    }

    append_transaction(&mut next, TradeSide::Buy, instrument, quantity, date);
    Ok(next)
}

pub fn sell(
    portfolio: &Portfolio,
    instrument: &Instrument,
    quantity: f64,
    date: NaiveDateTime,
) -> Result<Portfolio, TradeError> {
    validate(instrument, quantity)?;

    let held = portfolio
        .holding(&instrument.symbol)
        .map(|h| h.quantity)
        .ok_or_else(|| TradeError::NoHolding {
            symbol: instrument.symbol.clone(),
        })?;

    if quantity > held + QUANTITY_EPSILON {
        log::debug!(
            "rejected sell of {} {}: only {} held",
            quantity,
            instrument.symbol,
            held
        );
        return Err(TradeError::InsufficientQuantity {
            symbol: instrument.symbol.clone(),
            requested: quantity,
            held,
        });
    }

    // A request within tolerance of the holding closes it; only held units are paid for.
    let filled = quantity.min(held);

    let mut next = portfolio.clone();
    next.cash += filled * instrument.price;

    if let Some(holding) = next.holdings.iter_mut().find(|h| h.symbol == instrument.symbol) {
        holding.quantity -= filled;
    }
    next.holdings.retain(|h| h.quantity > QUANTITY_EPSILON);

    append_transaction(&mut next, TradeSide::Sell, instrument, filled, date);
    Ok(next)
}
