//! Scripted simulator run: orders interleaved with price ticks.
//!
//! At step `t` the orders scheduled for `t` execute in script order against the
//! current prices, then every price moves by one tick. Rejected orders are
//! recorded and the run continues.

use chrono::NaiveDateTime;
use rand::Rng;

use super::holding::TradeSide;
use super::market::{Market, TICK_INTERVAL};
use super::order::Order;
use super::portfolio::Portfolio;
use super::trade;

#[derive(Debug, Clone, PartialEq)]
pub struct Rejection {
    pub tick: u32,
    pub order: Order,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquityPoint {
    pub tick: u32,
    pub equity: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionOutcome {
    pub portfolio: Portfolio,
    pub market: Market,
    pub rejections: Vec<Rejection>,
    /// Equity after each step's orders, before that step's tick.
    pub equity_curve: Vec<EquityPoint>,
    pub ticks_run: u32,
}

impl SessionOutcome {
    /// At most `max_points` evenly spaced points of the equity curve. The
    /// first and last points are always kept.
    pub fn sampled_equity_curve(&self, max_points: usize) -> Vec<EquityPoint> {
        let curve = &self.equity_curve;
        if max_points == 0 || curve.is_empty() {
            return Vec::new();
        }
        let step = curve.len().div_ceil(max_points);
        let mut sampled: Vec<EquityPoint> = curve.iter().step_by(step).copied().collect();
        if let Some(last) = curve.last() {
            if sampled.last() != Some(last) {
                if sampled.len() == max_points {
                    sampled.pop();
                }
                sampled.push(*last);
            }
        }
        sampled
    }
}

/// Timestamp of step `tick` when ticks are `TICK_INTERVAL` apart.
pub fn tick_time(start: NaiveDateTime, tick: u32) -> NaiveDateTime {
    let secs = TICK_INTERVAL.as_secs() as i64 * tick as i64;
    start + chrono::Duration::seconds(secs)
}

fn execute(
    portfolio: &Portfolio,
    market: &Market,
    order: &Order,
    date: NaiveDateTime,
) -> Result<Portfolio, String> {
    let instrument = market.lookup(&order.symbol).map_err(|e| e.to_string())?;
    let result = match order.side {
        TradeSide::Buy => trade::buy(portfolio, instrument, order.quantity, date),
        TradeSide::Sell => trade::sell(portfolio, instrument, order.quantity, date),
    };
    result.map_err(|e| e.to_string())
}

pub fn run_session<R: Rng + ?Sized>(
    mut market: Market,
    mut portfolio: Portfolio,
    orders: &[Order],
    ticks: u32,
    start: NaiveDateTime,
    rng: &mut R,
) -> SessionOutcome {
    let mut rejections = Vec::new();
    let mut equity_curve = Vec::with_capacity(ticks as usize);

    for tick in 0..ticks {
        let date = tick_time(start, tick);
        for order in orders.iter().filter(|o| o.tick == tick) {
            match execute(&portfolio, &market, order, date) {
                Ok(next) => portfolio = next,
                Err(reason) => {
                    log::debug!("tick {}: rejected {}: {}", tick, order, reason);
                    rejections.push(Rejection {
                        tick,
                        order: order.clone(),
                        reason,
                    });
                }
            }
        }
        equity_curve.push(EquityPoint {
            tick,
            equity: portfolio.total_equity(&market.price_map()),
        });
        market.tick(rng);
    }

    for order in orders.iter().filter(|o| o.tick >= ticks) {
        rejections.push(Rejection {
            tick: order.tick,
            order: order.clone(),
            reason: format!("scheduled after the last tick ({})", ticks.saturating_sub(1)),
        });
    }

    SessionOutcome {
        portfolio,
        market,
        rejections,
        equity_curve,
        ticks_run: ticks,
    }
}
