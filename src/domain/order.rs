//! Scripted order lists for simulator runs.
//!
//! Grammar: orders separated by `;`, each `<tick> <BUY|SELL> <SYMBOL> <quantity>`.
//! Example: `0 BUY AAPL 10; 5 SELL AAPL 4; 7 BUY BTC 0.25`.

use std::fmt;

use super::error::OrderParseError;
use super::holding::TradeSide;

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub tick: u32,
    pub side: TradeSide,
    pub symbol: String,
    pub quantity: f64,
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.tick, self.side, self.symbol, self.quantity)
    }
}

/// Whitespace-separated tokens with their byte offsets.
fn tokens(segment: &str, base: usize) -> Vec<(usize, &str)> {
    let mut out = Vec::new();
    let mut start = None;
    for (i, c) in segment.char_indices() {
        match (c.is_whitespace(), start) {
            (false, None) => start = Some(i),
            (true, Some(s)) => {
                out.push((base + s, &segment[s..i]));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        out.push((base + s, &segment[s..]));
    }
    out
}

fn parse_order(segment: &str, base: usize) -> Result<Order, OrderParseError> {
    let toks = tokens(segment, base);
    let err = |message: &str, position: usize| OrderParseError {
        message: message.to_string(),
        position,
    };
    let end = base + segment.len();

    let (pos, tick_tok) = *toks.first().ok_or_else(|| err("expected tick number", base))?;
    let tick: u32 = tick_tok
        .parse()
        .map_err(|_| err("expected tick number", pos))?;

    let (pos, side_tok) = *toks.get(1).ok_or_else(|| err("expected BUY or SELL", end))?;
    let side = match side_tok.to_uppercase().as_str() {
        "BUY" => TradeSide::Buy,
        "SELL" => TradeSide::Sell,
        _ => return Err(err("expected BUY or SELL", pos)),
    };

    let (_, symbol_tok) = *toks.get(2).ok_or_else(|| err("expected symbol", end))?;
    let symbol = symbol_tok.to_uppercase();

    let (pos, qty_tok) = *toks.get(3).ok_or_else(|| err("expected quantity", end))?;
    let quantity: f64 = qty_tok.parse().map_err(|_| err("expected quantity", pos))?;
    if !quantity.is_finite() || quantity <= 0.0 {
        return Err(err("quantity must be positive", pos));
    }

    if let Some(&(pos, _)) = toks.get(4) {
        return Err(err("unexpected trailing input", pos));
    }

    Ok(Order {
        tick,
        side,
        symbol,
        quantity,
    })
}

pub fn parse_orders(input: &str) -> Result<Vec<Order>, OrderParseError> {
    let mut orders = Vec::new();
    let mut base = 0;
    for segment in input.split(';') {
        if !segment.trim().is_empty() {
            orders.push(parse_order(segment, base)?);
        }
        base += segment.len() + 1;
    }
    // stable: same-tick orders keep script order
    orders.sort_by_key(|o| o.tick);
    Ok(orders)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_orders() {
        let orders = parse_orders("0 BUY aapl 10; 5 sell AAPL 4.5").unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(
            orders[0],
            Order {
                tick: 0,
                side: TradeSide::Buy,
                symbol: "AAPL".into(),
                quantity: 10.0
            }
        );
        assert_eq!(orders[1].side, TradeSide::Sell);
        assert!((orders[1].quantity - 4.5).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_input_and_trailing_separator() {
        assert!(parse_orders("").unwrap().is_empty());
        assert_eq!(parse_orders("1 BUY BTC 1;").unwrap().len(), 1);
    }

    #[test]
    fn sorts_by_tick_keeping_script_order() {
        let orders = parse_orders("3 BUY A 1; 1 BUY B 1; 3 SELL A 1").unwrap();
        let seq: Vec<String> = orders.iter().map(|o| o.to_string()).collect();
        assert_eq!(seq, vec!["1 BUY B 1", "3 BUY A 1", "3 SELL A 1"]);
    }

    #[test]
    fn reports_position_of_bad_side() {
        let err = parse_orders("0 BUY A 1; 2 HOLD A 1").unwrap_err();
        assert_eq!(err.message, "expected BUY or SELL");
        assert_eq!(err.position, 13);
    }

    #[test]
    fn rejects_bad_tick_and_quantity() {
        assert_eq!(parse_orders("x BUY A 1").unwrap_err().position, 0);
        let err = parse_orders("0 BUY A -2").unwrap_err();
        assert_eq!(err.message, "quantity must be positive");
        assert_eq!(err.position, 8);
        assert_eq!(parse_orders("0 BUY A").unwrap_err().message, "expected quantity");
        assert_eq!(
            parse_orders("0 BUY A 1 extra").unwrap_err().message,
            "unexpected trailing input"
        );
    }
}
