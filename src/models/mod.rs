use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One closed (or forming) candle from the exchange
///
/// Only the close is used by the indicators; `open_time` is kept for logging.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Candle {
    pub open_time: DateTime<Utc>,
    pub close: f64,
}

/// Trading signal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Signal {
    Buy,
    Sell,
    Hold,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    /// Wire name used by the exchange
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderSide::Buy => "BUY",
            OrderSide::Sell => "SELL",
        }
    }
}

/// Result of a placed market order
#[derive(Debug, Clone, PartialEq)]
pub struct OrderResult {
    pub symbol: String,
    pub quantity: Decimal,
    pub order_id: u64,
}

/// Most recent account trade for a symbol
#[derive(Debug, Clone, PartialEq)]
pub struct Trade {
    pub quantity: Decimal,
}

/// Extract closing prices, oldest first
pub fn closes(candles: &[Candle]) -> Vec<f64> {
    candles.iter().map(|c| c.close).collect()
}
