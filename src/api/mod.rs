pub mod auth;
pub mod binance;

pub use binance::BinanceClient;

use std::future::Future;

use rust_decimal::Decimal;

use crate::error::ExchangeError;
use crate::models::{Candle, OrderResult, Trade};

/// The exchange operations the monitor depends on
///
/// `BinanceClient` is the live implementation; tests substitute a recording
/// stub.
pub trait ExchangeClient: Send + Sync {
    /// Recent candles for `symbol`, oldest first
    fn fetch_candles(
        &self,
        symbol: &str,
        interval: &str,
    ) -> impl Future<Output = Result<Vec<Candle>, ExchangeError>> + Send;

    /// Market buy spending `quote_amount` of the quote currency
    fn place_market_buy(
        &self,
        symbol: &str,
        quote_amount: Decimal,
    ) -> impl Future<Output = Result<OrderResult, ExchangeError>> + Send;

    /// Market sell of `quantity` base units
    fn place_market_sell(
        &self,
        symbol: &str,
        quantity: Decimal,
    ) -> impl Future<Output = Result<OrderResult, ExchangeError>> + Send;

    /// Most recent account trade, `None` when the account never traded `symbol`
    fn fetch_last_trade(
        &self,
        symbol: &str,
    ) -> impl Future<Output = Result<Option<Trade>, ExchangeError>> + Send;
}
