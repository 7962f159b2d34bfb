use std::future::Future;
use std::time::Duration;

use rust_decimal::Decimal;

use crate::api::ExchangeClient;
use crate::error::{ExchangeError, MonitorError};
use crate::models::{Candle, OrderResult, Signal};

/// What happened to one symbol on one tick
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionOutcome {
    Bought(OrderResult),
    Sold(OrderResult),
    Held,
}

/// Turns signals into exchange orders
///
/// Owns the exchange client and bounds every call with `call_timeout`.
pub struct Executor<E> {
    exchange: E,
    buy_quote_amount: Decimal,
    call_timeout: Duration,
}

impl<E: ExchangeClient> Executor<E> {
    pub fn new(exchange: E, buy_quote_amount: Decimal, call_timeout: Duration) -> Self {
        Self {
            exchange,
            buy_quote_amount,
            call_timeout,
        }
    }

    pub fn exchange(&self) -> &E {
        &self.exchange
    }

    pub async fn fetch_candles(
        &self,
        symbol: &str,
        interval: &str,
    ) -> Result<Vec<Candle>, ExchangeError> {
        self.bounded(self.exchange.fetch_candles(symbol, interval))
            .await
    }

    /// Act on a signal for `symbol`
    ///
    /// Buy spends the fixed quote amount. Sell liquidates the quantity of the
    /// last account trade and fails with `NoPosition` when there is none.
    pub async fn execute(
        &self,
        symbol: &str,
        signal: Signal,
    ) -> Result<ExecutionOutcome, MonitorError> {
        match signal {
            Signal::Buy => {
                let order = self
                    .bounded(self.exchange.place_market_buy(symbol, self.buy_quote_amount))
                    .await?;
                tracing::info!(
                    "buy={} amount={} id={}",
                    order.symbol,
                    order.quantity,
                    order.order_id
                );
                Ok(ExecutionOutcome::Bought(order))
            }

            Signal::Sell => {
                let trade = self
                    .bounded(self.exchange.fetch_last_trade(symbol))
                    .await?
                    .ok_or_else(|| MonitorError::NoPosition {
                        symbol: symbol.to_string(),
                    })?;

                let order = self
                    .bounded(self.exchange.place_market_sell(symbol, trade.quantity))
                    .await?;
                tracing::info!(
                    "sell={} amount={} id={}",
                    order.symbol,
                    order.quantity,
                    order.order_id
                );
                Ok(ExecutionOutcome::Sold(order))
            }

            Signal::Hold => {
                // Hold means do nothing
                tracing::debug!("{} no crossover, holding", symbol);
                Ok(ExecutionOutcome::Held)
            }
        }
    }

    async fn bounded<T>(
        &self,
        call: impl Future<Output = Result<T, ExchangeError>>,
    ) -> Result<T, ExchangeError> {
        tokio::time::timeout(self.call_timeout, call)
            .await
            .map_err(|_| ExchangeError::Timeout(self.call_timeout))?
    }
}
