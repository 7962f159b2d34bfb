use chrono::Utc;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use super::executor::{ExecutionOutcome, Executor};
use super::shutdown::Shutdown;
use crate::api::ExchangeClient;
use crate::config::MonitorConfig;
use crate::error::MonitorError;
use crate::strategy::{EmaCrossStrategy, Strategy};

pub const TICK_SEPARATOR: &str = "-----------------------------------------------";

/// Result of processing one symbol during a tick
#[derive(Debug)]
pub struct SymbolReport {
    pub symbol: String,
    pub result: Result<ExecutionOutcome, MonitorError>,
}

/// Polls candles for a fixed symbol set and trades EMA crossovers
///
/// Symbols are handled strictly one after another; a failure on one symbol is
/// logged and never stops the tick.
pub struct Monitor<E> {
    executor: Executor<E>,
    strategy: EmaCrossStrategy,
    config: MonitorConfig,
}

impl<E: ExchangeClient> Monitor<E> {
    pub fn new(exchange: E, config: MonitorConfig) -> Self {
        let executor = Executor::new(exchange, config.buy_quote_amount, config.call_timeout);
        let strategy = EmaCrossStrategy::default().with_rsi_mode(config.rsi_mode);

        Self {
            executor,
            strategy,
            config,
        }
    }

    pub fn exchange(&self) -> &E {
        self.executor.exchange()
    }

    /// Run until `shutdown` fires
    ///
    /// The first tick happens one period after start. Cancellation is checked
    /// while waiting, when the ticker fires, and between symbols.
    pub async fn run(&self, mut shutdown: Shutdown) {
        let period = self.config.tick_period;
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        tracing::info!(
            "Monitoring {} symbols every {:?} ({} candles, {})",
            self.config.symbols.len(),
            period,
            self.config.interval,
            self.strategy.name()
        );

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = ticker.tick() => {}
            }

            if shutdown.is_cancelled() {
                break;
            }

            self.run_tick(&shutdown).await;
        }

        tracing::info!("Monitor stopped");
    }

    /// Process every configured symbol once, in order
    pub async fn run_tick(&self, shutdown: &Shutdown) -> Vec<SymbolReport> {
        tracing::debug!("[TICK] at {}", Utc::now().format("%H:%M:%S"));

        let mut reports = Vec::with_capacity(self.config.symbols.len());

        for symbol in &self.config.symbols {
            if shutdown.is_cancelled() {
                tracing::info!("Shutdown requested, abandoning tick");
                return reports;
            }

            let result = self.process_symbol(symbol).await;
            match &result {
                Ok(_) => {}
                Err(e @ MonitorError::NoPosition { .. }) => tracing::warn!("{}", e),
                Err(e) => tracing::error!("can't process {}: {}", symbol, e),
            }

            reports.push(SymbolReport {
                symbol: symbol.clone(),
                result,
            });
        }

        tracing::info!("{}", TICK_SEPARATOR);
        reports
    }

    async fn process_symbol(&self, symbol: &str) -> Result<ExecutionOutcome, MonitorError> {
        let candles = self
            .executor
            .fetch_candles(symbol, &self.config.interval)
            .await?;

        let evaluation = self.strategy.evaluate(&candles)?;
        tracing::info!("{}", evaluation.zone.describe(symbol));

        self.executor.execute(symbol, evaluation.signal).await
    }
}
