use super::{
    signals::{evaluate_signal, Evaluation, RsiMode, SignalConfig},
    Strategy,
};
use crate::error::EvaluationError;
use crate::indicators::{calculate_ema_series, calculate_rsi_series};
use crate::models::{closes, Candle};

/// Dual EMA crossover strategy with RSI reporting
///
/// - EMA(12) crossing EMA(26) decides buy/sell
/// - RSI(14) is classified oversold/overbought/neutral and, in
///   [`RsiMode::Confirm`], vetoes crosses that run against it
#[derive(Debug, Clone, Default)]
pub struct EmaCrossStrategy {
    config: SignalConfig,
}

impl EmaCrossStrategy {
    pub fn new(config: SignalConfig) -> Self {
        Self { config }
    }

    pub fn with_rsi_mode(mut self, rsi_mode: RsiMode) -> Self {
        self.config.rsi_mode = rsi_mode;
        self
    }

    pub fn config(&self) -> &SignalConfig {
        &self.config
    }

    /// Evaluate raw closing prices, oldest first
    pub fn evaluate_closes(&self, prices: &[f64]) -> Result<Evaluation, EvaluationError> {
        let required = self.min_candles_required();
        let insufficient = EvaluationError::InsufficientHistory {
            required,
            available: prices.len(),
        };
        if prices.len() < required {
            return Err(insufficient);
        }

        let ema_short = calculate_ema_series(prices, self.config.short_ema_period)
            .ok_or_else(|| insufficient.clone())?;
        let ema_long = calculate_ema_series(prices, self.config.long_ema_period)
            .ok_or_else(|| insufficient.clone())?;
        let rsi = calculate_rsi_series(prices, self.config.rsi_period).ok_or(insufficient)?;

        tracing::debug!(
            "Indicators: EMA{}={:.4}, EMA{}={:.4}, RSI={:.1}",
            self.config.short_ema_period,
            ema_short.last().copied().unwrap_or_default(),
            self.config.long_ema_period,
            ema_long.last().copied().unwrap_or_default(),
            rsi.last().copied().unwrap_or_default()
        );

        evaluate_signal(&ema_short, &ema_long, &rsi, &self.config)
    }
}

impl Strategy for EmaCrossStrategy {
    fn evaluate(&self, candles: &[Candle]) -> Result<Evaluation, EvaluationError> {
        self.evaluate_closes(&closes(candles))
    }

    fn name(&self) -> &str {
        "EmaCrossStrategy"
    }

    fn min_candles_required(&self) -> usize {
        self.config.min_candles_required()
    }
}
