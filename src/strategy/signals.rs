use crate::error::EvaluationError;
use crate::models::Signal;

/// How the RSI reading affects the crossover decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RsiMode {
    /// RSI is reported only, the crossover alone decides
    #[default]
    Informational,
    /// Buys are dropped while overbought, sells are dropped while oversold
    Confirm,
}

/// Configuration for signal generation
#[derive(Debug, Clone)]
pub struct SignalConfig {
    pub short_ema_period: usize,
    pub long_ema_period: usize,
    pub rsi_period: usize,
    pub rsi_oversold: f64,
    pub rsi_overbought: f64,
    pub rsi_mode: RsiMode,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            short_ema_period: 12,
            long_ema_period: 26,
            rsi_period: 14,
            rsi_oversold: 30.0,
            rsi_overbought: 70.0,
            rsi_mode: RsiMode::Informational,
        }
    }
}

impl SignalConfig {
    /// Candles needed before the last two EMA points and the last RSI point exist
    ///
    /// # Example
    /// ```
    /// use trendbot::strategy::signals::SignalConfig;
    ///
    /// let config = SignalConfig::default();
    /// // max(26, 14) + 2
    /// assert_eq!(config.min_candles_required(), 28);
    /// ```
    pub fn min_candles_required(&self) -> usize {
        self.long_ema_period
            .max(self.short_ema_period)
            .max(self.rsi_period)
            + 2
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crossover {
    /// Short EMA moved from below to above the long EMA (golden cross)
    Up,
    /// Short EMA moved from above to below the long EMA (death cross)
    Down,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RsiZone {
    Oversold,
    Overbought,
    Neutral,
}

impl RsiZone {
    /// Report line for the monitor log
    pub fn describe(&self, symbol: &str) -> String {
        match self {
            RsiZone::Oversold => format!("{} OVERSOLD RSI < 30", symbol),
            RsiZone::Overbought => format!("{} OVERBOUGHT RSI > 70", symbol),
            RsiZone::Neutral => format!("{} MIDDLE 30 < RSI < 70", symbol),
        }
    }
}

/// Outcome of evaluating one symbol on one tick
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub signal: Signal,
    pub crossover: Crossover,
    pub zone: RsiZone,
    pub rsi: f64,
}

/// Compare the last two points of both EMA series
///
/// A cross only fires on the point where the strict inequality flips.
pub fn detect_crossover(short: &[f64], long: &[f64]) -> Result<Crossover, EvaluationError> {
    let (Some(short_tail), Some(long_tail)) = (last_two(short), last_two(long)) else {
        return Err(EvaluationError::InsufficientHistory {
            required: 2,
            available: short.len().min(long.len()),
        });
    };

    let (short_prev, short_last) = short_tail;
    let (long_prev, long_last) = long_tail;

    if short_prev < long_prev && short_last > long_last {
        Ok(Crossover::Up)
    } else if short_prev > long_prev && short_last < long_last {
        Ok(Crossover::Down)
    } else {
        Ok(Crossover::None)
    }
}

pub fn classify_rsi(rsi: f64, config: &SignalConfig) -> RsiZone {
    if rsi < config.rsi_oversold {
        RsiZone::Oversold
    } else if rsi > config.rsi_overbought {
        RsiZone::Overbought
    } else {
        RsiZone::Neutral
    }
}

/// Map the indicator tails to a trading signal
pub fn evaluate_signal(
    ema_short: &[f64],
    ema_long: &[f64],
    rsi: &[f64],
    config: &SignalConfig,
) -> Result<Evaluation, EvaluationError> {
    let crossover = detect_crossover(ema_short, ema_long)?;
    let latest_rsi = *rsi
        .last()
        .ok_or(EvaluationError::InsufficientHistory {
            required: 1,
            available: 0,
        })?;
    let zone = classify_rsi(latest_rsi, config);

    let signal = match (crossover, config.rsi_mode, zone) {
        (Crossover::Up, RsiMode::Confirm, RsiZone::Overbought) => {
            tracing::debug!(rsi = latest_rsi, "Golden cross suppressed while overbought");
            Signal::Hold
        }
        (Crossover::Down, RsiMode::Confirm, RsiZone::Oversold) => {
            tracing::debug!(rsi = latest_rsi, "Death cross suppressed while oversold");
            Signal::Hold
        }
        (Crossover::Up, _, _) => Signal::Buy,
        (Crossover::Down, _, _) => Signal::Sell,
        (Crossover::None, _, _) => Signal::Hold,
    };

    Ok(Evaluation {
        signal,
        crossover,
        zone,
        rsi: latest_rsi,
    })
}

fn last_two(series: &[f64]) -> Option<(f64, f64)> {
    match series {
        [.., prev, last] => Some((*prev, *last)),
        _ => None,
    }
}
