// Trading strategy module
pub mod ema_cross;
pub mod signals;

pub use ema_cross::EmaCrossStrategy;
pub use signals::{Crossover, Evaluation, RsiMode, RsiZone, SignalConfig};

use crate::error::EvaluationError;
use crate::models::Candle;

/// Base trait for all trading strategies
pub trait Strategy: Send + Sync {
    /// Evaluate the latest market state from candles ordered oldest first
    fn evaluate(&self, candles: &[Candle]) -> Result<Evaluation, EvaluationError>;

    /// Get strategy name
    fn name(&self) -> &str;

    /// Minimum candles required for this strategy
    fn min_candles_required(&self) -> usize;
}
