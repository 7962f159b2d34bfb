// Technical indicators module
// Implements EMA and RSI series for the crossover strategy

pub mod moving_average;
pub mod rsi;

pub use moving_average::{calculate_ema, calculate_ema_series, calculate_sma};
pub use rsi::{calculate_rsi, calculate_rsi_series};
