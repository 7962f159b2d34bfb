/// Calculate the Relative Strength Index (RSI) series using Wilder smoothing
///
/// RSI measures the magnitude of recent price changes to evaluate
/// overbought or oversold conditions.
///
/// Values:
/// - RSI > 70: Overbought
/// - RSI < 30: Oversold
///
/// The first average gain/loss is the plain mean of the first `period`
/// changes; later averages use `(prev * (period - 1) + current) / period`.
/// The output has `prices.len() - period` values, oldest first. A flat
/// window (no gains, no losses) reads 50.
pub fn calculate_rsi_series(prices: &[f64], period: usize) -> Option<Vec<f64>> {
    if period == 0 || prices.len() < period + 1 {
        return None;
    }

    let mut gains = Vec::with_capacity(prices.len() - 1);
    let mut losses = Vec::with_capacity(prices.len() - 1);

    // Calculate price changes
    for window in prices.windows(2) {
        let change = window[1] - window[0];
        if change > 0.0 {
            gains.push(change);
            losses.push(0.0);
        } else {
            gains.push(0.0);
            losses.push(change.abs());
        }
    }

    let period_f = period as f64;
    let mut avg_gain: f64 = gains[..period].iter().sum::<f64>() / period_f;
    let mut avg_loss: f64 = losses[..period].iter().sum::<f64>() / period_f;

    let mut series = Vec::with_capacity(prices.len() - period);
    series.push(rsi_from_averages(avg_gain, avg_loss));

    for (gain, loss) in gains[period..].iter().zip(&losses[period..]) {
        avg_gain = (avg_gain * (period_f - 1.0) + gain) / period_f;
        avg_loss = (avg_loss * (period_f - 1.0) + loss) / period_f;
        series.push(rsi_from_averages(avg_gain, avg_loss));
    }

    Some(series)
}

/// Calculate the latest Relative Strength Index (RSI) value
pub fn calculate_rsi(prices: &[f64], period: usize) -> Option<f64> {
    calculate_rsi_series(prices, period)?.last().copied()
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        if avg_gain == 0.0 {
            return 50.0;
        }
        return 100.0;
    }

    let rs = avg_gain / avg_loss;
    100.0 - (100.0 / (1.0 + rs))
}
