/// Calculate Simple Moving Average (SMA) over the last `period` prices
pub fn calculate_sma(prices: &[f64], period: usize) -> Option<f64> {
    if period == 0 || prices.len() < period {
        return None;
    }

    let sum: f64 = prices.iter().rev().take(period).sum();
    Some(sum / period as f64)
}

/// Calculate the Exponential Moving Average (EMA) series
///
/// The first value is the SMA of the first `period` prices, every following
/// value applies the `2 / (period + 1)` smoothing factor. The output has
/// `prices.len() - period + 1` values, oldest first.
pub fn calculate_ema_series(prices: &[f64], period: usize) -> Option<Vec<f64>> {
    if period == 0 || prices.len() < period {
        return None;
    }

    let multiplier = 2.0 / (period as f64 + 1.0);

    // Start with SMA
    let initial_sma = calculate_sma(&prices[0..period], period)?;

    let mut series = Vec::with_capacity(prices.len() - period + 1);
    series.push(initial_sma);

    let mut ema = initial_sma;
    for price in &prices[period..] {
        ema = (price - ema) * multiplier + ema;
        series.push(ema);
    }

    Some(series)
}

/// Calculate the latest Exponential Moving Average (EMA) value
pub fn calculate_ema(prices: &[f64], period: usize) -> Option<f64> {
    calculate_ema_series(prices, period)?.last().copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sma() {
        let prices = vec![100.0, 102.0, 104.0, 106.0, 108.0];
        let sma = calculate_sma(&prices, 5);
        assert_eq!(sma, Some(104.0));
    }

    #[test]
    fn test_sma_insufficient_data() {
        let prices = vec![100.0, 102.0];
        let sma = calculate_sma(&prices, 5);
        assert!(sma.is_none());
    }

    #[test]
    fn test_ema() {
        let prices = vec![100.0, 102.0, 104.0, 106.0, 108.0, 110.0];
        let ema = calculate_ema(&prices, 5);
        assert!(ema.is_some());
        assert!(ema.unwrap() > 104.0); // EMA should be above initial SMA
    }

    #[test]
    fn test_ema_series_length() {
        let prices: Vec<f64> = (0..40).map(|i| 100.0 + i as f64).collect();

        for period in 1..=40 {
            let series = calculate_ema_series(&prices, period).unwrap();
            assert_eq!(series.len(), prices.len() - period + 1);
        }
    }

    #[test]
    fn test_ema_series_constant_prices() {
        let prices = vec![10.0; 30];

        for period in [1, 12, 26, 30] {
            let series = calculate_ema_series(&prices, period).unwrap();
            assert!(series.iter().all(|&v| (v - 10.0).abs() < 1e-12));
        }
    }

    #[test]
    fn test_ema_series_seed_and_step() {
        // SMA(1,2,3) = 2, then (4 - 2) * 0.5 + 2 = 3
        let series = calculate_ema_series(&[1.0, 2.0, 3.0, 4.0], 3).unwrap();
        assert_eq!(series, vec![2.0, 3.0]);
    }

    #[test]
    fn test_ema_series_insufficient_data() {
        assert!(calculate_ema_series(&[1.0, 2.0], 3).is_none());
        assert!(calculate_ema_series(&[1.0, 2.0], 0).is_none());
    }
}
