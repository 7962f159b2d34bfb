use std::time::Duration;

use thiserror::Error;

/// Failure talking to the exchange. Never retried; the next tick re-attempts.
#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("exchange rejected request ({status}): code={code} msg={msg}")]
    Api { status: u16, code: i64, msg: String },

    #[error("unexpected response: {0}")]
    Decode(String),

    #[error("exchange call timed out after {0:?}")]
    Timeout(Duration),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluationError {
    #[error("insufficient history: {available} candles, need {required}")]
    InsufficientHistory { required: usize, available: usize },
}

/// Everything that can stop one symbol's processing within a tick
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error(transparent)]
    Exchange(#[from] ExchangeError),

    #[error(transparent)]
    Evaluation(#[from] EvaluationError),

    #[error("no prior trade for {symbol}, nothing to sell")]
    NoPosition { symbol: String },
}
