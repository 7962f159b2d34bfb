use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use governor::{Quota, RateLimiter};
use reqwest::{Client, Method, Response};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::auth::{encode_params, signed_query};
use super::ExchangeClient;
use crate::config::{Credentials, ExchangeSettings};
use crate::error::ExchangeError;
use crate::models::{Candle, OrderResult, OrderSide, Trade};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);
const RATE_LIMIT_RPS: u32 = 10; // Well under the 1200 weight/minute spot limit

// Type alias for the rate limiter to simplify signatures
type BinanceRateLimiter = RateLimiter<
    governor::state::direct::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

/// Binance spot REST client
///
/// Cloneable; all clones share the same rate limiter.
#[derive(Clone)]
pub struct BinanceClient {
    client: Client,
    base_url: String,
    credentials: Credentials,
    rate_limiter: Arc<BinanceRateLimiter>,
}

// ============== Response Types ==============

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrderResponse {
    symbol: String,
    order_id: u64,
    #[serde(with = "rust_decimal::serde::str")]
    orig_qty: Decimal,
}

#[derive(Debug, Deserialize)]
struct TradeResponse {
    #[serde(with = "rust_decimal::serde::str")]
    qty: Decimal,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    code: i64,
    msg: String,
}

/// Kline rows are positional arrays: [open time, open, high, low, close, ...]
fn parse_kline(row: &[serde_json::Value]) -> Result<Candle, ExchangeError> {
    let open_time_ms = row
        .first()
        .and_then(|v| v.as_i64())
        .ok_or_else(|| ExchangeError::Decode("kline missing open time".to_string()))?;
    let close = row
        .get(4)
        .and_then(|v| v.as_str())
        .ok_or_else(|| ExchangeError::Decode("kline missing close".to_string()))?
        .parse::<f64>()
        .map_err(|e| ExchangeError::Decode(format!("invalid kline close: {}", e)))?;
    let open_time = DateTime::<Utc>::from_timestamp_millis(open_time_ms)
        .ok_or_else(|| ExchangeError::Decode(format!("invalid open time {}", open_time_ms)))?;

    Ok(Candle { open_time, close })
}

// ============== Implementation ==============

impl BinanceClient {
    pub fn new(settings: ExchangeSettings) -> Result<Self, ExchangeError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        let rps = NonZeroU32::new(RATE_LIMIT_RPS).unwrap_or(NonZeroU32::MIN);
        let rate_limiter = Arc::new(RateLimiter::direct(Quota::per_second(rps)));

        Ok(Self {
            client,
            base_url: settings.base_url,
            credentials: settings.credentials,
            rate_limiter,
        })
    }

    /// Unsigned market-data request
    async fn public_get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, ExchangeError> {
        let url = format!("{}{}?{}", self.base_url, path, encode_params(params));
        self.rate_limiter.until_ready().await;

        let response = self.client.get(&url).send().await?;
        Self::decode(response).await
    }

    /// `SIGNED` account request; parameters travel in the query string
    async fn signed_request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, ExchangeError> {
        let query = signed_query(
            params,
            &self.credentials.secret_key,
            Utc::now().timestamp_millis(),
        );
        let url = format!("{}{}?{}", self.base_url, path, query);
        self.rate_limiter.until_ready().await;

        let response = self
            .client
            .request(method, &url)
            .header("X-MBX-APIKEY", &self.credentials.api_key)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ExchangeError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(match serde_json::from_str::<ApiErrorBody>(&body) {
                Ok(err) => ExchangeError::Api {
                    status: status.as_u16(),
                    code: err.code,
                    msg: err.msg,
                },
                Err(_) => ExchangeError::Api {
                    status: status.as_u16(),
                    code: 0,
                    msg: body,
                },
            });
        }

        serde_json::from_str(&body).map_err(|e| ExchangeError::Decode(e.to_string()))
    }

    async fn place_market_order(
        &self,
        symbol: &str,
        side: OrderSide,
        sizing: (&str, Decimal),
    ) -> Result<OrderResult, ExchangeError> {
        let (sizing_key, amount) = sizing;
        let params = [
            ("symbol", symbol.to_string()),
            ("side", side.as_str().to_string()),
            ("type", "MARKET".to_string()),
            (sizing_key, amount.normalize().to_string()),
        ];

        let response: OrderResponse = self
            .signed_request(Method::POST, "/api/v3/order", &params)
            .await?;

        tracing::debug!(
            symbol = %response.symbol,
            order_id = response.order_id,
            side = side.as_str(),
            "Market order accepted"
        );

        Ok(OrderResult {
            symbol: response.symbol,
            quantity: response.orig_qty,
            order_id: response.order_id,
        })
    }
}

impl ExchangeClient for BinanceClient {
    /// Endpoint: GET /api/v3/klines?symbol={symbol}&interval={interval}
    async fn fetch_candles(&self, symbol: &str, interval: &str) -> Result<Vec<Candle>, ExchangeError> {
        let params = [
            ("symbol", symbol.to_string()),
            ("interval", interval.to_string()),
        ];
        let rows: Vec<Vec<serde_json::Value>> = self.public_get("/api/v3/klines", &params).await?;

        let candles = rows
            .iter()
            .map(|row| parse_kline(row))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!("Fetched {} {} candles for {}", candles.len(), interval, symbol);
        Ok(candles)
    }

    /// Endpoint: POST /api/v3/order (MARKET, quoteOrderQty)
    async fn place_market_buy(
        &self,
        symbol: &str,
        quote_amount: Decimal,
    ) -> Result<OrderResult, ExchangeError> {
        self.place_market_order(symbol, OrderSide::Buy, ("quoteOrderQty", quote_amount))
            .await
    }

    /// Endpoint: POST /api/v3/order (MARKET, quantity)
    async fn place_market_sell(
        &self,
        symbol: &str,
        quantity: Decimal,
    ) -> Result<OrderResult, ExchangeError> {
        self.place_market_order(symbol, OrderSide::Sell, ("quantity", quantity))
            .await
    }

    /// Endpoint: GET /api/v3/myTrades?symbol={symbol}&limit=1
    async fn fetch_last_trade(&self, symbol: &str) -> Result<Option<Trade>, ExchangeError> {
        let params = [("symbol", symbol.to_string()), ("limit", "1".to_string())];
        let trades: Vec<TradeResponse> = self
            .signed_request(Method::GET, "/api/v3/myTrades", &params)
            .await?;

        Ok(trades.into_iter().next().map(|t| Trade { quantity: t.qty }))
    }
}
