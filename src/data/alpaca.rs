use chrono::{DateTime, NaiveDate};
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::Value;

use crate::error::BacktestError;
use crate::model::PriceFrame;

const BARS_PAGE_LIMIT: usize = 10_000;

/// Blocking client for Alpaca historical stock bars.
pub struct AlpacaBarsClient {
    http: reqwest::blocking::Client,
    data_base_url: String,
}

impl AlpacaBarsClient {
    pub fn new(data_base_url: &str, api_key: &str, api_secret: &str) -> Result<Self, BacktestError> {
        let mut headers = HeaderMap::new();
        headers.insert("APCA-API-KEY-ID", header_value(api_key)?);
        headers.insert("APCA-API-SECRET-KEY", header_value(api_secret)?);
        let http = reqwest::blocking::Client::builder()
            .default_headers(headers)
            .build()?;
        Ok(Self {
            http,
            data_base_url: data_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Daily closes for `symbol` in `[start, end]`, oldest first.
    pub fn daily_closes(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<(NaiveDate, f64)>, BacktestError> {
        let endpoint = format!("{}/v2/stocks/bars", self.data_base_url);
        let start_s = start.format("%Y-%m-%d").to_string();
        let end_s = end.format("%Y-%m-%d").to_string();
        let limit_s = BARS_PAGE_LIMIT.to_string();

        let mut closes = Vec::new();
        let mut page_token: Option<String> = None;
        loop {
            let mut request = self.http.get(&endpoint).query(&[
                ("symbols", symbol),
                ("timeframe", "1Day"),
                ("start", start_s.as_str()),
                ("end", end_s.as_str()),
                ("limit", limit_s.as_str()),
                ("adjustment", "all"),
                ("feed", "iex"),
                ("sort", "asc"),
            ]);
            if let Some(token) = page_token.as_deref() {
                request = request.query(&[("page_token", token)]);
            }
            let root: Value = request.send()?.error_for_status()?.json()?;

            let (page, next) = parse_bars_page(&root, symbol)?;
            tracing::debug!(symbol, bars = page.len(), "Fetched bars page");
            closes.extend(page);
            match next {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }
        closes.sort_by_key(|(d, _)| *d);
        Ok(closes)
    }

    /// Fetches every ticker, aligns on the union of dates and forward-fills gaps.
    pub fn price_frame(
        &self,
        tickers: &[String],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceFrame, BacktestError> {
        let mut series = Vec::with_capacity(tickers.len());
        for ticker in tickers {
            let closes = self.daily_closes(ticker, start, end)?;
            if closes.is_empty() {
                tracing::warn!(ticker = %ticker, "No bars returned");
            }
            series.push((ticker.clone(), closes));
        }
        Ok(PriceFrame::from_series(series)?.forward_fill())
    }
}

fn header_value(raw: &str) -> Result<HeaderValue, BacktestError> {
    HeaderValue::from_str(raw)
        .map_err(|e| BacktestError::Config(format!("invalid API credential header: {}", e)))
}

/// Extracts `(date, close)` pairs for `symbol` and the next page token.
pub fn parse_bars_page(
    root: &Value,
    symbol: &str,
) -> Result<(Vec<(NaiveDate, f64)>, Option<String>), BacktestError> {
    let bars = root
        .get("bars")
        .and_then(|b| b.get(symbol))
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    let mut out = Vec::with_capacity(bars.len());
    for bar in bars {
        let ts = bar.get("t").and_then(Value::as_str).unwrap_or_default();
        let date = DateTime::parse_from_rfc3339(ts)
            .map_err(|e| BacktestError::Data(format!("invalid bar timestamp '{}': {}", ts, e)))?
            .date_naive();
        let Some(close) = bar.get("c").and_then(Value::as_f64) else {
            continue;
        };
        out.push((date, close));
    }

    let next = root
        .get("next_page_token")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string);
    Ok((out, next))
}
