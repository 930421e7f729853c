use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;

use crate::error::BacktestError;
use crate::model::PriceFrame;

/// Reads a wide price table: first column is the date index, every other
/// header cell names a ticker.
pub fn load_price_csv(path: &Path) -> Result<PriceFrame, BacktestError> {
    let file = std::fs::File::open(path)?;
    read_price_csv(file)
}

pub fn read_price_csv<R: Read>(reader: R) -> Result<PriceFrame, BacktestError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = reader.headers()?.clone();
    if headers.len() < 2 {
        return Err(BacktestError::Data(
            "price table needs a date column and at least one ticker column".to_string(),
        ));
    }
    let tickers: Vec<String> = headers.iter().skip(1).map(|h| h.trim().to_string()).collect();

    let mut rows: Vec<(NaiveDate, Vec<f64>)> = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record?;
        let Some(raw_date) = record.get(0) else {
            continue;
        };
        if raw_date.trim().is_empty() {
            continue;
        }
        let date = parse_date(raw_date).ok_or_else(|| {
            BacktestError::Data(format!(
                "row {}: cannot parse date '{}'",
                line + 2,
                raw_date
            ))
        })?;
        let prices = (0..tickers.len())
            .map(|i| record.get(i + 1).map(parse_price).unwrap_or(f64::NAN))
            .collect();
        rows.push((date, prices));
    }

    rows.sort_by_key(|(d, _)| *d);
    if let Some(pair) = rows.windows(2).find(|w| w[0].0 == w[1].0) {
        return Err(BacktestError::Data(format!("duplicate date {}", pair[0].0)));
    }

    let mut columns = vec![Vec::with_capacity(rows.len()); tickers.len()];
    let mut dates = Vec::with_capacity(rows.len());
    for (date, prices) in rows {
        dates.push(date);
        for (col, p) in columns.iter_mut().zip(prices) {
            col.push(p);
        }
    }
    PriceFrame::new(dates, tickers, columns)
}

/// Accepts `YYYY-MM-DD` with an optional trailing time part.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    let day = s.get(..10).unwrap_or(s);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

fn parse_price(raw: &str) -> f64 {
    raw.trim().parse::<f64>().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_ignores_time_part() {
        assert_eq!(
            parse_date("2024-03-05 00:00:00+00:00"),
            NaiveDate::from_ymd_opt(2024, 3, 5)
        );
        assert_eq!(parse_date("05/03/2024"), None);
    }

    #[test]
    fn parse_price_treats_junk_as_missing() {
        assert!(parse_price("").is_nan());
        assert!(parse_price("n/a").is_nan());
        assert_eq!(parse_price(" 12.5 "), 12.5);
    }
}
