use std::fs::File;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use csv::StringRecord;
use log::{debug, warn};
use thiserror::Error;

use crate::data::Candle;

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("input file contains no valid rows")]
    Empty,

    #[error("unable to infer timestamp from record: {0:?}")]
    Timestamp(StringRecord),

    #[error("failed to parse numeric field '{field}' from value '{value}'")]
    ParseNumber { field: &'static str, value: String },
}

/// Load candles from a CSV file laid out as `timestamp, open, close, high, low[, volume]`.
///
/// The timestamp is either epoch milliseconds or a date/time (one combined
/// field or separate date and time fields), read as UTC. Rows are returned
/// sorted by timestamp.
pub fn load_candles_from_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Candle>> {
    let path_ref = path.as_ref();
    let file = File::open(path_ref).with_context(|| format!("failed to open {:?}", path_ref))?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(file);

    let mut candles = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }
        if let Some(candle) = parse_record(&record)? {
            candles.push(candle);
        }
    }

    if candles.is_empty() {
        return Err(LoaderError::Empty.into());
    }

    candles.sort_by_key(|candle| candle.timestamp);
    debug!("loaded {} candles from {:?}", candles.len(), path_ref);
    Ok(candles)
}

fn parse_record(record: &StringRecord) -> Result<Option<Candle>> {
    if let Some(first) = record.get(0) {
        let first = first.trim();
        if ["timestamp", "date", "time"]
            .iter()
            .any(|header| first.eq_ignore_ascii_case(header))
        {
            return Ok(None);
        }
    }

    // Blank cells keep their position; only trailing blanks are dropped.
    let mut fields: Vec<&str> = record.iter().map(str::trim).collect();
    while fields.last().is_some_and(|f| f.is_empty()) {
        fields.pop();
    }
    if fields.len() < 5 {
        warn!("skipping short row with {} fields", fields.len());
        return Ok(None);
    }

    let (timestamp, offset) = parse_timestamp(&fields)
        .ok_or_else(|| anyhow!(LoaderError::Timestamp(record.clone())))?;

    let open = parse_number(fields.get(offset).copied(), "open")?;
    let close = parse_number(fields.get(offset + 1).copied(), "close")?;
    let high = parse_number(fields.get(offset + 2).copied(), "high")?;
    let low = parse_number(fields.get(offset + 3).copied(), "low")?;
    let volume = match fields.get(offset + 4).copied() {
        Some(value) if !value.is_empty() => parse_number(Some(value), "volume")?,
        _ => 0.0,
    };

    Ok(Some(Candle {
        timestamp,
        open,
        close,
        high,
        low,
        volume,
    }))
}

/// Timestamp in milliseconds plus the index of the first price field.
fn parse_timestamp(fields: &[&str]) -> Option<(i64, usize)> {
    let first = fields.first()?;
    if let Ok(millis) = first.parse::<i64>() {
        return Some((millis, 1));
    }
    if let Some(datetime) = parse_datetime_string(first) {
        return Some((datetime.and_utc().timestamp_millis(), 1));
    }
    if fields.len() >= 6 {
        let date = parse_date(first)?;
        let time = parse_time(fields[1])?;
        return Some((NaiveDateTime::new(date, time).and_utc().timestamp_millis(), 2));
    }
    None
}

fn parse_number(value: Option<&str>, field: &'static str) -> Result<f64> {
    let value = value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| LoaderError::ParseNumber {
            field,
            value: String::from("<missing>"),
        })?;
    value
        .replace(',', "")
        .parse::<f64>()
        .map_err(|_| LoaderError::ParseNumber {
            field,
            value: value.to_string(),
        })
        .map_err(anyhow::Error::from)
}

fn parse_datetime_string(value: &str) -> Option<NaiveDateTime> {
    let patterns = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%m/%d/%Y %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];
    patterns
        .iter()
        .find_map(|pattern| NaiveDateTime::parse_from_str(value, pattern).ok())
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let patterns = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
    patterns
        .iter()
        .find_map(|pattern| NaiveDate::parse_from_str(value, pattern).ok())
}

fn parse_time(value: &str) -> Option<NaiveTime> {
    let patterns = ["%H:%M:%S%.f", "%H:%M:%S", "%H:%M"];
    patterns
        .iter()
        .find_map(|pattern| NaiveTime::parse_from_str(value, pattern).ok())
}

pub fn validate_series(candles: &[Candle]) -> Result<()> {
    if candles.is_empty() {
        return Err(anyhow!("no candles to analyse"));
    }

    for pair in candles.windows(2) {
        if pair[1].timestamp <= pair[0].timestamp {
            return Err(anyhow!(
                "timestamps must be strictly increasing (duplicate at {})",
                pair[1].timestamp
            ));
        }
    }

    Ok(())
}
