use clap::ValueEnum;
use serde::Serialize;
use thiserror::Error;

/// Column positions of the candle array layout `[timestamp, open, close, high, low, volume]`.
pub const TIMESTAMP_COLUMN: usize = 0;
pub const OPEN_COLUMN: usize = 1;
pub const CLOSE_COLUMN: usize = 2;
pub const HIGH_COLUMN: usize = 3;
pub const LOW_COLUMN: usize = 4;
pub const VOLUME_COLUMN: usize = 5;

#[derive(Debug, Error, PartialEq)]
pub enum CandleError {
    #[error("candle row {row} has {columns} columns, at least {needed} are required")]
    MissingColumn {
        row: usize,
        columns: usize,
        needed: usize,
    },
}

/// Single OHLCV candle. `timestamp` is milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Candle {
    pub timestamp: i64,
    pub open: f64,
    pub close: f64,
    pub high: f64,
    pub low: f64,
    pub volume: f64,
}

impl Candle {
    /// Build a candle from a numeric row. The volume column is optional.
    pub fn from_row(row: &[f64]) -> Result<Self, CandleError> {
        Self::from_indexed_row(0, row)
    }

    fn from_indexed_row(index: usize, row: &[f64]) -> Result<Self, CandleError> {
        if row.len() <= LOW_COLUMN {
            return Err(CandleError::MissingColumn {
                row: index,
                columns: row.len(),
                needed: LOW_COLUMN + 1,
            });
        }
        Ok(Self {
            timestamp: row[TIMESTAMP_COLUMN] as i64,
            open: row[OPEN_COLUMN],
            close: row[CLOSE_COLUMN],
            high: row[HIGH_COLUMN],
            low: row[LOW_COLUMN],
            volume: row.get(VOLUME_COLUMN).copied().unwrap_or(0.0),
        })
    }
}

/// Convert a two-dimensional candle array (oldest row first) into candles.
pub fn candles_from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Vec<Candle>, CandleError> {
    rows.iter()
        .enumerate()
        .map(|(idx, row)| Candle::from_indexed_row(idx, row.as_ref()))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExtremaKind {
    Min,
    Max,
}

impl ExtremaKind {
    /// Strict comparison used to confirm a candidate against one neighbour.
    /// Always false when either side is NaN.
    pub fn beats(self, candidate: f64, neighbour: f64) -> bool {
        match self {
            ExtremaKind::Min => candidate < neighbour,
            ExtremaKind::Max => candidate > neighbour,
        }
    }
}

/// How neighbours falling outside the series are treated during detection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ValueEnum)]
pub enum EdgeMode {
    /// Positions without a full window on both sides never qualify.
    #[default]
    Exclude,
    /// Out-of-range neighbours clamp to the first/last element.
    Clip,
}

/// Confirmed local extremum within the (possibly truncated) series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExtremaPoint {
    pub index: usize,
    pub price: f64,
    pub kind: ExtremaKind,
}

/// The four outputs of the indicator. `T` is `f64` for the latest values
/// and `Vec<f64>` for full series; absence is NaN.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Extrema<T> {
    pub min: T,
    pub max: T,
    pub last_min: T,
    pub last_max: T,
}

impl Extrema<Vec<f64>> {
    pub fn len(&self) -> usize {
        self.min.len()
    }

    pub fn is_empty(&self) -> bool {
        self.min.is_empty()
    }

    /// Final element of every series, NaN for an empty series.
    pub fn latest(&self) -> Extrema<f64> {
        let tail = |series: &[f64]| series.last().copied().unwrap_or(f64::NAN);
        Extrema {
            min: tail(&self.min),
            max: tail(&self.max),
            last_min: tail(&self.last_min),
            last_max: tail(&self.last_max),
        }
    }
}

/// Indicator result, shaped by the `sequential` flag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum MinMax {
    Latest(Extrema<f64>),
    Series(Extrema<Vec<f64>>),
}

impl MinMax {
    pub fn latest(&self) -> Extrema<f64> {
        match self {
            MinMax::Latest(values) => values.clone(),
            MinMax::Series(series) => series.latest(),
        }
    }

    pub fn as_series(&self) -> Option<&Extrema<Vec<f64>>> {
        match self {
            MinMax::Series(series) => Some(series),
            MinMax::Latest(_) => None,
        }
    }
}
