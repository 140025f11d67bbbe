//! Local price extrema (swing highs and lows) over OHLC candles, with the last
//! confirmed minimum and maximum tracked at every bar.

pub mod analysis;
pub mod config;
pub mod data;
pub mod loader;
pub mod output;

pub use analysis::{minmax, minmax_latest, minmax_series, MinMaxError, MinMaxParams};
pub use data::{candles_from_rows, Candle, CandleError, EdgeMode, Extrema, ExtremaKind, MinMax};
