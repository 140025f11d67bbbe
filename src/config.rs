use clap::Parser;

use crate::analysis::{MinMaxParams, DEFAULT_ORDER, DEFAULT_WARMUP_CANDLES};
use crate::data::EdgeMode;

/// Command-line configuration for the swing extrema tool.
#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct AppConfig {
    /// Input CSV file with rows of timestamp, open, close, high, low, volume.
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    pub input_path: String,

    /// Half-width of the comparison window, in bars.
    #[arg(long, default_value_t = DEFAULT_ORDER)]
    pub order: usize,

    /// Report the full per-candle history instead of the latest values.
    #[arg(short, long)]
    pub sequential: bool,

    /// Trailing candles examined for latest-value queries.
    #[arg(long, env = "WARMUP_CANDLES_NUM", default_value_t = DEFAULT_WARMUP_CANDLES)]
    pub warmup_candles: usize,

    /// Treatment of bars lacking a full comparison window.
    #[arg(long, value_enum, default_value_t = EdgeMode::Exclude)]
    pub edge_mode: EdgeMode,

    /// IANA time zone used when printing timestamps.
    #[arg(long, default_value = "UTC")]
    pub timezone: String,

    /// Write the per-candle series to this CSV file.
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output_path: Option<String>,

    /// Rows shown in the sequential table.
    #[arg(long, default_value_t = 20)]
    pub tail: usize,
}

impl AppConfig {
    pub fn params(&self) -> MinMaxParams {
        MinMaxParams::default()
            .order(self.order)
            .sequential(self.sequential)
            .warmup_candles(self.warmup_candles)
            .edge_mode(self.edge_mode)
    }
}
