pub mod extrema;
pub mod ffill;
pub mod minmax;
pub mod stats;
pub mod window;

pub use extrema::{extrema_points, mark_extrema, relative_extrema};
pub use ffill::forward_fill;
pub use minmax::{minmax, minmax_latest, minmax_series, MinMaxError, MinMaxParams, DEFAULT_ORDER};
pub use stats::{summarize_extrema, SwingStats};
pub use window::{warmup_window, DEFAULT_WARMUP_CANDLES};
