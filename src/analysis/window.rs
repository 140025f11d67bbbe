use log::debug;

use crate::data::Candle;

/// Number of trailing candles kept for latest-value queries.
pub const DEFAULT_WARMUP_CANDLES: usize = 240;

/// Restrict the candles a latest-value query looks at to the last `warmup` bars.
///
/// Sequential queries always see the full history, and a `warmup` of zero
/// disables truncation. Only a prefix is ever dropped.
pub fn warmup_window(candles: &[Candle], warmup: usize, sequential: bool) -> &[Candle] {
    if sequential || warmup == 0 || candles.len() <= warmup {
        return candles;
    }
    let start = candles.len() - warmup;
    debug!(
        "truncating {} candles to the last {} for latest-value query",
        candles.len(),
        warmup
    );
    &candles[start..]
}
