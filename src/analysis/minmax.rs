use log::{debug, trace};
use thiserror::Error;

use crate::analysis::extrema::{mark_extrema, relative_extrema};
use crate::analysis::ffill::forward_fill;
use crate::analysis::window::{warmup_window, DEFAULT_WARMUP_CANDLES};
use crate::data::{Candle, EdgeMode, Extrema, ExtremaKind, MinMax};

pub const DEFAULT_ORDER: usize = 3;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MinMaxError {
    #[error("invalid order {0}: the comparison window needs at least one bar per side")]
    InvalidOrder(usize),
}

/// Indicator settings. `warmup_candles` bounds latest-value queries to the
/// trailing candles; zero means no bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinMaxParams {
    pub order: usize,
    pub sequential: bool,
    pub warmup_candles: usize,
    pub edge_mode: EdgeMode,
}

impl Default for MinMaxParams {
    fn default() -> Self {
        Self {
            order: DEFAULT_ORDER,
            sequential: false,
            warmup_candles: DEFAULT_WARMUP_CANDLES,
            edge_mode: EdgeMode::Exclude,
        }
    }
}

impl MinMaxParams {
    pub fn order(mut self, order: usize) -> Self {
        self.order = order;
        self
    }

    pub fn sequential(mut self, sequential: bool) -> Self {
        self.sequential = sequential;
        self
    }

    pub fn warmup_candles(mut self, warmup_candles: usize) -> Self {
        self.warmup_candles = warmup_candles;
        self
    }

    pub fn edge_mode(mut self, edge_mode: EdgeMode) -> Self {
        self.edge_mode = edge_mode;
        self
    }

    pub fn validate(&self) -> Result<(), MinMaxError> {
        if self.order == 0 {
            return Err(MinMaxError::InvalidOrder(self.order));
        }
        Ok(())
    }
}

/// Local extrema of the candle lows (minima) and highs (maxima) together with
/// the last confirmed value of each at every position.
///
/// Latest-value queries only inspect the trailing warmup window and return the
/// final element of each series. Sequential queries return the full series,
/// aligned with `candles`.
pub fn minmax(candles: &[Candle], params: &MinMaxParams) -> Result<MinMax, MinMaxError> {
    if params.sequential {
        minmax_series(candles, params).map(MinMax::Series)
    } else {
        minmax_latest(candles, params).map(MinMax::Latest)
    }
}

/// Final value of each series, computed over the trailing warmup window.
pub fn minmax_latest(
    candles: &[Candle],
    params: &MinMaxParams,
) -> Result<Extrema<f64>, MinMaxError> {
    params.validate()?;
    let window = warmup_window(candles, params.warmup_candles, false);
    Ok(extrema_series(window, params.order, params.edge_mode).latest())
}

/// Full series over the whole history regardless of `params.sequential`.
pub fn minmax_series(
    candles: &[Candle],
    params: &MinMaxParams,
) -> Result<Extrema<Vec<f64>>, MinMaxError> {
    params.validate()?;
    let window = warmup_window(candles, params.warmup_candles, true);
    Ok(extrema_series(window, params.order, params.edge_mode))
}

fn extrema_series(candles: &[Candle], order: usize, edge_mode: EdgeMode) -> Extrema<Vec<f64>> {
    let low: Vec<f64> = candles.iter().map(|c| c.low).collect();
    let high: Vec<f64> = candles.iter().map(|c| c.high).collect();

    let minima = relative_extrema(&low, order, ExtremaKind::Min, edge_mode);
    let maxima = relative_extrema(&high, order, ExtremaKind::Max, edge_mode);
    debug!(
        "found {} minima and {} maxima across {} candles (order {})",
        minima.len(),
        maxima.len(),
        candles.len(),
        order
    );
    trace!("minima at {:?}, maxima at {:?}", minima, maxima);

    let min = mark_extrema(&low, &minima);
    let max = mark_extrema(&high, &maxima);
    let last_min = forward_fill(&min);
    let last_max = forward_fill(&max);

    Extrema {
        min,
        max,
        last_min,
        last_max,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candles_from_lows(lows: &[f64]) -> Vec<Candle> {
        lows.iter()
            .enumerate()
            .map(|(i, &low)| Candle {
                timestamp: i as i64 * 60_000,
                open: low + 0.5,
                close: low + 0.5,
                high: low + 1.0,
                low,
                volume: 100.0,
            })
            .collect()
    }

    fn same(a: &[f64], b: &[f64]) -> bool {
        a.len() == b.len()
            && a.iter()
                .zip(b)
                .all(|(x, y)| (x.is_nan() && y.is_nan()) || x == y)
    }

    #[test]
    fn double_valley_minima_and_fill() {
        let lows = [5.0, 4.0, 3.0, 2.0, 3.0, 4.0, 5.0, 4.0, 3.0, 2.0, 1.0, 2.0, 3.0];
        let candles = candles_from_lows(&lows);
        let series = minmax_series(&candles, &MinMaxParams::default().order(2)).unwrap();

        let nan = f64::NAN;
        let mut expected_min = vec![nan; lows.len()];
        expected_min[3] = 2.0;
        expected_min[10] = 1.0;
        assert!(same(&series.min, &expected_min));

        let mut expected_last = vec![nan; 3];
        expected_last.extend(vec![2.0; 7]);
        expected_last.extend(vec![1.0; 3]);
        assert!(same(&series.last_min, &expected_last));

        // Highs follow the lows, so the single peak sits at position 6.
        assert_eq!(series.max[6], 6.0);
        assert!(series.last_max[..6].iter().all(|v| v.is_nan()));
        assert!(series.last_max[6..].iter().all(|&v| v == 6.0));
    }

    #[test]
    fn too_short_for_order_is_all_absent() {
        let candles = candles_from_lows(&[3.0, 1.0, 3.0]);
        let series = minmax_series(&candles, &MinMaxParams::default()).unwrap();
        assert_eq!(series.len(), 3);
        assert!(series.min.iter().all(|v| v.is_nan()));
        assert!(series.max.iter().all(|v| v.is_nan()));

        let latest = minmax_latest(&candles, &MinMaxParams::default()).unwrap();
        assert!(latest.min.is_nan());
        assert!(latest.max.is_nan());
        assert!(latest.last_min.is_nan());
        assert!(latest.last_max.is_nan());
    }

    #[test]
    fn zero_order_is_rejected() {
        let candles = candles_from_lows(&[1.0, 2.0, 3.0]);
        assert_eq!(
            minmax_latest(&candles, &MinMaxParams::default().order(0)).unwrap_err(),
            MinMaxError::InvalidOrder(0)
        );
    }

    #[test]
    fn zero_warmup_uses_full_history() {
        let lows: Vec<f64> = (0..400).map(|i| ((i as f64) * 0.3).cos() * 3.0 + 20.0).collect();
        let candles = candles_from_lows(&lows);
        let unbounded = MinMaxParams::default().warmup_candles(0);
        let latest = minmax_latest(&candles, &unbounded).unwrap();
        let full = minmax_series(&candles, &unbounded).unwrap().latest();
        assert!(same(
            &[latest.min, latest.max, latest.last_min, latest.last_max],
            &[full.min, full.max, full.last_min, full.last_max]
        ));
    }

    #[test]
    fn empty_input_yields_absent_values() {
        let latest = minmax_latest(&[], &MinMaxParams::default()).unwrap();
        assert!(latest.last_min.is_nan());
        let series = minmax_series(&[], &MinMaxParams::default()).unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn sequential_keeps_full_length() {
        let lows: Vec<f64> = (0..300).map(|i| ((i as f64) * 0.2).sin() * 5.0 + 50.0).collect();
        let candles = candles_from_lows(&lows);
        let params = MinMaxParams::default().sequential(true);
        let result = minmax(&candles, &params).unwrap();
        let series = result.as_series().unwrap();
        assert_eq!(series.len(), 300);
        assert_eq!(series.last_min.len(), 300);
    }
}
