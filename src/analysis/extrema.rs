use itertools::Itertools;

use crate::data::{EdgeMode, ExtremaKind, ExtremaPoint};

/// Find positions whose value strictly beats the `order` neighbours on each side.
///
/// Ties and NaN values never qualify. With `EdgeMode::Exclude` the first and
/// last `order` positions are never reported. An `order` of zero compares a
/// position against nothing, so every position qualifies; callers validate it.
pub fn relative_extrema(
    series: &[f64],
    order: usize,
    kind: ExtremaKind,
    edge_mode: EdgeMode,
) -> Vec<usize> {
    let n = series.len();
    match edge_mode {
        EdgeMode::Exclude => {
            if n <= order || n - order <= order {
                return Vec::new();
            }
            (order..n - order)
                .filter(|&idx| {
                    let value = series[idx];
                    (1..=order).all(|shift| {
                        kind.beats(value, series[idx - shift])
                            && kind.beats(value, series[idx + shift])
                    })
                })
                .collect()
        }
        // Shifts past `n` only revisit the clamped end points.
        EdgeMode::Clip => (0..n)
            .filter(|&idx| {
                let value = series[idx];
                (1..=order.min(n)).all(|shift| {
                    kind.beats(value, series[idx.saturating_sub(shift)])
                        && kind.beats(value, series[(idx + shift).min(n - 1)])
                })
            })
            .collect(),
    }
}

/// Sparse series holding `series[i]` at each flagged index and NaN elsewhere.
pub fn mark_extrema(series: &[f64], indices: &[usize]) -> Vec<f64> {
    let mut marked = vec![f64::NAN; series.len()];
    for &idx in indices {
        marked[idx] = series[idx];
    }
    marked
}

/// Collect the populated positions of sparse min/max series in index order.
pub fn extrema_points(min: &[f64], max: &[f64]) -> Vec<ExtremaPoint> {
    let points_of = |series: &[f64], kind: ExtremaKind| -> Vec<ExtremaPoint> {
        series
            .iter()
            .enumerate()
            .filter(|(_, price)| !price.is_nan())
            .map(|(index, &price)| ExtremaPoint { index, price, kind })
            .collect()
    };
    points_of(min, ExtremaKind::Min)
        .into_iter()
        .merge_by(points_of(max, ExtremaKind::Max), |a, b| a.index <= b.index)
        .collect()
}
