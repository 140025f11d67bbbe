/// Carry the last non-NaN value forward over NaN positions.
///
/// Leading positions stay NaN until the first populated value.
pub fn forward_fill(series: &[f64]) -> Vec<f64> {
    let mut last_seen = f64::NAN;
    series
        .iter()
        .map(|&value| {
            if !value.is_nan() {
                last_seen = value;
            }
            last_seen
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAN: f64 = f64::NAN;

    fn same(a: &[f64], b: &[f64]) -> bool {
        a.len() == b.len()
            && a.iter()
                .zip(b)
                .all(|(x, y)| (x.is_nan() && y.is_nan()) || x == y)
    }

    #[test]
    fn fills_gaps_with_previous_value() {
        let filled = forward_fill(&[NAN, NAN, 2.0, NAN, NAN, 1.0, NAN]);
        assert!(same(&filled, &[NAN, NAN, 2.0, 2.0, 2.0, 1.0, 1.0]));
    }

    #[test]
    fn all_absent_stays_absent() {
        let filled = forward_fill(&[NAN; 5]);
        assert!(filled.iter().all(|v| v.is_nan()));
        assert!(forward_fill(&[]).is_empty());
    }

    #[test]
    fn idempotent() {
        let sparse = [NAN, 3.0, NAN, NAN, 4.0, NAN, 5.0, NAN];
        let once = forward_fill(&sparse);
        let twice = forward_fill(&once);
        assert!(same(&once, &twice));
    }

    #[test]
    fn never_absent_after_first_value() {
        let filled = forward_fill(&[NAN, NAN, 7.0, NAN, NAN, NAN]);
        let first = filled.iter().position(|v| !v.is_nan()).unwrap();
        assert!(filled[first..].iter().all(|v| !v.is_nan()));
    }
}
