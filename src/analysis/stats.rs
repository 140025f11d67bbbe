use statrs::statistics::Statistics;

/// Descriptive statistics of the confirmed extrema in one sparse series.
#[derive(Debug, Clone, PartialEq)]
pub struct SwingStats {
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub lowest: f64,
    pub highest: f64,
}

pub fn summarize_extrema(sparse: &[f64]) -> SwingStats {
    let prices: Vec<f64> = sparse.iter().copied().filter(|p| !p.is_nan()).collect();
    if prices.is_empty() {
        return SwingStats {
            count: 0,
            mean: f64::NAN,
            std_dev: f64::NAN,
            lowest: f64::NAN,
            highest: f64::NAN,
        };
    }

    SwingStats {
        count: prices.len(),
        mean: prices.iter().mean(),
        std_dev: prices.iter().std_dev(),
        lowest: Statistics::min(prices.iter()),
        highest: Statistics::max(prices.iter()),
    }
}
