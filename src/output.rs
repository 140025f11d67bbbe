use std::path::Path;

use anyhow::{Context, Result};
use chrono::TimeZone;
use chrono_tz::Tz;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use crate::analysis::{extrema_points, summarize_extrema, SwingStats};
use crate::data::{Candle, Extrema, ExtremaKind, MinMax};

#[derive(Tabled)]
struct LatestRow {
    #[tabled(rename = "Field")]
    field: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

#[derive(Tabled)]
struct StatsRow {
    #[tabled(rename = "Kind")]
    kind: &'static str,
    #[tabled(rename = "Count")]
    count: usize,
    #[tabled(rename = "Mean")]
    mean: String,
    #[tabled(rename = "Std Dev")]
    std_dev: String,
    #[tabled(rename = "Lowest")]
    lowest: String,
    #[tabled(rename = "Highest")]
    highest: String,
}

#[derive(Tabled)]
struct SeriesRow {
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "High")]
    high: String,
    #[tabled(rename = "Low")]
    low: String,
    #[tabled(rename = "Min")]
    min: String,
    #[tabled(rename = "Max")]
    max: String,
    #[tabled(rename = "Last Min")]
    last_min: String,
    #[tabled(rename = "Last Max")]
    last_max: String,
}

/// One line of the exported CSV. Absent values become empty cells.
#[derive(Debug, Serialize)]
struct SeriesRecord {
    timestamp: i64,
    high: f64,
    low: f64,
    min: Option<f64>,
    max: Option<f64>,
    last_min: Option<f64>,
    last_max: Option<f64>,
}

fn present(value: f64) -> Option<f64> {
    if value.is_nan() {
        None
    } else {
        Some(value)
    }
}

fn format_price(value: f64) -> String {
    present(value).map_or_else(|| "-".to_string(), |v| format!("{v:.4}"))
}

fn format_timestamp(millis: i64, tz: Tz) -> String {
    tz.timestamp_millis_opt(millis)
        .single()
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| millis.to_string())
}

pub fn print_report(candles: &[Candle], result: &MinMax, tz: Tz, tail: usize) {
    println!("\n=== Swing Extrema ===\n");
    if let Some(last) = candles.last() {
        println!(
            "Last Candle: {} | High {:.4} | Low {:.4}",
            format_timestamp(last.timestamp, tz),
            last.high,
            last.low
        );
    }

    print_latest(&result.latest());
    if let Some(series) = result.as_series() {
        print_series(candles, series, tz, tail);
    }
}

fn print_latest(latest: &Extrema<f64>) {
    let rows = vec![
        LatestRow {
            field: "min",
            value: format_price(latest.min),
        },
        LatestRow {
            field: "max",
            value: format_price(latest.max),
        },
        LatestRow {
            field: "last_min",
            value: format_price(latest.last_min),
        },
        LatestRow {
            field: "last_max",
            value: format_price(latest.last_max),
        },
    ];
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("\n{table}\n");
}

fn stats_row(kind: &'static str, stats: SwingStats) -> StatsRow {
    StatsRow {
        kind,
        count: stats.count,
        mean: format_price(stats.mean),
        std_dev: format_price(stats.std_dev),
        lowest: format_price(stats.lowest),
        highest: format_price(stats.highest),
    }
}

fn print_series(candles: &[Candle], series: &Extrema<Vec<f64>>, tz: Tz, tail: usize) {
    let mut stats = Table::new(vec![
        stats_row("Minima", summarize_extrema(&series.min)),
        stats_row("Maxima", summarize_extrema(&series.max)),
    ]);
    stats.with(Style::rounded());
    println!("\n{stats}");

    if let Some(point) = extrema_points(&series.min, &series.max).last() {
        let kind = match point.kind {
            ExtremaKind::Min => "low",
            ExtremaKind::Max => "high",
        };
        println!(
            "Most recent swing {kind}: {:.4} at {}",
            point.price,
            candles
                .get(point.index)
                .map(|c| format_timestamp(c.timestamp, tz))
                .unwrap_or_else(|| point.index.to_string())
        );
    }

    let start = series.len().saturating_sub(tail);
    let rows: Vec<SeriesRow> = candles
        .iter()
        .enumerate()
        .take(series.len())
        .skip(start)
        .map(|(idx, candle)| SeriesRow {
            time: format_timestamp(candle.timestamp, tz),
            high: format!("{:.4}", candle.high),
            low: format!("{:.4}", candle.low),
            min: format_price(series.min[idx]),
            max: format_price(series.max[idx]),
            last_min: format_price(series.last_min[idx]),
            last_max: format_price(series.last_max[idx]),
        })
        .collect();
    if rows.is_empty() {
        return;
    }
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("\n{table}\n");
}

/// Export the per-candle series to CSV. `series` must be aligned with `candles`.
pub fn write_series_csv<P: AsRef<Path>>(
    path: P,
    candles: &[Candle],
    series: &Extrema<Vec<f64>>,
) -> Result<()> {
    let path_ref = path.as_ref();
    let mut writer = csv::Writer::from_path(path_ref)
        .with_context(|| format!("failed to create {:?}", path_ref))?;
    for (idx, candle) in candles.iter().enumerate().take(series.len()) {
        writer.serialize(SeriesRecord {
            timestamp: candle.timestamp,
            high: candle.high,
            low: candle.low,
            min: present(series.min[idx]),
            max: present(series.max[idx]),
            last_min: present(series.last_min[idx]),
            last_max: present(series.last_max[idx]),
        })?;
    }
    writer.flush()?;
    Ok(())
}
