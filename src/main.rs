use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use chrono_tz::Tz;
use clap::Parser;
use log::{info, warn};

use swing_extrema::config::AppConfig;
use swing_extrema::loader::{load_candles_from_csv, validate_series};
use swing_extrema::output::{print_report, write_series_csv};
use swing_extrema::{minmax, minmax_series, MinMax};

fn main() -> Result<()> {
    pretty_env_logger::init();
    let config = AppConfig::parse();
    run(&config)
}

fn run(config: &AppConfig) -> Result<()> {
    let input_path = &config.input_path;
    if !Path::new(input_path).exists() {
        bail!("input file {:?} does not exist", input_path);
    }
    let tz = config
        .timezone
        .parse::<Tz>()
        .map_err(|err| anyhow!("unknown time zone {:?}: {}", config.timezone, err))?;

    let candles = load_candles_from_csv(input_path)
        .with_context(|| format!("failed to load input data from {:?}", input_path))?;
    validate_series(&candles)?;
    info!("loaded {} candles from {:?}", candles.len(), input_path);

    let params = config.params();
    if candles.len() <= 2 * params.order {
        warn!(
            "{} candles cannot confirm any extremum at order {}",
            candles.len(),
            params.order
        );
    }

    let result = minmax(&candles, &params)?;
    print_report(&candles, &result, tz, config.tail);

    if let Some(output_path) = &config.output_path {
        let series = match result {
            MinMax::Series(series) => series,
            MinMax::Latest(_) => minmax_series(&candles, &params)?,
        };
        write_series_csv(output_path, &candles, &series)?;
        println!("Wrote {} rows to {}", series.len(), output_path);
    }

    Ok(())
}
