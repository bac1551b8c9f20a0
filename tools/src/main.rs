//! hospops-runner: batch forecasting from JSON extracts.
//!
//! Usage:
//!   hospops-runner segment   --reservations res.json [--kmeans] [--out enriched.json]
//!   hospops-runner forecast  labor   --reservations res.json [--shift-hours 8] [--utilization 0.85]
//!   hospops-runner forecast  fnb     --reservations res.json --meal breakfast
//!   hospops-runner forecast  dept    --reservations res.json --dept spa
//!   hospops-runner forecast  service --reservations res.json --area reception [--target-wait 5]
//!   hospops-runner forecast  airline --flights flights.json --area gate
//!   hospops-runner calibrate --reservations res.json --actuals hk.json [--min-mult 0.5] [--max-mult 3.0]
//!   hospops-runner learn     --reservations res.json --actuals hk.json
//!   hospops-runner dq        --reservations res.json
//!
//! Every command accepts `--config path` (default `./data/base_config.json`)
//! and `--out path` (default stdout). Reservation and flight files are JSON
//! arrays of records; column names may use the localized export headers.

use anyhow::{anyhow, bail, Context, Result};
use hospops_core::{
    airline::{parse_flights, AirlineForecaster},
    calibration::{LaborCalibrator, DEFAULT_MAX_MULTIPLIER, DEFAULT_MIN_MULTIPLIER},
    departments::DepartmentForecaster,
    dq,
    fnb::FnbForecaster,
    labor::LaborForecaster,
    learning::HkLearner,
    segmenter::{KMeansRefiner, Segmenter},
    service::ServiceLoadForecaster,
    ActualHours, ForecastConfig, RawFlight, RawReservation, Reservation,
};
use serde::Serialize;
use std::env;
use std::fs;
use std::io::{self, Write};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let Some(command) = args.get(1).map(String::as_str) else {
        bail!("usage: hospops-runner <segment|forecast|calibrate|learn|dq> [flags]");
    };
    log::info!(
        "hospops-runner {command} started at {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );

    let config_path = flag(&args, "--config").unwrap_or("./data/base_config.json");
    let out = flag(&args, "--out");

    match command {
        "segment" => {
            let reservations = load_reservations(&args)?;
            write_json(out, &reservations)
        }
        "forecast" => {
            let config = load_config(config_path)?;
            run_forecast(&args, &config, out)
        }
        "calibrate" => {
            let config = load_config(config_path)?;
            let reservations = load_reservations(&args)?;
            let actuals = load_actuals(&args)?;
            let min_mult = parse_arg(&args, "--min-mult", DEFAULT_MIN_MULTIPLIER);
            let max_mult = parse_arg(&args, "--max-mult", DEFAULT_MAX_MULTIPLIER);
            let fitted = LaborCalibrator::new(&config).fit_multipliers(
                &reservations,
                &actuals,
                min_mult,
                max_mult,
            )?;
            write_json(out, &fitted)
        }
        "learn" => {
            let config = load_config(config_path)?;
            let reservations = load_reservations(&args)?;
            let actuals = load_actuals(&args)?;
            let learned = HkLearner::new(&config).fit(&reservations, &actuals)?;
            write_json(out, &learned)
        }
        "dq" => {
            let path = required(&args, "--reservations")?;
            let records: Vec<serde_json::Value> = read_json(path)?;
            let columns: Vec<String> = dq::columns_of(&records).into_iter().collect();
            let raw: Vec<RawReservation> = records
                .into_iter()
                .map(serde_json::from_value)
                .collect::<Result<_, _>>()
                .with_context(|| format!("parsing reservations in {path}"))?;
            let reservations = Segmenter::new().enrich(&raw);
            let report = dq::check_reservations(columns.as_slice(), &reservations);
            write_json(out, &report)
        }
        other => {
            bail!("unknown command '{other}'. Available: segment, forecast, calibrate, learn, dq")
        }
    }
}

fn run_forecast(args: &[String], config: &ForecastConfig, out: Option<&str>) -> Result<()> {
    let Some(kind) = args.get(2).map(String::as_str) else {
        bail!("usage: hospops-runner forecast <labor|fnb|dept|service|airline> [flags]");
    };
    match kind {
        "labor" => {
            let reservations = load_reservations(args)?;
            let shift_hours = optional_arg::<f64>(args, "--shift-hours")?;
            let utilization = optional_arg::<f64>(args, "--utilization")?;
            let days =
                LaborForecaster::new(config).predict(&reservations, shift_hours, utilization);
            write_json(out, &days)
        }
        "fnb" => {
            let reservations = load_reservations(args)?;
            let meal = flag(args, "--meal").unwrap_or("breakfast");
            write_json(out, &FnbForecaster::new(config).predict(&reservations, meal)?)
        }
        "dept" => {
            let reservations = load_reservations(args)?;
            let dept = required(args, "--dept")?;
            write_json(out, &DepartmentForecaster::new(config).predict(&reservations, dept)?)
        }
        "service" => {
            let reservations = load_reservations(args)?;
            let area = required(args, "--area")?;
            let utilization = optional_arg::<f64>(args, "--utilization")?;
            let target_wait = optional_arg::<f64>(args, "--target-wait")?;
            let buckets = ServiceLoadForecaster::new(config).predict(
                &reservations,
                area,
                utilization,
                target_wait,
            )?;
            write_json(out, &buckets)
        }
        "airline" => {
            let path = required(args, "--flights")?;
            let raw: Vec<RawFlight> = read_json(path)?;
            let flights = parse_flights(&raw);
            let area = required(args, "--area")?;
            write_json(out, &AirlineForecaster::new(config).predict(&flights, area)?)
        }
        other => bail!("unknown forecast '{other}'. Available: labor, fnb, dept, service, airline"),
    }
}

fn load_config(path: &str) -> Result<ForecastConfig> {
    ForecastConfig::load(path).with_context(|| format!("loading config {path}"))
}

fn load_reservations(args: &[String]) -> Result<Vec<Reservation>> {
    let raw: Vec<RawReservation> = read_json(required(args, "--reservations")?)?;
    let mut segmenter = Segmenter::new();
    if args.iter().any(|a| a == "--kmeans") {
        segmenter = segmenter.with_refiner(Box::new(KMeansRefiner::default()));
    }
    let reservations = segmenter.enrich(&raw);
    log::info!("loaded {} reservations", reservations.len());
    Ok(reservations)
}

fn load_actuals(args: &[String]) -> Result<Vec<ActualHours>> {
    read_json(required(args, "--actuals")?)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &str) -> Result<T> {
    let content = fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
    serde_json::from_str(&content).with_context(|| format!("parsing {path}"))
}

fn write_json<T: Serialize>(out: Option<&str>, value: &T) -> Result<()> {
    let body = serde_json::to_string_pretty(value)?;
    match out {
        Some(path) => {
            fs::write(path, body + "\n").with_context(|| format!("writing {path}"))?;
            log::info!("wrote {path}");
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{body}")?;
        }
    }
    Ok(())
}

fn flag<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == name)
        .map(|w| w[1].as_str())
}

fn required<'a>(args: &'a [String], name: &str) -> Result<&'a str> {
    flag(args, name).ok_or_else(|| anyhow!("missing required flag {name}"))
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], name: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == name)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

fn optional_arg<T: std::str::FromStr>(args: &[String], name: &str) -> Result<Option<T>> {
    flag(args, name)
        .map(|v| v.parse::<T>().map_err(|_| anyhow!("invalid value '{v}' for {name}")))
        .transpose()
}
