use std::fs::File;
use std::io::{BufWriter, Write};

use tsumitate::analysis::YearBand;
use tsumitate::config::{CentralTendency, SimulationConfig};
use tsumitate::montecarlo;
use tsumitate::projector::{self, YearlySnapshot};

const YEN_PER_MILLION: f64 = 1_000_000.0;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mut config = SimulationConfig::canonical();
    let mut output_path_opt: Option<String> = None;
    let mut csv_path_opt: Option<String> = None;
    let mut quiet = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--monthly" => {
                i += 1;
                config.monthly_contribution =
                    args[i].parse().expect("--monthly requires a yen amount");
            }
            "--rate" => {
                i += 1;
                config.annual_return_pct =
                    args[i].parse().expect("--rate requires a percentage");
            }
            "--vol" => {
                i += 1;
                config.annual_volatility_pct =
                    args[i].parse().expect("--vol requires a percentage");
            }
            "--years" => {
                i += 1;
                config.horizon_years = args[i].parse().expect("--years requires a u32");
            }
            "--seed" => {
                i += 1;
                config.seed = args[i].parse().expect("--seed requires a u64");
            }
            "--paths" => {
                i += 1;
                config.n_paths = args[i].parse().expect("--paths requires a positive integer");
            }
            "--median" => config.central = CentralTendency::Median,
            "--band" => {
                i += 1;
                let (lo, hi) = args[i]
                    .split_once(',')
                    .expect("--band requires LO,HI percentiles");
                config.lower_percentile = lo.parse().expect("--band lower must be a number");
                config.upper_percentile = hi.parse().expect("--band upper must be a number");
            }
            "--output" => {
                i += 1;
                output_path_opt = Some(args[i].clone());
            }
            "--csv" => {
                i += 1;
                csv_path_opt = Some(args[i].clone());
            }
            "--quiet" => quiet = true,
            _ => {}
        }
        i += 1;
    }

    if let Err(e) = config.validate() {
        eprintln!("invalid configuration: {e}");
        std::process::exit(2);
    }

    let snapshots = projector::project(&config).unwrap_or_else(|e| {
        eprintln!("invalid configuration: {e}");
        std::process::exit(2);
    });
    let bands = montecarlo::simulate(&config).unwrap_or_else(|e| {
        eprintln!("invalid configuration: {e}");
        std::process::exit(2);
    });

    if let Some(ref path) = output_path_opt {
        write_snapshots_ndjson(&snapshots, path);
        if !quiet {
            println!("{} snapshots → {path}", snapshots.len());
        }
    }
    if let Some(ref path) = csv_path_opt {
        write_bands_csv(&bands, path);
        if !quiet {
            println!("{} band rows → {path}", bands.len());
        }
    }

    if !quiet {
        print_deterministic(&config, &snapshots);
        print_bands(&config, &bands);
        print_headline(&config, &bands);
    }
}

fn print_deterministic(config: &SimulationConfig, snapshots: &[YearlySnapshot]) {
    println!(
        "\n=== Deterministic projection ({}%/yr, {:.0} yen/mo, {}y) ===",
        config.annual_return_pct, config.monthly_contribution, config.horizon_years
    );
    println!(
        "{:>4} | {:>12} | {:>9} | {:>10}",
        "Year", "Principal(M)", "Gain(M)", "Value(M)"
    );
    println!("{}", "-".repeat(4 + 3 + 12 + 3 + 9 + 3 + 10));

    for s in snapshots {
        println!(
            "{:>4} | {:>12.2} | {:>9.2} | {:>10.2}",
            s.year.0,
            s.principal / YEN_PER_MILLION,
            s.gain / YEN_PER_MILLION,
            s.market_value / YEN_PER_MILLION,
        );
    }
}

fn print_bands(config: &SimulationConfig, bands: &[YearBand]) {
    let central_label = match config.central {
        CentralTendency::Mean => "Mean(M)",
        CentralTendency::Median => "Median(M)",
    };
    println!(
        "\n=== Monte Carlo (N={}, sigma={}%, band {}-{}%) ===",
        config.n_paths, config.annual_volatility_pct, config.lower_percentile, config.upper_percentile
    );
    println!(
        "{:>4} | {:>9} | {:>9} | {:>9} | {:>12}",
        "Year", "Lower(M)", central_label, "Upper(M)", "Principal(M)"
    );
    println!("{}", "-".repeat(4 + 3 + 9 + 3 + 9 + 3 + 9 + 3 + 12));

    for b in bands {
        println!(
            "{:>4} | {:>9.2} | {:>9.2} | {:>9.2} | {:>12.2}",
            b.year.0,
            b.lower / YEN_PER_MILLION,
            b.central / YEN_PER_MILLION,
            b.upper / YEN_PER_MILLION,
            b.principal / YEN_PER_MILLION,
        );
    }
}

/// The one-line summary the dashboard led with: expected outcome and the
/// pessimistic band floor at the end of the horizon.
fn print_headline(config: &SimulationConfig, bands: &[YearBand]) {
    if let Some(last) = bands.last() {
        println!(
            "\nAfter {} years: central outcome {:.0} yen; the {}% pessimistic case falls to {:.0} yen.",
            config.horizon_years, last.central, config.lower_percentile, last.lower
        );
    }
}

fn write_snapshots_ndjson(snapshots: &[YearlySnapshot], path: &str) {
    let file = File::create(path).unwrap_or_else(|e| panic!("failed to create {path}: {e}"));
    let mut writer = BufWriter::new(file);
    for s in snapshots {
        serde_json::to_writer(&mut writer, s).expect("failed to serialize snapshot");
        writeln!(writer).expect("failed to write newline");
    }
}

fn write_bands_csv(bands: &[YearBand], path: &str) {
    let file = File::create(path).unwrap_or_else(|e| panic!("failed to create {path}: {e}"));
    let mut w = BufWriter::new(file);
    writeln!(w, "year,central,lower,upper,principal").expect("write");
    for b in bands {
        writeln!(
            w,
            "{},{:.2},{:.2},{:.2},{:.2}",
            b.year.0, b.central, b.lower, b.upper, b.principal
        )
        .expect("write");
    }
}
