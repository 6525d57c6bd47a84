// Copyright (c) 2025 the relplot Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::path::{Path, PathBuf};

use clap::Parser;
use color_eyre::eyre::Result;

mod chart;
mod input;
mod relative;

#[derive(Parser, Debug)]
#[command(name = "relplot")]
#[command(about = "Plot relative performance uplift from paired benchmark results", long_about = None)]
struct Args {
    /// Tab-separated results file with mean/stddev columns for two methods
    results: String,
}

/// Derive the image path from the results path: a trailing `.csv` is
/// replaced by `.png`, anything else gets `.png` appended.
fn output_path(results: &str) -> PathBuf {
    let stem = results.strip_suffix(".csv").unwrap_or(results);
    PathBuf::from(format!("{stem}.png"))
}

fn run(results: &str) -> Result<PathBuf> {
    let records = input::read_records(Path::new(results))?;
    let relative = relative::relativize(records);
    let out = output_path(results);
    chart::render(&relative, &out)?;
    Ok(out)
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    let out = run(&args.results)?;
    println!("Generated: {}", out.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn output_path_replaces_csv_suffix() {
        assert_eq!(output_path("results.csv"), PathBuf::from("results.png"));
        assert_eq!(
            output_path("bench/partition.csv"),
            PathBuf::from("bench/partition.png")
        );
    }

    #[test]
    fn output_path_appends_for_other_suffixes() {
        assert_eq!(output_path("results.dat"), PathBuf::from("results.dat.png"));
        assert_eq!(output_path("results"), PathBuf::from("results.png"));
    }

    #[test]
    fn pipeline_orders_and_annotates_rows() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "base\tmethod\tmultiplicand\tproduct\tmean1\tstddev1\tmean2\tstddev2"
        )
        .unwrap();
        // Row A is an exact tie, row B has method #1 twice as slow.
        writeln!(file, "10\t1\t2\t100\t1.5\t0.0\t1.5\t0.0").unwrap();
        writeln!(file, "10\t2\t2\t100\t2.0\t0.1\t1.0\t0.05").unwrap();

        let records = input::read_records(file.path()).unwrap();
        let relative = relative::relativize(records);
        assert_eq!(relative.len(), 2);

        // The tie sorts last (+inf key) with zero bars on both series.
        let tie = &relative[1];
        assert!(tie.sort_key.is_infinite());
        assert_eq!(tie.uplift1.magnitude, 0.0);
        assert_eq!(tie.uplift2.magnitude, 0.0);

        // The other row contributes exactly one non-zero bar.
        let contested = &relative[0];
        assert_eq!(contested.uplift1.magnitude, 1.0);
        assert_eq!(contested.uplift2.magnitude, 0.0);
    }
}
