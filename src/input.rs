// Copyright (c) 2025 the relplot Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Reading and validating the tab-separated results table.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use color_eyre::eyre::{Result, eyre};
use serde::Deserialize;
use thiserror::Error;

/// One row of the results table: paired timing statistics for two competing
/// methods on a single test case. The integer columns identify the case and
/// only ever feed the chart labels.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BenchmarkRecord {
    pub base: u64,
    pub method: u64,
    pub multiplicand: u64,
    pub product: u64,
    pub mean1: f64,
    pub stddev1: f64,
    pub mean2: f64,
    pub stddev2: f64,
}

/// A row whose statistics cannot describe a benchmark run.
#[derive(Error, Debug)]
#[error("row {row}: {field} is {value}, {constraint}")]
pub struct InvalidRecord {
    row: usize,
    field: &'static str,
    value: f64,
    constraint: &'static str,
}

impl BenchmarkRecord {
    /// Means must be positive finite durations and stddevs non-negative,
    /// otherwise the uplift ratios downstream are meaningless.
    fn validate(&self, row: usize) -> Result<(), InvalidRecord> {
        for (field, value) in [("mean1", self.mean1), ("mean2", self.mean2)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(InvalidRecord {
                    row,
                    field,
                    value,
                    constraint: "expected a positive finite duration",
                });
            }
        }
        for (field, value) in [("stddev1", self.stddev1), ("stddev2", self.stddev2)] {
            if !value.is_finite() || value < 0.0 {
                return Err(InvalidRecord {
                    row,
                    field,
                    value,
                    constraint: "expected a finite non-negative deviation",
                });
            }
        }
        Ok(())
    }
}

/// Read every benchmark row from a tab-separated file with a header line,
/// preserving file order. Unknown columns are ignored; a missing column,
/// an unparseable field, or a file without data rows aborts the run.
pub fn read_records(path: &Path) -> Result<Vec<BenchmarkRecord>> {
    let file = File::open(path).map_err(|e| eyre!("Can't open {}: {e}", path.display()))?;
    parse_records(file).map_err(|e| eyre!("{}: {e}", path.display()))
}

fn parse_records<R: Read>(reader: R) -> Result<Vec<BenchmarkRecord>> {
    let mut table = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .from_reader(reader);

    let mut records = Vec::new();
    for (i, row) in table.deserialize().enumerate() {
        let record: BenchmarkRecord = row?;
        record.validate(i + 1)?;
        records.push(record);
    }
    if records.is_empty() {
        return Err(eyre!("no benchmark rows found"));
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "base\tmethod\tmultiplicand\tproduct\tmean1\tstddev1\tmean2\tstddev2";

    fn parse(table: &str) -> Result<Vec<BenchmarkRecord>> {
        parse_records(table.as_bytes())
    }

    #[test]
    fn reads_rows_in_file_order() {
        let table = format!(
            "{HEADER}\n10\t1\t2\t100\t2.0\t0.1\t1.0\t0.05\n12\t3\t4\t5000\t1.0\t0.0\t4.0\t0.2\n"
        );
        let records = parse(&table).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].base, 10);
        assert_eq!(records[0].mean1, 2.0);
        assert_eq!(records[1].product, 5000);
        assert_eq!(records[1].stddev2, 0.2);
    }

    #[test]
    fn ignores_extra_columns() {
        let table = format!("{HEADER}\tdistance\n10\t1\t2\t100\t2.0\t0.1\t1.0\t0.05\t42.0\n");
        let records = parse(&table).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].mean2, 1.0);
    }

    #[test]
    fn missing_column_is_an_error() {
        let table = "base\tmethod\tmultiplicand\tproduct\tmean1\tstddev1\tmean2\n\
                     10\t1\t2\t100\t2.0\t0.1\t1.0\n";
        assert!(parse(table).is_err());
    }

    #[test]
    fn non_numeric_field_is_an_error() {
        let table = format!("{HEADER}\n10\t1\t2\t100\tfast\t0.1\t1.0\t0.05\n");
        assert!(parse(&table).is_err());
    }

    #[test]
    fn file_without_rows_is_an_error() {
        assert!(parse("").is_err());
        assert!(parse(&format!("{HEADER}\n")).is_err());
    }

    #[test]
    fn non_positive_mean_is_rejected() {
        let table = format!("{HEADER}\n10\t1\t2\t100\t2.0\t0.1\t0.0\t0.05\n");
        let err = parse(&table).unwrap_err();
        assert!(err.to_string().contains("mean2"));

        let table = format!("{HEADER}\n10\t1\t2\t100\t-1.0\t0.1\t1.0\t0.05\n");
        assert!(parse(&table).is_err());
    }

    #[test]
    fn non_finite_mean_is_rejected() {
        let table = format!("{HEADER}\n10\t1\t2\t100\tNaN\t0.1\t1.0\t0.05\n");
        assert!(parse(&table).is_err());
    }

    #[test]
    fn negative_stddev_is_rejected() {
        let table = format!("{HEADER}\n10\t1\t2\t100\t2.0\t-0.1\t1.0\t0.05\n");
        let err = parse(&table).unwrap_err();
        assert!(err.to_string().contains("stddev1"));
    }
}
