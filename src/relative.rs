// Copyright (c) 2025 the relplot Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Relative-uplift statistics over paired benchmark rows.

use crate::input::BenchmarkRecord;

/// Which method posted the larger (slower) mean. Decides which side of the
/// axis the case label hangs on, nothing more.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WinnerSide {
    First,
    Second,
}

/// One side's relative uplift and its propagated standard deviation.
/// Both stay zero unless this side's mean exceeded the other's.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Uplift {
    pub magnitude: f64,
    pub stddev: f64,
}

impl Uplift {
    const ZERO: Uplift = Uplift {
        magnitude: 0.0,
        stddev: 0.0,
    };
}

/// A benchmark row annotated with uplift statistics, its chart ordering key,
/// and its case label.
#[derive(Debug, Clone, PartialEq)]
pub struct RelativeRecord {
    pub sort_key: f64,
    pub source: BenchmarkRecord,
    pub uplift1: Uplift,
    pub uplift2: Uplift,
    pub winner: WinnerSide,
    pub label: String,
}

impl RelativeRecord {
    fn new(source: BenchmarkRecord) -> Self {
        // The two stddevs are assumed independent; no covariance term.
        let var1 = source.stddev1 * source.stddev1;
        let var2 = source.stddev2 * source.stddev2;

        let t1 = source.mean1 / source.mean2 - 1.0;
        // An exact tie would divide by zero here; pin it to +inf so all ties
        // land together at the right edge of the chart.
        let sort_key = if t1 == 0.0 { f64::INFINITY } else { 1.0 / t1 };
        let uplift1 = if t1 > 0.0 && t1.is_finite() {
            Uplift {
                magnitude: t1,
                stddev: ((var1 + var2) / source.mean2).sqrt(),
            }
        } else {
            Uplift::ZERO
        };

        let t2 = source.mean2 / source.mean1 - 1.0;
        let uplift2 = if t2 > 0.0 && t2.is_finite() {
            Uplift {
                // Negated so the two series point in opposite directions on
                // the shared axis.
                magnitude: -t2,
                stddev: ((var1 + var2) / source.mean1).sqrt(),
            }
        } else {
            Uplift::ZERO
        };

        let winner = if source.mean1 > source.mean2 {
            WinnerSide::First
        } else {
            WinnerSide::Second
        };
        let label = format!(
            "{} {} {} {}",
            source.base, source.method, source.multiplicand, source.product
        );

        RelativeRecord {
            sort_key,
            source,
            uplift1,
            uplift2,
            winner,
            label,
        }
    }
}

/// Annotate every row and order the lot ascending by sort key.
///
/// The key is 1/(mean1/mean2 - 1): near-tied cases blow up toward the
/// extremes while lopsided ones cluster around zero, so the most balanced
/// comparisons end up at the chart's edges. Exact ties pin to +inf and sort
/// last under `total_cmp`. The sort is stable; rows with equal keys keep
/// their file order.
pub fn relativize(records: Vec<BenchmarkRecord>) -> Vec<RelativeRecord> {
    let mut relative: Vec<RelativeRecord> =
        records.into_iter().map(RelativeRecord::new).collect();
    relative.sort_by(|a, b| a.sort_key.total_cmp(&b.sort_key));
    relative
}
