// Copyright (c) 2025 the relplot Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Bar-chart rendering of the sorted uplift records.
//!
//! Per case, two overlapping bars point in opposite directions from a shared
//! baseline: method #1's uplift upward, method #2's downward. Percent labels
//! sit past the error bars, and the case label hangs on the opposite side of
//! the baseline from the winning bar. No axes, ticks, or mesh are drawn.

use std::path::Path;

use color_eyre::eyre::Result;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::relative::{RelativeRecord, WinnerSide};

const BAR_WIDTH: f64 = 0.4;
const IMAGE_HEIGHT: u32 = 700;
const MIN_IMAGE_WIDTH: u32 = 640;
const ERROR_BAR_CAP: u32 = 4;

const PERCENT_FONT_SIZE: u32 = 14;
const CASE_FONT_SIZE: u32 = 13;

/// Series palette: blue for method #1, orange for method #2.
const METHOD1_COLOR: RGBColor = RGBColor(31, 119, 180);
const METHOD2_COLOR: RGBColor = RGBColor(255, 127, 14);
/// Case labels are de-emphasized next to the black percent labels.
const CASE_LABEL_COLOR: RGBColor = RGBColor(211, 211, 211);

/// Anchor height for the case label: a hair below the baseline when method
/// #1 won (its bar points up), a hair above when method #2 won.
fn case_anchor(winner: WinnerSide) -> f64 {
    match winner {
        WinnerSide::First => -0.001,
        WinnerSide::Second => 0.001,
    }
}

/// Integer-truncated percent text; bars under 1% stay unlabeled.
fn percent_label(magnitude: f64) -> Option<String> {
    let percent = (magnitude.abs() * 100.0) as i64;
    (percent > 0).then(|| format!("{percent}%"))
}

/// 100 px for every 6 cases; wide result sets produce wide charts.
fn image_width(cases: usize) -> u32 {
    (cases as u32 * 100).div_ceil(6).max(MIN_IMAGE_WIDTH)
}

/// Vertical range covering every bar plus its error bar, padded so the
/// rotated labels have room beyond the bar tips.
fn y_range(records: &[RelativeRecord]) -> (f64, f64) {
    let mut top = 0.0f64;
    let mut bottom = 0.0f64;
    for r in records {
        top = top.max(r.uplift1.magnitude + r.uplift1.stddev);
        bottom = bottom.min(r.uplift2.magnitude - r.uplift2.stddev);
    }
    // All ties leave an empty range; keep the chart drawable anyway.
    let span = top - bottom;
    let span = if span > 0.0 { span } else { 1.0 };
    (bottom - span * 0.35, top + span * 0.35)
}

/// Draw the full chart and write it to `out`, overwriting any existing file.
pub fn render(records: &[RelativeRecord], out: &Path) -> Result<()> {
    let root = BitMapBackend::new(out, (image_width(records.len()), IMAGE_HEIGHT))
        .into_drawing_area();
    root.fill(&WHITE)?;

    let (y_min, y_max) = y_range(records);
    let pad = (y_max - y_min) * 0.012;

    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .build_cartesian_2d(-0.5..records.len() as f64 - 0.5, y_min..y_max)?;

    // Rotated vertically like the bars they annotate; `Left` anchors grow
    // upward from the anchor point, `Right` anchors grow downward to it.
    let percent_up = ("sans-serif", PERCENT_FONT_SIZE)
        .into_font()
        .transform(FontTransform::Rotate270)
        .color(&BLACK)
        .pos(Pos::new(HPos::Left, VPos::Center));
    let percent_down = ("sans-serif", PERCENT_FONT_SIZE)
        .into_font()
        .transform(FontTransform::Rotate270)
        .color(&BLACK)
        .pos(Pos::new(HPos::Right, VPos::Center));
    let case_up = ("sans-serif", CASE_FONT_SIZE)
        .into_font()
        .transform(FontTransform::Rotate270)
        .color(&CASE_LABEL_COLOR)
        .pos(Pos::new(HPos::Left, VPos::Center));
    let case_down = ("sans-serif", CASE_FONT_SIZE)
        .into_font()
        .transform(FontTransform::Rotate270)
        .color(&CASE_LABEL_COLOR)
        .pos(Pos::new(HPos::Right, VPos::Center));

    for (i, record) in records.iter().enumerate() {
        let x = i as f64;

        if record.uplift1.magnitude != 0.0 {
            let h = record.uplift1.magnitude;
            let e = record.uplift1.stddev;
            chart.draw_series(std::iter::once(Rectangle::new(
                [(x - BAR_WIDTH / 2.0, 0.0), (x + BAR_WIDTH / 2.0, h)],
                METHOD1_COLOR.filled(),
            )))?;
            chart.draw_series(std::iter::once(ErrorBar::new_vertical(
                x,
                h - e,
                h,
                h + e,
                BLACK.stroke_width(1),
                ERROR_BAR_CAP,
            )))?;
            if let Some(text) = percent_label(h) {
                chart.draw_series(std::iter::once(Text::new(
                    text,
                    (x, h + e + pad),
                    percent_up.clone(),
                )))?;
            }
        }

        if record.uplift2.magnitude != 0.0 {
            let h = record.uplift2.magnitude;
            let e = record.uplift2.stddev;
            chart.draw_series(std::iter::once(Rectangle::new(
                [(x - BAR_WIDTH / 2.0, 0.0), (x + BAR_WIDTH / 2.0, h)],
                METHOD2_COLOR.filled(),
            )))?;
            chart.draw_series(std::iter::once(ErrorBar::new_vertical(
                x,
                h - e,
                h,
                h + e,
                BLACK.stroke_width(1),
                ERROR_BAR_CAP,
            )))?;
            if let Some(text) = percent_label(h) {
                chart.draw_series(std::iter::once(Text::new(
                    text,
                    (x, h - e - pad),
                    percent_down.clone(),
                )))?;
            }
        }

        let anchor = case_anchor(record.winner);
        let (y, style) = if anchor < 0.0 {
            (anchor - pad, case_down.clone())
        } else {
            (anchor + pad, case_up.clone())
        };
        chart.draw_series(std::iter::once(Text::new(
            record.label.clone(),
            (x, y),
            style,
        )))?;
    }

    root.present()?;
    Ok(())
}
