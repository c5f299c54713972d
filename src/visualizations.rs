// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use chrono::Local;
use csv::Writer;
use plotters::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{AppError, Result};
use crate::models::HistoricalSeries;

const COLOR_CYAN: RGBColor = RGBColor(13, 202, 240);
const COLOR_SLATE: RGBColor = RGBColor(100, 116, 139);
const COLOR_GRAY_LIGHT: RGBColor = RGBColor(243, 244, 246);

fn chart_err(e: impl std::fmt::Display) -> AppError {
    AppError::Chart(e.to_string())
}

/// `history_USD_EUR_20250314_101500.svg` inside `output_dir`
pub fn chart_path(output_dir: &Path, series: &HistoricalSeries) -> PathBuf {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    output_dir.join(format!(
        "history_{}_{}_{}.svg",
        series.pair.base(),
        series.pair.target(),
        timestamp
    ))
}

/// Line chart of the series, written as SVG to `output_path`
pub fn create_history_chart(series: &HistoricalSeries, output_path: &Path) -> Result<()> {
    let (lo, hi) = series
        .rate_bounds()
        .ok_or_else(|| AppError::Chart("no historical data to plot".to_string()))?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(chart_err)?;
        }
    }

    // Flat series still need a visible band
    let pad = if hi > lo { (hi - lo) * 0.1 } else { hi.abs().max(1e-4) * 0.01 };
    let y_range = (lo - pad)..(hi + pad);
    let last_index = series.len().saturating_sub(1).max(1) as i32;

    let root = SVGBackend::new(output_path, (1200, 600)).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!(
                "{} to {}: last {} days ({} to {})",
                series.pair.base(),
                series.pair.target(),
                (series.end - series.start).num_days(),
                series.start.format("%Y-%m-%d"),
                series.end.format("%Y-%m-%d")
            ),
            ("sans-serif", 28).into_font().color(&BLACK),
        )
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(0i32..last_index, y_range)
        .map_err(chart_err)?;

    let dates: Vec<String> = series.rates.iter().map(|r| r.date.format("%m-%d").to_string()).collect();

    chart
        .configure_mesh()
        .light_line_style(COLOR_GRAY_LIGHT.stroke_width(1))
        .x_labels(dates.len().max(2))
        .x_label_formatter(&|x| {
            usize::try_from(*x)
                .ok()
                .and_then(|i| dates.get(i).cloned())
                .unwrap_or_default()
        })
        .y_label_formatter(&|y| format!("{:.4}", y))
        .x_desc("Date")
        .y_desc(format!("Rate ({} per {})", series.pair.target(), series.pair.base()))
        .axis_desc_style(("sans-serif", 16))
        .draw()
        .map_err(chart_err)?;

    let points: Vec<(i32, f64)> = series
        .rates
        .iter()
        .enumerate()
        .map(|(i, r)| (i as i32, r.rate))
        .collect();

    chart
        .draw_series(LineSeries::new(points.clone(), COLOR_CYAN.stroke_width(3)))
        .map_err(chart_err)?;
    chart
        .draw_series(points.iter().map(|&(x, y)| Circle::new((x, y), 4, COLOR_SLATE.filled())))
        .map_err(chart_err)?;

    root.present().map_err(chart_err)?;
    debug!("Wrote chart {}", output_path.display());
    Ok(())
}

/// Plain-text table of the series for the terminal
pub fn render_history_table(series: &HistoricalSeries) -> String {
    let mut out = format!("{:<12} {:>12}\n", "Date", "Rate");
    out.push_str(&format!("{}\n", "-".repeat(25)));
    for r in &series.rates {
        out.push_str(&format!("{:<12} {:>12.4}\n", r.date.format("%Y-%m-%d"), r.rate));
    }
    out
}

/// Export the series with `Date,Rate` columns
pub fn export_history_csv(series: &HistoricalSeries, path: &Path) -> Result<()> {
    let mut writer = Writer::from_path(path).map_err(chart_err)?;
    for rate in &series.rates {
        writer.serialize(rate).map_err(chart_err)?;
    }
    writer.flush().map_err(chart_err)?;
    Ok(())
}
