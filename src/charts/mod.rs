//! Static chart rendering. Charts are produced as standalone SVG documents
//! from [`ChartSeries`]/[`StackedSeries`] and never see raw records.

mod svg;

use std::{fs, path::PathBuf};

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::info;

use crate::config::PresentationConfig;
use crate::currency::{format_money, MoneyFormat};
use crate::errors::{ExpenseError, Result};
use crate::report::{ChartSeries, StackedSeries};

use svg::SvgDocument;

pub const PIE_CHART_FILE: &str = "category_pie_chart.svg";
pub const TREND_CHART_FILE: &str = "monthly_trend_chart.svg";
pub const STACKED_CHART_FILE: &str = "category_monthly_stacked_chart.svg";

const MARGIN: f64 = 60.0;
const TITLE_OFFSET: f64 = 32.0;
const LEGEND_ROW: f64 = 22.0;

/// Size, colours and money format used by every chart.
#[derive(Debug, Clone)]
pub struct ChartStyle {
    pub width: f64,
    pub height: f64,
    pub palette: Vec<String>,
    pub trend_color: String,
    pub money: MoneyFormat,
}

impl ChartStyle {
    pub fn from_config(config: &PresentationConfig) -> Self {
        Self {
            width: f64::from(config.chart_width.max(320)),
            height: f64::from(config.chart_height.max(240)),
            palette: config.palette.clone(),
            trend_color: config.trend_color.clone(),
            money: config.money.clone(),
        }
    }

    fn colour(&self, idx: usize) -> &str {
        if self.palette.is_empty() {
            "#888888"
        } else {
            &self.palette[idx % self.palette.len()]
        }
    }

    fn money(&self, value: Decimal) -> String {
        format_money(&self.money, value, 0)
    }
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self::from_config(&PresentationConfig::default())
    }
}

/// Donut chart of category shares with a legend carrying each amount.
///
/// Only positive values get a slice; every label is still listed in the
/// legend.
pub fn render_pie(series: &ChartSeries, style: &ChartStyle) -> String {
    let mut doc = SvgDocument::new(style.width, style.height);
    doc.title(&series.title);
    if series.is_empty() {
        doc.empty_notice();
        return doc.finish();
    }

    let legend_width = style.width * 0.35;
    let plot_width = style.width - legend_width;
    let cx = plot_width / 2.0;
    let cy = (style.height + TITLE_OFFSET) / 2.0;
    let outer = ((plot_width.min(style.height - TITLE_OFFSET)) / 2.0 - MARGIN / 2.0).max(20.0);
    let inner = outer * 0.55;

    let positive: f64 = series
        .values
        .iter()
        .filter_map(|value| value.to_f64())
        .filter(|value| *value > 0.0)
        .sum();

    let mut angle = -std::f64::consts::FRAC_PI_2;
    for (idx, value) in series.values.iter().enumerate() {
        let amount = value.to_f64().unwrap_or(0.0);
        if amount <= 0.0 || positive <= 0.0 {
            continue;
        }
        let share = amount / positive;
        let sweep = share * std::f64::consts::TAU;
        let colour = style.colour(idx);
        if share >= 0.9999 {
            doc.ring(cx, cy, outer, inner, colour);
        } else {
            doc.donut_slice(cx, cy, outer, inner, angle, angle + sweep, colour);
        }

        let mid = angle + sweep / 2.0;
        let radius = (outer + inner) / 2.0;
        if share >= 0.04 {
            doc.text(
                cx + radius * mid.cos(),
                cy + radius * mid.sin(),
                &format!("{:.1}%", share * 100.0),
                "middle",
                12.0,
                "#ffffff",
            );
        }
        angle += sweep;
    }

    doc.text(cx, cy + 6.0, &style.money(series.total()), "middle", 16.0, "#333333");

    let legend_x = plot_width + 10.0;
    for (idx, (label, value)) in series.points().enumerate() {
        let y = MARGIN + TITLE_OFFSET + idx as f64 * LEGEND_ROW;
        doc.legend_entry(
            legend_x,
            y,
            style.colour(idx),
            &format!("{label}: {}", style.money(value)),
        );
    }
    doc.finish()
}

/// Vertical bar per label with the value written above each bar.
pub fn render_bar(series: &ChartSeries, style: &ChartStyle) -> String {
    let mut doc = SvgDocument::new(style.width, style.height);
    doc.title(&series.title);
    if series.is_empty() {
        doc.empty_notice();
        return doc.finish();
    }

    let values: Vec<f64> = series
        .values
        .iter()
        .map(|value| value.to_f64().unwrap_or(0.0))
        .collect();
    let axis = Axis::new(&values, style, MARGIN);

    let slot = axis.plot_width / values.len() as f64;
    let bar_width = slot * 0.6;
    for (idx, ((label, value), amount)) in series.points().zip(&values).enumerate() {
        let x = axis.left + slot * idx as f64 + (slot - bar_width) / 2.0;
        let (top, height) = axis.span(0.0, *amount);
        doc.rect(x, top, bar_width, height, &style.trend_color);

        let label_y = if *amount >= 0.0 { top - 6.0 } else { top + height + 14.0 };
        doc.text(x + bar_width / 2.0, label_y, &style.money(value), "middle", 11.0, "#333333");
        doc.text(
            x + bar_width / 2.0,
            axis.bottom + 18.0,
            label,
            "middle",
            11.0,
            "#333333",
        );
    }
    axis.draw(&mut doc);
    doc.finish()
}

/// Stacked bars per label, one layer per category, with a legend.
pub fn render_stacked(series: &StackedSeries, style: &ChartStyle) -> String {
    let mut doc = SvgDocument::new(style.width, style.height);
    doc.title(&series.title);
    if series.is_empty() {
        doc.empty_notice();
        return doc.finish();
    }

    let legend_width = style.width * 0.22;
    let mut extents = Vec::with_capacity(series.labels.len() * 2);
    for idx in 0..series.labels.len() {
        let (positive, negative) = stack_extent(series, idx);
        extents.push(positive);
        extents.push(negative);
    }
    let mut axis = Axis::new(&extents, style, MARGIN);
    axis.plot_width -= legend_width;

    let slot = axis.plot_width / series.labels.len() as f64;
    let bar_width = slot * 0.6;
    for (col, label) in series.labels.iter().enumerate() {
        let x = axis.left + slot * col as f64 + (slot - bar_width) / 2.0;
        let mut up = 0.0;
        let mut down = 0.0;
        for (layer_idx, (_, values)) in series.layers.iter().enumerate() {
            let amount = values.get(col).and_then(|v| v.to_f64()).unwrap_or(0.0);
            if amount == 0.0 {
                continue;
            }
            let base = if amount > 0.0 { &mut up } else { &mut down };
            let (top, height) = axis.span(*base, *base + amount);
            doc.rect(x, top, bar_width, height, style.colour(layer_idx));
            *base += amount;
        }
        doc.text(x + bar_width / 2.0, axis.bottom + 18.0, label, "middle", 11.0, "#333333");
    }
    axis.draw(&mut doc);

    let legend_x = axis.left + axis.plot_width + 20.0;
    for (idx, (category, _)) in series.layers.iter().enumerate() {
        let y = MARGIN + TITLE_OFFSET + idx as f64 * LEGEND_ROW;
        doc.legend_entry(legend_x, y, style.colour(idx), category);
    }
    doc.finish()
}

/// Writes an SVG document to `path`.
/// Writes every rendered chart or none of them. Each document is staged as a
/// `.tmp` sibling first; any failure removes the staged files and the charts
/// already moved into place by this call.
pub fn write_charts(charts: &[(PathBuf, String)]) -> Result<()> {
    let mut staged = Vec::with_capacity(charts.len());
    for (path, svg) in charts {
        let tmp = path.with_extension("svg.tmp");
        if let Err(err) = fs::write(&tmp, svg) {
            let _ = fs::remove_file(&tmp);
            discard(&staged, &[]);
            return Err(ExpenseError::io(&tmp, err));
        }
        staged.push((tmp, path.clone()));
    }

    for (idx, (tmp, path)) in staged.iter().enumerate() {
        if let Err(err) = fs::rename(tmp, path) {
            let placed: Vec<&PathBuf> = staged[..idx].iter().map(|(_, path)| path).collect();
            discard(&staged[idx..], &placed);
            return Err(ExpenseError::io(path, err));
        }
    }

    for (path, _) in charts {
        info!(path = %path.display(), "chart rendered");
    }
    Ok(())
}

fn discard(staged: &[(PathBuf, PathBuf)], placed: &[&PathBuf]) {
    for (tmp, _) in staged {
        let _ = fs::remove_file(tmp);
    }
    for path in placed {
        let _ = fs::remove_file(path);
    }
}

fn stack_extent(series: &StackedSeries, idx: usize) -> (f64, f64) {
    series
        .layers
        .iter()
        .filter_map(|(_, values)| values.get(idx).and_then(|v| v.to_f64()))
        .fold((0.0, 0.0), |(up, down), value| {
            if value >= 0.0 {
                (up + value, down)
            } else {
                (up, down + value)
            }
        })
}

/// Linear value axis shared by the bar charts.
struct Axis {
    left: f64,
    top: f64,
    bottom: f64,
    plot_width: f64,
    min: f64,
    max: f64,
}

impl Axis {
    fn new(values: &[f64], style: &ChartStyle, margin: f64) -> Self {
        let max = values.iter().copied().fold(0.0_f64, f64::max);
        let min = values.iter().copied().fold(0.0_f64, f64::min);
        let (min, max) = if (max - min).abs() < f64::EPSILON {
            (0.0, 1.0)
        } else {
            (min * 1.1, max * 1.1)
        };
        Self {
            left: margin * 1.5,
            top: margin + TITLE_OFFSET,
            bottom: style.height - margin,
            plot_width: style.width - margin * 2.5,
            min,
            max,
        }
    }

    fn y(&self, value: f64) -> f64 {
        let ratio = (value - self.min) / (self.max - self.min);
        self.bottom - ratio * (self.bottom - self.top)
    }

    /// Top coordinate and height of a bar between two values.
    fn span(&self, from: f64, to: f64) -> (f64, f64) {
        let a = self.y(from);
        let b = self.y(to);
        (a.min(b), (a - b).abs())
    }

    fn draw(&self, doc: &mut SvgDocument) {
        let zero = self.y(0.0);
        doc.line(self.left, zero, self.left + self.plot_width, zero, "#666666");
        doc.line(self.left, self.top, self.left, self.bottom, "#666666");
    }
}
