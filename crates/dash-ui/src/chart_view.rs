//! Line chart of total job count per year.
//!
//! The terminal chart draws straight Braille segments, so the "smooth"
//! interpolation happens on the data side: the year series is resampled with
//! a Catmull-Rom spline before plotting, and the raw per-year points are
//! re-plotted as a scatter dataset so each year keeps a visible marker.

use ratatui::{
    layout::Rect,
    symbols::Marker,
    text::Line,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

use dash_core::models::YearSummary;

use crate::themes::Theme;

/// How many interpolated samples to emit per segment between two years.
const SMOOTH_SEGMENTS: usize = 8;

/// Render the jobs-over-time chart into `area`.
///
/// `summaries` must be in ascending year order; the chart always plots by
/// year regardless of the table's display sort.
pub fn render_jobs_chart(frame: &mut Frame, area: Rect, summaries: &[YearSummary], theme: &Theme) {
    let raw: Vec<(f64, f64)> = summaries
        .iter()
        .map(|s| (f64::from(s.year), f64::from(s.total_jobs)))
        .collect();
    let smoothed = smooth_series(&raw, SMOOTH_SEGMENTS);

    let (x_min, x_max) = x_bounds(&raw);
    let y_max = y_upper_bound(&raw, &smoothed);

    let datasets = vec![
        Dataset::default()
            .name("total jobs")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(theme.chart_line)
            .data(&smoothed),
        // Raw year points drawn on top so each year keeps a marker.
        Dataset::default()
            .marker(Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(theme.chart_marker)
            .data(&raw),
    ];

    let x_labels: Vec<Line> = year_labels(summaries)
        .into_iter()
        .map(Line::from)
        .collect();
    let y_labels: Vec<Line> = vec![
        Line::from("0"),
        Line::from(format!("{:.0}", y_max / 2.0)),
        Line::from(format!("{:.0}", y_max)),
    ];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Jobs per Year "),
        )
        .x_axis(
            Axis::default()
                .style(theme.chart_axis)
                .bounds([x_min, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(theme.chart_axis)
                .bounds([0.0, y_max])
                .labels(y_labels),
        );

    frame.render_widget(chart, area);
}

// ── Smoothing ─────────────────────────────────────────────────────────────────

/// Resample `points` with a uniform Catmull-Rom spline.
///
/// Emits `segments` samples per input segment plus the final point, so the
/// original endpoints are preserved exactly. Inputs with fewer than three
/// points are returned unchanged (nothing to smooth).
pub fn smooth_series(points: &[(f64, f64)], segments: usize) -> Vec<(f64, f64)> {
    if points.len() < 3 || segments < 2 {
        return points.to_vec();
    }

    let mut out = Vec::with_capacity((points.len() - 1) * segments + 1);
    let last = points.len() - 1;

    for i in 0..last {
        // Clamp the neighbor indexes at the ends of the series.
        let p0 = points[i.saturating_sub(1)];
        let p1 = points[i];
        let p2 = points[i + 1];
        let p3 = points[(i + 2).min(last)];

        for step in 0..segments {
            let t = step as f64 / segments as f64;
            out.push((
                catmull_rom(p0.0, p1.0, p2.0, p3.0, t),
                catmull_rom(p0.1, p1.1, p2.1, p3.1, t),
            ));
        }
    }
    out.push(points[last]);
    out
}

/// Evaluate one coordinate of the uniform Catmull-Rom spline at `t` in [0, 1].
fn catmull_rom(p0: f64, p1: f64, p2: f64, p3: f64, t: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;
    0.5 * ((2.0 * p1)
        + (-p0 + p2) * t
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
        + (-p0 + 3.0 * p1 - 3.0 * p2 + p3) * t3)
}

// ── Axis helpers ──────────────────────────────────────────────────────────────

/// X bounds with half a year of padding; a single point gets a symmetric
/// window around it so the chart still has width.
fn x_bounds(raw: &[(f64, f64)]) -> (f64, f64) {
    match raw {
        [] => (0.0, 1.0),
        [(x, _)] => (x - 1.0, x + 1.0),
        _ => {
            let min = raw[0].0;
            let max = raw[raw.len() - 1].0;
            (min - 0.5, max + 0.5)
        }
    }
}

/// Upper Y bound: the series maximum (smoothing overshoot included) plus
/// headroom, never below 1.
fn y_upper_bound(raw: &[(f64, f64)], smoothed: &[(f64, f64)]) -> f64 {
    let max = raw
        .iter()
        .chain(smoothed.iter())
        .map(|&(_, y)| y)
        .fold(0.0_f64, f64::max);
    (max * 1.15).max(1.0)
}

/// First, middle, and last year as axis labels (deduplicated for short
/// series).
fn year_labels(summaries: &[YearSummary]) -> Vec<String> {
    match summaries {
        [] => Vec::new(),
        [only] => vec![only.year.to_string()],
        [first, .., last] => {
            let mid = summaries[summaries.len() / 2].year;
            let mut labels = vec![first.year.to_string()];
            if mid != first.year && mid != last.year {
                labels.push(mid.to_string());
            }
            labels.push(last.year.to_string());
            labels
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
