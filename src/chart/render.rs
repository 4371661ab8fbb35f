//! Rendering of [`FigureSpec`]s to PNG files with [`plotters`].
//!
//! Figures are drawn on the bitmap backend with its default font lookup, so
//! rendering works headless. Categorical panels put category `i` at x = `i`
//! and label the integer ticks.

use std::collections::BTreeSet;
use std::ops::Range;
use std::path::Path;

use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontTransform;
use thiserror::Error;

use super::spec::{FigureSpec, PanelKind, PanelSpec};
use crate::data::model::{Column, LaptopTable};
use crate::stats::{self, BoxStats};

/// Errors that can occur during figure rendering
#[derive(Error, Debug)]
pub enum PlotError {
    #[error("Failed to create drawing area: {0}")]
    DrawingArea(String),

    #[error("Failed to configure chart: {0}")]
    ChartConfig(String),

    #[error("Failed to draw chart elements: {0}")]
    Drawing(String),

    #[error("Invalid figure {file}: {reason}")]
    InvalidFigure { file: String, reason: String },

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

type Result<T> = core::result::Result<T, PlotError>;

type Chart<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

const FONT: &str = "sans-serif";

fn drawing<E: std::fmt::Display>(e: E) -> PlotError {
    PlotError::Drawing(e.to_string())
}

/// Check that a figure can be laid out: at least one panel, every panel
/// inside the grid and no two panels sharing a cell.
pub fn validate_figure(fig: &FigureSpec) -> Result<()> {
    let invalid = |reason: String| PlotError::InvalidFigure {
        file: fig.file_name.clone(),
        reason,
    };
    let (rows, cols) = fig.grid;

    if fig.panels.is_empty() {
        return Err(invalid("no panels".to_string()));
    }
    let mut seen = BTreeSet::new();
    for panel in &fig.panels {
        let (r, c) = panel.cell;
        if r >= rows || c >= cols {
            return Err(invalid(format!("cell ({r}, {c}) outside {rows}x{cols} grid")));
        }
        if !seen.insert(panel.cell) {
            return Err(invalid(format!("cell ({r}, {c}) used twice")));
        }
    }
    Ok(())
}

/// Render one figure of `table` to `output_path`.
///
/// Pixel size is the figure's inch size times `dpi`; fonts scale along with
/// it so a 300 dpi image looks like a 100 dpi one, only sharper.
pub fn render_figure(
    table: &LaptopTable,
    fig: &FigureSpec,
    output_path: &Path,
    dpi: u32,
) -> Result<()> {
    validate_figure(fig)?;
    if table.is_empty() {
        return Err(PlotError::InvalidData("no rows to plot".to_string()));
    }

    let root = BitMapBackend::new(output_path, fig.pixel_size(dpi)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

    let scale = f64::from(dpi) / 100.0;
    let cells = root.split_evenly(fig.grid);
    for panel in &fig.panels {
        let (r, c) = panel.cell;
        let area = &cells[r * fig.grid.1 + c];
        match panel.kind {
            PanelKind::PriceHistogram => draw_histogram(area, table, panel, scale)?,
            PanelKind::PriceBox { by, hue } => draw_boxes(area, table, panel, by, hue, scale)?,
            PanelKind::AverageBar { by } => {
                let (labels, values): (Vec<String>, Vec<f64>) = stats::average_by(table, by)
                    .into_iter()
                    .map(|(key, mean)| (key.to_string(), mean))
                    .unzip();
                draw_bars(area, panel, &labels, &values, scale)?;
            }
            PanelKind::SegmentBar => {
                let (labels, values): (Vec<String>, Vec<f64>) = stats::segment_counts(table)
                    .into_iter()
                    .map(|(cat, n)| (cat.label().to_string(), n as f64))
                    .unzip();
                draw_bars(area, panel, &labels, &values, scale)?;
            }
        }
    }

    root.present().map_err(drawing)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Axes
// ---------------------------------------------------------------------------

/// Label for a categorical tick: the category name at integer positions,
/// nothing in between.
fn category_label(labels: &[String], x: f64) -> String {
    let idx = x.round();
    if (x - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}

/// `min..max` widened by 5% on both ends; a degenerate range becomes `±1`.
fn padded_range(min: f64, max: f64) -> Range<f64> {
    if !min.is_finite() || !max.is_finite() {
        return 0.0..1.0;
    }
    if max <= min {
        return (min - 1.0)..(max + 1.0);
    }
    let pad = (max - min) * 0.05;
    (min - pad)..(max + pad)
}

fn categorical_chart<'a, DB: DrawingBackend>(
    area: &'a DrawingArea<DB, Shift>,
    panel: &PanelSpec,
    labels: &[String],
    y_range: Range<f64>,
    scale: f64,
) -> Result<Chart<'a, DB>> {
    let n = labels.len().max(1);
    let x_label_area = if panel.rotate_x_labels { 120.0 } else { 45.0 };

    let mut chart = ChartBuilder::on(area)
        .caption(&panel.title, (FONT, 22.0 * scale))
        .margin((10.0 * scale) as u32)
        .x_label_area_size((x_label_area * scale) as u32)
        .y_label_area_size((70.0 * scale) as u32)
        .build_cartesian_2d(-0.5..(n as f64 - 0.5), y_range)
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    let tick_font = (FONT, 12.0 * scale).into_font();
    let x_font = if panel.rotate_x_labels {
        tick_font.transform(FontTransform::Rotate90)
    } else {
        tick_font.clone()
    };
    let fmt = |x: &f64| category_label(labels, *x);

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n)
        .x_label_formatter(&fmt)
        .x_label_style(x_font)
        .y_label_style(tick_font)
        .x_desc(panel.x_label.as_str())
        .y_desc(panel.y_label.as_str())
        .axis_desc_style((FONT, 14.0 * scale))
        .draw()
        .map_err(drawing)?;

    Ok(chart)
}

// ---------------------------------------------------------------------------
// Panels
// ---------------------------------------------------------------------------

fn draw_histogram<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    table: &LaptopTable,
    panel: &PanelSpec,
    scale: f64,
) -> Result<()> {
    let bins = stats::histogram(&table.prices());
    let (Some(first), Some(last)) = (bins.first(), bins.last()) else {
        return Err(PlotError::InvalidData("no finite prices".to_string()));
    };
    let max_count = bins.iter().map(|b| b.count).max().unwrap_or(0) as f64;

    let mut chart = ChartBuilder::on(area)
        .caption(&panel.title, (FONT, 22.0 * scale))
        .margin((10.0 * scale) as u32)
        .x_label_area_size((45.0 * scale) as u32)
        .y_label_area_size((70.0 * scale) as u32)
        .build_cartesian_2d(first.start..last.end, 0.0..(max_count * 1.05).max(1.0))
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    chart
        .configure_mesh()
        .x_desc(panel.x_label.as_str())
        .y_desc(panel.y_label.as_str())
        .label_style((FONT, 12.0 * scale))
        .axis_desc_style((FONT, 14.0 * scale))
        .draw()
        .map_err(drawing)?;

    let color = panel.palette.colors(1)[0];
    chart
        .draw_series(bins.iter().map(|b| {
            Rectangle::new([(b.start, 0.0), (b.end, b.count as f64)], color.mix(0.8).filled())
        }))
        .map_err(drawing)?;
    chart
        .draw_series(bins.iter().map(|b| {
            Rectangle::new([(b.start, 0.0), (b.end, b.count as f64)], BLACK.stroke_width(1))
        }))
        .map_err(drawing)?;

    Ok(())
}

/// A box to draw at x = `center`.
struct BoxSlot {
    center: f64,
    width: f64,
    stats: BoxStats,
    color: RGBColor,
}

fn draw_boxes<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    table: &LaptopTable,
    panel: &PanelSpec,
    by: Column,
    hue: Option<Column>,
    scale: f64,
) -> Result<()> {
    let mut labels = Vec::new();
    let mut slots = Vec::new();
    let mut legend = Vec::new();

    match hue {
        None => {
            let groups = stats::group_prices(table, by);
            let colors = panel.palette.colors(groups.len());
            for (i, ((key, prices), color)) in groups.iter().zip(colors).enumerate() {
                labels.push(key.to_string());
                if let Some(stats) = BoxStats::from_values(prices) {
                    slots.push(BoxSlot {
                        center: i as f64,
                        width: 0.6,
                        stats,
                        color,
                    });
                }
            }
        }
        Some(hue) => {
            let groups = stats::group_prices_by_hue(table, by, hue);
            let mut levels = stats::categories(table, hue);
            levels.retain(|level| groups.iter().any(|(_, inner)| inner.contains_key(level)));
            let colors = panel.palette.colors(levels.len());
            let slot_width = 0.8 / levels.len().max(1) as f64;

            for (i, (key, inner)) in groups.iter().enumerate() {
                labels.push(key.to_string());
                for (j, (level, color)) in levels.iter().zip(&colors).enumerate() {
                    let Some(stats) = inner.get(level).and_then(|p| BoxStats::from_values(p))
                    else {
                        continue;
                    };
                    slots.push(BoxSlot {
                        center: i as f64 - 0.4 + (j as f64 + 0.5) * slot_width,
                        width: slot_width * 0.9,
                        stats,
                        color: *color,
                    });
                }
            }
            legend = levels
                .iter()
                .map(ToString::to_string)
                .zip(colors)
                .collect::<Vec<_>>();
        }
    }

    if slots.is_empty() {
        log::warn!("panel '{}' has no data to plot", panel.title);
    }

    let (low, high) = slots
        .iter()
        .map(|s| s.stats.extent())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (a, b)| {
            (lo.min(a), hi.max(b))
        });
    let mut chart = categorical_chart(area, panel, &labels, padded_range(low, high), scale)?;

    for slot in &slots {
        draw_box(&mut chart, slot)?;
    }

    if !legend.is_empty() {
        for (name, color) in legend {
            chart
                .draw_series(std::iter::empty::<Rectangle<(f64, f64)>>())
                .map_err(drawing)?
                .label(name)
                .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
        }
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .label_font((FONT, 12.0 * scale))
            .draw()
            .map_err(drawing)?;
    }

    Ok(())
}

fn draw_box<DB: DrawingBackend>(chart: &mut Chart<'_, DB>, slot: &BoxSlot) -> Result<()> {
    let s = &slot.stats;
    let (left, right) = (slot.center - slot.width / 2.0, slot.center + slot.width / 2.0);
    let (cap_left, cap_right) = (slot.center - slot.width / 4.0, slot.center + slot.width / 4.0);
    let line = BLACK.stroke_width(1);

    chart
        .draw_series(std::iter::once(Rectangle::new(
            [(left, s.q1), (right, s.q3)],
            slot.color.filled(),
        )))
        .map_err(drawing)?;
    chart
        .draw_series(std::iter::once(Rectangle::new([(left, s.q1), (right, s.q3)], line)))
        .map_err(drawing)?;

    let segments = [
        // median
        vec![(left, s.median), (right, s.median)],
        // whiskers
        vec![(slot.center, s.q1), (slot.center, s.whisker_low)],
        vec![(slot.center, s.q3), (slot.center, s.whisker_high)],
        // caps
        vec![(cap_left, s.whisker_low), (cap_right, s.whisker_low)],
        vec![(cap_left, s.whisker_high), (cap_right, s.whisker_high)],
    ];
    chart
        .draw_series(segments.into_iter().map(|pts| PathElement::new(pts, line)))
        .map_err(drawing)?;

    chart
        .draw_series(
            s.outliers
                .iter()
                .map(|&v| Circle::new((slot.center, v), 3, line)),
        )
        .map_err(drawing)?;

    Ok(())
}

fn draw_bars<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    panel: &PanelSpec,
    labels: &[String],
    values: &[f64],
    scale: f64,
) -> Result<()> {
    let max = values.iter().copied().fold(0.0, f64::max);
    let mut chart = categorical_chart(area, panel, labels, 0.0..(max * 1.1).max(1.0), scale)?;

    let colors = panel.palette.colors(values.len());
    chart
        .draw_series(values.iter().zip(colors).enumerate().map(|(i, (&v, color))| {
            let x = i as f64;
            Rectangle::new([(x - 0.4, 0.0), (x + 0.4, v)], color.filled())
        }))
        .map_err(drawing)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::spec::ChartProfile;
    use crate::data::model::RawLaptop;
    use crate::data::transform::{categorize_prices, normalize, reorder, COLUMN_ORDER};

    fn listing(brand: &str, ram_gb: i64, storage: &str, gpu: &str, price: f64) -> RawLaptop {
        RawLaptop {
            brand: brand.to_string(),
            processor: "Intel i7".to_string(),
            ram_gb,
            storage: storage.to_string(),
            gpu: gpu.to_string(),
            screen_size_inch: 15.6,
            resolution: "1920x1080".to_string(),
            battery_life_hours: 8.0,
            weight_kg: 1.9,
            operating_system: "Windows".to_string(),
            price,
        }
    }

    fn sample_table() -> LaptopTable {
        let raw = vec![
            listing("Dell", 8, "512GB SSD", "Integrated", 750.0),
            listing("Dell", 16, "1TB HDD", "Nvidia GTX 1650", 1200.0),
            listing("Apple", 16, "1TB SSD", "Integrated", 2000.0),
            listing("Apple", 32, "2TB SSD", "Integrated", 3400.0),
            listing("Chuwi", 4, "eMMC", "Integrated", 250.0),
            listing("Razer", 32, "1TB SSD", "Nvidia RTX 4080", 5000.0),
            listing("HP", 8, "256GB SSD", "Integrated", 600.0),
        ];
        categorize_prices(&reorder(&normalize(&raw), &COLUMN_ORDER))
    }

    fn labels() -> Vec<String> {
        vec!["Apple".to_string(), "Dell".to_string(), "HP".to_string()]
    }

    #[test]
    fn category_labels_only_on_integer_ticks() {
        let labels = labels();
        assert_eq!(category_label(&labels, 0.0), "Apple");
        assert_eq!(category_label(&labels, 2.0), "HP");
        assert_eq!(category_label(&labels, 0.5), "");
        assert_eq!(category_label(&labels, -1.0), "");
        assert_eq!(category_label(&labels, 3.0), "");
    }

    #[test]
    fn padded_range_handles_degenerate_input() {
        assert_eq!(padded_range(100.0, 300.0), 90.0..310.0);
        assert_eq!(padded_range(5.0, 5.0), 4.0..6.0);
        assert_eq!(padded_range(f64::INFINITY, f64::NEG_INFINITY), 0.0..1.0);
    }

    #[test]
    fn builtin_figures_validate() {
        for profile in [ChartProfile::Full, ChartProfile::Reduced] {
            for fig in profile.figures() {
                validate_figure(&fig).unwrap();
            }
        }
    }

    #[test]
    fn overlapping_panels_are_rejected() {
        let mut fig = ChartProfile::Full.figures().remove(0);
        fig.panels[1].cell = fig.panels[0].cell;
        assert!(matches!(
            validate_figure(&fig),
            Err(PlotError::InvalidFigure { .. })
        ));

        fig.panels.clear();
        assert!(validate_figure(&fig).is_err());
    }

    #[test]
    fn panel_outside_grid_is_rejected() {
        let mut fig = ChartProfile::Full.figures().remove(1);
        fig.panels[0].cell = (0, 1);
        let err = validate_figure(&fig).unwrap_err();
        assert!(err.to_string().contains("outside 1x1 grid"), "{err}");
    }

    #[test]
    fn empty_table_is_not_rendered() {
        let dir = tempfile::tempdir().unwrap();
        let table = LaptopTable {
            columns: Vec::new(),
            rows: Vec::new(),
        };
        let fig = ChartProfile::Full.figures().remove(2);
        let path = dir.path().join(&fig.file_name);

        let err = render_figure(&table, &fig, &path, 100).unwrap_err();
        assert!(matches!(err, PlotError::InvalidData(_)));
        assert!(!path.exists());
    }

    #[test]
    #[ignore = "Font rendering not available in test environment"]
    fn full_profile_renders_every_image() {
        let dir = tempfile::tempdir().unwrap();
        let table = sample_table();
        assert!(table.rows.iter().any(|r| r.storage_size_gb.is_none()));

        for fig in ChartProfile::Full.figures() {
            let path = dir.path().join(&fig.file_name);
            render_figure(&table, &fig, &path, 100).unwrap();
            assert!(path.exists(), "{} missing", fig.file_name);
        }
    }

    #[test]
    #[ignore = "Font rendering not available in test environment"]
    fn reduced_profile_renders_every_image() {
        let dir = tempfile::tempdir().unwrap();
        let table = sample_table();

        for fig in ChartProfile::Reduced.figures() {
            let path = dir.path().join(&fig.file_name);
            render_figure(&table, &fig, &path, 50).unwrap();
            assert!(path.exists(), "{} missing", fig.file_name);
        }
    }
}
