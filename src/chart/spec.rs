//! Declarative chart definitions.
//!
//! Which charts get drawn is data, not code: a [`ChartProfile`] expands to a
//! list of [`FigureSpec`]s, each holding a grid of [`PanelSpec`]s.

use serde::Deserialize;

use crate::color::PaletteName;
use crate::data::model::Column;

/// What a single panel plots. Every kind plots price on one of its axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKind {
    /// Histogram of all prices.
    PriceHistogram,
    /// One price box per value of `by`, optionally split by `hue`.
    PriceBox { by: Column, hue: Option<Column> },
    /// Mean price per value of `by`, most expensive first.
    AverageBar { by: Column },
    /// Listing count per price category.
    SegmentBar,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PanelSpec {
    pub kind: PanelKind,
    /// `(row, col)` inside the figure grid.
    pub cell: (usize, usize),
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub palette: PaletteName,
    /// Draw category labels vertically (long brand/CPU/GPU names).
    pub rotate_x_labels: bool,
}

impl PanelSpec {
    pub fn new(kind: PanelKind, cell: (usize, usize), title: &str) -> Self {
        PanelSpec {
            kind,
            cell,
            title: title.to_string(),
            x_label: String::new(),
            y_label: String::new(),
            palette: PaletteName::Viridis,
            rotate_x_labels: false,
        }
    }

    pub fn labels(mut self, x: &str, y: &str) -> Self {
        self.x_label = x.to_string();
        self.y_label = y.to_string();
        self
    }

    pub fn palette(mut self, palette: PaletteName) -> Self {
        self.palette = palette;
        self
    }

    pub fn rotated(mut self) -> Self {
        self.rotate_x_labels = true;
        self
    }
}

/// One image file.
#[derive(Debug, Clone, PartialEq)]
pub struct FigureSpec {
    pub file_name: String,
    /// Width and height in inches; multiplied by the configured dpi.
    pub size_in: (f64, f64),
    /// `(rows, cols)` of the panel grid.
    pub grid: (usize, usize),
    pub panels: Vec<PanelSpec>,
}

impl FigureSpec {
    pub fn pixel_size(&self, dpi: u32) -> (u32, u32) {
        let dpi = f64::from(dpi);
        (
            (self.size_in.0 * dpi).round() as u32,
            (self.size_in.1 * dpi).round() as u32,
        )
    }
}

pub const COMBINED_FILE: &str = "combined_plots.png";
pub const AVERAGE_BRAND_FILE: &str = "average_price_brand.png";
pub const SEGMENTS_FILE: &str = "price_segments.png";

/// Named chart set to render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartProfile {
    /// Every chart, English labels.
    #[default]
    Full,
    /// Smaller chart set with Spanish labels.
    Reduced,
}

impl ChartProfile {
    pub fn figures(self) -> Vec<FigureSpec> {
        match self {
            ChartProfile::Full => full_profile(),
            ChartProfile::Reduced => reduced_profile(),
        }
    }
}

fn price_box(by: Column) -> PanelKind {
    PanelKind::PriceBox { by, hue: None }
}

fn full_profile() -> Vec<FigureSpec> {
    let price = "Price ($)";
    vec![
        FigureSpec {
            file_name: COMBINED_FILE.to_string(),
            size_in: (20.0, 8.0),
            grid: (2, 3),
            panels: vec![
                PanelSpec::new(PanelKind::PriceHistogram, (0, 0), "Price distribution of laptops")
                    .labels(price, "Count"),
                PanelSpec::new(price_box(Column::Brand), (0, 1), "Price depending on the Brand")
                    .labels("Brand", price)
                    .palette(PaletteName::Spectral)
                    .rotated(),
                PanelSpec::new(price_box(Column::Processor), (0, 2), "Price depending on the CPU")
                    .labels("CPU", price)
                    .palette(PaletteName::Cividis)
                    .rotated(),
                PanelSpec::new(price_box(Column::Ram), (1, 0), "Price depending on the amount of RAM")
                    .labels("RAM (GB)", price)
                    .palette(PaletteName::Coolwarm),
                PanelSpec::new(
                    PanelKind::PriceBox {
                        by: Column::StorageSize,
                        hue: Some(Column::StorageType),
                    },
                    (1, 1),
                    "Price depending on the storage capacity",
                )
                .labels("Storage Size (GB)", price),
                PanelSpec::new(price_box(Column::Gpu), (1, 2), "Price depending on the GPU")
                    .labels("GPU", price)
                    .palette(PaletteName::Magma)
                    .rotated(),
            ],
        },
        FigureSpec {
            file_name: AVERAGE_BRAND_FILE.to_string(),
            size_in: (10.0, 5.0),
            grid: (1, 1),
            panels: vec![PanelSpec::new(
                PanelKind::AverageBar { by: Column::Brand },
                (0, 0),
                "Average price depending on brand",
            )
            .labels("Brand", "Average Price ($)")
            .palette(PaletteName::Coolwarm)
            .rotated()],
        },
        FigureSpec {
            file_name: SEGMENTS_FILE.to_string(),
            size_in: (8.0, 5.0),
            grid: (1, 1),
            panels: vec![PanelSpec::new(
                PanelKind::SegmentBar,
                (0, 0),
                "Distribution of laptops by price segments",
            )
            .labels("Price Category", "Number of laptops")],
        },
    ]
}

fn reduced_profile() -> Vec<FigureSpec> {
    let price = "Precio ($)";
    vec![
        FigureSpec {
            file_name: COMBINED_FILE.to_string(),
            size_in: (16.0, 10.0),
            grid: (2, 2),
            panels: vec![
                PanelSpec::new(
                    PanelKind::PriceHistogram,
                    (0, 0),
                    "Distribución de precios de los portátiles",
                )
                .labels(price, "Cantidad"),
                PanelSpec::new(price_box(Column::Ram), (0, 1), "Precio según la cantidad de RAM")
                    .labels("RAM (GB)", price)
                    .palette(PaletteName::Coolwarm),
                PanelSpec::new(price_box(Column::Brand), (1, 0), "Precio según la marca")
                    .labels("Marca", price)
                    .palette(PaletteName::Spectral)
                    .rotated(),
                PanelSpec::new(price_box(Column::Gpu), (1, 1), "Precio según la GPU")
                    .labels("GPU", price)
                    .palette(PaletteName::Magma)
                    .rotated(),
            ],
        },
        FigureSpec {
            file_name: AVERAGE_BRAND_FILE.to_string(),
            size_in: (10.0, 5.0),
            grid: (1, 1),
            panels: vec![PanelSpec::new(
                PanelKind::AverageBar { by: Column::Brand },
                (0, 0),
                "Precio medio según la marca",
            )
            .labels("Marca", "Precio medio ($)")
            .palette(PaletteName::Coolwarm)
            .rotated()],
        },
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn profiles_place_panels_inside_their_grid() {
        for profile in [ChartProfile::Full, ChartProfile::Reduced] {
            for fig in profile.figures() {
                let (rows, cols) = fig.grid;
                let cells: BTreeSet<(usize, usize)> = fig.panels.iter().map(|p| p.cell).collect();

                assert_eq!(cells.len(), fig.panels.len(), "{}: duplicate cell", fig.file_name);
                assert!(
                    cells.iter().all(|&(r, c)| r < rows && c < cols),
                    "{}: panel outside grid",
                    fig.file_name
                );
            }
        }
    }

    #[test]
    fn full_profile_writes_three_images() {
        let names: Vec<String> = ChartProfile::Full
            .figures()
            .into_iter()
            .map(|f| f.file_name)
            .collect();
        assert_eq!(names, vec![COMBINED_FILE, AVERAGE_BRAND_FILE, SEGMENTS_FILE]);
    }

    #[test]
    fn reduced_profile_skips_segments() {
        let figures = ChartProfile::Reduced.figures();
        assert_eq!(figures.len(), 2);
        assert!(figures
            .iter()
            .flat_map(|f| &f.panels)
            .all(|p| p.kind != PanelKind::SegmentBar));
    }

    #[test]
    fn storage_panel_is_split_by_type() {
        let combined = &ChartProfile::Full.figures()[0];
        assert!(combined.panels.iter().any(|p| p.kind
            == PanelKind::PriceBox {
                by: Column::StorageSize,
                hue: Some(Column::StorageType),
            }));
    }

    #[test]
    fn pixel_size_scales_with_dpi() {
        let fig = &ChartProfile::Full.figures()[0];
        assert_eq!(fig.pixel_size(100), (2000, 800));
        assert_eq!(fig.pixel_size(300), (6000, 2400));
    }
}
