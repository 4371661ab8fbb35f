/// Chart layer: what to draw and how to draw it.
///
/// ```text
///   ChartProfile ──▶ spec    FigureSpec { grid, Vec<PanelSpec> }
///                     │
///                     ▼
///   LaptopTable ───▶ render  stats → plotters → PNG
/// ```

pub mod render;
pub mod spec;
