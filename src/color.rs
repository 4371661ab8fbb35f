use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};
use plotters::style::RGBColor;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<RGBColor> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            to_rgb(rgb)
        })
        .collect()
}

fn to_rgb(c: Srgb) -> RGBColor {
    let c: Srgb<u8> = c.into_format();
    RGBColor(c.red, c.green, c.blue)
}

// ---------------------------------------------------------------------------
// Named sequential / diverging palettes
// ---------------------------------------------------------------------------

/// Palettes available to chart panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteName {
    Coolwarm,
    Viridis,
    Magma,
    Spectral,
    Cividis,
    /// Evenly spaced hues, see [`generate_palette`].
    Hue,
}

impl PaletteName {
    /// Anchor colours the palette is interpolated between.
    fn anchors(self) -> &'static [(u8, u8, u8)] {
        match self {
            PaletteName::Coolwarm => &[(59, 76, 192), (221, 221, 221), (180, 4, 38)],
            PaletteName::Viridis => &[
                (68, 1, 84),
                (59, 82, 139),
                (33, 145, 140),
                (94, 201, 98),
                (253, 231, 37),
            ],
            PaletteName::Magma => &[
                (0, 0, 4),
                (81, 18, 124),
                (183, 55, 121),
                (252, 137, 97),
                (252, 253, 191),
            ],
            PaletteName::Spectral => &[
                (158, 1, 66),
                (244, 109, 67),
                (254, 224, 139),
                (230, 245, 152),
                (102, 194, 165),
                (94, 79, 162),
            ],
            PaletteName::Cividis => &[(0, 34, 78), (124, 123, 120), (254, 232, 56)],
            PaletteName::Hue => &[],
        }
    }

    /// Sample `n` colours spread evenly across the palette.
    ///
    /// Samples skip the extreme ends so the first and last colours stay
    /// readable on a white background.
    pub fn colors(self, n: usize) -> Vec<RGBColor> {
        let anchors = self.anchors();
        if anchors.is_empty() {
            return generate_palette(n);
        }
        let linear: Vec<LinSrgb> = anchors
            .iter()
            .map(|&(r, g, b)| Srgb::new(r, g, b).into_format::<f32>().into_linear())
            .collect();

        (0..n)
            .map(|i| {
                let t = (i as f32 + 0.5) / n as f32;
                to_rgb(Srgb::from_linear(sample(&linear, t)))
            })
            .collect()
    }
}

/// Piecewise-linear interpolation across `stops` at `t` in `0..=1`.
fn sample(stops: &[LinSrgb], t: f32) -> LinSrgb {
    let last = stops.len() - 1;
    if last == 0 {
        return stops[0];
    }
    let pos = t.clamp(0.0, 1.0) * last as f32;
    let i = (pos.floor() as usize).min(last - 1);
    stops[i].mix(stops[i + 1], pos - i as f32)
}
