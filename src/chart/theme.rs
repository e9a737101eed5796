use plotters::prelude::*;

/// Visual settings shared by every chart.
///
/// `Default` gives a white-grid look: white canvas, light grey horizontal
/// rules, near-black text.
#[derive(Debug, Clone)]
pub struct ChartTheme {
    pub background: RGBColor,
    pub grid: RGBColor,
    pub axis: RGBColor,
    pub text: RGBColor,
    pub font_family: String,
    pub caption_size: u32,
    pub label_size: u32,
    pub annotation_size: u32,
    pub region_bar: RGBColor,
    pub office_type_bar: RGBColor,
    pub top_states_bar: RGBColor,
    /// Qualitative palette for stacked categories, cycled when exhausted.
    pub series_palette: Vec<RGBColor>,
    /// Sequential scale for the heat row, low to high.
    pub heat_scale: Vec<RGBColor>,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            background: WHITE,
            grid: RGBColor(204, 204, 204),
            axis: RGBColor(204, 204, 204),
            text: RGBColor(38, 38, 38),
            font_family: "sans-serif".to_string(),
            caption_size: 28,
            label_size: 15,
            annotation_size: 15,
            region_bar: RGBColor(135, 206, 235),
            office_type_bar: RGBColor(255, 165, 0),
            top_states_bar: RGBColor(0, 128, 0),
            // Set2
            series_palette: vec![
                RGBColor(102, 194, 165),
                RGBColor(252, 141, 98),
                RGBColor(141, 160, 203),
                RGBColor(231, 138, 195),
                RGBColor(166, 216, 84),
                RGBColor(255, 217, 47),
                RGBColor(229, 196, 148),
                RGBColor(179, 179, 179),
            ],
            // YlGnBu
            heat_scale: vec![
                RGBColor(255, 255, 217),
                RGBColor(237, 248, 177),
                RGBColor(199, 233, 180),
                RGBColor(127, 205, 187),
                RGBColor(65, 182, 196),
                RGBColor(29, 145, 192),
                RGBColor(34, 94, 168),
                RGBColor(37, 52, 148),
                RGBColor(8, 29, 88),
            ],
        }
    }
}

impl ChartTheme {
    pub fn caption_style(&self) -> TextStyle<'_> {
        (self.font_family.as_str(), self.caption_size)
            .into_font()
            .color(&self.text)
    }

    pub fn label_style(&self) -> TextStyle<'_> {
        (self.font_family.as_str(), self.label_size)
            .into_font()
            .color(&self.text)
    }

    pub fn annotation_style(&self, color: RGBColor) -> TextStyle<'_> {
        (self.font_family.as_str(), self.annotation_size)
            .into_font()
            .color(&color)
    }

    /// Colour of series `idx` out of `n`: picks are spread evenly over the
    /// whole palette, first entry to last.
    pub fn series_color(&self, idx: usize, n: usize) -> RGBColor {
        let len = self.series_palette.len();
        if len == 0 {
            return self.text;
        }
        let pick = if n > 1 { idx * len / (n - 1) } else { 0 };
        self.series_palette[pick.min(len - 1)]
    }

    /// Colour at position `t` (clamped to 0..=1) along the heat scale.
    pub fn heat_color(&self, t: f64) -> RGBColor {
        let stops = &self.heat_scale;
        match stops.len() {
            0 => return self.background,
            1 => return stops[0],
            _ => {}
        }
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let pos = t * (stops.len() - 1) as f64;
        let lo = pos.floor() as usize;
        let hi = (lo + 1).min(stops.len() - 1);
        let frac = pos - lo as f64;
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
        RGBColor(
            mix(stops[lo].0, stops[hi].0),
            mix(stops[lo].1, stops[hi].1),
            mix(stops[lo].2, stops[hi].2),
        )
    }

    /// Text colour that stays readable on `fill`.
    pub fn contrast_text(&self, fill: RGBColor) -> RGBColor {
        let luma = 0.2126 * fill.0 as f64 + 0.7152 * fill.1 as f64 + 0.0722 * fill.2 as f64;
        if luma > 140.0 {
            self.text
        } else {
            WHITE
        }
    }
}
