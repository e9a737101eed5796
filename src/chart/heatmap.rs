use crate::chart::{
    bars::{segment_label, ChartText},
    theme::ChartTheme,
};
use anyhow::Result;
use plotters::{
    prelude::*,
    style::{
        text_anchor::{HPos, Pos, VPos},
        FontTransform,
    },
};
use std::path::Path;

/// Position of `count` within `lo..=hi`, 0 when the range is flat.
pub fn normalize(count: usize, lo: usize, hi: usize) -> f64 {
    if hi <= lo {
        0.0
    } else {
        (count.saturating_sub(lo)) as f64 / (hi - lo) as f64
    }
}

/// A single row of labelled cells, coloured along the theme's heat scale
/// and annotated with each count.
pub fn draw_heat_row(
    path: &Path,
    size: (u32, u32),
    text: ChartText,
    counts: &[(String, usize)],
    theme: &ChartTheme,
) -> Result<()> {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&theme.background)?;

    let names: Vec<String> = counts.iter().map(|(n, _)| n.clone()).collect();
    let n = counts.len().max(1) as i32;
    let lo = counts.iter().map(|(_, c)| *c).min().unwrap_or(0);
    let hi = counts.iter().map(|(_, c)| *c).max().unwrap_or(0);

    let mut chart = ChartBuilder::on(&root)
        .caption(text.caption, theme.caption_style())
        .margin(20)
        .x_label_area_size(150)
        .y_label_area_size(20)
        .build_cartesian_2d((0..n).into_segmented(), 0f64..1f64)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .disable_y_axis()
        .axis_style(&theme.background)
        .x_labels(counts.len())
        .x_label_formatter(&|v| segment_label(v, &names))
        .x_label_style(theme.label_style().transform(FontTransform::Rotate90))
        .x_desc(text.x_desc)
        .y_desc(text.y_desc)
        .draw()?;

    let fills: Vec<RGBColor> = counts
        .iter()
        .map(|(_, c)| theme.heat_color(normalize(*c, lo, hi)))
        .collect();

    chart.draw_series(fills.iter().enumerate().map(|(i, fill)| {
        Rectangle::new(
            [
                (SegmentValue::Exact(i as i32), 0.0),
                (SegmentValue::Exact(i as i32 + 1), 1.0),
            ],
            fill.filled(),
        )
    }))?;

    chart.draw_series(counts.iter().zip(&fills).enumerate().map(|(i, ((_, c), fill))| {
        let style = theme
            .annotation_style(theme.contrast_text(*fill))
            .pos(Pos::new(HPos::Center, VPos::Center));
        Text::new(c.to_string(), (SegmentValue::CenterOf(i as i32), 0.5), style)
    }))?;

    root.present()?;
    Ok(())
}
