use crate::{aggregate::CrossTab, chart::theme::ChartTheme};
use anyhow::Result;
use plotters::{
    prelude::*,
    style::{
        text_anchor::{HPos, Pos, VPos},
        FontTransform,
    },
};
use std::path::Path;

/// Caption and axis descriptions of one chart.
#[derive(Debug, Clone, Copy)]
pub struct ChartText {
    pub caption: &'static str,
    pub x_desc: &'static str,
    pub y_desc: &'static str,
}

/// Count labels drawn above annotated bars.
pub fn bar_labels(counts: &[(String, usize)]) -> Vec<String> {
    counts.iter().map(|(_, c)| c.to_string()).collect()
}

/// Upper bound of the value axis: `max` grown by `headroom_pct` percent,
/// rounded up.
pub fn axis_max(max: usize, headroom_pct: usize) -> u32 {
    let padded = max.saturating_mul(100 + headroom_pct).div_ceil(100);
    u32::try_from(padded).unwrap_or(u32::MAX).max(1)
}

pub(crate) fn segment_label(v: &SegmentValue<i32>, names: &[String]) -> String {
    match v {
        SegmentValue::CenterOf(i) => usize::try_from(*i)
            .ok()
            .and_then(|i| names.get(i))
            .cloned()
            .unwrap_or_default(),
        _ => String::new(),
    }
}

fn as_value(count: usize) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}

/// One horizontal bar per entry, first entry at the bottom.
pub fn draw_horizontal_bars(
    path: &Path,
    size: (u32, u32),
    text: ChartText,
    counts: &[(String, usize)],
    color: RGBColor,
    theme: &ChartTheme,
) -> Result<()> {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&theme.background)?;

    let names: Vec<String> = counts.iter().map(|(n, _)| n.clone()).collect();
    let n = counts.len().max(1) as i32;
    let x_max = axis_max(counts.iter().map(|(_, c)| *c).max().unwrap_or(0), 5);

    let mut chart = ChartBuilder::on(&root)
        .caption(text.caption, theme.caption_style())
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(180)
        .build_cartesian_2d(0u32..x_max, (0..n).into_segmented())?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .bold_line_style(&theme.grid)
        .light_line_style(&theme.background)
        .axis_style(&theme.axis)
        .y_labels(counts.len())
        .y_label_formatter(&|v| segment_label(v, &names))
        .label_style(theme.label_style())
        .axis_desc_style(theme.label_style())
        .x_desc(text.x_desc)
        .y_desc(text.y_desc)
        .draw()?;

    chart.draw_series(counts.iter().enumerate().map(|(i, (_, c))| {
        let i = i as i32;
        let mut bar = Rectangle::new(
            [
                (0, SegmentValue::Exact(i)),
                (as_value(*c), SegmentValue::Exact(i + 1)),
            ],
            color.filled(),
        );
        bar.set_margin(4, 4, 0, 0);
        bar
    }))?;

    root.present()?;
    Ok(())
}

/// One vertical bar per entry, left to right, optionally labelled with
/// its count.
pub fn draw_vertical_bars(
    path: &Path,
    size: (u32, u32),
    text: ChartText,
    counts: &[(String, usize)],
    color: RGBColor,
    annotate: bool,
    theme: &ChartTheme,
) -> Result<()> {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&theme.background)?;

    let names: Vec<String> = counts.iter().map(|(n, _)| n.clone()).collect();
    let n = counts.len().max(1) as i32;
    let headroom = if annotate { 12 } else { 5 };
    let y_max = axis_max(counts.iter().map(|(_, c)| *c).max().unwrap_or(0), headroom);

    let mut chart = ChartBuilder::on(&root)
        .caption(text.caption, theme.caption_style())
        .margin(20)
        .x_label_area_size(140)
        .y_label_area_size(70)
        .build_cartesian_2d((0..n).into_segmented(), 0u32..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .bold_line_style(&theme.grid)
        .light_line_style(&theme.background)
        .axis_style(&theme.axis)
        .x_labels(counts.len())
        .x_label_formatter(&|v| segment_label(v, &names))
        .x_label_style(theme.label_style().transform(FontTransform::Rotate90))
        .y_label_style(theme.label_style())
        .axis_desc_style(theme.label_style())
        .x_desc(text.x_desc)
        .y_desc(text.y_desc)
        .draw()?;

    chart.draw_series(counts.iter().enumerate().map(|(i, (_, c))| {
        let i = i as i32;
        let mut bar = Rectangle::new(
            [
                (SegmentValue::Exact(i), 0),
                (SegmentValue::Exact(i + 1), as_value(*c)),
            ],
            color.filled(),
        );
        bar.set_margin(0, 0, 6, 6);
        bar
    }))?;

    if annotate {
        let style = theme
            .annotation_style(theme.text)
            .pos(Pos::new(HPos::Center, VPos::Bottom));
        chart.draw_series(counts.iter().zip(bar_labels(counts)).enumerate().map(
            |(i, ((_, c), label))| {
                Text::new(
                    label,
                    (SegmentValue::CenterOf(i as i32), as_value(*c)),
                    style.clone(),
                )
            },
        ))?;
    }

    root.present()?;
    Ok(())
}

/// One stacked bar per crosstab row, one coloured segment per column key,
/// with a legend naming the column keys.
pub fn draw_stacked_bars(
    path: &Path,
    size: (u32, u32),
    text: ChartText,
    tab: &CrossTab,
    theme: &ChartTheme,
) -> Result<()> {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&theme.background)?;

    let n = tab.rows.len().max(1) as i32;
    let y_max = axis_max(tab.row_totals().into_iter().max().unwrap_or(0), 5);

    let mut chart = ChartBuilder::on(&root)
        .caption(text.caption, theme.caption_style())
        .margin(20)
        .x_label_area_size(200)
        .y_label_area_size(70)
        .build_cartesian_2d((0..n).into_segmented(), 0u32..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .bold_line_style(&theme.grid)
        .light_line_style(&theme.background)
        .axis_style(&theme.axis)
        .x_labels(tab.rows.len())
        .x_label_formatter(&|v| segment_label(v, &tab.rows))
        .x_label_style(theme.label_style().transform(FontTransform::Rotate90))
        .y_label_style(theme.label_style())
        .axis_desc_style(theme.label_style())
        .x_desc(text.x_desc)
        .y_desc(text.y_desc)
        .draw()?;

    let mut base = vec![0u32; tab.rows.len()];
    for (j, category) in tab.columns.iter().enumerate() {
        let color = theme.series_color(j, tab.columns.len());
        let segments: Vec<_> = tab
            .counts
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let lo = base[i];
                let hi = lo.saturating_add(as_value(row[j]));
                base[i] = hi;
                let mut seg = Rectangle::new(
                    [
                        (SegmentValue::Exact(i as i32), lo),
                        (SegmentValue::Exact(i as i32 + 1), hi),
                    ],
                    color.filled(),
                );
                seg.set_margin(0, 0, 4, 4);
                seg
            })
            .collect();

        chart
            .draw_series(segments)?
            .label(category.as_str())
            .legend(move |(x, y)| Rectangle::new([(x, y - 6), (x + 14, y + 6)], color.filled()));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&theme.background.mix(0.85))
        .border_style(&theme.axis)
        .label_font(theme.label_style())
        .draw()?;

    root.present()?;
    Ok(())
}
