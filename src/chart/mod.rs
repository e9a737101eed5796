// src/chart/mod.rs
pub mod bars;
pub mod heatmap;
pub mod theme;

use crate::{
    aggregate::{self, CrossTab},
    table::{CleanedTable, RequiredColumn},
};
use anyhow::{Context, Result};
use bars::ChartText;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::info;

pub use theme::ChartTheme;

/// How many entries the top-N charts show.
pub const TOP_N: usize = 10;

/// The five charts, in rendering order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChartKind {
    RegionWise,
    OfficeTypes,
    DeliveryByState,
    TopStates,
    TopDistricts,
}

impl ChartKind {
    pub const ALL: [ChartKind; 5] = [
        ChartKind::RegionWise,
        ChartKind::OfficeTypes,
        ChartKind::DeliveryByState,
        ChartKind::TopStates,
        ChartKind::TopDistricts,
    ];

    pub fn stem(&self) -> &'static str {
        match self {
            ChartKind::RegionWise => "region_wise_postoffices",
            ChartKind::OfficeTypes => "postoffice_types",
            ChartKind::DeliveryByState => "delivery_vs_non_delivery",
            ChartKind::TopStates => "top10_states_postoffices",
            ChartKind::TopDistricts => "top10_districts_heatmap",
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.png", self.stem())
    }

    /// Canvas size in pixels.
    pub fn canvas(&self) -> (u32, u32) {
        match self {
            ChartKind::RegionWise => (1200, 800),
            ChartKind::OfficeTypes => (1000, 600),
            ChartKind::DeliveryByState => (1600, 1000),
            ChartKind::TopStates => (1200, 600),
            ChartKind::TopDistricts => (1200, 400),
        }
    }

    fn text(&self) -> ChartText {
        match self {
            ChartKind::RegionWise => ChartText {
                caption: "Number of Post Offices by Region",
                x_desc: "Number of Post Offices",
                y_desc: "Region",
            },
            ChartKind::OfficeTypes => ChartText {
                caption: "Distribution of Post Office Types",
                x_desc: "Office Type",
                y_desc: "Count",
            },
            ChartKind::DeliveryByState => ChartText {
                caption: "Delivery vs Non-Delivery Post Offices by State",
                x_desc: "State",
                y_desc: "Number of Post Offices",
            },
            ChartKind::TopStates => ChartText {
                caption: "Top 10 States with Most Post Offices",
                x_desc: "State",
                y_desc: "Number of Post Offices",
            },
            ChartKind::TopDistricts => ChartText {
                caption: "Top 10 Districts with Most Post Offices",
                x_desc: "District",
                y_desc: "",
            },
        }
    }
}

pub fn region_counts(table: &CleanedTable) -> Vec<(String, usize)> {
    aggregate::value_counts(table.values(RequiredColumn::RegionName))
}

pub fn office_type_counts(table: &CleanedTable) -> Vec<(String, usize)> {
    aggregate::value_counts(table.values(RequiredColumn::OfficeType))
}

pub fn delivery_by_state(table: &CleanedTable) -> CrossTab {
    aggregate::crosstab(
        table.values(RequiredColumn::StateName),
        table.values(RequiredColumn::Delivery),
    )
}

pub fn top_states(table: &CleanedTable) -> Vec<(String, usize)> {
    let counts = aggregate::value_counts(table.values(RequiredColumn::StateName));
    aggregate::top_n(&counts, TOP_N)
}

pub fn top_districts(table: &CleanedTable) -> Vec<(String, usize)> {
    let counts = aggregate::value_counts(table.values(RequiredColumn::District));
    aggregate::top_n(&counts, TOP_N)
}

/// Render one chart to `path`, replacing any existing file.
#[tracing::instrument(level = "info", skip(table, theme, path), fields(chart = kind.stem()))]
pub fn render(kind: ChartKind, table: &CleanedTable, theme: &ChartTheme, path: &Path) -> Result<()> {
    let size = kind.canvas();
    let text = kind.text();
    let drawn = match kind {
        ChartKind::RegionWise => {
            bars::draw_horizontal_bars(path, size, text, &region_counts(table), theme.region_bar, theme)
        }
        ChartKind::OfficeTypes => bars::draw_vertical_bars(
            path,
            size,
            text,
            &office_type_counts(table),
            theme.office_type_bar,
            false,
            theme,
        ),
        ChartKind::DeliveryByState => {
            bars::draw_stacked_bars(path, size, text, &delivery_by_state(table), theme)
        }
        ChartKind::TopStates => bars::draw_vertical_bars(
            path,
            size,
            text,
            &top_states(table),
            theme.top_states_bar,
            true,
            theme,
        ),
        ChartKind::TopDistricts => {
            heatmap::draw_heat_row(path, size, text, &top_districts(table), theme)
        }
    };
    drawn.with_context(|| format!("rendering {}", path.display()))
}

/// Render all five charts into `out_dir`, returning the written paths in
/// chart order.
pub fn render_all(table: &CleanedTable, theme: &ChartTheme, out_dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("creating output directory {}", out_dir.display()))?;

    let mut written = Vec::with_capacity(ChartKind::ALL.len());
    for kind in ChartKind::ALL {
        let path = out_dir.join(kind.file_name());
        render(kind, table, theme, &path)?;
        info!(chart = kind.stem(), path = %path.display(), "saved chart");
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        clean::try_load_and_clean,
        fixtures::{init_test_logging, write_ranked_states},
    };
    use tempfile::tempdir;

    #[test]
    fn test_views_on_ranked_states() -> Result<()> {
        init_test_logging();
        let dir = tempdir()?;
        let input = dir.path().join("ranked.xlsx");
        write_ranked_states(&input, 15)?;
        let table = try_load_and_clean(&input)?;

        let top = top_states(&table);
        let expected: Vec<(String, usize)> =
            (5..15).rev().map(|i| (format!("State{:02}", i), i + 1)).collect();
        assert_eq!(top, expected);
        assert_eq!(
            bars::bar_labels(&top),
            (6..=15).rev().map(|n| n.to_string()).collect::<Vec<_>>()
        );

        let districts = top_districts(&table);
        assert_eq!(districts.len(), TOP_N);
        assert!(districts.windows(2).all(|w| w[0].1 >= w[1].1));

        let tab = delivery_by_state(&table);
        assert_eq!(tab.rows.len(), 15);
        assert_eq!(tab.columns, vec!["Delivery", "Non-Delivery"]);
        assert_eq!(tab.get("State00", "Delivery"), 0);
        assert_eq!(tab.get("State00", "Non-Delivery"), 1);
        assert_eq!(tab.row_totals().iter().sum::<usize>(), table.num_rows());

        let regions = region_counts(&table);
        assert_eq!(regions.iter().map(|(_, c)| c).sum::<usize>(), table.num_rows());
        Ok(())
    }

    #[test]
    fn test_render_all_writes_five_pngs() -> Result<()> {
        let dir = tempdir()?;
        let input = dir.path().join("ranked.xlsx");
        write_ranked_states(&input, 12)?;
        let table = try_load_and_clean(&input)?;

        let out = dir.path().join("charts");
        let written = render_all(&table, &ChartTheme::default(), &out)?;

        let names: Vec<String> = written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec![
                "region_wise_postoffices.png",
                "postoffice_types.png",
                "delivery_vs_non_delivery.png",
                "top10_states_postoffices.png",
                "top10_districts_heatmap.png",
            ]
        );
        for path in &written {
            let bytes = std::fs::read(path)?;
            assert!(bytes.starts_with(b"\x89PNG"), "{} is not a PNG", path.display());
        }

        // a second render overwrites in place
        let again = render_all(&table, &ChartTheme::default(), &out)?;
        assert_eq!(again, written);
        assert_eq!(std::fs::read_dir(&out)?.count(), 5);
        Ok(())
    }
}
