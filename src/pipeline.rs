// src/pipeline.rs
use crate::{
    chart, clean,
    config::PipelineConfig,
    export::{self, CLEANED_WORKBOOK},
    summary::{self, Summary},
};
use anyhow::Result;
use std::path::PathBuf;
use tracing::info;

/// What a completed run produced.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub summary: Summary,
    /// Chart files, in rendering order.
    pub charts: Vec<PathBuf>,
    pub workbook: PathBuf,
}

/// Load → clean → summarize → chart → export.
///
/// Returns `Ok(None)` when the input could not be loaded or validated; no
/// output file is written in that case. Any later failure is returned as
/// an error and may leave earlier charts behind.
pub fn run(config: &PipelineConfig) -> Result<Option<RunReport>> {
    // ─── 1) load + clean ─────────────────────────────────────────────
    println!("Loading and cleaning data...");
    let Some(table) = clean::load_and_clean(&config.input_path) else {
        println!("Failed to process data. Please check the input file and try again.");
        return Ok(None);
    };

    // ─── 2) summary ──────────────────────────────────────────────────
    let summary = summary::print_summary(&table);

    // ─── 3) charts ───────────────────────────────────────────────────
    println!("\nCreating visualizations...");
    let charts = chart::render_all(&table, &config.theme, &config.output_dir)?;

    // ─── 4) export ───────────────────────────────────────────────────
    let workbook = config.output_dir.join(CLEANED_WORKBOOK);
    export::write_cleaned_workbook(&table, &workbook)?;
    println!("\nCleaned dataset saved as '{}'", CLEANED_WORKBOOK);

    println!("\nAll visualizations saved successfully!");
    info!(rows = summary.total_entries, charts = charts.len(), "run complete");

    Ok(Some(RunReport {
        summary,
        charts,
        workbook,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        chart::ChartKind,
        fixtures::{init_test_logging, postal_row, write_ranked_states, write_sheet, POSTAL_HEADERS},
        load::read_workbook,
    };
    use anyhow::Result;
    use tempfile::tempdir;

    #[test]
    fn test_normalizes_dedups_and_round_trips() -> Result<()> {
        init_test_logging();
        let dir = tempdir()?;
        let input = dir.path().join("offices.xlsx");
        write_sheet(
            &input,
            &["StateName ", "District", "OfficeType", "RegionName", "Delivery"],
            &[
                postal_row("Goa", "North Goa", "BO", "Goa", "Delivery"),
                postal_row("GOA", "North Goa", "BO", "Goa", "Delivery"),
                postal_row("Delhi", "New Delhi", "HO", "Delhi", "Non-Delivery"),
                postal_row("Delhi", "New Delhi", "HO", "Delhi", "Non-Delivery"),
            ],
        )?;

        let out = dir.path().join("out");
        let report = run(&PipelineConfig::new(&input, &out))?.expect("pipeline completes");

        // casing differences are distinct values; only the exact repeat goes
        assert_eq!(report.summary.total_entries, 3);
        assert_eq!(report.summary.unique_states, 3);
        assert_eq!(report.charts.len(), 5);

        let exported = read_workbook(&report.workbook)?;
        assert_eq!(exported.headers, POSTAL_HEADERS.to_vec());
        assert_eq!(exported.rows.len(), report.summary.total_entries);
        Ok(())
    }

    #[test]
    fn test_missing_delivery_writes_nothing() -> Result<()> {
        let dir = tempdir()?;
        let input = dir.path().join("no_delivery.xlsx");
        write_sheet(
            &input,
            &POSTAL_HEADERS[..4],
            &[vec!["Goa".into(), "North Goa".into(), "BO".into(), "Goa".into()]],
        )?;

        let out = dir.path().join("out");
        assert!(run(&PipelineConfig::new(&input, &out))?.is_none());
        assert!(!out.exists());
        for kind in ChartKind::ALL {
            assert!(!dir.path().join(kind.file_name()).exists());
        }
        assert!(!dir.path().join(CLEANED_WORKBOOK).exists());
        Ok(())
    }

    #[test]
    fn test_runs_are_idempotent() -> Result<()> {
        let dir = tempdir()?;
        let input = dir.path().join("ranked.xlsx");
        write_ranked_states(&input, 15)?;
        let config = PipelineConfig::new(&input, dir.path().join("out"));

        let first = run(&config)?.expect("first run");
        let second = run(&config)?.expect("second run");
        assert_eq!(first.summary, second.summary);
        assert_eq!(first.summary.to_string(), second.summary.to_string());
        assert_eq!(first.charts, second.charts);

        let rows_first = read_workbook(&first.workbook)?.rows.len();
        let rows_second = read_workbook(&second.workbook)?.rows.len();
        assert_eq!(rows_first, rows_second);
        assert_eq!(rows_first, (1..=15).sum::<usize>());
        Ok(())
    }

    #[test]
    fn test_default_config_points_at_fixed_input() {
        let config = PipelineConfig::default();
        assert_eq!(config.input_path, PathBuf::from(crate::config::DEFAULT_INPUT));
        assert_eq!(config.output_dir, PathBuf::from("."));
    }
}
