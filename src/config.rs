use crate::chart::ChartTheme;
use std::path::PathBuf;

/// Spreadsheet read when no other input is configured.
pub const DEFAULT_INPUT: &str = "datasetGPTkeLiye.xlsx";

/// Everything one pipeline run needs to know up front.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Spreadsheet to load.
    pub input_path: PathBuf,
    /// Directory that receives the charts and the cleaned workbook.
    pub output_dir: PathBuf,
    pub theme: ChartTheme,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT),
            output_dir: PathBuf::from("."),
            theme: ChartTheme::default(),
        }
    }
}

impl PipelineConfig {
    pub fn new(input_path: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }

    pub fn with_theme(mut self, theme: ChartTheme) -> Self {
        self.theme = theme;
        self
    }
}
