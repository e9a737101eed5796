pub mod aggregate;
pub mod chart;
pub mod clean;
pub mod config;
pub mod export;
pub mod load;
pub mod pipeline;
pub mod summary;
pub mod table;

#[cfg(test)]
pub(crate) mod fixtures;

pub use config::PipelineConfig;
pub use pipeline::{run, RunReport};
pub use table::{CleanedTable, RequiredColumn};
