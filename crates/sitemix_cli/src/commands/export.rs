//! Export command implementation.

use super::{print_skipped, SitePaths};
use serde::Serialize;
use sitemix_sync_engine::{ExportReport, GenerateConfig};
use tracing::info;

/// Serializable export summary.
#[derive(Debug, Serialize)]
pub struct ExportSummary {
    /// Identifiers written to the sync directory.
    pub written: Vec<String>,
    /// Identifiers skipped, with reasons.
    pub skipped: Vec<(String, String)>,
}

impl From<&ExportReport> for ExportSummary {
    fn from(report: &ExportReport) -> Self {
        Self {
            written: report.written.iter().map(ToString::to_string).collect(),
            skipped: report
                .skipped
                .iter()
                .map(|s| (s.id.clone(), s.reason.to_string()))
                .collect(),
        }
    }
}

/// Exports listed content into the sync directory.
pub fn execute(paths: &SitePaths) -> Result<ExportReport, Box<dyn std::error::Error>> {
    info!("Exporting content to {:?}", paths.sync);
    let settings = paths.settings()?;
    let engine = paths.engine(GenerateConfig::default())?;
    let mut staged = paths.sync_storage()?;
    Ok(engine.export_transform(&settings, &mut staged)?)
}

/// Runs the export command.
pub fn run(paths: &SitePaths, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let report = execute(paths)?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&ExportSummary::from(&report))?);
        return Ok(());
    }

    println!("Exported {} content item(s)", report.written.len());
    for id in &report.written {
        println!("  {id}");
    }
    print_skipped(&report.skipped);
    Ok(())
}
