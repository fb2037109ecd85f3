//! Generate command implementation.

use super::{print_skipped, SitePaths};
use sitemix_sync_engine::{GenerateConfig, GenerateReport, Message, MessageLog};
use tracing::info;

/// Creates listed content missing from the live site.
///
/// Returns the run report and the user-visible messages it produced.
pub fn execute(
    paths: &SitePaths,
    max_attempts: u32,
) -> Result<(GenerateReport, Vec<Message>), Box<dyn std::error::Error>> {
    info!("Generating content from {:?}", paths.sync);
    let settings = paths.settings()?;
    let engine = paths.engine(GenerateConfig::default().with_max_attempts(max_attempts))?;
    let staged = paths.sync_storage()?;
    let log = MessageLog::new();

    let report = engine.generate_missing_content(&settings, &staged, &log)?;
    Ok((report, log.take()))
}

/// Runs the generate command.
pub fn run(paths: &SitePaths, max_attempts: u32) -> Result<(), Box<dyn std::error::Error>> {
    let (report, messages) = execute(paths, max_attempts)?;

    for message in &messages {
        println!("[{}] {}", message.level, message.text);
    }
    println!();
    println!(
        "Created {}, already present {}, no snapshot {}, abandoned {} ({} attempt(s))",
        report.created.len(),
        report.already_present.len(),
        report.missing_snapshot.len(),
        report.abandoned.len(),
        report.attempts
    );
    print_skipped(&report.skipped);

    if report.is_complete() {
        Ok(())
    } else {
        Err("Some content could not be generated".into())
    }
}
