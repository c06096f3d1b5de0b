//! `mediamix generate` command - Generate the dataset and write it as JSON.

use std::fs;
use std::path::Path;

use colored::Colorize;
use mediamix::config::MediaMixConfig;
use tracing::info;

use crate::error::CliResult;

use super::{load_dataset, to_json};

/// Execute the `generate` command.
pub fn execute(config: &MediaMixConfig, output: Option<&Path>, pretty: bool) -> CliResult<()> {
    let dataset = load_dataset(config)?;
    let json = to_json(dataset.as_ref(), pretty)?;

    match output {
        Some(path) => {
            fs::write(path, &json)?;
            info!(path = %path.display(), bytes = json.len(), "wrote dataset");
            eprintln!(
                "{} {} records written to {}",
                "✓".bright_green(),
                dataset.records.len().to_string().bright_white(),
                path.display().to_string().bright_yellow()
            );
        }
        None => println!("{}", json),
    }

    Ok(())
}
