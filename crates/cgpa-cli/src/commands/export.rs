//! The `cgpa export` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::ValueEnum;

use cgpa_core::report::Transcript;

use super::{close_session, open_session, Globals};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Json,
    #[value(alias = "md")]
    Markdown,
}

pub async fn execute(globals: &Globals, output: PathBuf, format: ExportFormat) -> Result<()> {
    let config = globals.load_config()?;
    let session = open_session(&config).await?;
    let transcript = Transcript::from_state(session.state());
    close_session(session).await;

    match format {
        ExportFormat::Json => transcript.save_json(&output)?,
        ExportFormat::Markdown => {
            if let Some(parent) = output.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&output, transcript.to_markdown())
                .with_context(|| format!("failed to write {}", output.display()))?;
        }
    }

    println!(
        "Wrote transcript of {} course(s) to {}",
        transcript.courses.len(),
        output.display()
    );
    Ok(())
}
