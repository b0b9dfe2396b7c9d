//! JSON snapshots of a pass.
//!
//! # Output Structure
//!
//! Files are organized by date, one file per topic:
//! ```text
//! json_output_dir/
//! └── 2026-10-19/
//!     ├── technology.json
//!     ├── artificial-intelligence.json
//!     └── research-papers.json
//! ```
//!
//! A later pass for the same topic on the same day overwrites the file.

use crate::error::Result;
use crate::models::PassReport;
use crate::utils::{ensure_writable_dir, slugify_title};
use chrono::Local;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, instrument};

/// Write a [`PassReport`] to `{json_output_dir}/{date}/{topic-slug}.json`.
///
/// Returns the path of the written file.
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir.display(), topic = %report.topic))]
pub async fn write_pass_snapshot(report: &PassReport, json_output_dir: &Path) -> Result<PathBuf> {
    let json = serde_json::to_string_pretty(report)?;

    let local_date = Local::now().date_naive().to_string();
    let full_json_dir = json_output_dir.join(local_date);

    info!(full_json_dir = %full_json_dir.display(), "Ensuring JSON directory exists");
    if let Err(e) = ensure_writable_dir(&full_json_dir).await {
        error!(full_json_dir = %full_json_dir.display(), error = %e, "Failed to prepare JSON dir");
        return Err(e);
    }

    let output_json_filename = full_json_dir.join(format!("{}.json", slugify_title(&report.topic)));
    fs::write(&output_json_filename, json).await?;
    info!(path = %output_json_filename.display(), cards = report.cards.len(), "Wrote JSON snapshot");

    Ok(output_json_filename)
}
