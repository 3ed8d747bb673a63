use crate::error::Result;
use crate::metrics::counters::Summary;
use crate::metrics::store::SeriesSnapshot;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::PathBuf;

/// What gets written when the user exports the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct ExportDocument {
    pub generated_at: DateTime<Local>,
    pub accepted_lines: u64,
    pub dropped_lines: u64,
    pub summary: Summary,
    pub series: SeriesSnapshot,
}

fn export_dir(base_dir: Option<&str>) -> PathBuf {
    if let Some(custom_dir) = base_dir {
        PathBuf::from(shellexpand::tilde(custom_dir).to_string())
    } else {
        directories::ProjectDirs::from("dev", "gctrace", "gctrace-tui")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

pub fn export_snapshot_json(document: &ExportDocument, base_dir: Option<&str>) -> Result<PathBuf> {
    let dir = export_dir(base_dir);
    std::fs::create_dir_all(&dir)?;

    let timestamp = document.generated_at.format("%Y%m%d_%H%M%S%.3f");
    let filename = format!("gctrace_{}.json", timestamp);
    let filepath = dir.join(&filename);

    let json = serde_json::to_string_pretty(document)?;
    std::fs::write(&filepath, json)?;

    tracing::info!(path = %filepath.display(), "exported dashboard snapshot");
    Ok(filepath)
}
