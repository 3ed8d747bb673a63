use crate::export::{export_snapshot_json, ExportDocument};
use crate::gctrace::ReaderStats;
use crate::metrics::sink::DashboardFeed;
use crate::theme::Theme;
use crate::tui::dashboard::DashboardView;
use chrono::Local;
use std::sync::Arc;
use std::time::Duration;

pub enum StatusMessage {
    Info(String),
    Error(String),
}

pub struct App {
    pub should_quit: bool,
    pub theme: Theme,
    pub feed: Arc<DashboardFeed>,
    pub stats: Arc<ReaderStats>,
    pub summary_interval: Duration,
    pub export_dir: Option<String>,
    pub status: Option<StatusMessage>,
}

impl App {
    pub fn new(
        feed: Arc<DashboardFeed>,
        stats: Arc<ReaderStats>,
        summary_interval: Duration,
        export_dir: Option<String>,
    ) -> Self {
        Self {
            should_quit: false,
            theme: Theme::new(),
            feed,
            stats,
            summary_interval,
            export_dir,
            status: None,
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Reads the stored visual state. Does not touch the aggregator.
    pub fn view(&self) -> DashboardView {
        DashboardView {
            series: self.feed.series(),
            summary: self.feed.summary(),
            summary_interval: self.summary_interval,
            accepted_lines: self.stats.accepted(),
            dropped_lines: self.stats.dropped(),
            input_closed: self.feed.input_closed(),
        }
    }

    pub fn export(&mut self) {
        let view = self.view();
        let document = ExportDocument {
            generated_at: Local::now(),
            accepted_lines: view.accepted_lines,
            dropped_lines: view.dropped_lines,
            summary: view.summary,
            series: view.series,
        };

        self.status = Some(
            match export_snapshot_json(&document, self.export_dir.as_deref()) {
                Ok(path) => StatusMessage::Info(format!("Exported to {}", path.display())),
                Err(e) => {
                    tracing::warn!(error = %e, "export failed");
                    StatusMessage::Error(format!("Export failed: {}", e))
                }
            },
        );
    }
}
