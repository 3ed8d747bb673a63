use crate::metrics::counters::Summary;
use crate::metrics::store::SeriesSnapshot;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::watch;

/// Receiver of aggregated metrics, usually the renderer.
pub trait MetricsSink: Send + Sync {
    /// Called after every accepted record.
    fn on_metrics_update(&self, snapshot: SeriesSnapshot);

    /// Called on every summary tick.
    fn on_summary_update(&self, summary: Summary);

    fn on_input_closed(&self) {}
}

/// Latest visual state for the dashboard. Updates replace the stored value;
/// the render loop reads whatever is current when it draws.
pub struct DashboardFeed {
    series: watch::Sender<SeriesSnapshot>,
    summary: watch::Sender<Summary>,
    input_closed: AtomicBool,
}

impl DashboardFeed {
    pub fn new(width: usize) -> Self {
        let initial = SeriesSnapshot {
            live_heap: vec![0.0; width],
            goal_heap: vec![0.0; width],
            ..SeriesSnapshot::default()
        };
        let (series, _) = watch::channel(initial);
        let (summary, _) = watch::channel(Summary::default());

        Self {
            series,
            summary,
            input_closed: AtomicBool::new(false),
        }
    }

    pub fn series(&self) -> SeriesSnapshot {
        self.series.borrow().clone()
    }

    pub fn summary(&self) -> Summary {
        *self.summary.borrow()
    }

    pub fn subscribe_summary(&self) -> watch::Receiver<Summary> {
        self.summary.subscribe()
    }

    pub fn input_closed(&self) -> bool {
        self.input_closed.load(Ordering::Acquire)
    }
}

impl MetricsSink for DashboardFeed {
    fn on_metrics_update(&self, snapshot: SeriesSnapshot) {
        self.series.send_replace(snapshot);
    }

    fn on_summary_update(&self, summary: Summary) {
        self.summary.send_replace(summary);
    }

    fn on_input_closed(&self) {
        self.input_closed.store(true, Ordering::Release);
    }
}
