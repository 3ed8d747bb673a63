use crate::gctrace::GcRecord;
use crate::metrics::aggregator::Aggregator;
use crate::metrics::sink::MetricsSink;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{interval, MissedTickBehavior};

/// Drives the aggregator: folds incoming records and periodically drains the
/// interval counters, publishing both to the sink.
pub struct MetricsCollector {
    aggregator: Arc<Aggregator>,
    sink: Arc<dyn MetricsSink>,
    interval: Duration,
    tick_count: AtomicU64,
}

impl MetricsCollector {
    pub fn new(aggregator: Arc<Aggregator>, sink: Arc<dyn MetricsSink>, interval: Duration) -> Self {
        Self {
            aggregator,
            sink,
            interval,
            tick_count: AtomicU64::new(0),
        }
    }

    /// Consumes records in arrival order until the channel closes.
    pub async fn run_ingest(&self, mut rx: mpsc::Receiver<GcRecord>) {
        while let Some(record) = rx.recv().await {
            self.ingest_once(&record);
        }

        tracing::info!("gctrace input closed");
        self.sink.on_input_closed();
    }

    pub fn ingest_once(&self, record: &GcRecord) {
        self.aggregator.ingest(record);
        self.sink
            .on_metrics_update(self.aggregator.snapshot_series());
    }

    /// Publishes a summary every interval. Runs until the task is aborted.
    pub async fn run_summary(&self) {
        let mut ticker = interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            self.summarize_once();
        }
    }

    pub fn summarize_once(&self) {
        let tick = self.tick_count.fetch_add(1, Ordering::Relaxed);
        let summary = self.aggregator.drain_summary(self.interval);

        tracing::debug!(
            tick,
            events = summary.events,
            stw_micros = summary.stw_micros,
            "interval summary: {}",
            summary
        );
        self.sink.on_summary_update(summary);
    }
}
