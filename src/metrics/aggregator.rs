use crate::gctrace::GcRecord;
use crate::metrics::counters::{IntervalCounters, Summary};
use crate::metrics::store::{MetricsStore, SeriesSnapshot};
use parking_lot::Mutex;
use std::time::Duration;

struct State {
    store: MetricsStore,
    counters: IntervalCounters,
}

/// Shared accumulator for the ingestion path, the summary timer and the
/// renderer.
///
/// One lock covers both the chart history and the interval counters, so a
/// drain can never split a record's contribution and a snapshot never sees a
/// half-shifted window. The lock is only held for in-memory updates.
pub struct Aggregator {
    width: usize,
    state: Mutex<State>,
}

impl Aggregator {
    pub fn new(width: usize) -> Self {
        Self {
            width,
            state: Mutex::new(State {
                store: MetricsStore::new(width),
                counters: IntervalCounters::default(),
            }),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn ingest(&self, record: &GcRecord) {
        let mut state = self.state.lock();
        state.store.record(record);
        state.counters.record(record);
    }

    pub fn drain_summary(&self, interval: Duration) -> Summary {
        self.state.lock().counters.drain(interval)
    }

    pub fn snapshot_series(&self) -> SeriesSnapshot {
        self.state.lock().store.snapshot()
    }
}
