use crate::gctrace::GcRecord;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Per-interval accumulators, zeroed on every [`IntervalCounters::drain`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntervalCounters {
    pub event_count: u64,
    pub stw_micros: u64,
}

/// Rates for one summary interval.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Raw counts drained for this interval.
    pub events: u64,
    pub stw_micros: u64,
    pub events_per_second: u64,
    /// Not clamped: timer jitter can push this slightly past 100.
    pub percent_stop_the_world: f64,
}

impl IntervalCounters {
    pub fn record(&mut self, record: &GcRecord) {
        self.event_count = self.event_count.saturating_add(1);
        self.stw_micros = self
            .stw_micros
            .saturating_add(record.wall_time.stop_the_world_us());
    }

    /// Computes the summary from the current values and resets them.
    pub fn drain(&mut self, interval: Duration) -> Summary {
        let counters = std::mem::take(self);
        counters.summarize(interval)
    }

    fn summarize(&self, interval: Duration) -> Summary {
        let mut summary = Summary {
            events: self.event_count,
            stw_micros: self.stw_micros,
            ..Summary::default()
        };

        let secs = interval.as_secs_f64();
        if secs <= 0.0 {
            return summary;
        }

        summary.events_per_second = (self.event_count as f64 / secs) as u64;
        summary.percent_stop_the_world = 100.0 * self.stw_micros as f64 / secs / 1e6;
        summary
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} events/s, {:.2}% STW",
            self.events_per_second, self.percent_stop_the_world
        )
    }
}
