use crate::gctrace::GcRecord;
use crate::metrics::ring_buffer::RingBuffer;
use serde::{Deserialize, Serialize};

/// Chart state: heap history plus the phase timings of the latest cycle.
#[derive(Debug, Clone)]
pub struct MetricsStore {
    pub live_heap: RingBuffer<f64>,
    pub goal_heap: RingBuffer<f64>,
    pub wall_phases: [u64; 3],
    pub cpu_phases: [u64; 3],
}

/// Copy of a [`MetricsStore`] handed to the renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesSnapshot {
    pub live_heap: Vec<f64>,
    pub goal_heap: Vec<f64>,
    pub wall_phases: [u64; 3],
    pub cpu_phases: [u64; 3],
}

impl MetricsStore {
    pub fn new(history_size: usize) -> Self {
        Self {
            live_heap: RingBuffer::filled(history_size, 0.0),
            goal_heap: RingBuffer::filled(history_size, 0.0),
            wall_phases: [0; 3],
            cpu_phases: [0; 3],
        }
    }

    pub fn record(&mut self, record: &GcRecord) {
        self.live_heap.push(record.heap.live_mb);
        self.goal_heap.push(record.heap.goal_mb);
        self.wall_phases = record.wall_time.as_array();
        self.cpu_phases = record.cpu_time.as_array();
    }

    pub fn snapshot(&self) -> SeriesSnapshot {
        SeriesSnapshot {
            live_heap: self.live_heap.to_vec(),
            goal_heap: self.goal_heap.to_vec(),
            wall_phases: self.wall_phases,
            cpu_phases: self.cpu_phases,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gctrace::{HeapSize, PhaseTimings};
    use pretty_assertions::assert_eq;

    fn record(live_mb: f64, goal_mb: f64, wall: [u64; 3], cpu: [u64; 3]) -> GcRecord {
        let timings = |t: [u64; 3]| PhaseTimings {
            sweep_termination_us: t[0],
            mark_and_sweep_us: t[1],
            mark_termination_us: t[2],
        };
        GcRecord {
            heap: HeapSize { live_mb, goal_mb },
            wall_time: timings(wall),
            cpu_time: timings(cpu),
        }
    }

    #[test]
    fn test_new_store_is_zero_filled() {
        let store = MetricsStore::new(4);
        let snapshot = store.snapshot();

        assert_eq!(snapshot.live_heap, vec![0.0; 4]);
        assert_eq!(snapshot.goal_heap, vec![0.0; 4]);
        assert_eq!(snapshot.wall_phases, [0, 0, 0]);
        assert_eq!(snapshot.cpu_phases, [0, 0, 0]);
    }

    #[test]
    fn test_record_shifts_history_and_replaces_phases() {
        let mut store = MetricsStore::new(3);

        store.record(&record(2.0, 12.0, [16, 790, 230], [130, 4450, 1800]));
        store.record(&record(9.0, 18.0, [11, 1200, 42], [89, 6450, 330]));

        let snapshot = store.snapshot();
        assert_eq!(snapshot.live_heap, vec![0.0, 2.0, 9.0]);
        assert_eq!(snapshot.goal_heap, vec![0.0, 12.0, 18.0]);
        assert_eq!(snapshot.wall_phases, [11, 1200, 42]);
        assert_eq!(snapshot.cpu_phases, [89, 6450, 330]);
    }

    #[test]
    fn test_history_keeps_latest_records_in_arrival_order() {
        let mut store = MetricsStore::new(3);
        for i in 1..=5 {
            store.record(&record(i as f64, 10.0 * i as f64, [0; 3], [0; 3]));
        }

        let snapshot = store.snapshot();
        assert_eq!(snapshot.live_heap, vec![3.0, 4.0, 5.0]);
        assert_eq!(snapshot.goal_heap, vec![30.0, 40.0, 50.0]);
    }
}
