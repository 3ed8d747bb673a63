use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// One decoded gctrace line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GcRecord {
    pub heap: HeapSize,
    pub wall_time: PhaseTimings,
    pub cpu_time: PhaseTimings,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HeapSize {
    pub live_mb: f64,
    pub goal_mb: f64,
}

/// Durations of the three GC phases, in microseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseTimings {
    pub sweep_termination_us: u64,
    pub mark_and_sweep_us: u64,
    pub mark_termination_us: u64,
}

impl PhaseTimings {
    /// Time the application was paused: both termination phases, but not the
    /// concurrent mark phase.
    pub fn stop_the_world_us(&self) -> u64 {
        self.sweep_termination_us
            .saturating_add(self.mark_termination_us)
    }

    pub fn as_array(&self) -> [u64; 3] {
        [
            self.sweep_termination_us,
            self.mark_and_sweep_us,
            self.mark_termination_us,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum Phase {
    #[strum(serialize = "STW Sweep Termination")]
    SweepTermination,
    #[strum(serialize = "Concurrent Mark & Sweep")]
    MarkAndSweep,
    #[strum(serialize = "STW Mark Termination")]
    MarkTermination,
}

impl Phase {
    pub fn short_label(&self) -> &'static str {
        match self {
            Phase::SweepTermination => "Sweep Term",
            Phase::MarkAndSweep => "Mark & Sweep",
            Phase::MarkTermination => "Mark Term",
        }
    }
}
