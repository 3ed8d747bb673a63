//! Decoding of `GODEBUG=gctrace=1` lines.
//!
//! Supported shape (Go 1.6 through 1.17):
//!
//! ```text
//! gc # @#s #%: #+#+# ms clock, #+#/#/#+# ms cpu, #->#-># MB, # MB goal, # P
//! ```
//!
//! Lines from other releases have a different field count or a different
//! phase layout and are rejected as a whole.

use thiserror::Error;

use super::types::{GcRecord, HeapSize, PhaseTimings};

/// Number of space-separated fields in a supported trace line.
const FIELD_COUNT: usize = 17;

const WALL_CLOCK_FIELD: usize = 4;
const CPU_FIELD: usize = 7;
const LIVE_HEAP_FIELD: usize = 10;
const GOAL_HEAP_FIELD: usize = 12;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("bad input line: expected 17 fields, got {fields}")]
    MalformedLine { fields: usize },

    #[error("bad wall-clock timings")]
    BadWallClockTimings,

    #[error("bad CPU timings")]
    BadCpuTimings,

    #[error("bad mark and sweep CPU timings")]
    BadMarkAndSweepCpuTimings,

    #[error("bad live heap size")]
    BadLiveHeapSize,

    #[error("bad goal heap size")]
    BadGoalHeapSize,
}

/// Parse one gctrace line into a [`GcRecord`].
///
/// Either every sub-field decodes or the line is rejected with the first
/// failure, in field order.
pub fn parse_line(line: &str) -> Result<GcRecord, ParseError> {
    let fields: Vec<&str> = line.split(' ').collect();
    if fields.len() != FIELD_COUNT {
        return Err(ParseError::MalformedLine {
            fields: fields.len(),
        });
    }

    let wall_time = parse_clock(fields[WALL_CLOCK_FIELD])?;
    let cpu_time = parse_cpu(fields[CPU_FIELD])?;
    let live_mb = parse_live(fields[LIVE_HEAP_FIELD])?;
    let goal_mb = parse_goal(fields[GOAL_HEAP_FIELD])?;

    Ok(GcRecord {
        heap: HeapSize { live_mb, goal_mb },
        wall_time,
        cpu_time,
    })
}

/// `#+#+#`: STW sweep termination, concurrent mark and sweep, STW mark
/// termination, in milliseconds of wall-clock time.
fn parse_clock(s: &str) -> Result<PhaseTimings, ParseError> {
    let [sweep_termination, mark_and_sweep, mark_termination] =
        split_triplet(s, "+").ok_or(ParseError::BadWallClockTimings)?;

    let micros = |ms: &str| {
        parse_millis(ms)
            .and_then(millis_to_micros)
            .ok_or(ParseError::BadWallClockTimings)
    };
    Ok(PhaseTimings {
        sweep_termination_us: micros(sweep_termination)?,
        mark_and_sweep_us: micros(mark_and_sweep)?,
        mark_termination_us: micros(mark_termination)?,
    })
}

/// `#+#/#/#+#`: same phases as the wall clock, except the mark phase is
/// broken down into assist, background and idle CPU time. Only their sum
/// is kept.
fn parse_cpu(s: &str) -> Result<PhaseTimings, ParseError> {
    let [sweep_termination, mark_and_sweep, mark_termination] =
        split_triplet(s, "+").ok_or(ParseError::BadCpuTimings)?;

    let [assist, background, idle] =
        split_triplet(mark_and_sweep, "/").ok_or(ParseError::BadMarkAndSweepCpuTimings)?;

    let err = || ParseError::BadMarkAndSweepCpuTimings;
    let assist = parse_millis(assist).ok_or_else(err)?;
    let background = parse_millis(background).ok_or_else(err)?;
    let idle = parse_millis(idle).ok_or_else(err)?;
    let mark_and_sweep_us = millis_to_micros(assist + background + idle).ok_or_else(err)?;

    let micros = |ms: &str| {
        parse_millis(ms)
            .and_then(millis_to_micros)
            .ok_or(ParseError::BadCpuTimings)
    };
    Ok(PhaseTimings {
        sweep_termination_us: micros(sweep_termination)?,
        mark_and_sweep_us,
        mark_termination_us: micros(mark_termination)?,
    })
}

/// `#->#->#`: heap at GC start, heap at GC end, live heap. Only the last one
/// is of interest.
fn parse_live(s: &str) -> Result<f64, ParseError> {
    let [_, _, live] = split_triplet(s, "->").ok_or(ParseError::BadLiveHeapSize)?;
    parse_megabytes(live).ok_or(ParseError::BadLiveHeapSize)
}

fn parse_goal(s: &str) -> Result<f64, ParseError> {
    parse_megabytes(s).ok_or(ParseError::BadGoalHeapSize)
}

fn split_triplet<'a>(s: &'a str, separator: &str) -> Option<[&'a str; 3]> {
    let mut parts = s.split(separator);
    let triplet = [parts.next()?, parts.next()?, parts.next()?];
    match parts.next() {
        Some(_) => None,
        None => Some(triplet),
    }
}

fn parse_millis(s: &str) -> Option<f64> {
    s.parse::<f64>()
        .ok()
        .filter(|ms| ms.is_finite() && *ms >= 0.0)
}

fn parse_megabytes(s: &str) -> Option<f64> {
    s.parse::<u64>().ok().map(|mb| mb as f64)
}

/// Truncates toward zero. Trace values carry at most microsecond precision.
/// `None` when the result does not fit a `u64`.
fn millis_to_micros(ms: f64) -> Option<u64> {
    let micros = ms * 1000.0;
    // u64::MAX rounds up to 2^64 as an f64, so anything at or above it overflows.
    if micros.is_finite() && micros >= 0.0 && micros < u64::MAX as f64 {
        Some(micros as u64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn trace_line(clock: &str, cpu: &str, heap: &str, goal: &str) -> String {
        format!("gc 24 @0.252s 11%: {clock} ms clock, {cpu} ms cpu, {heap} MB, {goal} MB goal, 8 P")
    }

    #[test]
    fn test_parse_go16_line() {
        let line = "gc 24 @0.252s 11%: 0.016+0.79+0.23 ms clock, 0.13+0.95/1.3/2.2+1.8 ms cpu, 8->9->2 MB, 12 MB goal, 8 P";
        let record = parse_line(line).unwrap();

        assert_eq!(
            record.wall_time,
            PhaseTimings {
                sweep_termination_us: 16,
                mark_and_sweep_us: 790,
                mark_termination_us: 230,
            }
        );
        assert_eq!(
            record.cpu_time,
            PhaseTimings {
                sweep_termination_us: 130,
                mark_and_sweep_us: 4450,
                mark_termination_us: 1800,
            }
        );
        assert_eq!(record.heap.live_mb, 2.0);
        assert_eq!(record.heap.goal_mb, 12.0);
    }

    #[test]
    fn test_parse_record_snapshot() {
        let line = trace_line("0.011+1.2+0.042", "0.089+0.35/2.1/4.0+0.33", "16->17->9", "18");
        let record = parse_line(&line).unwrap();

        insta::assert_snapshot!(
            format!("{:?} {:?} {:?}", record.heap, record.wall_time.as_array(), record.cpu_time.as_array()),
            @"HeapSize { live_mb: 9.0, goal_mb: 18.0 } [11, 1200, 42] [89, 6450, 330]"
        );
    }

    #[test]
    fn test_go15_line_rejected_by_wall_clock() {
        let line = "gc 24 @0.255s 11%: 0.073+0.19+0.46+0.77+0.33 ms clock, 0.58+0.19+0+0.24/0.92/0.88+2.6 ms cpu, 4->4->1 MB, 4 MB goal, 8 P";
        assert_eq!(parse_line(line), Err(ParseError::BadWallClockTimings));
    }

    #[test]
    fn test_go14_line_is_malformed() {
        let line = "gc24(1): 0+0+800+0 us, 0 -> 1 MB, 10942 (60118-49176) objects, 281 goroutines, 216/0/0 sweeps, 0(0) handoff, 0(0) steal, 0/0/0 yields";
        assert!(matches!(
            parse_line(line),
            Err(ParseError::MalformedLine { .. })
        ));
    }

    #[test]
    fn test_newer_line_with_stacks_and_globals_is_malformed() {
        let line = "gc 1 @0.012s 2%: 0.026+0.39+0.10 ms clock, 0.21+0.088/0.14/0.28+0.83 ms cpu, 4->4->0 MB, 4 MB goal, 0 MB stacks, 0 MB globals, 8 P";
        assert_eq!(
            parse_line(line),
            Err(ParseError::MalformedLine { fields: 23 })
        );
    }

    #[test]
    fn test_field_count_checked_before_content() {
        assert_eq!(parse_line(""), Err(ParseError::MalformedLine { fields: 1 }));

        let valid = trace_line("0.016+0.79+0.23", "0.13+0.95/1.3/2.2+1.8", "8->9->2", "12");
        let extra = format!("{valid} extra");
        assert_eq!(
            parse_line(&extra),
            Err(ParseError::MalformedLine { fields: 18 })
        );

        let double_space = valid.replacen(' ', "  ", 1);
        assert_eq!(
            parse_line(&double_space),
            Err(ParseError::MalformedLine { fields: 18 })
        );

        let sixteen = "a b c d e f g h i j k l m n o p";
        assert_eq!(
            parse_line(sixteen),
            Err(ParseError::MalformedLine { fields: 16 })
        );
    }

    #[test]
    fn test_bad_wall_clock_values() {
        for clock in ["0.016+x+0.23", "0.016+0.79", "-0.016+0.79+0.23", "NaN+0.79+0.23", "+0.016+0.79+0.23"] {
            let line = trace_line(clock, "0.13+0.95/1.3/2.2+1.8", "8->9->2", "12");
            assert_eq!(
                parse_line(&line),
                Err(ParseError::BadWallClockTimings),
                "clock field {clock:?}"
            );
        }
    }

    #[test]
    fn test_bad_cpu_values() {
        let line = trace_line("0.016+0.79+0.23", "0.13+0.95/1.3+1.8", "8->9->2", "12");
        assert_eq!(parse_line(&line), Err(ParseError::BadMarkAndSweepCpuTimings));

        let line = trace_line("0.016+0.79+0.23", "0.13+0.95/x/2.2+1.8", "8->9->2", "12");
        assert_eq!(parse_line(&line), Err(ParseError::BadMarkAndSweepCpuTimings));

        let line = trace_line("0.016+0.79+0.23", "abc+0.95/1.3/2.2+1.8", "8->9->2", "12");
        assert_eq!(parse_line(&line), Err(ParseError::BadCpuTimings));

        let line = trace_line("0.016+0.79+0.23", "0.13+0.95/1.3/2.2", "8->9->2", "12");
        assert_eq!(parse_line(&line), Err(ParseError::BadCpuTimings));
    }

    #[test]
    fn test_bad_heap_sizes() {
        let cases = [
            ("8->9", "12", ParseError::BadLiveHeapSize),
            ("8->9->2->1", "12", ParseError::BadLiveHeapSize),
            ("8->9->2.5", "12", ParseError::BadLiveHeapSize),
            ("8->9->-2", "12", ParseError::BadLiveHeapSize),
            ("8->9->2", "twelve", ParseError::BadGoalHeapSize),
            ("8->9->2", "-12", ParseError::BadGoalHeapSize),
        ];

        for (heap, goal, expected) in cases {
            let line = trace_line("0.016+0.79+0.23", "0.13+0.95/1.3/2.2+1.8", heap, goal);
            assert_eq!(parse_line(&line), Err(expected), "heap {heap:?} goal {goal:?}");
        }
    }

    #[test]
    fn test_first_failure_wins() {
        let line = trace_line("bad", "bad", "bad", "bad");
        assert_eq!(parse_line(&line), Err(ParseError::BadWallClockTimings));

        let line = trace_line("0.016+0.79+0.23", "0.13+0.95/1.3/2.2+1.8", "bad", "bad");
        assert_eq!(parse_line(&line), Err(ParseError::BadLiveHeapSize));
    }

    #[test]
    fn test_micros_truncate_toward_zero() {
        assert_eq!(millis_to_micros(0.0015), Some(1));
        assert_eq!(millis_to_micros(2.0), Some(2000));
        assert_eq!(millis_to_micros(0.0), Some(0));
        assert_eq!(millis_to_micros(1e20), None);
        assert_eq!(millis_to_micros(f64::MAX), None);
    }

    #[test]
    fn test_timings_too_large_for_micros_are_rejected() {
        let line = trace_line("1e20+0.79+1e20", "0.13+0.95/1.3/2.2+1.8", "8->9->2", "12");
        assert_eq!(parse_line(&line), Err(ParseError::BadWallClockTimings));

        let line = trace_line("0.016+0.79+0.23", "0.13+1e17/1e17/1e17+1.8", "8->9->2", "12");
        assert_eq!(parse_line(&line), Err(ParseError::BadMarkAndSweepCpuTimings));

        let line = trace_line("0.016+0.79+0.23", "1e300+0.95/1.3/2.2+1.8", "8->9->2", "12");
        assert_eq!(parse_line(&line), Err(ParseError::BadCpuTimings));

        // Large but representable values still decode.
        let line = trace_line("1e12+0.79+1e12", "0.13+0.95/1.3/2.2+1.8", "8->9->2", "12");
        let record = parse_line(&line).unwrap();
        assert_eq!(record.wall_time.sweep_termination_us, 1_000_000_000_000_000);
    }
}
