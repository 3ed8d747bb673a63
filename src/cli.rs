use crate::config::Config;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "gctrace-tui")]
#[command(version)]
#[command(
    about = "A TUI for Go GC traces",
    long_about = "Reads GODEBUG=gctrace=1 output from standard input and charts it.\n\n\
                  Example: GODEBUG=gctrace=1 ./server 2>&1 >/dev/null | gctrace-tui"
)]
pub struct Cli {
    #[arg(
        short = 'i',
        long,
        help = "Summary interval for GC rate and STW share (e.g. 1s, 5s)",
        value_parser = parse_duration
    )]
    pub interval: Option<Duration>,

    #[arg(
        short = 'r',
        long,
        help = "Redraw interval (e.g. 100ms, 250ms)",
        value_parser = parse_duration
    )]
    pub render_interval: Option<Duration>,

    #[arg(short, long, help = "Points of heap history to chart (default: terminal width)")]
    pub width: Option<usize>,

    #[arg(
        short = 'c',
        long,
        help = "Path to configuration file",
        env = "GCTRACE_TUI_CONFIG"
    )]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Write logs to this file (the terminal is used by the dashboard)")]
    pub log_file: Option<PathBuf>,

    #[arg(long, default_value = "info", help = "Log filter (trace, debug, info, warn, error)")]
    pub log_level: String,
}

impl Cli {
    /// Overrides file settings with whatever was given on the command line.
    pub fn apply(&self, config: &mut Config) {
        if let Some(interval) = self.interval {
            config.summary_interval = interval;
        }
        if let Some(render_interval) = self.render_interval {
            config.render_interval = render_interval;
        }
        if let Some(width) = self.width {
            config.history_width = Some(width);
        }
    }
}

fn parse_duration(s: &str) -> Result<Duration, humantime::DurationError> {
    humantime::parse_duration(s)
}
