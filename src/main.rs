use clap::Parser;
use color_eyre::eyre::{bail, Result, WrapErr};
use gctrace_tui::{
    app::App,
    cli::Cli,
    config::Config,
    gctrace::{read_records, ReaderStats},
    metrics::{aggregator::Aggregator, collector::MetricsCollector, sink::DashboardFeed},
    tui::dashboard::Dashboard,
    tui::event::{poll_event, Event},
    tui::terminal::{self, Tui},
};
use std::io::IsTerminal;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::io::BufReader;
use tokio::sync::mpsc;
use tracing_subscriber::{fmt, EnvFilter};

/// How long shutdown waits for the stdin reader, which may be parked in a
/// blocking read.
const SHUTDOWN_TIMEOUT: Duration = Duration::from_millis(200);

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_logging(&cli)?;

    if std::io::stdin().is_terminal() {
        bail!("data pipe is required, e.g. GODEBUG=gctrace=1 ./app 2>&1 >/dev/null | gctrace-tui");
    }

    let mut config = match cli.config.clone().or_else(Config::default_path) {
        Some(path) => Config::load(&path)
            .wrap_err_with(|| format!("loading config from {}", path.display()))?,
        None => Config::default(),
    };
    cli.apply(&mut config);
    config.validate()?;

    let runtime = tokio::runtime::Runtime::new()?;
    let result = runtime.block_on(run(config));
    runtime.shutdown_timeout(SHUTDOWN_TIMEOUT);

    tracing::info!("gctrace-tui stopped");
    result
}

fn init_logging(cli: &Cli) -> Result<()> {
    let Some(path) = &cli.log_file else {
        return Ok(());
    };

    let filter = EnvFilter::try_new(&cli.log_level)
        .wrap_err_with(|| format!("invalid log level: {}", cli.log_level))?;
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .wrap_err_with(|| format!("opening log file {}", path.display()))?;

    fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .init();

    Ok(())
}

async fn run(config: Config) -> Result<()> {
    let width = config.resolve_width(terminal::columns());
    tracing::info!(
        width,
        summary_interval = %humantime::format_duration(config.summary_interval),
        render_interval = %humantime::format_duration(config.render_interval),
        "starting gctrace-tui",
    );

    let aggregator = Arc::new(Aggregator::new(width));
    let feed = Arc::new(DashboardFeed::new(aggregator.width()));
    let stats = Arc::new(ReaderStats::new());
    let collector = Arc::new(MetricsCollector::new(
        aggregator,
        feed.clone(),
        config.summary_interval,
    ));

    let (tx, rx) = mpsc::channel(config.channel_capacity);

    let reader_stats = stats.clone();
    let reader_handle = tokio::spawn(async move {
        let stdin = BufReader::new(tokio::io::stdin());
        if let Err(e) = read_records(stdin, tx, &reader_stats).await {
            tracing::error!(error = %e, "reading gctrace input failed");
        }
    });

    let ingest = collector.clone();
    let ingest_handle = tokio::spawn(async move { ingest.run_ingest(rx).await });

    let summary = collector.clone();
    let summary_handle = tokio::spawn(async move { summary.run_summary().await });

    let mut app = App::new(feed, stats, config.summary_interval, config.export_dir.clone());

    let mut terminal = terminal::setup_terminal()?;
    let result = render_loop(&mut terminal, &mut app, config.render_interval);
    terminal::restore_terminal(&mut terminal)?;

    summary_handle.abort();
    ingest_handle.abort();
    reader_handle.abort();

    result
}

/// Redraws the stored visual state every `render_interval` until the user
/// quits. Key presses are handled in between frames.
fn render_loop(terminal: &mut Tui, app: &mut App, render_interval: Duration) -> Result<()> {
    let mut next_frame = Instant::now();

    while !app.should_quit {
        let now = Instant::now();
        if now >= next_frame {
            let view = app.view();
            terminal.draw(|frame| {
                Dashboard::render(frame, &view, app.status.as_ref(), &app.theme);
            })?;
            next_frame = now + render_interval;
        }

        match poll_event(next_frame.saturating_duration_since(Instant::now()))? {
            Event::Quit => app.quit(),
            Event::Export => {
                app.export();
                next_frame = Instant::now();
            }
            Event::None => {}
        }
    }

    Ok(())
}
