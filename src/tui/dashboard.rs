use crate::app::StatusMessage;
use crate::gctrace::Phase;
use crate::metrics::counters::Summary;
use crate::metrics::store::SeriesSnapshot;
use crate::theme::Theme;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    prelude::*,
    widgets::{Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, Gauge, GraphType, Paragraph},
};
use std::time::Duration;
use strum::IntoEnumIterator;

const GAUGE_HEIGHT: u16 = 3;
const BAR_GAP: u16 = 2;

/// Everything the dashboard draws in one frame.
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub series: SeriesSnapshot,
    pub summary: Summary,
    pub summary_interval: Duration,
    pub accepted_lines: u64,
    pub dropped_lines: u64,
    pub input_closed: bool,
}

pub struct Dashboard;

impl Dashboard {
    pub fn render(frame: &mut Frame, view: &DashboardView, status: Option<&StatusMessage>, theme: &Theme) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(GAUGE_HEIGHT),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Length(1),
            ])
            .split(frame.area());

        let top = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(10, 12), Constraint::Ratio(2, 12)])
            .split(rows[0]);

        Self::render_stw_gauge(frame, top[0], &view.summary, theme);
        Self::render_rate(frame, top[1], &view.summary, theme);
        Self::render_heap_chart(frame, rows[1], "Live heap size, MB", &view.series.live_heap, theme);
        Self::render_heap_chart(frame, rows[2], "Goal heap size, MB", &view.series.goal_heap, theme);

        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[3]);

        Self::render_phases(frame, bottom[0], "Wall-clock time, us", &view.series.wall_phases, theme);
        Self::render_phases(frame, bottom[1], "CPU time, us", &view.series.cpu_phases, theme);
        Self::render_footer(frame, rows[4], view, status, theme);
    }

    fn titled_block<'a>(title: &'a str, theme: &Theme) -> Block<'a> {
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border()))
            .title(Span::styled(title, Style::default().fg(theme.title())))
    }

    fn render_stw_gauge(frame: &mut Frame, area: Rect, summary: &Summary, theme: &Theme) {
        let percent = summary.percent_stop_the_world;
        // The widget rejects ratios outside [0, 1]; the label keeps the raw value.
        let ratio = (percent / 100.0).clamp(0.0, 1.0);

        let gauge = Gauge::default()
            .block(Self::titled_block("Percentage of Time Spent in STW GC", theme))
            .gauge_style(
                Style::default()
                    .fg(theme.gauge_stw())
                    .bg(theme.gauge_background()),
            )
            .label(Span::styled(
                format!("{:.2}%", percent),
                Style::default().add_modifier(Modifier::BOLD),
            ))
            .ratio(ratio);

        frame.render_widget(gauge, area);
    }

    fn render_rate(frame: &mut Frame, area: Rect, summary: &Summary, theme: &Theme) {
        let rate = Paragraph::new(summary.events_per_second.to_string())
            .style(Style::default().fg(theme.text()))
            .alignment(Alignment::Center)
            .block(Self::titled_block("GC Events per Second", theme));

        frame.render_widget(rate, area);
    }

    fn render_heap_chart(frame: &mut Frame, area: Rect, title: &str, values: &[f64], theme: &Theme) {
        let data: Vec<(f64, f64)> = values
            .iter()
            .enumerate()
            .map(|(i, v)| (i as f64, *v))
            .collect();

        let max = values.iter().copied().fold(0.0, f64::max).max(1.0);

        let datasets = vec![Dataset::default()
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Line)
            .style(
                Style::default()
                    .fg(theme.chart_line())
                    .add_modifier(Modifier::BOLD),
            )
            .data(&data)];

        let chart = Chart::new(datasets)
            .block(Self::titled_block(title, theme))
            .x_axis(
                Axis::default()
                    .style(Style::default().fg(theme.chart_axis()))
                    .bounds([0.0, values.len().saturating_sub(1).max(1) as f64]),
            )
            .y_axis(
                Axis::default()
                    .style(Style::default().fg(theme.chart_axis()))
                    .bounds([0.0, max])
                    .labels(vec![
                        Span::raw("0"),
                        Span::raw(format!("{:.0}", max / 2.0)),
                        Span::raw(format!("{:.0}", max)),
                    ]),
            );

        frame.render_widget(chart, area);
    }

    fn render_phases(frame: &mut Frame, area: Rect, title: &str, phases: &[u64; 3], theme: &Theme) {
        let bar_width = Self::bar_width(area, phases.len() as u16);
        let bars: Vec<Bar> = Phase::iter()
            .zip(phases.iter())
            .map(|(phase, value)| {
                Bar::default()
                    .label(Line::from(Self::phase_label(phase, bar_width)))
                    .value(*value)
            })
            .collect();

        let chart = BarChart::default()
            .block(Self::titled_block(title, theme))
            .data(BarGroup::default().bars(&bars))
            .bar_width(bar_width)
            .bar_gap(BAR_GAP)
            .bar_style(Style::default().fg(theme.bar()))
            .value_style(
                Style::default()
                    .fg(theme.bar_value())
                    .bg(theme.bar())
                    .add_modifier(Modifier::BOLD),
            )
            .label_style(Style::default().fg(theme.text()));

        frame.render_widget(chart, area);
    }

    /// Full phase name when the bar is wide enough to show it.
    fn phase_label(phase: Phase, bar_width: u16) -> String {
        let label = phase.to_string();
        if label.len() <= bar_width as usize {
            label
        } else {
            phase.short_label().to_string()
        }
    }

    /// Spreads the bars over the inner width of a bordered block.
    fn bar_width(area: Rect, count: u16) -> u16 {
        if count == 0 {
            return 1;
        }
        let inner = area.width.saturating_sub(2);
        (inner.saturating_sub(count * BAR_GAP) / count).max(1)
    }

    fn render_footer(
        frame: &mut Frame,
        area: Rect,
        view: &DashboardView,
        status: Option<&StatusMessage>,
        theme: &Theme,
    ) {
        let mut spans = vec![Span::styled(
            format!(
                " lines: {} accepted, {} dropped │ summary every {} ",
                view.accepted_lines,
                view.dropped_lines,
                humantime::format_duration(view.summary_interval)
            ),
            Style::default().fg(theme.text_dim()),
        )];

        if view.input_closed {
            spans.push(Span::styled("│ input closed ", Style::default().fg(theme.warning())));
        }

        match status {
            Some(StatusMessage::Info(msg)) => {
                spans.push(Span::styled(format!("│ {} ", msg), Style::default().fg(theme.success())));
            }
            Some(StatusMessage::Error(msg)) => {
                spans.push(Span::styled(format!("│ {} ", msg), Style::default().fg(theme.error())));
            }
            None => {}
        }

        spans.push(Span::styled("│ e: export │ q: quit", Style::default().fg(theme.text_dim())));

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
