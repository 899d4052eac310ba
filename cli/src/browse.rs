use std::{io, time::Duration};
use anyhow::Result;
use chrono::NaiveDate;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Cell, Padding, Paragraph, Row, Table},
};
use stimlog_core::{
    hour_views, slot_status, summarize, Day, DayRepository, DayService, FieldStats, HourStatus,
};

// --- THEME ---
struct Theme {
    primary: Color,
    muted: Color,
    text: Color,
    pain: Color,
    off: Color,
    asleep: Color,
}

const THEME: Theme = Theme {
    primary: Color::Cyan,  // Highlights
    muted: Color::DarkGray,
    text: Color::White,
    pain: Color::Red,
    off: Color::Yellow,
    asleep: Color::Blue,
};

pub struct BrowseApp {
    pub days: Vec<Day>,
    pub current_day_index: usize,
}

impl BrowseApp {
    /// `days` must be sorted by date; starts on `focus` if present, else the latest day.
    pub fn new(days: Vec<Day>, focus: NaiveDate) -> Self {
        let current_day_index = days
            .iter()
            .position(|d| d.date() == focus)
            .unwrap_or(days.len().saturating_sub(1));
        Self {
            days,
            current_day_index,
        }
    }

    pub fn next_day(&mut self) {
        if !self.days.is_empty() && self.current_day_index < self.days.len() - 1 {
            self.current_day_index += 1;
        }
    }

    pub fn previous_day(&mut self) {
        if self.current_day_index > 0 {
            self.current_day_index -= 1;
        }
    }

    pub fn current_day(&self) -> Option<&Day> {
        self.days.get(self.current_day_index)
    }
}

fn load_days<R: DayRepository>(service: &DayService<R>, focus: NaiveDate) -> Result<Vec<Day>> {
    let mut days = Vec::new();
    for date in service.list_dates()? {
        days.extend(service.get_day(date)?);
    }
    if !days.iter().any(|d| d.date() == focus) {
        days.push(service.open(focus)?);
        days.sort_by_key(|d| d.date());
    }
    Ok(days)
}

pub fn run<R: DayRepository>(service: &DayService<R>, focus: NaiveDate) -> Result<()> {
    // Data setup
    let days = load_days(service, focus)?;

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = BrowseApp::new(days, focus);
    let res = run_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut BrowseApp) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Left | KeyCode::Char('h') => app.previous_day(),
                        KeyCode::Right | KeyCode::Char('l') => app.next_day(),
                        _ => {}
                    }
                }
            }
        }
    }
}

fn ui(frame: &mut Frame, app: &BrowseApp) {
    let size = frame.area();

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Hours + Summary
            Constraint::Length(1), // Footer / Help
        ])
        .split(size);

    let Some(day) = app.current_day() else {
        frame.render_widget(
            Paragraph::new("No days recorded").alignment(Alignment::Center),
            main_layout[1],
        );
        return;
    };

    // --- Header ---
    let header_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(20),
            Constraint::Min(1),
            Constraint::Length(30), // Day Selector
        ])
        .split(main_layout[0]);

    let app_title = Paragraph::new(Span::styled("STIMLOG", Style::default().fg(THEME.primary).add_modifier(Modifier::BOLD)))
        .block(Block::default().padding(Padding::new(0, 0, 1, 0)));
    frame.render_widget(app_title, header_layout[0]);

    let title = format!(" {} ", day.date().format("%a %Y-%m-%d"));
    let nav_text = Line::from(vec![
        Span::styled(" < ", Style::default().fg(if app.current_day_index > 0 { THEME.text } else { THEME.muted })),
        Span::styled(title, Style::default().fg(THEME.text).add_modifier(Modifier::BOLD)),
        Span::styled(" > ", Style::default().fg(if app.current_day_index < app.days.len() - 1 { THEME.text } else { THEME.muted })),
    ]);
    let nav = Paragraph::new(nav_text).alignment(Alignment::Right).block(Block::default().padding(Padding::new(0, 0, 1, 0)));
    frame.render_widget(nav, header_layout[2]);

    let header_block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(THEME.muted));
    frame.render_widget(header_block, main_layout[0]);

    // --- Main Content Split ---
    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(65),
            Constraint::Length(1), // Gutter
            Constraint::Percentage(35),
        ])
        .split(main_layout[1]);

    draw_hours(frame, day, content_chunks[0]);
    draw_summary(frame, day, content_chunks[2]);

    // --- Footer ---
    let help = Line::from(vec![
        Span::styled("DAY: ", Style::default().fg(THEME.muted)),
        Span::styled("←/→ ", Style::default().fg(THEME.text)),
        Span::raw("  "),
        Span::styled("QUIT: ", Style::default().fg(THEME.muted)),
        Span::styled("q", Style::default().fg(THEME.text)),
    ]);
    let footer = Paragraph::new(help).alignment(Alignment::Center).style(Style::default().fg(THEME.muted));
    frame.render_widget(footer, main_layout[2]);
}

fn status_color(status: HourStatus) -> Color {
    match status {
        HourStatus::Empty => THEME.muted,
        HourStatus::OffAndAsleep | HourStatus::OffWithPain { .. } => THEME.off,
        HourStatus::AsleepWithDevice { .. } => THEME.asleep,
        HourStatus::Normal { .. } => THEME.text,
    }
}

fn draw_hours(frame: &mut Frame, day: &Day, area: Rect) {
    let hours = day.get_all_hours();
    let rows: Vec<Row> = hour_views(&hours)
        .into_iter()
        .map(|view| {
            let status = slot_status(hours[&view.hour].as_ref());
            let pain_style = match view.pain {
                Some(p) if p > 0 => Style::default().fg(THEME.pain),
                _ => Style::default().fg(THEME.muted),
            };
            Row::new(vec![
                Cell::from(view.period).style(Style::default().fg(THEME.muted)),
                Cell::from(view.pain.map(|p| p.to_string()).unwrap_or_default()).style(pain_style),
                Cell::from(view.description).style(Style::default().fg(status_color(status))),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [Constraint::Length(13), Constraint::Length(5), Constraint::Min(10)],
    )
    .header(Row::new(vec!["Period", "Pain", "Record"]).style(Style::default().fg(THEME.primary).add_modifier(Modifier::BOLD)))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(THEME.muted))
            .title(" Hours "),
    );

    frame.render_widget(table, area);
}

fn stats_line(label: &str, stats: Option<FieldStats>, color: Color) -> Line<'static> {
    let value = stats
        .map(|s| format!("{} / {} / {:.2}", s.min, s.max, s.avg))
        .unwrap_or_else(|| "-".to_string());
    Line::from(vec![
        Span::styled(format!("{:<10}", label), Style::default().fg(THEME.muted)),
        Span::styled(value, Style::default().fg(color).add_modifier(Modifier::BOLD)),
    ])
}

fn draw_summary(frame: &mut Frame, day: &Day, area: Rect) {
    let summary = summarize(&day.get_all_hours());

    let mut lines = vec![
        Line::from(vec![Span::styled("Overview", Style::default().add_modifier(Modifier::BOLD))]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Recorded: ", Style::default().fg(THEME.muted)),
            Span::styled(format!("{}h", summary.recorded_hours), Style::default().fg(THEME.text)),
        ]),
        Line::from(vec![
            Span::styled("Awake:    ", Style::default().fg(THEME.muted)),
            Span::styled(format!("{}h", summary.sleep.hours_awake), Style::default().fg(THEME.text)),
        ]),
        Line::from(vec![
            Span::styled("Asleep:   ", Style::default().fg(THEME.muted)),
            Span::styled(format!("{}h", summary.sleep.hours_asleep), Style::default().fg(THEME.asleep)),
        ]),
        Line::from(""),
        Line::from(Span::styled("min / max / avg", Style::default().fg(THEME.muted))),
        stats_line("Pain", summary.pain, THEME.pain),
        stats_line("Program", summary.program, THEME.text),
        stats_line("Strength", summary.strength, THEME.text),
        Line::from(""),
        Line::from(vec![Span::styled("Programs", Style::default().add_modifier(Modifier::BOLD))]),
    ];
    for (program, hours) in &summary.program_counts {
        let label = if *program == 0 { "OFF".to_string() } else { format!("P{}", program) };
        lines.push(Line::from(vec![
            Span::styled(format!("{:<10}", label), Style::default().fg(if *program == 0 { THEME.off } else { THEME.muted })),
            Span::styled(format!("{}h", hours), Style::default().fg(THEME.text)),
        ]));
    }

    let info = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(THEME.muted))
            .title(" Summary "),
    );
    frame.render_widget(info, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use stimlog_core::ScaleConfig;

    fn day(d: u32) -> Day {
        Day::new(NaiveDate::from_ymd_opt(2022, 7, d).unwrap(), ScaleConfig::default())
    }

    #[test]
    fn test_navigation_stays_in_bounds() {
        let mut app = BrowseApp::new(vec![day(3), day(4), day(5)], NaiveDate::from_ymd_opt(2022, 7, 4).unwrap());
        assert_eq!(app.current_day_index, 1);
        app.next_day();
        app.next_day();
        assert_eq!(app.current_day().map(|d| d.date().format("%d").to_string()), Some("05".to_string()));
        app.previous_day();
        app.previous_day();
        app.previous_day();
        assert_eq!(app.current_day_index, 0);
    }

    #[test]
    fn test_unknown_focus_starts_on_latest() {
        let app = BrowseApp::new(vec![day(3), day(4)], NaiveDate::from_ymd_opt(2022, 8, 1).unwrap());
        assert_eq!(app.current_day_index, 1);

        let mut empty = BrowseApp::new(Vec::new(), NaiveDate::from_ymd_opt(2022, 8, 1).unwrap());
        empty.next_day();
        assert!(empty.current_day().is_none());
    }
}
