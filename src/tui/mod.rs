//! Ratatui-based terminal UI.
//!
//! The TUI provides a form panel for the eight applicant fields, re-runs the
//! assessment pipeline on demand, and renders the status card plus both
//! charts on the right. It is presentation only: everything flows through the
//! same `app::pipeline` as the CLI and HTTP shells.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph},
};

use crate::app::pipeline::{self, AssessmentOutcome, AssessmentOutput};
use crate::assets::{self, AssetStore};
use crate::cli::TuiArgs;
use crate::domain::{ApplicantProfile, BandTone, ChartSpec, Decision, HomeOwnership, LoanIntent};
use crate::error::AppError;
use crate::report;

/// Start the TUI.
pub fn run(args: TuiArgs) -> Result<(), AppError> {
    let dir = assets::resolve_asset_dir(args.assets.as_deref());
    let store = AssetStore::load(&dir);

    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(store);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

const FIELD_COUNT: usize = 8;

struct App {
    store: AssetStore,

    age: f64,
    income: f64,
    loan: f64,
    score: f64,
    employment: f64,
    housing: HomeOwnership,
    purpose: LoanIntent,
    prior_default: bool,

    selected_field: usize,
    status: String,
    result: Option<AssessmentOutput>,
}

impl App {
    fn new(store: AssetStore) -> Self {
        let mut app = Self {
            store,
            // Defaults mirror the intake form.
            age: 30.0,
            income: 55_000.0,
            loan: 15_000.0,
            score: 680.0,
            employment: 5.0,
            housing: HomeOwnership::Rent,
            purpose: LoanIntent::Personal,
            prior_default: false,
            selected_field: 0,
            status: String::new(),
            result: None,
        };
        app.refresh_assessment();
        app
    }

    fn profile(&self) -> ApplicantProfile {
        ApplicantProfile {
            age: self.age,
            annual_income: self.income,
            loan_amount: self.loan,
            credit_score: self.score,
            employment_years: self.employment,
            home_ownership: self.housing.label().to_string(),
            loan_intent: self.purpose.label().to_string(),
            prior_default: self.prior_default,
        }
    }

    fn refresh_assessment(&mut self) {
        match pipeline::run_assessment(&self.store, &self.profile()) {
            Ok(AssessmentOutcome::Ready(out)) => {
                self.result = Some(*out);
                self.status = "Assessment updated.".to_string();
            }
            Ok(AssessmentOutcome::Unavailable) => {
                self.result = None;
                self.status = report::UNAVAILABLE_MESSAGE.to_string();
            }
            Err(e) => {
                self.result = None;
                self.status = e.to_string();
            }
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            let has_event = event::poll(Duration::from_millis(250))
                .map_err(|e| AppError::new(4, format!("Terminal event error: {e}")))?;
            if !has_event {
                continue;
            }

            let ev = event::read().map_err(|e| AppError::new(4, format!("Terminal event error: {e}")))?;
            let Event::Key(key) = ev else {
                needs_redraw = true;
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }

            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Up => {
                    self.selected_field = (self.selected_field + FIELD_COUNT - 1) % FIELD_COUNT;
                }
                KeyCode::Down => {
                    self.selected_field = (self.selected_field + 1) % FIELD_COUNT;
                }
                KeyCode::Left => self.adjust_field(-1),
                KeyCode::Right => self.adjust_field(1),
                KeyCode::Enter | KeyCode::Char(' ') => self.refresh_assessment(),
                _ => {}
            }
            needs_redraw = true;
        }
    }

    /// Step the selected field, clamping numerics to the form's slider ranges.
    fn adjust_field(&mut self, dir: i64) {
        let d = dir as f64;
        match self.selected_field {
            0 => self.age = (self.age + d).clamp(18.0, 80.0),
            1 => self.income = (self.income + d * 1_000.0).max(0.0),
            2 => self.loan = (self.loan + d * 500.0).max(0.0),
            3 => self.score = (self.score + d * 10.0).clamp(300.0, 850.0),
            4 => self.employment = (self.employment + d).clamp(0.0, 40.0),
            5 => self.housing = cycle(&HomeOwnership::ALL, self.housing, dir),
            6 => self.purpose = cycle(&LoanIntent::ALL, self.purpose, dir),
            _ => self.prior_default = !self.prior_default,
        }
    }

    fn draw(&self, f: &mut ratatui::Frame) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(f.area());

        let title = Paragraph::new("Credit Risk Screening Terminal")
            .alignment(Alignment::Center)
            .style(Style::default().add_modifier(Modifier::BOLD));
        f.render_widget(title, rows[0]);

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(38), Constraint::Min(0)])
            .split(rows[1]);

        self.draw_form(f, cols[0]);
        self.draw_dashboard(f, cols[1]);

        let hints = Paragraph::new("Up/Down select | Left/Right adjust | Enter assess | q quit")
            .style(Style::default().fg(Color::DarkGray));
        f.render_widget(hints, rows[2]);
    }

    fn draw_form(&self, f: &mut ratatui::Frame, area: Rect) {
        let labels: [(&str, String); FIELD_COUNT] = [
            ("Age", format!("{:.0}", self.age)),
            ("Income ($)", format!("{:.0}", self.income)),
            ("Loan ($)", format!("{:.0}", self.loan)),
            ("FICO Score", format!("{:.0}", self.score)),
            ("Exp (Yrs)", format!("{:.0}", self.employment)),
            ("Housing", self.housing.label().to_string()),
            ("Purpose", self.purpose.label().to_string()),
            (
                "Past Default?",
                if self.prior_default { "Yes" } else { "No" }.to_string(),
            ),
        ];

        let items: Vec<ListItem> = labels
            .iter()
            .enumerate()
            .map(|(i, (name, value))| {
                let style = if i == self.selected_field {
                    Style::default().add_modifier(Modifier::REVERSED)
                } else {
                    Style::default()
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{name:<14}"), style),
                    Span::styled(value.clone(), style.add_modifier(Modifier::BOLD)),
                ]))
            })
            .collect();

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Applicant Data"),
        );
        f.render_widget(list, area);
    }

    fn draw_dashboard(&self, f: &mut ratatui::Frame, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(6),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
            ])
            .split(area);

        self.draw_status_card(f, rows[0]);

        if let Some(result) = &self.result {
            draw_chart(f, rows[1], &result.gauge);
            draw_chart(f, rows[2], &result.dti);
            self.draw_notes(f, rows[3], &result.notes);
        } else {
            self.draw_notes(f, rows[3], &[]);
        }
    }

    fn draw_status_card(&self, f: &mut ratatui::Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title("Decision");

        let content = match &self.result {
            Some(result) => {
                let color = match result.summary.decision {
                    Decision::Approve => Color::Green,
                    Decision::Decline => Color::Red,
                };
                vec![
                    Line::from(Span::styled(
                        result.summary.headline.clone(),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    )),
                    Line::from(format!(
                        "{}: {:.1}%",
                        result.summary.probability_label, result.summary.probability_pct
                    )),
                    Line::from(Span::styled(
                        result.summary.recommendation.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
                ]
            }
            None => vec![Line::from(Span::styled(
                self.status.clone(),
                Style::default().fg(Color::Yellow),
            ))],
        };

        f.render_widget(Paragraph::new(content).block(block), area);
    }

    fn draw_notes(&self, f: &mut ratatui::Frame, area: Rect, notes: &[String]) {
        let mut lines: Vec<Line> = notes
            .iter()
            .map(|n| Line::from(Span::styled(format!("note: {n}"), Style::default().fg(Color::Yellow))))
            .collect();
        if lines.is_empty() {
            lines.push(Line::from(Span::styled(
                self.status.clone(),
                Style::default().fg(Color::DarkGray),
            )));
        }
        f.render_widget(
            Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Log")),
            area,
        );
    }
}

/// Render one chart spec as a colored gauge bar.
fn draw_chart(f: &mut ratatui::Frame, area: Rect, spec: &ChartSpec) {
    let label = format!("{} (cutoff {:.0})", spec.value_text(), spec.threshold);
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(spec.title.clone()))
        .gauge_style(Style::default().fg(tone_color(spec.tone_at(spec.value))))
        .ratio(spec.position(spec.value))
        .label(label);
    f.render_widget(gauge, area);
}

fn tone_color(tone: Option<BandTone>) -> Color {
    match tone {
        Some(BandTone::Good) => Color::Green,
        Some(BandTone::Caution) => Color::Yellow,
        Some(BandTone::Danger) => Color::Red,
        None => Color::Gray,
    }
}

/// Cycle through a closed set of variants in either direction.
fn cycle<T: Copy + PartialEq>(all: &[T], current: T, dir: i64) -> T {
    let len = all.len() as i64;
    let idx = all.iter().position(|v| *v == current).unwrap_or(0) as i64;
    all[((idx + dir).rem_euclid(len)) as usize]
}
