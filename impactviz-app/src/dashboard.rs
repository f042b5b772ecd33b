//! Interactive terminal dashboard: sliders on the left, figures and charts on the right.

use crate::config::AppConfig;
use crate::logos::LogoStatus;
use crate::workflow;
use anyhow::Result;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use impactviz_core::{
    chart::{chart_series, ChartSeries},
    model::ImpactModel,
    summary,
};
use impactviz_schemas::{
    chart::{palette, Rgb},
    impact::ImpactResult,
    parameters::{ParameterId, SimulationParameters},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Gauge, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io::{stdout, Stdout};
use std::time::Duration;

/// Slider steps moved by PageUp/PageDown.
const COARSE_STEPS: i32 = 5;

const VIEWER_VERSION: &str = "1.8";
const ATTRIBUTION: &str =
    "Visualizador Creado por el equipo Sustrend SpA en el marco del Proyecto TT GREEN Foods";
const LOCATION: &str = "Viña del Mar, Valparaíso, Chile";

/// What the event loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Export,
    Quit,
}

/// Dashboard state. Every change to the parameters is followed by a full re-evaluation.
pub struct Dashboard {
    model: ImpactModel,
    initial: SimulationParameters,
    params: SimulationParameters,
    result: ImpactResult,
    selected: usize,
    status: String,
    logos: Vec<LogoStatus>,
    config: AppConfig,
}

impl Dashboard {
    pub fn new(params: SimulationParameters, config: AppConfig, logos: Vec<LogoStatus>) -> Self {
        let model = ImpactModel::new();
        let params = params.clamped();
        Self {
            result: model.evaluate(&params),
            model,
            initial: params,
            params,
            selected: 0,
            status: "Ajusta los parámetros para explorar las proyecciones.".to_string(),
            logos,
            config,
        }
    }

    pub fn params(&self) -> &SimulationParameters {
        &self.params
    }

    pub fn result(&self) -> &ImpactResult {
        &self.result
    }

    pub fn selected(&self) -> ParameterId {
        ParameterId::ALL[self.selected]
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn series(&self) -> [ChartSeries; 3] {
        chart_series(&self.result, self.model.baseline())
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % ParameterId::ALL.len();
    }

    pub fn select_previous(&mut self) {
        self.selected = (self.selected + ParameterId::ALL.len() - 1) % ParameterId::ALL.len();
    }

    /// Moves the selected slider by `steps` and recomputes.
    pub fn adjust(&mut self, steps: i32) {
        let id = self.selected();
        let value = id.range().nudge(self.params.get(id), steps);
        self.params.set(id, value);
        self.recompute();
    }

    /// Restores the parameters the dashboard was opened with.
    pub fn reset(&mut self) {
        self.params = self.initial;
        self.recompute();
        self.status = "Parámetros restablecidos.".to_string();
    }

    fn recompute(&mut self) {
        self.result = self.model.evaluate(&self.params);
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Action::Quit;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Action::Quit,
            KeyCode::Char('e') => return Action::Export,
            KeyCode::Up | KeyCode::Char('k') => self.select_previous(),
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => self.select_next(),
            KeyCode::Left | KeyCode::Char('h') => self.adjust(-1),
            KeyCode::Right | KeyCode::Char('l') => self.adjust(1),
            KeyCode::PageDown => self.adjust(-COARSE_STEPS),
            KeyCode::PageUp => self.adjust(COARSE_STEPS),
            KeyCode::Home => self.adjust(-i32::MAX / 2),
            KeyCode::End => self.adjust(i32::MAX / 2),
            KeyCode::Char('r') => self.reset(),
            _ => {}
        }
        Action::None
    }

    /// Writes the three charts as PNG into the configured output directory.
    pub fn export_charts(&mut self) {
        self.status = match workflow::run_export(
            &self.params,
            &self.config,
            &self.config.output_dir,
            false,
        ) {
            Ok(paths) => format!(
                "Gráficos descargados en {} ({} archivos).",
                self.config.output_dir.display(),
                paths.len()
            ),
            Err(e) => {
                tracing::error!(error = %format!("{:#}", e), "Chart export failed");
                format!("Error al exportar los gráficos: {:#}", e)
            }
        };
    }
}

/// Calls `restore` when dropped, including while unwinding from a panic.
struct TerminalGuard<F: FnMut()> {
    restore: F,
}

impl<F: FnMut()> Drop for TerminalGuard<F> {
    fn drop(&mut self) {
        (self.restore)();
    }
}

fn restore_terminal() {
    if let Err(e) = disable_raw_mode() {
        tracing::warn!(error = %e, "Could not leave raw mode");
    }
    if let Err(e) = stdout().execute(LeaveAlternateScreen) {
        tracing::warn!(error = %e, "Could not leave the alternate screen");
    }
    if let Err(e) = stdout().execute(cursor::Show) {
        tracing::warn!(error = %e, "Could not show the cursor");
    }
}

/// Runs the dashboard until the user quits, restoring the terminal on every exit path.
pub fn run(mut dashboard: Dashboard) -> Result<()> {
    enable_raw_mode()?;
    let _guard = TerminalGuard {
        restore: restore_terminal,
    };
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    event_loop(&mut terminal, &mut dashboard)
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    dashboard: &mut Dashboard,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, dashboard))?;

        if !event::poll(Duration::from_millis(250))? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match dashboard.handle_key(key) {
                Action::Quit => return Ok(()),
                Action::Export => dashboard.export_charts(),
                Action::None => {}
            }
        }
    }
}

fn tui_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

fn ui(f: &mut Frame, dashboard: &Dashboard) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(5),
        ])
        .split(f.area());

    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            "Visualizador de Impactos - Proyecto P8",
            Style::default()
                .fg(tui_color(palette::DARK_BLUE))
                .add_modifier(Modifier::BOLD),
        )),
        Line::from("Agente humectante del suelo 100% natural"),
    ])
    .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(header, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(32), Constraint::Percentage(68)])
        .split(chunks[1]);

    render_sidebar(f, dashboard, body[0]);
    render_results(f, dashboard, body[1]);

    let muted = Style::default().fg(Color::DarkGray);
    let footer = Paragraph::new(vec![
        Line::from(dashboard.status().to_string()),
        Line::from(Span::styled(
            format!(
                " ↑↓: parámetro | ←→: ajustar | PgUp/PgDn: ±{} pasos | r: restablecer \
                 | e: exportar PNG | q: salir ",
                COARSE_STEPS
            ),
            muted,
        )),
        Line::from(Span::styled(ATTRIBUTION, muted)).centered(),
        Line::from(Span::styled(
            format!("{} | Versión del Visualizador: {}", LOCATION, VIEWER_VERSION),
            muted,
        ))
        .centered(),
    ])
    .block(Block::default().borders(Borders::TOP));
    f.render_widget(footer, chunks[2]);
}

fn render_sidebar(f: &mut Frame, dashboard: &Dashboard, area: Rect) {
    let mut constraints: Vec<Constraint> = ParameterId::ALL
        .iter()
        .map(|_| Constraint::Length(3))
        .collect();
    constraints.push(Constraint::Min(3));
    constraints.push(Constraint::Length(dashboard.logos.len() as u16 + 2));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (index, id) in ParameterId::ALL.into_iter().enumerate() {
        let value = dashboard.params().get(id);
        let selected = id == dashboard.selected();
        let (border, fill) = if selected {
            (tui_color(palette::VIBRANT_GREEN), tui_color(palette::MID_BLUE))
        } else {
            (Color::DarkGray, tui_color(palette::DARK_TEAL))
        };
        let gauge = Gauge::default()
            .block(
                Block::bordered()
                    .title(id.label())
                    .border_style(Style::default().fg(border)),
            )
            .gauge_style(Style::default().fg(fill).bg(Color::Black))
            .ratio(id.range().ratio(value))
            .label(summary::parameter_value(id, value));
        f.render_widget(gauge, rows[index]);
    }

    let help = Paragraph::new(dashboard.selected().help())
        .wrap(Wrap { trim: true })
        .block(Block::bordered().title("Ayuda"));
    f.render_widget(help, rows[ParameterId::ALL.len()]);

    let logo_lines: Vec<Line> = if dashboard.logos.is_empty() {
        vec![Line::from("Logos no cargados.")]
    } else {
        dashboard
            .logos
            .iter()
            .map(|status| match status {
                LogoStatus::Loaded(_) => Line::from(Span::styled(
                    status.summary(),
                    Style::default().fg(tui_color(palette::DARK_TEAL)),
                )),
                LogoStatus::Failed { .. } => Line::from(Span::styled(
                    status.summary(),
                    Style::default().fg(Color::Red),
                )),
            })
            .collect()
    };
    let logos = Paragraph::new(logo_lines)
        .wrap(Wrap { trim: true })
        .block(Block::bordered().title("Logos"));
    f.render_widget(logos, rows[ParameterId::ALL.len() + 1]);
}

fn render_results(f: &mut Frame, dashboard: &Dashboard, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(8)])
        .split(area);

    let mut card_lines: Vec<Line> = summary::metric_cards(dashboard.result())
        .into_iter()
        .map(|card| {
            Line::from(vec![
                Span::styled(
                    format!("{:<24}", card.label),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(card.value),
            ])
        })
        .collect();
    card_lines.push(Line::from(vec![
        Span::styled(
            format!("{:<24}", "Empleos Verdes"),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(dashboard.result().green_jobs.to_string()),
    ]));
    let cards = Paragraph::new(card_lines)
        .block(Block::bordered().title("Resultados Proyectados Anuales"));
    f.render_widget(cards, rows[0]);

    let series = dashboard.series();
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(series.iter().map(|_| Constraint::Ratio(1, series.len() as u32)))
        .split(rows[1]);
    for (s, column) in series.iter().zip(columns.iter()) {
        f.render_widget(bar_chart(s, column.width), *column);
    }
}

fn bar_chart(series: &ChartSeries, width: u16) -> BarChart<'static> {
    let (baseline_color, projection_color) = series.chart.bar_colors();
    let bars: Vec<Bar<'static>> = series
        .bars()
        .into_iter()
        .zip([baseline_color, projection_color])
        .map(|((label, value), color)| {
            Bar::default()
                .label(Line::from(label))
                .value(value.max(0.0).round() as u64)
                .text_value(series.value_label(value))
                .style(Style::default().fg(tui_color(color)))
                .value_style(Style::default().fg(Color::White).bg(tui_color(color)))
        })
        .collect();

    let bar_width = (width.saturating_sub(4) / 2).clamp(3, 18);
    BarChart::default()
        .block(Block::bordered().title(format!(
            "{} ({})",
            series.chart.title(),
            series.chart.y_label()
        )))
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(1)
        .max(series.y_max().round() as u64)
}
