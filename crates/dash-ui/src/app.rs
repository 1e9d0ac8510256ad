//! Main application state and TUI event loop for the salary dashboard.
//!
//! [`App`] owns the theme and the current [`DashState`] snapshot and drives
//! the crossterm/ratatui event loop: it polls input with a short timeout,
//! drains load outcomes from the runtime channel, routes everything through
//! the pure reducer, and re-renders the derived views.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers, MouseButton,
        MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::Paragraph,
    Frame, Terminal,
};
use tokio::sync::mpsc;

use dash_core::models::YearSummary;
use dash_runtime::loader::{LoadHandle, LoadOrchestrator, LoadOutcome};

use crate::chart_view;
use crate::state::{reduce, DashEvent, DashState, Focus, Phase, SortField, SortSpec};
use crate::table_view::{self, SummaryTotals};
use crate::title_view;
use crate::themes::Theme;

// ── Action ────────────────────────────────────────────────────────────────────

/// What an input event asks the event loop to do.
#[derive(Debug, Clone)]
enum Action {
    Quit,
    Reload,
    Dispatch(DashEvent),
}

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application for the salary dashboard TUI.
pub struct App {
    /// Active colour theme.
    pub theme: Theme,
    /// Current state snapshot; replaced wholesale by the reducer.
    pub state: DashState,
    /// Used to kick off reload runs.
    orchestrator: LoadOrchestrator,
}

impl App {
    /// Construct a new application with the given configuration.
    pub fn new(theme_name: &str, sort: SortSpec, orchestrator: LoadOrchestrator) -> Self {
        Self {
            theme: Theme::from_name(theme_name),
            state: DashState::new(sort),
            orchestrator,
        }
    }

    /// Run the TUI event loop, receiving load outcomes from `rx`.
    ///
    /// Uses `crossterm::event::poll` (synchronous, with a 250 ms timeout) so
    /// the terminal event loop stays on the current thread while the load
    /// outcome arrives on the async channel via `try_recv`.
    ///
    /// The loop exits on `q`, `Q`, or `Ctrl+C`.
    pub async fn run(
        mut self,
        mut rx: mpsc::Receiver<LoadOutcome>,
        mut handle: LoadHandle,
    ) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(250);

        let result = loop {
            terminal.draw(|frame| self.render(frame))?;

            // Handle input events with a short timeout so we don't block.
            if event::poll(tick_rate)? {
                let action = match event::read()? {
                    Event::Key(key) => map_key(key.code, key.modifiers, self.state.focus),
                    Event::Mouse(mouse) => {
                        if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
                            self.map_click(terminal.get_frame().area(), mouse.column, mouse.row)
                        } else {
                            None
                        }
                    }
                    _ => None,
                };

                match action {
                    Some(Action::Quit) => break Ok(()),
                    Some(Action::Reload) => {
                        self.dispatch(DashEvent::LoadStarted);
                        handle.abort();
                        let (new_rx, new_handle) = self.orchestrator.start();
                        rx = new_rx;
                        handle = new_handle;
                    }
                    Some(Action::Dispatch(event)) => self.dispatch(event),
                    None => {}
                }
            }

            // Drain any pending load outcome (non-blocking). Disconnection is
            // expected once the single-shot sender has delivered and dropped.
            loop {
                match rx.try_recv() {
                    Ok(outcome) => self.dispatch(DashEvent::LoadFinished(outcome)),
                    Err(mpsc::error::TryRecvError::Empty)
                    | Err(mpsc::error::TryRecvError::Disconnected) => break,
                }
            }
        };

        // Restore terminal state unconditionally.
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    // ── State transitions ─────────────────────────────────────────────────────

    /// Route an event through the reducer, replacing the snapshot.
    fn dispatch(&mut self, event: DashEvent) {
        self.state = reduce(self.state.clone(), event);
    }

    /// Resolve a left click to a selection event.
    fn map_click(&self, area: Rect, column: u16, row: u16) -> Option<Action> {
        let Phase::Loaded { data, .. } = &self.state.phase else {
            return None;
        };
        if data.is_empty() {
            return None;
        }
        let layout = compute_layout(area, self.state.selection.is_some());
        let rows = self.state.sorted_summaries();
        let offset = table_view::scroll_offset(
            self.state.cursor,
            table_view::visible_rows(layout.table.height),
        );
        clicked_year(layout.table, column, row, &rows, offset)
            .map(|year| Action::Dispatch(DashEvent::SelectYear(year)))
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    /// Render the current snapshot into `frame`.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        match &self.state.phase {
            Phase::Loading => table_view::render_loading(frame, area, &self.theme),
            Phase::Failed(message) => {
                table_view::render_load_failed(frame, area, message, &self.theme)
            }
            Phase::Loaded { data, stats } => {
                if data.is_empty() {
                    table_view::render_no_data(frame, area, &self.theme);
                    return;
                }

                let layout = compute_layout(area, self.state.selection.is_some());
                let rows = self.state.sorted_summaries();
                let totals = SummaryTotals::from_summaries(&rows);

                table_view::render_summary_table(
                    frame,
                    layout.table,
                    &rows,
                    &totals,
                    self.state.cursor,
                    self.state.sort,
                    self.state.focus == Focus::Table,
                    &self.theme,
                );

                if let (Some(titles_area), Some(year)) = (layout.titles, self.state.selection) {
                    title_view::render_title_panel(
                        frame,
                        titles_area,
                        year,
                        self.state.selected_titles(),
                        self.state.focus == Focus::Titles,
                        &self.theme,
                    );
                }

                // The chart always plots years ascending, whatever the table sort.
                chart_view::render_jobs_chart(frame, layout.chart, &data.year_summaries, &self.theme);

                let footer = format!(
                    " {} records · {} dropped  |  ↑/↓ move · Enter select · 1/2/3 sort · r reload · q quit",
                    stats.rows_loaded, stats.rows_dropped,
                );
                frame.render_widget(
                    Paragraph::new(Line::from(footer)).style(self.theme.dim),
                    layout.footer,
                );
            }
        }
    }
}

// ── Layout ────────────────────────────────────────────────────────────────────

/// Panel rectangles for one frame.
///
/// Computed deterministically from the frame area so the mouse handler can
/// reproduce the same geometry without talking to the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PanelLayout {
    table: Rect,
    titles: Option<Rect>,
    chart: Rect,
    footer: Rect,
}

/// Split the frame: tables on top (drill-down beside the year table once a
/// selection exists), chart below, one footer line at the bottom.
fn compute_layout(area: Rect, show_titles: bool) -> PanelLayout {
    let [body, footer] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);
    let [top, chart] =
        Layout::vertical([Constraint::Percentage(60), Constraint::Percentage(40)]).areas(body);

    let (table, titles) = if show_titles {
        let [table, titles] =
            Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
                .areas(top);
        (table, Some(titles))
    } else {
        (top, None)
    };

    PanelLayout {
        table,
        titles,
        chart,
        footer,
    }
}

// ── Input mapping ─────────────────────────────────────────────────────────────

/// Translate a key press into an [`Action`].
fn map_key(code: KeyCode, modifiers: KeyModifiers, focus: Focus) -> Option<Action> {
    match code {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(Action::Quit),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Action::Reload),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::Dispatch(DashEvent::CursorUp)),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::Dispatch(DashEvent::CursorDown)),
        KeyCode::Enter => Some(Action::Dispatch(DashEvent::SelectRow)),
        KeyCode::Char('1') => Some(Action::Dispatch(DashEvent::SetSortField(SortField::Year))),
        KeyCode::Char('2') => Some(Action::Dispatch(DashEvent::SetSortField(
            SortField::TotalJobs,
        ))),
        KeyCode::Char('3') => Some(Action::Dispatch(DashEvent::SetSortField(
            SortField::AverageSalary,
        ))),
        KeyCode::Esc if focus == Focus::Titles => Some(Action::Dispatch(DashEvent::FocusTable)),
        _ => None,
    }
}

/// Map a click position to the year of the table row under it.
///
/// Row `offset` sits two lines below the table top (border + header);
/// clicks on the border, header, totals row, or anywhere outside the
/// table's row window resolve to `None`.
fn clicked_year(
    table: Rect,
    column: u16,
    row: u16,
    rows: &[YearSummary],
    offset: usize,
) -> Option<i32> {
    if column < table.x || column >= table.x.saturating_add(table.width) {
        return None;
    }
    let first_data_row = table.y.checked_add(2)?;
    if row < first_data_row {
        return None;
    }
    let screen_index = usize::from(row - first_data_row);
    // Reject the bottom border and anything below the table; panels
    // underneath share the same columns.
    if screen_index >= table_view::visible_rows(table.height) {
        return None;
    }
    rows.get(screen_index + offset).map(|summary| summary.year)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
