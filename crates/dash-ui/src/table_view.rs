//! Year-summary table and the full-frame status panels.
//!
//! Renders a bordered [`ratatui::widgets::Table`] with one row per year plus
//! a highlighted totals row at the bottom, and the loading / empty / failed
//! placeholder panels shown before data is available.

use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use dash_core::formatting;
use dash_core::models::YearSummary;

use crate::state::{SortDirection, SortField, SortSpec};
use crate::themes::Theme;

// ── SummaryTotals ─────────────────────────────────────────────────────────────

/// Aggregated totals across all year rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryTotals {
    /// Job count across all years.
    pub total_jobs: u64,
    /// Job-weighted mean salary across all years.
    pub average_salary: f64,
}

impl SummaryTotals {
    /// Compute totals from the year summaries.
    ///
    /// The overall average weights each year by its job count, so it equals
    /// total salary over total jobs. Zero rows yield a zero average.
    pub fn from_summaries(summaries: &[YearSummary]) -> Self {
        let total_jobs: u64 = summaries.iter().map(|s| u64::from(s.total_jobs)).sum();
        let total_salary: f64 = summaries
            .iter()
            .map(|s| s.average_salary * f64::from(s.total_jobs))
            .sum();
        let average_salary = if total_jobs == 0 {
            0.0
        } else {
            total_salary / total_jobs as f64
        };
        Self {
            total_jobs,
            average_salary,
        }
    }
}

// ── Scrolling ─────────────────────────────────────────────────────────────────

/// Number of rows the table panel can show at once.
///
/// Borders take two lines and the header one, so the interior row window is
/// the panel height minus three.
pub fn visible_rows(panel_height: u16) -> usize {
    usize::from(panel_height.saturating_sub(3))
}

/// Index of the first row shown when the cursor must stay on screen.
///
/// Zero until the cursor walks past the row window, then scrolls just far
/// enough to keep the cursor on the last visible line. Shared with the mouse
/// handler so clicks and rendering agree on which rows are where.
pub fn scroll_offset(cursor: usize, capacity: usize) -> usize {
    if capacity == 0 {
        0
    } else {
        cursor.saturating_sub(capacity - 1)
    }
}

// ── Rendering ─────────────────────────────────────────────────────────────────

/// Render the year-summary table into `area`.
///
/// `rows` must already be in display order; `cursor` highlights one row and
/// the totals row is appended at the bottom. The active sort column carries a
/// direction arrow in its header.
pub fn render_summary_table(
    frame: &mut Frame,
    area: Rect,
    rows: &[YearSummary],
    totals: &SummaryTotals,
    cursor: usize,
    sort: SortSpec,
    focused: bool,
    theme: &Theme,
) {
    let header_cells = [
        SortField::Year,
        SortField::TotalJobs,
        SortField::AverageSalary,
    ]
    .into_iter()
    .map(|field| Cell::from(column_header(field, sort)).style(theme.table_header));
    let header = Row::new(header_cells).height(1);

    let data_rows: Vec<Row> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let style = if i == cursor {
                theme.table_selected
            } else if i % 2 == 0 {
                theme.table_row
            } else {
                theme.table_row_alt
            };
            Row::new(vec![
                Cell::from(row.year.to_string()),
                Cell::from(formatting::format_number(f64::from(row.total_jobs), 0)),
                Cell::from(formatting::format_currency(row.average_salary)),
            ])
            .style(style)
        })
        .collect();

    // Totals row – styled separately to stand out.
    let total_row = Row::new(vec![
        Cell::from("TOTAL"),
        Cell::from(formatting::format_number(totals.total_jobs as f64, 0)),
        Cell::from(formatting::format_currency(totals.average_salary)),
    ])
    .style(theme.table_total);

    let mut all_rows = data_rows;
    all_rows.push(total_row);

    let widths = [
        Constraint::Length(8),
        Constraint::Length(12),
        Constraint::Length(24),
    ];

    let border_style = if focused {
        theme.focused_border
    } else {
        theme.table_border
    };

    let table = Table::new(all_rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(" Salaries by Year "),
        )
        .style(theme.text);

    // Scroll so the cursor row stays visible when the year count exceeds
    // the panel height.
    let offset = scroll_offset(cursor, visible_rows(area.height));
    let mut table_state = TableState::default().with_offset(offset);
    frame.render_stateful_widget(table, area, &mut table_state);
}

/// Render the waiting indicator shown while the dataset is loading.
pub fn render_loading(frame: &mut Frame, area: Rect, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("Loading salary data...", theme.info)),
        Line::from(""),
        Line::from(Span::styled("Press 'q' or Ctrl+C to exit", theme.dim)),
    ];
    frame.render_widget(
        Paragraph::new(ratatui::text::Text::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" ML Engineer Salaries "),
        ),
        area,
    );
}

/// Render the empty-state panel shown when the loaded dataset has no years.
pub fn render_no_data(frame: &mut Frame, area: Rect, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("No salary data available.", theme.warning)),
        Line::from(""),
        Line::from(Span::styled(
            "Check that the data file has rows below its header.",
            theme.dim,
        )),
        Line::from(Span::styled(
            "Press 'r' to reload, 'q' or Ctrl+C to exit",
            theme.dim,
        )),
    ];
    frame.render_widget(
        Paragraph::new(ratatui::text::Text::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" ML Engineer Salaries "),
        ),
        area,
    );
}

/// Render the failure panel shown when the load pipeline reported an error.
pub fn render_load_failed(frame: &mut Frame, area: Rect, message: &str, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("Failed to load salary data", theme.error)),
        Line::from(""),
        Line::from(Span::styled(message.to_string(), theme.text)),
        Line::from(""),
        Line::from(Span::styled(
            "Press 'r' to retry, 'q' or Ctrl+C to exit",
            theme.dim,
        )),
    ];
    frame.render_widget(
        Paragraph::new(ratatui::text::Text::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" ML Engineer Salaries "),
        ),
        area,
    );
}

// ── Private helpers ───────────────────────────────────────────────────────────

/// Column label, with a direction arrow on the active sort column.
fn column_header(field: SortField, sort: SortSpec) -> String {
    if sort.field == field {
        let arrow = match sort.direction {
            SortDirection::Ascending => "↑",
            SortDirection::Descending => "↓",
        };
        format!("{} {}", field.label(), arrow)
    } else {
        field.label().to_string()
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
