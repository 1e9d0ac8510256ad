//! Drill-down panel: job-title counts for the selected year.
//!
//! Shown only after a year has been selected. A selected year with no
//! records renders an explicit empty-state message instead of a table.

use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use dash_core::formatting;
use dash_core::models::TitleCount;

use crate::themes::Theme;

/// Render the job-title breakdown for `year` into `area`.
///
/// Dispatches to the empty-state message when `titles` is empty.
pub fn render_title_panel(
    frame: &mut Frame,
    area: Rect,
    year: i32,
    titles: &[TitleCount],
    focused: bool,
    theme: &Theme,
) {
    if titles.is_empty() {
        render_no_titles(frame, area, year, theme);
        return;
    }

    let header = Row::new([
        Cell::from("Job Title").style(theme.table_header),
        Cell::from("Count").style(theme.table_header),
    ])
    .height(1);

    let data_rows: Vec<Row> = titles
        .iter()
        .enumerate()
        .map(|(i, title)| {
            let style = if i % 2 == 0 {
                theme.table_row
            } else {
                theme.table_row_alt
            };
            Row::new(vec![
                Cell::from(title.title.clone()),
                Cell::from(formatting::format_number(f64::from(title.count), 0)),
            ])
            .style(style)
        })
        .collect();

    let widths = [Constraint::Min(24), Constraint::Length(10)];

    let border_style = if focused {
        theme.focused_border
    } else {
        theme.table_border
    };

    let table = Table::new(data_rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(format!(" Job Titles for {} ", year)),
        )
        .style(theme.text);

    frame.render_widget(table, area);
}

/// Render the empty-state message for a selected year with no titles.
fn render_no_titles(frame: &mut Frame, area: Rect, year: i32, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("No job titles available for {}", year),
            theme.warning,
        )),
    ];
    frame.render_widget(
        Paragraph::new(ratatui::text::Text::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Job Titles for {} ", year)),
        ),
        area,
    );
}

// ── Tests ──────────────────────────────────────────────────────────────────────
