//! Dashboard state snapshot and reducer.
//!
//! All interactive state lives in one immutable [`DashState`] value; every
//! input (load outcome, key press, mouse click) becomes a [`DashEvent`] and
//! flows through the pure [`reduce`] function. Views are derived from the
//! snapshot on demand, so there is no hidden dependency tracking and no
//! ambient mutable field anywhere in the UI.

use std::cmp::Ordering;

use dash_core::models::{LoadStats, TitleCount, YearSummary};
use dash_data::aggregator::AggregatedData;
use dash_runtime::loader::LoadOutcome;

// ── Phase ─────────────────────────────────────────────────────────────────────

/// Where the view is in its lifecycle: `Loading → Failed | Loaded`.
///
/// `Loaded` with an empty year set renders the empty-state panel; selection
/// is an orthogonal sub-state carried separately so it survives reloads.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    /// The load pipeline has not delivered an outcome yet.
    Loading,
    /// The load pipeline failed; carries the display message.
    Failed(String),
    /// Data is ready.
    Loaded {
        data: AggregatedData,
        stats: LoadStats,
    },
}

// ── Focus ─────────────────────────────────────────────────────────────────────

/// Which panel owns the visual focus.
///
/// Selecting a year moves focus to the drill-down panel in the same reducer
/// step; rendering is synchronous in the event loop, so the panel is visible
/// on the very next frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Table,
    Titles,
}

// ── Sorting ───────────────────────────────────────────────────────────────────

/// A sortable column of the year-summary table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Year,
    TotalJobs,
    AverageSalary,
}

impl SortField {
    /// Ascending comparator for this column.
    pub fn comparator(self) -> fn(&YearSummary, &YearSummary) -> Ordering {
        match self {
            SortField::Year => |a, b| a.year.cmp(&b.year),
            SortField::TotalJobs => |a, b| a.total_jobs.cmp(&b.total_jobs),
            SortField::AverageSalary => |a, b| {
                a.average_salary
                    .partial_cmp(&b.average_salary)
                    .unwrap_or(Ordering::Equal)
            },
        }
    }

    /// Column header label without the direction arrow.
    pub fn label(self) -> &'static str {
        match self {
            SortField::Year => "Year",
            SortField::TotalJobs => "Total Jobs",
            SortField::AverageSalary => "Average Salary (USD)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Active sort column and direction for the year table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            field: SortField::Year,
            direction: SortDirection::Ascending,
        }
    }
}

impl SortSpec {
    /// Resolve the `--sort` CLI value; unknown names fall back to year.
    pub fn from_name(name: &str) -> Self {
        let field = match name {
            "jobs" => SortField::TotalJobs,
            "salary" => SortField::AverageSalary,
            _ => SortField::Year,
        };
        Self {
            field,
            direction: SortDirection::Ascending,
        }
    }

    /// Re-selecting the active column flips direction; a new column starts
    /// ascending.
    pub fn toggled(self, field: SortField) -> Self {
        if self.field == field {
            let direction = match self.direction {
                SortDirection::Ascending => SortDirection::Descending,
                SortDirection::Descending => SortDirection::Ascending,
            };
            Self { field, direction }
        } else {
            Self {
                field,
                direction: SortDirection::Ascending,
            }
        }
    }
}

// ── DashState ─────────────────────────────────────────────────────────────────

/// Immutable snapshot of everything the dashboard renders from.
#[derive(Debug, Clone, PartialEq)]
pub struct DashState {
    /// View lifecycle phase.
    pub phase: Phase,
    /// The currently drilled-into year, or `None` before the first selection.
    /// Never auto-reverted; overwritten unconditionally on every selection.
    pub selection: Option<i32>,
    /// Active sort for the year table.
    pub sort: SortSpec,
    /// Highlighted row index within the sorted year table.
    pub cursor: usize,
    /// Panel focus.
    pub focus: Focus,
}

impl DashState {
    /// Initial state: loading, nothing selected, sort from settings.
    pub fn new(sort: SortSpec) -> Self {
        Self {
            phase: Phase::Loading,
            selection: None,
            sort,
            cursor: 0,
            focus: Focus::Table,
        }
    }

    /// Year summaries in the current display order.
    ///
    /// Pure derivation: recomputed from the snapshot on every call.
    pub fn sorted_summaries(&self) -> Vec<YearSummary> {
        let Phase::Loaded { data, .. } = &self.phase else {
            return Vec::new();
        };
        let mut rows = data.year_summaries.clone();
        let cmp = self.sort.field.comparator();
        match self.sort.direction {
            SortDirection::Ascending => rows.sort_by(cmp),
            SortDirection::Descending => rows.sort_by(|a, b| cmp(b, a)),
        }
        rows
    }

    /// Title counts for the selected year; empty when nothing is selected or
    /// the selected year has no records.
    pub fn selected_titles(&self) -> &[TitleCount] {
        match (&self.phase, self.selection) {
            (Phase::Loaded { data, .. }, Some(year)) => data.titles_for_year(year),
            _ => &[],
        }
    }

    /// Number of rows in the year table.
    fn row_count(&self) -> usize {
        match &self.phase {
            Phase::Loaded { data, .. } => data.year_summaries.len(),
            _ => 0,
        }
    }
}

// ── DashEvent ─────────────────────────────────────────────────────────────────

/// Every input the dashboard reacts to.
#[derive(Debug, Clone)]
pub enum DashEvent {
    /// A (re)load run was kicked off.
    LoadStarted,
    /// The load pipeline delivered its outcome.
    LoadFinished(LoadOutcome),
    /// Move the table cursor up one row.
    CursorUp,
    /// Move the table cursor down one row.
    CursorDown,
    /// Select the year under the cursor (Enter).
    SelectRow,
    /// Select an explicit year (mouse click on a row).
    SelectYear(i32),
    /// Toggle sorting on a column.
    SetSortField(SortField),
    /// Return focus to the year table (Esc).
    FocusTable,
}

// ── Reducer ───────────────────────────────────────────────────────────────────

/// Pure state transition: `(state, event) -> state`.
pub fn reduce(mut state: DashState, event: DashEvent) -> DashState {
    match event {
        DashEvent::LoadStarted => {
            state.phase = Phase::Loading;
            // Selection and sort survive a reload.
            state
        }
        DashEvent::LoadFinished(outcome) => {
            state.phase = match outcome {
                LoadOutcome::Loaded { data, stats } => Phase::Loaded { data, stats },
                LoadOutcome::Failed { error } => Phase::Failed(error),
            };
            state.cursor = clamp_cursor(state.cursor, state.row_count());
            state
        }
        DashEvent::CursorUp => {
            state.cursor = state.cursor.saturating_sub(1);
            state
        }
        DashEvent::CursorDown => {
            state.cursor = clamp_cursor(state.cursor + 1, state.row_count());
            state
        }
        DashEvent::SelectRow => {
            let rows = state.sorted_summaries();
            if let Some(row) = rows.get(state.cursor) {
                state.selection = Some(row.year);
                state.focus = Focus::Titles;
            }
            state
        }
        DashEvent::SelectYear(year) => {
            // No validation that the year exists; an absent year simply
            // derives an empty title list.
            state.selection = Some(year);
            state.focus = Focus::Titles;
            state
        }
        DashEvent::SetSortField(field) => {
            state.sort = state.sort.toggled(field);
            state.cursor = clamp_cursor(state.cursor, state.row_count());
            state
        }
        DashEvent::FocusTable => {
            state.focus = Focus::Table;
            state
        }
    }
}

/// Keep the cursor inside the table (0 for an empty table).
fn clamp_cursor(cursor: usize, rows: usize) -> usize {
    if rows == 0 {
        0
    } else {
        cursor.min(rows - 1)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
