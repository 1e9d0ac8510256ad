use ratatui::style::{Color, Modifier, Style};

/// Terminal background type detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundType {
    Dark,
    Light,
    Unknown,
}

/// Detect terminal background type from the `COLORFGBG` environment variable.
///
/// The variable has the format `"foreground;background"`.  Background values
/// 0–6 are considered dark; 7–15 are considered light.  If the variable is
/// absent or unparseable, `BackgroundType::Dark` is returned as the safe
/// default.
pub fn detect_background() -> BackgroundType {
    if let Ok(val) = std::env::var("COLORFGBG") {
        if let Some(bg) = val.split(';').next_back() {
            if let Ok(bg_num) = bg.parse::<u8>() {
                return if bg_num <= 6 {
                    BackgroundType::Dark
                } else {
                    BackgroundType::Light
                };
            }
        }
    }
    BackgroundType::Dark
}

/// Complete theme definition carrying all styles used by the dashboard
/// panels.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Text ─────────────────────────────────────────────────────────────────
    pub text: Style,
    pub dim: Style,
    pub bold: Style,
    pub label: Style,

    // ── Status ───────────────────────────────────────────────────────────────
    pub info: Style,
    pub success: Style,
    pub warning: Style,
    pub error: Style,

    // ── Table ────────────────────────────────────────────────────────────────
    pub table_header: Style,
    pub table_border: Style,
    pub table_row: Style,
    pub table_row_alt: Style,
    pub table_total: Style,
    /// Highlighted cursor row in the year table.
    pub table_selected: Style,
    /// Border of the panel that currently owns focus.
    pub focused_border: Style,

    // ── Chart ────────────────────────────────────────────────────────────────
    pub chart_line: Style,
    pub chart_marker: Style,
    pub chart_axis: Style,
}

impl Theme {
    // ── Constructors ─────────────────────────────────────────────────────────

    /// Dark-background terminal theme (default).
    pub fn dark() -> Self {
        Self {
            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            bold: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            label: Style::default().fg(Color::Gray),

            info: Style::default().fg(Color::Cyan),
            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            table_header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            table_border: Style::default().fg(Color::DarkGray),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),
            table_total: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            table_selected: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            focused_border: Style::default().fg(Color::Cyan),

            chart_line: Style::default().fg(Color::Cyan),
            chart_marker: Style::default().fg(Color::Yellow),
            chart_axis: Style::default().fg(Color::Gray),
        }
    }

    /// Light-background terminal theme.
    pub fn light() -> Self {
        Self {
            text: Style::default().fg(Color::Black),
            dim: Style::default().fg(Color::Gray),
            bold: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            label: Style::default().fg(Color::DarkGray),

            info: Style::default().fg(Color::Blue),
            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Magenta),
            error: Style::default().fg(Color::Red),

            table_header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            table_border: Style::default().fg(Color::Gray),
            table_row: Style::default().fg(Color::Black),
            table_row_alt: Style::default().fg(Color::DarkGray),
            table_total: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            table_selected: Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            focused_border: Style::default().fg(Color::Blue),

            chart_line: Style::default().fg(Color::Blue),
            chart_marker: Style::default().fg(Color::Magenta),
            chart_axis: Style::default().fg(Color::DarkGray),
        }
    }

    /// High-contrast classic theme for terminals without good color support.
    pub fn classic() -> Self {
        Self {
            text: Style::default(),
            dim: Style::default().add_modifier(Modifier::DIM),
            bold: Style::default().add_modifier(Modifier::BOLD),
            label: Style::default(),

            info: Style::default(),
            success: Style::default().add_modifier(Modifier::BOLD),
            warning: Style::default().add_modifier(Modifier::BOLD),
            error: Style::default()
                .add_modifier(Modifier::BOLD)
                .add_modifier(Modifier::UNDERLINED),

            table_header: Style::default().add_modifier(Modifier::BOLD),
            table_border: Style::default(),
            table_row: Style::default(),
            table_row_alt: Style::default().add_modifier(Modifier::DIM),
            table_total: Style::default().add_modifier(Modifier::BOLD),
            table_selected: Style::default().add_modifier(Modifier::REVERSED),
            focused_border: Style::default().add_modifier(Modifier::BOLD),

            chart_line: Style::default(),
            chart_marker: Style::default().add_modifier(Modifier::BOLD),
            chart_axis: Style::default().add_modifier(Modifier::DIM),
        }
    }

    /// Resolve a theme name from settings.
    ///
    /// `"auto"` picks dark or light from the detected terminal background;
    /// unknown names fall back to dark.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "dark" => Self::dark(),
            "classic" => Self::classic(),
            _ => match detect_background() {
                BackgroundType::Light => Self::light(),
                _ => Self::dark(),
            },
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_known_themes() {
        // Just verify each constructor is wired; styles differ per theme.
        let dark = Theme::from_name("dark");
        let light = Theme::from_name("light");
        assert_ne!(dark.text, light.text);

        let classic = Theme::from_name("classic");
        assert_eq!(classic.text, Style::default());
    }

    #[test]
    fn test_from_name_unknown_does_not_panic() {
        let _ = Theme::from_name("neon");
    }

    #[test]
    fn test_detect_background_default_is_dark() {
        // COLORFGBG is rarely set in test environments; absent → Dark.
        if std::env::var("COLORFGBG").is_err() {
            assert_eq!(detect_background(), BackgroundType::Dark);
        }
    }
}
