// src/ui/widgets/footer.rs

use pricelens::app::App;
use ratatui::{
    prelude::*,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

fn key(label: &str) -> Span<'_> {
    Span::styled(label, Style::new().bold().fg(Color::Yellow))
}

/// Renders the footer with the keys that do something right now.
pub fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let line = if app.surface.notification().is_some() {
        Line::from(vec![Span::raw("Press "), key("Enter"), Span::raw(" to dismiss.")])
    } else if app.picker.open {
        Line::from(vec![
            key("Enter"),
            Span::raw(" load, "),
            key("Esc"),
            Span::raw(" cancel"),
        ])
    } else {
        Line::from(vec![
            key("[O]"),
            Span::raw("pen, "),
            key("[R]"),
            Span::raw("eanalyze, "),
            key("[C]"),
            Span::raw("lear, "),
            key("[Q]"),
            Span::raw("uit"),
            Span::raw(format!("  ·  {}", app.state())).dark_gray(),
        ])
    };

    let footer = Paragraph::new(line).alignment(Alignment::Center);
    frame.render_widget(footer, area);
}
