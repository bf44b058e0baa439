// src/ui/widgets/input.rs

use pricelens::core::picker::Picker;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

/// Renders the path input. It reads as a file input: the last chosen path
/// stays visible, and typing is possible only while the picker is open.
pub fn render_input(frame: &mut Frame, picker: &Picker, area: Rect) {
    let (title, style) = if picker.open {
        ("Image path (Enter to load, Esc to cancel)", Style::default().fg(Color::Yellow))
    } else {
        ("Image path", Style::default().fg(Color::Gray))
    };
    let input_paragraph = Paragraph::new(picker.input.as_str())
        .block(Block::default().borders(Borders::ALL).title(title))
        .style(style);
    frame.render_widget(input_paragraph, area);

    if picker.open {
        let width = picker.input.chars().count() as u16;
        let max_x = area.right().saturating_sub(2);
        frame.set_cursor_position(Position::new((area.x + 1 + width).min(max_x), area.y + 1));
    }
}
