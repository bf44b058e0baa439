// src/ui/widgets/drop_zone.rs

use pricelens::core::page::DropZone;
use pricelens::core::preview;
use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

/// Renders the drop zone: the prompt until a preview has been read, then a
/// summary of the previewed image. The border lights up while something is
/// dragged over it.
pub fn render_drop_zone(frame: &mut Frame, zone: &DropZone, area: Rect) {
    let border_style = if zone.drag_over {
        Style::default().fg(Color::Cyan).bold()
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style)
        .title("Product Image");

    let text = match (&zone.background, zone.prompt_visible) {
        (Some(uri), false) => preview_lines(uri),
        _ => prompt_lines(zone.drag_over),
    };

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn prompt_lines(drag_over: bool) -> Text<'static> {
    if drag_over {
        return Text::from(vec![Line::from(""), Line::from("Release to upload".bold().cyan())]);
    }
    Text::from(vec![
        Line::from(""),
        Line::from("Drop an image here or click to upload".bold()),
        Line::from("PNG, JPG, JPEG or GIF".dark_gray()),
    ])
}

fn preview_lines(data_uri: &str) -> Text<'static> {
    let summary = match preview::describe(data_uri) {
        Some((media_type, size)) => format!("{} · {}", media_type, human_size(size)),
        None => "preview".to_string(),
    };
    Text::from(vec![
        Line::from(""),
        Line::from(Span::styled("▣ Image loaded", Style::default().fg(Color::Green).bold())),
        Line::from(Span::raw(summary).dark_gray()),
    ])
}

fn human_size(bytes: usize) -> String {
    match bytes {
        b if b >= 1024 * 1024 => format!("{:.1} MiB", b as f64 / (1024.0 * 1024.0)),
        b if b >= 1024 => format!("{:.1} KiB", b as f64 / 1024.0),
        b => format!("{} B", b),
    }
}
