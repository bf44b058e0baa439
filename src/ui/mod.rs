// src/ui/mod.rs

use pricelens::app::App;
use pricelens::core::render::Action;
use ratatui::prelude::*;

mod layout;
mod widgets;

/// Something on screen a mouse click can land on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    DropZone,
    Button(Action),
}

/// Clickable areas of the last drawn frame.
#[derive(Debug, Clone, Default)]
pub struct HitMap {
    drop_zone: Rect,
    buttons: Vec<(Action, Rect)>,
}

impl HitMap {
    pub fn target_at(&self, column: u16, row: u16) -> Option<Target> {
        let position = Position::new(column, row);
        if let Some((action, _)) = self.buttons.iter().find(|(_, area)| area.contains(position)) {
            return Some(Target::Button(*action));
        }
        self.drop_zone.contains(position).then_some(Target::DropZone)
    }
}

/// Draws the whole page and returns where its clickable parts ended up.
pub fn render(frame: &mut Frame, app: &App, tick: usize) -> HitMap {
    let area = frame.area();
    let layout = layout::create_layout(area);
    let page = &app.surface;

    widgets::drop_zone::render_drop_zone(frame, &page.drop_zone, layout.drop_zone);
    widgets::input::render_input(frame, &app.picker, layout.picker);
    let buttons = widgets::results::render_results(frame, page, tick, layout.results);
    widgets::footer::render_footer(frame, app, layout.footer);

    if let Some(message) = page.notification() {
        widgets::notification_popup::render_notification_popup(frame, message, area);
        // Nothing underneath a modal is clickable.
        return HitMap::default();
    }

    HitMap {
        drop_zone: layout.drop_zone,
        buttons,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricelens::core::page::{Page, Surface};
    use ratatui::{Terminal, backend::TestBackend};

    fn draw(app: &App) -> HitMap {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        let mut hits = HitMap::default();
        terminal.draw(|frame| hits = render(frame, app, 0)).unwrap();
        hits
    }

    #[test]
    fn clicks_on_the_drop_zone_are_detected() {
        let app = App::new(Page::default());
        let hits = draw(&app);
        assert_eq!(hits.target_at(10, 3), Some(Target::DropZone));
        assert_eq!(hits.target_at(10, 20), None);
    }

    #[test]
    fn notification_makes_page_inert() {
        let mut app = App::new(Page::default());
        app.surface.notify("Please upload an image first");
        let hits = draw(&app);
        assert_eq!(hits.target_at(10, 3), None);
    }

    #[test]
    fn buttons_win_over_drop_zone() {
        let hits = HitMap {
            drop_zone: Rect::new(0, 0, 20, 5),
            buttons: vec![(Action::Clear, Rect::new(2, 2, 9, 1))],
        };
        assert_eq!(hits.target_at(4, 2), Some(Target::Button(Action::Clear)));
        assert_eq!(hits.target_at(15, 2), Some(Target::DropZone));
    }
}
