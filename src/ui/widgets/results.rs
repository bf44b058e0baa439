// src/ui/widgets/results.rs

use pricelens::core::page::Page;
use pricelens::core::render::{Action, PriceRegion, ProductRegion, SentimentRegion};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, List, ListItem, Paragraph, Row, Table, Wrap},
};

pub const SPINNER_CHARS: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Where the action buttons were drawn, for mouse hit-testing.
pub type ButtonAreas = Vec<(Action, Rect)>;

/// Renders the results panel: a spinner while an upload is in flight, the
/// three regions while results are visible, a placeholder otherwise.
pub fn render_results(frame: &mut Frame, page: &Page, tick: usize, area: Rect) -> ButtonAreas {
    let main_block = Block::default().borders(Borders::ALL).title("Analysis");

    if page.loading_visible {
        let spinner_char = SPINNER_CHARS[tick % SPINNER_CHARS.len()];
        let content = Paragraph::new(Line::from(vec![
            Span::styled(format!("{} ", spinner_char), Style::default().fg(Color::Cyan)),
            Span::raw("Analyzing image..."),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(content.block(main_block), area);
        return Vec::new();
    }

    if !page.results_visible {
        let content = Paragraph::new("Results will appear here.".dark_gray()).alignment(Alignment::Center);
        frame.render_widget(content.block(main_block), area);
        return Vec::new();
    }

    let inner_area = main_block.inner(area);
    frame.render_widget(main_block, area);

    let price_rows = page.prices.cards.len().max(1) as u16 + 3;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(price_rows),
            Constraint::Min(0),
        ])
        .split(inner_area);

    let buttons = match &page.product {
        Some(product) => render_product(frame, product, chunks[0]),
        None => Vec::new(),
    };
    render_prices(frame, &page.prices, chunks[1]);
    if let Some(sentiment) = &page.sentiment {
        render_sentiment(frame, sentiment, chunks[2]);
    }
    buttons
}

fn render_product(frame: &mut Frame, product: &ProductRegion, area: Rect) -> ButtonAreas {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    frame.render_widget(Paragraph::new(product.name.as_str().bold()), rows[0]);
    frame.render_widget(Paragraph::new(product.caption.dark_gray()), rows[1]);

    let mut buttons = Vec::with_capacity(product.actions.len());
    let mut x = rows[3].x;
    for action in product.actions {
        let label = format!("[ {} ]", action.label());
        let width = (label.chars().count() as u16).min(rows[3].right().saturating_sub(x));
        let button_area = Rect::new(x, rows[3].y, width, 1);
        let style = match action {
            Action::Reanalyze => Style::default().fg(Color::Black).bg(Color::Cyan),
            Action::Clear => Style::default().fg(Color::Black).bg(Color::Gray),
        };
        frame.render_widget(Paragraph::new(label).style(style), button_area);
        buttons.push((action, button_area));
        x = x.saturating_add(width + 2);
    }
    buttons
}

fn render_prices(frame: &mut Frame, prices: &PriceRegion, area: Rect) {
    let block = Block::default().borders(Borders::TOP).title("Price Comparison");
    // No offers leaves the region blank under its title.
    if prices.cards.is_empty() {
        frame.render_widget(block, area);
        return;
    }

    let rows: Vec<Row> = prices
        .cards
        .iter()
        .map(|card| {
            Row::new(vec![
                Cell::from(card.site.as_str()),
                Cell::from(card.price.as_str().green()),
                Cell::from(card.rating.as_str().yellow()),
            ])
        })
        .collect();
    let table = Table::new(rows, [Constraint::Percentage(50), Constraint::Percentage(25), Constraint::Percentage(25)])
        .header(Row::new(vec!["Site", "Price", "Rating"]).style(Style::default().bold()))
        .block(block);
    frame.render_widget(table, area);
}

fn render_sentiment(frame: &mut Frame, sentiment: &SentimentRegion, area: Rect) {
    let block = Block::default().borders(Borders::TOP).title("Sentiment Analysis");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(inner);

    let (r, g, b) = sentiment.tier.rgb();
    let headline = Paragraph::new(Line::from(Span::styled(
        sentiment.headline(),
        Style::default().fg(Color::Rgb(r, g, b)).bold(),
    )))
    .wrap(Wrap { trim: true });
    frame.render_widget(headline, chunks[0]);

    let items: Vec<ListItem> = sentiment
        .reviews
        .iter()
        .map(|review| ListItem::new(Line::from(vec![Span::raw("• ").dark_gray(), Span::raw(review.as_str())])))
        .collect();
    frame.render_widget(List::new(items).block(Block::default().title("Recent Reviews")), chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricelens::core::models::{AnalysisResult, PriceQuote, Sentiment};
    use pricelens::core::page::Surface;
    use pricelens::core::render::render_result;
    use ratatui::{Terminal, backend::TestBackend};

    fn page_with_result() -> Page {
        let rendered = render_result(&AnalysisResult {
            product: "Running Shoe".into(),
            prices: vec![PriceQuote { site: "Amazon".into(), price: 9.5, rating: 4.0 }],
            sentiment: Sentiment { score: 0.85, reviews: vec!["Great fit".into()] },
        });
        let mut page = Page::default();
        page.set_results_visible(true);
        page.replace_product(rendered.product);
        page.replace_prices(rendered.prices);
        page.replace_sentiment(rendered.sentiment);
        page
    }

    fn draw(page: &Page) -> (String, ButtonAreas) {
        let mut terminal = Terminal::new(TestBackend::new(60, 24)).unwrap();
        let mut buttons = Vec::new();
        terminal
            .draw(|frame| {
                let area = frame.area();
                buttons = render_results(frame, page, 0, area);
            })
            .unwrap();
        let text = terminal.backend().buffer().content().iter().map(|c| c.symbol()).collect();
        (text, buttons)
    }

    #[test]
    fn draws_regions_and_reports_buttons() {
        let (text, buttons) = draw(&page_with_result());
        assert!(text.contains("Running Shoe"));
        assert!(text.contains("$9.50"));
        assert!(text.contains("Customer Satisfaction: 85.0%"));
        assert!(text.contains("Great fit"));
        let actions: Vec<Action> = buttons.iter().map(|(a, _)| *a).collect();
        assert_eq!(actions, [Action::Reanalyze, Action::Clear]);
        assert!(buttons[0].1.right() < buttons[1].1.x);
    }

    #[test]
    fn empty_prices_draw_an_empty_region() {
        let mut page = page_with_result();
        page.replace_prices(PriceRegion::default());
        let (text, buttons) = draw(&page);
        assert!(text.contains("Price Comparison"));
        assert!(!text.contains("Site"));
        assert!(!text.contains("No offers"));
        assert!(text.contains("Customer Satisfaction: 85.0%"));
        assert_eq!(buttons.len(), 2);
    }

    #[test]
    fn loading_hides_regions_and_buttons() {
        let mut page = page_with_result();
        page.set_loading(true);
        let (text, buttons) = draw(&page);
        assert!(text.contains("Analyzing image..."));
        assert!(!text.contains("Running Shoe"));
        assert!(buttons.is_empty());
    }
}
