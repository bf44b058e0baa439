// src/core/render.rs

//! Turns an analysis result into the three result regions.
//!
//! Rendering is a pure function of the payload: nothing here looks at what a
//! region showed before. Each region is a typed view the terminal host draws
//! directly, and can also be written out as an HTML fragment for a browser
//! page. The fragments are produced with `maud`, so product names, sites and
//! reviews coming from the service are escaped.

use crate::core::models::AnalysisResult;
use maud::{Markup, html};
use strum::Display;

pub const CURRENCY_PREFIX: &str = "$";
pub const RATING_MARKER: &str = "★";
pub const PRODUCT_CAPTION: &str = "Price comparison and analysis results";

/// The controls always shown under the product name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Reanalyze,
    Clear,
}

impl Action {
    pub fn label(self) -> &'static str {
        match self {
            Action::Reanalyze => "Reanalyze",
            Action::Clear => "Clear",
        }
    }

    /// Class and `data-action` value of the button in page markup.
    pub fn key(self) -> &'static str {
        match self {
            Action::Reanalyze => "reanalyze",
            Action::Clear => "clear",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductRegion {
    pub name: String,
    pub caption: &'static str,
    pub actions: [Action; 2],
}

#[derive(Debug, Clone, PartialEq)]
pub struct PriceCard {
    pub site: String,
    pub price: String,
    pub rating: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PriceRegion {
    pub cards: Vec<PriceCard>,
}

/// Colour bucket for the satisfaction percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum SentimentTier {
    Positive,
    Neutral,
    Negative,
}

impl SentimentTier {
    /// Both thresholds are strict, so exactly `70.0` is neutral and exactly
    /// `40.0` is negative.
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage > 70.0 {
            SentimentTier::Positive
        } else if percentage > 40.0 {
            SentimentTier::Neutral
        } else {
            SentimentTier::Negative
        }
    }

    pub fn hex(self) -> &'static str {
        match self {
            SentimentTier::Positive => "#4CAF50",
            SentimentTier::Neutral => "#FFC107",
            SentimentTier::Negative => "#F44336",
        }
    }

    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            SentimentTier::Positive => (0x4c, 0xaf, 0x50),
            SentimentTier::Neutral => (0xff, 0xc1, 0x07),
            SentimentTier::Negative => (0xf4, 0x43, 0x36),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SentimentRegion {
    /// Score as a percentage with one decimal, without the `%` sign.
    pub percentage: String,
    pub tier: SentimentTier,
    pub reviews: Vec<String>,
}

impl SentimentRegion {
    pub fn headline(&self) -> String {
        format!("Customer Satisfaction: {}%", self.percentage)
    }
}

/// All three regions for one result.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedResult {
    pub product: ProductRegion,
    pub prices: PriceRegion,
    pub sentiment: SentimentRegion,
}

pub fn render_result(result: &AnalysisResult) -> RenderedResult {
    RenderedResult {
        product: render_product(&result.product),
        prices: render_prices(result),
        sentiment: render_sentiment(result.sentiment.score, &result.sentiment.reviews),
    }
}

pub fn render_product(name: &str) -> ProductRegion {
    ProductRegion {
        name: name.to_string(),
        caption: PRODUCT_CAPTION,
        actions: [Action::Reanalyze, Action::Clear],
    }
}

/// Cards keep the order the service sent them in.
pub fn render_prices(result: &AnalysisResult) -> PriceRegion {
    PriceRegion {
        cards: result
            .prices
            .iter()
            .map(|quote| PriceCard {
                site: quote.site.clone(),
                price: format_price(quote.price),
                rating: format_rating(quote.rating),
            })
            .collect(),
    }
}

pub fn render_sentiment(score: f64, reviews: &[String]) -> SentimentRegion {
    let percentage = format_percentage(score);
    // The tier is read off the rounded text, not the raw score.
    let rounded = percentage.parse::<f64>().unwrap_or(score * 100.0);
    SentimentRegion {
        tier: SentimentTier::from_percentage(rounded),
        percentage,
        reviews: reviews.to_vec(),
    }
}

pub fn format_price(price: f64) -> String {
    format!("{}{}", CURRENCY_PREFIX, to_fixed(price, 2))
}

pub fn format_rating(rating: f64) -> String {
    format!("{} {}", RATING_MARKER, to_fixed(rating, 1))
}

pub fn format_percentage(score: f64) -> String {
    to_fixed(score * 100.0, 1)
}

// Enough fractional digits to print any f64 exactly.
const EXACT_DIGITS: usize = 1100;

/// Fixed-point text with exact ties rounded away from zero.
///
/// `format!` rounds a value sitting exactly halfway between two candidates to
/// the even one, so `4.25` would print as `4.2`. Such a value is moved one ulp
/// away from zero first; values that only look like ties in decimal (`1.005`
/// is stored as `1.00499...`) are left alone and round down.
pub fn to_fixed(value: f64, digits: usize) -> String {
    if !value.is_finite() || !is_exact_tie(value, digits) {
        return format!("{:.*}", digits, value);
    }
    let nudged = f64::from_bits(value.abs().to_bits() + 1);
    let text = format!("{:.*}", digits, nudged);
    if value.is_sign_negative() { format!("-{}", text) } else { text }
}

fn is_exact_tie(value: f64, digits: usize) -> bool {
    let exact = format!("{:.*}", EXACT_DIGITS, value.abs());
    let Some((_, fraction)) = exact.split_once('.') else {
        return false;
    };
    let mut rest = fraction.bytes().skip(digits);
    rest.next() == Some(b'5') && rest.all(|b| b == b'0')
}

// --- HTML fragments ---

impl ProductRegion {
    pub fn to_html(&self) -> Markup {
        html! {
            h2 { (self.name) }
            p { (self.caption) }
            div class="action-buttons" {
                @for action in &self.actions {
                    @let class = format!("action-button {}", action.key());
                    button class=(class) data-action=(action.key()) { (action.label()) }
                }
            }
        }
    }
}

impl PriceRegion {
    pub fn to_html(&self) -> Markup {
        html! {
            @for card in &self.cards {
                div class="price-card" {
                    span class="price-card__site" { (card.site) }
                    span class="price-card__price" { (card.price) }
                    span class="price-card__rating" { (card.rating) }
                }
            }
        }
    }
}

impl SentimentRegion {
    pub fn to_html(&self) -> Markup {
        let style = format!("color: {}", self.tier.hex());
        html! {
            div class="sentiment-analysis" {
                div class="sentiment-score" style=(style) { (self.headline()) }
                div class="reviews" {
                    @for review in &self.reviews {
                        div class="review" { (review) }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{PriceQuote, Sentiment};
    use scraper::{Html, Selector};

    fn result(prices: Vec<(&str, f64, f64)>, score: f64, reviews: &[&str]) -> AnalysisResult {
        AnalysisResult {
            product: "Running Shoe".to_string(),
            prices: prices
                .into_iter()
                .map(|(site, price, rating)| PriceQuote { site: site.to_string(), price, rating })
                .collect(),
            sentiment: Sentiment {
                score,
                reviews: reviews.iter().map(|r| r.to_string()).collect(),
            },
        }
    }

    fn select_texts(fragment: &str, selector: &str) -> Vec<String> {
        let doc = Html::parse_fragment(fragment);
        let selector = Selector::parse(selector).unwrap();
        doc.select(&selector).map(|e| e.text().collect::<String>()).collect()
    }

    #[test]
    fn price_and_rating_formatting() {
        assert_eq!(format_price(9.5), "$9.50");
        assert_eq!(format_price(0.0), "$0.00");
        assert_eq!(format_price(1299.0), "$1299.00");
        assert_eq!(format_rating(4.0), "★ 4.0");
        assert_eq!(format_rating(3.86), "★ 3.9");
    }

    #[test]
    fn exact_ties_round_up() {
        assert_eq!(format_rating(4.25), "★ 4.3");
        assert_eq!(format_rating(4.75), "★ 4.8");
        assert_eq!(format_price(9.125), "$9.13");
        assert_eq!(format_price(0.125), "$0.13");
        assert_eq!(format_percentage(0.5625), "56.3");
        assert_eq!(to_fixed(-2.25, 1), "-2.3");
    }

    #[test]
    fn near_ties_follow_the_stored_value() {
        // 1.005 and 2.675 are stored just below the halfway point.
        assert_eq!(format_price(1.005), "$1.00");
        assert_eq!(format_price(2.675), "$2.67");
        assert_eq!(format_rating(4.35), "★ 4.3");
        assert_eq!(to_fixed(4.2, 1), "4.2");
    }

    #[test]
    fn sentiment_tier_boundaries_are_strict() {
        let at_seventy = render_sentiment(0.70, &[]);
        assert_eq!(at_seventy.percentage, "70.0");
        assert_eq!(at_seventy.tier, SentimentTier::Neutral);

        let above_seventy = render_sentiment(0.701, &[]);
        assert_eq!(above_seventy.percentage, "70.1");
        assert_eq!(above_seventy.tier, SentimentTier::Positive);

        assert_eq!(render_sentiment(0.40, &[]).tier, SentimentTier::Negative);
        assert_eq!(render_sentiment(0.401, &[]).tier, SentimentTier::Neutral);
        assert_eq!(render_sentiment(0.0, &[]).tier, SentimentTier::Negative);
        assert_eq!(render_sentiment(1.0, &[]).percentage, "100.0");
    }

    #[test]
    fn tier_follows_rounded_value_not_raw_score() {
        // 0.70004 is above 0.70 but rounds to 70.0.
        let region = render_sentiment(0.70004, &[]);
        assert_eq!(region.percentage, "70.0");
        assert_eq!(region.tier, SentimentTier::Neutral);
    }

    #[test]
    fn cards_keep_input_order() {
        let rendered = render_result(&result(
            vec![("Myntra", 40.0, 4.9), ("Amazon", 19.99, 3.0), ("Flipkart", 25.5, 4.2)],
            0.5,
            &[],
        ));
        let sites: Vec<_> = rendered.prices.cards.iter().map(|c| c.site.as_str()).collect();
        assert_eq!(sites, ["Myntra", "Amazon", "Flipkart"]);
        assert_eq!(rendered.prices.cards[2].price, "$25.50");
    }

    #[test]
    fn empty_prices_and_reviews_render_empty_regions() {
        let rendered = render_result(&result(vec![], 0.0, &[]));
        assert!(rendered.prices.cards.is_empty());
        assert!(rendered.sentiment.reviews.is_empty());
        assert_eq!(rendered.prices.to_html().into_string(), "");

        let sentiment_html = rendered.sentiment.to_html().into_string();
        assert!(select_texts(&sentiment_html, ".review").is_empty());
        assert_eq!(select_texts(&sentiment_html, ".sentiment-score"), ["Customer Satisfaction: 0.0%"]);
    }

    #[test]
    fn product_region_always_has_both_actions() {
        let html = render_product("Mug").to_html().into_string();
        assert_eq!(select_texts(&html, "h2"), ["Mug"]);
        assert_eq!(select_texts(&html, "p"), [PRODUCT_CAPTION]);
        assert_eq!(select_texts(&html, ".action-button.reanalyze[data-action=reanalyze]"), ["Reanalyze"]);
        assert_eq!(select_texts(&html, ".action-button.clear[data-action=clear]"), ["Clear"]);
        assert!(!html.contains("onclick"));
    }

    #[test]
    fn price_cards_markup() {
        let rendered = render_result(&result(vec![("Amazon", 9.5, 4.0)], 0.9, &[]));
        let html = rendered.prices.to_html().into_string();
        assert_eq!(select_texts(&html, ".price-card").len(), 1);
        assert_eq!(select_texts(&html, ".price-card__site"), ["Amazon"]);
        assert_eq!(select_texts(&html, ".price-card__price"), ["$9.50"]);
        assert_eq!(select_texts(&html, ".price-card__rating"), ["★ 4.0"]);
    }

    #[test]
    fn sentiment_markup_carries_tier_colour_and_reviews() {
        let rendered = render_result(&result(vec![], 0.82, &["Great quality!", "Perfect fit!"]));
        let html = rendered.sentiment.to_html().into_string();
        assert!(html.contains("color: #4CAF50"));
        assert_eq!(select_texts(&html, ".reviews .review"), ["Great quality!", "Perfect fit!"]);
    }

    #[test]
    fn service_text_is_escaped() {
        let mut payload = result(vec![("<b>Shop</b>", 1.0, 1.0)], 0.1, &["<script>alert(1)</script>"]);
        payload.product = "<img src=x onerror=alert(1)>".to_string();
        let rendered = render_result(&payload);

        let product = rendered.product.to_html().into_string();
        assert!(product.contains("&lt;img"));
        assert!(!product.contains("<img"));
        assert!(!rendered.prices.to_html().into_string().contains("<b>"));
        assert!(!rendered.sentiment.to_html().into_string().contains("<script>"));
    }
}
