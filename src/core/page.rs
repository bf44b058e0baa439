// src/core/page.rs

use crate::core::render::{PriceRegion, ProductRegion, SentimentRegion};
use std::collections::VecDeque;

/// The page elements the session controller writes to.
///
/// A host provides one implementation per widget instance: the terminal host
/// uses [`Page`], and tests wrap it to observe the order of writes.
pub trait Surface {
    /// Uses the preview as the drop zone background and hides the prompt.
    fn show_preview(&mut self, data_uri: &str);
    /// Removes the background and restores the prompt.
    fn reset_drop_zone(&mut self);
    fn set_drag_over(&mut self, over: bool);
    fn set_loading(&mut self, visible: bool);
    fn set_results_visible(&mut self, visible: bool);
    fn replace_product(&mut self, region: ProductRegion);
    fn replace_prices(&mut self, region: PriceRegion);
    fn replace_sentiment(&mut self, region: SentimentRegion);
    /// Empties all three result regions.
    fn empty_regions(&mut self);
    /// Shows a blocking notification.
    fn notify(&mut self, message: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropZone {
    pub background: Option<String>,
    pub prompt_visible: bool,
    pub drag_over: bool,
}

impl Default for DropZone {
    fn default() -> Self {
        Self {
            background: None,
            prompt_visible: true,
            drag_over: false,
        }
    }
}

/// In-memory page: drop zone, loading indicator, results panel with its three
/// regions, and the queue of notifications waiting to be acknowledged.
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub drop_zone: DropZone,
    pub loading_visible: bool,
    pub results_visible: bool,
    pub product: Option<ProductRegion>,
    pub prices: PriceRegion,
    pub sentiment: Option<SentimentRegion>,
    notifications: VecDeque<String>,
}

impl Page {
    /// The notification currently blocking input, if any.
    pub fn notification(&self) -> Option<&str> {
        self.notifications.front().map(String::as_str)
    }

    /// Acknowledges the front notification; the next queued one, if any, takes its place.
    pub fn dismiss_notification(&mut self) -> Option<String> {
        self.notifications.pop_front()
    }

    pub fn regions_empty(&self) -> bool {
        self.product.is_none() && self.prices.cards.is_empty() && self.sentiment.is_none()
    }
}

impl Surface for Page {
    fn show_preview(&mut self, data_uri: &str) {
        self.drop_zone.background = Some(data_uri.to_string());
        self.drop_zone.prompt_visible = false;
    }

    fn reset_drop_zone(&mut self) {
        self.drop_zone.background = None;
        self.drop_zone.prompt_visible = true;
    }

    fn set_drag_over(&mut self, over: bool) {
        self.drop_zone.drag_over = over;
    }

    fn set_loading(&mut self, visible: bool) {
        self.loading_visible = visible;
    }

    fn set_results_visible(&mut self, visible: bool) {
        self.results_visible = visible;
    }

    fn replace_product(&mut self, region: ProductRegion) {
        self.product = Some(region);
    }

    fn replace_prices(&mut self, region: PriceRegion) {
        self.prices = region;
    }

    fn replace_sentiment(&mut self, region: SentimentRegion) {
        self.sentiment = Some(region);
    }

    fn empty_regions(&mut self) {
        self.product = None;
        self.prices = PriceRegion::default();
        self.sentiment = None;
    }

    fn notify(&mut self, message: &str) {
        self.notifications.push_back(message.to_string());
    }
}
