//! Capability seams between the behavior logic and the browser environment.
//!
//! The reducers never touch `web_sys` directly; they consume geometry
//! snapshots taken per event tick and talk to collaborators through these
//! traits, so every behavior tests natively against fakes.

use crate::carousel::CarouselConfig;

/// Durable single-key preference storage (`localStorage` in the browser).
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

/// External grid-layout collaborator. Re-filters visible items by tag.
pub trait LayoutEngine {
    fn refilter(&self, tag: &str);
}

/// External carousel collaborator. Constructed once, never reconfigured.
pub trait CarouselEngine {
    fn start(&self, config: &CarouselConfig);
}

/// Viewport geometry sampled at one event tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub height: f64,
    pub scroll_y: f64,
}

/// One element's geometry at the same tick. `top` is viewport-relative.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElementMetrics {
    pub top: f64,
    pub height: f64,
}
