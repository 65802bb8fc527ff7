// Surface - the browser automation runtime as seen by the harness
//
// Resolution, snapshots and scenarios only talk to a page through this
// trait. `PageSurface` implements it on top of Playwright; unit tests use an
// in-memory page.
//
// Elements are addressed by (selector, index). The runtime re-evaluates the
// selector on every call, so a handle is only as fresh as the last read.

use crate::error::Result;
use crate::strategy::Strategy;
use crate::viewport::Viewport;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Element box in CSS pixels, relative to the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A resolved element: the `index`-th match of the winning candidate.
///
/// Visibility is guaranteed only at the moment resolution returned. After a
/// navigation, viewport change or any DOM update the element has to be
/// resolved again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementRef {
    target: String,
    strategy: Strategy,
    index: usize,
}

impl ElementRef {
    pub fn new(target: impl Into<String>, strategy: Strategy, index: usize) -> Self {
        Self {
            target: target.into(),
            strategy,
            index,
        }
    }

    /// Name of the target this element was resolved for.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// The candidate strategy that produced the match.
    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    /// Runtime selector of the winning candidate.
    pub fn selector(&self) -> String {
        self.strategy.selector()
    }

    /// CSS form of the winning candidate, if it has one.
    pub fn css_selector(&self) -> Option<String> {
        self.strategy.css_selector()
    }

    /// Position among the candidate's matches, in document order.
    pub fn index(&self) -> usize {
        self.index
    }
}

impl fmt::Display for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} via {} [#{}]", self.target, self.strategy, self.index)
    }
}

/// Page operations the harness consumes.
///
/// Reads never wait: they report the document as it is at the time of the
/// call. Waiting is layered on top by [`crate::wait`].
#[async_trait]
pub trait Surface: Send + Sync {
    /// Navigates to `url` and waits for the load event.
    async fn goto(&self, url: &str) -> Result<()>;

    async fn reload(&self) -> Result<()>;

    async fn title(&self) -> Result<String>;

    async fn set_viewport(&self, viewport: Viewport) -> Result<()>;

    /// Number of elements currently matching `selector`.
    async fn count(&self, selector: &str) -> Result<usize>;

    /// Whether the `index`-th match is rendered with a non-empty box and not hidden.
    ///
    /// A missing match is reported as not visible.
    async fn is_visible(&self, selector: &str, index: usize) -> Result<bool>;

    async fn attribute(&self, element: &ElementRef, name: &str) -> Result<Option<String>>;

    async fn input_value(&self, element: &ElementRef) -> Result<String>;

    async fn text_content(&self, element: &ElementRef) -> Result<Option<String>>;

    async fn computed_style(&self, element: &ElementRef, property: &str) -> Result<Option<String>>;

    async fn bounding_box(&self, element: &ElementRef) -> Result<Option<BoundingBox>>;

    async fn is_enabled(&self, element: &ElementRef) -> Result<bool>;

    async fn click(&self, element: &ElementRef) -> Result<()>;

    async fn fill(&self, element: &ElementRef, text: &str) -> Result<()>;

    async fn scroll_into_view(&self, element: &ElementRef) -> Result<()>;

    /// Evaluates a page script expression and returns its JSON value.
    async fn evaluate(&self, expression: &str) -> Result<serde_json::Value>;
}
