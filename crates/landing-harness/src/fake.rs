// In-memory page for unit tests
//
// Elements are registered under the exact runtime selector a strategy
// renders to, so tests describe the page in terms of what the resolver will
// ask for. Visibility can be delayed on the tokio clock, and clicks can run
// handlers that rewrite the page.

// Not every helper is used by every test module
#![allow(dead_code)]

use crate::error::{Error, Result};
use crate::surface::{BoundingBox, ElementRef, Surface};
use crate::viewport::Viewport;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

type ClickHandler = Arc<dyn Fn(&mut FakeState) + Send + Sync>;

#[derive(Debug, Clone)]
pub(crate) struct FakeNode {
    visible_from: Option<Instant>,
    pub attributes: BTreeMap<String, String>,
    pub value: String,
    pub text: Option<String>,
    pub styles: BTreeMap<String, String>,
    pub bbox: Option<BoundingBox>,
    pub enabled: bool,
}

impl FakeNode {
    pub fn visible() -> Self {
        Self {
            visible_from: Some(Instant::now()),
            attributes: BTreeMap::new(),
            value: String::new(),
            text: None,
            styles: BTreeMap::new(),
            bbox: Some(BoundingBox {
                x: 0.0,
                y: 0.0,
                width: 100.0,
                height: 40.0,
            }),
            enabled: true,
        }
    }

    pub fn hidden() -> Self {
        Self {
            visible_from: None,
            bbox: None,
            ..Self::visible()
        }
    }

    /// Becomes visible once `delay` has passed on the tokio clock.
    pub fn visible_after(delay: Duration) -> Self {
        Self {
            visible_from: Some(Instant::now() + delay),
            ..Self::visible()
        }
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    pub fn style(mut self, property: &str, value: &str) -> Self {
        self.styles.insert(property.to_string(), value.to_string());
        self
    }

    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.bbox = Some(BoundingBox {
            x: 0.0,
            y: 0.0,
            width,
            height,
        });
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn show(&mut self) {
        self.visible_from = Some(Instant::now());
    }

    pub fn hide(&mut self) {
        self.visible_from = None;
    }

    fn is_visible(&self) -> bool {
        self.visible_from.is_some_and(|from| Instant::now() >= from)
    }
}

#[derive(Default)]
pub(crate) struct FakeState {
    nodes: HashMap<String, Vec<FakeNode>>,
    click_handlers: HashMap<(String, usize), ClickHandler>,
    evaluations: HashMap<String, serde_json::Value>,
    pub title: String,
    pub url: Option<String>,
    pub viewport: Option<Viewport>,
    pub navigations: usize,
    pub clicks: usize,
    pub fills: usize,
}

impl FakeState {
    pub fn insert(&mut self, selector: &str, node: FakeNode) {
        self.nodes.entry(selector.to_string()).or_default().push(node);
    }

    pub fn remove(&mut self, selector: &str) {
        self.nodes.remove(selector);
    }

    pub fn node_mut(&mut self, selector: &str, index: usize) -> Option<&mut FakeNode> {
        self.nodes.get_mut(selector).and_then(|n| n.get_mut(index))
    }

    pub fn node(&self, selector: &str, index: usize) -> Option<&FakeNode> {
        self.nodes.get(selector).and_then(|n| n.get(index))
    }

    fn element(&self, element: &ElementRef) -> Result<&FakeNode> {
        self.node(&element.selector(), element.index())
            .ok_or_else(|| detached(element))
    }

    fn element_mut(&mut self, element: &ElementRef) -> Result<&mut FakeNode> {
        let selector = element.selector();
        self.node_mut(&selector, element.index())
            .ok_or_else(|| detached(element))
    }
}

fn detached(element: &ElementRef) -> Error {
    Error::InvalidArgument(format!("element {} is not attached", element))
}

/// Scriptable in-memory [`Surface`].
#[derive(Default)]
pub(crate) struct FakePage {
    state: Mutex<FakeState>,
}

impl FakePage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, selector: &str, node: FakeNode) -> &Self {
        self.state.lock().insert(selector, node);
        self
    }

    pub fn on_click<F>(&self, selector: &str, index: usize, handler: F) -> &Self
    where
        F: Fn(&mut FakeState) + Send + Sync + 'static,
    {
        self.state
            .lock()
            .click_handlers
            .insert((selector.to_string(), index), Arc::new(handler));
        self
    }

    pub fn set_evaluation(&self, expression: &str, value: serde_json::Value) -> &Self {
        self.state
            .lock()
            .evaluations
            .insert(expression.to_string(), value);
        self
    }

    pub fn with_state<R>(&self, f: impl FnOnce(&mut FakeState) -> R) -> R {
        f(&mut *self.state.lock())
    }

    /// Number of page-changing calls so far (navigation, clicks, fills).
    pub fn mutations(&self) -> usize {
        let state = self.state.lock();
        state.navigations + state.clicks + state.fills
    }
}

#[async_trait]
impl Surface for FakePage {
    async fn goto(&self, url: &str) -> Result<()> {
        let mut state = self.state.lock();
        state.url = Some(url.to_string());
        state.navigations += 1;
        Ok(())
    }

    async fn reload(&self) -> Result<()> {
        self.state.lock().navigations += 1;
        Ok(())
    }

    async fn title(&self) -> Result<String> {
        Ok(self.state.lock().title.clone())
    }

    async fn set_viewport(&self, viewport: Viewport) -> Result<()> {
        self.state.lock().viewport = Some(viewport);
        Ok(())
    }

    async fn count(&self, selector: &str) -> Result<usize> {
        Ok(self.state.lock().nodes.get(selector).map_or(0, Vec::len))
    }

    async fn is_visible(&self, selector: &str, index: usize) -> Result<bool> {
        Ok(self
            .state
            .lock()
            .node(selector, index)
            .is_some_and(FakeNode::is_visible))
    }

    async fn attribute(&self, element: &ElementRef, name: &str) -> Result<Option<String>> {
        let state = self.state.lock();
        Ok(state.element(element)?.attributes.get(name).cloned())
    }

    async fn input_value(&self, element: &ElementRef) -> Result<String> {
        let state = self.state.lock();
        Ok(state.element(element)?.value.clone())
    }

    async fn text_content(&self, element: &ElementRef) -> Result<Option<String>> {
        let state = self.state.lock();
        Ok(state.element(element)?.text.clone())
    }

    async fn computed_style(&self, element: &ElementRef, property: &str) -> Result<Option<String>> {
        let state = self.state.lock();
        Ok(state.element(element)?.styles.get(property).cloned())
    }

    async fn bounding_box(&self, element: &ElementRef) -> Result<Option<BoundingBox>> {
        let state = self.state.lock();
        let node = state.element(element)?;
        Ok(if node.is_visible() { node.bbox } else { None })
    }

    async fn is_enabled(&self, element: &ElementRef) -> Result<bool> {
        let state = self.state.lock();
        Ok(state.element(element)?.enabled)
    }

    async fn click(&self, element: &ElementRef) -> Result<()> {
        let mut state = self.state.lock();
        state.element(element)?;
        state.clicks += 1;
        let handler = state
            .click_handlers
            .get(&(element.selector(), element.index()))
            .cloned();
        if let Some(handler) = handler {
            handler(&mut *state);
        }
        Ok(())
    }

    async fn fill(&self, element: &ElementRef, text: &str) -> Result<()> {
        let mut state = self.state.lock();
        state.element_mut(element)?.value = text.to_string();
        state.fills += 1;
        Ok(())
    }

    async fn scroll_into_view(&self, element: &ElementRef) -> Result<()> {
        self.state.lock().element(element).map(|_| ())
    }

    async fn evaluate(&self, expression: &str) -> Result<serde_json::Value> {
        self.state
            .lock()
            .evaluations
            .get(expression)
            .cloned()
            .ok_or_else(|| Error::InvalidArgument(format!("no scripted result for '{}'", expression)))
    }
}
