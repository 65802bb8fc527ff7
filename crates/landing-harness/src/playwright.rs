// Playwright-backed runtime
//
// `PageSurface` adapts a Playwright page to the `Surface` seam. Reads that
// Playwright exposes on locators go through `locator(selector).nth(index)`.
// Computed style, bounding box and scrolling run a small page script against
// the CSS form of the selector, so they need a strategy that has one.
//
// `Session` owns the Playwright server and one browser. Every scenario gets
// a fresh browser context, which isolates cookies, storage and DOM.

use crate::config::{BrowserKind, HarnessConfig};
use crate::error::{Error, Result};
use crate::scenario::{ScenarioCase, ScenarioReport, run_case};
use crate::surface::{BoundingBox, ElementRef, Surface};
use crate::viewport::Viewport;
use async_trait::async_trait;
use futures_util::stream::{self, StreamExt};
use playwright_rs::protocol::{Browser, BrowserContext, Locator, Page, Playwright};
use playwright_rs::LaunchOptions;
use tracing::{info, warn};

const COMPUTED_STYLE_SCRIPT: &str = r#"([selector, index, property]) => {
    const el = document.querySelectorAll(selector)[index];
    if (!el) return null;
    return getComputedStyle(el).getPropertyValue(property) || null;
}"#;

const BOUNDING_BOX_SCRIPT: &str = r#"([selector, index]) => {
    const el = document.querySelectorAll(selector)[index];
    if (!el || el.getClientRects().length === 0) return null;
    const r = el.getBoundingClientRect();
    return { x: r.x, y: r.y, width: r.width, height: r.height };
}"#;

const SCROLL_SCRIPT: &str = r#"([selector, index]) => {
    const el = document.querySelectorAll(selector)[index];
    if (!el) return false;
    el.scrollIntoView({ block: "center", inline: "nearest" });
    return true;
}"#;

/// A Playwright page seen through the [`Surface`] trait.
pub struct PageSurface {
    context: Option<BrowserContext>,
    page: Page,
}

impl PageSurface {
    /// Wraps an existing page. Closing the surface leaves the page's context alone.
    pub fn new(page: Page) -> Self {
        Self {
            context: None,
            page,
        }
    }

    /// The underlying page, for runtime calls the harness does not wrap.
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Closes the browser context this surface was created with, if it owns one.
    pub async fn close(self) -> Result<()> {
        if let Some(context) = self.context {
            context.close().await?;
        }
        Ok(())
    }

    async fn nth(&self, selector: &str, index: usize) -> Result<Locator> {
        let index = i32::try_from(index)
            .map_err(|_| Error::InvalidArgument(format!("element index {} out of range", index)))?;
        Ok(self.page.locator(selector).await.nth(index))
    }

    async fn element(&self, element: &ElementRef) -> Result<Locator> {
        self.nth(&element.selector(), element.index()).await
    }

    // CSS selector of the element, for page scripts
    fn css(element: &ElementRef, operation: &str) -> Result<String> {
        element.css_selector().ok_or_else(|| {
            Error::InvalidArgument(format!(
                "{} needs a CSS selector, but {} has none",
                operation,
                element.strategy()
            ))
        })
    }
}

#[async_trait]
impl Surface for PageSurface {
    async fn goto(&self, url: &str) -> Result<()> {
        self.page.goto(url, None).await?;
        Ok(())
    }

    async fn reload(&self) -> Result<()> {
        self.page.reload(None).await?;
        Ok(())
    }

    async fn title(&self) -> Result<String> {
        Ok(self.page.title().await?)
    }

    async fn set_viewport(&self, viewport: Viewport) -> Result<()> {
        Ok(self.page.set_viewport_size(viewport.into()).await?)
    }

    async fn count(&self, selector: &str) -> Result<usize> {
        Ok(self.page.locator(selector).await.count().await?)
    }

    async fn is_visible(&self, selector: &str, index: usize) -> Result<bool> {
        Ok(self.nth(selector, index).await?.is_visible().await?)
    }

    async fn attribute(&self, element: &ElementRef, name: &str) -> Result<Option<String>> {
        Ok(self.element(element).await?.get_attribute(name).await?)
    }

    async fn input_value(&self, element: &ElementRef) -> Result<String> {
        Ok(self.element(element).await?.input_value(None).await?)
    }

    async fn text_content(&self, element: &ElementRef) -> Result<Option<String>> {
        Ok(self.element(element).await?.text_content().await?)
    }

    async fn computed_style(&self, element: &ElementRef, property: &str) -> Result<Option<String>> {
        let css = Self::css(element, "computed style")?;
        let arg = (css, element.index(), property);
        Ok(self
            .page
            .evaluate::<_, Option<String>>(COMPUTED_STYLE_SCRIPT, Some(&arg))
            .await?)
    }

    async fn bounding_box(&self, element: &ElementRef) -> Result<Option<BoundingBox>> {
        let css = Self::css(element, "bounding box")?;
        let arg = (css, element.index());
        Ok(self
            .page
            .evaluate::<_, Option<BoundingBox>>(BOUNDING_BOX_SCRIPT, Some(&arg))
            .await?)
    }

    async fn is_enabled(&self, element: &ElementRef) -> Result<bool> {
        Ok(self.element(element).await?.is_enabled().await?)
    }

    async fn click(&self, element: &ElementRef) -> Result<()> {
        Ok(self.element(element).await?.click(None).await?)
    }

    async fn fill(&self, element: &ElementRef, text: &str) -> Result<()> {
        Ok(self.element(element).await?.fill(text, None).await?)
    }

    async fn scroll_into_view(&self, element: &ElementRef) -> Result<()> {
        let css = Self::css(element, "scrolling")?;
        let arg = (css, element.index());
        let scrolled: bool = self.page.evaluate(SCROLL_SCRIPT, Some(&arg)).await?;
        if !scrolled {
            return Err(Error::AttributeUnavailable {
                selector: element.selector(),
                index: element.index(),
                probe: "scroll position".to_string(),
            });
        }
        Ok(())
    }

    async fn evaluate(&self, expression: &str) -> Result<serde_json::Value> {
        Ok(self.page.evaluate(expression, None::<&()>).await?)
    }
}

/// A running Playwright server with one launched browser.
pub struct Session {
    playwright: Playwright,
    browser: Browser,
    config: HarnessConfig,
}

impl Session {
    /// Starts Playwright and launches the configured browser.
    ///
    /// # Errors
    ///
    /// [`Error::Runtime`] when the Playwright driver or the browser binary is
    /// missing, or the browser fails to start.
    pub async fn launch(config: &HarnessConfig) -> Result<Self> {
        let playwright = Playwright::launch()
            .await
            .map_err(|e| Error::from(e).context("starting Playwright"))?;

        let browser_type = match config.browser() {
            BrowserKind::Chromium => playwright.chromium(),
            BrowserKind::Firefox => playwright.firefox(),
            BrowserKind::Webkit => playwright.webkit(),
        };
        let options = LaunchOptions::new().headless(config.headless());
        let browser = browser_type
            .launch_with_options(options)
            .await
            .map_err(|e| Error::from(e).context(format!("launching {}", config.browser())))?;

        info!(
            browser = %config.browser(),
            version = browser.version(),
            headless = config.headless(),
            "Launched browser"
        );

        Ok(Self {
            playwright,
            browser,
            config: config.clone(),
        })
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Opens a page in a new, isolated browser context.
    pub async fn new_surface(&self) -> Result<PageSurface> {
        let context = self.browser.new_context().await?;
        let page = context.new_page().await?;
        Ok(PageSurface {
            context: Some(context),
            page,
        })
    }

    /// Runs `cases` with at most `jobs` in flight, each on its own context.
    ///
    /// Reports come back in the order of `cases`. A case whose context could
    /// not be created is reported as failed; it does not stop the others.
    pub async fn run_catalog(&self, cases: &[ScenarioCase]) -> Vec<ScenarioReport> {
        let mut reports: Vec<(usize, ScenarioReport)> = stream::iter(cases.iter().enumerate())
            .map(|(position, case)| async move { (position, self.run_isolated(case).await) })
            .buffer_unordered(self.config.jobs())
            .collect()
            .await;

        reports.sort_by_key(|(position, _)| *position);
        reports.into_iter().map(|(_, report)| report).collect()
    }

    async fn run_isolated(&self, case: &ScenarioCase) -> ScenarioReport {
        let surface = match self.new_surface().await {
            Ok(surface) => surface,
            Err(e) => return ScenarioReport::setup_failed(case, e),
        };

        let report = run_case(case, &surface, &self.config).await;

        if let Err(e) = surface.close().await {
            warn!(scenario = case.name(), error = %e, "Failed to close browser context");
        }
        report
    }

    /// Closes the browser and stops the Playwright server.
    pub async fn close(self) -> Result<()> {
        self.browser.close().await?;
        self.playwright.shutdown().await?;
        Ok(())
    }
}
