// Scenario orchestration
//
// A scenario is a short async function over a `ScenarioContext`: navigate,
// resolve, interact, capture, compare. Scenarios share nothing but the
// read-only configuration, so the catalog can run them in any order and in
// parallel, each on a fresh browser context.

use crate::assertions::{Expectation, expect};
use crate::config::HarnessConfig;
use crate::error::{Error, Result};
use crate::resolver::Resolver;
use crate::snapshot::{self, Probe, Snapshot};
use crate::surface::{BoundingBox, ElementRef, Surface};
use crate::target::TargetDescriptor;
use crate::viewport::ViewportProfile;
use futures_util::future::BoxFuture;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{info, warn};

/// Body of a scenario.
pub type ScenarioFn = for<'a> fn(&'a ScenarioContext<'a>) -> BoxFuture<'a, Result<()>>;

/// Group of related scenarios, one per page area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Suite {
    Smoke,
    Sections,
    Carousel,
    Theme,
    Contact,
    Responsive,
}

impl Suite {
    pub const ALL: [Suite; 6] = [
        Suite::Smoke,
        Suite::Sections,
        Suite::Carousel,
        Suite::Theme,
        Suite::Contact,
        Suite::Responsive,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Suite::Smoke => "smoke",
            Suite::Sections => "sections",
            Suite::Carousel => "carousel",
            Suite::Theme => "theme",
            Suite::Contact => "contact",
            Suite::Responsive => "responsive",
        }
    }
}

impl fmt::Display for Suite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Suite {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Suite::ALL
            .into_iter()
            .find(|suite| suite.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::InvalidArgument(format!("unknown suite '{}'", s)))
    }
}

/// One named, independent scenario.
#[derive(Clone)]
pub struct ScenarioCase {
    name: String,
    suite: Suite,
    viewport: Option<ViewportProfile>,
    run: ScenarioFn,
}

impl ScenarioCase {
    pub fn new(
        name: impl Into<String>,
        suite: Suite,
        viewport: Option<ViewportProfile>,
        run: ScenarioFn,
    ) -> Self {
        Self {
            name: name.into(),
            suite,
            viewport,
            run,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn suite(&self) -> Suite {
        self.suite
    }

    /// Viewport applied before navigation; `None` keeps the browser default.
    pub fn viewport(&self) -> Option<ViewportProfile> {
        self.viewport
    }
}

impl fmt::Debug for ScenarioCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScenarioCase")
            .field("name", &self.name)
            .field("suite", &self.suite)
            .field("viewport", &self.viewport)
            .finish()
    }
}

/// Every scenario, grouped by suite in a stable order.
pub fn catalog() -> Vec<ScenarioCase> {
    crate::scenarios::all()
}

/// What a scenario sees: one page, the shared configuration and its viewport.
pub struct ScenarioContext<'a> {
    surface: &'a dyn Surface,
    config: &'a HarnessConfig,
    viewport: Option<ViewportProfile>,
}

impl<'a> ScenarioContext<'a> {
    /// Applies the viewport (if any), then navigates to the entry URL.
    pub async fn open(
        surface: &'a dyn Surface,
        config: &'a HarnessConfig,
        viewport: Option<ViewportProfile>,
    ) -> Result<Self> {
        if let Some(profile) = viewport {
            surface
                .set_viewport(profile.size())
                .await
                .map_err(|e| e.context(format!("setting {} viewport", profile)))?;
        }
        let url = config.entry_url();
        surface
            .goto(&url)
            .await
            .map_err(|e| e.context(format!("navigating to {}", url)))?;

        Ok(Self {
            surface,
            config,
            viewport,
        })
    }

    /// Reloads the page, e.g. so responsive styles apply from a fresh load.
    pub async fn reload(&self) -> Result<()> {
        self.surface
            .reload()
            .await
            .map_err(|e| e.context("reloading the page"))
    }

    pub fn surface(&self) -> &'a (dyn Surface + 'a) {
        self.surface
    }

    pub fn config(&self) -> &'a HarnessConfig {
        self.config
    }

    pub fn viewport(&self) -> Option<ViewportProfile> {
        self.viewport
    }

    pub fn resolver(&self) -> Resolver<'a, dyn Surface + 'a> {
        Resolver::new(self.surface, self.config)
    }

    pub fn expect<'t>(&'t self, target: &'t TargetDescriptor) -> Expectation<'t, dyn Surface + 'a> {
        expect(self.surface, self.config, target)
    }

    pub async fn resolve(&self, target: &TargetDescriptor) -> Result<ElementRef> {
        self.resolver().resolve(target).await
    }

    pub async fn resolve_all(&self, target: &TargetDescriptor) -> Result<Vec<ElementRef>> {
        self.resolver().resolve_all(target).await
    }

    /// Current match count of the target. Does not wait.
    pub async fn count(&self, target: &TargetDescriptor) -> Result<usize> {
        self.resolver().count(target).await
    }

    pub async fn capture(&self, element: &ElementRef, probe: &Probe) -> Result<Snapshot> {
        snapshot::capture(self.surface, element, probe).await
    }

    /// Waits, within the default timeout, for `element` to differ from `before`.
    pub async fn wait_for_change(&self, element: &ElementRef, before: &Snapshot) -> Result<Snapshot> {
        snapshot::wait_for_change(
            self.surface,
            element,
            before,
            self.config.default_timeout(),
            self.config.poll_interval(),
        )
        .await
    }

    /// Waits, within the default timeout, for `probe` on `element` to equal `expected`.
    pub async fn wait_for_value(
        &self,
        element: &ElementRef,
        probe: &Probe,
        expected: &str,
    ) -> Result<Snapshot> {
        snapshot::wait_for_value(
            self.surface,
            element,
            probe,
            expected,
            self.config.default_timeout(),
            self.config.poll_interval(),
        )
        .await
    }

    /// Resolves the target and clicks it.
    pub async fn click(&self, target: &TargetDescriptor) -> Result<ElementRef> {
        let element = self.resolve(target).await?;
        self.surface.click(&element).await?;
        Ok(element)
    }

    /// Resolves the target, fills it, and returns the element.
    pub async fn fill(&self, target: &TargetDescriptor, text: &str) -> Result<ElementRef> {
        let element = self.resolve(target).await?;
        self.surface.fill(&element, text).await?;
        Ok(element)
    }

    /// Clicks `trigger` and waits for `observed` to change.
    pub async fn click_and_wait(
        &self,
        trigger: &TargetDescriptor,
        observed: &ElementRef,
        probe: &Probe,
    ) -> Result<(Snapshot, Snapshot)> {
        let before = self.capture(observed, probe).await?;
        self.click(trigger).await?;
        let after = self.wait_for_change(observed, &before).await?;
        Ok((before, after))
    }

    /// Scrolls the target into view.
    ///
    /// Prefers a visible match, then any attached one, since sections below
    /// the fold may not count as visible yet.
    pub async fn scroll_to(&self, target: &TargetDescriptor) -> Result<ElementRef> {
        let element = match self.resolver().first_visible(target).await? {
            Some(element) => element,
            None => match self.first_attached(target).await? {
                Some(element) => element,
                None => self.resolve(target).await?,
            },
        };
        self.surface.scroll_into_view(&element).await?;
        Ok(element)
    }

    pub async fn scroll_to_bottom(&self) -> Result<()> {
        self.surface
            .evaluate("window.scrollTo(0, document.body.scrollHeight)")
            .await?;
        Ok(())
    }

    /// Scrolls to `fraction` of the document height.
    pub async fn scroll_to_fraction(&self, fraction: f64) -> Result<()> {
        if !(0.0..=1.0).contains(&fraction) {
            return Err(Error::InvalidArgument(format!(
                "scroll fraction {} is outside 0..=1",
                fraction
            )));
        }
        self.surface
            .evaluate(&format!(
                "window.scrollTo(0, document.body.scrollHeight * {})",
                fraction
            ))
            .await?;
        Ok(())
    }

    pub async fn scroll_to_top(&self) -> Result<()> {
        self.surface.evaluate("window.scrollTo(0, 0)").await?;
        Ok(())
    }

    /// Resolves the target and reads its box; `None` when it is not rendered.
    pub async fn bounding_box(&self, target: &TargetDescriptor) -> Result<Option<BoundingBox>> {
        let element = self.resolve(target).await?;
        self.surface.bounding_box(&element).await
    }

    /// Resolves the target and reads its text content (absent text reads as empty).
    pub async fn text(&self, target: &TargetDescriptor) -> Result<String> {
        let element = self.resolve(target).await?;
        Ok(self.surface.text_content(&element).await?.unwrap_or_default())
    }

    // First attached match of the first candidate that has one
    async fn first_attached(&self, target: &TargetDescriptor) -> Result<Option<ElementRef>> {
        for strategy in target.candidates() {
            if self.surface.count(&strategy.selector()).await? > 0 {
                return Ok(Some(ElementRef::new(target.name(), strategy.clone(), 0)));
            }
        }
        Ok(None)
    }
}

/// Fails with an [`Error::AssertionFailure`] unless `holds`.
pub fn ensure(
    holds: bool,
    assertion: impl Into<String>,
    expected: impl fmt::Display,
    actual: impl fmt::Display,
) -> Result<()> {
    if holds {
        return Ok(());
    }
    Err(Error::AssertionFailure {
        assertion: assertion.into(),
        expected: expected.to_string(),
        actual: actual.to_string(),
    })
}

/// How a scenario ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Outcome {
    Passed,
    Failed {
        error: String,
        /// Candidate selectors attempted, when the failure was a resolution timeout
        candidates: Vec<String>,
    },
}

/// Result of one scenario run.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    name: String,
    suite: Suite,
    viewport: Option<ViewportProfile>,
    outcome: Outcome,
    elapsed: Duration,
}

impl ScenarioReport {
    fn new(case: &ScenarioCase, outcome: Outcome, elapsed: Duration) -> Self {
        Self {
            name: case.name.clone(),
            suite: case.suite,
            viewport: case.viewport,
            outcome,
            elapsed,
        }
    }

    fn failure(case: &ScenarioCase, error: &Error, elapsed: Duration) -> Self {
        let outcome = Outcome::Failed {
            error: error.to_string(),
            candidates: error.candidates().map(<[String]>::to_vec).unwrap_or_default(),
        };
        Self::new(case, outcome, elapsed)
    }

    /// Report for a case that never started (e.g. no browser context).
    pub fn setup_failed(case: &ScenarioCase, error: Error) -> Self {
        let error = error.context("setting up scenario");
        warn!(scenario = case.name(), error = %error, "Scenario setup failed");
        Self::failure(case, &error, Duration::ZERO)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn suite(&self) -> Suite {
        self.suite
    }

    pub fn viewport(&self) -> Option<ViewportProfile> {
        self.viewport
    }

    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn passed(&self) -> bool {
        self.outcome == Outcome::Passed
    }
}

impl fmt::Display for ScenarioReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            Outcome::Passed => write!(
                f,
                "✓ [{}] {} ({}ms)",
                self.suite,
                self.name,
                self.elapsed.as_millis()
            ),
            Outcome::Failed { error, candidates } => {
                write!(
                    f,
                    "✗ [{}] {} ({}ms)\n    {}",
                    self.suite,
                    self.name,
                    self.elapsed.as_millis(),
                    error
                )?;
                for (i, candidate) in candidates.iter().enumerate() {
                    write!(f, "\n    candidate {}: {}", i + 1, candidate)?;
                }
                Ok(())
            }
        }
    }
}

/// Runs one case on `surface`. Never panics or returns early: every failure
/// ends up in the report.
pub async fn run_case(
    case: &ScenarioCase,
    surface: &dyn Surface,
    config: &HarnessConfig,
) -> ScenarioReport {
    let start = Instant::now();
    let result = execute(case, surface, config).await;
    let elapsed = start.elapsed();

    match result {
        Ok(()) => {
            info!(scenario = case.name(), suite = %case.suite(), ?elapsed, "✓ Scenario passed");
            ScenarioReport::new(case, Outcome::Passed, elapsed)
        }
        Err(e) => {
            warn!(scenario = case.name(), suite = %case.suite(), error = %e, "✗ Scenario failed");
            ScenarioReport::failure(case, &e, elapsed)
        }
    }
}

async fn execute(case: &ScenarioCase, surface: &dyn Surface, config: &HarnessConfig) -> Result<()> {
    let ctx = ScenarioContext::open(surface, config, case.viewport).await?;
    (case.run)(&ctx).await
}

/// Totals over a set of reports.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Summary {
    reports: Vec<ScenarioReport>,
}

impl Summary {
    pub fn new(reports: Vec<ScenarioReport>) -> Self {
        Self { reports }
    }

    pub fn reports(&self) -> &[ScenarioReport] {
        &self.reports
    }

    pub fn passed(&self) -> usize {
        self.reports.iter().filter(|r| r.passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.reports.len() - self.passed()
    }

    pub fn total(&self) -> usize {
        self.reports.len()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &ScenarioReport> {
        self.reports.iter().filter(|r| !r.passed())
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for report in &self.reports {
            writeln!(f, "{}", report)?;
        }
        write!(
            f,
            "{} scenarios: {} passed, {} failed",
            self.total(),
            self.passed(),
            self.failed()
        )
    }
}
