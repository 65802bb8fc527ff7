// Assertions - auto-retry expectations over target descriptors
//
// Same shape as the runtime's `expect()` API, but the subject is a
// `TargetDescriptor`, so every assertion goes through multi-candidate
// resolution instead of a single selector.
//
// Element assertions resolve first and then poll the condition; both share
// one budget.

use crate::config::HarnessConfig;
use crate::error::{Error, Result, display_value};
use crate::resolver::Resolver;
use crate::surface::{ElementRef, Surface};
use crate::target::TargetDescriptor;
use crate::wait::{WaitOutcome, poll_until};
use parking_lot::Mutex;
use regex::Regex;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// Creates an expectation for a target with auto-retry behavior.
///
/// The timeout defaults to the target's own timeout (or the configured
/// default), the poll interval to the configured one.
///
/// # Example
///
/// ```ignore
/// use landing_harness::{expect, landing};
///
/// expect(&page, &config, &landing::hero()).to_be_visible().await?;
/// expect(&page, &config, &landing::email_input())
///     .to_have_value("john.doe@example.com")
///     .await?;
/// expect(&page, &config, &landing::subject_options())
///     .not()
///     .to_be_visible()
///     .await?;
/// ```
pub fn expect<'a, S: Surface + ?Sized>(
    surface: &'a S,
    config: &'a HarnessConfig,
    target: &'a TargetDescriptor,
) -> Expectation<'a, S> {
    Expectation {
        surface,
        config,
        target,
        timeout: target.effective_timeout(config),
        poll_interval: config.poll_interval(),
        negate: false,
    }
}

/// Expectation wraps a target and provides assertion methods with auto-retry.
pub struct Expectation<'a, S: Surface + ?Sized> {
    surface: &'a S,
    config: &'a HarnessConfig,
    target: &'a TargetDescriptor,
    timeout: Duration,
    poll_interval: Duration,
    negate: bool,
}

enum Check {
    Visible,
    Attached,
    CountAtLeast(usize),
    ContainsText(String),
    MatchesText(Regex),
    Value(String),
    Enabled,
}

impl Check {
    fn describe(&self) -> String {
        match self {
            Check::Visible => "to be visible".to_string(),
            Check::Attached => "to be attached".to_string(),
            Check::CountAtLeast(n) => format!("to have at least {} matches", n),
            Check::ContainsText(text) => format!("to contain text {:?}", text),
            Check::MatchesText(pattern) => format!("to contain text matching /{}/", pattern),
            Check::Value(value) => format!("to have value {:?}", value),
            Check::Enabled => "to be enabled".to_string(),
        }
    }

    fn needs_element(&self) -> bool {
        matches!(
            self,
            Check::ContainsText(_) | Check::MatchesText(_) | Check::Value(_) | Check::Enabled
        )
    }
}

// Allow clippy::wrong_self_convention for to_* methods that consume self
#[allow(clippy::wrong_self_convention)]
impl<'a, S: Surface + ?Sized> Expectation<'a, S> {
    /// Sets a custom timeout for this assertion.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets a custom poll interval for this assertion.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Negates the assertion.
    #[allow(clippy::should_implement_trait)]
    pub fn not(mut self) -> Self {
        self.negate = !self.negate;
        self
    }

    /// Asserts that some candidate has a visible match.
    ///
    /// Fails with [`Error::ResolutionTimeout`] (listing every candidate) rather
    /// than an assertion failure, since that is what a missing element is.
    pub async fn to_be_visible(self) -> Result<()> {
        if self.negate {
            return self.check(Check::Visible).await;
        }
        let target = self.target.with_timeout(self.timeout);
        Resolver::new(self.surface, self.config)
            .resolve(&target)
            .await
            .map(|_| ())
    }

    /// Asserts that no candidate has a visible match.
    pub async fn to_be_hidden(self) -> Result<()> {
        self.not().to_be_visible().await
    }

    /// Asserts that some candidate matches, visible or not.
    pub async fn to_be_attached(self) -> Result<()> {
        self.check(Check::Attached).await
    }

    /// Asserts that the winning candidate has at least `n` matches.
    pub async fn to_have_count_at_least(self, n: usize) -> Result<()> {
        self.check(Check::CountAtLeast(n)).await
    }

    /// Asserts that the element's text contains `expected`.
    pub async fn to_contain_text(self, expected: &str) -> Result<()> {
        self.check(Check::ContainsText(expected.to_string())).await
    }

    /// Asserts that the element's text contains a match for `pattern`.
    pub async fn to_contain_text_regex(self, pattern: &str) -> Result<()> {
        let re = compile(pattern)?;
        self.check(Check::MatchesText(re)).await
    }

    pub async fn to_have_value(self, expected: &str) -> Result<()> {
        self.check(Check::Value(expected.to_string())).await
    }

    pub async fn to_be_enabled(self) -> Result<()> {
        self.check(Check::Enabled).await
    }

    pub async fn to_be_disabled(self) -> Result<()> {
        self.not().to_be_enabled().await
    }

    async fn check(self, check: Check) -> Result<()> {
        let start = Instant::now();

        let element = if check.needs_element() {
            let target = self.target.with_timeout(self.timeout);
            Some(
                Resolver::new(self.surface, self.config)
                    .resolve(&target)
                    .await?,
            )
        } else {
            None
        };

        let remaining = self.timeout.saturating_sub(start.elapsed());
        let last = Mutex::new(String::new());
        let outcome = poll_until(remaining, self.poll_interval, || {
            self.attempt(&check, element.as_ref(), &last)
        })
        .await?;

        let expectation = format!(
            "{}{}",
            if self.negate { "not " } else { "" },
            check.describe()
        );
        match outcome {
            WaitOutcome::Ready(()) => {
                debug!(target = self.target.name(), expectation = %expectation, "Assertion passed");
                Ok(())
            }
            WaitOutcome::Expired { .. } => Err(Error::AssertionFailure {
                assertion: format!(
                    "'{}' {} within {:?}",
                    self.target.name(),
                    expectation,
                    self.timeout
                ),
                expected: expectation,
                actual: last.lock().clone(),
            }),
        }
    }

    // One observation; records what was seen when the check does not hold
    async fn attempt(
        &self,
        check: &Check,
        element: Option<&ElementRef>,
        last: &Mutex<String>,
    ) -> Result<Option<()>> {
        let (holds, actual) = self.observe(check, element).await?;
        if holds != self.negate {
            return Ok(Some(()));
        }
        *last.lock() = actual;
        Ok(None)
    }

    async fn observe(&self, check: &Check, element: Option<&ElementRef>) -> Result<(bool, String)> {
        let resolver = Resolver::new(self.surface, self.config);

        if let Some(element) = element {
            return match check {
                Check::ContainsText(expected) => {
                    let text = self.surface.text_content(element).await?;
                    let holds = text.as_deref().is_some_and(|t| t.contains(expected.as_str()));
                    Ok((holds, display_value(text.as_deref())))
                }
                Check::MatchesText(re) => {
                    let text = self.surface.text_content(element).await?;
                    let holds = text.as_deref().is_some_and(|t| re.is_match(t));
                    Ok((holds, display_value(text.as_deref())))
                }
                Check::Value(expected) => {
                    let value = self.surface.input_value(element).await?;
                    Ok((value == *expected, format!("{:?}", value)))
                }
                Check::Enabled => {
                    let enabled = self.surface.is_enabled(element).await?;
                    Ok((enabled, if enabled { "enabled" } else { "disabled" }.to_string()))
                }
                _ => Err(Error::InvalidArgument(format!(
                    "{} does not apply to a single element",
                    check.describe()
                ))),
            };
        }

        match check {
            Check::Visible => {
                let visible = resolver.first_visible(self.target).await?;
                Ok(match visible {
                    Some(element) => (true, format!("visible: {}", element)),
                    None => (false, "no visible match".to_string()),
                })
            }
            Check::Attached => {
                let count = resolver.count(self.target).await?;
                Ok((count > 0, format!("{} matches", count)))
            }
            Check::CountAtLeast(n) => {
                let count = resolver.count(self.target).await?;
                Ok((count >= *n, format!("{} matches", count)))
            }
            _ => Err(Error::InvalidArgument(format!(
                "{} needs a resolved element",
                check.describe()
            ))),
        }
    }
}

/// Asserts that the page title matches `pattern`, retrying until the
/// configured default timeout.
pub async fn expect_title_matches<S: Surface + ?Sized>(
    surface: &S,
    config: &HarnessConfig,
    pattern: &str,
) -> Result<()> {
    let re = compile(pattern)?;
    let last = Mutex::new(String::new());

    let outcome = poll_until(config.default_timeout(), config.poll_interval(), || {
        title_matches(surface, &re, &last)
    })
    .await?;

    match outcome {
        WaitOutcome::Ready(()) => Ok(()),
        WaitOutcome::Expired { elapsed } => Err(Error::AssertionFailure {
            assertion: format!("page title matches /{}/ within {:?}", pattern, elapsed),
            expected: format!("a title matching /{}/", pattern),
            actual: format!("{:?}", *last.lock()),
        }),
    }
}

async fn title_matches<S: Surface + ?Sized>(
    surface: &S,
    re: &Regex,
    last: &Mutex<String>,
) -> Result<Option<()>> {
    let title = surface.title().await?;
    if re.is_match(&title) {
        return Ok(Some(()));
    }
    *last.lock() = title;
    Ok(None)
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern)
        .map_err(|e| Error::InvalidArgument(format!("Invalid regex /{}/: {}", pattern, e)))
}
