// Snapshot - capture an observable value and compare before/after
//
// A snapshot is one read of one property of a resolved element. Values are
// opaque strings compared exactly: no whitespace trimming, no numeric
// tolerance. Inline `transform` strings can be formatted differently by
// different browser engines; they are compared as-is.

use crate::error::{Error, Result, display_value};
use crate::surface::{ElementRef, Surface};
use crate::wait::{WaitOutcome, poll_until};
use parking_lot::Mutex;
use regex::Regex;
use std::fmt;
use std::time::Duration;
use tracing::debug;

/// What to read from an element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Probe {
    /// A named attribute
    Attribute(String),
    /// The `class` attribute
    Class,
    /// The inline `style` attribute
    Style,
    /// Current value of an input, textarea or select
    InputValue,
    /// `textContent` of the element
    TextContent,
    /// A computed CSS property
    ComputedStyle(String),
}

impl Probe {
    pub fn attribute(name: impl Into<String>) -> Self {
        Probe::Attribute(name.into())
    }

    pub fn computed_style(property: impl Into<String>) -> Self {
        Probe::ComputedStyle(property.into())
    }

    /// Human readable name used in diagnostics.
    pub fn label(&self) -> String {
        match self {
            Probe::Attribute(name) => format!("attribute '{}'", name),
            Probe::Class => "class".to_string(),
            Probe::Style => "inline style".to_string(),
            Probe::InputValue => "value".to_string(),
            Probe::TextContent => "text content".to_string(),
            Probe::ComputedStyle(property) => format!("computed style '{}'", property),
        }
    }
}

impl fmt::Display for Probe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// One captured value. `None` means the property was absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    probe: Probe,
    value: Option<String>,
}

impl Snapshot {
    pub fn new(probe: Probe, value: Option<String>) -> Self {
        Self { probe, value }
    }

    pub fn probe(&self) -> &Probe {
        &self.probe
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn is_absent(&self) -> bool {
        self.value.is_none()
    }

    /// Substring test. An absent value contains nothing, not even `""`.
    pub fn contains(&self, needle: &str) -> bool {
        self.value.as_deref().is_some_and(|v| v.contains(needle))
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.probe, display_value(self.value()))
    }
}

/// Reads `probe` from `element` once.
///
/// # Errors
///
/// [`Error::AttributeUnavailable`] when the element is no longer attached.
/// An absent attribute is not an error; it is captured as `None`.
pub async fn capture<S: Surface + ?Sized>(
    surface: &S,
    element: &ElementRef,
    probe: &Probe,
) -> Result<Snapshot> {
    if surface.count(&element.selector()).await? <= element.index() {
        return Err(stale(element, probe));
    }

    let value = match probe {
        Probe::Attribute(name) => surface.attribute(element, name).await?,
        Probe::Class => surface.attribute(element, "class").await?,
        Probe::Style => surface.attribute(element, "style").await?,
        Probe::InputValue => Some(surface.input_value(element).await?),
        Probe::TextContent => surface.text_content(element).await?,
        Probe::ComputedStyle(property) => surface.computed_style(element, property).await?,
    };

    debug!(element = %element, probe = %probe, value = ?value, "Captured snapshot");
    Ok(Snapshot::new(probe.clone(), value))
}

fn stale(element: &ElementRef, probe: &Probe) -> Error {
    Error::AttributeUnavailable {
        selector: element.selector(),
        index: element.index(),
        probe: probe.label(),
    }
}

fn same_probe(before: &Snapshot, after: &Snapshot) -> Result<()> {
    if before.probe != after.probe {
        return Err(Error::InvalidArgument(format!(
            "cannot compare {} with {}",
            before.probe, after.probe
        )));
    }
    Ok(())
}

/// Fails unless the two snapshots differ.
pub fn expect_changed(before: &Snapshot, after: &Snapshot) -> Result<()> {
    same_probe(before, after)?;
    if before.value == after.value {
        return Err(Error::assertion(
            format!("{} changed", before.probe),
            format!("a value other than {}", display_value(before.value())),
            after.value(),
        ));
    }
    Ok(())
}

/// Fails unless the two snapshots are identical.
pub fn expect_unchanged(before: &Snapshot, after: &Snapshot) -> Result<()> {
    same_probe(before, after)?;
    if before.value != after.value {
        return Err(Error::assertion(
            format!("{} unchanged", before.probe),
            display_value(before.value()),
            after.value(),
        ));
    }
    Ok(())
}

pub fn expect_contains(snapshot: &Snapshot, needle: &str) -> Result<()> {
    if !snapshot.contains(needle) {
        return Err(Error::assertion(
            format!("{} contains {:?}", snapshot.probe, needle),
            format!("a value containing {:?}", needle),
            snapshot.value(),
        ));
    }
    Ok(())
}

pub fn expect_matches(snapshot: &Snapshot, pattern: &Regex) -> Result<()> {
    if !snapshot.value().is_some_and(|v| pattern.is_match(v)) {
        return Err(Error::assertion(
            format!("{} matches /{}/", snapshot.probe, pattern),
            format!("a value matching /{}/", pattern),
            snapshot.value(),
        ));
    }
    Ok(())
}

/// Polls until a capture differs from `before`, and returns it.
///
/// Replaces a fixed delay after an interaction: the wait ends as soon as the
/// page reflects the change.
///
/// # Errors
///
/// [`Error::AssertionFailure`] with the last observed value when nothing
/// changed within `timeout`.
pub async fn wait_for_change<S: Surface + ?Sized>(
    surface: &S,
    element: &ElementRef,
    before: &Snapshot,
    timeout: Duration,
    interval: Duration,
) -> Result<Snapshot> {
    let probe = before.probe();
    let observed = poll_snapshot(surface, element, probe, timeout, interval, |value| {
        value != before.value()
    })
    .await?;

    match observed {
        Observed::Accepted(after) => Ok(after),
        Observed::Expired { last, elapsed } => Err(Error::assertion(
            format!("{} of {} changed within {:?}", probe, element, elapsed),
            format!("a value other than {}", display_value(before.value())),
            last.as_deref(),
        )),
    }
}

/// Polls until a capture equals `expected`, and returns it.
///
/// # Errors
///
/// [`Error::AssertionFailure`] with the last observed value on timeout.
pub async fn wait_for_value<S: Surface + ?Sized>(
    surface: &S,
    element: &ElementRef,
    probe: &Probe,
    expected: &str,
    timeout: Duration,
    interval: Duration,
) -> Result<Snapshot> {
    let observed = poll_snapshot(surface, element, probe, timeout, interval, |value| {
        value == Some(expected)
    })
    .await?;

    match observed {
        Observed::Accepted(snapshot) => Ok(snapshot),
        Observed::Expired { last, elapsed } => Err(Error::assertion(
            format!("{} of {} reached {:?} within {:?}", probe, element, expected, elapsed),
            format!("{:?}", expected),
            last.as_deref(),
        )),
    }
}

enum Observed {
    Accepted(Snapshot),
    Expired {
        last: Option<String>,
        elapsed: Duration,
    },
}

async fn poll_snapshot<S, F>(
    surface: &S,
    element: &ElementRef,
    probe: &Probe,
    timeout: Duration,
    interval: Duration,
    accept: F,
) -> Result<Observed>
where
    S: Surface + ?Sized,
    F: Fn(Option<&str>) -> bool + Sync,
{
    let last = Mutex::new(None);
    let outcome = poll_until(timeout, interval, || {
        observe(surface, element, probe, &accept, &last)
    })
    .await?;

    Ok(match outcome {
        WaitOutcome::Ready(snapshot) => Observed::Accepted(snapshot),
        WaitOutcome::Expired { elapsed } => Observed::Expired {
            last: last.lock().clone(),
            elapsed,
        },
    })
}

// One capture; remembers the value when it is not accepted
async fn observe<S, F>(
    surface: &S,
    element: &ElementRef,
    probe: &Probe,
    accept: &F,
    last: &Mutex<Option<String>>,
) -> Result<Option<Snapshot>>
where
    S: Surface + ?Sized,
    F: Fn(Option<&str>) -> bool + Sync,
{
    let current = capture(surface, element, probe).await?;
    if accept(current.value()) {
        return Ok(Some(current));
    }
    *last.lock() = current.value;
    Ok(None)
}
