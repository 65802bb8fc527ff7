// Target descriptors - how to find one semantic element
//
// A descriptor is an ordered, non-empty list of candidate strategies plus an
// optional wait budget. It describes how to look, not what was found, and it
// cannot be changed once built.

use crate::config::HarnessConfig;
use crate::error::{Error, Result};
use crate::strategy::Strategy;
use std::time::Duration;

/// Prioritised list of strategies for one semantic UI element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetDescriptor {
    name: String,
    candidates: Vec<Strategy>,
    timeout: Option<Duration>,
}

impl TargetDescriptor {
    /// Starts building a descriptor for the named element.
    pub fn builder(name: impl Into<String>) -> TargetBuilder {
        TargetBuilder {
            name: name.into(),
            candidates: Vec::new(),
            timeout: None,
        }
    }

    /// Shorthand for a descriptor with a single strategy and the default timeout.
    pub fn single(name: impl Into<String>, strategy: Strategy) -> Self {
        Self {
            name: name.into(),
            candidates: vec![strategy],
            timeout: None,
        }
    }

    /// Tries every candidate of `first`, then every candidate of `second`,
    /// with the default timeout.
    pub fn either(
        name: impl Into<String>,
        first: &TargetDescriptor,
        second: &TargetDescriptor,
    ) -> Self {
        Self {
            name: name.into(),
            candidates: first
                .candidates
                .iter()
                .chain(&second.candidates)
                .cloned()
                .collect(),
            timeout: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Candidates in priority order.
    pub fn candidates(&self) -> &[Strategy] {
        &self.candidates
    }

    /// Explicit timeout override, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// The override, or the configured default.
    pub fn effective_timeout(&self, config: &HarnessConfig) -> Duration {
        self.timeout.unwrap_or_else(|| config.default_timeout())
    }

    /// Rendered candidate selectors, in priority order.
    pub fn selectors(&self) -> Vec<String> {
        self.candidates.iter().map(Strategy::selector).collect()
    }

    /// Appends a fallback with lower priority than every existing candidate.
    pub fn or(mut self, strategy: Strategy) -> Self {
        self.candidates.push(strategy);
        self
    }

    /// Returns a copy of this descriptor with a different wait budget.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
            ..self.clone()
        }
    }
}

/// Builder for [`TargetDescriptor`].
#[derive(Debug, Clone)]
pub struct TargetBuilder {
    name: String,
    candidates: Vec<Strategy>,
    timeout: Option<Duration>,
}

impl TargetBuilder {
    /// Appends a candidate with lower priority than every candidate added so far.
    pub fn candidate(mut self, strategy: Strategy) -> Self {
        self.candidates.push(strategy);
        self
    }

    pub fn candidates(mut self, strategies: impl IntoIterator<Item = Strategy>) -> Self {
        self.candidates.extend(strategies);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<TargetDescriptor> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidTarget(
                "target name must not be empty".to_string(),
            ));
        }
        if self.candidates.is_empty() {
            return Err(Error::InvalidTarget(format!(
                "target '{}' has no candidate strategies",
                self.name
            )));
        }
        if self.timeout.is_some_and(|t| t.is_zero()) {
            return Err(Error::InvalidTarget(format!(
                "target '{}' has a zero timeout",
                self.name
            )));
        }

        Ok(TargetDescriptor {
            name: self.name,
            candidates: self.candidates,
            timeout: self.timeout,
        })
    }
}
