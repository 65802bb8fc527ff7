// Resolver - turns a target descriptor into a visible element
//
// Resolution algorithm, repeated on every poll tick until the target's
// budget is spent:
//
//   for each candidate, in priority order:
//       count the candidate's matches
//       return the first match that is visible
//
// The first candidate with a visible match wins even if a later candidate
// matches the same element, so the result depends only on the DOM state.
// The resolver only reads; it never clicks, scrolls or types.

use crate::config::HarnessConfig;
use crate::error::{Error, Result};
use crate::surface::{ElementRef, Surface};
use crate::target::TargetDescriptor;
use crate::wait::{WaitOutcome, poll_until};
use tracing::{debug, info};

/// Resolves targets against one page.
pub struct Resolver<'a, S: Surface + ?Sized> {
    surface: &'a S,
    config: &'a HarnessConfig,
}

impl<'a, S: Surface + ?Sized> Resolver<'a, S> {
    pub fn new(surface: &'a S, config: &'a HarnessConfig) -> Self {
        Self { surface, config }
    }

    /// Waits for the first visible match of the highest-priority candidate that has one.
    ///
    /// # Errors
    ///
    /// [`Error::ResolutionTimeout`] when no candidate produced a visible match
    /// within the target's timeout.
    pub async fn resolve(&self, target: &TargetDescriptor) -> Result<ElementRef> {
        let timeout = target.effective_timeout(self.config);
        let outcome = poll_until(timeout, self.config.poll_interval(), || {
            self.first_visible(target)
        })
        .await?;

        match outcome {
            WaitOutcome::Ready(element) => {
                info!(
                    target = target.name(),
                    strategy = %element.strategy(),
                    index = element.index(),
                    "Resolved target"
                );
                Ok(element)
            }
            WaitOutcome::Expired { elapsed } => Err(Error::ResolutionTimeout {
                target: target.name().to_string(),
                candidates: target.selectors(),
                elapsed,
            }),
        }
    }

    /// Resolves the target, then returns every match of the winning candidate.
    ///
    /// Matches are in document order and include ones that are not visible
    /// (e.g. carousel items scrolled out of the track).
    pub async fn resolve_all(&self, target: &TargetDescriptor) -> Result<Vec<ElementRef>> {
        let first = self.resolve(target).await?;
        let count = self.surface.count(&first.selector()).await?;

        Ok((0..count)
            .map(|index| ElementRef::new(target.name(), first.strategy().clone(), index))
            .collect())
    }

    /// Match count of the first candidate that has any matches. Does not wait.
    pub async fn count(&self, target: &TargetDescriptor) -> Result<usize> {
        for strategy in target.candidates() {
            let count = self.surface.count(&strategy.selector()).await?;
            if count > 0 {
                return Ok(count);
            }
        }
        Ok(0)
    }

    /// Whether any candidate currently matches. Does not wait.
    pub async fn is_present(&self, target: &TargetDescriptor) -> Result<bool> {
        Ok(self.count(target).await? > 0)
    }

    /// One pass over the candidates without waiting.
    ///
    /// Returns the element `resolve` would return if the page stayed as it is now.
    pub async fn first_visible(&self, target: &TargetDescriptor) -> Result<Option<ElementRef>> {
        for strategy in target.candidates() {
            let selector = strategy.selector();
            let count = self.surface.count(&selector).await?;

            for index in 0..count {
                if self.surface.is_visible(&selector, index).await? {
                    return Ok(Some(ElementRef::new(
                        target.name(),
                        strategy.clone(),
                        index,
                    )));
                }
            }

            debug!(
                target = target.name(),
                selector = %selector,
                matches = count,
                "No visible match for candidate"
            );
        }
        Ok(None)
    }
}
