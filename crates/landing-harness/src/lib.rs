//! landing-harness: resilient element resolution and state diffs for
//! browser-driven landing page tests
//!
//! Elements are described by [`TargetDescriptor`]s: a name plus an ordered list
//! of [`Strategy`] candidates (class fragment, icon, aria-label, text, ...).
//! The [`Resolver`] tries the candidates in priority order under one shared
//! wait budget and returns the first visible match. Page state is read into
//! [`Snapshot`]s and compared exactly, before and after an interaction.
//!
//! All page access goes through the [`Surface`] trait. [`PageSurface`] is the
//! Playwright-backed implementation; [`Session`] launches a browser and runs
//! the scenario [`catalog`] with one fresh browser context per scenario.
//!
//! # Examples
//!
//! ## Resolving with fallbacks
//!
//! ```ignore
//! use landing_harness::{HarnessConfig, Resolver, Session, landing};
//!
//! #[tokio::main]
//! async fn main() -> landing_harness::Result<()> {
//!     let config = HarnessConfig::from_env()?;
//!     let session = Session::launch(&config).await?;
//!     let page = session.new_surface().await?;
//!
//!     page.page().goto(&config.entry_url(), None).await?;
//!
//!     // Tries the carousel-next class, then chevron/arrow icons, then labels
//!     let next = Resolver::new(&page, &config)
//!         .resolve(&landing::next_slide())
//!         .await?;
//!     println!("next control: {}", next);
//!
//!     page.close().await?;
//!     session.close().await
//! }
//! ```
//!
//! ## Diffing state around a click
//!
//! ```ignore
//! use landing_harness::snapshot::{Probe, capture, expect_changed, wait_for_change};
//!
//! let track = resolver.resolve(&landing::carousel_content()).await?;
//! let before = capture(&page, &track, &Probe::Style).await?;
//! page.click(&resolver.resolve(&landing::next_slide()).await?).await?;
//! let after = wait_for_change(&page, &track, &before, timeout, interval).await?;
//! expect_changed(&before, &after)?;
//! ```
//!
//! ## Running the catalog
//!
//! ```ignore
//! use landing_harness::{HarnessConfig, Session, Summary, catalog};
//!
//! let config = HarnessConfig::from_env()?;
//! let session = Session::launch(&config).await?;
//! let summary = Summary::new(session.run_catalog(&catalog()).await);
//! println!("{}", summary);
//! session.close().await?;
//! ```

pub mod assertions;
pub mod config;
mod error;
pub mod landing;
mod playwright;
mod resolver;
pub mod scenario;
mod scenarios;
pub mod snapshot;
mod strategy;
mod surface;
mod target;
pub mod viewport;
pub mod wait;

#[cfg(test)]
mod fake;

// Re-export error types
pub use error::{Error, Result};

// Re-export the element model
pub use strategy::Strategy;
pub use surface::{BoundingBox, ElementRef, Surface};
pub use target::{TargetBuilder, TargetDescriptor};

// Re-export resolution and assertions
pub use assertions::{Expectation, expect, expect_title_matches};
pub use resolver::Resolver;
pub use snapshot::{Probe, Snapshot};

// Re-export configuration
pub use config::{BrowserKind, HarnessConfig, HarnessConfigBuilder};
pub use viewport::{Viewport, ViewportProfile};

// Re-export the Playwright runtime
pub use playwright::{PageSurface, Session};

// Re-export scenario orchestration
pub use scenario::{
    Outcome, ScenarioCase, ScenarioContext, ScenarioReport, Suite, Summary, catalog, run_case,
};
