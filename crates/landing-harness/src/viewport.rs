// Viewport profiles - responsive breakpoints under test
//
// A profile is applied once at the start of a scenario and never mutated
// afterwards. Sizes match the breakpoints the landing page is built for.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Page viewport size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Viewport {
    /// Page width in pixels
    pub width: u32,
    /// Page height in pixels
    pub height: u32,
}

impl From<Viewport> for playwright_rs::protocol::Viewport {
    fn from(viewport: Viewport) -> Self {
        playwright_rs::protocol::Viewport {
            width: viewport.width,
            height: viewport.height,
        }
    }
}

/// Named responsive breakpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewportProfile {
    /// 375x667 (iPhone SE)
    Mobile,
    /// 768x1024 (iPad)
    Tablet,
    /// 1280x720
    Desktop,
    /// 1920x1080
    LargeDesktop,
}

impl ViewportProfile {
    /// Every profile, smallest first.
    pub const ALL: [ViewportProfile; 4] = [
        ViewportProfile::Mobile,
        ViewportProfile::Tablet,
        ViewportProfile::Desktop,
        ViewportProfile::LargeDesktop,
    ];

    /// Profiles used by the cross-viewport consistency checks.
    pub const CROSS_VIEWPORT: [ViewportProfile; 3] = [
        ViewportProfile::Mobile,
        ViewportProfile::Tablet,
        ViewportProfile::Desktop,
    ];

    pub const fn size(self) -> Viewport {
        match self {
            ViewportProfile::Mobile => Viewport {
                width: 375,
                height: 667,
            },
            ViewportProfile::Tablet => Viewport {
                width: 768,
                height: 1024,
            },
            ViewportProfile::Desktop => Viewport {
                width: 1280,
                height: 720,
            },
            ViewportProfile::LargeDesktop => Viewport {
                width: 1920,
                height: 1080,
            },
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            ViewportProfile::Mobile => "mobile",
            ViewportProfile::Tablet => "tablet",
            ViewportProfile::Desktop => "desktop",
            ViewportProfile::LargeDesktop => "large-desktop",
        }
    }
}

impl fmt::Display for ViewportProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let size = self.size();
        write!(f, "{} ({}x{})", self.name(), size.width, size.height)
    }
}

impl FromStr for ViewportProfile {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mobile" => Ok(ViewportProfile::Mobile),
            "tablet" => Ok(ViewportProfile::Tablet),
            "desktop" => Ok(ViewportProfile::Desktop),
            "large-desktop" | "large_desktop" | "largedesktop" => {
                Ok(ViewportProfile::LargeDesktop)
            }
            other => Err(Error::InvalidArgument(format!(
                "Unknown viewport profile '{}'. Expected one of: mobile, tablet, desktop, large-desktop",
                other
            ))),
        }
    }
}
