// Runner configuration
//
// Built once before any scenario runs and then shared by reference. Nothing
// in the harness mutates it afterwards.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

/// Base URL used when none is configured (the landing page dev server).
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:4173/";

/// Default wait budget for resolving and asserting on targets (10 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default polling interval for bounded waits (100ms).
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Default number of scenarios run concurrently.
pub const DEFAULT_JOBS: usize = 4;

/// Browser engine to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrowserKind {
    #[default]
    Chromium,
    Firefox,
    Webkit,
}

impl BrowserKind {
    pub fn name(self) -> &'static str {
        match self {
            BrowserKind::Chromium => "chromium",
            BrowserKind::Firefox => "firefox",
            BrowserKind::Webkit => "webkit",
        }
    }
}

impl fmt::Display for BrowserKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BrowserKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chromium" | "chrome" => Ok(BrowserKind::Chromium),
            "firefox" => Ok(BrowserKind::Firefox),
            "webkit" | "safari" => Ok(BrowserKind::Webkit),
            other => Err(Error::Config(format!("Unknown browser '{}'", other))),
        }
    }
}

/// Process-wide harness configuration.
///
/// Construct with [`HarnessConfig::builder`], [`HarnessConfig::from_env`] or
/// [`HarnessConfig::from_file`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    base_url: Url,
    default_timeout: Duration,
    poll_interval: Duration,
    browser: BrowserKind,
    headless: bool,
    jobs: usize,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            default_timeout: DEFAULT_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            browser: BrowserKind::default(),
            headless: true,
            jobs: DEFAULT_JOBS,
        }
    }
}

impl HarnessConfig {
    pub fn builder() -> HarnessConfigBuilder {
        HarnessConfigBuilder::default()
    }

    /// Reads configuration from `LANDING_*` environment variables.
    ///
    /// Unset variables fall back to defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through an arbitrary key lookup.
    ///
    /// Recognised keys: `LANDING_BASE_URL`, `LANDING_TIMEOUT_MS`,
    /// `LANDING_POLL_MS`, `LANDING_BROWSER`, `LANDING_HEADLESS`, `LANDING_JOBS`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Self::builder();

        if let Some(url) = lookup("LANDING_BASE_URL") {
            builder = builder.base_url(url);
        }
        if let Some(ms) = lookup("LANDING_TIMEOUT_MS") {
            builder = builder.default_timeout(Duration::from_millis(parse_number(
                "LANDING_TIMEOUT_MS",
                &ms,
            )?));
        }
        if let Some(ms) = lookup("LANDING_POLL_MS") {
            builder = builder.poll_interval(Duration::from_millis(parse_number(
                "LANDING_POLL_MS",
                &ms,
            )?));
        }
        if let Some(browser) = lookup("LANDING_BROWSER") {
            builder = builder.browser(browser.parse()?);
        }
        if let Some(headless) = lookup("LANDING_HEADLESS") {
            builder = builder.headless(parse_bool("LANDING_HEADLESS", &headless)?);
        }
        if let Some(jobs) = lookup("LANDING_JOBS") {
            builder = builder.jobs(parse_number("LANDING_JOBS", &jobs)? as usize);
        }

        builder.build()
    }

    /// Parses a JSON configuration document.
    ///
    /// Keys are camelCase; durations are given in milliseconds:
    ///
    /// ```json
    /// { "baseUrl": "http://localhost:5173", "defaultTimeoutMs": 5000, "browser": "firefox" }
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: ConfigFile = serde_json::from_str(json)?;
        file.into_builder().build()
    }

    /// Loads a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::from(e).context(format!("reading {}", path.display())))?;
        Self::from_json_str(&contents)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The single entry point under test (`/`).
    pub fn entry_url(&self) -> String {
        self.base_url
            .join("/")
            .map(String::from)
            .unwrap_or_else(|_| self.base_url.to_string())
    }

    /// Resolves a path against the base URL.
    pub fn url_for(&self, path: &str) -> Result<String> {
        self.base_url
            .join(path)
            .map(String::from)
            .map_err(|e| Error::InvalidArgument(format!("Cannot join '{}': {}", path, e)))
    }

    pub fn default_timeout(&self) -> Duration {
        self.default_timeout
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    pub fn browser(&self) -> BrowserKind {
        self.browser
    }

    pub fn headless(&self) -> bool {
        self.headless
    }

    pub fn jobs(&self) -> usize {
        self.jobs
    }
}

/// Builder for [`HarnessConfig`].
#[derive(Debug, Clone, Default)]
pub struct HarnessConfigBuilder {
    base_url: Option<String>,
    default_timeout: Option<Duration>,
    poll_interval: Option<Duration>,
    browser: Option<BrowserKind>,
    headless: Option<bool>,
    jobs: Option<usize>,
}

impl HarnessConfigBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = Some(timeout);
        self
    }

    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = Some(interval);
        self
    }

    pub fn browser(mut self, browser: BrowserKind) -> Self {
        self.browser = Some(browser);
        self
    }

    pub fn headless(mut self, headless: bool) -> Self {
        self.headless = Some(headless);
        self
    }

    pub fn jobs(mut self, jobs: usize) -> Self {
        self.jobs = Some(jobs);
        self
    }

    pub fn build(self) -> Result<HarnessConfig> {
        let defaults = HarnessConfig::default();

        let base_url = match self.base_url {
            Some(raw) => Url::parse(&raw)
                .map_err(|e| Error::Config(format!("Invalid base URL '{}': {}", raw, e)))?,
            None => defaults.base_url,
        };
        if base_url.cannot_be_a_base() {
            return Err(Error::Config(format!(
                "Base URL '{}' cannot be used as a base",
                base_url
            )));
        }

        let default_timeout = self.default_timeout.unwrap_or(defaults.default_timeout);
        if default_timeout.is_zero() {
            return Err(Error::Config("Default timeout must be non-zero".to_string()));
        }

        let poll_interval = self.poll_interval.unwrap_or(defaults.poll_interval);
        if poll_interval.is_zero() {
            return Err(Error::Config("Poll interval must be non-zero".to_string()));
        }

        let jobs = self.jobs.unwrap_or(defaults.jobs);
        if jobs == 0 {
            return Err(Error::Config("Jobs must be at least 1".to_string()));
        }

        Ok(HarnessConfig {
            base_url,
            default_timeout,
            poll_interval,
            browser: self.browser.unwrap_or(defaults.browser),
            headless: self.headless.unwrap_or(defaults.headless),
            jobs,
        })
    }
}

/// On-disk representation of the configuration
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct ConfigFile {
    base_url: Option<String>,
    default_timeout_ms: Option<u64>,
    poll_interval_ms: Option<u64>,
    browser: Option<BrowserKind>,
    headless: Option<bool>,
    jobs: Option<usize>,
}

impl ConfigFile {
    fn into_builder(self) -> HarnessConfigBuilder {
        HarnessConfigBuilder {
            base_url: self.base_url,
            default_timeout: self.default_timeout_ms.map(Duration::from_millis),
            poll_interval: self.poll_interval_ms.map(Duration::from_millis),
            browser: self.browser,
            headless: self.headless,
            jobs: self.jobs,
        }
    }
}

fn parse_number(key: &str, raw: &str) -> Result<u64> {
    raw.trim()
        .parse()
        .map_err(|_| Error::Config(format!("{} must be a number, got '{}'", key, raw)))
}

fn parse_bool(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(Error::Config(format!(
            "{} must be a boolean, got '{}'",
            key, raw
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = HarnessConfig::default();
        assert_eq!(config.default_timeout(), Duration::from_secs(10));
        assert_eq!(config.poll_interval(), Duration::from_millis(100));
        assert_eq!(config.browser(), BrowserKind::Chromium);
        assert!(config.headless());
        assert_eq!(config.entry_url(), "http://127.0.0.1:4173/");
    }

    #[test]
    fn test_from_lookup() {
        let vars: HashMap<&str, &str> = [
            ("LANDING_BASE_URL", "http://localhost:5173/app/"),
            ("LANDING_TIMEOUT_MS", "2500"),
            ("LANDING_BROWSER", "firefox"),
            ("LANDING_HEADLESS", "0"),
            ("LANDING_JOBS", "2"),
        ]
        .into_iter()
        .collect();

        let config =
            HarnessConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string())).unwrap();

        assert_eq!(config.default_timeout(), Duration::from_millis(2500));
        assert_eq!(config.poll_interval(), DEFAULT_POLL_INTERVAL);
        assert_eq!(config.browser(), BrowserKind::Firefox);
        assert!(!config.headless());
        assert_eq!(config.jobs(), 2);
        // Entry point is always the root path
        assert_eq!(config.entry_url(), "http://localhost:5173/");
    }

    #[test]
    fn test_from_lookup_rejects_garbage() {
        let err = HarnessConfig::from_lookup(|key| {
            (key == "LANDING_TIMEOUT_MS").then(|| "soon".to_string())
        })
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = HarnessConfig::from_lookup(|key| {
            (key == "LANDING_HEADLESS").then(|| "maybe".to_string())
        })
        .unwrap_err();
        assert!(err.to_string().contains("LANDING_HEADLESS"));
    }

    #[test]
    fn test_builder_validation() {
        assert!(
            HarnessConfig::builder()
                .default_timeout(Duration::ZERO)
                .build()
                .is_err()
        );
        assert!(
            HarnessConfig::builder()
                .poll_interval(Duration::ZERO)
                .build()
                .is_err()
        );
        assert!(HarnessConfig::builder().jobs(0).build().is_err());
        assert!(HarnessConfig::builder().base_url("not a url").build().is_err());
        assert!(
            HarnessConfig::builder()
                .base_url("mailto:someone@example.com")
                .build()
                .is_err()
        );
    }

    #[test]
    fn test_url_for() {
        let config = HarnessConfig::builder()
            .base_url("http://localhost:8080")
            .build()
            .unwrap();
        assert_eq!(
            config.url_for("/index.html").unwrap(),
            "http://localhost:8080/index.html"
        );
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "baseUrl": "http://127.0.0.1:9000", "defaultTimeoutMs": 3000, "pollIntervalMs": 25, "browser": "webkit" }}"#
        )
        .unwrap();

        let config = HarnessConfig::from_file(file.path()).unwrap();
        assert_eq!(config.base_url().as_str(), "http://127.0.0.1:9000/");
        assert_eq!(config.default_timeout(), Duration::from_secs(3));
        assert_eq!(config.poll_interval(), Duration::from_millis(25));
        assert_eq!(config.browser(), BrowserKind::Webkit);
    }

    #[test]
    fn test_from_json_rejects_unknown_keys() {
        let err = HarnessConfig::from_json_str(r#"{ "timeout": 5 }"#).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_missing_file_has_context() {
        let err = HarnessConfig::from_file("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains("reading /definitely/not/here.json"));
    }
}
