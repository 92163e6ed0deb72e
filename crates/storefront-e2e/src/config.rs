//! Suite configuration.
//!
//! Configuration is resolved in layers, lowest precedence first:
//!
//! 1. Built-in defaults (the public Sauce Demo deployment)
//! 2. A YAML file named by `E2E_CONFIG`
//! 3. A `.env` file in the working directory, then the process environment
//!
//! Page and component objects never read configuration themselves. They
//! receive the already-resolved strings and durations through the
//! [`Session`](crate::Session).

use crate::result::{E2eError, E2eResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default storefront deployment
pub const DEFAULT_BASE_URL: &str = "https://www.saucedemo.com/";

/// Shared password of every demo account
pub const DEFAULT_PASSWORD: &str = "secret_sauce";

/// Named demo accounts, each exhibiting a different application behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Regular, well-behaved account
    Standard,
    /// Account that is refused at login
    LockedOut,
    /// Account with broken images and buggy widgets
    Problem,
    /// Account whose pages render slowly
    PerformanceGlitch,
    /// Account whose forms misbehave
    Error,
    /// Account with visual differences
    Visual,
}

impl UserRole {
    /// All roles
    pub const ALL: [Self; 6] = [
        Self::Standard,
        Self::LockedOut,
        Self::Problem,
        Self::PerformanceGlitch,
        Self::Error,
        Self::Visual,
    ];

    /// Environment variable overriding this role's username
    #[must_use]
    pub const fn env_var(self) -> &'static str {
        match self {
            Self::Standard => "STANDARD_USER",
            Self::LockedOut => "LOCKED_USER",
            Self::Problem => "PROBLEM_USER",
            Self::PerformanceGlitch => "PERFORMANCE_USER",
            Self::Error => "ERROR_USER",
            Self::Visual => "VISUAL_USER",
        }
    }
}

/// Usernames per role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserNames {
    /// Standard account
    pub standard: String,
    /// Locked-out account
    pub locked_out: String,
    /// Problem account
    pub problem: String,
    /// Performance-glitch account
    pub performance_glitch: String,
    /// Error account
    pub error: String,
    /// Visual account
    pub visual: String,
}

impl Default for UserNames {
    fn default() -> Self {
        Self {
            standard: "standard_user".into(),
            locked_out: "locked_out_user".into(),
            problem: "problem_user".into(),
            performance_glitch: "performance_glitch_user".into(),
            error: "error_user".into(),
            visual: "visual_user".into(),
        }
    }
}

impl UserNames {
    /// Username for a role
    #[must_use]
    pub fn get(&self, role: UserRole) -> &str {
        match role {
            UserRole::Standard => &self.standard,
            UserRole::LockedOut => &self.locked_out,
            UserRole::Problem => &self.problem,
            UserRole::PerformanceGlitch => &self.performance_glitch,
            UserRole::Error => &self.error,
            UserRole::Visual => &self.visual,
        }
    }

    fn get_mut(&mut self, role: UserRole) -> &mut String {
        match role {
            UserRole::Standard => &mut self.standard,
            UserRole::LockedOut => &mut self.locked_out,
            UserRole::Problem => &mut self.problem,
            UserRole::PerformanceGlitch => &mut self.performance_glitch,
            UserRole::Error => &mut self.error,
            UserRole::Visual => &mut self.visual,
        }
    }
}

/// A username/password pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Username
    pub username: String,
    /// Password
    pub password: String,
}

/// Timeouts in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timeouts {
    /// Bound on each locator action or query
    pub action_ms: u64,
    /// Bound on each web-first assertion
    pub expect_ms: u64,
    /// Bound on page navigation
    pub navigation_ms: u64,
    /// Bound on a whole test body
    pub test_ms: u64,
    /// Interval between actionability probes
    pub poll_interval_ms: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            action_ms: 10_000,
            expect_ms: 5_000,
            navigation_ms: 30_000,
            test_ms: 30_000,
            poll_interval_ms: 50,
        }
    }
}

impl Timeouts {
    /// Action timeout
    #[must_use]
    pub const fn action(&self) -> Duration {
        Duration::from_millis(self.action_ms)
    }

    /// Assertion timeout
    #[must_use]
    pub const fn expect(&self) -> Duration {
        Duration::from_millis(self.expect_ms)
    }

    /// Navigation timeout
    #[must_use]
    pub const fn navigation(&self) -> Duration {
        Duration::from_millis(self.navigation_ms)
    }

    /// Whole-test timeout
    #[must_use]
    pub const fn test(&self) -> Duration {
        Duration::from_millis(self.test_ms)
    }

    /// Poll interval
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Browser launch settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserSettings {
    /// Run in headless mode
    pub headless: bool,
    /// Path to chromium binary (None = auto-detect)
    pub chromium_path: Option<String>,
    /// Viewport width
    pub viewport_width: u32,
    /// Viewport height
    pub viewport_height: u32,
    /// Sandbox mode (disable for containers)
    pub sandbox: bool,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            headless: true,
            chromium_path: None,
            viewport_width: 1280,
            viewport_height: 720,
            sandbox: true,
        }
    }
}

/// Complete suite configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuiteConfig {
    /// Storefront root URL
    pub base_url: String,
    /// Password shared by all roles
    pub password: String,
    /// Usernames per role
    pub users: UserNames,
    /// Timeouts
    pub timeouts: Timeouts,
    /// Browser launch settings
    pub browser: BrowserSettings,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            password: DEFAULT_PASSWORD.into(),
            users: UserNames::default(),
            timeouts: Timeouts::default(),
            browser: BrowserSettings::default(),
        }
    }
}

impl SuiteConfig {
    /// Resolve configuration from defaults, `E2E_CONFIG`, `.env` and the
    /// process environment.
    pub fn load() -> E2eResult<Self> {
        // A missing .env file is the normal case
        let _ = dotenvy::dotenv();

        let mut config = match std::env::var("E2E_CONFIG") {
            Ok(path) => Self::from_yaml_file(path)?,
            Err(_) => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Load configuration from a YAML file; absent keys keep their defaults.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> E2eResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&text)
    }

    /// Parse configuration from YAML text
    pub fn from_yaml_str(text: &str) -> E2eResult<Self> {
        Ok(serde_yaml_ng::from_str(text)?)
    }

    /// Overlay values from an environment-like lookup
    pub fn apply_env<F>(&mut self, lookup: F) -> E2eResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("BASE_URL") {
            self.base_url = url;
        }
        if let Some(password) = lookup("TEST_PASSWORD") {
            self.password = password;
        }
        for role in UserRole::ALL {
            if let Some(name) = lookup(role.env_var()) {
                *self.users.get_mut(role) = name;
            }
        }
        if let Some(raw) = lookup("ACTION_TIMEOUT_MS") {
            self.timeouts.action_ms = parse_millis("ACTION_TIMEOUT_MS", &raw)?;
        }
        if let Some(raw) = lookup("EXPECT_TIMEOUT_MS") {
            self.timeouts.expect_ms = parse_millis("EXPECT_TIMEOUT_MS", &raw)?;
        }
        if let Some(raw) = lookup("TEST_TIMEOUT_MS") {
            self.timeouts.test_ms = parse_millis("TEST_TIMEOUT_MS", &raw)?;
        }
        if let Some(raw) = lookup("HEADLESS") {
            self.browser.headless = parse_flag("HEADLESS", &raw)?;
        }
        if let Some(path) = lookup("CHROMIUM_PATH") {
            self.browser.chromium_path = Some(path);
        }
        Ok(())
    }

    /// Replace the base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Replace all timeouts
    #[must_use]
    pub const fn with_timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Credentials for a role
    #[must_use]
    pub fn credentials(&self, role: UserRole) -> Credentials {
        Credentials {
            username: self.users.get(role).to_string(),
            password: self.password.clone(),
        }
    }

    /// Absolute URL for a path relative to the base URL
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") || path.starts_with("about:")
        {
            return path.to_string();
        }
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Path (with query) of `url` below the base URL, or `url` unchanged when
    /// it lies elsewhere
    #[must_use]
    pub fn relative_path(&self, url: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        match url.strip_prefix(base) {
            Some(rest) if rest.starts_with('/') => rest.to_string(),
            Some(rest) if rest.is_empty() || rest.starts_with(['?', '#']) => format!("/{rest}"),
            _ => url.to_string(),
        }
    }
}

fn parse_millis(key: &str, raw: &str) -> E2eResult<u64> {
    raw.trim().parse().map_err(|_| E2eError::Config {
        message: format!("{key} must be a number of milliseconds, got {raw:?}"),
    })
}

fn parse_flag(key: &str, raw: &str) -> E2eResult<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(E2eError::Config {
            message: format!("{key} must be a boolean, got {raw:?}"),
        }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    mod defaults_tests {
        use super::*;

        #[test]
        fn test_defaults_target_public_demo() {
            let config = SuiteConfig::default();
            assert_eq!(config.base_url, DEFAULT_BASE_URL);
            assert_eq!(config.users.get(UserRole::LockedOut), "locked_out_user");
            assert_eq!(config.timeouts.expect_ms, 5_000);
            assert!(config.browser.headless);
        }

        #[test]
        fn test_credentials_share_password() {
            let config = SuiteConfig::default();
            let creds = config.credentials(UserRole::PerformanceGlitch);
            assert_eq!(creds.username, "performance_glitch_user");
            assert_eq!(creds.password, "secret_sauce");
        }

        #[test]
        fn test_url_for_joins_single_slash() {
            let config = SuiteConfig::default();
            assert_eq!(
                config.url_for("/inventory.html"),
                "https://www.saucedemo.com/inventory.html"
            );
            assert_eq!(
                config.url_for("cart.html"),
                "https://www.saucedemo.com/cart.html"
            );
            assert_eq!(config.url_for("/"), "https://www.saucedemo.com/");
            assert_eq!(config.url_for("https://other.test/x"), "https://other.test/x");
        }

        #[test]
        fn test_relative_path_strips_base() {
            let config = SuiteConfig::default().with_base_url("http://localhost:8080/shop/");
            assert_eq!(
                config.relative_path("http://localhost:8080/shop/cart.html"),
                "/cart.html"
            );
            assert_eq!(config.relative_path("http://localhost:8080/shop"), "/");
            assert_eq!(
                config.relative_path("https://elsewhere.test/cart.html"),
                "https://elsewhere.test/cart.html"
            );
        }
    }

    mod env_tests {
        use super::*;

        #[test]
        fn test_env_overrides_users_and_url() {
            let mut config = SuiteConfig::default();
            config
                .apply_env(lookup_from(&[
                    ("BASE_URL", "http://localhost:3000/"),
                    ("STANDARD_USER", "alice"),
                    ("TEST_PASSWORD", "hunter2"),
                ]))
                .unwrap();

            assert_eq!(config.base_url, "http://localhost:3000/");
            assert_eq!(config.users.standard, "alice");
            assert_eq!(config.password, "hunter2");
            assert_eq!(config.users.visual, "visual_user");
        }

        #[test]
        fn test_env_timeouts_and_flags() {
            let mut config = SuiteConfig::default();
            config
                .apply_env(lookup_from(&[
                    ("ACTION_TIMEOUT_MS", "2500"),
                    ("HEADLESS", "false"),
                ]))
                .unwrap();
            assert_eq!(config.timeouts.action(), Duration::from_millis(2500));
            assert!(!config.browser.headless);
        }

        #[test]
        fn test_env_rejects_bad_numbers() {
            let mut config = SuiteConfig::default();
            let err = config
                .apply_env(lookup_from(&[("TEST_TIMEOUT_MS", "soon")]))
                .unwrap_err();
            assert!(matches!(err, E2eError::Config { .. }));
        }
    }

    mod yaml_tests {
        use super::*;

        #[test]
        fn test_partial_yaml_keeps_defaults() {
            let config = SuiteConfig::from_yaml_str(
                "base_url: http://staging.local/\ntimeouts:\n  expect_ms: 900\n",
            )
            .unwrap();
            assert_eq!(config.base_url, "http://staging.local/");
            assert_eq!(config.timeouts.expect_ms, 900);
            assert_eq!(config.timeouts.action_ms, 10_000);
            assert_eq!(config.users, UserNames::default());
        }

        #[test]
        fn test_yaml_file_roundtrip() {
            let mut file = tempfile::NamedTempFile::new().unwrap();
            writeln!(file, "password: pw\nusers:\n  error: broken_user").unwrap();

            let config = SuiteConfig::from_yaml_file(file.path()).unwrap();
            assert_eq!(config.password, "pw");
            assert_eq!(config.users.get(UserRole::Error), "broken_user");
        }

        #[test]
        fn test_invalid_yaml_is_an_error() {
            let err = SuiteConfig::from_yaml_str("timeouts: [1, 2").unwrap_err();
            assert!(matches!(err, E2eError::Yaml(_)));
        }
    }
}
