//! Driver: the browser-automation engine seam.
//!
//! Page and component objects never talk to an engine directly. They hold
//! [`Locator`](crate::Locator)s, and a locator asks the session's [`Driver`]
//! to probe or act on the elements its [`Selector`] resolves to *right now*.
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │  Driver (async trait)                                          │
//! ├───────────────────────────────────────────────────────────────┤
//! │  ┌──────────────────────┐        ┌──────────────────────────┐ │
//! │  │  ChromiumDriver      │        │  MockStorefront          │ │
//! │  │  (feature "browser") │        │  (in-memory replica)     │ │
//! │  │  CDP via             │        │  tiny DOM + CSS matcher  │ │
//! │  │  chromiumoxide       │        │  used by the test suite  │ │
//! │  └──────────────────────┘        └──────────────────────────┘ │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! Drivers are deliberately dumb: `probe` reports what matches at call time
//! and actions operate on one index of that match set, failing with
//! [`E2eError::ElementDetached`](crate::E2eError::ElementDetached) if it is
//! gone. Waiting for actionability is the locator's job.

pub mod script;

#[cfg(feature = "browser")]
pub mod chromium;

use crate::result::E2eResult;
use crate::selector::Selector;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[cfg(feature = "browser")]
pub use chromium::{ChromiumDriver, ChromiumLauncher};

/// Snapshot of one matched element at probe time
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementState {
    /// Rendered and not hidden by itself or an ancestor
    pub visible: bool,
    /// Not disabled
    pub enabled: bool,
    /// Rendered text
    pub text: String,
    /// Current value for form controls
    pub value: Option<String>,
}

impl ElementState {
    /// Whether an interaction may proceed on this element
    #[must_use]
    pub const fn is_actionable(&self) -> bool {
        self.visible && self.enabled
    }
}

/// Browser-automation engine adapter.
///
/// One driver instance backs exactly one [`Session`](crate::Session).
#[async_trait]
pub trait Driver: Send + Sync + std::fmt::Debug {
    /// Navigate to an absolute URL and wait for the load to settle
    async fn navigate(&self, url: &str) -> E2eResult<()>;

    /// Current page URL
    async fn current_url(&self) -> E2eResult<String>;

    /// Go back one history entry.
    ///
    /// Fails with [`E2eError::Navigation`](crate::E2eError::Navigation) when
    /// there is nothing to go back to or the URL does not change in time.
    async fn go_back(&self) -> E2eResult<()>;

    /// Describe every element the selector resolves to, in document order
    async fn probe(&self, selector: &Selector) -> E2eResult<Vec<ElementState>>;

    /// Click the `index`th match
    async fn click(&self, selector: &Selector, index: usize) -> E2eResult<()>;

    /// Replace the value of the `index`th match, firing input events
    async fn fill(&self, selector: &Selector, index: usize, text: &str) -> E2eResult<()>;

    /// Choose an option by value on the `index`th match
    async fn select_option(&self, selector: &Selector, index: usize, value: &str)
        -> E2eResult<()>;

    /// Drop cookies and storage for the current origin
    async fn clear_cookies(&self) -> E2eResult<()>;

    /// Release the underlying browser context
    async fn close(&self) -> E2eResult<()>;
}

/// Creates one fresh driver per test session
#[async_trait]
pub trait DriverFactory: Send + Sync {
    /// Launch or connect a new, isolated driver
    async fn create(&self) -> E2eResult<Box<dyn Driver>>;
}
