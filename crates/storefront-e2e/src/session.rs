//! Browser session.
//!
//! A [`Session`] is one isolated browser context for one test: its own
//! cookies, its own history, its own cart. It is a cheap handle; clones share
//! the same underlying driver, which is how page and component objects all
//! act on the same page without owning it.

use crate::config::SuiteConfig;
use crate::driver::Driver;
use crate::locator::Locator;
use crate::result::{E2eError, E2eResult};
use crate::selector::{AriaRole, Selector, Step};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

struct SessionInner {
    id: Uuid,
    driver: Box<dyn Driver>,
    config: Arc<SuiteConfig>,
    closed: AtomicBool,
}

/// Handle to one browser context
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.inner.id)
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}

/// Handles are equal when they refer to the same browser context
impl PartialEq for Session {
    fn eq(&self, other: &Self) -> bool {
        self.inner.id == other.inner.id
    }
}

impl Eq for Session {}

impl Session {
    /// Wrap a freshly created driver
    #[must_use]
    pub fn new(driver: Box<dyn Driver>, config: Arc<SuiteConfig>) -> Self {
        let id = Uuid::new_v4();
        debug!(%id, "session opened");
        Self {
            inner: Arc::new(SessionInner {
                id,
                driver,
                config,
                closed: AtomicBool::new(false),
            }),
        }
    }

    /// Unique session id
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.inner.id
    }

    /// Resolved suite configuration
    #[must_use]
    pub fn config(&self) -> &SuiteConfig {
        &self.inner.config
    }

    /// Whether [`Session::close`] has run
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.inner.closed.load(Ordering::SeqCst)
    }

    pub(crate) fn driver(&self) -> E2eResult<&dyn Driver> {
        if self.is_closed() {
            return Err(E2eError::SessionClosed {
                id: self.inner.id.to_string(),
            });
        }
        Ok(self.inner.driver.as_ref())
    }

    /// Locator for the whole document
    #[must_use]
    pub fn root(&self) -> Locator {
        Locator::new(self.clone(), Selector::root())
    }

    /// Locator for a CSS selector
    #[must_use]
    pub fn locator(&self, css: &str) -> Locator {
        self.root().locator(css)
    }

    /// Locator for inputs whose placeholder contains `text`
    #[must_use]
    pub fn get_by_placeholder(&self, text: &str) -> Locator {
        self.root().get_by_placeholder(text)
    }

    /// Locator for elements with `role`, optionally filtered by accessible name
    #[must_use]
    pub fn get_by_role(&self, role: AriaRole, name: Option<&str>) -> Locator {
        self.root().then(Step::Role {
            role,
            name: name.map(str::to_string),
        })
    }

    /// Navigate to a path relative to the base URL (or an absolute URL)
    pub async fn goto(&self, path: &str) -> E2eResult<()> {
        let url = self.inner.config.url_for(path);
        debug!(session = %self.inner.id, %url, "goto");
        self.driver()?.navigate(&url).await
    }

    /// Current page URL
    pub async fn url(&self) -> E2eResult<String> {
        self.driver()?.current_url().await
    }

    /// Browser back button
    pub async fn go_back(&self) -> E2eResult<()> {
        self.driver()?.go_back().await
    }

    /// Drop cookies and storage, which logs the user out
    pub async fn clear_cookies(&self) -> E2eResult<()> {
        self.driver()?.clear_cookies().await
    }

    /// Tear down the browser context. Later calls are no-ops.
    pub async fn close(&self) -> E2eResult<()> {
        if self.inner.closed.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        info!(session = %self.inner.id, "session closed");
        self.inner.driver.close().await
    }
}
