//! In-memory storefront for testing without a browser.
//!
//! [`MockStorefront`] implements [`Driver`] over a small replica of the
//! storefront: the same routes, DOM contract, validation messages and user
//! quirks, rendered into a tiny DOM that the selector chain is evaluated
//! against. Like a real page, it re-renders after every interaction, so
//! nothing a test holds can go stale without the locator noticing.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use storefront_e2e::mock::MockStorefront;
//! use storefront_e2e::{Session, SuiteConfig};
//!
//! # tokio_test_block_on(async {
//! let session = Session::new(Box::new(MockStorefront::new()), Arc::new(SuiteConfig::default()));
//! session.goto("/").await?;
//! assert_eq!(session.locator("#login-button").count().await?, 1);
//! # Ok::<(), storefront_e2e::E2eError>(())
//! # });
//! # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(f)
//! # }
//! ```

pub mod dom;
pub mod storefront;

use crate::driver::{Driver, DriverFactory, ElementState};
use crate::result::{E2eError, E2eResult};
use crate::selector::Selector;
use async_trait::async_trait;
use dom::NodePath;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use storefront::{Action, Store, DEFAULT_RENDER_DELAY};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// In-memory storefront driver.
///
/// Clones share state, so a test can keep a handle for inspection while the
/// session owns another.
#[derive(Debug, Clone)]
pub struct MockStorefront {
    store: Arc<Mutex<Store>>,
    call_history: Arc<Mutex<Vec<String>>>,
    closed: Arc<AtomicBool>,
}

impl Default for MockStorefront {
    fn default() -> Self {
        Self::new()
    }
}

impl MockStorefront {
    /// Fresh, logged-out storefront on `about:blank`
    #[must_use]
    pub fn new() -> Self {
        Self::with_render_delay(DEFAULT_RENDER_DELAY)
    }

    /// Storefront whose slow account takes `delay` to render the inventory
    #[must_use]
    pub fn with_render_delay(delay: Duration) -> Self {
        Self {
            store: Arc::new(Mutex::new(Store::new(delay))),
            call_history: Arc::new(Mutex::new(Vec::new())),
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Interactions received so far (`navigate:<url>`, `click:<selector>`, ...)
    #[must_use]
    pub fn call_history(&self) -> Vec<String> {
        lock(&self.call_history).clone()
    }

    /// Check if method was called
    #[must_use]
    pub fn was_called(&self, method: &str) -> bool {
        lock(&self.call_history)
            .iter()
            .any(|c| c.starts_with(method))
    }

    /// Whether [`Driver::close`] has been called
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Number of products in the cart
    #[must_use]
    pub fn cart_len(&self) -> usize {
        lock(&self.store).cart().len()
    }

    fn record(&self, call: String) {
        lock(&self.call_history).push(call);
    }

    fn ensure_open(&self) -> E2eResult<()> {
        if self.is_closed() {
            return Err(E2eError::driver("storefront page is closed"));
        }
        Ok(())
    }

    /// Resolve the `index`th match against the current render
    fn target(&self, store: &Store, selector: &Selector, index: usize) -> E2eResult<(NodePath, Option<Action>)> {
        let dom = store.render();
        let paths = dom.resolve(selector).map_err(E2eError::driver)?;
        let path = paths
            .into_iter()
            .nth(index)
            .ok_or_else(|| E2eError::ElementDetached {
                selector: selector.to_string(),
            })?;
        let action = dom.action_for(&path);
        Ok((path, action))
    }
}

#[async_trait]
impl Driver for MockStorefront {
    async fn navigate(&self, url: &str) -> E2eResult<()> {
        self.ensure_open()?;
        self.record(format!("navigate:{url}"));
        lock(&self.store).navigate(url);
        Ok(())
    }

    async fn current_url(&self) -> E2eResult<String> {
        self.ensure_open()?;
        Ok(lock(&self.store).url())
    }

    async fn go_back(&self) -> E2eResult<()> {
        self.ensure_open()?;
        self.record("go_back".to_string());
        let mut store = lock(&self.store);
        if store.go_back() {
            return Ok(());
        }
        Err(E2eError::Navigation {
            url: store.url(),
            message: "history.back() did not change the URL".to_string(),
        })
    }

    async fn probe(&self, selector: &Selector) -> E2eResult<Vec<ElementState>> {
        self.ensure_open()?;
        let dom = lock(&self.store).render();
        let paths = dom.resolve(selector).map_err(E2eError::driver)?;
        Ok(paths.iter().map(|path| dom.state(path)).collect())
    }

    async fn click(&self, selector: &Selector, index: usize) -> E2eResult<()> {
        self.ensure_open()?;
        self.record(format!("click:{selector}"));
        let mut store = lock(&self.store);
        let (_, action) = self.target(&store, selector, index)?;
        if let Some(action) = action {
            store.click(action);
        }
        Ok(())
    }

    async fn fill(&self, selector: &Selector, index: usize, text: &str) -> E2eResult<()> {
        self.ensure_open()?;
        self.record(format!("fill:{selector}"));
        let mut store = lock(&self.store);
        match self.target(&store, selector, index)? {
            (_, Some(Action::Input(field))) => {
                store.fill(field, text);
                Ok(())
            }
            _ => Err(E2eError::driver(format!("{selector}: element is not a text input"))),
        }
    }

    async fn select_option(&self, selector: &Selector, index: usize, value: &str) -> E2eResult<()> {
        self.ensure_open()?;
        self.record(format!("select_option:{selector}={value}"));
        let mut store = lock(&self.store);
        match self.target(&store, selector, index)? {
            (_, Some(Action::Sort)) if store.select_sort(value) => Ok(()),
            (_, Some(Action::Sort)) => Err(E2eError::driver(format!(
                "{selector}: no option with value {value}"
            ))),
            _ => Err(E2eError::driver(format!("{selector}: element is not a <select>"))),
        }
    }

    async fn clear_cookies(&self) -> E2eResult<()> {
        self.ensure_open()?;
        self.record("clear_cookies".to_string());
        lock(&self.store).clear_cookies();
        Ok(())
    }

    async fn close(&self) -> E2eResult<()> {
        self.record("close".to_string());
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

/// Hands out a fresh [`MockStorefront`] per session and remembers each one
#[derive(Debug, Clone, Default)]
pub struct MockStorefrontFactory {
    render_delay: Option<Duration>,
    fail_launch: bool,
    created: Arc<Mutex<Vec<MockStorefront>>>,
}

impl MockStorefrontFactory {
    /// Factory with the default render delay
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Factory whose storefronts use `delay` for the slow account
    #[must_use]
    pub fn with_render_delay(mut self, delay: Duration) -> Self {
        self.render_delay = Some(delay);
        self
    }

    /// Factory whose every launch fails, for exercising setup errors
    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail_launch: true,
            ..Self::default()
        }
    }

    /// Every storefront created so far, oldest first
    #[must_use]
    pub fn storefronts(&self) -> Vec<MockStorefront> {
        lock(&self.created).clone()
    }

    /// Number of storefronts created
    #[must_use]
    pub fn created(&self) -> usize {
        lock(&self.created).len()
    }

    /// Number of storefronts that have been closed
    #[must_use]
    pub fn closed(&self) -> usize {
        lock(&self.created).iter().filter(|s| s.is_closed()).count()
    }
}

#[async_trait]
impl DriverFactory for MockStorefrontFactory {
    async fn create(&self) -> E2eResult<Box<dyn Driver>> {
        if self.fail_launch {
            return Err(E2eError::BrowserLaunch {
                message: "mock launch failure".to_string(),
            });
        }
        let storefront = self
            .render_delay
            .map_or_else(MockStorefront::new, MockStorefront::with_render_delay);
        lock(&self.created).push(storefront.clone());
        Ok(Box::new(storefront))
    }
}
