//! Locator abstraction for element selection and interaction.
//!
//! # Design Philosophy
//!
//! - **Re-resolving**: a locator is a recipe, never a cached node. Every call
//!   probes the live page through the session's driver, so a locator built
//!   before a re-render keeps working after it.
//! - **Auto-Waiting**: actions poll until exactly one target is visible and
//!   enabled, bounded by the action timeout.
//! - **Strict Selection**: a strict locator that resolves to several elements
//!   fails with [`E2eError::StrictModeViolation`] instead of guessing.
//! - **Fluent API**: chainable scoping (`locator`, `get_by_role`,
//!   `filter_has_text`, `nth`) builds a [`Selector`] chain.

use crate::driver::ElementState;
use crate::result::{E2eError, E2eResult};
use crate::selector::{AriaRole, Selector, Step};
use crate::session::Session;
use crate::wait::{poll_until, WaitOptions};
use std::fmt;
use std::time::Duration;
use tracing::debug;

/// Locator options for customizing behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocatorOptions {
    /// Timeout for auto-waiting
    pub timeout: Duration,
    /// Polling interval for auto-waiting
    pub poll_interval: Duration,
    /// Whether to require strict single-element match
    pub strict: bool,
}

impl LocatorOptions {
    fn wait_options(&self) -> WaitOptions {
        WaitOptions::new()
            .with_timeout(u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX))
            .with_poll_interval(u64::try_from(self.poll_interval.as_millis()).unwrap_or(u64::MAX))
    }
}

/// States [`Locator::wait_for`] can wait for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WaitState {
    /// At least one match exists
    Attached,
    /// No match exists
    Detached,
    /// The match is rendered
    Visible,
    /// The match is rendered and enabled
    Actionable,
    /// No match exists or it is not rendered
    Hidden,
}

impl WaitState {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Attached => "attached",
            Self::Detached => "detached",
            Self::Visible => "visible",
            Self::Actionable => "actionable",
            Self::Hidden => "hidden",
        }
    }
}

/// A recipe for finding elements in a session's page
#[derive(Clone)]
pub struct Locator {
    session: Session,
    selector: Selector,
    options: LocatorOptions,
}

impl fmt::Debug for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Locator")
            .field("session", &self.session.id())
            .field("selector", &self.selector.to_string())
            .field("options", &self.options)
            .finish()
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.selector)
    }
}

/// Two locators are equal when they were built the same way on the same
/// session. Resolved elements play no part.
impl PartialEq for Locator {
    fn eq(&self, other: &Self) -> bool {
        self.session.id() == other.session.id()
            && self.selector == other.selector
            && self.options == other.options
    }
}

impl Eq for Locator {}

impl Locator {
    /// Locator for `selector` with the session's action timeout
    #[must_use]
    pub fn new(session: Session, selector: Selector) -> Self {
        let timeouts = session.config().timeouts;
        Self {
            session,
            selector,
            options: LocatorOptions {
                timeout: timeouts.action(),
                poll_interval: timeouts.poll_interval(),
                strict: true,
            },
        }
    }

    pub(crate) fn then(&self, step: Step) -> Self {
        Self {
            session: self.session.clone(),
            selector: self.selector.clone().then(step),
            options: self.options,
        }
    }

    /// Descendants matching `css`
    #[must_use]
    pub fn locator(&self, css: &str) -> Self {
        self.then(Step::Css(css.to_string()))
    }

    /// Descendants with `role`, optionally filtered by a case-insensitive
    /// accessible-name substring
    #[must_use]
    pub fn get_by_role(&self, role: AriaRole, name: Option<&str>) -> Self {
        self.then(Step::Role {
            role,
            name: name.map(str::to_string),
        })
    }

    /// Descendant inputs whose placeholder contains `text`
    #[must_use]
    pub fn get_by_placeholder(&self, text: &str) -> Self {
        self.then(Step::Placeholder(text.to_string()))
    }

    /// Keep matches whose text content contains `text` (case-sensitive)
    #[must_use]
    pub fn filter_has_text(&self, text: &str) -> Self {
        self.then(Step::HasText(text.to_string()))
    }

    /// Keep the `index`th match
    #[must_use]
    pub fn nth(&self, index: usize) -> Self {
        self.then(Step::Nth(index))
    }

    /// Keep the first match
    #[must_use]
    pub fn first(&self) -> Self {
        self.nth(0)
    }

    /// Override the wait bound for this locator and everything derived from it
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.options.timeout = timeout;
        self
    }

    /// Allow or forbid multiple matches
    #[must_use]
    pub const fn with_strict(mut self, strict: bool) -> Self {
        self.options.strict = strict;
        self
    }

    /// Get the selector
    #[must_use]
    pub const fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Get the options
    #[must_use]
    pub const fn options(&self) -> &LocatorOptions {
        &self.options
    }

    /// Session this locator resolves in
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    pub(crate) async fn probe(&self) -> E2eResult<Vec<ElementState>> {
        self.session.driver()?.probe(&self.selector).await
    }

    fn strict_violation(&self, count: usize) -> E2eError {
        E2eError::StrictModeViolation {
            selector: self.selector.to_string(),
            count,
        }
    }

    /// The single element this locator targets right now, if any
    async fn single(&self) -> E2eResult<Option<ElementState>> {
        let mut states = self.probe().await?;
        if states.len() > 1 && self.options.strict {
            return Err(self.strict_violation(states.len()));
        }
        if states.is_empty() {
            return Ok(None);
        }
        Ok(Some(states.swap_remove(0)))
    }

    async fn wait_single(&self, state: &str) -> E2eResult<ElementState> {
        let this = self;
        poll_until(
            &self.selector.to_string(),
            state,
            &self.options.wait_options(),
            move || this.single(),
        )
        .await
    }

    async fn wait_actionable(&self) -> E2eResult<()> {
        self.wait_single_where("actionable", ElementState::is_actionable)
            .await
            .map(|_| ())
    }

    async fn wait_single_where(
        &self,
        state: &str,
        accept: fn(&ElementState) -> bool,
    ) -> E2eResult<ElementState> {
        let this = self;
        poll_until(
            &self.selector.to_string(),
            state,
            &self.options.wait_options(),
            move || async move {
                Ok(this.single().await?.filter(|element| accept(element)))
            },
        )
        .await
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Number of matches right now. Does not wait.
    pub async fn count(&self) -> E2eResult<usize> {
        Ok(self.probe().await?.len())
    }

    /// Whether the target is rendered right now. Does not wait; an absent
    /// target is simply not visible.
    pub async fn is_visible(&self) -> E2eResult<bool> {
        Ok(self.single().await?.is_some_and(|element| element.visible))
    }

    /// Whether the target is enabled right now. An absent target is not.
    pub async fn is_enabled(&self) -> E2eResult<bool> {
        Ok(self.single().await?.is_some_and(|element| element.enabled))
    }

    /// Rendered text of the target, waiting for it to attach
    pub async fn inner_text(&self) -> E2eResult<String> {
        Ok(self.wait_single("attached").await?.text)
    }

    /// Rendered text of every match, in document order. Does not wait.
    pub async fn all_inner_texts(&self) -> E2eResult<Vec<String>> {
        Ok(self
            .probe()
            .await?
            .into_iter()
            .map(|element| element.text)
            .collect())
    }

    /// Current value of a form control, waiting for it to attach
    pub async fn input_value(&self) -> E2eResult<String> {
        Ok(self
            .wait_single("attached")
            .await?
            .value
            .unwrap_or_default())
    }

    // -------------------------------------------------------------------------
    // Actions
    // -------------------------------------------------------------------------

    /// Click the target once it is visible and enabled
    pub async fn click(&self) -> E2eResult<()> {
        debug!(selector = %self.selector, "click");
        let this = self;
        poll_until(
            &self.selector.to_string(),
            "actionable",
            &self.options.wait_options(),
            move || async move {
                if this.single().await?.is_some_and(|e| e.is_actionable()) {
                    this.session.driver()?.click(&this.selector, 0).await?;
                    return Ok(Some(()));
                }
                Ok(None)
            },
        )
        .await
    }

    /// Replace the target's value once it is visible and enabled
    pub async fn fill(&self, text: &str) -> E2eResult<()> {
        debug!(selector = %self.selector, len = text.len(), "fill");
        let this = self;
        poll_until(
            &self.selector.to_string(),
            "actionable",
            &self.options.wait_options(),
            move || async move {
                if this.single().await?.is_some_and(|e| e.is_actionable()) {
                    this.session.driver()?.fill(&this.selector, 0, text).await?;
                    return Ok(Some(()));
                }
                Ok(None)
            },
        )
        .await
    }

    /// Choose an option by value once the target is visible and enabled
    pub async fn select_option(&self, value: &str) -> E2eResult<()> {
        debug!(selector = %self.selector, value, "select_option");
        let this = self;
        poll_until(
            &self.selector.to_string(),
            "actionable",
            &self.options.wait_options(),
            move || async move {
                if this.single().await?.is_some_and(|e| e.is_actionable()) {
                    this.session
                        .driver()?
                        .select_option(&this.selector, 0, value)
                        .await?;
                    return Ok(Some(()));
                }
                Ok(None)
            },
        )
        .await
    }

    /// Wait until the target reaches `state`
    pub async fn wait_for(&self, state: WaitState) -> E2eResult<()> {
        match state {
            WaitState::Attached => self.wait_single("attached").await.map(|_| ()),
            WaitState::Visible => self
                .wait_single_where("visible", |e| e.visible)
                .await
                .map(|_| ()),
            WaitState::Actionable => self.wait_actionable().await,
            WaitState::Detached | WaitState::Hidden => {
                let this = self;
                poll_until(
                    &self.selector.to_string(),
                    state.as_str(),
                    &self.options.wait_options(),
                    move || async move {
                        let gone = match this.single().await? {
                            None => true,
                            Some(element) => state == WaitState::Hidden && !element.visible,
                        };
                        Ok(gone.then_some(()))
                    },
                )
                .await
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::config::SuiteConfig;
    use crate::mock::MockStorefront;
    use std::sync::Arc;

    async fn login_screen() -> Session {
        let session = Session::new(
            Box::new(MockStorefront::new()),
            Arc::new(SuiteConfig::default()),
        );
        session.goto("/").await.unwrap();
        session
    }

    mod builder_tests {
        use super::*;

        #[tokio::test]
        async fn test_chain_builds_selector() {
            let session = login_screen().await;
            let locator = session
                .locator(".inventory_item")
                .filter_has_text("Backpack")
                .get_by_role(AriaRole::Button, Some("add to cart"));
            assert_eq!(locator.selector().steps().len(), 3);
        }

        #[tokio::test]
        async fn test_equality_is_by_construction() {
            let session = login_screen().await;
            let a = session.locator("#login-button");
            let b = session.locator("#login-button");
            assert_eq!(a, b);
            assert_ne!(a, b.clone().with_timeout(Duration::from_millis(1)));
            assert_ne!(a, session.locator("#user-name"));
        }

        #[tokio::test]
        async fn test_default_timeout_comes_from_config() {
            let session = login_screen().await;
            let locator = session.locator("#login-button");
            assert_eq!(locator.options().timeout, Duration::from_millis(10_000));
            assert!(locator.options().strict);
        }
    }

    mod query_tests {
        use super::*;

        #[tokio::test]
        async fn test_count_and_visibility() {
            let session = login_screen().await;
            assert_eq!(session.locator("#login-button").count().await.unwrap(), 1);
            assert!(session.locator("#login-button").is_visible().await.unwrap());
            assert!(!session.locator(".inventory_item").is_visible().await.unwrap());
        }

        #[tokio::test]
        async fn test_placeholder_is_case_insensitive() {
            let session = login_screen().await;
            let locator = session.get_by_placeholder("username");
            assert_eq!(locator.count().await.unwrap(), 1);
        }

        #[tokio::test]
        async fn test_strict_violation_on_multiple_matches() {
            let session = login_screen().await;
            let err = session.locator("input").is_visible().await.unwrap_err();
            assert!(matches!(err, E2eError::StrictModeViolation { count: 3, .. }));
        }

        #[tokio::test]
        async fn test_non_strict_allows_many() {
            let session = login_screen().await;
            let inputs = session.locator("input").with_strict(false);
            assert!(inputs.is_visible().await.unwrap());
        }
    }

    mod action_tests {
        use super::*;

        #[tokio::test]
        async fn test_fill_then_read_value() {
            let session = login_screen().await;
            let username = session.get_by_placeholder("Username");
            username.fill("standard_user").await.unwrap();
            assert_eq!(username.input_value().await.unwrap(), "standard_user");
        }

        #[tokio::test(start_paused = true)]
        async fn test_click_on_missing_element_times_out() {
            let session = login_screen().await;
            let err = session
                .locator("#checkout")
                .with_timeout(Duration::from_millis(300))
                .click()
                .await
                .unwrap_err();
            assert!(matches!(
                err,
                E2eError::ActionabilityTimeout { ms: 300, .. }
            ));
        }

        #[tokio::test(start_paused = true)]
        async fn test_wait_for_hidden_when_absent() {
            let session = login_screen().await;
            session
                .locator(".shopping_cart_badge")
                .wait_for(WaitState::Hidden)
                .await
                .unwrap();
        }
    }
}
