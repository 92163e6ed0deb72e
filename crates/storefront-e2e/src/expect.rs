//! Web-first assertions.
//!
//! `expect(&locator).to_have_text("1").await?` keeps re-reading the page
//! until the expectation holds or the assertion timeout runs out, then fails
//! with [`E2eError::AssertionFailed`] carrying the last value it saw.
//!
//! ```ignore
//! expect(&inventory.nav_bar().cart_badge()).to_have_text("1").await?;
//! expect(&inventory.nav_bar().cart_badge()).to_be_hidden().await?;
//! expect_page(fixtures.session()).to_have_url_matching(&Regex::new("inventory.html")?).await?;
//! ```

use crate::driver::ElementState;
use crate::locator::Locator;
use crate::result::{E2eError, E2eResult};
use crate::session::Session;
use crate::wait::{poll_until, WaitOptions};
use regex::Regex;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

fn lock(slot: &Mutex<String>) -> MutexGuard<'_, String> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Assertion kinds for `expect()`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpectAssertion {
    /// Element has exact text
    HasText(String),
    /// Element contains text
    ContainsText(String),
    /// Element is visible
    IsVisible,
    /// Element is absent or not rendered
    IsHidden,
    /// Element count matches
    HasCount(usize),
    /// Form control has exact value
    HasValue(String),
}

impl ExpectAssertion {
    fn describe(&self) -> String {
        match self {
            Self::HasText(text) => format!("to have text {text:?}"),
            Self::ContainsText(text) => format!("to contain text {text:?}"),
            Self::IsVisible => "to be visible".to_string(),
            Self::IsHidden => "to be hidden".to_string(),
            Self::HasCount(count) => format!("to have count {count}"),
            Self::HasValue(value) => format!("to have value {value:?}"),
        }
    }

    /// Check the assertion against one probe of the page.
    ///
    /// Returns `Ok(())` when it holds, otherwise a description of what was
    /// actually observed.
    pub fn validate(&self, states: &[ElementState]) -> Result<(), String> {
        let single = || match states {
            [] => Err("no matching element".to_string()),
            [one] => Ok(one),
            many => Err(format!("{} matching elements", many.len())),
        };
        match self {
            Self::HasText(expected) => {
                let actual = single()?;
                if actual.text == *expected {
                    Ok(())
                } else {
                    Err(format!("text {:?}", actual.text))
                }
            }
            Self::ContainsText(expected) => {
                let actual = single()?;
                if actual.text.contains(expected.as_str()) {
                    Ok(())
                } else {
                    Err(format!("text {:?}", actual.text))
                }
            }
            Self::IsVisible => {
                if single()?.visible {
                    Ok(())
                } else {
                    Err("element is not visible".to_string())
                }
            }
            Self::IsHidden => match states {
                [] => Ok(()),
                [one] if !one.visible => Ok(()),
                [_] => Err("element is visible".to_string()),
                many => Err(format!("{} matching elements", many.len())),
            },
            Self::HasCount(expected) => {
                if states.len() == *expected {
                    Ok(())
                } else {
                    Err(format!("count {}", states.len()))
                }
            }
            Self::HasValue(expected) => {
                let actual = single()?;
                let value = actual.value.as_deref().unwrap_or_default();
                if value == expected {
                    Ok(())
                } else {
                    Err(format!("value {value:?}"))
                }
            }
        }
    }
}

/// Retrying assertions on a locator
#[derive(Debug, Clone)]
pub struct LocatorExpect {
    locator: Locator,
    timeout: Duration,
}

/// Start an assertion on `locator`, bounded by the session's expect timeout
#[must_use]
pub fn expect(locator: &Locator) -> LocatorExpect {
    LocatorExpect {
        timeout: locator.session().config().timeouts.expect(),
        locator: locator.clone(),
    }
}

impl LocatorExpect {
    /// Override the assertion timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn assert(&self, assertion: ExpectAssertion) -> E2eResult<()> {
        let options = wait_options(self.timeout, &self.locator);
        let last = Mutex::new(String::new());
        let outcome = poll_until(
            &self.locator.to_string(),
            &assertion.describe(),
            &options,
            || {
                let result = self.locator.probe();
                let assertion = &assertion;
                let last = &last;
                async move {
                    let states = result.await?;
                    match assertion.validate(&states) {
                        Ok(()) => Ok(Some(())),
                        Err(observed) => {
                            *lock(last) = observed;
                            Ok(None)
                        }
                    }
                }
            },
        )
        .await;
        match outcome {
            Err(E2eError::ActionabilityTimeout { ms, .. }) => Err(E2eError::AssertionFailed {
                message: format!(
                    "expected {} {} within {ms}ms, but found {}",
                    self.locator,
                    assertion.describe(),
                    lock(&last)
                ),
            }),
            other => other,
        }
    }

    /// Element text equals `text`
    pub async fn to_have_text(&self, text: &str) -> E2eResult<()> {
        self.assert(ExpectAssertion::HasText(text.to_string())).await
    }

    /// Element text contains `text`
    pub async fn to_contain_text(&self, text: &str) -> E2eResult<()> {
        self.assert(ExpectAssertion::ContainsText(text.to_string()))
            .await
    }

    /// Element is rendered
    pub async fn to_be_visible(&self) -> E2eResult<()> {
        self.assert(ExpectAssertion::IsVisible).await
    }

    /// Element is absent or not rendered
    pub async fn to_be_hidden(&self) -> E2eResult<()> {
        self.assert(ExpectAssertion::IsHidden).await
    }

    /// Exactly `count` elements match
    pub async fn to_have_count(&self, count: usize) -> E2eResult<()> {
        self.assert(ExpectAssertion::HasCount(count)).await
    }

    /// Form control value equals `value`
    pub async fn to_have_value(&self, value: &str) -> E2eResult<()> {
        self.assert(ExpectAssertion::HasValue(value.to_string()))
            .await
    }
}

fn wait_options(timeout: Duration, locator: &Locator) -> WaitOptions {
    WaitOptions::new()
        .with_timeout(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX))
        .with_poll_interval(
            u64::try_from(locator.options().poll_interval.as_millis()).unwrap_or(u64::MAX),
        )
}

/// Retrying assertions on the page URL
#[derive(Debug, Clone)]
pub struct PageExpect {
    session: Session,
    timeout: Duration,
}

/// Start an assertion on the session's current page
#[must_use]
pub fn expect_page(session: &Session) -> PageExpect {
    PageExpect {
        timeout: session.config().timeouts.expect(),
        session: session.clone(),
    }
}

impl PageExpect {
    /// Override the assertion timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn assert_url(&self, wanted: &str, matches: impl Fn(&str) -> bool) -> E2eResult<()> {
        let timeouts = self.session.config().timeouts;
        let options = WaitOptions::new()
            .with_timeout(u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX))
            .with_poll_interval(timeouts.poll_interval_ms);
        let last = Mutex::new(String::new());
        let outcome = poll_until("page", wanted, &options, || {
            let url = self.session.url();
            let last = &last;
            let matches = &matches;
            async move {
                let url = url.await?;
                let ok = matches(&url);
                *lock(last) = url;
                Ok(ok.then_some(()))
            }
        })
        .await;
        match outcome {
            Err(E2eError::ActionabilityTimeout { ms, .. }) => Err(E2eError::AssertionFailed {
                message: format!(
                    "expected page URL {wanted} within {ms}ms, but it was {:?}",
                    lock(&last)
                ),
            }),
            other => other,
        }
    }

    /// URL equals `url` exactly (relative paths resolve against the base URL)
    pub async fn to_have_url(&self, url: &str) -> E2eResult<()> {
        let expected = self.session.config().url_for(url);
        let wanted = format!("to be {expected:?}");
        self.assert_url(&wanted, |actual| actual == expected).await
    }

    /// URL matches `pattern` anywhere
    pub async fn to_have_url_matching(&self, pattern: &Regex) -> E2eResult<()> {
        let wanted = format!("to match /{pattern}/");
        self.assert_url(&wanted, |actual| pattern.is_match(actual))
            .await
    }
}
