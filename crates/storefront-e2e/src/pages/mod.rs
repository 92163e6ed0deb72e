//! Page Object Model.
//!
//! Each storefront screen is wrapped in a page object that exposes business
//! operations (`login`, `sort_by`, `proceed_to_checkout`) and hides the DOM
//! contract behind them. A page object is bound to one [`Session`] and holds
//! nothing else, so constructing one never touches the browser.
//!
//! ## Example
//!
//! ```ignore
//! let login = LoginPage::new(&session);
//! login.goto().await?;
//! login.login_as(UserRole::Standard).await?;
//!
//! let inventory = InventoryPage::new(&session);
//! inventory.wait_until_current().await?;
//! inventory.sort_by(SortOption::PriceAscending).await?;
//! ```

pub mod cart;
pub mod checkout_complete;
pub mod checkout_info;
pub mod checkout_overview;
pub mod inventory;
pub mod login;
pub mod product_detail;

pub use cart::CartPage;
pub use checkout_complete::CheckoutCompletePage;
pub use checkout_info::{CheckoutInfo, CheckoutInfoPage};
pub use checkout_overview::{CheckoutOverviewPage, OrderSummary};
pub use inventory::{InventoryPage, SortOption};
pub use login::LoginPage;
pub use product_detail::ProductDetailPage;

use crate::result::E2eResult;
use crate::session::Session;
use crate::wait::{poll_until, WaitOptions};
use async_trait::async_trait;
use std::collections::HashMap;

/// Trait for page objects
#[async_trait]
pub trait PageObject: Send + Sync {
    /// Session the page is bound to
    fn session(&self) -> &Session;

    /// Path pattern this page lives at (for [`UrlMatcher`])
    fn url_pattern(&self) -> &str;

    /// Page name for logging
    fn page_name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Open the page directly by URL
    async fn goto(&self) -> E2eResult<()> {
        tracing::debug!(page = self.page_name(), "goto");
        self.session().goto(self.url_pattern()).await
    }

    /// Whether the browser is on this page right now
    async fn is_current(&self) -> E2eResult<bool> {
        let url = self.session().url().await?;
        let path = self.session().config().relative_path(&url);
        Ok(UrlMatcher::new(self.url_pattern()).matches(&path))
    }

    /// Wait until the browser reaches this page, bounded by the navigation
    /// timeout
    async fn wait_until_current(&self) -> E2eResult<()> {
        let timeouts = self.session().config().timeouts;
        let options = WaitOptions::new()
            .with_timeout(timeouts.navigation_ms)
            .with_poll_interval(timeouts.poll_interval_ms);
        let this = self;
        poll_until(self.page_name(), "current", &options, move || async move {
            Ok(this.is_current().await?.then_some(()))
        })
        .await
    }
}

/// URL pattern matcher for page objects
#[derive(Debug, Clone)]
pub struct UrlMatcher {
    pattern: String,
    segments: Vec<UrlSegment>,
}

#[derive(Debug, Clone)]
enum UrlSegment {
    Literal(String),
    Wildcard,
    Parameter(String),
}

/// Path segments of `url`, with scheme, host, query and fragment removed
fn path_segments(url: &str) -> Vec<&str> {
    let path = match url.split_once("://") {
        Some((_, rest)) => rest.find('/').map_or("", |index| &rest[index..]),
        None => url,
    };
    let path = path.split(['?', '#']).next().unwrap_or_default();
    path.split('/').filter(|s| !s.is_empty()).collect()
}

impl UrlMatcher {
    /// Create a new URL matcher from a pattern
    ///
    /// Patterns support:
    /// - Literal segments: `/cart.html`
    /// - Wildcards: `/static/*`
    /// - Named parameters: `/inventory/:id`
    #[must_use]
    pub fn new(pattern: &str) -> Self {
        let segments = path_segments(pattern)
            .into_iter()
            .map(|s| {
                if s == "*" {
                    UrlSegment::Wildcard
                } else if let Some(name) = s.strip_prefix(':') {
                    UrlSegment::Parameter(name.to_string())
                } else {
                    UrlSegment::Literal(s.to_string())
                }
            })
            .collect();

        Self {
            pattern: pattern.to_string(),
            segments,
        }
    }

    /// Check if a URL or path matches the pattern. The query string is
    /// ignored.
    #[must_use]
    pub fn matches(&self, url: &str) -> bool {
        let url_segments = path_segments(url);

        // Wildcards and parameters each consume exactly one segment
        if url_segments.len() != self.segments.len() {
            return false;
        }

        self.segments
            .iter()
            .zip(&url_segments)
            .all(|(segment, actual)| match segment {
                UrlSegment::Literal(lit) => lit.as_str() == *actual,
                UrlSegment::Wildcard | UrlSegment::Parameter(_) => true,
            })
    }

    /// Extract named parameters from a matching URL
    #[must_use]
    pub fn extract_params(&self, url: &str) -> HashMap<String, String> {
        if !self.matches(url) {
            return HashMap::new();
        }
        self.segments
            .iter()
            .zip(path_segments(url))
            .filter_map(|(segment, actual)| match segment {
                UrlSegment::Parameter(name) => Some((name.clone(), actual.to_string())),
                _ => None,
            })
            .collect()
    }

    /// Get the pattern string
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

/// Value of `key` in the query string of `url`
#[must_use]
pub fn query_param(url: &str, key: &str) -> Option<String> {
    let query = url.split_once('?')?.1;
    let query = query.split('#').next().unwrap_or_default();
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v.to_string())
}
