//! Checkout step one: buyer information.
//!
//! The form validates on submit, one field at a time in display order
//! (first name, last name, postal code), and shows only the first failure in
//! a single error slot. Validation messages are page data, read through
//! [`CheckoutInfoPage::error_message`]; they are not errors of this crate.

use super::PageObject;
use crate::locator::Locator;
use crate::result::E2eResult;
use crate::session::Session;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

const FIRST_NAME_CSS: &str = "#first-name";
const LAST_NAME_CSS: &str = "#last-name";
const POSTAL_CODE_CSS: &str = "#postal-code";
const CONTINUE_CSS: &str = "#continue";
const CANCEL_CSS: &str = "#cancel";
const ERROR_CSS: &str = "[data-test=\"error\"]";

/// Buyer details entered at checkout
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutInfo {
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Zip or postal code
    pub postal_code: String,
}

impl CheckoutInfo {
    /// Create from the three fields
    #[must_use]
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        postal_code: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            postal_code: postal_code.into(),
        }
    }
}

/// The information form at `/checkout-step-one.html`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutInfoPage {
    session: Session,
}

impl CheckoutInfoPage {
    /// Bind to `session`
    #[must_use]
    pub fn new(session: &Session) -> Self {
        Self {
            session: session.clone(),
        }
    }

    /// First name input
    #[must_use]
    pub fn first_name_input(&self) -> Locator {
        self.session.locator(FIRST_NAME_CSS)
    }

    /// Last name input
    #[must_use]
    pub fn last_name_input(&self) -> Locator {
        self.session.locator(LAST_NAME_CSS)
    }

    /// Postal code input
    #[must_use]
    pub fn postal_code_input(&self) -> Locator {
        self.session.locator(POSTAL_CODE_CSS)
    }

    /// "Continue" button
    #[must_use]
    pub fn continue_button(&self) -> Locator {
        self.session.locator(CONTINUE_CSS)
    }

    /// Validation error banner
    #[must_use]
    pub fn error(&self) -> Locator {
        self.session.locator(ERROR_CSS)
    }

    /// Type `info` into the form without submitting
    pub async fn fill(&self, info: &CheckoutInfo) -> E2eResult<()> {
        self.fill_info(&info.first_name, &info.last_name, &info.postal_code)
            .await
    }

    /// Type the three fields without submitting. Empty strings clear a field.
    pub async fn fill_info(&self, first_name: &str, last_name: &str, postal_code: &str) -> E2eResult<()> {
        debug!("fill checkout information");
        self.first_name_input().fill(first_name).await?;
        self.last_name_input().fill(last_name).await?;
        self.postal_code_input().fill(postal_code).await
    }

    /// Submit the form
    pub async fn continue_checkout(&self) -> E2eResult<()> {
        self.continue_button().click().await
    }

    /// Abandon checkout and return to the cart
    pub async fn cancel(&self) -> E2eResult<()> {
        self.session.locator(CANCEL_CSS).click().await
    }

    /// Text of the error banner, waiting for it to appear
    pub async fn error_message(&self) -> E2eResult<String> {
        self.error().inner_text().await
    }

    /// Whether the error banner is showing right now
    pub async fn is_error_visible(&self) -> E2eResult<bool> {
        self.error().is_visible().await
    }

    /// Current first name value
    pub async fn first_name_value(&self) -> E2eResult<String> {
        self.first_name_input().input_value().await
    }

    /// Current last name value
    pub async fn last_name_value(&self) -> E2eResult<String> {
        self.last_name_input().input_value().await
    }

    /// Current postal code value
    pub async fn postal_code_value(&self) -> E2eResult<String> {
        self.postal_code_input().input_value().await
    }
}

#[async_trait]
impl PageObject for CheckoutInfoPage {
    fn session(&self) -> &Session {
        &self.session
    }

    fn url_pattern(&self) -> &str {
        "/checkout-step-one.html"
    }

    fn page_name(&self) -> &str {
        "checkout information"
    }
}
