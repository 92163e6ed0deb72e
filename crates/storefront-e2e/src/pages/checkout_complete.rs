//! Order confirmation.

use super::PageObject;
use crate::locator::Locator;
use crate::result::E2eResult;
use crate::session::Session;
use async_trait::async_trait;

const HEADER_CSS: &str = ".complete-header";
const TEXT_CSS: &str = ".complete-text";
const ICON_CSS: &str = ".pony_express";
const BACK_HOME_CSS: &str = "#back-to-products";

/// The confirmation at `/checkout-complete.html`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutCompletePage {
    session: Session,
}

impl CheckoutCompletePage {
    /// Bind to `session`
    #[must_use]
    pub fn new(session: &Session) -> Self {
        Self {
            session: session.clone(),
        }
    }

    /// "Thank you for your order!" header
    #[must_use]
    pub fn success_message(&self) -> Locator {
        self.session.locator(HEADER_CSS)
    }

    /// Dispatch note below the header
    #[must_use]
    pub fn complete_text_label(&self) -> Locator {
        self.session.locator(TEXT_CSS)
    }

    /// Pony Express image
    #[must_use]
    pub fn confirmation_icon(&self) -> Locator {
        self.session.locator(ICON_CSS)
    }

    /// "Back Home" button
    #[must_use]
    pub fn back_home_button(&self) -> Locator {
        self.session.locator(BACK_HOME_CSS)
    }

    /// Header text
    pub async fn confirmation_message(&self) -> E2eResult<String> {
        self.success_message().inner_text().await
    }

    /// Dispatch note text
    pub async fn complete_text(&self) -> E2eResult<String> {
        self.complete_text_label().inner_text().await
    }

    /// Whether the confirmation image is rendered
    pub async fn is_confirmation_icon_visible(&self) -> E2eResult<bool> {
        self.confirmation_icon().is_visible().await
    }

    /// Whether the header is rendered
    pub async fn is_success_message_visible(&self) -> E2eResult<bool> {
        self.success_message().is_visible().await
    }

    /// Header, note and image are all rendered
    pub async fn is_fully_loaded(&self) -> E2eResult<bool> {
        Ok(self.is_success_message_visible().await?
            && self.complete_text_label().is_visible().await?
            && self.is_confirmation_icon_visible().await?)
    }

    /// Return to the listing
    pub async fn back_to_home(&self) -> E2eResult<()> {
        self.back_home_button().click().await
    }
}

#[async_trait]
impl PageObject for CheckoutCompletePage {
    fn session(&self) -> &Session {
        &self.session
    }

    fn url_pattern(&self) -> &str {
        "/checkout-complete.html"
    }

    fn page_name(&self) -> &str {
        "checkout complete"
    }
}
