//! Cart at `/cart.html`.

use super::PageObject;
use crate::components::cart_item::CONTAINER_CSS as ROW_CSS;
use crate::components::{CartItem, ItemComponent, NavigationBar, ITEM_NAME_CSS};
use crate::locator::{Locator, WaitState};
use crate::money::Money;
use crate::result::E2eResult;
use crate::session::Session;
use async_trait::async_trait;

const LIST_CSS: &str = ".cart_list";
const CHECKOUT_CSS: &str = "#checkout";
const CONTINUE_SHOPPING_CSS: &str = "#continue-shopping";

/// The cart screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartPage {
    session: Session,
    nav_bar: NavigationBar,
}

impl CartPage {
    /// Bind to `session`
    #[must_use]
    pub fn new(session: &Session) -> Self {
        Self {
            session: session.clone(),
            nav_bar: NavigationBar::new(session),
        }
    }

    /// The header
    #[must_use]
    pub const fn nav_bar(&self) -> &NavigationBar {
        &self.nav_bar
    }

    /// Item list
    #[must_use]
    pub fn cart_list(&self) -> Locator {
        self.session.locator(LIST_CSS)
    }

    /// "Checkout" button
    #[must_use]
    pub fn checkout_button(&self) -> Locator {
        self.session.locator(CHECKOUT_CSS)
    }

    /// "Continue Shopping" button
    #[must_use]
    pub fn continue_shopping_button(&self) -> Locator {
        self.session.locator(CONTINUE_SHOPPING_CSS)
    }

    /// Row of the product whose name contains `name`
    #[must_use]
    pub fn item(&self, name: &str) -> CartItem {
        CartItem::within(&self.cart_list(), name)
    }

    fn rows(&self) -> Locator {
        self.cart_list().locator(ROW_CSS)
    }

    async fn wait_for_list(&self) -> E2eResult<()> {
        self.cart_list().wait_for(WaitState::Attached).await
    }

    /// Remove `name` from the cart
    pub async fn remove_item(&self, name: &str) -> E2eResult<()> {
        self.item(name).remove().await
    }

    /// Go to the checkout information step
    pub async fn proceed_to_checkout(&self) -> E2eResult<()> {
        self.checkout_button().click().await
    }

    /// Return to the listing
    pub async fn continue_shopping(&self) -> E2eResult<()> {
        self.continue_shopping_button().click().await
    }

    /// Number of rows
    pub async fn item_count(&self) -> E2eResult<usize> {
        self.wait_for_list().await?;
        self.rows().count().await
    }

    /// Product names, in the order they were added
    pub async fn item_names(&self) -> E2eResult<Vec<String>> {
        self.wait_for_list().await?;
        self.rows().locator(ITEM_NAME_CSS).all_inner_texts().await
    }

    /// Whether a row for `name` is showing
    pub async fn contains(&self, name: &str) -> E2eResult<bool> {
        self.wait_for_list().await?;
        self.item(name).is_visible().await
    }

    /// Price shown in the row for `name`
    pub async fn item_price(&self, name: &str) -> E2eResult<Money> {
        self.item(name).price().await
    }

    /// Whether the cart has no rows
    pub async fn is_empty(&self) -> E2eResult<bool> {
        Ok(self.item_count().await? == 0)
    }
}

#[async_trait]
impl PageObject for CartPage {
    fn session(&self) -> &Session {
        &self.session
    }

    fn url_pattern(&self) -> &str {
        "/cart.html"
    }

    fn page_name(&self) -> &str {
        "cart"
    }
}
