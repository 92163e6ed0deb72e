//! Single product view at `/inventory-item.html?id=N`.

use super::{query_param, PageObject};
use crate::components::{NavigationBar, ADD_TO_CART_LABEL, REMOVE_LABEL};
use crate::locator::Locator;
use crate::money::Money;
use crate::result::E2eResult;
use crate::selector::AriaRole;
use crate::session::Session;
use async_trait::async_trait;

const CONTAINER_CSS: &str = ".inventory_details_container";
const NAME_CSS: &str = ".inventory_details_name";
const PRICE_CSS: &str = ".inventory_details_price";
const DESCRIPTION_CSS: &str = ".inventory_details_desc";
const IMAGE_CSS: &str = ".inventory_details_img";
const BACK_CSS: &str = "#back-to-products";

/// Detail view of one product
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDetailPage {
    session: Session,
    nav_bar: NavigationBar,
}

impl ProductDetailPage {
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

    fn details(&self) -> Locator {
        self.session.locator(CONTAINER_CSS)
    }

    /// Add button
    #[must_use]
    pub fn add_to_cart_button(&self) -> Locator {
        self.details()
            .get_by_role(AriaRole::Button, Some(ADD_TO_CART_LABEL))
    }

    /// Remove button
    #[must_use]
    pub fn remove_button(&self) -> Locator {
        self.details()
            .get_by_role(AriaRole::Button, Some(REMOVE_LABEL))
    }

    /// Open the detail view of the product with catalog id `id`
    pub async fn goto_product(&self, id: u32) -> E2eResult<()> {
        self.session
            .goto(&format!("{}?id={id}", self.url_pattern()))
            .await
    }

    /// Catalog id from the current URL
    pub async fn product_id(&self) -> E2eResult<Option<u32>> {
        let url = self.session.url().await?;
        Ok(query_param(&url, "id").and_then(|id| id.parse().ok()))
    }

    /// Product name
    pub async fn name(&self) -> E2eResult<String> {
        self.details().locator(NAME_CSS).inner_text().await
    }

    /// Price exactly as displayed
    pub async fn price_text(&self) -> E2eResult<String> {
        self.details().locator(PRICE_CSS).inner_text().await
    }

    /// Parsed price
    pub async fn price(&self) -> E2eResult<Money> {
        Money::parse(&self.price_text().await?)
    }

    /// Product description
    pub async fn description(&self) -> E2eResult<String> {
        self.details().locator(DESCRIPTION_CSS).inner_text().await
    }

    /// Whether the product image is rendered
    pub async fn is_image_visible(&self) -> E2eResult<bool> {
        self.details().locator(IMAGE_CSS).is_visible().await
    }

    /// Put the product in the cart
    pub async fn add_to_cart(&self) -> E2eResult<()> {
        self.add_to_cart_button().click().await
    }

    /// Take the product out of the cart
    pub async fn remove_from_cart(&self) -> E2eResult<()> {
        self.remove_button().click().await
    }

    /// Whether the add button is showing
    pub async fn is_add_to_cart_visible(&self) -> E2eResult<bool> {
        self.add_to_cart_button().is_visible().await
    }

    /// Whether the remove button is showing
    pub async fn is_remove_visible(&self) -> E2eResult<bool> {
        self.remove_button().is_visible().await
    }

    /// Return to the listing
    pub async fn back_to_products(&self) -> E2eResult<()> {
        self.session.locator(BACK_CSS).click().await
    }
}

#[async_trait]
impl PageObject for ProductDetailPage {
    fn session(&self) -> &Session {
        &self.session
    }

    fn url_pattern(&self) -> &str {
        "/inventory-item.html"
    }

    fn page_name(&self) -> &str {
        "product detail"
    }
}
