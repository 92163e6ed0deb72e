//! Product card on the inventory grid.

use super::{scoped, ItemComponent, ADD_TO_CART_LABEL, ITEM_NAME_CSS, REMOVE_LABEL};
use crate::locator::Locator;
use crate::result::E2eResult;
use crate::session::Session;
use async_trait::async_trait;
use tracing::debug;

/// Card container on the inventory grid
pub const CONTAINER_CSS: &str = ".inventory_item";
/// Product image inside a card
pub const IMAGE_CSS: &str = ".inventory_item_img img";

/// One product card, identified by (a substring of) its product name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCard {
    container: Locator,
    name: String,
}

impl ProductCard {
    /// Card for `name` anywhere on the page
    #[must_use]
    pub fn new(session: &Session, name: &str) -> Self {
        Self::within(&session.root(), name)
    }

    /// Card for `name` under `scope`
    #[must_use]
    pub fn within(scope: &Locator, name: &str) -> Self {
        Self {
            container: scoped(scope, CONTAINER_CSS, name),
            name: name.to_string(),
        }
    }

    /// The card's "Add to cart" button
    #[must_use]
    pub fn add_to_cart_button(&self) -> Locator {
        self.button(ADD_TO_CART_LABEL)
    }

    /// The card's "Remove" button
    #[must_use]
    pub fn remove_button(&self) -> Locator {
        self.button(REMOVE_LABEL)
    }

    /// The card's product image
    #[must_use]
    pub fn image(&self) -> Locator {
        self.part(IMAGE_CSS)
    }

    /// Put the product in the cart
    pub async fn add_to_cart(&self) -> E2eResult<()> {
        debug!(product = %self.name, "add to cart");
        self.add_to_cart_button().click().await
    }

    /// Take the product out of the cart
    pub async fn remove_from_cart(&self) -> E2eResult<()> {
        debug!(product = %self.name, "remove from cart");
        self.remove_button().click().await
    }

    /// Open the product's detail view by clicking its name
    pub async fn open_details(&self) -> E2eResult<()> {
        self.part(ITEM_NAME_CSS).click().await
    }

    /// Whether the add button is showing
    pub async fn is_add_to_cart_visible(&self) -> E2eResult<bool> {
        self.add_to_cart_button().is_visible().await
    }

    /// Whether the remove button is showing
    pub async fn is_remove_visible(&self) -> E2eResult<bool> {
        self.remove_button().is_visible().await
    }

    /// Whether the product image is rendered
    pub async fn is_image_visible(&self) -> E2eResult<bool> {
        self.image().is_visible().await
    }
}

#[async_trait]
impl ItemComponent for ProductCard {
    fn container(&self) -> &Locator {
        &self.container
    }

    fn discriminator(&self) -> &str {
        &self.name
    }
}
