//! Row of the cart and checkout-overview item lists.

use super::{scoped, ItemComponent, REMOVE_LABEL};
use crate::locator::Locator;
use crate::result::{E2eError, E2eResult};
use crate::session::Session;
use async_trait::async_trait;
use tracing::debug;

/// Row container
pub const CONTAINER_CSS: &str = ".cart_item";
/// Quantity cell inside a row
pub const QUANTITY_CSS: &str = ".cart_quantity";

/// One cart row, identified by (a substring of) its product name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItem {
    container: Locator,
    name: String,
}

impl CartItem {
    /// Row for `name` anywhere on the page
    #[must_use]
    pub fn new(session: &Session, name: &str) -> Self {
        Self::within(&session.root(), name)
    }

    /// Row for `name` under `scope`
    #[must_use]
    pub fn within(scope: &Locator, name: &str) -> Self {
        Self {
            container: scoped(scope, CONTAINER_CSS, name),
            name: name.to_string(),
        }
    }

    /// The row's "Remove" button
    #[must_use]
    pub fn remove_button(&self) -> Locator {
        self.button(REMOVE_LABEL)
    }

    /// Quantity shown in the row.
    ///
    /// # Errors
    ///
    /// [`E2eError::Parse`] when the cell does not hold a whole number.
    pub async fn quantity(&self) -> E2eResult<u32> {
        let text = self.part(QUANTITY_CSS).inner_text().await?;
        text.trim().parse().map_err(|_| E2eError::Parse {
            expected: "quantity",
            text,
        })
    }

    /// Take the product out of the cart
    pub async fn remove(&self) -> E2eResult<()> {
        debug!(product = %self.name, "remove cart row");
        self.remove_button().click().await
    }

    /// Whether the row offers a remove button (the overview list does not)
    pub async fn is_remove_button_visible(&self) -> E2eResult<bool> {
        self.remove_button().is_visible().await
    }
}

#[async_trait]
impl ItemComponent for CartItem {
    fn container(&self) -> &Locator {
        &self.container
    }

    fn discriminator(&self) -> &str {
        &self.name
    }
}
