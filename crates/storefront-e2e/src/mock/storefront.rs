//! Storefront state machine and renderer.
//!
//! [`Store`] holds what the real application keeps in cookies, local storage
//! and React state; [`Store::render`] turns it into a [`Dom`] that follows
//! the storefront's DOM contract (class names, ids, placeholders, button
//! labels). Clicks and fills arrive as [`Action`]s bound on elements.

use super::dom::{Dom, Node};
use crate::money::Money;
use std::time::Duration;
use tokio::time::Instant;

/// Shared password of every demo account
pub const PASSWORD: &str = "secret_sauce";

/// Default delay before the inventory renders for the performance-glitch user
pub const DEFAULT_RENDER_DELAY: Duration = Duration::from_millis(350);

const TAX_PERCENT: u64 = 8;

/// Catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Product {
    /// Numeric id used in detail URLs
    pub id: u32,
    /// Display name
    pub name: &'static str,
    /// Marketing copy
    pub description: &'static str,
    /// Price in cents
    pub cents: u64,
    /// Image file
    pub image: &'static str,
}

impl Product {
    fn slug(&self) -> String {
        self.name.to_lowercase().replace(' ', "-")
    }

    fn price_text(&self) -> String {
        Money::from_cents(self.cents).to_string()
    }
}

/// The six products, in name order
pub static CATALOG: [Product; 6] = [
    Product {
        id: 4,
        name: "Sauce Labs Backpack",
        description: "carry.allTheThings() with the sleek, streamlined Sly Pack that melds uncompromising style with unequaled laptop and tablet protection.",
        cents: 2999,
        image: "sauce-backpack-1200x1500.jpg",
    },
    Product {
        id: 0,
        name: "Sauce Labs Bike Light",
        description: "A red light isn't the desired state in testing but it sure helps when riding your bike at night. Water-resistant with 3 lighting modes, 1 AAA battery included.",
        cents: 999,
        image: "bike-light-1200x1500.jpg",
    },
    Product {
        id: 1,
        name: "Sauce Labs Bolt T-Shirt",
        description: "Get your testing superhero on with the Sauce Labs bolt T-shirt. From American Apparel, 100% ringspun combed cotton, heather gray with red bolt.",
        cents: 1599,
        image: "bolt-shirt-1200x1500.jpg",
    },
    Product {
        id: 5,
        name: "Sauce Labs Fleece Jacket",
        description: "It's not every day that you come across a midweight quarter-zip fleece jacket capable of handling everything from a relaxing day outdoors to a busy day at the office.",
        cents: 4999,
        image: "sauce-pullover-1200x1500.jpg",
    },
    Product {
        id: 2,
        name: "Sauce Labs Onesie",
        description: "Rib snap infant onesie for the junior automation engineer in development. Reinforced 3-snap bottom closure, two-needle hemmed sleeved and bottom won't unravel.",
        cents: 799,
        image: "red-onesie-1200x1500.jpg",
    },
    Product {
        id: 3,
        name: "Test.allTheThings() T-Shirt (Red)",
        description: "This classic Sauce Labs t-shirt is perfect to wear when cozying up to your keyboard to automate a few tests. Super-soft and comfy ringspun combed cotton.",
        cents: 1599,
        image: "red-tatt-1200x1500.jpg",
    },
];

fn product(id: u32) -> Option<&'static Product> {
    CATALOG.iter().find(|p| p.id == id)
}

/// Demo accounts the storefront knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Account {
    /// `standard_user`
    Standard,
    /// `locked_out_user`
    LockedOut,
    /// `problem_user`
    Problem,
    /// `performance_glitch_user`
    PerformanceGlitch,
    /// `error_user`
    Error,
    /// `visual_user`
    Visual,
}

impl Account {
    fn from_username(username: &str) -> Option<Self> {
        Some(match username {
            "standard_user" => Self::Standard,
            "locked_out_user" => Self::LockedOut,
            "problem_user" => Self::Problem,
            "performance_glitch_user" => Self::PerformanceGlitch,
            "error_user" => Self::Error,
            "visual_user" => Self::Visual,
            _ => return None,
        })
    }
}

/// Text inputs the storefront reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Login username
    Username,
    /// Login password
    Password,
    /// Checkout first name
    FirstName,
    /// Checkout last name
    LastName,
    /// Checkout postal code
    PostalCode,
}

/// Behavior bound to a clickable or fillable element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Text input
    Input(Field),
    /// Sort dropdown
    Sort,
    /// Login submit
    Login,
    /// Add a product
    AddToCart(u32),
    /// Remove a product
    RemoveFromCart(u32),
    /// Open a product's detail view
    OpenProduct(u32),
    /// Return to the inventory
    BackToProducts,
    /// Burger button
    OpenMenu,
    /// Menu close button
    CloseMenu,
    /// "All Items" menu link
    AllItems,
    /// "Logout" menu link
    Logout,
    /// "Reset App State" menu link
    ResetAppState,
    /// Cart icon
    GoToCart,
    /// Cart "Continue Shopping"
    ContinueShopping,
    /// Cart "Checkout"
    Checkout,
    /// Information step "Continue"
    ContinueCheckout,
    /// Information step "Cancel"
    CancelInformation,
    /// Overview step "Cancel"
    CancelOverview,
    /// Overview step "Finish"
    Finish,
}

/// Route currently displayed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// `/`
    Login,
    /// `/inventory.html`
    Inventory,
    /// `/inventory-item.html?id=N`
    Detail(u32),
    /// `/cart.html`
    Cart,
    /// `/checkout-step-one.html`
    CheckoutInformation,
    /// `/checkout-step-two.html`
    CheckoutOverview,
    /// `/checkout-complete.html`
    CheckoutComplete,
    /// Any other path
    NotFound(String),
}

impl Screen {
    fn from_path(path_and_query: &str) -> Self {
        let (path, query) = path_and_query
            .split_once('?')
            .unwrap_or((path_and_query, ""));
        match path.trim_end_matches('/') {
            "" | "/index.html" => Self::Login,
            "/inventory.html" => Self::Inventory,
            "/inventory-item.html" => Self::Detail(
                query
                    .split('&')
                    .find_map(|pair| pair.strip_prefix("id="))
                    .and_then(|id| id.parse().ok())
                    .unwrap_or(u32::MAX),
            ),
            "/cart.html" => Self::Cart,
            "/checkout-step-one.html" => Self::CheckoutInformation,
            "/checkout-step-two.html" => Self::CheckoutOverview,
            "/checkout-complete.html" => Self::CheckoutComplete,
            other => Self::NotFound(other.to_string()),
        }
    }

    /// Path and query of this screen
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Login => "/".into(),
            Self::Inventory => "/inventory.html".into(),
            Self::Detail(id) => format!("/inventory-item.html?id={id}"),
            Self::Cart => "/cart.html".into(),
            Self::CheckoutInformation => "/checkout-step-one.html".into(),
            Self::CheckoutOverview => "/checkout-step-two.html".into(),
            Self::CheckoutComplete => "/checkout-complete.html".into(),
            Self::NotFound(path) => path.clone(),
        }
    }

    const fn requires_login(&self) -> bool {
        !matches!(self, Self::Login | Self::NotFound(_))
    }

    fn guard_path(&self) -> String {
        match self {
            Self::Detail(_) => "/inventory-item.html".into(),
            other => other.path(),
        }
    }
}

/// Split an absolute URL into origin and path-with-query
pub fn split_url(url: &str) -> (String, String) {
    let Some((scheme, rest)) = url.split_once("://") else {
        return (String::new(), url.to_string());
    };
    let (host, path) = match rest.find('/') {
        Some(index) => rest.split_at(index),
        None => (rest, "/"),
    };
    let path = path.split('#').next().unwrap_or("/");
    (format!("{scheme}://{host}"), path.to_string())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Form {
    first: String,
    second: String,
    third: String,
    error: Option<String>,
}

/// Application state
#[derive(Debug, Clone)]
pub struct Store {
    origin: String,
    screen: Screen,
    back_stack: Vec<Screen>,
    account: Option<Account>,
    cart: Vec<u32>,
    sort: String,
    menu_open: bool,
    login: Form,
    information: Form,
    render_delay: Duration,
    ready_at: Option<Instant>,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            origin: String::new(),
            screen: Screen::NotFound("about:blank".into()),
            back_stack: Vec::new(),
            account: None,
            cart: Vec::new(),
            sort: "az".into(),
            menu_open: false,
            login: Form::default(),
            information: Form::default(),
            render_delay: DEFAULT_RENDER_DELAY,
            ready_at: None,
        }
    }
}

impl Store {
    /// Fresh, logged-out store
    #[must_use]
    pub fn new(render_delay: Duration) -> Self {
        Self {
            render_delay,
            ..Self::default()
        }
    }

    /// Current absolute URL
    #[must_use]
    pub fn url(&self) -> String {
        match &self.screen {
            Screen::NotFound(path) if self.origin.is_empty() => path.clone(),
            screen => format!("{}{}", self.origin, screen.path()),
        }
    }

    /// Product ids in the cart, in the order they were added
    #[must_use]
    pub fn cart(&self) -> &[u32] {
        &self.cart
    }

    /// Whether a user is logged in
    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        self.account.is_some()
    }

    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------

    /// Load an absolute URL, as typed into the address bar
    pub fn navigate(&mut self, url: &str) {
        let (origin, path) = split_url(url);
        if !origin.is_empty() {
            self.origin = origin;
        }
        let previous = self.screen.clone();
        self.back_stack.push(previous);
        self.enter(Screen::from_path(&path));
    }

    /// Browser back button; `false` when there is no earlier entry
    #[must_use]
    pub fn go_back(&mut self) -> bool {
        match self.back_stack.pop() {
            Some(previous) => {
                self.enter(previous);
                true
            }
            None => false,
        }
    }

    fn push(&mut self, screen: Screen) {
        let previous = self.screen.clone();
        self.back_stack.push(previous);
        self.enter(screen);
    }

    fn enter(&mut self, screen: Screen) {
        self.menu_open = false;
        self.ready_at = None;
        if screen.requires_login() && self.account.is_none() {
            self.login = Form {
                error: Some(format!(
                    "Epic sadface: You can only access '{}' when you are logged in.",
                    screen.guard_path()
                )),
                ..Form::default()
            };
            self.screen = Screen::Login;
            return;
        }
        match screen {
            Screen::Login => self.login = Form::default(),
            Screen::Inventory => {
                self.sort = "az".into();
                if self.account == Some(Account::PerformanceGlitch) {
                    self.ready_at = Some(Instant::now() + self.render_delay);
                }
            }
            Screen::CheckoutInformation => self.information = Form::default(),
            _ => {}
        }
        self.screen = screen;
    }

    /// Drop cookies and storage
    pub fn clear_cookies(&mut self) {
        self.account = None;
        self.cart.clear();
    }

    // -------------------------------------------------------------------------
    // Input
    // -------------------------------------------------------------------------

    /// Handle a click on an element bound to `action`
    pub fn click(&mut self, action: Action) {
        match action {
            Action::Input(_) | Action::Sort => {}
            Action::Login => self.submit_login(),
            Action::AddToCart(id) => {
                if !self.cart.contains(&id) {
                    self.cart.push(id);
                }
            }
            Action::RemoveFromCart(id) => self.cart.retain(|&item| item != id),
            Action::OpenProduct(id) => self.push(Screen::Detail(id)),
            Action::BackToProducts
            | Action::AllItems
            | Action::ContinueShopping
            | Action::CancelOverview => self.push(Screen::Inventory),
            Action::OpenMenu => self.menu_open = true,
            Action::CloseMenu => self.menu_open = false,
            Action::Logout => {
                self.account = None;
                self.push(Screen::Login);
            }
            Action::ResetAppState => self.cart.clear(),
            Action::GoToCart | Action::CancelInformation => self.push(Screen::Cart),
            Action::Checkout => self.push(Screen::CheckoutInformation),
            Action::ContinueCheckout => self.submit_information(),
            Action::Finish => {
                self.cart.clear();
                self.push(Screen::CheckoutComplete);
            }
        }
    }

    /// Handle typing into a field
    pub fn fill(&mut self, field: Field, text: &str) {
        let slot = match field {
            Field::Username => &mut self.login.first,
            Field::Password => &mut self.login.second,
            Field::FirstName => &mut self.information.first,
            Field::LastName if self.account == Some(Account::Error) => return,
            Field::LastName => &mut self.information.second,
            Field::PostalCode => &mut self.information.third,
        };
        *slot = text.to_string();
    }

    /// Handle a dropdown change; `false` if the value is not an option
    pub fn select_sort(&mut self, value: &str) -> bool {
        if !matches!(value, "az" | "za" | "lohi" | "hilo") {
            return false;
        }
        self.sort = value.to_string();
        true
    }

    fn submit_login(&mut self) {
        let username = self.login.first.clone();
        let password = self.login.second.clone();
        let error = if username.is_empty() {
            Some("Epic sadface: Username is required")
        } else if password.is_empty() {
            Some("Epic sadface: Password is required")
        } else {
            match Account::from_username(&username) {
                Some(_) if password != PASSWORD => {
                    Some("Epic sadface: Username and password do not match any user in this service")
                }
                None => Some("Epic sadface: Username and password do not match any user in this service"),
                Some(Account::LockedOut) => {
                    Some("Epic sadface: Sorry, this user has been locked out.")
                }
                Some(account) => {
                    self.account = Some(account);
                    self.push(Screen::Inventory);
                    None
                }
            }
        };
        if let Some(error) = error {
            self.login.error = Some(error.to_string());
        }
    }

    fn submit_information(&mut self) {
        let error = if self.information.first.is_empty() {
            Some("Error: First Name is required")
        } else if self.information.second.is_empty() {
            Some("Error: Last Name is required")
        } else if self.information.third.is_empty() {
            Some("Error: Postal Code is required")
        } else {
            None
        };
        match error {
            Some(error) => self.information.error = Some(error.to_string()),
            None => self.push(Screen::CheckoutOverview),
        }
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    fn sorted_catalog(&self) -> Vec<&'static Product> {
        let mut products: Vec<&Product> = CATALOG.iter().collect();
        match self.sort.as_str() {
            "za" => products.sort_by(|a, b| b.name.cmp(a.name)),
            "lohi" => products.sort_by_key(|p| p.cents),
            "hilo" => products.sort_by(|a, b| b.cents.cmp(&a.cents)),
            _ => products.sort_by(|a, b| a.name.cmp(b.name)),
        }
        products
    }

    fn image_src(&self, product: &Product) -> String {
        match self.account {
            Some(Account::Problem) => "/static/media/sl-404.168b1cce.jpg".into(),
            Some(Account::Visual) if product.id == 4 => {
                "/static/media/sl-404.168b1cce.jpg".into()
            }
            _ => format!("/static/media/{}", product.image),
        }
    }

    /// Render the current screen
    #[must_use]
    pub fn render(&self) -> Dom {
        let body = match &self.screen {
            Screen::Login => self.render_login(),
            Screen::NotFound(_) => Node::new("div").id("not-found"),
            _ if self.ready_at.is_some_and(|at| Instant::now() < at) => {
                self.page("Products", Node::new("div").class("inventory_loading"))
            }
            Screen::Inventory => self.render_inventory(),
            Screen::Detail(id) => self.render_detail(*id),
            Screen::Cart => self.render_cart(),
            Screen::CheckoutInformation => self.render_information(),
            Screen::CheckoutOverview => self.render_overview(),
            Screen::CheckoutComplete => self.render_complete(),
        };
        Dom::new(Node::document(vec![Node::new("div").id("root").child(body)]))
    }

    fn error_container(error: Option<&String>) -> Node {
        let mut container = Node::new("div").class("error-message-container");
        if let Some(error) = error {
            container = container.class("error").child(
                Node::new("h3")
                    .attr("data-test", "error")
                    .text(error.clone())
                    .child(Node::new("button").class("error-button").attr("aria-label", "close")),
            );
        }
        container
    }

    fn text_input(id: &str, placeholder: &str, field: Field, value: &str) -> Node {
        Node::new("input")
            .id(id)
            .class("input_error form_input")
            .attr("type", if field == Field::Password { "password" } else { "text" })
            .attr("placeholder", placeholder)
            .attr("data-test", id)
            .value(value)
            .on(Action::Input(field))
    }

    fn render_login(&self) -> Node {
        Node::new("div").class("login_container").children([
            Node::new("div").class("login_logo").text("Swag Labs"),
            Node::new("div").class("login_wrapper").child(
                Node::new("form").children([
                    Self::text_input("user-name", "Username", Field::Username, &self.login.first),
                    Self::text_input("password", "Password", Field::Password, &self.login.second),
                    Self::error_container(self.login.error.as_ref()),
                    Node::new("input")
                        .id("login-button")
                        .class("submit-button btn_action")
                        .attr("type", "submit")
                        .attr("data-test", "login-button")
                        .value("Login")
                        .on(Action::Login),
                ]),
            ),
        ])
    }

    fn header(&self, title: &str) -> Vec<Node> {
        let mut cart_link = Node::new("a")
            .class("shopping_cart_link")
            .attr("data-test", "shopping-cart-link")
            .on(Action::GoToCart);
        if !self.cart.is_empty() {
            cart_link = cart_link.child(
                Node::new("span")
                    .class("shopping_cart_badge")
                    .attr("data-test", "shopping-cart-badge")
                    .text(self.cart.len().to_string()),
            );
        }
        let menu_link = |id: &str, label: &str, action: Option<Action>| {
            let link = Node::new("a").id(id).class("bm-item menu-item").text(label);
            match action {
                Some(action) => link.on(action),
                None => link,
            }
        };
        vec![
            Node::new("div")
                .class("bm-menu-wrap")
                .hidden(!self.menu_open)
                .children([
                    Node::new("div").class("bm-menu").child(
                        Node::new("nav").class("bm-item-list").children([
                            menu_link("inventory_sidebar_link", "All Items", Some(Action::AllItems)),
                            menu_link("about_sidebar_link", "About", None),
                            menu_link("logout_sidebar_link", "Logout", Some(Action::Logout)),
                            menu_link("reset_sidebar_link", "Reset App State", Some(Action::ResetAppState)),
                        ]),
                    ),
                    Node::new("div").class("bm-cross-button").child(
                        Node::new("button")
                            .id("react-burger-cross-btn")
                            .text("Close Menu")
                            .on(Action::CloseMenu),
                    ),
                ]),
            Node::new("div").class("primary_header").children([
                Node::new("div").class("bm-burger-button").child(
                    Node::new("button")
                        .id("react-burger-menu-btn")
                        .text("Open Menu")
                        .on(Action::OpenMenu),
                ),
                Node::new("div").class("app_logo").text("Swag Labs"),
                Node::new("div")
                    .id("shopping_cart_container")
                    .class("shopping_cart_container")
                    .child(cart_link),
            ]),
            Node::new("div")
                .class("header_secondary_container")
                .child(Node::new("span").class("title").text(title)),
        ]
    }

    fn page(&self, title: &str, contents: Node) -> Node {
        Node::new("div")
            .id("page_wrapper")
            .class("page_wrapper")
            .children(self.header(title))
            .child(Node::new("div").id("contents_wrapper").child(contents))
    }

    fn cart_button(&self, product: &Product, detail: bool) -> Node {
        let slug = product.slug();
        if self.cart.contains(&product.id) {
            let id = if detail { "remove".to_string() } else { format!("remove-{slug}") };
            Node::new("button")
                .id(&id)
                .class("btn btn_secondary btn_small btn_inventory")
                .text("Remove")
                .on(Action::RemoveFromCart(product.id))
        } else {
            let id = if detail {
                "add-to-cart".to_string()
            } else {
                format!("add-to-cart-{slug}")
            };
            Node::new("button")
                .id(&id)
                .class("btn btn_primary btn_small btn_inventory")
                .text("Add to cart")
                .on(Action::AddToCart(product.id))
        }
    }

    fn render_inventory(&self) -> Node {
        let sort = Node::new("select")
            .class("product_sort_container")
            .attr("data-test", "product-sort-container")
            .value(self.sort.clone())
            .on(Action::Sort)
            .children(
                [
                    ("az", "Name (A to Z)"),
                    ("za", "Name (Z to A)"),
                    ("lohi", "Price (low to high)"),
                    ("hilo", "Price (high to low)"),
                ]
                .into_iter()
                .map(|(value, label)| Node::new("option").attr("value", value).text(label)),
            );
        let items = self.sorted_catalog().into_iter().map(|product| {
            Node::new("div").class("inventory_item").children([
                Node::new("div").class("inventory_item_img").child(
                    Node::new("a")
                        .id(&format!("item_{}_img_link", product.id))
                        .on(Action::OpenProduct(product.id))
                        .child(
                            Node::new("img")
                                .class("inventory_item_img")
                                .attr("alt", product.name)
                                .attr("src", &self.image_src(product)),
                        ),
                ),
                Node::new("div").class("inventory_item_description").children([
                    Node::new("div").class("inventory_item_label").children([
                        Node::new("a")
                            .id(&format!("item_{}_title_link", product.id))
                            .on(Action::OpenProduct(product.id))
                            .child(Node::new("div").class("inventory_item_name").text(product.name)),
                        Node::new("div").class("inventory_item_desc").text(product.description),
                    ]),
                    Node::new("div").class("pricebar").children([
                        Node::new("div")
                            .class("inventory_item_price")
                            .text(product.price_text()),
                        self.cart_button(product, false),
                    ]),
                ]),
            ])
        });
        let mut page = self.page(
            "Products",
            Node::new("div")
                .id("inventory_container")
                .class("inventory_container")
                .child(Node::new("div").class("inventory_list").children(items)),
        );
        if let Some(header) = page
            .children
            .iter_mut()
            .find(|n| n.classes.iter().any(|c| c == "header_secondary_container"))
        {
            header.children.push(sort);
        }
        page
    }

    fn render_detail(&self, id: u32) -> Node {
        let details = match product(id) {
            Some(product) => vec![
                Node::new("img")
                    .class("inventory_details_img")
                    .attr("alt", product.name)
                    .attr("src", &self.image_src(product)),
                Node::new("div").class("inventory_details_desc_container").children([
                    Node::new("div").class("inventory_details_name large_size").text(product.name),
                    Node::new("div").class("inventory_details_desc large_size").text(product.description),
                    Node::new("div").class("inventory_details_price").text(product.price_text()),
                    self.cart_button(product, true),
                ]),
            ],
            None => vec![
                Node::new("img").class("inventory_details_img").attr("alt", "ITEM NOT FOUND"),
                Node::new("div").class("inventory_details_desc_container").children([
                    Node::new("div").class("inventory_details_name large_size").text("ITEM NOT FOUND"),
                    Node::new("div")
                        .class("inventory_details_desc large_size")
                        .text("We're sorry, but your call could not be completed as dialed."),
                    Node::new("div").class("inventory_details_price").text("$√-1"),
                ]),
            ],
        };
        self.page(
            "",
            Node::new("div").class("inventory_details").children([
                Node::new("button")
                    .id("back-to-products")
                    .class("inventory_details_back_button")
                    .text("Back to products")
                    .on(Action::BackToProducts),
                Node::new("div").class("inventory_details_container").children(details),
            ]),
        )
    }

    fn cart_rows(&self, removable: bool) -> Vec<Node> {
        self.cart
            .iter()
            .filter_map(|&id| product(id))
            .map(|product| {
                let mut pricebar = Node::new("div").class("item_pricebar").child(
                    Node::new("div")
                        .class("inventory_item_price")
                        .text(product.price_text()),
                );
                if removable {
                    pricebar = pricebar.child(self.cart_button(product, false));
                }
                Node::new("div").class("cart_item").children([
                    Node::new("div").class("cart_quantity").text("1"),
                    Node::new("div").class("cart_item_label").children([
                        Node::new("a")
                            .id(&format!("item_{}_title_link", product.id))
                            .on(Action::OpenProduct(product.id))
                            .child(Node::new("div").class("inventory_item_name").text(product.name)),
                        Node::new("div").class("inventory_item_desc").text(product.description),
                        pricebar,
                    ]),
                ])
            })
            .collect()
    }

    fn cart_list(&self, removable: bool) -> Node {
        Node::new("div")
            .class("cart_list")
            .children([
                Node::new("div").class("cart_quantity_label").text("QTY"),
                Node::new("div").class("cart_desc_label").text("Description"),
            ])
            .children(self.cart_rows(removable))
    }

    fn render_cart(&self) -> Node {
        self.page(
            "Your Cart",
            Node::new("div")
                .id("cart_contents_container")
                .children([
                    self.cart_list(true),
                    Node::new("div").class("cart_footer").children([
                        Node::new("button")
                            .id("continue-shopping")
                            .class("btn btn_secondary back btn_medium")
                            .text("Continue Shopping")
                            .on(Action::ContinueShopping),
                        Node::new("button")
                            .id("checkout")
                            .class("btn btn_action btn_medium checkout_button")
                            .text("Checkout")
                            .on(Action::Checkout),
                    ]),
                ]),
        )
    }

    fn render_information(&self) -> Node {
        self.page(
            "Checkout: Your Information",
            Node::new("div").class("checkout_info_container").child(
                Node::new("form").children([
                    Node::new("div").class("checkout_info").children([
                        Self::text_input("first-name", "First Name", Field::FirstName, &self.information.first),
                        Self::text_input("last-name", "Last Name", Field::LastName, &self.information.second),
                        Self::text_input("postal-code", "Zip/Postal Code", Field::PostalCode, &self.information.third),
                        Self::error_container(self.information.error.as_ref()),
                    ]),
                    Node::new("div").class("checkout_buttons").children([
                        Node::new("button")
                            .id("cancel")
                            .class("btn btn_secondary back btn_medium cart_cancel_link")
                            .text("Cancel")
                            .on(Action::CancelInformation),
                        Node::new("input")
                            .id("continue")
                            .class("submit-button btn btn_primary cart_button btn_action")
                            .attr("type", "submit")
                            .value("Continue")
                            .on(Action::ContinueCheckout),
                    ]),
                ]),
            ),
        )
    }

    /// Subtotal, tax and total of the current cart in cents
    #[must_use]
    pub fn totals(&self) -> (u64, u64, u64) {
        let subtotal: u64 = self
            .cart
            .iter()
            .filter_map(|&id| product(id))
            .map(|p| p.cents)
            .sum();
        let tax = (subtotal * TAX_PERCENT + 50) / 100;
        (subtotal, tax, subtotal + tax)
    }

    fn render_overview(&self) -> Node {
        let (subtotal, tax, total) = self.totals();
        self.page(
            "Checkout: Overview",
            Node::new("div").id("checkout_summary_container").children([
                self.cart_list(false),
                Node::new("div").class("summary_info").children([
                    Node::new("div").class("summary_info_label").text("Payment Information:"),
                    Node::new("div").class("summary_value_label").text("SauceCard #31337"),
                    Node::new("div").class("summary_info_label").text("Shipping Information:"),
                    Node::new("div")
                        .class("summary_value_label")
                        .text("Free Pony Express Delivery!"),
                    Node::new("div").class("summary_info_label summary_total_info_label").text("Price Total"),
                    Node::new("div")
                        .class("summary_subtotal_label")
                        .text(format!("Item total: {}", Money::from_cents(subtotal))),
                    Node::new("div")
                        .class("summary_tax_label")
                        .text(format!("Tax: {}", Money::from_cents(tax))),
                    Node::new("div")
                        .class("summary_info_label summary_total_label")
                        .text(format!("Total: {}", Money::from_cents(total))),
                    Node::new("div").class("cart_footer").children([
                        Node::new("button")
                            .id("cancel")
                            .class("btn btn_secondary back btn_medium cart_cancel_link")
                            .text("Cancel")
                            .on(Action::CancelOverview),
                        Node::new("button")
                            .id("finish")
                            .class("btn btn_action btn_medium cart_button")
                            .text("Finish")
                            .on(Action::Finish),
                    ]),
                ]),
            ]),
        )
    }

    fn render_complete(&self) -> Node {
        self.page(
            "Checkout: Complete!",
            Node::new("div").id("checkout_complete_container").class("checkout_complete_container").children([
                Node::new("img")
                    .class("pony_express")
                    .attr("alt", "Pony Express")
                    .attr("src", "/static/media/pony-express.png"),
                Node::new("h2").class("complete-header").text("Thank you for your order!"),
                Node::new("div").class("complete-text").text(
                    "Your order has been dispatched, and will arrive just as fast as the pony can get there!",
                ),
                Node::new("button")
                    .id("back-to-products")
                    .class("btn btn_primary btn_small")
                    .text("Back Home")
                    .on(Action::BackToProducts),
            ]),
        )
    }
}
