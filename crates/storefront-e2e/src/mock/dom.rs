//! A tiny DOM: element tree, CSS subset and selector-chain resolution.
//!
//! Supported CSS: type (`button`), id (`#finish`), class (`.cart_item`),
//! attribute tests (`[data-test]`, `[data-test="error"]`,
//! `[id^="add-to-cart"]`, `[class*="badge"]`), `*`, the descendant
//! combinator and selector lists. Anything else is rejected rather than
//! silently mismatched.
//!
//! Elements are addressed by their index path from the document node, so
//! the natural ordering of paths is document order.

use super::storefront::Action;
use crate::driver::ElementState;
use crate::selector::{AriaRole, Selector, Step};
use std::collections::BTreeSet;

/// Index path from the document node
pub type NodePath = Vec<usize>;

/// One element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    /// Lowercase tag name
    pub tag: String,
    /// `id` attribute
    pub id: Option<String>,
    /// `class` attribute, split
    pub classes: Vec<String>,
    /// Other attributes
    pub attrs: Vec<(String, String)>,
    /// Own text, rendered before the children
    pub text: String,
    /// Child elements
    pub children: Vec<Node>,
    /// Not rendered (`display: none`)
    pub hidden: bool,
    /// Disabled form control
    pub disabled: bool,
    /// Current value of a form control
    pub value: Option<String>,
    /// What the storefront does when this element is clicked or filled
    pub action: Option<Action>,
}

impl Node {
    /// Element with a tag name
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Self::default()
        }
    }

    /// The document node that roots every tree
    #[must_use]
    pub fn document(children: Vec<Self>) -> Self {
        Self::new("#document").children(children)
    }

    /// Set the id
    #[must_use]
    pub fn id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    /// Add whitespace-separated classes
    #[must_use]
    pub fn class(mut self, classes: &str) -> Self {
        self.classes
            .extend(classes.split_whitespace().map(str::to_string));
        self
    }

    /// Set an attribute
    #[must_use]
    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.push((name.to_string(), value.to_string()));
        self
    }

    /// Set own text
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Append a child
    #[must_use]
    pub fn child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Append children
    #[must_use]
    pub fn children(mut self, children: impl IntoIterator<Item = Self>) -> Self {
        self.children.extend(children);
        self
    }

    /// Set whether the element is rendered
    #[must_use]
    pub const fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// Set whether the control is disabled
    #[must_use]
    pub const fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set the control value
    #[must_use]
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Bind a storefront action
    #[must_use]
    pub const fn on(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    /// Attribute lookup, including `id` and `class`
    #[must_use]
    pub fn get_attr(&self, name: &str) -> Option<String> {
        match name {
            "id" => self.id.clone(),
            "class" if !self.classes.is_empty() => Some(self.classes.join(" ")),
            "class" => None,
            "value" => self
                .value
                .clone()
                .or_else(|| self.raw_attr("value").map(str::to_string)),
            _ => self.raw_attr(name).map(str::to_string),
        }
    }

    fn raw_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// All text, hidden descendants included (like `textContent`)
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = self.text.clone();
        for child in &self.children {
            out.push_str(&child.text_content());
        }
        out
    }

    /// Rendered text, one line per block (like `innerText`)
    #[must_use]
    pub fn inner_text(&self) -> String {
        let mut lines = Vec::new();
        if !self.text.trim().is_empty() {
            lines.push(self.text.trim().to_string());
        }
        for child in self.children.iter().filter(|c| !c.hidden) {
            let text = child.inner_text();
            if !text.is_empty() {
                lines.push(text);
            }
        }
        lines.join("\n")
    }

    fn has_role(&self, role: AriaRole) -> bool {
        if let Some(explicit) = self.raw_attr("role") {
            return explicit == role.as_str();
        }
        let input_type = self.raw_attr("type").unwrap_or("text");
        match role {
            AriaRole::Button => {
                self.tag == "button"
                    || (self.tag == "input" && matches!(input_type, "button" | "submit" | "reset"))
            }
            AriaRole::Link => self.tag == "a",
            AriaRole::Textbox => {
                self.tag == "textarea"
                    || (self.tag == "input"
                        && matches!(input_type, "text" | "password" | "email" | "search"))
            }
            AriaRole::Combobox => self.tag == "select",
        }
    }

    fn accessible_name(&self) -> String {
        if let Some(label) = self.raw_attr("aria-label") {
            return label.to_string();
        }
        if self.tag == "input" {
            return self.get_attr("value").unwrap_or_default();
        }
        self.text_content()
    }
}

// =============================================================================
// CSS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
enum AttrOp {
    Exists,
    Equals(String),
    Prefix(String),
    Contains(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttrTest {
    name: String,
    op: AttrOp,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrTest>,
}

impl Compound {
    fn matches(&self, node: &Node) -> bool {
        if self.tag.as_ref().is_some_and(|tag| *tag != node.tag) {
            return false;
        }
        if self.id.is_some() && self.id != node.id {
            return false;
        }
        if !self.classes.iter().all(|c| node.classes.contains(c)) {
            return false;
        }
        self.attrs.iter().all(|test| {
            let Some(actual) = node.get_attr(&test.name) else {
                return false;
            };
            match &test.op {
                AttrOp::Exists => true,
                AttrOp::Equals(v) => actual == *v,
                AttrOp::Prefix(v) => actual.starts_with(v.as_str()),
                AttrOp::Contains(v) => actual.contains(v.as_str()),
            }
        })
    }
}

/// A parsed selector list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Css {
    alternatives: Vec<Vec<Compound>>,
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

/// Split on `sep` outside brackets and quotes
fn split_top_level(text: &str, sep: impl Fn(char) -> bool) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;
    for (i, c) in text.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '[') => depth += 1,
            (None, ']') => depth = depth.saturating_sub(1),
            (None, c) if depth == 0 && sep(c) => {
                parts.push(&text[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts.into_iter().filter(|p| !p.trim().is_empty()).collect()
}

fn take_ident(chars: &[char], mut i: usize) -> (String, usize) {
    let start = i;
    while i < chars.len() && is_ident_char(chars[i]) {
        i += 1;
    }
    (chars[start..i].iter().collect(), i)
}

fn parse_attr(body: &str) -> Result<AttrTest, String> {
    let unquote = |v: &str| v.trim().trim_matches(|c| c == '"' || c == '\'').to_string();
    for (token, make) in [
        ("^=", AttrOp::Prefix as fn(String) -> AttrOp),
        ("*=", AttrOp::Contains),
        ("=", AttrOp::Equals),
    ] {
        if let Some((name, value)) = body.split_once(token) {
            return Ok(AttrTest {
                name: name.trim().to_string(),
                op: make(unquote(value)),
            });
        }
    }
    let name = body.trim();
    if name.is_empty() || !name.chars().all(is_ident_char) {
        return Err(format!("unsupported attribute test [{body}]"));
    }
    Ok(AttrTest {
        name: name.to_string(),
        op: AttrOp::Exists,
    })
}

fn parse_compound(text: &str) -> Result<Compound, String> {
    let chars: Vec<char> = text.chars().collect();
    let mut compound = Compound::default();
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '*' => i += 1,
            '#' => {
                let (ident, next) = take_ident(&chars, i + 1);
                compound.id = Some(ident);
                i = next;
            }
            '.' => {
                let (ident, next) = take_ident(&chars, i + 1);
                compound.classes.push(ident);
                i = next;
            }
            '[' => {
                let close = chars[i..]
                    .iter()
                    .position(|&c| c == ']')
                    .ok_or_else(|| format!("unclosed attribute test in {text:?}"))?;
                let body: String = chars[i + 1..i + close].iter().collect();
                compound.attrs.push(parse_attr(&body)?);
                i += close + 1;
            }
            c if is_ident_char(c) => {
                let (ident, next) = take_ident(&chars, i);
                compound.tag = Some(ident.to_ascii_lowercase());
                i = next;
            }
            c => return Err(format!("unsupported CSS {c:?} in {text:?}")),
        }
    }
    Ok(compound)
}

impl Css {
    /// Parse a selector list
    pub fn parse(css: &str) -> Result<Self, String> {
        let alternatives = split_top_level(css, |c| c == ',')
            .into_iter()
            .map(|complex| {
                split_top_level(complex, char::is_whitespace)
                    .into_iter()
                    .map(|compound| parse_compound(compound.trim()))
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        if alternatives.is_empty() {
            return Err("empty selector".to_string());
        }
        Ok(Self { alternatives })
    }

    /// Whether the last node of `chain` (document first) matches
    fn matches(&self, chain: &[&Node]) -> bool {
        let Some((node, ancestors)) = chain.split_last() else {
            return false;
        };
        // The document node is not an element.
        let ancestors = ancestors.get(1..).unwrap_or(&[]);
        self.alternatives.iter().any(|compounds| {
            let Some((last, rest)) = compounds.split_last() else {
                return false;
            };
            if !last.matches(node) {
                return false;
            }
            let mut remaining = ancestors.len();
            for compound in rest.iter().rev() {
                match ancestors[..remaining]
                    .iter()
                    .rposition(|ancestor| compound.matches(ancestor))
                {
                    Some(found) => remaining = found,
                    None => return false,
                }
            }
            true
        })
    }
}

// =============================================================================
// RESOLUTION
// =============================================================================

/// A rendered page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dom {
    root: Node,
}

impl Dom {
    /// Wrap a tree rooted at a document node
    #[must_use]
    pub const fn new(root: Node) -> Self {
        Self { root }
    }

    /// Element at `path`
    #[must_use]
    pub fn node(&self, path: &[usize]) -> Option<&Node> {
        let mut node = &self.root;
        for &index in path {
            node = node.children.get(index)?;
        }
        Some(node)
    }

    /// Every node from the document down to `path`
    fn chain(&self, path: &[usize]) -> Vec<&Node> {
        let mut chain = vec![&self.root];
        let mut node = &self.root;
        for &index in path {
            match node.children.get(index) {
                Some(child) => {
                    chain.push(child);
                    node = child;
                }
                None => break,
            }
        }
        chain
    }

    fn descendants(&self, scope: &[usize], out: &mut BTreeSet<NodePath>, keep: &dyn Fn(&Self, &[usize]) -> bool) {
        let Some(node) = self.node(scope) else {
            return;
        };
        for index in 0..node.children.len() {
            let mut path = scope.to_vec();
            path.push(index);
            if keep(self, &path) {
                out.insert(path.clone());
            }
            self.descendants(&path, out, keep);
        }
    }

    fn descend(&self, set: &[NodePath], keep: &dyn Fn(&Self, &[usize]) -> bool) -> Vec<NodePath> {
        let mut out = BTreeSet::new();
        for scope in set {
            self.descendants(scope, &mut out, keep);
        }
        out.into_iter().collect()
    }

    /// Paths of every element `selector` resolves to, in document order
    pub fn resolve(&self, selector: &Selector) -> Result<Vec<NodePath>, String> {
        let mut set: Vec<NodePath> = vec![Vec::new()];
        for step in selector.steps() {
            set = match step {
                Step::Css(css) => {
                    let css = Css::parse(css)?;
                    self.descend(&set, &|dom, path| css.matches(&dom.chain(path)))
                }
                Step::Placeholder(text) => {
                    let needle = text.to_lowercase();
                    self.descend(&set, &|dom, path| {
                        dom.node(path)
                            .and_then(|n| n.get_attr("placeholder"))
                            .is_some_and(|p| p.to_lowercase().contains(&needle))
                    })
                }
                Step::Role { role, name } => {
                    let needle = name.as_ref().map(|n| n.to_lowercase());
                    self.descend(&set, &|dom, path| {
                        dom.node(path).is_some_and(|n| {
                            n.has_role(*role)
                                && needle.as_ref().map_or(true, |needle| {
                                    n.accessible_name().trim().to_lowercase().contains(needle)
                                })
                        })
                    })
                }
                Step::HasText(text) => set
                    .into_iter()
                    .filter(|path| {
                        self.node(path)
                            .is_some_and(|n| n.text_content().contains(text.as_str()))
                    })
                    .collect(),
                Step::Nth(index) => set.into_iter().nth(*index).into_iter().collect(),
            };
        }
        set.retain(|path| !path.is_empty());
        Ok(set)
    }

    /// Whether the element and all its ancestors are rendered
    #[must_use]
    pub fn is_visible(&self, path: &[usize]) -> bool {
        self.chain(path).iter().all(|node| !node.hidden)
    }

    /// Probe snapshot of the element at `path`
    #[must_use]
    pub fn state(&self, path: &[usize]) -> ElementState {
        let Some(node) = self.node(path) else {
            return ElementState::default();
        };
        ElementState {
            visible: self.is_visible(path),
            enabled: !node.disabled,
            text: node.inner_text(),
            value: node.value.clone(),
        }
    }

    /// Nearest action bound on the element or one of its ancestors
    #[must_use]
    pub fn action_for(&self, path: &[usize]) -> Option<Action> {
        self.chain(path).iter().rev().find_map(|node| node.action)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn page() -> Dom {
        Dom::new(Node::document(vec![Node::new("div")
            .id("wrapper")
            .children([
                Node::new("div").class("inventory_item").children([
                    Node::new("div").class("inventory_item_name").text("Sauce Labs Backpack"),
                    Node::new("div").class("inventory_item_price").text("$29.99"),
                    Node::new("button").id("add-to-cart-sauce-labs-backpack").text("Add to cart"),
                ]),
                Node::new("div").class("inventory_item").children([
                    Node::new("div").class("inventory_item_name").text("Sauce Labs Onesie"),
                    Node::new("div").class("inventory_item_price").text("$7.99"),
                    Node::new("button").id("remove-sauce-labs-onesie").text("Remove"),
                ]),
                Node::new("input")
                    .id("user-name")
                    .attr("placeholder", "Username")
                    .value(""),
                Node::new("input")
                    .id("login-button")
                    .attr("type", "submit")
                    .value("Login"),
                Node::new("div").class("bm-menu-wrap").hidden(true).child(
                    Node::new("a").id("logout_sidebar_link").text("Logout"),
                ),
            ])]))
    }

    mod css_tests {
        use super::*;

        #[test]
        fn test_parses_compounds() {
            assert!(Css::parse(r#"button[id^="add-to-cart"]"#).is_ok());
            assert!(Css::parse(".inventory_item_img img").is_ok());
            assert!(Css::parse("#a, .b").is_ok());
        }

        #[test]
        fn test_rejects_unsupported() {
            assert!(Css::parse("div > span").is_err());
            assert!(Css::parse("li:first-child").is_err());
            assert!(Css::parse("[unclosed").is_err());
        }
    }

    mod resolve_tests {
        use super::*;

        #[test]
        fn test_class_matches_in_document_order() {
            let dom = page();
            let paths = dom.resolve(&Selector::css(".inventory_item_name")).unwrap();
            assert_eq!(paths.len(), 2);
            assert_eq!(dom.state(&paths[0]).text, "Sauce Labs Backpack");
            assert_eq!(dom.state(&paths[1]).text, "Sauce Labs Onesie");
        }

        #[test]
        fn test_descendant_combinator_crosses_scope() {
            let dom = page();
            let scoped = Selector::css("#wrapper").then(Step::Css(".inventory_item button".into()));
            assert_eq!(dom.resolve(&scoped).unwrap().len(), 2);
        }

        #[test]
        fn test_has_text_then_role() {
            let dom = page();
            let selector = Selector::css(".inventory_item")
                .then(Step::HasText("Sauce Labs Onesie".into()))
                .then(Step::Role {
                    role: AriaRole::Button,
                    name: Some("remove".into()),
                });
            let paths = dom.resolve(&selector).unwrap();
            assert_eq!(paths.len(), 1);
            assert_eq!(
                dom.node(&paths[0]).unwrap().id.as_deref(),
                Some("remove-sauce-labs-onesie")
            );
        }

        #[test]
        fn test_prefix_attribute() {
            let dom = page();
            let paths = dom
                .resolve(&Selector::css(r#"button[id^="add-to-cart"]"#))
                .unwrap();
            assert_eq!(paths.len(), 1);
        }

        #[test]
        fn test_submit_input_is_named_by_value() {
            let dom = page();
            let selector = Selector::root().then(Step::Role {
                role: AriaRole::Button,
                name: Some("LOGIN".into()),
            });
            assert_eq!(dom.resolve(&selector).unwrap().len(), 1);
        }

        #[test]
        fn test_hidden_ancestor_hides_descendant() {
            let dom = page();
            let paths = dom.resolve(&Selector::css("#logout_sidebar_link")).unwrap();
            assert!(!dom.state(&paths[0]).visible);
        }

        #[test]
        fn test_root_resolves_to_nothing() {
            assert!(page().resolve(&Selector::root()).unwrap().is_empty());
        }

        #[test]
        fn test_nth_out_of_range_is_empty() {
            let dom = page();
            let selector = Selector::css(".inventory_item").then(Step::Nth(5));
            assert!(dom.resolve(&selector).unwrap().is_empty());
        }
    }
}
