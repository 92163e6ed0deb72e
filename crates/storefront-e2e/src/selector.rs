//! Structured selectors.
//!
//! A [`Selector`] is a chain of [`Step`]s evaluated left to right, each step
//! narrowing or descending from the element set produced by the previous one.
//! Keeping the chain structured (instead of one opaque string) lets every
//! driver evaluate it natively: the Chromium driver compiles it to JavaScript
//! and the in-memory storefront walks its own tree.
//!
//! The empty chain denotes the document root.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Accessible roles that can be located by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AriaRole {
    /// `<button>`, button-like `<input>`, or `role="button"`
    Button,
    /// `<a>` or `role="link"`
    Link,
    /// Text inputs and textareas
    Textbox,
    /// `<select>` or `role="combobox"`
    Combobox,
}

impl AriaRole {
    /// Role name as used in ARIA
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Button => "button",
            Self::Link => "link",
            Self::Textbox => "textbox",
            Self::Combobox => "combobox",
        }
    }

    /// CSS matching elements that carry this role implicitly or explicitly
    #[must_use]
    pub const fn implicit_css(self) -> &'static str {
        match self {
            Self::Button => {
                r#"button, input[type="button"], input[type="submit"], [role="button"]"#
            }
            Self::Link => r#"a, [role="link"]"#,
            Self::Textbox => {
                r#"input:not([type]), input[type="text"], input[type="password"], textarea, [role="textbox"]"#
            }
            Self::Combobox => r#"select, [role="combobox"]"#,
        }
    }
}

/// One step of a selector chain
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Step {
    /// Descendants matching a CSS selector
    Css(String),
    /// Descendants whose placeholder contains the text (case-insensitive)
    Placeholder(String),
    /// Descendants with an accessible role, optionally filtered by a
    /// case-insensitive accessible-name substring
    Role {
        /// Role to match
        role: AriaRole,
        /// Accessible-name substring
        name: Option<String>,
    },
    /// Keep only elements whose text content contains the text exactly
    HasText(String),
    /// Keep only the element at this index
    Nth(usize),
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Css(css) => write!(f, "{css}"),
            Self::Placeholder(text) => write!(f, "placeholder={text:?}"),
            Self::Role { role, name: None } => write!(f, "role={}", role.as_str()),
            Self::Role {
                role,
                name: Some(name),
            } => write!(f, "role={}[name~={name:?}i]", role.as_str()),
            Self::HasText(text) => write!(f, "has-text={text:?}"),
            Self::Nth(index) => write!(f, "nth={index}"),
        }
    }
}

/// A chain of steps resolved from the document root
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selector {
    steps: Vec<Step>,
}

impl Selector {
    /// The document root
    #[must_use]
    pub const fn root() -> Self {
        Self { steps: Vec::new() }
    }

    /// A single CSS step from the root
    #[must_use]
    pub fn css(css: impl Into<String>) -> Self {
        Self::root().then(Step::Css(css.into()))
    }

    /// Extend the chain by one step
    #[must_use]
    pub fn then(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    /// Steps in evaluation order
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Whether this is the document root
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.steps.is_empty()
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.steps.is_empty() {
            return write!(f, ":root");
        }
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                write!(f, " >> ")?;
            }
            write!(f, "{step}")?;
        }
        Ok(())
    }
}
