//! Currency values read from the storefront.
//!
//! Prices render as `$<integer>.<2-digit fraction>`, sometimes behind a label
//! (`Item total: $29.99`). Amounts are kept in integer cents so that sums and
//! comparisons are exact.

use crate::result::{E2eError, E2eResult};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::sync::OnceLock;

fn price_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        #[allow(clippy::expect_used)]
        Regex::new(r"\$(\d+)\.(\d{2})(?:\D|$)").expect("price pattern is valid")
    })
}

/// An amount of money in cents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money {
    cents: u64,
}

impl Money {
    /// Zero dollars
    pub const ZERO: Self = Self { cents: 0 };

    /// Create from cents
    #[must_use]
    pub const fn from_cents(cents: u64) -> Self {
        Self { cents }
    }

    /// Amount in cents
    #[must_use]
    pub const fn cents(self) -> u64 {
        self.cents
    }

    /// Parse the first `$<int>.<2 digits>` amount found in `text`.
    pub fn parse(text: &str) -> E2eResult<Self> {
        let captures = price_pattern()
            .captures(text)
            .ok_or_else(|| E2eError::Parse {
                expected: "price",
                text: text.to_string(),
            })?;
        let dollars: u64 = captures[1].parse().map_err(|_| E2eError::Parse {
            expected: "price",
            text: text.to_string(),
        })?;
        let fraction: u64 = captures[2].parse().map_err(|_| E2eError::Parse {
            expected: "price",
            text: text.to_string(),
        })?;
        dollars
            .checked_mul(100)
            .and_then(|c| c.checked_add(fraction))
            .map(Self::from_cents)
            .ok_or_else(|| E2eError::Parse {
                expected: "price",
                text: text.to_string(),
            })
    }

    /// Parse, degrading to zero on malformed text.
    ///
    /// A zero returned here is indistinguishable from a free item; prefer
    /// [`Money::parse`] unless the caller explicitly wants that ambiguity.
    #[must_use]
    pub fn parse_or_zero(text: &str) -> Self {
        Self::parse(text).unwrap_or_else(|err| {
            tracing::warn!(%err, "price text did not parse, using $0.00");
            Self::ZERO
        })
    }

    /// Whether `self` and `other` differ by less than one cent.
    ///
    /// This is the `|a - b| < 0.01` dollar rule evaluated on whole cents,
    /// so any one-cent difference is a mismatch.
    #[must_use]
    pub const fn approx_eq(self, other: Self) -> bool {
        self.cents.abs_diff(other.cents) < 1
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::from_cents(self.cents.saturating_add(rhs.cents))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}.{:02}", self.cents / 100, self.cents % 100)
    }
}

impl std::str::FromStr for Money {
    type Err = E2eError;

    fn from_str(s: &str) -> E2eResult<Self> {
        Self::parse(s)
    }
}
