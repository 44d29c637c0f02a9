//! Whole-rupee price representation.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A product price in whole rupees.
///
/// Serialized as a bare integer so persisted catalogs keep the `"price": 350`
/// shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(u32);

impl Price {
    /// Prefix used when displaying a price.
    pub const CURRENCY_SYMBOL: &'static str = "Rs";

    /// Create a new price.
    #[must_use]
    pub const fn new(amount: u32) -> Self {
        Self(amount)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", Self::CURRENCY_SYMBOL, self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Price::new(350).to_string(), "Rs 350");
        assert_eq!(Price::new(1450).to_string(), "Rs 1450");
    }
}
