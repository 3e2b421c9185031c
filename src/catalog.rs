//! Menu catalog

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    items::MenuItem,
    money::{AmountError, minor_units_of},
};

/// Errors related to catalog construction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The target or an item price is not a whole, non-negative number of minor units.
    #[error("invalid amount for {subject}: {source}")]
    InvalidAmount {
        /// `"target"` or the offending item's name
        subject: String,
        /// Why the amount was rejected
        #[source]
        source: AmountError,
    },

    /// No items were supplied.
    #[error("the menu has no items")]
    EmptyMenu,

    /// An item is priced in a different currency from the target.
    #[error("{item} is priced in {actual}, but the target is in {expected}")]
    CurrencyMismatch {
        /// Name of the offending item
        item: String,
        /// Currency of the target
        expected: &'static str,
        /// Currency of the item
        actual: &'static str,
    },
}

/// A validated target price and the ordered items that may be used to reach it.
///
/// Once built the catalog is read-only; the order of `items` is significant
/// because the solver prefers earlier items when several complete the same total.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuCatalog<'a> {
    target: Money<'a, Currency>,
    items: Vec<MenuItem<'a>>,
}

impl<'a> MenuCatalog<'a> {
    /// Create a new catalog from a target and a non-empty list of items.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::InvalidAmount`]: the target or a price has fractional minor units or is negative.
    /// - [`CatalogError::EmptyMenu`]: `items` is empty.
    /// - [`CatalogError::CurrencyMismatch`]: an item is not priced in the target's currency.
    pub fn new(
        target: Money<'a, Currency>,
        items: impl Into<Vec<MenuItem<'a>>>,
    ) -> Result<Self, CatalogError> {
        let items = items.into();

        minor_units_of(&target).map_err(|source| CatalogError::InvalidAmount {
            subject: "target".to_string(),
            source,
        })?;

        if items.is_empty() {
            return Err(CatalogError::EmptyMenu);
        }

        let currency = target.currency();

        items.iter().try_for_each(|item| {
            let item_currency = item.price().currency();

            if item_currency != currency {
                return Err(CatalogError::CurrencyMismatch {
                    item: item.name().to_string(),
                    expected: currency.iso_alpha_code,
                    actual: item_currency.iso_alpha_code,
                });
            }

            minor_units_of(item.price())
                .map(|_minor_units| ())
                .map_err(|source| CatalogError::InvalidAmount {
                    subject: item.name().to_string(),
                    source,
                })
        })?;

        Ok(Self { target, items })
    }

    /// Build a catalog without validation, to exercise the solver's own checks.
    #[cfg(test)]
    pub(crate) fn new_unchecked(target: Money<'a, Currency>, items: Vec<MenuItem<'a>>) -> Self {
        Self { target, items }
    }

    /// The amount the selection must add up to.
    pub fn target(&self) -> &Money<'a, Currency> {
        &self.target
    }

    /// Items in the order they were listed.
    pub fn items(&self) -> &[MenuItem<'a>] {
        &self.items
    }

    /// Currency shared by the target and every item.
    pub fn currency(&self) -> &'a Currency {
        self.target.currency()
    }

    /// Number of items on the menu.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always `false`; an empty menu is rejected at construction.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
