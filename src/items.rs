//! Menu items

use std::{cmp::Ordering, fmt};

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

/// Errors that can occur while creating a menu item.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ItemError {
    /// The item name was empty once surrounding whitespace was removed.
    #[error("menu items must have a name")]
    EmptyName,
}

/// A named, priced item on the menu.
///
/// Price validation happens when the item is placed into a
/// [`MenuCatalog`](crate::catalog::MenuCatalog), so an item can be built from
/// any [`Money`] value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuItem<'a> {
    name: String,
    price: Money<'a, Currency>,
}

impl<'a> MenuItem<'a> {
    /// Creates a new item, trimming whitespace from the name.
    ///
    /// # Errors
    ///
    /// Returns [`ItemError::EmptyName`] if the trimmed name is empty.
    pub fn new(name: &str, price: Money<'a, Currency>) -> Result<Self, ItemError> {
        let name = name.trim();

        if name.is_empty() {
            return Err(ItemError::EmptyName);
        }

        Ok(Self {
            name: name.to_string(),
            price,
        })
    }

    /// Returns the name of the item
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the price of the item
    pub fn price(&self) -> &Money<'a, Currency> {
        &self.price
    }
}

impl Ord for MenuItem<'_> {
    /// Cheapest first, then alphabetical.
    fn cmp(&self, other: &Self) -> Ordering {
        self.price
            .amount()
            .cmp(other.price.amount())
            .then_with(|| self.name.cmp(&other.name))
            .then_with(|| {
                self.price
                    .currency()
                    .iso_alpha_code
                    .cmp(other.price.currency().iso_alpha_code)
            })
    }
}

impl PartialOrd for MenuItem<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for MenuItem<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.price)
    }
}
