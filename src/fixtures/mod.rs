//! Fixtures
//!
//! Menus can be described in YAML as well as the two-section text format:
//!
//! ```yaml
//! currency: USD
//! target: "15.05"
//! items:
//!   - name: Mixed Fruit
//!     price: "2.15"
//! ```
//!
//! Amounts are strings so they are never read as floating point.

use std::{fs, path::Path};

use rusty_money::iso::Currency;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    catalog::{CatalogError, MenuCatalog},
    items::{ItemError, MenuItem},
    menu::{self, MenuParseError},
    money::{AmountError, find_currency, parse_amount},
};

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading a menu file
    #[error("Failed to read menu file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Text menu parsing error
    #[error(transparent)]
    Menu(#[from] MenuParseError),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Invalid target or price
    #[error("Invalid amount for {subject}: {source}")]
    InvalidAmount {
        /// `"target"` or the item name
        subject: String,
        /// Why the amount was rejected
        #[source]
        source: AmountError,
    },

    /// Invalid item
    #[error("Invalid item: {0}")]
    InvalidItem(#[from] ItemError),

    /// Catalog validation error
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Menu described in YAML
#[derive(Debug, Deserialize)]
pub struct MenuFixture {
    /// ISO currency code; defaults to the caller's currency when omitted
    #[serde(default)]
    pub currency: Option<String>,

    /// Target price (e.g. `"15.05"`)
    pub target: String,

    /// Items in the order they are offered
    pub items: Vec<MenuItemFixture>,
}

/// Menu Item Fixture
#[derive(Debug, Deserialize)]
pub struct MenuItemFixture {
    /// Item name
    pub name: String,

    /// Item price (e.g. `"2.15"`)
    pub price: String,
}

impl MenuFixture {
    /// Parse a fixture from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Yaml`] if the text is not a valid menu fixture.
    pub fn from_yaml(contents: &str) -> Result<Self, FixtureError> {
        Ok(serde_norway::from_str(contents)?)
    }

    /// Read and parse a fixture file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: &Path) -> Result<Self, FixtureError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml(&contents)
    }

    /// Build a validated catalog, using `default_currency` if the fixture names none.
    ///
    /// # Errors
    ///
    /// Returns an error if the currency is unknown, an amount or item is invalid,
    /// or the resulting catalog is invalid.
    pub fn into_catalog(
        self,
        default_currency: &'static Currency,
    ) -> Result<MenuCatalog<'static>, FixtureError> {
        let currency = match self.currency.as_deref() {
            Some(code) => find_currency(code)
                .map_err(|_err| FixtureError::UnknownCurrency(code.to_string()))?,
            None => default_currency,
        };

        let target = parse_amount(&self.target, currency).map_err(|source| {
            FixtureError::InvalidAmount {
                subject: "target".to_string(),
                source,
            }
        })?;

        let items = self
            .items
            .into_iter()
            .map(|item| {
                let price = parse_amount(&item.price, currency).map_err(|source| {
                    FixtureError::InvalidAmount {
                        subject: item.name.clone(),
                        source,
                    }
                })?;

                Ok(MenuItem::new(&item.name, price)?)
            })
            .collect::<Result<Vec<_>, FixtureError>>()?;

        Ok(MenuCatalog::new(target, items)?)
    }
}

/// Load a catalog from a menu file.
///
/// Files ending in `.yml` or `.yaml` are read as [`MenuFixture`]s, anything else
/// as a text menu (see [`menu::parse`]) priced in `currency`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not describe a valid menu.
pub fn load_catalog(
    path: &Path,
    currency: &'static Currency,
) -> Result<MenuCatalog<'static>, FixtureError> {
    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yml") || ext.eq_ignore_ascii_case("yaml"));

    if is_yaml {
        return MenuFixture::from_path(path)?.into_catalog(currency);
    }

    let contents = fs::read_to_string(path)?;

    Ok(menu::parse(&contents, currency)?)
}
