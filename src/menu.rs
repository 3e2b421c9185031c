//! Text menus
//!
//! A menu file has two sections: the first non-blank line is the target price,
//! and every following non-blank line is `name, price`.
//!
//! ```text
//! $15.05
//! mixed fruit,$2.15
//! french fries,$2.75
//! ```

use rusty_money::iso::Currency;
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    catalog::{CatalogError, MenuCatalog},
    items::{ItemError, MenuItem},
    money::{AmountError, parse_amount},
};

/// Errors produced while parsing a text menu. Line numbers start at 1.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MenuParseError {
    /// The text contained no non-blank lines.
    #[error("no target price was given")]
    MissingTarget,

    /// The first non-blank line is not a valid amount.
    #[error("invalid target {text:?} on line {line}: {source}")]
    InvalidTarget {
        /// Line number
        line: usize,
        /// The offending line
        text: String,
        /// Why the amount was rejected
        #[source]
        source: AmountError,
    },

    /// A menu line is not of the form `name, price`.
    #[error("menu line {line} should be `name, price`: {text:?}")]
    MalformedLine {
        /// Line number
        line: usize,
        /// The offending line
        text: String,
    },

    /// A menu line has an invalid price.
    #[error("invalid price {text:?} on line {line}: {source}")]
    InvalidPrice {
        /// Line number
        line: usize,
        /// The offending price field
        text: String,
        /// Why the amount was rejected
        #[source]
        source: AmountError,
    },

    /// A menu line has an invalid item.
    #[error("invalid item on line {line}: {source}")]
    InvalidItem {
        /// Line number
        line: usize,
        /// Why the item was rejected
        #[source]
        source: ItemError,
    },

    /// The parsed menu does not form a valid catalog (e.g. it has no items).
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Parse a text menu into a validated catalog, with every amount in `currency`.
///
/// Blank lines are skipped wherever they appear.
///
/// # Errors
///
/// Returns a [`MenuParseError`] describing the first problem found.
pub fn parse<'a>(text: &str, currency: &'a Currency) -> Result<MenuCatalog<'a>, MenuParseError> {
    let mut target = None;
    let mut items = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            continue;
        }

        if target.is_none() {
            let amount =
                parse_amount(trimmed, currency).map_err(|source| MenuParseError::InvalidTarget {
                    line,
                    text: trimmed.to_string(),
                    source,
                })?;

            target = Some(amount);
            continue;
        }

        items.push(parse_item(trimmed, line, currency)?);
    }

    let target = target.ok_or(MenuParseError::MissingTarget)?;

    Ok(MenuCatalog::new(target, items)?)
}

fn parse_item<'a>(
    text: &str,
    line: usize,
    currency: &'a Currency,
) -> Result<MenuItem<'a>, MenuParseError> {
    let fields: SmallVec<[&str; 2]> = text.split(',').map(str::trim).collect();

    let [name, price] = fields.as_slice() else {
        return Err(MenuParseError::MalformedLine {
            line,
            text: text.to_string(),
        });
    };

    let price = parse_amount(price, currency).map_err(|source| MenuParseError::InvalidPrice {
        line,
        text: (*price).to_string(),
        source,
    })?;

    MenuItem::new(name, price).map_err(|source| MenuParseError::InvalidItem { line, source })
}
