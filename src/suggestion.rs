//! Suggestion
//!
//! Presentation of a solver outcome: the menu, the target, and the selected
//! items sorted by price then name with repeats collapsed into a quantity.

use std::io;

use rusty_money::{Money, MoneyError, iso::Currency};
use smallvec::SmallVec;
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;

use crate::{
    catalog::MenuCatalog,
    items::MenuItem,
    money::{AmountError, minor_units_of},
    solvers::Outcome,
};

/// Message shown when no selection adds up to the target.
pub const NO_SELECTION: &str = "There is no selection that would meet the target price";

/// Message shown when the search was stopped before finishing.
pub const CANCELLED: &str = "The search was stopped before a selection was found";

/// Errors that can occur when building or writing a suggestion.
#[derive(Debug, Error)]
pub enum SuggestionError {
    /// Wrapper for money errors.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// A price could not be converted to minor units.
    #[error(transparent)]
    Amount(#[from] AmountError),

    /// A line total does not fit in minor units.
    #[error("line total for {0} overflows")]
    Overflow(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// One item of the suggestion and how many of it to order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionLine<'a> {
    /// The item
    pub item: MenuItem<'a>,

    /// How many times it was selected
    pub quantity: usize,
}

impl<'a> SuggestionLine<'a> {
    /// Price of the item multiplied by its quantity.
    ///
    /// # Errors
    ///
    /// Returns an error if the price is not whole minor units or the total overflows.
    pub fn line_total(&self) -> Result<Money<'a, Currency>, SuggestionError> {
        let price = minor_units_of(self.item.price())?;

        let total = i64::try_from(self.quantity)
            .ok()
            .and_then(|quantity| price.checked_mul(quantity))
            .ok_or_else(|| SuggestionError::Overflow(self.item.name().to_string()))?;

        Ok(Money::from_minor(total, self.item.price().currency()))
    }
}

/// A grouped, sorted selection ready to show to a customer.
#[derive(Debug, Clone)]
pub struct Suggestion<'a> {
    lines: SmallVec<[SuggestionLine<'a>; 10]>,
    total: Money<'a, Currency>,
}

impl<'a> Suggestion<'a> {
    /// Sort a selection by price then name and group repeated items.
    ///
    /// # Errors
    ///
    /// Returns a [`SuggestionError`] if the total cannot be computed.
    pub fn from_selection(
        selection: impl Into<Vec<MenuItem<'a>>>,
        currency: &'a Currency,
    ) -> Result<Self, SuggestionError> {
        let mut selection = selection.into();
        selection.sort();

        let lines: SmallVec<[SuggestionLine<'a>; 10]> = selection
            .chunk_by(|a, b| a == b)
            .filter_map(|group| {
                group.first().map(|item| SuggestionLine {
                    item: item.clone(),
                    quantity: group.len(),
                })
            })
            .collect();

        let total = lines
            .iter()
            .try_fold(Money::from_minor(0, currency), |acc, line| {
                Ok::<_, SuggestionError>(acc.add(line.line_total()?)?)
            })?;

        Ok(Self { lines, total })
    }

    /// Grouped lines, cheapest first.
    pub fn lines(&self) -> &[SuggestionLine<'a>] {
        &self.lines
    }

    /// Sum of every line total.
    pub fn total(&self) -> Money<'a, Currency> {
        self.total
    }

    /// Number of items selected, counting repeats.
    pub fn item_count(&self) -> usize {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Writes the suggested meal as a table followed by its total.
    ///
    /// # Errors
    ///
    /// Returns an error if a line total cannot be computed or writing fails.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), SuggestionError> {
        let mut builder = Builder::default();

        builder.push_record(["Qty", "Item", "Price ea", "Line total"]);

        for line in &self.lines {
            builder.push_record([
                format!("{}x", line.quantity),
                line.item.name().to_string(),
                format!("{}", line.item.price()),
                format!("{}", line.line_total()?),
            ]);
        }

        let mut table = builder.build();
        table.with(Style::modern_rounded());
        table.modify(Columns::new(2..4), Alignment::right());

        writeln!(out, "Our suggested meal:")?;
        writeln!(out, "{table}")?;
        writeln!(out, "Total: {}", self.total)?;

        Ok(())
    }
}

/// Writes the menu and the target price.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_menu_to(mut out: impl io::Write, catalog: &MenuCatalog<'_>) -> Result<(), SuggestionError> {
    let mut builder = Builder::default();

    builder.push_record(["Item", "Price"]);

    for item in catalog.items() {
        builder.push_record([item.name().to_string(), format!("{}", item.price())]);
    }

    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.modify(Columns::new(1..2), Alignment::right());

    writeln!(out, "Our Menu:")?;
    writeln!(out, "{table}")?;
    writeln!(out, "\nYour target price is: {}\n", catalog.target())?;

    Ok(())
}

/// Writes the menu followed by the suggestion, or a message if there is none.
///
/// # Errors
///
/// Returns an error if the suggestion cannot be built or writing fails.
pub fn write_outcome_to(
    mut out: impl io::Write,
    catalog: &MenuCatalog<'_>,
    outcome: &Outcome<'_>,
) -> Result<(), SuggestionError> {
    write_menu_to(&mut out, catalog)?;

    match outcome {
        Outcome::Feasible(selection) => {
            Suggestion::from_selection(selection.clone(), catalog.currency())?.write_to(&mut out)
        }
        Outcome::Infeasible => Ok(writeln!(out, "{NO_SELECTION}")?),
        Outcome::Cancelled => Ok(writeln!(out, "{CANCELLED}")?),
    }
}
