//! Solvers for exact change

use thiserror::Error;

use crate::{catalog::MenuCatalog, items::MenuItem, money::AmountError};

pub mod dp;

/// Solver Errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SolverError {
    /// The target or a price failed the minor-unit check at solve time.
    #[error("invalid amount for {subject}: {source}")]
    InvalidAmount {
        /// `"target"` or the offending item's name
        subject: String,
        /// Why the amount was rejected
        #[source]
        source: AmountError,
    },

    /// The scaled target cannot be used as a table index on this platform, or the table could not be allocated.
    #[error("target of {scaled_target} units is too large to solve")]
    TargetTooLarge {
        /// Target in the units the solver would have used
        scaled_target: i64,
    },

    /// Internal solver invariant was violated (this is a bug).
    #[error("solver invariant violated: {message}")]
    InvariantViolation {
        /// What invariant was violated
        message: &'static str,
    },
}

/// Outcome of a solve.
///
/// `Infeasible` and `Cancelled` are ordinary results, not errors. A zero target
/// is `Feasible` with an empty selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<'a> {
    /// Items (with repetition) whose prices add up exactly to the target.
    Feasible(Vec<MenuItem<'a>>),

    /// No combination of items reaches the target.
    Infeasible,

    /// The search was stopped by its observer before finishing.
    Cancelled,
}

impl<'a> Outcome<'a> {
    /// Returns `true` for [`Outcome::Feasible`].
    pub fn is_feasible(&self) -> bool {
        matches!(self, Self::Feasible(_))
    }

    /// The selected items, if a selection was found.
    pub fn selection(&self) -> Option<&[MenuItem<'a>]> {
        match self {
            Self::Feasible(items) => Some(items),
            Self::Infeasible | Self::Cancelled => None,
        }
    }

    /// Consume the outcome, returning the selected items if a selection was found.
    pub fn into_selection(self) -> Option<Vec<MenuItem<'a>>> {
        match self {
            Self::Feasible(items) => Some(items),
            Self::Infeasible | Self::Cancelled => None,
        }
    }
}

/// Trait for finding an exact-change selection from a catalog
pub trait Solver {
    /// Find items whose prices add up to the catalog's target.
    ///
    /// # Errors
    ///
    /// Returns a [`SolverError`] if the solver encounters an error.
    fn solve<'a>(catalog: &MenuCatalog<'a>) -> Result<Outcome<'a>, SolverError>;
}
