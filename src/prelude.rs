//! Exact Change prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    catalog::{CatalogError, MenuCatalog},
    fixtures::{FixtureError, MenuFixture, load_catalog},
    items::{ItemError, MenuItem},
    menu::{MenuParseError, parse},
    money::{AmountError, find_currency, parse_amount},
    solvers::{
        Outcome, Solver, SolverError,
        dp::{DeadlineObserver, ExactChangeSolver, NoopObserver, Scale, SolveObserver},
    },
    suggestion::{Suggestion, SuggestionError, SuggestionLine, write_outcome_to},
};
