//! Exact Change
//!
//! Finds a selection of menu items, each usable any number of times, whose
//! prices add up exactly to a target amount. This is the waiter's problem from
//! xkcd #287.
//!
//! Amounts are `rusty_money` values held in whole minor units; anything finer
//! than a cent is rejected rather than rounded, and the solver never touches
//! floating point.
//!
//! ```rust
//! use exact_change::prelude::*;
//! use rusty_money::iso::USD;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = parse("$15.05\nmixed fruit, $2.15\nhot wings, $3.55\n", USD)?;
//!
//! let outcome = ExactChangeSolver::solve(&catalog)?;
//!
//! assert_eq!(outcome.selection().map(<[_]>::len), Some(7));
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod fixtures;
pub mod items;
pub mod menu;
pub mod money;
pub mod prelude;
pub mod solvers;
pub mod suggestion;
