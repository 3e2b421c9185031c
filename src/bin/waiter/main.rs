//! Waiter
//!
//! Reads a menu file, looks for a selection whose prices add up exactly to the
//! target and prints the suggested meal.
//!
//! Exit status is `0` when a suggestion (or "no selection") was printed, `1` on
//! invalid input and `2` when the search hit its timeout.

use std::{
    io::{self, Write},
    process::ExitCode,
    time::Instant,
};

use anyhow::{Context, Result};
use clap::Parser;
use exact_change::prelude::*;
use humanize_duration::{Truncate, prelude::DurationExt};
use tracing::{debug, error, info};

mod config;
mod logging;

use config::WaiterArgs;

/// Exit status when the search hit its timeout.
const EXIT_CANCELLED: u8 = 2;

fn main() -> ExitCode {
    let args = WaiterArgs::parse();

    if let Err(err) = logging::init(&args) {
        writeln!(io::stderr(), "failed to initialise logging: {err}").ok();
    }

    match run(&args) {
        Ok(code) => code,
        Err(err) => {
            error!(error = %err, "waiter failed");
            writeln!(io::stderr(), "{err:#}").ok();

            ExitCode::FAILURE
        }
    }
}

fn run(args: &WaiterArgs) -> Result<ExitCode> {
    let currency = find_currency(&args.currency)?;

    info!(
        file = %args.file.display(),
        currency = currency.iso_alpha_code,
        "loading menu"
    );

    let catalog = load_catalog(&args.file, currency)
        .with_context(|| format!("could not load menu from {}", args.file.display()))?;

    debug!(items = catalog.len(), target = %catalog.target(), "menu loaded");

    let mut observer = ProgressObserver::new(args);
    let start = Instant::now();

    let outcome = ExactChangeSolver::solve_with_observer(&catalog, &mut observer)?;

    info!(
        elapsed = %start.elapsed().human(Truncate::Nano),
        entries = observer.entries,
        outcome = outcome_label(&outcome),
        "solve finished"
    );

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    write_outcome_to(&mut handle, &catalog, &outcome)?;

    Ok(ExitCode::from(exit_status(&outcome)))
}

/// A printed suggestion or "no selection" is a success; a timed out search is not.
fn exit_status(outcome: &Outcome<'_>) -> u8 {
    match outcome {
        Outcome::Feasible(_) | Outcome::Infeasible => 0,
        Outcome::Cancelled => EXIT_CANCELLED,
    }
}

fn outcome_label(outcome: &Outcome<'_>) -> &'static str {
    match outcome {
        Outcome::Feasible(_) => "feasible",
        Outcome::Infeasible => "infeasible",
        Outcome::Cancelled => "cancelled",
    }
}

/// Logs table sizing, counts filled totals and applies the optional timeout.
#[derive(Debug)]
struct ProgressObserver {
    deadline: Option<DeadlineObserver>,
    entries: usize,
}

impl ProgressObserver {
    fn new(args: &WaiterArgs) -> Self {
        Self {
            deadline: args.timeout().map(DeadlineObserver::new),
            entries: 0,
        }
    }
}

impl SolveObserver for ProgressObserver {
    fn on_scale(&mut self, scale: Scale, scaled_target: usize) {
        debug!(?scale, scaled_target, "sizing solution table");
    }

    fn on_entry(&mut self, _total: usize, _item_idx: usize, _predecessor: usize) {
        self.entries += 1;
    }

    fn should_cancel(&mut self) -> bool {
        self.deadline
            .as_mut()
            .is_some_and(|deadline| deadline.should_cancel())
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::USD};
    use testresult::TestResult;

    use super::*;

    #[test]
    fn suggestion_exits_successfully() -> TestResult {
        let tea = MenuItem::new("Tea", Money::from_minor(150, USD))?;

        assert_eq!(exit_status(&Outcome::Feasible(vec![tea])), 0);
        assert_eq!(exit_status(&Outcome::Feasible(Vec::new())), 0);

        Ok(())
    }

    #[test]
    fn no_selection_exits_successfully() {
        assert_eq!(exit_status(&Outcome::Infeasible), 0);
    }

    #[test]
    fn timed_out_search_exits_with_two() {
        assert_eq!(exit_status(&Outcome::Cancelled), 2);
    }
}
