//! Dynamic programming solver
//!
//! Unbounded exact subset sum: every item may be chosen any number of times and
//! the chosen prices must add up to the target with no remainder.
//!
//! The table has one slot per reachable total, so time is `O(items × target)`
//! and memory is `O(target)` where `target` is counted in cents, or in whole
//! currency units when every amount on the menu is whole. Very large targets are
//! therefore expensive; use a [`DeadlineObserver`] to bound a solve.

use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;

use crate::{
    catalog::MenuCatalog,
    items::MenuItem,
    money::{minor_unit_factor, minor_units_of},
    solvers::{Outcome, Solver, SolverError},
};

pub mod observer;
pub(crate) mod table;

pub use observer::{DeadlineObserver, NoopObserver, Scale, SolveObserver};

use table::{SolutionTable, TableEntry};

type PriceList = SmallVec<[i64; 16]>;

/// Solver using a bottom-up table of reachable totals.
///
/// Items are considered in catalog order and a total is only ever recorded by
/// the first item that reaches it, so when several items could complete the
/// same total the one listed first wins.
#[derive(Debug)]
pub struct ExactChangeSolver;

impl ExactChangeSolver {
    /// Solve with an observer that can follow progress and cancel the search.
    ///
    /// # Errors
    ///
    /// - [`SolverError::InvalidAmount`]: the target or a price is not a whole number of minor units.
    /// - [`SolverError::TargetTooLarge`]: the table for the target cannot be addressed or allocated.
    /// - [`SolverError::InvariantViolation`]: reconstruction failed (this is a bug).
    pub fn solve_with_observer<'a>(
        catalog: &MenuCatalog<'a>,
        observer: &mut dyn SolveObserver,
    ) -> Result<Outcome<'a>, SolverError> {
        let target_minor = checked_minor_units("target", catalog.target())?;

        let prices_minor = catalog
            .items()
            .iter()
            .map(|item| checked_minor_units(item.name(), item.price()))
            .collect::<Result<PriceList, _>>()?;

        let scale = choose_scale(catalog.currency(), target_minor, &prices_minor);
        let units = units_per_slot(scale, catalog.currency());

        let target = to_slot(target_minor / units)?;

        observer.on_scale(scale, target);

        if target == 0 {
            return Ok(Outcome::Feasible(Vec::new()));
        }

        let mut table = SolutionTable::with_target(target)?;

        for (item_idx, &price_minor) in prices_minor.iter().enumerate() {
            // Later items can never change the chain that ends at the target.
            if table.contains(target) {
                break;
            }

            if observer.should_cancel() {
                return Ok(Outcome::Cancelled);
            }

            let price = to_slot(price_minor / units)?;

            if price == 0 || price > target {
                continue;
            }

            for total in price..=target {
                if observer.should_cancel() {
                    return Ok(Outcome::Cancelled);
                }

                let predecessor = total - price;

                if table.contains(total) || !table.contains(predecessor) {
                    continue;
                }

                let entry = TableEntry::Chosen {
                    item_idx,
                    predecessor,
                };

                if table.record(total, entry) {
                    observer.on_entry(total, item_idx, predecessor);
                }
            }
        }

        if !table.contains(target) {
            return Ok(Outcome::Infeasible);
        }

        let selection = reconstruct(&table, catalog.items(), target)?;

        ensure_selection_total(&selection, target_minor)?;

        Ok(Outcome::Feasible(selection))
    }
}

impl Solver for ExactChangeSolver {
    fn solve<'a>(catalog: &MenuCatalog<'a>) -> Result<Outcome<'a>, SolverError> {
        Self::solve_with_observer(catalog, &mut NoopObserver)
    }
}

fn checked_minor_units(subject: &str, money: &Money<'_, Currency>) -> Result<i64, SolverError> {
    minor_units_of(money).map_err(|source| SolverError::InvalidAmount {
        subject: subject.to_string(),
        source,
    })
}

/// Use whole currency units when the target and every price are whole.
fn choose_scale(currency: &Currency, target_minor: i64, prices_minor: &[i64]) -> Scale {
    let Some(factor) = minor_unit_factor(currency).filter(|factor| *factor > 1) else {
        return Scale::Minor;
    };

    let is_whole = |minor: i64| minor % factor == 0;

    if is_whole(target_minor) && prices_minor.iter().copied().all(is_whole) {
        Scale::Major
    } else {
        Scale::Minor
    }
}

/// Minor units covered by one table slot.
fn units_per_slot(scale: Scale, currency: &Currency) -> i64 {
    match scale {
        Scale::Minor => 1,
        Scale::Major => minor_unit_factor(currency).unwrap_or(1),
    }
}

fn to_slot(scaled: i64) -> Result<usize, SolverError> {
    usize::try_from(scaled).map_err(|_err| SolverError::TargetTooLarge {
        scaled_target: scaled,
    })
}

/// Walk predecessors back from `target` to `0`, collecting the chosen items.
fn reconstruct<'a>(
    table: &SolutionTable,
    items: &[MenuItem<'a>],
    target: usize,
) -> Result<Vec<MenuItem<'a>>, SolverError> {
    let mut selection = Vec::new();
    let mut current = target;

    while current != 0 {
        let Some(TableEntry::Chosen {
            item_idx,
            predecessor,
        }) = table.get(current)
        else {
            return Err(SolverError::InvariantViolation {
                message: "reconstruction reached a total with no recorded item",
            });
        };

        if predecessor >= current {
            return Err(SolverError::InvariantViolation {
                message: "predecessor total did not decrease",
            });
        }

        let item = items
            .get(item_idx)
            .ok_or(SolverError::InvariantViolation {
                message: "table entry refers to an item outside the catalog",
            })?;

        selection.push(item.clone());
        current = predecessor;
    }

    Ok(selection)
}

fn ensure_selection_total(
    selection: &[MenuItem<'_>],
    target_minor: i64,
) -> Result<(), SolverError> {
    let total = selection.iter().try_fold(0_i64, |acc, item| {
        let minor = minor_units_of(item.price()).ok()?;
        acc.checked_add(minor)
    });

    if total == Some(target_minor) {
        Ok(())
    } else {
        Err(SolverError::InvariantViolation {
            message: "selection total does not equal the target",
        })
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rusty_money::iso::{JPY, USD};
    use testresult::TestResult;

    use super::*;

    fn catalog(
        target: i64,
        items: &[(&str, i64)],
    ) -> Result<MenuCatalog<'static>, Box<dyn std::error::Error>> {
        let items = items
            .iter()
            .map(|(name, minor)| MenuItem::new(name, Money::from_minor(*minor, USD)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(MenuCatalog::new(Money::from_minor(target, USD), items)?)
    }

    fn names<'a>(outcome: &'a Outcome<'_>) -> Vec<&'a str> {
        outcome
            .selection()
            .unwrap_or_default()
            .iter()
            .map(MenuItem::name)
            .collect()
    }

    #[derive(Debug, Default)]
    struct Recorder {
        scale: Option<(Scale, usize)>,
        entries: Vec<(usize, usize, usize)>,
    }

    impl SolveObserver for Recorder {
        fn on_scale(&mut self, scale: Scale, scaled_target: usize) {
            self.scale = Some((scale, scaled_target));
        }

        fn on_entry(&mut self, total: usize, item_idx: usize, predecessor: usize) {
            self.entries.push((total, item_idx, predecessor));
        }
    }

    #[derive(Debug)]
    struct CancelAfter(usize);

    impl SolveObserver for CancelAfter {
        fn should_cancel(&mut self) -> bool {
            if self.0 == 0 {
                return true;
            }

            self.0 -= 1;

            false
        }
    }

    #[test]
    fn xkcd_menu_is_seven_mixed_fruit() -> TestResult {
        let catalog = catalog(
            1505,
            &[
                ("Mixed Fruit", 215),
                ("French Fries", 275),
                ("Side Salad", 335),
                ("Hot Wings", 355),
                ("Mozzarella Sticks", 420),
                ("Sampler Plate", 580),
            ],
        )?;

        let outcome = ExactChangeSolver::solve(&catalog)?;

        assert_eq!(names(&outcome), ["Mixed Fruit"; 7]);

        Ok(())
    }

    #[test]
    fn selection_is_reconstructed_from_the_target_down() -> TestResult {
        let catalog = catalog(575, &[("Sandwich", 350), ("Soup", 225), ("Salad", 475)])?;

        let outcome = ExactChangeSolver::solve(&catalog)?;

        assert_eq!(names(&outcome), ["Soup", "Sandwich"]);

        Ok(())
    }

    #[test]
    fn first_listed_item_wins_ties() -> TestResult {
        let catalog = catalog(200, &[("A", 200), ("B", 200)])?;

        let outcome = ExactChangeSolver::solve(&catalog)?;

        assert_eq!(names(&outcome), ["A"]);

        Ok(())
    }

    #[test]
    fn earlier_item_is_preferred_over_cheaper_completion() -> TestResult {
        let catalog = catalog(450, &[("Soup", 225), ("Tea", 150)])?;

        let outcome = ExactChangeSolver::solve(&catalog)?;

        assert_eq!(names(&outcome), ["Soup", "Soup"]);

        Ok(())
    }

    #[test]
    fn zero_target_is_an_empty_feasible_selection() -> TestResult {
        let catalog = catalog(0, &[("Tea", 150)])?;

        assert_eq!(ExactChangeSolver::solve(&catalog)?, Outcome::Feasible(Vec::new()));

        Ok(())
    }

    #[test]
    fn unreachable_target_is_infeasible() -> TestResult {
        let catalog = catalog(300, &[("Steak", 500)])?;

        assert_eq!(ExactChangeSolver::solve(&catalog)?, Outcome::Infeasible);

        Ok(())
    }

    #[test]
    fn zero_priced_items_are_ignored() -> TestResult {
        let catalog = catalog(300, &[("Water", 0), ("Tea", 150)])?;

        assert_eq!(names(&ExactChangeSolver::solve(&catalog)?), ["Tea", "Tea"]);

        Ok(())
    }

    #[test]
    fn whole_dollar_menus_use_major_scale() -> TestResult {
        let catalog = catalog(1000, &[("Burger", 400), ("Shake", 300)])?;
        let mut recorder = Recorder::default();

        let outcome = ExactChangeSolver::solve_with_observer(&catalog, &mut recorder)?;

        assert_eq!(recorder.scale, Some((Scale::Major, 10)));
        assert_eq!(names(&outcome), ["Shake", "Shake", "Burger"]);

        Ok(())
    }

    #[test]
    fn cents_force_minor_scale() -> TestResult {
        let catalog = catalog(1000, &[("Burger", 400), ("Shake", 350)])?;
        let mut recorder = Recorder::default();

        ExactChangeSolver::solve_with_observer(&catalog, &mut recorder)?;

        assert_eq!(recorder.scale, Some((Scale::Minor, 1000)));

        Ok(())
    }

    #[test]
    fn zero_exponent_currency_stays_at_minor_scale() -> TestResult {
        let ramen = MenuItem::new("Ramen", Money::from_minor(900, JPY))?;
        let gyoza = MenuItem::new("Gyoza", Money::from_minor(400, JPY))?;
        let catalog = MenuCatalog::new(Money::from_minor(1700, JPY), [ramen, gyoza])?;
        let mut recorder = Recorder::default();

        let outcome = ExactChangeSolver::solve_with_observer(&catalog, &mut recorder)?;

        assert_eq!(recorder.scale, Some((Scale::Minor, 1700)));
        assert_eq!(names(&outcome), ["Gyoza", "Gyoza", "Ramen"]);

        Ok(())
    }

    #[test]
    fn observer_sees_each_total_once() -> TestResult {
        let catalog = catalog(400, &[("Coffee", 100), ("Bagel", 200)])?;
        let mut recorder = Recorder::default();

        ExactChangeSolver::solve_with_observer(&catalog, &mut recorder)?;

        // Coffee reaches every total before Bagel gets a chance.
        assert_eq!(
            recorder.entries,
            [(1, 0, 0), (2, 0, 1), (3, 0, 2), (4, 0, 3)]
        );

        Ok(())
    }

    #[test]
    fn cancellation_is_not_infeasibility() -> TestResult {
        let catalog = catalog(1505, &[("Hot Wings", 355), ("Mixed Fruit", 215)])?;

        let outcome = ExactChangeSolver::solve_with_observer(&catalog, &mut CancelAfter(10))?;

        assert_eq!(outcome, Outcome::Cancelled);

        Ok(())
    }

    #[test]
    fn money_with_fractional_cents_is_rejected_at_solve_time() -> TestResult {
        let tea = MenuItem::new("Tea", Money::from_minor(150, USD))?;
        let catalog =
            MenuCatalog::new_unchecked(Money::from_decimal(Decimal::new(3001, 3), USD), vec![tea]);

        assert!(matches!(
            ExactChangeSolver::solve(&catalog),
            Err(SolverError::InvalidAmount { ref subject, .. }) if subject == "target"
        ));

        Ok(())
    }

    #[test]
    fn ensure_selection_total_detects_mismatch() -> TestResult {
        let tea = MenuItem::new("Tea", Money::from_minor(150, USD))?;

        assert!(ensure_selection_total(&[tea.clone(), tea.clone()], 300).is_ok());
        assert!(matches!(
            ensure_selection_total(&[tea], 300),
            Err(SolverError::InvariantViolation { .. })
        ));

        Ok(())
    }
}
