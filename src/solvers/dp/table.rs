//! Solution table

use std::iter;

use crate::solvers::SolverError;

/// How a reachable total was first reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TableEntry {
    /// Total `0`, reachable by choosing nothing.
    Base,

    /// `item_idx` was added to the selection for `predecessor`.
    Chosen {
        /// Index of the item in the catalog
        item_idx: usize,
        /// Total before the item was added
        predecessor: usize,
    },
}

/// Dense table of reachable totals `0..=target`, in scaled units.
#[derive(Debug)]
pub(crate) struct SolutionTable {
    entries: Vec<Option<TableEntry>>,
}

impl SolutionTable {
    /// Allocate a table for totals up to and including `target`, with only `0` filled.
    pub(crate) fn with_target(target: usize) -> Result<Self, SolverError> {
        let too_large = || SolverError::TargetTooLarge {
            scaled_target: i64::try_from(target).unwrap_or(i64::MAX),
        };

        let len = target.checked_add(1).ok_or_else(too_large)?;

        let mut entries = Vec::new();
        entries
            .try_reserve_exact(len)
            .map_err(|_err| too_large())?;

        entries.extend(
            iter::once(Some(TableEntry::Base)).chain(iter::repeat_n(None, target)),
        );

        Ok(Self { entries })
    }

    /// Whether `total` has been reached.
    pub(crate) fn contains(&self, total: usize) -> bool {
        matches!(self.entries.get(total), Some(Some(_)))
    }

    /// The entry recorded for `total`, if any.
    pub(crate) fn get(&self, total: usize) -> Option<TableEntry> {
        self.entries.get(total).copied().flatten()
    }

    /// Record how `total` was reached. An existing entry is never replaced.
    ///
    /// Returns `true` if the entry was written.
    pub(crate) fn record(&mut self, total: usize, entry: TableEntry) -> bool {
        match self.entries.get_mut(total) {
            Some(slot) if slot.is_none() => {
                *slot = Some(entry);
                true
            }
            _ => false,
        }
    }
}
