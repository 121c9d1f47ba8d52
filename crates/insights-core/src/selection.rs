#![forbid(unsafe_code)]

//! Selection state machine over a catalog.
//!
//! A [`Selector`] owns its catalog and tracks at most one selected record.
//! The selection is stored as a catalog position; since catalogs are
//! immutable, a stored position always refers to an existing record.

use crate::catalog::{Catalog, Record};

/// Which record, if any, is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    #[default]
    NoSelection,
    Selected(usize),
}

impl SelectionState {
    #[inline]
    pub fn index(self) -> Option<usize> {
        match self {
            Self::NoSelection => None,
            Self::Selected(i) => Some(i),
        }
    }
}

/// A catalog plus the selection over it.
#[derive(Debug, Clone)]
pub struct Selector<T> {
    catalog: Catalog<T>,
    state: SelectionState,
}

impl<T: Record> Selector<T> {
    /// Start with the first record selected, or nothing for an empty catalog.
    pub fn new(catalog: Catalog<T>) -> Self {
        let state = if catalog.is_empty() {
            SelectionState::NoSelection
        } else {
            SelectionState::Selected(0)
        };
        Self { catalog, state }
    }

    /// Start with nothing selected.
    pub fn unselected(catalog: Catalog<T>) -> Self {
        Self {
            catalog,
            state: SelectionState::NoSelection,
        }
    }

    #[inline]
    pub fn catalog(&self) -> &Catalog<T> {
        &self.catalog
    }

    #[inline]
    pub fn state(&self) -> SelectionState {
        self.state
    }

    #[inline]
    pub fn selected_index(&self) -> Option<usize> {
        self.state.index()
    }

    pub fn selected(&self) -> Option<&T> {
        self.selected_index().and_then(|i| self.catalog.get(i))
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected().map(Record::id)
    }

    /// Whether the record at `index` is the selected one.
    #[inline]
    pub fn is_selected(&self, index: usize) -> bool {
        self.state == SelectionState::Selected(index)
    }

    /// Select the record with `id`. Unknown ids leave the state unchanged.
    pub fn select(&mut self, id: &str) -> bool {
        match self.catalog.position(id) {
            Some(index) => {
                self.set(index);
                true
            }
            None => {
                tracing::debug!(catalog = self.catalog.name(), id, "select ignored unknown id");
                false
            }
        }
    }

    /// Select by position. Out-of-range positions are ignored.
    pub fn select_index(&mut self, index: usize) -> bool {
        if index < self.catalog.len() {
            self.set(index);
            true
        } else {
            false
        }
    }

    /// Move to the next record, wrapping around.
    pub fn advance(&mut self) {
        let len = self.catalog.len();
        if len == 0 {
            return;
        }
        let next = match self.state {
            SelectionState::NoSelection => 0,
            SelectionState::Selected(i) => (i + 1) % len,
        };
        self.set(next);
    }

    /// Move to the previous record, wrapping around.
    pub fn retreat(&mut self) {
        let len = self.catalog.len();
        if len == 0 {
            return;
        }
        let prev = match self.state {
            SelectionState::NoSelection => 0,
            SelectionState::Selected(0) => len - 1,
            SelectionState::Selected(i) => i - 1,
        };
        self.set(prev);
    }

    pub fn clear(&mut self) {
        self.state = SelectionState::NoSelection;
    }

    fn set(&mut self, index: usize) {
        if self.state != SelectionState::Selected(index) {
            self.state = SelectionState::Selected(index);
            tracing::debug!(
                catalog = self.catalog.name(),
                index,
                id = self.selected_id().unwrap_or_default(),
                "selection changed"
            );
        }
    }
}
