//! Memoized filtered subsets.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::Mutex;

use super::Dataset;
use crate::domain::facet::{filter, FacetSet};

struct State<R, F> {
    version: u64,
    subsets: HashMap<F, Arc<Vec<R>>>,
}

/// Filtered subsets keyed by (dataset version, facet selection).
///
/// A dataset with a new version drops every subset built from the old one.
pub struct FilteredView<R, F> {
    state: Mutex<State<R, F>>,
}

impl<R, F> FilteredView<R, F>
where
    R: Clone,
    F: FacetSet<R> + Clone + Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                version: 0,
                subsets: HashMap::new(),
            }),
        }
    }

    /// Rows of `dataset` admitted by `facets`, reusing a memoized subset.
    pub fn get(&self, dataset: &Dataset<R>, facets: &F) -> Arc<Vec<R>> {
        let mut state = self.state.lock();
        if state.version != dataset.version {
            state.version = dataset.version;
            state.subsets.clear();
        }
        if let Some(subset) = state.subsets.get(facets) {
            return Arc::clone(subset);
        }

        let subset = Arc::new(filter(&dataset.rows, facets));
        state.subsets.insert(facets.clone(), Arc::clone(&subset));
        subset
    }

    /// Number of memoized subsets.
    pub fn len(&self) -> usize {
        self.state.lock().subsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<R, F> Default for FilteredView<R, F>
where
    R: Clone,
    F: FacetSet<R> + Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}
