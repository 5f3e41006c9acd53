use crate::location::Location;
use crate::step::Step;
use fxhash::FxBuildHasher;
use indexmap::IndexMap;
use log::warn;
use std::sync::Arc;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Open and closed steps of a single search, keyed by location. A location is in at most one of
/// the two maps, and once closed it never returns to the open map.
///
/// The open map keeps insertion order, which makes the linear minimum scan in
/// [extract_min_open](Self::extract_min_open) break ties by first admission.
#[derive(Debug, Default)]
pub struct SearchFrontier {
    open: FxIndexMap<Location, Arc<Step>>,
    closed: FxIndexMap<Location, Arc<Step>>,
}

impl SearchFrontier {
    pub fn new() -> SearchFrontier {
        SearchFrontier::default()
    }

    /// Offers a step to the open set. It is admitted if its location has no open entry yet, or
    /// if it reaches that location with a strictly lower cost so far than the current entry, which
    /// it then replaces in place. Closed locations are never reopened. Returns whether the step was
    /// admitted.
    pub fn admit_open(&mut self, step: Step) -> bool {
        if self.is_closed(&step.location()) {
            return false;
        }
        match self.open.get_mut(&step.location()) {
            Some(existing) if step.cost_so_far() < existing.cost_so_far() => {
                *existing = Arc::new(step);
                true
            }
            Some(_) => false,
            None => {
                self.open.insert(step.location(), Arc::new(step));
                true
            }
        }
    }

    /// The open step with the smallest total cost, or [None] if the open set is empty. The step
    /// stays open until [close](Self::close) is called for its location.
    pub fn extract_min_open(&self) -> Option<Arc<Step>> {
        self.open
            .values()
            .fold(None, |best: Option<&Arc<Step>>, step| match best {
                Some(b) if b.total_cost() <= step.total_cost() => Some(b),
                _ => Some(step),
            })
            .cloned()
    }

    pub fn open_count(&self) -> usize {
        self.open.len()
    }

    pub fn closed_count(&self) -> usize {
        self.closed.len()
    }

    /// Moves the open step at `loc` to the closed set. Returns false, leaving both sets untouched,
    /// if `loc` has no open entry.
    pub fn close(&mut self, loc: &Location) -> bool {
        match self.open.shift_remove(loc) {
            Some(step) => {
                self.closed.insert(*loc, step);
                true
            }
            None => {
                warn!("Tried to close {} which is not open", loc);
                false
            }
        }
    }

    pub fn is_open(&self, loc: &Location) -> bool {
        self.open.contains_key(loc)
    }

    pub fn is_closed(&self, loc: &Location) -> bool {
        self.closed.contains_key(loc)
    }
}
