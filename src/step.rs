use crate::location::Location;
use std::sync::Arc;

/// One waypoint of a candidate or finished path. Each step owns the chain back to the start
/// through `previous`; the root step has none.
///
/// The chain is shared through [Arc] so that the frontier, the successors it spawns and the
/// caller holding the final step can all keep the same predecessors alive.
#[derive(Clone, Debug, PartialEq)]
pub struct Step {
    location: Location,
    previous: Option<Arc<Step>>,
    cost_so_far: f64,
    cost_to_go: f64,
}

impl Step {
    /// Creates a step at `location` following `previous`. Both costs start at zero and are
    /// assigned with [set_costs](Self::set_costs) before the step enters the frontier.
    pub fn new(location: Location, previous: Option<Arc<Step>>) -> Step {
        Step {
            location,
            previous,
            cost_so_far: 0.0,
            cost_to_go: 0.0,
        }
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn previous(&self) -> Option<&Arc<Step>> {
        self.previous.as_ref()
    }

    pub fn is_root(&self) -> bool {
        self.previous.is_none()
    }

    pub fn set_costs(&mut self, cost_so_far: f64, cost_to_go: f64) {
        self.cost_so_far = cost_so_far;
        self.cost_to_go = cost_to_go;
    }

    /// Exact accumulated cost from the start through this chain.
    pub fn cost_so_far(&self) -> f64 {
        self.cost_so_far
    }

    /// Heuristic estimate of the remaining cost to the finish.
    pub fn cost_to_go(&self) -> f64 {
        self.cost_to_go
    }

    pub fn total_cost(&self) -> f64 {
        self.cost_so_far + self.cost_to_go
    }

    /// Walks the chain backwards, starting with this step and ending at the root.
    pub fn iter(&self) -> impl Iterator<Item = &Step> {
        std::iter::successors(Some(self), |step| step.previous.as_deref())
    }

    /// Number of steps in the chain, this one and the root included.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// The locations of the chain in travel order, from the start to this step.
    pub fn path(&self) -> Vec<Location> {
        let mut path: Vec<Location> = self.iter().map(|step| step.location).collect();
        path.reverse();
        path
    }
}

impl Drop for Step {
    // Unlinks the chain iteratively; the default recursive drop can overflow the stack on very
    // long paths.
    fn drop(&mut self) {
        let mut previous = self.previous.take();
        while let Some(step) = previous {
            match Arc::try_unwrap(step) {
                Ok(mut step) => previous = step.previous.take(),
                Err(_) => break,
            }
        }
    }
}
