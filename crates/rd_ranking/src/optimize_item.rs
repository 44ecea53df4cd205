use std::fmt;
use serde::{Serialize, Deserialize};

/// The uniform tolerance used when none is given explicitly.
pub const DEFAULT_TOLERANCE: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Objective {
    Minimize,
    Maximize,
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Objective::Minimize => write!(f, "MIN"),
            Objective::Maximize => write!(f, "MAX"),
        }
    }
}

/// One criterion of an item: its score, whether lower or higher is
/// better, and the absolute band within which two scores count as equal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptimizeItem {
    pub value: f64,
    pub objective: Objective,
    pub tolerance: f64,
}

impl OptimizeItem {
    pub fn new(value: f64, objective: Objective, tolerance: f64) -> Self {
        Self { value, objective, tolerance }
    }

    pub fn minimize(value: f64) -> Self {
        Self::new(value, Objective::Minimize, DEFAULT_TOLERANCE)
    }

    pub fn maximize(value: f64) -> Self {
        Self::new(value, Objective::Maximize, DEFAULT_TOLERANCE)
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// True if `self` is at least as good as `other` in this criterion.
    pub fn no_worse_than(&self, other: &OptimizeItem) -> bool {
        match self.objective {
            Objective::Minimize => self.value <= other.value,
            Objective::Maximize => self.value >= other.value,
        }
    }

    /// True if `self` is strictly better than `other` (raw values).
    pub fn better_than(&self, other: &OptimizeItem) -> bool {
        match self.objective {
            Objective::Minimize => self.value < other.value,
            Objective::Maximize => self.value > other.value,
        }
    }
}

impl fmt::Display for OptimizeItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:.3} ±{})", self.objective, self.value, self.tolerance)
    }
}

/// Anything that can take part in a ranking run.
///
/// All items of one run must expose the same number of comparables, in
/// the same criterion order. The rank is written back onto the item.
pub trait Rankable {
    fn comparables(&self) -> Vec<OptimizeItem>;
    fn rank(&self) -> Option<usize>;
    fn set_rank(&mut self, rank: usize);
}
