use std::fmt;

use serde::Serialize;

use rd_ranking::OptimizeItem;
use rd_ranking::Rankable;
use rd_sequence::Sequence;

/// A complete, concrete ribozyme design bound to one substrate site.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    pub sequence: Sequence,
    pub structure: String,
    pub substrate_sequence: String,
    pub substrate_structure: String,
    /// Shift of the template cut-site caused by 5' repeat positions.
    pub cutsite_number_offset: usize,
    /// Every position of the substrate in the target RNA.
    pub cutsite_indices: Vec<usize>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fitness_values: Vec<OptimizeItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<usize>,
}

impl Candidate {
    /// Cut-site position within this candidate's substrate.
    pub fn cutsite_number(&self, template_cutsite: usize) -> usize {
        template_cutsite + self.cutsite_number_offset
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.sequence, self.structure,
            self.substrate_sequence, self.substrate_structure)
    }
}

impl Rankable for Candidate {
    fn comparables(&self) -> Vec<OptimizeItem> {
        self.fitness_values.clone()
    }

    fn rank(&self) -> Option<usize> {
        self.rank
    }

    fn set_rank(&mut self, rank: usize) {
        self.rank = Some(rank);
    }
}
