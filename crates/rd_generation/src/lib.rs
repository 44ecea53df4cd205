//! # rd_generation
//!
//! Expands a degenerate ribozyme [`Template`] into every concrete
//! [`Candidate`] that can bind a given target RNA.
//!
//! The ribozyme side is parsed into a [`LayeredTree`] (one layer per
//! position, bonds and pseudoknots linking layers) and walked lazily by
//! [`RibozymeSequences`]. The substrate side is located in the target,
//! grown through its repeat regions, and each resulting site is bound
//! to each ribozyme sequence by [`generate`].
//!
//! Structure symbols:
//!  - `.` unpaired, `()` bond, `[]` pseudoknot,
//!  - letters and digits: labels of positions that pair with the target.
//!
//! Lower-case letters in the substrate template mark repeat positions,
//! which may or may not be part of a substrate.
//!

/// GenerationError.
mod error;

/// Template and symbol classes.
mod template;

/// LayeredTree.
mod tree;

/// Lazy walks over ribozyme and substrate trees.
mod traversal;

/// Repeat regions of the substrate template.
mod repeats;

/// Locating substrate sites in the target.
mod substrate;

/// Candidate.
mod candidate;

/// Binding ribozyme sequences to substrate sites.
mod generator;

/// Template checks for user input.
mod validation;

pub use error::*;
pub use template::*;
pub use tree::*;
pub use traversal::*;
pub use repeats::*;
pub use substrate::*;
pub use candidate::*;
pub use generator::*;
pub use validation::*;
