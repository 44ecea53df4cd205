//! # rd_ranking
//!
//! Assigns front ranks to items scored on several competing criteria.
//!
//! Every item exposes the same fixed-order list of [`OptimizeItem`]s
//! (value, direction, tolerance). [`optimize`] repeatedly peels off the
//! items that nobody dominates and gives each such front the next rank,
//! starting from a caller-supplied rank. Two values closer than the
//! tolerance never make one item strictly better than another.
//!
//! [`ScoredDesign`] is the concrete record used by the ribozyme design
//! pipeline: six scores with one tolerance per criterion.
//!

/// OptimizationError.
mod error;

/// OptimizeItem, Objective and the Rankable trait.
mod optimize_item;

/// Pareto front peeling and partial-dominance refinement.
mod pareto;

/// Ribozyme designs scored on six criteria.
mod scored_design;

pub use error::*;
pub use optimize_item::*;
pub use pareto::*;
pub use scored_design::*;
