//! # ribodesign
//!
//! Unified API for designing ribozymes against a target RNA.
//!
//! This crate re-exports the main functionality from its member crates
//! and adds input parsing, target-region selection and the parallel
//! design pipeline used by the `rd-generate` and `rd-rank` binaries.

pub mod input_parsers;
pub mod region;
pub mod region_parsers;
pub mod ranking_parsers;
pub mod pipeline;

pub mod sequence {
    pub use ::rd_sequence::*;
}

pub mod generation {
    pub use ::rd_generation::*;
}

pub mod ranking {
    pub use ::rd_ranking::*;
}
