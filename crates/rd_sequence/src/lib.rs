//! # rd_sequence
//!
//! Degenerate (IUPAC-style) nucleotide codes and sequences built from them.
//!
//!  - [`Base`]: a concrete base (A, C, G, U, T).
//!  - [`Nucleotide`]: a template symbol and the set of bases it may resolve to.
//!  - [`Sequence`]: an ordered list of nucleotides.
//!

/// SequenceError.
mod error;

/// Base, Nucleotide, complements, ....
mod nucleotide;

/// Sequence of nucleotides.
mod sequence;

pub use error::*;
pub use nucleotide::*;
pub use sequence::*;
