use std::fmt;

use rd_sequence::SequenceError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    Sequence(SequenceError),
    RibozymeLengthMismatch { sequence: usize, structure: usize },
    SubstrateLengthMismatch { sequence: usize, structure: usize },
    UnrecognizedStructureSymbol(char, usize),
    UnclosedBond(usize),       // '(' at this position was never closed
    UnclosedPseudoknot(usize), // '[' at this position was never closed
    UnopenedBond(usize),       // ')' at this position has no matching '('
    UnopenedPseudoknot(usize), // ']' at this position has no matching '['
    NeighboursDontMatch(usize),
    UnexpectedSubstrateStructureCharacter(char),
    SubstrateStructureCharNotFoundInRibozyme(char),
    RepeatNotationNotOnTarget(usize),
    TooManyRepeatRegions(usize),
    RepeatRegionNotAtExtremity { start: usize, end: usize },
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use GenerationError::*;
        match self {
            Sequence(e) => write!(f, "{}", e),
            RibozymeLengthMismatch { .. } => {
                write!(f, "Ribozyme sequence length does not match ribozyme structure length.")
            }
            SubstrateLengthMismatch { .. } => {
                write!(f, "Substrate sequence length does not match substrate structure length.")
            }
            UnrecognizedStructureSymbol(..) => {
                write!(f, "Unrecognized structure symbol encountered.")
            }
            UnclosedBond(_) => {
                write!(f, "Unclosed bond found '('. Input may be faulty.")
            }
            UnclosedPseudoknot(_) => {
                write!(f, "Unclosed pseudoknot found '['. Input may be faulty.")
            }
            UnopenedBond(i) => {
                write!(f, "Unopened bond found ')' at position {}. Input may be faulty.", i)
            }
            UnopenedPseudoknot(i) => {
                write!(f, "Unopened pseudoknot found ']' at position {}. Input may be faulty.", i)
            }
            NeighboursDontMatch(_) => write!(f, "Neighbours don't match!"),
            UnexpectedSubstrateStructureCharacter(c) => {
                write!(f, "Unexpected substrate structure character: {}", c)
            }
            SubstrateStructureCharNotFoundInRibozyme(c) => {
                write!(f, "Substrate structure character not found in ribozyme structure: {}", c)
            }
            RepeatNotationNotOnTarget(_) => {
                write!(f, "Repeat notation is not on target. Unhandled case.")
            }
            TooManyRepeatRegions(_) => {
                write!(f, "More than 2 repeat regions are not supported.")
            }
            RepeatRegionNotAtExtremity { .. } => {
                write!(f, "Repeat notation not located at beginning or end of substrate sequence. Case not supported.")
            }
        }
    }
}

impl std::error::Error for GenerationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GenerationError::Sequence(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SequenceError> for GenerationError {
    fn from(e: SequenceError) -> Self {
        GenerationError::Sequence(e)
    }
}
