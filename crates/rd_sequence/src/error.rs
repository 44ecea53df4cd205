use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequenceError {
    InvalidNucleotide(char),  // unknown symbol, or no complement for it
}

impl fmt::Display for SequenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SequenceError::InvalidNucleotide(c) => {
                write!(f, "Invalid nucleotide base {} was provided.", c)
            }
        }
    }
}

impl std::error::Error for SequenceError {}
