use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptimizationError {
    EmptyCandidateList,
    FitnessValueLengthsDiffer { expected: usize, found: usize },
}

impl fmt::Display for OptimizationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptimizationError::EmptyCandidateList => {
                write!(f, "List of Candidates is empty!")
            }
            OptimizationError::FitnessValueLengthsDiffer { .. } => {
                write!(f, "Candidates have different number of fitness values!")
            }
        }
    }
}

impl std::error::Error for OptimizationError {}
