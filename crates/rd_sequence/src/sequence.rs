use std::fmt;
use std::ops::Deref;
use std::ops::DerefMut;
use std::str::FromStr;

use serde::Serialize;
use serde::Serializer;

use crate::Nucleotide;
use crate::SequenceError;

/// An ordered list of nucleotides.
///
/// # Example
/// ```rust
/// use rd_sequence::Sequence;
///
/// let seq = Sequence::try_from("ACGUn").unwrap();
/// assert_eq!(seq.len(), 5);
/// assert_eq!(seq.to_string(), "ACGUN");
/// ```
#[derive(Clone, Hash, Debug, Default, Eq, PartialEq)]
pub struct Sequence(pub Vec<Nucleotide>);

impl Deref for Sequence {
    type Target = Vec<Nucleotide>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Sequence {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl TryFrom<&str> for Sequence {
    type Error = SequenceError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let mut vec = Vec::with_capacity(s.len());
        for c in s.chars() {
            vec.push(Nucleotide::try_from(c)?);
        }
        Ok(Sequence(vec))
    }
}

impl FromStr for Sequence {
    type Err = SequenceError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Sequence::try_from(s)
    }
}

impl From<Vec<Nucleotide>> for Sequence {
    fn from(vec: Vec<Nucleotide>) -> Self {
        Sequence(vec)
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for nt in &self.0 {
            write!(f, "{}", nt)?;
        }
        Ok(())
    }
}

impl Serialize for Sequence {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl Sequence {
    pub fn with_capacity(n: usize) -> Self {
        Sequence(Vec::with_capacity(n))
    }

    /// The strict complement string, position by position.
    pub fn complement(&self) -> Result<String, SequenceError> {
        self.0.iter().map(|nt| nt.complement()).collect()
    }

    /// Symbol at position `i`, if any.
    pub fn char_at(&self, i: usize) -> Option<char> {
        self.0.get(i).map(|nt| nt.symbol())
    }

    /// True if no position is degenerate or a placeholder.
    pub fn is_concrete(&self) -> bool {
        self.0.iter().all(|nt| nt.is_base())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_round_trip() {
        for s in ["", "A", "ACGU", "UUUUGGGGCCCCAAAA", "ACGUT", "TTAGC"] {
            assert_eq!(Sequence::try_from(s).unwrap().to_string(), s);
        }
        let seq: Sequence = "gauc".parse().unwrap();
        assert_eq!(seq.to_string(), "GAUC");
    }

    #[test]
    fn test_invalid_input() {
        assert_eq!(
            Sequence::try_from("ACXU"),
            Err(SequenceError::InvalidNucleotide('X'))
        );
    }

    #[test]
    fn test_complement() {
        let seq = Sequence::try_from("AUUGCA").unwrap();
        assert_eq!(seq.complement().unwrap(), "UAACGU");
        let seq = Sequence::try_from("AUNA").unwrap();
        assert_eq!(seq.complement(), Err(SequenceError::InvalidNucleotide('N')));
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut seq = Sequence::try_from("CG").unwrap();
        seq.insert(0, Nucleotide::try_from('A').unwrap());
        seq.push(Nucleotide::placeholder());
        assert_eq!(seq.to_string(), "ACG-");
        assert_eq!(seq.char_at(3), Some('-'));
        assert_eq!(seq.char_at(4), None);
        assert!(!seq.is_concrete());
        seq.pop();
        assert!(seq.is_concrete());
    }

    #[test]
    fn test_serialize_as_string() {
        let seq = Sequence::try_from("ACGN").unwrap();
        assert_eq!(serde_json::to_string(&seq).unwrap(), "\"ACGN\"");
    }
}
