use std::fmt;

use crate::SequenceError;

/// Symbol of a position whose base is not known yet. It is bound later to
/// the complement of the target RNA.
pub const PLACEHOLDER: char = '-';

#[derive(Clone, Hash, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub enum Base { A, C, G, U, T }

impl TryFrom<char> for Base {
    type Error = SequenceError;
    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_uppercase() {
            'A' => Ok(Base::A),
            'C' => Ok(Base::C),
            'G' => Ok(Base::G),
            'U' => Ok(Base::U),
            'T' => Ok(Base::T),
            _ => Err(SequenceError::InvalidNucleotide(c)),
        }
    }
}

impl From<Base> for char {
    fn from(b: Base) -> Self {
        match b {
            Base::A => 'A',
            Base::C => 'C',
            Base::G => 'G',
            Base::U => 'U',
            Base::T => 'T',
        }
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", char::from(*self))
    }
}

impl Base {
    /// Strict Watson-Crick complement (A-U, G-C).
    pub fn complement(&self) -> Result<Base, SequenceError> {
        match self {
            Base::A => Ok(Base::U),
            Base::U => Ok(Base::A),
            Base::G => Ok(Base::C),
            Base::C => Ok(Base::G),
            Base::T => Err(SequenceError::InvalidNucleotide('T')),
        }
    }

    /// Complements that are acceptable within the ribozyme's own
    /// structure: Watson-Crick plus G-U wobble pairs.
    pub fn special_complements(&self) -> Result<&'static [Base], SequenceError> {
        use Base::*;
        match self {
            A => Ok(&[U]),
            U => Ok(&[A, G]),
            G => Ok(&[C, U]),
            C => Ok(&[G]),
            T => Err(SequenceError::InvalidNucleotide('T')),
        }
    }
}

/// Degenerate code table. Bases are listed in A, C, G, U order, which is
/// also the order in which candidate trees branch.
fn bases_of(symbol: char) -> Option<&'static [Base]> {
    use Base::*;
    let bases: &'static [Base] = match symbol {
        'A' => &[A],
        'C' => &[C],
        'G' => &[G],
        'U' => &[U],
        'T' => &[T],
        'W' => &[A, U],
        'S' => &[C, G],
        'M' => &[A, C],
        'K' => &[G, U],
        'R' => &[A, G],
        'Y' => &[C, U],
        'B' => &[C, G, U],
        'D' => &[A, G, U],
        'H' => &[A, C, U],
        'V' => &[A, C, G],
        'N' => &[A, C, G, U],
        PLACEHOLDER => &[],
        _ => return None,
    };
    Some(bases)
}

/// One template position: the (upper-case) symbol and the concrete bases
/// it may resolve to.
///
/// # Example
/// ```rust
/// use rd_sequence::Base;
/// use rd_sequence::Nucleotide;
///
/// let nt = Nucleotide::try_from('r').unwrap();
/// assert_eq!(nt.symbol(), 'R');
/// assert_eq!(nt.bases(), &[Base::A, Base::G]);
/// assert!(!nt.is_base());
/// ```
#[derive(Clone, Copy, Hash, Debug, Eq, PartialEq)]
pub struct Nucleotide {
    symbol: char,
    bases: &'static [Base],
}

impl TryFrom<char> for Nucleotide {
    type Error = SequenceError;
    fn try_from(c: char) -> Result<Self, Self::Error> {
        let symbol = c.to_ascii_uppercase();
        let bases = bases_of(symbol).ok_or(SequenceError::InvalidNucleotide(symbol))?;
        Ok(Nucleotide { symbol, bases })
    }
}

impl From<Base> for Nucleotide {
    fn from(b: Base) -> Self {
        let symbol = char::from(b);
        Nucleotide {
            symbol,
            bases: bases_of(symbol).unwrap_or(&[]),
        }
    }
}

impl fmt::Display for Nucleotide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

impl Nucleotide {
    pub fn placeholder() -> Self {
        Nucleotide { symbol: PLACEHOLDER, bases: &[] }
    }

    pub fn symbol(&self) -> char {
        self.symbol
    }

    pub fn bases(&self) -> &'static [Base] {
        self.bases
    }

    /// True for a single literal base, false for degenerate codes and the
    /// placeholder.
    pub fn is_base(&self) -> bool {
        self.bases.len() == 1 && char::from(self.bases[0]) == self.symbol
    }

    pub fn is_placeholder(&self) -> bool {
        self.symbol == PLACEHOLDER
    }

    /// The concrete base, if this nucleotide is one.
    pub fn base(&self) -> Option<Base> {
        self.is_base().then(|| self.bases[0])
    }

    /// Whether `base` is a possible resolution of this nucleotide.
    pub fn admits(&self, base: Base) -> bool {
        self.bases.contains(&base)
    }

    pub fn complement(&self) -> Result<char, SequenceError> {
        self.concrete()?
            .complement()
            .map(char::from)
            .map_err(|_| SequenceError::InvalidNucleotide(self.symbol))
    }

    pub fn special_complements(&self) -> Result<&'static [Base], SequenceError> {
        self.concrete()?
            .special_complements()
            .map_err(|_| SequenceError::InvalidNucleotide(self.symbol))
    }

    fn concrete(&self) -> Result<Base, SequenceError> {
        self.base().ok_or(SequenceError::InvalidNucleotide(self.symbol))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Base::*;

    fn bases(c: char) -> Vec<Base> {
        let mut v = Nucleotide::try_from(c).unwrap().bases().to_vec();
        v.sort();
        v
    }

    #[test]
    fn test_degenerate_table() {
        assert_eq!(bases('A'), vec![A]);
        assert_eq!(bases('C'), vec![C]);
        assert_eq!(bases('G'), vec![G]);
        assert_eq!(bases('U'), vec![U]);
        assert_eq!(bases('T'), vec![T]);
        assert_eq!(bases('W'), vec![A, U]);
        assert_eq!(bases('S'), vec![C, G]);
        assert_eq!(bases('M'), vec![A, C]);
        assert_eq!(bases('K'), vec![G, U]);
        assert_eq!(bases('R'), vec![A, G]);
        assert_eq!(bases('Y'), vec![C, U]);
        assert_eq!(bases('B'), vec![C, G, U]);
        assert_eq!(bases('D'), vec![A, G, U]);
        assert_eq!(bases('H'), vec![A, C, U]);
        assert_eq!(bases('V'), vec![A, C, G]);
        assert_eq!(bases('N'), vec![A, C, G, U]);
        assert!(bases('-').is_empty());
    }

    #[test]
    fn test_case_normalization() {
        let nt = Nucleotide::try_from('n').unwrap();
        assert_eq!(nt.symbol(), 'N');
        assert_eq!(nt.bases(), &[A, C, G, U]);
        assert_eq!(Nucleotide::try_from('u').unwrap(), Nucleotide::try_from('U').unwrap());
    }

    #[test]
    fn test_invalid_nucleotide() {
        let err = Nucleotide::try_from('q').unwrap_err();
        assert_eq!(err, SequenceError::InvalidNucleotide('Q'));
        assert_eq!(format!("{}", err), "Invalid nucleotide base Q was provided.");
        assert!(Nucleotide::try_from('&').is_err());
        assert!(Nucleotide::try_from('.').is_err());
    }

    #[test]
    fn test_is_base() {
        for c in ['A', 'C', 'G', 'U', 'T'] {
            assert!(Nucleotide::try_from(c).unwrap().is_base());
        }
        for c in ['N', 'R', 'W', '-'] {
            assert!(!Nucleotide::try_from(c).unwrap().is_base());
        }
        assert!(Nucleotide::placeholder().is_placeholder());
        assert_eq!(Nucleotide::from(G).symbol(), 'G');
    }

    #[test]
    fn test_complement() {
        let comp = |c: char| Nucleotide::try_from(c).unwrap().complement();
        assert_eq!(comp('A'), Ok('U'));
        assert_eq!(comp('U'), Ok('A'));
        assert_eq!(comp('G'), Ok('C'));
        assert_eq!(comp('C'), Ok('G'));
        assert_eq!(comp('N'), Err(SequenceError::InvalidNucleotide('N')));
        let err = comp('T').unwrap_err();
        assert_eq!(format!("{}", err), "Invalid nucleotide base T was provided.");
    }

    #[test]
    fn test_special_complements() {
        let wobble = |c: char| Nucleotide::try_from(c).unwrap().special_complements();
        assert_eq!(wobble('A'), Ok(&[U][..]));
        assert_eq!(wobble('U'), Ok(&[A, G][..]));
        assert_eq!(wobble('G'), Ok(&[C, U][..]));
        assert_eq!(wobble('C'), Ok(&[G][..]));
        assert!(wobble('T').is_err());
        assert!(wobble('-').is_err());
    }

    #[test]
    fn test_admits() {
        let nt = Nucleotide::try_from('Y').unwrap();
        assert!(nt.admits(C));
        assert!(nt.admits(U));
        assert!(!nt.admits(A));
        assert!(!Nucleotide::placeholder().admits(A));
    }
}
