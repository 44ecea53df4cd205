use std::fmt;
use std::ops::Range;

use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionError {
    NoTargetRegion,
    OrfStartAfterEnd { start: usize, end: usize },
    OrfOutsideTarget { end: usize, length: usize },
}

impl fmt::Display for RegionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionError::NoTargetRegion => write!(f, "No Target Region Selected!"),
            RegionError::OrfStartAfterEnd { start, end } => {
                write!(f, "Open reading frame start ({}) is after its end ({}).", start, end)
            }
            RegionError::OrfOutsideTarget { end, length } => {
                write!(f, "Open reading frame end ({}) exceeds the target length ({}).", end, length)
            }
        }
    }
}

impl std::error::Error for RegionError {}

/// Which parts of a target mRNA to design against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegionSelection {
    pub five_prime: bool,
    pub orf: bool,
    pub three_prime: bool,
}

impl RegionSelection {
    pub fn all() -> Self {
        RegionSelection { five_prime: true, orf: true, three_prime: true }
    }

    pub fn is_empty(&self) -> bool {
        !(self.five_prime || self.orf || self.three_prime)
    }
}

/// A contiguous stretch of the target and where it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetSlice<'a> {
    pub offset: usize,
    pub sequence: &'a str,
}

/// The three regions of a target of length `length` with the open
/// reading frame `orf`.
fn region_ranges(length: usize, orf: Range<usize>) -> Result<[Range<usize>; 3], RegionError> {
    if orf.start > orf.end {
        return Err(RegionError::OrfStartAfterEnd { start: orf.start, end: orf.end });
    }
    if orf.end > length {
        return Err(RegionError::OrfOutsideTarget { end: orf.end, length });
    }
    Ok([0..orf.start, orf.clone(), orf.end..length])
}

/// Cuts the selected regions out of `target`.
///
/// Adjacent selected regions are merged. Without an open reading frame
/// the whole target counts as one. Empty regions are dropped.
///
/// # Example
/// ```rust
/// use ribodesign::region::{select_regions, RegionSelection};
///
/// let selection = RegionSelection { five_prime: true, orf: false, three_prime: true };
/// let slices = select_regions("AAAUGCCCUAAGG", Some(2..11), selection).unwrap();
/// let parts: Vec<&str> = slices.iter().map(|s| s.sequence).collect();
/// assert_eq!(parts, vec!["AA", "GG"]);
/// assert_eq!(slices[1].offset, 11);
/// ```
pub fn select_regions(
    target: &str,
    orf: Option<Range<usize>>,
    selection: RegionSelection,
) -> Result<Vec<TargetSlice<'_>>, RegionError> {
    if selection.is_empty() {
        return Err(RegionError::NoTargetRegion);
    }
    let orf = orf.unwrap_or(0..target.len());
    let ranges = region_ranges(target.len(), orf)?;
    let selected = [selection.five_prime, selection.orf, selection.three_prime];

    let mut merged: Vec<Range<usize>> = Vec::new();
    for (range, _) in ranges.into_iter().zip(selected).filter(|(_, s)| *s) {
        match merged.last_mut() {
            Some(last) if last.end == range.start => last.end = range.end,
            _ => merged.push(range),
        }
    }

    let slices: Vec<TargetSlice> = merged.into_iter()
        .filter(|r| !r.is_empty())
        .map(|r| TargetSlice { offset: r.start, sequence: &target[r] })
        .collect();
    debug!("Selected {} target regions.", slices.len());
    Ok(slices)
}
