use ahash::AHashSet;
use log::debug;

use rd_sequence::Nucleotide;

use crate::GenerationError;
use crate::SubstrateInfo;
use crate::{is_repeat, is_target};

/// More regions than this are rejected.
pub const MAX_REPEAT_REGIONS: usize = 2;

/// The extremity of the substrate template a repeat region hangs off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Anchor {
    /// 5' end: bases are prepended.
    Start,
    /// 3' end: bases are appended.
    End,
}

/// A run of repeat-notation (lower-case) positions, `start..=end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RepeatRegion {
    pub start: usize,
    pub end: usize,
    pub anchor: Anchor,
}

impl RepeatRegion {
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    pub fn contains(&self, i: usize) -> bool {
        self.start <= i && i <= self.end
    }

    /// Template position filled by the `k`-th extension step, walking
    /// outward from the fixed part of the substrate.
    pub fn position(&self, k: usize) -> usize {
        match self.anchor {
            Anchor::Start => self.end - k,
            Anchor::End => self.start + k,
        }
    }
}

/// Finds the repeat regions of a substrate template.
///
/// Every repeat position must carry a target label, there may be at
/// most two regions, and each must touch one end of the template.
pub fn find_repeat_regions(
    sequence: &[char],
    structure: &[char],
) -> Result<Vec<RepeatRegion>, GenerationError> {
    let mut runs: Vec<(usize, usize)> = Vec::new();
    let mut open: Option<usize> = None;

    for (i, (&c, &s)) in sequence.iter().zip(structure).enumerate() {
        if is_repeat(c) {
            if !is_target(s) {
                return Err(GenerationError::RepeatNotationNotOnTarget(i));
            }
            open.get_or_insert(i);
        } else if let Some(start) = open.take() {
            runs.push((start, i - 1));
        }
    }
    if let Some(start) = open {
        runs.push((start, sequence.len() - 1));
    }

    if runs.len() > MAX_REPEAT_REGIONS {
        return Err(GenerationError::TooManyRepeatRegions(runs.len()));
    }

    runs.into_iter().map(|(start, end)| {
        let anchor = if start == 0 {
            Anchor::Start
        } else if end + 1 == sequence.len() {
            Anchor::End
        } else {
            return Err(GenerationError::RepeatRegionNotAtExtremity { start, end });
        };
        Ok(RepeatRegion { start, end, anchor })
    }).collect()
}

/// The template with all repeat positions removed.
pub fn strip_repeats(
    sequence: &[char],
    structure: &[char],
    regions: &[RepeatRegion],
) -> (String, String) {
    sequence.iter().zip(structure).enumerate()
        .filter(|(i, _)| !regions.iter().any(|r| r.contains(*i)))
        .map(|(_, (&c, &s))| (c, s))
        .unzip()
}

/// Grows the accepted substrates through each repeat region in turn.
///
/// Every step extends the substrates accepted in the previous step by
/// one more position of the region, for every base that position
/// admits. Extensions that no longer occur in `target`, or that were
/// already accepted, are dropped.
pub fn extend_repeats(
    mut accepted: Vec<SubstrateInfo>,
    regions: &[RepeatRegion],
    sequence: &[char],
    structure: &[char],
    target: &str,
) -> Result<Vec<SubstrateInfo>, GenerationError> {
    let mut seen: AHashSet<(String, String)> = accepted.iter().map(|i| i.key()).collect();

    for region in regions {
        let mut frontier = accepted.clone();
        for k in 0..region.len() {
            let pos = region.position(k);
            let nt = Nucleotide::try_from(sequence[pos])?;
            let mut fresh = Vec::new();
            for &base in nt.bases() {
                for info in &frontier {
                    let ext = info.extended(char::from(base), structure[pos], region.anchor);
                    if target.contains(ext.sequence.as_str()) && seen.insert(ext.key()) {
                        fresh.push(ext);
                    }
                }
            }
            debug!("Repeat position {}: {} new substrates.", pos, fresh.len());
            accepted.extend(fresh.iter().cloned());
            frontier = fresh;
        }
    }
    Ok(accepted)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn regions(seq: &str, st: &str) -> Result<Vec<RepeatRegion>, GenerationError> {
        find_repeat_regions(&chars(seq), &chars(st))
    }

    #[test]
    fn test_find_regions() {
        assert_eq!(regions("NNGU", "10..").unwrap(), vec![]);
        assert_eq!(
            regions("nnNGU", "210..").unwrap(),
            vec![RepeatRegion { start: 0, end: 1, anchor: Anchor::Start }]
        );
        assert_eq!(
            regions("nNn", "210").unwrap(),
            vec![
                RepeatRegion { start: 0, end: 0, anchor: Anchor::Start },
                RepeatRegion { start: 2, end: 2, anchor: Anchor::End },
            ]
        );
        let r = regions("NNnnn", "43210").unwrap();
        assert_eq!(r[0].anchor, Anchor::End);
        assert_eq!(r[0].len(), 3);
        assert_eq!(r[0].position(0), 2);
        assert_eq!(r[0].position(2), 4);
    }

    #[test]
    fn test_region_errors() {
        assert_eq!(
            regions("NNNNNNGnNNNN", "987654..3210"),
            Err(GenerationError::RepeatNotationNotOnTarget(7))
        );
        assert_eq!(
            regions("nnNNNNnNNNnn", "987654a.3210"),
            Err(GenerationError::TooManyRepeatRegions(3))
        );
        let err = regions("NNNNnnGUNNNN", "987654..3210").unwrap_err();
        assert_eq!(err, GenerationError::RepeatRegionNotAtExtremity { start: 4, end: 5 });
        assert_eq!(
            format!("{}", err),
            "Repeat notation not located at beginning or end of substrate sequence. Case not supported."
        );
    }

    #[test]
    fn test_strip_repeats() {
        let (seq, st) = (chars("nNGn"), chars("3.10"));
        let r = find_repeat_regions(&seq, &st).unwrap();
        assert_eq!(strip_repeats(&seq, &st, &r), ("NG".to_string(), ".1".to_string()));
    }

    #[test]
    fn test_extend_end() {
        let (seq, st) = (chars("Nn"), chars("10"));
        let r = find_repeat_regions(&seq, &st).unwrap();
        let base = vec![SubstrateInfo::new("A", "1"), SubstrateInfo::new("U", "1")];
        let all = extend_repeats(base, &r, &seq, &st, "AU").unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[2], SubstrateInfo { sequence: "AU".into(), structure: "10".into(), cutsite_offset: 0 });
    }

    #[test]
    fn test_extend_start_shifts_cutsite() {
        let (seq, st) = (chars("nnG"), chars("21."));
        let r = find_repeat_regions(&seq, &st).unwrap();
        let base = vec![SubstrateInfo::new("G", ".")];
        let all = extend_repeats(base, &r, &seq, &st, "CAGG").unwrap();
        let found: Vec<(&str, &str, usize)> = all.iter()
            .map(|i| (i.sequence.as_str(), i.structure.as_str(), i.cutsite_offset))
            .collect();
        assert_eq!(found, vec![
            ("G", ".", 0),
            ("AG", "1.", 1),
            ("GG", "1.", 1),
            ("AGG", "21.", 2),
            ("CAG", "21.", 2),
        ]);
    }
}
