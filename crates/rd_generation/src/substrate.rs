use std::ops::Range;

use ahash::AHashSet;
use log::{debug, warn};
use serde::Serialize;

use rd_sequence::Base;

use crate::GenerationError;
use crate::LayeredTree;
use crate::SubstrateSequences;
use crate::repeats::{Anchor, RepeatRegion};
use crate::repeats::{extend_repeats, strip_repeats};

/// One stretch of the target that the substrate template accepts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SubstrateInfo {
    /// The stretch of the target RNA.
    pub sequence: String,
    /// Substrate structure, restricted to the positions present.
    pub structure: String,
    /// Number of repeat positions prepended at the 5' end.
    pub cutsite_offset: usize,
}

impl SubstrateInfo {
    pub fn new(sequence: &str, structure: &str) -> Self {
        SubstrateInfo {
            sequence: sequence.to_string(),
            structure: structure.to_string(),
            cutsite_offset: 0,
        }
    }

    pub fn key(&self) -> (String, String) {
        (self.sequence.clone(), self.structure.clone())
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// One more base at the anchored end.
    pub fn extended(&self, base: char, label: char, anchor: Anchor) -> Self {
        match anchor {
            Anchor::Start => SubstrateInfo {
                sequence: format!("{}{}", base, self.sequence),
                structure: format!("{}{}", label, self.structure),
                cutsite_offset: self.cutsite_offset + 1,
            },
            Anchor::End => SubstrateInfo {
                sequence: format!("{}{}", self.sequence, base),
                structure: format!("{}{}", self.structure, label),
                cutsite_offset: self.cutsite_offset,
            },
        }
    }
}

/// Every (possibly overlapping) position at which `needle` occurs.
/// An empty needle occurs nowhere.
///
/// # Example
/// ```rust
/// use rd_generation::all_indices_of;
///
/// assert_eq!(all_indices_of("AGUAGUCGU", "GU"), vec![1, 4, 7]);
/// assert_eq!(all_indices_of("AAAA", "AA"), vec![0, 1, 2]);
/// assert!(all_indices_of("AAAA", "").is_empty());
/// ```
pub fn all_indices_of(haystack: &str, needle: &str) -> Vec<usize> {
    let mut indices = Vec::new();
    if needle.is_empty() {
        return indices;
    }
    let mut from = 0;
    while let Some(i) = haystack[from..].find(needle) {
        let at = from + i;
        indices.push(at);
        from = at + haystack[at..].chars().next().map_or(1, char::len_utf8);
    }
    indices
}

/// The first longest run of literal A/C/G/U positions.
pub fn largest_concrete_run(tree: &LayeredTree) -> Option<Range<usize>> {
    let literal = |d: usize| tree[d].template.base().is_some_and(|b| b != Base::T);
    let mut best: Option<Range<usize>> = None;
    let mut i = 0;
    while i < tree.len() {
        if !literal(i) {
            i += 1;
            continue;
        }
        let start = i;
        while i < tree.len() && literal(i) {
            i += 1;
        }
        if best.as_ref().is_none_or(|b| i - start > b.len()) {
            best = Some(start..i);
        }
    }
    best
}

/// Places every occurrence of the literal `run` in the target and keeps
/// those whose surroundings fit the rest of the template.
fn substrates_around_run(
    tree: &LayeredTree,
    run: Range<usize>,
    structure: &str,
    target: &str,
) -> Vec<String> {
    let literal: String = tree[run.clone()].iter().map(|l| l.template.symbol()).collect();
    let before = run.start;
    let after = tree.len() - run.end;

    all_indices_of(target, &literal).into_iter()
        .filter_map(|at| {
            let start = at.checked_sub(before)?;
            let slice = target.get(start..at + literal.len() + after)?;
            let fits = slice.chars().zip(tree.iter()).all(|(c, layer)| {
                Base::try_from(c).is_ok_and(|b| layer.template.admits(b))
            });
            fits.then(|| slice.to_string())
        })
        .inspect(|s| debug!("Substrate {} ({}) fits the target.", s, structure))
        .collect()
}

/// Finds every stretch of `target` the substrate template accepts,
/// including all repeat-region extensions.
pub fn find_substrates(
    sequence: &[char],
    structure: &[char],
    regions: &[RepeatRegion],
    target: &str,
) -> Result<Vec<SubstrateInfo>, GenerationError> {
    let (base_sequence, base_structure) = strip_repeats(sequence, structure, regions);
    let tree = LayeredTree::substrate(&base_sequence)?;

    let found: Vec<String> = match largest_concrete_run(&tree) {
        Some(run) => substrates_around_run(&tree, run, &base_structure, target),
        None => SubstrateSequences::new(&tree, target).collect(),
    };

    let mut seen = AHashSet::new();
    let mut accepted: Vec<SubstrateInfo> = found.iter()
        .map(|s| SubstrateInfo::new(s, &base_structure))
        .filter(|i| seen.insert(i.key()))
        .collect();
    if tree.is_empty() {
        accepted.push(SubstrateInfo::new("", ""));
    }

    let mut accepted = extend_repeats(accepted, regions, sequence, structure, target)?;
    accepted.retain(|i| !i.is_empty());

    if accepted.is_empty() {
        warn!("Substrate template {} does not occur in the target.", base_sequence);
    } else {
        debug!("{} substrates accepted.", accepted.len());
    }
    Ok(accepted)
}
