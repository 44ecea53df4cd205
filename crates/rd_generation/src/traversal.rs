use ahash::AHashSet;
use log::trace;

use rd_sequence::Nucleotide;
use rd_sequence::Sequence;

use crate::GenerationError;
use crate::LayeredTree;

/// Lazily expands a ribozyme tree into concrete sequences.
///
/// The walk is depth-first with an explicit stack of partial paths; each
/// branch owns its own copy of the path. Target positions stay
/// placeholders. At the closing half of a bond only the children that
/// pair (Watson-Crick or G-U wobble) with the base already chosen at the
/// opening half are followed. Each distinct sequence is yielded once.
///
/// # Example
/// ```rust
/// use rd_generation::{LayeredTree, RibozymeSequences};
///
/// let tree = LayeredTree::ribozyme("GN", "()").unwrap();
/// let seqs: Vec<String> = RibozymeSequences::new(tree)
///     .map(|s| s.unwrap().to_string())
///     .collect();
/// assert_eq!(seqs, vec!["GC", "GU"]);
/// ```
#[derive(Debug)]
pub struct RibozymeSequences {
    tree: LayeredTree,
    stack: Vec<Vec<Nucleotide>>,
    seen: AHashSet<Sequence>,
}

impl RibozymeSequences {
    pub fn new(tree: LayeredTree) -> Self {
        let stack = tree.roots().iter().rev().map(|&n| vec![n]).collect();
        RibozymeSequences { tree, stack, seen: AHashSet::new() }
    }

    pub fn tree(&self) -> &LayeredTree {
        &self.tree
    }

    /// Pushes the admissible extensions of `path` onto the stack.
    fn expand(&mut self, path: Vec<Nucleotide>) -> Result<(), GenerationError> {
        let depth = path.len() - 1;
        let next = &self.tree[depth + 1];

        if next.is_target {
            let mut path = path;
            path.push(Nucleotide::placeholder());
            self.stack.push(path);
            return Ok(());
        }

        let Some(partner) = next.closes_bond(depth + 1) else {
            for &child in next.nodes.iter().rev() {
                let mut branch = path.clone();
                branch.push(child);
                self.stack.push(branch);
            }
            return Ok(());
        };

        let required = path[partner].special_complements()?;
        let children: Vec<Nucleotide> = required.iter()
            .filter_map(|&b| next.nodes.iter().find(|n| n.base() == Some(b)))
            .copied()
            .collect();

        if children.is_empty() {
            // Another choice at the partner position could have paired,
            // so this branch is simply not viable.
            let alternative = self.tree[partner].template.bases().iter().any(|b| {
                b.special_complements().is_ok_and(|cs| {
                    cs.iter().any(|c| next.nodes.iter().any(|n| n.base() == Some(*c)))
                })
            });
            if alternative {
                trace!("Dropping branch at position {}: no partner for {}.", depth + 1, path[partner]);
                return Ok(());
            }
            return Err(GenerationError::NeighboursDontMatch(depth + 1));
        }

        for child in children.into_iter().rev() {
            let mut branch = path.clone();
            branch.push(child);
            self.stack.push(branch);
        }
        Ok(())
    }
}

impl Iterator for RibozymeSequences {
    type Item = Result<Sequence, GenerationError>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(path) = self.stack.pop() {
            if path.len() == self.tree.len() {
                let seq = Sequence::from(path);
                if self.seen.insert(seq.clone()) {
                    return Some(Ok(seq));
                }
                continue;
            }
            if let Err(e) = self.expand(path) {
                self.stack.clear();
                return Some(Err(e));
            }
        }
        None
    }
}

/// Lazily spells out the substrate tree, keeping only sequences that
/// occur in `target`. Prefixes that do not occur are pruned early.
#[derive(Debug)]
pub struct SubstrateSequences<'a> {
    tree: &'a LayeredTree,
    target: &'a str,
    stack: Vec<String>,
}

impl<'a> SubstrateSequences<'a> {
    pub fn new(tree: &'a LayeredTree, target: &'a str) -> Self {
        let stack = if tree.is_empty() { vec![] } else { vec![String::new()] };
        SubstrateSequences { tree, target, stack }
    }
}

impl Iterator for SubstrateSequences<'_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(prefix) = self.stack.pop() {
            let depth = prefix.len();
            if depth == self.tree.len() {
                return Some(prefix);
            }
            for child in self.tree[depth].nodes.iter().rev() {
                let mut extended = prefix.clone();
                extended.push(child.symbol());
                if self.target.contains(extended.as_str()) {
                    self.stack.push(extended);
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand(seq: &str, structure: &str) -> Result<Vec<String>, GenerationError> {
        let tree = LayeredTree::ribozyme(seq, structure)?;
        RibozymeSequences::new(tree)
            .map(|r| r.map(|s| s.to_string()))
            .collect()
    }

    #[test]
    fn test_degenerate_expansion() {
        assert_eq!(expand("AR", "..").unwrap(), vec!["AA", "AG"]);
        assert_eq!(expand("YK", "..").unwrap(), vec!["CG", "CU", "UG", "UU"]);
    }

    #[test]
    fn test_targets_stay_placeholders() {
        assert_eq!(expand("NGN", "0.1").unwrap(), vec!["-G-"]);
        assert_eq!(expand("GNA", ".0.").unwrap(), vec!["G-A"]);
    }

    #[test]
    fn test_bond_resolution() {
        assert_eq!(expand("GN", "()").unwrap(), vec!["GC", "GU"]);
        assert_eq!(expand("NR", "()").unwrap(), vec!["CG", "UA", "UG"]);
        assert_eq!(expand("CAG", "(.)").unwrap(), vec!["CAG"]);
        assert_eq!(expand("SS", "[]").unwrap(), vec!["CG", "GC"]);
    }

    #[test]
    fn test_neighbours_dont_match() {
        let err = expand("CAC", "(.)").unwrap_err();
        assert_eq!(err, GenerationError::NeighboursDontMatch(2));
        assert_eq!(format!("{}", err), "Neighbours don't match!");
    }

    #[test]
    fn test_error_ends_iteration() {
        let tree = LayeredTree::ribozyme("CC", "()").unwrap();
        let mut walk = RibozymeSequences::new(tree);
        assert!(matches!(walk.next(), Some(Err(_))));
        assert!(walk.next().is_none());
    }

    #[test]
    fn test_target_at_first_position() {
        let tree = LayeredTree::ribozyme("NN", "0.").unwrap();
        let seqs: Vec<String> = RibozymeSequences::new(tree)
            .map(|s| s.unwrap().to_string())
            .collect();
        assert_eq!(seqs, vec!["-A", "-C", "-G", "-U"]);
    }

    #[test]
    fn test_substrate_sequences() {
        let tree = LayeredTree::substrate("NGU").unwrap();
        let found: Vec<String> = SubstrateSequences::new(&tree, "AGUAGUCGUGGUUGU").collect();
        assert_eq!(found, vec!["AGU", "CGU", "GGU", "UGU"]);

        let found: Vec<String> = SubstrateSequences::new(&tree, "CCCC").collect();
        assert!(found.is_empty());

        let empty = LayeredTree::substrate("").unwrap();
        assert_eq!(SubstrateSequences::new(&empty, "ACGU").count(), 0);
    }
}
