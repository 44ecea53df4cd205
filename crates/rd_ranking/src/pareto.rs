use log::debug;

use crate::OptimizationError;
use crate::OptimizeItem;
use crate::Rankable;

/// How members of one Pareto front are ranked against each other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RankingStrategy {
    /// Every member of a front shares one rank.
    #[default]
    Pareto,
    /// Fronts are split further by counting won and lost criteria.
    PartialDominance,
}

/// Fuzzy Pareto dominance: `dominator` is no worse than `victim` in every
/// criterion, and differs from it by more than the victim's tolerance in
/// at least one.
pub fn dominates(dominator: &[OptimizeItem], victim: &[OptimizeItem]) -> bool {
    let mut strict = false;
    for (d, v) in dominator.iter().zip(victim) {
        if !d.no_worse_than(v) {
            return false;
        }
        if (d.value - v.value).abs() > v.tolerance {
            strict = true;
        }
    }
    strict
}

/// `a` is strictly better than `b` in more criteria than it is strictly
/// worse. Raw values, ties and tolerances are ignored.
pub fn partially_dominates(a: &[OptimizeItem], b: &[OptimizeItem]) -> bool {
    let mut wins = 0;
    let mut losses = 0;
    for (x, y) in a.iter().zip(b) {
        if x.value == y.value {
            continue;
        }
        if x.better_than(y) {
            wins += 1;
        } else {
            losses += 1;
        }
    }
    wins > losses
}

fn check_vectors(vectors: &[Vec<OptimizeItem>]) -> Result<(), OptimizationError> {
    let Some(first) = vectors.first() else {
        return Err(OptimizationError::EmptyCandidateList);
    };
    let expected = first.len();
    if let Some(v) = vectors.iter().find(|v| v.len() != expected) {
        return Err(OptimizationError::FitnessValueLengthsDiffer {
            expected,
            found: v.len(),
        });
    }
    Ok(())
}

/// Ranks the comparable vectors, starting at `starting_rank`.
///
/// Returns one rank per input vector, in input order.
pub fn rank_vectors(
    vectors: &[Vec<OptimizeItem>],
    starting_rank: usize,
    strategy: RankingStrategy,
) -> Result<Vec<usize>, OptimizationError> {
    check_vectors(vectors)?;

    let mut ranks = vec![starting_rank; vectors.len()];
    let mut working: Vec<usize> = (0..vectors.len()).collect();
    let mut rank = starting_rank;

    while !working.is_empty() {
        let front: Vec<usize> = working.iter().copied()
            .filter(|&v| !working.iter().any(|&d| d != v && dominates(&vectors[d], &vectors[v])))
            .collect();

        let group = if front.is_empty() {
            // Nobody is left undominated: rank the remainder together.
            std::mem::take(&mut working)
        } else {
            working.retain(|i| !front.contains(i));
            front
        };
        debug!("Front {} with {} members, {} left.", rank, group.len(), working.len());

        rank = match strategy {
            RankingStrategy::Pareto => {
                for &i in &group {
                    ranks[i] = rank;
                }
                rank + 1
            }
            RankingStrategy::PartialDominance => refine(vectors, group, rank, &mut ranks),
        };
    }
    Ok(ranks)
}

/// Splits a group by partial dominance. Members that partially dominate
/// another member are ranked first, then the rest; each side is refined
/// in turn. Returns the next unused rank.
fn refine(
    vectors: &[Vec<OptimizeItem>],
    group: Vec<usize>,
    mut rank: usize,
    ranks: &mut [usize],
) -> usize {
    let mut stack = vec![group];
    while let Some(group) = stack.pop() {
        if group.is_empty() {
            continue;
        }
        let (front, rest): (Vec<usize>, Vec<usize>) = group.iter().copied()
            .partition(|&v| group.iter().any(|&o| o != v && partially_dominates(&vectors[v], &vectors[o])));

        if front.is_empty() || rest.is_empty() {
            for &i in &group {
                ranks[i] = rank;
            }
            rank += 1;
        } else {
            stack.push(rest);
            stack.push(front);
        }
    }
    rank
}

/// Pareto-ranks `items` in place, starting at `starting_rank`.
///
/// Returns the last rank that was assigned.
///
/// # Example
/// ```rust
/// use rd_ranking::{optimize, OptimizeItem, Rankable};
///
/// struct Scored(Vec<OptimizeItem>, Option<usize>);
///
/// impl Rankable for Scored {
///     fn comparables(&self) -> Vec<OptimizeItem> { self.0.clone() }
///     fn rank(&self) -> Option<usize> { self.1 }
///     fn set_rank(&mut self, rank: usize) { self.1 = Some(rank) }
/// }
///
/// let mut items = vec![
///     Scored(vec![OptimizeItem::minimize(2.0)], None),
///     Scored(vec![OptimizeItem::minimize(1.0)], None),
/// ];
/// assert_eq!(optimize(&mut items, 1).unwrap(), 2);
/// assert_eq!(items[0].rank(), Some(2));
/// assert_eq!(items[1].rank(), Some(1));
/// ```
pub fn optimize<T: Rankable>(
    items: &mut [T],
    starting_rank: usize,
) -> Result<usize, OptimizationError> {
    optimize_with(items, starting_rank, RankingStrategy::Pareto)
}

pub fn optimize_with<T: Rankable>(
    items: &mut [T],
    starting_rank: usize,
    strategy: RankingStrategy,
) -> Result<usize, OptimizationError> {
    let vectors: Vec<Vec<OptimizeItem>> = items.iter().map(|i| i.comparables()).collect();
    let ranks = rank_vectors(&vectors, starting_rank, strategy)?;
    for (item, &r) in items.iter_mut().zip(&ranks) {
        item.set_rank(r);
    }
    Ok(ranks.iter().copied().max().unwrap_or(starting_rank))
}
