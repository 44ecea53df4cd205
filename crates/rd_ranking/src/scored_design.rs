use serde::{Serialize, Deserialize};

use crate::{OptimizationError, OptimizeItem, Objective, RankingStrategy};
use crate::rank_vectors;

/// Number of criteria a [`ScoredDesign`] is ranked on.
pub const DESIGN_CRITERIA: usize = 6;

/// One absolute tolerance per design criterion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerances {
    pub desired_temperature: f64,
    pub highest_temperature: f64,
    pub specificity: f64,
    pub accessibility: f64,
    pub structure: f64,
    pub malformation: f64,
}

impl Tolerances {
    pub fn uniform(tolerance: f64) -> Self {
        Self {
            desired_temperature: tolerance,
            highest_temperature: tolerance,
            specificity: tolerance,
            accessibility: tolerance,
            structure: tolerance,
            malformation: tolerance,
        }
    }
}

/// A ribozyme design together with its externally computed scores.
///
/// Scores that were never computed count as 0.0 when ranking.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoredDesign {
    pub sequence: String,
    #[serde(default)]
    pub structure: String,
    pub cutsite_index: usize,
    pub substrate_sequence_length: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desired_temperature_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highest_temperature_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specificity_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessibility_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structure_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub malformation_score: Option<f64>,
    #[serde(default)]
    pub rank: Option<usize>,
}

impl ScoredDesign {
    /// The six criteria in ranking order.
    pub fn comparables(&self, tolerances: &Tolerances) -> Vec<OptimizeItem> {
        use Objective::*;
        let score = |s: Option<f64>| s.unwrap_or(0.0);
        vec![
            OptimizeItem::new(score(self.desired_temperature_score), Minimize, tolerances.desired_temperature),
            OptimizeItem::new(score(self.highest_temperature_score), Maximize, tolerances.highest_temperature),
            OptimizeItem::new(score(self.specificity_score), Minimize, tolerances.specificity),
            OptimizeItem::new(score(self.accessibility_score), Minimize, tolerances.accessibility),
            OptimizeItem::new(score(self.structure_score), Minimize, tolerances.structure),
            OptimizeItem::new(score(self.malformation_score), Maximize, tolerances.malformation),
        ]
    }

    /// The stretch of the target this design binds.
    pub fn substrate_target<'a>(&self, target: &'a str) -> Option<&'a str> {
        target.get(self.cutsite_index..self.cutsite_index + self.substrate_sequence_length)
    }
}

/// Ranks designs in place under the given tolerances.
///
/// Returns the last rank that was assigned.
pub fn rank_designs(
    designs: &mut [ScoredDesign],
    tolerances: &Tolerances,
    starting_rank: usize,
    strategy: RankingStrategy,
) -> Result<usize, OptimizationError> {
    let vectors: Vec<Vec<OptimizeItem>> = designs.iter()
        .map(|d| d.comparables(tolerances))
        .collect();
    let ranks = rank_vectors(&vectors, starting_rank, strategy)?;
    for (design, &r) in designs.iter_mut().zip(&ranks) {
        design.rank = Some(r);
    }
    Ok(ranks.iter().copied().max().unwrap_or(starting_rank))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn design(sequence: &str, desired: f64, highest: f64) -> ScoredDesign {
        ScoredDesign {
            sequence: sequence.to_string(),
            desired_temperature_score: Some(desired),
            highest_temperature_score: Some(highest),
            ..Default::default()
        }
    }

    #[test]
    fn test_comparables_order() {
        let d = ScoredDesign {
            specificity_score: Some(3.0),
            malformation_score: Some(6.0),
            ..Default::default()
        };
        let c = d.comparables(&Tolerances::uniform(0.5));
        assert_eq!(c.len(), DESIGN_CRITERIA);
        assert_eq!(c[0].value, 0.0);
        assert_eq!(c[1].objective, Objective::Maximize);
        assert_eq!(c[2].value, 3.0);
        assert_eq!(c[5].value, 6.0);
        assert_eq!(c[5].objective, Objective::Maximize);
        assert!(c.iter().all(|i| i.tolerance == 0.5));
    }

    #[test]
    fn test_rank_designs() {
        let mut designs = vec![
            design("AAA", 2.0, 50.0),
            design("CCC", 1.0, 60.0),
            design("GGG", 1.0, 60.5),
        ];
        let last = rank_designs(&mut designs, &Tolerances::uniform(1.0), 1, RankingStrategy::Pareto).unwrap();
        assert_eq!(last, 2);
        assert_eq!(designs[0].rank, Some(2));
        assert_eq!(designs[1].rank, Some(1));
        assert_eq!(designs[2].rank, Some(1));

        let last = rank_designs(&mut designs, &Tolerances::default(), 1, RankingStrategy::Pareto).unwrap();
        assert_eq!(last, 3);
        assert_eq!(designs[2].rank, Some(1));
        assert_eq!(designs[1].rank, Some(2));
    }

    #[test]
    fn test_rank_designs_empty() {
        let mut designs: Vec<ScoredDesign> = vec![];
        assert_eq!(
            rank_designs(&mut designs, &Tolerances::default(), 1, RankingStrategy::Pareto),
            Err(OptimizationError::EmptyCandidateList)
        );
    }

    #[test]
    fn test_substrate_target() {
        let d = ScoredDesign {
            cutsite_index: 2,
            substrate_sequence_length: 3,
            ..Default::default()
        };
        assert_eq!(d.substrate_target("AUGCAUG"), Some("GCA"));
        assert_eq!(d.substrate_target("AUG"), None);
    }

    #[test]
    fn test_json() {
        let json = r#"[
            {"sequence": "ACGU", "cutsite_index": 4, "substrate_sequence_length": 12,
             "specificity_score": 0.5},
            {"sequence": "UGCA", "cutsite_index": 9, "substrate_sequence_length": 12}
        ]"#;
        let designs: Vec<ScoredDesign> = serde_json::from_str(json).unwrap();
        assert_eq!(designs.len(), 2);
        assert_eq!(designs[0].specificity_score, Some(0.5));
        assert_eq!(designs[1].specificity_score, None);
        assert_eq!(designs[1].rank, None);

        let tol: Tolerances = serde_json::from_str(r#"{"structure": 2.5}"#).unwrap();
        assert_eq!(tol.structure, 2.5);
        assert_eq!(tol.specificity, 0.0);
    }
}
