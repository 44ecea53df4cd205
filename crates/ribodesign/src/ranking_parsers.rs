use clap::Args;
use clap::ValueEnum;
use anyhow::Result;
use anyhow::bail;

use rd_ranking::RankingStrategy;
use rd_ranking::Tolerances;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Consecutive Pareto fronts.
    #[default]
    Pareto,
    /// Pareto fronts, each split further by partial dominance.
    PartialDominance,
}

impl From<StrategyArg> for RankingStrategy {
    fn from(s: StrategyArg) -> Self {
        match s {
            StrategyArg::Pareto => RankingStrategy::Pareto,
            StrategyArg::PartialDominance => RankingStrategy::PartialDominance,
        }
    }
}

#[derive(Debug, Args)]
pub struct RankingArguments {
    /// Ranking strategy.
    #[arg(long, value_enum, default_value_t = StrategyArg::Pareto)]
    pub strategy: StrategyArg,

    /// Rank given to the first front.
    #[arg(long, default_value_t = 1)]
    pub starting_rank: usize,

    /// Tolerance applied to every criterion (overrides the others).
    #[arg(long)]
    pub tolerance: Option<f64>,

    /// Tolerance on the desired temperature score.
    #[arg(long, default_value_t = 0.0)]
    pub desired_temperature_tolerance: f64,

    /// Tolerance on the highest temperature score.
    #[arg(long, default_value_t = 0.0)]
    pub highest_temperature_tolerance: f64,

    /// Tolerance on the specificity score.
    #[arg(long, default_value_t = 0.0)]
    pub specificity_tolerance: f64,

    /// Tolerance on the accessibility score.
    #[arg(long, default_value_t = 0.0)]
    pub accessibility_tolerance: f64,

    /// Tolerance on the structure score.
    #[arg(long, default_value_t = 0.0)]
    pub structure_tolerance: f64,

    /// Tolerance on the malformation score.
    #[arg(long, default_value_t = 0.0)]
    pub malformation_tolerance: f64,
}

impl RankingArguments {
    /// Validate that all parameters make sense.
    pub fn validate(&self) -> Result<()> {
        let t = self.tolerances();
        for (name, value) in [
            ("desired temperature", t.desired_temperature),
            ("highest temperature", t.highest_temperature),
            ("specificity", t.specificity),
            ("accessibility", t.accessibility),
            ("structure", t.structure),
            ("malformation", t.malformation),
        ] {
            if !value.is_finite() || value < 0.0 {
                bail!("{} tolerance must be a non-negative number (got {})", name, value);
            }
        }
        Ok(())
    }

    pub fn tolerances(&self) -> Tolerances {
        if let Some(t) = self.tolerance {
            return Tolerances::uniform(t);
        }
        Tolerances {
            desired_temperature: self.desired_temperature_tolerance,
            highest_temperature: self.highest_temperature_tolerance,
            specificity: self.specificity_tolerance,
            accessibility: self.accessibility_tolerance,
            structure: self.structure_tolerance,
            malformation: self.malformation_tolerance,
        }
    }

    pub fn strategy(&self) -> RankingStrategy {
        self.strategy.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Debug, Parser)]
    struct Cli {
        #[command(flatten)]
        ranking: RankingArguments,
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["rd-rank"]);
        assert_eq!(cli.ranking.strategy(), RankingStrategy::Pareto);
        assert_eq!(cli.ranking.starting_rank, 1);
        assert_eq!(cli.ranking.tolerances(), Tolerances::default());
        assert!(cli.ranking.validate().is_ok());
    }

    #[test]
    fn test_tolerances() {
        let cli = Cli::parse_from(["rd-rank", "--specificity-tolerance", "0.5", "--strategy", "partial-dominance"]);
        assert_eq!(cli.ranking.tolerances().specificity, 0.5);
        assert_eq!(cli.ranking.tolerances().structure, 0.0);
        assert_eq!(cli.ranking.strategy(), RankingStrategy::PartialDominance);

        let cli = Cli::parse_from(["rd-rank", "--tolerance", "2", "--structure-tolerance", "0.5"]);
        assert_eq!(cli.ranking.tolerances(), Tolerances::uniform(2.0));

        let cli = Cli::parse_from(["rd-rank", "--malformation-tolerance=-1"]);
        assert!(cli.ranking.validate().is_err());
    }
}
