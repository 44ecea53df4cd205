use clap::Args;
use anyhow::Result;
use anyhow::bail;

use crate::region::RegionSelection;
use crate::region::TargetSlice;
use crate::region::select_regions;

#[derive(Debug, Args)]
pub struct RegionArguments {
    /// Design against the 5' untranslated region.
    #[arg(long)]
    pub five_prime: bool,

    /// Design against the open reading frame.
    #[arg(long)]
    pub orf: bool,

    /// Design against the 3' untranslated region.
    #[arg(long)]
    pub three_prime: bool,

    /// First position of the open reading frame (0-based).
    #[arg(long, requires = "orf_end")]
    pub orf_start: Option<usize>,

    /// Position after the last base of the open reading frame.
    #[arg(long, requires = "orf_start")]
    pub orf_end: Option<usize>,
}

impl RegionArguments {
    /// Validate that all parameters make sense.
    pub fn validate(&self) -> Result<()> {
        if let (Some(start), Some(end)) = (self.orf_start, self.orf_end) {
            if start > end {
                bail!("orf_start ({}) must not be greater than orf_end ({})", start, end);
            }
        }
        if self.orf_start.is_none() && (self.five_prime || self.three_prime) && !self.orf {
            bail!("Selecting UTRs requires --orf-start and --orf-end");
        }
        Ok(())
    }

    /// No flag at all selects the whole target.
    pub fn selection(&self) -> RegionSelection {
        let selection = RegionSelection {
            five_prime: self.five_prime,
            orf: self.orf,
            three_prime: self.three_prime,
        };
        if selection.is_empty() { RegionSelection::all() } else { selection }
    }

    pub fn select<'a>(&self, target: &'a str) -> Result<Vec<TargetSlice<'a>>> {
        let orf = self.orf_start.zip(self.orf_end).map(|(s, e)| s..e);
        Ok(select_regions(target, orf, self.selection())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(five_prime: bool, orf: bool, three_prime: bool, frame: Option<(usize, usize)>) -> RegionArguments {
        RegionArguments {
            five_prime,
            orf,
            three_prime,
            orf_start: frame.map(|f| f.0),
            orf_end: frame.map(|f| f.1),
        }
    }

    #[test]
    fn test_validate() {
        assert!(args(false, false, false, None).validate().is_ok());
        assert!(args(true, false, true, Some((2, 5))).validate().is_ok());
        assert!(args(true, false, false, None).validate().is_err());
        assert!(args(false, true, false, Some((5, 2))).validate().is_err());
    }

    #[test]
    fn test_default_selection() {
        assert_eq!(args(false, false, false, None).selection(), RegionSelection::all());
        let slices = args(false, false, true, Some((1, 3))).select("AUGCC").unwrap();
        assert_eq!(slices.len(), 1);
        assert_eq!(slices[0].sequence, "CC");
        assert!(args(false, true, false, Some((1, 9))).select("AUGCC").is_err());
    }
}
