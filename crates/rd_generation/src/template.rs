use serde::{Serialize, Deserialize};

use crate::GenerationError;

/// Structure symbols that bind the external target RNA.
pub fn is_target(c: char) -> bool {
    c.is_ascii_alphanumeric()
}

/// Substrate sequence symbols of flexible length.
pub fn is_repeat(c: char) -> bool {
    c.is_ascii_lowercase()
}

/// A ribozyme design template: the ribozyme's own sequence and structure
/// plus the substrate it is meant to bind.
///
/// Alphanumeric structure symbols label positions that pair with the
/// target. A label used in the substrate structure must also appear in
/// the ribozyme structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    #[serde(default)]
    pub name: String,
    pub ribozyme_sequence: String,
    pub ribozyme_structure: String,
    pub substrate_sequence: String,
    pub substrate_structure: String,
    /// Cut-site position within the substrate template.
    #[serde(default)]
    pub cutsite: Option<usize>,
}

impl Template {
    pub fn new(
        ribozyme_sequence: &str,
        ribozyme_structure: &str,
        substrate_sequence: &str,
        substrate_structure: &str,
    ) -> Self {
        Template {
            name: String::new(),
            ribozyme_sequence: ribozyme_sequence.to_string(),
            ribozyme_structure: ribozyme_structure.to_string(),
            substrate_sequence: substrate_sequence.to_string(),
            substrate_structure: substrate_structure.to_string(),
            cutsite: None,
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn with_cutsite(mut self, cutsite: usize) -> Self {
        self.cutsite = Some(cutsite);
        self
    }

    /// Sequence and structure of each side must have equal length.
    pub fn check_lengths(&self) -> Result<(), GenerationError> {
        let sequence = self.ribozyme_sequence.chars().count();
        let structure = self.ribozyme_structure.chars().count();
        if sequence != structure {
            return Err(GenerationError::RibozymeLengthMismatch { sequence, structure });
        }
        let sequence = self.substrate_sequence.chars().count();
        let structure = self.substrate_structure.chars().count();
        if sequence != structure {
            return Err(GenerationError::SubstrateLengthMismatch { sequence, structure });
        }
        Ok(())
    }
}
