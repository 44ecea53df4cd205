//! Checks applied to user-supplied templates before generation.

use std::fmt;

use ahash::AHashSet;

use crate::Template;
use crate::is_repeat;

/// Upper bound on repeat positions in a substrate template.
pub const MAX_REPEATS: usize = 8;

const BASES: &str = "ACGU";
const SYMBOLS: &str = "ACGUTWSMKRYBDHVN";
const STRUCTURE_SYMBOLS: &str = ".()[]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    EmptyParameter,
    InvalidNucleotide(char),
    InvalidStructElement(char),
    BadPairMatch(usize),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyParameter => write!(f, "Parameter must not be empty."),
            ValidationError::InvalidNucleotide(c) => write!(f, "Invalid nucleotide symbol '{}'.", c),
            ValidationError::InvalidStructElement(c) => write!(f, "Invalid structure element '{}'.", c),
            ValidationError::BadPairMatch(i) => write!(f, "Unbalanced pair at position {}.", i),
        }
    }
}

impl std::error::Error for ValidationError {}

/// With `base_only` only `ACGU` pass. Otherwise any IUPAC symbol, in
/// either case, is accepted.
pub fn validate_sequence(sequence: &str, base_only: bool) -> Result<(), ValidationError> {
    if sequence.is_empty() {
        return Err(ValidationError::EmptyParameter);
    }
    let invalid = sequence.chars().find(|&c| if base_only {
        !BASES.contains(c)
    } else {
        !SYMBOLS.contains(c.to_ascii_uppercase())
    });
    match invalid {
        Some(c) => Err(ValidationError::InvalidNucleotide(c)),
        None => Ok(()),
    }
}

/// Dot-bracket with pseudoknots, plus alphanumeric target labels when
/// `can_have_target` is set. Both bracket kinds must balance.
pub fn validate_structure(structure: &str, can_have_target: bool) -> Result<(), ValidationError> {
    if structure.is_empty() {
        return Err(ValidationError::EmptyParameter);
    }
    let mut bonds = 0usize;
    let mut knots = 0usize;
    for (i, c) in structure.chars().enumerate() {
        if can_have_target && c.is_ascii_alphanumeric() {
            continue;
        }
        match c {
            '.' => (),
            '(' => bonds += 1,
            '[' => knots += 1,
            ')' => bonds = bonds.checked_sub(1).ok_or(ValidationError::BadPairMatch(i))?,
            ']' => knots = knots.checked_sub(1).ok_or(ValidationError::BadPairMatch(i))?,
            _ => return Err(ValidationError::InvalidStructElement(c)),
        }
    }
    if bonds != 0 || knots != 0 {
        return Err(ValidationError::BadPairMatch(structure.chars().count()));
    }
    Ok(())
}

fn is_label(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit()
}

fn labels(structure: &str) -> AHashSet<char> {
    structure.chars().filter(|&c| is_label(c)).collect()
}

/// Every lowercase or digit label occurs at most once and nothing but
/// labels and `.()[]` is present.
pub fn unique_alphanumerics(structure: &str) -> bool {
    let mut seen = AHashSet::new();
    structure.chars().all(|c| if is_label(c) {
        seen.insert(c)
    } else {
        STRUCTURE_SYMBOLS.contains(c)
    })
}

/// Both structures use the same labels, in any order.
pub fn matching_alphanumerics(ribozyme_structure: &str, substrate_structure: &str) -> bool {
    labels(ribozyme_structure) == labels(substrate_structure)
}

pub fn repeat_count(sequence: &str) -> usize {
    sequence.chars().filter(|&c| is_repeat(c)).count()
}

/// The fields of anything that describes a ribozyme template.
pub trait RibozymeFields {
    fn sequence(&self) -> &str;
    fn structure(&self) -> &str;
    fn substrate_template(&self) -> &str;
    fn substrate_structure(&self) -> &str;
    fn cutsite(&self) -> Option<usize>;
}

impl RibozymeFields for Template {
    fn sequence(&self) -> &str {
        &self.ribozyme_sequence
    }

    fn structure(&self) -> &str {
        &self.ribozyme_structure
    }

    fn substrate_template(&self) -> &str {
        &self.substrate_sequence
    }

    fn substrate_structure(&self) -> &str {
        &self.substrate_structure
    }

    fn cutsite(&self) -> Option<usize> {
        self.cutsite
    }
}

/// Collects every problem with a template as a readable message. An
/// empty list means the template is fine.
pub fn validate_template<T: RibozymeFields + ?Sized>(fields: &T) -> Vec<String> {
    let mut issues = Vec::new();
    let (seq, st) = (fields.sequence(), fields.structure());
    let (sub, sub_st) = (fields.substrate_template(), fields.substrate_structure());

    if let Err(e) = validate_sequence(seq, false) {
        issues.push(format!("Sequence template: {}", e));
    }
    if let Err(e) = validate_structure(st, true) {
        issues.push(format!("Sequence structure: {}", e));
    }
    if let Err(e) = validate_sequence(sub, false) {
        issues.push(format!("Substrate template: {}", e));
    }
    if let Err(e) = validate_structure(sub_st, true) {
        issues.push(format!("Substrate structure: {}", e));
    }
    if !unique_alphanumerics(st) {
        issues.push("Alphanumerics within the Sequence Structure must only occur once".to_string());
    }
    if !unique_alphanumerics(sub_st) {
        issues.push("Alphanumerics within the Substrate Structure must only occur once".to_string());
    }
    if repeat_count(sub) > MAX_REPEATS {
        issues.push(format!("Repeat n notation cannot exceed {}", MAX_REPEATS));
    }
    if fields.cutsite().is_some_and(|c| c > sub.chars().count()) {
        issues.push("Cutsite position must not exceed the Substrate Template length".to_string());
    }
    if seq.chars().count() != st.chars().count() {
        issues.push("Sequence template and structure must contain the same amount of elements".to_string());
    }
    if sub.chars().count() != sub_st.chars().count() {
        issues.push("Substrate template and structure must contain the same amount of elements".to_string());
    }
    if !matching_alphanumerics(st, sub_st) {
        issues.push("Alphanumerics within Sequence Structure and Substrate Structure do not match".to_string());
    }
    issues
}
