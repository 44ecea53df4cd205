use log::{debug, info};
use nohash_hasher::IntMap;

use rd_sequence::{Base, Nucleotide, Sequence};

use crate::{Candidate, GenerationError, SubstrateInfo, Template};
use crate::{LayeredTree, RibozymeSequences};
use crate::{all_indices_of, find_repeat_regions, find_substrates, is_target};

/// Pairs each substrate target label with every ribozyme position that
/// carries the same label.
pub fn index_pairs(
    ribozyme_structure: &[char],
    substrate_structure: &[char],
) -> Result<Vec<(usize, char)>, GenerationError> {
    let mut labels: IntMap<u32, Vec<usize>> = IntMap::default();
    for (j, &c) in ribozyme_structure.iter().enumerate() {
        if is_target(c) {
            labels.entry(c as u32).or_default().push(j);
        }
    }

    let mut pairs = Vec::new();
    for &c in substrate_structure {
        if c == '.' {
            continue;
        }
        if !is_target(c) {
            return Err(GenerationError::UnexpectedSubstrateStructureCharacter(c));
        }
        let positions = labels.get(&(c as u32))
            .ok_or(GenerationError::SubstrateStructureCharNotFoundInRibozyme(c))?;
        pairs.extend(positions.iter().map(|&j| (j, c)));
    }
    Ok(pairs)
}

/// A substrate site prepared for binding: the bases a ribozyme needs to
/// pair with it, by label.
#[derive(Debug, Clone)]
struct Site {
    info: SubstrateInfo,
    complement: Vec<Base>,
    labels: IntMap<u32, usize>,
    cutsite_indices: Vec<usize>,
}

impl Site {
    fn new(info: SubstrateInfo, target: &str) -> Result<Self, GenerationError> {
        let complement = Sequence::try_from(info.sequence.as_str())?
            .complement()?
            .chars()
            .map(Base::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let mut labels: IntMap<u32, usize> = IntMap::default();
        for (k, c) in info.structure.chars().enumerate() {
            labels.entry(c as u32).or_insert(k);
        }
        let cutsite_indices = all_indices_of(target, &info.sequence);
        Ok(Site { info, complement, labels, cutsite_indices })
    }
}

/// The lazy stream of candidates for one template and one target.
///
/// Substrate sites form the outer loop and ribozyme sequences the inner
/// one. Ribozyme sequences are produced on demand during the first site
/// and replayed from a cache for the following ones. Errors found while
/// expanding the ribozyme surface as items, after which the stream ends.
#[derive(Debug)]
pub struct Candidates {
    ribozymes: RibozymeSequences,
    cache: Vec<Sequence>,
    exhausted: bool,
    failed: bool,
    structure: Vec<char>,
    pairs: Vec<(usize, char)>,
    sites: Vec<Site>,
    site: usize,
    ribozyme: usize,
}

impl Candidates {
    /// Number of substrate sites found in the target.
    pub fn site_count(&self) -> usize {
        self.sites.len()
    }

    pub fn substrates(&self) -> impl Iterator<Item = &SubstrateInfo> {
        self.sites.iter().map(|s| &s.info)
    }

    fn fail(&mut self, e: GenerationError) -> Option<Result<Candidate, GenerationError>> {
        self.failed = true;
        Some(Err(e))
    }

    /// Fills the target positions of `sequence` with the complement of
    /// the site, or rejects the combination.
    fn bind(&self, sequence: &Sequence, site: &Site) -> Option<Candidate> {
        let tree = self.ribozymes.tree();
        let mut nucleotides = sequence.0.clone();

        for &(pos, label) in &self.pairs {
            let Some(&k) = site.labels.get(&(label as u32)) else {
                continue;
            };
            let base = site.complement[k];
            if !tree[pos].template.admits(base) {
                return None;
            }
            nucleotides[pos] = Nucleotide::from(base);
        }

        let mut structure = self.structure.clone();
        for i in (0..nucleotides.len()).rev() {
            if nucleotides[i].is_placeholder() {
                nucleotides.remove(i);
                structure.remove(i);
            }
        }

        Some(Candidate {
            sequence: Sequence(nucleotides),
            structure: structure.into_iter().collect(),
            substrate_sequence: site.info.sequence.clone(),
            substrate_structure: site.info.structure.clone(),
            cutsite_number_offset: site.info.cutsite_offset,
            cutsite_indices: site.cutsite_indices.clone(),
            fitness_values: Vec::new(),
            rank: None,
        })
    }

    /// The next ribozyme sequence for the current site.
    fn next_ribozyme(&mut self) -> Option<Result<Sequence, GenerationError>> {
        if let Some(seq) = self.cache.get(self.ribozyme) {
            self.ribozyme += 1;
            return Some(Ok(seq.clone()));
        }
        if self.exhausted {
            return None;
        }
        match self.ribozymes.next() {
            Some(Ok(seq)) => {
                self.cache.push(seq.clone());
                self.ribozyme += 1;
                Some(Ok(seq))
            }
            Some(Err(e)) => Some(Err(e)),
            None => {
                debug!("{} ribozyme sequences.", self.cache.len());
                self.exhausted = true;
                None
            }
        }
    }
}

impl Iterator for Candidates {
    type Item = Result<Candidate, GenerationError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        if self.sites.is_empty() {
            // Still walk the ribozyme so that template errors surface.
            while let Some(r) = self.next_ribozyme() {
                if let Err(e) = r {
                    return self.fail(e);
                }
            }
            return None;
        }
        while self.site < self.sites.len() {
            match self.next_ribozyme() {
                Some(Ok(seq)) => {
                    if let Some(c) = self.bind(&seq, &self.sites[self.site]) {
                        return Some(Ok(c));
                    }
                }
                Some(Err(e)) => return self.fail(e),
                None => {
                    self.site += 1;
                    self.ribozyme = 0;
                }
            }
        }
        None
    }
}

/// Generates all candidates of `template` against the `target` RNA.
///
/// Template errors (lengths, structure, repeat notation, labels) are
/// returned right away; errors found while expanding the ribozyme are
/// yielded by the returned iterator.
///
/// # Example
/// ```rust
/// use rd_generation::{generate, Template};
///
/// let template = Template::new("GN", "()", "N", ".");
/// let sequences: Vec<String> = generate(&template, "A").unwrap()
///     .map(|c| c.unwrap().sequence.to_string())
///     .collect();
/// assert_eq!(sequences, vec!["GC", "GU"]);
/// ```
pub fn generate(template: &Template, target: &str) -> Result<Candidates, GenerationError> {
    template.check_lengths()?;

    let sub_sequence: Vec<char> = template.substrate_sequence.chars().collect();
    let sub_structure: Vec<char> = template.substrate_structure.chars().collect();
    let regions = find_repeat_regions(&sub_sequence, &sub_structure)?;

    let tree = LayeredTree::ribozyme(&template.ribozyme_sequence, &template.ribozyme_structure)?;
    let structure: Vec<char> = template.ribozyme_structure.chars().collect();
    let pairs = index_pairs(&structure, &sub_structure)?;

    let sites = find_substrates(&sub_sequence, &sub_structure, &regions, target)?
        .into_iter()
        .map(|info| Site::new(info, target))
        .collect::<Result<Vec<_>, _>>()?;

    info!("Template {}: {} repeat regions, {} substrate sites, up to {} ribozyme sequences.",
        if template.name.is_empty() { "<unnamed>" } else { template.name.as_str() },
        regions.len(), sites.len(), tree.breadth());

    Ok(Candidates {
        ribozymes: RibozymeSequences::new(tree),
        cache: Vec::new(),
        exhausted: false,
        failed: false,
        structure,
        pairs,
        sites,
        site: 0,
        ribozyme: 0,
    })
}
