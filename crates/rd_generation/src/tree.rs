use std::ops::Deref;

use rd_sequence::Nucleotide;

use crate::GenerationError;
use crate::is_target;

/// All nodes of one template position.
///
/// The nodes of layer `d + 1` are the children of every node in layer
/// `d`, and the nodes of layer `d - 1` are their parents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layer {
    /// The template symbol at this position.
    pub template: Nucleotide,
    /// One node per admissible base.
    pub nodes: Vec<Nucleotide>,
    /// Position of the structural bond partner, if any.
    pub neighbor: Option<usize>,
    /// The position binds the target RNA directly.
    pub is_target: bool,
}

impl Layer {
    fn new(template: Nucleotide) -> Self {
        Layer {
            template,
            nodes: template.bases().iter().map(|&b| Nucleotide::from(b)).collect(),
            neighbor: None,
            is_target: false,
        }
    }

    fn target(template: Nucleotide) -> Self {
        Layer {
            template,
            nodes: vec![Nucleotide::placeholder()],
            neighbor: None,
            is_target: true,
        }
    }

    /// True if this is the closing half of a bond whose opening half
    /// lies at a smaller position.
    pub fn closes_bond(&self, depth: usize) -> Option<usize> {
        self.neighbor.filter(|&n| n < depth)
    }
}

/// A layered node graph, one layer per template position.
///
/// Nodes live in per-depth arenas; parent and child sets are whole
/// neighboring layers, so no node holds a reference to another.
///
/// # Example
/// ```rust
/// use rd_generation::LayeredTree;
///
/// let tree = LayeredTree::ribozyme("GNR", "(.)").unwrap();
/// assert_eq!(tree.len(), 3);
/// assert_eq!(tree.children(0).len(), 4);
/// assert_eq!(tree[2].neighbor, Some(0));
/// assert_eq!(tree[0].neighbor, Some(2));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayeredTree(Vec<Layer>);

impl Deref for LayeredTree {
    type Target = [Layer];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl LayeredTree {
    /// Builds the ribozyme side. Bonds `()` and pseudoknots `[]` set the
    /// neighbor of both ends; target positions get a single placeholder
    /// node.
    pub fn ribozyme(sequence: &str, structure: &str) -> Result<Self, GenerationError> {
        let mut layers: Vec<Layer> = Vec::with_capacity(sequence.len());
        let mut bonds: Vec<usize> = Vec::new();
        let mut knots: Vec<usize> = Vec::new();

        for (i, (c, s)) in sequence.chars().zip(structure.chars()).enumerate() {
            let template = Nucleotide::try_from(c)?;
            if is_target(s) {
                layers.push(Layer::target(template));
                continue;
            }
            let mut layer = Layer::new(template);
            match s {
                '.' => (),
                '(' => bonds.push(i),
                '[' => knots.push(i),
                ')' => {
                    let j = bonds.pop().ok_or(GenerationError::UnopenedBond(i))?;
                    layers[j].neighbor = Some(i);
                    layer.neighbor = Some(j);
                }
                ']' => {
                    let j = knots.pop().ok_or(GenerationError::UnopenedPseudoknot(i))?;
                    layers[j].neighbor = Some(i);
                    layer.neighbor = Some(j);
                }
                _ => return Err(GenerationError::UnrecognizedStructureSymbol(s, i)),
            }
            layers.push(layer);
        }

        if let Some(i) = bonds.pop() {
            return Err(GenerationError::UnclosedBond(i));
        }
        if let Some(i) = knots.pop() {
            return Err(GenerationError::UnclosedPseudoknot(i));
        }
        Ok(LayeredTree(layers))
    }

    /// Builds the substrate side: every position expands into its bases,
    /// nothing is paired.
    pub fn substrate(sequence: &str) -> Result<Self, GenerationError> {
        let layers = sequence.chars()
            .map(|c| Ok(Layer::new(Nucleotide::try_from(c)?)))
            .collect::<Result<Vec<_>, GenerationError>>()?;
        Ok(LayeredTree(layers))
    }

    pub fn roots(&self) -> &[Nucleotide] {
        self.0.first().map_or(&[], |l| &l.nodes)
    }

    pub fn children(&self, depth: usize) -> &[Nucleotide] {
        self.0.get(depth + 1).map_or(&[], |l| &l.nodes)
    }

    pub fn parents(&self, depth: usize) -> &[Nucleotide] {
        match depth.checked_sub(1) {
            Some(d) => &self.0[d].nodes,
            None => &[],
        }
    }

    /// Number of concrete sequences the tree spells without constraints.
    pub fn breadth(&self) -> usize {
        self.0.iter().fold(1usize, |acc, l| acc.saturating_mul(l.nodes.len()))
    }
}
