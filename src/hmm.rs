//! Profile hidden Markov models in the Plan7 architecture.
use crate::alphabet::{Alphabet, Residue};
use crate::error::Error;
use crate::prob::{Prob, MIN_PROB};
use crate::profile::EProbs;
use log::debug;
use serde::{Deserialize, Serialize};

/// HMM states in the Plan7 architecture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HmmState {
    Match,
    Deletion,
    Insertion,
    Begin,
    End,
}

/// Transition probabilities out of one node, as log-odds scores.
/// ID and DI transitions are omitted (Plan7).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TProbs {
    pub mm: Prob,
    pub mi: Prob,
    pub md: Prob,
    pub im: Prob,
    pub ii: Prob,
    pub dm: Prob,
    pub dd: Prob,
}

impl TProbs {
    /// Every transition at the minimum probability.
    pub fn min() -> Self {
        Self {
            mm: MIN_PROB,
            mi: MIN_PROB,
            md: MIN_PROB,
            im: MIN_PROB,
            ii: MIN_PROB,
            dm: MIN_PROB,
            dd: MIN_PROB,
        }
    }
    /// The terminal transition row of a sub-model: every state moves to the
    /// next match state with certainty, so no insertion or deletion run can
    /// continue past the boundary.
    fn match_terminal() -> Self {
        let certain = Prob::new(0.0);
        Self {
            mm: certain,
            mi: MIN_PROB,
            md: MIN_PROB,
            im: certain,
            ii: MIN_PROB,
            dm: certain,
            dd: MIN_PROB,
        }
    }
}

/// One node (column) of a Plan7 model. `node_num` is the 1-based position of
/// the node in its owning model; look the owner up through that index rather
/// than a stored back-pointer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HmmNode {
    pub node_num: usize,
    /// Consensus residue of this column.
    pub residue: Residue,
    pub mat_emit: EProbs,
    pub ins_emit: EProbs,
    /// Transitions into the next node's states.
    pub transitions: TProbs,
    /// Effective counts. Metadata only; nothing here computes them.
    pub neff_m: f64,
    pub neff_i: f64,
    pub neff_d: f64,
}

/// An ordered list of Plan7 nodes with a shared alphabet and background
/// model. The background (null) table is used for insertion-state scoring in
/// every node; model files without one leave it at the minimum probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hmm {
    nodes: Vec<HmmNode>,
    alphabet: Alphabet,
    null: EProbs,
}

impl Hmm {
    /// Assemble a model from parsed nodes. `null` may be omitted when the
    /// source format carries no background model.
    pub fn new(nodes: Vec<HmmNode>, alphabet: Alphabet, null: Option<EProbs>) -> Self {
        let null = null.unwrap_or_else(|| EProbs::new(&alphabet));
        Self {
            nodes,
            alphabet,
            null,
        }
    }
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
    pub fn nodes(&self) -> &[HmmNode] {
        &self.nodes
    }
    /// The node at `node_num` (1-based).
    pub fn node(&self, node_num: usize) -> Option<&HmmNode> {
        node_num.checked_sub(1).and_then(|i| self.nodes.get(i))
    }
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }
    pub fn null(&self) -> &EProbs {
        &self.null
    }
    /// A deep copy of the nodes in `start..end` as a standalone sub-model.
    /// The transitions of the last copied node are overwritten with the
    /// terminal row; nothing else is modified and the source is untouched.
    pub fn slice(&self, start: usize, end: usize) -> Result<Hmm, Error> {
        if end > self.nodes.len() || start >= end {
            return Err(Error::InvalidRange {
                start,
                end,
                len: self.nodes.len(),
            });
        }
        debug!("slicing nodes {}..{} of {}", start, end, self.nodes.len());
        let mut nodes = self.nodes[start..end].to_vec();
        nodes.last_mut().unwrap().transitions = TProbs::match_terminal();
        Ok(Hmm {
            nodes,
            alphabet: self.alphabet.clone(),
            null: self.null.clone(),
        })
    }
}
