//! Canonical stratification of a simplicial complex.
//!
//! The simplices of a complex are partitioned into strata: maximal unions of
//! simplices that are topologically indistinguishable under an iterative
//! link/coface test. The top dimension walks from the complex dimension down
//! to zero and at each step three classification passes run in a fixed order,
//! one per codimension (0/1, 2, 3). Simplices assigned at a higher top
//! dimension are treated as removed from the complex, without ever mutating
//! the incidence structure itself.

use crate::{
  topology::{
    complex::{handle::SimplexIdx, Complex},
    VertexIdx,
  },
  Dim,
};

use itertools::Itertools;
use std::time::Instant;

/// Maximal complex dimension supported by [`stratify`].
pub const MAX_DIM: Dim = 3;

#[derive(Debug, thiserror::Error)]
pub enum StratifyError {
  #[error("complex dimension {0} exceeds the supported maximum of {MAX_DIM}")]
  UnsupportedDimension(Dim),
}

pub type StratumIdx = usize;

/// One equivalence class of the stratification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stratum {
  index: StratumIdx,
  top_dim: Dim,
}
impl Stratum {
  pub fn index(&self) -> StratumIdx {
    self.index
  }
  /// The top dimension of the iteration in which this stratum was created.
  ///
  /// Records creation context only: the stratum may later absorb simplices
  /// of lower dimension.
  pub fn top_dim(&self) -> Dim {
    self.top_dim
  }
}

/// The simplex -> stratum assignment produced by [`stratify`].
///
/// Absence of an entry means "unassigned", a legitimate, queryable state
/// while the map is under construction. Once assigned, the stratum of a
/// simplex is never retracted. After [`stratify`] returns, every simplex of
/// the complex is assigned.
pub struct StrataMap<'c> {
  complex: &'c Complex,
  strata: Vec<Stratum>,
  /// Parallel to the complex skeletons. `None` means unassigned.
  assignment: Vec<Vec<Option<StratumIdx>>>,
}

impl<'c> StrataMap<'c> {
  fn new(complex: &'c Complex) -> Self {
    let assignment = complex
      .skeletons()
      .map(|skeleton| vec![None; skeleton.len()])
      .collect();
    Self {
      complex,
      strata: Vec::new(),
      assignment,
    }
  }

  pub fn complex(&self) -> &'c Complex {
    self.complex
  }
  pub fn strata(&self) -> &[Stratum] {
    &self.strata
  }
  pub fn strata_count(&self) -> usize {
    self.strata.len()
  }

  /// The stratum of a simplex, by identity. `None` means unassigned.
  pub fn stratum_of(&self, idx: SimplexIdx) -> Option<&Stratum> {
    self.stratum_idx_of(idx).map(|istratum| &self.strata[istratum])
  }

  /// The stratum of the simplex with the given vertex set, normalized to the
  /// same identity key the complex uses. `None` both for vertex sets outside
  /// the complex and for unassigned simplices.
  pub fn stratum_of_vertices(&self, vertices: &[VertexIdx]) -> Option<&Stratum> {
    let handle = self.complex.simplex_by_vertices(vertices)?;
    self.stratum_of(handle.idx())
  }

  pub fn is_assigned(&self, idx: SimplexIdx) -> bool {
    self.stratum_idx_of(idx).is_some()
  }

  fn stratum_idx_of(&self, idx: SimplexIdx) -> Option<StratumIdx> {
    self.assignment[idx.dim][idx.kidx]
  }

  fn create_stratum(&mut self, top_dim: Dim) -> StratumIdx {
    let index = self.strata.len();
    self.strata.push(Stratum { index, top_dim });
    index
  }

  fn assign(&mut self, idx: SimplexIdx, stratum: StratumIdx) {
    let slot = &mut self.assignment[idx.dim][idx.kidx];
    debug_assert!(slot.is_none(), "Stratum assignment is never retracted.");
    *slot = Some(stratum);
  }

  /// The cofaces of a simplex that are part of the provisional complex of
  /// the current iteration: structural cofaces that are either unassigned or
  /// assigned to a stratum created at this top dimension. Simplices claimed
  /// by earlier, higher-dimensional iterations are treated as absent.
  fn live_cofaces(&self, idx: SimplexIdx, top_dim: Dim) -> Vec<SimplexIdx> {
    idx
      .handle(self.complex)
      .data()
      .cofaces
      .iter()
      .copied()
      .filter(|&coface| match self.stratum_idx_of(coface) {
        None => true,
        Some(istratum) => self.strata[istratum].top_dim == top_dim,
      })
      .collect()
  }

  /// Codimension 0/1: connected component analysis over the provisional
  /// coface structure.
  ///
  /// An (n-1)-simplex with exactly two live cofaces lies in the interior of
  /// an n-dimensional piece; it seeds a stratum that is grown by a work-list
  /// search through the faces of absorbed cofaces. Every n-simplex still
  /// unassigned afterwards becomes a singleton stratum.
  fn codim_zero_one_pass(&mut self, top_dim: Dim) {
    if top_dim >= 1 {
      for kidx in 0..self.complex.skeleton(top_dim - 1).len() {
        let seed = SimplexIdx::new(top_dim - 1, kidx);
        // Assignment doubles as the visited check.
        if self.is_assigned(seed) {
          continue;
        }
        let cofaces = self.live_cofaces(seed, top_dim);
        if cofaces.len() != 2 {
          continue;
        }
        let stratum = self.create_stratum(top_dim);
        self.assign(seed, stratum);
        self.assign(cofaces[0], stratum);
        self.assign(cofaces[1], stratum);
        self.connected_component_search(stratum, top_dim, &cofaces);
      }
    }

    for kidx in 0..self.complex.skeleton(top_dim).len() {
      let idx = SimplexIdx::new(top_dim, kidx);
      if !self.is_assigned(idx) {
        let stratum = self.create_stratum(top_dim);
        self.assign(idx, stratum);
      }
    }
  }

  /// Grows a stratum along simplices that again have exactly two live
  /// cofaces. Runs on an explicit work list, so the traversal depth is
  /// independent of the call stack and arbitrarily large components are
  /// handled.
  fn connected_component_search(
    &mut self,
    stratum: StratumIdx,
    top_dim: Dim,
    seed_cofaces: &[SimplexIdx],
  ) {
    let mut worklist: Vec<SimplexIdx> = Vec::new();
    for &coface in seed_cofaces {
      worklist.extend_from_slice(&coface.handle(self.complex).data().faces);
    }
    while let Some(idx) = worklist.pop() {
      if self.is_assigned(idx) {
        continue;
      }
      let cofaces = self.live_cofaces(idx, top_dim);
      if cofaces.len() != 2 {
        continue;
      }
      self.assign(idx, stratum);
      for &coface in &cofaces {
        if !self.is_assigned(coface) {
          self.assign(coface, stratum);
        }
        worklist.extend_from_slice(&coface.handle(self.complex).data().faces);
      }
    }
  }

  /// Codimension 2: a simplex joins the single stratum shared by all its
  /// live cofaces, if there is one.
  fn codim_two_pass(&mut self, top_dim: Dim) {
    for kidx in 0..self.complex.skeleton(top_dim - 2).len() {
      let idx = SimplexIdx::new(top_dim - 2, kidx);
      if self.is_assigned(idx) {
        continue;
      }
      if let Some(stratum) = self.unique_stratum_among_cofaces(idx, top_dim) {
        self.assign(idx, stratum);
      }
    }
  }

  /// Codimension 3: same uniqueness test, and additionally the Euler
  /// characteristic of the small link must equal 2, confirming the local
  /// manifold condition.
  fn codim_three_pass(&mut self, top_dim: Dim) {
    for kidx in 0..self.complex.skeleton(top_dim - 3).len() {
      let idx = SimplexIdx::new(top_dim - 3, kidx);
      if self.is_assigned(idx) {
        continue;
      }
      let Some(stratum) = self.unique_stratum_among_cofaces(idx, top_dim) else {
        continue;
      };
      if self.small_link_euler_characteristic(idx, top_dim) == 2 {
        self.assign(idx, stratum);
      }
    }
  }

  /// If all live cofaces are assigned to one identical stratum, returns it.
  ///
  /// An unassigned live coface or an empty live coface set yields `None`;
  /// the simplex is then reconsidered at a lower iteration, where its live
  /// coface set may have shrunk.
  fn unique_stratum_among_cofaces(&self, idx: SimplexIdx, top_dim: Dim) -> Option<StratumIdx> {
    self
      .live_cofaces(idx, top_dim)
      .iter()
      .map(|&coface| self.stratum_idx_of(coface))
      .all_equal_value()
      .ok()
      .flatten()
  }

  /// Euler characteristic of the small link of a simplex: its live cofaces,
  /// transitively layer by layer, deduplicated per layer, for exactly
  /// `top_dim - dim` layers. The alternating sum of the layer sizes is the
  /// characteristic. Built iteratively, layer by layer.
  ///
  /// Taking the layer count equal to the codimension is a simplification
  /// that only holds for codimension <= 3, which the [`stratify`]
  /// precondition guarantees.
  fn small_link_euler_characteristic(&self, idx: SimplexIdx, top_dim: Dim) -> i64 {
    let nlayers = top_dim - idx.dim;
    let mut euler: i64 = 0;
    let mut sign: i64 = 1;
    let mut frontier = vec![idx];
    for _ in 0..nlayers {
      let mut layer: Vec<SimplexIdx> = Vec::new();
      for &member in &frontier {
        for coface in self.live_cofaces(member, top_dim) {
          if !layer.contains(&coface) {
            layer.push(coface);
          }
        }
      }
      euler += sign * layer.len() as i64;
      sign = -sign;
      frontier = layer;
    }
    euler
  }
}

/// Computes the canonical stratification of the complex.
///
/// Iterates the top dimension from the complex dimension down to zero and
/// applies the three codimension passes at every step. Every simplex is
/// guaranteed to be assigned when the function returns: vertices are always
/// resolved, at the latest by the singleton fallback at top dimension zero.
///
/// Fails fast with [`StratifyError::UnsupportedDimension`] for complexes of
/// dimension greater than 3, before any work is done.
pub fn stratify(complex: &Complex) -> Result<StrataMap<'_>, StratifyError> {
  if complex.dim() > MAX_DIM {
    return Err(StratifyError::UnsupportedDimension(complex.dim()));
  }

  let start = Instant::now();
  let mut map = StrataMap::new(complex);
  for top_dim in (0..=complex.dim()).rev() {
    map.codim_zero_one_pass(top_dim);
    if top_dim >= 2 {
      map.codim_two_pass(top_dim);
    }
    if top_dim >= 3 {
      map.codim_three_pass(top_dim);
    }
    tracing::debug!(
      top_dim,
      strata = map.strata_count(),
      "stratification iteration done"
    );
  }
  tracing::info!(
    strata = map.strata_count(),
    elapsed = ?start.elapsed(),
    "stratification finished"
  );
  Ok(map)
}
