use super::{Complex, ComplexSkeleton, SimplexData};
use crate::{topology::simplex::Simplex, Dim};

/// An index identifying a simplex within one skeleton.
pub type KSimplexIdx = usize;

/// An index identifying a simplex in the complex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SimplexIdx {
  pub dim: Dim,
  pub kidx: KSimplexIdx,
}
impl From<(Dim, KSimplexIdx)> for SimplexIdx {
  fn from((dim, kidx): (Dim, KSimplexIdx)) -> Self {
    Self { dim, kidx }
  }
}
impl SimplexIdx {
  pub fn new(dim: Dim, kidx: KSimplexIdx) -> Self {
    Self { dim, kidx }
  }
  pub fn dim(&self) -> Dim {
    self.dim
  }

  pub fn is_valid(self, complex: &Complex) -> bool {
    self.dim <= complex.dim() && self.kidx < complex.skeleton_raw(self.dim).len()
  }
  pub fn assert_valid(self, complex: &Complex) {
    assert!(self.is_valid(complex), "Not a valid simplex index.");
  }
  pub fn handle(self, complex: &Complex) -> SimplexHandle {
    SimplexHandle::new(complex, self)
  }
}

/// A handle to a simplex in the complex.
#[derive(Copy, Clone)]
pub struct SimplexHandle<'c> {
  complex: &'c Complex,
  idx: SimplexIdx,
}
impl std::ops::Deref for SimplexHandle<'_> {
  type Target = Simplex;
  fn deref(&self) -> &Self::Target {
    self.simplex_set()
  }
}
impl std::fmt::Debug for SimplexHandle<'_> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("SimplexHandle")
      .field("idx", &self.idx)
      .field("complex", &(self.complex as *const Complex))
      .finish()
  }
}

impl<'c> SimplexHandle<'c> {
  pub fn new(complex: &'c Complex, idx: SimplexIdx) -> Self {
    idx.assert_valid(complex);
    Self { complex, idx }
  }

  pub fn idx(&self) -> SimplexIdx {
    self.idx
  }
  pub fn dim(&self) -> Dim {
    self.idx.dim
  }
  pub fn kidx(&self) -> KSimplexIdx {
    self.idx.kidx
  }
  pub fn complex(&self) -> &'c Complex {
    self.complex
  }
  pub fn skeleton(&self) -> SkeletonHandle<'c> {
    self.complex.skeleton(self.idx.dim)
  }

  /// The sorted vertex set keying this simplex.
  pub fn simplex_set(&self) -> &'c Simplex {
    self
      .complex
      .skeleton_raw(self.idx.dim)
      .get_index(self.idx.kidx)
      .unwrap()
      .0
  }
  pub fn data(&self) -> &'c SimplexData {
    self
      .complex
      .skeleton_raw(self.idx.dim)
      .get_index(self.idx.kidx)
      .unwrap()
      .1
  }

  /// The immediate faces of this simplex.
  pub fn faces(&self) -> impl Iterator<Item = SimplexHandle<'c>> {
    let complex = self.complex;
    self.data().faces.iter().map(move |&idx| idx.handle(complex))
  }
  /// The immediate cofaces of this simplex.
  pub fn cofaces(&self) -> impl Iterator<Item = SimplexHandle<'c>> {
    let complex = self.complex;
    self
      .data()
      .cofaces
      .iter()
      .map(move |&idx| idx.handle(complex))
  }
}

impl PartialEq for SimplexHandle<'_> {
  fn eq(&self, other: &Self) -> bool {
    std::ptr::eq(self.complex, other.complex) && self.idx == other.idx
  }
}
impl Eq for SimplexHandle<'_> {}
impl std::hash::Hash for SimplexHandle<'_> {
  fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
    (self.complex as *const Complex).hash(state);
    self.idx.hash(state);
  }
}

/// A handle to one skeleton (all simplices of a common dimension).
pub struct SkeletonHandle<'c> {
  complex: &'c Complex,
  dim: Dim,
}

impl<'c> SkeletonHandle<'c> {
  pub fn new(complex: &'c Complex, dim: Dim) -> Self {
    assert!(dim <= complex.dim());
    Self { complex, dim }
  }

  pub fn dim(&self) -> Dim {
    self.dim
  }
  pub fn raw(&self) -> &'c ComplexSkeleton {
    self.complex.skeleton_raw(self.dim)
  }

  pub fn len(&self) -> usize {
    self.raw().len()
  }
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  pub fn handle_by_kidx(&self, kidx: KSimplexIdx) -> SimplexHandle<'c> {
    SimplexIdx::new(self.dim, kidx).handle(self.complex)
  }
  pub fn get_by_simplex(&self, simplex: &Simplex) -> Option<SimplexHandle<'c>> {
    let kidx = self.raw().get_index_of(simplex)?;
    Some(SimplexIdx::new(self.dim, kidx).handle(self.complex))
  }

  pub fn handle_iter(&self) -> impl ExactSizeIterator<Item = SimplexHandle<'c>> + '_ {
    (0..self.len()).map(|kidx| SimplexIdx::new(self.dim, kidx).handle(self.complex))
  }
  pub fn simplex_iter(&self) -> impl ExactSizeIterator<Item = &'c Simplex> + '_ {
    self.raw().keys()
  }
}
