//! A simplicial complex as a multipartite incidence graph.
//!
//! The simplices are stored in one skeleton per dimension, keyed by their
//! sorted vertex set. Each simplex records its immediate faces and cofaces,
//! so the complex doubles as a graph that the stratification traverses.

pub mod handle;

use handle::{SimplexHandle, SimplexIdx, SkeletonHandle};

use crate::{
  topology::{simplex::Simplex, VertexIdx},
  Dim,
};

use indexmap::IndexMap;

pub type ComplexSkeleton = IndexMap<Simplex, SimplexData>;

/// Incidence data attached to a simplex of the complex.
#[derive(Default, Debug, Clone)]
pub struct SimplexData {
  /// Immediate faces: one dimension lower, contained in this simplex.
  pub faces: Vec<SimplexIdx>,
  /// Immediate cofaces: one dimension higher, containing this simplex.
  pub cofaces: Vec<SimplexIdx>,
}

/// A finite simplicial complex, closed under taking faces.
///
/// Once built through [`Complex::from_simplices`] the complex contains every
/// face of every simplex, transitively down to the vertices, and the
/// face/coface relation is symmetric.
#[derive(Debug, Clone)]
pub struct Complex {
  skeletons: Vec<ComplexSkeleton>,
}

impl Complex {
  pub fn new() -> Self {
    Self {
      skeletons: vec![ComplexSkeleton::new()],
    }
  }

  /// Builds the complex from the given simplices and closes it under faces.
  ///
  /// Deterministic and idempotent: duplicate inputs collapse to one simplex.
  pub fn from_simplices(simplices: impl IntoIterator<Item = Simplex>) -> Self {
    let mut complex = Self::new();
    for simplex in simplices {
      let (idx, is_new) = complex.add_simplex(simplex);
      if is_new {
        complex.add_faces(idx);
      }
    }
    complex
  }

  /// Builds the complex from raw vertex index lists.
  pub fn from_vertex_lists(lists: impl IntoIterator<Item = Vec<VertexIdx>>) -> Self {
    Self::from_simplices(lists.into_iter().map(Simplex::new))
  }

  /// The standard simplex of this dimension with all its subsimplices.
  pub fn standard(dim: Dim) -> Self {
    Self::from_simplices([Simplex::standard(dim)])
  }

  /// Inserts a single simplex without closing under faces.
  ///
  /// Returns the index of the simplex and whether it was newly created.
  /// Dimension buckets are grown on demand, so the skeletons always exist
  /// contiguously from 0 up to the maximal dimension seen. There is no
  /// dimension ceiling here; [`crate::stratification::stratify`] checks it.
  pub fn add_simplex(&mut self, simplex: Simplex) -> (SimplexIdx, bool) {
    let dim = simplex.dim();
    while self.skeletons.len() <= dim {
      self.skeletons.push(ComplexSkeleton::new());
    }
    let (kidx, is_new) = match self.skeletons[dim].entry(simplex) {
      indexmap::map::Entry::Occupied(entry) => (entry.index(), false),
      indexmap::map::Entry::Vacant(entry) => {
        let kidx = entry.index();
        entry.insert(SimplexData::default());
        (kidx, true)
      }
    };
    (SimplexIdx::new(dim, kidx), is_new)
  }

  /// Inserts all faces of a freshly created simplex and links the
  /// face/coface edges, recursing only into newly created faces so already
  /// closed subtrees are not revisited. Recursion depth is bounded by the
  /// simplex dimension.
  fn add_faces(&mut self, parent: SimplexIdx) {
    if parent.dim == 0 {
      return;
    }
    let parent_simplex = self.skeletons[parent.dim]
      .get_index(parent.kidx)
      .unwrap()
      .0
      .clone();
    for face in parent_simplex.faces() {
      let (face_idx, is_new) = self.add_simplex(face);
      self.simplex_data_mut(parent).faces.push(face_idx);
      self.simplex_data_mut(face_idx).cofaces.push(parent);
      if is_new {
        self.add_faces(face_idx);
      }
    }
  }

  fn simplex_data_mut(&mut self, idx: SimplexIdx) -> &mut SimplexData {
    self.skeletons[idx.dim].get_index_mut(idx.kidx).unwrap().1
  }

  pub fn dim(&self) -> Dim {
    self.skeletons.len() - 1
  }

  /// Total number of simplices over all dimensions.
  pub fn nsimplices(&self) -> usize {
    self.skeletons.iter().map(|skeleton| skeleton.len()).sum()
  }

  pub fn skeleton_raw(&self, dim: Dim) -> &ComplexSkeleton {
    &self.skeletons[dim]
  }
  pub fn skeleton(&self, dim: Dim) -> SkeletonHandle {
    SkeletonHandle::new(self, dim)
  }
  pub fn skeletons(&self) -> impl Iterator<Item = SkeletonHandle> {
    (0..=self.dim()).map(|dim| self.skeleton(dim))
  }

  /// Looks up a simplex by a raw vertex set, normalized to the same identity
  /// key the complex uses.
  pub fn simplex_by_vertices(&self, vertices: &[VertexIdx]) -> Option<SimplexHandle> {
    if vertices.is_empty() {
      return None;
    }
    let simplex = Simplex::new(vertices.to_vec());
    if simplex.dim() > self.dim() {
      return None;
    }
    self.skeleton(simplex.dim()).get_by_simplex(&simplex)
  }
}

impl Default for Complex {
  fn default() -> Self {
    Self::new()
  }
}

impl FromIterator<Simplex> for Complex {
  fn from_iter<T: IntoIterator<Item = Simplex>>(iter: T) -> Self {
    Self::from_simplices(iter)
  }
}

/// Human-readable dump of all simplices, per dimension.
impl std::fmt::Display for Complex {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    for (dim, skeleton) in self.skeletons.iter().enumerate() {
      writeln!(f, "dim {dim}:")?;
      for simplex in skeleton.keys() {
        writeln!(f, "  {simplex}")?;
      }
    }
    Ok(())
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn closure_of_mixed_input() {
    let complex = Complex::from_vertex_lists([vec![0, 1, 2], vec![0, 3]]);
    assert_eq!(complex.dim(), 2);
    assert_eq!(complex.nsimplices(), 9);

    let expected = [
      vec![vec![0], vec![1], vec![2], vec![3]],
      vec![vec![0, 1], vec![0, 2], vec![0, 3], vec![1, 2]],
      vec![vec![0, 1, 2]],
    ];
    for (dim, simplices) in expected.iter().enumerate() {
      assert_eq!(complex.skeleton(dim).len(), simplices.len());
      for vertices in simplices {
        assert!(complex.simplex_by_vertices(vertices).is_some());
      }
    }
    // [1,2,3] is not implied: vertex 3 only connects to 0.
    assert!(complex.simplex_by_vertices(&[1, 2, 3]).is_none());
  }

  #[test]
  fn idempotent_insertion() {
    let mut complex = Complex::new();
    let (idx0, is_new0) = complex.add_simplex(Simplex::new(vec![0, 1]));
    let (idx1, is_new1) = complex.add_simplex(Simplex::new(vec![1, 0]));
    assert!(is_new0);
    assert!(!is_new1);
    assert_eq!(idx0, idx1);
    assert_eq!(complex.skeleton(1).len(), 1);
  }

  #[test]
  fn duplicate_inputs_collapse() {
    let once = Complex::from_vertex_lists([vec![0, 1, 2]]);
    let twice = Complex::from_vertex_lists([vec![0, 1, 2], vec![2, 1, 0]]);
    assert_eq!(once.nsimplices(), twice.nsimplices());
    // Re-adding must not re-link faces either.
    for skeleton in twice.skeletons() {
      for simplex in skeleton.handle_iter() {
        let nfaces = if simplex.dim() == 0 {
          0
        } else {
          simplex.nvertices()
        };
        assert_eq!(simplex.data().faces.len(), nfaces);
      }
    }
  }

  #[test]
  fn standard_tetrahedron_counts() {
    let complex = Complex::standard(3);
    assert_eq!(complex.dim(), 3);
    assert_eq!(complex.skeleton(0).len(), 4);
    assert_eq!(complex.skeleton(1).len(), 6);
    assert_eq!(complex.skeleton(2).len(), 4);
    assert_eq!(complex.skeleton(3).len(), 1);
    assert_eq!(complex.nsimplices(), 15);
  }

  #[test]
  fn face_coface_symmetry() {
    let complex = Complex::from_vertex_lists([vec![0, 1, 2, 3], vec![1, 2, 3, 4]]);
    for skeleton in complex.skeletons() {
      for simplex in skeleton.handle_iter() {
        assert_eq!(
          simplex.data().faces.len(),
          if simplex.dim() == 0 { 0 } else { simplex.nvertices() }
        );
        for face in simplex.faces() {
          assert_eq!(face.dim() + 1, simplex.dim());
          assert!(face.is_subsimp_of(simplex.simplex_set()));
          assert!(face.cofaces().any(|coface| coface == simplex));
        }
        for coface in simplex.cofaces() {
          assert_eq!(coface.dim(), simplex.dim() + 1);
          assert!(coface.faces().any(|face| face == simplex));
        }
      }
    }
  }
}
