use crate::{topology::VertexIdx, Dim};

use itertools::Itertools;

/// A geometric simplex, represented by its set of vertices.
///
/// The vertices are kept sorted and strictly increasing, making the vertex
/// vector the identity key of the simplex: two simplices are the same exactly
/// if they have the same sorted vertex set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Simplex {
  vertices: Vec<VertexIdx>,
}

impl Simplex {
  /// Normalizes the vertex list (sort + dedup).
  pub fn new(mut vertices: Vec<VertexIdx>) -> Self {
    assert!(!vertices.is_empty(), "Simplex needs at least one vertex.");
    vertices.sort_unstable();
    vertices.dedup();
    Self { vertices }
  }

  pub fn single(vertex: VertexIdx) -> Self {
    Self {
      vertices: vec![vertex],
    }
  }

  /// The simplex on the vertices `0..=dim`.
  pub fn standard(dim: Dim) -> Self {
    Self {
      vertices: (0..=dim).collect(),
    }
  }

  pub fn nvertices(&self) -> usize {
    self.vertices.len()
  }
  pub fn dim(&self) -> Dim {
    self.nvertices() - 1
  }
  pub fn vertices(&self) -> &[VertexIdx] {
    &self.vertices
  }

  /// The immediate faces: every subsimplex obtained by removing exactly one
  /// vertex. A vertex has no faces.
  pub fn faces(&self) -> impl Iterator<Item = Simplex> + '_ {
    let nfaces = if self.dim() == 0 { 0 } else { self.nvertices() };
    (0..nfaces).map(move |iremoved| {
      let mut vertices = self.vertices.clone();
      vertices.remove(iremoved);
      Self { vertices }
    })
  }

  /// All subsimplices of the given dimension, in lexicographic order.
  pub fn subsimps(&self, sub_dim: Dim) -> impl Iterator<Item = Simplex> + '_ {
    self
      .vertices
      .iter()
      .copied()
      .combinations(sub_dim + 1)
      .map(|vertices| Self { vertices })
  }

  pub fn is_subsimp_of(&self, other: &Self) -> bool {
    self.vertices.iter().all(|v| other.vertices.contains(v))
  }
}

impl From<Vec<VertexIdx>> for Simplex {
  fn from(vertices: Vec<VertexIdx>) -> Self {
    Self::new(vertices)
  }
}

impl std::fmt::Display for Simplex {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{:?}", self.vertices)
  }
}

#[cfg(test)]
mod test {
  use super::Simplex;

  #[test]
  fn normalization() {
    let simplex = Simplex::new(vec![2, 0, 1, 2]);
    assert_eq!(simplex.vertices(), &[0, 1, 2]);
    assert_eq!(simplex.dim(), 2);
    assert_eq!(simplex, Simplex::new(vec![1, 2, 0]));
  }

  #[test]
  fn faces_of_triangle() {
    let triangle = Simplex::standard(2);
    let faces: Vec<_> = triangle.faces().collect();
    assert_eq!(
      faces,
      vec![
        Simplex::new(vec![1, 2]),
        Simplex::new(vec![0, 2]),
        Simplex::new(vec![0, 1]),
      ]
    );
  }

  #[test]
  fn vertex_has_no_faces() {
    assert_eq!(Simplex::single(7).faces().count(), 0);
  }

  #[test]
  fn subsimp_counts() {
    let tet = Simplex::standard(3);
    assert_eq!(tet.subsimps(0).count(), 4);
    assert_eq!(tet.subsimps(1).count(), 6);
    assert_eq!(tet.subsimps(2).count(), 4);
    assert!(tet.subsimps(2).all(|sub| sub.is_subsimp_of(&tet)));
  }
}
