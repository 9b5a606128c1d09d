pub mod complex;
pub mod simplex;

pub type VertexIdx = usize;
