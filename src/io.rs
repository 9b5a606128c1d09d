//! Loading simplex lists from the line-based text format.
//!
//! One comma-separated vertex list per line:
//!
//! ```text
//! 0,1,2
//! 0,3
//! ```
//!
//! Blank lines are ignored and the order of lines is irrelevant.

use crate::topology::{complex::Complex, VertexIdx};

use std::{fs, num::ParseIntError, path::Path};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
  #[error(transparent)]
  Io(#[from] std::io::Error),
  #[error("invalid vertex index on line {line}")]
  InvalidVertex {
    line: usize,
    #[source]
    source: ParseIntError,
  },
}

/// Parses raw vertex lists, one simplex per non-blank line.
pub fn parse_simplex_list(input: &str) -> Result<Vec<Vec<VertexIdx>>, LoadError> {
  let mut lists = Vec::new();
  for (iline, line) in input.lines().enumerate() {
    let line = line.trim();
    if line.is_empty() {
      continue;
    }
    let vertices = line
      .split(',')
      .map(|vertex| vertex.trim().parse::<VertexIdx>())
      .collect::<Result<Vec<_>, _>>()
      .map_err(|source| LoadError::InvalidVertex {
        line: iline + 1,
        source,
      })?;
    lists.push(vertices);
  }
  Ok(lists)
}

pub fn read_simplex_list(path: impl AsRef<Path>) -> Result<Vec<Vec<VertexIdx>>, LoadError> {
  let raw = fs::read_to_string(path)?;
  parse_simplex_list(&raw)
}

/// Reads a simplex list from file and builds the face-closed complex.
pub fn complex_from_file(path: impl AsRef<Path>) -> Result<Complex, LoadError> {
  Ok(Complex::from_vertex_lists(read_simplex_list(path)?))
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn parse_with_blank_lines_and_whitespace() {
    let input = "0,1,2\n\n 0, 3 \n";
    let lists = parse_simplex_list(input).unwrap();
    assert_eq!(lists, vec![vec![0, 1, 2], vec![0, 3]]);
  }

  #[test]
  fn parse_error_carries_line_number() {
    let input = "0,1\n\n2,x\n";
    let err = parse_simplex_list(input).unwrap_err();
    match err {
      LoadError::InvalidVertex { line, .. } => assert_eq!(line, 3),
      other => panic!("unexpected error: {other}"),
    }
  }

  #[test]
  fn parsed_list_closes_under_faces() {
    let lists = parse_simplex_list("0,1,2\n0,3\n").unwrap();
    let complex = Complex::from_vertex_lists(lists);
    assert_eq!(complex.nsimplices(), 9);
  }
}
