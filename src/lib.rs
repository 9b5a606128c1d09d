//! Canonical stratification of finite simplicial complexes.
//!
//! A complex of dimension at most 3 is partitioned into strata: maximal
//! unions of simplices that are topologically indistinguishable under an
//! iterative link/coface test.
//!
//! - [`topology`] builds the complex as an incidence graph of faces and
//!   cofaces, closed under taking faces.
//! - [`stratification`] runs the classification and produces a
//!   [`StrataMap`](stratification::StrataMap).
//! - [`io`] loads simplex lists from a line-based text format.

pub mod io;
pub mod stratification;
pub mod topology;

pub type Dim = usize;
