//! Generic implementations of graph matrix construction.

pub mod helpers;
pub mod matrices;

pub use matrices::laplacian_matrix_impl;
