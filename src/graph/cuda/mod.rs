//! CUDA implementations of graph algorithms.

mod matrices;
