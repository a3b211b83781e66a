//! CPU implementations of graph algorithms.

mod matrices;
