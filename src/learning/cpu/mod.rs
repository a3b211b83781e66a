//! CPU implementations of learning algorithms.

mod tikhonov;
