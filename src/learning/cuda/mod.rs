//! CUDA implementations of learning algorithms.

mod tikhonov;
