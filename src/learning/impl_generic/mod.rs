//! Generic implementations of Tikhonov learning.

pub mod classification;
pub mod client;
pub mod helpers;
pub mod regression;

pub use classification::classification_tik_impl;
pub use client::TikhonovClient;
pub use regression::regression_tik_impl;
