//! Encode: persist frames as bitmap files.

pub mod bmp;

pub use bmp::{decode, encode, save, write_to};
