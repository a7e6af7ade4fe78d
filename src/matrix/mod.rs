//! Matrix generation, the serial baseline, and display.
//!
//! Everything here is single-process. The distributed pipeline reuses the
//! same row kernel, which is what makes the two paths bit-identical.

pub mod display;
pub mod generate;
pub mod multiply;
