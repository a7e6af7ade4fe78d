//! Plain-text matrix dump.

use std::fmt::Write;

/// Render an n×n matrix as space-separated rows, one row per line, every
/// value rounded to an integer for display. The counter-filled inputs and
/// their products are whole numbers, so nothing is lost on screen.
pub fn format_matrix(mat: &[f32], n: usize) -> String {
    let mut out = String::new();
    for row in mat.chunks(n) {
        for value in row {
            let _ = write!(out, "{value:.0} ");
        }
        out.push('\n');
    }
    out
}
