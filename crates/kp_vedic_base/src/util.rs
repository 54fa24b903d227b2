//! Shared angle helpers.
//!
//! Every angular computation in the workspace goes through
//! [`normalize_360`]; boundary values (exactly 0 and exactly 360) must be
//! handled identically everywhere.

/// Normalize an angle to [0, 360) degrees.
pub fn normalize_360(deg: f64) -> f64 {
    let r = deg % 360.0;
    let r = if r < 0.0 { r + 360.0 } else { r };
    // -1e-18 + 360.0 rounds to 360.0; also folds -0.0 into +0.0
    if r >= 360.0 { 0.0 } else { r + 0.0 }
}

/// Forward (counter-clockwise) arc from `from` to `to`, in [0, 360).
pub fn forward_arc(from: f64, to: f64) -> f64 {
    normalize_360(normalize_360(to) - normalize_360(from))
}
