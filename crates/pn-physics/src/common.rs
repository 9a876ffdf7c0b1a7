//! Shared conventions for the leaf formulas.

use pn_core::Real;

/// Floor applied to geometric lengths before they appear in a denominator.
///
/// Degenerate geometry (overlapping pores, zero-length throats) is clamped
/// to this instead of raising, so conductance formulas stay finite.
pub const MIN_LENGTH: Real = 1e-12;

/// Clamp a geometric length to the [`MIN_LENGTH`] floor.
pub fn clamp_length(length: Real) -> Real {
    length.max(MIN_LENGTH)
}

/// Cross-sectional area of a circle of diameter `d`.
pub fn circle_area(d: Real) -> Real {
    std::f64::consts::FRAC_PI_4 * d * d
}

/// Combine three series segment conductances into a total.
///
/// A segment with conductance <= 0 marks a boundary or virtual element
/// and contributes zero resistance (infinite conductance), so it drops
/// out of the sum. If every segment drops out the total is infinite.
pub fn series_conductance(g1: Real, gt: Real, g2: Real) -> Real {
    let resistance: Real = [g1, gt, g2]
        .into_iter()
        .filter(|&g| g > 0.0)
        .map(|g| 1.0 / g)
        .sum();
    if resistance > 0.0 {
        1.0 / resistance
    } else {
        Real::INFINITY
    }
}
