/// Scalar type for all stored property values.
pub type Real = f64;

/// Absolute and relative comparison tolerances.
///
/// The defaults suit conductance-scale magnitudes; tests comparing
/// against hand-computed values use these rather than ad-hoc epsilons.
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

/// True when `a` and `b` agree within `tol`, absolute first then
/// relative to the larger magnitude.
pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearly_equal_basic() {
        let tol = Tolerances::default();
        assert!(nearly_equal(1.0, 1.0 + 1e-12, tol));
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(!nearly_equal(1.0, 1.0 + 1e-6, tol));
    }

    #[test]
    fn nearly_equal_scales_with_magnitude() {
        let tol = Tolerances::default();
        assert!(nearly_equal(1e9, 1e9 + 0.5, tol));
        assert!(!nearly_equal(1e9, 1e9 + 10.0, tol));
    }
}
