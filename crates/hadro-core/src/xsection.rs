//! Cross-section data
//!
//! Engines report cross sections with very different granularity. Components
//! a backend does not report are `NaN`, never zero: a zero is a physics
//! statement, an absent number is not.

/// Cross-section components in millibarn for one kinematics setup
#[derive(Clone, Copy, Debug)]
pub struct CrossSection {
    pub total: f64,
    pub elastic: f64,
    pub inelastic: f64,
    /// Single dissociation, projectile side (X + b)
    pub diffractive_xb: f64,
    /// Single dissociation, target side (a + X)
    pub diffractive_ax: f64,
    /// Double dissociation (X + X)
    pub diffractive_xx: f64,
    /// Central diffraction (a + X + b)
    pub diffractive_axb: f64,
    pub non_diffractive: f64,
}

impl Default for CrossSection {
    fn default() -> Self {
        CrossSection {
            total: f64::NAN,
            elastic: f64::NAN,
            inelastic: f64::NAN,
            diffractive_xb: f64::NAN,
            diffractive_ax: f64::NAN,
            diffractive_xx: f64::NAN,
            diffractive_axb: f64::NAN,
            non_diffractive: f64::NAN,
        }
    }
}

impl CrossSection {
    /// Sum of the reported diffractive channels, absent channels counted as 0
    pub fn diffractive_sum(&self) -> f64 {
        [
            self.diffractive_xb,
            self.diffractive_ax,
            self.diffractive_xx,
            self.diffractive_axb,
        ]
        .iter()
        .filter(|c| !c.is_nan())
        .sum()
    }

    /// Fill `non_diffractive` from `inelastic - diffractive_sum` when the
    /// backend reports the pieces but not the remainder.
    pub fn with_derived_non_diffractive(mut self) -> Self {
        if self.non_diffractive.is_nan() && !self.inelastic.is_nan() {
            self.non_diffractive = self.inelastic - self.diffractive_sum();
        }
        self
    }

    /// Check the inelastic breakdown identity within `tol` millibarn.
    ///
    /// `inelastic == xb + ax + xx + axb + non_diffractive` is a property of
    /// the backend's numbers; this layer only verifies, never repairs.
    pub fn breakdown_consistent(&self, tol: f64) -> bool {
        if self.inelastic.is_nan() || self.non_diffractive.is_nan() {
            return false;
        }
        (self.inelastic - self.diffractive_sum() - self.non_diffractive).abs() <= tol
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_pp() -> CrossSection {
        CrossSection {
            total: 38.2,
            elastic: 7.4,
            inelastic: 30.7,
            diffractive_xb: 1.6,
            diffractive_ax: 1.6,
            diffractive_xx: 9.9,
            diffractive_axb: 0.0,
            non_diffractive: f64::NAN,
        }
    }

    #[test]
    fn test_unreported_components_are_nan() {
        let xs = CrossSection::default();
        assert!(xs.total.is_nan());
        assert!(xs.non_diffractive.is_nan());
        assert_eq!(xs.diffractive_sum(), 0.0);
    }

    #[test]
    fn test_derived_non_diffractive() {
        let xs = reference_pp().with_derived_non_diffractive();
        assert!((xs.non_diffractive - 17.6).abs() < 1e-9);
        assert!(xs.breakdown_consistent(1e-9));
    }

    #[test]
    fn test_breakdown_inconsistency_detected() {
        let mut xs = reference_pp().with_derived_non_diffractive();
        xs.non_diffractive += 0.5;
        assert!(!xs.breakdown_consistent(1e-3));
        assert!(xs.breakdown_consistent(1.0));
    }

    #[test]
    fn test_derivation_keeps_reported_value() {
        let mut xs = reference_pp();
        xs.non_diffractive = 17.0;
        let xs = xs.with_derived_non_diffractive();
        assert_eq!(xs.non_diffractive, 17.0);
    }
}
