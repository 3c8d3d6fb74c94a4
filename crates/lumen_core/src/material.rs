//! Phong material with reflection and transparency coefficients.

use lumen_math::Coefficient;

/// Surface response coefficients used by the shading model.
///
/// Built fluently from [`Material::new`], which starts from a black,
/// opaque, non-reflective surface that still receives full ambient light.
/// Every coefficient must be non-negative; debug builds panic otherwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Ambient attenuation
    pub ka: Coefficient,
    /// Diffuse reflection
    pub kd: Coefficient,
    /// Specular reflection
    pub ks: Coefficient,
    /// Transparency (0 = opaque)
    pub kt: Coefficient,
    /// Mirror reflectivity (0 = non-reflective)
    pub kr: Coefficient,
    /// Phong exponent
    pub shininess: u32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ka: Coefficient::ONE,
            kd: Coefficient::ZERO,
            ks: Coefficient::ZERO,
            kt: Coefficient::ZERO,
            kr: Coefficient::ZERO,
            shininess: 0,
        }
    }
}

impl Material {
    /// A black, opaque material with full ambient response.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the ambient attenuation.
    pub fn with_ka(mut self, ka: impl Into<Coefficient>) -> Self {
        self.ka = checked(ka.into());
        self
    }

    /// Set the diffuse coefficient.
    pub fn with_kd(mut self, kd: impl Into<Coefficient>) -> Self {
        self.kd = checked(kd.into());
        self
    }

    /// Set the specular coefficient.
    pub fn with_ks(mut self, ks: impl Into<Coefficient>) -> Self {
        self.ks = checked(ks.into());
        self
    }

    /// Set the transparency.
    pub fn with_kt(mut self, kt: impl Into<Coefficient>) -> Self {
        self.kt = checked(kt.into());
        self
    }

    /// Set the mirror reflectivity.
    pub fn with_kr(mut self, kr: impl Into<Coefficient>) -> Self {
        self.kr = checked(kr.into());
        self
    }

    /// Set the Phong exponent.
    pub fn with_shininess(mut self, shininess: u32) -> Self {
        self.shininess = shininess;
        self
    }
}

/// Coefficients scale colors, so a negative or NaN channel would produce
/// a negative intensity.
pub(crate) fn checked(k: Coefficient) -> Coefficient {
    debug_assert!(k.is_non_negative(), "coefficient must be non-negative, got {k:?}");
    k
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_material() {
        let m = Material::new();
        assert_eq!(m.ka, Coefficient::ONE);
        assert!(m.kd.is_zero());
        assert!(m.ks.is_zero());
        assert!(m.kt.is_zero());
        assert!(m.kr.is_zero());
        assert_eq!(m.shininess, 0);
    }

    #[test]
    fn test_builder_chain() {
        let m = Material::new()
            .with_kd(0.4)
            .with_ks([0.1, 0.2, 0.3])
            .with_kr(Coefficient::splat(0.5))
            .with_shininess(100);

        assert_eq!(m.kd, Coefficient::splat(0.4));
        assert_eq!(m.ks, Coefficient::new(0.1, 0.2, 0.3));
        assert_eq!(m.kr, Coefficient::splat(0.5));
        assert!(m.kt.is_zero());
        assert_eq!(m.shininess, 100);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "coefficient must be non-negative")]
    fn test_negative_coefficient_panics() {
        let _ = Material::new().with_kd(-0.5);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "coefficient must be non-negative")]
    fn test_nan_coefficient_panics() {
        let _ = Material::new().with_kr([0.2, f64::NAN, 0.2]);
    }
}
