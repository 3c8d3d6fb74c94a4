use std::ops::{Add, Mul};

use glam::DVec3;

/// A per-channel (red, green, blue) attenuation factor.
///
/// Used for material coefficients (kA, kD, kS, kT, kR) and for the running
/// attenuation product of recursive rays.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Coefficient {
    k: DVec3,
}

impl Coefficient {
    pub const ZERO: Coefficient = Coefficient::splat(0.0);
    pub const ONE: Coefficient = Coefficient::splat(1.0);

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self {
            k: DVec3::new(r, g, b),
        }
    }

    pub const fn splat(k: f64) -> Self {
        Self::new(k, k, k)
    }

    #[inline]
    pub fn as_dvec3(&self) -> DVec3 {
        self.k
    }

    /// True when every channel is below `k`.
    pub fn lower_than(&self, k: f64) -> bool {
        self.k.max_element() < k
    }

    /// True when every channel is a number no lower than zero.
    pub fn is_non_negative(&self) -> bool {
        self.k.cmpge(DVec3::ZERO).all()
    }

    /// True when every channel is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.k == DVec3::ZERO
    }
}

impl From<f64> for Coefficient {
    fn from(k: f64) -> Self {
        Self::splat(k)
    }
}

impl From<[f64; 3]> for Coefficient {
    fn from(a: [f64; 3]) -> Self {
        Self::new(a[0], a[1], a[2])
    }
}

impl Add for Coefficient {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self { k: self.k + rhs.k }
    }
}

/// Multiply the corresponding channels together
impl Mul for Coefficient {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self { k: self.k * rhs.k }
    }
}

impl Mul<f64> for Coefficient {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Self { k: self.k * rhs }
    }
}
