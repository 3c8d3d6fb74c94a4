use std::ops::Neg;

use glam::DVec3;

use crate::{is_zero, MathError};

/// A non-zero displacement in 3D space.
///
/// The zero vector cannot be constructed: every constructor and every
/// operation that could produce it returns [`MathError::ZeroVector`]
/// instead. Components are always finite.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Vector {
    xyz: DVec3,
}

impl Vector {
    pub const X: Vector = Vector { xyz: DVec3::X };
    pub const Y: Vector = Vector { xyz: DVec3::Y };
    pub const Z: Vector = Vector { xyz: DVec3::Z };
    pub const NEG_X: Vector = Vector { xyz: DVec3::NEG_X };
    pub const NEG_Y: Vector = Vector { xyz: DVec3::NEG_Y };
    pub const NEG_Z: Vector = Vector { xyz: DVec3::NEG_Z };

    /// # Example
    /// ```
    /// # use lumen_math::{MathError, Vector};
    /// assert!(Vector::new(1.0, 0.0, 0.0).is_ok());
    /// assert_eq!(Vector::new(0.0, 0.0, 0.0), Err(MathError::ZeroVector));
    /// ```
    pub fn new(x: f64, y: f64, z: f64) -> Result<Self, MathError> {
        Self::try_from_dvec3(DVec3::new(x, y, z))
    }

    /// Fails for the zero vector and for NaN or infinite components.
    pub fn try_from_dvec3(xyz: DVec3) -> Result<Self, MathError> {
        if !xyz.is_finite() {
            return Err(MathError::NonFiniteVector);
        }
        if xyz == DVec3::ZERO {
            return Err(MathError::ZeroVector);
        }
        Ok(Self { xyz })
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.xyz.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.xyz.y
    }

    #[inline]
    pub fn z(&self) -> f64 {
        self.xyz.z
    }

    #[inline]
    pub fn as_dvec3(&self) -> DVec3 {
        self.xyz
    }

    /// Squared length; cheaper than [`length`](Self::length).
    pub fn length_squared(&self) -> f64 {
        self.xyz.length_squared()
    }

    /// Euclidean length, always positive.
    pub fn length(&self) -> f64 {
        self.xyz.length()
    }

    /// # Example
    /// ```
    /// # use lumen_math::Vector;
    /// let a = Vector::new(4.0, 8.0, 10.0).unwrap();
    /// let b = Vector::new(9.0, 2.0, 7.0).unwrap();
    /// assert_eq!(a.dot(b), 122.0);
    /// ```
    pub fn dot(&self, rhs: Vector) -> f64 {
        self.xyz.dot(rhs.xyz)
    }

    /// Fails when the vectors are parallel.
    pub fn cross(&self, rhs: Vector) -> Result<Vector, MathError> {
        Self::try_from_dvec3(self.xyz.cross(rhs.xyz))
    }

    /// Fails when `rhs` cancels `self` out.
    pub fn add(&self, rhs: Vector) -> Result<Vector, MathError> {
        Self::try_from_dvec3(self.xyz + rhs.xyz)
    }

    /// Fails when `k` is zero.
    pub fn scale(&self, k: f64) -> Result<Vector, MathError> {
        Self::try_from_dvec3(self.xyz * k)
    }

    /// The unit vector pointing the same way.
    ///
    /// Scaled down by the largest component first, so the length cannot
    /// overflow or underflow.
    pub fn normalize(&self) -> Vector {
        let scaled = self.xyz / self.xyz.abs().max_element();
        Self {
            xyz: scaled / scaled.length(),
        }
    }

    /// Mirrors `self` about a unit-length `normal`. The length of `self` is
    /// preserved, so the result is never zero.
    pub fn reflect(&self, normal: Vector) -> Vector {
        let n = normal.xyz;
        Self {
            xyz: self.xyz - n * (2.0 * self.xyz.dot(n)),
        }
    }

    /// A unit vector perpendicular to `self`.
    pub fn any_orthonormal(&self) -> Vector {
        Self {
            xyz: self.normalize().xyz.any_orthonormal_vector(),
        }
    }

    /// True when the dot product is within `EPSILON` of zero.
    pub fn is_orthogonal(&self, other: Vector) -> bool {
        is_zero(self.dot(other))
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Self::Output {
        Self { xyz: -self.xyz }
    }
}

impl TryFrom<[f64; 3]> for Vector {
    type Error = MathError;

    fn try_from(a: [f64; 3]) -> Result<Self, Self::Error> {
        Self::new(a[0], a[1], a[2])
    }
}
