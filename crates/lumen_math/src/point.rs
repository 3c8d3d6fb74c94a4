use std::ops::Add;

use glam::DVec3;

use crate::{MathError, Vector};

/// A position in 3D space.
///
/// Equality is exact component comparison.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Point {
    xyz: DVec3,
}

impl Point {
    /// The origin.
    pub const ZERO: Point = Point::new(0.0, 0.0, 0.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            xyz: DVec3::new(x, y, z),
        }
    }

    pub const fn from_dvec3(xyz: DVec3) -> Self {
        Self { xyz }
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

    /// Raw coordinates, for closed-form geometry code.
    #[inline]
    pub fn as_dvec3(&self) -> DVec3 {
        self.xyz
    }

    /// The displacement from `other` to `self`.
    ///
    /// Fails with [`MathError::ZeroVector`] when the points coincide.
    pub fn subtract(&self, other: Point) -> Result<Vector, MathError> {
        Vector::try_from_dvec3(self.xyz - other.xyz)
    }

    pub fn distance_squared(&self, other: Point) -> f64 {
        self.xyz.distance_squared(other.xyz)
    }

    pub fn distance(&self, other: Point) -> f64 {
        self.xyz.distance(other.xyz)
    }
}

impl Add<Vector> for Point {
    type Output = Point;

    fn add(self, rhs: Vector) -> Self::Output {
        Point::from_dvec3(self.xyz + rhs.as_dvec3())
    }
}

impl From<[f64; 3]> for Point {
    fn from(a: [f64; 3]) -> Self {
        Self::new(a[0], a[1], a[2])
    }
}
