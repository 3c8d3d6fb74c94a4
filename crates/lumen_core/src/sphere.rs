//! Sphere primitive for ray tracing.

use lumen_math::{align_zero, Point, Ray, Vector};

use crate::intersectable::{within, GeoPoint, Geometry, Intersectable, Surface, SurfaceBuilder};
use crate::GeometryError;

/// A sphere primitive.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Point,
    radius: f64,
    surface: Surface,
}

impl Sphere {
    /// Create a new sphere. The radius must be positive.
    pub fn new(center: Point, radius: f64) -> Result<Self, GeometryError> {
        if !(radius > 0.0) {
            return Err(GeometryError::NonPositiveRadius(radius));
        }
        Ok(Self {
            center,
            radius,
            surface: Surface::default(),
        })
    }

    /// Centre of the sphere.
    pub fn center(&self) -> Point {
        self.center
    }

    /// Radius of the sphere.
    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Intersectable for Sphere {
    fn intersect_within(&self, ray: &Ray, max_distance: f64) -> Vec<GeoPoint<'_>> {
        let head = ray.head();
        let dir = ray.direction().as_dvec3();

        // From the center every direction leaves through the surface at t = r
        if head == self.center {
            return if within(self.radius, max_distance) {
                vec![GeoPoint::new(self, ray.point_at(self.radius))]
            } else {
                Vec::new()
            };
        }

        let u = self.center.as_dvec3() - head.as_dvec3();
        let tm = dir.dot(u);
        let d_squared = u.length_squared() - tm * tm;
        let th_squared = align_zero(self.radius * self.radius - d_squared);
        // Tangent rays graze the surface without entering it
        if th_squared <= 0.0 {
            return Vec::new();
        }

        let th = th_squared.sqrt();
        let t2 = align_zero(tm + th);
        if t2 <= 0.0 {
            return Vec::new();
        }
        let t1 = align_zero(tm - th);

        [t1, t2]
            .into_iter()
            .filter(|&t| within(t, max_distance))
            .map(|t| GeoPoint::new(self, ray.point_at(t)))
            .collect()
    }
}

impl Geometry for Sphere {
    fn normal(&self, point: Point) -> Vector {
        point
            .subtract(self.center)
            .map(|v| v.normalize())
            .unwrap_or(Vector::Z)
    }

    fn surface(&self) -> &Surface {
        &self.surface
    }
}

impl SurfaceBuilder for Sphere {
    fn surface_mut(&mut self) -> &mut Surface {
        &mut self.surface
    }
}
