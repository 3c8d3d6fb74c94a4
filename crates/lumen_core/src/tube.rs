//! Infinite cylindrical surface around an axis ray.

use lumen_math::{align_zero, is_zero, DVec3, Point, Ray, Vector};

use crate::intersectable::{within, GeoPoint, Geometry, Intersectable, Surface, SurfaceBuilder};
use crate::GeometryError;

/// An infinite tube: all points at distance `radius` from the axis line.
///
/// The axis is a [`Ray`], but the surface extends both ways along it.
#[derive(Debug, Clone)]
pub struct Tube {
    axis: Ray,
    radius: f64,
    surface: Surface,
}

impl Tube {
    /// Create a new tube. The radius must be positive.
    pub fn new(axis: Ray, radius: f64) -> Result<Self, GeometryError> {
        if !(radius > 0.0) {
            return Err(GeometryError::NonPositiveRadius(radius));
        }
        Ok(Self {
            axis,
            radius,
            surface: Surface::default(),
        })
    }

    /// Axis ray; its direction is unit length.
    pub fn axis(&self) -> &Ray {
        &self.axis
    }

    /// Radius of the tube.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Signed distance of `point` along the axis from the axis head.
    pub(crate) fn axis_projection(&self, point: Point) -> f64 {
        let offset = point.as_dvec3() - self.axis.head().as_dvec3();
        align_zero(offset.dot(self.axis.direction().as_dvec3()))
    }

    /// Ray parameters of the tube hits in front of the ray head, nearest first.
    ///
    /// Both the ray direction and the head offset are projected onto the plane
    /// perpendicular to the axis, which leaves a 2D circle test.
    pub(crate) fn intersection_parameters(&self, ray: &Ray) -> Vec<f64> {
        let va = self.axis.direction().as_dvec3();
        let perpendicular = |v: DVec3| v - va * v.dot(va);

        let v = perpendicular(ray.direction().as_dvec3());
        let a = v.length_squared();
        // Parallel to the axis: never crosses the surface
        if is_zero(a) {
            return Vec::new();
        }

        let dp = perpendicular(ray.head().as_dvec3() - self.axis.head().as_dvec3());
        let b = 2.0 * v.dot(dp);
        let c = dp.length_squared() - self.radius * self.radius;

        let discriminant = align_zero(b * b - 4.0 * a * c);
        if discriminant <= 0.0 {
            return Vec::new();
        }

        let root = discriminant.sqrt();
        [(-b - root) / (2.0 * a), (-b + root) / (2.0 * a)]
            .into_iter()
            .map(align_zero)
            .filter(|&t| t > 0.0)
            .collect()
    }
}

impl Intersectable for Tube {
    fn intersect_within(&self, ray: &Ray, max_distance: f64) -> Vec<GeoPoint<'_>> {
        self.intersection_parameters(ray)
            .into_iter()
            .filter(|&t| within(t, max_distance))
            .map(|t| GeoPoint::new(self, ray.point_at(t)))
            .collect()
    }
}

impl Geometry for Tube {
    fn normal(&self, point: Point) -> Vector {
        let t = if point == self.axis.head() {
            0.0
        } else {
            self.axis_projection(point)
        };
        let on_axis = self.axis.point_at(t);

        // A point on the axis itself has no radial direction
        point
            .subtract(on_axis)
            .map(|v| v.normalize())
            .unwrap_or_else(|_| self.axis.direction().any_orthonormal())
    }

    fn surface(&self) -> &Surface {
        &self.surface
    }
}

impl SurfaceBuilder for Tube {
    fn surface_mut(&mut self) -> &mut Surface {
        &mut self.surface
    }
}
