//! Infinite plane primitive.

use lumen_math::{align_zero, DVec3, Point, Ray, Vector};

use crate::intersectable::{within, GeoPoint, Geometry, Intersectable, Surface, SurfaceBuilder};
use crate::GeometryError;

/// A plane given by a reference point and a unit normal.
#[derive(Debug, Clone)]
pub struct Plane {
    point: Point,
    normal: Vector,
    surface: Surface,
}

impl Plane {
    /// Create a plane through `point`; `normal` is normalized.
    pub fn new(point: Point, normal: Vector) -> Self {
        Self {
            point,
            normal: normal.normalize(),
            surface: Surface::default(),
        }
    }

    /// Create the plane through three points.
    ///
    /// The normal follows the winding `p1 -> p2 -> p3` (right-hand rule).
    pub fn from_points(p1: Point, p2: Point, p3: Point) -> Result<Self, GeometryError> {
        let v1 = p2.subtract(p1).map_err(|_| GeometryError::CoincidentVertices)?;
        let v2 = p3.subtract(p1).map_err(|_| GeometryError::CoincidentVertices)?;
        let normal = v1.cross(v2).map_err(|_| GeometryError::CollinearVertices)?;
        Ok(Self::new(p1, normal))
    }

    /// A point on the plane.
    pub fn point(&self) -> Point {
        self.point
    }

    /// The unit normal fixed at construction.
    pub fn normal_vector(&self) -> Vector {
        self.normal
    }

    /// Distance along `ray` to the plane.
    ///
    /// `None` when the ray is parallel to the plane, starts on it, or the
    /// plane is behind it.
    pub(crate) fn intersection_parameter(&self, ray: &Ray) -> Option<f64> {
        let n = self.normal.as_dvec3();
        let nv = align_zero(n.dot(ray.direction().as_dvec3()));
        if nv == 0.0 {
            return None;
        }

        let to_plane = self.point.as_dvec3() - ray.head().as_dvec3();
        if to_plane == DVec3::ZERO {
            return None;
        }

        let t = align_zero(n.dot(to_plane) / nv);
        (t > 0.0).then_some(t)
    }
}

impl Intersectable for Plane {
    fn intersect_within(&self, ray: &Ray, max_distance: f64) -> Vec<GeoPoint<'_>> {
        match self.intersection_parameter(ray) {
            Some(t) if within(t, max_distance) => vec![GeoPoint::new(self, ray.point_at(t))],
            _ => Vec::new(),
        }
    }
}

impl Geometry for Plane {
    fn normal(&self, _point: Point) -> Vector {
        self.normal
    }

    fn surface(&self) -> &Surface {
        &self.surface
    }
}

impl SurfaceBuilder for Plane {
    fn surface_mut(&mut self) -> &mut Surface {
        &mut self.surface
    }
}
