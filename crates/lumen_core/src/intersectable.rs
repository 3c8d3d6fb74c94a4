//! Intersection contract shared by primitives and aggregates.

use std::fmt::Debug;

use lumen_math::{align_zero, Color, Point, Ray, Vector};

use crate::Material;

/// An intersection point tagged with the geometry it lies on.
///
/// The geometry is borrowed, never owned: it lives in the scene's
/// [`Geometries`](crate::Geometries) for as long as the hit is in use.
#[derive(Clone, Copy, Debug)]
pub struct GeoPoint<'a> {
    pub geometry: &'a dyn Geometry,
    pub point: Point,
}

impl<'a> GeoPoint<'a> {
    pub fn new(geometry: &'a dyn Geometry, point: Point) -> Self {
        Self { geometry, point }
    }

    /// Surface normal at the hit point.
    pub fn normal(&self) -> Vector {
        self.geometry.normal(self.point)
    }

    pub fn material(&self) -> &'a Material {
        self.geometry.material()
    }
}

/// Two hits are equal when they are at the same point on the same object.
impl PartialEq for GeoPoint<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.point == other.point && std::ptr::addr_eq(self.geometry, other.geometry)
    }
}

/// Anything a ray can be tested against.
pub trait Intersectable: Send + Sync + Debug {
    /// All hits with `0 < t <= max_distance`. No hit is an empty vector.
    fn intersect_within(&self, ray: &Ray, max_distance: f64) -> Vec<GeoPoint<'_>>;

    /// All hits in front of the ray head.
    fn intersect(&self, ray: &Ray) -> Vec<GeoPoint<'_>> {
        self.intersect_within(ray, f64::INFINITY)
    }

    /// Hit positions only.
    fn intersect_points(&self, ray: &Ray) -> Vec<Point> {
        self.intersect(ray).into_iter().map(|gp| gp.point).collect()
    }
}

/// A shaded primitive.
pub trait Geometry: Intersectable {
    /// Unit normal at a point on the surface.
    fn normal(&self, point: Point) -> Vector;

    fn surface(&self) -> &Surface;

    fn emission(&self) -> Color {
        self.surface().emission
    }

    fn material(&self) -> &Material {
        &self.surface().material
    }
}

/// Self-emission and material of a primitive.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Surface {
    pub emission: Color,
    pub material: Material,
}

/// Fluent surface setters for primitives.
pub trait SurfaceBuilder: Sized {
    fn surface_mut(&mut self) -> &mut Surface;

    fn with_emission(mut self, emission: Color) -> Self {
        self.surface_mut().emission = emission;
        self
    }

    fn with_material(mut self, material: Material) -> Self {
        self.surface_mut().material = material;
        self
    }
}

/// Ray parameter acceptance: strictly in front of the head, not past `max_distance`.
#[inline]
pub(crate) fn within(t: f64, max_distance: f64) -> bool {
    t > 0.0 && align_zero(t - max_distance) <= 0.0
}
