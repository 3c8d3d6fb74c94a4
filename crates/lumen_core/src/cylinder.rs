//! Finite capped cylinder.

use lumen_math::{align_zero, is_zero, Point, Ray, Vector};

use crate::intersectable::{within, GeoPoint, Geometry, Intersectable, Surface, SurfaceBuilder};
use crate::{GeometryError, Plane, Tube};

/// A [`Tube`] cut to `height` along its axis and closed by two disks.
///
/// The bottom disk is centred on the axis head, the top disk `height`
/// further along the axis direction.
#[derive(Debug, Clone)]
pub struct Cylinder {
    tube: Tube,
    height: f64,
    bottom: Plane,
    top: Plane,
}

impl Cylinder {
    /// Create a new cylinder. Radius and height must be positive.
    pub fn new(axis: Ray, radius: f64, height: f64) -> Result<Self, GeometryError> {
        if !(height > 0.0) {
            return Err(GeometryError::NonPositiveHeight(height));
        }

        let tube = Tube::new(axis, radius)?;
        let direction = axis.direction();
        let bottom = Plane::new(axis.head(), -direction);
        let top = Plane::new(axis.point_at(height), direction);

        Ok(Self {
            tube,
            height,
            bottom,
            top,
        })
    }

    /// Axis ray, starting at the centre of the bottom cap.
    pub fn axis(&self) -> &Ray {
        self.tube.axis()
    }

    /// Radius of the cylinder.
    pub fn radius(&self) -> f64 {
        self.tube.radius()
    }

    /// Distance between the caps along the axis.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Tube hits strictly between the caps.
    fn side_parameters(&self, ray: &Ray) -> Vec<f64> {
        let mut params = self.tube.intersection_parameters(ray);
        params.retain(|&t| {
            let along = self.tube.axis_projection(ray.point_at(t));
            along > 0.0 && align_zero(along - self.height) < 0.0
        });
        params
    }

    /// Cap plane hits strictly inside the disk rim.
    fn cap_parameter(&self, cap: &Plane, ray: &Ray) -> Option<f64> {
        let t = cap.intersection_parameter(ray)?;
        let radius = self.tube.radius();
        let d_squared = ray.point_at(t).distance_squared(cap.point());
        (align_zero(d_squared - radius * radius) < 0.0).then_some(t)
    }
}

impl Intersectable for Cylinder {
    fn intersect_within(&self, ray: &Ray, max_distance: f64) -> Vec<GeoPoint<'_>> {
        let mut params: Vec<f64> = self
            .side_parameters(ray)
            .into_iter()
            .chain(self.cap_parameter(&self.bottom, ray))
            .chain(self.cap_parameter(&self.top, ray))
            .filter(|&t| within(t, max_distance))
            .collect();
        params.sort_by(f64::total_cmp);

        params
            .into_iter()
            .map(|t| GeoPoint::new(self, ray.point_at(t)))
            .collect()
    }
}

impl Geometry for Cylinder {
    fn normal(&self, point: Point) -> Vector {
        let along = self.tube.axis_projection(point);
        if is_zero(along) {
            self.bottom.normal_vector()
        } else if is_zero(along - self.height) {
            self.top.normal_vector()
        } else {
            self.tube.normal(point)
        }
    }

    fn surface(&self) -> &Surface {
        self.tube.surface()
    }
}

impl SurfaceBuilder for Cylinder {
    fn surface_mut(&mut self) -> &mut Surface {
        self.tube.surface_mut()
    }
}
