//! Camera for ray generation.
//!
//! The camera sits at `location` looking along `to`, with `up` orthogonal
//! to it and `right = to x up`. Rays are cast from the location through a
//! view plane of `width x height` placed `distance` along `to`.

use lumen_math::{DVec3, Point, Ray, Vector};

use crate::CameraError;

/// A pinhole camera with optional grid supersampling.
#[derive(Debug, Clone)]
pub struct Camera {
    location: Point,
    to: Vector,
    up: Vector,
    right: Vector,
    width: f64,
    height: f64,
    distance: f64,
    anti_aliasing: u32,
}

impl Camera {
    /// Start configuring a camera.
    pub fn builder() -> CameraBuilder {
        CameraBuilder::default()
    }

    /// Position rays are cast from.
    pub fn location(&self) -> Point {
        self.location
    }

    /// Forward direction (unit).
    pub fn to(&self) -> Vector {
        self.to
    }

    /// Up direction (unit).
    pub fn up(&self) -> Vector {
        self.up
    }

    /// Right direction (unit), `to x up`.
    pub fn right(&self) -> Vector {
        self.right
    }

    /// View plane `(width, height)`.
    pub fn view_plane_size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Distance from the location to the view plane.
    pub fn view_plane_distance(&self) -> f64 {
        self.distance
    }

    /// Samples per pixel along each axis.
    pub fn anti_aliasing(&self) -> u32 {
        self.anti_aliasing
    }

    /// Rays traced per pixel, `anti_aliasing` squared.
    pub fn samples_per_pixel(&self) -> u64 {
        u64::from(self.anti_aliasing).pow(2)
    }

    /// Centre of pixel `(j, i)` on the view plane for an `nx x ny` grid.
    ///
    /// Rows grow downwards while `up` points upwards, hence the negated
    /// vertical offset.
    fn pixel_center(&self, nx: u32, ny: u32, j: u32, i: u32) -> DVec3 {
        let center = self.location.as_dvec3() + self.to.as_dvec3() * self.distance;
        let pixel_width = self.width / nx as f64;
        let pixel_height = self.height / ny as f64;

        let x = (j as f64 - (nx as f64 - 1.0) / 2.0) * pixel_width;
        let y = -(i as f64 - (ny as f64 - 1.0) / 2.0) * pixel_height;
        center + self.right.as_dvec3() * x + self.up.as_dvec3() * y
    }

    fn ray_through(&self, target: DVec3) -> Ray {
        // The view plane is `distance > 0` in front of the camera, so the
        // direction is never zero; fall back to forward regardless.
        let direction = Vector::try_from_dvec3(target - self.location.as_dvec3()).unwrap_or(self.to);
        Ray::new(self.location, direction)
    }

    /// Ray through the centre of pixel `(j, i)` of an `nx x ny` image.
    ///
    /// `nx` and `ny` must be at least 1.
    pub fn construct_ray(&self, nx: u32, ny: u32, j: u32, i: u32) -> Ray {
        self.ray_through(self.pixel_center(nx, ny, j, i))
    }

    /// All sample rays for pixel `(j, i)`.
    ///
    /// The pixel is split into an `N x N` grid (`N` = anti-aliasing) and one
    /// ray passes through the centre of each cell, row by row. With `N = 1`
    /// this is the single [`construct_ray`](Self::construct_ray) ray.
    pub fn construct_rays(&self, nx: u32, ny: u32, j: u32, i: u32) -> Vec<Ray> {
        let n = self.anti_aliasing;
        if n <= 1 {
            return vec![self.construct_ray(nx, ny, j, i)];
        }

        let center = self.pixel_center(nx, ny, j, i);
        let cell_width = self.width / nx as f64 / n as f64;
        let cell_height = self.height / ny as f64 / n as f64;
        let half = (n as f64 - 1.0) / 2.0;
        let right = self.right.as_dvec3();
        let up = self.up.as_dvec3();

        (0..n)
            .flat_map(|row| (0..n).map(move |col| (row, col)))
            .map(|(row, col)| {
                let x = (col as f64 - half) * cell_width;
                let y = -(row as f64 - half) * cell_height;
                self.ray_through(center + right * x + up * y)
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy)]
enum Orientation {
    Directions { to: Vector, up: Vector },
    LookAt { target: Point, up: Vector },
}

/// Builder for [`Camera`].
///
/// Location defaults to the origin and anti-aliasing to one sample per
/// pixel. Directions, view plane size and distance have no defaults.
#[derive(Debug, Clone)]
pub struct CameraBuilder {
    location: Point,
    orientation: Option<Orientation>,
    width: f64,
    height: f64,
    distance: f64,
    anti_aliasing: u32,
}

impl Default for CameraBuilder {
    fn default() -> Self {
        Self {
            location: Point::ZERO,
            orientation: None,
            width: 0.0,
            height: 0.0,
            distance: 0.0,
            anti_aliasing: 1,
        }
    }
}

impl CameraBuilder {
    /// Set the camera position.
    pub fn location(mut self, location: Point) -> Self {
        self.location = location;
        self
    }

    /// Set forward and up directions; they must be orthogonal.
    pub fn direction(mut self, to: Vector, up: Vector) -> Self {
        self.orientation = Some(Orientation::Directions { to, up });
        self
    }

    /// Aim at `target`; `up` only needs to be roughly upwards and is
    /// orthogonalised against the forward direction.
    pub fn look_at(mut self, target: Point, up: Vector) -> Self {
        self.orientation = Some(Orientation::LookAt { target, up });
        self
    }

    /// Set the view plane size; both must be positive.
    pub fn view_plane_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the view plane distance; must be positive.
    pub fn view_plane_distance(mut self, distance: f64) -> Self {
        self.distance = distance;
        self
    }

    /// Samples per pixel along each axis (`n * n` rays per pixel).
    pub fn anti_aliasing(mut self, samples: u32) -> Self {
        self.anti_aliasing = samples;
        self
    }

    /// Validate the settings and derive the orthonormal basis.
    pub fn build(self) -> Result<Camera, CameraError> {
        let (to, up) = match self.orientation.ok_or(CameraError::MissingDirections)? {
            Orientation::Directions { to, up } => {
                let (to, up) = (to.normalize(), up.normalize());
                if !to.is_orthogonal(up) {
                    return Err(CameraError::NotOrthogonal);
                }
                (to, up)
            }
            Orientation::LookAt { target, up } => {
                let to = target.subtract(self.location)?.normalize();
                let right = to.cross(up)?;
                (to, right.cross(to)?.normalize())
            }
        };
        let right = to.cross(up)?.normalize();

        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(CameraError::InvalidViewPlaneSize {
                width: self.width,
                height: self.height,
            });
        }
        if !(self.distance > 0.0) {
            return Err(CameraError::InvalidViewPlaneDistance(self.distance));
        }
        if self.anti_aliasing == 0 {
            return Err(CameraError::InvalidSampleCount(self.anti_aliasing));
        }

        Ok(Camera {
            location: self.location,
            to,
            up,
            right,
            width: self.width,
            height: self.height,
            distance: self.distance,
            anti_aliasing: self.anti_aliasing,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_math::MathError;

    const TOLERANCE: f64 = 1e-9;

    fn base_builder() -> CameraBuilder {
        Camera::builder()
            .direction(Vector::NEG_Z, Vector::Y)
            .view_plane_size(2.0, 2.0)
            .view_plane_distance(10.0)
    }

    fn assert_direction(ray: &Ray, x: f64, y: f64, z: f64) {
        let expected = Vector::new(x, y, z).unwrap().normalize();
        let got = ray.direction();
        assert!(
            (got.as_dvec3() - expected.as_dvec3()).length() < TOLERANCE,
            "{got:?} != {expected:?}"
        );
    }

    #[test]
    fn test_camera_basis() {
        let camera = base_builder().build().unwrap();

        assert_eq!(camera.to(), Vector::NEG_Z);
        assert_eq!(camera.up(), Vector::Y);
        assert_eq!(camera.right(), Vector::X);
    }

    #[test]
    fn test_single_pixel_through_center() {
        let camera = base_builder().build().unwrap();
        let ray = camera.construct_ray(1, 1, 0, 0);

        assert_eq!(ray.head(), Point::ZERO);
        assert!(ray.point_at(10.0).distance(Point::new(0.0, 0.0, -10.0)) < TOLERANCE);
    }

    #[test]
    fn test_pixel_grid() {
        let camera = Camera::builder()
            .direction(Vector::NEG_Z, Vector::Y)
            .view_plane_size(3.0, 3.0)
            .view_plane_distance(1.0)
            .build()
            .unwrap();

        // centre, top-left corner, bottom-right corner, middle of the top row
        assert_direction(&camera.construct_ray(3, 3, 1, 1), 0.0, 0.0, -1.0);
        assert_direction(&camera.construct_ray(3, 3, 0, 0), -1.0, 1.0, -1.0);
        assert_direction(&camera.construct_ray(3, 3, 2, 2), 1.0, -1.0, -1.0);
        assert_direction(&camera.construct_ray(3, 3, 1, 0), 0.0, 1.0, -1.0);
    }

    #[test]
    fn test_even_grid_has_no_center_pixel() {
        let camera = Camera::builder()
            .direction(Vector::NEG_Z, Vector::Y)
            .view_plane_size(4.0, 4.0)
            .view_plane_distance(1.0)
            .build()
            .unwrap();

        // 4x4 pixels of size 1: centres sit at +-0.5 and +-1.5
        assert_direction(&camera.construct_ray(4, 4, 1, 1), -0.5, 0.5, -1.0);
        assert_direction(&camera.construct_ray(4, 4, 3, 0), 1.5, 1.5, -1.0);
    }

    #[test]
    fn test_anti_aliasing_sub_grid() {
        let camera = base_builder().anti_aliasing(2).build().unwrap();
        let rays = camera.construct_rays(1, 1, 0, 0);
        assert_eq!(rays.len(), 4);

        // row by row from the top-left cell
        assert_direction(&rays[0], -0.5, 0.5, -10.0);
        assert_direction(&rays[1], 0.5, 0.5, -10.0);
        assert_direction(&rays[2], -0.5, -0.5, -10.0);
        assert_direction(&rays[3], 0.5, -0.5, -10.0);
        assert!(rays.iter().all(|r| r.head() == Point::ZERO));
    }

    #[test]
    fn test_no_anti_aliasing_single_ray() {
        let camera = base_builder().build().unwrap();
        let rays = camera.construct_rays(4, 4, 2, 1);
        assert_eq!(rays, vec![camera.construct_ray(4, 4, 2, 1)]);
    }

    #[test]
    fn test_orthogonality_ignores_scale() {
        // tiny but 45 degrees apart
        let skewed = base_builder().direction(
            Vector::new(1e-6, 0.0, 0.0).unwrap(),
            Vector::new(1e-6, 1e-6, 0.0).unwrap(),
        );
        assert_eq!(skewed.build().unwrap_err(), CameraError::NotOrthogonal);

        // huge and orthogonal to within rounding
        let camera = base_builder()
            .direction(
                Vector::new(0.0, 0.0, -1000.0).unwrap(),
                Vector::new(0.0, 1000.0, 1e-8).unwrap(),
            )
            .build()
            .unwrap();
        assert_eq!(camera.to(), Vector::NEG_Z);
        assert!(camera.to().is_orthogonal(camera.up()));
        assert!((camera.up().length() - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_samples_per_pixel_does_not_overflow() {
        assert_eq!(base_builder().build().unwrap().samples_per_pixel(), 1);
        assert_eq!(base_builder().anti_aliasing(3).build().unwrap().samples_per_pixel(), 9);

        let dense = base_builder().anti_aliasing(70_000).build().unwrap();
        assert_eq!(dense.samples_per_pixel(), 4_900_000_000);
    }

    #[test]
    fn test_look_at() {
        let camera = Camera::builder()
            .location(Point::new(0.0, 0.0, 10.0))
            .look_at(Point::ZERO, Vector::new(0.0, 1.0, 0.5).unwrap())
            .view_plane_size(1.0, 1.0)
            .view_plane_distance(1.0)
            .build()
            .unwrap();

        assert_eq!(camera.to(), Vector::NEG_Z);
        assert!((camera.up().as_dvec3() - Vector::Y.as_dvec3()).length() < TOLERANCE);
        assert!((camera.right().as_dvec3() - Vector::X.as_dvec3()).length() < TOLERANCE);
    }

    #[test]
    fn test_invalid_cameras() {
        assert_eq!(
            Camera::builder().view_plane_size(1.0, 1.0).view_plane_distance(1.0).build().unwrap_err(),
            CameraError::MissingDirections
        );

        let skewed = base_builder().direction(Vector::NEG_Z, Vector::new(0.0, 1.0, 1.0).unwrap());
        assert_eq!(skewed.build().unwrap_err(), CameraError::NotOrthogonal);

        assert_eq!(
            base_builder().view_plane_size(0.0, 2.0).build().unwrap_err(),
            CameraError::InvalidViewPlaneSize { width: 0.0, height: 2.0 }
        );
        assert_eq!(
            base_builder().view_plane_distance(-1.0).build().unwrap_err(),
            CameraError::InvalidViewPlaneDistance(-1.0)
        );
        assert_eq!(
            base_builder().anti_aliasing(0).build().unwrap_err(),
            CameraError::InvalidSampleCount(0)
        );

        // looking at itself
        let at_self = base_builder().look_at(Point::ZERO, Vector::Y);
        assert_eq!(
            at_self.build().unwrap_err(),
            CameraError::Math(MathError::ZeroVector)
        );
    }
}
