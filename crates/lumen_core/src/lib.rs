//! Lumen Core - scene description for the Lumen ray tracer.
//!
//! This crate provides:
//!
//! - **Geometry**: `Plane`, `Sphere`, `Triangle`, `Polygon`, `Tube`,
//!   `Cylinder`, all sharing the [`Intersectable`] / [`Geometry`] contract
//! - **Aggregation**: [`Geometries`], a composite that can nest
//! - **Shading inputs**: [`Material`] and the light sources
//! - **Scene**: the immutable bundle the renderer reads
//!
//! # Example
//!
//! ```
//! use lumen_core::{Material, PointLight, Scene, Sphere, SurfaceBuilder};
//! use lumen_math::{Color, Point};
//!
//! let sphere = Sphere::new(Point::new(0.0, 0.0, -50.0), 10.0)?
//!     .with_emission(Color::new(0.2, 0.0, 0.0)?)
//!     .with_material(Material::new().with_kd(0.5).with_ks(0.5).with_shininess(30));
//!
//! let scene = Scene::builder("single sphere")
//!     .geometry(sphere)
//!     .light(PointLight::new(Color::WHITE, Point::new(-50.0, 50.0, 0.0)).with_kl(0.0001))
//!     .build();
//! assert_eq!(scene.lights().len(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use thiserror::Error;

mod cylinder;
mod geometries;
mod intersectable;
mod light;
mod material;
mod plane;
mod polygon;
mod scene;
mod sphere;
mod triangle;
mod tube;

pub use cylinder::Cylinder;
pub use geometries::Geometries;
pub use intersectable::{GeoPoint, Geometry, Intersectable, Surface, SurfaceBuilder};
pub use light::{AmbientLight, DirectionalLight, LightSource, PointLight, SpotLight};
pub use material::Material;
pub use plane::Plane;
pub use polygon::Polygon;
pub use scene::{Scene, SceneBuilder};
pub use sphere::Sphere;
pub use triangle::Triangle;
pub use tube::Tube;

/// Errors raised when a primitive is built from invalid parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("a polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),

    #[error("consecutive vertices coincide")]
    CoincidentVertices,

    #[error("vertices are collinear")]
    CollinearVertices,

    #[error("vertices do not lie in the same plane")]
    NotCoplanar,

    #[error("vertices do not form a convex polygon with consistent winding")]
    NotConvex,

    #[error("radius must be positive, got {0}")]
    NonPositiveRadius(f64),

    #[error("height must be positive, got {0}")]
    NonPositiveHeight(f64),
}
