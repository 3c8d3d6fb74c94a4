//! Triangle primitive for ray tracing.

use lumen_math::{Point, Ray, Vector};

use crate::intersectable::{within, GeoPoint, Geometry, Intersectable, Surface, SurfaceBuilder};
use crate::{GeometryError, Polygon};

/// A triangle: the three-vertex case of [`Polygon`].
///
/// Intersection is the supporting plane test followed by the three edge
/// sign tests; edges and vertices are excluded.
#[derive(Debug, Clone)]
pub struct Triangle {
    polygon: Polygon,
}

impl Triangle {
    /// Create a new triangle. Fails for coincident or collinear vertices.
    pub fn new(v0: Point, v1: Point, v2: Point) -> Result<Self, GeometryError> {
        Ok(Self {
            polygon: Polygon::new(vec![v0, v1, v2])?,
        })
    }

    /// The three vertices in winding order.
    pub fn vertices(&self) -> [Point; 3] {
        let v = self.polygon.vertices();
        [v[0], v[1], v[2]]
    }
}

impl Intersectable for Triangle {
    fn intersect_within(&self, ray: &Ray, max_distance: f64) -> Vec<GeoPoint<'_>> {
        match self.polygon.intersection_parameter(ray) {
            Some(t) if within(t, max_distance) => vec![GeoPoint::new(self, ray.point_at(t))],
            _ => Vec::new(),
        }
    }
}

impl Geometry for Triangle {
    fn normal(&self, point: Point) -> Vector {
        self.polygon.normal(point)
    }

    fn surface(&self) -> &Surface {
        self.polygon.surface()
    }
}

impl SurfaceBuilder for Triangle {
    fn surface_mut(&mut self) -> &mut Surface {
        self.polygon.surface_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-6;

    fn triangle() -> Triangle {
        Triangle::new(
            Point::new(0.0, 0.0, 1.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
        )
        .unwrap()
    }

    #[test]
    fn test_degenerate_triangles() {
        let p = Point::new(1.0, 2.0, 3.0);
        assert_eq!(
            Triangle::new(p, p, Point::ZERO).unwrap_err(),
            GeometryError::CoincidentVertices
        );
        assert_eq!(
            Triangle::new(Point::ZERO, p, Point::new(2.0, 4.0, 6.0)).unwrap_err(),
            GeometryError::CollinearVertices
        );
    }

    #[test]
    fn test_triangle_normal() {
        let tri = triangle();
        let [a, b, c] = tri.vertices();
        let normal = tri.normal(a);

        assert!((normal.length() - 1.0).abs() < TOLERANCE);
        assert!(normal.dot(b.subtract(a).unwrap()).abs() < TOLERANCE);
        assert!(normal.dot(c.subtract(a).unwrap()).abs() < TOLERANCE);
    }

    #[test]
    fn test_triangle_hit() {
        // Triangle in the plane z = 0, ray straight down through the inside
        let tri = Triangle::new(
            Point::new(0.0, 0.0, 0.0),
            Point::new(4.0, 0.0, 0.0),
            Point::new(0.0, 4.0, 0.0),
        )
        .unwrap();
        let ray = Ray::new(Point::new(1.0, 1.0, 5.0), Vector::NEG_Z);

        assert_eq!(tri.intersect_points(&ray), vec![Point::new(1.0, 1.0, 0.0)]);
    }

    #[test]
    fn test_triangle_miss_cases() {
        let tri = triangle();
        let dir = Vector::new(-1.0, -1.0, -1.0).unwrap();

        // plane hit beside an edge, plane hit beyond a vertex
        assert!(tri.intersect(&Ray::new(Point::new(3.0, 3.0, 1.0), dir)).is_empty());
        assert!(tri.intersect(&Ray::new(Point::new(3.0, 0.0, 0.0), dir)).is_empty());
        // plane behind the ray
        assert!(tri.intersect(&Ray::new(Point::ZERO, dir)).is_empty());
    }

    #[test]
    fn test_edges_and_vertices_excluded() {
        let tri = Triangle::new(
            Point::new(0.0, 0.0, 0.0),
            Point::new(4.0, 0.0, 0.0),
            Point::new(0.0, 4.0, 0.0),
        )
        .unwrap();

        // on an edge, on a vertex, on an edge's continuation
        for (x, y) in [(2.0, 0.0), (0.0, 0.0), (0.0, 6.0)] {
            let ray = Ray::new(Point::new(x, y, 5.0), Vector::NEG_Z);
            assert!(tri.intersect(&ray).is_empty(), "({x}, {y}) should miss");
        }
    }
}
