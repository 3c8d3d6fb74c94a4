//! Convex planar polygon primitive.

use lumen_math::{align_zero, is_zero, Point, Ray, Vector};

use crate::intersectable::{within, GeoPoint, Geometry, Intersectable, Surface, SurfaceBuilder};
use crate::{GeometryError, Plane};

/// A convex polygon with at least three coplanar vertices.
///
/// Edges and vertices do not belong to the surface: rays through them
/// report no intersection.
#[derive(Debug, Clone)]
pub struct Polygon {
    vertices: Vec<Point>,
    plane: Plane,
    surface: Surface,
}

impl Polygon {
    /// Create a polygon from vertices listed in edge order.
    ///
    /// Fails when there are fewer than three vertices, when consecutive
    /// vertices coincide or the first three are collinear, when a vertex is
    /// off the plane of the first three, or when the winding is not convex.
    pub fn new(vertices: Vec<Point>) -> Result<Self, GeometryError> {
        let size = vertices.len();
        if size < 3 {
            return Err(GeometryError::TooFewVertices(size));
        }

        let plane = Plane::from_points(vertices[0], vertices[1], vertices[2])?;
        if size > 3 {
            check_convex(&vertices, plane.normal_vector())?;
        }

        Ok(Self {
            vertices,
            plane,
            surface: Surface::default(),
        })
    }

    /// Vertices in winding order.
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Plane containing the polygon.
    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    /// Distance along `ray` to a point strictly inside the polygon.
    pub(crate) fn intersection_parameter(&self, ray: &Ray) -> Option<f64> {
        let t = self.plane.intersection_parameter(ray)?;
        is_inside(&self.vertices, ray).then_some(t)
    }
}

/// Walks the edges and checks that every turn bends the same way about `normal`.
fn check_convex(vertices: &[Point], normal: Vector) -> Result<(), GeometryError> {
    let size = vertices.len();
    let edge = |from: Point, to: Point| to.subtract(from).map_err(|_| GeometryError::CoincidentVertices);
    let turn = |e1: Vector, e2: Vector| -> Result<bool, GeometryError> {
        let cross = e1.cross(e2).map_err(|_| GeometryError::CollinearVertices)?;
        Ok(cross.dot(normal) > 0.0)
    };

    let origin = vertices[0].as_dvec3();
    let mut edge2 = edge(vertices[size - 1], vertices[0])?;
    let positive = turn(edge(vertices[size - 2], vertices[size - 1])?, edge2)?;

    for i in 1..size {
        if !is_zero((vertices[i].as_dvec3() - origin).dot(normal.as_dvec3())) {
            return Err(GeometryError::NotCoplanar);
        }

        let edge1 = edge2;
        edge2 = edge(vertices[i - 1], vertices[i])?;
        if turn(edge1, edge2)? != positive {
            return Err(GeometryError::NotConvex);
        }
    }

    Ok(())
}

/// Same-sign test of the ray direction against the pyramid of planes
/// spanned by the ray head and each edge.
///
/// A zero sign means the ray passes through an edge or a vertex, which
/// counts as a miss.
pub(crate) fn is_inside(vertices: &[Point], ray: &Ray) -> bool {
    let head = ray.head().as_dvec3();
    let dir = ray.direction().as_dvec3();

    let mut sign = None;
    let mut v2 = vertices[vertices.len() - 1].as_dvec3() - head;
    for vertex in vertices {
        let v1 = v2;
        v2 = vertex.as_dvec3() - head;

        let s = align_zero(dir.dot(v1.cross(v2)));
        if s == 0.0 {
            return false;
        }
        let positive = s > 0.0;
        match sign {
            None => sign = Some(positive),
            Some(first) if first != positive => return false,
            Some(_) => {}
        }
    }

    true
}

impl Intersectable for Polygon {
    fn intersect_within(&self, ray: &Ray, max_distance: f64) -> Vec<GeoPoint<'_>> {
        match self.intersection_parameter(ray) {
            Some(t) if within(t, max_distance) => vec![GeoPoint::new(self, ray.point_at(t))],
            _ => Vec::new(),
        }
    }
}

impl Geometry for Polygon {
    fn normal(&self, _point: Point) -> Vector {
        self.plane.normal_vector()
    }

    fn surface(&self) -> &Surface {
        &self.surface
    }
}

impl SurfaceBuilder for Polygon {
    fn surface_mut(&mut self) -> &mut Surface {
        &mut self.surface
    }
}
