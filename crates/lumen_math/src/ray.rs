use crate::{align_zero, is_zero, Point, Vector};

/// A half-line with a head point and a unit direction.
///
/// Rays are used for raytracing - they start at `head` and travel along
/// `direction`, which is normalized on construction.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    head: Point,
    direction: Vector,
}

impl Ray {
    /// Distance secondary rays are pushed off a surface to avoid hitting it
    /// again through rounding error.
    pub const DELTA: f64 = 0.1;

    /// Create a new ray; `direction` is normalized.
    pub fn new(head: Point, direction: Vector) -> Self {
        Self {
            head,
            direction: direction.normalize(),
        }
    }

    /// Create a ray leaving a surface point.
    ///
    /// The head is moved by [`Ray::DELTA`] along `normal`, on the side of the
    /// surface `direction` points into.
    pub fn offset(point: Point, direction: Vector, normal: Vector) -> Self {
        let nv = align_zero(normal.dot(direction));
        let delta = if nv < 0.0 { -Self::DELTA } else { Self::DELTA };
        let head = Point::from_dvec3(point.as_dvec3() + normal.as_dvec3() * delta);
        Self::new(head, direction)
    }

    #[inline]
    pub fn head(&self) -> Point {
        self.head
    }

    #[inline]
    pub fn direction(&self) -> Vector {
        self.direction
    }

    /// The point at distance `t` along the ray.
    ///
    /// Returns the head itself when `t` is (nearly) zero.
    pub fn point_at(&self, t: f64) -> Point {
        if is_zero(t) {
            return self.head;
        }
        Point::from_dvec3(self.head.as_dvec3() + self.direction.as_dvec3() * t)
    }

    /// Picks the item whose position is closest to the ray head.
    ///
    /// Ties keep the earliest item.
    pub fn closest_by<T, F>(&self, items: impl IntoIterator<Item = T>, position: F) -> Option<T>
    where
        F: Fn(&T) -> Point,
    {
        let mut closest: Option<(f64, T)> = None;
        for item in items {
            let distance = self.head.distance_squared(position(&item));
            let is_closer = closest.as_ref().map_or(true, |(best, _)| distance < *best);
            if is_closer {
                closest = Some((distance, item));
            }
        }
        closest.map(|(_, item)| item)
    }

    /// The point closest to the ray head, or `None` for an empty slice.
    pub fn closest_point(&self, points: &[Point]) -> Option<Point> {
        self.closest_by(points.iter().copied(), |p| *p)
    }
}
