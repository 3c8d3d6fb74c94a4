//! Composite container of intersectables.

use lumen_math::Ray;

use crate::intersectable::{GeoPoint, Intersectable};

/// An ordered collection of intersectables queried as one.
///
/// Members may be primitives or other `Geometries`, so scenes can be
/// grouped hierarchically. Intersection is a linear scan over all members.
#[derive(Debug, Default)]
pub struct Geometries {
    items: Vec<Box<dyn Intersectable>>,
}

impl Geometries {
    /// Create an empty aggregate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a member.
    pub fn add<T: Intersectable + 'static>(&mut self, item: T) {
        self.items.push(Box::new(item));
    }

    /// Add a member, builder style.
    pub fn with<T: Intersectable + 'static>(mut self, item: T) -> Self {
        self.add(item);
        self
    }

    /// Number of direct members.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Intersectable for Geometries {
    /// Union of every member's hits, in member order. Duplicates are kept.
    fn intersect_within(&self, ray: &Ray, max_distance: f64) -> Vec<GeoPoint<'_>> {
        self.items
            .iter()
            .flat_map(|item| item.intersect_within(ray, max_distance))
            .collect()
    }
}
