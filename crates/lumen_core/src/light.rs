//! Light sources.
//!
//! Every light answers three questions about a shaded point: how bright it
//! is there, which way its light travels to reach it, and how far away the
//! light is (for bounding shadow rays).

use std::fmt::Debug;

use lumen_math::{Coefficient, Color, Point, Vector};

/// A light that illuminates points in the scene.
pub trait LightSource: Send + Sync + Debug {
    /// Intensity arriving at `point`, after attenuation.
    fn intensity_at(&self, point: Point) -> Color;

    /// Unit direction of travel from the light to `point`.
    ///
    /// `None` when `point` coincides with a positional light.
    fn direction_to(&self, point: Point) -> Option<Vector>;

    /// Distance from `point` to the light; infinite for directional lights.
    fn distance_to(&self, point: Point) -> f64;
}

/// Uniform light reaching every surface regardless of position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    intensity: Color,
}

impl AmbientLight {
    pub const NONE: AmbientLight = AmbientLight {
        intensity: Color::BLACK,
    };

    /// Ambient light of `color` pre-scaled by the non-negative attenuation
    /// `ka`.
    pub fn new(color: Color, ka: impl Into<Coefficient>) -> Self {
        Self {
            intensity: color * crate::material::checked(ka.into()),
        }
    }

    /// Intensity reaching every surface.
    pub fn intensity(&self) -> Color {
        self.intensity
    }
}

impl Default for AmbientLight {
    fn default() -> Self {
        Self::NONE
    }
}

/// Light arriving from infinitely far away along a fixed direction.
#[derive(Debug, Clone)]
pub struct DirectionalLight {
    intensity: Color,
    direction: Vector,
}

impl DirectionalLight {
    /// `direction` is the way the light travels; it is normalized.
    pub fn new(intensity: Color, direction: Vector) -> Self {
        Self {
            intensity,
            direction: direction.normalize(),
        }
    }
}

impl LightSource for DirectionalLight {
    fn intensity_at(&self, _point: Point) -> Color {
        self.intensity
    }

    fn direction_to(&self, _point: Point) -> Option<Vector> {
        Some(self.direction)
    }

    fn distance_to(&self, _point: Point) -> f64 {
        f64::INFINITY
    }
}

/// Omnidirectional light at a position with distance attenuation
/// `1 / (kc + kl*d + kq*d^2)`.
#[derive(Debug, Clone)]
pub struct PointLight {
    intensity: Color,
    position: Point,
    kc: f64,
    kl: f64,
    kq: f64,
}

impl PointLight {
    /// New point light with no distance falloff (`kc = 1`, `kl = kq = 0`).
    pub fn new(intensity: Color, position: Point) -> Self {
        Self {
            intensity,
            position,
            kc: 1.0,
            kl: 0.0,
            kq: 0.0,
        }
    }

    pub fn with_kc(mut self, kc: f64) -> Self {
        self.kc = kc;
        self
    }

    pub fn with_kl(mut self, kl: f64) -> Self {
        self.kl = kl;
        self
    }

    pub fn with_kq(mut self, kq: f64) -> Self {
        self.kq = kq;
        self
    }

    pub fn position(&self) -> Point {
        self.position
    }
}

impl LightSource for PointLight {
    fn intensity_at(&self, point: Point) -> Color {
        let d = point.distance(self.position);
        let attenuation = self.kc + self.kl * d + self.kq * d * d;
        // Only reachable at the light itself with kc = 0
        if attenuation <= 0.0 {
            return self.intensity;
        }
        self.intensity.reduce(attenuation)
    }

    fn direction_to(&self, point: Point) -> Option<Vector> {
        point.subtract(self.position).ok().map(|v| v.normalize())
    }

    fn distance_to(&self, point: Point) -> f64 {
        point.distance(self.position)
    }
}

/// A point light focused around a direction.
///
/// Intensity is the point light's, scaled by `max(0, dir . l)^narrow_beam`,
/// where `l` is the direction from the light to the shaded point. Larger
/// beam exponents tighten the cone.
#[derive(Debug, Clone)]
pub struct SpotLight {
    light: PointLight,
    direction: Vector,
    narrow_beam: f64,
}

impl SpotLight {
    pub fn new(intensity: Color, position: Point, direction: Vector) -> Self {
        Self {
            light: PointLight::new(intensity, position),
            direction: direction.normalize(),
            narrow_beam: 1.0,
        }
    }

    pub fn with_kc(mut self, kc: f64) -> Self {
        self.light = self.light.with_kc(kc);
        self
    }

    pub fn with_kl(mut self, kl: f64) -> Self {
        self.light = self.light.with_kl(kl);
        self
    }

    pub fn with_kq(mut self, kq: f64) -> Self {
        self.light = self.light.with_kq(kq);
        self
    }

    pub fn with_narrow_beam(mut self, narrow_beam: f64) -> Self {
        self.narrow_beam = narrow_beam;
        self
    }
}

impl LightSource for SpotLight {
    fn intensity_at(&self, point: Point) -> Color {
        let base = self.light.intensity_at(point);
        match self.light.direction_to(point) {
            Some(l) => base * self.direction.dot(l).max(0.0).powf(self.narrow_beam),
            None => base,
        }
    }

    fn direction_to(&self, point: Point) -> Option<Vector> {
        self.light.direction_to(point)
    }

    fn distance_to(&self, point: Point) -> f64 {
        self.light.distance_to(point)
    }
}
