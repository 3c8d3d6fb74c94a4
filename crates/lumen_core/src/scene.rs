//! Scene description read by the renderer.
//!
//! A [`Scene`] is assembled once through [`SceneBuilder`] and is immutable
//! afterwards, so it can be shared across render threads without locking.
//! Editing a scene means building a new one.

use lumen_math::Color;

use crate::intersectable::Intersectable;
use crate::light::{AmbientLight, LightSource};
use crate::Geometries;

/// Geometry, lights and background settings of a render.
#[derive(Debug)]
pub struct Scene {
    name: String,
    background: Color,
    ambient_light: AmbientLight,
    geometries: Geometries,
    lights: Vec<Box<dyn LightSource>>,
}

impl Scene {
    /// Start building a scene with a black background and no ambient light.
    pub fn builder(name: impl Into<String>) -> SceneBuilder {
        SceneBuilder {
            name: name.into(),
            background: Color::BLACK,
            ambient_light: AmbientLight::NONE,
            geometries: Geometries::new(),
            lights: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Color returned for rays that hit nothing.
    pub fn background(&self) -> Color {
        self.background
    }

    pub fn ambient_light(&self) -> &AmbientLight {
        &self.ambient_light
    }

    /// Root aggregate holding every geometry.
    pub fn geometries(&self) -> &Geometries {
        &self.geometries
    }

    /// Lights in insertion order.
    pub fn lights(&self) -> &[Box<dyn LightSource>] {
        &self.lights
    }
}

/// Builder for [`Scene`].
#[derive(Debug)]
pub struct SceneBuilder {
    name: String,
    background: Color,
    ambient_light: AmbientLight,
    geometries: Geometries,
    lights: Vec<Box<dyn LightSource>>,
}

impl SceneBuilder {
    pub fn background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn ambient_light(mut self, ambient_light: AmbientLight) -> Self {
        self.ambient_light = ambient_light;
        self
    }

    /// Add a geometry (or a nested [`Geometries`]) to the root aggregate.
    pub fn geometry<T: Intersectable + 'static>(mut self, geometry: T) -> Self {
        self.geometries.add(geometry);
        self
    }

    /// Replace the root aggregate.
    pub fn geometries(mut self, geometries: Geometries) -> Self {
        self.geometries = geometries;
        self
    }

    pub fn light<L: LightSource + 'static>(mut self, light: L) -> Self {
        self.lights.push(Box::new(light));
        self
    }

    pub fn build(self) -> Scene {
        log::debug!(
            "Scene '{}': {} geometries, {} lights",
            self.name,
            self.geometries.len(),
            self.lights.len()
        );

        Scene {
            name: self.name,
            background: self.background,
            ambient_light: self.ambient_light,
            geometries: self.geometries,
            lights: self.lights,
        }
    }
}
