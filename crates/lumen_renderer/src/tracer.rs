//! Ray shading.
//!
//! [`BasicTracer`] implements recursive Whitted-style shading: local Phong
//! lighting with transparency-attenuated shadows, plus mirror reflection
//! and straight-through transmission rays. Recursion stops at
//! [`TracerConfig::max_depth`] levels or once the accumulated attenuation
//! of a branch drops below [`TracerConfig::min_contribution`].

use lumen_core::{GeoPoint, Geometry, Intersectable, LightSource, Scene};
use lumen_math::{align_zero, Coefficient, Color, Ray, Vector};
use serde::{Deserialize, Serialize};

use crate::RenderError;

/// Resolves rays to colors.
pub trait RayTracer: Sync {
    /// Color seen along a single ray.
    fn trace_ray(&self, ray: &Ray) -> Color;

    /// Combined color of the sample rays of one pixel (their average).
    fn trace_rays(&self, rays: &[Ray]) -> Color {
        if rays.is_empty() {
            return Color::BLACK;
        }
        let total: Color = rays.iter().map(|ray| self.trace_ray(ray)).sum();
        total / rays.len() as f64
    }
}

/// Recursion limits for [`BasicTracer`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TracerConfig {
    /// Surface interactions along one path, the primary hit included
    pub max_depth: u32,
    /// Branches whose attenuation falls below this are dropped
    pub min_contribution: f64,
}

impl Default for TracerConfig {
    fn default() -> Self {
        Self {
            max_depth: 10,
            min_contribution: 0.001,
        }
    }
}

impl TracerConfig {
    /// Parse from JSON; missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, RenderError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Phong shading with shadows, reflection and transparency.
#[derive(Debug, Clone, Copy)]
pub struct BasicTracer<'s> {
    scene: &'s Scene,
    config: TracerConfig,
}

impl<'s> BasicTracer<'s> {
    pub fn new(scene: &'s Scene) -> Self {
        Self {
            scene,
            config: TracerConfig::default(),
        }
    }

    pub fn with_config(mut self, config: TracerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &TracerConfig {
        &self.config
    }

    fn closest_hit(&self, ray: &Ray) -> Option<GeoPoint<'s>> {
        let hits = self.scene.geometries().intersect(ray);
        ray.closest_by(hits, |gp| gp.point)
    }

    /// Color at a hit: local lighting plus, while levels remain, the
    /// reflected and transmitted contributions.
    fn calc_color(&self, gp: &GeoPoint<'_>, ray: &Ray, level: u32, k: Coefficient) -> Color {
        let local = self.local_effects(gp, ray, k);
        if level <= 1 {
            return local;
        }
        local + self.global_effects(gp, ray, level, k)
    }

    fn local_effects(&self, gp: &GeoPoint<'_>, ray: &Ray, k: Coefficient) -> Color {
        let material = gp.material();
        let mut color =
            gp.geometry.emission() + self.scene.ambient_light().intensity() * material.ka;

        let n = gp.normal();
        let v = ray.direction();
        let nv = align_zero(n.dot(v));
        // Grazing view: no diffuse or specular side to pick
        if nv == 0.0 {
            return color;
        }

        for light in self.scene.lights() {
            let Some(l) = light.direction_to(gp.point) else {
                continue;
            };
            // Light and viewer must be on the same side of the surface
            let nl = align_zero(n.dot(l));
            if nl * nv <= 0.0 {
                continue;
            }

            let ktr = self.transparency(gp, light.as_ref(), l, n);
            if (ktr * k).lower_than(self.config.min_contribution) {
                continue;
            }

            let intensity = light.intensity_at(gp.point) * ktr;
            let diffuse = material.kd * nl.abs();
            let specular = material.ks * specular_factor(n, l, nl, v, material.shininess);
            color += intensity * (diffuse + specular);
        }

        color
    }

    /// Fraction of a light reaching `gp` through the geometry in between.
    ///
    /// Each blocker multiplies in its transparency, so an opaque blocker
    /// gives zero. Only geometry closer than the light counts.
    fn transparency(&self, gp: &GeoPoint<'_>, light: &dyn LightSource, l: Vector, n: Vector) -> Coefficient {
        let shadow_ray = Ray::offset(gp.point, -l, n);
        let distance = light.distance_to(gp.point);

        let mut ktr = Coefficient::ONE;
        for blocker in self.scene.geometries().intersect_within(&shadow_ray, distance) {
            ktr = ktr * blocker.material().kt;
            if ktr.lower_than(self.config.min_contribution) {
                return Coefficient::ZERO;
            }
        }
        ktr
    }

    fn global_effects(&self, gp: &GeoPoint<'_>, ray: &Ray, level: u32, k: Coefficient) -> Color {
        let material = gp.material();
        let n = gp.normal();
        let v = ray.direction();

        let mut color = Color::BLACK;
        if !material.kr.is_zero() {
            let reflected = Ray::offset(gp.point, v.reflect(n), n);
            color += self.global_effect(&reflected, level, k, material.kr);
        }
        if !material.kt.is_zero() {
            let refracted = Ray::offset(gp.point, v, n);
            color += self.global_effect(&refracted, level, k, material.kt);
        }
        color
    }

    fn global_effect(&self, ray: &Ray, level: u32, k: Coefficient, kx: Coefficient) -> Color {
        let kkx = k * kx;
        if kkx.lower_than(self.config.min_contribution) {
            return Color::BLACK;
        }

        match self.closest_hit(ray) {
            Some(gp) => self.calc_color(&gp, ray, level - 1, kkx) * kx,
            None => self.scene.background() * kx,
        }
    }
}

/// Phong highlight `max(0, -r.v)^shininess`, `r` being `l` mirrored about `n`.
fn specular_factor(n: Vector, l: Vector, nl: f64, v: Vector, shininess: u32) -> f64 {
    let r = l.as_dvec3() - n.as_dvec3() * (2.0 * nl);
    let minus_rv = -align_zero(r.dot(v.as_dvec3()));
    if minus_rv <= 0.0 {
        return 0.0;
    }
    minus_rv.powi(shininess as i32)
}

impl RayTracer for BasicTracer<'_> {
    fn trace_ray(&self, ray: &Ray) -> Color {
        match self.closest_hit(ray) {
            Some(gp) => self.calc_color(&gp, ray, self.config.max_depth, Coefficient::ONE),
            None => self.scene.background(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::{
        AmbientLight, DirectionalLight, Material, Plane, PointLight, Sphere, SurfaceBuilder,
    };
    use lumen_math::Point;

    const TOLERANCE: f64 = 1e-9;

    fn assert_color_near(a: Color, b: Color) {
        let close = (a.r() - b.r()).abs() < TOLERANCE
            && (a.g() - b.g()).abs() < TOLERANCE
            && (a.b() - b.b()).abs() < TOLERANCE;
        assert!(close, "{a:?} != {b:?}");
    }

    fn forward_ray() -> Ray {
        Ray::new(Point::ZERO, Vector::NEG_Z)
    }

    fn gray(v: f64) -> Color {
        Color::new(v, v, v).unwrap()
    }

    fn red() -> Color {
        Color::new(1.0, 0.0, 0.0).unwrap()
    }

    #[test]
    fn test_miss_returns_background() {
        let background = Color::new(0.2, 0.3, 0.4).unwrap();
        let scene = Scene::builder("empty").background(background).build();
        let tracer = BasicTracer::new(&scene);

        assert_eq!(tracer.trace_ray(&forward_ray()), background);
    }

    #[test]
    fn test_emission_and_ambient() {
        let emission = Color::new(0.1, 0.2, 0.0).unwrap();
        let sphere = Sphere::new(Point::new(0.0, 0.0, -10.0), 1.0)
            .unwrap()
            .with_emission(emission)
            .with_material(Material::new().with_ka([1.0, 0.5, 0.0]));
        let scene = Scene::builder("glow")
            .ambient_light(AmbientLight::new(Color::WHITE, 0.2))
            .geometry(sphere)
            .build();
        let tracer = BasicTracer::new(&scene);

        assert_color_near(tracer.trace_ray(&forward_ray()), Color::new(0.3, 0.3, 0.0).unwrap());
    }

    #[test]
    fn test_diffuse_and_specular() {
        let sphere = Sphere::new(Point::new(0.0, 0.0, -10.0), 1.0)
            .unwrap()
            .with_material(Material::new().with_kd(0.5).with_ks(0.25).with_shininess(10));
        let scene = Scene::builder("lit")
            .geometry(sphere)
            .light(DirectionalLight::new(Color::WHITE, Vector::NEG_Z))
            .build();
        let tracer = BasicTracer::new(&scene);

        // head-on light: |n.l| = 1 and the highlight peaks at 1
        assert_color_near(tracer.trace_ray(&forward_ray()), gray(0.75));
    }

    #[test]
    fn test_light_behind_surface() {
        let sphere = Sphere::new(Point::new(0.0, 0.0, -10.0), 1.0)
            .unwrap()
            .with_material(Material::new().with_kd(1.0).with_ks(1.0).with_shininess(5));
        let scene = Scene::builder("backlit")
            .geometry(sphere)
            .light(DirectionalLight::new(Color::WHITE, Vector::Z))
            .build();
        let tracer = BasicTracer::new(&scene);

        assert!(tracer.trace_ray(&forward_ray()).is_black());
    }

    fn shadow_scene(blocker_kt: f64) -> Scene {
        let floor = Plane::new(Point::new(0.0, 0.0, -10.0), Vector::Z)
            .with_material(Material::new().with_kd(1.0));
        let blocker = Sphere::new(Point::new(3.0, 0.0, -7.0), 1.0)
            .unwrap()
            .with_material(Material::new().with_kt(blocker_kt));
        Scene::builder("shadow")
            .geometry(floor)
            .geometry(blocker)
            .light(DirectionalLight::new(
                Color::WHITE,
                Vector::new(-1.0, 0.0, -1.0).unwrap(),
            ))
            .build()
    }

    #[test]
    fn test_unblocked_light() {
        let floor = Plane::new(Point::new(0.0, 0.0, -10.0), Vector::Z)
            .with_material(Material::new().with_kd(1.0));
        let scene = Scene::builder("open")
            .geometry(floor)
            .light(DirectionalLight::new(
                Color::WHITE,
                Vector::new(-1.0, 0.0, -1.0).unwrap(),
            ))
            .build();
        let tracer = BasicTracer::new(&scene);

        assert_color_near(
            tracer.trace_ray(&forward_ray()),
            gray(std::f64::consts::FRAC_1_SQRT_2),
        );
    }

    #[test]
    fn test_opaque_shadow() {
        let scene = shadow_scene(0.0);
        let tracer = BasicTracer::new(&scene);
        assert!(tracer.trace_ray(&forward_ray()).is_black());
    }

    #[test]
    fn test_partial_shadow() {
        // the shadow ray crosses the blocker twice: 0.5 * 0.5
        let scene = shadow_scene(0.5);
        let tracer = BasicTracer::new(&scene);

        assert_color_near(
            tracer.trace_ray(&forward_ray()),
            gray(0.25 * std::f64::consts::FRAC_1_SQRT_2),
        );
    }

    #[test]
    fn test_geometry_beyond_light_casts_no_shadow() {
        let floor = Plane::new(Point::new(0.0, 0.0, -10.0), Vector::Z)
            .with_material(Material::new().with_kd(1.0));
        // light at z = -5, opaque sphere further up at z = -2
        let scene = Scene::builder("beyond")
            .geometry(floor)
            .geometry(Sphere::new(Point::new(0.0, 0.0, 2.0), 1.0).unwrap())
            .light(PointLight::new(Color::WHITE, Point::new(0.0, 0.0, -5.0)))
            .build();
        let tracer = BasicTracer::new(&scene);

        assert_color_near(tracer.trace_ray(&forward_ray()), Color::WHITE);
    }

    fn mirror_scene(kr: f64) -> Scene {
        let mirror = Plane::new(Point::new(0.0, 0.0, -10.0), Vector::Z)
            .with_material(Material::new().with_kr(kr));
        // behind the camera, only visible in the mirror
        let lamp = Sphere::new(Point::new(0.0, 0.0, 5.0), 1.0)
            .unwrap()
            .with_emission(red());
        Scene::builder("mirror").geometry(mirror).geometry(lamp).build()
    }

    #[test]
    fn test_reflection() {
        let scene = mirror_scene(1.0);
        let tracer = BasicTracer::new(&scene);
        assert_color_near(tracer.trace_ray(&forward_ray()), red());

        let half = mirror_scene(0.5);
        let tracer = BasicTracer::new(&half);
        assert_color_near(tracer.trace_ray(&forward_ray()), red() * 0.5);
    }

    #[test]
    fn test_reflection_depth_limit() {
        let scene = mirror_scene(1.0);
        let config = TracerConfig {
            max_depth: 1,
            ..TracerConfig::default()
        };
        let tracer = BasicTracer::new(&scene).with_config(config);

        assert!(tracer.trace_ray(&forward_ray()).is_black());
    }

    #[test]
    fn test_negligible_reflection_skipped() {
        let scene = mirror_scene(0.0005);
        let tracer = BasicTracer::new(&scene);
        assert!(tracer.trace_ray(&forward_ray()).is_black());
    }

    #[test]
    fn test_reflected_miss_returns_scaled_background() {
        let mirror = Plane::new(Point::new(0.0, 0.0, -10.0), Vector::Z)
            .with_material(Material::new().with_kr(0.5));
        let scene = Scene::builder("sky")
            .background(gray(0.8))
            .geometry(mirror)
            .build();
        let tracer = BasicTracer::new(&scene);

        assert_color_near(tracer.trace_ray(&forward_ray()), gray(0.4));
    }

    #[test]
    fn test_transparency() {
        let glass = Plane::new(Point::new(0.0, 0.0, -5.0), Vector::Z)
            .with_material(Material::new().with_kt(1.0));
        let lamp = Sphere::new(Point::new(0.0, 0.0, -10.0), 1.0)
            .unwrap()
            .with_emission(red());
        let scene = Scene::builder("window").geometry(glass).geometry(lamp).build();
        let tracer = BasicTracer::new(&scene);

        assert_color_near(tracer.trace_ray(&forward_ray()), red());
    }

    #[test]
    fn test_trace_rays_averages() {
        let lamp = Sphere::new(Point::new(0.0, 0.0, -10.0), 1.0)
            .unwrap()
            .with_emission(Color::WHITE);
        let scene = Scene::builder("half").geometry(lamp).build();
        let tracer = BasicTracer::new(&scene);

        let rays = [forward_ray(), Ray::new(Point::ZERO, Vector::Z)];
        assert_color_near(tracer.trace_rays(&rays), gray(0.5));
        assert!(tracer.trace_rays(&[]).is_black());
    }

    #[test]
    fn test_config_from_json() {
        let config = TracerConfig::from_json_str(r#"{ "max_depth": 3 }"#).unwrap();
        assert_eq!(config.max_depth, 3);
        assert_eq!(config.min_contribution, 0.001);

        assert_eq!(TracerConfig::from_json_str("{}").unwrap(), TracerConfig::default());
        assert!(TracerConfig::from_json_str("{ \"max_depth\": -1 }").is_err());
    }
}
