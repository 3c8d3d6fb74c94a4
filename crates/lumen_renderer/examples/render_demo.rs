//! Renders a small showcase scene and saves it as a PNG.
//!
//! ```text
//! RUST_LOG=info cargo run --release --example render_demo -- [output.png] [--grid]
//! ```

use anyhow::{Context, Result};
use lumen_core::{
    AmbientLight, Cylinder, DirectionalLight, Geometries, Material, Plane, PointLight, Polygon,
    Scene, Sphere, SpotLight, SurfaceBuilder, Triangle,
};
use lumen_renderer::{
    draw_grid, render, BasicTracer, Camera, Color, ImageBuffer, Point, Ray, RenderOptions,
    TracerConfig, Vector,
};

const WIDTH: u32 = 600;
const HEIGHT: u32 = 400;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut output = String::from("render_demo.png");
    let mut grid = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--grid" => grid = true,
            path => output = path.to_string(),
        }
    }

    let scene = build_scene()?;
    let camera = Camera::builder()
        .location(Point::new(0.0, 40.0, 160.0))
        .look_at(Point::new(0.0, 0.0, -20.0), Vector::Y)
        .view_plane_size(150.0, 100.0)
        .view_plane_distance(120.0)
        .anti_aliasing(3)
        .build()?;

    let tracer = BasicTracer::new(&scene).with_config(TracerConfig::default());
    let mut image = ImageBuffer::new(WIDTH, HEIGHT);
    let stats = render(&camera, &tracer, &mut image, &RenderOptions::default())?;
    log::info!(
        "{} buckets in {:?}",
        stats.buckets_rendered,
        stats.elapsed
    );

    if grid {
        draw_grid(&mut image, 50, Color::new(1.0, 1.0, 0.0)?);
    }

    image
        .save(&output)
        .with_context(|| format!("failed to write {output}"))?;
    log::info!("Saved to {}", output);

    Ok(())
}

fn build_scene() -> Result<Scene> {
    let floor_material = Material::new()
        .with_kd(0.5)
        .with_ks(0.2)
        .with_shininess(20)
        .with_kr(0.3);
    let floor = Plane::new(Point::new(0.0, -20.0, 0.0), Vector::Y)
        .with_emission(Color::new(0.05, 0.05, 0.08)?)
        .with_material(floor_material);

    // Glass shell around a solid core
    let shell = Sphere::new(Point::new(-35.0, 5.0, -20.0), 25.0)?
        .with_emission(Color::new(0.02, 0.05, 0.1)?)
        .with_material(
            Material::new()
                .with_kd(0.1)
                .with_ks(0.8)
                .with_shininess(100)
                .with_kt(0.7),
        );
    let core = Sphere::new(Point::new(-35.0, 5.0, -20.0), 10.0)?
        .with_emission(Color::new(0.5, 0.1, 0.1)?)
        .with_material(Material::new().with_kd(0.5).with_ks(0.5).with_shininess(50));
    let marbles = Geometries::new().with(shell).with(core);

    let pillar = Cylinder::new(Ray::new(Point::new(35.0, -20.0, -30.0), Vector::Y), 12.0, 45.0)?
        .with_emission(Color::new(0.1, 0.3, 0.1)?)
        .with_material(Material::new().with_kd(0.6).with_ks(0.3).with_shininess(30));

    let mirror = Polygon::new(vec![
        Point::new(-80.0, -20.0, -90.0),
        Point::new(80.0, -20.0, -90.0),
        Point::new(80.0, 70.0, -90.0),
        Point::new(-80.0, 70.0, -90.0),
    ])?
    .with_emission(Color::new(0.02, 0.02, 0.02)?)
    .with_material(Material::new().with_kr(0.6).with_kd(0.1));

    let wedge = Triangle::new(
        Point::new(0.0, -20.0, 20.0),
        Point::new(20.0, -20.0, 30.0),
        Point::new(10.0, 10.0, 25.0),
    )?
    .with_emission(Color::new(0.3, 0.2, 0.0)?)
    .with_material(Material::new().with_kd(0.4).with_ks(0.4).with_shininess(40));

    Ok(Scene::builder("demo")
        .background(Color::new(0.05, 0.05, 0.1)?)
        .ambient_light(AmbientLight::new(Color::WHITE, 0.1))
        .geometry(floor)
        .geometry(marbles)
        .geometry(pillar)
        .geometry(mirror)
        .geometry(wedge)
        .light(
            SpotLight::new(
                Color::new(1.0, 0.9, 0.7)?,
                Point::new(-60.0, 80.0, 40.0),
                Vector::new(1.0, -1.5, -1.0)?,
            )
            .with_kl(0.0005)
            .with_kq(0.00002)
            .with_narrow_beam(4.0),
        )
        .light(
            PointLight::new(Color::new(0.4, 0.4, 0.6)?, Point::new(60.0, 50.0, 60.0))
                .with_kl(0.001),
        )
        .light(DirectionalLight::new(
            Color::new(0.2, 0.2, 0.2)?,
            Vector::new(0.0, -1.0, -0.5)?,
        ))
        .build())
}
