//! Lumen Renderer - CPU Whitted-style ray tracing
//!
//! Turns a [`lumen_core::Scene`] into pixels:
//!
//! - [`Camera`] builds one or more rays per pixel through a view plane
//! - [`BasicTracer`] shades rays with ambient, diffuse, specular, shadow,
//!   reflection and transparency terms
//! - [`render`] splits the image into buckets and traces them in parallel
//!   with rayon, writing finished pixels to a [`PixelSink`]

use lumen_math::MathError;
use thiserror::Error;

mod bucket;
mod camera;
mod renderer;
mod sink;
mod tracer;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::{Camera, CameraBuilder};
pub use renderer::{render, render_cancellable, CancelToken, RenderOptions, RenderStats};
pub use sink::{draw_grid, ImageBuffer, PixelSink};
pub use tracer::{BasicTracer, RayTracer, TracerConfig};

/// Re-export the math types needed to drive a render
pub use lumen_math::{Color, Point, Ray, Vector};

/// Errors raised while configuring a camera.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CameraError {
    #[error(transparent)]
    Math(#[from] MathError),

    #[error("camera direction vectors were not set")]
    MissingDirections,

    #[error("forward and up vectors must be orthogonal")]
    NotOrthogonal,

    #[error("view plane size must be positive, got {width}x{height}")]
    InvalidViewPlaneSize { width: f64, height: f64 },

    #[error("view plane distance must be positive, got {0}")]
    InvalidViewPlaneDistance(f64),

    #[error("anti-aliasing needs at least one sample per axis, got {0}")]
    InvalidSampleCount(u32),
}

/// Errors raised by the render driver and image output.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("cannot render an empty {width}x{height} image")]
    EmptyImage { width: u32, height: u32 },

    #[error("failed to build render thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("image output failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("invalid render configuration: {0}")]
    Config(#[from] serde_json::Error),
}
