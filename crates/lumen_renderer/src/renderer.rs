//! Parallel render driver.
//!
//! Pixels only read the immutable scene and camera, so buckets are traced
//! on rayon workers with no locking. Finished buckets are collected and
//! written to the sink from the calling thread, which keeps the sink
//! single-writer.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::bucket::{generate_buckets, render_bucket, BucketResult, DEFAULT_BUCKET_SIZE};
use crate::{Camera, PixelSink, RayTracer, RenderError};

/// Render driver settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Bucket edge length in pixels
    pub bucket_size: u32,
    /// Worker threads; `None` uses the global rayon pool
    pub threads: Option<usize>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            bucket_size: DEFAULT_BUCKET_SIZE,
            threads: None,
        }
    }
}

impl RenderOptions {
    /// Parse from JSON; missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, RenderError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Shared flag to stop a render early.
///
/// Once cancelled, no new bucket starts; buckets already being traced
/// finish and are written.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Summary of a finished (or cancelled) render.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderStats {
    pub buckets_total: usize,
    pub buckets_rendered: usize,
    pub cancelled: bool,
    pub elapsed: Duration,
}

/// Render the whole image into `sink`.
///
/// The image resolution is the sink's; every pixel is written exactly once.
pub fn render<S: PixelSink + ?Sized>(
    camera: &Camera,
    tracer: &dyn RayTracer,
    sink: &mut S,
    options: &RenderOptions,
) -> Result<RenderStats, RenderError> {
    render_cancellable(camera, tracer, sink, options, &CancelToken::new())
}

/// [`render`] that stops dispatching buckets once `cancel` is set.
///
/// Pixels of buckets that never started are left untouched in the sink.
pub fn render_cancellable<S: PixelSink + ?Sized>(
    camera: &Camera,
    tracer: &dyn RayTracer,
    sink: &mut S,
    options: &RenderOptions,
    cancel: &CancelToken,
) -> Result<RenderStats, RenderError> {
    let (width, height) = (sink.width(), sink.height());
    if width == 0 || height == 0 {
        return Err(RenderError::EmptyImage { width, height });
    }

    let buckets = generate_buckets(width, height, options.bucket_size);
    let samples = camera.samples_per_pixel();
    log::info!(
        "Rendering {}x{} @ {} spp in {} buckets",
        width,
        height,
        samples,
        buckets.len()
    );

    let start = Instant::now();
    let trace = || -> Vec<BucketResult> {
        buckets
            .par_iter()
            .filter_map(|bucket| {
                if cancel.is_cancelled() {
                    return None;
                }
                let pixels = render_bucket(bucket, camera, tracer, width, height);
                log::debug!(
                    "Bucket {} at ({}, {}) done",
                    bucket.index,
                    bucket.x,
                    bucket.y
                );
                Some(BucketResult::new(*bucket, pixels))
            })
            .collect()
    };

    let results = match options.threads {
        Some(threads) => rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()?
            .install(trace),
        None => trace(),
    };

    for result in &results {
        for ((x, y), color) in result.iter() {
            sink.write_pixel(x, y, color);
        }
    }

    let stats = RenderStats {
        buckets_total: buckets.len(),
        buckets_rendered: results.len(),
        cancelled: results.len() < buckets.len(),
        elapsed: start.elapsed(),
    };

    if stats.cancelled {
        log::warn!(
            "Render cancelled after {}/{} buckets",
            stats.buckets_rendered,
            stats.buckets_total
        );
    } else {
        log::info!("Rendered in {:?}", stats.elapsed);
    }

    Ok(stats)
}
