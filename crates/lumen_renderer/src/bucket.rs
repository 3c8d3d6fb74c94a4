//! Bucket-based tile rendering.
//!
//! Divides the image into tiles (buckets) that are traced independently,
//! so the render driver can hand them to rayon workers.

use lumen_math::Color;

use crate::{Camera, RayTracer};

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// X coordinate of bucket's top-left corner
    pub x: u32,
    /// Y coordinate of bucket's top-left corner
    pub y: u32,
    /// Width of the bucket in pixels
    pub width: u32,
    /// Height of the bucket in pixels
    pub height: u32,
    /// Position of this bucket in the render order
    pub index: usize,
}

impl Bucket {
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
            index,
        }
    }

    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }

    /// Image coordinates covered by the bucket, row-major.
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32)> {
        let Bucket { x, y, width, height, .. } = *self;
        (y..y + height).flat_map(move |py| (x..x + width).map(move |px| (px, py)))
    }
}

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 64;

/// Split an image into `bucket_size` tiles, ordered from the centre outwards.
///
/// Edge buckets are cropped to the image. The centre of the image is the
/// part most worth seeing first, so it is traced first.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let size = bucket_size.max(1);
    let mut buckets = Vec::new();

    for y in (0..height).step_by(size as usize) {
        for x in (0..width).step_by(size as usize) {
            let bw = size.min(width - x);
            let bh = size.min(height - y);
            buckets.push(Bucket::new(x, y, bw, bh, 0));
        }
    }

    sort_spiral(&mut buckets, width, height);
    for (i, bucket) in buckets.iter_mut().enumerate() {
        bucket.index = i;
    }

    buckets
}

/// Stable sort by squared distance of each bucket centre to the image centre.
fn sort_spiral(buckets: &mut [Bucket], width: u32, height: u32) {
    let center_x = width as f64 / 2.0;
    let center_y = height as f64 / 2.0;
    let distance = |b: &Bucket| {
        let dx = b.x as f64 + b.width as f64 / 2.0 - center_x;
        let dy = b.y as f64 + b.height as f64 / 2.0 - center_y;
        dx * dx + dy * dy
    };

    buckets.sort_by(|a, b| distance(a).total_cmp(&distance(b)));
}

/// Trace every pixel of a bucket of an `image_width x image_height` image.
///
/// Returns colors in row-major order within the bucket.
pub fn render_bucket(
    bucket: &Bucket,
    camera: &Camera,
    tracer: &(impl RayTracer + ?Sized),
    image_width: u32,
    image_height: u32,
) -> Vec<Color> {
    bucket
        .pixels()
        .map(|(x, y)| {
            let rays = camera.construct_rays(image_width, image_height, x, y);
            tracer.trace_rays(&rays)
        })
        .collect()
}

/// Result of rendering a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    /// The bucket that was rendered
    pub bucket: Bucket,
    /// Pixel colors in row-major order
    pub pixels: Vec<Color>,
}

impl BucketResult {
    pub fn new(bucket: Bucket, pixels: Vec<Color>) -> Self {
        Self { bucket, pixels }
    }

    /// Pair each pixel color with its image coordinates.
    pub fn iter(&self) -> impl Iterator<Item = ((u32, u32), Color)> + '_ {
        self.bucket.pixels().zip(self.pixels.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_math::{Ray, Vector};

    #[test]
    fn test_generate_buckets_exact_fit() {
        let buckets = generate_buckets(128, 128, 64);
        assert_eq!(buckets.len(), 4);

        let total_pixels: u32 = buckets.iter().map(|b| b.pixel_count()).sum();
        assert_eq!(total_pixels, 128 * 128);
    }

    #[test]
    fn test_generate_buckets_partial_fit() {
        let buckets = generate_buckets(100, 70, 64);
        assert_eq!(buckets.len(), 4);

        let total_pixels: u32 = buckets.iter().map(|b| b.pixel_count()).sum();
        assert_eq!(total_pixels, 100 * 70);
        assert!(buckets.iter().any(|b| b.width == 36 && b.height == 6));
    }

    #[test]
    fn test_spiral_order() {
        let buckets = generate_buckets(192, 192, 64);
        assert_eq!(buckets.len(), 9);

        let first = &buckets[0];
        assert_eq!((first.x, first.y), (64, 64));
        assert!(buckets.iter().enumerate().all(|(i, b)| b.index == i));
    }

    #[test]
    fn test_buckets_cover_each_pixel_once() {
        let (width, height) = (37, 23);
        let mut seen = vec![0u32; (width * height) as usize];
        for bucket in generate_buckets(width, height, 8) {
            for (x, y) in bucket.pixels() {
                seen[(y * width + x) as usize] += 1;
            }
        }
        assert!(seen.iter().all(|&count| count == 1));
    }

    /// Encodes the ray direction into the color so pixel order is visible.
    struct DirectionTracer;

    impl RayTracer for DirectionTracer {
        fn trace_ray(&self, ray: &Ray) -> Color {
            let d = ray.direction();
            Color::new(d.x().abs(), d.y().abs(), 0.0).unwrap()
        }
    }

    #[test]
    fn test_render_bucket_row_major() {
        let camera = Camera::builder()
            .direction(Vector::NEG_Z, Vector::Y)
            .view_plane_size(2.0, 2.0)
            .view_plane_distance(1.0)
            .build()
            .unwrap();
        let bucket = Bucket::new(0, 0, 2, 2, 0);

        let result = BucketResult::new(bucket, render_bucket(&bucket, &camera, &DirectionTracer, 2, 2));
        assert_eq!(result.pixels.len(), 4);

        let coords: Vec<(u32, u32)> = result.iter().map(|(xy, _)| xy).collect();
        assert_eq!(coords, vec![(0, 0), (1, 0), (0, 1), (1, 1)]);
        // symmetric pixels around the centre see the same |direction|
        assert_eq!(result.pixels[0], result.pixels[3]);
    }
}
