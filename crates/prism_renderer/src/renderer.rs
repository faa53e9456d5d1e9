//! Image sampling and the render loop.
//!
//! The image plane is the `z = 0` world plane, one world unit per pixel.
//! Pixel `(x, y)` with row 0 at the top covers the square starting at
//! `(x, height - 1 - y, 0)`. Primary rays start at the eye and go through
//! sample points on that square, rotated by the eye pitch.

use std::time::Instant;

use prism_math::{Interval, Vec2};
use rayon::prelude::*;

use crate::bucket::{generate_buckets, render_bucket, BucketResult, DEFAULT_BUCKET_SIZE};
use crate::{Color, Ray, Scene, Vec3};

/// Render configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Edge length of the square buckets rendered in parallel
    pub bucket_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 400,
            height: 400,
            bucket_size: DEFAULT_BUCKET_SIZE,
        }
    }
}

/// Primary ray from the eye through a point of the image plane.
pub fn primary_ray(scene: &Scene, sample: Vec2) -> Ray {
    let target = Vec3::new(sample.x, sample.y, 0.0);
    let direction = scene.eye_rotation() * (target - scene.eye()).normalize();
    Ray::new(scene.eye(), direction)
}

/// Clamp every channel to the displayable range.
#[inline]
fn clamp_color(color: Color) -> Color {
    let unit = Interval::UNIT;
    Color::new(unit.clamp(color.x), unit.clamp(color.y), unit.clamp(color.z))
}

/// Render a single pixel of an image `image_height` pixels tall.
///
/// With a super-sampling factor `f` the pixel is sampled on an `f x f` grid
/// at offsets `(k + 1) / (f + 1)`; each sample is clamped before averaging.
/// A factor of one is a single ray through the pixel center.
pub fn render_pixel(scene: &Scene, x: u32, y: u32, image_height: u32) -> Color {
    let factor = scene.super_sampling_factor().max(1);
    let step = 1.0 / (factor + 1) as f64;

    let left = x as f64;
    let bottom = image_height as f64 - 1.0 - y as f64;

    let mut pixel_color = Color::ZERO;
    for sy in 0..factor {
        for sx in 0..factor {
            let sample = Vec2::new(
                left + (sx + 1) as f64 * step,
                bottom + (sy + 1) as f64 * step,
            );
            let color = scene.trace(&primary_ray(scene, sample));
            pixel_color += clamp_color(color);
        }
    }

    pixel_color / (factor * factor) as f64
}

/// Convert a color to 8-bit RGBA. Channels are clamped, no gamma is applied.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let c = clamp_color(color);
    let r = (255.0 * c.x).round() as u8;
    let g = (255.0 * c.y).round() as u8;
    let b = (255.0 * c.z).round() as u8;
    [r, g, b, 255]
}

/// Simple image buffer for storing render output.
#[derive(Debug, Clone)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; (width * height) as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[(y * self.width + x) as usize] = color;
    }

    /// Copy a rendered bucket into place.
    pub fn write_bucket(&mut self, result: &BucketResult) {
        let bucket = &result.bucket;
        for (i, color) in result.pixels.iter().enumerate() {
            let local_x = i as u32 % bucket.width;
            let local_y = i as u32 / bucket.width;
            self.set(bucket.x + local_x, bucket.y + local_y, *color);
        }
    }

    /// Convert to RGBA bytes (for saving).
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity((self.width * self.height * 4) as usize);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgba(*color));
        }
        bytes
    }
}

/// Render the entire scene, buckets in parallel.
pub fn render(scene: &Scene, config: &RenderConfig) -> ImageBuffer {
    let start = Instant::now();
    let buckets = generate_buckets(config.width, config.height, config.bucket_size);

    log::info!(
        "Rendering {}x{} ({} buckets, {} objects, {} lights, {}x super-sampling)",
        config.width,
        config.height,
        buckets.len(),
        scene.objects().len(),
        scene.lights().len(),
        scene.super_sampling_factor(),
    );

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| BucketResult::new(*bucket, render_bucket(bucket, scene, config.height)))
        .collect();

    let mut image = ImageBuffer::new(config.width, config.height);
    for result in &results {
        image.write_bucket(result);
    }

    log::info!("Render finished in {:.2?}", start.elapsed());
    image
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Light, Material, Plane, Sphere};
    use std::f64::consts::FRAC_PI_2;
    use std::sync::Arc;

    fn flat(color: Color) -> Arc<Material> {
        Arc::new(Material::with_color(color, 0.0, 0.0, 0.0, 1.0).unlit())
    }

    #[test]
    fn test_primary_ray_through_pixel_center() {
        let scene = Scene::new(Vec3::new(2.0, 2.0, 10.0));
        let ray = primary_ray(&scene, Vec2::new(2.0, 2.0));

        assert_eq!(ray.origin(), Vec3::new(2.0, 2.0, 10.0));
        assert!((ray.direction() - Vec3::NEG_Z).length() < 1e-12);
    }

    #[test]
    fn test_primary_ray_pitch() {
        let scene = Scene::new(Vec3::new(0.0, 0.0, 10.0)).with_eye_pitch(FRAC_PI_2);
        let ray = primary_ray(&scene, Vec2::ZERO);

        // A quarter turn about X takes -Z to +Y
        assert!((ray.direction() - Vec3::Y).length() < 1e-12);
    }

    #[test]
    fn test_factor_one_is_center_sample() {
        let mut scene = Scene::new(Vec3::new(2.0, 2.0, 20.0));
        let material = Material::with_color(Color::new(0.9, 0.5, 0.1), 0.2, 0.8, 0.3, 5.0);
        scene.add_object(Sphere::new(Vec3::new(1.3, 2.1, 0.0), 1.0), Arc::new(material));
        scene.add_light(Light::new(Vec3::new(5.0, 10.0, 20.0), Color::ONE));

        // Pixel (1, 2) of a 5-pixel-tall image covers [1, 2] x [2, 3]
        let expected = clamp_color(scene.trace(&primary_ray(&scene, Vec2::new(1.5, 2.5))));
        assert_eq!(render_pixel(&scene, 1, 2, 5), expected);
    }

    #[test]
    fn test_super_sampling_on_silhouette() {
        let white = Color::ONE;
        let mut scene = Scene::new(Vec3::new(0.5, 0.5, 1000.0)).with_super_sampling_factor(4);
        // Edge of a large sphere runs through the middle of pixel (0, 0)
        scene.add_object(Sphere::new(Vec3::new(-100.0, 0.5, 0.0), 100.5), flat(white));

        let single = scene.clone().with_super_sampling_factor(1);
        let sharp = render_pixel(&single, 0, 0, 1);
        let blended = render_pixel(&scene, 0, 0, 1);

        // The center sample sits right on the edge; the blend is partial
        assert!(sharp == white || sharp == Color::ZERO);
        assert!(blended.x > 0.0 && blended.x < 1.0);
        assert!((blended.x - blended.y).abs() < 1e-12);
    }

    #[test]
    fn test_samples_are_clamped_before_averaging() {
        let mut scene = Scene::new(Vec3::new(0.5, 0.5, 10.0)).with_super_sampling_factor(2);
        scene.add_object(Plane::new(Vec3::ZERO, Vec3::Z), flat(Color::new(4.0, -1.0, 0.5)));

        let color = render_pixel(&scene, 0, 0, 1);
        assert!((color - Color::new(1.0, 0.0, 0.5)).length() < 1e-12);
    }

    #[test]
    fn test_color_to_rgba() {
        assert_eq!(color_to_rgba(Color::new(0.0, 0.5, 1.0)), [0, 128, 255, 255]);
        assert_eq!(color_to_rgba(Color::new(-1.0, 2.0, 0.2)), [0, 255, 51, 255]);
    }

    #[test]
    fn test_render_top_row_is_top_of_scene() {
        // Upper half red, lower half blue, split at y = 2
        let mut scene = Scene::new(Vec3::new(2.0, 2.0, 50.0));
        scene.add_object(
            crate::Quad::new(
                Vec3::new(-10.0, 2.0, 0.0),
                Vec3::new(10.0, 2.0, 0.0),
                Vec3::new(10.0, 10.0, 0.0),
                Vec3::new(-10.0, 10.0, 0.0),
            ),
            flat(Color::new(1.0, 0.0, 0.0)),
        );
        scene.add_object(
            crate::Quad::new(
                Vec3::new(-10.0, -10.0, 0.0),
                Vec3::new(10.0, -10.0, 0.0),
                Vec3::new(10.0, 2.0, 0.0),
                Vec3::new(-10.0, 2.0, 0.0),
            ),
            flat(Color::new(0.0, 0.0, 1.0)),
        );

        let config = RenderConfig {
            width: 4,
            height: 4,
            bucket_size: 3,
        };
        let image = render(&scene, &config);

        assert_eq!(image.pixels.len(), 16);
        for x in 0..4 {
            assert_eq!(image.get(x, 0), Color::new(1.0, 0.0, 0.0));
            assert_eq!(image.get(x, 1), Color::new(1.0, 0.0, 0.0));
            assert_eq!(image.get(x, 2), Color::new(0.0, 0.0, 1.0));
            assert_eq!(image.get(x, 3), Color::new(0.0, 0.0, 1.0));
        }
        assert_eq!(&image.to_rgba()[..4], &[255, 0, 0, 255]);
    }
}
