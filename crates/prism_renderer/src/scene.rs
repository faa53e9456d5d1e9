//! Scene container, nearest-hit search and recursive Phong shading.

use std::sync::Arc;

use prism_math::{Color, Mat3, Ray, Rotation, Vec3};

use crate::{Hit, Light, Material, Object, Shape};

/// Distance secondary rays are pushed off a surface before tracing, so that
/// they do not hit the surface they start on.
pub const DEFAULT_SHADOW_BIAS: f64 = 1e-4;

/// Everything needed to trace rays: shapes, lights and the tracing settings.
///
/// A scene is built once and only read while rendering, so it can be shared
/// by reference between render threads.
#[derive(Debug, Clone)]
pub struct Scene {
    objects: Vec<Object>,
    lights: Vec<Light>,
    eye: Vec3,
    eye_pitch: f64,
    /// Cached rotation matrix for `eye_pitch`
    eye_rotation: Mat3,
    shadows: bool,
    ambient_light: Option<Color>,
    max_recursion_depth: u32,
    super_sampling_factor: u32,
    shadow_bias: f64,
    background: Color,
}

impl Scene {
    /// Create an empty scene viewed from `eye`.
    pub fn new(eye: Vec3) -> Self {
        Self {
            objects: Vec::new(),
            lights: Vec::new(),
            eye,
            eye_pitch: 0.0,
            eye_rotation: Mat3::IDENTITY,
            shadows: false,
            ambient_light: None,
            max_recursion_depth: 0,
            super_sampling_factor: 1,
            shadow_bias: DEFAULT_SHADOW_BIAS,
            background: Color::ZERO,
        }
    }

    /// Rotate every primary ray about the X axis (radians).
    pub fn with_eye_pitch(mut self, pitch: f64) -> Self {
        self.eye_pitch = pitch;
        self.eye_rotation = Rotation::pitch(pitch).to_mat3();
        self
    }

    pub fn with_shadows(mut self, shadows: bool) -> Self {
        self.shadows = shadows;
        self
    }

    /// Use a fixed ambient color instead of the average light color.
    pub fn with_ambient_light(mut self, ambient: Color) -> Self {
        self.ambient_light = Some(ambient);
        self
    }

    pub fn with_max_recursion_depth(mut self, depth: u32) -> Self {
        self.max_recursion_depth = depth;
        self
    }

    /// Samples per pixel along each axis. Zero is treated as one.
    pub fn with_super_sampling_factor(mut self, factor: u32) -> Self {
        self.super_sampling_factor = factor.max(1);
        self
    }

    pub fn with_shadow_bias(mut self, bias: f64) -> Self {
        self.shadow_bias = bias;
        self
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    /// Add a shape drawn with `material`.
    pub fn add_object(&mut self, shape: impl Into<Shape>, material: Arc<Material>) {
        self.objects.push(Object::new(shape, material));
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    pub fn eye_pitch(&self) -> f64 {
        self.eye_pitch
    }

    pub fn eye_rotation(&self) -> Mat3 {
        self.eye_rotation
    }

    pub fn shadows(&self) -> bool {
        self.shadows
    }

    pub fn ambient_light(&self) -> Option<Color> {
        self.ambient_light
    }

    pub fn max_recursion_depth(&self) -> u32 {
        self.max_recursion_depth
    }

    pub fn super_sampling_factor(&self) -> u32 {
        self.super_sampling_factor
    }

    pub fn shadow_bias(&self) -> f64 {
        self.shadow_bias
    }

    /// Find the object nearest to the ray origin along the ray.
    ///
    /// Returns `None` when no object is hit in front of the origin.
    pub fn find_nearest_hit(&self, ray: &Ray) -> Option<(Hit, &Object)> {
        let mut nearest: Option<(Hit, &Object)> = None;

        for object in &self.objects {
            let hit = object.shape.intersect(ray);
            if !hit.is_hit() {
                continue;
            }
            if nearest.map_or(true, |(best, _)| hit.t < best.t) {
                nearest = Some((hit, object));
            }
        }

        nearest
    }

    /// Color seen along a primary ray, using the full recursion budget.
    pub fn trace(&self, ray: &Ray) -> Color {
        self.shade(ray, self.max_recursion_depth)
    }

    /// Color seen along `ray` with `depth` reflection bounces left.
    ///
    /// Phong model: ambient, diffuse and specular terms per light, shadow
    /// rays when enabled, and a mirror reflection scaled by `ks` while the
    /// budget lasts. Flat materials skip all of it and return their own
    /// color.
    pub fn shade(&self, ray: &Ray, depth: u32) -> Color {
        let Some((hit, object)) = self.find_nearest_hit(ray) else {
            return self.background;
        };

        let material = &object.material;
        let point = ray.at(hit.t);
        let intrinsic = material.intrinsic_color(&object.shape, point);
        if material.is_flat {
            return intrinsic;
        }

        let n = hit.normal;
        let v = -ray.direction().normalize();

        let mut ambient = Color::ZERO;
        let mut diffuse = Color::ZERO;
        let mut specular = Color::ZERO;

        let light_count = self.lights.len() as f64;
        for light in &self.lights {
            ambient += light.color * material.ka / light_count;

            let to_light = light.position - point;
            let distance = to_light.length();
            let l = to_light.normalize_or_zero();

            if self.shadows && self.is_occluded(point, l, distance) {
                continue;
            }

            let r = 2.0 * l.dot(n) * n - l;
            diffuse += light.color * material.kd * n.dot(l).max(0.0);
            specular += light.color * material.ks * r.dot(v).max(0.0).powf(material.n);
        }

        if let Some(fixed) = self.ambient_light {
            ambient = fixed * material.ka;
        }

        if depth > 0 && material.ks > 0.0 {
            let reflected = 2.0 * v.dot(n) * n - v;
            let reflection = Ray::offset(point, reflected, self.shadow_bias);
            specular += material.ks * self.shade(&reflection, depth - 1);
        }

        (ambient + diffuse) * intrinsic + specular
    }

    /// True if something lies between `point` and a light `distance` away
    /// in direction `l`.
    fn is_occluded(&self, point: Vec3, l: Vec3, distance: f64) -> bool {
        let shadow_ray = Ray::offset(point, l, self.shadow_bias);
        self.find_nearest_hit(&shadow_ray)
            .is_some_and(|(hit, _)| hit.t < distance)
    }
}
