//! Shared visualization utilities for the kd-tree viewer.

use std::hash::{Hash, Hasher};

use kd_accel::kd::LeafVisitor;
use kd_accel::{Aabb, Cuboid, KdNode, KdTree, NodePath, Ray, Rectangle, Surface, SurfaceId, Triangle};
use macroquad::prelude::*;
use nalgebra::{Point3, Vector3};

pub mod navigator;
pub use navigator::TreeNavigator;

/// Surfaces of the demo scene, boxed so different shapes can share one tree.
pub type SceneSurface = Box<dyn Surface + Send + Sync>;

/// Generates a deterministic color for a surface from its id.
pub fn surface_color(id: SurfaceId) -> Color {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    id.hash(&mut hasher);
    let hash = hasher.finish();

    // Extract RGB from hash bytes, keeping a minimum brightness
    let r = (((hash >> 16) & 0xFF) as u8).max(60);
    let g = (((hash >> 8) & 0xFF) as u8).max(60);
    let b = ((hash & 0xFF) as u8).max(60);

    Color::from_rgba(r, g, b, 255)
}

/// Generates the demo scene: a grid of cubes, a few triangles and a floor.
pub fn generate_scene() -> Vec<SceneSurface> {
    let mut surfaces: Vec<SceneSurface> = Vec::new();

    for i in 0..5 {
        for j in 0..5 {
            let x = (i as f32 - 2.0) * 2.5;
            let z = (j as f32 - 2.0) * 2.5;
            let size = 0.6 + 0.15 * ((i + j) % 4) as f32;
            surfaces.push(Box::new(Cuboid::cube(Point3::new(x, size * 0.5, z), size)));
        }
    }

    for k in 0..4 {
        let angle = k as f32 * std::f32::consts::FRAC_PI_2;
        let (s, c) = angle.sin_cos();
        let base = Point3::new(8.0 * c, 0.0, 8.0 * s);
        surfaces.push(Box::new(Triangle::new(
            base + Vector3::new(-s, 0.0, c),
            base + Vector3::new(s, 0.0, -c),
            base + Vector3::new(0.0, 2.5, 0.0),
        )));
    }

    surfaces.push(Box::new(Rectangle::from_corners(
        Point3::new(-10.0, 0.0, -10.0),
        Point3::new(10.0, 0.0, -10.0),
        Point3::new(10.0, 0.0, 10.0),
        Point3::new(-10.0, 0.0, 10.0),
    )));

    surfaces
}

/// Draws the wireframe of a box.
pub fn draw_bounds(bounds: &Aabb, color: Color) {
    let center = bounds.center();
    let extent = bounds.extent();
    draw_cube_wires(
        vec3(center.x, center.y, center.z),
        vec3(extent.x, extent.y, extent.z),
        color,
    );
}

/// Visitor that draws leaf boxes, colored by how many surfaces they hold.
pub struct LeafBoundsVisitor;

impl LeafVisitor for LeafBoundsVisitor {
    fn visit(&mut self, _path: &NodePath, leaf: &KdNode) {
        let load = (leaf.surface_count() as f32 / 8.0).min(1.0);
        draw_bounds(leaf.bounds(), Color::new(0.3 + 0.7 * load, 0.8 - 0.6 * load, 0.3, 0.6));
    }
}

/// Ray casts a flat-shaded image of the tree's surfaces through `camera`.
pub fn render_preview<S: Surface>(
    tree: &KdTree<S>,
    camera: &OrbitCamera,
    width: u16,
    height: u16,
) -> Image {
    let mut image = Image::gen_image_color(width, height, Color::from_rgba(20, 20, 30, 255));
    let light = Vector3::new(0.4, 1.0, 0.3).normalize();
    let aspect = width as f32 / height as f32;

    for py in 0..height as u32 {
        for px in 0..width as u32 {
            let u = (px as f32 + 0.5) / width as f32;
            let v = (py as f32 + 0.5) / height as f32;
            let ray = camera.primary_ray(u, v, aspect);

            if let Some(hit) = tree.intersect(&ray) {
                let shade = 0.25 + 0.75 * hit.normal.dot(&light).max(0.0);
                let base = surface_color(hit.surface);
                image.set_pixel(
                    px,
                    py,
                    Color::new(base.r * shade, base.g * shade, base.b * shade, 1.0),
                );
            }
        }
    }

    image
}

/// Simple orbit camera for 3D scene navigation.
pub struct OrbitCamera {
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub target: Vec3,
    /// Vertical field of view in radians
    pub fovy: f32,
    /// Multiplier for scroll wheel zoom
    pub zoom_speed: f32,
    /// Minimum distance from target
    pub min_distance: f32,
    /// Maximum distance from target
    pub max_distance: f32,
}

impl OrbitCamera {
    /// Creates a new orbit camera with the given configuration.
    pub fn new(distance: f32, yaw: f32, pitch: f32) -> Self {
        Self {
            distance,
            yaw,
            pitch,
            target: vec3(0.0, 0.0, 0.0),
            fovy: 45.0f32.to_radians(),
            zoom_speed: 2.0,
            min_distance: 5.0,
            max_distance: 80.0,
        }
    }

    /// Sets the zoom configuration (speed and distance limits).
    pub fn with_zoom(mut self, speed: f32, min: f32, max: f32) -> Self {
        self.zoom_speed = speed;
        self.min_distance = min;
        self.max_distance = max;
        self
    }

    /// Sets the camera target point.
    pub fn with_target(mut self, target: Vec3) -> Self {
        self.target = target;
        self
    }

    /// Updates camera state from user input (mouse drag, scroll, arrow keys).
    /// Returns true if the view changed.
    pub fn update(&mut self) -> bool {
        let before = (self.distance, self.yaw, self.pitch);

        // Mouse drag for rotation
        if is_mouse_button_down(MouseButton::Left) {
            let delta = mouse_delta_position();
            self.yaw -= delta.x * 2.0;
            self.pitch -= delta.y * 2.0;
        }

        // Clamp pitch to avoid gimbal lock
        self.pitch = self.pitch.clamp(-1.5, 1.5);

        let scroll = mouse_wheel().1;
        self.distance -= scroll * self.zoom_speed;
        self.distance = self.distance.clamp(self.min_distance, self.max_distance);

        if is_key_down(KeyCode::Left) {
            self.yaw += 0.02;
        }
        if is_key_down(KeyCode::Right) {
            self.yaw -= 0.02;
        }
        if is_key_down(KeyCode::Up) {
            self.pitch += 0.02;
        }
        if is_key_down(KeyCode::Down) {
            self.pitch -= 0.02;
        }

        before != (self.distance, self.yaw, self.pitch)
    }

    /// Returns the camera's world position.
    pub fn position(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.target + vec3(x, y, z)
    }

    /// Converts to macroquad's Camera3D for rendering.
    pub fn to_camera3d(&self) -> Camera3D {
        Camera3D {
            position: self.position(),
            up: vec3(0.0, 1.0, 0.0),
            target: self.target,
            fovy: self.fovy,
            ..Default::default()
        }
    }

    /// Returns the eye point as a nalgebra Point3 for ray generation.
    pub fn eye_point(&self) -> Point3<f32> {
        let pos = self.position();
        Point3::new(pos.x, pos.y, pos.z)
    }

    /// Builds the ray through the viewport point `(u, v)`, both in `0..1`
    /// with `v` growing downwards.
    pub fn primary_ray(&self, u: f32, v: f32, aspect: f32) -> Ray {
        let pos = self.position();
        let forward = (self.target - pos).normalize();
        let right = forward.cross(vec3(0.0, 1.0, 0.0)).normalize();
        let up = right.cross(forward);

        let half_height = (self.fovy * 0.5).tan();
        let x = (2.0 * u - 1.0) * half_height * aspect;
        let y = (1.0 - 2.0 * v) * half_height;
        let dir = forward + right * x + up * y;

        Ray::new(self.eye_point(), Vector3::new(dir.x, dir.y, dir.z))
    }
}
