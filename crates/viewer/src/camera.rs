use foundation::math::{LonLat, Vec3, spherical_to_cartesian};

use crate::config::ViewerConfig;

/// Output size of the render surface in pixels.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width over height; a collapsed surface counts as one pixel tall.
    pub fn aspect(self) -> f64 {
        self.width as f64 / self.height.max(1) as f64
    }
}

/// Perspective camera placed at the centre of the panorama sphere.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PerspectiveCamera {
    pub fov_y_deg: f64,
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
    pub position: Vec3,
    pub target: Vec3,
    look_radius: f64,
}

impl PerspectiveCamera {
    pub fn new(config: &ViewerConfig, viewport: Viewport) -> Self {
        Self {
            fov_y_deg: config.fov_y_deg,
            aspect: viewport.aspect(),
            near: config.near,
            far: config.far,
            position: Vec3::new(0.0, 0.0, config.camera_offset),
            target: Vec3::new(config.sphere_radius, 0.0, 0.0),
            look_radius: config.sphere_radius,
        }
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.aspect = viewport.aspect();
    }

    /// Aim at the point on the sphere in direction `dir`.
    pub fn look_toward(&mut self, dir: LonLat) {
        self.target = spherical_to_cartesian(dir, self.look_radius);
    }

    /// Projection * view for a right-handed world and a `[0, 1]` depth range.
    pub fn view_proj(&self) -> Mat4 {
        let view = Mat4::look_at(self.position, self.target, Vec3::new(0.0, 1.0, 0.0));
        let fov_y_rad = self.fov_y_deg.to_radians();
        let proj = Mat4::perspective(fov_y_rad, self.aspect, self.near, self.far);
        proj * view
    }
}

/// Row-major 4x4 matrix acting on column vectors.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Mat4 {
    rows: [[f64; 4]; 4],
}

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4 {
        rows: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    pub fn from_rows(rows: [[f64; 4]; 4]) -> Self {
        Self { rows }
    }

    pub fn perspective(fov_y_rad: f64, aspect: f64, near: f64, far: f64) -> Self {
        let focal = 1.0 / (fov_y_rad * 0.5).tan();
        let depth = far / (near - far);
        Self::from_rows([
            [focal / aspect, 0.0, 0.0, 0.0],
            [0.0, focal, 0.0, 0.0],
            [0.0, 0.0, depth, near * depth],
            [0.0, 0.0, -1.0, 0.0],
        ])
    }

    /// World to eye space; the eye looks down its local -Z.
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let forward = (target - eye).normalize();
        let right = forward.cross(up).normalize();
        let up = right.cross(forward);
        Self::from_rows([
            [right.x, right.y, right.z, -right.dot(eye)],
            [up.x, up.y, up.z, -up.dot(eye)],
            [-forward.x, -forward.y, -forward.z, forward.dot(eye)],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Transform `p` as a point and divide by `w`.
    pub fn project_point(&self, p: Vec3) -> Vec3 {
        let v = [p.x, p.y, p.z, 1.0];
        let [x, y, z, w] = self.rows.map(|row| row.iter().zip(v).map(|(a, b)| a * b).sum::<f64>());
        Vec3::new(x / w, y / w, z / w)
    }

    /// Column-major `f32` layout for GPU uniform upload.
    pub fn to_cols_f32(&self) -> [[f32; 4]; 4] {
        std::array::from_fn(|col| std::array::from_fn(|row| self.rows[row][col] as f32))
    }
}

impl std::ops::Mul for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Mat4 {
        Mat4::from_rows(std::array::from_fn(|i| {
            std::array::from_fn(|j| (0..4).map(|k| self.rows[i][k] * rhs.rows[k][j]).sum())
        }))
    }
}
