use foundation::math::Vec3;

/// UV sphere with faces wound to be visible from the inside.
///
/// Vertices are laid out on a `(width_segments + 1) x (height_segments + 1)`
/// grid, row 0 at the north pole. The x axis is mirrored so a camera at the
/// centre sees the front faces and the equirectangular texture reads left to
/// right.
#[derive(Debug, Clone, PartialEq)]
pub struct SphereMesh {
    pub radius: f64,
    pub positions: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

impl SphereMesh {
    pub fn inside_out(radius: f64, width_segments: u32, height_segments: u32) -> Self {
        let w = width_segments.max(3);
        let h = height_segments.max(2);

        let mut positions = Vec::with_capacity(((w + 1) * (h + 1)) as usize);
        let mut uvs = Vec::with_capacity(positions.capacity());
        for iy in 0..=h {
            let v = iy as f64 / h as f64;
            let theta = v * std::f64::consts::PI;
            for ix in 0..=w {
                let u = ix as f64 / w as f64;
                let phi = u * std::f64::consts::TAU;
                let p = Vec3::new(
                    // Mirrored on x: the standard sphere has -cos(phi) here.
                    radius * phi.cos() * theta.sin(),
                    radius * theta.cos(),
                    radius * phi.sin() * theta.sin(),
                );
                positions.push(p.to_f32());
                uvs.push([u as f32, 1.0 - v as f32]);
            }
        }

        let row = w + 1;
        let mut indices = Vec::with_capacity((w * (h * 2 - 2) * 3) as usize);
        for iy in 0..h {
            for ix in 0..w {
                let a = iy * row + ix + 1;
                let b = iy * row + ix;
                let c = (iy + 1) * row + ix;
                let d = (iy + 1) * row + ix + 1;
                // Pole rows collapse to a point; skip their degenerate half.
                if iy != 0 {
                    indices.extend_from_slice(&[a, b, d]);
                }
                if iy != h - 1 {
                    indices.extend_from_slice(&[b, c, d]);
                }
            }
        }

        Self {
            radius,
            positions,
            uvs,
            indices,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Geometric normal of triangle `i` (unnormalized, from winding order).
    pub fn face_normal(&self, i: usize) -> Vec3 {
        let idx = &self.indices[i * 3..i * 3 + 3];
        let p = |k: usize| {
            let [x, y, z] = self.positions[idx[k] as usize];
            Vec3::new(x as f64, y as f64, z as f64)
        };
        (p(1) - p(0)).cross(p(2) - p(0))
    }

    /// Centroid of triangle `i`.
    pub fn face_centroid(&self, i: usize) -> Vec3 {
        let idx = &self.indices[i * 3..i * 3 + 3];
        idx.iter()
            .map(|&k| {
                let [x, y, z] = self.positions[k as usize];
                Vec3::new(x as f64, y as f64, z as f64)
            })
            .fold(Vec3::ZERO, |acc, p| acc + p)
            .scale(1.0 / 3.0)
    }
}

#[cfg(test)]
mod tests {
    use super::SphereMesh;

    #[test]
    fn grid_and_triangle_counts() {
        let mesh = SphereMesh::inside_out(500.0, 60, 40);
        assert_eq!(mesh.vertex_count(), 61 * 41);
        assert_eq!(mesh.uvs.len(), mesh.vertex_count());
        assert_eq!(mesh.triangle_count(), 60 * (40 * 2 - 2));
        let max = *mesh.indices.iter().max().unwrap() as usize;
        assert!(max < mesh.vertex_count());
    }

    #[test]
    fn vertices_lie_on_sphere() {
        let mesh = SphereMesh::inside_out(500.0, 16, 8);
        for [x, y, z] in &mesh.positions {
            let r = ((x * x + y * y + z * z) as f64).sqrt();
            assert!((r - 500.0).abs() < 1e-2, "radius {r}");
        }
    }

    #[test]
    fn faces_point_inward() {
        let mesh = SphereMesh::inside_out(500.0, 60, 40);
        for i in 0..mesh.triangle_count() {
            let n = mesh.face_normal(i);
            let c = mesh.face_centroid(i);
            assert!(n.dot(c) < 0.0, "triangle {i} faces outward");
        }
    }

    #[test]
    fn degenerate_segment_counts_are_raised() {
        let mesh = SphereMesh::inside_out(1.0, 0, 0);
        assert_eq!(mesh.vertex_count(), 4 * 3);
    }
}
