use super::Vec3;

/// A viewing direction in degrees: longitude around the vertical axis and
/// latitude above (+) or below (-) the horizon.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct LonLat {
    pub lon_deg: f64,
    pub lat_deg: f64,
}

impl LonLat {
    pub fn new(lon_deg: f64, lat_deg: f64) -> Self {
        Self { lon_deg, lat_deg }
    }
}

/// Point on a sphere of `radius` around the origin, y-up.
///
/// `phi` is the polar angle measured from +y (`90 - lat`), `theta` the
/// azimuth measured from +x towards +z (`lon`).
pub fn spherical_to_cartesian(dir: LonLat, radius: f64) -> Vec3 {
    let phi = (90.0 - dir.lat_deg).to_radians();
    let theta = dir.lon_deg.to_radians();

    Vec3::new(
        radius * phi.sin() * theta.cos(),
        radius * phi.cos(),
        radius * phi.sin() * theta.sin(),
    )
}

#[cfg(test)]
mod tests {
    use super::{LonLat, spherical_to_cartesian};

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn horizon_prime_direction_is_plus_x() {
        let p = spherical_to_cartesian(LonLat::new(0.0, 0.0), 500.0);
        assert_close(p.x, 500.0, 1e-9);
        assert_close(p.y, 0.0, 1e-9);
        assert_close(p.z, 0.0, 1e-9);
    }

    #[test]
    fn quarter_turn_is_plus_z() {
        let p = spherical_to_cartesian(LonLat::new(90.0, 0.0), 500.0);
        assert_close(p.x, 0.0, 1e-9);
        assert_close(p.y, 0.0, 1e-9);
        assert_close(p.z, 500.0, 1e-9);
    }

    #[test]
    fn raised_latitude_tilts_up() {
        let p = spherical_to_cartesian(LonLat::new(0.0, 45.0), 500.0);
        let h = 500.0 * std::f64::consts::FRAC_1_SQRT_2;
        assert_close(p.x, h, 1e-9);
        assert_close(p.y, h, 1e-9);
        assert_close(p.z, 0.0, 1e-9);
    }

    #[test]
    fn result_lies_on_sphere() {
        for (lon, lat) in [(12.5, -30.0), (-200.0, 84.0), (720.0, 0.0)] {
            let p = spherical_to_cartesian(LonLat::new(lon, lat), 10.0);
            assert_close(p.length(), 10.0, 1e-9);
        }
    }
}
