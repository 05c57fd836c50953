use foundation::Rgb;
use serde::{Deserialize, Serialize};

/// Texture synthesis parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureConfig {
    pub width: u32,
    pub height: u32,
    #[serde(with = "tour::hex_color")]
    pub sky: Rgb,
    #[serde(with = "tour::hex_color")]
    pub ground: Rgb,
    pub decoration_count: usize,
}

impl Default for TextureConfig {
    fn default() -> Self {
        Self {
            width: 4096,
            height: 2048,
            sky: Rgb::new(0x87, 0xCE, 0xEB),
            ground: Rgb::new(0x2C, 0x5F, 0x2D),
            decoration_count: 15,
        }
    }
}

/// Everything the viewer needs that is fixed for a session.
///
/// Deserializing fills any missing field from [`ViewerConfig::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub sphere_radius: f64,
    pub width_segments: u32,
    pub height_segments: u32,
    pub fov_y_deg: f64,
    pub near: f64,
    pub far: f64,
    /// Camera sits this far along +z from the sphere centre.
    pub camera_offset: f64,
    /// Degrees of rotation per pixel of drag.
    pub drag_sensitivity: f64,
    /// Longitude added on every idle frame (degrees).
    pub auto_rotate_deg: f64,
    pub latitude_limit_deg: f64,
    pub texture: TextureConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            sphere_radius: 500.0,
            width_segments: 60,
            height_segments: 40,
            fov_y_deg: 75.0,
            near: 0.1,
            far: 1000.0,
            camera_offset: 0.1,
            drag_sensitivity: 0.1,
            auto_rotate_deg: 0.05,
            latitude_limit_deg: 85.0,
            texture: TextureConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ViewerConfig;
    use foundation::Rgb;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: ViewerConfig =
            serde_json::from_str(r##"{"fov_y_deg": 90.0, "texture": {"sky": "#000000"}}"##)
                .unwrap();
        assert_eq!(cfg.fov_y_deg, 90.0);
        assert_eq!(cfg.sphere_radius, 500.0);
        assert_eq!(cfg.texture.sky, Rgb::new(0, 0, 0));
        assert_eq!(cfg.texture.width, 4096);
        assert_eq!(cfg.texture.decoration_count, 15);
    }
}
