//! Headless drivers for the tour engine, shared by the `tour` binary.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use foundation::math::Vec2;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tour::{Navigator, TourConfig};
use viewer::headless::HeadlessHost;
use viewer::texture::{PanoramaTexture, TextRun, synthesize};
use viewer::{PointerEvent, TextureConfig, Viewer, ViewerConfig, Viewport};

pub fn load_tour(path: Option<&Path>) -> Result<TourConfig, String> {
    let Some(path) = path else {
        return Ok(TourConfig::default());
    };
    let raw = fs::read_to_string(path).map_err(|e| format!("read {path:?}: {e}"))?;
    TourConfig::from_json(&raw).map_err(|e| format!("{path:?}: {e}"))
}

pub fn load_viewer_config(path: Option<&Path>) -> Result<ViewerConfig, String> {
    let Some(path) = path else {
        return Ok(ViewerConfig::default());
    };
    let raw = fs::read_to_string(path).map_err(|e| format!("read {path:?}: {e}"))?;
    serde_json::from_str(&raw).map_err(|e| format!("{path:?}: {e}"))
}

/// One line per stop: `1. Name (#RRGGBB) - position`.
pub fn stop_lines(tour: &TourConfig) -> Vec<String> {
    tour.stops()
        .iter()
        .enumerate()
        .map(|(i, stop)| {
            format!(
                "{}. {} ({}) - {}",
                i + 1,
                stop.name,
                stop.color.to_hex(),
                stop.position
            )
        })
        .collect()
}

/// Synthesize the panorama for stop `index` (zero-based). A seed makes the
/// scattered landmarks reproducible.
pub fn render_stop(
    tour: Arc<TourConfig>,
    index: usize,
    config: &TextureConfig,
    seed: Option<u64>,
) -> Result<PanoramaTexture, String> {
    let mut nav = Navigator::new(tour);
    if !nav.go_to(index) {
        return Err(format!(
            "stop {index} out of range (tour has {} stops)",
            nav.stop_count()
        ));
    }
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    Ok(synthesize(
        nav.current_stop(),
        !nav.is_first(),
        !nav.is_last(),
        config,
        &mut rng,
    ))
}

pub fn write_png(texture: &PanoramaTexture, out: &Path) -> Result<(), String> {
    let canvas = texture
        .canvas
        .as_ref()
        .ok_or_else(|| format!("{}x{} texture has no raster", texture.width, texture.height))?;
    let img = image::RgbaImage::from_raw(canvas.width(), canvas.height(), canvas.pixels().to_vec())
        .ok_or_else(|| "raster size does not match dimensions".to_string())?;
    img.save(out).map_err(|e| format!("write {out:?}: {e}"))
}

/// Text overlay entry as printed next to an exported PNG.
#[derive(Debug, Serialize)]
pub struct OverlayEntry {
    pub role: String,
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub size_px: f32,
    pub bold: bool,
    pub color: String,
    pub alpha: f32,
}

impl From<&TextRun> for OverlayEntry {
    fn from(run: &TextRun) -> Self {
        Self {
            role: format!("{:?}", run.role),
            text: run.text.clone(),
            x: run.x,
            y: run.y,
            size_px: run.size_px,
            bold: run.bold,
            color: run.color.rgb.to_hex(),
            alpha: run.color.alpha,
        }
    }
}

pub fn overlay(texture: &PanoramaTexture) -> Vec<OverlayEntry> {
    texture.text.iter().map(OverlayEntry::from).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OrbitSample {
    pub frame: usize,
    pub lon_deg: f64,
    pub lat_deg: f64,
    pub target: [f64; 3],
}

/// Mount a viewer on a headless host, optionally apply one drag of
/// `(dx, dy)` pixels, then sample the camera after each of `frames` frames.
pub fn orbit(
    tour: Arc<TourConfig>,
    index: usize,
    config: ViewerConfig,
    frames: usize,
    drag: Option<(f64, f64)>,
) -> Result<Vec<OrbitSample>, String> {
    let mut nav = Navigator::new(tour);
    if !nav.go_to(index) {
        return Err(format!("stop {index} out of range"));
    }

    let mut host = HeadlessHost::new();
    let mut viewer = Viewer::new(config, Viewport::new(1280, 720));
    viewer.mount(&mut host, &nav).map_err(|e| e.to_string())?;

    if let Some((dx, dy)) = drag {
        viewer.on_pointer(PointerEvent::Down(Vec2::new(0.0, 0.0)));
        viewer.on_pointer(PointerEvent::Move(Vec2::new(dx, dy)));
        viewer.on_pointer(PointerEvent::Up);
    }

    let mut samples = Vec::with_capacity(frames);
    for frame in 1..=frames {
        host.run_frames(&mut viewer, 1);
        let target = viewer.camera().target;
        samples.push(OrbitSample {
            frame,
            lon_deg: viewer.orientation().lon_deg(),
            lat_deg: viewer.orientation().lat_deg(),
            target: [target.x, target.y, target.z],
        });
    }

    viewer.unmount(&mut host);
    Ok(samples)
}
