//! Equirectangular texture synthesis for a tour stop.
//!
//! The background (sky → accent → ground gradient and the translucent road
//! band) is painted into an RGBA raster. Text is emitted as positioned
//! [`TextRun`]s for the host's text pass; layout constants are authored for a
//! 2048 px tall canvas and scale with the actual height.

use foundation::{Rgb, Rgba};
use rand::Rng;
use tour::{Navigator, TourStop};

use crate::config::TextureConfig;

const REFERENCE_HEIGHT: f32 = 2048.0;
const LANDMARKS: [&str; 5] = ["🌳", "🏠", "🚗", "🏨", "🌺"];
pub const USAGE_HINT: &str = "← Drag to look around → | Use arrows to navigate";

/// Owned RGBA8 raster, row-major, top row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Canvas {
    /// Allocate an opaque black canvas. `None` if either side is zero or the
    /// buffer cannot be reserved.
    pub fn allocate(width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        let len = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(4)?;
        let mut pixels = Vec::new();
        pixels.try_reserve_exact(len).ok()?;
        pixels.extend(std::iter::repeat_n([0u8, 0, 0, 255], len / 4).flatten());
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.offset(x, y);
        Some(Rgb::new(self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]))
    }

    /// Fill every row with the colour of a top-to-bottom gradient sampled
    /// at the row centre. `stops` are `(offset, colour)` with ascending
    /// offsets in `0..=1`.
    pub fn fill_vertical_gradient(&mut self, stops: &[(f32, Rgb)]) {
        for y in 0..self.height {
            let t = (y as f32 + 0.5) / self.height as f32;
            let color = gradient_at(stops, t);
            let start = self.offset(0, y);
            let end = start + self.width as usize * 4;
            for px in self.pixels[start..end].chunks_exact_mut(4) {
                px[0] = color.r;
                px[1] = color.g;
                px[2] = color.b;
                px[3] = 255;
            }
        }
    }

    /// Composite `color` over the rows `y0..y1`, clipped to the canvas.
    pub fn blend_rows(&mut self, y0: u32, y1: u32, color: Rgba) {
        let y1 = y1.min(self.height);
        for y in y0.min(y1)..y1 {
            let start = self.offset(0, y);
            let end = start + self.width as usize * 4;
            for px in self.pixels[start..end].chunks_exact_mut(4) {
                let out = color.over(Rgb::new(px[0], px[1], px[2]));
                px[0] = out.r;
                px[1] = out.g;
                px[2] = out.b;
            }
        }
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }
}

fn gradient_at(stops: &[(f32, Rgb)], t: f32) -> Rgb {
    let Some(&(first_at, first)) = stops.first() else {
        return Rgb::default();
    };
    if t <= first_at {
        return first;
    }
    for pair in stops.windows(2) {
        let (a_at, a) = pair[0];
        let (b_at, b) = pair[1];
        if t <= b_at {
            let span = (b_at - a_at).max(f32::EPSILON);
            return a.lerp(b, (t - a_at) / span);
        }
    }
    stops[stops.len() - 1].1
}

/// What a text run is for; lets consumers find runs without matching text.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TextRole {
    Name,
    Description,
    Position,
    Hint,
    NextArrow,
    PreviousArrow,
    Landmark,
}

/// A line of centred text anchored at `(x, y)` in canvas pixels (baseline).
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub role: TextRole,
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub size_px: f32,
    pub bold: bool,
    pub color: Rgba,
}

/// The synthesized panorama for one stop.
///
/// `canvas` is `None` when the raster could not be allocated; such a
/// texture is still uploadable and renders blank.
#[derive(Debug, Clone, PartialEq)]
pub struct PanoramaTexture {
    pub width: u32,
    pub height: u32,
    pub canvas: Option<Canvas>,
    pub text: Vec<TextRun>,
}

impl PanoramaTexture {
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            canvas: None,
            text: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.canvas.is_none()
    }

    pub fn runs(&self, role: TextRole) -> impl Iterator<Item = &TextRun> {
        self.text.iter().filter(move |r| r.role == role)
    }

    pub fn has(&self, role: TextRole) -> bool {
        self.runs(role).next().is_some()
    }
}

/// Paint the panorama for the navigator's current stop.
pub fn synthesize_for(nav: &Navigator, config: &TextureConfig) -> PanoramaTexture {
    synthesize(
        nav.current_stop(),
        !nav.is_first(),
        !nav.is_last(),
        config,
        &mut rand::thread_rng(),
    )
}

pub fn synthesize(
    stop: &TourStop,
    has_previous: bool,
    has_next: bool,
    config: &TextureConfig,
    rng: &mut impl Rng,
) -> PanoramaTexture {
    let Some(mut canvas) = Canvas::allocate(config.width, config.height) else {
        return PanoramaTexture::empty(config.width, config.height);
    };

    let w = config.width as f32;
    let h = config.height as f32;
    let scale = h / REFERENCE_HEIGHT;

    canvas.fill_vertical_gradient(&[(0.0, config.sky), (0.5, stop.color), (1.0, config.ground)]);
    canvas.blend_rows(
        (h * 0.6) as u32,
        config.height,
        Rgb::new(80, 80, 80).with_alpha(0.3),
    );

    let white = |alpha: f32| Rgb::WHITE.with_alpha(alpha);
    let centred = |role, text: String, y: f32, size: f32, bold, alpha| TextRun {
        role,
        text,
        x: w / 2.0,
        y,
        size_px: size * scale,
        bold,
        color: white(alpha),
    };

    let mut text = vec![
        centred(TextRole::Name, stop.name.clone(), h / 2.0 - 100.0 * scale, 120.0, true, 0.9),
        centred(
            TextRole::Description,
            stop.description.clone(),
            h / 2.0 + 20.0 * scale,
            70.0,
            false,
            0.8,
        ),
        centred(
            TextRole::Position,
            format!("📍 {}", stop.position),
            h / 2.0 + 100.0 * scale,
            50.0,
            false,
            0.7,
        ),
        centred(TextRole::Hint, USAGE_HINT.to_string(), h - 100.0 * scale, 45.0, false, 0.6),
    ];

    if has_next {
        text.push(TextRun {
            x: w * 0.85,
            ..centred(TextRole::NextArrow, "→".to_string(), h / 2.0, 200.0, true, 0.5)
        });
    }
    if has_previous {
        text.push(TextRun {
            x: w * 0.15,
            ..centred(TextRole::PreviousArrow, "←".to_string(), h / 2.0, 200.0, true, 0.5)
        });
    }

    for _ in 0..config.decoration_count {
        let glyph = LANDMARKS[rng.gen_range(0..LANDMARKS.len())];
        text.push(TextRun {
            role: TextRole::Landmark,
            text: glyph.to_string(),
            x: rng.gen_range(0.0..w),
            y: h * 0.4 + rng.gen_range(0.0..200.0) * scale,
            size_px: rng.gen_range(40.0..90.0) * scale,
            bold: false,
            color: white(rng.gen_range(0.2..0.5)),
        });
    }

    PanoramaTexture {
        width: config.width,
        height: config.height,
        canvas: Some(canvas),
        text,
    }
}
