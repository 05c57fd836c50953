//! sRGB colours as used by the texture painter.

/// 8-bit RGB colour.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// An [`Rgb`] colour with a straight (non-premultiplied) alpha in `0..=1`.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Rgba {
    pub rgb: Rgb,
    pub alpha: f32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    MissingHash,
    BadLength(usize),
    BadDigit(String),
}

impl std::fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColorParseError::MissingHash => write!(f, "colour must start with '#'"),
            ColorParseError::BadLength(n) => {
                write!(f, "colour must have 3 or 6 hex digits, got {n}")
            }
            ColorParseError::BadDigit(s) => write!(f, "invalid hex digits in colour: {s}"),
        }
    }
}

impl std::error::Error for ColorParseError {}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` or the short `#RGB` form.
    pub fn from_hex(raw: &str) -> Result<Self, ColorParseError> {
        let digits = raw.trim().strip_prefix('#').ok_or(ColorParseError::MissingHash)?;
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorParseError::BadDigit(digits.to_string()));
        }
        let channel = |s: &str| {
            u8::from_str_radix(s, 16).map_err(|_| ColorParseError::BadDigit(digits.to_string()))
        };

        match digits.len() {
            6 => Ok(Self::new(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            3 => {
                let r = channel(&digits[0..1])?;
                let g = channel(&digits[1..2])?;
                let b = channel(&digits[2..3])?;
                Ok(Self::new(r * 17, g * 17, b * 17))
            }
            n => Err(ColorParseError::BadLength(n)),
        }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Linear interpolation per channel, `t` clamped to `0..=1`.
    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }

    pub fn with_alpha(self, alpha: f32) -> Rgba {
        Rgba::new(self, alpha)
    }
}

impl Rgba {
    pub fn new(rgb: Rgb, alpha: f32) -> Self {
        Self {
            rgb,
            alpha: alpha.clamp(0.0, 1.0),
        }
    }

    /// Source-over composite of `self` onto an opaque `dst`.
    pub fn over(self, dst: Rgb) -> Rgb {
        dst.lerp(self.rgb, self.alpha)
    }
}
