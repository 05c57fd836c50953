use foundation::Rgb;
use serde::{Deserialize, Serialize};

/// One waypoint along the route to the hotel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TourStop {
    pub name: String,
    pub description: String,
    /// Accent blended into the middle of the stop's panorama.
    #[serde(with = "hex_color")]
    pub color: Rgb,
    /// Display-only location hint.
    pub position: String,
}

impl TourStop {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        color: Rgb,
        position: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            color,
            position: position.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TourError {
    NoStops,
    Parse(String),
}

impl std::fmt::Display for TourError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TourError::NoStops => write!(f, "a tour needs at least one stop"),
            TourError::Parse(msg) => write!(f, "invalid tour definition: {msg}"),
        }
    }
}

impl std::error::Error for TourError {}

/// Ordered, non-empty list of stops, fixed for the lifetime of a viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TourConfig {
    stops: Vec<TourStop>,
}

#[derive(Deserialize)]
struct RawTour {
    stops: Vec<TourStop>,
}

impl TourConfig {
    pub fn new(stops: Vec<TourStop>) -> Result<Self, TourError> {
        if stops.is_empty() {
            return Err(TourError::NoStops);
        }
        Ok(Self { stops })
    }

    /// Parse `{"stops": [{"name", "description", "color", "position"}, ...]}`.
    pub fn from_json(raw: &str) -> Result<Self, TourError> {
        let parsed: RawTour =
            serde_json::from_str(raw).map_err(|e| TourError::Parse(e.to_string()))?;
        Self::new(parsed.stops)
    }

    pub fn stops(&self) -> &[TourStop] {
        &self.stops
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Never true for a constructed config.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TourStop> {
        self.stops.get(index)
    }
}

impl Default for TourConfig {
    /// The drive from the highway exit to the hotel entrance.
    fn default() -> Self {
        Self {
            stops: vec![
                TourStop::new(
                    "Highway Exit",
                    "Start your journey from the main highway exit",
                    Rgb::new(0x4A, 0x90, 0xE2),
                    "14.6°N, 121.0°E",
                ),
                TourStop::new(
                    "Main Road Turn",
                    "Turn right at the main intersection",
                    Rgb::new(0x7B, 0x68, 0xEE),
                    "200m from highway",
                ),
                TourStop::new(
                    "Neighborhood Street",
                    "Continue through the peaceful neighborhood",
                    Rgb::new(0x50, 0xC8, 0x78),
                    "500m from highway",
                ),
                TourStop::new(
                    "Hotel Entrance",
                    "Welcome to Vencio's Garden Hotel!",
                    Rgb::new(0xD4, 0xAF, 0x37),
                    "Arrival",
                ),
            ],
        }
    }
}

/// Serde adapter storing an [`Rgb`] as `#RRGGBB`.
pub mod hex_color {
    use foundation::Rgb;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(color: &Rgb, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&color.to_hex())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Rgb, D::Error> {
        let raw = String::deserialize(d)?;
        Rgb::from_hex(&raw).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::{TourConfig, TourError, TourStop};
    use foundation::Rgb;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_tour_has_four_stops_ending_at_hotel() {
        let tour = TourConfig::default();
        assert_eq!(tour.len(), 4);
        assert_eq!(tour.stops()[0].name, "Highway Exit");
        assert_eq!(tour.stops()[3].name, "Hotel Entrance");
        assert_eq!(tour.stops()[3].color, Rgb::new(0xD4, 0xAF, 0x37));
    }

    #[test]
    fn empty_tour_is_rejected() {
        assert_eq!(TourConfig::new(Vec::new()), Err(TourError::NoStops));
        assert_eq!(
            TourConfig::from_json(r#"{"stops": []}"#),
            Err(TourError::NoStops)
        );
    }

    #[test]
    fn parses_json_definition() {
        let raw = r##"{"stops": [
            {"name": "Gate", "description": "Front gate", "color": "#112233", "position": "Arrival"}
        ]}"##;
        let tour = TourConfig::from_json(raw).unwrap();
        assert_eq!(
            tour.stops(),
            &[TourStop::new("Gate", "Front gate", Rgb::new(0x11, 0x22, 0x33), "Arrival")]
        );
    }

    #[test]
    fn bad_colour_is_a_parse_error() {
        let raw = r#"{"stops": [
            {"name": "Gate", "description": "", "color": "red", "position": ""}
        ]}"#;
        assert!(matches!(TourConfig::from_json(raw), Err(TourError::Parse(_))));

        let multibyte = r##"{"stops": [
            {"name": "Gate", "description": "", "color": "#a€bc", "position": ""}
        ]}"##;
        assert!(matches!(
            TourConfig::from_json(multibyte),
            Err(TourError::Parse(_))
        ));
    }

    #[test]
    fn serializes_colour_as_hex() {
        let tour = TourConfig::default();
        let json = serde_json::to_value(&tour).unwrap();
        assert_eq!(json["stops"][1]["color"], "#7B68EE");
    }
}
