use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A toggleable category of points of interest, as served by `GET /api/layers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layer {
    pub id: String,
    pub name: String,
    pub color: String,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_visible() -> bool {
    true
}

impl Layer {
    pub fn category(&self) -> Category {
        Category::from_id(&self.id)
    }
}

/// A single point of interest, as served by `GET /api/markers`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub id: String,
    pub name: String,
    pub description: String,
    pub lat: f64,
    pub lng: f64,
    pub layer_id: String,
    #[serde(default)]
    pub google_maps_url: Option<String>,
}

/// Outcome of `POST /api/admin/sync-sheet`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncResult {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markers_added: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geocode_errors: Option<Vec<String>>,
}

impl SyncResult {
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            markers_added: None,
            geocode_errors: None,
        }
    }
}

/// The closed set of listing categories the map knows how to draw.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Restaurants,
    Hotels,
    Beaches,
    Sights,
    /// A layer id outside the known set, kept verbatim.
    Unknown(String),
}

impl Category {
    pub const KNOWN: [Category; 4] = [
        Category::Restaurants,
        Category::Hotels,
        Category::Beaches,
        Category::Sights,
    ];

    pub fn from_id(id: &str) -> Self {
        match id {
            "restaurants" => Category::Restaurants,
            "hotels" => Category::Hotels,
            "beaches" => Category::Beaches,
            "sights" => Category::Sights,
            other => Category::Unknown(other.to_string()),
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Category::Restaurants => "restaurants",
            Category::Hotels => "hotels",
            Category::Beaches => "beaches",
            Category::Sights => "sights",
            Category::Unknown(id) => id,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Category::Unknown(_))
    }

    /// File name of the category's glyph bitmap, if it has one.
    pub fn glyph_file(&self) -> Option<&'static str> {
        match self {
            Category::Restaurants => Some("restaurants.png"),
            Category::Hotels => Some("hotels.png"),
            Category::Beaches => Some("beaches.png"),
            Category::Sights => Some("sights.png"),
            Category::Unknown(_) => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// An opaque sRGB color parsed from a `#RRGGBB` or `#RGB` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl HexColor {
    pub const DEFAULT: HexColor = HexColor { r: 0, g: 0, b: 0 };
    pub const WHITE: HexColor = HexColor { r: 255, g: 255, b: 255 };

    /// Parses `value`, falling back to [`HexColor::DEFAULT`] on malformed input.
    pub fn parse_or_default(value: &str) -> Self {
        value.parse().unwrap_or(Self::DEFAULT)
    }

    pub fn to_rgba(self) -> image::Rgba<u8> {
        image::Rgba([self.r, self.g, self.b, 255])
    }
}

impl FromStr for HexColor {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let hex = value
            .trim()
            .strip_prefix('#')
            .ok_or_else(|| anyhow::anyhow!("color must start with '#': {}", value))?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            anyhow::bail!("invalid hex color: {}", value);
        }
        let channel = |s: &str| u8::from_str_radix(s, 16);
        match hex.len() {
            6 => Ok(HexColor {
                r: channel(&hex[0..2])?,
                g: channel(&hex[2..4])?,
                b: channel(&hex[4..6])?,
            }),
            3 => {
                let r = channel(&hex[0..1])?;
                let g = channel(&hex[1..2])?;
                let b = channel(&hex[2..3])?;
                Ok(HexColor {
                    r: r * 17,
                    g: g * 17,
                    b: b * 17,
                })
            }
            _ => Err(anyhow::anyhow!("invalid hex color: {}", value)),
        }
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}
