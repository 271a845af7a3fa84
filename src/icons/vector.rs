use std::fmt::Write as _;

use crate::icons::{Icon, IconFactory};
use crate::models::{Category, HexColor};

/// Outline of the pin disc on a 24x24 grid.
pub const PIN_PATH: &str =
    "M 12,2 C 6.5,2 2,6.5 2,12 2,17.5 6.5,22 12,22 17.5,22 22,17.5 22,12 22,6.5 17.5,2 12,2 Z";

const RESTAURANT_PATH: &str =
    "M 8,6 V 11 M 10,6 V 11 M 12,6 V 11 M 8,11 H 12 M 10,11 V 18 M 15,6 C 17,7 17,11 15,12 V 18";
const HOTEL_PATH: &str = "M 6,17 V 8 M 6,13 H 18 V 17 M 6,11 H 9 M 11,11 H 18 V 13";
const BEACH_PATH: &str =
    "M 5,10 C 7,8 9,12 12,10 C 15,8 17,12 19,10 M 5,14 C 7,12 9,16 12,14 C 15,12 17,16 19,14";
const SIGHT_PATH: &str = "M 6,9 L 12,5 L 18,9 Z M 7,11 V 16 M 10,11 V 16 M 14,11 V 16 M 17,11 V 16 M 6,18 H 18";

pub const STROKE_COLOR: HexColor = HexColor::WHITE;
pub const STROKE_WEIGHT: f32 = 3.0;
pub const FILL_OPACITY: f32 = 1.0;
pub const SCALE: f32 = 1.2;
pub const ANCHOR: (f32, f32) = (12.0, 12.0);

/// Glyph path drawn inside the pin for a category.
pub fn glyph_path(category: &Category) -> Option<&'static str> {
    match category {
        Category::Restaurants => Some(RESTAURANT_PATH),
        Category::Hotels => Some(HOTEL_PATH),
        Category::Beaches => Some(BEACH_PATH),
        Category::Sights => Some(SIGHT_PATH),
        Category::Unknown(_) => None,
    }
}

/// A pin shape definition in the style map providers accept for symbol icons.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorIcon {
    pub path: &'static str,
    pub glyph: Option<&'static str>,
    pub fill_color: HexColor,
    pub fill_opacity: f32,
    pub stroke_color: HexColor,
    pub stroke_weight: f32,
    pub scale: f32,
    pub anchor: (f32, f32),
}

impl VectorIcon {
    pub fn new(color: HexColor, category: &Category) -> Self {
        Self {
            path: PIN_PATH,
            glyph: glyph_path(category),
            fill_color: color,
            fill_opacity: FILL_OPACITY,
            stroke_color: STROKE_COLOR,
            stroke_weight: STROKE_WEIGHT,
            scale: SCALE,
            anchor: ANCHOR,
        }
    }

    /// Standalone SVG document for the icon, sized by `scale`.
    pub fn to_svg(&self) -> String {
        let size = 24.0 * self.scale;
        let mut svg = String::new();
        let _ = write!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 24 24">"#
        );
        let _ = write!(
            svg,
            r#"<path d="{}" fill="{}" fill-opacity="{}" stroke="{}" stroke-width="{}"/>"#,
            self.path, self.fill_color, self.fill_opacity, self.stroke_color, self.stroke_weight
        );
        if let Some(glyph) = self.glyph {
            let _ = write!(
                svg,
                r#"<path d="{}" fill="none" stroke="{}" stroke-width="1.5" stroke-linecap="round" stroke-linejoin="round"/>"#,
                glyph, self.stroke_color
            );
        }
        svg.push_str("</svg>");
        svg
    }
}

/// Synchronous vector icons. Never unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct VectorIconFactory;

impl IconFactory for VectorIconFactory {
    fn render(&self, color: HexColor, category: &Category) -> Option<Icon> {
        Some(Icon::Vector(VectorIcon::new(color, category)))
    }
}
