pub mod composite;
pub mod glyphs;
pub mod raster;
pub mod vector;

use std::sync::Arc;

use image::RgbaImage;

use crate::models::{Category, HexColor};

pub use composite::{CompositeIconFactory, PrepareReport};
pub use glyphs::{DirGlyphSource, GlyphSource, HttpGlyphSource};
pub use vector::{VectorIcon, VectorIconFactory};

/// A renderable marker glyph.
#[derive(Debug, Clone, PartialEq)]
pub enum Icon {
    Vector(VectorIcon),
    Raster(Arc<RgbaImage>),
}

/// Derives the glyph for a marker from its layer color and category.
///
/// Implementations must be pure in their inputs: the same color and category
/// always give the same-looking icon. `None` means the icon is unavailable and
/// the marker is left off the map.
pub trait IconFactory {
    fn render(&self, color: HexColor, category: &Category) -> Option<Icon>;
}

impl<F: IconFactory + ?Sized> IconFactory for &F {
    fn render(&self, color: HexColor, category: &Category) -> Option<Icon> {
        (**self).render(color, category)
    }
}

/// The icon strategy picked at startup.
#[derive(Debug, Clone)]
pub enum IconSet {
    Vector(VectorIconFactory),
    Composite(CompositeIconFactory),
}

impl Default for IconSet {
    fn default() -> Self {
        IconSet::Vector(VectorIconFactory)
    }
}

impl IconFactory for IconSet {
    fn render(&self, color: HexColor, category: &Category) -> Option<Icon> {
        match self {
            IconSet::Vector(factory) => factory.render(color, category),
            IconSet::Composite(factory) => factory.render(color, category),
        }
    }
}
