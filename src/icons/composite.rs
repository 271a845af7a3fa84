use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use image::RgbaImage;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::icons::raster::{self, ICON_SIZE};
use crate::icons::{GlyphSource, Icon, IconFactory};
use crate::models::{Category, HexColor, Layer};

#[derive(Debug, Clone)]
enum GlyphState {
    Ready {
        white: Arc<RgbaImage>,
        icons: HashMap<HexColor, Arc<RgbaImage>>,
    },
    Unavailable,
}

/// Which categories came out of a [`CompositeIconFactory::prepare`] call usable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrepareReport {
    pub ready: Vec<Category>,
    pub unavailable: Vec<Category>,
}

impl PrepareReport {
    pub fn is_complete(&self) -> bool {
        self.unavailable.is_empty()
    }
}

/// Raster icons: each category's bitmap glyph, whitened and laid over a disc
/// of the layer color.
///
/// Glyphs are loaded by [`prepare`](Self::prepare). Until a category's glyph
/// has loaded, or after its load failed, [`render`](IconFactory::render)
/// returns `None` for it.
#[derive(Debug, Clone)]
pub struct CompositeIconFactory {
    size: u32,
    glyphs: HashMap<Category, GlyphState>,
}

impl Default for CompositeIconFactory {
    fn default() -> Self {
        Self::new(ICON_SIZE)
    }
}

impl CompositeIconFactory {
    pub fn new(size: u32) -> Self {
        Self {
            size,
            glyphs: HashMap::new(),
        }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn is_ready(&self, category: &Category) -> bool {
        matches!(self.glyphs.get(category), Some(GlyphState::Ready { .. }))
    }

    /// Load the glyphs for every category in `layers` and composite them with
    /// each layer's color.
    ///
    /// Loads run concurrently and are all awaited before this returns. Glyphs
    /// that are already loaded are not fetched again; categories that failed
    /// before are retried.
    pub async fn prepare<S: GlyphSource>(
        &mut self,
        source: Arc<S>,
        layers: &[Layer],
    ) -> PrepareReport {
        let mut wanted: HashMap<Category, Vec<HexColor>> = HashMap::new();
        for layer in layers {
            wanted
                .entry(layer.category())
                .or_default()
                .push(HexColor::parse_or_default(&layer.color));
        }

        let mut tasks = JoinSet::new();
        for category in wanted.keys() {
            if self.is_ready(category) {
                continue;
            }
            if !category.is_known() {
                debug!(%category, "no glyph for unknown category");
                self.glyphs.insert(category.clone(), GlyphState::Unavailable);
                continue;
            }
            let source = Arc::clone(&source);
            let category = category.clone();
            tasks.spawn(async move {
                let loaded = source.load(category.clone()).await;
                (category, loaded)
            });
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((category, loaded)) => {
                    let state = match loaded.and_then(|bytes| whiten(&category, &bytes)) {
                        Ok(white) => GlyphState::Ready {
                            white: Arc::new(white),
                            icons: HashMap::new(),
                        },
                        Err(e) => {
                            warn!(%category, error = %e, "glyph unavailable, its markers will not be drawn");
                            GlyphState::Unavailable
                        }
                    };
                    self.glyphs.insert(category, state);
                }
                Err(e) => warn!(error = %e, "glyph load task failed"),
            }
        }

        let size = self.size;
        let mut report = PrepareReport::default();
        let categories: BTreeSet<Category> = wanted.keys().cloned().collect();
        for category in categories {
            match self.glyphs.get_mut(&category) {
                Some(GlyphState::Ready { white, icons }) => {
                    let white = Arc::clone(white);
                    for color in &wanted[&category] {
                        icons
                            .entry(*color)
                            .or_insert_with(|| Arc::new(raster::composite(&white, *color, size)));
                    }
                    report.ready.push(category);
                }
                Some(GlyphState::Unavailable) => report.unavailable.push(category),
                None => {
                    // The task panicked before reporting back.
                    self.glyphs.insert(category.clone(), GlyphState::Unavailable);
                    report.unavailable.push(category);
                }
            }
        }

        debug!(
            ready = report.ready.len(),
            unavailable = report.unavailable.len(),
            "glyphs prepared"
        );
        report
    }
}

fn whiten(category: &Category, bytes: &[u8]) -> Result<RgbaImage> {
    let glyph = raster::decode_glyph(bytes).map_err(|e| Error::AssetLoad {
        category: category.clone(),
        reason: e.to_string(),
    })?;
    Ok(raster::tint_white(&glyph))
}

impl IconFactory for CompositeIconFactory {
    fn render(&self, color: HexColor, category: &Category) -> Option<Icon> {
        match self.glyphs.get(category)? {
            GlyphState::Ready { white, icons } => {
                let icon = match icons.get(&color) {
                    Some(icon) => Arc::clone(icon),
                    None => Arc::new(raster::composite(white, color, self.size)),
                };
                Some(Icon::Raster(icon))
            }
            GlyphState::Unavailable => None,
        }
    }
}
