use std::future::Future;
use std::path::PathBuf;

use tracing::debug;
use url::Url;

use crate::error::{Error, Result};
use crate::models::Category;

/// Where category glyph bitmaps are loaded from.
pub trait GlyphSource: Send + Sync + 'static {
    fn load(&self, category: Category) -> impl Future<Output = Result<Vec<u8>>> + Send;
}

/// Glyphs stored as `<root>/<category>.png`.
#[derive(Debug, Clone)]
pub struct DirGlyphSource {
    root: PathBuf,
}

impl DirGlyphSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl GlyphSource for DirGlyphSource {
    fn load(&self, category: Category) -> impl Future<Output = Result<Vec<u8>>> + Send {
        let path = category.glyph_file().map(|file| self.root.join(file));
        async move {
            let path = path.ok_or_else(|| no_glyph(&category))?;
            debug!(path = %path.display(), "reading glyph");
            tokio::fs::read(&path).await.map_err(|e| Error::AssetLoad {
                category,
                reason: format!("{}: {}", path.display(), e),
            })
        }
    }
}

/// Glyphs served over HTTP below a base url, e.g. `https://host/icons/`.
#[derive(Debug, Clone)]
pub struct HttpGlyphSource {
    client: reqwest::Client,
    base: Url,
}

impl HttpGlyphSource {
    pub fn new(client: reqwest::Client, base: Url) -> Self {
        Self { client, base }
    }
}

impl GlyphSource for HttpGlyphSource {
    fn load(&self, category: Category) -> impl Future<Output = Result<Vec<u8>>> + Send {
        let client = self.client.clone();
        let url = category.glyph_file().map(|file| self.base.join(file));
        async move {
            let url = url.ok_or_else(|| no_glyph(&category))??;
            debug!(%url, "fetching glyph");
            let response = client.get(url).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(Error::AssetLoad {
                    category,
                    reason: format!("HTTP {}", status),
                });
            }
            Ok(response.bytes().await?.to_vec())
        }
    }
}

fn no_glyph(category: &Category) -> Error {
    Error::AssetLoad {
        category: category.clone(),
        reason: "no glyph for this category".to_string(),
    }
}
