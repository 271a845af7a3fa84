use std::path::PathBuf;
use std::sync::Arc;

use crate::api::HttpBackend;
use crate::config::Config;
use crate::i18n::Translator;

#[derive(Debug)]
pub struct AppState {
    pub config: Config,
    pub translator: Translator,
    pub backend: Arc<HttpBackend>,
    /// Glyph PNGs for composite icons. Vector icons when unset.
    pub glyph_dir: Option<PathBuf>,
}

impl AppState {
    pub fn new(config: Config, backend: Arc<HttpBackend>, glyph_dir: Option<PathBuf>) -> Self {
        Self {
            translator: config.translator(),
            config,
            backend,
            glyph_dir,
        }
    }
}
