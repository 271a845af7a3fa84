use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use ilheus_map::core::MapViewController;
use ilheus_map::{
    Category, Error, Language, Layer, MapBackend, Marker, Result, SyncResult, Translator,
};
use image::{Rgba, RgbaImage};
use tempfile::TempDir;

/// Seed layers as the backend ships them. `tourist_sights` is outside the
/// known categories.
pub fn sample_layers() -> Vec<Layer> {
    vec![
        make_layer("restaurants", "Restaurantes", "#FF6B6B"),
        make_layer("hotels", "Hotéis", "#4ECDC4"),
        make_layer("tourist_sights", "Pontos Turísticos", "#FFD93D"),
        make_layer("beaches", "Praias", "#6EC1E4"),
    ]
}

pub fn make_layer(id: &str, name: &str, color: &str) -> Layer {
    Layer {
        id: id.to_string(),
        name: name.to_string(),
        color: color.to_string(),
        visible: true,
    }
}

pub fn make_marker(id: &str, layer_id: &str, lat: f64, lng: f64) -> Marker {
    Marker {
        id: id.to_string(),
        name: format!("Marker {}", id),
        description: format!("Description of {}", id),
        lat,
        lng,
        layer_id: layer_id.to_string(),
        google_maps_url: None,
    }
}

/// Two restaurants, one hotel, one beach with a maps link, one sight and one
/// marker pointing at a layer that does not exist.
pub fn sample_markers() -> Vec<Marker> {
    let mut beach = make_marker("b1", "beaches", -14.8142, -39.0302);
    beach.google_maps_url = Some("https://maps.google.com/?q=-14.8142,-39.0302".to_string());
    vec![
        make_marker("r1", "restaurants", -14.7889, -39.0494),
        make_marker("r2", "restaurants", -14.7901, -39.0460),
        make_marker("h1", "hotels", -14.7950, -39.0420),
        beach,
        make_marker("s1", "tourist_sights", -14.7936, -39.0467),
        make_marker("x1", "nightlife", -14.7800, -39.0500),
    ]
}

/// In-memory [`MapBackend`] with switchable failures and call counters.
#[derive(Default)]
pub struct FakeBackend {
    pub layers: Vec<Layer>,
    pub markers: Vec<Marker>,
    pub fail_layers: bool,
    pub fail_markers: bool,
    pub sync_outcome: Option<std::result::Result<SyncResult, (u16, Option<String>)>>,
    pub layer_calls: AtomicUsize,
    pub marker_calls: AtomicUsize,
    pub synced_urls: Mutex<Vec<String>>,
}

impl FakeBackend {
    pub fn seeded() -> Self {
        Self {
            layers: sample_layers(),
            markers: sample_markers(),
            ..Default::default()
        }
    }

    pub fn with_sync(outcome: std::result::Result<SyncResult, (u16, Option<String>)>) -> Self {
        Self {
            sync_outcome: Some(outcome),
            ..Self::seeded()
        }
    }

    pub fn sync_calls(&self) -> usize {
        self.synced_urls.lock().unwrap().len()
    }
}

fn server_error(status: u16, detail: Option<String>) -> Error {
    Error::Server { status, detail }
}

impl MapBackend for FakeBackend {
    async fn get_layers(&self) -> Result<Vec<Layer>> {
        self.layer_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_layers {
            return Err(server_error(500, None));
        }
        Ok(self.layers.clone())
    }

    async fn get_markers(&self) -> Result<Vec<Marker>> {
        self.marker_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_markers {
            return Err(server_error(500, None));
        }
        Ok(self.markers.clone())
    }

    async fn get_markers_by_layer(&self, layer_id: &str) -> Result<Vec<Marker>> {
        Ok(self
            .markers
            .iter()
            .filter(|marker| marker.layer_id == layer_id)
            .cloned()
            .collect())
    }

    async fn sync_sheet(&self, sheet_url: &str) -> Result<SyncResult> {
        self.synced_urls.lock().unwrap().push(sheet_url.to_string());
        match &self.sync_outcome {
            Some(Ok(result)) => Ok(result.clone()),
            Some(Err((status, detail))) => Err(server_error(*status, detail.clone())),
            None => Ok(SyncResult {
                success: true,
                message: "ok".to_string(),
                markers_added: Some(0),
                geocode_errors: None,
            }),
        }
    }
}

/// A 32x32 glyph: an opaque black square on a transparent background.
pub fn glyph_png() -> Vec<u8> {
    let glyph = RgbaImage::from_fn(32, 32, |x, y| {
        if (8..24).contains(&x) && (8..24).contains(&y) {
            Rgba([0, 0, 0, 255])
        } else {
            Rgba([0, 0, 0, 0])
        }
    });
    let mut bytes = Vec::new();
    glyph
        .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .expect("Failed to encode glyph");
    bytes
}

/// Writes a glyph PNG for each of `categories` into a fresh temp directory.
pub fn glyph_dir(categories: &[Category]) -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp directory");
    for category in categories {
        write_glyph(dir.path(), category);
    }
    dir
}

pub fn write_glyph(dir: &Path, category: &Category) {
    let file = category
        .glyph_file()
        .expect("Only known categories have glyph files");
    std::fs::write(dir.join(file), glyph_png()).expect("Failed to write glyph");
}

/// A Portuguese controller that has loaded from `backend`.
pub async fn loaded_map(backend: &FakeBackend) -> MapViewController {
    let mut map = MapViewController::new(Translator::new(Language::Pt));
    map.load(backend).await;
    map
}

/// Marker ids in iteration order.
pub fn ids<'a>(markers: impl IntoIterator<Item = &'a Marker>) -> Vec<&'a str> {
    markers.into_iter().map(|marker| marker.id.as_str()).collect()
}
