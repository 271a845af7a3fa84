use std::fmt;

use tracing::{debug, info, trace, warn};

use crate::api::MapBackend;
use crate::core::layers::LayerStore;
use crate::core::markers::MarkerIndex;
use crate::error::Result;
use crate::i18n::Translator;
use crate::icons::{Icon, IconFactory};
use crate::models::{Category, HexColor, Layer, Marker};
use crate::notify::Notification;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    Error,
}

/// Layers and markers as returned by the backend, fetched together.
#[derive(Debug, Clone, Default)]
pub struct MapData {
    pub layers: Vec<Layer>,
    pub markers: Vec<Marker>,
}

/// Fetch layers and markers concurrently. Fails if either request fails.
pub async fn fetch_map_data<B: MapBackend>(backend: &B) -> Result<MapData> {
    let (layers, markers) = tokio::try_join!(backend.get_layers(), backend.get_markers())?;
    Ok(MapData { layers, markers })
}

/// Identifies one load attempt. Only the ticket from the latest
/// [`MapViewController::begin_load`] is honoured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

/// A marker ready to be drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct Pin {
    pub marker_id: String,
    pub title: String,
    pub layer_id: String,
    pub lat: f64,
    pub lng: f64,
    pub icon: Icon,
}

/// One button of the category toggle bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEntry {
    pub layer_id: String,
    pub label: &'static str,
    pub color: HexColor,
    pub active: bool,
}

/// Content of the detail popup for the selected marker.
#[derive(Debug, Clone, PartialEq)]
pub struct InfoPopup {
    pub title: String,
    pub description: String,
    pub lat: f64,
    pub lng: f64,
    pub link: Option<MapsLink>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapsLink {
    pub label: &'static str,
    pub url: String,
}

/// Read-only view of the controller for renderers.
#[derive(Debug, Clone)]
pub struct MapSnapshot<'a> {
    pub state: LoadState,
    pub layers: &'a [Layer],
    pub visible: Vec<&'a Marker>,
    pub selected: Option<&'a Marker>,
}

/// Owns the map screen state: load status, layers, markers and selection.
///
/// Everything the view shows is derived from this value; mutations go through
/// [`toggle_layer`](Self::toggle_layer), [`select`](Self::select) and
/// [`deselect`](Self::deselect).
#[derive(Debug, Clone)]
pub struct MapViewController {
    translator: Translator,
    state: LoadState,
    layers: LayerStore,
    markers: MarkerIndex,
    selected: Option<String>,
    notification: Option<Notification>,
    generation: u64,
    mounted: bool,
}

impl MapViewController {
    pub fn new(translator: Translator) -> Self {
        Self {
            translator,
            state: LoadState::Loading,
            layers: LayerStore::default(),
            markers: MarkerIndex::default(),
            selected: None,
            notification: None,
            generation: 0,
            mounted: true,
        }
    }

    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn layers(&self) -> &LayerStore {
        &self.layers
    }

    pub fn markers(&self) -> &MarkerIndex {
        &self.markers
    }

    pub fn visible_markers(&self) -> impl Iterator<Item = &Marker> {
        self.markers.visible()
    }

    pub fn selected(&self) -> Option<&Marker> {
        self.selected
            .as_deref()
            .and_then(|id| self.markers.find(id))
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn take_notification(&mut self) -> Option<Notification> {
        self.notification.take()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn snapshot(&self) -> MapSnapshot<'_> {
        MapSnapshot {
            state: self.state,
            layers: self.layers.layers(),
            visible: self.markers.visible().collect(),
            selected: self.selected(),
        }
    }

    /// Enter `Loading` and hand out the ticket the fetch result must present.
    /// Any ticket issued earlier becomes stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.state = LoadState::Loading;
        debug!(generation = self.generation, "loading map data");
        LoadTicket {
            generation: self.generation,
        }
    }

    /// Apply a fetch result. Returns `false` if the result was dropped because
    /// the controller was unmounted or a newer load superseded it.
    pub fn apply<E: fmt::Display>(
        &mut self,
        ticket: LoadTicket,
        result: std::result::Result<MapData, E>,
    ) -> bool {
        if !self.mounted || ticket.generation != self.generation {
            debug!(
                ticket = ticket.generation,
                current = self.generation,
                mounted = self.mounted,
                "dropping stale map data"
            );
            return false;
        }

        match result {
            Ok(data) => {
                info!(
                    layers = data.layers.len(),
                    markers = data.markers.len(),
                    "map data loaded"
                );
                self.layers = LayerStore::new(data.layers);
                self.markers = MarkerIndex::new(data.markers);
                self.markers.refilter(self.layers.layers());
                self.notification = None;
                self.state = LoadState::Ready;
            }
            Err(e) => {
                warn!(error = %e, "failed to load map data");
                self.layers = LayerStore::default();
                self.markers = MarkerIndex::default();
                self.notification = Some(Notification::error(self.translator.t("errorLoading")));
                self.state = LoadState::Error;
            }
        }
        self.selected = None;
        true
    }

    /// Fetch and apply in one go. Also the manual reload after an error.
    pub async fn load<B: MapBackend>(&mut self, backend: &B) -> LoadState {
        let ticket = self.begin_load();
        let result = fetch_map_data(backend).await;
        self.apply(ticket, result);
        self.state
    }

    /// Stop accepting fetch results. In-flight fetches are not aborted.
    pub fn unmount(&mut self) {
        self.mounted = false;
    }

    /// Accept fetch results again. Tickets handed out before this call stay
    /// stale once the next [`begin_load`](Self::begin_load) runs.
    pub fn mount(&mut self) {
        self.mounted = true;
    }

    /// Flip a layer and re-filter markers in the same step.
    ///
    /// A selection whose marker is no longer visible is cleared. Returns
    /// `false` for unknown layers or when the map is not ready.
    pub fn toggle_layer(&mut self, layer_id: &str) -> bool {
        if self.state != LoadState::Ready || !self.layers.toggle(layer_id) {
            return false;
        }
        self.markers.refilter(self.layers.layers());
        if self
            .selected
            .as_deref()
            .is_some_and(|id| !self.markers.is_visible(id))
        {
            self.selected = None;
        }
        true
    }

    /// Select a visible marker, replacing any previous selection.
    pub fn select(&mut self, marker_id: &str) -> bool {
        if !self.markers.is_visible(marker_id) {
            return false;
        }
        self.selected = Some(marker_id.to_string());
        true
    }

    pub fn deselect(&mut self) {
        self.selected = None;
    }

    pub fn color_of(&self, layer_id: &str) -> HexColor {
        HexColor::parse_or_default(self.layers.color_of(layer_id))
    }

    /// One pin per visible marker whose icon can be rendered.
    pub fn pins<F: IconFactory>(&self, icons: &F) -> Vec<Pin> {
        self.markers
            .visible()
            .filter_map(|marker| {
                let category = Category::from_id(&marker.layer_id);
                let Some(icon) = icons.render(self.color_of(&marker.layer_id), &category) else {
                    trace!(marker = %marker.id, %category, "no icon, skipping marker");
                    return None;
                };
                Some(Pin {
                    marker_id: marker.id.clone(),
                    title: marker.name.clone(),
                    layer_id: marker.layer_id.clone(),
                    lat: marker.lat,
                    lng: marker.lng,
                    icon,
                })
            })
            .collect()
    }

    /// Toggle bar entries in layer order. Layers outside the known categories
    /// get no button.
    pub fn nav_entries(&self) -> Vec<NavEntry> {
        self.layers
            .layers()
            .iter()
            .filter_map(|layer| {
                let label = self.translator.category_label(&layer.category())?;
                Some(NavEntry {
                    layer_id: layer.id.clone(),
                    label,
                    color: HexColor::parse_or_default(&layer.color),
                    active: layer.visible,
                })
            })
            .collect()
    }

    pub fn status_line(&self) -> String {
        format!(
            "{} {}",
            self.markers.count_visible(),
            self.translator.t("markersVisible")
        )
    }

    pub fn info_popup(&self) -> Option<InfoPopup> {
        let marker = self.selected()?;
        Some(InfoPopup {
            title: marker.name.clone(),
            description: marker.description.clone(),
            lat: marker.lat,
            lng: marker.lng,
            link: marker
                .google_maps_url
                .as_ref()
                .filter(|url| !url.is_empty())
                .map(|url| MapsLink {
                    label: self.translator.t("openInGoogleMaps"),
                    url: url.clone(),
                }),
        })
    }
}
