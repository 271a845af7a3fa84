use crate::models::{Layer, Marker};

/// Markers whose layer is currently visible, in the source order of `markers`.
///
/// Markers pointing at a layer id that does not exist are dropped like hidden
/// ones.
pub fn visible_markers<'m>(layers: &[Layer], markers: &'m [Marker]) -> Vec<&'m Marker> {
    let visible = visible_layer_ids(layers);
    markers
        .iter()
        .filter(|marker| visible.contains(&marker.layer_id.as_str()))
        .collect()
}

fn visible_layer_ids(layers: &[Layer]) -> Vec<&str> {
    layers
        .iter()
        .filter(|layer| layer.visible)
        .map(|layer| layer.id.as_str())
        .collect()
}

/// The fetched marker snapshot and the subset that is currently on the map.
#[derive(Debug, Clone, Default)]
pub struct MarkerIndex {
    markers: Vec<Marker>,
    visible: Vec<usize>,
}

impl MarkerIndex {
    pub fn new(markers: Vec<Marker>) -> Self {
        Self {
            markers,
            visible: Vec::new(),
        }
    }

    pub fn all(&self) -> &[Marker] {
        &self.markers
    }

    /// Re-derives the visible subset from the given layer set.
    pub fn refilter(&mut self, layers: &[Layer]) {
        let visible = visible_layer_ids(layers);
        self.visible = self
            .markers
            .iter()
            .enumerate()
            .filter(|(_, marker)| visible.contains(&marker.layer_id.as_str()))
            .map(|(idx, _)| idx)
            .collect();
    }

    pub fn visible(&self) -> impl Iterator<Item = &Marker> {
        self.visible.iter().map(|&idx| &self.markers[idx])
    }

    pub fn count_visible(&self) -> usize {
        self.visible.len()
    }

    pub fn is_visible(&self, marker_id: &str) -> bool {
        self.visible().any(|marker| marker.id == marker_id)
    }

    pub fn find(&self, marker_id: &str) -> Option<&Marker> {
        self.markers.iter().find(|marker| marker.id == marker_id)
    }

    /// All markers of one layer regardless of visibility.
    pub fn markers_in<'a>(&'a self, layer_id: &'a str) -> impl Iterator<Item = &'a Marker> + 'a {
        self.markers
            .iter()
            .filter(move |marker| marker.layer_id == layer_id)
    }
}
