use std::collections::HashSet;

use tracing::debug;

use crate::models::Layer;

/// Color reported for layer ids that are not in the store.
pub const DEFAULT_LAYER_COLOR: &str = "#000000";

/// The category layers in fetch order, with their visibility flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayerStore {
    layers: Vec<Layer>,
}

impl LayerStore {
    pub fn new(layers: Vec<Layer>) -> Self {
        Self { layers }
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn get(&self, layer_id: &str) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.id == layer_id)
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Flips the visibility of `layer_id`. Unknown ids are ignored.
    ///
    /// Returns `true` if a layer was flipped.
    pub fn toggle(&mut self, layer_id: &str) -> bool {
        match self.layers.iter_mut().find(|layer| layer.id == layer_id) {
            Some(layer) => {
                layer.visible = !layer.visible;
                debug!(layer = layer_id, visible = layer.visible, "toggled layer");
                true
            }
            None => {
                debug!(layer = layer_id, "toggle ignored, unknown layer");
                false
            }
        }
    }

    pub fn color_of(&self, layer_id: &str) -> &str {
        self.get(layer_id)
            .map(|layer| layer.color.as_str())
            .unwrap_or(DEFAULT_LAYER_COLOR)
    }

    pub fn is_visible(&self, layer_id: &str) -> bool {
        self.get(layer_id).is_some_and(|layer| layer.visible)
    }

    pub fn visible_ids(&self) -> HashSet<&str> {
        self.layers
            .iter()
            .filter(|layer| layer.visible)
            .map(|layer| layer.id.as_str())
            .collect()
    }
}
