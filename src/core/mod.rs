pub mod controller;
pub mod layers;
pub mod markers;

pub use controller::{
    InfoPopup, LoadState, LoadTicket, MapData, MapSnapshot, MapViewController, MapsLink, NavEntry,
    Pin, fetch_map_data,
};
pub use layers::{DEFAULT_LAYER_COLOR, LayerStore};
pub use markers::{MarkerIndex, visible_markers};
