//! Integration tests for layer visibility and marker filtering.
//!
//! Tests cover:
//! - Toggling known and unknown layers
//! - Color lookup with the default fallback
//! - Filtering markers by visible layer, in source order
//! - Dropping markers whose layer does not exist

mod common;

use ilheus_map::core::{DEFAULT_LAYER_COLOR, LayerStore, MarkerIndex, visible_markers};

use common::*;

#[test]
fn test_toggle_flips_only_the_named_layer() {
    let mut store = LayerStore::new(sample_layers());

    assert!(store.toggle("hotels"));
    assert!(!store.is_visible("hotels"));
    assert!(store.is_visible("restaurants"));
    assert!(store.is_visible("beaches"));

    assert!(store.toggle("hotels"));
    assert!(store.is_visible("hotels"));
}

#[test]
fn test_visible_ids() {
    let mut store = LayerStore::new(sample_layers());
    store.toggle("beaches");

    let visible = store.visible_ids();
    assert_eq!(visible.len(), 3);
    assert!(visible.contains("tourist_sights"));
    assert!(!visible.contains("beaches"));
}

#[test]
fn test_toggle_unknown_layer_changes_nothing() {
    let mut store = LayerStore::new(sample_layers());
    let before = store.clone();

    assert!(!store.toggle("nightlife"));
    assert_eq!(store, before);
}

#[test]
fn test_color_of_falls_back_to_black() {
    let store = LayerStore::new(sample_layers());

    assert_eq!(store.color_of("restaurants"), "#FF6B6B");
    assert_eq!(store.color_of("nightlife"), DEFAULT_LAYER_COLOR);
    assert_eq!(DEFAULT_LAYER_COLOR, "#000000");
}

#[test]
fn test_visible_markers_keeps_source_order() {
    let layers = sample_layers();
    let markers = sample_markers();

    let visible = visible_markers(&layers, &markers);

    // x1 points at a layer that does not exist
    assert_eq!(ids(visible), vec!["r1", "r2", "h1", "b1", "s1"]);
}

#[test]
fn test_visible_markers_hides_toggled_layer() {
    let mut layers = sample_layers();
    layers[0].visible = false;
    let markers = sample_markers();

    let visible = visible_markers(&layers, &markers);

    assert_eq!(ids(visible), vec!["h1", "b1", "s1"]);
}

#[test]
fn test_visible_markers_with_nothing_to_show() {
    assert!(visible_markers(&[], &sample_markers()).is_empty());
    assert!(visible_markers(&sample_layers(), &[]).is_empty());

    let hidden: Vec<Layer> = sample_layers()
        .into_iter()
        .map(|layer| Layer {
            visible: false,
            ..layer
        })
        .collect();
    assert!(visible_markers(&hidden, &sample_markers()).is_empty());
}

#[test]
fn test_marker_index_refilter_tracks_layers() {
    let mut store = LayerStore::new(sample_layers());
    let mut index = MarkerIndex::new(sample_markers());
    index.refilter(store.layers());
    assert_eq!(index.count_visible(), 5);

    store.toggle("restaurants");
    index.refilter(store.layers());

    assert_eq!(index.count_visible(), 3);
    assert!(!index.is_visible("r1"));
    assert!(index.is_visible("h1"));
    // hidden markers are still known
    assert!(index.find("r1").is_some());
    assert_eq!(index.markers_in("restaurants").count(), 2);
}

#[test]
fn test_hidden_hotels_leave_only_restaurants() {
    let mut layers = vec![
        make_layer("restaurants", "Restaurantes", "#FF6B6B"),
        make_layer("hotels", "Hotéis", "#4ECDC4"),
    ];
    layers[1].visible = false;
    let markers = vec![
        make_marker("1", "restaurants", 0.0, 0.0),
        make_marker("2", "hotels", 0.0, 0.0),
    ];

    assert_eq!(ids(visible_markers(&layers, &markers)), vec!["1"]);
}
