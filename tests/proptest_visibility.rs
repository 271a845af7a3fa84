//! Property tests for layer toggling and marker visibility.
//!
//! 1. The visible set is exactly the markers whose layer exists and is
//!    visible, in source order.
//! 2. Toggling the same layer twice restores the visible set.
//! 3. After any sequence of toggles a layer is visible iff it was toggled an
//!    even number of times, and a selection is never left on a hidden marker.
//! 4. The visible set depends only on the final assignment, not on the
//!    order the toggles arrived in.

mod common;

use ilheus_map::core::visible_markers;
use proptest::prelude::*;

use common::*;

const LAYER_IDS: [&str; 4] = ["restaurants", "hotels", "tourist_sights", "beaches"];
const MARKER_LAYERS: [&str; 5] = ["restaurants", "hotels", "tourist_sights", "beaches", "nightlife"];

fn layers_with(visibility: &[bool]) -> Vec<Layer> {
    LAYER_IDS
        .iter()
        .zip(visibility)
        .map(|(id, visible)| Layer {
            visible: *visible,
            ..make_layer(id, id, "#123456")
        })
        .collect()
}

fn markers_on(layer_picks: &[usize]) -> Vec<Marker> {
    layer_picks
        .iter()
        .enumerate()
        .map(|(i, pick)| make_marker(&format!("m{}", i), MARKER_LAYERS[*pick], 0.0, 0.0))
        .collect()
}

/// Visibility per layer after `toggles`, starting from all shown.
fn parity(toggles: &[usize]) -> [bool; 4] {
    let mut counts = [0usize; 4];
    for layer in toggles {
        counts[*layer] += 1;
    }
    counts.map(|count| count % 2 == 0)
}

fn expected_ids<'a>(markers: &'a [Marker], shown: &[bool; 4]) -> Vec<&'a str> {
    markers
        .iter()
        .filter(|m| {
            LAYER_IDS
                .iter()
                .position(|id| *id == m.layer_id)
                .is_some_and(|i| shown[i])
        })
        .map(|m| m.id.as_str())
        .collect()
}

fn ready_controller(layers: Vec<Layer>, markers: Vec<Marker>) -> MapViewController {
    let mut map = MapViewController::new(Translator::default());
    let ticket = map.begin_load();
    map.apply(ticket, Ok::<_, Error>(MapData { layers, markers }));
    map
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn visible_is_exactly_the_shown_layers(
        visibility in prop::collection::vec(any::<bool>(), 4),
        picks in prop::collection::vec(0usize..MARKER_LAYERS.len(), 0..40),
    ) {
        let layers = layers_with(&visibility);
        let markers = markers_on(&picks);

        let visible = visible_markers(&layers, &markers);

        let expected: Vec<&Marker> = markers
            .iter()
            .filter(|m| layers.iter().any(|l| l.visible && l.id == m.layer_id))
            .collect();
        prop_assert_eq!(visible, expected);
    }

    #[test]
    fn double_toggle_is_identity(
        picks in prop::collection::vec(0usize..MARKER_LAYERS.len(), 0..40),
        layer in 0usize..LAYER_IDS.len(),
    ) {
        let mut map = ready_controller(layers_with(&[true; 4]), markers_on(&picks));
        let before: Vec<String> = map.visible_markers().map(|m| m.id.clone()).collect();

        prop_assert!(map.toggle_layer(LAYER_IDS[layer]));
        prop_assert!(map.toggle_layer(LAYER_IDS[layer]));

        let after: Vec<String> = map.visible_markers().map(|m| m.id.clone()).collect();
        prop_assert_eq!(before, after);
    }

    #[test]
    fn toggles_keep_controller_consistent(
        picks in prop::collection::vec(0usize..MARKER_LAYERS.len(), 1..40),
        toggles in prop::collection::vec(0usize..LAYER_IDS.len(), 0..20),
        selection in any::<prop::sample::Index>(),
    ) {
        let markers = markers_on(&picks);
        let mut map = ready_controller(layers_with(&[true; 4]), markers.clone());
        let target = &markers[selection.index(markers.len())];
        map.select(&target.id);

        for (step, layer) in toggles.iter().enumerate() {
            map.toggle_layer(LAYER_IDS[*layer]);

            let shown = parity(&toggles[..=step]);
            prop_assert_eq!(ids(map.visible_markers()), expected_ids(&markers, &shown));
            if let Some(selected) = map.selected() {
                prop_assert!(map.markers().is_visible(&selected.id));
            }
        }
    }

    #[test]
    fn toggle_order_does_not_matter(
        picks in prop::collection::vec(0usize..MARKER_LAYERS.len(), 0..40),
        (toggles, shuffled) in prop::collection::vec(0usize..LAYER_IDS.len(), 0..20)
            .prop_flat_map(|toggles| (Just(toggles.clone()), Just(toggles).prop_shuffle())),
    ) {
        let markers = markers_on(&picks);
        let mut in_order = ready_controller(layers_with(&[true; 4]), markers.clone());
        let mut reordered = ready_controller(layers_with(&[true; 4]), markers.clone());

        for layer in &toggles {
            in_order.toggle_layer(LAYER_IDS[*layer]);
        }
        for layer in &shuffled {
            reordered.toggle_layer(LAYER_IDS[*layer]);
        }

        let expected = expected_ids(&markers, &parity(&toggles));
        prop_assert_eq!(ids(in_order.visible_markers()), expected.clone());
        prop_assert_eq!(ids(reordered.visible_markers()), expected);
    }
}
