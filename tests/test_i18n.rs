//! Integration tests for languages, message lookup and model parsing.

mod common;

use ilheus_map::config::{Config, resolve_language};

use common::*;

#[test]
fn test_detect_language_from_locale() {
    assert_eq!(Language::detect("en-US"), Language::En);
    assert_eq!(Language::detect("es_ES.UTF-8"), Language::Es);
    assert_eq!(Language::detect("pt-BR"), Language::Pt);
    assert_eq!(Language::detect("fr-FR"), Language::Pt);
    assert_eq!(Language::detect(""), Language::Pt);
}

#[test]
fn test_parse_language() -> anyhow::Result<()> {
    assert_eq!("EN".parse::<Language>()?, Language::En);
    assert!("de".parse::<Language>().is_err());
    assert_eq!(Language::Es.to_string(), "es");
    Ok(())
}

#[test]
fn test_explicit_language_wins() {
    assert_eq!(resolve_language(Some(Language::Es)), Language::Es);
}

#[test]
fn test_lookup_per_language() {
    assert_eq!(Translator::new(Language::En).t("errorLoading"), "Error loading map data");
    assert_eq!(
        Translator::new(Language::Es).t("errorLoading"),
        "Error al cargar datos del mapa"
    );
    assert_eq!(
        Translator::new(Language::Pt).t("errorLoading"),
        "Erro ao carregar dados do mapa"
    );
}

#[test]
fn test_missing_key_falls_back_to_key() {
    let t = Translator::new(Language::En);
    assert_eq!(t.t("noSuchKey"), "noSuchKey");
}

#[test]
fn test_category_labels() {
    let t = Translator::new(Language::En);
    assert_eq!(t.category_label(&Category::Beaches), Some("Beaches"));
    assert_eq!(t.category_label(&Category::from_id("tourist_sights")), None);
    assert_eq!(t.instructions().len(), 5);
}

#[test]
fn test_config_ignores_blank_maps_key() -> anyhow::Result<()> {
    let config = Config::new("http://localhost:8000".parse()?)
        .with_maps_api_key(Some("  ".to_string()))
        .with_language(Language::En);

    assert!(config.maps_api_key.is_none());
    assert_eq!(config.translator().language(), Language::En);
    Ok(())
}

#[test]
fn test_hex_colors() -> anyhow::Result<()> {
    assert_eq!("#FF6B6B".parse::<HexColor>()?, HexColor { r: 255, g: 107, b: 107 });
    assert_eq!("#fff".parse::<HexColor>()?, HexColor::WHITE);
    assert_eq!("#6ec1e4".parse::<HexColor>()?.to_string(), "#6EC1E4");

    for bad in ["FF6B6B", "#GG0000", "#12345", "#+1+2+3", "#ééé"] {
        assert!(bad.parse::<HexColor>().is_err(), "{bad} should not parse");
    }
    assert_eq!(HexColor::parse_or_default("red"), HexColor::DEFAULT);
    Ok(())
}

#[test]
fn test_layer_visible_defaults_to_true() -> anyhow::Result<()> {
    let layer: Layer = serde_json::from_str(
        r##"{"id": "hotels", "name": "Hotéis", "color": "#4ECDC4", "icon": "hotel"}"##,
    )?;
    assert!(layer.visible);
    assert_eq!(layer.category(), Category::Hotels);

    let marker: Marker = serde_json::from_str(
        r#"{"id": "m1", "name": "Bar", "description": "", "lat": -14.79, "lng": -39.04, "layer_id": "restaurants"}"#,
    )?;
    assert!(marker.google_maps_url.is_none());
    Ok(())
}
