//! Static message tables for the three supported UI languages.
//!
//! Lookups fall back from the requested language to Portuguese and finally to
//! the key itself, so a missing entry never produces an empty label.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::models::Category;

type Table = HashMap<&'static str, &'static str>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    En,
    Es,
    #[default]
    Pt,
}

impl Language {
    pub const FALLBACK: Language = Language::Pt;

    /// Picks a supported language from a locale tag such as `en-US` or
    /// `es_ES.UTF-8`. Anything unsupported resolves to Portuguese.
    pub fn detect(locale: &str) -> Self {
        let code = locale
            .trim()
            .split(['-', '_', '.'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match code.as_str() {
            "en" => Language::En,
            "es" => Language::Es,
            _ => Language::Pt,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
            Language::Pt => "pt",
        }
    }

    fn table(self) -> &'static Table {
        match self {
            Language::En => &EN,
            Language::Es => &ES,
            Language::Pt => &PT,
        }
    }
}

impl FromStr for Language {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Language::En),
            "es" => Ok(Language::Es),
            "pt" => Ok(Language::Pt),
            other => Err(anyhow::anyhow!("unsupported language: {}", other)),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Resolves message keys for one language.
#[derive(Debug, Clone, Copy, Default)]
pub struct Translator {
    language: Language,
}

impl Translator {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn t<'k>(&self, key: &'k str) -> &'k str {
        match self
            .language
            .table()
            .get(key)
            .or_else(|| Language::FALLBACK.table().get(key))
        {
            Some(value) => *value,
            None => key,
        }
    }

    /// Bottom-bar label for a category. Unknown categories have none.
    pub fn category_label(&self, category: &Category) -> Option<&'static str> {
        let key: &'static str = match category {
            Category::Restaurants => "restaurants",
            Category::Hotels => "hotels",
            Category::Beaches => "beaches",
            Category::Sights => "sights",
            Category::Unknown(_) => return None,
        };
        Some(self.t(key))
    }

    pub fn instructions(&self) -> &'static [&'static str] {
        match self.language {
            Language::En => &INSTRUCTIONS_EN,
            Language::Es => &INSTRUCTIONS_ES,
            Language::Pt => &INSTRUCTIONS_PT,
        }
    }
}

static EN: LazyLock<Table> = LazyLock::new(|| {
    [
        ("appTitle", "Best of Ilhéus"),
        ("showHide", "Show/Hide"),
        ("restaurants", "Restaurants"),
        ("hotels", "Hotels"),
        ("beaches", "Beaches"),
        ("sights", "Sights"),
        ("openInGoogleMaps", "Open in Google Maps →"),
        ("loadingMap", "Loading map of Ilhéus..."),
        ("adminTitle", "Administration Panel"),
        ("syncGoogleSheet", "Sync Google Sheet"),
        ("backToMap", "Back to Map"),
        ("instructions", "Instructions:"),
        ("sheetUrlPlaceholder", "https://docs.google.com/spreadsheets/d/..."),
        ("syncButton", "Sync"),
        ("syncing", "Syncing..."),
        ("errorLoading", "Error loading map data"),
        ("syncSuccess", "Successfully synced"),
        ("syncError", "Error syncing"),
        ("enterSheetUrl", "Please enter the Google Sheet URL"),
        ("markersVisible", "markers visible"),
        ("markersAdded", "markers added"),
        ("geocodingErrors", "Geocoding errors:"),
    ]
    .into_iter()
    .collect()
});

static ES: LazyLock<Table> = LazyLock::new(|| {
    [
        ("appTitle", "Lo Mejor de Ilhéus"),
        ("showHide", "Mostrar/Ocultar"),
        ("restaurants", "Restaurantes"),
        ("hotels", "Hoteles"),
        ("beaches", "Playas"),
        ("sights", "Atracciones Turísticas"),
        ("openInGoogleMaps", "Abrir en Google Maps →"),
        ("loadingMap", "Cargando mapa de Ilhéus..."),
        ("adminTitle", "Panel de Administración"),
        ("syncGoogleSheet", "Sincronizar Google Sheet"),
        ("backToMap", "Volver al Mapa"),
        ("instructions", "Instrucciones:"),
        ("sheetUrlPlaceholder", "https://docs.google.com/spreadsheets/d/..."),
        ("syncButton", "Sincronizar"),
        ("syncing", "Sincronizando..."),
        ("errorLoading", "Error al cargar datos del mapa"),
        ("syncSuccess", "Sincronizado correctamente"),
        ("syncError", "Error al sincronizar"),
        ("enterSheetUrl", "Por favor, introduzca la URL de la Hoja de Google"),
        ("markersVisible", "marcadores visibles"),
        ("markersAdded", "marcadores agregados"),
        ("geocodingErrors", "Errores de geocodificación:"),
    ]
    .into_iter()
    .collect()
});

static PT: LazyLock<Table> = LazyLock::new(|| {
    [
        ("appTitle", "O Melhor de Ilhéus"),
        ("showHide", "Mostrar/Ocultar"),
        ("restaurants", "Restaurantes"),
        ("hotels", "Hotéis"),
        ("beaches", "Praias"),
        ("sights", "Pontos"),
        ("openInGoogleMaps", "Abrir no Google Maps →"),
        ("loadingMap", "Carregando mapa de Ilhéus..."),
        ("adminTitle", "Painel de Administração"),
        ("syncGoogleSheet", "Sincronizar Google Sheets"),
        ("backToMap", "Voltar ao Mapa"),
        ("instructions", "Instruções:"),
        ("sheetUrlPlaceholder", "https://docs.google.com/spreadsheets/d/..."),
        ("syncButton", "Sincronizar"),
        ("syncing", "Sincronizando..."),
        ("errorLoading", "Erro ao carregar dados do mapa"),
        ("syncSuccess", "Sincronizado com sucesso"),
        ("syncError", "Erro ao sincronizar"),
        ("enterSheetUrl", "Por favor, insira a URL do Google Sheet"),
        ("markersVisible", "marcadores visíveis"),
        ("markersAdded", "marcadores adicionados"),
        ("geocodingErrors", "Erros de geocodificação:"),
    ]
    .into_iter()
    .collect()
});

static INSTRUCTIONS_EN: [&str; 5] = [
    "Create a Google Sheet with columns: Name, Name_EN, Name_ES, Description, Description_EN, Description_ES, Category",
    "Valid categories: restaurants, hotels, beaches, sights",
    "Optional columns: Name_EN, Name_ES, Description_EN, Description_ES (leave blank to use default language)",
    "Share the sheet publicly (Anyone with link → Viewer)",
    "Paste the full sheet URL below",
];

static INSTRUCTIONS_ES: [&str; 5] = [
    "Cree una Hoja de Google con columnas: Name, Name_EN, Name_ES, Description, Description_EN, Description_ES, Category",
    "Categorías válidas: restaurants, hotels, beaches, sights",
    "Columnas opcionales: Name_EN, Name_ES, Description_EN, Description_ES (deje en blanco para usar el idioma predeterminado)",
    "Comparta la hoja públicamente (Cualquiera con el enlace → Lector)",
    "Pegue la URL completa de la hoja a continuación",
];

static INSTRUCTIONS_PT: [&str; 5] = [
    "Crie um Google Sheet com as colunas: Name, Name_EN, Name_ES, Description, Description_EN, Description_ES, Category",
    "Categorias válidas: restaurants, hotels, beaches, sights",
    "Colunas opcionais: Name_EN, Name_ES, Description_EN, Description_ES (deixe em branco para usar o idioma padrão)",
    "Compartilhe o sheet publicamente (Qualquer pessoa com o link → Leitor)",
    "Cole a URL completa do sheet abaixo",
];
