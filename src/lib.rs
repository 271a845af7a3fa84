pub mod api;
pub mod config;
pub mod core;
pub mod error;
pub mod i18n;
pub mod icons;
pub mod models;
pub mod notify;

pub use api::{HttpBackend, MapBackend, SyncPanel};
pub use config::Config;
pub use core::{LayerStore, LoadState, MapViewController, MarkerIndex, Pin, visible_markers};
pub use error::{Error, Result};
pub use i18n::{Language, Translator};
pub use icons::{CompositeIconFactory, Icon, IconFactory, IconSet, VectorIconFactory};
pub use models::{Category, HexColor, Layer, Marker, SyncResult};
pub use notify::{Notification, NotificationKind};

#[cfg(feature = "gui")]
pub mod gui;
