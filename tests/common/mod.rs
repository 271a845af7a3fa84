#![allow(dead_code, unused_imports)]

mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from ilheus_map for tests
pub use ilheus_map::core::{LoadState, LoadTicket, MapData, MapViewController};
pub use ilheus_map::{
    Category, Error, HexColor, Language, Layer, MapBackend, Marker, Notification,
    NotificationKind, SyncPanel, SyncResult, Translator,
};
