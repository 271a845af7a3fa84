use crate::gui::screens::{ScreenMessage, admin_page::AdminScreen, map_page::MapScreen};

#[derive(Debug, Clone)]
pub enum Message {
    Map(ScreenMessage<MapScreen>),
    Admin(ScreenMessage<AdminScreen>),
}
