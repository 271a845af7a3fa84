use std::path::PathBuf;
use std::sync::Arc;

use iced::{Element, Task};
use tracing::info;

use crate::{
    api::HttpBackend,
    config::Config,
    gui::{
        AppState, Message,
        screens::{
            Screen, ScreenMessage,
            admin_page::{self, AdminScreen},
            map_page::{self, MapScreen},
        },
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Page {
    Map,
    Admin,
}

pub struct MapApp {
    state: AppState,
    map: MapScreen,
    admin: AdminScreen,
    page: Page,
}

/// Open the map window and block until it is closed.
pub fn run(config: Config, glyph_dir: Option<PathBuf>) -> anyhow::Result<()> {
    let backend = Arc::new(HttpBackend::new(&config.backend_url)?);
    info!(backend = %config.backend_url, "opening map window");
    iced::application(
        move || MapApp::boot(config.clone(), Arc::clone(&backend), glyph_dir.clone()),
        MapApp::update,
        MapApp::view,
    )
    .title(MapApp::title)
    .run()
    .map_err(|e| anyhow::anyhow!("GUI error: {}", e))
}

impl MapApp {
    fn boot(
        config: Config,
        backend: Arc<HttpBackend>,
        glyph_dir: Option<PathBuf>,
    ) -> (Self, Task<Message>) {
        let state = AppState::new(config, backend, glyph_dir);
        let mut map = MapScreen::new(&state);
        let admin = AdminScreen::new(&state);
        let task = map.load(&state).map(Message::Map);
        (
            Self {
                state,
                map,
                admin,
                page: Page::Map,
            },
            task,
        )
    }

    fn title(&self) -> String {
        self.state.translator.t("appTitle").to_string()
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Map(ScreenMessage::ScreenMessage(msg)) => {
                self.map.update(msg, &mut self.state).map(Message::Map)
            }
            Message::Map(ScreenMessage::ParentMessage(map_page::ParentMessage::OpenAdmin)) => {
                self.map.unmount();
                self.page = Page::Admin;
                Task::none()
            }
            Message::Admin(ScreenMessage::ScreenMessage(msg)) => {
                self.admin.update(msg, &mut self.state).map(Message::Admin)
            }
            Message::Admin(ScreenMessage::ParentMessage(admin_page::ParentMessage::BackToMap)) => {
                self.page = Page::Map;
                self.map.remount(&self.state).map(Message::Map)
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        match self.page {
            Page::Map => self.map.view(&self.state).map(Message::Map),
            Page::Admin => self.admin.view(&self.state).map(Message::Admin),
        }
    }
}
