use std::sync::Arc;

use iced::{
    Alignment::Center,
    Element, Length, Task,
    widget::{Row, button, canvas, column, container, container::bordered_box, row, stack, text},
};
use tracing::debug;

use crate::{
    core::{LoadState, LoadTicket, MapData, MapViewController, fetch_map_data},
    error::Error,
    gui::{
        AppState,
        screens::{Screen, ScreenMessage, loading_page},
        widgets::{
            self, PinCanvas,
            pin_canvas::{PinEvent, RasterHandles},
        },
    },
    icons::{CompositeIconFactory, DirGlyphSource, IconFactory, IconSet, VectorIconFactory},
    notify::Notification,
};

#[derive(Debug, Clone)]
pub struct MapScreen {
    controller: MapViewController,
    icons: IconSet,
    handles: RasterHandles,
    toast: Option<Notification>,
}

#[derive(Debug, Clone)]
pub enum MapMessage {
    Loaded(LoadTicket, Result<MapData, Arc<Error>>),
    IconsReady(CompositeIconFactory),
    ToggleLayer(String),
    Pin(PinEvent),
    Deselect,
    Reload,
    DismissToast,
}

#[derive(Debug, Clone)]
pub enum ParentMessage {
    OpenAdmin,
}

impl MapScreen {
    pub fn new(state: &AppState) -> Self {
        let icons = match state.glyph_dir {
            Some(_) => IconSet::Composite(CompositeIconFactory::default()),
            None => IconSet::Vector(VectorIconFactory),
        };
        Self {
            controller: MapViewController::new(state.translator),
            icons,
            handles: RasterHandles::default(),
            toast: None,
        }
    }

    /// Start a fetch. Results from earlier fetches are ignored once this runs.
    pub fn load(&mut self, state: &AppState) -> Task<ScreenMessage<Self>> {
        let ticket = self.controller.begin_load();
        let backend = Arc::clone(&state.backend);
        Task::perform(
            async move { fetch_map_data(backend.as_ref()).await.map_err(Arc::new) },
            move |result| ScreenMessage::ScreenMessage(MapMessage::Loaded(ticket, result)),
        )
    }

    pub fn unmount(&mut self) {
        self.controller.unmount();
    }

    /// Show the map again after the admin page and fetch fresh data.
    pub fn remount(&mut self, state: &AppState) -> Task<ScreenMessage<Self>> {
        self.controller.mount();
        self.load(state)
    }

    fn prepare_icons(&self, state: &AppState) -> Task<ScreenMessage<Self>> {
        let Some(dir) = state.glyph_dir.clone() else {
            return Task::none();
        };
        let layers = self.controller.layers().layers().to_vec();
        Task::perform(
            async move {
                let mut factory = CompositeIconFactory::default();
                factory
                    .prepare(Arc::new(DirGlyphSource::new(dir)), &layers)
                    .await;
                factory
            },
            |factory| ScreenMessage::ScreenMessage(MapMessage::IconsReady(factory)),
        )
    }

    fn header<'a>(&'a self, state: &'a AppState) -> Element<'a, ScreenMessage<Self>> {
        let t = &state.translator;
        row![
            text(t.t("appTitle")).size(24).width(Length::Fill),
            button(text(t.t("adminTitle")))
                .on_press(ScreenMessage::ParentMessage(ParentMessage::OpenAdmin))
                .style(button::secondary),
        ]
        .align_y(Center)
        .into()
    }

    fn nav(&self) -> Element<'_, ScreenMessage<Self>> {
        Row::with_children(self.controller.nav_entries().into_iter().map(|entry| {
            widgets::layer_button(
                entry.label,
                entry.color,
                entry.active,
                ScreenMessage::ScreenMessage(MapMessage::ToggleLayer(entry.layer_id)),
            )
        }))
        .spacing(8)
        .into()
    }

    fn map(&self) -> Element<'_, ScreenMessage<Self>> {
        let pins = PinCanvas::new(
            self.controller.pins(&self.icons),
            &self.handles,
            self.controller.selected().map(|m| m.id.as_str()),
            self.controller.markers().all(),
        );
        let map: Element<'_, PinEvent> = canvas(pins).width(Length::Fill).height(Length::Fill).into();
        let map = map.map(|event| ScreenMessage::ScreenMessage(MapMessage::Pin(event)));

        let Some(popup) = self.controller.info_popup() else {
            return map;
        };
        let mut details = column![
            row![
                text(popup.title).size(20).width(Length::Fill),
                button(text("✕"))
                    .on_press(ScreenMessage::ScreenMessage(MapMessage::Deselect))
                    .style(button::text),
            ]
            .align_y(Center),
            text(popup.description),
            text(format!("{:.5}, {:.5}", popup.lat, popup.lng)).size(12),
        ]
        .spacing(6);
        if let Some(link) = popup.link {
            details = details.push(column![text(link.label).size(14), text(link.url).size(12)]);
        }
        let card = container(details)
            .padding(12)
            .max_width(320)
            .style(bordered_box);

        stack![map, container(card).padding(12)].into()
    }
}

impl Screen for MapScreen {
    type Message = MapMessage;
    type ParentMessage = ParentMessage;

    fn view<'a>(&'a self, state: &'a AppState) -> Element<'a, ScreenMessage<Self>> {
        let t = &state.translator;
        let toast: Element<'a, ScreenMessage<Self>> = match &self.toast {
            Some(notification) => widgets::toast(
                notification,
                ScreenMessage::ScreenMessage(MapMessage::DismissToast),
            ),
            None => text("").into(),
        };

        match self.controller.state() {
            LoadState::Loading => loading_page::view(t.t("loadingMap")),
            LoadState::Error => container(
                column![
                    toast,
                    button(text("↻"))
                        .on_press(ScreenMessage::ScreenMessage(MapMessage::Reload)),
                ]
                .spacing(12)
                .align_x(Center),
            )
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into(),
            LoadState::Ready => widgets::layout(
                self.header(state),
                column![text(t.t("showHide")).size(14), self.nav()].spacing(6),
                self.map(),
                column![toast, text(self.controller.status_line()).size(14)].spacing(6),
            ),
        }
    }

    fn update(
        &mut self,
        message: Self::Message,
        state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        match message {
            MapMessage::Loaded(ticket, result) => {
                if !self.controller.apply(ticket, result) {
                    return Task::none();
                }
                self.toast = self.controller.take_notification();
                match self.controller.state() {
                    LoadState::Ready => self.prepare_icons(state),
                    _ => Task::none(),
                }
            }
            MapMessage::IconsReady(factory) => {
                debug!("composite icons ready");
                self.icons = IconSet::Composite(factory);
                let controller = &self.controller;
                self.handles = RasterHandles::new(controller.layers().layers().iter().filter_map(
                    |layer| self.icons.render(controller.color_of(&layer.id), &layer.category()),
                ));
                debug!(handles = self.handles.len(), "raster handles built");
                Task::none()
            }
            MapMessage::ToggleLayer(layer_id) => {
                self.controller.toggle_layer(&layer_id);
                Task::none()
            }
            MapMessage::Pin(PinEvent::Selected(marker_id)) => {
                self.controller.select(&marker_id);
                Task::none()
            }
            MapMessage::Pin(PinEvent::Cleared) | MapMessage::Deselect => {
                self.controller.deselect();
                Task::none()
            }
            MapMessage::Reload => {
                self.toast = None;
                self.load(state)
            }
            MapMessage::DismissToast => {
                self.toast = None;
                Task::none()
            }
        }
    }
}
