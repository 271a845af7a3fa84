use std::sync::Arc;

use iced::{
    Alignment::Center,
    Element, Length, Task,
    widget::{Column, button, column, container, row, text, text_input},
};

use crate::{
    api::{SyncPanel, SyncTicket},
    error::Error,
    gui::{
        AppState,
        screens::{Screen, ScreenMessage},
        widgets,
    },
    models::SyncResult,
    notify::Notification,
};

#[derive(Debug, Clone)]
pub struct AdminScreen {
    panel: SyncPanel,
    toast: Option<Notification>,
}

#[derive(Debug, Clone)]
pub enum AdminMessage {
    SheetUrlChanged(String),
    Submit,
    Synced(SyncTicket, Result<SyncResult, Arc<Error>>),
    DismissToast,
}

#[derive(Debug, Clone)]
pub enum ParentMessage {
    BackToMap,
}

impl AdminScreen {
    pub fn new(state: &AppState) -> Self {
        Self {
            panel: SyncPanel::new(state.translator),
            toast: None,
        }
    }
}

impl Screen for AdminScreen {
    type Message = AdminMessage;
    type ParentMessage = ParentMessage;

    fn view<'a>(&'a self, state: &'a AppState) -> Element<'a, ScreenMessage<Self>> {
        let t = &state.translator;
        let instructions = Column::with_children(
            t.instructions()
                .iter()
                .enumerate()
                .map(|(i, line)| text(format!("{}. {}", i + 1, line)).size(14).into()),
        )
        .spacing(4);

        let label = if self.panel.is_syncing() {
            t.t("syncing")
        } else {
            t.t("syncButton")
        };
        let submit = button(text(label)).on_press_maybe(
            self.panel
                .can_submit()
                .then_some(ScreenMessage::ScreenMessage(AdminMessage::Submit)),
        );

        let mut content = column![
            row![
                text(t.t("adminTitle")).size(28).width(Length::Fill),
                button(text(t.t("backToMap")))
                    .on_press(ScreenMessage::ParentMessage(ParentMessage::BackToMap))
                    .style(button::secondary),
            ]
            .align_y(Center),
            text(t.t("syncGoogleSheet")).size(20),
            text(t.t("instructions")).size(16),
            instructions,
            text_input(t.t("sheetUrlPlaceholder"), self.panel.sheet_url())
                .on_input(|url| ScreenMessage::ScreenMessage(AdminMessage::SheetUrlChanged(url)))
                .on_submit(ScreenMessage::ScreenMessage(AdminMessage::Submit))
                .padding(8),
            submit,
        ]
        .spacing(12)
        .max_width(640);

        if let Some(notification) = &self.toast {
            content = content.push(widgets::toast(
                notification,
                ScreenMessage::ScreenMessage(AdminMessage::DismissToast),
            ));
        }

        container(content)
            .padding(20)
            .center_x(Length::Fill)
            .into()
    }

    fn update(
        &mut self,
        message: Self::Message,
        state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        match message {
            AdminMessage::SheetUrlChanged(url) => {
                self.panel.set_sheet_url(url);
                Task::none()
            }
            AdminMessage::Submit => match self.panel.begin() {
                Ok(ticket) => {
                    self.toast = None;
                    let backend = Arc::clone(&state.backend);
                    let request = ticket.clone();
                    Task::perform(
                        async move { request.send(backend.as_ref()).await.map_err(Arc::new) },
                        move |result| {
                            ScreenMessage::ScreenMessage(AdminMessage::Synced(ticket, result))
                        },
                    )
                }
                Err(Error::Busy) => Task::none(),
                Err(e) => {
                    self.toast = Some(Notification::error(e.to_string()));
                    Task::none()
                }
            },
            AdminMessage::Synced(ticket, result) => {
                self.toast = Some(self.panel.complete(ticket, result));
                Task::none()
            }
            AdminMessage::DismissToast => {
                self.toast = None;
                Task::none()
            }
        }
    }
}
