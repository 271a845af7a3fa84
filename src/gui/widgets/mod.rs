pub mod pin_canvas;

use iced::{
    Alignment::Center,
    Color, Element, Theme, border,
    widget::{Column, button, column, container, container::bordered_box, row, text},
};

use crate::models::HexColor;
use crate::notify::{Notification, NotificationKind};

pub use pin_canvas::PinCanvas;

pub fn to_color(color: HexColor, opacity: f32) -> Color {
    Color::from_rgba8(color.r, color.g, color.b, opacity)
}

/// Header on top, a toggle bar, the main area and a footer line.
pub fn layout<'a, Message>(
    header: impl Into<Element<'a, Message>>,
    nav: impl Into<Element<'a, Message>>,
    main_content: impl Into<Element<'a, Message>>,
    footer: impl Into<Element<'a, Message>>,
) -> Element<'a, Message>
where
    Message: 'a,
{
    container(column![
        container(header.into()).padding(10),
        container(nav.into()).padding([0, 10]),
        container(main_content.into())
            .height(iced::Length::Fill)
            .padding(10),
        container(footer.into()).padding([4, 10]),
    ])
    .center_x(iced::Length::Fill)
    .center_y(iced::Length::Fill)
    .into()
}

/// A toggle bar button: colored dot plus label, dimmed when the layer is off.
pub fn layer_button<'a, Message: Clone + 'a>(
    label: &'a str,
    color: HexColor,
    active: bool,
    on_press: Message,
) -> Element<'a, Message> {
    let dot = text("●").color(to_color(color, if active { 1.0 } else { 0.35 }));
    button(row![dot, text(label)].spacing(6).align_y(Center))
        .on_press(on_press)
        .style(move |theme: &Theme, status| {
            if active {
                button::primary(theme, status)
            } else {
                button::secondary(theme, status)
            }
        })
        .into()
}

pub fn toast<'a, Message: Clone + 'a>(
    notification: &'a Notification,
    on_close: Message,
) -> Element<'a, Message> {
    let accent = match notification.kind {
        NotificationKind::Success => Color::from_rgb8(0x2E, 0x7D, 0x32),
        NotificationKind::Error => Color::from_rgb8(0xC6, 0x28, 0x28),
    };
    let headline: Element<'a, Message> = text(notification.message.as_str()).color(accent).into();
    let lines = Column::with_children(
        std::iter::once(headline).chain(
            notification
                .details
                .iter()
                .map(|line| text(line.as_str()).size(14).into()),
        ),
    )
    .spacing(4);

    container(
        row![
            container(lines).width(iced::Length::Fill),
            button(text("✕")).on_press(on_close).style(button::text),
        ]
        .spacing(10)
        .align_y(Center),
    )
    .padding(12)
    .style(move |theme: &Theme| bordered_box(theme).border(border::color(accent).width(2)))
    .into()
}
