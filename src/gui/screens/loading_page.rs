use iced::{
    Element,
    widget::{container, text},
};

pub fn view<'a, Message: 'a>(label: &'a str) -> Element<'a, Message> {
    container(text(label).size(20))
        .center_x(iced::Length::Fill)
        .center_y(iced::Length::Fill)
        .into()
}
