use iced::widget::{button, column, container, row, text};
use iced::{alignment, Alignment, Background, Color, ContentFit, Element, Length};

use super::display_title;
use crate::media::thumbnail::{Resolved, ThumbnailCache};
use crate::state::data::Image;
use crate::Message;

/// Side of the square the full-size image is fitted into
const FRAME_SIZE: f32 = 384.0;

/// Full-screen overlay for the image open in the carousel
pub fn view<'a>(photo: &Image, thumbnails: &ThumbnailCache) -> Element<'a, Message> {
    let picture: Element<'a, Message> = match thumbnails.resolve(&photo.url) {
        Resolved::Image(handle) => iced::widget::image(handle)
            .content_fit(ContentFit::Contain)
            .width(Length::Fill)
            .height(Length::Fill)
            .into(),
        Resolved::Pending => text("Loading...").color(Color::WHITE).into(),
        Resolved::Broken => text("Image not found").color(Color::WHITE).into(),
    };

    let frame = container(picture)
        .width(Length::Fixed(FRAME_SIZE))
        .height(Length::Fixed(FRAME_SIZE))
        .center_x(Length::Fixed(FRAME_SIZE))
        .center_y(Length::Fixed(FRAME_SIZE));

    let close = button(text("×").size(28).color(Color::WHITE))
        .on_press(Message::CloseCarousel)
        .style(button::text);

    let navigation = row![
        nav_button("❮", Message::PrevImage),
        text(display_title(&photo.title).to_string())
            .size(20)
            .color(Color::WHITE)
            .width(Length::Fill)
            .align_x(alignment::Horizontal::Center),
        nav_button("❯", Message::NextImage),
    ]
    .spacing(16)
    .align_y(Alignment::Center);

    let content = column![row![iced::widget::horizontal_space(), close], frame, navigation]
        .spacing(16)
        .align_x(Alignment::Center)
        .max_width(768.0);

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .style(|_theme| container::Style {
            background: Some(Background::Color(Color::from_rgba(0.0, 0.0, 0.0, 0.75))),
            ..container::Style::default()
        })
        .into()
}

fn nav_button<'a>(label: &'a str, message: Message) -> Element<'a, Message> {
    button(text(label).size(28).color(Color::WHITE))
        .on_press(message)
        .style(button::text)
        .padding([8, 16])
        .into()
}
