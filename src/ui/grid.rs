use iced::widget::{button, column, container, row, scrollable, text, Column};
use iced::{Alignment, Element, Length};

use super::truncate_title;
use crate::media::thumbnail::{Resolved, ThumbnailCache};
use crate::state::data::Image;
use crate::state::pagination::ScrollPosition;
use crate::state::query::VisibleSet;
use crate::Message;

/// Height reserved for a card whose image has not arrived yet
const PENDING_HEIGHT: f32 = 200.0;

/// Translate iced's scroll viewport into the gallery's scroll geometry
pub fn scroll_position(viewport: &scrollable::Viewport) -> ScrollPosition {
    ScrollPosition::new(
        viewport.bounds().height,
        viewport.absolute_offset().y,
        viewport.content_bounds().height,
    )
}

/// Deal items round-robin into `columns` columns, keeping each item's
/// position in the original sequence.
pub fn distribute<T>(items: impl IntoIterator<Item = T>, columns: usize) -> Vec<Vec<(usize, T)>> {
    let columns = columns.max(1);
    let mut out: Vec<Vec<(usize, T)>> = (0..columns).map(|_| Vec::new()).collect();
    for (index, item) in items.into_iter().enumerate() {
        out[index % columns].push((index, item));
    }
    out
}

/// Build the masonry grid for the visible set
pub fn view<'a>(visible: &VisibleSet<'_>, thumbnails: &ThumbnailCache, columns: usize) -> Element<'a, Message> {
    if visible.is_empty() {
        return container(text("No images found.").size(16))
            .width(Length::Fill)
            .padding(20)
            .into();
    }

    let columns = distribute(visible.iter(), columns).into_iter().map(|cards| {
        let cards = cards
            .into_iter()
            .map(|(index, photo)| card(index, photo, thumbnails));
        Element::from(
            Column::with_children(cards)
                .spacing(16)
                .width(Length::FillPortion(1)),
        )
    });

    row(columns).spacing(16).width(Length::Fill).into()
}

fn card<'a>(index: usize, photo: &Image, thumbnails: &ThumbnailCache) -> Element<'a, Message> {
    let picture: Element<'a, Message> = match thumbnails.resolve(&photo.url) {
        Resolved::Image(handle) => iced::widget::image(handle).width(Length::Fill).into(),
        Resolved::Pending => container(text("Loading...").size(14))
            .width(Length::Fill)
            .height(Length::Fixed(PENDING_HEIGHT))
            .center_x(Length::Fill)
            .center_y(Length::Fixed(PENDING_HEIGHT))
            .into(),
        Resolved::Broken => container(text("Image not found").size(14))
            .width(Length::Fill)
            .padding(20)
            .into(),
    };

    let content = column![
        picture,
        text(truncate_title(&photo.title)).size(16).width(Length::Fill)
    ]
    .spacing(8)
    .align_x(Alignment::Center);

    button(content)
        .on_press(Message::OpenImage(index))
        .style(button::text)
        .padding(0)
        .into()
}
