use iced::widget::{button, column, text, text_input};
use iced::{Alignment, Element, Length, Theme};
use iced_aw::Wrap;

use crate::state::data::Category;
use crate::Message;

/// Category buttons in a wrapping row, followed by the search box
pub fn view<'a>(selected: Category, search_term: &str) -> Element<'a, Message> {
    let buttons: Vec<Element<'a, Message>> = Category::ALL
        .iter()
        .map(|&category| category_button(category, category == selected))
        .collect();

    let categories = Wrap::with_elements(buttons).spacing(8.0).line_spacing(8.0);

    let search = text_input("Search images...", search_term)
        .on_input(Message::SearchChanged)
        .padding(10)
        .width(Length::Fixed(256.0));

    column![categories, search]
        .spacing(16)
        .align_x(Alignment::Center)
        .width(Length::Fill)
        .into()
}

fn category_button<'a>(category: Category, is_selected: bool) -> Element<'a, Message> {
    let style: fn(&Theme, button::Status) -> button::Style = if is_selected {
        button::primary
    } else {
        button::secondary
    };

    button(text(category.as_str()).size(14))
        .padding([8, 16])
        .style(style)
        .on_press(Message::CategorySelected(category))
        .into()
}
