/// View layer
///
/// Pure functions from gallery state to iced elements:
/// - Category bar and search box (toolbar.rs)
/// - Masonry grid of the visible set (grid.rs)
/// - Full-screen carousel overlay (lightbox.rs)

pub mod grid;
pub mod lightbox;
pub mod toolbar;

use iced::keyboard::{self, key::Named};

use crate::state::carousel::CarouselKey;
use crate::state::data::DEFAULT_TITLE;

/// Titles longer than this are cut in the grid
pub const MAX_TITLE_CHARS: usize = 100;

/// Title to show for an image. Search results may carry an empty title.
pub fn display_title(title: &str) -> &str {
    if title.trim().is_empty() {
        DEFAULT_TITLE
    } else {
        title
    }
}

/// Shorten a title for the grid, appending "..." when cut
pub fn truncate_title(title: &str) -> String {
    let title = display_title(title);
    match title.char_indices().nth(MAX_TITLE_CHARS) {
        Some((cut, _)) => format!("{}...", &title[..cut]),
        None => title.to_string(),
    }
}

/// Map a key press to a carousel intent
pub fn carousel_key(key: &keyboard::Key) -> Option<CarouselKey> {
    match key {
        keyboard::Key::Named(Named::ArrowRight) => Some(CarouselKey::Next),
        keyboard::Key::Named(Named::ArrowLeft) => Some(CarouselKey::Previous),
        keyboard::Key::Named(Named::Escape) => Some(CarouselKey::Close),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_title_defends_empty() {
        assert_eq!(display_title(""), "Untitled");
        assert_eq!(display_title("  "), "Untitled");
        assert_eq!(display_title("Red Fox"), "Red Fox");
    }

    #[test]
    fn test_truncate_title() {
        let exact = "x".repeat(MAX_TITLE_CHARS);
        assert_eq!(truncate_title(&exact), exact);

        let long = "y".repeat(MAX_TITLE_CHARS + 5);
        let cut = truncate_title(&long);
        assert_eq!(cut, format!("{}...", "y".repeat(MAX_TITLE_CHARS)));
    }

    #[test]
    fn test_truncate_title_respects_char_boundaries() {
        let long = "é".repeat(MAX_TITLE_CHARS + 1);
        let cut = truncate_title(&long);
        assert_eq!(cut.chars().count(), MAX_TITLE_CHARS + 3);
    }

    #[test]
    fn test_carousel_keys() {
        assert_eq!(
            carousel_key(&keyboard::Key::Named(Named::ArrowRight)),
            Some(CarouselKey::Next)
        );
        assert_eq!(
            carousel_key(&keyboard::Key::Named(Named::ArrowLeft)),
            Some(CarouselKey::Previous)
        );
        assert_eq!(
            carousel_key(&keyboard::Key::Named(Named::Escape)),
            Some(CarouselKey::Close)
        );
        assert_eq!(carousel_key(&keyboard::Key::Named(Named::Enter)), None);
        assert_eq!(carousel_key(&keyboard::Key::Character("a".into())), None);
    }
}
