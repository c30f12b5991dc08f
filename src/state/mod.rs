/// State management module
///
/// This module handles all gallery state, including:
/// - Shared data structures (data.rs)
/// - The append-only browse collection (library.rs)
/// - Category/term filtering and the visible set (query.rs)
/// - Page counting and scroll detection (pagination.rs)
/// - Search debouncing (search.rs)
/// - The full-screen carousel and its scroll lock (carousel.rs)
/// - The state machine tying them together (gallery.rs)

pub mod carousel;
pub mod data;
pub mod gallery;
pub mod library;
pub mod pagination;
pub mod query;
pub mod search;

pub use gallery::{Effect, Gallery};
