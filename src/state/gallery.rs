//! The gallery state machine
//!
//! `Gallery` composes the store, query, pagination, debouncer and carousel.
//! It never performs I/O itself: operations that need the network or a
//! timer return an [`Effect`], and the outcome is fed back through the
//! matching `*_loaded` / `*_elapsed` method.

use std::fmt::Display;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::carousel::{Carousel, CarouselError, CarouselKey, ScrollLockFlag};
use super::data::{Category, Image};
use super::library::ImageStore;
use super::pagination::{Pagination, ScrollPosition};
use super::query::{QueryController, VisibleSet};
use super::search::{DebounceAction, SearchDebouncer};
use crate::catalog::RawImage;
use crate::config::GalleryConfig;

/// Work the gallery needs done outside of itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch browse page `n` and report it with [`Gallery::page_loaded`]
    FetchPage(u32),
    /// Start the debounce timer; report with [`Gallery::search_timer_elapsed`]
    ArmSearchTimer { generation: u64, delay: Duration },
    /// Drop any running debounce timer
    CancelSearchTimer,
    /// Fetch page 1 of search results; report with [`Gallery::search_loaded`]
    FetchSearch(String),
}

#[derive(Debug)]
pub struct Gallery {
    store: ImageStore,
    query: QueryController,
    pagination: Pagination,
    debouncer: SearchDebouncer,
    carousel: Carousel,
}

impl Default for Gallery {
    fn default() -> Self {
        Self::new(&GalleryConfig::default())
    }
}

impl Gallery {
    pub fn new(config: &GalleryConfig) -> Self {
        Self {
            store: ImageStore::new(),
            query: QueryController::new(),
            pagination: Pagination::new(config.scroll_threshold),
            debouncer: SearchDebouncer::new(config.search_debounce()),
            carousel: Carousel::new(ScrollLockFlag::new()),
        }
    }

    /// Kick off the first browse page.
    pub fn start(&mut self) -> Effect {
        let request = self.pagination.start();
        Effect::FetchPage(request.page)
    }

    // ========== Queries ==========

    pub fn visible(&self) -> VisibleSet<'_> {
        self.query.visible(self.store.images())
    }

    #[cfg(test)]
    pub fn images(&self) -> &[Image] {
        self.store.images()
    }

    #[cfg(test)]
    pub fn search_results(&self) -> &[Image] {
        self.query.search_results()
    }

    pub fn selected_category(&self) -> Category {
        self.query.selected_category()
    }

    pub fn search_term(&self) -> &str {
        self.query.search_term()
    }

    #[cfg(test)]
    pub fn page(&self) -> u32 {
        self.pagination.page()
    }

    pub fn is_loading(&self) -> bool {
        self.pagination.is_loading()
    }

    pub fn is_carousel_open(&self) -> bool {
        self.carousel.is_open()
    }

    /// Position in the visible set of the image shown in the carousel
    #[cfg(test)]
    pub fn carousel_index(&self) -> Option<usize> {
        self.carousel.current_index()
    }

    /// The image shown in the carousel, if open
    pub fn current_image(&self) -> Option<&Image> {
        let index = self.carousel.current_index()?;
        self.visible().get(index)
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.carousel.scroll_lock().is_locked()
    }

    // ========== Query input ==========

    pub fn set_category(&mut self, category: Category) {
        debug!(%category, "category selected");
        self.query.set_category(category);
        self.reconcile_carousel();
    }

    /// Record a new search term. A blank term clears search results and the
    /// loading flag right away; anything else (re)arms the debounce timer.
    pub fn set_search_term(&mut self, term: impl Into<String>) -> Effect {
        let term = term.into();
        let action = self.debouncer.on_term_changed(&term);
        self.query.set_search_term(term);

        let effect = match action {
            DebounceAction::Arm { generation, delay } => Effect::ArmSearchTimer { generation, delay },
            DebounceAction::Clear => {
                self.query.clear_search_results();
                self.pagination.finish_loading();
                Effect::CancelSearchTimer
            }
        };

        self.reconcile_carousel();
        effect
    }

    /// A debounce timer elapsed. Only the current generation searches.
    pub fn search_timer_elapsed(&mut self, generation: u64) -> Option<Effect> {
        let term = self.debouncer.on_timer_elapsed(generation)?;
        info!("🔍 Searching for {:?}", term);
        self.pagination.begin_loading();
        Some(Effect::FetchSearch(term))
    }

    /// A search request completed. Responses are applied in arrival order
    /// with no check against the current term.
    pub fn search_loaded<E: Display>(&mut self, term: &str, result: Result<Vec<RawImage>, E>) {
        self.pagination.finish_loading();

        match result {
            Ok(records) => {
                let results: Vec<Image> = records.iter().map(Image::from_search_record).collect();
                info!("✅ Search for {:?} returned {} images", term, results.len());
                self.query.replace_search_results(results);
            }
            Err(error) => {
                warn!(term, %error, "search failed");
            }
        }

        self.reconcile_carousel();
    }

    // ========== Pagination ==========

    /// The grid was scrolled. Ignored while the carousel holds the scroll lock.
    pub fn scrolled(&mut self, position: ScrollPosition) -> Option<Effect> {
        if self.is_scroll_locked() {
            return None;
        }

        let request = self.pagination.on_scroll(position)?;
        debug!(page = request.page, "scrolled near bottom");
        Some(Effect::FetchPage(request.page))
    }

    /// A browse page completed. Pages are appended in completion order, which
    /// is not necessarily request order.
    pub fn page_loaded<E: Display>(&mut self, page: u32, result: Result<Vec<RawImage>, E>) {
        self.pagination.finish_loading();

        match result {
            Ok(records) => {
                let appended = self.store.append_page(records.iter().map(Image::from_catalog));
                info!(
                    "📥 Loaded page {} ({} images, {} total)",
                    page,
                    appended,
                    self.store.len()
                );
            }
            Err(error) => {
                warn!(page, %error, "failed to fetch images");
            }
        }

        self.reconcile_carousel();
    }

    // ========== Carousel ==========

    pub fn open_image(&mut self, index: usize) -> Result<(), CarouselError> {
        let len = self.visible().len();
        self.carousel.open(index, len)
    }

    pub fn close_carousel(&mut self) {
        self.carousel.close();
    }

    pub fn next_image(&mut self) {
        let len = self.visible().len();
        self.carousel.next(len);
    }

    pub fn prev_image(&mut self) {
        let len = self.visible().len();
        self.carousel.prev(len);
    }

    pub fn handle_key(&mut self, key: CarouselKey) {
        let len = self.visible().len();
        self.carousel.handle_key(key, len);
    }

    fn reconcile_carousel(&mut self) {
        let len = self.visible().len();
        self.carousel.reconcile(len);
    }
}
