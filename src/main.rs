use iced::widget::{column, container, opaque, scrollable, stack, text};
use iced::{keyboard, task, Alignment, Element, Length, Subscription, Task, Theme};
use std::sync::Arc;
use tracing::{info, warn};

// Declare the application modules
mod catalog;
mod config;
mod logging;
mod media;
mod state;
mod ui;

use catalog::{CatalogClient, CatalogError, RawImage};
use config::GalleryConfig;
use media::thumbnail::{self, ThumbnailCache, ThumbnailError, FALLBACK_IMAGE_URL};
use state::carousel::CarouselKey;
use state::data::Category;
use state::{Effect, Gallery};

/// Main application state
struct PhotoGallery {
    /// The gallery state machine
    gallery: Gallery,
    /// Catalog client shared by every background request
    client: CatalogClient,
    /// Decoded photos keyed by URL
    thumbnails: ThumbnailCache,
    /// Handle to the running debounce timer, if any
    search_timer: Option<task::Handle>,
    /// Number of masonry columns
    columns: usize,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// A browse page request finished
    PageLoaded(u32, Result<Vec<RawImage>, Arc<CatalogError>>),
    /// User typed in the search box
    SearchChanged(String),
    /// A debounce timer ran out
    SearchTimerElapsed(u64),
    /// A search request finished
    SearchLoaded(String, Result<Vec<RawImage>, Arc<CatalogError>>),
    /// User clicked a category button
    CategorySelected(Category),
    /// The grid was scrolled
    Scrolled(scrollable::Viewport),
    /// User clicked a photo in the grid
    OpenImage(usize),
    CloseCarousel,
    NextImage,
    PrevImage,
    /// Key press while the carousel is open
    CarouselKey(CarouselKey),
    /// A photo finished downloading and decoding
    ThumbnailLoaded(String, Result<iced::widget::image::Handle, Arc<ThumbnailError>>),
}

impl PhotoGallery {
    /// Create a new instance of the application and request the first page
    fn new(config: GalleryConfig, client: CatalogClient) -> (Self, Task<Message>) {
        let mut app = PhotoGallery {
            gallery: Gallery::new(&config),
            client,
            thumbnails: ThumbnailCache::new(),
            search_timer: None,
            columns: config.columns,
        };

        info!("🎨 Photo gallery starting");
        let effect = app.gallery.start();
        let task = app.run(effect);

        (app, task)
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        let task = match message {
            Message::PageLoaded(page, result) => {
                self.gallery.page_loaded(page, result);
                Task::none()
            }
            Message::SearchChanged(term) => {
                let effect = self.gallery.set_search_term(term);
                self.run(effect)
            }
            Message::SearchTimerElapsed(generation) => {
                match self.gallery.search_timer_elapsed(generation) {
                    Some(effect) => self.run(effect),
                    None => Task::none(),
                }
            }
            Message::SearchLoaded(term, result) => {
                self.gallery.search_loaded(&term, result);
                Task::none()
            }
            Message::CategorySelected(category) => {
                self.gallery.set_category(category);
                Task::none()
            }
            Message::Scrolled(viewport) => {
                let position = ui::grid::scroll_position(&viewport);
                match self.gallery.scrolled(position) {
                    Some(effect) => self.run(effect),
                    None => Task::none(),
                }
            }
            Message::OpenImage(index) => {
                if let Err(error) = self.gallery.open_image(index) {
                    warn!(%error, "could not open image");
                }
                Task::none()
            }
            Message::CloseCarousel => {
                self.gallery.close_carousel();
                Task::none()
            }
            Message::NextImage => {
                self.gallery.next_image();
                Task::none()
            }
            Message::PrevImage => {
                self.gallery.prev_image();
                Task::none()
            }
            Message::CarouselKey(key) => {
                self.gallery.handle_key(key);
                Task::none()
            }
            Message::ThumbnailLoaded(url, result) => {
                self.thumbnails.loaded(&url, result);
                Task::none()
            }
        };

        Task::batch([task, self.request_thumbnails()])
    }

    /// Turn a gallery effect into a background task
    fn run(&mut self, effect: Effect) -> Task<Message> {
        match effect {
            Effect::FetchPage(page) => {
                let client = self.client.clone();
                Task::perform(
                    async move { client.fetch_page(page).await.map_err(Arc::new) },
                    move |result| Message::PageLoaded(page, result),
                )
            }
            Effect::ArmSearchTimer { generation, delay } => {
                self.cancel_search_timer();
                let (timer, handle) = Task::perform(tokio::time::sleep(delay), move |_| {
                    Message::SearchTimerElapsed(generation)
                })
                .abortable();
                self.search_timer = Some(handle);
                timer
            }
            Effect::CancelSearchTimer => {
                self.cancel_search_timer();
                Task::none()
            }
            Effect::FetchSearch(term) => {
                let client = self.client.clone();
                let query = term.clone();
                Task::perform(
                    async move { client.fetch_search(&query, 1).await.map_err(Arc::new) },
                    move |result| Message::SearchLoaded(term.clone(), result),
                )
            }
        }
    }

    fn cancel_search_timer(&mut self) {
        if let Some(handle) = self.search_timer.take() {
            handle.abort();
        }
    }

    /// Start downloads for visible photos that have never been requested,
    /// plus the placeholder once anything has failed
    fn request_thumbnails(&mut self) -> Task<Message> {
        let mut urls: Vec<String> = self
            .gallery
            .visible()
            .iter()
            .map(|image| image.url.clone())
            .collect();

        if self.thumbnails.needs_placeholder() {
            urls.push(FALLBACK_IMAGE_URL.to_string());
        }

        let mut tasks = Vec::new();
        for url in urls {
            if !self.thumbnails.request(&url) {
                continue;
            }
            let client = self.client.clone();
            let target = url.clone();
            tasks.push(Task::perform(
                async move { thumbnail::load_thumbnail(client, target).await.map_err(Arc::new) },
                move |result| Message::ThumbnailLoaded(url.clone(), result),
            ));
        }

        Task::batch(tasks)
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        let visible = self.gallery.visible();

        let mut content = column![
            text("Photo Gallery").size(40),
            ui::toolbar::view(self.gallery.selected_category(), self.gallery.search_term()),
        ]
        .spacing(24)
        .padding(24)
        .align_x(Alignment::Center)
        .width(Length::Fill);

        if visible.is_search_fallback() {
            content = content.push(text("No loaded photos match; showing search results.").size(14));
        }

        content = content.push(ui::grid::view(&visible, &self.thumbnails, self.columns));

        if self.gallery.is_loading() {
            content = content.push(text("Loading...").size(16));
        }

        let page = scrollable(content)
            .on_scroll(Message::Scrolled)
            .width(Length::Fill)
            .height(Length::Fill);

        match self.gallery.current_image() {
            Some(image) => stack![page, opaque(ui::lightbox::view(image, &self.thumbnails))].into(),
            None => container(page).width(Length::Fill).height(Length::Fill).into(),
        }
    }

    /// The keyboard listener exists only while the carousel is open
    fn subscription(&self) -> Subscription<Message> {
        if self.gallery.is_carousel_open() {
            keyboard::on_key_press(|key, _modifiers| ui::carousel_key(&key).map(Message::CarouselKey))
        } else {
            Subscription::none()
        }
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Light
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let config = GalleryConfig::load()?;
    let client = CatalogClient::new(&config)?;

    iced::application("Photo Gallery", PhotoGallery::update, PhotoGallery::view)
        .subscription(PhotoGallery::subscription)
        .theme(PhotoGallery::theme)
        .centered()
        .run_with(move || PhotoGallery::new(config, client))?;

    Ok(())
}
