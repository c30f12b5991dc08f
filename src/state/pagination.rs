//! Page counter, loading flag and scroll-threshold detection
//!
//! Pages are requested one at a time as the user scrolls near the bottom of
//! the grid. There is no "already loading" guard: every scroll
//! event inside the threshold asks for the next page, so several requests
//! can be in flight at once and they complete in whatever order the network
//! delivers them.

/// Distance from the bottom edge that triggers the next page
pub const SCROLL_THRESHOLD: f32 = 100.0;

/// Geometry of the scrolled grid at one instant
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollPosition {
    /// Height of the visible part of the grid
    pub viewport_height: f32,
    /// Distance scrolled from the top
    pub scroll_top: f32,
    /// Full height of the grid content
    pub document_height: f32,
}

impl ScrollPosition {
    pub fn new(viewport_height: f32, scroll_top: f32, document_height: f32) -> Self {
        Self {
            viewport_height,
            scroll_top,
            document_height,
        }
    }

    /// Whether the bottom edge of the viewport is within `threshold` of the
    /// bottom of the content.
    pub fn near_bottom(&self, threshold: f32) -> bool {
        self.viewport_height + self.scroll_top >= self.document_height - threshold
    }
}

/// A browse page the caller should fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
}

#[derive(Debug, Clone)]
pub struct Pagination {
    page: u32,
    is_loading: bool,
    threshold: f32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(SCROLL_THRESHOLD)
    }
}

impl Pagination {
    pub fn new(threshold: f32) -> Self {
        Self {
            page: 1,
            is_loading: false,
            threshold,
        }
    }

    /// Current page number, starting at 1
    #[cfg(test)]
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Request the current page. Called once on startup.
    pub fn start(&mut self) -> PageRequest {
        self.begin_loading();
        PageRequest { page: self.page }
    }

    /// Advance to the next page if the scroll position is near the bottom.
    pub fn on_scroll(&mut self, position: ScrollPosition) -> Option<PageRequest> {
        if !position.near_bottom(self.threshold) {
            return None;
        }

        self.page += 1;
        self.begin_loading();
        Some(PageRequest { page: self.page })
    }

    pub fn begin_loading(&mut self) {
        self.is_loading = true;
    }

    /// Mark a fetch as finished, successful or not.
    pub fn finish_loading(&mut self) {
        self.is_loading = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_requests_first_page() {
        let mut pagination = Pagination::default();
        assert!(!pagination.is_loading());

        assert_eq!(pagination.start(), PageRequest { page: 1 });
        assert!(pagination.is_loading());
    }

    #[test]
    fn test_near_bottom_threshold() {
        // 600 + 300 >= 1000 - 100
        assert!(ScrollPosition::new(600.0, 300.0, 1000.0).near_bottom(100.0));
        assert!(!ScrollPosition::new(600.0, 299.0, 1000.0).near_bottom(100.0));
        // Content shorter than the viewport is always near the bottom
        assert!(ScrollPosition::new(600.0, 0.0, 200.0).near_bottom(100.0));
    }

    #[test]
    fn test_scroll_far_from_bottom_does_nothing() {
        let mut pagination = Pagination::default();
        assert_eq!(pagination.on_scroll(ScrollPosition::new(600.0, 0.0, 5000.0)), None);
        assert_eq!(pagination.page(), 1);
        assert!(!pagination.is_loading());
    }

    #[test]
    fn test_repeated_scroll_requests_each_page() {
        let mut pagination = Pagination::default();
        pagination.start();
        let bottom = ScrollPosition::new(600.0, 400.0, 1000.0);

        // No guard while the previous page is still loading
        assert_eq!(pagination.on_scroll(bottom), Some(PageRequest { page: 2 }));
        assert_eq!(pagination.on_scroll(bottom), Some(PageRequest { page: 3 }));
        assert_eq!(pagination.page(), 3);
        assert!(pagination.is_loading());
    }

    #[test]
    fn test_finish_clears_loading() {
        let mut pagination = Pagination::default();
        pagination.start();
        pagination.finish_loading();
        assert!(!pagination.is_loading());
    }
}
