//! Category filter, free-text term and the visible-set derivation
//!
//! The visible set is never stored. It is recomputed from the browse
//! collection and the latest search results whenever the view needs it,
//! with a fixed precedence: browse matches win, search results are only a
//! fallback when nothing loaded so far matches.

use super::data::{Category, Image};

/// The images currently eligible for display and carousel indexing.
#[derive(Debug, Clone, PartialEq)]
pub enum VisibleSet<'a> {
    /// Loaded browse pages filtered by category and term
    BrowseMatch(Vec<&'a Image>),
    /// Latest search response, shown because no browse image matched
    SearchFallback(&'a [Image]),
    /// Nothing to show
    Empty,
}

impl<'a> VisibleSet<'a> {
    pub fn len(&self) -> usize {
        match self {
            VisibleSet::BrowseMatch(images) => images.len(),
            VisibleSet::SearchFallback(images) => images.len(),
            VisibleSet::Empty => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> Option<&'a Image> {
        match self {
            VisibleSet::BrowseMatch(images) => images.get(index).copied(),
            VisibleSet::SearchFallback(images) => images.get(index),
            VisibleSet::Empty => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Image> + '_ {
        (0..self.len()).filter_map(move |index| self.get(index))
    }

    pub fn is_search_fallback(&self) -> bool {
        matches!(self, VisibleSet::SearchFallback(_))
    }
}

/// Owns the query inputs and the search-result slot
#[derive(Debug, Default, Clone)]
pub struct QueryController {
    selected_category: Category,
    search_term: String,
    search_results: Vec<Image>,
}

impl QueryController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_category(&self) -> Category {
        self.selected_category
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    #[cfg(test)]
    pub fn search_results(&self) -> &[Image] {
        &self.search_results
    }

    pub fn set_category(&mut self, category: Category) {
        self.selected_category = category;
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Replace the search results wholesale with a new response.
    pub fn replace_search_results(&mut self, results: Vec<Image>) {
        self.search_results = results;
    }

    pub fn clear_search_results(&mut self) {
        self.search_results.clear();
    }

    /// Whether a browse image passes the category and term filters.
    pub fn matches(&self, image: &Image) -> bool {
        self.selected_category.matches(&image.category)
            && image
                .title
                .to_lowercase()
                .contains(&self.search_term.to_lowercase())
    }

    /// Derive the visible set from the browse collection and the search slot.
    pub fn visible<'a>(&'a self, collection: &'a [Image]) -> VisibleSet<'a> {
        let browse_filtered: Vec<&Image> = collection.iter().filter(|image| self.matches(image)).collect();

        if !browse_filtered.is_empty() {
            VisibleSet::BrowseMatch(browse_filtered)
        } else if !self.search_results.is_empty() {
            VisibleSet::SearchFallback(&self.search_results)
        } else {
            VisibleSet::Empty
        }
    }
}
