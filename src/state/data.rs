/// Shared data structures for the gallery state
///
/// These structs represent the data model that flows between
/// the catalog layer and the UI layer.

use crate::catalog::RawImage;
use std::fmt;

/// Title given to browse records without a description
pub const DEFAULT_TITLE: &str = "Untitled";

/// Category given to browse records without any category
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

/// Represents a single photo shown in the gallery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    /// URL of the regular-sized rendition
    pub url: String,
    /// Human readable title (the photo description)
    pub title: String,
    /// Name of the first category the catalog lists
    pub category: String,
}

impl Image {
    pub fn new(url: impl Into<String>, title: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            category: category.into(),
        }
    }

    /// Convert a browse-page record, filling in defaults for missing fields.
    ///
    /// An empty description counts as missing.
    pub fn from_catalog(raw: &RawImage) -> Self {
        let title = raw
            .description
            .as_deref()
            .filter(|description| !description.is_empty())
            .unwrap_or(DEFAULT_TITLE);

        let category = raw.first_category().unwrap_or(DEFAULT_CATEGORY);

        Self::new(raw.regular_url().unwrap_or_default(), title, category)
    }

    /// Convert a search record as received.
    ///
    /// No defaults are applied; missing fields become empty strings and the
    /// view is responsible for displaying them sensibly.
    pub fn from_search_record(raw: &RawImage) -> Self {
        Self::new(
            raw.regular_url().unwrap_or_default(),
            raw.description.as_deref().unwrap_or_default(),
            raw.first_category().unwrap_or_default(),
        )
    }
}

/// The fixed set of category filters, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Category {
    #[default]
    All,
    Nature,
    City,
    People,
}

impl Category {
    pub const ALL: [Category; 4] = [Category::All, Category::Nature, Category::City, Category::People];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::All => "All",
            Category::Nature => "Nature",
            Category::City => "City",
            Category::People => "People",
        }
    }

    /// `All` matches everything; other categories match by exact name.
    pub fn matches(&self, category: &str) -> bool {
        match self {
            Category::All => true,
            other => other.as_str() == category,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::types::{CategoryTag, ImageUrls};

    fn raw(url: Option<&str>, description: Option<&str>, categories: Option<Vec<&str>>) -> RawImage {
        RawImage {
            urls: url.map(|url| ImageUrls { regular: Some(url.to_string()) }),
            description: description.map(str::to_string),
            categories: categories.map(|titles| {
                titles
                    .into_iter()
                    .map(|title| CategoryTag { title: title.to_string() })
                    .collect()
            }),
        }
    }

    #[test]
    fn test_from_catalog_complete_record() {
        let image = Image::from_catalog(&raw(Some("u"), Some("Red Fox"), Some(vec!["Nature", "Animals"])));
        assert_eq!(image, Image::new("u", "Red Fox", "Nature"));
    }

    #[test]
    fn test_from_catalog_defaults() {
        let missing = Image::from_catalog(&raw(Some("u"), None, None));
        assert_eq!(missing.title, DEFAULT_TITLE);
        assert_eq!(missing.category, DEFAULT_CATEGORY);

        let empty = Image::from_catalog(&raw(Some("u"), Some(""), Some(vec![])));
        assert_eq!(empty.title, DEFAULT_TITLE);
        assert_eq!(empty.category, DEFAULT_CATEGORY);
    }

    #[test]
    fn test_from_search_record_keeps_gaps() {
        let image = Image::from_search_record(&raw(None, None, None));
        assert_eq!(image, Image::new("", "", ""));
    }

    #[test]
    fn test_category_matching() {
        assert!(Category::All.matches("Uncategorized"));
        assert!(Category::Nature.matches("Nature"));
        assert!(!Category::Nature.matches("nature"));
        assert!(!Category::City.matches("Nature"));
    }

    #[test]
    fn test_category_display_order() {
        let names: Vec<String> = Category::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(names, ["All", "Nature", "City", "People"]);
    }
}
