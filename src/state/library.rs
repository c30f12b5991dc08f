use super::data::Image;

/// The ImageStore accumulates browse pages into one ordered collection.
///
/// Pages are concatenated at the tail in the order they are handed in.
/// Nothing is ever removed or deduplicated: if the catalog sends the same
/// photo twice, it appears twice.
#[derive(Debug, Default, Clone)]
pub struct ImageStore {
    images: Vec<Image>,
}

impl ImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a page of already-normalized images.
    /// Returns the number of images appended.
    pub fn append_page(&mut self, page: impl IntoIterator<Item = Image>) -> usize {
        let before = self.images.len();
        self.images.extend(page);
        self.images.len() - before
    }

    /// All images in insertion order
    pub fn images(&self) -> &[Image] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}
