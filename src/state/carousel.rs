//! Full-screen carousel over the visible set
//!
//! The carousel only stores an index. The set it indexes into is passed in
//! by length on every navigation call, because the visible set is derived
//! and can change underneath an open carousel.

use std::cell::Cell;
use std::rc::Rc;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CarouselError {
    #[error("cannot open image {index}: only {len} images are visible")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Navigation intents the carousel understands while open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselKey {
    Next,
    Previous,
    Close,
}

/// Shared "background scrolling is suspended" flag.
///
/// Clones observe the same flag. The flag can only be raised through
/// [`ScrollLockFlag::acquire`], which hands out a guard that lowers it again
/// when dropped.
#[derive(Debug, Clone, Default)]
pub struct ScrollLockFlag(Rc<Cell<bool>>);

impl ScrollLockFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_locked(&self) -> bool {
        self.0.get()
    }

    pub fn acquire(&self) -> ScrollLock {
        self.0.set(true);
        ScrollLock {
            flag: Rc::clone(&self.0),
        }
    }
}

/// Guard for an acquired scroll lock. Releases on drop.
#[derive(Debug)]
pub struct ScrollLock {
    flag: Rc<Cell<bool>>,
}

impl Drop for ScrollLock {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}

#[derive(Debug, Default)]
pub struct Carousel {
    current_index: usize,
    /// Present exactly while the carousel is open
    lock: Option<ScrollLock>,
    scroll: ScrollLockFlag,
}

impl Carousel {
    pub fn new(scroll: ScrollLockFlag) -> Self {
        Self {
            current_index: 0,
            lock: None,
            scroll,
        }
    }

    pub fn is_open(&self) -> bool {
        self.lock.is_some()
    }

    /// Index of the displayed image, if open
    pub fn current_index(&self) -> Option<usize> {
        self.is_open().then_some(self.current_index)
    }

    pub fn scroll_lock(&self) -> &ScrollLockFlag {
        &self.scroll
    }

    /// Open the carousel on `index` of a visible set of length `len`.
    pub fn open(&mut self, index: usize, len: usize) -> Result<(), CarouselError> {
        if index >= len {
            return Err(CarouselError::IndexOutOfRange { index, len });
        }

        self.current_index = index;
        if self.lock.is_none() {
            self.lock = Some(self.scroll.acquire());
        }
        debug!(index, len, "carousel opened");
        Ok(())
    }

    pub fn close(&mut self) {
        if self.lock.take().is_some() {
            debug!(index = self.current_index, "carousel closed");
        }
    }

    /// Advance one image, wrapping to the first. No-op on an empty set.
    pub fn next(&mut self, len: usize) {
        if !self.is_open() || len == 0 {
            return;
        }
        self.current_index = (self.current_index + 1) % len;
    }

    /// Go back one image, wrapping to the last. No-op on an empty set.
    pub fn prev(&mut self, len: usize) {
        if !self.is_open() || len == 0 {
            return;
        }
        self.current_index = (self.current_index + len - 1) % len;
    }

    pub fn handle_key(&mut self, key: CarouselKey, len: usize) {
        match key {
            CarouselKey::Next => self.next(len),
            CarouselKey::Previous => self.prev(len),
            CarouselKey::Close => self.close(),
        }
    }

    /// Keep the carousel consistent with a visible set that may have changed
    /// size: close it when the set is empty, clamp the index when it shrank.
    pub fn reconcile(&mut self, len: usize) {
        if !self.is_open() {
            return;
        }
        if len == 0 {
            debug!("visible set emptied under open carousel");
            self.close();
        } else if self.current_index >= len {
            self.current_index = len - 1;
        }
    }
}
