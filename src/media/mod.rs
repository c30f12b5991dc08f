/// Image asset handling
///
/// This module handles:
/// - Downloading photo renditions from the catalog's CDN
/// - Decoding and downsizing them off the UI thread
/// - Caching decoded handles per URL, with a one-shot placeholder on failure

pub mod thumbnail;
