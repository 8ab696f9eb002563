use crate::error::Result;

/// Retrieves the raw HTML of a listing page.
pub trait PageFetcher {
    fn fetch(&self, url: &str) -> Result<String>;
}
