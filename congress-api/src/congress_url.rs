/// Root of the Congress.gov v3 API.
pub const DEFAULT_BASE_URL: &str = "https://api.congress.gov/v3";

#[derive(Debug, Clone)]
pub struct CongressURL(String);

impl AsRef<str> for CongressURL {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Default for CongressURL {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl CongressURL {
    pub fn new(base_url: &str) -> Self {
        Self(base_url.trim_end_matches('/').to_string())
    }

    /// Append the given path to the URL.
    pub fn append_path(&self, path: &str) -> Self {
        let trimmed_url = self.0.trim_end_matches('/');
        let trimmed_path = path.trim_start_matches('/');
        Self(format!("{}/{}", trimmed_url, trimmed_path))
    }
}
