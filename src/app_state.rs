use crate::config::Config;
use crate::fetcher::{FetchError, Fetcher};

#[derive(Clone)]
pub struct AppState {
    pub fetcher: Fetcher,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        Ok(Self {
            fetcher: Fetcher::new(config.fetch())?,
        })
    }
}
