use crate::config::FetchConfig;
use crate::fetcher::{
    errors::FetchError,
    pipeline::{check_content_type, process_response},
    types::RawPage,
};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, header};
use tracing::{debug, instrument};
use url::Url;

const MAX_BODY_SIZE: u64 = 5 * 1024 * 1024; // 5MB
const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";
const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// One network attempt: GET `url` presenting `user_agent`, succeeding only
/// on 2xx.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &Url, user_agent: &str) -> Result<RawPage, FetchError>;
}

/// reqwest-backed transport. Holds no per-request state, so one instance can
/// serve concurrent analyses.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(config: FetchConfig) -> Result<Self, FetchError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::ACCEPT, header::HeaderValue::from_static(ACCEPT));
        headers.insert(
            header::ACCEPT_LANGUAGE,
            header::HeaderValue::from_static(ACCEPT_LANGUAGE),
        );

        let client = ClientBuilder::new()
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .default_headers(headers)
            .build()
            .map_err(|_| FetchError::Unknown("The HTTP client could not be initialised.".to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip_all, fields(url = %url))]
    async fn get(&self, url: &Url, user_agent: &str) -> Result<RawPage, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .header(header::USER_AGENT, user_agent)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest_error(&e, url.as_str()))?;

        let status = response.status();
        if !status.is_success() {
            debug!(status = status.as_u16(), "non-success status");
            return Err(FetchError::from_status(status));
        }

        if let Some(content_length) = response.content_length()
            && content_length > MAX_BODY_SIZE
        {
            return Err(too_large());
        }

        let final_url = response.url().clone();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|ct| ct.to_str().ok())
            .map(str::to_string);
        check_content_type(content_type.as_deref())?;

        let body_bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::from_reqwest_error(&e, url.as_str()))?;

        // Content-Length may be missing or wrong for chunked responses
        if body_bytes.len() as u64 > MAX_BODY_SIZE {
            return Err(too_large());
        }

        debug!(bytes = body_bytes.len(), final_url = %final_url, "response received");
        Ok(process_response(
            final_url,
            &body_bytes,
            content_type.as_deref().unwrap_or("text/html"),
        ))
    }
}

fn too_large() -> FetchError {
    FetchError::Unknown("The page is too large to analyze (over 5 MB).".to_string())
}
