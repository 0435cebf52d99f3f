use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures_util::StreamExt;
use gallery_logging::gallery_debug;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::redirect::Policy;
use reqwest::Response;

use crate::{FailureKind, FetchError, FetchMetadata, FetchOutput};

pub const DEFAULT_USER_AGENT: &str = concat!("gallery-scraper/", env!("CARGO_PKG_VERSION"));

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml;q=0.9,*/*;q=0.5";

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub connect_timeout: Duration,
    /// Budget for the whole request, body included.
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    pub max_bytes: u64,
    /// Accepted media types; empty accepts anything.
    pub allowed_content_types: Vec<String>,
    pub user_agent: String,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            redirect_limit: 5,
            max_bytes: 5 * 1024 * 1024,
            allowed_content_types: vec![
                "text/html".to_string(),
                "application/xhtml+xml".to_string(),
            ],
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl FetchSettings {
    fn accepts_media_type(&self, content_type: &str) -> bool {
        let media_type = media_type(content_type);
        self.allowed_content_types.is_empty()
            || self
                .allowed_content_types
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(media_type))
    }

    fn over_limit(&self, actual: u64) -> Option<FetchError> {
        (actual > self.max_bytes).then(|| {
            FetchError::new(
                FailureKind::TooLarge {
                    max_bytes: self.max_bytes,
                    actual: Some(actual),
                },
                "page exceeds the size limit",
            )
        })
    }
}

/// Retrieves the raw bytes of a page.
#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchOutput, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    settings: FetchSettings,
}

impl ReqwestFetcher {
    pub fn new(settings: FetchSettings) -> Self {
        Self { settings }
    }

    /// One client per request so the redirect policy can count into `hops`.
    fn client_counting(&self, hops: Arc<AtomicUsize>) -> Result<reqwest::Client, FetchError> {
        let limit = self.settings.redirect_limit;
        let policy = Policy::custom(move |attempt| {
            let seen = attempt.previous().len();
            hops.store(seen, Ordering::Relaxed);
            if seen > limit {
                attempt.error(format!("more than {limit} redirects"))
            } else {
                attempt.follow()
            }
        });

        reqwest::Client::builder()
            .user_agent(self.settings.user_agent.as_str())
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .redirect(policy)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))
    }

    /// Rejects responses the extractor should never see and returns the
    /// declared content type of the ones it should.
    fn admit(&self, response: &Response) -> Result<Option<String>, FetchError> {
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(err) = response
            .content_length()
            .and_then(|declared| self.settings.over_limit(declared))
        {
            return Err(err);
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        match content_type.as_deref() {
            Some(ct) if !self.settings.accepts_media_type(ct) => Err(FetchError::new(
                FailureKind::UnsupportedContentType {
                    content_type: ct.to_string(),
                },
                "not an HTML document",
            )),
            _ => Ok(content_type),
        }
    }

    /// Streams the body, giving up as soon as it outgrows `max_bytes`.
    async fn read_capped(&self, response: Response) -> Result<Vec<u8>, FetchError> {
        let mut body = Vec::new();
        let mut chunks = response.bytes_stream();
        while let Some(chunk) = chunks.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            if let Some(err) = self.settings.over_limit((body.len() + chunk.len()) as u64) {
                return Err(err);
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }
}

#[async_trait::async_trait]
impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchOutput, FetchError> {
        let target = reqwest::Url::parse(url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let hops = Arc::new(AtomicUsize::new(0));

        let response = self
            .client_counting(Arc::clone(&hops))?
            .get(target)
            .header(ACCEPT, ACCEPT_HTML)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let content_type = self.admit(&response)?;
        let final_url = response.url().to_string();
        let redirect_count = hops.load(Ordering::Relaxed);
        if redirect_count > 0 {
            gallery_debug!("{} redirected {} time(s) to {}", url, redirect_count, final_url);
        }

        let bytes = self.read_capped(response).await?;
        Ok(FetchOutput {
            metadata: FetchMetadata {
                original_url: url.to_string(),
                final_url,
                redirect_count,
                content_type,
                byte_len: bytes.len() as u64,
            },
            bytes,
        })
    }
}

/// `text/html; charset=utf-8` -> `text/html`
fn media_type(content_type: &str) -> &str {
    content_type
        .split_once(';')
        .map_or(content_type, |(media, _)| media)
        .trim()
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    let kind = if err.is_timeout() {
        FailureKind::Timeout
    } else if err.is_redirect() {
        FailureKind::RedirectLimitExceeded
    } else {
        FailureKind::Network
    };
    FetchError::new(kind, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_type_drops_parameters() {
        assert_eq!(media_type("text/html; charset=utf-8"), "text/html");
        assert_eq!(media_type(" application/xhtml+xml "), "application/xhtml+xml");
    }

    #[test]
    fn empty_allow_list_accepts_anything() {
        let settings = FetchSettings {
            allowed_content_types: Vec::new(),
            ..FetchSettings::default()
        };
        assert!(settings.accepts_media_type("image/png"));
        assert!(!FetchSettings::default().accepts_media_type("image/png"));
        assert!(FetchSettings::default().accepts_media_type("TEXT/HTML; charset=latin1"));
    }

    #[test]
    fn limit_is_inclusive() {
        let settings = FetchSettings {
            max_bytes: 10,
            ..FetchSettings::default()
        };
        assert!(settings.over_limit(10).is_none());
        assert!(settings.over_limit(11).is_some());
    }
}
