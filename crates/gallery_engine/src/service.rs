use std::sync::Arc;

use gallery_logging::{gallery_error, gallery_info, gallery_warn};
use url::Url;

use crate::decode::decode_html;
use crate::extract::{ImageExtractor, ImgAttributeExtractor};
use crate::fetch::{FetchSettings, Fetcher, ReqwestFetcher};
use crate::ExtractionFailure;

/// Fetch a page, decode it and pull out its image URLs.
pub struct ExtractionService<F = ReqwestFetcher, E = ImgAttributeExtractor> {
    fetcher: F,
    extractor: Arc<E>,
}

impl ExtractionService {
    pub fn new(settings: FetchSettings) -> Self {
        Self::with_parts(ReqwestFetcher::new(settings), ImgAttributeExtractor::default())
    }
}

impl<F, E> ExtractionService<F, E>
where
    F: Fetcher,
    E: ImageExtractor + 'static,
{
    pub fn with_parts(fetcher: F, extractor: E) -> Self {
        Self {
            fetcher,
            extractor: Arc::new(extractor),
        }
    }

    /// Runs one extraction. `None` models a request without the `url` parameter.
    pub async fn extract_images(&self, url: Option<&str>) -> Result<Vec<String>, ExtractionFailure> {
        let target = validate_target(url)?;

        let output = self.fetcher.fetch(target.as_str()).await.map_err(|err| {
            gallery_warn!("Fetching {} failed: {}", target, err);
            ExtractionFailure::from(err)
        })?;

        let decoded = decode_html(&output.bytes, output.metadata.content_type.as_deref());
        if decoded.had_errors {
            gallery_warn!(
                "{} contained bytes invalid for {}; replaced",
                target,
                decoded.encoding_label
            );
        }

        // Relative references resolve against where the page actually lives.
        let base = output.metadata.final_url;
        let extractor = Arc::clone(&self.extractor);
        let images = tokio::task::spawn_blocking(move || extractor.extract(&decoded.html, &base))
            .await
            .map_err(|err| {
                gallery_error!("Extraction task for {} failed: {}", target, err);
                ExtractionFailure::Extraction {
                    message: err.to_string(),
                }
            })?;

        gallery_info!("Extracted {} image URLs from {}", images.len(), target);
        Ok(images)
    }
}

/// Checks the `url` parameter before anything touches the network.
pub fn validate_target(url: Option<&str>) -> Result<Url, ExtractionFailure> {
    let raw = url
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .ok_or_else(|| ExtractionFailure::input("Missing URL parameter"))?;

    let parsed = Url::parse(raw)
        .map_err(|err| ExtractionFailure::input(format!("Invalid URL parameter: {err}")))?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(ExtractionFailure::input(format!(
            "Unsupported URL scheme: {other}"
        ))),
    }
}
