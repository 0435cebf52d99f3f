use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::resolve::resolve_with;

/// Hard cap on image URLs returned for one page.
pub const MAX_IMAGES: usize = 200;

pub trait ImageExtractor: Send + Sync {
    /// Returns absolute image URLs found in `html`, in document order.
    fn extract(&self, html: &str, base_url: &str) -> Vec<String>;
}

/// Structural `<img>` scanner:
/// - `src`, then `data-src`, then every `srcset` candidate, per element
/// - elements in document order, no de-duplication
/// - stops taking new elements once `max_images` URLs are collected, then
///   truncates to exactly `max_images`.
#[derive(Debug, Clone, Copy)]
pub struct ImgAttributeExtractor {
    max_images: usize,
}

impl Default for ImgAttributeExtractor {
    fn default() -> Self {
        Self::with_max_images(MAX_IMAGES)
    }
}

impl ImgAttributeExtractor {
    pub fn with_max_images(max_images: usize) -> Self {
        Self { max_images }
    }
}

impl ImageExtractor for ImgAttributeExtractor {
    fn extract(&self, html: &str, base_url: &str) -> Vec<String> {
        let Ok(img_sel) = Selector::parse("img") else {
            return Vec::new();
        };
        // html5ever never rejects input; broken markup yields a best-effort tree.
        let document = Html::parse_document(html);
        let base = Url::parse(base_url).ok();

        let mut urls = Vec::new();
        for element in document.select(&img_sel) {
            if urls.len() >= self.max_images {
                break;
            }
            collect_element(element, base.as_ref(), &mut urls);
        }
        urls.truncate(self.max_images);
        urls
    }
}

fn collect_element(element: ElementRef, base: Option<&Url>, urls: &mut Vec<String>) {
    let attrs = element.value();

    for name in ["src", "data-src"] {
        if let Some(value) = attrs.attr(name).filter(|v| !v.trim().is_empty()) {
            urls.push(resolve_with(value, base));
        }
    }

    if let Some(srcset) = attrs.attr("srcset") {
        urls.extend(
            srcset
                .split(',')
                .filter_map(|candidate| candidate.split_whitespace().next())
                .map(|url| resolve_with(url, base)),
        );
    }
}
