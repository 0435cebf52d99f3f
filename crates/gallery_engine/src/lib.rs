//! Gallery engine: page fetching, decoding and image extraction.
mod decode;
mod engine;
mod extract;
mod fetch;
mod resolve;
mod service;
mod types;

pub use decode::{decode_html, DecodedHtml};
pub use engine::EngineHandle;
pub use extract::{ImageExtractor, ImgAttributeExtractor, MAX_IMAGES};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher, DEFAULT_USER_AGENT};
pub use resolve::{resolve, resolve_with};
pub use service::{validate_target, ExtractionService};
pub use types::{
    EngineEvent, ExtractionFailure, FailureCategory, FailureKind, FetchError, FetchMetadata,
    FetchOutput, RequestId,
};
