use std::fmt;

pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    ExtractionCompleted {
        request_id: RequestId,
        result: Result<Vec<String>, ExtractionFailure>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutput {
    pub bytes: Vec<u8>,
    pub metadata: FetchMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchMetadata {
    pub original_url: String,
    pub final_url: String,
    pub redirect_count: usize,
    pub content_type: Option<String>,
    pub byte_len: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    UnsupportedContentType { content_type: String },
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::UnsupportedContentType { content_type } => {
                write!(f, "unsupported content type {content_type}")
            }
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

/// Coarse classification callers use to tell bad input from upstream trouble.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCategory {
    Input,
    Fetch,
    Extraction,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractionFailure {
    /// Missing or unusable target URL; no fetch was attempted.
    #[error("{message}")]
    Input { message: String },
    #[error("Failed to fetch page: {0}")]
    Fetch(#[from] FetchError),
    #[error("Failed to extract images: {message}")]
    Extraction { message: String },
}

impl ExtractionFailure {
    pub fn input(message: impl Into<String>) -> Self {
        Self::Input {
            message: message.into(),
        }
    }

    pub fn category(&self) -> FailureCategory {
        match self {
            ExtractionFailure::Input { .. } => FailureCategory::Input,
            ExtractionFailure::Fetch(_) => FailureCategory::Fetch,
            ExtractionFailure::Extraction { .. } => FailureCategory::Extraction,
        }
    }

    /// Short human-readable message, without the underlying detail.
    pub fn summary(&self) -> &str {
        match self {
            ExtractionFailure::Input { message } => message,
            ExtractionFailure::Fetch(_) => "Failed to fetch page",
            ExtractionFailure::Extraction { .. } => "Failed to extract images",
        }
    }

    /// The underlying failure, when there is one beyond the summary.
    pub fn detail(&self) -> Option<String> {
        match self {
            ExtractionFailure::Input { .. } => None,
            ExtractionFailure::Fetch(err) => Some(err.to_string()),
            ExtractionFailure::Extraction { message } => Some(message.clone()),
        }
    }
}
