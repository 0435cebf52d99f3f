use crate::session::RequestId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Run the extraction service for `url`; answer with `Msg::ExtractionCompleted`.
    ExtractImages { request_id: RequestId, url: String },
}
