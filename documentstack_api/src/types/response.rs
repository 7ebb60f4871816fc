/// A generated document and the metadata the API returned with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateResponse {
    /// Raw PDF bytes.
    pub pdf: Vec<u8>,
    /// Filename from `Content-Disposition`, or `document.pdf`.
    pub filename: String,
    /// Server-side generation time from `X-Generation-Time-Ms`; 0 if absent.
    pub generation_time_ms: i64,
    /// Size in bytes from `Content-Length`, or the payload length when the
    /// header is absent or zero.
    pub content_length: u64,
}
