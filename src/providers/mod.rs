//! Generation provider implementations

pub mod cohere;
pub mod elevenlabs;
pub mod huggingface;

// Re-export for convenience
pub use cohere::CohereClient;
pub use elevenlabs::ElevenLabsClient;
pub use huggingface::HuggingFaceClient;

/// Log and turn a non-success provider response into `ApiError`
pub(crate) async fn api_error(
  provider: &str
, response: reqwest::Response
) -> crate::error::Error
{   let status = response.status().as_u16();
    let body = response.text().await
      .unwrap_or_else(|_|
        "Unknown error".to_string()
      );
    log::error!("{} API error ({}): {}", provider, status, body);
    crate::error::Error::ApiError { status, body }
}
