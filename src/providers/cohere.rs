use serde::{Deserialize, Serialize};
use log::{debug, trace, error};

const COHERE_API_BASE: &str
  = "https://api.cohere.ai";

const COHERE_MODEL: &str = "command";
const MAX_TOKENS: usize = 100;
const TEMPERATURE: f32 = 0.7;

/// Substituted when the provider returns no usable candidate
pub const NO_RESPONSE: &str = "No response";

// ===== Message Types =====

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CohereGenerateRequest
{   pub model: String
  , pub prompt: String
  , pub max_tokens: usize
  , pub temperature: f32
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CohereGenerateResponse
{   #[serde(default)]
    pub generations: Vec<Generation>
}

#[derive(Debug, Clone, Deserialize)]
pub struct Generation
{   #[serde(default)]
    pub text: Option<String>
}

impl CohereGenerateResponse
{   /// Trimmed first candidate, or `NO_RESPONSE`
    pub fn first_text(&self) -> String
    {   self.generations.first()
          .and_then(|g| g.text.as_deref())
          .map(str::trim)
          .filter(|t| !t.is_empty())
          .unwrap_or(NO_RESPONSE)
          .to_string()
    }
}

/// Provider prompt for a caption in the requested tone
pub fn build_prompt(request: &crate::GenerationRequest) -> String
{   format!(
      "Write a {} marketing headline and caption for: {}",
      request.tone, request.prompt
    )
}

// ===== Cohere Client =====

/// Text generation through Cohere's `generate` endpoint
pub struct CohereClient
{   api_key: String
  , api_base: String
  , http_client: reqwest::Client
}

impl CohereClient
{   pub fn new(config: &crate::config::ProviderConfig)
      -> Result<Self, crate::error::Error>
    {   debug!("Creating CohereClient");
        Ok(CohereClient
        {   api_key: config.key_or_empty().to_string()
          , api_base: config.base_or(COHERE_API_BASE).to_string()
          , http_client: config.http_client()?
        })
    }

    /// Generate a caption; one call, no retries
    pub async fn generate(
      &self
    , request: &crate::GenerationRequest
    ) -> Result<String, crate::error::Error>
    {   let body = CohereGenerateRequest
        {   model: COHERE_MODEL.to_string()
          , prompt: build_prompt(request)
          , max_tokens: MAX_TOKENS
          , temperature: TEMPERATURE
        };

        trace!("Cohere request: {:?}", body);

        let response = self.http_client
          .post(format!("{}/v1/generate", self.api_base))
          .header("Authorization", format!("Bearer {}", self.api_key))
          .header("Content-Type", "application/json")
          .json(&body)
          .send()
          .await
          .map_err(|e| {
            error!("Cohere HTTP error: {}", e);
            crate::error::Error::from_reqwest(e)
          })?;

        let status = response.status();
        trace!("Cohere response status: {}", status);

        if !status.is_success()
        {   return Err(super::api_error("Cohere", response).await);
        }

        let generated: CohereGenerateResponse
          = response.json().await.map_err(|e| {
            error!("Cohere parse error: {}", e);
            crate::error::Error::ParseError(e.to_string())
          })?;

        Ok(generated.first_text())
    }
}
