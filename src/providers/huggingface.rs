use serde::{Deserialize, Serialize};
use log::{debug, trace, error};

const HUGGINGFACE_API_BASE: &str
  = "https://api-inference.huggingface.co";

const SDXL_MODEL: &str = "stabilityai/sdxl-base-1.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceRequest
{   pub inputs: String
}

/// Provider prompt for an illustration in the requested tone
pub fn build_prompt(request: &crate::GenerationRequest) -> String
{   format!("{} style illustration of {}", request.tone, request.prompt)
}

/// Image synthesis through the Hugging Face inference API
pub struct HuggingFaceClient
{   api_key: String
  , api_base: String
  , http_client: reqwest::Client
}

impl HuggingFaceClient
{   pub fn new(config: &crate::config::ProviderConfig)
      -> Result<Self, crate::error::Error>
    {   debug!("Creating HuggingFaceClient");
        Ok(HuggingFaceClient
        {   api_key: config.key_or_empty().to_string()
          , api_base: config.base_or(HUGGINGFACE_API_BASE).to_string()
          , http_client: config.http_client()?
        })
    }

    /// Raw image bytes as returned by the model
    pub async fn generate(
      &self
    , request: &crate::GenerationRequest
    ) -> Result<Vec<u8>, crate::error::Error>
    {   let body = InferenceRequest
        {   inputs: build_prompt(request)
        };

        trace!("Hugging Face request: {:?}", body);

        let response = self.http_client
          .post(format!("{}/models/{}", self.api_base, SDXL_MODEL))
          .header("Authorization", format!("Bearer {}", self.api_key))
          .header("Content-Type", "application/json")
          .json(&body)
          .send()
          .await
          .map_err(|e| {
            error!("Hugging Face HTTP error: {}", e);
            crate::error::Error::from_reqwest(e)
          })?;

        let status = response.status();
        trace!("Hugging Face response status: {}", status);

        if !status.is_success()
        {   return Err(super::api_error("Hugging Face", response).await);
        }

        let bytes = response.bytes().await.map_err(|e| {
          error!("Hugging Face body error: {}", e);
          crate::error::Error::from_reqwest(e)
        })?;

        debug!("Received {} image bytes", bytes.len());
        Ok(bytes.to_vec())
    }
}
