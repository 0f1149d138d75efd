use serde::{Deserialize, Serialize};
use log::{debug, trace, error};

const ELEVENLABS_API_BASE: &str
  = "https://api.elevenlabs.io";

/// "Rachel" stock voice
const VOICE_ID: &str = "21m00Tcm4TlvDq8ikWAM";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceSettings
{   pub stability: f32
  , pub similarity_boost: f32
}

impl Default for VoiceSettings
{   fn default() -> Self
    {   VoiceSettings
        {   stability: 0.5
          , similarity_boost: 0.5
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechRequest
{   pub text: String
  , pub voice_settings: VoiceSettings
}

/// Sentence to speak, derived from the request rather than quoting it
pub fn build_speech_text(request: &crate::GenerationRequest) -> String
{   format!(
      "Here is a {} description of {}.",
      request.tone.to_lowercase(), request.prompt
    )
}

/// Speech synthesis through ElevenLabs text-to-speech
pub struct ElevenLabsClient
{   api_key: String
  , api_base: String
  , http_client: reqwest::Client
}

impl ElevenLabsClient
{   pub fn new(config: &crate::config::ProviderConfig)
      -> Result<Self, crate::error::Error>
    {   debug!("Creating ElevenLabsClient");
        Ok(ElevenLabsClient
        {   api_key: config.key_or_empty().to_string()
          , api_base: config.base_or(ELEVENLABS_API_BASE).to_string()
          , http_client: config.http_client()?
        })
    }

    /// Raw mpeg audio bytes
    pub async fn generate(
      &self
    , request: &crate::GenerationRequest
    ) -> Result<Vec<u8>, crate::error::Error>
    {   let body = SpeechRequest
        {   text: build_speech_text(request)
          , voice_settings: VoiceSettings::default()
        };

        trace!("ElevenLabs request: {:?}", body);

        let response = self.http_client
          .post(format!(
            "{}/v1/text-to-speech/{}",
            self.api_base, VOICE_ID
          ))
          .header("xi-api-key", self.api_key.as_str())
          .header("Content-Type", "application/json")
          .header("Accept", "audio/mpeg")
          .json(&body)
          .send()
          .await
          .map_err(|e| {
            error!("ElevenLabs HTTP error: {}", e);
            crate::error::Error::from_reqwest(e)
          })?;

        let status = response.status();
        trace!("ElevenLabs response status: {}", status);

        if !status.is_success()
        {   return Err(super::api_error("ElevenLabs", response).await);
        }

        let bytes = response.bytes().await.map_err(|e| {
          error!("ElevenLabs body error: {}", e);
          crate::error::Error::from_reqwest(e)
        })?;

        debug!("Received {} audio bytes", bytes.len());
        Ok(bytes.to_vec())
    }
}
