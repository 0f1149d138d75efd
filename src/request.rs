//! Request and response shapes shared by the endpoints and the orchestrator

use serde::{Deserialize, Serialize};
use log::debug;

pub const MISSING_INPUT_MESSAGE: &str = "Missing prompt or tone";

/// Request body as it arrives on the wire, before validation
///
/// Fields stay loosely typed so `false`, `0` or `null` count as missing
/// instead of failing the parse.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawGenerationRequest
{   #[serde(default)]
    pub prompt: Option<serde_json::Value>
  , #[serde(default)]
    pub tone: Option<serde_json::Value>
}

/// Text of a scalar field; falsy, blank and structured values give None
fn field_text(value: &Option<serde_json::Value>) -> Option<String>
{   use serde_json::Value;
    match value
    {   Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone())
      , Some(Value::Bool(true)) => Some("true".to_string())
      , Some(Value::Number(n))
          if n.as_f64().map_or(true, |f| f != 0.0 && !f.is_nan()) => {
            Some(n.to_string())
          }
      , _ => None
    }
}

impl RawGenerationRequest
{   pub fn new(prompt: &str, tone: &str) -> Self
    {   RawGenerationRequest
        {   prompt: Some(serde_json::Value::from(prompt))
          , tone: Some(serde_json::Value::from(tone))
        }
    }

    /// Parse a JSON request body
    pub fn from_slice(body: &[u8])
      -> Result<Self, crate::error::Error>
    {   Ok(serde_json::from_slice(body)?)
    }

    /// Prompt as text, empty when missing
    pub fn prompt_text(&self) -> String
    {   field_text(&self.prompt).unwrap_or_default()
    }

    /// Tone as text, empty when missing
    pub fn tone_text(&self) -> String
    {   field_text(&self.tone).unwrap_or_default()
    }

    /// Both fields present and non-blank, or `MissingPromptOrTone`
    pub fn validate(self)
      -> Result<GenerationRequest, crate::error::Error>
    {   match (field_text(&self.prompt), field_text(&self.tone))
        {   (Some(prompt), Some(tone)) => {
              Ok(GenerationRequest { prompt, tone })
            }
          , _ => {
              debug!("Rejecting request without prompt or tone");
              Err(crate::error::Error::MissingPromptOrTone)
            }
        }
    }
}

/// Validated generation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest
{   /// Product idea
    pub prompt: String
  , /// Tone, e.g. "Playful", "Serious", "Bold"
    pub tone: String
}

impl GenerationRequest
{   pub fn new(prompt: impl Into<String>, tone: impl Into<String>) -> Self
    {   GenerationRequest
        {   prompt: prompt.into()
          , tone: tone.into()
        }
    }
}

/// Successful text endpoint body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextReply
{   pub text: String
}

/// Successful image or audio endpoint body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaReply
{   pub url: String
}

/// Plain error body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReply
{   pub error: String
}

impl ErrorReply
{   pub fn new(error: &str) -> Self
    {   ErrorReply { error: error.to_string() }
    }
}

/// Image failure body: still carries a displayable url
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageFallbackReply
{   pub error: String
  , pub fallback: bool
  , pub url: String
  , pub message: String
}

/// Status and JSON body produced by one endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointReply
{   pub status: u16
  , pub body: serde_json::Value
}

impl EndpointReply
{   pub fn new<T: Serialize>(status: u16, body: &T) -> Self
    {   EndpointReply
        {   status
          , body: serde_json::to_value(body)
              .unwrap_or(serde_json::Value::Null)
        }
    }

    pub fn is_success(&self) -> bool
    {   (200..300).contains(&self.status)
    }

    /// String field of the body, empty when absent
    pub fn field(&self, name: &str) -> String
    {   self.body
          .get(name)
          .and_then(|v| v.as_str())
          .unwrap_or("")
          .to_string()
    }
}

/// The three outputs shown together; empty string means absent
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinedResult
{   pub text: String
  , pub image: String
  , pub audio: String
}

impl CombinedResult
{   pub fn is_empty(&self) -> bool
    {   self.text.is_empty()
          && self.image.is_empty()
          && self.audio.is_empty()
    }
}

/// `/api/generate` failure body: error plus a fully empty result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateFailure
{   pub error: String
  , #[serde(flatten)]
    pub result: CombinedResult
}
