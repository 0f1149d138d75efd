//! Adapter boundaries: validate, call one provider, normalize the reply
//!
//! Each boundary guards itself and owns its failure policy. Text and audio
//! fail hard; image always answers with a displayable url.

use log::{debug, error, info};
use crate::data_uri::{encode_data_uri, AUDIO_MIME, IMAGE_MIME};
use crate::error::Error;
use crate::providers::{CohereClient, ElevenLabsClient, HuggingFaceClient};
use crate::request::{
  EndpointReply, ErrorReply, GenerationRequest, ImageFallbackReply,
  MediaReply, RawGenerationRequest, TextReply, MISSING_INPUT_MESSAGE,
};

pub const TEXT_FAILED: &str = "Text generation failed.";
pub const AUDIO_FAILED: &str = "Audio generation failed.";

pub const IMAGE_FAILED: &str = "Image generation failed.";
pub const IMAGE_UNAVAILABLE_URL: &str
  = "https://via.placeholder.com/512x512?text=Image+Unavailable";
pub const IMAGE_UNAVAILABLE_MESSAGE: &str
  = "Sorry, we couldn't generate the image. Please try again later.";

pub const IMAGE_UNEXPECTED: &str = "Unexpected server error.";
pub const IMAGE_SERVER_ERROR_URL: &str
  = "https://via.placeholder.com/512x512?text=Server+Error";
pub const IMAGE_SERVER_ERROR_MESSAGE: &str
  = "Something went wrong. Try again in a moment.";

/// One of the three generation endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel
{   Text
  , Image
  , Audio
}

impl Channel
{   /// Route path on the server
    pub fn path(self) -> &'static str
    {   match self
        {   Channel::Text => "/api/text"
          , Channel::Image => "/api/image"
          , Channel::Audio => "/api/audio"
        }
    }

    /// Body field carrying the payload on success
    pub fn payload_field(self) -> &'static str
    {   match self
        {   Channel::Text => "text"
          , Channel::Image | Channel::Audio => "url"
        }
    }
}

/// The three provider clients, built once at startup
pub struct Adapters
{   pub text: CohereClient
  , pub image: HuggingFaceClient
  , pub audio: ElevenLabsClient
}

impl Adapters
{   pub fn new(config: &crate::config::AppConfig)
      -> Result<Self, Error>
    {   debug!("Building provider adapters");
        Ok(Adapters
        {   text: CohereClient::new(&config.text)?
          , image: HuggingFaceClient::new(&config.image)?
          , audio: ElevenLabsClient::new(&config.audio)?
        })
    }

    /// Full boundary for one channel: parse, validate, generate
    pub async fn handle(&self, channel: Channel, body: &[u8])
      -> EndpointReply
    {   let request = match RawGenerationRequest::from_slice(body)
        {   Ok(raw) => raw.validate()
          , Err(e) => {
              error!("Unreadable {} request body: {}", channel.path(), e);
              return self.unexpected(channel);
            }
        };

        match request
        {   Ok(request) => self.dispatch(channel, &request).await
          , Err(_) => EndpointReply::new(
              400, &ErrorReply::new(MISSING_INPUT_MESSAGE)
            )
        }
    }

    /// Generate for an already validated request
    pub async fn dispatch(
      &self
    , channel: Channel
    , request: &GenerationRequest
    ) -> EndpointReply
    {   match channel
        {   Channel::Text => self.text_reply(request).await
          , Channel::Image => self.image_reply(request).await
          , Channel::Audio => self.audio_reply(request).await
        }
    }

    async fn text_reply(&self, request: &GenerationRequest)
      -> EndpointReply
    {   match self.text.generate(request).await
        {   Ok(text) => {
              info!("Text generated ({} chars)", text.len());
              EndpointReply::new(200, &TextReply { text })
            }
          , Err(e) => {
              error!("Cohere API Error: {}", e);
              EndpointReply::new(500, &ErrorReply::new(TEXT_FAILED))
            }
        }
    }

    async fn image_reply(&self, request: &GenerationRequest)
      -> EndpointReply
    {   match self.image.generate(request).await
        {   Ok(bytes) => {
              info!("Image generated ({} bytes)", bytes.len());
              EndpointReply::new(200, &MediaReply
              {   url: encode_data_uri(IMAGE_MIME, &bytes)
              })
            }
          , Err(Error::ApiError { .. }) => {
              EndpointReply::new(500, &ImageFallbackReply
              {   error: IMAGE_FAILED.to_string()
                , fallback: true
                , url: IMAGE_UNAVAILABLE_URL.to_string()
                , message: IMAGE_UNAVAILABLE_MESSAGE.to_string()
              })
            }
          , Err(e) => {
              error!("Unexpected image error: {}", e);
              self.unexpected(Channel::Image)
            }
        }
    }

    async fn audio_reply(&self, request: &GenerationRequest)
      -> EndpointReply
    {   match self.audio.generate(request).await
        {   Ok(bytes) => {
              info!("Audio generated ({} bytes)", bytes.len());
              EndpointReply::new(200, &MediaReply
              {   url: encode_data_uri(AUDIO_MIME, &bytes)
              })
            }
          , Err(e) => {
              error!("ElevenLabs Error: {}", e);
              EndpointReply::new(500, &ErrorReply::new(AUDIO_FAILED))
            }
        }
    }

    /// Reply for failures outside the provider call itself
    fn unexpected(&self, channel: Channel) -> EndpointReply
    {   match channel
        {   Channel::Text => {
              EndpointReply::new(500, &ErrorReply::new(TEXT_FAILED))
            }
          , Channel::Image => {
              EndpointReply::new(500, &ImageFallbackReply
              {   error: IMAGE_UNEXPECTED.to_string()
                , fallback: true
                , url: IMAGE_SERVER_ERROR_URL.to_string()
                , message: IMAGE_SERVER_ERROR_MESSAGE.to_string()
              })
            }
          , Channel::Audio => {
              EndpointReply::new(500, &ErrorReply::new(AUDIO_FAILED))
            }
        }
    }
}
