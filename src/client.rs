use std::sync::Arc;
use log::{debug, trace, error, warn};
use crate::endpoints::{Adapters, Channel};
use crate::error::Error;
use crate::request::{
  CombinedResult, EndpointReply, GenerationRequest, RawGenerationRequest,
};

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:3000";

/// Shown when prompt or tone is missing before dispatch
pub const ENTER_PROMPT_MESSAGE: &str
  = "Please enter a prompt and select a tone.";
/// Shown when the orchestration as a whole failed
pub const GENERATION_FAILED_MESSAGE: &str
  = "Something went wrong. Please try again.";

/// User-facing message for a top-level orchestration error
pub fn user_message(error: &Error) -> &'static str
{   match error
    {   Error::MissingPromptOrTone => ENTER_PROMPT_MESSAGE
      , _ => GENERATION_FAILED_MESSAGE
    }
}

/// How the orchestrator reaches the three adapters
pub enum Transport
{   /// POST to the endpoints of a running server
    Http
    {   http_client: reqwest::Client
      , base_url: String
    }
  , /// Call the adapter boundaries in this process
    Local(Arc<Adapters>)
}

/// Fan-out orchestrator: three calls, join all, one combined result
pub struct Orchestrator
{   transport: Transport
}

impl Orchestrator
{   /// Orchestrate against a server; no client-side timeout
    pub fn over_http(base_url: impl Into<String>) -> Self
    {   let base_url: String = base_url.into();
        debug!("Creating HTTP orchestrator for {}", base_url);
        Orchestrator
        {   transport: Transport::Http
            {   http_client: reqwest::Client::new()
              , base_url: base_url.trim_end_matches('/').to_string()
            }
        }
    }

    /// Orchestrate over in-process adapters
    pub fn local(adapters: Arc<Adapters>) -> Self
    {   debug!("Creating local orchestrator");
        Orchestrator
        {   transport: Transport::Local(adapters)
        }
    }

    /// Run one generation cycle
    ///
    /// Every branch settles before this returns. A failed branch only
    /// empties its own field. The call fails as a whole when prompt or
    /// tone is missing (nothing is dispatched) or when no branch got
    /// any reply at all.
    pub async fn generate(
      &self
    , prompt: &str
    , tone: &str
    ) -> Result<CombinedResult, Error>
    {   let request = RawGenerationRequest::new(prompt, tone).validate()?;

        debug!("Fanning out generation for tone {}", request.tone);

        let (text, image, audio) = tokio::join!(
          self.call(Channel::Text, &request),
          self.call(Channel::Image, &request),
          self.call(Channel::Audio, &request)
        );

        if text.is_err() && image.is_err() && audio.is_err()
        {   error!("Every generation branch failed to get a reply");
            return Err(Error::Other(
              GENERATION_FAILED_MESSAGE.to_string()
            ));
        }

        Ok(aggregate(text, image, audio))
    }

    async fn call(
      &self
    , channel: Channel
    , request: &GenerationRequest
    ) -> Result<EndpointReply, Error>
    {   match &self.transport
        {   Transport::Local(adapters) => {
              Ok(adapters.dispatch(channel, request).await)
            }
          , Transport::Http { http_client, base_url } => {
              let response = http_client
                .post(format!("{}{}", base_url, channel.path()))
                .header("Content-Type", "application/json")
                .json(request)
                .send()
                .await
                .map_err(|e| {
                  error!("{} unreachable: {}", channel.path(), e);
                  Error::from_reqwest(e)
                })?;

              let status = response.status().as_u16();
              trace!("{} answered {}", channel.path(), status);

              let body: serde_json::Value
                = response.json().await.map_err(|e| {
                  error!("{} sent unreadable body: {}", channel.path(), e);
                  Error::ParseError(e.to_string())
                })?;

              Ok(EndpointReply { status, body })
            }
        }
    }
}

/// Map each branch into its own field; failures leave it empty
///
/// The field is taken whatever the status, so the image fallback
/// placeholder still reaches the display.
pub fn aggregate(
  text: Result<EndpointReply, Error>
, image: Result<EndpointReply, Error>
, audio: Result<EndpointReply, Error>
) -> CombinedResult
{   let field = |channel: Channel, reply: Result<EndpointReply, Error>| {
      match reply
      {   Ok(reply) => {
            if !reply.is_success()
            {   warn!("{} returned {}", channel.path(), reply.status);
            }
            reply.field(channel.payload_field())
          }
        , Err(e) => {
            warn!("{} failed: {}", channel.path(), e);
            String::new()
          }
      }
    };

    CombinedResult
    {   text: field(Channel::Text, text)
      , image: field(Channel::Image, image)
      , audio: field(Channel::Audio, audio)
    }
}
