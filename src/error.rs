use std::fmt;

/// Custom error type for multigen operations
/// Implements Clone so branch outcomes can be copied into replies
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error
{   /// Request body lacked a usable prompt or tone
    MissingPromptOrTone
  , /// HTTP transport error (connect, send, read body)
    HttpError(String)
  , /// Provider answered with a non-success status
    ApiError
    {   status: u16
      , body: String
    }
  , /// Failed to parse a JSON body or a data URI
    ParseError(String)
  , /// Invalid configuration value
    InvalidConfiguration(String)
  , /// Provider call exceeded the configured timeout
    Timeout
  , /// Generic error
    Other(String)
}

impl Error
{   /// Map a reqwest failure, keeping timeouts distinct
    pub fn from_reqwest(e: reqwest::Error) -> Self
    {   if e.is_timeout()
        {   Error::Timeout
        } else
        {   Error::HttpError(e.to_string())
        }
    }
}

impl fmt::Display for Error
{   fn fmt(&self, f: &mut fmt::Formatter<'_>)
      -> fmt::Result
    {   match self
        {   Error::MissingPromptOrTone => {
              write!(f, "Missing prompt or tone")
            }
          , Error::HttpError(msg) => {
              write!(f, "HTTP error: {}", msg)
            }
          , Error::ApiError { status, body } => {
              write!(f, "API error ({}): {}", status, body)
            }
          , Error::ParseError(msg) => {
              write!(f, "Parse error: {}", msg)
            }
          , Error::InvalidConfiguration(msg) => {
              write!(f, "Invalid configuration: {}", msg)
            }
          , Error::Timeout => {
              write!(f, "Request timed out")
            }
          , Error::Other(msg) => {
              write!(f, "Error: {}", msg)
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<serde_json::Error> for Error
{   fn from(e: serde_json::Error) -> Self
    {   Error::ParseError(e.to_string())
    }
}
