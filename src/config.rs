//! Configuration for the three providers and the HTTP server

use std::net::SocketAddr;
use std::time::Duration;
use serde::{Deserialize, Serialize};
use log::{debug, warn};

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Provider configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig
{   /// Secret credential, sent as-is (absence is not rejected)
    pub api_key: Option<String>
  , /// API base URL (if custom)
    pub api_base: Option<String>
  , /// Request timeout in seconds, none when unset
    pub timeout_secs: Option<u64>
}

impl ProviderConfig
{   /// Base URL to use, falling back to the provider default
    pub fn base_or<'a>(&'a self, default: &'a str) -> &'a str
    {   self.api_base
          .as_deref()
          .map(|b| b.trim_end_matches('/'))
          .unwrap_or(default)
    }

    /// Key to send, empty when none was configured
    pub fn key_or_empty(&self) -> &str
    {   self.api_key.as_deref().unwrap_or("")
    }

    /// Build the HTTP client for this provider
    pub fn http_client(&self)
      -> Result<reqwest::Client, crate::error::Error>
    {   let mut builder = reqwest::Client::builder();
        if let Some(secs) = self.timeout_secs
        {   builder = builder.timeout(Duration::from_secs(secs));
        }
        builder.build().map_err(|e| {
          crate::error::Error::InvalidConfiguration(e.to_string())
        })
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig
{   /// Address the router listens on
    pub bind_addr: SocketAddr
}

impl Default for ServerConfig
{   fn default() -> Self
    {   ServerConfig
        {   bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000))
        }
    }
}

/// multigen configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig
{   /// Text provider (Cohere)
    pub text: ProviderConfig
  , /// Image provider (Hugging Face inference)
    pub image: ProviderConfig
  , /// Audio provider (ElevenLabs)
    pub audio: ProviderConfig
  , /// HTTP server
    pub server: ServerConfig
}

impl AppConfig
{   /// Read configuration from the process environment
    pub fn from_env() -> Result<Self, crate::error::Error>
    {   Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F)
      -> Result<Self, crate::error::Error>
    where F: Fn(&str) -> Option<String>
    {   let non_empty = |name: &str| {
          lookup(name).filter(|v| !v.trim().is_empty())
        };

        let timeout_secs = match non_empty(
          "MULTIGEN_PROVIDER_TIMEOUT_SECS"
        )
        {   Some(raw) => Some(raw.trim().parse::<u64>().map_err(|_| {
              crate::error::Error::InvalidConfiguration(format!(
                "MULTIGEN_PROVIDER_TIMEOUT_SECS is not a number: {}",
                raw
              ))
            })?)
          , None => None
        };

        let bind_raw = non_empty("MULTIGEN_BIND")
          .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_raw.trim().parse().map_err(|_| {
          crate::error::Error::InvalidConfiguration(format!(
            "MULTIGEN_BIND is not a socket address: {}",
            bind_raw
          ))
        })?;

        let provider = |key: &str, base: &str| ProviderConfig
        {   api_key: non_empty(key)
          , api_base: non_empty(base)
          , timeout_secs
        };

        let config = AppConfig
        {   text: provider("COHERE_API_KEY", "COHERE_API_BASE")
          , image: provider("HUGGINGFACE_API_KEY", "HUGGINGFACE_API_BASE")
          , audio: provider("ELEVENLABS_API_KEY", "ELEVENLABS_API_BASE")
          , server: ServerConfig { bind_addr }
        };

        debug!("Loaded configuration, bind: {}", config.server.bind_addr);
        config.warn_missing_keys();
        Ok(config)
    }

    fn warn_missing_keys(&self)
    {   for (name, provider) in [
          ("COHERE_API_KEY", &self.text)
        , ("HUGGINGFACE_API_KEY", &self.image)
        , ("ELEVENLABS_API_KEY", &self.audio)
        ]
        {   if provider.api_key.is_none()
            {   warn!("{} is not set; provider calls will be rejected", name);
            }
        }
    }
}
