//! Inline `data:` URIs for generated media

use std::path::{Path, PathBuf};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use log::info;
use crate::request::CombinedResult;

pub const IMAGE_MIME: &str = "image/png";
pub const AUDIO_MIME: &str = "audio/mpeg";

/// Encode bytes as `data:<mime>;base64,<payload>`
pub fn encode_data_uri(mime: &str, bytes: &[u8]) -> String
{   format!("data:{};base64,{}", mime, BASE64.encode(bytes))
}

/// Split a base64 data URI back into its mime type and bytes
pub fn decode_data_uri(uri: &str)
  -> Result<(String, Vec<u8>), crate::error::Error>
{   let rest = uri.strip_prefix("data:").ok_or_else(|| {
      crate::error::Error::ParseError("not a data URI".to_string())
    })?;
    let (mime, payload) = rest.split_once(";base64,").ok_or_else(|| {
      crate::error::Error::ParseError(
        "data URI is not base64 encoded".to_string()
      )
    })?;
    let bytes = BASE64.decode(payload).map_err(|e| {
      crate::error::Error::ParseError(e.to_string())
    })?;
    Ok((mime.to_string(), bytes))
}

/// One-line status of a media field for terminal output
pub fn media_status(value: &str) -> String
{   if value.starts_with("data:")
    {   "generated".to_string()
    } else if value.is_empty()
    {   "unavailable".to_string()
    } else
    {   value.to_string()
    }
}

/// Decode the inline image and audio into `image.png` and `audio.mp3`
///
/// Placeholder urls and empty fields are skipped. Returns the paths written.
pub fn save_media(result: &CombinedResult, dir: &Path)
  -> Result<Vec<PathBuf>, crate::error::Error>
{   std::fs::create_dir_all(dir)
      .map_err(|e| crate::error::Error::Other(e.to_string()))?;

    let mut written = Vec::new();
    for (name, value) in [
      ("image.png", &result.image)
    , ("audio.mp3", &result.audio)
    ]
    {   if !value.starts_with("data:")
        {   continue;
        }
        let (_, bytes) = decode_data_uri(value)?;
        let path = dir.join(name);
        std::fs::write(&path, bytes)
          .map_err(|e| crate::error::Error::Other(e.to_string()))?;
        info!("Wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}
