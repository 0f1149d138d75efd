use std::collections::HashMap;
use multigen::config::AppConfig;
use multigen::data_uri::{
  decode_data_uri, encode_data_uri, media_status, save_media,
};
use multigen::providers::{cohere, elevenlabs, huggingface};
use multigen::request::RawGenerationRequest;
use multigen::{CombinedResult, Error, GenerationRequest, Orchestrator};

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String>
{   let map: HashMap<String, String> = pairs.iter()
      .map(|(k, v)| (k.to_string(), v.to_string()))
      .collect();
    move |name: &str| map.get(name).cloned()
}

#[test]
fn test_provider_prompts_for_eco_bottle()
{   let request = GenerationRequest::new("eco bottle", "Bold");

    assert_eq!(
      cohere::build_prompt(&request),
      "Write a Bold marketing headline and caption for: eco bottle"
    );
    assert_eq!(
      huggingface::build_prompt(&request),
      "Bold style illustration of eco bottle"
    );
    assert_eq!(
      elevenlabs::build_speech_text(&request),
      "Here is a bold description of eco bottle."
    );
}

#[test]
fn test_first_text_falls_back_to_no_response()
{   let parse = |json: &str| {
      serde_json::from_str::<cohere::CohereGenerateResponse>(json)
        .unwrap()
        .first_text()
    };

    assert_eq!(parse(r#"{"generations":[{"text":" hi \n"},{"text":"b"}]}"#), "hi");
    assert_eq!(parse(r#"{"generations":[]}"#), cohere::NO_RESPONSE);
    assert_eq!(parse(r#"{"generations":[{"text":"   "}]}"#), cohere::NO_RESPONSE);
    assert_eq!(parse(r#"{"generations":[{}]}"#), cohere::NO_RESPONSE);
    assert_eq!(parse(r#"{"message":"bad"}"#), cohere::NO_RESPONSE);
}

#[test]
fn test_validation_requires_both_fields()
{   let raw = |prompt: Option<&str>, tone: Option<&str>| RawGenerationRequest
    {   prompt: prompt.map(serde_json::Value::from)
      , tone: tone.map(serde_json::Value::from)
    };

    assert_eq!(
      raw(Some("eco bottle"), Some("Bold")).validate().unwrap(),
      GenerationRequest::new("eco bottle", "Bold")
    );
    for (prompt, tone) in [
      (None, Some("Bold"))
    , (Some("eco bottle"), None)
    , (Some(""), Some("Bold"))
    , (Some("eco bottle"), Some(" \t"))
    , (None, None)
    ]
    {   assert_eq!(
          raw(prompt, tone).validate().unwrap_err(),
          Error::MissingPromptOrTone
        );
    }
}

#[test]
fn test_validation_treats_falsy_json_as_missing()
{   let bodies = [
      r#"{"prompt":false,"tone":"Bold"}"#
    , r#"{"prompt":0,"tone":"Bold"}"#
    , r#"{"prompt":0.0,"tone":"Bold"}"#
    , r#"{"prompt":null,"tone":"Bold"}"#
    , r#"{"prompt":"eco bottle","tone":false}"#
    , r#"{"prompt":["eco"],"tone":"Bold"}"#
    , r#"{"prompt":{"idea":"eco"},"tone":"Bold"}"#
    ];
    for body in bodies
    {   let raw = RawGenerationRequest::from_slice(body.as_bytes()).unwrap();
        assert!(
          raw.prompt_text().is_empty() || raw.tone_text().is_empty(),
          "{}", body
        );
        assert_eq!(
          raw.validate().unwrap_err(),
          Error::MissingPromptOrTone,
          "{}", body
        );
    }
}

#[test]
fn test_validation_renders_truthy_scalars()
{   let raw = RawGenerationRequest::from_slice(
      br#"{"prompt":42,"tone":true}"#
    ).unwrap();

    assert_eq!(raw.prompt_text(), "42");
    assert_eq!(
      raw.validate().unwrap(),
      GenerationRequest::new("42", "true")
    );
}

#[test]
fn test_data_uri_reproduces_bytes()
{   let bytes: Vec<u8> = (0..=255).collect();
    let uri = encode_data_uri("audio/mpeg", &bytes);

    assert!(uri.starts_with("data:audio/mpeg;base64,"));
    let (mime, decoded) = decode_data_uri(&uri).unwrap();
    assert_eq!(mime, "audio/mpeg");
    assert_eq!(decoded, bytes);
}

#[test]
fn test_data_uri_rejects_other_urls()
{   let bad = [
      "https://via.placeholder.com/512x512?text=Server+Error"
    , "data:image/png,plain"
    , "data:image/png;base64,***"
    ];
    for uri in bad
    {   assert!(matches!(decode_data_uri(uri), Err(Error::ParseError(_))), "{}", uri);
    }
}

#[test]
fn test_config_reads_keys_and_overrides()
{   let config = AppConfig::from_lookup(env(&[
      ("COHERE_API_KEY", "co")
    , ("HUGGINGFACE_API_KEY", "hf")
    , ("ELEVENLABS_API_BASE", "http://localhost:9000/")
    , ("MULTIGEN_PROVIDER_TIMEOUT_SECS", "30")
    , ("MULTIGEN_BIND", "0.0.0.0:8080")
    ])).unwrap();

    assert_eq!(config.text.api_key.as_deref(), Some("co"));
    assert_eq!(config.image.api_key.as_deref(), Some("hf"));
    assert_eq!(config.audio.api_key, None);
    assert_eq!(config.audio.key_or_empty(), "");
    assert_eq!(
      config.audio.base_or("https://api.elevenlabs.io"),
      "http://localhost:9000"
    );
    assert_eq!(
      config.text.base_or("https://api.cohere.ai"),
      "https://api.cohere.ai"
    );
    assert_eq!(config.image.timeout_secs, Some(30));
    assert_eq!(config.server.bind_addr.to_string(), "0.0.0.0:8080");
}

#[test]
fn test_config_defaults_without_timeout()
{   let config = AppConfig::from_lookup(env(&[])).unwrap();

    assert_eq!(config.text.timeout_secs, None);
    assert_eq!(config.server.bind_addr.to_string(), "127.0.0.1:3000");
}

#[test]
fn test_config_rejects_bad_values()
{   let timeout = AppConfig::from_lookup(env(&[
      ("MULTIGEN_PROVIDER_TIMEOUT_SECS", "soon")
    ]));
    assert!(matches!(timeout, Err(Error::InvalidConfiguration(_))));

    let bind = AppConfig::from_lookup(env(&[("MULTIGEN_BIND", "nowhere")]));
    assert!(matches!(bind, Err(Error::InvalidConfiguration(_))));
}

#[test]
fn test_local_orchestrator_validates_before_dispatch()
{   let adapters = std::sync::Arc::new(
      multigen::Adapters::new(&AppConfig::default()).unwrap()
    );
    let orchestrator = Orchestrator::local(adapters);

    let outcome = tokio_test::block_on(orchestrator.generate("", "Bold"));

    assert_eq!(outcome.unwrap_err(), Error::MissingPromptOrTone);
}

#[test]
fn test_save_media_writes_inline_files_only()
{   let dir = tempfile::tempdir().unwrap();
    let image: Vec<u8> = vec![0x89, b'P', b'N', b'G', 0, 1, 2];
    let audio: Vec<u8> = vec![0xFF, 0xFB, 0x90, 0x64];
    let result = CombinedResult
    {   text: "caption".to_string()
      , image: encode_data_uri("image/png", &image)
      , audio: encode_data_uri("audio/mpeg", &audio)
    };

    let written = save_media(&result, dir.path()).unwrap();

    assert_eq!(written.len(), 2);
    assert_eq!(std::fs::read(dir.path().join("image.png")).unwrap(), image);
    assert_eq!(std::fs::read(dir.path().join("audio.mp3")).unwrap(), audio);
}

#[test]
fn test_save_media_skips_placeholder_and_empty()
{   let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("nested");
    let result = CombinedResult
    {   text: String::new()
      , image: "https://via.placeholder.com/512x512?text=Server+Error".to_string()
      , audio: String::new()
    };

    let written = save_media(&result, &out).unwrap();

    assert!(written.is_empty());
    assert!(out.is_dir());
    assert!(!out.join("image.png").exists());
    assert!(!out.join("audio.mp3").exists());
}

#[test]
fn test_save_media_rejects_broken_data_uri()
{   let dir = tempfile::tempdir().unwrap();
    let result = CombinedResult
    {   image: "data:image/png;base64,***".to_string()
      , ..CombinedResult::default()
    };

    assert!(matches!(
      save_media(&result, dir.path()),
      Err(Error::ParseError(_))
    ));
}

#[test]
fn test_media_status_labels()
{   assert_eq!(media_status(&encode_data_uri("image/png", b"x")), "generated");
    assert_eq!(media_status(""), "unavailable");
    assert_eq!(
      media_status("https://via.placeholder.com/512x512?text=Image+Unavailable"),
      "https://via.placeholder.com/512x512?text=Image+Unavailable"
    );
}
