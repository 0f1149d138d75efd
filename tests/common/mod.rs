#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use multigen::config::{AppConfig, ProviderConfig};
use multigen::Adapters;

/// One request received by a mock provider
#[derive(Debug, Clone)]
pub struct Recorded
{   pub path: String
  , pub headers: HashMap<String, String>
  , pub body: serde_json::Value
}

#[derive(Clone)]
struct MockState
{   status: StatusCode
  , content_type: &'static str
  , body: Bytes
  , delay: Duration
  , calls: Arc<Mutex<Vec<Recorded>>>
}

/// Stand-in for an external provider, answering every path the same way
pub struct MockProvider
{   pub base: String
  , calls: Arc<Mutex<Vec<Recorded>>>
}

impl MockProvider
{   pub fn hits(&self) -> usize
    {   self.calls.lock().unwrap().len()
    }

    pub fn last(&self) -> Recorded
    {   self.calls.lock().unwrap()
          .last()
          .cloned()
          .expect("mock provider was never called")
    }
}

async fn record(
  State(state): State<MockState>
, uri: Uri
, headers: HeaderMap
, body: Bytes
) -> Response
{   let headers = headers.iter()
      .map(|(k, v)| {
        (k.as_str().to_string(), v.to_str().unwrap_or("").to_string())
      })
      .collect();
    state.calls.lock().unwrap().push(Recorded
    {   path: uri.path().to_string()
      , headers
      , body: serde_json::from_slice(&body)
          .unwrap_or(serde_json::Value::Null)
    });

    if !state.delay.is_zero()
    {   tokio::time::sleep(state.delay).await;
    }

    (
      state.status,
      [("content-type", state.content_type)],
      state.body.clone()
    ).into_response()
}

pub async fn spawn_mock_delayed(
  status: u16
, content_type: &'static str
, body: impl Into<Bytes>
, delay: Duration
) -> MockProvider
{   let calls = Arc::new(Mutex::new(Vec::new()));
    let state = MockState
    {   status: StatusCode::from_u16(status).unwrap()
      , content_type
      , body: body.into()
      , delay
      , calls: calls.clone()
    };
    let app = Router::new().fallback(record).with_state(state);
    let addr = serve_router(app).await;
    MockProvider
    {   base: format!("http://{}", addr)
      , calls
    }
}

pub async fn spawn_mock(
  status: u16
, content_type: &'static str
, body: impl Into<Bytes>
) -> MockProvider
{   spawn_mock_delayed(status, content_type, body, Duration::ZERO).await
}

pub async fn cohere_ok(text: &str) -> MockProvider
{   let body = serde_json::json!({ "generations": [{ "text": text }] });
    spawn_mock(200, "application/json", body.to_string()).await
}

pub async fn image_ok(bytes: &'static [u8]) -> MockProvider
{   spawn_mock(200, "image/png", bytes).await
}

pub async fn audio_ok(bytes: &'static [u8]) -> MockProvider
{   spawn_mock(200, "audio/mpeg", bytes).await
}

pub async fn provider_error(status: u16) -> MockProvider
{   spawn_mock(
      status,
      "application/json",
      r#"{"error":"invalid credentials"}"#
    ).await
}

/// Base url of a port nothing listens on
pub async fn unreachable_base() -> String
{   let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
      .await
      .unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

async fn serve_router(app: Router) -> SocketAddr
{   let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
      .await
      .unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
      axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn provider(key: &str, base: &str) -> ProviderConfig
{   ProviderConfig
    {   api_key: Some(key.to_string())
      , api_base: Some(base.to_string())
      , timeout_secs: None
    }
}

pub fn config_for(text: &str, image: &str, audio: &str) -> AppConfig
{   AppConfig
    {   text: provider("cohere-key", text)
      , image: provider("hf-key", image)
      , audio: provider("eleven-key", audio)
      , ..AppConfig::default()
    }
}

pub fn adapters_for(text: &str, image: &str, audio: &str) -> Arc<Adapters>
{   Arc::new(Adapters::new(&config_for(text, image, audio)).unwrap())
}

/// Serve the multigen router and return its base url
pub async fn spawn_app(text: &str, image: &str, audio: &str) -> String
{   spawn_app_with(config_for(text, image, audio)).await
}

/// Serve the multigen router over a prepared configuration
pub async fn spawn_app_with(config: AppConfig) -> String
{   let adapters = Arc::new(Adapters::new(&config).unwrap());
    let app = multigen::server::router(adapters);
    format!("http://{}", serve_router(app).await)
}

/// POST a raw body, returning status, content type and JSON body
pub async fn post_raw(url: &str, body: &str)
  -> (u16, String, serde_json::Value)
{   let response = reqwest::Client::new()
      .post(url)
      .header("Content-Type", "application/json")
      .body(body.to_string())
      .send()
      .await
      .unwrap();
    let status = response.status().as_u16();
    let content_type = response.headers()
      .get("content-type")
      .and_then(|v| v.to_str().ok())
      .unwrap_or("")
      .to_string();
    let json = response.json().await.unwrap();
    (status, content_type, json)
}
