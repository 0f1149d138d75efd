//! HTTP surface: the three generation endpoints, the in-process
//! fan-out route and the browser page

use std::sync::Arc;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use log::{debug, error, info};
use crate::client::{user_message, Orchestrator};
use crate::endpoints::{Adapters, Channel};
use crate::error::Error;
use crate::request::{
  CombinedResult, EndpointReply, GenerateFailure, RawGenerationRequest,
};

const INDEX_HTML: &str = include_str!("../static/index.html");

#[derive(Clone)]
pub struct AppState
{   pub adapters: Arc<Adapters>
}

/// Build the application router
pub fn router(adapters: Arc<Adapters>) -> Router
{   Router::new()
      .route("/", get(index))
      .route(Channel::Text.path(), post(text))
      .route(Channel::Image.path(), post(image))
      .route(Channel::Audio.path(), post(audio))
      .route("/api/generate", post(generate))
      .with_state(AppState { adapters })
}

/// Bind and serve until the process is stopped
pub async fn serve(config: crate::config::AppConfig)
  -> Result<(), Error>
{   let adapters = Arc::new(Adapters::new(&config)?);
    let listener = tokio::net::TcpListener::bind(config.server.bind_addr)
      .await
      .map_err(|e| {
        error!("Cannot bind {}: {}", config.server.bind_addr, e);
        Error::HttpError(e.to_string())
      })?;

    info!("multigen listening on http://{}", config.server.bind_addr);

    axum::serve(listener, router(adapters))
      .await
      .map_err(|e| Error::HttpError(e.to_string()))
}

fn into_response(reply: EndpointReply) -> Response
{   let status = StatusCode::from_u16(reply.status)
      .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(reply.body)).into_response()
}

async fn index() -> Html<&'static str>
{   Html(INDEX_HTML)
}

async fn text(State(state): State<AppState>, body: Bytes) -> Response
{   debug!("POST {}", Channel::Text.path());
    into_response(state.adapters.handle(Channel::Text, &body).await)
}

async fn image(State(state): State<AppState>, body: Bytes) -> Response
{   debug!("POST {}", Channel::Image.path());
    into_response(state.adapters.handle(Channel::Image, &body).await)
}

async fn audio(State(state): State<AppState>, body: Bytes) -> Response
{   debug!("POST {}", Channel::Audio.path());
    into_response(state.adapters.handle(Channel::Audio, &body).await)
}

async fn generate(State(state): State<AppState>, body: Bytes) -> Response
{   debug!("POST /api/generate");

    let orchestrator = Orchestrator::local(state.adapters.clone());
    let outcome = match RawGenerationRequest::from_slice(&body)
    {   Ok(raw) => {
          orchestrator.generate(&raw.prompt_text(), &raw.tone_text()).await
        }
      , Err(e) => {
          error!("Unreadable generate request body: {}", e);
          Err(e)
        }
    };

    match outcome
    {   Ok(result) => (StatusCode::OK, Json(result)).into_response()
      , Err(e) => {
          let status = match e
          {   Error::MissingPromptOrTone => StatusCode::BAD_REQUEST
            , _ => StatusCode::INTERNAL_SERVER_ERROR
          };
          let failure = GenerateFailure
          {   error: user_message(&e).to_string()
            , result: CombinedResult::default()
          };
          (status, Json(failure)).into_response()
        }
    }
}
