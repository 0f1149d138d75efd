pub mod error;
pub mod config;
pub mod providers;
pub mod request;
pub mod data_uri;
pub mod endpoints;
pub mod client;
pub mod server;

/*

multigen: one product idea and a tone in, three media out.

A caption (Cohere), an illustration (Hugging Face SDXL) and a spoken
description (ElevenLabs) are requested concurrently and shown together.
Each provider sits behind its own endpoint; a failure in one never keeps
the other two from arriving.

multigen/
├── Cargo.toml
├── static/index.html   # Browser page
├── src/
│   ├── lib.rs          # Re-exports
│   ├── main.rs         # `serve` / `generate` binary
│   ├── error.rs        # Error type
│   ├── config.rs       # Provider keys, base urls, bind address
│   ├── request.rs      # Request/reply shapes, validation
│   ├── data_uri.rs     # base64 data URIs
│   ├── providers/      # One client per external service
│   ├── endpoints.rs    # Adapter boundaries and failure policies
│   ├── client.rs       # Fan-out orchestrator
│   └── server.rs       # axum router
└── tests/

*/

pub use client::Orchestrator;
pub use config::AppConfig;
pub use endpoints::{Adapters, Channel};
pub use error::Error;
pub use request::{CombinedResult, GenerationRequest};
