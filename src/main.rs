use std::path::{Path, PathBuf};
use clap::{Parser, Subcommand};
use log::error;
use multigen::client::{user_message, DEFAULT_SERVER_URL};
use multigen::data_uri::{media_status, save_media};
use multigen::{AppConfig, CombinedResult, Error, Orchestrator};

#[derive(Debug, Parser)]
#[command(name = "multigen", version, about = "Caption, image and audio from one idea")]
struct Cli
{   #[command(subcommand)]
    command: Command
}

#[derive(Debug, Subcommand)]
enum Command
{   /// Run the HTTP server
    Serve
    {   /// Listen address, overrides MULTIGEN_BIND
        #[arg(long)]
        bind: Option<String>
    }
  , /// Generate against a running server
    Generate
    {   #[arg(long)]
        prompt: String
      , #[arg(long, default_value = "Playful")]
        tone: String
      , #[arg(long, default_value = DEFAULT_SERVER_URL)]
        server: String
      , /// Directory to write image.png and audio.mp3 into
        #[arg(long)]
        out: Option<PathBuf>
    }
}

#[tokio::main]
async fn main()
{   let _ = dotenvy::dotenv();
    env_logger::Builder::from_env(
      env_logger::Env::default().default_filter_or("info")
    ).init();

    let cli = Cli::parse();
    let outcome = match cli.command
    {   Command::Serve { bind } => serve(bind).await
      , Command::Generate { prompt, tone, server, out } => {
          generate(&prompt, &tone, &server, out.as_deref()).await
        }
    };

    if let Err(e) = outcome
    {   error!("{}", e);
        std::process::exit(1);
    }
}

async fn serve(bind: Option<String>) -> Result<(), Error>
{   let mut config = AppConfig::from_env()?;
    if let Some(bind) = bind
    {   config.server.bind_addr = bind.parse().map_err(|_| {
          Error::InvalidConfiguration(format!(
            "--bind is not a socket address: {}", bind
          ))
        })?;
    }
    multigen::server::serve(config).await
}

async fn generate(
  prompt: &str
, tone: &str
, server: &str
, out: Option<&Path>
) -> Result<(), Error>
{   let orchestrator = Orchestrator::over_http(server);
    let result = match orchestrator.generate(prompt, tone).await
    {   Ok(result) => result
      , Err(e) => {
          eprintln!("{}", user_message(&e));
          return Err(e);
        }
    };

    report(&result);
    if let Some(dir) = out
    {   save_media(&result, dir)?;
    }
    Ok(())
}

fn report(result: &CombinedResult)
{   if !result.text.is_empty()
    {   println!("{}\n", result.text);
    }
    println!("image: {}", media_status(&result.image));
    println!("audio: {}", media_status(&result.audio));
}
