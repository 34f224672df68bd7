use anyhow::Context;
use clap::{Parser, ValueEnum};
use lafia_adaptor_terminal::{TerminalAdaptor, TerminalConfig};
use lafia_adaptor_web::{WebChatConfig, WebChatServer};
use lafia_core::utils::logger::init_logging;
use lafia_core::{default_lexicon, load_env, load_env_from_path, ChatConfig, Resolver};
use lafia_provider_gemini::{GeminiClient, GeminiConfig};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    /// Chat on stdin/stdout
    Terminal,
    /// Serve the chat widget over HTTP
    Web,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Where the conversation happens
    #[arg(short, long, value_enum, default_value = "terminal")]
    mode: Mode,

    /// Web bind address
    #[arg(long, env = "LAFIA_WEB_HOST")]
    host: Option<String>,

    /// Web bind port
    #[arg(short, long, env = "LAFIA_WEB_PORT")]
    port: Option<u16>,

    /// Log filter, e.g. `info` or `lafia_core=debug`
    #[arg(long, env = "LAFIA_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Extra environment file loaded after `.env`
    #[arg(long)]
    env_file: Option<PathBuf>,
}

// environment is settled on the main thread before any runtime worker exists
fn main() -> anyhow::Result<()> {
    // before parsing so clap's env fallbacks can see .env values
    let dotenv_path = load_env().context("loading .env")?;
    let cli = Cli::parse();

    init_logging(&cli.log_level);
    match dotenv_path {
        Some(path) => tracing::info!("Loaded environment from: {}", path.display()),
        None => tracing::debug!("No .env file found - using system environment variables only"),
    }
    if let Some(path) = &cli.env_file {
        load_env_from_path(path).context("loading --env-file")?;
    }

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("starting Tokio runtime")?
        .block_on(run(cli))
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let responder = GeminiClient::new(GeminiConfig::from_env()).context("building Gemini client")?;
    responder.config().log_settings();
    let resolver = Arc::new(Resolver::new(default_lexicon(), Arc::new(responder)));
    tracing::info!(entries = resolver.lexicon().len(), "Lexicon ready");

    match cli.mode {
        Mode::Terminal => {
            let config = TerminalConfig {
                chat: ChatConfig::from_env(),
                banner: true,
            };
            TerminalAdaptor::new(config, resolver)
                .run()
                .await
                .context("terminal chat")?;
        }
        Mode::Web => {
            let mut config = WebChatConfig::from_env();
            if let Some(host) = cli.host {
                config.host = host;
            }
            if let Some(port) = cli.port {
                config.port = port;
            }
            WebChatServer::new(config, resolver)
                .serve()
                .await
                .context("web chat server")?;
        }
    }

    Ok(())
}
