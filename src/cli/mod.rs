//! Command-line interface parsing and runtime entry.

use std::error::Error;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::api::HttpAgentClient;
use crate::core::config::Config;
use crate::ui::chat_loop::{run_chat, ChatSession};
use crate::utils::logging::LoggingState;

#[derive(Parser)]
#[command(name = "wxchat")]
#[command(version)]
#[command(about = "A terminal chat interface for a weather agent service")]
#[command(
    long_about = "Wxchat is a full-screen terminal chat interface that talks to a weather \
agent service over HTTP. Each message you send is answered by the remote \
agent and shown in a scrolling conversation view.\n\n\
Configuration:\n\
  Optional config.toml in the platform config directory with keys\n\
  endpoint, session_id, and log_file. Command-line flags take precedence.\n\n\
Controls:\n\
  Type              Enter your message in the input field\n\
  Enter             Send the message\n\
  Up/Down/Mouse     Scroll through chat history\n\
  Ctrl+C            Quit the application\n\
  Backspace         Delete characters in the input field"
)]
pub struct Args {
    /// Base address of the weather agent service
    #[arg(short, long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Session identifier sent with every request
    #[arg(short, long, value_name = "ID")]
    pub session_id: Option<String>,

    /// Enable transcript logging to the specified file
    #[arg(short = 'l', long, value_name = "FILE")]
    pub log: Option<String>,
}

pub fn main() -> Result<(), Box<dyn Error>> {
    tokio::runtime::Runtime::new()?.block_on(async_main())
}

async fn async_main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = Config::load()?;

    let endpoint = config.resolve_endpoint(args.endpoint);
    let session_id = config.resolve_session_id(args.session_id);
    let logging = LoggingState::new(config.resolve_log_file(args.log))?;

    let session = ChatSession {
        agent: Arc::new(HttpAgentClient::new(endpoint)),
        session_id,
        logging,
    };

    run_chat(session).await
}
