use anyhow::Result;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

use prompt_relay::agent::StatelessLLMFactory;
use prompt_relay::chat::ChatConsole;
use prompt_relay::config_manager::Config;

// One thread: the loop awaits each model call before reading more input.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // stdout belongs to the conversation
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("prompt_relay=warn")),
        )
        .init();

    let config = Config::load()?;
    let llm = StatelessLLMFactory::create_llm(&config.chat_llm)?;
    let console = ChatConsole::new(llm, config.console_config.display_name.clone());

    console
        .run(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .await?;
    Ok(())
}
