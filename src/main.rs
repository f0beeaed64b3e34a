use std::env;

use openrouter_api::OpenRouterHandler;
use terminal::{ChatSession, Settings};
use tokio::io::BufReader;
use tracing::*;

const ENV_API_KEY: &str = "HOME_ENERGY_SAVER_OPENROUTER_API_KEY";
const ENV_MODEL: &str = "HOME_ENERGY_SAVER_MODEL";
const ENV_TEMPERATURE: &str = "HOME_ENERGY_SAVER_TEMPERATURE";
const ENV_MAX_RETRIES: &str = "HOME_ENERGY_SAVER_MAX_RETRIES";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    //stdout belongs to the chat
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    info!(
        "Starting... CARGO_PKG_NAME={}, CARGO_PKG_VERSION={}, version={}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        option_env!("version").unwrap_or("(not defined at compile)")
    );

    let settings = settings_from_env();
    let mut session = ChatSession::new(OpenRouterHandler::default(), settings);

    let input = BufReader::new(tokio::io::stdin());
    let mut output = tokio::io::stdout();

    tokio::select! {
        r = terminal::run(&mut session, input, &mut output) => r?,
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl-C, shutting down.");
            //a pending stdin read would keep the runtime from shutting down
            std::process::exit(0);
        }
    }

    Ok(())
}

fn settings_from_env() -> Settings {
    let mut settings = Settings::default();

    if let Some(key) = read_env_var(ENV_API_KEY) {
        settings.set_api_key(&key);
    }
    if let Some(raw) = read_env_var(ENV_MODEL) {
        if let Err(e) = settings.set_model(&raw) {
            warn!("Ignoring {}: {}", ENV_MODEL, e);
        }
    }
    if let Some(raw) = read_env_var(ENV_TEMPERATURE) {
        if let Err(e) = settings.set_temperature(&raw) {
            warn!("Ignoring {}: {}", ENV_TEMPERATURE, e);
        }
    }
    if let Some(raw) = read_env_var(ENV_MAX_RETRIES) {
        if let Err(e) = settings.set_max_retries(&raw) {
            warn!("Ignoring {}: {}", ENV_MAX_RETRIES, e);
        }
    }

    //never log the key itself
    info!(
        "Settings: api_key_set={}, model={}, temperature={}, max_retries={}",
        !settings.api_key.is_empty(),
        settings.model,
        settings.temperature,
        settings.max_retries
    );
    settings
}

fn read_env_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}
