use anyhow::Result;
use tracing::{error, info, Level};

use homework_bot::config::Config;
use homework_bot::poller::polling_loop;
use homework_bot::practicum::PracticumClient;
use homework_bot::telegram::TelegramClient;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    info!("Starting homework status bot");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration error: {:#}", e);
            return Err(e);
        }
    };

    let practicum = PracticumClient::new(config.practicum_token, config.endpoint);
    let telegram = TelegramClient::new(config.telegram_token, config.telegram_chat_id);

    info!("Polling every {} seconds", config.poll_interval.as_secs());

    polling_loop(&practicum, &telegram, config.poll_interval).await;

    Ok(())
}
