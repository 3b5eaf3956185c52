use std::sync::Arc;

use hwb_core::{
    config::Config, domain::Cursor, messaging::notifier::Notifier, poller::Poller,
};
use hwb_practicum::PracticumClient;
use hwb_telegram::TelegramMessenger;
use tokio_util::sync::CancellationToken;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), hwb_core::Error> {
    // Nothing touches the network before the config is complete.
    let cfg = Config::load()?;
    let _log_guard = hwb_core::logging::init("hwb", &cfg.log_file)?;
    tracing::info!(?cfg, "starting homework status bot");

    let api = Arc::new(PracticumClient::new(
        cfg.endpoint.clone(),
        cfg.practicum_token.clone(),
        cfg.request_timeout,
    )?);
    let messenger = Arc::new(TelegramMessenger::from_token(cfg.telegram_token.clone()));
    let notifier = Notifier::new(messenger, cfg.telegram_chat_id.clone());

    let shutdown = CancellationToken::new();
    {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    tracing::info!("interrupt received, shutting down");
                    shutdown.cancel();
                }
                Err(e) => tracing::warn!("cannot listen for interrupts: {e}"),
            }
        });
    }

    Poller::new(api, notifier, cfg.retry_time, Cursor::now())
        .run(shutdown)
        .await;

    Ok(())
}
