use anyhow::Context;
use guardias_core::{Backend, KeyStyle, ShiftStore};
use guardias_telegram::{Bot, BotClient, Dispatcher};

pub fn run(
    backend: Backend,
    key_style: KeyStyle,
    token: &str,
    port: u16,
    api_url: &str,
) -> anyhow::Result<()> {
    if token.trim().is_empty() {
        anyhow::bail!("TELEGRAM_TOKEN is empty");
    }
    if backend == Backend::Memory {
        tracing::warn!("in-memory store: shifts are lost on restart");
    }

    let store = ShiftStore::load(backend, key_style).into_shared();
    let client = BotClient::with_api_url(api_url, token).context("failed to build Bot API client")?;
    let bot = Bot::new(client, Dispatcher::new(store.clone()));

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
            .await
            .with_context(|| format!("failed to bind health server on port {port}"))?;

        // The health server is independent of the bot; if it dies the bot
        // keeps answering commands.
        tokio::spawn(async move {
            if let Err(e) = guardias_server::serve_on(store, listener).await {
                tracing::error!(error = %e, "health server stopped");
            }
        });

        tracing::info!("bot started");
        tokio::select! {
            res = bot.run() => res.context("bot stopped"),
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("shutting down");
                Ok(())
            }
        }
    })
}
