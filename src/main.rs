mod bot;
mod server;

use clap::{Parser, Subcommand};
use dadabot_core::{config, logging};
use dadabot_telegram::TelegramClient;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "dadabot", version, about = "Telegram echo bot")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file.
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Drain pending updates via getUpdates and answer them.
    Poll {
        /// Keep polling, sleeping this many seconds between drains.
        #[arg(long)]
        interval: Option<u64>,
    },
    /// Run the webhook receiver for push delivery.
    Serve {
        /// Register the webhook with Telegram before serving.
        #[arg(long)]
        register: bool,
    },
    /// Register the webhook callback URL.
    SetWebhook,
    /// Remove the webhook so polling works again.
    DeleteWebhook,
    /// Print the effective configuration.
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut cfg = config::load(&cli.config)?;
    cfg.apply_env();
    logging::init(cfg.bot.log_level.as_deref());

    match cli.command {
        Commands::Poll { interval } => {
            let client = TelegramClient::new(cfg.telegram.clone())?;
            let cancel = shutdown_token();
            let client = &client;

            loop {
                let handled = client
                    .process_updates(&cancel, move |update| bot::respond(client, update))
                    .await?;
                info!("handled {handled} updates");

                let Some(secs) = interval else { break };
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = tokio::time::sleep(Duration::from_secs(secs)) => {}
                }
            }
        }
        Commands::Serve { register } => {
            let client = Arc::new(TelegramClient::new(cfg.telegram.clone())?);
            if register {
                if cfg.telegram.app_name.is_empty() {
                    anyhow::bail!("app_name is required to register a webhook. Set it in config.toml or APP_NAME env var.");
                }
                client.set_webhook().await?;
            }

            let addr = format!("{}:{}", cfg.server.host, cfg.server.port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            info!("webhook receiver listening on {addr}");

            let cancel = shutdown_token();
            axum::serve(listener, server::router(client))
                .with_graceful_shutdown(async move { cancel.cancelled().await })
                .await?;
        }
        Commands::SetWebhook => {
            if cfg.telegram.app_name.is_empty() {
                anyhow::bail!("app_name is empty. Set it in config.toml or APP_NAME env var.");
            }
            let client = TelegramClient::new(cfg.telegram.clone())?;
            let resp = client.set_webhook().await?;
            println!("setWebhook: {} {}", resp.status, resp.body);
        }
        Commands::DeleteWebhook => {
            let client = TelegramClient::new(cfg.telegram.clone())?;
            let removed = client.delete_webhook().await?;
            println!("deleteWebhook: {removed}");
        }
        Commands::Status => {
            println!("dadabot status\n");
            println!("Config: {}", cli.config);
            println!(
                "  api_key: {}",
                if cfg.telegram.api_key.is_empty() {
                    "missing"
                } else {
                    "configured"
                }
            );
            println!("  app_name: {}", cfg.telegram.app_name);
            println!("  api_base_url: {}", cfg.telegram.api_base_url);
            println!("  seen_window: {}", cfg.telegram.seen_window);
            println!("  server: {}:{}", cfg.server.host, cfg.server.port);
        }
    }

    Ok(())
}

/// Token cancelled on Ctrl-C.
fn shutdown_token() -> CancellationToken {
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("failed to listen for Ctrl-C: {e}");
            return;
        }
        info!("shutdown requested");
        trigger.cancel();
    });
    cancel
}
