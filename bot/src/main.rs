//! Placekit Bot - Main Entry Point

use std::sync::Arc;

use anyhow::{Context as _, Result};
use poise::serenity_prelude as serenity;
use tracing::{info, warn};

use placekit_bot::commands::{self, Data};
use placekit_bot::roblox::RobloxClient;
use placekit_bot::themes::ThemeRegistry;
use placekit_bot::{config, db, keepalive};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "placekit_bot=debug,serenity=warn".into()),
        )
        .json()
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        guild_id = ?config.guild_id,
        "Starting Placekit Bot"
    );

    // Database is optional: without it only place files are served
    let pool = db::connect_optional(config.database_url.as_deref()).await;

    let roblox = RobloxClient::new(&config).context("Failed to build Roblox HTTP client")?;

    let themes = ThemeRegistry::builtin(&config.themes_dir);
    for theme in themes.iter() {
        if !theme.path.is_file() {
            warn!(code = %theme.code, path = %theme.path.display(), "Theme template missing");
        }
    }

    if let Err(e) = keepalive::spawn(&config.keepalive_address).await {
        warn!(address = %config.keepalive_address, error = %e, "Keep-alive server disabled");
    }

    let data = Data {
        customer_role_name: config.customer_role_name.clone(),
        pool,
        roblox,
        themes: Arc::new(themes),
    };

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: commands::all(),
            on_error: |error| Box::pin(commands::on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                ctx.set_presence(
                    Some(serenity::ActivityData::watching("Flux")),
                    serenity::OnlineStatus::DoNotDisturb,
                );
                info!(user = %ready.user.name, "Logged in");
                Ok(data)
            })
        })
        .build();

    let intents = serenity::GatewayIntents::non_privileged()
        | serenity::GatewayIntents::GUILD_MEMBERS
        | serenity::GatewayIntents::MESSAGE_CONTENT;

    let mut client = serenity::ClientBuilder::new(&config.discord_token, intents)
        .framework(framework)
        .await
        .context("Failed to create Discord client")?;

    // Graceful shutdown handler
    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Received shutdown signal, disconnecting...");
            shard_manager.shutdown_all().await;
        }
    });

    client.start().await.context("Discord client stopped")?;

    info!("Bot shutdown complete");
    Ok(())
}
