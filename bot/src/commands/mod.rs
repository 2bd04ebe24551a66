//! Discord Commands
//!
//! Slash commands, shared bot state and framework error handling.

pub mod checks;
pub mod config;
pub mod file;

use std::sync::Arc;

use poise::serenity_prelude as serenity;
use poise::CreateReply;
use sqlx::PgPool;
use tracing::error;

use crate::roblox::RobloxClient;
use crate::themes::ThemeRegistry;

/// Embed color for rejections and failures.
pub const REJECTION_COLOR: u32 = 8918293;

/// Embed color for successful registrations.
pub const SUCCESS_COLOR: u32 = 0x57F287;

/// State shared by every command invocation.
pub struct Data {
    pub customer_role_name: String,
    /// `None` when the database could not be reached at startup.
    pub pool: Option<PgPool>,
    pub roblox: RobloxClient,
    pub themes: Arc<ThemeRegistry>,
}

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;

/// All slash commands, in registration order.
pub fn all() -> Vec<poise::Command<Data, Error>> {
    vec![config::config(), file::file(), file::themes()]
}

/// Ephemeral embed reply carrying a rejection message.
pub fn rejection(message: impl Into<String>) -> CreateReply {
    CreateReply::default()
        .embed(
            serenity::CreateEmbed::new()
                .title(message)
                .color(REJECTION_COLOR),
        )
        .ephemeral(true)
}

/// Framework error hook: log, then tell the user something went wrong.
pub async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!(error = %error, "Failed to start the bot framework");
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!(command = %ctx.command().qualified_name, error = %error, "Command failed");
            if let Err(e) = ctx
                .send(rejection("Something went wrong, please try again later."))
                .await
            {
                error!(error = %e, "Failed to report command error");
            }
        }
        other => {
            if let Err(e) = poise::builtins::on_error(other).await {
                error!(error = %e, "Error while handling error");
            }
        }
    }
}
