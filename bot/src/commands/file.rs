//! `/file` and `/themes` - randomized place file delivery.

use std::sync::Arc;

use poise::serenity_prelude as serenity;
use poise::CreateReply;
use tracing::{error, info};

use super::checks::ensure_customer_role;
use super::{rejection, Context, Error, SUCCESS_COLOR};

async fn autocomplete_theme(
    ctx: Context<'_>,
    partial: &str,
) -> impl Iterator<Item = serenity::AutocompleteChoice> {
    ctx.data()
        .themes
        .search(partial)
        .into_iter()
        .map(|theme| serenity::AutocompleteChoice::new(theme.name.clone(), theme.code.clone()))
        .collect::<Vec<_>>()
        .into_iter()
}

/// Get a freshly randomized place file
#[poise::command(slash_command, guild_only)]
pub async fn file(
    ctx: Context<'_>,
    #[description = "Place theme"]
    #[autocomplete = "autocomplete_theme"]
    theme: String,
) -> Result<(), Error> {
    if !ensure_customer_role(ctx).await? {
        return Ok(());
    }

    ctx.defer_ephemeral().await?;

    let themes = Arc::clone(&ctx.data().themes);
    let code = theme.clone();
    let loaded = tokio::task::spawn_blocking(move || themes.load(&code)).await?;

    match loaded {
        Ok(Some(place)) => {
            info!(user_id = %ctx.author().id, theme = %theme, size = place.bytes.len(), "Place file sent");
            ctx.send(
                CreateReply::default()
                    .content("Here is your place file.")
                    .attachment(serenity::CreateAttachment::bytes(
                        place.bytes,
                        place.file_name,
                    ))
                    .ephemeral(true),
            )
            .await?;
        }
        Ok(None) => {
            ctx.send(rejection("Theme not found.")).await?;
        }
        Err(e) => {
            error!(theme = %theme, error = %e, "Failed to load theme");
            ctx.send(rejection("Failed to load the theme file.")).await?;
        }
    }

    Ok(())
}

/// List the available place themes
#[poise::command(slash_command)]
pub async fn themes(ctx: Context<'_>) -> Result<(), Error> {
    let choices = ctx.data().themes.choices();
    let description = if choices.is_empty() {
        "No themes are configured.".to_string()
    } else {
        choices
            .iter()
            .map(|(name, code)| format!("`{code}` - {name}"))
            .collect::<Vec<_>>()
            .join("\n")
    };

    ctx.send(
        CreateReply::default()
            .embed(
                serenity::CreateEmbed::new()
                    .title("Themes")
                    .description(description)
                    .color(SUCCESS_COLOR),
            )
            .ephemeral(true),
    )
    .await?;
    Ok(())
}
