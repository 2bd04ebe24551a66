//! `/config` - register or update a game's webhooks.

use poise::serenity_prelude as serenity;
use poise::CreateReply;
use tracing::info;

use super::checks::ensure_customer_role;
use super::{rejection, Context, Error, REJECTION_COLOR, SUCCESS_COLOR};
use crate::webhooks::{register_game, validate_game_id, RegisterGameRequest, WebhookUrls};

/// Setup/Update Your Game!
#[poise::command(slash_command, guild_only)]
pub async fn config(
    ctx: Context<'_>,
    #[description = "Roblox Game ID"] game_id: String,
    #[description = "Visit Webhook URL"] visit: String,
    #[description = "Unverified NBC Webhook URL"] unnbc: String,
    #[description = "Unverified Premium Webhook URL"] unpremium: String,
    #[description = "Verified NBC Webhook URL"] vnbc: String,
    #[description = "Verified Premium Webhook URL"] vpremium: String,
    #[description = "Success Webhook URL"] success: String,
    #[description = "Failed Webhook URL"] failed: String,
) -> Result<(), Error> {
    if !ensure_customer_role(ctx).await? {
        return Ok(());
    }

    let data = ctx.data();
    let Some(pool) = data.pool.as_ref() else {
        ctx.send(rejection(
            "The database is unavailable right now, please try again later.",
        ))
        .await?;
        return Ok(());
    };

    ctx.defer_ephemeral().await?;

    let request = RegisterGameRequest {
        game_id,
        urls: WebhookUrls {
            visit,
            unnbc,
            unpremium,
            vnbc,
            vpremium,
            success,
            failed,
        },
        discord_id: ctx.author().id.get(),
    };

    let outcome = match register_game(pool, &data.roblox, &request).await {
        Ok(outcome) => outcome,
        Err(e) => {
            info!(user_id = %ctx.author().id, error = %e, "Game registration rejected");
            ctx.send(rejection(e.user_message())).await?;
            return Ok(());
        }
    };

    let mut embed = serenity::CreateEmbed::new().title(outcome.message());
    if outcome.is_stored() {
        embed = embed
            .color(SUCCESS_COLOR)
            .field("Game ID", request.game_id.trim(), true);
        if let Ok(place_id) = validate_game_id(&request.game_id) {
            if let Some(icon) = data.roblox.game_icon(place_id).await {
                embed = embed.thumbnail(icon);
            }
        }
    } else {
        embed = embed.color(REJECTION_COLOR);
    }

    ctx.send(CreateReply::default().embed(embed).ephemeral(true)).await?;
    Ok(())
}
