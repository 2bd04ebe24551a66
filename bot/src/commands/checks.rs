//! Command Checks

use poise::serenity_prelude as serenity;
use tracing::{debug, warn};

use super::{rejection, Context, Error};

/// Message shown to members without the customer role.
pub fn missing_role_message(role_name: &str) -> String {
    format!("Role {role_name} is required to run this command.")
}

/// Ensure the invoking member holds the customer role.
///
/// Replies with a rejection and returns `false` when they don't.
pub async fn ensure_customer_role(ctx: Context<'_>) -> Result<bool, Error> {
    let role_name = ctx.data().customer_role_name.as_str();

    let Some(guild_id) = ctx.guild_id() else {
        warn!(user_id = %ctx.author().id, "Customer command used outside a guild");
        return Ok(false);
    };

    let Some(member) = ctx.author_member().await else {
        warn!(guild_id = %guild_id, user_id = %ctx.author().id, "Member not found in guild");
        return Ok(false);
    };

    let cached: Option<Option<serenity::RoleId>> = ctx
        .guild()
        .map(|guild| guild.role_by_name(role_name).map(|role| role.id));

    let role_id = match cached {
        Some(role_id) => role_id,
        None => guild_id
            .roles(ctx.http())
            .await?
            .into_values()
            .find(|role| role.name == role_name)
            .map(|role| role.id),
    };

    let allowed = role_id.is_some_and(|id| member.roles.contains(&id));
    if !allowed {
        debug!(user_id = %ctx.author().id, role = role_name, "Missing customer role");
        ctx.send(rejection(missing_role_message(role_name))).await?;
    }

    Ok(allowed)
}
