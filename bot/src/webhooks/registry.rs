//! Game Registration
//!
//! Validation and storage behind the `config` command.

use std::future::Future;

use sqlx::PgPool;
use tracing::{info, instrument, warn};

use super::queries;
use super::types::{RegisterGameRequest, RegistrationError, UpsertOutcome, WebhookUrls};

/// Every registered URL must point at a Discord webhook.
pub const DISCORD_WEBHOOK_PREFIX: &str = "https://discord.com/api/webhooks/";

const MAX_URL_LENGTH: usize = 2048;

/// Resolves a Roblox place id to its universe id.
pub trait UniverseLookup: Sync {
    fn universe_id(&self, place_id: u64) -> impl Future<Output = Option<u64>> + Send;
}

/// Check that all seven URLs are Discord webhook URLs.
///
/// Reports the first offending field in argument order.
pub fn validate_webhook_urls(urls: &WebhookUrls) -> Result<(), RegistrationError> {
    for (field, url) in urls.fields() {
        if !url.starts_with(DISCORD_WEBHOOK_PREFIX)
            || url.len() == DISCORD_WEBHOOK_PREFIX.len()
            || url.len() > MAX_URL_LENGTH
        {
            return Err(RegistrationError::InvalidWebhookUrl { field });
        }
    }
    Ok(())
}

/// Parse a Roblox place id (ASCII digits only).
pub fn validate_game_id(game_id: &str) -> Result<u64, RegistrationError> {
    let trimmed = game_id.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RegistrationError::InvalidGameId(game_id.to_string()));
    }
    trimmed
        .parse()
        .map_err(|_| RegistrationError::InvalidGameId(game_id.to_string()))
}

/// Validate a `config` request, confirm the game exists and store it.
///
/// Nothing is written unless every check passes.
#[instrument(skip(pool, lookup, request), fields(game_id = %request.game_id, discord_id = request.discord_id))]
pub async fn register_game(
    pool: &PgPool,
    lookup: &impl UniverseLookup,
    request: &RegisterGameRequest,
) -> Result<UpsertOutcome, RegistrationError> {
    validate_webhook_urls(&request.urls)?;
    let place_id = validate_game_id(&request.game_id)?;

    let Some(universe_id) = lookup.universe_id(place_id).await else {
        warn!(place_id, "Universe lookup found no game");
        return Err(RegistrationError::GameNotFound(request.game_id.clone()));
    };

    let outcome = queries::upsert_registration(
        pool,
        &place_id.to_string(),
        &request.urls,
        &request.discord_id.to_string(),
    )
    .await?;

    info!(place_id, universe_id, ?outcome, "Game registration processed");
    Ok(outcome)
}
