//! Webhook Database Queries
//!
//! Uses runtime queries (`sqlx::query` / `sqlx::query_as`) to avoid
//! requiring a live database at compile time.

use sqlx::PgPool;

use super::types::{UpsertOutcome, WebhookRegistration, WebhookUrls};
use crate::db::db_error;

/// Find the registration for a game.
pub async fn find_registration_by_game(
    pool: &PgPool,
    game_id: &str,
) -> sqlx::Result<Option<WebhookRegistration>> {
    sqlx::query_as::<_, WebhookRegistration>(
        r"
        SELECT id, gameid, visit, unnbc, unpremium, vnbc, vpremium,
               success, failed, discid
        FROM webhooks
        WHERE gameid = $1
        ",
    )
    .bind(game_id)
    .fetch_optional(pool)
    .await
    .map_err(db_error!("find_registration_by_game", game_id = %game_id))
}

/// List every registration owned by a Discord user.
pub async fn list_registrations_by_owner(
    pool: &PgPool,
    discord_id: &str,
) -> sqlx::Result<Vec<WebhookRegistration>> {
    sqlx::query_as::<_, WebhookRegistration>(
        r"
        SELECT id, gameid, visit, unnbc, unpremium, vnbc, vpremium,
               success, failed, discid
        FROM webhooks
        WHERE discid = $1
        ORDER BY id ASC
        ",
    )
    .bind(discord_id)
    .fetch_all(pool)
    .await
    .map_err(db_error!("list_registrations_by_owner", discord_id = %discord_id))
}

/// Insert a registration, or update it when `discord_id` already owns the game.
///
/// A game owned by someone else is left untouched. Runs in one transaction;
/// the owner row is locked so concurrent registrations for the same game
/// serialize in the database.
pub async fn upsert_registration(
    pool: &PgPool,
    game_id: &str,
    urls: &WebhookUrls,
    discord_id: &str,
) -> sqlx::Result<UpsertOutcome> {
    let mut tx = pool.begin().await?;

    let inserted: Option<(i32,)> = sqlx::query_as(
        r"
        INSERT INTO webhooks
            (gameid, visit, unnbc, unpremium, vnbc, vpremium, success, failed, discid)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        ON CONFLICT (gameid) DO NOTHING
        RETURNING id
        ",
    )
    .bind(game_id)
    .bind(&urls.visit)
    .bind(&urls.unnbc)
    .bind(&urls.unpremium)
    .bind(&urls.vnbc)
    .bind(&urls.vpremium)
    .bind(&urls.success)
    .bind(&urls.failed)
    .bind(discord_id)
    .fetch_optional(&mut *tx)
    .await
    .map_err(db_error!("upsert_registration.insert", game_id = %game_id))?;

    if inserted.is_some() {
        tx.commit().await?;
        return Ok(UpsertOutcome::Inserted);
    }

    let (owner,): (Option<String>,) =
        sqlx::query_as("SELECT discid FROM webhooks WHERE gameid = $1 FOR UPDATE")
            .bind(game_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(db_error!("upsert_registration.lock", game_id = %game_id))?;

    if owner.as_deref() != Some(discord_id) {
        tx.rollback().await?;
        return Ok(UpsertOutcome::OwnershipConflict);
    }

    sqlx::query(
        r"
        UPDATE webhooks
        SET success = $2, vpremium = $3, visit = $4, failed = $5,
            vnbc = $6, unnbc = $7, unpremium = $8
        WHERE gameid = $1
        ",
    )
    .bind(game_id)
    .bind(&urls.success)
    .bind(&urls.vpremium)
    .bind(&urls.visit)
    .bind(&urls.failed)
    .bind(&urls.vnbc)
    .bind(&urls.unnbc)
    .bind(&urls.unpremium)
    .execute(&mut *tx)
    .await
    .map_err(db_error!("upsert_registration.update", game_id = %game_id))?;

    tx.commit().await?;
    Ok(UpsertOutcome::Updated)
}
