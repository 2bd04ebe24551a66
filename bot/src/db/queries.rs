//! Database Queries
//!
//! Runtime queries (no compile-time `DATABASE_URL` required).

use sqlx::PgPool;

use super::models::Purchase;

// ============================================================================
// Purchase Queries
// ============================================================================

/// Record that a Discord user bought access for a Roblox account.
pub async fn record_purchase(
    pool: &PgPool,
    rbx_id: &str,
    discord_id: &str,
) -> sqlx::Result<Purchase> {
    sqlx::query_as::<_, Purchase>(
        r"
        INSERT INTO purchases (rbxid, discid)
        VALUES ($1, $2)
        RETURNING id, rbxid, discid
        ",
    )
    .bind(rbx_id)
    .bind(discord_id)
    .fetch_one(pool)
    .await
    .map_err(db_error!("record_purchase", rbx_id = %rbx_id, discord_id = %discord_id))
}

/// List purchases made by a Discord user, oldest first.
pub async fn list_purchases_by_discord_id(
    pool: &PgPool,
    discord_id: &str,
) -> sqlx::Result<Vec<Purchase>> {
    sqlx::query_as::<_, Purchase>(
        "SELECT id, rbxid, discid FROM purchases WHERE discid = $1 ORDER BY id ASC",
    )
    .bind(discord_id)
    .fetch_all(pool)
    .await
    .map_err(db_error!("list_purchases_by_discord_id", discord_id = %discord_id))
}

/// Find the Discord user linked to a Roblox account, if any.
pub async fn find_purchase_by_rbx_id(
    pool: &PgPool,
    rbx_id: &str,
) -> sqlx::Result<Option<Purchase>> {
    sqlx::query_as::<_, Purchase>(
        "SELECT id, rbxid, discid FROM purchases WHERE rbxid = $1 ORDER BY id ASC LIMIT 1",
    )
    .bind(rbx_id)
    .fetch_optional(pool)
    .await
    .map_err(db_error!("find_purchase_by_rbx_id", rbx_id = %rbx_id))
}
