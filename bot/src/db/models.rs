//! Database Models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Link between a Roblox account and the Discord account that bought access.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, PartialEq, Eq)]
pub struct Purchase {
    pub id: i32,
    pub rbxid: String,
    pub discid: String,
}
