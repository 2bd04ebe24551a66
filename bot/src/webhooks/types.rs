//! Webhook Types
//!
//! Registration records, requests and errors for per-game webhook sets.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reply for a stored registration (fresh insert or owner update).
pub const REGISTERED_MESSAGE: &str = "Successfully Listed His/Her Webhooks.";

/// Reply when someone else already owns the game.
pub const OWNERSHIP_CONFLICT_MESSAGE: &str = "Do Not Touch His/Her Game.";

/// The seven notification endpoints of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookUrls {
    pub visit: String,
    pub unnbc: String,
    pub unpremium: String,
    pub vnbc: String,
    pub vpremium: String,
    pub success: String,
    pub failed: String,
}

impl WebhookUrls {
    /// `(field name, url)` pairs in command argument order.
    pub fn fields(&self) -> [(&'static str, &str); 7] {
        [
            ("visit", self.visit.as_str()),
            ("unnbc", self.unnbc.as_str()),
            ("unpremium", self.unpremium.as_str()),
            ("vnbc", self.vnbc.as_str()),
            ("vpremium", self.vpremium.as_str()),
            ("success", self.success.as_str()),
            ("failed", self.failed.as_str()),
        ]
    }
}

/// Row of the `webhooks` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct WebhookRegistration {
    pub id: i32,
    pub gameid: String,
    pub visit: String,
    pub unnbc: String,
    pub unpremium: String,
    pub vnbc: String,
    pub vpremium: String,
    pub success: String,
    pub failed: String,
    pub discid: String,
}

impl WebhookRegistration {
    pub fn urls(&self) -> WebhookUrls {
        WebhookUrls {
            visit: self.visit.clone(),
            unnbc: self.unnbc.clone(),
            unpremium: self.unpremium.clone(),
            vnbc: self.vnbc.clone(),
            vpremium: self.vpremium.clone(),
            success: self.success.clone(),
            failed: self.failed.clone(),
        }
    }
}

/// A `config` command invocation.
#[derive(Debug, Clone)]
pub struct RegisterGameRequest {
    pub game_id: String,
    pub urls: WebhookUrls,
    pub discord_id: u64,
}

/// Result of writing a registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// No row existed for the game; one was created.
    Inserted,
    /// The owner re-registered; URLs were replaced in place.
    Updated,
    /// Another user owns the game; nothing was written.
    OwnershipConflict,
}

impl UpsertOutcome {
    /// Message shown to the invoking user.
    pub const fn message(self) -> &'static str {
        match self {
            Self::Inserted | Self::Updated => REGISTERED_MESSAGE,
            Self::OwnershipConflict => OWNERSHIP_CONFLICT_MESSAGE,
        }
    }

    pub const fn is_stored(self) -> bool {
        matches!(self, Self::Inserted | Self::Updated)
    }
}

/// Registration errors.
#[derive(Error, Debug)]
pub enum RegistrationError {
    #[error("Invalid webhook URL for {field}")]
    InvalidWebhookUrl { field: &'static str },
    #[error("Invalid game id: {0}")]
    InvalidGameId(String),
    #[error("Game not found: {0}")]
    GameNotFound(String),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl RegistrationError {
    /// Message safe to show in Discord.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidWebhookUrl { field } => {
                format!("The {field} webhook must be a Discord webhook URL.")
            }
            Self::InvalidGameId(id) => format!("{id} is not a valid game id."),
            Self::GameNotFound(id) => format!("Game {id} does not exist on Roblox."),
            Self::Database(e) => {
                tracing::error!("Database error: {}", e);
                "Something went wrong while saving your webhooks.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_outcomes_share_the_success_message() {
        assert_eq!(UpsertOutcome::Inserted.message(), REGISTERED_MESSAGE);
        assert_eq!(UpsertOutcome::Updated.message(), REGISTERED_MESSAGE);
        assert_eq!(
            UpsertOutcome::OwnershipConflict.message(),
            OWNERSHIP_CONFLICT_MESSAGE
        );
        assert!(!UpsertOutcome::OwnershipConflict.is_stored());
    }

    #[test]
    fn user_messages_name_the_problem() {
        let err = RegistrationError::InvalidWebhookUrl { field: "vnbc" };
        assert_eq!(
            err.user_message(),
            "The vnbc webhook must be a Discord webhook URL."
        );
        assert!(RegistrationError::GameNotFound("1".into())
            .user_message()
            .contains("does not exist"));
    }
}
