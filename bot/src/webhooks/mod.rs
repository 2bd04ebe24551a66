//! Webhook Registry
//!
//! Per-game sets of Discord notification webhooks, owned by the Discord user
//! who first registered the game.

pub mod queries;
pub mod registry;
pub mod types;

pub use registry::{
    register_game, validate_game_id, validate_webhook_urls, UniverseLookup,
    DISCORD_WEBHOOK_PREFIX,
};
pub use types::{
    RegisterGameRequest, RegistrationError, UpsertOutcome, WebhookRegistration, WebhookUrls,
    OWNERSHIP_CONFLICT_MESSAGE, REGISTERED_MESSAGE,
};
