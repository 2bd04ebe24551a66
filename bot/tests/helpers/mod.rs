//! Reusable test helpers for integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;

use axum::Router;
use placekit_bot::webhooks::{
    RegisterGameRequest, UniverseLookup, WebhookUrls, DISCORD_WEBHOOK_PREFIX,
};
use tokio::net::TcpListener;

/// Universe lookup backed by a fixed place id -> universe id table.
#[derive(Debug, Default)]
pub struct FakeUniverses {
    known: HashMap<u64, u64>,
}

impl FakeUniverses {
    pub fn with_place(mut self, place_id: u64, universe_id: u64) -> Self {
        self.known.insert(place_id, universe_id);
        self
    }
}

impl UniverseLookup for FakeUniverses {
    async fn universe_id(&self, place_id: u64) -> Option<u64> {
        self.known.get(&place_id).copied()
    }
}

/// Seven distinct, valid Discord webhook URLs tagged with `tag`.
pub fn webhook_urls(tag: &str) -> WebhookUrls {
    let url = |name: &str| format!("{DISCORD_WEBHOOK_PREFIX}{tag}/{name}");
    WebhookUrls {
        visit: url("visit"),
        unnbc: url("unnbc"),
        unpremium: url("unpremium"),
        vnbc: url("vnbc"),
        vpremium: url("vpremium"),
        success: url("success"),
        failed: url("failed"),
    }
}

pub fn request(game_id: &str, discord_id: u64, urls: WebhookUrls) -> RegisterGameRequest {
    RegisterGameRequest {
        game_id: game_id.to_string(),
        urls,
        discord_id,
    }
}

/// Serve `app` on an ephemeral local port and return its base URL.
pub async fn spawn_server(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test server");
    let addr: SocketAddr = listener.local_addr().expect("No local address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Test server failed");
    });

    format!("http://{addr}")
}
