//! Roblox Web API Client
//!
//! Thin wrappers over the Roblox endpoints the bot relies on. Every call is
//! best-effort: failures are logged and reported as `None` so a Roblox outage
//! never takes down a Discord interaction.

use std::time::Duration;

use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::Config;
use crate::webhooks::UniverseLookup;

/// Body returned by the refresh endpoint for a rejected cookie.
const INVALID_COOKIE_BODY: &str = "Invalid Cookie";

const CSRF_HEADER: &str = "x-csrf-token";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UniverseResponse {
    universe_id: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct ThumbnailResponse {
    #[serde(default)]
    data: Vec<Thumbnail>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Thumbnail {
    image_url: Option<String>,
}

/// Extract the universe id from a universes API body.
fn parse_universe_id(body: &str) -> Option<u64> {
    serde_json::from_str::<UniverseResponse>(body)
        .ok()
        .and_then(|r| r.universe_id)
}

/// Extract the first icon URL from a thumbnails API body.
fn parse_game_icon(body: &str) -> Option<String> {
    serde_json::from_str::<ThumbnailResponse>(body)
        .ok()?
        .data
        .into_iter()
        .next()
        .and_then(|t| t.image_url)
        .filter(|url| !url.is_empty())
}

/// Roblox API client with configurable endpoints.
#[derive(Debug, Clone)]
pub struct RobloxClient {
    http: reqwest::Client,
    cookie_refresh_url: String,
    auth_url: String,
    thumbnails_url: String,
    apis_url: String,
}

impl RobloxClient {
    pub fn new(config: &Config) -> reqwest::Result<Self> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            http,
            cookie_refresh_url: config.cookie_refresh_url.clone(),
            auth_url: config.roblox_auth_url.trim_end_matches('/').to_string(),
            thumbnails_url: config.roblox_thumbnails_url.trim_end_matches('/').to_string(),
            apis_url: config.roblox_apis_url.trim_end_matches('/').to_string(),
        })
    }

    /// Exchange a `.ROBLOSECURITY` cookie for a refreshed one.
    pub async fn refresh_cookie(&self, cookie: &str) -> Option<String> {
        let result = self
            .http
            .get(&self.cookie_refresh_url)
            .query(&[("cookie", cookie)])
            .send()
            .await;

        let body = match result {
            Ok(resp) => resp.text().await,
            Err(e) => Err(e),
        };

        match body {
            Ok(text) if text != INVALID_COOKIE_BODY => Some(text),
            Ok(_) => {
                debug!("Cookie refresh rejected the cookie");
                None
            }
            Err(e) => {
                warn!(error = %e, "An error occurred while refreshing the cookie");
                None
            }
        }
    }

    /// Obtain a CSRF token by provoking a 403 from the logout endpoint.
    pub async fn csrf_token(&self, cookie: &str) -> Option<String> {
        let resp = match self
            .http
            .post(format!("{}/v2/logout", self.auth_url))
            .header(reqwest::header::COOKIE, format!(".ROBLOSECURITY={cookie}"))
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                warn!(error = %e, "CSRF token request failed");
                return None;
            }
        };

        if resp.status() != StatusCode::FORBIDDEN {
            debug!(status = %resp.status(), "Logout endpoint did not issue a CSRF token");
            return None;
        }

        resp.headers()
            .get(CSRF_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    }

    /// 512x512 PNG icon URL of a place.
    pub async fn game_icon(&self, place_id: u64) -> Option<String> {
        let url = format!("{}/v1/places/gameicons", self.thumbnails_url);
        let place_id = place_id.to_string();
        let body = self
            .get_text(
                &url,
                &[
                    ("placeIds", place_id.as_str()),
                    ("returnPolicy", "PlaceHolder"),
                    ("size", "512x512"),
                    ("format", "Png"),
                    ("isCircular", "false"),
                ],
            )
            .await?;

        parse_game_icon(&body)
    }

    /// Universe id for a place, `None` if the place does not exist.
    pub async fn universe_id(&self, place_id: u64) -> Option<u64> {
        let url = format!("{}/universes/v1/places/{place_id}/universe", self.apis_url);
        let body = self.get_text(&url, &[]).await?;
        parse_universe_id(&body)
    }

    async fn get_text(&self, url: &str, query: &[(&str, &str)]) -> Option<String> {
        let result = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .and_then(|resp| resp.error_for_status());

        match result {
            Ok(resp) => match resp.text().await {
                Ok(body) => Some(body),
                Err(e) => {
                    warn!(url, error = %e, "Failed to read Roblox response");
                    None
                }
            },
            Err(e) => {
                warn!(url, error = %e, "Roblox request failed");
                None
            }
        }
    }
}

impl UniverseLookup for RobloxClient {
    async fn universe_id(&self, place_id: u64) -> Option<u64> {
        Self::universe_id(self, place_id).await
    }
}
