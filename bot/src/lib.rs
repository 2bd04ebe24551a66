//! Placekit Bot
//!
//! Discord bot that registers per-game Roblox notification webhooks and hands
//! out themed place files with freshly randomized internal identifiers.

pub mod commands;
pub mod config;
pub mod db;
pub mod keepalive;
pub mod roblox;
pub mod themes;
pub mod webhooks;
