//! # dadabot-telegram
//!
//! Typed Bot API entities and a client for sending messages and consuming
//! the update stream by polling or webhook push.

pub mod client;
pub mod tracker;
pub mod transport;
pub mod types;

pub use client::TelegramClient;
