//! Transport adapters. Decode inbound payloads to plain text, encode replies back.
//!
//! TwiML for Twilio SMS/voice webhooks, JSON for chat clients. No routing.

pub mod json;
pub mod twiml;

pub use json::{ChatRequest, ChatResponse, handle_chat_json};
pub use twiml::{SmsWebhook, TwilioAdapter, VoiceWebhook};
