//! Twilio webhook adapter. Decodes SMS/voice form fields, encodes TwiML.
//!
//! Only the payload codec lives here; routing and signature validation belong
//! to whatever HTTP layer hosts the webhooks.

use crate::domain::DomainError;
use crate::domain::catalog::{
    APOLOGY, VOICE_APOLOGY, VOICE_CLOSING, VOICE_FOLLOW_UP, VOICE_OPENING,
};
use crate::usecases::ChatService;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use serde::Deserialize;
use std::io::Cursor;
use tracing::warn;

const VOICE: &str = "alice";
const VOICE_ACTION: &str = "/voice";

/// Identifier used when the webhook carries no `From`.
const UNKNOWN_CALLER: &str = "unknown";

/// Inbound SMS webhook form fields.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SmsWebhook {
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub body: String,
}

/// Inbound voice webhook form fields. `speech_result` is absent on the first request of a call.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VoiceWebhook {
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub speech_result: Option<String>,
}

/// One verb in a TwiML document.
enum Verb<'a> {
    Message(&'a str),
    /// Spoken in the persona voice.
    Say(&'a str),
    /// Spoken in Twilio's default voice.
    SayPlain(&'a str),
    Gather { timeout_secs: u32 },
}

fn err<E: std::fmt::Display>(e: E) -> DomainError {
    DomainError::Transport(e.to_string())
}

fn encode(verbs: &[Verb<'_>]) -> Result<String, DomainError> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(err)?;
    writer
        .write_event(Event::Start(BytesStart::new("Response")))
        .map_err(err)?;

    for verb in verbs {
        match verb {
            Verb::Message(text) => {
                writer
                    .create_element("Message")
                    .write_text_content(BytesText::new(text))
                    .map_err(err)?;
            }
            Verb::Say(text) => {
                writer
                    .create_element("Say")
                    .with_attribute(("voice", VOICE))
                    .write_text_content(BytesText::new(text))
                    .map_err(err)?;
            }
            Verb::SayPlain(text) => {
                writer
                    .create_element("Say")
                    .write_text_content(BytesText::new(text))
                    .map_err(err)?;
            }
            Verb::Gather { timeout_secs } => {
                let timeout = timeout_secs.to_string();
                writer
                    .create_element("Gather")
                    .with_attributes([
                        ("input", "speech"),
                        ("action", VOICE_ACTION),
                        ("timeout", timeout.as_str()),
                        ("speechTimeout", "auto"),
                    ])
                    .write_empty()
                    .map_err(err)?;
            }
        }
    }

    writer
        .write_event(Event::End(BytesEnd::new("Response")))
        .map_err(err)?;

    String::from_utf8(writer.into_inner().into_inner()).map_err(err)
}

/// `<Response><Message>text</Message></Response>`
pub fn sms_response(text: &str) -> Result<String, DomainError> {
    encode(&[Verb::Message(text)])
}

/// Spoken reply, follow-up question, and a gather for the next utterance.
pub fn voice_reply(text: &str) -> Result<String, DomainError> {
    encode(&[
        Verb::Say(text),
        Verb::SayPlain(VOICE_FOLLOW_UP),
        Verb::Gather { timeout_secs: 3 },
    ])
}

/// Opening of a call: prompt, gather, and a closing blessing if nothing is heard.
pub fn voice_opening() -> Result<String, DomainError> {
    encode(&[
        Verb::Say(VOICE_OPENING),
        Verb::Gather { timeout_secs: 5 },
        Verb::SayPlain(VOICE_CLOSING),
    ])
}

/// Last-resort document. Plain string formatting so it cannot fail.
fn apology_document(verb: &str) -> String {
    if verb == "Say" {
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?><Response><Say voice=\"{}\">{}</Say></Response>",
            VOICE, VOICE_APOLOGY
        )
    } else {
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?><Response><Message>{}</Message></Response>",
            APOLOGY
        )
    }
}

/// Handles Twilio webhooks against a chat service.
pub struct TwilioAdapter<'a> {
    chat: &'a ChatService,
}

impl<'a> TwilioAdapter<'a> {
    pub fn new(chat: &'a ChatService) -> Self {
        Self { chat }
    }

    /// SMS webhook -> TwiML. Always returns a document.
    pub async fn sms(&self, hook: &SmsWebhook) -> String {
        let from = hook.from.as_deref().unwrap_or(UNKNOWN_CALLER);
        let reply = self.chat.chat(from, &hook.body).await;
        sms_response(&reply.text).unwrap_or_else(|e| {
            warn!(error = %e, "SMS TwiML encoding failed");
            apology_document("Message")
        })
    }

    /// Voice webhook -> TwiML. Without speech the call is (re)opened.
    pub async fn voice(&self, hook: &VoiceWebhook) -> String {
        let speech = hook
            .speech_result
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());

        let doc = match speech {
            Some(speech) => {
                let from = hook.from.as_deref().unwrap_or(UNKNOWN_CALLER);
                let reply = self.chat.chat(from, speech).await;
                voice_reply(&reply.text)
            }
            None => voice_opening(),
        };
        doc.unwrap_or_else(|e| {
            warn!(error = %e, "voice TwiML encoding failed");
            apology_document("Say")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::history::InMemoryHistory;
    use crate::domain::ReplyCatalog;
    use crate::usecases::{ProviderGateway, ResponseSelector};
    use std::sync::Arc;

    fn chat_service() -> ChatService {
        let selector = Arc::new(ResponseSelector::with_seed(
            Arc::new(ReplyCatalog::standard()),
            1,
        ));
        ChatService::new(
            Arc::new(ProviderGateway::new(None, selector)),
            Arc::new(InMemoryHistory::new()),
        )
    }

    #[test]
    fn test_sms_response_shape() {
        let xml = sms_response("Love one another.").unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<Response><Message>Love one another.</Message></Response>"));
    }

    #[test]
    fn test_text_is_escaped() {
        let xml = sms_response("Faith & hope <always>").unwrap();
        assert!(xml.contains("Faith &amp; hope &lt;always"));
        assert!(!xml.contains("<always>"));
    }

    #[test]
    fn test_voice_reply_has_gather() {
        let xml = voice_reply("Be still.").unwrap();
        assert!(xml.contains("<Say voice=\"alice\">Be still.</Say>"));
        assert!(xml.contains(&format!("<Say>{}</Say>", VOICE_FOLLOW_UP)));
        assert!(xml.contains("<Gather input=\"speech\" action=\"/voice\" timeout=\"3\" speechTimeout=\"auto\"/>"));
    }

    #[test]
    fn test_voice_opening() {
        let xml = voice_opening().unwrap();
        assert!(xml.contains("Peace be with you"));
        assert!(xml.contains("timeout=\"5\""));
        assert!(xml.contains(&format!("<Say>{}</Say>", VOICE_CLOSING)));
        assert!(xml.contains(&format!("<Say voice=\"alice\">{}</Say>", VOICE_OPENING)));
    }

    #[test]
    fn test_webhook_fields_deserialize() {
        let hook: SmsWebhook =
            serde_json::from_str(r#"{"From": "+15550001111", "Body": "Hello"}"#).unwrap();
        assert_eq!(hook.from.as_deref(), Some("+15550001111"));
        assert_eq!(hook.body, "Hello");
        let voice: VoiceWebhook = serde_json::from_str(r#"{"SpeechResult": "Help me"}"#).unwrap();
        assert_eq!(voice.speech_result.as_deref(), Some("Help me"));
    }

    #[tokio::test]
    async fn test_sms_roundtrip_through_service() {
        let svc = chat_service();
        let adapter = TwilioAdapter::new(&svc);
        let xml = adapter
            .sms(&SmsWebhook {
                from: Some("+15550001111".into()),
                body: "I love you".into(),
            })
            .await;
        assert!(xml.contains("<Message>"));
        assert_eq!(svc.history("+15550001111").await.len(), 1);
    }

    #[tokio::test]
    async fn test_voice_without_speech_opens_call() {
        let svc = chat_service();
        let adapter = TwilioAdapter::new(&svc);
        let xml = adapter
            .voice(&VoiceWebhook {
                from: None,
                speech_result: Some("  ".into()),
            })
            .await;
        assert!(xml.contains(VOICE_OPENING));
        assert_eq!(svc.stats().await.total_messages, 0);
    }

    #[test]
    fn test_apology_document_is_wellformed() {
        let voice = apology_document("Say");
        assert!(voice.contains(&format!("<Say voice=\"alice\">{}</Say>", VOICE_APOLOGY)));
        let sms = apology_document("Message");
        assert!(sms.contains(&format!("<Message>{}</Message>", APOLOGY)));
        assert_ne!(APOLOGY, VOICE_APOLOGY);
    }
}
