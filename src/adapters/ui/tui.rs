//! Implements InputPort. Inquire-based interactive prompts.
//!
//! Main menu: chat, scripture by topic, prayer submission, history, statistics.

use crate::domain::{Category, ConversationStats, DomainError, PrayerRequest};
use crate::ports::InputPort;
use crate::usecases::ChatService;
use async_trait::async_trait;
use inquire::error::InquireError;
use inquire::ui::{Color, RenderConfig, Styled};
use inquire::{Confirm, Select, Text};
use std::fmt;
use std::sync::Arc;

/// Typed in chat mode to return to the menu.
const BACK_COMMAND: &str = "/menu";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuItem {
    Chat,
    Scripture,
    Prayer,
    History,
    Stats,
    Quit,
}

impl MenuItem {
    const ALL: [MenuItem; 6] = [
        MenuItem::Chat,
        MenuItem::Scripture,
        MenuItem::Prayer,
        MenuItem::History,
        MenuItem::Stats,
        MenuItem::Quit,
    ];
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MenuItem::Chat => "Chat",
            MenuItem::Scripture => "Scripture by topic",
            MenuItem::Prayer => "Submit a prayer",
            MenuItem::History => "Conversation history",
            MenuItem::Stats => "Statistics",
            MenuItem::Quit => "Quit",
        })
    }
}

/// Applies the prompt theme for all subsequent inquire prompts.
pub fn apply_theme() {
    let config = RenderConfig::default_colored()
        .with_prompt_prefix(Styled::new("✝").with_fg(Color::LightYellow))
        .with_answered_prompt_prefix(Styled::new("✓").with_fg(Color::LightYellow));
    inquire::set_global_render_config(config);
}

/// Esc returns to the previous level; Ctrl-C ends the session; anything else is a UI error.
enum PromptOutcome<T> {
    Value(T),
    Back,
    Quit,
}

fn outcome<T>(result: Result<T, InquireError>) -> Result<PromptOutcome<T>, DomainError> {
    match result {
        Ok(v) => Ok(PromptOutcome::Value(v)),
        Err(InquireError::OperationCanceled) => Ok(PromptOutcome::Back),
        Err(InquireError::OperationInterrupted) => Ok(PromptOutcome::Quit),
        Err(e) => Err(DomainError::Ui(e.to_string())),
    }
}

fn format_stats(stats: &ConversationStats) -> String {
    let mut out = format!(
        "Messages: {}\nCallers: {}\n",
        stats.total_messages, stats.unique_identifiers
    );
    if !stats.by_category.is_empty() {
        out.push_str("By category:\n");
        for (category, count) in &stats.by_category {
            out.push_str(&format!("  {:<12} {}\n", category, count));
        }
    }
    if !stats.by_source.is_empty() {
        out.push_str("By source:\n");
        for (source, count) in &stats.by_source {
            out.push_str(&format!("  {:<12} {}\n", source, count));
        }
    }
    out
}

/// TUI adapter. One terminal session = one caller identifier.
pub struct TuiInputPort {
    chat: Arc<ChatService>,
    identifier: String,
}

impl TuiInputPort {
    pub fn new(chat: Arc<ChatService>, identifier: impl Into<String>) -> Self {
        Self {
            chat,
            identifier: identifier.into(),
        }
    }

    /// Returns false when the user interrupted the session.
    async fn chat_loop(&self) -> Result<bool, DomainError> {
        println!("Speak your heart. Type {} to return.", BACK_COMMAND);
        loop {
            let line = match outcome(Text::new("You:").prompt())? {
                PromptOutcome::Value(line) => line,
                PromptOutcome::Back => return Ok(true),
                PromptOutcome::Quit => return Ok(false),
            };
            if line.trim() == BACK_COMMAND {
                return Ok(true);
            }
            let reply = self.chat.chat(&self.identifier, &line).await;
            println!("\n{}\n", reply.text);
        }
    }

    fn scripture(&self) -> Result<bool, DomainError> {
        let topic = match outcome(
            Select::new("Choose a topic", Category::SCRIPTURE_TOPICS.to_vec()).prompt(),
        )? {
            PromptOutcome::Value(topic) => topic,
            PromptOutcome::Back => return Ok(true),
            PromptOutcome::Quit => return Ok(false),
        };
        match self.chat.verse(topic) {
            Some(verse) => println!("\n{}\n", verse),
            None => println!("\nNo scripture stored for {}.\n", topic),
        }
        Ok(true)
    }

    async fn prayer(&self) -> Result<bool, DomainError> {
        let text = match outcome(Text::new("Your prayer:").prompt())? {
            PromptOutcome::Value(text) => text,
            PromptOutcome::Back => return Ok(true),
            PromptOutcome::Quit => return Ok(false),
        };
        let is_anonymous = match outcome(
            Confirm::new("Submit anonymously?")
                .with_default(true)
                .prompt(),
        )? {
            PromptOutcome::Value(v) => v,
            PromptOutcome::Back => return Ok(true),
            PromptOutcome::Quit => return Ok(false),
        };
        let name = (!is_anonymous).then(|| self.identifier.clone());

        match self
            .chat
            .submit_prayer(PrayerRequest {
                prayer_text: text,
                name,
                is_anonymous,
            })
            .await
        {
            Ok(receipt) => println!(
                "\n{}\n{}\n(prayer id {})\n",
                receipt.message, receipt.reply, receipt.prayer_id
            ),
            Err(DomainError::Validation(msg)) => println!("\n{}\n", msg),
            Err(e) => return Err(e),
        }
        Ok(true)
    }

    async fn history(&self) {
        let turns = self.chat.history(&self.identifier).await;
        if turns.is_empty() {
            println!("\nNo conversation yet.\n");
            return;
        }
        println!();
        for turn in turns {
            println!(
                "[{}] you: {}\n        reply ({}): {}",
                turn.timestamp.format("%H:%M:%S"),
                turn.text,
                turn.source,
                turn.reply
            );
        }
        println!();
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        loop {
            let item = match outcome(Select::new("What would you like to do?", MenuItem::ALL.to_vec()).prompt())? {
                PromptOutcome::Value(item) => item,
                PromptOutcome::Back | PromptOutcome::Quit => return Ok(()),
            };
            let keep_going = match item {
                MenuItem::Chat => self.chat_loop().await?,
                MenuItem::Scripture => self.scripture()?,
                MenuItem::Prayer => self.prayer().await?,
                MenuItem::History => {
                    self.history().await;
                    true
                }
                MenuItem::Stats => {
                    let stats = self.chat.stats().await;
                    let health = self.chat.health();
                    println!(
                        "\nStatus: {} (provider: {})\n{}",
                        health.status,
                        health.provider,
                        format_stats(&stats)
                    );
                    true
                }
                MenuItem::Quit => false,
            };
            if !keep_going {
                println!("Go in peace.");
                return Ok(());
            }
        }
    }
}
