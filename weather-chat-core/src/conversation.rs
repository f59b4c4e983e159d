use serde::{Deserialize, Serialize};

use crate::model::{Reply, Role, Turn};

pub const GREETING: &str =
    "Hai! Tanyakan saja cuaca, misalnya 'cuaca di Jakarta' atau 'perkiraan 5 hari di Bandung'.";

/// Per-session chat state. Each session owns its own instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationState {
    transcript: Vec<Turn>,
    /// Resolved cities, most recent last.
    city_history: Vec<String>,
}

impl ConversationState {
    /// New session, seeded with the assistant greeting.
    pub fn new() -> Self {
        Self {
            transcript: vec![Turn {
                role: Role::Assistant,
                reply: Reply::text(GREETING),
            }],
            city_history: Vec::new(),
        }
    }

    pub fn transcript(&self) -> &[Turn] {
        &self.transcript
    }

    pub fn city_history(&self) -> &[String] {
        &self.city_history
    }

    pub fn last_city(&self) -> Option<&str> {
        self.city_history.last().map(String::as_str)
    }

    pub fn push_city(&mut self, city: String) {
        self.city_history.push(city);
    }

    pub fn push_user(&mut self, text: &str) {
        self.transcript.push(Turn {
            role: Role::User,
            reply: Reply::text(text),
        });
    }

    pub fn push_assistant(&mut self, reply: Reply) {
        self.transcript.push(Turn {
            role: Role::Assistant,
            reply,
        });
    }
}

impl Default for ConversationState {
    fn default() -> Self {
        Self::new()
    }
}
