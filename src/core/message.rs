use serde::{Deserialize, Serialize};

/// Originator of a transcript entry.
///
/// The wire forms are stable: `"user"` and `"agent"` are what transcript
/// log files record and what any future export format would carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Agent,
}

impl Sender {
    pub fn as_str(self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Agent => "agent",
        }
    }

    pub fn is_user(self) -> bool {
        self == Sender::User
    }

    pub fn is_agent(self) -> bool {
        self == Sender::Agent
    }

    /// Label used when a transcript entry is written to a log file.
    pub fn display_label(self) -> &'static str {
        match self {
            Sender::User => "You",
            Sender::Agent => "Agent",
        }
    }
}

impl AsRef<str> for Sender {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl TryFrom<&str> for Sender {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "user" => Ok(Sender::User),
            "agent" => Ok(Sender::Agent),
            _ => Err(format!("invalid sender: {value}")),
        }
    }
}

/// One immutable transcript entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub sender: Sender,
    pub text: String,
}

impl Message {
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            sender,
            text: text.into(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text)
    }

    pub fn agent(text: impl Into<String>) -> Self {
        Self::new(Sender::Agent, text)
    }

    pub fn is_user(&self) -> bool {
        self.sender.is_user()
    }

    pub fn is_agent(&self) -> bool {
        self.sender.is_agent()
    }
}
