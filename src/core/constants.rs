//! Fixed strings of the chat contract, shared across the application.

/// Agent endpoint used when neither the CLI nor the config file names one.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000";

/// Session identifier sent with every request unless overridden at startup.
pub const DEFAULT_SESSION_ID: &str = "default-session";

/// Agent text substituted when a successful reply carries no `response` field.
pub const FALLBACK_REPLY: &str = "Sorry, no response.";

/// Agent text substituted when the request fails for any reason.
pub const ERROR_REPLY: &str = "Error: Could not get response from server.";

/// Transient indicator shown as the newest entry while a reply is pending.
pub const TYPING_INDICATOR: &str = "Agent is typing...";
