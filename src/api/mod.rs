//! HTTP contract with the weather agent service.
//!
//! The service is an opaque collaborator: one `POST /chat` round-trip per
//! submission, no streaming, no negotiation. [`AgentClient`] is the seam
//! the chat loop talks through so tests can substitute a scripted agent.

pub mod models;

use async_trait::async_trait;
use tracing::debug;

use crate::api::models::{ChatRequest, ChatResponse};
use crate::utils::url::construct_api_url;

pub type AgentError = Box<dyn std::error::Error + Send + Sync>;

/// One question/answer exchange with the agent service.
#[async_trait]
pub trait AgentClient: Send + Sync {
    async fn ask(&self, query: &str, session_id: &str) -> Result<ChatResponse, AgentError>;
}

/// Reqwest-backed client for the real service.
pub struct HttpAgentClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAgentClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl AgentClient for HttpAgentClient {
    async fn ask(&self, query: &str, session_id: &str) -> Result<ChatResponse, AgentError> {
        let url = construct_api_url(&self.base_url, "chat");
        let request = ChatRequest {
            query: query.to_string(),
            session_id: session_id.to_string(),
        };

        debug!(url = %url, session_id, "sending chat request");

        let response = self.client.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(format!("Agent request failed with status {status}: {error_text}").into());
        }

        let chat_response = response.json::<ChatResponse>().await?;
        debug!(
            has_response = chat_response.response.is_some(),
            "chat request completed"
        );
        Ok(chat_response)
    }
}
