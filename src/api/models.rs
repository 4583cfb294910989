use serde::{Deserialize, Serialize};

/// Body of `POST /chat`.
#[derive(Serialize, Clone)]
pub struct ChatRequest {
    pub query: String,
    pub session_id: String,
}

/// Successful reply from the agent service. The `response` field is
/// optional on the wire; absence is a valid reply that callers render with
/// fallback text.
#[derive(Deserialize, Debug)]
pub struct ChatResponse {
    #[serde(default)]
    pub response: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_contract_field_names() {
        let request = ChatRequest {
            query: "rain tomorrow?".to_string(),
            session_id: "default-session".to_string(),
        };
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "query": "rain tomorrow?",
                "session_id": "default-session",
            })
        );
    }

    #[test]
    fn response_field_is_read_when_present() {
        let parsed: ChatResponse = serde_json::from_str("{\"response\": \"Sunny, 25C\"}").unwrap();
        assert_eq!(parsed.response.as_deref(), Some("Sunny, 25C"));
    }

    #[test]
    fn empty_object_is_a_valid_response() {
        let parsed: ChatResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.response, None);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let parsed: ChatResponse =
            serde_json::from_str("{\"response\": \"Cloudy\", \"model\": \"x\"}").unwrap();
        assert_eq!(parsed.response.as_deref(), Some("Cloudy"));
    }
}
