//! Wire types for the carbon chat API.
//!
//! The chat surface exchanges two JSON shapes: [`ChatRequest`] inbound and
//! [`ChatReply`] outbound. The reply always carries a `reply` string, even on
//! failure, so the conversational UI never has to special-case an empty body.

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Inbound chat request.
///
/// `message` is required; everything else is optional. An unknown
/// `active_scenario_id` falls back to the baseline scenario server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_scenario_id: Option<String>,
    /// Free-form category hint. Passed through to the answering engine
    /// verbatim, without validation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    /// When set, the catch-all context slice also includes the raw IFC
    /// fixture and the write-back mapping.
    #[serde(default)]
    pub debug: bool,
}

impl ChatRequest {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            active_scenario_id: None,
            category_id: None,
            debug: false,
        }
    }
}

/// Outbound chat reply. On failure `reply` holds a human-readable error
/// message prefixed with an error indicator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
}

impl ChatReply {
    #[must_use]
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
        }
    }
}

/// Structured error payload attached to non-chat endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorEnvelope {
    #[must_use]
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            hint: None,
        }
    }

    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

pub fn serialize_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

pub fn serialize_json_pretty<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
