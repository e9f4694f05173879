// ABOUTME: LLM provider abstraction for the coaching gateway
// ABOUTME: Defines chat message types, the provider contract and the OpenAI/Claude/Gemini adapters
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 HälsoPartner AI

//! # LLM Provider Interface
//!
//! Each upstream vendor is an adapter that knows two things: how to build its
//! wire request from a [`ChatRequest`] and how to pull the reply text out of
//! its response body. [`ChatProvider`] is the tagged variant the gateway
//! dispatches through, and [`selector`] decides which variant a request uses.
//!
//! ## Example
//!
//! ```rust,no_run
//! use boris_coach::llm::{ChatMessage, ChatRequest, LlmProvider};
//!
//! async fn example(provider: &dyn LlmProvider) {
//!     let request = ChatRequest::new(vec![
//!         ChatMessage::system("Du är en hälsocoach."),
//!         ChatMessage::user("Hur många steg borde jag gå?"),
//!     ]);
//!     let response = provider.complete(&request).await;
//! }
//! ```

mod claude;
mod gemini;
mod openai;
pub mod prompts;
mod provider;
pub mod selector;
mod transport;

pub use claude::{
    ClaudeProvider, DEFAULT_BASE_URL as CLAUDE_DEFAULT_BASE_URL,
    DEFAULT_MODEL as CLAUDE_DEFAULT_MODEL,
};
pub use gemini::{
    GeminiProvider, DEFAULT_BASE_URL as GEMINI_DEFAULT_BASE_URL,
    DEFAULT_MODEL as GEMINI_DEFAULT_MODEL,
};
pub use openai::{
    OpenAiProvider, DEFAULT_BASE_URL as OPENAI_DEFAULT_BASE_URL,
    DEFAULT_MODEL as OPENAI_DEFAULT_MODEL,
};
pub use prompts::Persona;
pub use provider::{ChatProvider, ProviderSettings};
pub use selector::{select_provider, ProviderKind, SelectedProvider};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use boris_core::errors::AppError;

// ============================================================================
// Message Types
// ============================================================================

/// Role of a message in the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System instruction message
    System,
    /// User input message
    User,
}

impl MessageRole {
    /// Convert to string representation for API calls
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
        }
    }
}

/// A single message in a chat conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message sender
    pub role: MessageRole,
    /// Content of the message
    pub content: String,
}

impl ChatMessage {
    /// Create a new chat message
    #[must_use]
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Create a system message
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    /// Create a user message
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Messages for one completion; model and limits come from [`ProviderSettings`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Conversation messages
    pub messages: Vec<ChatMessage>,
}

impl ChatRequest {
    /// Create a new chat request with messages
    #[must_use]
    pub const fn new(messages: Vec<ChatMessage>) -> Self {
        Self { messages }
    }

    /// Concatenated system instructions, if any
    #[must_use]
    pub fn system_prompt(&self) -> Option<String> {
        let parts: Vec<&str> = self
            .messages
            .iter()
            .filter(|m| m.role == MessageRole::System)
            .map(|m| m.content.as_str())
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join("\n\n"))
        }
    }

    /// Messages excluding system instructions
    pub fn conversation(&self) -> impl Iterator<Item = &ChatMessage> {
        self.messages
            .iter()
            .filter(|m| m.role != MessageRole::System)
    }
}

/// Response from a chat completion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Generated message content
    pub content: String,
    /// Model used for generation
    pub model: String,
    /// Token usage statistics, when the vendor reports them
    pub usage: Option<TokenUsage>,
}

/// Token usage statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Number of tokens in the prompt
    pub prompt_tokens: u32,
    /// Number of tokens in the completion
    pub completion_tokens: u32,
    /// Total tokens used
    pub total_tokens: u32,
}

// ============================================================================
// Provider Trait
// ============================================================================

/// LLM provider trait for chat completion
///
/// One call to [`LlmProvider::complete`] is exactly one upstream HTTP request.
/// Implementations never retry and never fall back to another vendor.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Unique provider identifier ("openai", "claude", "gemini")
    fn name(&self) -> &'static str;

    /// Model every request is sent to
    fn default_model(&self) -> &str;

    /// Perform a chat completion
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_and_conversation_split() {
        let request = ChatRequest::new(vec![
            ChatMessage::system("persona"),
            ChatMessage::user("question"),
        ]);

        assert_eq!(request.system_prompt().as_deref(), Some("persona"));
        let conversation: Vec<_> = request.conversation().collect();
        assert_eq!(conversation.len(), 1);
        assert_eq!(conversation[0].role, MessageRole::User);
    }

    #[test]
    fn test_no_system_prompt() {
        let request = ChatRequest::new(vec![ChatMessage::user("hej")]);
        assert!(request.system_prompt().is_none());
    }
}
