// ABOUTME: Persona system prompt and user-content rendering for coaching requests
// ABOUTME: Loads the Boris persona at compile time, optionally overridden from a file
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 HälsoPartner AI

//! # System Prompts
//!
//! The persona prompt is sent unmodified as its own message on every provider
//! call. User text is rendered separately by [`render_user_content`] and never
//! concatenated into the persona.

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use boris_core::errors::{AppError, AppResult};
use boris_core::models::HealthContext;

/// Boris health-coach persona, speaking Swedish in the third person
pub const BORIS_SYSTEM_PROMPT: &str = include_str!("boris_system.md");

/// Label in front of the serialized health context
pub const CONTEXT_LABEL: &str = "Kontext";

/// Label in front of the user's question when context is present
pub const QUESTION_LABEL: &str = "Fråga";

/// Persona instructions sent as the system part of every coaching call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Persona {
    system_prompt: Cow<'static, str>,
}

impl Default for Persona {
    fn default() -> Self {
        Self::boris()
    }
}

impl Persona {
    /// The built-in Boris persona
    #[must_use]
    pub const fn boris() -> Self {
        Self {
            system_prompt: Cow::Borrowed(BORIS_SYSTEM_PROMPT),
        }
    }

    /// Persona with caller-supplied instructions
    #[must_use]
    pub fn custom(system_prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: Cow::Owned(system_prompt.into()),
        }
    }

    /// Load the persona from `path`, or fall back to Boris when no path is configured
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the file cannot be read or is empty.
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let Some(path) = path else {
            return Ok(Self::boris());
        };

        let prompt = fs::read_to_string(path).map_err(|e| {
            AppError::config(format!(
                "Failed to read persona prompt {}: {e}",
                path.display()
            ))
        })?;

        if prompt.trim().is_empty() {
            return Err(AppError::config(format!(
                "Persona prompt {} is empty",
                path.display()
            )));
        }

        Ok(Self::custom(prompt))
    }

    /// Persona text exactly as it is sent upstream
    #[must_use]
    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }
}

/// Render the user part of a coaching prompt
///
/// With context: `Kontext: {json}\n\nFråga: {message}`. Without context the
/// message is passed through as-is.
///
/// # Errors
///
/// Returns a serialization error if the context cannot be encoded as JSON.
pub fn render_user_content(message: &str, context: Option<&HealthContext>) -> AppResult<String> {
    match context {
        Some(context) => {
            let json = serde_json::to_string(context)?;
            Ok(format!(
                "{CONTEXT_LABEL}: {json}\n\n{QUESTION_LABEL}: {message}"
            ))
        }
        None => Ok(message.to_owned()),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::io::Write;

    use boris_core::errors::ErrorCode;

    use super::*;

    #[test]
    fn test_message_without_context_is_raw() {
        let content = render_user_content("Vad ska jag äta?", None).unwrap();
        assert_eq!(content, "Vad ska jag äta?");
    }

    #[test]
    fn test_context_is_labelled_and_compact() {
        let context = HealthContext {
            weight: Some(82.5),
            steps: Some(6400),
            ..HealthContext::default()
        };

        let content = render_user_content("Hur går det?", Some(&context)).unwrap();

        assert_eq!(
            content,
            "Kontext: {\"weight\":82.5,\"steps\":6400}\n\nFråga: Hur går det?"
        );
    }

    #[test]
    fn test_persona_defaults_to_boris() {
        let persona = Persona::load(None).unwrap();
        assert_eq!(persona.system_prompt(), BORIS_SYSTEM_PROMPT);
        assert!(persona.system_prompt().contains("Boris"));
    }

    #[test]
    fn test_persona_loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "You are a calm running coach.").unwrap();

        let persona = Persona::load(Some(file.path())).unwrap();

        assert_eq!(persona.system_prompt(), "You are a calm running coach.");
    }

    #[test]
    fn test_missing_persona_file_is_config_error() {
        let err = Persona::load(Some(Path::new("/nonexistent/persona.md"))).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigInvalid);
    }
}
