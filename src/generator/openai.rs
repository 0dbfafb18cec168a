// src/generator/openai.rs
//! OpenAI-compatible chat-completions client.

use super::DocGenerator;
use crate::config::GenerationConfig;
use crate::error::GenerationError;
use crate::item::Item;
use crate::prompt::SYSTEM_INSTRUCTION;
use serde::{Deserialize, Serialize};

pub struct OpenAiClient {
    agent: ureq::Agent,
    endpoint: String,
    api_key: String,
    model: String,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

impl OpenAiClient {
    /// Builds a client, or `None` when no API key is configured.
    #[must_use]
    pub fn from_config(config: &GenerationConfig) -> Option<Self> {
        let api_key = config.api_key.clone()?;
        let agent = ureq::AgentBuilder::new().timeout(config.timeout()).build();
        Some(Self {
            agent,
            endpoint: config.endpoint(),
            api_key,
            model: config.model.clone(),
            temperature: config.temperature,
        })
    }
}

impl DocGenerator for OpenAiClient {
    fn generate(&self, _item: &Item, prompt: &str) -> Result<String, GenerationError> {
        let request = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_INSTRUCTION,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: self.temperature,
        };

        let response = self
            .agent
            .post(&self.endpoint)
            .set("Authorization", &format!("Bearer {}", self.api_key))
            .send_json(&request)
            .map_err(|e| match e {
                ureq::Error::Status(code, _) => GenerationError::Status(code),
                ureq::Error::Transport(t) => GenerationError::Transport(t.to_string()),
            })?;

        let body: ChatResponse = response
            .into_json()
            .map_err(|e| GenerationError::MalformedResponse(e.to_string()))?;

        body.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| {
                GenerationError::MalformedResponse("missing choices[0].message.content".into())
            })
    }
}
