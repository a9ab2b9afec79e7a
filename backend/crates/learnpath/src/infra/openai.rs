//! Completion-service content source (OpenAI-compatible chat completions).

use std::fmt;
use std::time::Duration;

use reqwest::Client;
use serde_json::{Value, json};

use crate::domain::entities::Curriculum;
use crate::domain::repository::CurriculumGenerator;
use crate::domain::services::validate_curriculum;
use crate::domain::value_objects::{Refinement, Topic};
use crate::error::GenerationError;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

const SYSTEM_PROMPT: &str = "You are an expert educational curriculum designer. You respond only with valid JSON objects, no additional text.";
const REFINE_SYSTEM_SUFFIX: &str =
    " You excel at refining and improving learning paths based on user feedback.";

const RESPONSE_SHAPE: &str = r#"Return ONLY a valid JSON object with this exact structure:
{
  "modules": [
    {
      "title": "Module Title",
      "lessons": [
        {
          "title": "Lesson Title",
          "summary": "A 1-2 sentence summary of what this lesson covers."
        }
      ]
    }
  ]
}"#;

#[derive(Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
    /// Whole-request timeout for one completion call.
    pub timeout: Duration,
}

impl OpenAiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            temperature: 0.7,
            timeout: Duration::from_secs(60),
        }
    }
}

impl fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("temperature", &self.temperature)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct OpenAiCurriculumGenerator {
    http_client: Client,
    config: OpenAiConfig,
}

impl OpenAiCurriculumGenerator {
    pub fn new(config: OpenAiConfig) -> Result<Self, GenerationError> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        Ok(Self {
            http_client,
            config,
        })
    }

    async fn complete(&self, system: &str, prompt: &str) -> Result<Curriculum, GenerationError> {
        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );
        let request_body = json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": prompt },
            ],
            "temperature": self.config.temperature,
            "response_format": { "type": "json_object" },
        });

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let response_json: Value = response
            .json()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        parse_completion(&response_json)
    }
}

pub fn generation_prompt(topic: &Topic) -> String {
    format!(
        r#"You are an expert educational curriculum designer. Create a comprehensive learning path for the topic: "{topic}".

Requirements:
- Generate 4-7 modules, ordered from basic to advanced
- Each module should have a clear title
- Each module must contain exactly 3-5 lessons
- Each lesson must have a title and a 1-2 sentence summary
- Structure the content progressively, building on previous concepts
- Make it practical and actionable

{RESPONSE_SHAPE}"#
    )
}

pub fn refinement_prompt(topic: &Topic, previous: &Curriculum, feedback: &Refinement) -> String {
    let previous_json = serde_json::to_string_pretty(previous).unwrap_or_default();
    format!(
        r#"You are an expert educational curriculum designer. You previously created a learning path for "{topic}".

The user wants to refine it with this instruction: "{feedback}"

Previous learning path:
{previous_json}

Create an improved learning path that addresses the user's refinement request while maintaining:
- 4-7 modules, ordered from basic to advanced
- Each module with 3-5 lessons
- Each lesson with a title and 1-2 sentence summary
- Progressive structure building on concepts
- Practical and actionable content

Apply the refinement thoughtfully - this may mean:
- Adding new modules or lessons
- Reorganizing content
- Changing the focus or difficulty level
- Adding more examples or practical elements
- Whatever else the user requested

{RESPONSE_SHAPE}"#,
        feedback = feedback.as_str(),
    )
}

/// Extracts, parses and validates the curriculum in a chat completion body.
pub fn parse_completion(response: &Value) -> Result<Curriculum, GenerationError> {
    let content = response["choices"][0]["message"]["content"]
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(GenerationError::EmptyResponse)?;

    let document: Value = serde_json::from_str(content).map_err(GenerationError::InvalidJson)?;
    let curriculum = serde_json::from_value::<Curriculum>(document)
        .map_err(|e| GenerationError::UnexpectedShape(e.to_string()))?
        .normalized();

    validate_curriculum(&curriculum).map_err(GenerationError::InvalidStructure)?;
    Ok(curriculum)
}

impl CurriculumGenerator for OpenAiCurriculumGenerator {
    async fn generate(&self, topic: &Topic) -> Result<Curriculum, GenerationError> {
        tracing::debug!(topic = %topic, model = %self.config.model, "Requesting curriculum");
        self.complete(SYSTEM_PROMPT, &generation_prompt(topic)).await
    }

    async fn refine(
        &self,
        topic: &Topic,
        previous: &Curriculum,
        feedback: &Refinement,
    ) -> Result<Curriculum, GenerationError> {
        tracing::debug!(topic = %topic, model = %self.config.model, "Requesting refinement");
        let system = format!("{SYSTEM_PROMPT}{REFINE_SYSTEM_SUFFIX}");
        self.complete(&system, &refinement_prompt(topic, previous, feedback))
            .await
    }
}
