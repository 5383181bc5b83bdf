//! Vision/embedding service client
//!
//! The vehicle-condition assessment is delegated to a hosted multimodal
//! model behind an OpenAI-compatible API: one chat call with the photo
//! attached produces the free-text assessment, one embeddings call
//! produces the vector stored for similar-vehicle search. This module
//! only calls the API and parses the result; nothing here does image
//! recognition.

use crate::config::VisionConfig;
use crate::error::{AppError, Result};
use async_trait::async_trait;
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};

const ANALYSIS_PROMPT: &str = "Analyze this vehicle image and provide a detailed assessment \
including the vehicle's condition and recommended detailing services. \
Reply with the description on the first line, the condition on the second line, \
and one recommended service per following line.";

/// Parsed assessment of one vehicle photo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleInsight {
    pub description: String,
    pub condition: String,
    pub recommended_services: Vec<String>,
}

/// Boundary trait so services can be tested against a fake model.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VisionApi: Send + Sync {
    /// Describe the vehicle on the photo and recommend services
    async fn analyze_image(&self, image: &[u8]) -> Result<VehicleInsight>;
    /// Embed assessment text for similarity search
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;
}

/// HTTP client for the hosted vision/embedding API
#[derive(Clone)]
pub struct VisionClient {
    config: VisionConfig,
    http_client: Client,
}

impl VisionClient {
    pub fn new(config: VisionConfig) -> Self {
        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            config,
            http_client,
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: Vec<ContentPart>,
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: AssistantMessage,
}

#[derive(Deserialize)]
struct AssistantMessage {
    content: String,
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

/// Split the model's reply into the stored fields: first line is the
/// description, second the condition, every further non-empty line one
/// recommended service.
fn parse_insight(reply: &str) -> VehicleInsight {
    let mut lines = reply
        .lines()
        .map(|l| l.trim().trim_start_matches("- ").trim())
        .filter(|l| !l.is_empty());

    let description = lines.next().unwrap_or_default().to_string();
    let condition = lines.next().unwrap_or_default().to_string();
    let recommended_services = lines.map(String::from).collect();

    VehicleInsight {
        description,
        condition,
        recommended_services,
    }
}

#[async_trait]
impl VisionApi for VisionClient {
    async fn analyze_image(&self, image: &[u8]) -> Result<VehicleInsight> {
        let base64_image = base64::engine::general_purpose::STANDARD.encode(image);
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: vec![
                    ContentPart::Text {
                        text: ANALYSIS_PROMPT.to_string(),
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: format!("data:image/jpeg;base64,{}", base64_image),
                        },
                    },
                ],
            }],
        };

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.config.api_url))
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::Vision(format!("analysis request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Vision(format!(
                "analysis request returned {}",
                response.status()
            )));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| AppError::Vision(format!("invalid analysis response: {}", e)))?;

        let reply = body
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .ok_or_else(|| AppError::Vision("analysis response had no choices".to_string()))?;

        Ok(parse_insight(reply))
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let request = EmbeddingRequest {
            model: &self.config.embedding_model,
            input: text,
        };

        let response = self
            .http_client
            .post(format!("{}/embeddings", self.config.api_url))
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::Vision(format!("embedding request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Vision(format!(
                "embedding request returned {}",
                response.status()
            )));
        }

        let body: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| AppError::Vision(format!("invalid embedding response: {}", e)))?;

        body.data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| AppError::Vision("embedding response had no data".to_string()))
    }
}
