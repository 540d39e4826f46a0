use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::config::Settings;
use crate::state::data::{GeneratedImage, GenerationOutcome, GenerationRequest};

#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("no API key configured (set GEMINI_API_KEY)")]
    MissingApiKey,
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("status={status} body={body}")]
    Status { status: u16, body: String },
    #[error("parse error: {0}")]
    Parse(String),
    #[error("no image data in response ({0})")]
    NoImage(String),
}

// Helper function to truncate base64 data in JSON for cleaner logging
fn truncate_base64_in_json(value: &mut serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            for (key, val) in map.iter_mut() {
                if key == "data" {
                    if let serde_json::Value::String(s) = val {
                        let len = s.chars().count();
                        if len > 100 {
                            let head: String = s.chars().take(50).collect();
                            *val = serde_json::Value::String(format!(
                                "{}...[truncated {} chars]",
                                head,
                                len - 50
                            ));
                        }
                    }
                } else {
                    truncate_base64_in_json(val);
                }
            }
        }
        serde_json::Value::Array(arr) => {
            for val in arr.iter_mut() {
                truncate_base64_in_json(val);
            }
        }
        _ => {}
    }
}

fn loggable(value: &serde_json::Value) -> String {
    let mut copy = value.clone();
    truncate_base64_in_json(&mut copy);
    serde_json::to_string_pretty(&copy).unwrap_or_default()
}

/// Client for the Gemini image model. One `invoke` is one outbound call.
pub struct GeminiClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl GeminiClient {
    pub fn new(settings: &Settings) -> Self {
        Self {
            client: Client::new(),
            api_key: settings.api_key.clone(),
            base_url: settings.api_base.clone(),
            model: settings.image_model.clone(),
        }
    }

    /// Run one generation and collapse every failure into `Failure`
    pub async fn invoke(&self, request: GenerationRequest) -> GenerationOutcome {
        match self.generate(&request).await {
            Ok(image) => {
                info!(
                    "✅ Generated {} image ({} base64 chars)",
                    image.mime_type,
                    image.base64.len()
                );
                GenerationOutcome::Success(image)
            }
            Err(e) => {
                error!("❌ Failed to generate image: {}", e);
                GenerationOutcome::Failure(e.to_string())
            }
        }
    }

    pub async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedImage, GeminiError> {
        let api_key = self.api_key.as_deref().ok_or(GeminiError::MissingApiKey)?;
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, api_key
        );
        info!("🔗 Making request to: {}", url.replace(api_key, "***"));

        let prompt = build_prompt(request);
        let body = build_request_body(request, &prompt);
        debug!("📤 Request body: {}", loggable(&body));

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| GeminiError::Http(e.to_string()))?;

        let status = response.status();
        info!("📥 Response status: {}", status);

        let response_text = response
            .text()
            .await
            .map_err(|e| GeminiError::Http(e.to_string()))?;

        if !status.is_success() {
            error!("❌ API Error response: {}", response_text);
            return Err(GeminiError::Status {
                status: status.as_u16(),
                body: response_text,
            });
        }

        parse_response(&response_text)
    }
}

/// Instruction text sent alongside the venue photo. Empty fields are left out.
pub fn build_prompt(request: &GenerationRequest) -> String {
    let mut prompt = format!(
        "Transform this photo of an empty venue into a fully decorated {}.",
        request.event_type
    );

    let theme = request.theme.trim();
    if !theme.is_empty() {
        prompt.push_str(&format!(" Theme and style: {}.", theme));
    }
    let palette = request.color_palette.trim();
    if !palette.is_empty() {
        prompt.push_str(&format!(" Color palette: {}.", palette));
    }
    let notes = request.additional_notes.trim();
    if !notes.is_empty() {
        prompt.push_str(&format!(" Additional requirements: {}.", notes));
    }

    prompt.push_str(
        " Keep the room's architecture, perspective and camera angle exactly as in the original photo. \
        Add furniture, table settings, florals, drapery, lighting and staging that suit the event. \
        Produce a single photorealistic image with no text overlays.",
    );
    prompt
}

pub fn build_request_body(request: &GenerationRequest, prompt: &str) -> serde_json::Value {
    json!({
        "contents": [{
            "parts": [
                {
                    "inlineData": {
                        "mimeType": request.image.mime_type,
                        "data": request.image.base64
                    }
                },
                {"text": prompt}
            ]
        }],
        "generationConfig": {
            "responseModalities": ["TEXT", "IMAGE"],
            "candidateCount": 1
        }
    })
}

// --- Response Parsing Helpers ---

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Content,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Part {
    Inline {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
    Text {
        text: String,
    },
    #[allow(dead_code)]
    Other(serde_json::Value),
}

#[derive(Debug, Deserialize)]
struct InlineData {
    data: String,
    #[serde(rename = "mimeType")]
    mime_type: String,
}

fn parse_response(response_text: &str) -> Result<GeneratedImage, GeminiError> {
    let parsed: GeminiResponse =
        serde_json::from_str(response_text).map_err(|e| GeminiError::Parse(e.to_string()))?;

    if let Some(image) = extract_first_image(&parsed) {
        return Ok(image);
    }
    Err(GeminiError::NoImage(missing_image_reason(&parsed)))
}

fn extract_first_image(resp: &GeminiResponse) -> Option<GeneratedImage> {
    for c in &resp.candidates {
        for p in &c.content.parts {
            if let Part::Inline { inline_data } = p {
                info!("🎯 Found image data with mime type: {}", inline_data.mime_type);
                return Some(GeneratedImage {
                    mime_type: inline_data.mime_type.clone(),
                    base64: inline_data.data.clone(),
                });
            }
        }
    }
    None
}

/// Best explanation for a response that carried no image
fn missing_image_reason(resp: &GeminiResponse) -> String {
    if let Some(reason) = resp
        .prompt_feedback
        .as_ref()
        .and_then(|f| f.block_reason.as_deref())
    {
        return format!("prompt blocked: {}", reason);
    }

    for c in &resp.candidates {
        if let Some(reason) = c.finish_reason.as_deref().filter(|r| *r != "STOP") {
            return format!("finish reason: {}", reason);
        }
        for p in &c.content.parts {
            if let Part::Text { text } = p {
                return format!("model replied with text: {}", text.trim());
            }
        }
    }

    if resp.candidates.is_empty() {
        "no candidates".to_string()
    } else {
        "no inline image part".to_string()
    }
}
