//! Remote packaging scorer over an OpenAI-style Responses API.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde_json::{Value, json};
use tracing::{debug, instrument};

use crate::analysis_pipeline::common::error::{AnalysisError, Result};
use crate::analysis_pipeline::loader::types::{ImageFormatKind, ImageSource, data_url};
use crate::analysis_pipeline::scoring::config::ScoringConfig;
use crate::analysis_pipeline::scoring::schema::PackagingAnalysisSchema;
use crate::analysis_pipeline::scoring::scorer::ScoringAdapter;
use crate::analysis_pipeline::scoring::types::ScoreSet;

const SYSTEM_PROMPT: &str = "\
You are a packaging design expert. Your goal is to evaluate consumer product packaging and provide actionable insights.

Evaluate the packaging based on:
- Attention attraction (scoring 1-10)
- Color impact (scoring 1-10)
- Text readability (scoring 1-10)
- Brand visibility (scoring 1-10)

Consider factors such as visual hierarchy, color psychology, typography effectiveness, and brand prominence.

Provide specific improvement suggestions that would measurably increase the package's effectiveness.";

const USER_PROMPT: &str = "Analyze this packaging design and provide an expert evaluation.";

pub struct VisionScoringClient {
    http: reqwest::Client,
    config: ScoringConfig,
}

impl VisionScoringClient {
    pub fn new(config: ScoringConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AnalysisError::Scoring(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// The image as something the remote model can fetch: remote URLs pass
    /// through, everything else is inlined as a base64 `data:` URL.
    async fn image_url(&self, source: &ImageSource) -> Result<String> {
        match source {
            ImageSource::Url(url) => Ok(url.clone()),
            ImageSource::Bytes { data, mime } => {
                let mime = match mime {
                    Some(m) => m.clone(),
                    None => ImageFormatKind::detect(data)
                        .map(|k| k.mime().to_string())
                        .map_err(|e| AnalysisError::Scoring(e.to_string()))?,
                };
                Ok(data_url(&mime, data))
            }
            ImageSource::Path(path) => {
                let data = tokio::fs::read(path)
                    .await
                    .map_err(|e| AnalysisError::Scoring(format!("{}: {}", path.display(), e)))?;
                let kind = ImageFormatKind::detect(&data)
                    .map_err(|e| AnalysisError::Scoring(e.to_string()))?;
                Ok(data_url(kind.mime(), &data))
            }
        }
    }

    pub fn build_request(&self, image_url: &str) -> Value {
        json!({
            "model": self.config.model,
            "reasoning": {
                "effort": self.config.reasoning_effort,
                "summary": "auto",
            },
            "input": [
                {
                    "role": "system",
                    "content": [{ "type": "input_text", "text": SYSTEM_PROMPT }],
                },
                {
                    "role": "user",
                    "content": [
                        { "type": "input_text", "text": USER_PROMPT },
                        { "type": "input_image", "image_url": image_url },
                    ],
                },
            ],
            "text": {
                "format": {
                    "type": "json_schema",
                    "name": PackagingAnalysisSchema::NAME,
                    "schema": PackagingAnalysisSchema::json_schema(),
                    "strict": true,
                },
            },
        })
    }
}

/// Pulls the structured-output text out of a Responses API body.
pub fn extract_output_text(body: &Value) -> Result<String> {
    if let Some(text) = body.get("output_text").and_then(Value::as_str) {
        return Ok(text.to_string());
    }

    let output = body
        .get("output")
        .and_then(Value::as_array)
        .ok_or_else(|| AnalysisError::Scoring("response has no output".to_string()))?;

    for item in output.iter().filter(|i| i["type"] == "message") {
        let Some(content) = item.get("content").and_then(Value::as_array) else {
            continue;
        };
        for part in content {
            match part["type"].as_str() {
                Some("output_text") => {
                    if let Some(text) = part["text"].as_str() {
                        return Ok(text.to_string());
                    }
                }
                Some("refusal") => {
                    return Err(AnalysisError::Scoring(format!(
                        "model refused: {}",
                        part["refusal"].as_str().unwrap_or("no reason given")
                    )));
                }
                _ => {}
            }
        }
    }

    Err(AnalysisError::Scoring(
        "response contains no output text".to_string(),
    ))
}

impl ScoringAdapter for VisionScoringClient {
    #[instrument(skip(self, image), fields(model = %self.config.model))]
    async fn score(&self, image: &ImageSource) -> Result<ScoreSet> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| AnalysisError::Scoring("no API key configured".to_string()))?;

        let image_url = self.image_url(image).await?;
        let request = self.build_request(&image_url);
        let endpoint = format!("{}/responses", self.config.base_url.trim_end_matches('/'));
        debug!(endpoint = %endpoint, "Requesting packaging analysis");

        let response = self
            .http
            .post(&endpoint)
            .header(AUTHORIZATION, format!("Bearer {}", api_key))
            .header(CONTENT_TYPE, "application/json")
            .json(&request)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| AnalysisError::Scoring(e.to_string()))?;

        let body: Value = response
            .json()
            .await
            .map_err(|e| AnalysisError::Scoring(format!("invalid response body: {}", e)))?;

        let text = extract_output_text(&body)?;
        PackagingAnalysisSchema::validate(&text)
    }
}
