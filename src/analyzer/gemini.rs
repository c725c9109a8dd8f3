//! Gemini API連携（reqwest）
//!
//! `VisionModel` ポートのネイティブ実装。リトライ・タイムアウトは付けない。

use ecowaste_common::analysis::{AnalysisRequest, ModelError, VisionModel};
use ecowaste_common::gemini::{endpoint_url, GeminiRequest, GeminiResponse};
use reqwest::Client;

#[derive(Debug, Clone)]
pub struct GeminiClient {
    api_key: Option<String>,
    model: String,
    base_url: String,
    client: Client,
}

impl GeminiClient {
    /// キーは未設定でも作れる。呼び出し時に `MissingApiKey` になる
    pub fn new(api_key: Option<String>, model: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key,
            model: model.into(),
            base_url: base_url.into(),
            client: Client::new(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    async fn call_gemini_api(&self, request: &GeminiRequest) -> Result<String, ModelError> {
        let api_key = self.api_key.as_deref().ok_or(ModelError::MissingApiKey)?;
        let url = endpoint_url(&self.base_url, &self.model);

        tracing::debug!(model = %self.model, "calling Gemini generateContent");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Gemini API request failed: {}", e);
                ModelError::Transport(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Gemini API error: {} - {}", status, body);
            return Err(ModelError::Status { status: status.as_u16(), body });
        }

        let payload: GeminiResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to decode Gemini response: {}", e);
            ModelError::Decode(e.to_string())
        })?;

        // 空応答は空文字列で返し、判定はパーサーに任せる
        Ok(payload.first_text().unwrap_or_default())
    }
}

impl VisionModel for GeminiClient {
    async fn generate(&self, request: &AnalysisRequest) -> Result<String, ModelError> {
        let body = GeminiRequest::from_analysis(request);
        self.call_gemini_api(&body).await
    }
}
