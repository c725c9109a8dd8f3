//! Gemini generateContent のリクエスト/レスポンス型
//!
//! CLI(reqwest)とWeb(fetch)で同じJSONを送受信する。

use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisRequest;
use crate::prompts::GEMINI_API_BASE;

/// Gemini APIリクエスト
#[derive(Debug, Serialize)]
pub struct GeminiRequest {
    pub contents: Vec<Content>,
    #[serde(rename = "systemInstruction")]
    pub system_instruction: SystemInstruction,
    #[serde(rename = "generationConfig")]
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
pub struct Content {
    pub role: String,
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
pub struct SystemInstruction {
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Serialize)]
pub struct GenerationConfig {
    pub temperature: f32,
    #[serde(rename = "responseMimeType")]
    pub response_mime_type: String,
    #[serde(rename = "responseSchema")]
    pub response_schema: serde_json::Value,
}

impl GeminiRequest {
    /// 解析リクエストを1回分のgenerateContentに変換
    pub fn from_analysis(request: &AnalysisRequest) -> Self {
        Self {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![
                    Part::Text { text: request.user_instruction.clone() },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: request.mime_type.clone(),
                            data: request.image_base64.clone(),
                        },
                    },
                ],
            }],
            system_instruction: SystemInstruction {
                parts: vec![Part::Text { text: request.system_instruction.clone() }],
            },
            generation_config: GenerationConfig {
                temperature: 0.1,
                response_mime_type: "application/json".to_string(),
                response_schema: request.response_schema.clone(),
            },
        }
    }
}

/// Gemini APIレスポンス
///
/// ブロック時などは candidates/parts が欠けるのでデフォルトで受ける。
#[derive(Debug, Default, Deserialize)]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: ResponseContent,
}

#[derive(Debug, Default, Deserialize)]
pub struct ResponseContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ResponsePart {
    #[serde(default)]
    pub text: Option<String>,
}

impl GeminiResponse {
    /// 最初の候補のテキストを連結して返す。空ならNone
    pub fn first_text(&self) -> Option<String> {
        let candidate = self.candidates.first()?;
        let text: String = candidate
            .content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// generateContent エンドポイントURL（キーはヘッダで渡す）
pub fn endpoint_url(base: &str, model: &str) -> String {
    let base = if base.is_empty() { GEMINI_API_BASE } else { base };
    format!("{}/{}:generateContent", base.trim_end_matches('/'), model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::EncodedImage;

    #[test]
    fn test_gemini_request_serialize() {
        let image = EncodedImage::parse("data:image/png;base64,iVBORw0KGgo=").unwrap();
        let request = GeminiRequest::from_analysis(&AnalysisRequest::for_image(&image));

        let json = serde_json::to_string(&request).expect("シリアライズ失敗");
        assert!(json.contains("\"systemInstruction\""));
        assert!(json.contains("\"generationConfig\""));
        assert!(json.contains("\"responseMimeType\":\"application/json\""));
        assert!(json.contains("\"responseSchema\""));
        assert!(json.contains("\"mime_type\":\"image/png\""));
        assert!(json.contains("\"data\":\"iVBORw0KGgo=\""));
        assert!(!json.contains("data:image/png"));
    }

    #[test]
    fn test_part_text_serialize() {
        let part = Part::Text { text: "Hello".to_string() };
        assert_eq!(serde_json::to_string(&part).unwrap(), r#"{"text":"Hello"}"#);
    }

    #[test]
    fn test_gemini_response_first_text() {
        let json = r#"{
            "candidates": [{
                "content": { "parts": [{ "text": "{\"totalWeightGrams\": 1}" }] }
            }]
        }"#;
        let response: GeminiResponse = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(response.first_text().as_deref(), Some("{\"totalWeightGrams\": 1}"));
    }

    #[test]
    fn test_gemini_response_empty() {
        let response: GeminiResponse = serde_json::from_str("{}").unwrap();
        assert!(response.first_text().is_none());

        let json = r#"{"candidates": [{"content": {"parts": [{"text": "  "}]}}]}"#;
        let response: GeminiResponse = serde_json::from_str(json).unwrap();
        assert!(response.first_text().is_none());

        let json = r#"{"candidates": [{"finishReason": "SAFETY"}]}"#;
        let response: GeminiResponse = serde_json::from_str(json).unwrap();
        assert!(response.first_text().is_none());
    }

    #[test]
    fn test_endpoint_url() {
        assert_eq!(
            endpoint_url("", "gemini-2.5-flash"),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
        assert_eq!(endpoint_url("http://localhost:8080/", "m"), "http://localhost:8080/m:generateContent");
    }
}
