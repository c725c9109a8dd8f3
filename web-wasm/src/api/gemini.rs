//! Gemini API連携（fetch）
//!
//! ブラウザから直接 generateContent を呼ぶ `VisionModel` 実装。
//! キーはビルド時の環境変数 `GEMINI_API_KEY` から埋め込む。

use ecowaste_common::analysis::{AnalysisRequest, ModelError, VisionModel};
use ecowaste_common::gemini::{endpoint_url, GeminiRequest, GeminiResponse};
use ecowaste_common::prompts::{DEFAULT_MODEL, GEMINI_API_BASE};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

#[derive(Debug, Clone)]
pub struct GeminiWebClient {
    api_key: Option<String>,
    model: String,
}

impl GeminiWebClient {
    pub fn new(api_key: Option<String>, model: impl Into<String>) -> Self {
        Self { api_key, model: model.into() }
    }

    /// ビルド時に埋め込まれたキーを使う
    pub fn from_build_env() -> Self {
        let api_key = option_env!("GEMINI_API_KEY")
            .or(option_env!("API_KEY"))
            .filter(|key| !key.trim().is_empty())
            .map(str::to_string);
        Self::new(api_key, DEFAULT_MODEL)
    }

    async fn call_gemini_api(&self, request: &GeminiRequest) -> Result<String, ModelError> {
        let api_key = self.api_key.as_deref().ok_or(ModelError::MissingApiKey)?;
        let url = endpoint_url(GEMINI_API_BASE, &self.model);
        let body = serde_json::to_string(request).map_err(|e| ModelError::Decode(e.to_string()))?;

        let resp = fetch_json(&url, api_key, &body).await.map_err(|e| {
            let message = describe(&e);
            gloo::console::error!(format!("Gemini API request failed: {}", message));
            ModelError::Transport(message)
        })?;

        if !resp.ok() {
            let status = resp.status();
            let body = match resp.text() {
                Ok(promise) => JsFuture::from(promise)
                    .await
                    .ok()
                    .and_then(|v| v.as_string())
                    .unwrap_or_default(),
                Err(_) => String::new(),
            };
            gloo::console::error!(format!("Gemini API error: {} - {}", status, body));
            return Err(ModelError::Status { status, body });
        }

        let json = match resp.json() {
            Ok(promise) => JsFuture::from(promise).await,
            Err(e) => Err(e),
        }
        .map_err(|e| ModelError::Decode(describe(&e)))?;
        let payload: GeminiResponse =
            serde_wasm_bindgen::from_value(json).map_err(|e| ModelError::Decode(e.to_string()))?;

        // 空応答は空文字列で返し、判定はパーサーに任せる
        Ok(payload.first_text().unwrap_or_default())
    }
}

impl VisionModel for GeminiWebClient {
    async fn generate(&self, request: &AnalysisRequest) -> Result<String, ModelError> {
        let body = GeminiRequest::from_analysis(request);
        self.call_gemini_api(&body).await
    }
}

async fn fetch_json(url: &str, api_key: &str, body: &str) -> Result<Response, JsValue> {
    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&JsValue::from_str(body));

    let request = Request::new_with_str_and_init(url, &opts)?;
    request.headers().set("Content-Type", "application/json")?;
    request.headers().set("x-goog-api-key", api_key)?;

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window unavailable"))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
    resp_value.dyn_into()
}

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_client() {
        let client = GeminiWebClient::new(None, "gemini-2.5-flash");
        assert!(client.api_key.is_none());
        assert_eq!(client.model, "gemini-2.5-flash");
    }
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use ecowaste_common::EncodedImage;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    async fn wasm_missing_api_key_surfaces_on_first_call() {
        let client = GeminiWebClient::new(None, DEFAULT_MODEL);
        let image = EncodedImage::parse("data:image/png;base64,AAAA").expect("valid data url");
        let err = client
            .generate(&AnalysisRequest::for_image(&image))
            .await
            .expect_err("missing key");
        assert_eq!(err, ModelError::MissingApiKey);
    }
}
